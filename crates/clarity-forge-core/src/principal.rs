//! Stacks principal parsing and c32check address validation.
//!
//! A standard principal looks like `ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM`:
//! the literal `S`, one c32 character encoding the version byte, then the c32
//! encoding of `hash160 || checksum` where the checksum is the first four bytes of
//! `sha256(sha256(version || hash160))`.

use sha2::{Digest, Sha256};

const C32_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// hash160 (20 bytes) + checksum (4 bytes).
const PAYLOAD_LEN: usize = 24;

/// Decode one c32 character, accepting lowercase and the usual look-alikes.
fn c32_value(c: char) -> Option<u8> {
    let normalized = match c.to_ascii_uppercase() {
        'O' => '0',
        'L' | 'I' => '1',
        other => other,
    };
    C32_ALPHABET
        .iter()
        .position(|&b| b as char == normalized)
        .map(|p| p as u8)
}

/// Decode a c32 string into exactly `PAYLOAD_LEN` big-endian bytes.
fn c32_decode_payload(s: &str) -> Option<[u8; PAYLOAD_LEN]> {
    // One spare leading byte to detect overflow.
    let mut buf = [0u8; PAYLOAD_LEN + 1];
    for c in s.chars() {
        let mut carry = c32_value(c)? as u32;
        for byte in buf.iter_mut().rev() {
            let acc = (*byte as u32) * 32 + carry;
            *byte = (acc & 0xff) as u8;
            carry = acc >> 8;
        }
        if carry != 0 {
            return None;
        }
    }
    if buf[0] != 0 {
        return None;
    }
    let mut payload = [0u8; PAYLOAD_LEN];
    payload.copy_from_slice(&buf[1..]);
    Some(payload)
}

/// Returns `true` if `address` is a well-formed standard Stacks principal with a
/// valid checksum.
pub fn is_valid_address(address: &str) -> bool {
    let Some(rest) = address.strip_prefix('S') else {
        return false;
    };
    let mut chars = rest.chars();
    let Some(version) = chars.next().and_then(c32_value) else {
        return false;
    };
    let body = chars.as_str();
    // Small leading payload bytes shorten the encoding; the checksum rejects the rest.
    if body.is_empty() || body.len() > 48 {
        return false;
    }
    let Some(payload) = c32_decode_payload(body) else {
        return false;
    };
    let (hash160, checksum) = payload.split_at(20);

    let mut data = Vec::with_capacity(21);
    data.push(version);
    data.extend_from_slice(hash160);
    let digest = Sha256::digest(Sha256::digest(&data));
    digest[..4] == *checksum
}

/// The principal part of a value: everything before the first `.`.
pub fn principal_part(value: &str) -> &str {
    value.split('.').next().unwrap_or(value)
}

/// Prefix `'` (Clarity principal literal) onto values whose principal part is a
/// valid address. Values already carrying the prefix are returned unchanged.
pub fn to_principal_literal(value: &str) -> String {
    if value.starts_with('\'') || !is_valid_address(principal_part(value)) {
        value.to_string()
    } else {
        format!("'{value}")
    }
}

/// A fully-qualified trait identifier split into its components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitIdentifier<'a> {
    pub principal: &'a str,
    pub contract: &'a str,
    pub name: &'a str,
}

impl<'a> TraitIdentifier<'a> {
    /// Split `<principal>.<contract>.<trait>`. Returns `None` for any other shape.
    pub fn parse(value: &'a str) -> Option<Self> {
        let mut parts = value.splitn(3, '.');
        let principal = parts.next()?;
        let contract = parts.next()?;
        let name = parts.next()?;
        if principal.is_empty() || contract.is_empty() || name.is_empty() || name.contains('.') {
            return None;
        }
        Some(Self {
            principal,
            contract,
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_testnet_address() {
        assert!(is_valid_address("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"));
    }

    #[test]
    fn test_valid_mainnet_address() {
        assert!(is_valid_address("SP3FBR2AGK5H9QBDH3EEN6DF8EK8JY7RX8QJ5SVTE"));
    }

    #[test]
    fn test_short_encodings_accepted() {
        assert!(is_valid_address("STV9K21TBFAK4KNRJXF5DFP8N7W46G4V9RJ5XDY2"));
        assert!(is_valid_address("STTWD9SPRQVD3P733V89SV0P8RZRZNQADG034F0A"));
        assert_eq!(
            to_principal_literal("STV9K21TBFAK4KNRJXF5DFP8N7W46G4V9RJ5XDY2.sbtc-token"),
            "'STV9K21TBFAK4KNRJXF5DFP8N7W46G4V9RJ5XDY2.sbtc-token"
        );
    }

    #[test]
    fn test_short_garbage_rejected() {
        assert!(!is_valid_address("ST1"));
        assert!(!is_valid_address("STV9K21TBFAK4KNRJXF5DFP8N7W46G4V9RJ5XDY3"));
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        // last character altered
        assert!(!is_valid_address("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGN"));
    }

    #[test]
    fn test_malformed_addresses_rejected() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("S"));
        assert!(!is_valid_address("TESTDAO"));
        assert!(!is_valid_address("aibtc-faktory"));
        assert!(!is_valid_address("XT1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"));
        assert!(!is_valid_address("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRT!GZGM"));
    }

    #[test]
    fn test_principal_literal_prefixing() {
        assert_eq!(
            to_principal_literal("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.aibtc-dao-traits.extension"),
            "'ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.aibtc-dao-traits.extension"
        );
        assert_eq!(
            to_principal_literal("'ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"),
            "'ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"
        );
        assert_eq!(to_principal_literal(".test-faktory"), ".test-faktory");
        assert_eq!(to_principal_literal("8"), "8");
    }

    #[test]
    fn test_trait_identifier_parse() {
        let id = TraitIdentifier::parse("SP000.aibtc-dao-traits.extension").unwrap();
        assert_eq!(id.principal, "SP000");
        assert_eq!(id.contract, "aibtc-dao-traits");
        assert_eq!(id.name, "extension");
        assert!(TraitIdentifier::parse("SP000.only-contract").is_none());
        assert!(TraitIdentifier::parse("a.b.c.d").is_none());
    }
}
