//! Contract definitions and their declared template dependencies.
//!
//! Each [`ContractDefinition`] records which substitution keys its template is allowed
//! to consume. Declarations are append-only and come in four kinds (see [`Dependency`]):
//! addresses, traits, other DAO contracts, and runtime values. The union of their keys
//! is what the [`scanner`](crate::scanner) checks template directives against.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::contract_types::{deployment_order, template_path, ContractSubtype, ContractType};
use crate::directive;
use crate::network::{AddressRef, TraitRef};

/// One declared dependency of a contract template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dependency {
    /// A well-known address, substituted under `key`.
    Address {
        #[serde(rename = "ref")]
        reference: AddressRef,
        key: String,
    },
    /// A well-known trait, substituted under `key`.
    Trait {
        #[serde(rename = "ref")]
        reference: TraitRef,
        key: String,
    },
    /// Another contract in the same deployment.
    Contract {
        key: String,
        category: ContractType,
        subcategory: ContractSubtype,
    },
    /// A value supplied at generation time.
    Runtime { key: String },
}

impl Dependency {
    /// The key as stored in the declaration.
    pub fn key(&self) -> &str {
        match self {
            Dependency::Address { key, .. }
            | Dependency::Trait { key, .. }
            | Dependency::Contract { key, .. }
            | Dependency::Runtime { key } => key,
        }
    }

    /// The key name this declaration authorizes in templates.
    ///
    /// Runtime values registered from a directive scan are stored as
    /// `toReplace/keyName`; only the part after the first `/` names the key.
    pub fn declared_key(&self) -> &str {
        match self {
            Dependency::Runtime { key } => match key.split_once('/') {
                Some((_, key_name)) => key_name,
                None => key,
            },
            other => other.key(),
        }
    }
}

/// In-memory record describing one templated contract.
///
/// Serializes as a registry entry: empty dependency lists and unset optional fields
/// are left out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub contract_type: ContractType,
    pub subtype: ContractSubtype,
    /// Position in a DAO deployment; `0` when the contract has no fixed slot.
    pub deployment_order: u32,
    /// Path relative to the contracts root.
    pub template_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarity_version: Option<u8>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    required_addresses: Vec<Dependency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    required_traits: Vec<Dependency>,
    #[serde(default, rename = "requiredContractAddresses", skip_serializing_if = "Vec::is_empty")]
    required_contracts: Vec<Dependency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    required_runtime_values: Vec<Dependency>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hash: Option<String>,
}

impl ContractDefinition {
    /// Create a definition whose template path follows the per-type directory layout.
    pub fn new(name: impl Into<String>, contract_type: ContractType, subtype: ContractSubtype) -> Self {
        let name = name.into();
        let template_path = template_path(contract_type, &name);
        Self::with_template_path(name, contract_type, subtype, template_path)
    }

    pub fn with_template_path(
        name: impl Into<String>,
        contract_type: ContractType,
        subtype: ContractSubtype,
        template_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            contract_type,
            subtype,
            deployment_order: deployment_order(contract_type, subtype),
            template_path: template_path.into(),
            clarity_version: None,
            required_addresses: Vec::new(),
            required_traits: Vec::new(),
            required_contracts: Vec::new(),
            required_runtime_values: Vec::new(),
            display_name: None,
            source: None,
            hash: None,
        }
    }

    pub fn set_clarity_version(&mut self, version: u8) -> &mut Self {
        self.clarity_version = Some(version);
        self
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) -> &mut Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn add_address_dependency(&mut self, reference: AddressRef, key: impl Into<String>) -> &mut Self {
        self.required_addresses.push(Dependency::Address {
            reference,
            key: key.into(),
        });
        self
    }

    pub fn add_trait_dependency(&mut self, reference: TraitRef, key: impl Into<String>) -> &mut Self {
        self.required_traits.push(Dependency::Trait {
            reference,
            key: key.into(),
        });
        self
    }

    pub fn add_contract_dependency(
        &mut self,
        key: impl Into<String>,
        category: ContractType,
        subcategory: ContractSubtype,
    ) -> &mut Self {
        self.required_contracts.push(Dependency::Contract {
            key: key.into(),
            category,
            subcategory,
        });
        self
    }

    pub fn add_runtime_value(&mut self, key: impl Into<String>) -> &mut Self {
        self.required_runtime_values
            .push(Dependency::Runtime { key: key.into() });
        self
    }

    /// Register every unique `toReplace/keyName` directive in `template` as a runtime
    /// value. Duplicates are collapsed within this call only; earlier declarations are
    /// not consulted.
    pub fn scan_template_variables(&mut self, template: &str) -> &mut Self {
        let mut seen = HashSet::new();
        for found in directive::scan_directives(template) {
            let key = found.composite_key();
            if seen.insert(key.clone()) {
                self.add_runtime_value(key);
            }
        }
        self
    }

    pub fn required_addresses(&self) -> &[Dependency] {
        &self.required_addresses
    }

    pub fn required_traits(&self) -> &[Dependency] {
        &self.required_traits
    }

    pub fn required_contracts(&self) -> &[Dependency] {
        &self.required_contracts
    }

    pub fn required_runtime_values(&self) -> &[Dependency] {
        &self.required_runtime_values
    }

    /// All dependencies: addresses, traits, contracts, then runtime values.
    pub fn dependencies(&self) -> Vec<Dependency> {
        self.required_addresses
            .iter()
            .chain(&self.required_traits)
            .chain(&self.required_contracts)
            .chain(&self.required_runtime_values)
            .cloned()
            .collect()
    }

    /// Key names this contract's template may reference.
    pub fn declared_keys(&self) -> BTreeSet<String> {
        self.required_addresses
            .iter()
            .chain(&self.required_traits)
            .chain(&self.required_contracts)
            .chain(&self.required_runtime_values)
            .map(|d| d.declared_key().to_string())
            .collect()
    }

    /// Store the generated source and its SHA-256 hash.
    pub fn set_generated(&mut self, source: String) -> &mut Self {
        self.hash = Some(hex::encode(Sha256::digest(source.as_bytes())));
        self.source = Some(source);
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }
}
