//! Per-network address and trait references.
//!
//! Every generated contract points at a handful of well-known on-chain principals
//! (the deployer, sBTC, the Bitflow core, trait definitions). Their values differ per
//! network, so they are looked up through a [`NetworkReferences`] value that is built
//! once per run and passed by reference to whatever needs it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ForgeError;

/// Target Stacks network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Mocknet,
}

impl Network {
    pub const ALL: [Network; 4] = [
        Network::Mainnet,
        Network::Testnet,
        Network::Devnet,
        Network::Mocknet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
            Self::Mocknet => "mocknet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            "mocknet" => Ok(Self::Mocknet),
            other => Err(ForgeError::UnknownNetwork(other.to_string())),
        }
    }
}

/// A well-known address (standard principal or contract principal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressRef {
    Deployer,
    Sbtc,
    BitflowCore,
    AibtcRunCost,
    FaktoryRegistry,
}

impl AddressRef {
    pub const ALL: [AddressRef; 5] = [
        AddressRef::Deployer,
        AddressRef::Sbtc,
        AddressRef::BitflowCore,
        AddressRef::AibtcRunCost,
        AddressRef::FaktoryRegistry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deployer => "DEPLOYER",
            Self::Sbtc => "SBTC",
            Self::BitflowCore => "BITFLOW_CORE",
            Self::AibtcRunCost => "AIBTC_RUN_COST",
            Self::FaktoryRegistry => "FAKTORY_REGISTRY",
        }
    }
}

/// A well-known trait definition, referenced as `<principal>.<contract>.<trait>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraitRef {
    // External
    BaseSip009,
    BaseSip010,
    FaktorySip010,
    BitflowPool,
    BitflowSip010,
    // DAO
    DaoBase,
    DaoProposal,
    DaoExtension,
    DaoAction,
    DaoActionProposalVoting,
    DaoCharter,
    DaoEpoch,
    DaoMessaging,
    DaoRewardsAccount,
    DaoToken,
    DaoTokenDex,
    DaoTokenOwner,
    DaoTokenPool,
    DaoTreasury,
    DaoUsers,
    // Agent
    AgentAccount,
    AgentAccountProposals,
    AgentAccountConfig,
    AgentAccountSwaps,
    AgentDaoSwapAdapter,
    AgentFaktoryBuySell,
}

impl TraitRef {
    pub const ALL: [TraitRef; 26] = [
        TraitRef::BaseSip009,
        TraitRef::BaseSip010,
        TraitRef::FaktorySip010,
        TraitRef::BitflowPool,
        TraitRef::BitflowSip010,
        TraitRef::DaoBase,
        TraitRef::DaoProposal,
        TraitRef::DaoExtension,
        TraitRef::DaoAction,
        TraitRef::DaoActionProposalVoting,
        TraitRef::DaoCharter,
        TraitRef::DaoEpoch,
        TraitRef::DaoMessaging,
        TraitRef::DaoRewardsAccount,
        TraitRef::DaoToken,
        TraitRef::DaoTokenDex,
        TraitRef::DaoTokenOwner,
        TraitRef::DaoTokenPool,
        TraitRef::DaoTreasury,
        TraitRef::DaoUsers,
        TraitRef::AgentAccount,
        TraitRef::AgentAccountProposals,
        TraitRef::AgentAccountConfig,
        TraitRef::AgentAccountSwaps,
        TraitRef::AgentDaoSwapAdapter,
        TraitRef::AgentFaktoryBuySell,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BaseSip009 => "BASE_SIP009",
            Self::BaseSip010 => "BASE_SIP010",
            Self::FaktorySip010 => "FAKTORY_SIP010",
            Self::BitflowPool => "BITFLOW_POOL",
            Self::BitflowSip010 => "BITFLOW_SIP010",
            Self::DaoBase => "DAO_BASE",
            Self::DaoProposal => "DAO_PROPOSAL",
            Self::DaoExtension => "DAO_EXTENSION",
            Self::DaoAction => "DAO_ACTION",
            Self::DaoActionProposalVoting => "DAO_ACTION_PROPOSAL_VOTING",
            Self::DaoCharter => "DAO_CHARTER",
            Self::DaoEpoch => "DAO_EPOCH",
            Self::DaoMessaging => "DAO_MESSAGING",
            Self::DaoRewardsAccount => "DAO_REWARDS_ACCOUNT",
            Self::DaoToken => "DAO_TOKEN",
            Self::DaoTokenDex => "DAO_TOKEN_DEX",
            Self::DaoTokenOwner => "DAO_TOKEN_OWNER",
            Self::DaoTokenPool => "DAO_TOKEN_POOL",
            Self::DaoTreasury => "DAO_TREASURY",
            Self::DaoUsers => "DAO_USERS",
            Self::AgentAccount => "AGENT_ACCOUNT",
            Self::AgentAccountProposals => "AGENT_ACCOUNT_PROPOSALS",
            Self::AgentAccountConfig => "AGENT_ACCOUNT_CONFIG",
            Self::AgentAccountSwaps => "AGENT_ACCOUNT_SWAPS",
            Self::AgentDaoSwapAdapter => "AGENT_DAO_SWAP_ADAPTER",
            Self::AgentFaktoryBuySell => "AGENT_FAKTORY_BUY_SELL",
        }
    }
}

/// Principals that host the shared DAO / agent trait contracts on each network.
const MAINNET_TRAIT_DEPLOYER: &str = "SP29CK9990DQGE9RGTT1VEQTTYH8KY4E3JE5XP4EC";
const TESTNET_TRAIT_DEPLOYER: &str = "ST1Q9YZ2NY4KVBB08E005HAK3FSM8S3RX2WARP9Q1";
const TESTNET_EXTERNAL_DEPLOYER: &str = "STTWD9SPRQVD3P733V89SV0P8RZRZNQADG034F0A";

/// The Clarinet devnet deployer. Templates are authored against this principal.
pub const DEVNET_DEPLOYER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

/// Address and trait tables for one network.
#[derive(Debug, Clone)]
pub struct NetworkReferences {
    network: Network,
}

impl NetworkReferences {
    pub fn for_network(network: Network) -> Self {
        Self { network }
    }

    /// Parse a network name and build its references.
    ///
    /// Unknown names fail with [`ForgeError::UnknownNetwork`].
    pub fn from_name(name: &str) -> crate::error::Result<Self> {
        Ok(Self::for_network(name.parse()?))
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Look up a well-known address.
    pub fn address(&self, reference: AddressRef) -> String {
        match (self.network, reference) {
            (Network::Mainnet, AddressRef::Deployer) => MAINNET_TRAIT_DEPLOYER.to_string(),
            (Network::Mainnet, AddressRef::Sbtc) => {
                "SM3VDXK3WZZSA84XXFKAFAF15NNZX32CTSG82JFQ4.sbtc-token".to_string()
            }
            (Network::Mainnet, AddressRef::BitflowCore) => {
                "SM1793C4R5PZ4NS4VQ4WMP7SKKYVH8JZEWSZ9HCCR.xyk-core-v-1-2".to_string()
            }
            (Network::Mainnet, AddressRef::AibtcRunCost) => {
                format!("{MAINNET_TRAIT_DEPLOYER}.aibtc-dao-run-cost")
            }
            (Network::Mainnet, AddressRef::FaktoryRegistry) => {
                format!("{MAINNET_TRAIT_DEPLOYER}.agent-account-registry")
            }

            (Network::Testnet, AddressRef::Deployer) => TESTNET_TRAIT_DEPLOYER.to_string(),
            (Network::Testnet, AddressRef::Sbtc) => {
                "ST1F7QA2MDF17S807EPA36TSS8AMEFY4KA9TVGWXT.sbtc-token".to_string()
            }
            (Network::Testnet, AddressRef::BitflowCore) => {
                format!("{TESTNET_EXTERNAL_DEPLOYER}.xyk-core-v-1-2")
            }
            (Network::Testnet, AddressRef::AibtcRunCost) => {
                format!("{TESTNET_TRAIT_DEPLOYER}.aibtc-dao-run-cost")
            }
            (Network::Testnet, AddressRef::FaktoryRegistry) => {
                format!("{TESTNET_TRAIT_DEPLOYER}.agent-account-registry")
            }

            (Network::Devnet | Network::Mocknet, AddressRef::Deployer) => {
                DEVNET_DEPLOYER.to_string()
            }
            (Network::Devnet | Network::Mocknet, AddressRef::Sbtc) => {
                "STV9K21TBFAK4KNRJXF5DFP8N7W46G4V9RJ5XDY2.sbtc-token".to_string()
            }
            (Network::Devnet | Network::Mocknet, AddressRef::BitflowCore) => {
                format!("{DEVNET_DEPLOYER}.xyk-core-v-1-2")
            }
            (Network::Devnet | Network::Mocknet, AddressRef::AibtcRunCost) => {
                format!("{DEVNET_DEPLOYER}.aibtc-dao-run-cost")
            }
            (Network::Devnet | Network::Mocknet, AddressRef::FaktoryRegistry) => {
                format!("{DEVNET_DEPLOYER}.agent-account-registry")
            }
        }
    }

    /// Look up a well-known trait reference.
    pub fn trait_ref(&self, reference: TraitRef) -> String {
        let (contract, name) = trait_location(self.network, reference);
        let principal = match (self.network, reference) {
            (Network::Mainnet, TraitRef::BaseSip009) => "SP2PABAF9FTAJYNFZH93XENAJ8FVY99RRM50D2JG9",
            (Network::Mainnet, TraitRef::BaseSip010) => "SP3FBR2AGK5H9QBDH3EEN6DF8EK8JY7RX8QJ5SVTE",
            (Network::Mainnet, TraitRef::FaktorySip010) => {
                "SP3XXMS38VTAWTVPE5682XSBFXPTH7XCPEBTX8AN2"
            }
            (Network::Mainnet, TraitRef::BitflowPool | TraitRef::BitflowSip010) => {
                "SM1793C4R5PZ4NS4VQ4WMP7SKKYVH8JZEWSZ9HCCR"
            }
            (Network::Mainnet, _) => MAINNET_TRAIT_DEPLOYER,
            (
                Network::Testnet,
                TraitRef::BaseSip009
                | TraitRef::BaseSip010
                | TraitRef::FaktorySip010
                | TraitRef::BitflowPool
                | TraitRef::BitflowSip010,
            ) => TESTNET_EXTERNAL_DEPLOYER,
            (Network::Testnet, _) => TESTNET_TRAIT_DEPLOYER,
            (Network::Devnet | Network::Mocknet, _) => DEVNET_DEPLOYER,
        };
        format!("{principal}.{contract}.{name}")
    }

    /// All addresses in declaration order.
    pub fn addresses(&self) -> Vec<(AddressRef, String)> {
        AddressRef::ALL
            .iter()
            .map(|r| (*r, self.address(*r)))
            .collect()
    }

    /// All trait references in declaration order.
    pub fn traits(&self) -> Vec<(TraitRef, String)> {
        TraitRef::ALL
            .iter()
            .map(|r| (*r, self.trait_ref(*r)))
            .collect()
    }
}

/// Contract and trait name for a trait reference. Testnet deploys a few DAO trait
/// definitions and the base DAO trait under different names.
fn trait_location(network: Network, reference: TraitRef) -> (&'static str, &'static str) {
    let testnet = network == Network::Testnet;
    match reference {
        TraitRef::BaseSip009 => ("nft-trait", "nft-trait"),
        TraitRef::BaseSip010 => ("sip-010-trait-ft-standard", "sip-010-trait"),
        TraitRef::FaktorySip010 => ("faktory-trait-v1", "sip-010-trait"),
        TraitRef::BitflowPool => ("xyk-pool-trait-v-1-2", "xyk-pool-trait"),
        TraitRef::BitflowSip010 if testnet => ("sip-010-trait-ft-standard", "sip-010-trait"),
        TraitRef::BitflowSip010 => ("sip-010-trait-ft-standard-v-1-1", "sip-010-trait"),
        TraitRef::DaoBase if testnet => ("aibtc-base-dao-trait", "aibtc-base-dao"),
        TraitRef::DaoBase => ("aibtc-dao-v3", "aibtc-base-dao"),
        TraitRef::DaoProposal => ("aibtc-dao-traits", "proposal"),
        TraitRef::DaoExtension => ("aibtc-dao-traits", "extension"),
        TraitRef::DaoAction => ("aibtc-dao-traits", "action"),
        TraitRef::DaoActionProposalVoting => ("aibtc-dao-traits", "action-proposal-voting"),
        TraitRef::DaoCharter if testnet => ("aibtc-dao-traits", "dao-charter"),
        TraitRef::DaoCharter => ("aibtc-dao-traits", "charter"),
        TraitRef::DaoEpoch if testnet => ("aibtc-dao-traits", "dao-epoch"),
        TraitRef::DaoEpoch => ("aibtc-dao-traits", "epoch"),
        TraitRef::DaoMessaging => ("aibtc-dao-traits", "messaging"),
        TraitRef::DaoRewardsAccount => ("aibtc-dao-traits", "rewards-account"),
        TraitRef::DaoToken => ("aibtc-dao-traits", "token"),
        TraitRef::DaoTokenDex => ("aibtc-dao-traits", "faktory-dex"),
        TraitRef::DaoTokenOwner => ("aibtc-dao-traits", "token-owner"),
        TraitRef::DaoTokenPool => ("aibtc-dao-traits", "bitflow-pool"),
        TraitRef::DaoTreasury => ("aibtc-dao-traits", "treasury"),
        TraitRef::DaoUsers if testnet => ("aibtc-dao-traits", "dao-users"),
        TraitRef::DaoUsers => ("aibtc-dao-traits", "users"),
        TraitRef::AgentAccount => ("aibtc-agent-account-traits", "aibtc-account"),
        TraitRef::AgentAccountProposals => {
            ("aibtc-agent-account-traits", "aibtc-account-proposals")
        }
        TraitRef::AgentAccountConfig => ("aibtc-agent-account-traits", "aibtc-account-config"),
        TraitRef::AgentAccountSwaps => ("aibtc-agent-account-traits", "aibtc-account-swaps"),
        TraitRef::AgentDaoSwapAdapter => ("aibtc-agent-account-traits", "aibtc-dao-swap-adapter"),
        TraitRef::AgentFaktoryBuySell => ("aibtc-agent-account-traits", "faktory-buy-sell"),
    }
}
