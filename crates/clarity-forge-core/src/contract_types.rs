//! Contract categories, subcategories, and their canonical template names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ForgeError;

/// The token placeholder embedded in canonical contract names.
pub const TEMPLATE_SYMBOL: &str = "aibtc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractType {
    /// Agent account.
    Agent,
    /// Base DAO.
    Base,
    /// Action proposal extensions.
    Actions,
    /// DAO extensions.
    Extensions,
    /// DAO proposals.
    Proposals,
    /// Token, dex, pool, prelaunch.
    Token,
    /// Swap adapters for agent accounts.
    Trading,
    /// Core contracts such as the run-cost contract.
    Core,
}

impl ContractType {
    pub const ALL: [ContractType; 8] = [
        ContractType::Agent,
        ContractType::Base,
        ContractType::Actions,
        ContractType::Extensions,
        ContractType::Proposals,
        ContractType::Token,
        ContractType::Trading,
        ContractType::Core,
    ];

    /// Types that make up a DAO deployment.
    pub const DAO: [ContractType; 5] = [
        ContractType::Base,
        ContractType::Actions,
        ContractType::Extensions,
        ContractType::Proposals,
        ContractType::Token,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "AGENT",
            Self::Base => "BASE",
            Self::Actions => "ACTIONS",
            Self::Extensions => "EXTENSIONS",
            Self::Proposals => "PROPOSALS",
            Self::Token => "TOKEN",
            Self::Trading => "TRADING",
            Self::Core => "CORE",
        }
    }

    /// Valid subtypes for this type, in canonical order.
    pub fn subtypes(&self) -> Vec<ContractSubtype> {
        CONTRACT_NAMES
            .iter()
            .filter(|(t, _, _)| t == self)
            .map(|(_, s, _)| *s)
            .collect()
    }

    /// Directory (under the contracts root) holding templates of this type.
    pub fn template_dir(&self) -> Option<&'static str> {
        match self {
            Self::Base => Some("dao"),
            Self::Actions => Some("dao/actions"),
            Self::Extensions => Some("dao/extensions"),
            Self::Proposals => Some("dao/proposals"),
            Self::Token => Some("dao/token"),
            Self::Agent => Some("agent"),
            Self::Trading | Self::Core => None,
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractType {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ForgeError::UnknownContractType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractSubtype {
    AgentAccount,
    Dao,
    SendMessage,
    ActionProposalVoting,
    DaoCharter,
    DaoEpoch,
    DaoUsers,
    OnchainMessaging,
    RewardsAccount,
    TokenOwner,
    Treasury,
    InitializeDao,
    Dex,
    Pool,
    Prelaunch,
    FaktorySbtc,
    BitflowSbtc,
    FaktoryBuyAndDeposit,
    BitflowBuyAndDeposit,
    DaoRunCost,
}

impl ContractSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AgentAccount => "AGENT_ACCOUNT",
            Self::Dao => "DAO",
            Self::SendMessage => "SEND_MESSAGE",
            Self::ActionProposalVoting => "ACTION_PROPOSAL_VOTING",
            Self::DaoCharter => "DAO_CHARTER",
            Self::DaoEpoch => "DAO_EPOCH",
            Self::DaoUsers => "DAO_USERS",
            Self::OnchainMessaging => "ONCHAIN_MESSAGING",
            Self::RewardsAccount => "REWARDS_ACCOUNT",
            Self::TokenOwner => "TOKEN_OWNER",
            Self::Treasury => "TREASURY",
            Self::InitializeDao => "INITIALIZE_DAO",
            Self::Dex => "DEX",
            Self::Pool => "POOL",
            Self::Prelaunch => "PRELAUNCH",
            Self::FaktorySbtc => "FAKTORY_SBTC",
            Self::BitflowSbtc => "BITFLOW_SBTC",
            Self::FaktoryBuyAndDeposit => "FAKTORY_BUY_AND_DEPOSIT",
            Self::BitflowBuyAndDeposit => "BITFLOW_BUY_AND_DEPOSIT",
            Self::DaoRunCost => "DAO_RUN_COST",
        }
    }
}

impl fmt::Display for ContractSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractSubtype {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CONTRACT_NAMES
            .iter()
            .map(|(_, subtype, _)| *subtype)
            .find(|subtype| subtype.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ForgeError::UnknownContractSubtype(s.to_string()))
    }
}

/// Canonical template name for every valid type/subtype pair.
pub const CONTRACT_NAMES: &[(ContractType, ContractSubtype, &str)] = &[
    (ContractType::Agent, ContractSubtype::AgentAccount, "aibtc-agent-account"),
    (ContractType::Base, ContractSubtype::Dao, "aibtc-base-dao"),
    (ContractType::Actions, ContractSubtype::SendMessage, "aibtc-action-send-message"),
    (ContractType::Extensions, ContractSubtype::ActionProposalVoting, "aibtc-action-proposal-voting"),
    (ContractType::Extensions, ContractSubtype::DaoCharter, "aibtc-dao-charter"),
    (ContractType::Extensions, ContractSubtype::DaoEpoch, "aibtc-dao-epoch"),
    (ContractType::Extensions, ContractSubtype::DaoUsers, "aibtc-dao-users"),
    (ContractType::Extensions, ContractSubtype::OnchainMessaging, "aibtc-onchain-messaging"),
    (ContractType::Extensions, ContractSubtype::RewardsAccount, "aibtc-rewards-account"),
    (ContractType::Extensions, ContractSubtype::TokenOwner, "aibtc-token-owner"),
    (ContractType::Extensions, ContractSubtype::Treasury, "aibtc-treasury"),
    (ContractType::Proposals, ContractSubtype::InitializeDao, "aibtc-base-initialize-dao"),
    (ContractType::Token, ContractSubtype::Dao, "aibtc-faktory"),
    (ContractType::Token, ContractSubtype::Dex, "aibtc-faktory-dex"),
    (ContractType::Token, ContractSubtype::Pool, "xyk-pool-sbtc-aibtc-v-1-1"),
    (ContractType::Token, ContractSubtype::Prelaunch, "aibtc-pre-faktory"),
    (ContractType::Trading, ContractSubtype::FaktorySbtc, "aibtc-acct-swap-faktory-aibtc-sbtc"),
    (ContractType::Trading, ContractSubtype::BitflowSbtc, "aibtc-acct-swap-bitflow-aibtc-sbtc"),
    (ContractType::Trading, ContractSubtype::FaktoryBuyAndDeposit, "aibtc-faktory-buy-and-deposit"),
    (ContractType::Trading, ContractSubtype::BitflowBuyAndDeposit, "aibtc-bitflow-buy-and-deposit"),
    (ContractType::Core, ContractSubtype::DaoRunCost, "aibtc-dao-run-cost"),
];

/// Canonical name for a type/subtype pair, if the pair is valid.
pub fn canonical_name(contract_type: ContractType, subtype: ContractSubtype) -> Option<&'static str> {
    CONTRACT_NAMES
        .iter()
        .find(|(t, s, _)| *t == contract_type && *s == subtype)
        .map(|(_, _, name)| *name)
}

/// Deploy position for DAO and agent contracts; lower deploys first. The agent account
/// is independent of the DAO and may deploy at any time.
pub const DEPLOYMENT_ORDER: &[(ContractType, ContractSubtype, u32)] = &[
    (ContractType::Agent, ContractSubtype::AgentAccount, 1),
    (ContractType::Token, ContractSubtype::Dao, 10),
    (ContractType::Token, ContractSubtype::Prelaunch, 11),
    (ContractType::Token, ContractSubtype::Pool, 12),
    (ContractType::Token, ContractSubtype::Dex, 13),
    (ContractType::Base, ContractSubtype::Dao, 20),
    (ContractType::Extensions, ContractSubtype::DaoUsers, 30),
    (ContractType::Extensions, ContractSubtype::Treasury, 31),
    (ContractType::Extensions, ContractSubtype::RewardsAccount, 32),
    (ContractType::Extensions, ContractSubtype::ActionProposalVoting, 33),
    (ContractType::Extensions, ContractSubtype::DaoCharter, 34),
    (ContractType::Extensions, ContractSubtype::DaoEpoch, 35),
    (ContractType::Extensions, ContractSubtype::OnchainMessaging, 36),
    (ContractType::Extensions, ContractSubtype::TokenOwner, 37),
    (ContractType::Actions, ContractSubtype::SendMessage, 40),
    (ContractType::Proposals, ContractSubtype::InitializeDao, 50),
];

/// Deployment order for a type/subtype pair; `0` for contracts outside the table.
pub fn deployment_order(contract_type: ContractType, subtype: ContractSubtype) -> u32 {
    DEPLOYMENT_ORDER
        .iter()
        .find(|(t, s, _)| *t == contract_type && *s == subtype)
        .map_or(0, |(_, _, order)| *order)
}

/// Template path (relative to the contracts root) for a contract.
pub fn template_path(contract_type: ContractType, name: &str) -> String {
    match contract_type.template_dir() {
        Some(dir) => format!("{dir}/{name}.clar"),
        None => format!("{name}.clar"),
    }
}

/// Replace the first embedded template symbol in `name` with the lower-cased `symbol`.
pub fn converted_name(name: &str, symbol: &str) -> String {
    name.replacen(TEMPLATE_SYMBOL, &symbol.to_lowercase(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_paths() {
        assert_eq!(template_path(ContractType::Base, "aibtc-base-dao"), "dao/aibtc-base-dao.clar");
        assert_eq!(
            template_path(ContractType::Extensions, "aibtc-treasury"),
            "dao/extensions/aibtc-treasury.clar"
        );
        assert_eq!(
            template_path(ContractType::Agent, "aibtc-agent-account"),
            "agent/aibtc-agent-account.clar"
        );
        assert_eq!(
            template_path(ContractType::Core, "aibtc-dao-run-cost"),
            "aibtc-dao-run-cost.clar"
        );
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(canonical_name(ContractType::Token, ContractSubtype::Dao), Some("aibtc-faktory"));
        assert_eq!(canonical_name(ContractType::Base, ContractSubtype::Dao), Some("aibtc-base-dao"));
        assert_eq!(canonical_name(ContractType::Base, ContractSubtype::Dex), None);
    }

    #[test]
    fn test_converted_name_replaces_first_symbol_only() {
        assert_eq!(converted_name("aibtc-faktory", "TEST"), "test-faktory");
        assert_eq!(converted_name("xyk-pool-sbtc-aibtc-v-1-1", "Sym"), "xyk-pool-sbtc-sym-v-1-1");
        assert_eq!(
            converted_name("aibtc-acct-swap-faktory-aibtc-sbtc", "dog"),
            "dog-acct-swap-faktory-aibtc-sbtc"
        );
    }

    #[test]
    fn test_deployment_order() {
        assert_eq!(deployment_order(ContractType::Agent, ContractSubtype::AgentAccount), 1);
        assert_eq!(deployment_order(ContractType::Token, ContractSubtype::Dex), 13);
        assert_eq!(deployment_order(ContractType::Proposals, ContractSubtype::InitializeDao), 50);
        assert_eq!(deployment_order(ContractType::Trading, ContractSubtype::FaktorySbtc), 0);
        assert_eq!(deployment_order(ContractType::Core, ContractSubtype::DaoRunCost), 0);

        // every ordered pair is a defined contract
        for (t, s, _) in DEPLOYMENT_ORDER {
            assert!(canonical_name(*t, *s).is_some(), "{t}/{s}");
        }
    }

    #[test]
    fn test_subtypes_per_type() {
        assert_eq!(ContractType::Token.subtypes().len(), 4);
        assert_eq!(ContractType::Base.subtypes(), vec![ContractSubtype::Dao]);
    }

    #[test]
    fn test_parse_type_and_subtype() {
        assert_eq!("extensions".parse::<ContractType>().unwrap(), ContractType::Extensions);
        assert_eq!("TREASURY".parse::<ContractSubtype>().unwrap(), ContractSubtype::Treasury);
        assert!("EXTERNAL".parse::<ContractType>().is_err());
    }
}
