//! Declared template dependencies for every known contract.
//!
//! Contracts without an explicit entry get their type's defaults. Contracts missing
//! from the registry are skipped.

use crate::contract::ContractDefinition;
use crate::contract_types::{ContractSubtype as S, ContractType as T};
use crate::error::Result;
use crate::network::{AddressRef as A, TraitRef as Tr};
use crate::registry::ContractRegistry;

/// Registry with every known contract and its declared dependencies.
pub fn setup_full_contract_registry() -> Result<ContractRegistry> {
    let mut registry = ContractRegistry::new();
    registry.register_all_defined_contracts()?;
    define_all_contract_dependencies(&mut registry);
    Ok(registry)
}

/// Registry with only the DAO contracts and their declared dependencies.
pub fn setup_dao_contract_registry() -> Result<ContractRegistry> {
    let mut registry = ContractRegistry::new();
    registry.register_dao_contracts()?;
    define_all_contract_dependencies(&mut registry);
    Ok(registry)
}

pub fn define_all_contract_dependencies(registry: &mut ContractRegistry) {
    for contract in registry.iter_mut() {
        match contract.contract_type {
            T::Base => define_base(contract),
            T::Actions => define_action(contract),
            T::Extensions => define_extension(contract),
            T::Proposals => define_proposal(contract),
            T::Token => define_token(contract),
            T::Agent => define_agent(contract),
            T::Trading => define_trading(contract),
            T::Core => {}
        }
    }
}

fn define_base(contract: &mut ContractDefinition) {
    if contract.name == "aibtc-base-dao" {
        contract
            .add_trait_dependency(Tr::DaoBase, "dao_trait_base")
            .add_trait_dependency(Tr::DaoProposal, "dao_trait_proposal")
            .add_trait_dependency(Tr::DaoExtension, "dao_trait_extension")
            .add_runtime_value("dao_token_symbol");
    }
}

fn define_action(contract: &mut ContractDefinition) {
    match contract.name.as_str() {
        "aibtc-action-send-message" => {
            contract
                .add_trait_dependency(Tr::DaoExtension, "dao_trait_extension")
                .add_trait_dependency(Tr::DaoAction, "dao_trait_action")
                .add_contract_dependency("dao_contract_messaging", T::Extensions, S::OnchainMessaging)
                .add_contract_dependency("dao_contract_base", T::Base, S::Dao)
                .add_runtime_value("dao_token_symbol");
        }
        _ => {
            contract.add_runtime_value("dao_token_symbol");
        }
    }
}

fn define_extension(contract: &mut ContractDefinition) {
    contract.add_trait_dependency(Tr::DaoExtension, "dao_trait_extension");
    match contract.name.as_str() {
        "aibtc-dao-charter" => {
            contract
                .add_trait_dependency(Tr::DaoCharter, "dao_trait_charter")
                .add_contract_dependency("dao_contract_base", T::Base, S::Dao);
        }
        "aibtc-onchain-messaging" => {
            contract
                .add_trait_dependency(Tr::DaoMessaging, "dao_trait_messaging")
                .add_contract_dependency("dao_contract_base", T::Base, S::Dao)
                .add_contract_dependency("dao_contract_token", T::Token, S::Dao)
                .add_contract_dependency("dao_contract_treasury", T::Extensions, S::Treasury)
                .add_contract_dependency(
                    "dao_contract_action_proposal_voting",
                    T::Extensions,
                    S::ActionProposalVoting,
                );
        }
        "aibtc-action-proposal-voting" => {
            contract
                .add_trait_dependency(Tr::DaoActionProposalVoting, "dao_trait_action_proposal_voting")
                .add_trait_dependency(Tr::DaoAction, "dao_trait_action")
                .add_address_dependency(A::AibtcRunCost, "base_contract_dao_run_cost")
                .add_contract_dependency(
                    "dao_contract_rewards_account",
                    T::Extensions,
                    S::RewardsAccount,
                )
                .add_contract_dependency("dao_contract_treasury", T::Extensions, S::Treasury)
                .add_contract_dependency("dao_contract_users", T::Extensions, S::DaoUsers)
                .add_contract_dependency("dao_contract_token", T::Token, S::Dao)
                .add_contract_dependency("dao_contract_base", T::Base, S::Dao);
        }
        "aibtc-dao-users" => {
            contract
                .add_trait_dependency(Tr::DaoUsers, "dao_trait_users")
                .add_contract_dependency("dao_contract_base", T::Base, S::Dao);
        }
        "aibtc-rewards-account" => {
            contract
                .add_trait_dependency(Tr::DaoRewardsAccount, "dao_trait_rewards_account")
                .add_trait_dependency(Tr::BaseSip010, "base_trait_sip010")
                .add_contract_dependency("dao_contract_base", T::Base, S::Dao)
                .add_contract_dependency("dao_contract_token", T::Token, S::Dao);
        }
        "aibtc-treasury" => {
            contract
                .add_trait_dependency(Tr::DaoTreasury, "dao_trait_treasury")
                .add_trait_dependency(Tr::BaseSip010, "base_trait_sip010")
                .add_contract_dependency("dao_contract_base", T::Base, S::Dao);
        }
        "aibtc-token-owner" => {
            contract
                .add_trait_dependency(Tr::DaoTokenOwner, "dao_trait_token_owner")
                .add_contract_dependency("dao_contract_token", T::Token, S::Dao)
                .add_contract_dependency("dao_contract_base", T::Base, S::Dao);
        }
        "aibtc-dao-epoch" => {
            contract
                .add_trait_dependency(Tr::DaoEpoch, "dao_trait_epoch")
                .add_contract_dependency("dao_contract_base", T::Base, S::Dao);
        }
        _ => {
            contract.add_contract_dependency("dao_contract_base", T::Base, S::Dao);
        }
    }
    contract.add_runtime_value("dao_token_symbol");
}

fn define_proposal(contract: &mut ContractDefinition) {
    contract
        .add_trait_dependency(Tr::DaoProposal, "dao_trait_proposal")
        .add_contract_dependency("dao_contract_base", T::Base, S::Dao);
    if contract.name == "aibtc-base-initialize-dao" {
        contract
            .add_contract_dependency("dao_contract_token", T::Token, S::Dao)
            .add_address_dependency(A::Sbtc, "sbtc_token_contract")
            .add_contract_dependency(
                "dao_contract_action_proposal_voting",
                T::Extensions,
                S::ActionProposalVoting,
            )
            .add_contract_dependency("dao_contract_charter", T::Extensions, S::DaoCharter)
            .add_contract_dependency("dao_contract_epoch", T::Extensions, S::DaoEpoch)
            .add_contract_dependency("dao_contract_users", T::Extensions, S::DaoUsers)
            .add_contract_dependency("dao_contract_messaging", T::Extensions, S::OnchainMessaging)
            .add_contract_dependency("dao_contract_token_owner", T::Extensions, S::TokenOwner)
            .add_contract_dependency("dao_contract_treasury", T::Extensions, S::Treasury)
            .add_contract_dependency("dao_action_send_message", T::Actions, S::SendMessage)
            .add_runtime_value("dao_token_symbol")
            .add_runtime_value("dao_manifest");
    } else {
        contract.add_runtime_value("dao_token_symbol");
    }
}

fn define_token(contract: &mut ContractDefinition) {
    match contract.name.as_str() {
        "aibtc-faktory" => {
            contract
                .add_contract_dependency("dao_contract_treasury", T::Extensions, S::Treasury)
                .add_contract_dependency("dao_contract_faktory_dex", T::Token, S::Dex)
                .add_contract_dependency("dao_contract_pre_faktory", T::Token, S::Prelaunch)
                .add_trait_dependency(Tr::BaseSip010, "base_trait_sip010")
                .add_contract_dependency("dao_contract_token_owner", T::Extensions, S::TokenOwner)
                .add_runtime_value("dao_token_symbol")
                .add_runtime_value("dao_token_name")
                .add_runtime_value("dao_token_decimals")
                .add_runtime_value("dao_token_metadata");
        }
        "aibtc-faktory-dex" => {
            contract
                .add_contract_dependency("dao_contract_token", T::Token, S::Dao)
                .add_contract_dependency("dao_contract_token_prelaunch", T::Token, S::Prelaunch)
                .add_contract_dependency("dao_contract_token_pool", T::Token, S::Pool)
                .add_trait_dependency(Tr::DaoTokenDex, "dao_trait_faktory_dex")
                .add_trait_dependency(Tr::FaktorySip010, "dao_trait_faktory_sip010")
                .add_address_dependency(A::Sbtc, "base_contract_sbtc")
                .add_address_dependency(A::BitflowCore, "external_bitflow_core")
                .add_address_dependency(A::Deployer, "origin_address")
                .add_runtime_value("faktory_dex_trait")
                .add_runtime_value("dao_token_symbol");
        }
        "xyk-pool-sbtc-aibtc-v-1-1" => {
            contract
                .add_address_dependency(A::BitflowCore, "bitflow_core_contract")
                .add_contract_dependency("dao_contract_token_dex", T::Token, S::Dex)
                .add_trait_dependency(Tr::BitflowPool, "bitflow_pool_trait")
                .add_trait_dependency(Tr::BitflowSip010, "bitflow_sip010_trait")
                .add_runtime_value("dao_token_symbol");
        }
        "aibtc-pre-faktory" => {
            contract
                .add_contract_dependency("dao_contract_token", T::Token, S::Dao)
                .add_contract_dependency("dao_contract_token_dex", T::Token, S::Dex)
                .add_address_dependency(A::Sbtc, "base_contract_sbtc")
                .add_runtime_value("dao_token_symbol");
        }
        _ => {
            contract.add_runtime_value("dao_token_symbol");
        }
    }
}

fn define_agent(contract: &mut ContractDefinition) {
    if contract.name != "aibtc-agent-account" {
        contract.add_runtime_value("dao_token_symbol");
        return;
    }
    contract
        .add_trait_dependency(Tr::AgentAccount, "agent_account_trait_account")
        .add_trait_dependency(Tr::AgentAccountProposals, "agent_account_trait_account_proposals")
        .add_trait_dependency(Tr::AgentAccountConfig, "agent_account_trait_account_config")
        .add_trait_dependency(Tr::AgentAccountSwaps, "agent_account_trait_account_swaps")
        .add_trait_dependency(Tr::AgentDaoSwapAdapter, "agent_account_trait_dao_swap_adapter")
        .add_trait_dependency(Tr::BaseSip010, "base_trait_sip010")
        .add_trait_dependency(Tr::DaoAction, "dao_trait_action")
        .add_trait_dependency(Tr::DaoProposal, "dao_trait_proposal")
        .add_trait_dependency(Tr::DaoActionProposalVoting, "dao_trait_action_proposal_voting")
        .add_trait_dependency(Tr::DaoTokenDex, "dao_trait_faktory_dex")
        .add_trait_dependency(Tr::DaoToken, "dao_trait_faktory_token")
        .add_address_dependency(A::Sbtc, "base_contract_sbtc")
        .add_address_dependency(A::FaktoryRegistry, "faktory_agent_account_registry")
        .add_contract_dependency("dao_contract_token", T::Token, S::Dao)
        .add_contract_dependency("dao_contract_token_dex", T::Token, S::Dex)
        .add_runtime_value("account_owner")
        .add_runtime_value("account_agent")
        .add_runtime_value("dao_token_symbol");
}

fn define_trading(contract: &mut ContractDefinition) {
    match contract.name.as_str() {
        "aibtc-acct-swap-faktory-aibtc-sbtc" => {
            contract
                .add_trait_dependency(Tr::AgentDaoSwapAdapter, "agent_account_trait_dao_swap_adapter")
                .add_trait_dependency(Tr::BaseSip010, "base_trait_sip010")
                .add_contract_dependency("dao_contract_token", T::Token, S::Dao)
                .add_contract_dependency("dao_contract_token_dex", T::Token, S::Dex);
        }
        "aibtc-acct-swap-bitflow-aibtc-sbtc" => {
            contract
                .add_trait_dependency(Tr::AgentDaoSwapAdapter, "agent_account_trait_dao_swap_adapter")
                .add_trait_dependency(Tr::BaseSip010, "base_trait_sip010")
                .add_address_dependency(A::Sbtc, "base_contract_sbtc")
                .add_contract_dependency("dao_contract_token", T::Token, S::Dao)
                .add_address_dependency(A::BitflowCore, "external_bitflow_core")
                .add_contract_dependency("dao_contract_bitflow_pool", T::Token, S::Pool);
        }
        _ => {}
    }
    contract.add_runtime_value("dao_token_symbol");
}
