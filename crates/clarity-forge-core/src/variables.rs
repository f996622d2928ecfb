//! Known-variable catalog builder.
//!
//! Produces the flat key -> value map used to fill template directives for one
//! network and token symbol. Entries are inserted in a fixed order and later
//! entries overwrite earlier ones without warning:
//!
//! 1. addresses (`deployer`, `address_deployer`, ...)
//! 2. traits (`dao_extension`, `trait_dao_extension`, `<principal>.<contract>.<trait>/trait_dao_extension`)
//! 3. template trait aliases (`.aibtc-dao-traits.extension/dao_trait_extension`, `dao_trait_extension`)
//! 4. contract references for every type/subtype pair, plus historical aliases
//! 5. token metadata
//! 6. external references
//! 7. caller overrides
//!
//! Finally every value whose principal part is a valid Stacks address gets the
//! Clarity principal-literal prefix `'`. This includes overrides.

use std::collections::BTreeSet;

use crate::config::{ForgeConfig, TokenSettings, DEFAULT_AGENT_ADDRESS};
use crate::contract_types::{converted_name, ContractSubtype, ContractType, CONTRACT_NAMES, TEMPLATE_SYMBOL};
use crate::error::{ForgeError, Result};
use crate::network::{AddressRef, NetworkReferences, TraitRef, DEVNET_DEPLOYER};
use crate::principal::{to_principal_literal, TraitIdentifier};
use crate::processor::ReplacementMap;
use crate::templates::metadata_context;
use crate::templates::renderer::TemplateRenderer;

/// Template-facing trait keys: `(toReplace, keyName, trait)`.
const TRAIT_ALIASES: &[(&str, &str, TraitRef)] = &[
    (
        "SP3FBR2AGK5H9QBDH3EEN6DF8EK8JY7RX8QJ5SVTE.sip-010-trait-ft-standard.sip-010-trait",
        "base_trait_sip010",
        TraitRef::BaseSip010,
    ),
    (".faktory-trait-v1.sip-010-trait", "dao_trait_faktory_sip010", TraitRef::FaktorySip010),
    (".faktory-trait-v1.sip-010-trait", "dao_trait_faktory_token", TraitRef::FaktorySip010),
    (".xyk-pool-trait-v-1-2.xyk-pool-trait", "bitflow_pool_trait", TraitRef::BitflowPool),
    (
        ".sip-010-trait-ft-standard-v-1-1.sip-010-trait",
        "bitflow_sip010_trait",
        TraitRef::BitflowSip010,
    ),
    (".aibtc-dao-traits.extension", "dao_trait_extension", TraitRef::DaoExtension),
    (".aibtc-dao-traits.action", "dao_trait_action", TraitRef::DaoAction),
    (".aibtc-dao-traits.proposal", "dao_trait_proposal", TraitRef::DaoProposal),
    (".aibtc-dao-traits.token-owner", "dao_trait_token_owner", TraitRef::DaoTokenOwner),
    (".aibtc-dao-traits.faktory-dex", "dao_trait_faktory_dex", TraitRef::DaoTokenDex),
    (".aibtc-dao-traits.faktory-dex", "faktory_dex_trait", TraitRef::DaoTokenDex),
    (".aibtc-base-dao-trait.aibtc-base-dao", "dao_trait_base", TraitRef::DaoBase),
    (
        ".aibtc-dao-traits.action-proposal-voting",
        "dao_trait_action_proposal_voting",
        TraitRef::DaoActionProposalVoting,
    ),
    (".aibtc-dao-traits.charter", "dao_trait_charter", TraitRef::DaoCharter),
    (".aibtc-dao-traits.users", "dao_trait_users", TraitRef::DaoUsers),
    (".aibtc-dao-traits.messaging", "dao_trait_messaging", TraitRef::DaoMessaging),
    (".aibtc-dao-traits.treasury", "dao_trait_treasury", TraitRef::DaoTreasury),
    (
        ".aibtc-dao-traits.rewards-account",
        "dao_trait_rewards_account",
        TraitRef::DaoRewardsAccount,
    ),
    (".aibtc-dao-traits.epoch", "dao_trait_epoch", TraitRef::DaoEpoch),
    (
        ".aibtc-agent-account-traits.aibtc-account",
        "agent_account_trait_account",
        TraitRef::AgentAccount,
    ),
    (
        ".aibtc-agent-account-traits.aibtc-account-proposals",
        "agent_account_trait_account_proposals",
        TraitRef::AgentAccountProposals,
    ),
    (
        ".aibtc-agent-account-traits.aibtc-proposals",
        "agent_account_trait_proposals",
        TraitRef::AgentAccountProposals,
    ),
    (
        ".aibtc-agent-account-traits.aibtc-account-config",
        "agent_account_trait_account_config",
        TraitRef::AgentAccountConfig,
    ),
    (
        ".aibtc-agent-account-traits.aibtc-account-swaps",
        "agent_account_trait_account_swaps",
        TraitRef::AgentAccountSwaps,
    ),
    (
        ".aibtc-agent-account-traits.aibtc-dao-swap-adapter",
        "agent_account_trait_dao_swap_adapter",
        TraitRef::AgentDaoSwapAdapter,
    ),
    (
        ".aibtc-agent-account-traits.faktory-buy-sell",
        "agent_account_trait_faktory_buy_sell",
        TraitRef::AgentFaktoryBuySell,
    ),
];

/// Historical key names for contract references.
const CONTRACT_ALIASES: &[(ContractType, ContractSubtype, &[&str])] = &[
    (ContractType::Base, ContractSubtype::Dao, &["dao_contract_base"]),
    (
        ContractType::Actions,
        ContractSubtype::SendMessage,
        &["dao_action_send_message", "dao_action_send_message_contract"],
    ),
    (
        ContractType::Extensions,
        ContractSubtype::ActionProposalVoting,
        &["dao_contract_action_proposal_voting"],
    ),
    (ContractType::Extensions, ContractSubtype::DaoCharter, &["dao_contract_charter"]),
    (ContractType::Extensions, ContractSubtype::DaoEpoch, &["dao_contract_epoch"]),
    (ContractType::Extensions, ContractSubtype::DaoUsers, &["dao_contract_users"]),
    (ContractType::Extensions, ContractSubtype::OnchainMessaging, &["dao_contract_messaging"]),
    (
        ContractType::Extensions,
        ContractSubtype::RewardsAccount,
        &["dao_contract_rewards_account"],
    ),
    (
        ContractType::Extensions,
        ContractSubtype::TokenOwner,
        &["dao_contract_token_owner", "dao_token_owner_contract"],
    ),
    (ContractType::Extensions, ContractSubtype::Treasury, &["dao_contract_treasury"]),
    (ContractType::Token, ContractSubtype::Dao, &["dao_contract_token"]),
    (
        ContractType::Token,
        ContractSubtype::Dex,
        &["dao_contract_token_dex", "dao_contract_faktory_dex"],
    ),
    (
        ContractType::Token,
        ContractSubtype::Pool,
        &["dao_contract_token_pool", "dao_contract_bitflow_pool"],
    ),
    (
        ContractType::Token,
        ContractSubtype::Prelaunch,
        &["dao_contract_token_prelaunch", "dao_contract_pre_faktory"],
    ),
];

/// External references: `(key, address)`. Composite keys carry the literal text
/// templates are authored with.
const EXTERNAL_ADDRESS_KEYS: &[(&str, AddressRef)] = &[
    ("sbtc_contract", AddressRef::Sbtc),
    ("sbtc_token_contract", AddressRef::Sbtc),
    ("base_contract_sbtc", AddressRef::Sbtc),
    ("external_bitflow_core", AddressRef::BitflowCore),
    ("bitflow_core_contract", AddressRef::BitflowCore),
    ("base_contract_dao_run_cost", AddressRef::AibtcRunCost),
    (".aibtc-dao-run-cost/base_contract_dao_run_cost", AddressRef::AibtcRunCost),
    (".dao-run-cost/base_contract_dao_run_cost", AddressRef::AibtcRunCost),
    ("origin_address", AddressRef::Deployer),
    ("account_owner", AddressRef::Deployer),
    ("faktory_agent_account_registry", AddressRef::FaktoryRegistry),
];

/// Builds the substitution map for one network.
pub struct CatalogBuilder<'a> {
    references: &'a NetworkReferences,
    token: &'a TokenSettings,
    agent_address: &'a str,
    renderer: TemplateRenderer,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(references: &'a NetworkReferences, token: &'a TokenSettings, agent_address: &'a str) -> Self {
        Self {
            references,
            token,
            agent_address,
            renderer: TemplateRenderer::new(),
        }
    }

    pub fn from_config(references: &'a NetworkReferences, config: &'a ForgeConfig) -> Self {
        Self::new(references, &config.token, &config.agent_address)
    }

    /// Assemble the full map for `token_symbol`, applying `overrides` last.
    pub fn build(&self, token_symbol: &str, overrides: &ReplacementMap) -> Result<ReplacementMap> {
        let mut map = ReplacementMap::new();

        self.insert_addresses(&mut map);
        self.insert_traits(&mut map);
        self.insert_trait_aliases(&mut map);
        insert_contract_references(&mut map, token_symbol);
        self.insert_token_metadata(&mut map, token_symbol)?;
        self.insert_external_references(&mut map);

        for (key, value) in overrides {
            map.insert(key.clone(), value.clone());
        }

        for value in map.values_mut() {
            *value = to_principal_literal(value);
        }

        tracing::debug!(
            network = %self.references.network(),
            symbol = token_symbol,
            entries = map.len(),
            "built variable catalog"
        );
        Ok(map)
    }

    fn insert_addresses(&self, map: &mut ReplacementMap) {
        for (reference, address) in self.references.addresses() {
            let key = reference.as_str().to_lowercase();
            map.insert(format!("address_{key}"), address.clone());
            map.insert(key, address);
        }
    }

    fn insert_traits(&self, map: &mut ReplacementMap) {
        for (reference, value) in self.references.traits() {
            let key = reference.as_str().to_lowercase();
            let prefixed = format!("trait_{key}");
            if let Some(id) = TraitIdentifier::parse(&value) {
                map.insert(
                    format!("{}.{}.{}/{prefixed}", id.principal, id.contract, id.name),
                    value.clone(),
                );
            }
            map.insert(prefixed, value.clone());
            map.insert(key, value);
        }
    }

    fn insert_trait_aliases(&self, map: &mut ReplacementMap) {
        for (to_replace, key_name, reference) in TRAIT_ALIASES {
            let value = self.references.trait_ref(*reference);
            map.insert(format!("{to_replace}/{key_name}"), value.clone());
            map.insert(key_name.to_string(), value);
        }
    }

    fn insert_token_metadata(&self, map: &mut ReplacementMap, token_symbol: &str) -> Result<()> {
        let context = metadata_context(token_symbol);
        map.insert(format!("{TEMPLATE_SYMBOL}/dao_token_symbol"), token_symbol.to_string());
        map.insert("dao_token_symbol".into(), token_symbol.to_string());
        map.insert("dao_token_name".into(), token_symbol.to_string());
        map.insert("dao_token_decimals".into(), self.token.decimals.to_string());
        map.insert(
            "dao_manifest".into(),
            self.render_metadata("dao_manifest", &self.token.manifest, &context)?,
        );
        map.insert(
            "dao_token_metadata".into(),
            self.render_metadata("dao_token_metadata", &self.token.metadata_url, &context)?,
        );
        Ok(())
    }

    fn render_metadata(&self, key: &str, template: &str, context: &serde_json::Value) -> Result<String> {
        self.renderer
            .render(template, context)
            .map_err(|e| ForgeError::CatalogBuild(format!("{key}: {e}")))
    }

    fn insert_external_references(&self, map: &mut ReplacementMap) {
        for (key, reference) in EXTERNAL_ADDRESS_KEYS {
            map.insert(key.to_string(), self.references.address(*reference));
        }
        map.insert(
            format!("{DEVNET_DEPLOYER}/account_owner"),
            self.references.address(AddressRef::Deployer),
        );
        map.insert("account_agent".into(), self.agent_address.to_string());
        map.insert(
            format!("{DEFAULT_AGENT_ADDRESS}/account_agent"),
            self.agent_address.to_string(),
        );
    }
}

fn insert_contract_references(map: &mut ReplacementMap, token_symbol: &str) {
    for (contract_type, subtype, canonical) in CONTRACT_NAMES {
        let value = format!(".{}", converted_name(canonical, token_symbol));
        let generic = format!("{}_{}", contract_type.as_str(), subtype.as_str()).to_lowercase();
        map.insert(format!(".{canonical}/{generic}"), value.clone());
        map.insert(generic, value.clone());

        let aliases = CONTRACT_ALIASES
            .iter()
            .find(|(t, s, _)| t == contract_type && s == subtype)
            .map(|(_, _, aliases)| *aliases)
            .unwrap_or_default();
        for alias in aliases {
            map.insert(format!(".{canonical}/{alias}"), value.clone());
            map.insert(alias.to_string(), value.clone());
        }
    }
}

/// Build the catalog for the configured target network, symbol and overrides.
pub fn generate_template_replacements(config: &ForgeConfig) -> Result<ReplacementMap> {
    let references = config.target_references();
    CatalogBuilder::from_config(&references, config).build(&config.token_symbol, &config.overrides)
}

/// Build the catalog for a network given by name. Unknown names fail with
/// [`ForgeError::UnknownNetwork`](crate::error::ForgeError::UnknownNetwork).
pub fn replacements_for_network(
    network: &str,
    token_symbol: &str,
    overrides: &ReplacementMap,
    config: &ForgeConfig,
) -> Result<ReplacementMap> {
    let references = NetworkReferences::from_name(network)?;
    CatalogBuilder::from_config(&references, config).build(token_symbol, overrides)
}

/// Every key name the catalog defines for the configured reference network.
pub fn known_variable_names(config: &ForgeConfig) -> Result<BTreeSet<String>> {
    let references = config.reference_references();
    let map = CatalogBuilder::from_config(&references, config).build(TEMPLATE_SYMBOL, &ReplacementMap::new())?;
    Ok(map.into_keys().collect())
}
