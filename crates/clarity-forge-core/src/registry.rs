//! In-memory collection of contract definitions for one run.
//!
//! Populated once (see [`dependencies`](crate::dependencies)) and read many times by the
//! scanner and generator. Iteration follows registration order.

use std::collections::HashMap;

use crate::contract::ContractDefinition;
use crate::contract_types::{ContractSubtype, ContractType, CONTRACT_NAMES};
use crate::error::{ForgeError, Result};
use crate::network::DEVNET_DEPLOYER;

#[derive(Debug, Default)]
pub struct ContractRegistry {
    contracts: Vec<ContractDefinition>,
    index: HashMap<String, usize>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contract. Names are unique within a registry.
    pub fn register(&mut self, contract: ContractDefinition) -> Result<&mut ContractDefinition> {
        if self.index.contains_key(&contract.name) {
            return Err(ForgeError::DuplicateContract(contract.name));
        }
        let position = self.contracts.len();
        self.index.insert(contract.name.clone(), position);
        self.contracts.push(contract);
        Ok(&mut self.contracts[position])
    }

    pub fn get(&self, name: &str) -> Option<&ContractDefinition> {
        self.index.get(name).map(|&i| &self.contracts[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ContractDefinition> {
        self.index.get(name).map(|&i| &mut self.contracts[i])
    }

    /// Like [`get`](Self::get) but fails with `ContractNotFound`.
    pub fn require(&self, name: &str) -> Result<&ContractDefinition> {
        self.get(name)
            .ok_or_else(|| ForgeError::ContractNotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContractDefinition> {
        self.contracts.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ContractDefinition> {
        self.contracts.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.contracts.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn by_type(&self, contract_type: ContractType) -> Vec<&ContractDefinition> {
        self.contracts
            .iter()
            .filter(|c| c.contract_type == contract_type)
            .collect()
    }

    /// Contracts sorted by deployment order. Ties keep registration order.
    pub fn by_deployment_order(&self) -> Vec<&ContractDefinition> {
        let mut ordered: Vec<_> = self.contracts.iter().collect();
        ordered.sort_by_key(|c| c.deployment_order);
        ordered
    }

    /// First contract registered for a type/subtype pair.
    pub fn by_type_and_subtype(
        &self,
        contract_type: ContractType,
        subtype: ContractSubtype,
    ) -> Option<&ContractDefinition> {
        self.contracts
            .iter()
            .find(|c| c.contract_type == contract_type && c.subtype == subtype)
    }

    /// Contract principal `<deployer>.<name>`; the devnet deployer when none is given.
    pub fn contract_address(&self, name: &str, deployer: Option<&str>) -> Result<String> {
        let contract = self.require(name)?;
        Ok(format!(
            "{}.{}",
            deployer.unwrap_or(DEVNET_DEPLOYER),
            contract.name
        ))
    }

    /// Register a contract for every type/subtype pair in the canonical name table.
    pub fn register_all_defined_contracts(&mut self) -> Result<&mut Self> {
        self.register_contracts_by_types(&ContractType::ALL)
    }

    /// Register only the DAO contracts (base, actions, extensions, proposals, token).
    pub fn register_dao_contracts(&mut self) -> Result<&mut Self> {
        self.register_contracts_by_types(&ContractType::DAO)
    }

    pub fn register_contracts_by_types(&mut self, types: &[ContractType]) -> Result<&mut Self> {
        for (contract_type, subtype, name) in CONTRACT_NAMES {
            if types.contains(contract_type) {
                self.register(ContractDefinition::new(*name, *contract_type, *subtype))?;
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ContractRegistry::new();
        registry
            .register(ContractDefinition::new(
                "aibtc-treasury",
                ContractType::Extensions,
                ContractSubtype::Treasury,
            ))
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("aibtc-treasury").is_some());
        assert!(registry.get("aibtc-missing").is_none());
        assert!(matches!(
            registry.require("aibtc-missing").unwrap_err(),
            ForgeError::ContractNotFound(_)
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ContractRegistry::new();
        let def = ContractDefinition::new("aibtc-base-dao", ContractType::Base, ContractSubtype::Dao);
        registry.register(def.clone()).unwrap();
        let err = registry.register(def).unwrap_err();
        assert!(matches!(err, ForgeError::DuplicateContract(ref n) if n == "aibtc-base-dao"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_all_keeps_table_order() {
        let mut registry = ContractRegistry::new();
        registry.register_all_defined_contracts().unwrap();
        assert_eq!(registry.len(), CONTRACT_NAMES.len());
        let expected: Vec<&str> = CONTRACT_NAMES.iter().map(|(_, _, n)| *n).collect();
        assert_eq!(registry.names(), expected);
    }

    #[test]
    fn test_register_dao_excludes_agent_and_trading() {
        let mut registry = ContractRegistry::new();
        registry.register_dao_contracts().unwrap();
        assert!(registry.by_type(ContractType::Agent).is_empty());
        assert!(registry.by_type(ContractType::Trading).is_empty());
        assert!(registry.by_type(ContractType::Core).is_empty());
        assert!(!registry.by_type(ContractType::Extensions).is_empty());
    }

    #[test]
    fn test_by_type_and_subtype() {
        let mut registry = ContractRegistry::new();
        registry.register_all_defined_contracts().unwrap();
        let pool = registry
            .by_type_and_subtype(ContractType::Token, ContractSubtype::Pool)
            .unwrap();
        assert_eq!(pool.name, "xyk-pool-sbtc-aibtc-v-1-1");
        assert!(registry
            .by_type_and_subtype(ContractType::Agent, ContractSubtype::Pool)
            .is_none());
    }

    #[test]
    fn test_by_deployment_order() {
        let mut registry = ContractRegistry::new();
        registry.register_all_defined_contracts().unwrap();
        let ordered = registry.by_deployment_order();
        assert_eq!(ordered.len(), registry.len());

        let orders: Vec<u32> = ordered.iter().map(|c| c.deployment_order).collect();
        assert!(orders.windows(2).all(|w| w[0] <= w[1]));

        let names: Vec<&str> = ordered.iter().map(|c| c.name.as_str()).collect();
        let position = |name: &str| names.iter().position(|n| *n == name).unwrap();
        assert!(position("aibtc-agent-account") < position("aibtc-faktory"));
        assert!(position("aibtc-faktory") < position("aibtc-base-dao"));
        assert!(position("aibtc-base-dao") < position("aibtc-dao-users"));
        assert!(position("aibtc-dao-users") < position("aibtc-treasury"));
        assert!(position("aibtc-action-send-message") < position("aibtc-base-initialize-dao"));
        assert_eq!(names.last(), Some(&"aibtc-base-initialize-dao"));

        // unordered contracts sort first and keep registration order
        assert_eq!(names[0], "aibtc-acct-swap-faktory-aibtc-sbtc");
        assert_eq!(names[4], "aibtc-dao-run-cost");
    }

    #[test]
    fn test_contract_address() {
        let mut registry = ContractRegistry::new();
        registry.register_dao_contracts().unwrap();
        assert_eq!(
            registry.contract_address("aibtc-base-dao", None).unwrap(),
            format!("{DEVNET_DEPLOYER}.aibtc-base-dao")
        );
        assert_eq!(
            registry.contract_address("aibtc-base-dao", Some("SP000")).unwrap(),
            "SP000.aibtc-base-dao"
        );
        assert!(registry.contract_address("nope", None).is_err());
    }
}
