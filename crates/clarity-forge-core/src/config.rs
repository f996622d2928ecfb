//! Project configuration (`clarity-forge.config.json`).
//!
//! A [`ForgeConfig`] is loaded once per run and passed by reference to the catalog
//! builder, scanner and generator. Every field has a default, so an empty JSON object
//! is a valid config.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};
use crate::network::{Network, NetworkReferences};
use crate::processor::SubstitutionMode;
use crate::templates::embedded;

/// Name of the project config file.
pub const CONFIG_FILE: &str = "clarity-forge.config.json";

/// Agent address assigned to generated agent accounts when none is configured.
pub const DEFAULT_AGENT_ADDRESS: &str = "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG";

/// Fixed token metadata emitted into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenSettings {
    pub decimals: u8,
    /// Handlebars template for the DAO manifest text.
    pub manifest: String,
    /// Handlebars template for the token metadata URL.
    pub metadata_url: String,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            decimals: 8,
            manifest: embedded::DAO_MANIFEST.to_string(),
            metadata_url: embedded::TOKEN_METADATA_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Directory holding contract templates, relative to the project directory.
    pub contracts_root: PathBuf,
    /// Network whose catalog defines the set of known variable names for scans.
    pub reference_network: Network,
    /// Network contracts are generated for.
    pub network: Network,
    pub token_symbol: String,
    pub substitution_mode: SubstitutionMode,
    /// Report templates that are missing on disk as scan issues.
    pub report_missing_templates: bool,
    pub token: TokenSettings,
    pub agent_address: String,
    /// Values applied on top of the generated catalog.
    pub overrides: BTreeMap<String, String>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            contracts_root: PathBuf::from("contracts"),
            reference_network: Network::Devnet,
            network: Network::Testnet,
            token_symbol: "aibtc".into(),
            substitution_mode: SubstitutionMode::Faithful,
            report_missing_templates: true,
            token: TokenSettings::default(),
            agent_address: DEFAULT_AGENT_ADDRESS.into(),
            overrides: BTreeMap::new(),
        }
    }
}

impl ForgeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ForgeError::ConfigNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| ForgeError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ForgeError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Contracts root resolved against `project_dir` (absolute roots are kept).
    pub fn contracts_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.contracts_root)
    }

    /// References for the generation target network.
    pub fn target_references(&self) -> NetworkReferences {
        NetworkReferences::for_network(self.network)
    }

    /// References for the network used to build the known-variable catalog.
    pub fn reference_references(&self) -> NetworkReferences {
        NetworkReferences::for_network(self.reference_network)
    }
}
