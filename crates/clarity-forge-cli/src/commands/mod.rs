//! CLI command implementations for clarity-forge.
//!
//! Each module corresponds to a subcommand (`clarity-forge <command>`).

pub mod check;
pub mod generate;
pub mod init;
pub mod scan;
pub mod variables;

use std::path::{Path, PathBuf};

use anyhow::Result;

use clarity_forge_core::config::ForgeConfig;
use clarity_forge_core::dependencies;
use clarity_forge_core::registry::ContractRegistry;
use clarity_forge_core::source::FsTemplateSource;

use crate::output;

/// Config and project directory for commands that run inside a project.
pub struct Workspace {
    pub project_dir: PathBuf,
    pub config: ForgeConfig,
}

impl Workspace {
    /// Load the config at `config_path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(config_path: &Path) -> Result<Self> {
        let project_dir = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();

        let config = if config_path.exists() {
            ForgeConfig::load(config_path)?
        } else {
            output::print_warning(&format!(
                "{} not found, using default settings",
                config_path.display()
            ));
            ForgeConfig::default()
        };

        Ok(Self {
            project_dir,
            config,
        })
    }

    pub fn template_source(&self) -> FsTemplateSource {
        FsTemplateSource::new(self.config.contracts_dir(&self.project_dir))
    }
}

/// Registry with declared dependencies, either for every contract or DAO contracts only.
pub fn build_registry(dao_only: bool) -> Result<ContractRegistry> {
    let registry = if dao_only {
        dependencies::setup_dao_contract_registry()?
    } else {
        dependencies::setup_full_contract_registry()?
    };
    Ok(registry)
}
