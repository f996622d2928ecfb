//! Project directory creation and config loading.
//!
//! ## Directory layout
//!
//! ```text
//! <project>/
//! ├── clarity-forge.config.json   # ForgeConfig
//! └── contracts/
//!     ├── agent/
//!     └── dao/
//!         ├── actions/
//!         ├── extensions/
//!         ├── proposals/
//!         └── token/
//! ```

use std::path::Path;

use crate::config::{ForgeConfig, CONFIG_FILE};
use crate::contract_types::ContractType;
use crate::error::{ForgeError, Result};

/// Create a new project directory with the per-type template folders and a config file.
pub fn init_project(project_dir: &Path, config: &ForgeConfig) -> Result<()> {
    if project_dir.exists() {
        return Err(ForgeError::ProjectExists(project_dir.to_path_buf()));
    }

    let contracts = config.contracts_dir(project_dir);
    std::fs::create_dir_all(&contracts)?;
    for dir in ContractType::ALL.iter().filter_map(|t| t.template_dir()) {
        std::fs::create_dir_all(contracts.join(dir))?;
    }

    config.save(&project_dir.join(CONFIG_FILE))?;
    tracing::info!(path = %project_dir.display(), "project initialized");
    Ok(())
}

/// Load the config of an existing project.
pub fn load_project(project_dir: &Path) -> Result<ForgeConfig> {
    let config_path = project_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Err(ForgeError::NotAProject);
    }
    ForgeConfig::load(&config_path)
}
