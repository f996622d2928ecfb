//! Unified error types for the clarity-forge toolkit.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur during clarity-forge operations.
///
/// Data-quality problems found while scanning templates are *not* errors; they are
/// reported as [`ValidationIssue`](crate::scanner::ValidationIssue)s. This enum covers
/// the failures that stop a single operation.
#[derive(Error, Debug)]
pub enum ForgeError {
    // --- Configuration ---

    /// The configuration file (`clarity-forge.config.json`) was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Catalog ---

    /// The network name is not one of: `mainnet`, `testnet`, `devnet`, `mocknet`.
    #[error("unknown network: {0} (supported: mainnet, testnet, devnet, mocknet)")]
    UnknownNetwork(String),

    /// The known-variable catalog could not be assembled.
    #[error("failed to build variable catalog: {0}")]
    CatalogBuild(String),

    // --- Registry ---

    /// A contract with the same name is already registered.
    #[error("contract already registered: {0}")]
    DuplicateContract(String),

    /// No contract with this name exists in the registry.
    #[error("contract not found: {0}")]
    ContractNotFound(String),

    /// The contract type name is not recognized.
    #[error("unknown contract type: {0}")]
    UnknownContractType(String),

    /// The contract subtype name is not recognized.
    #[error("unknown contract subtype: {0}")]
    UnknownContractSubtype(String),

    // --- Templates ---

    /// The template file for a contract does not exist under the contracts root.
    #[error("template file for {contract} not found at {path}")]
    MissingTemplateFile { contract: String, path: PathBuf },

    /// One or more directives in a template have no value in the replacement map.
    #[error("missing template variables for {contract}:\n{details}")]
    MissingTemplateVariables { contract: String, details: String },

    /// Handlebars rendering of a metadata template failed.
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    // --- Reports ---

    /// A report could not be serialized.
    #[error("failed to write report to {path}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A saved report could not be parsed.
    #[error("failed to parse report at {path}")]
    ReportParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Project ---

    /// Attempted to create a project in a directory that already exists.
    #[error("project directory already exists: {0}")]
    ProjectExists(PathBuf),

    /// The current directory is not a clarity-forge project (missing config file).
    #[error("not a clarity-forge project (missing clarity-forge.config.json)")]
    NotAProject,

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, ForgeError>`.
pub type Result<T> = std::result::Result<T, ForgeError>;
