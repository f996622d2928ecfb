//! Compile-time embedded metadata templates.
//!
//! Each constant loads a template file from `templates/` via [`include_str!`]. The paths
//! are relative to this source file (`crates/clarity-forge-core/src/templates/embedded.rs`).
//!
//! ## Warning
//!
//! Do NOT rename or move template files without updating the `include_str!` path here.
//! Do NOT modify template files without checking that the Handlebars variables still match
//! what [`metadata_context`](super::metadata_context) provides.

/// Default DAO manifest text.
pub const DAO_MANIFEST: &str = include_str!("../../../../templates/metadata/dao-manifest.hbs");

/// Default token metadata URL.
pub const TOKEN_METADATA_URL: &str = include_str!("../../../../templates/metadata/token-metadata-url.hbs");
