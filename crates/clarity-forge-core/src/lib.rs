//! Core library for the clarity-forge toolkit.
//!
//! Generates Clarity contracts from annotated templates and checks, before
//! generation, that every substitution point is backed by a known and declared value.
//!
//! - [`directive`] and [`processor`]: the `;; /g/<toReplace>/<keyName>` directive syntax
//!   and the line-pairing substitution engine.
//! - [`contract`], [`registry`], [`dependencies`]: contract definitions and the keys each
//!   template is allowed to consume.
//! - [`variables`]: the known-variable catalog for a network and token symbol.
//! - [`scanner`] and [`report`]: cross-validation of templates against the catalog and
//!   the declared dependencies.
//! - [`generator`]: batch generation of contract sources.

pub mod config;
pub mod contract;
pub mod contract_types;
pub mod dependencies;
pub mod directive;
pub mod error;
pub mod generator;
pub mod network;
pub mod principal;
pub mod processor;
pub mod project;
pub mod registry;
pub mod report;
pub mod scanner;
pub mod source;
pub mod templates;
pub mod variables;
