//! Handlebars templates for token metadata values.
//!
//! The DAO manifest and the token metadata URL are not Clarity templates; they are
//! short text snippets parameterized by the token symbol and rendered into the
//! variable catalog as plain values. Defaults are embedded via [`include_str!`] in
//! [`embedded`] and can be overridden from the config file.
//!
//! ## Template variables
//!
//! - `{{symbol}}`: token symbol as given
//! - `{{lowercase_symbol}}`: token symbol, lower-cased
//! - `{{uppercase_symbol}}`: token symbol, upper-cased

pub mod embedded;
pub mod renderer;

use serde_json::Value;

/// Data context passed to metadata templates.
pub fn metadata_context(symbol: &str) -> Value {
    serde_json::json!({
        "symbol": symbol,
        "lowercase_symbol": symbol.to_lowercase(),
        "uppercase_symbol": symbol.to_uppercase(),
    })
}
