//! Handlebars-based renderer for metadata templates.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled, so any
//! `{{variable}}` missing from the data context is an error instead of an empty string.
//! The rendered values end up verbatim inside generated contracts.

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::{ForgeError, Result};

/// Template renderer using Handlebars in strict mode.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        // rendered values are Clarity source, not HTML
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| ForgeError::TemplateRender(e.to_string()))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{embedded, metadata_context};

    #[test]
    fn test_render_default_manifest() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render(embedded::DAO_MANIFEST, &metadata_context("DOG"))
            .unwrap();
        assert_eq!(out, "The mission of the DOG is to...");
    }

    #[test]
    fn test_render_metadata_url_uses_lowercase_symbol() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render(embedded::TOKEN_METADATA_URL, &metadata_context("DOG"))
            .unwrap();
        assert!(out.contains("/dog/"));
    }

    #[test]
    fn test_strict_mode_rejects_unknown_variable() {
        let renderer = TemplateRenderer::new();
        let err = renderer
            .render("{{not_there}}", &metadata_context("DOG"))
            .unwrap_err();
        assert!(matches!(err, ForgeError::TemplateRender(_)));
    }

    #[test]
    fn test_no_html_escaping() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render("{{symbol}}", &serde_json::json!({ "symbol": "a&b" }))
            .unwrap();
        assert_eq!(out, "a&b");
    }
}
