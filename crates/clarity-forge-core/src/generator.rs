//! Contract generation from templates.
//!
//! A contract is generated only when every directive in its template has a value:
//! the template is read, each unique `toReplace/keyName` key is checked against the
//! replacement map, and only then is the substitution engine run.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::contract::ContractDefinition;
use crate::contract_types::converted_name;
use crate::directive;
use crate::error::{ForgeError, Result};
use crate::processor::{process_template, ReplacementMap, SubstitutionMode};
use crate::registry::ContractRegistry;
use crate::source::TemplateSource;

/// A contract that failed to generate.
#[derive(Debug, Clone)]
pub struct GenerationError {
    pub contract: String,
    pub error: String,
}

/// Outcome of a batch run: successes and failures side by side.
#[derive(Debug, Clone, Default)]
pub struct GenerationBatch {
    pub generated: Vec<String>,
    pub errors: Vec<GenerationError>,
}

impl GenerationBatch {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct ContractGenerator<'a> {
    source: &'a dyn TemplateSource,
    mode: SubstitutionMode,
}

impl<'a> ContractGenerator<'a> {
    pub fn new(source: &'a dyn TemplateSource, mode: SubstitutionMode) -> Self {
        Self { source, mode }
    }

    /// Render a contract's template without touching the definition.
    pub async fn render(&self, contract: &ContractDefinition, replacements: &ReplacementMap) -> Result<String> {
        let template = self
            .source
            .read_template(&contract.template_path)
            .await?
            .ok_or_else(|| ForgeError::MissingTemplateFile {
                contract: contract.name.clone(),
                path: self.source.resolve(&contract.template_path),
            })?;

        check_replacements(&contract.name, &template, replacements)?;
        Ok(process_template(&template, replacements, self.mode))
    }

    /// Render a contract and store the source and its hash on the definition.
    pub async fn generate_contract(
        &self,
        contract: &mut ContractDefinition,
        replacements: &ReplacementMap,
    ) -> Result<()> {
        let source = self.render(contract, replacements).await?;
        tracing::debug!(contract = %contract.name, bytes = source.len(), "contract generated");
        contract.set_generated(source);
        Ok(())
    }

    /// Generate every registered contract in order. A failure is recorded and the
    /// batch continues. `on_contract` is called before each contract.
    pub async fn generate_all(
        &self,
        registry: &mut ContractRegistry,
        replacements: &ReplacementMap,
        mut on_contract: impl FnMut(&str),
    ) -> GenerationBatch {
        let mut batch = GenerationBatch::default();

        for contract in registry.iter_mut() {
            on_contract(&contract.name);
            match self.generate_contract(contract, replacements).await {
                Ok(()) => batch.generated.push(contract.name.clone()),
                Err(e) => {
                    tracing::warn!(contract = %contract.name, error = %e, "generation failed");
                    batch.errors.push(GenerationError {
                        contract: contract.name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            generated = batch.generated.len(),
            failed = batch.errors.len(),
            "generation batch complete"
        );
        batch
    }
}

/// Fail with `MissingTemplateVariables` listing every directive key without a
/// non-empty value, at its first occurrence.
fn check_replacements(contract: &str, template: &str, replacements: &ReplacementMap) -> Result<()> {
    let mut seen = HashSet::new();
    let details: Vec<String> = directive::scan_directives(template)
        .into_iter()
        .filter(|d| seen.insert(d.composite_key()))
        .filter(|d| !replacements.get(&d.composite_key()).is_some_and(|v| !v.is_empty()))
        .map(|d| {
            format!(
                "LINE {} MISSING TEMPLATE VARIABLE\nkey: {}\nreplaces: {}",
                d.line_number, d.key_name, d.to_replace
            )
        })
        .collect();

    if details.is_empty() {
        Ok(())
    } else {
        Err(ForgeError::MissingTemplateVariables {
            contract: contract.to_string(),
            details: details.join("\n\n"),
        })
    }
}

/// Write every generated contract to `<out_dir>/<type>/<name>.clar`, with the type
/// lower-cased and the name converted for `token_symbol`. Paths are returned in
/// deployment order. Contracts without generated source are skipped.
pub fn write_generated(registry: &ContractRegistry, out_dir: &Path, token_symbol: &str) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for contract in registry.by_deployment_order() {
        let Some(source) = contract.source() else {
            continue;
        };
        let dir = out_dir.join(contract.contract_type.as_str().to_lowercase());
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.clar", converted_name(&contract.name, token_symbol)));
        std::fs::write(&path, source)?;
        written.push(path);
    }
    Ok(written)
}
