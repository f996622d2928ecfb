use std::path::{Path, PathBuf};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use clarity_forge_core::generator::{write_generated, ContractGenerator};
use clarity_forge_core::network::NetworkReferences;
use clarity_forge_core::report;
use clarity_forge_core::variables::CatalogBuilder;

use super::{build_registry, Workspace};
use crate::output;
use crate::{ModeChoice, NetworkChoice};

pub struct GenerateArgs {
    pub network: Option<NetworkChoice>,
    pub symbol: Option<String>,
    pub overrides: Vec<(String, String)>,
    pub mode: Option<ModeChoice>,
    pub out: PathBuf,
    pub dao_only: bool,
}

/// Generate every registered contract and write the results under the output directory.
///
/// Command-line overrides are applied on top of the config overrides. A contract
/// that fails to generate is reported and the rest still run.
pub async fn run(config_path: &Path, args: GenerateArgs) -> Result<()> {
    output::print_header("clarity-forge generate");

    let workspace = Workspace::load(config_path)?;
    let config = &workspace.config;
    let network = args.network.map(|n| n.network()).unwrap_or(config.network);
    let symbol = args.symbol.as_deref().unwrap_or(&config.token_symbol);
    let mode = args.mode.map(|m| m.mode()).unwrap_or(config.substitution_mode);

    output::print_key_value("Network", network.as_str());
    output::print_key_value("Token symbol", symbol);
    output::print_key_value("Mode", &format!("{mode:?}").to_lowercase());

    output::print_step(1, 3, "Building variable catalog");
    let mut overrides = config.overrides.clone();
    overrides.extend(args.overrides);
    let references = NetworkReferences::for_network(network);
    let replacements = CatalogBuilder::from_config(&references, config).build(symbol, &overrides)?;
    output::print_key_value("Variables", &replacements.len().to_string());

    output::print_step(2, 3, "Generating contracts");
    let mut registry = build_registry(args.dao_only)?;
    let source = workspace.template_source();
    let generator = ContractGenerator::new(&source, mode);

    let progress = ProgressBar::new(registry.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {msg}")?.progress_chars("=> "),
    );
    let batch = generator
        .generate_all(&mut registry, &replacements, |name| {
            progress.set_message(name.to_string());
            progress.inc(1);
        })
        .await;
    progress.finish_and_clear();

    output::print_step(3, 3, &format!("Writing to {}", args.out.display()));
    let written = write_generated(&registry, &args.out, symbol)?;
    for path in &written {
        output::print_key_value("Wrote", &path.display().to_string());
    }
    let registry_path = args.out.join(report::REGISTRY_FILE);
    report::save_registry(&registry, &registry_path)?;
    output::print_key_value("Registry", &registry_path.display().to_string());

    if batch.is_success() {
        output::print_success(&format!("Generated {} contract(s)", batch.generated.len()));
        return Ok(());
    }

    for failure in &batch.errors {
        output::print_error(&format!("{}:", failure.contract));
        output::print_details(&failure.error);
    }
    anyhow::bail!(
        "{} of {} contract(s) failed to generate",
        batch.errors.len(),
        batch.errors.len() + batch.generated.len()
    )
}
