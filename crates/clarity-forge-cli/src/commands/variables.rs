use std::path::Path;

use anyhow::Result;

use clarity_forge_core::network::NetworkReferences;
use clarity_forge_core::report;
use clarity_forge_core::scanner::TemplateScanner;
use clarity_forge_core::variables::CatalogBuilder;

use super::{build_registry, Workspace};
use crate::output;
use crate::NetworkChoice;

/// Print the known-variable catalog, optionally writing the per-template variable report.
pub async fn run(config_path: &Path, network: Option<NetworkChoice>, report_path: Option<&Path>) -> Result<()> {
    output::print_header("clarity-forge variables");

    let workspace = Workspace::load(config_path)?;
    let config = &workspace.config;
    let network = network.map(|n| n.network()).unwrap_or(config.reference_network);

    let references = NetworkReferences::for_network(network);
    let catalog = CatalogBuilder::from_config(&references, config).build(&config.token_symbol, &config.overrides)?;

    output::print_key_value("Network", network.as_str());
    output::print_key_value("Token symbol", &config.token_symbol);
    output::print_key_value("Entries", &catalog.len().to_string());
    println!();
    output::print_catalog(&catalog);

    if let Some(path) = report_path {
        let registry = build_registry(false)?;
        let source = workspace.template_source();
        let scanner = TemplateScanner::new(&registry, &source, config)?;
        let variables = scanner.variable_report().await;
        report::save_variable_report(&variables, path)?;
        output::print_success(&format!(
            "Variable report ({} unique) saved to {}",
            variables.all_unique_variables.len(),
            path.display()
        ));
    }

    Ok(())
}
