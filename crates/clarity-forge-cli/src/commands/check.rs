use std::path::Path;

use anyhow::Result;

use clarity_forge_core::network::{Network, NetworkReferences};
use clarity_forge_core::scanner::TemplateScanner;
use clarity_forge_core::variables::CatalogBuilder;

use super::{build_registry, Workspace};
use crate::output;
use crate::NetworkChoice;

/// Check that every directive in one contract's template has a value in the
/// catalog of each requested network.
pub async fn run(
    config_path: &Path,
    contract: &str,
    network: Option<NetworkChoice>,
    symbol: Option<&str>,
) -> Result<()> {
    output::print_header(&format!("clarity-forge check: {contract}"));

    let workspace = Workspace::load(config_path)?;
    let config = &workspace.config;
    let symbol = symbol.unwrap_or(&config.token_symbol);
    let source = workspace.template_source();
    let registry = build_registry(false)?;
    let scanner = TemplateScanner::new(&registry, &source, config)?;

    let networks: Vec<Network> = match network {
        Some(n) => vec![n.network()],
        None => Network::ALL.to_vec(),
    };

    let mut failed = 0;
    for network in networks {
        let references = NetworkReferences::for_network(network);
        let replacements = CatalogBuilder::from_config(&references, config).build(symbol, &config.overrides)?;
        let validation = scanner.validate_contract_replacements(contract, &replacements).await;

        if validation.valid {
            output::print_success(&format!("{network}: all variables have values"));
        } else {
            failed += 1;
            output::print_error(&format!("{network}: missing variables"));
            for variable in &validation.missing_variables {
                output::print_list_item(variable);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{contract} is missing variables on {failed} network(s)");
    }
    Ok(())
}
