use std::path::Path;

use anyhow::Result;
use dialoguer::Select;

use clarity_forge_core::config::{ForgeConfig, CONFIG_FILE};
use clarity_forge_core::network::Network;
use clarity_forge_core::project;

use crate::output;
use crate::NetworkChoice;

/// Initialize a new clarity-forge project.
///
/// Creates the template directory tree and writes the config file. If no network
/// is given, prompts interactively.
pub async fn run(name: &str, network: Option<NetworkChoice>, symbol: &str) -> Result<()> {
    output::print_header(&format!("clarity-forge init: {name}"));

    let network = match network {
        Some(n) => n.network(),
        None => {
            let descriptions = &[
                "testnet: Stacks testnet deployments",
                "mainnet: Stacks mainnet deployments",
                "devnet: local Clarinet devnet",
                "mocknet: simulated chain, devnet addresses",
            ];
            let options = [Network::Testnet, Network::Mainnet, Network::Devnet, Network::Mocknet];

            let selection = Select::new()
                .with_prompt("Select target network")
                .items(descriptions)
                .default(0)
                .interact()?;

            options[selection]
        }
    };

    let config = ForgeConfig {
        network,
        token_symbol: symbol.to_string(),
        ..ForgeConfig::default()
    };

    let project_dir = Path::new(name);
    output::print_step(1, 2, &format!("Creating project directory: {name}/"));
    output::print_step(2, 2, &format!("Writing {CONFIG_FILE}"));
    project::init_project(project_dir, &config)?;

    output::print_success(&format!("Project '{name}' created for {network}"));
    println!();
    println!("  Next steps:");
    println!("    cd {name}");
    println!("    # add templates under {}/", config.contracts_root.display());
    println!("    clarity-forge scan");
    println!("    clarity-forge generate");
    println!();

    Ok(())
}
