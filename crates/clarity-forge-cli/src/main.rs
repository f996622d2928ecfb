//! clarity-forge CLI: generate Clarity contracts from annotated templates.
//!
//! Five commands: `init`, `scan`, `check`, `generate`, and `variables`. All of them
//! work from the project config (`clarity-forge.config.json`) and the template tree
//! under its contracts root.

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use clarity_forge_core::network::Network;
use clarity_forge_core::processor::SubstitutionMode;

#[derive(Parser)]
#[command(
    name = "clarity-forge",
    about = "Clarity contract generator with template dependency validation",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to clarity-forge.config.json (default: ./clarity-forge.config.json)
    #[arg(long, global = true, default_value = "clarity-forge.config.json")]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new template project
    Init {
        /// Project name (creates a directory with this name)
        name: String,

        /// Network contracts are generated for
        #[arg(long, value_enum)]
        network: Option<NetworkChoice>,

        /// Token symbol
        #[arg(long, default_value = "aibtc")]
        symbol: String,
    },

    /// Validate every template against the variable catalog and declared dependencies
    Scan {
        /// Where to write the JSON issue report
        #[arg(long, short, default_value = "template-validation-report.json")]
        output: PathBuf,

        /// Only scan DAO contracts
        #[arg(long)]
        dao_only: bool,

        /// List directives whose replaced text contains regex metacharacters
        #[arg(long)]
        audit_patterns: bool,
    },

    /// Check that one contract's directives all have values
    Check {
        /// Contract name
        #[arg(default_value = "aibtc-agent-account")]
        contract: String,

        /// Network to check (all networks if omitted)
        #[arg(long, value_enum)]
        network: Option<NetworkChoice>,

        /// Token symbol (defaults to the configured symbol)
        #[arg(long)]
        symbol: Option<String>,
    },

    /// Generate contracts for a network and token symbol
    Generate {
        /// Target network (defaults to the configured network)
        #[arg(long, value_enum)]
        network: Option<NetworkChoice>,

        /// Token symbol (defaults to the configured symbol)
        #[arg(long)]
        symbol: Option<String>,

        /// Override a catalog value (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        overrides: Vec<(String, String)>,

        /// How stacked directive comments are paired with target lines
        #[arg(long, value_enum)]
        mode: Option<ModeChoice>,

        /// Output directory
        #[arg(long, short, default_value = "generated")]
        out: PathBuf,

        /// Only generate DAO contracts
        #[arg(long)]
        dao_only: bool,
    },

    /// List the known variable catalog
    Variables {
        /// Network to build the catalog for (defaults to the reference network)
        #[arg(long, value_enum)]
        network: Option<NetworkChoice>,

        /// Also write the per-template variable report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum NetworkChoice {
    Mainnet,
    Testnet,
    Devnet,
    Mocknet,
}

impl NetworkChoice {
    pub fn network(&self) -> Network {
        match self {
            Self::Mainnet => Network::Mainnet,
            Self::Testnet => Network::Testnet,
            Self::Devnet => Network::Devnet,
            Self::Mocknet => Network::Mocknet,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeChoice {
    Faithful,
    Independent,
}

impl ModeChoice {
    pub fn mode(&self) -> SubstitutionMode {
        match self {
            Self::Faithful => SubstitutionMode::Faithful,
            Self::Independent => SubstitutionMode::Independent,
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init {
            name,
            network,
            symbol,
        } => {
            commands::init::run(&name, network, &symbol).await?;
        }
        Commands::Scan {
            output,
            dao_only,
            audit_patterns,
        } => {
            commands::scan::run(&cli.config, &output, dao_only, audit_patterns).await?;
        }
        Commands::Check {
            contract,
            network,
            symbol,
        } => {
            commands::check::run(&cli.config, &contract, network, symbol.as_deref()).await?;
        }
        Commands::Generate {
            network,
            symbol,
            overrides,
            mode,
            out,
            dao_only,
        } => {
            let args = commands::generate::GenerateArgs {
                network,
                symbol,
                overrides,
                mode,
                out,
                dao_only,
            };
            commands::generate::run(&cli.config, args).await?;
        }
        Commands::Variables { network, report } => {
            commands::variables::run(&cli.config, network, report.as_deref()).await?;
        }
    }

    Ok(())
}
