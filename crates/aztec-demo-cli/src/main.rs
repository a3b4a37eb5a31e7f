//! aztec-demo CLI: AZTEC confidential assets on a local Ethereum node.
//!
//! `init` scaffolds a project, `deploy` installs the AZTEC contracts, and
//! `zkasset` / `zkasset-erc20` run the two example flows end to end.
//! `balances` and `accounts` inspect the node.

mod commands;
mod output;
mod reporter;

use std::path::PathBuf;

use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand, ValueEnum};

use aztec_demo_core::config::CONFIG_FILE;

#[derive(Parser)]
#[command(
    name = "aztec-demo",
    about = "AZTEC confidential asset demo for Besu, Pantheon and Ganache",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Connection options shared by every command.
#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Path to aztec-demo.config.json
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Network preset, used when no config file exists
    #[arg(long, global = true, value_enum)]
    pub network: Option<NetworkChoice>,

    /// JSON-RPC endpoint, overrides the config
    #[arg(long, global = true, env = "AZTEC_DEMO_NODE_URL")]
    pub node_url: Option<String>,

    /// Signing key (hex), overrides the config
    #[arg(long, global = true, env = "AZTEC_DEMO_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a project directory with config and encoder bridge
    Init {
        /// Project directory to create
        dir: PathBuf,
    },

    /// Deploy the AZTEC contracts and record their addresses
    Deploy,

    /// Mint a confidential asset and transfer it from alice to bob
    Zkasset,

    /// Shield ERC20 tokens, transfer them privately, and unshield them
    ZkassetErc20,

    /// Show ERC20 balances of the deployed (or given) token
    Balances {
        /// ERC20 address; defaults to the one in deployment.json
        #[arg(long)]
        erc20: Option<Address>,
    },

    /// List the accounts the demo signs with
    Accounts,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkChoice {
    Besu,
    Pantheon,
    Ganache,
}

impl NetworkChoice {
    pub const ALL: [NetworkChoice; 3] = [Self::Besu, Self::Pantheon, Self::Ganache];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Besu => "besu",
            Self::Pantheon => "pantheon",
            Self::Ganache => "ganache",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

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
        Commands::Init { dir } => {
            commands::init::run(&dir, cli.global.network).await?;
        }
        Commands::Deploy => {
            commands::deploy::run(&cli.global).await?;
        }
        Commands::Zkasset => {
            commands::demo::run(&cli.global, commands::demo::Demo::ZkAsset).await?;
        }
        Commands::ZkassetErc20 => {
            commands::demo::run(&cli.global, commands::demo::Demo::ZkAssetErc20).await?;
        }
        Commands::Balances { erc20 } => {
            commands::balances::run(&cli.global, erc20).await?;
        }
        Commands::Accounts => {
            commands::accounts::run(&cli.global).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "aztec-demo",
            "zkasset-erc20",
            "--network",
            "pantheon",
            "--config",
            "demo/aztec-demo.config.json",
            "-vv",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::ZkassetErc20));
        assert_eq!(cli.global.network, Some(NetworkChoice::Pantheon));
        assert_eq!(cli.global.config, PathBuf::from("demo/aztec-demo.config.json"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_balances_parses_address() {
        let cli = Cli::try_parse_from([
            "aztec-demo",
            "balances",
            "--erc20",
            "0x627306090abaB3A6e1400e9345bC60c78a8BEf57",
        ])
        .unwrap();
        let Commands::Balances { erc20 } = cli.command else {
            panic!("expected balances");
        };
        assert!(erc20.is_some());
    }

    #[test]
    fn test_network_names_match_presets() {
        for choice in NetworkChoice::ALL {
            assert!(aztec_demo_core::network::NetworkProfile::from_name(choice.as_str()).is_some());
        }
    }
}
