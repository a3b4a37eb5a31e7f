//! CLI command implementations for aztec-demo.
//!
//! Each module corresponds to a subcommand (`aztec-demo <command>`).

pub mod accounts;
pub mod balances;
pub mod demo;
pub mod deploy;
pub mod init;

use anyhow::{bail, Result};

use aztec_demo_core::chain::{Chain, RpcChain, TxOptions};
use aztec_demo_core::encoder::ProofEncoder;
use aztec_demo_core::project::{self, LoadedConfig};
use aztec_demo_encoder::NodeEncoder;

use crate::output;
use crate::GlobalArgs;

/// Resolve the config from disk or preset, then apply flag overrides.
pub fn load_config(global: &GlobalArgs) -> Result<LoadedConfig> {
    let mut loaded = project::load_or_default(
        &global.config,
        global.network.as_ref().map(|n| n.as_str()),
    )?;
    if let Some(url) = &global.node_url {
        loaded.config.node_url = url.clone();
    }
    if let Some(key) = &global.private_key {
        loaded.config.private_key = key.clone();
    }
    loaded.config.validate()?;
    Ok(loaded)
}

/// A connected node plus everything needed to send transactions.
pub struct Session {
    pub loaded: LoadedConfig,
    pub chain: RpcChain,
    pub tx: TxOptions,
}

impl Session {
    pub async fn open(global: &GlobalArgs) -> Result<Self> {
        let loaded = load_config(global)?;
        output::print_key_value("Network", &loaded.config.network);
        output::print_key_value("Node", &loaded.config.node_url);

        let chain = RpcChain::connect(&loaded.config).await?;
        let accounts = chain.accounts().await?;
        let Some(from) = accounts.first().copied() else {
            bail!("no Ethereum accounts available on {}", loaded.config.node_url);
        };
        output::print_key_value("From", &from.to_string());

        let tx = TxOptions::from_config(&loaded.config, from);
        Ok(Self { loaded, chain, tx })
    }

    /// The aztec.js bridge configured for this project, checked for
    /// missing tools.
    pub fn encoder(&self) -> Result<NodeEncoder> {
        let encoder = NodeEncoder::new(
            self.loaded.config.encoder.node.clone(),
            self.loaded.encoder_script(),
        );
        if let Err(missing) = encoder.check_prerequisites() {
            for m in &missing {
                output::print_error(&format!(
                    "Missing: {} (install: {})",
                    m.tool_name, m.install_instructions
                ));
            }
            bail!("{} encoder prerequisites missing", encoder.name());
        }
        Ok(encoder)
    }
}
