use anyhow::Result;

use aztec_demo_core::chain::{Chain, RpcChain};

use super::load_config;
use crate::output;
use crate::GlobalArgs;

/// List the Ethereum accounts and chain id the demo would use.
pub async fn run(global: &GlobalArgs) -> Result<()> {
    output::print_header("aztec-demo accounts");

    let loaded = load_config(global)?;
    let chain = RpcChain::connect(&loaded.config).await?;
    output::print_key_value("Chain id", &chain.chain_id().await?.to_string());

    let accounts = chain.accounts().await?;
    if accounts.len() < 2 {
        output::print_warning("zkasset-erc20 needs at least two accounts");
    }
    for (i, account) in accounts.iter().enumerate() {
        let role = match i {
            0 => " (signer, alice)",
            1 => " (bob)",
            _ => "",
        };
        println!("  [{i}] {account}{role}");
    }
    Ok(())
}
