use alloy::primitives::Address;
use anyhow::{Context, Result};

use aztec_demo_core::balances::Erc20Balances;
use aztec_demo_core::chain::{Chain, RpcChain};
use aztec_demo_core::deployment;

use super::load_config;
use crate::output;
use crate::GlobalArgs;

/// Print ERC20 balances of the first two accounts and the shielded supply.
pub async fn run(global: &GlobalArgs, erc20: Option<Address>) -> Result<()> {
    output::print_header("aztec-demo balances");

    let loaded = load_config(global)?;
    let erc20 = match erc20 {
        Some(address) => address,
        None => {
            deployment::load(&loaded.base_dir)
                .context("no deployment found; run `aztec-demo deploy` or pass --erc20")?
                .erc20
        }
    };
    output::print_key_value("ERC20", &erc20.to_string());

    let chain = RpcChain::connect(&loaded.config).await?;
    let accounts = chain.accounts().await?;
    let balances = Erc20Balances::fetch(&chain, erc20, &accounts).await?;
    output::print_balances(&balances);
    Ok(())
}
