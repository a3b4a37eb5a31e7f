//! Persistence for deployed contract addresses between CLI commands.
//!
//! Saves a [`Deployment`] to `deployment.json` after `deploy`, and loads it in
//! `balances`.

use std::path::Path;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::{AztecDemoError, Result};

pub const DEPLOYMENT_FILE: &str = "deployment.json";

/// Addresses of one full AZTEC deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub ace: Address,
    pub join_split: Address,
    pub adjust_supply: Address,
    pub erc20: Address,
    pub zk_asset_mintable: Address,
    pub zk_asset: Address,
}

impl Deployment {
    /// `(label, address)` pairs in deployment order, for display.
    pub fn entries(&self) -> [(&'static str, Address); 6] {
        [
            ("ace", self.ace),
            ("joinSplit", self.join_split),
            ("adjustSupply", self.adjust_supply),
            ("zkAssetMintable", self.zk_asset_mintable),
            ("zkAsset", self.zk_asset),
            ("erc20", self.erc20),
        ]
    }
}

/// Save a deployment to `<dir>/deployment.json`.
pub fn save(deployment: &Deployment, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    crate::config::write_json(&dir.join(DEPLOYMENT_FILE), deployment)
}

/// Load a deployment from `<dir>/deployment.json`.
pub fn load(dir: &Path) -> Result<Deployment> {
    let path = dir.join(DEPLOYMENT_FILE);
    let contents =
        std::fs::read_to_string(&path).map_err(|e| AztecDemoError::ConfigNotFound {
            path: path.clone(),
            source: e,
        })?;
    serde_json::from_str(&contents).map_err(|e| AztecDemoError::ConfigParse { path, source: e })
}
