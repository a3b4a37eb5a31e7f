//! Demo configuration (`aztec-demo.config.json`).
//!
//! A config is seeded from a [`NetworkProfile`] and can then be edited by hand:
//! point it at another node, add accounts, or move the artifacts directory.

use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::{AztecDemoError, Result};
use crate::network::NetworkProfile;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "aztec-demo.config.json";

/// Top-level demo configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DemoConfig {
    /// Preset the config was created from.
    pub network: String,
    pub node_url: String,
    pub private_key: String,
    /// Fixed account list. Empty means "ask the node" (`eth_accounts`).
    #[serde(default)]
    pub accounts: Vec<Address>,
    pub gas_limit: u64,
    #[serde(default)]
    pub gas_price: Option<u128>,
    /// Directory holding the Truffle contract artifacts.
    pub artifacts_dir: PathBuf,
    pub encoder: EncoderConfig,
}

/// How to reach the aztec.js bridge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Node.js executable.
    pub node: String,
    /// Bridge script, relative to the config file.
    pub script: PathBuf,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            node: "node".into(),
            script: PathBuf::from("encoder/aztec-encoder.js"),
        }
    }
}

impl DemoConfig {
    pub fn from_profile(profile: &NetworkProfile) -> Self {
        Self {
            network: profile.name.clone(),
            node_url: profile.node_url.clone(),
            private_key: profile.private_key.clone(),
            accounts: profile.accounts.clone(),
            gas_limit: profile.gas_limit,
            gas_price: profile.gas_price,
            artifacts_dir: PathBuf::from("contracts/artifacts"),
            encoder: EncoderConfig::default(),
        }
    }

    /// Build the default config for a network preset by name.
    pub fn for_network(name: &str) -> Result<Self> {
        NetworkProfile::from_name(name)
            .map(|p| Self::from_profile(&p))
            .ok_or_else(|| AztecDemoError::UnknownNetwork(name.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| AztecDemoError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|e| AztecDemoError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }

    /// Check that the signing key is 32 bytes of hex.
    pub fn validate(&self) -> Result<()> {
        let key = self
            .private_key
            .strip_prefix("0x")
            .unwrap_or(&self.private_key);
        let bytes = hex::decode(key)
            .map_err(|e| AztecDemoError::InvalidPrivateKey(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(AztecDemoError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(())
    }

    /// Resolve a config-relative path against the directory holding the config.
    pub fn resolve(&self, base_dir: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }
}

/// Pretty-print `value` as JSON into `path`. Nothing is written if
/// serialization fails.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AztecDemoError::ConfigSerialize {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json)?;
    Ok(())
}
