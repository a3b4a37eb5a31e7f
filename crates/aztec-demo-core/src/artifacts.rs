//! Loader for pre-compiled Truffle contract artifacts.
//!
//! Each artifact is a `<ContractName>.json` file with at least an `abi`
//! array and a hex `bytecode` string. The ABI is checked against the functions
//! the orchestration calls, so a stale artifact fails before anything is sent.

use std::path::Path;

use alloy::json_abi::JsonAbi;
use alloy::primitives::Bytes;
use serde::Deserialize;

use crate::error::{AztecDemoError, Result};

/// The contracts deployed by [`crate::protocol::instantiate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    /// AZTEC Cryptography Engine.
    Ace,
    JoinSplit,
    AdjustSupply,
    Erc20Mintable,
    ZkAssetMintable,
    ZkAsset,
}

impl ContractKind {
    /// Deployment order.
    pub const ALL: [ContractKind; 6] = [
        Self::Ace,
        Self::JoinSplit,
        Self::AdjustSupply,
        Self::Erc20Mintable,
        Self::ZkAssetMintable,
        Self::ZkAsset,
    ];

    pub fn contract_name(&self) -> &'static str {
        match self {
            Self::Ace => "ACE",
            Self::JoinSplit => "JoinSplit",
            Self::AdjustSupply => "AdjustSupply",
            Self::Erc20Mintable => "ERC20Mintable",
            Self::ZkAssetMintable => "ZkAssetMintable",
            Self::ZkAsset => "ZkAsset",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.contract_name())
    }

    /// Constructor arguments passed at deployment (see
    /// [`crate::contracts::ZkAssetParams`]).
    pub fn constructor_params(&self) -> usize {
        match self {
            Self::ZkAssetMintable | Self::ZkAsset => 5,
            _ => 0,
        }
    }

    /// Functions the demo invokes on a deployed instance.
    pub fn required_functions(&self) -> &'static [&'static str] {
        match self {
            Self::Ace => &["setCommonReferenceString", "setProof", "publicApprove"],
            Self::JoinSplit | Self::AdjustSupply => &[],
            Self::Erc20Mintable => &["mint", "approve", "balanceOf", "totalSupply"],
            Self::ZkAssetMintable => &["confidentialMint", "confidentialTransfer"],
            Self::ZkAsset => &["confidentialTransfer"],
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TruffleArtifact {
    contract_name: Option<String>,
    abi: JsonAbi,
    #[serde(default)]
    bytecode: String,
}

/// A loaded contract: its ABI and creation bytecode.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub kind: ContractKind,
    pub name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Read `<dir>/<ContractName>.json`.
    pub fn load(dir: &Path, kind: ContractKind) -> Result<Self> {
        let path = dir.join(kind.file_name());
        let contents =
            std::fs::read_to_string(&path).map_err(|e| AztecDemoError::ArtifactNotFound {
                path: path.clone(),
                source: e,
            })?;
        let raw: TruffleArtifact =
            serde_json::from_str(&contents).map_err(|e| AztecDemoError::ArtifactParse {
                path: path.clone(),
                source: e,
            })?;
        Self::from_truffle(kind, raw)
    }

    fn from_truffle(kind: ContractKind, raw: TruffleArtifact) -> Result<Self> {
        let name = raw
            .contract_name
            .unwrap_or_else(|| kind.contract_name().to_string());
        let invalid = |reason: String| AztecDemoError::InvalidArtifact {
            name: name.clone(),
            reason,
        };

        let hex_code = raw.bytecode.strip_prefix("0x").unwrap_or(&raw.bytecode);
        if hex_code.is_empty() {
            return Err(invalid("empty bytecode (abstract contract or interface?)".into()));
        }
        // Truffle leaves `__LibraryName____` placeholders for unlinked libraries.
        if let Some(pos) = hex_code.find("__") {
            let end = hex_code[pos + 2..]
                .find(|c: char| c != '_')
                .map(|i| pos + 2 + i)
                .unwrap_or(hex_code.len());
            let tail = &hex_code[end..];
            let library: String = tail.chars().take_while(|c| *c != '_').collect();
            return Err(invalid(format!("bytecode has unlinked library {library}")));
        }
        let bytecode = hex::decode(hex_code)
            .map_err(|e| invalid(format!("bytecode is not hex: {e}")))?;

        for function in kind.required_functions() {
            if !raw.abi.functions.contains_key(*function) {
                return Err(invalid(format!("ABI has no function `{function}`")));
            }
        }

        let artifact = Self {
            kind,
            name,
            abi: raw.abi,
            bytecode: bytecode.into(),
        };
        let arity = artifact.constructor_arity();
        if arity != kind.constructor_params() {
            return Err(AztecDemoError::InvalidArtifact {
                name: artifact.name,
                reason: format!(
                    "constructor takes {arity} arguments, deployment passes {}",
                    kind.constructor_params()
                ),
            });
        }
        Ok(artifact)
    }

    /// Number of constructor parameters declared by the ABI.
    pub fn constructor_arity(&self) -> usize {
        self.abi
            .constructor
            .as_ref()
            .map(|c| c.inputs.len())
            .unwrap_or(0)
    }

    /// Creation code followed by ABI-encoded constructor arguments.
    pub fn deploy_code(&self, constructor_args: &[u8]) -> Bytes {
        let mut data = self.bytecode.to_vec();
        data.extend_from_slice(constructor_args);
        data.into()
    }
}

/// All six artifacts needed for a deployment.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub ace: ContractArtifact,
    pub join_split: ContractArtifact,
    pub adjust_supply: ContractArtifact,
    pub erc20: ContractArtifact,
    pub zk_asset_mintable: ContractArtifact,
    pub zk_asset: ContractArtifact,
}

impl ArtifactSet {
    pub fn load(dir: &Path) -> Result<Self> {
        tracing::debug!("loading contract artifacts from {}", dir.display());
        Ok(Self {
            ace: ContractArtifact::load(dir, ContractKind::Ace)?,
            join_split: ContractArtifact::load(dir, ContractKind::JoinSplit)?,
            adjust_supply: ContractArtifact::load(dir, ContractKind::AdjustSupply)?,
            erc20: ContractArtifact::load(dir, ContractKind::Erc20Mintable)?,
            zk_asset_mintable: ContractArtifact::load(dir, ContractKind::ZkAssetMintable)?,
            zk_asset: ContractArtifact::load(dir, ContractKind::ZkAsset)?,
        })
    }
}
