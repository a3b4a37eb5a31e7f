//! Solidity bindings for the calls and events the demo uses.
//!
//! Only signatures are declared here; bytecode and full ABIs come from the
//! Truffle artifacts.

use alloy::primitives::{Address, U256};
use alloy::sol;
use alloy::sol_types::SolValue;

sol! {
    /// AZTEC Cryptography Engine.
    #[derive(Debug, PartialEq, Eq)]
    interface IAce {
        function setCommonReferenceString(bytes32[6] commonReferenceString) external;
        function setProof(uint24 proof, address validatorAddress) external;
        function publicApprove(address registryOwner, bytes32 proofHash, uint256 value) external;
    }

    #[derive(Debug, PartialEq, Eq)]
    interface IZkAsset {
        event CreateNote(address indexed owner, bytes32 indexed noteHash, bytes metadata);
        event DestroyNote(address indexed owner, bytes32 indexed noteHash, bytes metadata);

        function confidentialMint(uint24 proof, bytes proofData) external;
        function confidentialTransfer(bytes proofData) external;
    }

    #[derive(Debug, PartialEq, Eq)]
    interface IERC20Mintable {
        function mint(address to, uint256 value) external returns (bool);
        function approve(address spender, uint256 value) external returns (bool);
        function balanceOf(address owner) external view returns (uint256);
        function totalSupply() external view returns (uint256);
    }
}

/// Constructor arguments shared by `ZkAsset` and `ZkAssetMintable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZkAssetParams {
    pub ace: Address,
    /// Linked ERC20, or the zero address for a purely confidential asset.
    pub linked_token: Address,
    /// Public tokens per unit of note value.
    pub scaling_factor: u64,
    pub can_adjust_supply: bool,
    pub can_convert: bool,
}

impl ZkAssetParams {
    /// A mintable asset with no public counterpart.
    pub fn mintable(ace: Address) -> Self {
        Self {
            ace,
            linked_token: Address::ZERO,
            scaling_factor: 1,
            can_adjust_supply: true,
            can_convert: false,
        }
    }

    /// An asset backed 1:1 by an ERC20 that can be shielded and unshielded.
    pub fn convertible(ace: Address, erc20: Address) -> Self {
        Self {
            ace,
            linked_token: erc20,
            scaling_factor: 1,
            can_adjust_supply: false,
            can_convert: true,
        }
    }

    pub fn abi_encode(&self) -> Vec<u8> {
        (
            self.ace,
            self.linked_token,
            U256::from(self.scaling_factor),
            self.can_adjust_supply,
            self.can_convert,
        )
            .abi_encode_params()
    }
}
