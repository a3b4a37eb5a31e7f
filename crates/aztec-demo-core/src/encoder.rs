use alloy::primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// AZTEC proof id of the JoinSplit validator.
pub const JOIN_SPLIT_PROOF: u32 = 65793;

/// AZTEC proof id of the AdjustSupply (mint) validator.
pub const MINT_PROOF: u32 = 66049;

/// An AZTEC identity on secp256k1.
///
/// Note owners are distinct from the Ethereum accounts that sign transactions,
/// even though both live on the same curve.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AztecAccount {
    pub address: Address,
    pub public_key: Bytes,
    pub private_key: B256,
}

impl std::fmt::Debug for AztecAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AztecAccount")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// An AZTEC note as exported by the encoder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Owner's public key.
    pub public_key: Bytes,
    /// Address allowed to spend the note; a join-split must be signed by it.
    pub owner: Address,
    /// Viewing key; enough for the encoder to rebuild the note.
    pub viewing_key: Bytes,
    pub note_hash: B256,
    /// Note value `k`.
    pub value: u64,
}

/// Address of an uncompressed secp256k1 public key (`0x04 || x || y`).
///
/// Returns `None` for any other encoding.
pub fn owner_address(public_key: &[u8]) -> Option<Address> {
    match public_key {
        [0x04, point @ ..] if point.len() == 64 => Some(Address::from_raw_public_key(point)),
        _ => None,
    }
}

/// Proof data ready to submit, plus the outputs the validator will produce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedProof {
    pub proof_data: Bytes,
    /// ABI-encoded `proofOutputs`; empty when the encoder does not report them.
    pub expected_output: Bytes,
}

/// Inputs of a mint (AdjustSupply) proof.
#[derive(Debug, Clone)]
pub struct MintRequest {
    pub new_total_minted: Note,
    pub old_total_minted: Note,
    pub adjusted_notes: Vec<Note>,
    /// Contract that will call the validator (the mintable ZkAsset).
    pub sender: Address,
}

/// Inputs of a join-split proof.
#[derive(Debug, Clone)]
pub struct JoinSplitRequest {
    pub input_notes: Vec<Note>,
    pub output_notes: Vec<Note>,
    pub sender: Address,
    /// One owner per input note, in the same order.
    pub input_note_owners: Vec<AztecAccount>,
    /// Ethereum account that receives or provides public tokens.
    pub public_owner: Address,
    /// Public value moved: positive withdraws, negative deposits.
    pub k_public: i64,
    pub validator: Address,
}

/// Information about a missing prerequisite tool.
#[derive(Debug, Clone)]
pub struct PrerequisiteError {
    pub tool_name: String,
    pub install_instructions: String,
}

/// Builds AZTEC accounts, notes, and proofs.
///
/// Cryptography lives behind this trait; implementations delegate to an
/// external AZTEC library.
#[async_trait]
pub trait ProofEncoder: Send + Sync {
    /// Short identifier, e.g. "aztec.js".
    fn name(&self) -> &'static str;

    /// Check that all required external tools are installed.
    fn check_prerequisites(&self) -> std::result::Result<(), Vec<PrerequisiteError>>;

    async fn generate_account(&self) -> Result<AztecAccount>;

    async fn create_note(&self, owner_public_key: &Bytes, value: u64) -> Result<Note>;

    async fn create_zero_value_note(&self) -> Result<Note>;

    /// The six-word common reference string installed into ACE.
    async fn common_reference_string(&self) -> Result<[B256; 6]>;

    async fn encode_mint(&self, request: &MintRequest) -> Result<EncodedProof>;

    async fn encode_join_split(&self, request: &JoinSplitRequest) -> Result<EncodedProof>;
}
