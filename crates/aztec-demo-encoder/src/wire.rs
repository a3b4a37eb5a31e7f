//! JSON messages exchanged with `aztec-encoder.js`.

use alloy::primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use aztec_demo_core::encoder::{AztecAccount, EncodedProof, JoinSplitRequest, MintRequest, Note};

#[derive(Debug, Serialize)]
pub struct Request<'a, P: Serialize> {
    pub method: &'a str,
    pub params: P,
}

#[derive(Debug, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteParams<'a> {
    pub public_key: &'a Bytes,
    pub value: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintParams<'a> {
    pub new_total_minted: &'a Note,
    pub old_total_minted: &'a Note,
    pub adjusted_notes: &'a [Note],
    pub sender: Address,
}

impl<'a> From<&'a MintRequest> for MintParams<'a> {
    fn from(request: &'a MintRequest) -> Self {
        Self {
            new_total_minted: &request.new_total_minted,
            old_total_minted: &request.old_total_minted,
            adjusted_notes: &request.adjusted_notes,
            sender: request.sender,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSplitParams<'a> {
    pub input_notes: &'a [Note],
    pub output_notes: &'a [Note],
    pub sender: Address,
    pub input_note_owners: &'a [AztecAccount],
    pub public_owner: Address,
    pub k_public: i64,
    pub validator: Address,
}

impl<'a> From<&'a JoinSplitRequest> for JoinSplitParams<'a> {
    fn from(request: &'a JoinSplitRequest) -> Self {
        Self {
            input_notes: &request.input_notes,
            output_notes: &request.output_notes,
            sender: request.sender,
            input_note_owners: &request.input_note_owners,
            public_owner: request.public_owner,
            k_public: request.k_public,
            validator: request.validator,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProof {
    pub proof_data: Bytes,
    #[serde(default)]
    pub expected_output: Bytes,
}

impl From<WireProof> for EncodedProof {
    fn from(proof: WireProof) -> Self {
        Self {
            proof_data: proof.proof_data,
            expected_output: proof.expected_output,
        }
    }
}

/// `commonReferenceString` result before its length is checked.
pub type WireCrs = Vec<B256>;
