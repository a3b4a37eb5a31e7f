//! Unified error types for the aztec-demo toolkit.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur during aztec-demo operations.
#[derive(Error, Debug)]
pub enum AztecDemoError {
    // --- Configuration ---

    /// A JSON file (`aztec-demo.config.json`, `deployment.json`) was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A config or deployment record could not be serialized for writing.
    #[error("failed to serialize {path}")]
    ConfigSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The network name is not one of the built-in presets.
    #[error("unknown network: {0} (supported: besu, pantheon, ganache)")]
    UnknownNetwork(String),

    /// The configured signing key is not a 32-byte hex string.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    // --- Prerequisites ---

    /// A required external tool (e.g., `node`, `npm`) is not installed.
    #[error("required tool '{name}' not found (install: {install})")]
    MissingTool { name: String, install: String },

    // --- Contract artifacts ---

    /// A Truffle artifact JSON was not found in the artifacts directory.
    #[error("contract artifact not found at {path}")]
    ArtifactNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A Truffle artifact could not be parsed.
    #[error("failed to parse contract artifact at {path}")]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The artifact parsed but cannot be deployed or called as expected.
    #[error("invalid contract artifact {name}: {reason}")]
    InvalidArtifact { name: String, reason: String },

    // --- Node ---

    /// Talking to the JSON-RPC endpoint failed.
    #[error("node RPC error: {0}")]
    Rpc(String),

    /// A transaction was mined with a failed status.
    #[error("transaction reverted: {label} ({hash})")]
    TransactionReverted { label: String, hash: String },

    /// A deployment receipt carried no contract address.
    #[error("deployment of {0} returned no contract address")]
    MissingContractAddress(String),

    /// A view call returned fewer bytes than expected.
    #[error("unexpected return data from {call}: {len} bytes")]
    UnexpectedReturnData { call: String, len: usize },

    /// A demo needs more Ethereum accounts than the network provides.
    #[error("not enough accounts: need {needed}, found {found}")]
    NotEnoughAccounts { needed: usize, found: usize },

    // --- Confidential transactions ---

    /// The proof encoder failed to produce an account, note, or proof.
    #[error("proof encoding failed: {0}")]
    Encoder(String),

    /// An operation that needs notes was given none.
    #[error("no notes given for {0}")]
    EmptyNotes(&'static str),

    /// A join-split needs one owner account per input note.
    #[error("input note owners mismatch: {notes} notes, {owners} owners")]
    OwnerCountMismatch { notes: usize, owners: usize },

    /// An input note is owned by someone other than the account signing for it.
    #[error("input note {index} is owned by {owner}, not by signer {signer}")]
    NoteOwnerMismatch {
        index: usize,
        owner: alloy::primitives::Address,
        signer: alloy::primitives::Address,
    },

    /// Summing note values overflowed.
    #[error("note values overflow")]
    ValueOverflow,

    /// A deposit must move a positive amount of public tokens.
    #[error("invalid deposit: public value {0} does not shield any tokens")]
    InvalidDeposit(i128),

    /// The proof outputs returned by the encoder could not be decoded.
    #[error("malformed proof output: {0}")]
    MalformedProofOutput(String),

    /// Submitting a confidential or public transaction failed.
    #[error("{operation} failed: {reason}")]
    TransactionFailed { operation: String, reason: String },

    // --- Templates ---

    /// Handlebars template rendering failed (invalid template or missing variables).
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    // --- Project ---

    /// Attempted to create a project in a directory that already exists.
    #[error("project directory already exists: {0}")]
    ProjectExists(PathBuf),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AztecDemoError {
    /// Wrap any error as the failure of a named contract operation.
    pub fn failed(operation: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::TransactionFailed {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }
}

/// Alias for `Result<T, AztecDemoError>`.
pub type Result<T> = std::result::Result<T, AztecDemoError>;
