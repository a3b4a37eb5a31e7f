//! Core library for aztec-demo.
//!
//! Deploys the AZTEC contracts (ACE, the JoinSplit and AdjustSupply
//! validators, ERC20Mintable, ZkAssetMintable and ZkAsset) on a Besu, Pantheon
//! or Ganache node and drives confidential transactions against them.
//!
//! Two seams keep the orchestration testable:
//! - [`chain::Chain`] is the node connection, implemented over JSON-RPC by
//!   [`chain::RpcChain`]
//! - [`encoder::ProofEncoder`] builds AZTEC accounts, notes and proofs; the
//!   `aztec-demo-encoder` crate implements it on top of aztec.js

pub mod artifacts;
pub mod balances;
pub mod chain;
pub mod config;
pub mod contracts;
pub mod deployment;
pub mod encoder;
pub mod error;
pub mod events;
pub mod network;
pub mod project;
pub mod proof_output;
pub mod protocol;
pub mod scenario;
pub mod templates;

#[cfg(test)]
pub(crate) mod testing;
