//! Decoding of the `proofOutputs` byte string returned by AZTEC validators.
//!
//! aztec.js hands back `expectedOutput` with the outer ABI length word already
//! stripped, so the buffer starts at the count (32-byte big-endian words):
//!
//! ```text
//! [count][offset_0]..[offset_n-1] .. [len_i][output_i bytes] ..
//! ^-- offsets are relative to here and point just past len_i
//! ```
//!
//! The hash of a proof output is what ACE expects in `publicApprove` before a
//! deposit can pull public tokens.

use alloy::primitives::{keccak256, B256, U256};

use crate::error::{AztecDemoError, Result};

const WORD: usize = 32;

fn malformed(msg: impl Into<String>) -> AztecDemoError {
    AztecDemoError::MalformedProofOutput(msg.into())
}

fn read_word(data: &[u8], at: usize) -> Result<usize> {
    let word = data
        .get(at..at + WORD)
        .ok_or_else(|| malformed(format!("word at byte {at} out of bounds ({} bytes)", data.len())))?;
    let value = U256::from_be_slice(word);
    if value > U256::from(u32::MAX) {
        return Err(malformed(format!("word at byte {at} too large")));
    }
    Ok(value.to::<usize>())
}

/// Number of proof outputs in an encoded `proofOutputs`.
pub fn proof_output_count(proof_outputs: &[u8]) -> Result<usize> {
    read_word(proof_outputs, 0)
}

/// Extract output `index`, including its length word.
pub fn proof_output(proof_outputs: &[u8], index: usize) -> Result<Vec<u8>> {
    let count = proof_output_count(proof_outputs)?;
    if index >= count {
        return Err(malformed(format!("index {index} out of range ({count} outputs)")));
    }
    let offset = read_word(proof_outputs, WORD + WORD * index)?;
    let start = offset
        .checked_sub(WORD)
        .ok_or_else(|| malformed(format!("offset {offset} points inside the header")))?;
    let length = read_word(proof_outputs, start)?;
    let end = offset
        .checked_add(length)
        .filter(|end| *end <= proof_outputs.len())
        .ok_or_else(|| malformed(format!("output {index} of {length} bytes overruns buffer")))?;
    Ok(proof_outputs[start..end].to_vec())
}

/// keccak256 of a proof output, excluding its length word.
pub fn hash_proof_output(output: &[u8]) -> Result<B256> {
    let body = output
        .get(WORD..)
        .ok_or_else(|| malformed("proof output shorter than its length word"))?;
    Ok(keccak256(body))
}
