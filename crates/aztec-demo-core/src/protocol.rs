//! Contract orchestration: deploy the AZTEC contracts and drive confidential
//! transactions against them.
//!
//! Each function is a short, fixed sequence: ask the [`ProofEncoder`] for
//! proof data, submit it through the [`Chain`], and decode the note events
//! from the receipt.

use alloy::primitives::{Address, Bytes, U256};
use alloy::primitives::aliases::U24;
use alloy::sol_types::SolCall;

use crate::artifacts::{ArtifactSet, ContractArtifact};
use crate::chain::{Chain, TxOptions, TxReceipt};
use crate::contracts::{IAce, IERC20Mintable, IZkAsset, ZkAssetParams};
use crate::deployment::Deployment;
use crate::encoder::{
    AztecAccount, JoinSplitRequest, MintRequest, Note, ProofEncoder, JOIN_SPLIT_PROOF, MINT_PROOF,
};
use crate::error::{AztecDemoError, Result};
use crate::events::{note_events, NoteEvent};
use crate::proof_output::{hash_proof_output, proof_output};

/// Deploy every AZTEC contract and register the proof validators with ACE.
pub async fn instantiate(
    chain: &dyn Chain,
    encoder: &dyn ProofEncoder,
    artifacts: &ArtifactSet,
    tx: &TxOptions,
) -> Result<Deployment> {
    tracing::info!("deploying AZTEC contracts");

    let ace = deploy(chain, &artifacts.ace, &[], tx).await?;
    let join_split = deploy(chain, &artifacts.join_split, &[], tx).await?;
    let adjust_supply = deploy(chain, &artifacts.adjust_supply, &[], tx).await?;
    let erc20 = deploy(chain, &artifacts.erc20, &[], tx).await?;
    let zk_asset_mintable = deploy(
        chain,
        &artifacts.zk_asset_mintable,
        &ZkAssetParams::mintable(ace).abi_encode(),
        tx,
    )
    .await?;
    let zk_asset = deploy(
        chain,
        &artifacts.zk_asset,
        &ZkAssetParams::convertible(ace, erc20).abi_encode(),
        tx,
    )
    .await?;

    let crs = encoder.common_reference_string().await?;
    let set_crs = IAce::setCommonReferenceStringCall {
        commonReferenceString: crs,
    };
    send(chain, "setCommonReferenceString", ace, set_crs.abi_encode(), tx).await?;

    for (proof, validator) in [(JOIN_SPLIT_PROOF, join_split), (MINT_PROOF, adjust_supply)] {
        let set_proof = IAce::setProofCall {
            proof: U24::from(proof),
            validatorAddress: validator,
        };
        send(chain, "setProof", ace, set_proof.abi_encode(), tx).await?;
    }

    let deployment = Deployment {
        ace,
        join_split,
        adjust_supply,
        erc20,
        zk_asset_mintable,
        zk_asset,
    };
    for (label, address) in deployment.entries() {
        tracing::info!("deployed {label} at {address}");
    }
    Ok(deployment)
}

/// Mint `notes` as the initial supply of a mintable ZkAsset.
pub async fn mint_confidential_asset(
    chain: &dyn Chain,
    encoder: &dyn ProofEncoder,
    notes: &[Note],
    zk_asset_mintable: Address,
    tx: &TxOptions,
) -> Result<Vec<NoteEvent>> {
    if notes.is_empty() {
        return Err(AztecDemoError::EmptyNotes("confidentialMint"));
    }
    let total = sum_values(notes)?;
    tracing::info!("minting {} notes, total value {total}", notes.len());

    // The new total-supply note belongs to a throwaway identity.
    let supply_owner = encoder.generate_account().await?;
    let request = MintRequest {
        new_total_minted: encoder.create_note(&supply_owner.public_key, total).await?,
        old_total_minted: encoder.create_zero_value_note().await?,
        adjusted_notes: notes.to_vec(),
        sender: zk_asset_mintable,
    };
    let proof = encoder.encode_mint(&request).await?;

    let call = IZkAsset::confidentialMintCall {
        proof: U24::from(MINT_PROOF),
        proofData: proof.proof_data,
    };
    let receipt = send(chain, "confidentialMint", zk_asset_mintable, call.abi_encode(), tx).await?;
    Ok(note_events(&receipt.logs))
}

/// A join-split between existing notes.
#[derive(Debug, Clone)]
pub struct Transfer<'a> {
    pub input_notes: &'a [Note],
    /// Owner identity of each input note, same order.
    pub input_note_owners: &'a [AztecAccount],
    pub output_notes: &'a [Note],
    pub zk_asset: Address,
    pub join_split: Address,
    /// Receives the public value when inputs exceed outputs.
    pub public_owner: Address,
}

/// Destroy `input_notes` and create `output_notes` through a join-split.
///
/// Any value difference is settled in public tokens with `public_owner`.
pub async fn confidential_transfer(
    chain: &dyn Chain,
    encoder: &dyn ProofEncoder,
    transfer: &Transfer<'_>,
    tx: &TxOptions,
) -> Result<Vec<NoteEvent>> {
    if transfer.input_notes.len() != transfer.input_note_owners.len() {
        return Err(AztecDemoError::OwnerCountMismatch {
            notes: transfer.input_notes.len(),
            owners: transfer.input_note_owners.len(),
        });
    }
    for (index, (note, signer)) in transfer
        .input_notes
        .iter()
        .zip(transfer.input_note_owners)
        .enumerate()
    {
        if note.owner != signer.address {
            return Err(AztecDemoError::NoteOwnerMismatch {
                index,
                owner: note.owner,
                signer: signer.address,
            });
        }
    }
    if transfer.input_notes.is_empty() && transfer.output_notes.is_empty() {
        return Err(AztecDemoError::EmptyNotes("confidentialTransfer"));
    }
    let k_public = public_value(transfer.input_notes, transfer.output_notes)?;
    tracing::info!(
        "join-split {} -> {} notes, kPublic {k_public}",
        transfer.input_notes.len(),
        transfer.output_notes.len()
    );

    let request = JoinSplitRequest {
        input_notes: transfer.input_notes.to_vec(),
        output_notes: transfer.output_notes.to_vec(),
        sender: tx.from,
        input_note_owners: transfer.input_note_owners.to_vec(),
        public_owner: transfer.public_owner,
        k_public,
        validator: transfer.join_split,
    };
    let proof = encoder.encode_join_split(&request).await?;

    let call = IZkAsset::confidentialTransferCall {
        proofData: proof.proof_data,
    };
    let receipt = send(
        chain,
        "confidentialTransfer",
        transfer.zk_asset,
        call.abi_encode(),
        tx,
    )
    .await?;
    Ok(note_events(&receipt.logs))
}

/// Conversion of public ERC20 tokens into new notes.
#[derive(Debug, Clone)]
pub struct Shield<'a> {
    pub output_notes: &'a [Note],
    pub zk_asset: Address,
    pub ace: Address,
    pub join_split: Address,
    /// Account whose approved ERC20 tokens are pulled in.
    pub public_owner: Address,
}

/// Shield ERC20 tokens into `output_notes`.
///
/// ACE must hold an ERC20 allowance from `public_owner` beforehand. The
/// deposit proof hash is approved for the deposited amount before the
/// join-split is submitted.
pub async fn shield_erc20_to_zk_asset(
    chain: &dyn Chain,
    encoder: &dyn ProofEncoder,
    shield: &Shield<'_>,
    tx: &TxOptions,
) -> Result<Vec<NoteEvent>> {
    let k_public = public_value(&[], shield.output_notes)?;
    if k_public >= 0 {
        return Err(AztecDemoError::InvalidDeposit(k_public.into()));
    }
    let deposit = k_public.unsigned_abs();
    tracing::info!("shielding {deposit} tokens into {} notes", shield.output_notes.len());

    let request = JoinSplitRequest {
        input_notes: Vec::new(),
        output_notes: shield.output_notes.to_vec(),
        sender: tx.from,
        input_note_owners: Vec::new(),
        public_owner: shield.public_owner,
        k_public,
        validator: shield.join_split,
    };
    let proof = encoder.encode_join_split(&request).await?;

    let deposit_output = proof_output(&proof.expected_output, 0)?;
    let deposit_hash = hash_proof_output(&deposit_output)?;
    tracing::debug!("deposit proof hash {deposit_hash}");

    let approve = IAce::publicApproveCall {
        registryOwner: shield.zk_asset,
        proofHash: deposit_hash,
        value: U256::from(deposit),
    };
    send(chain, "publicApprove", shield.ace, approve.abi_encode(), tx).await?;

    let call = IZkAsset::confidentialTransferCall {
        proofData: proof.proof_data,
    };
    let receipt = send(chain, "deposit", shield.zk_asset, call.abi_encode(), tx).await?;
    Ok(note_events(&receipt.logs))
}

/// Mint public ERC20 tokens to `to`.
pub async fn mint_erc20(
    chain: &dyn Chain,
    erc20: Address,
    to: Address,
    amount: u64,
    tx: &TxOptions,
) -> Result<()> {
    let call = IERC20Mintable::mintCall {
        to,
        value: U256::from(amount),
    };
    send(chain, "erc20 mint", erc20, call.abi_encode(), tx).await?;
    Ok(())
}

/// Let `spender` pull `amount` ERC20 tokens from `tx.from`.
pub async fn approve_erc20(
    chain: &dyn Chain,
    erc20: Address,
    spender: Address,
    amount: u64,
    tx: &TxOptions,
) -> Result<()> {
    let call = IERC20Mintable::approveCall {
        spender,
        value: U256::from(amount),
    };
    send(chain, "erc20 approve", erc20, call.abi_encode(), tx).await?;
    Ok(())
}

/// `kPublic`: input value minus output value.
pub fn public_value(inputs: &[Note], outputs: &[Note]) -> Result<i64> {
    let inputs = i64::try_from(sum_values(inputs)?).map_err(|_| AztecDemoError::ValueOverflow)?;
    let outputs = i64::try_from(sum_values(outputs)?).map_err(|_| AztecDemoError::ValueOverflow)?;
    inputs.checked_sub(outputs).ok_or(AztecDemoError::ValueOverflow)
}

fn sum_values(notes: &[Note]) -> Result<u64> {
    notes
        .iter()
        .try_fold(0u64, |acc, n| acc.checked_add(n.value))
        .ok_or(AztecDemoError::ValueOverflow)
}

async fn deploy(
    chain: &dyn Chain,
    artifact: &ContractArtifact,
    constructor_args: &[u8],
    tx: &TxOptions,
) -> Result<Address> {
    tracing::debug!("deploying {}", artifact.name);
    let receipt = chain
        .deploy(artifact.deploy_code(constructor_args), tx)
        .await
        .map_err(|e| AztecDemoError::failed(format!("{} deployment", artifact.name), e))?;
    check_success(&artifact.name, &receipt)?;
    receipt
        .contract_address
        .ok_or_else(|| AztecDemoError::MissingContractAddress(artifact.name.clone()))
}

async fn send(
    chain: &dyn Chain,
    operation: &str,
    to: Address,
    calldata: Vec<u8>,
    tx: &TxOptions,
) -> Result<TxReceipt> {
    let receipt = chain
        .send(to, Bytes::from(calldata), tx)
        .await
        .map_err(|e| AztecDemoError::failed(operation, e))?;
    check_success(operation, &receipt)?;
    Ok(receipt)
}

fn check_success(label: &str, receipt: &TxReceipt) -> Result<()> {
    if receipt.success {
        Ok(())
    } else {
        Err(AztecDemoError::failed(
            label,
            AztecDemoError::TransactionReverted {
                label: label.to_string(),
                hash: receipt.transaction_hash.to_string(),
            },
        ))
    }
}
