//! In-memory [`Chain`] and [`ProofEncoder`] used by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use alloy::primitives::{keccak256, Address, Bytes, Log, B256, U256};
use alloy::sol_types::{SolCall, SolValue};
use async_trait::async_trait;

use crate::artifacts::ArtifactSet;
use crate::chain::{Chain, TxOptions, TxReceipt};
use crate::contracts::{IERC20Mintable, IZkAsset};
use crate::encoder::{
    AztecAccount, EncodedProof, JoinSplitRequest, MintRequest, Note, PrerequisiteError,
    ProofEncoder,
};
use crate::error::Result;

const WORD: usize = 32;

fn word(value: usize) -> [u8; 32] {
    U256::from(value).to_be_bytes::<32>()
}

/// Build a `proofOutputs` buffer from raw output bodies, laid out the way
/// aztec.js returns `expectedOutput` (no outer length word).
pub(crate) fn encode_proof_outputs(outputs: &[&[u8]]) -> Vec<u8> {
    let header = WORD * (1 + outputs.len());
    let mut offsets = Vec::new();
    let mut body = Vec::new();
    for output in outputs {
        offsets.push(header + body.len() + WORD);
        body.extend_from_slice(&word(output.len()));
        body.extend_from_slice(output);
    }
    let mut data = word(outputs.len()).to_vec();
    for offset in offsets {
        data.extend_from_slice(&word(offset));
    }
    data.extend_from_slice(&body);
    data
}

/// A full artifact set with bytecode `0x60`..`0x65` in deployment order.
pub(crate) fn artifact_set() -> ArtifactSet {
    let dir = tempfile::tempdir().unwrap();
    crate::artifacts::tests::write_artifact_set(dir.path());
    ArtifactSet::load(dir.path()).unwrap()
}

/// A transaction seen by [`MockChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Recorded {
    Deploy { code: Bytes },
    Send { to: Address, calldata: Bytes },
}

#[derive(Default)]
struct ChainState {
    accounts: Vec<Address>,
    recorded: Vec<Recorded>,
    logs: VecDeque<Vec<Log>>,
    revert_next: bool,
    tx_count: u64,
    supply: HashMap<Address, U256>,
    balances: HashMap<(Address, Address), U256>,
    /// ZkAsset address to its linked ERC20.
    linked_tokens: HashMap<Address, Address>,
}

impl ChainState {
    /// Move public tokens for a join-split on a convertible ZkAsset.
    ///
    /// Returns `false` when the paying side lacks the balance, which reverts
    /// the transaction the way ACE would.
    fn settle_public_value(&mut self, zk_asset: Address, calldata: &[u8]) -> bool {
        let Some(&token) = self.linked_tokens.get(&zk_asset) else {
            return true;
        };
        let Ok(call) = IZkAsset::confidentialTransferCall::abi_decode(calldata) else {
            return true;
        };
        let Some((k_public, public_owner)) = MockEncoder::decode_join_split(&call.proofData)
        else {
            return true;
        };
        let amount = U256::from(k_public.unsigned_abs());
        let (payer, payee) = if k_public < 0 {
            (public_owner, zk_asset)
        } else {
            (zk_asset, public_owner)
        };
        let balance = self.balances.entry((token, payer)).or_default();
        if *balance < amount {
            return false;
        }
        *balance -= amount;
        *self.balances.entry((token, payee)).or_default() += amount;
        true
    }
}

/// Linked token of a ZkAsset deployment whose code ends in convertible
/// constructor arguments.
fn linked_token(code: &[u8]) -> Option<Address> {
    let args = code.get(code.len().checked_sub(5 * WORD)?..)?;
    let (_ace, token, _scaling, _adjust, convert) =
        <(Address, Address, U256, bool, bool)>::abi_decode_params(args).ok()?;
    (convert && !token.is_zero()).then_some(token)
}

/// Records every transaction and answers ERC20 views from stored values.
///
/// A token is known once it has a total supply; `balanceOf` on any other
/// address returns empty data.
///
/// `mint` calls to any address are applied to that address's supply and
/// balances. A `confidentialTransfer` on a deployed convertible ZkAsset moves
/// `kPublic` between the public owner and the asset, so balance reads follow a
/// scenario.
pub(crate) struct MockChain {
    state: Mutex<ChainState>,
}

impl MockChain {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(ChainState {
                accounts: vec![Address::repeat_byte(0xa0), Address::repeat_byte(0xb0)],
                ..Default::default()
            }),
        }
    }

    pub(crate) fn with_accounts(accounts: Vec<Address>) -> Self {
        let chain = Self::new();
        chain.state.lock().unwrap().accounts = accounts;
        chain
    }

    pub(crate) fn recorded(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().recorded.clone()
    }

    /// Logs returned by the next sent transaction.
    pub(crate) fn push_logs(&self, logs: Vec<Log>) {
        self.state.lock().unwrap().logs.push_back(logs);
    }

    /// Mine the next transaction with a failed status.
    pub(crate) fn revert_next(&self) {
        self.state.lock().unwrap().revert_next = true;
    }

    pub(crate) fn set_total_supply(&self, erc20: Address, amount: u64) {
        self.state
            .lock()
            .unwrap()
            .supply
            .insert(erc20, U256::from(amount));
    }

    pub(crate) fn set_balance(&self, erc20: Address, owner: Address, amount: u64) {
        self.state
            .lock()
            .unwrap()
            .balances
            .insert((erc20, owner), U256::from(amount));
    }

    fn mine(state: &mut ChainState, record: Recorded) -> TxReceipt {
        state.tx_count += 1;
        state.recorded.push(record);
        let success = !std::mem::take(&mut state.revert_next);
        TxReceipt {
            transaction_hash: B256::from(U256::from(state.tx_count)),
            contract_address: None,
            success,
            logs: Vec::new(),
        }
    }
}

#[async_trait]
impl Chain for MockChain {
    async fn accounts(&self) -> Result<Vec<Address>> {
        Ok(self.state.lock().unwrap().accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(2018)
    }

    async fn deploy(&self, code: Bytes, _tx: &TxOptions) -> Result<TxReceipt> {
        let mut state = self.state.lock().unwrap();
        let token = linked_token(&code);
        let mut receipt = Self::mine(&mut state, Recorded::Deploy { code });
        if receipt.success {
            let address = Address::left_padding_from(&state.tx_count.to_be_bytes());
            if let Some(token) = token {
                state.linked_tokens.insert(address, token);
            }
            receipt.contract_address = Some(address);
        }
        Ok(receipt)
    }

    async fn send(&self, to: Address, calldata: Bytes, _tx: &TxOptions) -> Result<TxReceipt> {
        let mut state = self.state.lock().unwrap();
        if let Ok(mint) = IERC20Mintable::mintCall::abi_decode(&calldata) {
            *state.supply.entry(to).or_default() += mint.value;
            *state.balances.entry((to, mint.to)).or_default() += mint.value;
        }
        if !state.revert_next && !state.settle_public_value(to, &calldata) {
            state.revert_next = true;
        }
        let mut receipt = Self::mine(&mut state, Recorded::Send { to, calldata });
        receipt.logs = state.logs.pop_front().unwrap_or_default();
        Ok(receipt)
    }

    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes> {
        let state = self.state.lock().unwrap();
        let value = if calldata.starts_with(&IERC20Mintable::totalSupplyCall::SELECTOR) {
            state.supply.get(&to).copied()
        } else if let Ok(call) = IERC20Mintable::balanceOfCall::abi_decode(&calldata) {
            // unknown tokens answer nothing, known ones default to zero
            state.supply.get(&to).map(|_| {
                state
                    .balances
                    .get(&(to, call.owner))
                    .copied()
                    .unwrap_or_default()
            })
        } else {
            None
        };
        Ok(value
            .map(|v| Bytes::from(v.to_be_bytes::<32>().to_vec()))
            .unwrap_or_default())
    }
}

#[derive(Default)]
struct EncoderState {
    counter: u64,
    /// Public key to address of every generated account.
    owners: HashMap<Bytes, Address>,
    mints: Vec<MintRequest>,
    join_splits: Vec<JoinSplitRequest>,
}

/// Deterministic encoder that records every proof request.
pub(crate) struct MockEncoder {
    state: Mutex<EncoderState>,
}

impl MockEncoder {
    pub(crate) const CRS: [B256; 6] = [
        B256::with_last_byte(1),
        B256::with_last_byte(2),
        B256::with_last_byte(3),
        B256::with_last_byte(4),
        B256::with_last_byte(5),
        B256::with_last_byte(6),
    ];
    pub(crate) const MINT_PROOF_DATA: Bytes = Bytes::from_static(b"mint proof");
    const JOIN_SPLIT_TAG: B256 = B256::repeat_byte(0x15);

    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(EncoderState::default()),
        }
    }

    /// `proofOutputs` attached to every join-split proof.
    pub(crate) fn expected_output() -> Vec<u8> {
        encode_proof_outputs(&[b"deposit proof output", b"second output"])
    }

    /// Join-split proof data: a tag word, `kPublic` and the public owner.
    pub(crate) fn join_split_proof_data(k_public: i64, public_owner: Address) -> Bytes {
        (Self::JOIN_SPLIT_TAG, k_public, public_owner)
            .abi_encode_params()
            .into()
    }

    fn decode_join_split(proof_data: &[u8]) -> Option<(i64, Address)> {
        let (tag, k_public, public_owner) =
            <(B256, i64, Address)>::abi_decode_params(proof_data).ok()?;
        (tag == Self::JOIN_SPLIT_TAG).then_some((k_public, public_owner))
    }

    pub(crate) fn last_mint(&self) -> Option<MintRequest> {
        self.state.lock().unwrap().mints.last().cloned()
    }

    pub(crate) fn last_join_split(&self) -> Option<JoinSplitRequest> {
        self.state.lock().unwrap().join_splits.last().cloned()
    }

    pub(crate) fn join_splits(&self) -> Vec<JoinSplitRequest> {
        self.state.lock().unwrap().join_splits.clone()
    }

    fn next(&self) -> u64 {
        let mut state = self.state.lock().unwrap();
        state.counter += 1;
        state.counter
    }
}

#[async_trait]
impl ProofEncoder for MockEncoder {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn check_prerequisites(&self) -> std::result::Result<(), Vec<PrerequisiteError>> {
        Ok(())
    }

    async fn generate_account(&self) -> Result<AztecAccount> {
        let n = self.next();
        let account = AztecAccount {
            address: Address::left_padding_from(&n.to_be_bytes()),
            public_key: Bytes::from([&[4u8][..], &n.to_be_bytes()[..]].concat()),
            private_key: B256::from(U256::from(n)),
        };
        self.state
            .lock()
            .unwrap()
            .owners
            .insert(account.public_key.clone(), account.address);
        Ok(account)
    }

    async fn create_note(&self, owner_public_key: &Bytes, value: u64) -> Result<Note> {
        let n = self.next();
        let owner = self
            .state
            .lock()
            .unwrap()
            .owners
            .get(owner_public_key)
            .copied()
            .unwrap_or_default();
        let preimage = [&owner_public_key[..], &value.to_be_bytes()[..], &n.to_be_bytes()[..]].concat();
        Ok(Note {
            public_key: owner_public_key.clone(),
            owner,
            viewing_key: Bytes::from(n.to_be_bytes().to_vec()),
            note_hash: keccak256(preimage),
            value,
        })
    }

    async fn create_zero_value_note(&self) -> Result<Note> {
        self.create_note(&Bytes::new(), 0).await
    }

    async fn common_reference_string(&self) -> Result<[B256; 6]> {
        Ok(Self::CRS)
    }

    async fn encode_mint(&self, request: &MintRequest) -> Result<EncodedProof> {
        self.state.lock().unwrap().mints.push(request.clone());
        Ok(EncodedProof {
            proof_data: Self::MINT_PROOF_DATA,
            expected_output: Bytes::new(),
        })
    }

    async fn encode_join_split(&self, request: &JoinSplitRequest) -> Result<EncodedProof> {
        self.state.lock().unwrap().join_splits.push(request.clone());
        Ok(EncodedProof {
            proof_data: Self::join_split_proof_data(request.k_public, request.public_owner),
            expected_output: Self::expected_output().into(),
        })
    }
}
