//! Node connection: the [`Chain`] seam and its JSON-RPC implementation.

use alloy::network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, Bytes, Log, B256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;

use crate::config::DemoConfig;
use crate::error::{AztecDemoError, Result};

/// Per-transaction options attached to every deploy and send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOptions {
    pub from: Address,
    pub gas_limit: u64,
    pub gas_price: Option<u128>,
}

impl TxOptions {
    pub fn from_config(config: &DemoConfig, from: Address) -> Self {
        Self {
            from,
            gas_limit: config.gas_limit,
            gas_price: config.gas_price,
        }
    }

    fn request(&self) -> TransactionRequest {
        let tx = TransactionRequest::default()
            .with_from(self.from)
            .with_gas_limit(self.gas_limit);
        match self.gas_price {
            Some(price) => tx.with_gas_price(price),
            None => tx,
        }
    }
}

/// The parts of a mined receipt the demo looks at.
#[derive(Debug, Clone, Default)]
pub struct TxReceipt {
    pub transaction_hash: B256,
    pub contract_address: Option<Address>,
    pub success: bool,
    pub logs: Vec<Log>,
}

impl From<TransactionReceipt> for TxReceipt {
    fn from(receipt: TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            contract_address: receipt.contract_address,
            success: receipt.status(),
            logs: receipt
                .inner
                .logs()
                .iter()
                .map(|log| log.inner.clone())
                .collect(),
        }
    }
}

/// Everything the orchestration needs from an Ethereum node.
#[async_trait]
pub trait Chain: Send + Sync {
    /// Ethereum accounts available to the demo. The first one signs.
    async fn accounts(&self) -> Result<Vec<Address>>;

    async fn chain_id(&self) -> Result<u64>;

    /// Send a contract-creation transaction and wait for its receipt.
    async fn deploy(&self, code: Bytes, tx: &TxOptions) -> Result<TxReceipt>;

    /// Send a state-changing call and wait for its receipt.
    async fn send(&self, to: Address, calldata: Bytes, tx: &TxOptions) -> Result<TxReceipt>;

    /// Execute a read-only call and return the raw return data.
    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes>;
}

/// [`Chain`] backed by an HTTP JSON-RPC node and a local signing key.
pub struct RpcChain {
    provider: DynProvider,
    accounts: Vec<Address>,
}

fn rpc_err(e: impl std::fmt::Display) -> AztecDemoError {
    AztecDemoError::Rpc(e.to_string())
}

impl RpcChain {
    /// Connect to `config.node_url`, signing with `config.private_key`.
    pub async fn connect(config: &DemoConfig) -> Result<Self> {
        config.validate()?;
        let signer: PrivateKeySigner = config
            .private_key
            .parse()
            .map_err(|e| AztecDemoError::InvalidPrivateKey(format!("{e}")))?;
        let signer_address = signer.address();
        tracing::info!(
            "connecting to {} as {signer_address}",
            config.node_url
        );

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect(&config.node_url)
            .await
            .map_err(rpc_err)?
            .erased();

        let accounts = if config.accounts.is_empty() {
            let discovered = provider.get_accounts().await.map_err(rpc_err)?;
            tracing::debug!("node reported {} accounts", discovered.len());
            discovered
        } else {
            config.accounts.clone()
        };

        if accounts.first() != Some(&signer_address) {
            tracing::warn!(
                "first account does not match the signing key ({signer_address}); \
                 transactions may be rejected"
            );
        }

        Ok(Self { provider, accounts })
    }

    async fn submit(&self, label: &str, tx: TransactionRequest) -> Result<TxReceipt> {
        tracing::debug!("sending {label}");
        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(rpc_err)?
            .get_receipt()
            .await
            .map_err(rpc_err)?;
        tracing::debug!(
            "{label} mined in {} (gas used {})",
            receipt.transaction_hash,
            receipt.gas_used
        );
        Ok(receipt.into())
    }
}

#[async_trait]
impl Chain for RpcChain {
    async fn accounts(&self) -> Result<Vec<Address>> {
        Ok(self.accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64> {
        self.provider.get_chain_id().await.map_err(rpc_err)
    }

    async fn deploy(&self, code: Bytes, tx: &TxOptions) -> Result<TxReceipt> {
        let request = tx.request().with_deploy_code(code);
        self.submit("contract creation", request).await
    }

    async fn send(&self, to: Address, calldata: Bytes, tx: &TxOptions) -> Result<TxReceipt> {
        let request = tx.request().with_to(to).with_input(calldata);
        self.submit(&format!("call to {to}"), request).await
    }

    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes> {
        let request = TransactionRequest::default().with_to(to).with_input(calldata);
        self.provider.call(request).await.map_err(rpc_err)
    }
}
