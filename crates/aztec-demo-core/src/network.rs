use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Connection and gas settings for a known development network.
///
/// The signing keys below come from public development genesis files.
/// They are for demos only and must never hold real value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkProfile {
    pub name: String,
    /// JSON-RPC endpoint of the node.
    pub node_url: String,
    /// Hex-encoded secp256k1 key that signs every transaction.
    pub private_key: String,
    /// Ethereum accounts used by the demos. The first one sends transactions.
    pub accounts: Vec<Address>,
    /// Gas limit attached to each transaction (sized for contract deployment).
    pub gas_limit: u64,
    /// Legacy gas price in wei; `None` lets the node decide.
    pub gas_price: Option<u128>,
}

const DEV_GENESIS_KEY: &str = "0xc87509a1c067bbde78beb793e6fa76530b6382a4c0241e5e4a9ec0a0f44dc0d3";
const GANACHE_KEY: &str = "0x40718bdd653bbbd6c8b51013862960b99f781dcf4c8b27b42706fe6565311ea4";

const DEV_GENESIS_ACCOUNTS: [Address; 2] = [
    address!("627306090abaB3A6e1400e9345bC60c78a8BEf57"),
    address!("f17f52151EbEF6C7334FAD080c5704D77216b732"),
];
const GANACHE_ACCOUNTS: [Address; 2] = [
    address!("659E3140ee3495D23021D1eDA53Dc02aa6cDcBbF"),
    address!("315345DB61189a1929750aEBaC22412Be13cc92C"),
];

impl NetworkProfile {
    /// Gas limit calibrated to deploy the AZTEC contracts on Besu.
    pub const BESU_GAS_LIMIT: u64 = 0x53EC60;

    /// Gas limit used against Pantheon and Ganache.
    pub const DEV_GAS_LIMIT: u64 = 0x47B760;

    /// 5 gwei.
    pub const DEV_GAS_PRICE: u128 = 0x12A05F200;

    /// Hyperledger Besu private test network.
    pub fn besu() -> Self {
        Self {
            name: "besu".into(),
            node_url: "http://localhost:8545".into(),
            private_key: DEV_GENESIS_KEY.into(),
            accounts: DEV_GENESIS_ACCOUNTS.to_vec(),
            gas_limit: Self::BESU_GAS_LIMIT,
            gas_price: None,
        }
    }

    /// Pantheon started with `--network=dev`.
    pub fn pantheon() -> Self {
        Self {
            name: "pantheon".into(),
            node_url: "http://localhost:8545".into(),
            private_key: DEV_GENESIS_KEY.into(),
            accounts: DEV_GENESIS_ACCOUNTS.to_vec(),
            gas_limit: Self::DEV_GAS_LIMIT,
            gas_price: Some(Self::DEV_GAS_PRICE),
        }
    }

    /// Ganache desktop on its default port.
    pub fn ganache() -> Self {
        Self {
            name: "ganache".into(),
            node_url: "http://localhost:7545".into(),
            private_key: GANACHE_KEY.into(),
            accounts: GANACHE_ACCOUNTS.to_vec(),
            gas_limit: Self::DEV_GAS_LIMIT,
            gas_price: Some(Self::DEV_GAS_PRICE),
        }
    }

    /// Resolve a profile by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "besu" => Some(Self::besu()),
            "pantheon" => Some(Self::pantheon()),
            "ganache" => Some(Self::ganache()),
            _ => None,
        }
    }

    /// Names accepted by [`NetworkProfile::from_name`].
    pub const NAMES: [&'static str; 3] = ["besu", "pantheon", "ganache"];
}
