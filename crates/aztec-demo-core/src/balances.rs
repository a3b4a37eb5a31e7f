use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

use crate::chain::Chain;
use crate::contracts::IERC20Mintable;
use crate::error::{AztecDemoError, Result};

/// Public ERC20 holdings of the two demo parties, and what sits shielded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Erc20Balances {
    pub alice: U256,
    pub bob: U256,
    /// Supply not held by either party (held by the ZkAsset as notes).
    pub shielded: U256,
    pub total_supply: U256,
}

impl Erc20Balances {
    /// Query `totalSupply` and `balanceOf` for `accounts[0]` (alice) and
    /// `accounts[1]` (bob).
    pub async fn fetch(chain: &dyn Chain, erc20: Address, accounts: &[Address]) -> Result<Self> {
        let [alice_account, bob_account, ..] = accounts else {
            return Err(AztecDemoError::NotEnoughAccounts {
                needed: 2,
                found: accounts.len(),
            });
        };

        let total_supply = read_u256(
            chain,
            erc20,
            "totalSupply",
            IERC20Mintable::totalSupplyCall {}.abi_encode(),
        )
        .await?;
        let alice = balance_of(chain, erc20, *alice_account).await?;
        let bob = balance_of(chain, erc20, *bob_account).await?;

        Ok(Self {
            alice,
            bob,
            shielded: total_supply.saturating_sub(alice).saturating_sub(bob),
            total_supply,
        })
    }
}

pub async fn balance_of(chain: &dyn Chain, erc20: Address, owner: Address) -> Result<U256> {
    read_u256(
        chain,
        erc20,
        "balanceOf",
        IERC20Mintable::balanceOfCall { owner }.abi_encode(),
    )
    .await
}

async fn read_u256(chain: &dyn Chain, to: Address, name: &str, calldata: Vec<u8>) -> Result<U256> {
    let out = chain.call(to, Bytes::from(calldata)).await?;
    if out.len() < 32 {
        return Err(AztecDemoError::UnexpectedReturnData {
            call: name.to_string(),
            len: out.len(),
        });
    }
    Ok(U256::from_be_slice(&out[..32]))
}
