//! The two example flows: a purely confidential asset, and an ERC20-backed
//! asset that is shielded, transferred and unshielded.
//!
//! Both deploy a fresh set of contracts and talk to a [`Reporter`] for
//! everything the user should see.

use alloy::primitives::Address;

use crate::artifacts::ArtifactSet;
use crate::balances::Erc20Balances;
use crate::chain::{Chain, TxOptions};
use crate::deployment::Deployment;
use crate::encoder::{AztecAccount, Note, ProofEncoder};
use crate::error::{AztecDemoError, Result};
use crate::events::NoteEvent;
use crate::protocol::{self, Shield, Transfer};

/// Receives progress from a running scenario.
pub trait Reporter: Send + Sync {
    /// A new step is starting.
    fn step(&self, step: u32, total: u32, text: &str);

    fn deployed(&self, deployment: &Deployment);

    /// AZTEC identities created for the demo, by name.
    fn identities(&self, identities: &[(&str, &AztecAccount)]);

    fn note_events(&self, events: &[NoteEvent]);

    fn balances(&self, balances: &Erc20Balances);
}

/// Everything a scenario runs against.
pub struct DemoContext<'a> {
    pub chain: &'a dyn Chain,
    pub encoder: &'a dyn ProofEncoder,
    pub artifacts: &'a ArtifactSet,
    /// Options for every transaction; `from` signs them all.
    pub tx: TxOptions,
}

impl DemoContext<'_> {
    async fn accounts(&self, needed: usize) -> Result<Vec<Address>> {
        let accounts = self.chain.accounts().await?;
        if accounts.len() < needed {
            return Err(AztecDemoError::NotEnoughAccounts {
                needed,
                found: accounts.len(),
            });
        }
        Ok(accounts)
    }

    async fn notes(&self, owner: &AztecAccount, values: &[u64]) -> Result<Vec<Note>> {
        let mut notes = Vec::with_capacity(values.len());
        for value in values {
            notes.push(self.encoder.create_note(&owner.public_key, *value).await?);
        }
        Ok(notes)
    }

    async fn identities(&self, reporter: &dyn Reporter) -> Result<(AztecAccount, AztecAccount)> {
        let alice = self.encoder.generate_account().await?;
        let bob = self.encoder.generate_account().await?;
        reporter.identities(&[("alice", &alice), ("bob", &bob)]);
        Ok((alice, bob))
    }

    async fn report_balances(
        &self,
        reporter: &dyn Reporter,
        erc20: Address,
        accounts: &[Address],
    ) -> Result<()> {
        let balances = Erc20Balances::fetch(self.chain, erc20, accounts).await?;
        reporter.balances(&balances);
        Ok(())
    }
}

/// Mint two notes (100 and 50) for alice, then join-split them into two notes
/// of 75 for bob.
pub async fn run_zkasset(ctx: &DemoContext<'_>, reporter: &dyn Reporter) -> Result<Deployment> {
    const STEPS: u32 = 4;
    let accounts = ctx.accounts(1).await?;

    reporter.step(1, STEPS, "Deploying AZTEC contracts");
    let deployment = protocol::instantiate(ctx.chain, ctx.encoder, ctx.artifacts, &ctx.tx).await?;
    reporter.deployed(&deployment);

    reporter.step(2, STEPS, "Creating identities");
    let (alice, bob) = ctx.identities(reporter).await?;

    reporter.step(3, STEPS, "Minting asset (2 notes for alice, value 100 and 50)");
    let alice_notes = ctx.notes(&alice, &[100, 50]).await?;
    let events = protocol::mint_confidential_asset(
        ctx.chain,
        ctx.encoder,
        &alice_notes,
        deployment.zk_asset_mintable,
        &ctx.tx,
    )
    .await?;
    reporter.note_events(&events);

    reporter.step(
        4,
        STEPS,
        "Confidential transfer: alice creates 2 notes of value 75 for bob",
    );
    let bob_notes = ctx.notes(&bob, &[75, 75]).await?;
    let events = protocol::confidential_transfer(
        ctx.chain,
        ctx.encoder,
        &Transfer {
            input_notes: &alice_notes,
            input_note_owners: &[alice.clone(), alice],
            output_notes: &bob_notes,
            zk_asset: deployment.zk_asset_mintable,
            join_split: deployment.join_split,
            public_owner: accounts[0],
        },
        &ctx.tx,
    )
    .await?;
    reporter.note_events(&events);

    Ok(deployment)
}

/// Public supply minted, approved to ACE, shielded by `accounts[0]`.
const ERC20_SUPPLY: u64 = 150;

/// Shield 150 ERC20 tokens into notes for alice, pass them to bob, let bob
/// unshield 100 to `accounts[1]`, then send 20 privately and 30 publicly back.
pub async fn run_zkasset_erc20(
    ctx: &DemoContext<'_>,
    reporter: &dyn Reporter,
) -> Result<Deployment> {
    const STEPS: u32 = 7;
    let accounts = ctx.accounts(2).await?;

    reporter.step(1, STEPS, "Deploying AZTEC contracts");
    let deployment = protocol::instantiate(ctx.chain, ctx.encoder, ctx.artifacts, &ctx.tx).await?;
    reporter.deployed(&deployment);

    reporter.step(2, STEPS, "Creating identities");
    let (alice, bob) = ctx.identities(reporter).await?;

    reporter.step(
        3,
        STEPS,
        &format!("Minting {ERC20_SUPPLY} erc20 tokens (initial owner: alice)"),
    );
    protocol::mint_erc20(ctx.chain, deployment.erc20, accounts[0], ERC20_SUPPLY, &ctx.tx).await?;
    protocol::approve_erc20(ctx.chain, deployment.erc20, deployment.ace, ERC20_SUPPLY, &ctx.tx)
        .await?;
    ctx.report_balances(reporter, deployment.erc20, &accounts).await?;

    reporter.step(4, STEPS, "Alice shields 150 erc20 tokens to AZTEC notes");
    let alice_notes = ctx.notes(&alice, &[100, 50]).await?;
    let events = protocol::shield_erc20_to_zk_asset(
        ctx.chain,
        ctx.encoder,
        &Shield {
            output_notes: &alice_notes,
            zk_asset: deployment.zk_asset,
            ace: deployment.ace,
            join_split: deployment.join_split,
            public_owner: accounts[0],
        },
        &ctx.tx,
    )
    .await?;
    tracing::debug!("shield emitted {} note events", events.len());
    ctx.report_balances(reporter, deployment.erc20, &accounts).await?;

    reporter.step(5, STEPS, "Alice privately transfers 150 in AZTEC notes to bob");
    let bob_notes = ctx.notes(&bob, &[75, 75]).await?;
    transfer_quietly(
        ctx,
        &deployment,
        &alice_notes,
        &[alice.clone(), alice.clone()],
        &bob_notes,
        accounts[0],
    )
    .await?;
    ctx.report_balances(reporter, deployment.erc20, &accounts).await?;

    // 150 in, 50 out: the remaining 100 leaves as public tokens.
    reporter.step(6, STEPS, "Bob unshields 100 from AZTEC notes to erc20 tokens");
    let bob_change = ctx.notes(&bob, &[25, 25]).await?;
    transfer_quietly(
        ctx,
        &deployment,
        &bob_notes,
        &[bob.clone(), bob.clone()],
        &bob_change,
        accounts[1],
    )
    .await?;
    ctx.report_balances(reporter, deployment.erc20, &accounts).await?;

    reporter.step(
        7,
        STEPS,
        "Bob privately transfers 20 in AZTEC notes and 30 erc20 tokens to alice",
    );
    let alice_change = ctx.notes(&alice, &[20]).await?;
    transfer_quietly(
        ctx,
        &deployment,
        &bob_change,
        &[bob.clone(), bob],
        &alice_change,
        accounts[0],
    )
    .await?;
    ctx.report_balances(reporter, deployment.erc20, &accounts).await?;

    Ok(deployment)
}

/// Join-split on the ERC20-linked asset without reporting its events.
async fn transfer_quietly(
    ctx: &DemoContext<'_>,
    deployment: &Deployment,
    input_notes: &[Note],
    input_note_owners: &[AztecAccount],
    output_notes: &[Note],
    public_owner: Address,
) -> Result<()> {
    let events = protocol::confidential_transfer(
        ctx.chain,
        ctx.encoder,
        &Transfer {
            input_notes,
            input_note_owners,
            output_notes,
            zk_asset: deployment.zk_asset,
            join_split: deployment.join_split,
            public_owner,
        },
        &ctx.tx,
    )
    .await?;
    tracing::debug!("transfer emitted {} note events", events.len());
    Ok(())
}
