use anyhow::{Context, Result};

use aztec_demo_core::artifacts::ArtifactSet;
use aztec_demo_core::deployment::{self, DEPLOYMENT_FILE};
use aztec_demo_core::protocol;

use super::Session;
use crate::output;
use crate::reporter::TerminalReporter;
use crate::GlobalArgs;

/// Deploy the AZTEC contracts and save their addresses to `deployment.json`
/// next to the config.
pub async fn run(global: &GlobalArgs) -> Result<()> {
    output::print_header("aztec-demo deploy");

    let session = Session::open(global).await?;
    let artifacts_dir = session.loaded.artifacts_dir();
    let artifacts = ArtifactSet::load(&artifacts_dir).with_context(|| {
        format!(
            "contract artifacts missing in {}; copy the AZTEC Truffle build there",
            artifacts_dir.display()
        )
    })?;
    let encoder = session.encoder()?;

    output::print_step(1, 2, "Deploying AZTEC contracts...");
    let reporter = TerminalReporter::new();
    reporter.waiting("waiting for receipts");
    let deployment =
        protocol::instantiate(&session.chain, &encoder, &artifacts, &session.tx).await?;
    reporter.finish();
    output::print_deployment(&deployment);

    output::print_step(2, 2, &format!("Writing {DEPLOYMENT_FILE}"));
    deployment::save(&deployment, &session.loaded.base_dir)?;
    tracing::info!(
        "deployment saved to {}",
        session.loaded.base_dir.join(DEPLOYMENT_FILE).display()
    );

    output::print_success("AZTEC contracts deployed");
    Ok(())
}
