use anyhow::{Context, Result};

use aztec_demo_core::artifacts::ArtifactSet;
use aztec_demo_core::deployment;
use aztec_demo_core::scenario::{self, DemoContext};

use super::Session;
use crate::output;
use crate::reporter::TerminalReporter;
use crate::GlobalArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    ZkAsset,
    ZkAssetErc20,
}

impl Demo {
    fn title(&self) -> &'static str {
        match self {
            Self::ZkAsset => "aztec-demo zkasset",
            Self::ZkAssetErc20 => "aztec-demo zkasset-erc20",
        }
    }
}

/// Run one of the example flows against a fresh deployment.
pub async fn run(global: &GlobalArgs, demo: Demo) -> Result<()> {
    output::print_header(demo.title());

    let session = Session::open(global).await?;
    let artifacts_dir = session.loaded.artifacts_dir();
    let artifacts = ArtifactSet::load(&artifacts_dir)
        .with_context(|| format!("loading contract artifacts from {}", artifacts_dir.display()))?;
    let encoder = session.encoder()?;

    let ctx = DemoContext {
        chain: &session.chain,
        encoder: &encoder,
        artifacts: &artifacts,
        tx: session.tx,
    };
    let reporter = TerminalReporter::new();
    let result = match demo {
        Demo::ZkAsset => scenario::run_zkasset(&ctx, &reporter).await,
        Demo::ZkAssetErc20 => scenario::run_zkasset_erc20(&ctx, &reporter).await,
    };
    reporter.finish();

    let deployment = match result {
        Ok(deployment) => deployment,
        Err(e) => {
            output::print_error(&e.to_string());
            return Err(e.into());
        }
    };
    deployment::save(&deployment, &session.loaded.base_dir)?;
    output::print_success("Demo complete");
    Ok(())
}
