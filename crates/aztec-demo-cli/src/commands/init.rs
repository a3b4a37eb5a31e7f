use std::path::Path;

use anyhow::Result;
use dialoguer::Select;

use aztec_demo_core::config::DemoConfig;
use aztec_demo_core::encoder::ProofEncoder;
use aztec_demo_core::project;
use aztec_demo_encoder::NodeEncoder;

use crate::output;
use crate::NetworkChoice;

/// Initialize a new aztec-demo project.
///
/// Creates the directory structure, writes the config for the chosen network,
/// copies the encoder bridge and checks for required external tools. If no
/// network is given, prompts interactively.
pub async fn run(dir: &Path, network: Option<NetworkChoice>) -> Result<()> {
    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("aztec-demo")
        .to_string();
    output::print_header(&format!("aztec-demo init: {name}"));

    let network = match network {
        Some(n) => n,
        None => {
            let descriptions = &[
                "Hyperledger Besu (localhost:8545)",
                "Pantheon (localhost:8545, gas price 5 gwei)",
                "Ganache (localhost:7545)",
            ];
            let selection = Select::new()
                .with_prompt("Select network")
                .items(descriptions)
                .default(0)
                .interact()?;
            NetworkChoice::ALL[selection]
        }
    };

    let config = DemoConfig::for_network(network.as_str())?;

    output::print_step(1, 3, &format!("Creating project directory: {}/", dir.display()));
    project::create_project_dirs(dir, &config)?;

    output::print_step(2, 3, "Writing configuration and encoder bridge");
    project::write_project_files(dir, &name, &config)?;

    output::print_step(3, 3, "Checking prerequisites");
    let encoder = NodeEncoder::new(config.encoder.node.clone(), dir.join(&config.encoder.script));
    match encoder.check_prerequisites() {
        Ok(()) => output::print_success("All required tools found"),
        Err(missing) => {
            for m in &missing {
                output::print_warning(&format!(
                    "Missing: {} (install: {})",
                    m.tool_name, m.install_instructions
                ));
            }
        }
    }

    output::print_success(&format!(
        "Project '{name}' created for {}",
        network.as_str()
    ));
    println!();
    println!("  Next steps:");
    println!("    cd {}", dir.display());
    println!("    cp <aztec build>/*.json {}/", config.artifacts_dir.display());
    println!("    (cd encoder && npm install)");
    println!("    aztec-demo zkasset");
    println!();

    Ok(())
}
