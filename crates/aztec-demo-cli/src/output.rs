//! Terminal output formatting for the aztec-demo CLI.

use console::style;

use aztec_demo_core::balances::Erc20Balances;
use aztec_demo_core::deployment::Deployment;
use aztec_demo_core::events::NoteEvent;

/// Print a bold cyan header with an underline separator.
pub fn print_header(text: &str) {
    println!("\n{}", style(text).bold().cyan());
    println!("{}", style("=".repeat(text.len())).dim());
}

/// Print a success message prefixed with green `[OK]`.
pub fn print_success(text: &str) {
    println!("{} {}", style("[OK]").green().bold(), text);
}

/// Print a warning message prefixed with yellow `[WARN]`.
pub fn print_warning(text: &str) {
    println!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print an error message prefixed with red `[ERROR]`.
pub fn print_error(text: &str) {
    println!("{} {}", style("[ERROR]").red().bold(), text);
}

/// Print a progress step indicator like `[1/4] Deploying AZTEC contracts`.
pub fn print_step(step: u32, total: u32, text: &str) {
    println!(
        "{} {}",
        style(format!("[{step}/{total}]")).dim(),
        text
    );
}

/// Print a key-value pair with dimmed key formatting.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

pub fn print_deployment(deployment: &Deployment) {
    for (label, address) in deployment.entries() {
        print_key_value(&format!("{label:<16}"), &address.to_string());
    }
}

/// One pretty-printed JSON object per event.
pub fn print_note_events(events: &[NoteEvent]) {
    if events.is_empty() {
        println!("  {}", style("no note events").dim());
        return;
    }
    for event in events {
        match serde_json::to_string_pretty(event) {
            Ok(json) => println!("{json}"),
            Err(e) => print_warning(&format!("cannot render note event: {e}")),
        }
    }
}

pub fn print_balances(balances: &Erc20Balances) {
    println!("  {}", style("erc20 balances").bold());
    print_key_value("alice              ", &balances.alice.to_string());
    print_key_value("bob                ", &balances.bob.to_string());
    print_key_value("shielded in ZkAsset", &balances.shielded.to_string());
    print_key_value("total supply       ", &balances.total_supply.to_string());
}
