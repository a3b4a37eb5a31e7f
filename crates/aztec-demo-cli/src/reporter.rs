use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use aztec_demo_core::balances::Erc20Balances;
use aztec_demo_core::deployment::Deployment;
use aztec_demo_core::encoder::AztecAccount;
use aztec_demo_core::events::NoteEvent;
use aztec_demo_core::scenario::Reporter;

use crate::output;

/// Prints scenario progress while a spinner runs under the current step.
pub struct TerminalReporter {
    spinner: ProgressBar,
}

impl TerminalReporter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(120));
        Self { spinner }
    }

    /// Set the spinner message outside of a scenario step.
    pub fn waiting(&self, text: &str) {
        self.spinner.set_message(text.to_string());
    }

    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for TerminalReporter {
    fn drop(&mut self) {
        self.spinner.finish_and_clear();
    }
}

impl Reporter for TerminalReporter {
    fn step(&self, step: u32, total: u32, text: &str) {
        self.spinner
            .suspend(|| output::print_step(step, total, text));
        self.spinner.set_message(text.to_string());
    }

    fn deployed(&self, deployment: &Deployment) {
        self.spinner.suspend(|| output::print_deployment(deployment));
    }

    fn identities(&self, identities: &[(&str, &AztecAccount)]) {
        self.spinner.suspend(|| {
            for (name, account) in identities {
                output::print_key_value(name, &account.address.to_string());
            }
        });
    }

    fn note_events(&self, events: &[NoteEvent]) {
        self.spinner.suspend(|| output::print_note_events(events));
    }

    fn balances(&self, balances: &Erc20Balances) {
        self.spinner.suspend(|| output::print_balances(balances));
    }
}
