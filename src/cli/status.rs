//! Per-instance drift report.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::open_store;
use crate::sync::needs_sync;

/// Command to show which instances have drifted since their last sync.
#[derive(Args)]
pub struct StatusCommand {}

impl StatusCommand {
    /// Execute the status command.
    pub async fn execute(self) -> Result<()> {
        let store = open_store()?;
        if store.instances().is_empty() {
            println!("No instances configured. Add one with 'mcphub instance add'.");
            return Ok(());
        }

        let mut drifted = 0usize;
        for inst in store.instances() {
            let state = if needs_sync(inst) {
                drifted += 1;
                "needs sync".yellow().bold().to_string()
            } else {
                "in sync".green().to_string()
            };
            let last = inst
                .last_synced
                .map_or_else(|| "-".to_string(), |t| t.to_rfc3339());
            println!(
                "  {:<20} {state:<24} last synced: {last}",
                inst.name.cyan()
            );
        }

        if drifted > 0 {
            println!("\nRun 'mcphub sync' to bring {drifted} instance(s) up to date.");
        }
        Ok(())
    }
}
