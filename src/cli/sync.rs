//! Reconcile enabled servers into client config files.
//!
//! ```bash
//! mcphub sync laptop     # one instance
//! mcphub sync --all      # every instance
//! mcphub sync            # same as --all
//! ```

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::Path;

use super::common::{load_config, open_store, resolve_instance};
use crate::backup::BackupManager;
use crate::config;
use crate::sync::{Reconciler, SyncReport};

/// Command to run the reconciler.
#[derive(Args)]
pub struct SyncCommand {
    /// Instance name or id; omit to sync everything
    instance: Option<String>,

    /// Sync every instance
    #[arg(long, conflicts_with = "instance")]
    all: bool,
}

impl SyncCommand {
    /// Execute the sync command. Fails with a non-zero exit if any target
    /// could not be synced.
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let store = open_store()?;
        let settings = load_config(config_path)?.settings;
        let backups = BackupManager::new(config::backup_dir()?);
        let mut reconciler = Reconciler::new(store, settings, backups);

        match self.instance {
            Some(name) => {
                let id = resolve_instance(reconciler.store(), &name)?.id.clone();
                let report = reconciler.sync_one(&id).await?;
                print_report(&name, &report);
                Ok(())
            }
            None => {
                let outcomes = reconciler.sync_all().await;
                if outcomes.is_empty() {
                    println!("No instances configured. Add one with 'mcphub instance add'.");
                    return Ok(());
                }

                let mut failures = 0usize;
                for outcome in &outcomes {
                    match &outcome.result {
                        Ok(report) => print_report(&outcome.instance_name, report),
                        Err(e) => {
                            failures += 1;
                            println!("{} {}: {e}", "✗".red(), outcome.instance_name.bold());
                        }
                    }
                }

                if failures > 0 {
                    bail!("{failures} of {} instance(s) failed to sync", outcomes.len());
                }
                Ok(())
            }
        }
    }
}

fn print_report(name: &str, report: &SyncReport) {
    let action = if report.changed {
        "synced"
    } else {
        "already up to date"
    };
    print!(
        "{} {}: {action} ({})",
        "✓".green(),
        name.bold(),
        report.config_path.display()
    );
    if let Some(backup) = &report.backup_path {
        print!("{}", format!(", backup at {}", backup.display()).dimmed());
    }
    println!();
}
