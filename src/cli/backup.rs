//! List and prune config file backups.
//!
//! ```bash
//! mcphub backup list
//! mcphub backup list laptop
//! mcphub backup prune              # settings retention window
//! mcphub backup prune --days 7     # explicit window
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use super::common::{load_config, open_store, resolve_instance};
use crate::backup::BackupManager;
use crate::config;

/// Command to manage config file backups.
#[derive(Args)]
pub struct BackupCommand {
    #[command(subcommand)]
    command: BackupSubcommand,
}

#[derive(Subcommand)]
enum BackupSubcommand {
    /// List backup records, optionally for one instance.
    List {
        /// Instance name or id
        instance: Option<String>,
    },

    /// Delete backups older than the retention window.
    Prune {
        /// Retention window in days; defaults to the configured value
        #[arg(long)]
        days: Option<u32>,
    },
}

impl BackupCommand {
    /// Execute the backup subcommand.
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        match self.command {
            BackupSubcommand::List {
                instance,
            } => list(instance.as_deref()),
            BackupSubcommand::Prune {
                days,
            } => prune(days, config_path),
        }
    }
}

fn list(instance: Option<&str>) -> Result<()> {
    let store = open_store()?;
    let records: Vec<_> = match instance {
        Some(name) => {
            let id = resolve_instance(&store, name)?.id.clone();
            store.backups_for_instance(&id).into_iter().cloned().collect()
        }
        None => store.backups().to_vec(),
    };

    if records.is_empty() {
        println!("No backups recorded.");
        return Ok(());
    }

    println!("{}", "Backups:".bold());
    for record in records {
        let owner = store
            .instance(&record.instance_id)
            .map_or_else(|| record.instance_id.clone(), |i| i.name.clone());
        println!(
            "  {} {} {}",
            record.created_at.to_rfc3339().dimmed(),
            owner.cyan(),
            record.backup_path
        );
    }
    Ok(())
}

fn prune(days: Option<u32>, config_path: Option<&Path>) -> Result<()> {
    let mut store = open_store()?;
    let settings = load_config(config_path)?.settings;
    let days = days.unwrap_or(settings.backup_retention_days);

    let manager = BackupManager::new(config::backup_dir()?);
    let pruned = manager.prune(&mut store, days)?;

    if pruned.is_empty() {
        println!("Nothing to prune (retention: {days} days).");
    } else {
        println!(
            "{} Pruned {} backup(s) older than {days} days",
            "✓".green(),
            pruned.len()
        );
    }
    Ok(())
}
