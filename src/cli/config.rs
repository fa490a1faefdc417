//! Show and change global hub settings.
//!
//! Settings live in `~/.mcphub/config.toml` (or the file named by
//! `MCPHUB_CONFIG` / `--config`).
//!
//! ```bash
//! mcphub config show
//! mcphub config set create-backups false
//! mcphub config set backup-retention-days 14
//! ```

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use crate::config::{GlobalConfig, config_path};

/// Command to manage global hub settings.
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommand>,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Show the current settings (default).
    Show,

    /// Change one setting.
    Set {
        /// Setting name: create-backups or backup-retention-days
        key: String,
        /// New value
        value: String,
    },
}

impl ConfigCommand {
    /// Execute the config subcommand.
    pub async fn execute(self, config_path_override: Option<&Path>) -> Result<()> {
        match self.command.unwrap_or(ConfigSubcommand::Show) {
            ConfigSubcommand::Show => show(config_path_override),
            ConfigSubcommand::Set {
                key,
                value,
            } => set(&key, &value, config_path_override),
        }
    }
}

fn resolved_path(config_path_override: Option<&Path>) -> Result<std::path::PathBuf> {
    match config_path_override {
        Some(p) => Ok(p.to_path_buf()),
        None => config_path(),
    }
}

fn show(config_path_override: Option<&Path>) -> Result<()> {
    let path = resolved_path(config_path_override)?;
    let config = GlobalConfig::load_from(&path)?;

    println!("{}: {}", "Config file".bold(), path.display());
    println!("  create-backups        = {}", config.settings.create_backups);
    println!(
        "  backup-retention-days = {}",
        config.settings.backup_retention_days
    );
    Ok(())
}

fn set(key: &str, value: &str, config_path_override: Option<&Path>) -> Result<()> {
    let path = resolved_path(config_path_override)?;
    let mut config = GlobalConfig::load_from(&path)?;

    match key {
        "create-backups" => {
            config.settings.create_backups = value
                .parse()
                .with_context(|| format!("expected true or false, got '{value}'"))?;
        }
        "backup-retention-days" => {
            config.settings.backup_retention_days = value
                .parse()
                .with_context(|| format!("expected a number of days, got '{value}'"))?;
        }
        other => bail!("unknown setting '{other}' (try create-backups or backup-retention-days)"),
    }

    config.save_to(&path)?;
    println!("{} Set {key} = {value}", "✓".green());
    Ok(())
}
