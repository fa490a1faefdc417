//! Import servers from an existing client config file.
//!
//! ```bash
//! mcphub import ~/.cursor/mcp.json
//! mcphub import ~/.config/zed/settings.json --kind zed
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::str::FromStr;

use super::common::{expand_path, open_store};
use crate::adapter;
use crate::client::ClientKind;

/// Command to lift servers out of an existing config file.
#[derive(Args)]
pub struct ImportCommand {
    /// Config file to import from
    file: String,

    /// Client kind the file belongs to; controls where the servers are
    /// looked for inside the file
    #[arg(long, default_value = "claude-desktop")]
    kind: String,

    /// Show what would be imported without changing the registry
    #[arg(long)]
    dry_run: bool,
}

impl ImportCommand {
    /// Execute the import command.
    pub async fn execute(self) -> Result<()> {
        let kind = ClientKind::from_str(&self.kind)?;
        let path = PathBuf::from(expand_path(&self.file));
        let servers = adapter::import_from_file(&path, kind)?;

        if servers.is_empty() {
            println!("No importable servers found in {}", path.display());
            return Ok(());
        }

        let mut store = open_store()?;
        let mut imported = 0usize;
        for def in servers {
            if store.find_server(&def.name).is_some() {
                println!("  {} '{}' already registered, skipping", "·".dimmed(), def.name);
                continue;
            }
            if self.dry_run {
                println!("  would import '{}' ({})", def.name, def.command);
            } else {
                println!("  {} imported '{}'", "✓".green(), def.name);
                store.add_server(def)?;
            }
            imported += 1;
        }

        let verb = if self.dry_run { "would import" } else { "imported" };
        println!("{} {verb} {imported} server(s) from {}", "✓".green(), path.display());
        Ok(())
    }
}
