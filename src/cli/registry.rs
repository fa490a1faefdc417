//! Browse the bundled server catalog.
//!
//! ```bash
//! mcphub registry list
//! mcphub registry show github
//! mcphub registry import github
//! ```

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;

use super::common::open_store;
use crate::registry::{builtin_servers, find, to_definition};

/// Command to browse and import from the bundled catalog.
#[derive(Args)]
pub struct RegistryCommand {
    #[command(subcommand)]
    command: RegistrySubcommand,
}

#[derive(Subcommand)]
enum RegistrySubcommand {
    /// List catalog entries.
    List,

    /// Show one catalog entry in detail.
    Show {
        /// Catalog entry name
        name: String,
    },

    /// Add a catalog entry to the hub registry.
    Import {
        /// Catalog entry name
        name: String,
    },
}

impl RegistryCommand {
    /// Execute the registry subcommand.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            RegistrySubcommand::List => {
                println!("{}", "Bundled server catalog:".bold());
                for entry in builtin_servers() {
                    println!("  {:<20} {}", entry.name.cyan(), entry.description);
                }
                Ok(())
            }
            RegistrySubcommand::Show {
                name,
            } => {
                let Some(entry) = find(&name) else {
                    bail!("no catalog entry named '{name}'");
                };
                println!("{}: {}", "Name".bold(), entry.name);
                println!("{}: {}", "Description".bold(), entry.description);
                println!(
                    "{}: {} {}",
                    "Command".bold(),
                    entry.command,
                    entry.args.join(" ")
                );
                if !entry.env_vars.is_empty() {
                    println!("{}: {}", "Env vars".bold(), entry.env_vars.join(", "));
                }
                println!("{}: {}", "Homepage".bold(), entry.homepage);
                Ok(())
            }
            RegistrySubcommand::Import {
                name,
            } => {
                let Some(entry) = find(&name) else {
                    bail!("no catalog entry named '{name}'");
                };
                let mut store = open_store()?;
                if store.find_server(entry.name).is_some() {
                    bail!("a server named '{}' is already registered", entry.name);
                }
                let def = to_definition(entry);
                let needs_env = !def.env.is_empty();
                store.add_server(def)?;
                println!("{} Imported '{}' from the catalog", "✓".green(), entry.name);
                if needs_env {
                    println!(
                        "  Fill in its env values ({}) before syncing.",
                        entry.env_vars.join(", ")
                    );
                }
                Ok(())
            }
        }
    }
}
