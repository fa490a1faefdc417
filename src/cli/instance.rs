//! Manage client instances and their enabled servers.
//!
//! ```bash
//! mcphub instance add laptop --kind claude-desktop
//! mcphub instance add work-zed --kind zed --path ~/.config/zed/settings.json
//! mcphub instance enable laptop github
//! mcphub instance disable laptop github
//! ```

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;
use std::str::FromStr;

use super::common::{expand_path, open_store, resolve_instance, resolve_server};
use crate::client::ClientKind;
use crate::core::HubError;
use crate::models::ClientInstance;
use crate::sync::needs_sync;

/// Command to manage client instances.
#[derive(Args)]
pub struct InstanceCommand {
    #[command(subcommand)]
    command: InstanceSubcommand,
}

#[derive(Subcommand)]
enum InstanceSubcommand {
    /// Register a client instance.
    Add {
        /// Unique name for the instance
        name: String,
        /// Client kind, e.g. claude-desktop, cursor, zed (see 'mcphub detect')
        #[arg(long)]
        kind: String,
        /// Config file path; defaults to the kind's well-known location
        #[arg(long)]
        path: Option<String>,
        /// Mark this instance as the preferred one of its kind
        #[arg(long)]
        default: bool,
    },

    /// List registered instances.
    List,

    /// Remove an instance. Its config file is left as-is.
    Remove {
        /// Instance name or id
        name: String,
    },

    /// Enable a server for an instance.
    Enable {
        /// Instance name or id
        instance: String,
        /// Server name or id
        server: String,
    },

    /// Disable a server for an instance.
    Disable {
        /// Instance name or id
        instance: String,
        /// Server name or id
        server: String,
    },
}

impl InstanceCommand {
    /// Execute the instance subcommand.
    pub async fn execute(self, _config_path: Option<&Path>) -> Result<()> {
        match self.command {
            InstanceSubcommand::Add {
                name,
                kind,
                path,
                default,
            } => add(name, &kind, path, default),
            InstanceSubcommand::List => list(),
            InstanceSubcommand::Remove {
                name,
            } => remove(&name),
            InstanceSubcommand::Enable {
                instance,
                server,
            } => set_enabled(&instance, &server, true),
            InstanceSubcommand::Disable {
                instance,
                server,
            } => set_enabled(&instance, &server, false),
        }
    }
}

fn add(name: String, kind: &str, path: Option<String>, default: bool) -> Result<()> {
    let mut store = open_store()?;
    if store.find_instance(&name).is_some() {
        bail!("an instance named '{name}' already exists");
    }

    let kind = ClientKind::from_str(kind)?;
    let config_path = match path {
        Some(raw) => expand_path(&raw),
        None => kind
            .default_config_path()
            .ok_or_else(|| HubError::PathUnresolved {
                name: name.clone(),
            })?
            .display()
            .to_string(),
    };

    let mut instance = ClientInstance::new(&name, kind, &config_path);
    instance.is_default = default;
    store.add_instance(instance)?;

    println!(
        "{} Added {} instance '{name}' -> {config_path}",
        "✓".green(),
        kind.display_name()
    );
    Ok(())
}

fn list() -> Result<()> {
    let store = open_store()?;
    if store.instances().is_empty() {
        println!("No instances configured. Add one with 'mcphub instance add'.");
        return Ok(());
    }

    println!("{}", "Client instances:".bold());
    for inst in store.instances() {
        let default = if inst.is_default { " (default)" } else { "" };
        let drift = if needs_sync(inst) {
            " needs sync".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} {} {} servers: {}{default}{drift}",
            inst.name.cyan(),
            format!("[{}]", inst.kind.display_name()).dimmed(),
            inst.config_path,
            inst.enabled_servers.len()
        );
    }
    Ok(())
}

fn remove(name: &str) -> Result<()> {
    let mut store = open_store()?;
    let id = resolve_instance(&store, name)?.id.clone();
    let removed = store.remove_instance(&id)?;
    println!("{} Removed instance '{}'", "✓".green(), removed.name);
    Ok(())
}

fn set_enabled(instance: &str, server: &str, enabled: bool) -> Result<()> {
    let mut store = open_store()?;
    let instance_id = resolve_instance(&store, instance)?.id.clone();
    let (server_id, server_name) = {
        let def = resolve_server(&store, server)?;
        (def.id.clone(), def.name.clone())
    };

    let changed = store.set_server_enabled(&instance_id, &server_id, enabled)?;
    let verb = if enabled { "Enabled" } else { "Disabled" };
    if changed {
        println!(
            "{} {verb} '{server_name}' for '{instance}'. Run 'mcphub sync {instance}' to apply.",
            "✓".green()
        );
    } else {
        println!("'{server_name}' was already {} for '{instance}'", verb.to_lowercase());
    }
    Ok(())
}
