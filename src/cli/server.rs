//! Manage server definitions in the hub registry.
//!
//! ```bash
//! mcphub server add github npx --arg -y --arg @modelcontextprotocol/server-github \
//!     --env GITHUB_PERSONAL_ACCESS_TOKEN=ghp_xxx --tag git
//! mcphub server list
//! mcphub server show github
//! mcphub server remove github
//! ```

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use super::common::{open_store, parse_env_pair, resolve_server};
use crate::models::ServerDefinition;
use crate::secrets;

/// Command to manage server definitions.
#[derive(Args)]
pub struct ServerCommand {
    #[command(subcommand)]
    command: ServerSubcommand,
}

#[derive(Subcommand)]
enum ServerSubcommand {
    /// Register a new server definition.
    Add {
        /// Unique name for the server
        name: String,
        /// Command used to launch it
        command: String,
        /// Argument passed to the command (repeatable, in order)
        #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
        args: Vec<String>,
        /// Environment variable as KEY=VALUE (repeatable)
        #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
        env: Vec<(String, String)>,
        /// Free-form description
        #[arg(long)]
        description: Option<String>,
        /// Tag for filtering (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },

    /// List registered servers.
    List,

    /// Show one server in detail.
    Show {
        /// Server name or id
        name: String,
    },

    /// Remove a server definition.
    ///
    /// Instances that still enable the server keep the stale reference; it
    /// is dropped from their config files on the next sync.
    Remove {
        /// Server name or id
        name: String,
    },

    /// Store a sensitive env value for a server in the OS keyring.
    ///
    /// The value never enters the hub's registry file; it lives in the
    /// platform keyring under the `mcphub` service.
    SetSecret {
        /// Server name or id
        name: String,
        /// Env variable name, e.g. GITHUB_PERSONAL_ACCESS_TOKEN
        var: String,
        /// The secret value
        value: String,
    },
}

impl ServerCommand {
    /// Execute the server subcommand.
    pub async fn execute(self, _config_path: Option<&Path>) -> Result<()> {
        match self.command {
            ServerSubcommand::Add {
                name,
                command,
                args,
                env,
                description,
                tags,
            } => add(name, command, args, env, description, tags),
            ServerSubcommand::List => list(),
            ServerSubcommand::Show {
                name,
            } => show(&name),
            ServerSubcommand::Remove {
                name,
            } => remove(&name),
            ServerSubcommand::SetSecret {
                name,
                var,
                value,
            } => set_secret(&name, &var, &value),
        }
    }
}

fn add(
    name: String,
    command: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
    description: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let mut store = open_store()?;
    if store.find_server(&name).is_some() {
        bail!("a server named '{name}' already exists");
    }

    let mut def = ServerDefinition::new(&name, command, args);
    def.env = env.into_iter().collect();
    def.description = description;
    def.tags = tags;
    store.add_server(def)?;

    println!("{} Registered server '{name}'", "✓".green());
    Ok(())
}

fn list() -> Result<()> {
    let store = open_store()?;
    if store.servers().is_empty() {
        println!("No servers registered. Add one with 'mcphub server add'.");
        return Ok(());
    }

    println!("{}", "Registered servers:".bold());
    for def in store.servers() {
        let tags = if def.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", def.tags.join(", ")).dimmed().to_string()
        };
        println!(
            "  {} {} {}{tags}",
            def.name.cyan(),
            "-".dimmed(),
            def.command
        );
    }
    Ok(())
}

fn show(name: &str) -> Result<()> {
    let store = open_store()?;
    let def = resolve_server(&store, name)?;

    println!("{}: {}", "Name".bold(), def.name);
    println!("{}: {}", "Id".bold(), def.id);
    if let Some(desc) = &def.description {
        println!("{}: {desc}", "Description".bold());
    }
    println!("{}: {}", "Command".bold(), def.command);
    if !def.args.is_empty() {
        println!("{}: {}", "Args".bold(), def.args.join(" "));
    }
    if !def.env.is_empty() {
        let mut keys: Vec<_> = def.env.keys().collect();
        keys.sort();
        println!(
            "{}: {}",
            "Env".bold(),
            keys.into_iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }
    println!("{}: {:?}", "Provenance".bold(), def.provenance);
    if let Some(url) = &def.source_url {
        println!("{}: {url}", "Source".bold());
    }
    println!("{}: {}", "Created".bold(), def.created_at.to_rfc3339());
    Ok(())
}

fn remove(name: &str) -> Result<()> {
    let mut store = open_store()?;
    let id = resolve_server(&store, name)?.id.clone();
    let removed = store.remove_server(&id)?;

    // Drop any keyring entries the server's env vars had
    for var in removed.env.keys() {
        if let Err(e) = secrets::delete_secret(&secrets::server_env_key(&removed.id, var)) {
            tracing::warn!(server = %removed.name, var = %var, "could not remove keyring entry: {e}");
        }
    }

    println!("{} Removed server '{}'", "✓".green(), removed.name);
    Ok(())
}

fn set_secret(name: &str, var: &str, value: &str) -> Result<()> {
    let store = open_store()?;
    let def = resolve_server(&store, name)?;
    secrets::set_secret(&secrets::server_env_key(&def.id, var), value)?;
    println!(
        "{} Stored {var} for '{}' in the OS keyring",
        "✓".green(),
        def.name
    );
    Ok(())
}
