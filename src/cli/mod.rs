//! Command-line interface for MCP Hub.
//!
//! Each command lives in its own module with its own argument structures and
//! execution logic. The top-level [`Cli`] handles the global flags
//! (`--verbose`, `--quiet`, `--config`) and dispatches to the subcommands.
//!
//! # Available Commands
//!
//! ## Registry Management
//! - `server` - Add, list, show, and remove server definitions
//! - `instance` - Manage client instances and per-instance enablement
//! - `import` - Lift servers out of an existing client config file
//! - `registry` - Browse and import from the bundled catalog
//!
//! ## Sync
//! - `sync` - Reconcile enabled servers into client config files
//! - `status` - Show which instances have drifted since their last sync
//! - `detect` - Probe this machine for installed MCP clients
//!
//! ## Housekeeping
//! - `backup` - List and prune config file backups
//! - `config` - Show and change global hub settings
//!
//! # Example Workflow
//!
//! ```bash
//! mcphub server add github npx --arg -y --arg @modelcontextprotocol/server-github
//! mcphub instance add laptop --kind claude-desktop
//! mcphub instance enable laptop github
//! mcphub sync laptop
//! ```

mod backup;
pub mod common;
mod config;
mod detect;
mod import;
mod instance;
mod registry;
mod server;
mod status;
mod sync;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Runtime configuration derived from the global CLI flags.
///
/// Holding this as data instead of mutating process environment keeps CLI
/// execution injectable in tests: a test can build a [`CliConfig`] directly
/// and run [`Cli::execute_with_config`] without touching global state.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is not set.
    ///
    /// `None` means errors only (the `--quiet` behavior).
    pub log_level: Option<String>,

    /// Custom path to the global settings file, overriding `MCPHUB_CONFIG`
    /// and the default `~/.mcphub/config.toml`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the tracing subscriber for this configuration.
    ///
    /// An explicit `RUST_LOG` always wins over the flag-derived level. Safe
    /// to call more than once; later calls are no-ops.
    pub fn init_logging(&self) {
        let default_level = self.log_level.as_deref().unwrap_or("error");
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .ok();
    }
}

/// Main CLI application structure for MCP Hub.
#[derive(Parser)]
#[command(
    name = "mcphub",
    about = "MCP Hub - sync one server registry into every MCP client",
    version,
    long_about = "MCP Hub keeps a central registry of MCP server definitions and reconciles \
                  it into the native config files of Claude Desktop, Cursor, Zed, and other \
                  MCP clients, preserving whatever else lives in those files."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a custom global settings file.
    ///
    /// Overrides the default location (`~/.mcphub/config.toml`) and the
    /// `MCPHUB_CONFIG` environment variable.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Available subcommands for the MCP Hub CLI.
#[derive(Subcommand)]
enum Commands {
    /// Manage server definitions in the hub registry.
    Server(server::ServerCommand),

    /// Manage client instances and their enabled servers.
    Instance(instance::InstanceCommand),

    /// Reconcile enabled servers into client config files.
    Sync(sync::SyncCommand),

    /// Detect installed MCP clients on this machine.
    Detect(detect::DetectCommand),

    /// Show which instances need a sync.
    Status(status::StatusCommand),

    /// List and prune config file backups.
    Backup(backup::BackupCommand),

    /// Import servers from an existing client config file.
    Import(import::ImportCommand),

    /// Browse the bundled server catalog.
    Registry(registry::RegistryCommand),

    /// Show and change global hub settings.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Execute the CLI with configuration derived from the parsed flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute the CLI with a specific configuration.
    ///
    /// Exists separately from [`execute`](Self::execute) so tests can inject
    /// a configuration instead of going through flag parsing.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();
        let config_path = config.config_path;

        match self.command {
            Commands::Server(cmd) => cmd.execute(config_path.as_deref()).await,
            Commands::Instance(cmd) => cmd.execute(config_path.as_deref()).await,
            Commands::Sync(cmd) => cmd.execute(config_path.as_deref()).await,
            Commands::Detect(cmd) => cmd.execute().await,
            Commands::Status(cmd) => cmd.execute().await,
            Commands::Backup(cmd) => cmd.execute(config_path.as_deref()).await,
            Commands::Import(cmd) => cmd.execute().await,
            Commands::Registry(cmd) => cmd.execute().await,
            Commands::Config(cmd) => cmd.execute(config_path.as_deref()).await,
        }
    }
}
