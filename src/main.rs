//! MCP Hub CLI entry point
//!
//! This is the main executable for MCP Hub. It handles command-line argument
//! parsing, error display, and command execution.
//!
//! The CLI supports commands for managing the hub registry and syncing it
//! into client config files:
//! - `server` - Manage server definitions
//! - `instance` - Manage client instances and server enablement
//! - `sync` - Reconcile enabled servers into client config files
//! - `detect` - Detect installed MCP clients
//! - `status` - Show which instances need a sync
//! - `backup` - List and prune config file backups
//! - `import` - Import servers from an existing config file
//! - `registry` - Browse the bundled server catalog
//! - `config` - Manage global hub settings

use anyhow::Result;
use clap::Parser;
use mcphub_cli::cli;
use mcphub_cli::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    // Execute the command
    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to user-friendly error with context and suggestions
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
