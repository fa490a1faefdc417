//! Detect installed MCP clients on this machine.

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;

use crate::detect::detect_installed_clients;

/// Output format for detection results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

/// Command to probe client config locations.
#[derive(Args)]
pub struct DetectCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl DetectCommand {
    /// Execute the detect command.
    pub async fn execute(self) -> Result<()> {
        let detected = detect_installed_clients();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&detected)?);
            }
            OutputFormat::Table => {
                println!("{}", "Known client locations on this machine:".bold());
                for d in &detected {
                    let marker = if d.has_config {
                        "✓".green().to_string()
                    } else {
                        "·".dimmed().to_string()
                    };
                    println!(
                        "  {marker} {:<16} {} ({})",
                        d.display_name,
                        d.config_path.display(),
                        d.kind
                    );
                }
                println!(
                    "\n{} = config file present. Register one with 'mcphub instance add <name> --kind <kind>'.",
                    "✓".green()
                );
            }
        }
        Ok(())
    }
}
