//! Bundled catalog of well-known MCP servers.
//!
//! A small, offline catalog of the servers people add most often, so
//! `mcphub registry import <name>` works without any network transport.
//! Catalog entries convert into [`ServerDefinition`]s with registry
//! provenance.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Provenance, ServerDefinition};

/// A catalog entry describing one well-known server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryServer {
    /// Catalog name, unique within the bundle
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
    /// Launcher command
    pub command: &'static str,
    /// Launcher arguments
    pub args: &'static [&'static str],
    /// Env variables the server expects (values left for the user to fill)
    pub env_vars: &'static [&'static str],
    /// Tags for filtering
    pub tags: &'static [&'static str],
    /// Project homepage
    pub homepage: &'static str,
}

/// The bundled catalog.
#[must_use]
pub const fn builtin_servers() -> &'static [RegistryServer] {
    const NPX: &str = "npx";
    const UVX: &str = "uvx";
    &[
        RegistryServer {
            name: "filesystem",
            description: "Read and write files under configured roots",
            command: NPX,
            args: &["-y", "@modelcontextprotocol/server-filesystem"],
            env_vars: &[],
            tags: &["files", "official"],
            homepage: "https://github.com/modelcontextprotocol/servers",
        },
        RegistryServer {
            name: "github",
            description: "GitHub repositories, issues, and pull requests",
            command: NPX,
            args: &["-y", "@modelcontextprotocol/server-github"],
            env_vars: &["GITHUB_PERSONAL_ACCESS_TOKEN"],
            tags: &["git", "official"],
            homepage: "https://github.com/modelcontextprotocol/servers",
        },
        RegistryServer {
            name: "fetch",
            description: "Fetch and convert web content for LLM use",
            command: UVX,
            args: &["mcp-server-fetch"],
            env_vars: &[],
            tags: &["web", "official"],
            homepage: "https://github.com/modelcontextprotocol/servers",
        },
        RegistryServer {
            name: "memory",
            description: "Knowledge-graph based persistent memory",
            command: NPX,
            args: &["-y", "@modelcontextprotocol/server-memory"],
            env_vars: &[],
            tags: &["memory", "official"],
            homepage: "https://github.com/modelcontextprotocol/servers",
        },
        RegistryServer {
            name: "puppeteer",
            description: "Browser automation via Puppeteer",
            command: NPX,
            args: &["-y", "@modelcontextprotocol/server-puppeteer"],
            env_vars: &[],
            tags: &["browser"],
            homepage: "https://github.com/modelcontextprotocol/servers",
        },
        RegistryServer {
            name: "postgres",
            description: "Read-only access to PostgreSQL databases",
            command: NPX,
            args: &["-y", "@modelcontextprotocol/server-postgres"],
            env_vars: &["POSTGRES_CONNECTION_STRING"],
            tags: &["database"],
            homepage: "https://github.com/modelcontextprotocol/servers",
        },
        RegistryServer {
            name: "sqlite",
            description: "Query SQLite database files",
            command: UVX,
            args: &["mcp-server-sqlite"],
            env_vars: &[],
            tags: &["database"],
            homepage: "https://github.com/modelcontextprotocol/servers",
        },
        RegistryServer {
            name: "slack",
            description: "Slack workspace channels and messages",
            command: NPX,
            args: &["-y", "@modelcontextprotocol/server-slack"],
            env_vars: &["SLACK_BOT_TOKEN", "SLACK_TEAM_ID"],
            tags: &["chat"],
            homepage: "https://github.com/modelcontextprotocol/servers",
        },
        RegistryServer {
            name: "brave-search",
            description: "Web search via the Brave Search API",
            command: NPX,
            args: &["-y", "@modelcontextprotocol/server-brave-search"],
            env_vars: &["BRAVE_API_KEY"],
            tags: &["web", "search"],
            homepage: "https://github.com/modelcontextprotocol/servers",
        },
        RegistryServer {
            name: "sequential-thinking",
            description: "Structured step-by-step reasoning tool",
            command: NPX,
            args: &["-y", "@modelcontextprotocol/server-sequential-thinking"],
            env_vars: &[],
            tags: &["reasoning", "official"],
            homepage: "https://github.com/modelcontextprotocol/servers",
        },
    ]
}

/// Look up a catalog entry by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static RegistryServer> {
    builtin_servers().iter().find(|s| s.name == name)
}

/// Convert a catalog entry into a registry-provenance definition.
///
/// Declared env variables are materialized with empty values so the user
/// can see what needs filling in.
#[must_use]
pub fn to_definition(entry: &RegistryServer) -> ServerDefinition {
    let mut def = ServerDefinition::new(
        entry.name,
        entry.command,
        entry.args.iter().map(ToString::to_string).collect(),
    );
    def.description = Some(entry.description.to_string());
    def.env = entry
        .env_vars
        .iter()
        .map(|var| ((*var).to_string(), String::new()))
        .collect::<HashMap<_, _>>();
    def.tags = entry.tags.iter().map(ToString::to_string).collect();
    def.provenance = Provenance::Registry;
    def.source_url = Some(entry.homepage.to_string());
    def
}
