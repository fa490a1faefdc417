//! MCP Hub - central registry and configuration sync for MCP clients
//!
//! MCP Hub maintains a single registry of MCP (Model Context Protocol) server
//! definitions and a set of client instances (Claude Desktop, Cursor, Zed,
//! and friends), then reconciles the declared server/instance enablement
//! mapping into each client's native configuration file on disk.
//!
//! # Architecture Overview
//!
//! The hub follows a registry/reconcile model:
//! - `registry.json` in the hub data directory records server definitions,
//!   client instances, and backup history
//! - Each client instance points at the client's own config file, which the
//!   hub owns only partially: a single managed section holds the hub's
//!   server entries while every other key in the file is preserved verbatim
//! - Syncing an instance replaces the managed section with the enabled
//!   servers and leaves the rest of the file untouched
//!
//! ## Key Guarantees
//!
//! - **Non-destructive**: user settings living next to the managed section
//!   survive every sync
//! - **Idempotent**: syncing twice with unchanged inputs produces identical
//!   bytes and no extra backups
//! - **Safe**: pre-existing config files are backed up before the first
//!   differing write, and all writes are atomic (temp file + rename)
//! - **Isolated failures**: one broken instance never stops a sync-all run
//!
//! # Core Modules
//!
//! - [`adapter`] - per-client config file decode/encode with preservation
//! - [`sync`] - the reconciler and merge engine
//! - [`backup`] - config file snapshots and retention pruning
//! - [`detect`] - installed-client detection via platform path probing
//! - [`store`] - the persistent record store (servers, instances, backups)
//!
//! # Supporting Modules
//!
//! - [`cli`] - command-line interface
//! - [`client`] - the supported client kinds and their platform paths
//! - [`config`] - hub data directory layout and global settings
//! - [`core`] - error types and user-facing error presentation
//! - [`models`] - shared data models
//! - [`registry`] - bundled catalog of well-known servers
//! - [`secrets`] - OS keyring storage for sensitive env values
//! - [`utils`] - filesystem helpers (atomic writes, typed readers)
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Register a server and a client instance
//! mcphub server add github npx --arg -y --arg @modelcontextprotocol/server-github
//! mcphub instance add laptop --kind claude-desktop
//!
//! # Enable the server for the instance and sync
//! mcphub instance enable laptop github
//! mcphub sync laptop
//!
//! # Inspect state
//! mcphub detect
//! mcphub status
//! mcphub backup list
//! ```

pub mod adapter;
pub mod backup;
pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod detect;
pub mod models;
pub mod registry;
pub mod secrets;
pub mod store;
pub mod sync;
pub mod utils;
