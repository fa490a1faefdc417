//! Shared data models for MCP Hub.
//!
//! These are the records the hub persists in its store and moves through the
//! sync pipeline: server definitions, client instances, backup records, and
//! the global settings. All records serialize with camelCase keys so the
//! store file reads naturally next to the JSON config files the hub manages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::client::ClientKind;

/// Where a server definition came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Created by hand via the CLI
    #[default]
    Manual,
    /// Lifted out of an existing client config file
    Imported,
    /// Converted from the bundled registry catalog
    Registry,
}

/// A tool-server definition in the hub registry.
///
/// This is the canonical record for one MCP server: how to launch it and the
/// metadata the hub tracks about it. Client config files never store these
/// records directly; the sync engine projects the launch fields into each
/// client's managed section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDefinition {
    /// Stable unique identifier (UUID v4)
    pub id: String,
    /// Human-readable name, unique within the registry by convention
    pub name: String,
    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Executable or launcher command
    pub command: String,
    /// Arguments passed to the command
    #[serde(default)]
    pub args: Vec<String>,
    /// Environment variables set for the server process
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Free-form tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,
    /// Where this definition came from
    #[serde(default)]
    pub provenance: Provenance,
    /// Source location for imported or registry definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl ServerDefinition {
    /// Create a new manual definition with a fresh id and timestamps.
    pub fn new(name: impl Into<String>, command: impl Into<String>, args: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            command: command.into(),
            args,
            env: HashMap::new(),
            tags: Vec::new(),
            provenance: Provenance::Manual,
            source_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A concrete installation of a client application the hub syncs into.
///
/// The `enabled_servers` list holds server ids in enablement order; the sync
/// engine resolves each id against the registry at merge time, so a deleted
/// server may leave a dangling id here without breaking anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInstance {
    /// Stable unique identifier (UUID v4)
    pub id: String,
    /// Human-readable name, e.g. "laptop" or "work-cursor"
    pub name: String,
    /// Which client application this instance is
    pub kind: ClientKind,
    /// Path to the client's config file
    pub config_path: String,
    /// Ids of enabled servers, in enablement order
    #[serde(default)]
    pub enabled_servers: Vec<String>,
    /// Advisory flag marking the preferred instance of its kind
    #[serde(default)]
    pub is_default: bool,
    /// When this instance was last successfully synced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced: Option<DateTime<Utc>>,
    /// When the instance's enablement or fields last changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ClientInstance {
    /// Create a new instance with a fresh id.
    pub fn new(name: impl Into<String>, kind: ClientKind, config_path: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            kind,
            config_path: config_path.into(),
            enabled_servers: Vec::new(),
            is_default: false,
            last_synced: None,
            last_modified: None,
            created_at: Utc::now(),
        }
    }
}

/// A record of one config file snapshot taken before a sync write.
///
/// Backup records are append-only: they are created when a backup file is
/// written and removed only by retention pruning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRecord {
    /// Stable unique identifier (UUID v4)
    pub id: String,
    /// Id of the instance whose config file was snapshotted
    pub instance_id: String,
    /// Path to the backup file
    pub backup_path: String,
    /// When the snapshot was taken
    pub created_at: DateTime<Utc>,
}

impl BackupRecord {
    /// Create a record for a freshly written backup file.
    pub fn new(instance_id: impl Into<String>, backup_path: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            instance_id: instance_id.into(),
            backup_path: backup_path.into(),
            created_at: Utc::now(),
        }
    }
}

/// Global hub settings, stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Snapshot config files before the first differing write of a sync
    pub create_backups: bool,
    /// How long backup files are kept before pruning
    pub backup_retention_days: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            create_backups: true,
            backup_retention_days: 30,
        }
    }
}
