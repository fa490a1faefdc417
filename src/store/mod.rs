//! The persistent record store for MCP Hub.
//!
//! All hub state lives in one JSON document (`registry.json` in the hub data
//! directory): server definitions, client instances, and backup records. The
//! store loads the document into memory on open and rewrites it atomically
//! after every mutation, so readers of the file never see a partial state
//! and a crash loses at most the in-flight mutation.
//!
//! Enablement changes are the drift signal for the sync engine: any mutation
//! of an instance's enabled-server list stamps `last_modified`, which
//! `needs_sync` later compares against `last_synced`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::HubError;
use crate::models::{BackupRecord, ClientInstance, ServerDefinition};
use crate::utils::fs::atomic_write;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreData {
    #[serde(default)]
    servers: Vec<ServerDefinition>,
    #[serde(default)]
    instances: Vec<ClientInstance>,
    #[serde(default)]
    backups: Vec<BackupRecord>,
}

/// Handle to the hub record store.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    data: StoreData,
}

impl Store {
    /// Open the store file, creating an empty store if the file is absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HubError> {
        let path = path.into();
        let data = match std::fs::read(&path) {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| HubError::StoreParseError {
                    file: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
            Err(e) => return Err(HubError::io(path.display().to_string(), e)),
        };
        Ok(Self {
            path,
            data,
        })
    }

    /// Path of the underlying store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), HubError> {
        let mut bytes = serde_json::to_vec_pretty(&self.data).map_err(|e| HubError::Other {
            message: format!("failed to serialize record store: {e}"),
        })?;
        bytes.push(b'\n');
        atomic_write(&self.path, &bytes)
            .map_err(|e| HubError::io(self.path.display().to_string(), e))
    }

    // ---- servers ----

    /// All server definitions.
    pub fn servers(&self) -> &[ServerDefinition] {
        &self.data.servers
    }

    /// Look up a server by id.
    pub fn server(&self, id: &str) -> Option<&ServerDefinition> {
        self.data.servers.iter().find(|s| s.id == id)
    }

    /// Look up a server by id or name.
    pub fn find_server(&self, name_or_id: &str) -> Option<&ServerDefinition> {
        self.data
            .servers
            .iter()
            .find(|s| s.id == name_or_id || s.name == name_or_id)
    }

    /// Add a server definition.
    pub fn add_server(&mut self, def: ServerDefinition) -> Result<(), HubError> {
        self.data.servers.push(def);
        self.persist()
    }

    /// Replace a server definition by id, stamping `updated_at`.
    pub fn update_server(&mut self, mut def: ServerDefinition) -> Result<(), HubError> {
        let slot = self
            .data
            .servers
            .iter_mut()
            .find(|s| s.id == def.id)
            .ok_or_else(|| HubError::ServerNotFound {
                name: def.id.clone(),
            })?;
        def.updated_at = Utc::now();
        *slot = def;
        self.persist()
    }

    /// Remove a server definition by id.
    ///
    /// Enablement lists referencing the id are left untouched: dangling ids
    /// are tolerated and skipped by the merge engine.
    pub fn remove_server(&mut self, id: &str) -> Result<ServerDefinition, HubError> {
        let pos = self
            .data
            .servers
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| HubError::ServerNotFound {
                name: id.to_string(),
            })?;
        let removed = self.data.servers.remove(pos);
        self.persist()?;
        Ok(removed)
    }

    // ---- instances ----

    /// All client instances.
    pub fn instances(&self) -> &[ClientInstance] {
        &self.data.instances
    }

    /// Look up an instance by id.
    pub fn instance(&self, id: &str) -> Option<&ClientInstance> {
        self.data.instances.iter().find(|i| i.id == id)
    }

    /// Look up an instance by id or name.
    pub fn find_instance(&self, name_or_id: &str) -> Option<&ClientInstance> {
        self.data
            .instances
            .iter()
            .find(|i| i.id == name_or_id || i.name == name_or_id)
    }

    /// Add a client instance.
    pub fn add_instance(&mut self, instance: ClientInstance) -> Result<(), HubError> {
        self.data.instances.push(instance);
        self.persist()
    }

    /// Remove a client instance by id.
    pub fn remove_instance(&mut self, id: &str) -> Result<ClientInstance, HubError> {
        let pos = self
            .data
            .instances
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| HubError::InstanceNotFound {
                name: id.to_string(),
            })?;
        let removed = self.data.instances.remove(pos);
        self.persist()?;
        Ok(removed)
    }

    /// Enable or disable a server for an instance.
    ///
    /// Enabling appends the server id to the end of the enablement order;
    /// disabling removes it. Returns whether anything changed. A change
    /// stamps the instance's `last_modified`.
    pub fn set_server_enabled(
        &mut self,
        instance_id: &str,
        server_id: &str,
        enabled: bool,
    ) -> Result<bool, HubError> {
        let instance = self
            .data
            .instances
            .iter_mut()
            .find(|i| i.id == instance_id)
            .ok_or_else(|| HubError::InstanceNotFound {
                name: instance_id.to_string(),
            })?;

        let changed = if enabled {
            if instance.enabled_servers.iter().any(|id| id == server_id) {
                false
            } else {
                instance.enabled_servers.push(server_id.to_string());
                true
            }
        } else {
            let before = instance.enabled_servers.len();
            instance.enabled_servers.retain(|id| id != server_id);
            instance.enabled_servers.len() != before
        };

        if changed {
            instance.last_modified = Some(Utc::now());
            self.persist()?;
        }
        Ok(changed)
    }

    /// Record a successful sync of an instance.
    ///
    /// Only `last_synced` is touched; `last_modified` stays as it was so the
    /// drift comparison stays meaningful.
    pub fn set_last_synced(
        &mut self,
        instance_id: &str,
        when: DateTime<Utc>,
    ) -> Result<(), HubError> {
        let instance = self
            .data
            .instances
            .iter_mut()
            .find(|i| i.id == instance_id)
            .ok_or_else(|| HubError::InstanceNotFound {
                name: instance_id.to_string(),
            })?;
        instance.last_synced = Some(when);
        self.persist()
    }

    // ---- backups ----

    /// All backup records, oldest first in insertion order.
    pub fn backups(&self) -> &[BackupRecord] {
        &self.data.backups
    }

    /// Backup records belonging to one instance.
    pub fn backups_for_instance(&self, instance_id: &str) -> Vec<&BackupRecord> {
        self.data
            .backups
            .iter()
            .filter(|b| b.instance_id == instance_id)
            .collect()
    }

    /// Append a backup record.
    pub fn add_backup(&mut self, record: BackupRecord) -> Result<(), HubError> {
        self.data.backups.push(record);
        self.persist()
    }

    /// Drop backup records by id. Used only by retention pruning.
    pub fn remove_backups(&mut self, ids: &[String]) -> Result<(), HubError> {
        if ids.is_empty() {
            return Ok(());
        }
        self.data.backups.retain(|b| !ids.contains(&b.id));
        self.persist()
    }
}
