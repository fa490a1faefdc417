//! The reconciler: push hub state into client config files.
//!
//! [`Reconciler::sync_one`] runs the full pipeline for a single instance:
//! resolve the target path, read current bytes, merge, back up, write
//! atomically, and stamp `last_synced`. [`Reconciler::sync_all`] runs it for
//! every instance and collects per-instance outcomes; one failing target
//! never aborts the rest.
//!
//! Writes are skipped entirely when the merged bytes equal what is already
//! on disk, so repeated syncs neither rewrite files nor accumulate identical
//! backups. There is no file locking: the engine rereads current bytes at
//! sync time and its write wins over anything racing in between.

pub mod merge;

pub use merge::{merge_config, sanitize_server_name};

use chrono::Utc;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::backup::BackupManager;
use crate::core::HubError;
use crate::models::{AppSettings, ClientInstance};
use crate::store::Store;
use crate::utils::fs::atomic_write;

/// What one successful instance sync did.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// The config file that was reconciled
    pub config_path: PathBuf,
    /// Backup file written before the write, if one was needed
    pub backup_path: Option<PathBuf>,
    /// Whether the file content changed (false means it was already current)
    pub changed: bool,
}

/// Outcome of syncing one instance within a sync-all run.
#[derive(Debug)]
pub struct SyncOutcome {
    /// Id of the instance
    pub instance_id: String,
    /// Name of the instance
    pub instance_name: String,
    /// The sync result for this instance
    pub result: Result<SyncReport, HubError>,
}

/// True when an instance's config file may be behind the hub state.
///
/// Pure comparison of the two timestamps. An instance that was never synced
/// always needs its first sync, even with nothing enabled yet: the first
/// write establishes the explicit managed section in the config file. After
/// that, only an enablement change newer than the last sync counts.
#[must_use]
pub fn needs_sync(instance: &ClientInstance) -> bool {
    match instance.last_synced {
        None => true,
        Some(synced) => instance.last_modified.is_some_and(|modified| modified > synced),
    }
}

/// Drives syncs against the record store.
pub struct Reconciler {
    store: Store,
    settings: AppSettings,
    backups: BackupManager,
}

impl Reconciler {
    /// Build a reconciler over a store, settings, and backup directory.
    pub const fn new(store: Store, settings: AppSettings, backups: BackupManager) -> Self {
        Self {
            store,
            settings,
            backups,
        }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Give the store back, consuming the reconciler.
    pub fn into_store(self) -> Store {
        self.store
    }

    /// Reconcile a single instance's config file, by instance id.
    ///
    /// On success the instance's `last_synced` is stamped, even for a no-op
    /// write. On failure the target file is untouched and the instance's
    /// timestamps are left as they were.
    pub async fn sync_one(&mut self, instance_id: &str) -> Result<SyncReport, HubError> {
        let instance = self
            .store
            .instance(instance_id)
            .ok_or_else(|| HubError::InstanceNotFound {
                name: instance_id.to_string(),
            })?
            .clone();

        let path = resolve_config_path(&instance)?;

        let existing = match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(HubError::io(path.display().to_string(), e)),
        };

        let registry: HashMap<&str, _> = self
            .store
            .servers()
            .iter()
            .map(|def| (def.id.as_str(), def))
            .collect();

        let merged = merge_config(
            instance.kind,
            existing.as_deref(),
            &path,
            &instance.enabled_servers,
            &registry,
        )?;

        let changed = existing.as_deref() != Some(merged.as_slice());
        let mut backup_path = None;

        if changed {
            if self.settings.create_backups {
                if let Some(record) = self.backups.backup(&instance, &path)? {
                    backup_path = Some(PathBuf::from(&record.backup_path));
                    self.store.add_backup(record)?;
                }
            }

            atomic_write(&path, &merged)
                .map_err(|e| HubError::io(path.display().to_string(), e))?;
            tracing::info!(
                instance = %instance.name,
                path = %path.display(),
                "wrote {} managed server(s)",
                instance.enabled_servers.len()
            );
        } else {
            tracing::debug!(
                instance = %instance.name,
                path = %path.display(),
                "config already current, skipping write"
            );
        }

        self.store.set_last_synced(&instance.id, Utc::now())?;

        Ok(SyncReport {
            config_path: path,
            backup_path,
            changed,
        })
    }

    /// Reconcile every instance, isolating failures.
    ///
    /// Instances are processed sequentially in name order, so two instances
    /// sharing one config file are serialized structurally. The outcome list
    /// matches the processing order.
    pub async fn sync_all(&mut self) -> Vec<SyncOutcome> {
        let mut targets: Vec<(String, String)> = self
            .store
            .instances()
            .iter()
            .map(|i| (i.name.clone(), i.id.clone()))
            .collect();
        targets.sort();

        let mut outcomes = Vec::with_capacity(targets.len());
        for (name, id) in targets {
            let result = self.sync_one(&id).await;
            if let Err(e) = &result {
                tracing::error!(instance = %name, "sync failed: {e}");
            }
            outcomes.push(SyncOutcome {
                instance_id: id,
                instance_name: name,
                result,
            });
        }
        outcomes
    }
}

fn resolve_config_path(instance: &ClientInstance) -> Result<PathBuf, HubError> {
    let stored = instance.config_path.trim();
    if !stored.is_empty() {
        return Ok(PathBuf::from(stored));
    }
    instance
        .kind
        .default_config_path()
        .ok_or_else(|| HubError::PathUnresolved {
            name: instance.name.clone(),
        })
}
