//! Config file backups and retention pruning.
//!
//! Before the sync engine's first differing write to a pre-existing config
//! file, the file is copied into the hub backup directory. Backup file names
//! embed the owning instance id and a sortable timestamp, so `ls` of the
//! backup directory reads as a history. Backup files are write-once: nothing
//! in the hub ever modifies one after creation; retention pruning only
//! deletes them.

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::HubError;
use crate::models::{BackupRecord, ClientInstance};
use crate::store::Store;
use crate::utils::fs::ensure_dir;

/// Creates and prunes config file snapshots in one backup directory.
#[derive(Debug, Clone)]
pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    /// Create a manager rooted at the given backup directory.
    ///
    /// The directory is created lazily on the first backup.
    pub const fn new(backup_dir: PathBuf) -> Self {
        Self {
            backup_dir,
        }
    }

    /// Directory that holds the backup files.
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Snapshot a config file before it is overwritten.
    ///
    /// Returns `Ok(None)` when there is nothing worth snapshotting: the file
    /// is absent or zero-length. Any failure to copy an existing non-empty
    /// file is a [`HubError::BackupFailed`]; callers treat that as fatal for
    /// the write that prompted the backup.
    pub fn backup(
        &self,
        instance: &ClientInstance,
        config_path: &Path,
    ) -> Result<Option<BackupRecord>, HubError> {
        let meta = match fs::metadata(config_path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(HubError::BackupFailed {
                    path: config_path.display().to_string(),
                    reason: e.to_string(),
                });
            }
        };
        if meta.len() == 0 {
            return Ok(None);
        }

        ensure_dir(&self.backup_dir).map_err(|e| HubError::BackupFailed {
            path: config_path.display().to_string(),
            reason: format!("cannot create backup directory: {e}"),
        })?;

        let file_name = config_path
            .file_name()
            .map_or_else(|| "config".to_string(), |n| n.to_string_lossy().to_string());
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S%3f");
        let backup_path = self
            .backup_dir
            .join(format!("{}_{timestamp}_{file_name}.backup", instance.id));

        fs::copy(config_path, &backup_path).map_err(|e| HubError::BackupFailed {
            path: config_path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!(
            instance = %instance.name,
            backup = %backup_path.display(),
            "backed up config file"
        );
        Ok(Some(BackupRecord::new(
            instance.id.clone(),
            backup_path.display().to_string(),
        )))
    }

    /// Delete backups older than the retention window.
    ///
    /// Backup files already gone from disk are treated as pruned. A file
    /// that exists but cannot be deleted keeps its record and is retried on
    /// the next prune. Returns the records that were dropped.
    pub fn prune(
        &self,
        store: &mut Store,
        retention_days: u32,
    ) -> Result<Vec<BackupRecord>, HubError> {
        let cutoff = Utc::now() - chrono::Duration::days(i64::from(retention_days));
        let stale: Vec<BackupRecord> = store
            .backups()
            .iter()
            .filter(|b| b.created_at < cutoff)
            .cloned()
            .collect();

        let mut pruned = Vec::new();
        for record in stale {
            match fs::remove_file(&record.backup_path) {
                Ok(()) => pruned.push(record),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => pruned.push(record),
                Err(e) => {
                    tracing::warn!(
                        backup = %record.backup_path,
                        "could not delete expired backup, keeping its record: {e}"
                    );
                }
            }
        }

        let ids: Vec<String> = pruned.iter().map(|r| r.id.clone()).collect();
        store.remove_backups(&ids)?;
        Ok(pruned)
    }
}
