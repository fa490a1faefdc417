//! Detection of installed MCP clients.
//!
//! Detection is a read-only walk of the per-kind path table: for every kind
//! with a well-known location on this platform, report the path and whether
//! a config file currently exists there. Probe failures (permission errors,
//! unreadable mounts) demote the candidate to "no config" with a warning
//! instead of failing the walk.

use serde::Serialize;
use std::path::PathBuf;

use crate::client::ClientKind;

/// One detection result: a client kind and its probed config path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedClient {
    /// The client kind probed
    pub kind: ClientKind,
    /// Human-readable client name
    pub display_name: &'static str,
    /// The platform's config path for this kind
    pub config_path: PathBuf,
    /// Whether a config file exists at that path right now
    pub has_config: bool,
}

/// Probe every known client location on this platform.
///
/// Kinds with no default path here (always including `Custom`) are omitted.
pub fn detect_installed_clients() -> Vec<DetectedClient> {
    ClientKind::all()
        .iter()
        .filter_map(|&kind| {
            let config_path = kind.default_config_path()?;
            Some(DetectedClient {
                kind,
                display_name: kind.display_name(),
                has_config: probe(&config_path),
                config_path,
            })
        })
        .collect()
}

fn probe(path: &std::path::Path) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            tracing::warn!(path = %path.display(), "could not probe config path: {e}");
            false
        }
    }
}
