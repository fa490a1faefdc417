//! The merge engine: compute a client config file's next contents.
//!
//! Merging is a pure computation from (existing bytes, enablement order,
//! registry) to new bytes. The managed section is rebuilt from scratch on
//! every merge; everything outside it passes through untouched. Because the
//! inputs fully determine the output and the encoder is deterministic,
//! merging the result again yields identical bytes.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

use crate::adapter::{self, DecodedConfig, ManagedEntry};
use crate::client::ClientKind;
use crate::core::HubError;
use crate::models::ServerDefinition;

/// Compute the new config file bytes for one instance.
///
/// `existing` is the current file content, or `None` when the file does not
/// exist yet. `enabled` is the instance's enablement order; each id is
/// resolved against `servers` (keyed by id). Ids with no definition are
/// skipped with a warning, as are later servers whose sanitized name
/// collides with an earlier one.
pub fn merge_config(
    kind: ClientKind,
    existing: Option<&[u8]>,
    path: &Path,
    enabled: &[String],
    servers: &HashMap<&str, &ServerDefinition>,
) -> Result<Vec<u8>, HubError> {
    let decoded = match existing {
        Some(bytes) => adapter::decode(kind, bytes, path)?,
        None => DecodedConfig::default(),
    };

    let mut managed = Map::new();
    for id in enabled {
        let Some(def) = servers.get(id.as_str()) else {
            tracing::warn!(server_id = %id, "enabled server no longer exists, skipping");
            continue;
        };

        let key = sanitize_server_name(&def.name);
        if managed.contains_key(&key) {
            tracing::warn!(
                server = %def.name,
                key = %key,
                "duplicate config key, keeping the earlier enabled server"
            );
            continue;
        }

        let entry = ManagedEntry::from_definition(def);
        let value = serde_json::to_value(entry).map_err(|e| HubError::Other {
            message: format!("failed to serialize entry for '{}': {e}", def.name),
        })?;
        managed.insert(key, value);
    }

    Ok(adapter::encode(kind, managed, decoded.rest))
}

/// Sanitize a server name for use as a config key.
///
/// Lowercases the name, maps anything outside `[a-z0-9_-]` to `-`, and trims
/// leading and trailing dashes.
pub fn sanitize_server_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}
