//! Config format adapter: per-client decode and encode of config files.
//!
//! Each client keeps its MCP servers under one key of a JSON document that
//! may also hold unrelated user settings (Zed and Gemini CLI configs are
//! full settings files). The adapter splits a raw document into the managed
//! section and everything else, and reassembles the two on encode, so the
//! sync engine can replace the managed section without touching foreign
//! keys.
//!
//! Decoding is strict about syntax and lenient about shape: malformed JSON
//! is a [`HubError::ConfigCorrupt`] (the file is never overwritten), while
//! entries inside the managed section that do not match the expected shape
//! are simply carried as opaque values.
//!
//! Encoding always writes the managed section, even when empty, so a synced
//! file unambiguously shows an empty managed state rather than an absent
//! one. `serde_json`'s ordered maps make the output deterministic: encoding
//! the same document twice yields identical bytes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

use crate::client::ClientKind;
use crate::core::HubError;
use crate::models::{Provenance, ServerDefinition};

/// The key under which a client keeps its MCP server entries.
///
/// Pure function of the client kind; most clients use `mcpServers`.
pub const fn managed_key(kind: ClientKind) -> &'static str {
    match kind {
        ClientKind::VsCode => "servers",
        ClientKind::Zed => "context_servers",
        ClientKind::OpenCode => "mcp",
        _ => "mcpServers",
    }
}

/// One server entry as written into a client config file.
///
/// This is the projection of a [`ServerDefinition`] that clients actually
/// read: command, args, and env. Hub-side metadata (ids, tags, timestamps)
/// never leaves the hub store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedEntry {
    /// Executable or launcher command
    pub command: String,
    /// Arguments passed to the command
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Environment variables for the server process
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
}

impl ManagedEntry {
    /// Project a registry definition into its on-disk form.
    pub fn from_definition(def: &ServerDefinition) -> Self {
        Self {
            command: def.command.clone(),
            args: def.args.clone(),
            env: def.env.clone(),
        }
    }
}

/// A client config document split into its managed and foreign parts.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DecodedConfig {
    /// Entries under the managed key, keyed by on-disk server name
    pub managed: Map<String, Value>,
    /// Every other top-level key, preserved verbatim
    pub rest: Map<String, Value>,
}

/// Decode raw config file bytes into managed and foreign parts.
///
/// Absent content is modeled by the caller passing empty bytes, which decode
/// to an empty document. Malformed JSON or a non-object root yields
/// [`HubError::ConfigCorrupt`]; a managed key holding a non-object value is
/// treated as an empty managed section (it is replaced wholesale on the next
/// encode) with a warning.
pub fn decode(kind: ClientKind, bytes: &[u8], path: &Path) -> Result<DecodedConfig, HubError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(DecodedConfig::default());
    }

    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| HubError::ConfigCorrupt {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let Value::Object(mut rest) = value else {
        return Err(HubError::ConfigCorrupt {
            path: path.display().to_string(),
            reason: "top-level value is not an object".to_string(),
        });
    };

    let managed = match rest.remove(managed_key(kind)) {
        Some(Value::Object(map)) => map,
        Some(other) => {
            tracing::warn!(
                path = %path.display(),
                key = managed_key(kind),
                "managed section is not an object ({}); treating it as empty",
                type_name(&other)
            );
            Map::new()
        }
        None => Map::new(),
    };

    Ok(DecodedConfig {
        managed,
        rest,
    })
}

/// Encode a managed section and preserved foreign keys back into file bytes.
///
/// The managed key is always present in the output, even for an empty
/// section. Output is pretty-printed JSON with a trailing newline.
pub fn encode(kind: ClientKind, managed: Map<String, Value>, mut rest: Map<String, Value>) -> Vec<u8> {
    rest.insert(managed_key(kind).to_string(), Value::Object(managed));
    let mut bytes = serde_json::to_vec_pretty(&Value::Object(rest))
        .unwrap_or_else(|_| b"{}".to_vec());
    bytes.push(b'\n');
    bytes
}

/// Import server definitions from an existing client config file.
///
/// Reads the file, decodes the managed section for the given kind, and lifts
/// every recognizable entry into a [`ServerDefinition`] with imported
/// provenance. Entries that do not match the command/args/env shape (for
/// example URL-based transports) are skipped with a warning.
pub fn import_from_file(path: &Path, kind: ClientKind) -> Result<Vec<ServerDefinition>, HubError> {
    let bytes = std::fs::read(path).map_err(|e| HubError::io(path.display().to_string(), e))?;
    let decoded = decode(kind, &bytes, path)?;

    let mut servers = Vec::new();
    for (name, value) in decoded.managed {
        match serde_json::from_value::<ManagedEntry>(value) {
            Ok(entry) => {
                let mut def = ServerDefinition::new(name, entry.command, entry.args);
                def.env = entry.env;
                def.provenance = Provenance::Imported;
                def.source_url = Some(path.display().to_string());
                servers.push(def);
            }
            Err(e) => {
                tracing::warn!(
                    server = %name,
                    path = %path.display(),
                    "skipping unrecognized entry during import: {e}"
                );
            }
        }
    }
    Ok(servers)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
