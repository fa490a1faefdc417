//! File system utilities for MCP Hub
//!
//! This module provides safe, atomic file operations used everywhere the hub
//! touches disk: the record store, global settings, client config files, and
//! backups.
//!
//! # Key Features
//!
//! - **Atomic operations**: files are written via temp-file-then-rename so
//!   readers never observe a partial write
//! - **Durability**: content is synced to disk before the rename
//! - **Typed helpers**: JSON and TOML read/write wrappers with contextual
//!   error messages

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Ensures a directory exists, creating it and all parent directories if
/// necessary.
///
/// Returns an error if the path exists but is not a directory.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", path.display()),
        ));
    }
    Ok(())
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// The write proceeds in three steps:
/// 1. Content is written to a temporary file (`.tmp` extension) next to the
///    target
/// 2. The temporary file is synced to disk
/// 3. The temporary file is renamed over the target path
///
/// The rename is atomic on all supported platforms, so the target file either
/// contains the old content or the new content, never a mix. Parent
/// directories are created automatically.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)
}

/// Safely writes a string to a file using atomic operations.
///
/// Convenience wrapper around [`atomic_write`] with contextual errors.
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Reads and deserializes a JSON file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))
}

/// Serializes a value to pretty-printed JSON and writes it atomically.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize JSON for: {}", path.display()))?;
    content.push('\n');
    safe_write(path, &content)
}

/// Reads and deserializes a TOML file.
pub fn read_toml_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read TOML file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML file: {}", path.display()))
}

/// Serializes a value to TOML and writes it atomically.
pub fn write_toml_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = toml::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize TOML for: {}", path.display()))?;
    safe_write(path, &content)
}
