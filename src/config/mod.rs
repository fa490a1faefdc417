//! Hub data directory layout and global settings.
//!
//! All hub state lives under one directory, `~/.mcphub` by default:
//!
//! ```text
//! ~/.mcphub/
//!   config.toml      # global settings (AppSettings)
//!   registry.json    # the record store
//!   backups/         # config file snapshots
//! ```
//!
//! The `MCPHUB_HOME` environment variable relocates the whole directory
//! (tests rely on this), and `MCPHUB_CONFIG` points at an alternative
//! settings file, as does the CLI's `--config` flag.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::AppSettings;
use crate::utils::fs::{read_toml_file, write_toml_file};

/// The hub data directory, honoring `MCPHUB_HOME`.
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("MCPHUB_HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir()
        .map(|home| home.join(".mcphub"))
        .context("could not determine home directory")
}

/// Path of the record store file.
pub fn store_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("registry.json"))
}

/// Directory holding config file backups.
pub fn backup_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("backups"))
}

/// Path of the global settings file, honoring `MCPHUB_CONFIG`.
pub fn config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("MCPHUB_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    Ok(data_dir()?.join("config.toml"))
}

/// The global hub configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Hub-wide settings
    #[serde(default)]
    pub settings: AppSettings,
}

impl GlobalConfig {
    /// Load the config from its default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load the config from an explicit path, or defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        read_toml_file(path)
    }

    /// Load from an override path when given, else the default location.
    pub fn load_with_override(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => Self::load(),
        }
    }

    /// Save the config to its default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    /// Save the config to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        write_toml_file(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    #[serial_test::serial]
    fn data_dir_honors_mcphub_home() {
        unsafe { std::env::set_var("MCPHUB_HOME", "/tmp/hub-home-test") };
        assert_eq!(data_dir().unwrap(), PathBuf::from("/tmp/hub-home-test"));
        assert_eq!(
            store_path().unwrap(),
            PathBuf::from("/tmp/hub-home-test/registry.json")
        );
        unsafe { std::env::remove_var("MCPHUB_HOME") };
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let config = GlobalConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.settings.create_backups);
        assert_eq!(config.settings.backup_retention_days, 30);
    }

    #[test]
    fn save_and_reload_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = GlobalConfig::default();
        config.settings.create_backups = false;
        config.settings.backup_retention_days = 7;
        config.save_to(&path).unwrap();

        let loaded = GlobalConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "settings = not-toml").unwrap();
        assert!(GlobalConfig::load_from(&path).is_err());
    }
}
