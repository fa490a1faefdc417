//! Helpers shared by the CLI command modules.

use anyhow::Result;
use std::path::Path;

use crate::config::{self, GlobalConfig};
use crate::core::HubError;
use crate::models::{ClientInstance, ServerDefinition};
use crate::store::Store;

/// Open the hub record store at its configured location.
pub fn open_store() -> Result<Store> {
    Ok(Store::open(config::store_path()?)?)
}

/// Load the global settings, honoring a `--config` override.
pub fn load_config(override_path: Option<&Path>) -> Result<GlobalConfig> {
    GlobalConfig::load_with_override(override_path)
}

/// Resolve a server by name or id, with a typed not-found error.
pub fn resolve_server<'a>(store: &'a Store, name_or_id: &str) -> Result<&'a ServerDefinition> {
    store.find_server(name_or_id).ok_or_else(|| {
        HubError::ServerNotFound {
            name: name_or_id.to_string(),
        }
        .into()
    })
}

/// Resolve an instance by name or id, with a typed not-found error.
pub fn resolve_instance<'a>(store: &'a Store, name_or_id: &str) -> Result<&'a ClientInstance> {
    store.find_instance(name_or_id).ok_or_else(|| {
        HubError::InstanceNotFound {
            name: name_or_id.to_string(),
        }
        .into()
    })
}

/// Parse a `KEY=VALUE` pair for `--env` arguments.
pub fn parse_env_pair(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

/// Expand `~` in user-supplied paths.
#[must_use]
pub fn expand_path(raw: &str) -> String {
    shellexpand::tilde(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_pair_parsing() {
        assert_eq!(
            parse_env_pair("TOKEN=abc").unwrap(),
            ("TOKEN".to_string(), "abc".to_string())
        );
        assert_eq!(
            parse_env_pair("EMPTY=").unwrap(),
            ("EMPTY".to_string(), String::new())
        );
        // Values may contain '='
        assert_eq!(
            parse_env_pair("URL=a=b").unwrap(),
            ("URL".to_string(), "a=b".to_string())
        );
        assert!(parse_env_pair("no-equals").is_err());
        assert!(parse_env_pair("=value").is_err());
    }

    #[test]
    fn tilde_expansion() {
        let expanded = expand_path("~/x.json");
        assert!(!expanded.starts_with('~') || dirs::home_dir().is_none());
        assert_eq!(expand_path("/abs/path"), "/abs/path");
    }
}
