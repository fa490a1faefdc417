//! OS keyring storage for sensitive values.
//!
//! Server env values like API tokens do not belong in `registry.json`. The
//! hub stores them in the operating system keyring under the `mcphub`
//! service and only resolves them when projecting entries into config files
//! is explicitly requested. Keys follow the scheme
//! `server:<server-id>:env:<VAR>`.

use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE: &str = "mcphub";

/// Keyring key for one server's env variable.
#[must_use]
pub fn server_env_key(server_id: &str, var: &str) -> String {
    format!("server:{server_id}:env:{var}")
}

/// Store a secret value under a key.
pub fn set_secret(key: &str, value: &str) -> Result<()> {
    let entry = Entry::new(SERVICE, key).context("failed to open keyring entry")?;
    entry
        .set_password(value)
        .with_context(|| format!("failed to store secret '{key}'"))
}

/// Fetch a secret value, `None` when the key has never been set.
pub fn get_secret(key: &str) -> Result<Option<String>> {
    let entry = Entry::new(SERVICE, key).context("failed to open keyring entry")?;
    match entry.get_password() {
        Ok(value) => Ok(Some(value)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(anyhow::Error::new(e)).with_context(|| format!("failed to read secret '{key}'")),
    }
}

/// Delete a secret. Deleting an absent key is a no-op.
pub fn delete_secret(key: &str) -> Result<()> {
    let entry = Entry::new(SERVICE, key).context("failed to open keyring entry")?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(anyhow::Error::new(e)).with_context(|| format!("failed to delete secret '{key}'")),
    }
}
