//! Target store (libSQL) configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_database() -> String {
    "stackoverflow_poll".to_owned()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Remote libSQL server URL (e.g., `libsql://survey.example.io`).
    /// Empty means a local database file.
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote server.
    #[serde(default)]
    pub auth_token: String,

    /// Target database name. Local files are named `<database>.db`.
    #[serde(default = "default_database")]
    pub database: String,

    /// Directory holding the local database file. Empty means the current directory.
    #[serde(default)]
    pub data_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            database: default_database(),
            data_dir: String::new(),
        }
    }
}

impl StoreConfig {
    /// Whether the store is a remote server rather than a local file.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty()
    }

    /// Path of the local database file.
    pub fn local_path(&self) -> PathBuf {
        let file = format!("{}.db", self.database);
        if self.data_dir.is_empty() {
            PathBuf::from(file)
        } else {
            PathBuf::from(&self.data_dir).join(file)
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::invalid("store.database", "must not be empty"));
        }
        if self.is_remote() && self.auth_token.is_empty() {
            return Err(ConfigError::invalid(
                "store.auth_token",
                "required when store.url is set",
            ));
        }
        Ok(())
    }
}
