//! # quarry-config
//!
//! Layered configuration loading for Quarry using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QUARRY_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `./quarry.toml`
//! 4. User-level `~/.config/quarry/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `QUARRY_STORE__URL` -> `store.url`,
//! `QUARRY_PIPELINE__BATCH_SIZE` -> `pipeline.batch_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use quarry_config::QuarryConfig;
//!
//! let config = QuarryConfig::load_with_dotenv(None).expect("config");
//! if config.store.is_remote() {
//!     println!("store: {}", config.store.url);
//! }
//! ```

mod error;
mod pipeline;
mod source;
mod store;

pub use error::ConfigError;
pub use pipeline::PipelineConfig;
pub use source::{DEFAULT_NULL_MARKERS, SourceConfig};
pub use store::StoreConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Project-local config file, relative to the working directory.
const LOCAL_CONFIG_FILE: &str = "quarry.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QuarryConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl QuarryConfig {
    /// Load and validate configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or parsed, or
    /// [`ConfigError::InvalidValue`] if `extra` does not exist or a value fails
    /// validation.
    pub fn load(extra: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = extra.filter(|p| !p.is_file()) {
            return Err(ConfigError::invalid(
                "--config",
                format!("file not found: {}", path.display()),
            ));
        }
        let config: Self = Self::figment(extra).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory (if present), then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(extra)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can extract from it directly or layer more providers.
    pub fn figment(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = extra {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.merge(Env::prefixed("QUARRY_").split("__"))
    }

    /// Check every section for values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store.validate()?;
        self.source.validate()?;
        self.pipeline.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quarry").join("config.toml"))
    }
}
