//! Configuration types and loading.
//!
//! Configuration lives in `.forma/config.toml` and can be overridden with
//! `FORMA_*` environment variables. Layering is handled by figment; a
//! missing file yields the defaults.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A filesystem operation failed.
    #[error("failed to access config: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration could not be parsed or merged.
    #[error("failed to load config: {0}")]
    ParseError(#[from] figment::Error),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Contents of `.forma/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Hash length for generated field/schema IDs (3-8).
    pub id_length: usize,

    /// Subdirectory under `.forma/` holding the storage slots, if any.
    pub slots_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_length: 6,
            slots_dir: None,
        }
    }
}

impl Config {
    /// Resolves the directory the slot files live in.
    pub fn slots_path(&self, forma_dir: &Path) -> std::path::PathBuf {
        match &self.slots_dir {
            Some(sub) => forma_dir.join(sub),
            None => forma_dir.to_path_buf(),
        }
    }
}

/// Loads configuration for the given `.forma/` directory.
///
/// Defaults, then `config.toml`, then `FORMA_*` environment variables.
pub fn load_config(forma_dir: &Path) -> Result<Config> {
    let config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(forma_dir.join("config.toml")))
        .merge(Env::prefixed("FORMA_"))
        .extract()?;
    Ok(config)
}
