//! Optional TOML configuration for the `paye` binary.
//!
//! ```toml
//! period = "monthly"
//! category = "employee"
//! log_level = "warn"
//! log_file = "paye.log"
//! schedule = "bands.csv"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::fs;
use std::path::{Path, PathBuf};

use paye_core::{Category, PayPeriod};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "paye.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub period: Option<PayPeriod>,
    pub category: Option<Category>,
    /// Any `EnvFilter` directive, e.g. `"debug"` or `"paye_core=trace"`.
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    /// CSV band schedule replacing the built-in bands.
    pub schedule: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml_str(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `explicit` if given (it must exist), otherwise
    /// [`DEFAULT_CONFIG_FILE`] if present, otherwise defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
