//! Configuration file management.
//!
//! Reads the optional `.cryptenv.toml`. Every field has a default, so a
//! missing file is the same as an empty one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.cryptenv.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the key and payload are looked up
    pub source: SourceConfig,
    /// Merge behaviour for `run`
    pub bootstrap: BootstrapConfig,
}

/// Entry names read by the environment strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Entry holding the encrypted payload
    pub payload_var: String,
    /// Entry holding the base64 key
    pub key_var: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            payload_var: constants::PAYLOAD_VAR.to_string(),
            key_var: constants::KEY_VAR.to_string(),
        }
    }
}

/// Bootstrap section of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Overwrite entries that already exist in the target
    #[serde(rename = "override")]
    pub override_existing: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            override_existing: true,
        }
    }
}

impl Config {
    /// Path to the configuration file in the current directory
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load `.cryptenv.toml` from the current directory, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path. The file must exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile`, `ConfigError::Parse` or
    /// `ConfigError::Invalid`.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config = Self::parse(&contents)?;

        debug!(
            payload_var = %config.source.payload_var,
            key_var = %config.source.key_var,
            override_existing = config.bootstrap.override_existing,
            "config loaded"
        );
        Ok(config)
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or `ConfigError::Invalid`.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for unusable entry names.
    pub fn validate(&self) -> Result<()> {
        validate_var("source.payload_var", &self.source.payload_var)?;
        validate_var("source.key_var", &self.source.key_var)?;

        if self.source.payload_var == self.source.key_var {
            return Err(ConfigError::Invalid(
                "source.payload_var and source.key_var must differ".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

fn validate_var(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ConfigError::Invalid(format!("{} must not be empty", field)).into());
    }
    if value.contains('=') || value.contains('\0') {
        return Err(ConfigError::Invalid(format!(
            "{} must not contain '=' or NUL: {}",
            field, value
        ))
        .into());
    }
    Ok(())
}
