//! Configuration management
//!
//! Optional defaults for s3url, read from `~/.config/s3url/config.toml`.
//! Set `S3URL_CONFIG_DIR` to point at a different directory.
//! The file is never written by s3url.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "S3URL_CONFIG_DIR";

/// Presigned URL lifetime used when nothing else is configured
pub const DEFAULT_DURATION_MINUTES: u64 = 5;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Schema version for compatibility checks
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Defaults applied when the matching flag is not given
#[derive(Debug, Clone, Deserialize)]
pub struct Defaults {
    /// URL lifetime in minutes
    #[serde(default = "default_duration")]
    pub duration_minutes: u64,

    /// Named profile from the shared AWS config files
    #[serde(default)]
    pub profile: Option<String>,

    /// Region override
    #[serde(default)]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Use path-style addressing
    #[serde(default)]
    pub force_path_style: bool,

    #[serde(flatten)]
    pub(crate) unknown: BTreeMap<String, toml::Value>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_duration() -> u64 {
    DEFAULT_DURATION_MINUTES
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            duration_minutes: DEFAULT_DURATION_MINUTES,
            profile: None,
            region: None,
            endpoint_url: None,
            force_path_style: false,
            unknown: BTreeMap::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            unknown: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Keys present in the file that s3url does not recognise, dotted by table
    pub fn unknown_keys(&self) -> Vec<String> {
        self.unknown
            .keys()
            .cloned()
            .chain(
                self.defaults
                    .unknown
                    .keys()
                    .map(|key| format!("defaults.{key}")),
            )
            .collect()
    }
}

/// Locates and loads the configuration file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager for the default location
    ///
    /// Honors `S3URL_CONFIG_DIR` before falling back to the platform config directory.
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("s3url"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// A missing file yields the default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade s3url.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        for key in config.unknown_keys() {
            tracing::warn!(path = %self.config_path.display(), %key, "ignoring unknown config key");
        }

        tracing::debug!(path = %self.config_path.display(), "loaded config file");
        Ok(config)
    }
}
