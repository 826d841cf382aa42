//! Configuration loading and typed config structures for a realm host.
//!
//! The canonical configuration lives in `realm-config.yaml`. Every field
//! has a default, so an empty file (or no file at all) yields a working
//! local setup.
//!
//! Environment variables override the file for deployment-specific values:
//! - `REALM_HOST` overrides `server.host`
//! - `REALM_PORT` overrides `server.port`
//! - `REALM_CATALOG` overrides `catalog.path`
//!
//! `RUST_LOG`, when set, takes precedence over `logging.level`; that is
//! resolved by the binary when it builds its `EnvFilter`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level realm configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RealmConfig {
    /// Realm identity.
    #[serde(default)]
    pub realm: RealmSection,

    /// Listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Outbound delivery settings.
    #[serde(default)]
    pub dispatch: DispatchSection,

    /// Definition catalog source.
    #[serde(default)]
    pub catalog: CatalogSection,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl RealmConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override file values with `REALM_*` environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("REALM_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("REALM_PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(err) => warn!(value = %val, error = %err, "Ignoring invalid REALM_PORT"),
            }
        }
        if let Ok(val) = std::env::var("REALM_CATALOG") {
            self.catalog.path = Some(PathBuf::from(val));
        }
    }
}

/// Realm identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RealmSection {
    /// Human-readable realm name, shown on the status endpoint.
    #[serde(default = "default_realm_name")]
    pub name: String,
}

impl Default for RealmSection {
    fn default() -> Self {
        Self {
            name: default_realm_name(),
        }
    }
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Outbound delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DispatchSection {
    /// Packets a single participant's outbound queue holds before new
    /// packets are rejected.
    #[serde(default = "default_outbound_queue_capacity")]
    pub outbound_queue_capacity: usize,
}

impl Default for DispatchSection {
    fn default() -> Self {
        Self {
            outbound_queue_capacity: default_outbound_queue_capacity(),
        }
    }
}

/// Definition catalog source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogSection {
    /// Path to a catalog YAML file. Without one the realm starts with an
    /// empty catalog and rejects every transfer.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Default filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_realm_name() -> String {
    String::from("realm")
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    7878
}

const fn default_outbound_queue_capacity() -> usize {
    256
}

fn default_log_level() -> String {
    String::from("info")
}
