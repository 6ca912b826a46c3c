//! Service configuration, loaded from a JSON file at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read configuration file `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse configuration file `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Heartbeat emission settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeartbeatConfig {
    /// Message logged on each beat.
    pub message: String,
    /// Interval between beats in milliseconds.
    pub interval_ms: u64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            message: "sensormesh heart beat".to_string(),
            interval_ms: 15_000,
        }
    }
}

/// Top-level service configuration.
///
/// Every field has a default so a partial configuration file is valid;
/// the binary applies CLI overrides on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfig {
    /// Service name used in logs and the config endpoint.
    pub service_name: String,
    /// Bind address for the HTTP listener.
    pub host: String,
    /// Port to listen on. 0 means OS-assigned.
    pub port: u16,
    /// Maximum time to wait for a request to complete, in milliseconds.
    pub request_timeout_ms: u64,
    /// Heartbeat settings.
    pub heartbeat: HeartbeatConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "sensormesh".to_string(),
            host: "0.0.0.0".to_string(),
            port: 48080,
            request_timeout_ms: 5_000,
            heartbeat: HeartbeatConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
