//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeouts, retries).
//! - Define the top-level `Config` structure.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Configuration loading from env or `.env` files (see `loader` module).
//! - Actual network connections (see the client crate's transport).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - Default values come from `constants`, not magic numbers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_SERVICE_ROOT, DEFAULT_TIMEOUT_SECS,
};

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection settings for a management service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the service (e.g. https://podm.example.com:8443)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for throttled or unavailable responses
    pub max_retries: usize,
    /// Path of the service root
    #[serde(default = "default_service_root")]
    pub service_root: String,
}

fn default_service_root() -> String {
    DEFAULT_SERVICE_ROOT.to_string()
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            service_root: default_service_root(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
}

impl Config {
    /// Create a config pointing at `base_url` with every other setting defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url: base_url.into(),
                ..ConnectionConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_serializes_as_seconds() {
        let config = Config::with_base_url("https://podm:8443");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["connection"]["timeout"], DEFAULT_TIMEOUT_SECS);
        assert_eq!(json["connection"]["service_root"], "/redfish/v1");
    }

    #[test]
    fn test_service_root_defaults_when_absent() {
        let config: Config = serde_json::from_str(
            r#"{"connection":{"base_url":"https://podm:8443","skip_verify":true,"timeout":5,"max_retries":1}}"#,
        )
        .unwrap();
        assert_eq!(config.connection.service_root, DEFAULT_SERVICE_ROOT);
        assert_eq!(config.connection.timeout, Duration::from_secs(5));
        assert!(config.connection.skip_verify);
    }
}
