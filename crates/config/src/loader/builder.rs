//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` layering explicit values over env vars.
//! - Validate and normalize the result into a `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_MAX_RETRIES, DEFAULT_SERVICE_ROOT, DEFAULT_TIMEOUT_SECS, MAX_MAX_RETRIES,
    MAX_TIMEOUT_SECS,
};
use crate::types::{Config, ConnectionConfig};

/// Configuration loader that builds config from explicit values and environment variables.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    service_root: Option<String>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from `RACKSCALE_*` environment variables.
    ///
    /// Values already set through builder methods are kept.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    pub fn with_service_root(mut self, root: impl Into<String>) -> Self {
        self.service_root = Some(root.into());
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self
            .base_url
            .as_deref()
            .map(validate_and_normalize_base_url)
            .transpose()?
            .ok_or(ConfigError::MissingBaseUrl)?;

        let service_root = self
            .service_root
            .as_deref()
            .map(normalize_service_root)
            .transpose()?
            .unwrap_or_else(|| DEFAULT_SERVICE_ROOT.to_string());

        let skip_verify = self.skip_verify.unwrap_or(false);
        if skip_verify && base_url.starts_with("http://") {
            tracing::warn!("skip_verify has no effect on plain http base URLs");
        }

        let connection = ConnectionConfig {
            base_url,
            skip_verify,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            service_root,
        };

        Self::validate_limits(&connection)?;

        Ok(Config { connection })
    }

    /// Checks timeout and retry bounds.
    fn validate_limits(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        if connection.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, connection.max_retries
                ),
            });
        }

        Ok(())
    }

    pub(crate) fn base_url(&self) -> Option<&String> {
        self.base_url.as_ref()
    }

    pub(crate) fn skip_verify(&self) -> Option<bool> {
        self.skip_verify
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn max_retries(&self) -> Option<usize> {
        self.max_retries
    }

    pub(crate) fn service_root(&self) -> Option<&String> {
        self.service_root.as_ref()
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    pub(crate) fn set_service_root(&mut self, root: Option<String>) {
        self.service_root = root;
    }
}

/// Validates and normalizes a base URL string.
///
/// Validation rules:
/// - Trim surrounding whitespace
/// - Treat blank/whitespace-only as missing (returns Err(ConfigError::MissingBaseUrl))
/// - Parse as an absolute URL
/// - Require scheme is http or https
/// - Require host is present
/// - Normalize by stripping trailing slash
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://podm.local:8443): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!(
                "scheme must be http or https (e.g. https://podm.local:8443), got: {scheme}"
            ),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. https://podm.local:8443)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

/// Service roots are absolute paths without a trailing slash.
fn normalize_service_root(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !trimmed.starts_with('/') {
        return Err(ConfigError::InvalidServiceRoot {
            message: format!("must be an absolute path such as {DEFAULT_SERVICE_ROOT}, got: {raw}"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// RAII guard for temporarily changing the current working directory.
    struct CwdGuard {
        original_dir: PathBuf,
    }

    impl CwdGuard {
        fn new(temp_dir: &TempDir) -> Self {
            let original_dir = std::env::current_dir().expect("Failed to get current directory");
            std::env::set_current_dir(temp_dir.path()).expect("Failed to set current directory");
            Self { original_dir }
        }
    }

    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.original_dir);
        }
    }

    #[test]
    fn test_defaults_applied() {
        let config = ConfigLoader::new()
            .with_base_url("https://podm.local:8443/")
            .build()
            .unwrap();
        assert_eq!(config.connection.base_url, "https://podm.local:8443");
        assert_eq!(config.connection.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.connection.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(config.connection.service_root, DEFAULT_SERVICE_ROOT);
        assert!(!config.connection.skip_verify);
    }

    #[test]
    fn test_missing_base_url() {
        let result = ConfigLoader::new().build();
        assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));

        let blank = ConfigLoader::new().with_base_url("   ").build();
        assert!(matches!(blank, Err(ConfigError::MissingBaseUrl)));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result = ConfigLoader::new().with_base_url("ftp://podm.local").build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_timeout_bounds() {
        let zero = ConfigLoader::new()
            .with_base_url("https://podm.local")
            .with_timeout(Duration::ZERO)
            .build();
        assert!(matches!(zero, Err(ConfigError::InvalidTimeout { .. })));

        let huge = ConfigLoader::new()
            .with_base_url("https://podm.local")
            .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS + 1))
            .build();
        assert!(matches!(huge, Err(ConfigError::InvalidTimeout { .. })));
    }

    #[test]
    fn test_max_retries_bound() {
        let result = ConfigLoader::new()
            .with_base_url("https://podm.local")
            .with_max_retries(MAX_MAX_RETRIES + 1)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidMaxRetries { .. })));
    }

    #[test]
    fn test_service_root_normalized() {
        let config = ConfigLoader::new()
            .with_base_url("https://podm.local")
            .with_service_root("/redfish/v1/")
            .build()
            .unwrap();
        assert_eq!(config.connection.service_root, "/redfish/v1");

        let relative = ConfigLoader::new()
            .with_base_url("https://podm.local")
            .with_service_root("redfish/v1")
            .build();
        assert!(matches!(relative, Err(ConfigError::InvalidServiceRoot { .. })));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_all_variables() {
        temp_env::with_vars(
            [
                ("RACKSCALE_BASE_URL", Some("http://10.0.0.5:8080")),
                ("RACKSCALE_SKIP_VERIFY", Some("true")),
                ("RACKSCALE_TIMEOUT", Some("12")),
                ("RACKSCALE_MAX_RETRIES", Some("0")),
                ("RACKSCALE_SERVICE_ROOT", Some(" /redfish/v1 ")),
            ],
            || {
                let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
                assert_eq!(config.connection.base_url, "http://10.0.0.5:8080");
                assert!(config.connection.skip_verify);
                assert_eq!(config.connection.timeout, Duration::from_secs(12));
                assert_eq!(config.connection.max_retries, 0);
                assert_eq!(config.connection.service_root, "/redfish/v1");
            },
        );
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_env() {
        temp_env::with_vars([("RACKSCALE_TIMEOUT", Some("soon"))], || {
            let result = ConfigLoader::new().from_env();
            assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        });
    }

    #[test]
    #[serial]
    fn test_missing_dotenv_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let _cwd_guard = CwdGuard::new(&temp_dir);

        temp_env::with_var_unset("DOTENV_DISABLED", || {
            assert!(ConfigLoader::new().load_dotenv().is_ok());
        });
    }

    #[test]
    #[serial]
    fn test_invalid_dotenv_does_not_leak_contents() {
        let temp_dir = TempDir::new().unwrap();
        let _cwd_guard = CwdGuard::new(&temp_dir);
        fs::write(temp_dir.path().join(".env"), "this is 'not valid\n").unwrap();

        temp_env::with_var_unset("DOTENV_DISABLED", || {
            let err = ConfigLoader::new().load_dotenv().unwrap_err();
            assert!(matches!(err, ConfigError::DotenvParse { .. }));
            assert!(!err.to_string().contains("not valid"));
        });
    }

    #[test]
    #[serial]
    fn test_dotenv_disabled_skips_file() {
        let temp_dir = TempDir::new().unwrap();
        let _cwd_guard = CwdGuard::new(&temp_dir);
        fs::write(temp_dir.path().join(".env"), "this is 'not valid\n").unwrap();

        temp_env::with_var("DOTENV_DISABLED", Some("1"), || {
            assert!(ConfigLoader::new().load_dotenv().is_ok());
        });
    }
}
