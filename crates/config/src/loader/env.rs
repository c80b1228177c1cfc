//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse the `RACKSCALE_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid values return ConfigError::InvalidValue naming the variable.
//! - Values already set through builder methods are never overwritten.

use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

pub const ENV_BASE_URL: &str = "RACKSCALE_BASE_URL";
pub const ENV_SKIP_VERIFY: &str = "RACKSCALE_SKIP_VERIFY";
pub const ENV_TIMEOUT: &str = "RACKSCALE_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "RACKSCALE_MAX_RETRIES";
pub const ENV_SERVICE_ROOT: &str = "RACKSCALE_SERVICE_ROOT";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(var: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(var)
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                message: expected.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if loader.base_url().is_none()
        && let Some(url) = env_var_or_none(ENV_BASE_URL)
    {
        loader.set_base_url(Some(url));
    }
    if loader.skip_verify().is_none()
        && let Some(skip) = parse_env::<bool>(ENV_SKIP_VERIFY, "must be true or false")?
    {
        loader.set_skip_verify(Some(skip));
    }
    if loader.timeout().is_none()
        && let Some(secs) = parse_env::<u64>(ENV_TIMEOUT, "must be a number of seconds")?
    {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if loader.max_retries().is_none()
        && let Some(retries) =
            parse_env::<usize>(ENV_MAX_RETRIES, "must be a non-negative integer")?
    {
        loader.set_max_retries(Some(retries));
    }
    if loader.service_root().is_none()
        && let Some(root) = env_var_or_none(ENV_SERVICE_ROOT)
    {
        loader.set_service_root(Some(root));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let key1 = "_RACKSCALE_TEST_UNSET_VAR";
        assert!(env_var_or_none(key1).is_none(), "Unset env var should return None");

        temp_env::with_vars([(key1, Some(""))], || {
            assert!(env_var_or_none(key1).is_none(), "Empty string env var should return None");
        });

        temp_env::with_vars([(key1, Some("   "))], || {
            assert!(
                env_var_or_none(key1).is_none(),
                "Whitespace-only env var should return None"
            );
        });

        let key2 = "_RACKSCALE_TEST_SET_VAR";
        temp_env::with_vars([(key2, Some(" test-value "))], || {
            assert_eq!(env_var_or_none(key2), Some("test-value".to_string()));
        });
    }

    #[test]
    #[serial]
    fn test_apply_env_reports_offending_variable() {
        temp_env::with_vars([(ENV_SKIP_VERIFY, Some("maybe"))], || {
            let mut loader = ConfigLoader::new();
            let err = apply_env(&mut loader).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { ref var, .. } if var == ENV_SKIP_VERIFY)
            );
        });
    }

    #[test]
    #[serial]
    fn test_apply_env_does_not_override_builder_values() {
        temp_env::with_vars(
            [
                (ENV_BASE_URL, Some("https://from-env:8443")),
                (ENV_MAX_RETRIES, Some("7")),
            ],
            || {
                let mut loader = ConfigLoader::new().with_base_url("https://explicit:8443");
                apply_env(&mut loader).unwrap();
                assert_eq!(loader.base_url().map(String::as_str), Some("https://explicit:8443"));
                assert_eq!(loader.max_retries(), Some(7));
            },
        );
    }
}
