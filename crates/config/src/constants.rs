//! Centralized constants for the rackscale workspace.
//!
//! Defaults shared by the config loader and the client's HTTP transport.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for throttled or unavailable responses.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound accepted for `max_retries`.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Service Defaults
// =============================================================================

/// Path of the service root on every conforming service.
pub const DEFAULT_SERVICE_ROOT: &str = "/redfish/v1";

/// Base URL used by `Config::default()`.
pub const DEFAULT_BASE_URL: &str = "https://localhost:8443";

/// Initial backoff before the first retry, in milliseconds.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 250;
