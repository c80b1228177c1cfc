//! Metrics collection for resource fetching and decoding.
//!
//! This module provides metrics collection for management-service calls, including:
//! - Fetch latency histograms
//! - Request counters (total, retries, errors)
//! - Decode failure counters, per resource kind
//! - Vendor extensions nobody claimed
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install a `metrics` recorder in the binary)
//! - Persistent storage of metrics
//!
//! # Invariants
//! - All metrics use consistent label names: `uri`, `status`, `error_category`, `kind`
//! - Metric recording is infallible
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for fetch duration histogram.
pub const METRIC_FETCH_DURATION: &str = "rackscale_fetch_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "rackscale_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "rackscale_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "rackscale_errors_total";

/// Metric name for decode failure counter.
pub const METRIC_DECODE_FAILURES: &str = "rackscale_decode_failures_total";

/// Metric name for payloads with no matching schema.
pub const METRIC_SCHEMA_NOT_FOUND: &str = "rackscale_schema_not_found_total";

/// Metric name for vendor namespaces kept as opaque JSON.
pub const METRIC_UNRECOGNIZED_OEM: &str = "rackscale_unrecognized_oem_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, DNS, etc.)
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Request timeout
    Timeout,
    /// Retries exhausted on a retryable status
    RetriesExhausted,
    /// Payload could not be decoded
    Decode,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::RetriesExhausted => "retries_exhausted",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    /// Categorize a ClientError for metrics purposes.
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::ApiError { status, .. } => {
                if (400..500).contains(status) {
                    ErrorCategory::Http4xx
                } else if (500..600).contains(status) {
                    ErrorCategory::Http5xx
                } else {
                    ErrorCategory::Unknown
                }
            }
            ClientError::HttpError(e) => {
                if e.is_timeout() {
                    ErrorCategory::Timeout
                } else if e.is_connect() || e.is_request() {
                    ErrorCategory::Transport
                } else {
                    ErrorCategory::Unknown
                }
            }
            ClientError::MaxRetriesExceeded(_) => ErrorCategory::RetriesExhausted,
            ClientError::InvalidUrl(_) => ErrorCategory::Transport,
            e if e.is_decode() => ErrorCategory::Decode,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Metrics collector for resource reads.
///
/// Thin wrapper around the `metrics` crate macros with consistent labels.
///
/// # Example
///
/// ```rust,ignore
/// use rackscale_client::metrics::MetricsCollector;
///
/// let collector = MetricsCollector::new();
/// collector.record_fetch_duration("/redfish/v1/Chassis/1", Duration::from_millis(150), Some(200));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    /// Whether metrics collection is enabled.
    enabled: bool,
}

impl MetricsCollector {
    /// Create a new, enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a disabled metrics collector.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of one fetch.
    ///
    /// `status` is `None` when the request failed before a response arrived.
    pub fn record_fetch_duration(&self, uri: &str, duration: Duration, status: Option<u16>) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_FETCH_DURATION,
            "uri" => uri.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt, retries included.
    pub fn record_request(&self, uri: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL, "uri" => uri.to_string()).increment(1);
    }

    /// Record a retry attempt (1-based).
    pub fn record_retry(&self, uri: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "uri" => uri.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    /// Record an error.
    pub fn record_error(&self, uri: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "uri" => uri.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error, categorizing it automatically.
    pub fn record_client_error(&self, uri: &str, error: &ClientError) {
        match error {
            ClientError::SchemaNotFound { .. } => self.record_schema_not_found(),
            ClientError::Decode { resource, .. } => self.record_decode_failure(resource),
            ClientError::OemDecode { resource, .. } => {
                self.record_decode_failure(resource.kind().as_str());
            }
            _ => {}
        }
        self.record_error(uri, ErrorCategory::from(error));
    }

    /// Record a payload that failed structural or vendor decoding.
    pub fn record_decode_failure(&self, kind: &str) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_DECODE_FAILURES, "kind" => kind.to_string()).increment(1);
    }

    /// Record a payload whose discriminator matched no schema.
    pub fn record_schema_not_found(&self) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_SCHEMA_NOT_FOUND).increment(1);
    }

    /// Record vendor namespaces kept as opaque JSON.
    pub fn record_unrecognized_oem(&self, kind: &str, count: usize) {
        if !self.enabled || count == 0 {
            return;
        }
        metrics::counter!(METRIC_UNRECOGNIZED_OEM, "kind" => kind.to_string())
            .increment(count as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_as_str() {
        assert_eq!(ErrorCategory::Transport.as_str(), "transport");
        assert_eq!(ErrorCategory::Http4xx.as_str(), "http_4xx");
        assert_eq!(ErrorCategory::Http5xx.as_str(), "http_5xx");
        assert_eq!(ErrorCategory::Timeout.as_str(), "timeout");
        assert_eq!(ErrorCategory::RetriesExhausted.as_str(), "retries_exhausted");
        assert_eq!(ErrorCategory::Decode.as_str(), "decode");
        assert_eq!(ErrorCategory::Unknown.as_str(), "unknown");
    }

    #[test]
    fn test_error_categorization() {
        let api_404 = ClientError::ApiError {
            status: 404,
            url: "test".to_string(),
            message: "not found".to_string(),
        };
        assert_eq!(ErrorCategory::from(&api_404), ErrorCategory::Http4xx);

        let api_500 = ClientError::ApiError {
            status: 500,
            url: "test".to_string(),
            message: "server error".to_string(),
        };
        assert_eq!(ErrorCategory::from(&api_500), ErrorCategory::Http5xx);

        let retries = ClientError::MaxRetriesExceeded(4);
        assert_eq!(ErrorCategory::from(&retries), ErrorCategory::RetriesExhausted);

        let not_found = ClientError::SchemaNotFound {
            type_name: "#Widget.v1_0_0.Widget".to_string(),
        };
        assert_eq!(ErrorCategory::from(&not_found), ErrorCategory::Decode);

        let decode = ClientError::decode("Chassis", None, "bad");
        assert_eq!(ErrorCategory::from(&decode), ErrorCategory::Decode);
    }

    #[test]
    fn test_metrics_collector_enabled() {
        let collector = MetricsCollector::new();
        assert!(collector.is_enabled());

        let disabled = MetricsCollector::disabled();
        assert!(!disabled.is_enabled());
        disabled.record_unrecognized_oem("Chassis", 3);
    }
}
