//! Error types for the rack-scale resource client.
//!
//! Decoding failures (unknown discriminator, structural mismatch, malformed
//! vendor extension) and transport failures share one enum so callers can
//! propagate with `?` and still branch on the category.

use thiserror::Error;

use crate::models::Resource;
use crate::oem::OemDecodeError;
use crate::optional::IllegalStateError;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while fetching or decoding resources.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No registered pattern matched the payload's `@odata.type`.
    #[error("No schema registered for resource type '{type_name}'")]
    SchemaNotFound { type_name: String },

    /// The payload could not be decoded into its schema.
    #[error("Failed to decode {resource}{}: {message}", .uri.as_ref().map(|u| format!(" at {u}")).unwrap_or_default())]
    Decode {
        resource: String,
        uri: Option<String>,
        message: String,
    },

    /// A claimed vendor extension failed to decode.
    ///
    /// The resource is still available with every non-OEM field populated.
    #[error("{error}")]
    OemDecode {
        error: OemDecodeError,
        resource: Box<Resource>,
    },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success response from the management service.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A type discriminator template could not be compiled.
    #[error("Invalid type pattern '{template}': {source}")]
    InvalidTypePattern {
        template: String,
        #[source]
        source: regex::Error,
    },

    /// A value was read from an unassigned optional.
    #[error(transparent)]
    IllegalState(#[from] IllegalStateError),
}

impl ClientError {
    /// Build a decode error for `resource` (a kind label or "resource").
    pub fn decode(
        resource: impl Into<String>,
        uri: Option<&str>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::Decode {
            resource: resource.into(),
            uri: uri.map(str::to_string),
            message: message.to_string(),
        }
    }

    /// Check if this error came from the transport collaborator.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpError(_)
                | Self::ApiError { .. }
                | Self::MaxRetriesExceeded(_)
                | Self::InvalidUrl(_)
        )
    }

    /// Check if this error came from decoding a payload.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::SchemaNotFound { .. } | Self::Decode { .. } | Self::OemDecode { .. }
        )
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502: Bad Gateway (transient server error)
    /// - 503: Service Unavailable (transient server error)
    /// - 504: Gateway Timeout (transient server error)
    ///
    /// Everything else fails immediately. A 500 from a BMC usually means the
    /// request itself is broken.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Recover the partially decoded resource from an OEM decode failure.
    pub fn into_partial_resource(self) -> Option<Resource> {
        match self {
            Self::OemDecode { resource, .. } => Some(*resource),
            _ => None,
        }
    }
}
