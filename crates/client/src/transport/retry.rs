//! Retry helper for HTTP requests with exponential backoff.
//!
//! Throttling (429) and gateway/availability failures (502, 503, 504) are
//! retried; every other status is final.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::RedfishError;

/// Sends an HTTP request, retrying retryable statuses with exponential backoff.
///
/// The delay before retry `n` (0-based) is `base_delay * 2^n`. `max_retries`
/// of 0 means a single attempt.
///
/// # Errors
///
/// - `ClientError::MaxRetriesExceeded` when a retryable status persists.
/// - `ClientError::ApiError` for any other non-success status, with the
///   Redfish error body flattened into the message.
/// - `ClientError::HttpError` for transport failures, which are not retried.
pub async fn send_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    base_delay: Duration,
    metrics: Option<&MetricsCollector>,
    uri: &str,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!("Request builder cannot be cloned, single attempt only");
                return into_result(builder.send().await?).await;
            }
        };

        if let Some(m) = metrics {
            m.record_request(uri);
        }

        let response = attempt_builder.send().await?;
        let status = response.status().as_u16();

        if !ClientError::is_retryable_status(status) {
            if attempt > 0 && response.status().is_success() {
                debug!(attempt = attempt + 1, "Request succeeded after retry");
            }
            return into_result(response).await;
        }

        if attempt == max_retries {
            debug!(
                attempts = attempt + 1,
                status, "Max retries exhausted for retryable status"
            );
            break;
        }

        let backoff = base_delay.saturating_mul(2u32.saturating_pow(attempt as u32));
        debug!(
            attempt = attempt + 1,
            max_retries = max_retries + 1,
            status,
            backoff_ms = backoff.as_millis() as u64,
            "Retryable status, backing off"
        );
        if let Some(m) = metrics {
            m.record_retry(uri, attempt + 1);
        }
        tokio::time::sleep(backoff).await;
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

async fn into_result(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    Err(ClientError::ApiError {
        status,
        url,
        message: error_message(&body),
    })
}

/// Flatten a Redfish error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<RedfishError>(body) {
        Ok(error) => {
            let summary = error.summary();
            if summary.is_empty() {
                body.to_string()
            } else {
                summary
            }
        }
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_flattens_extended_info() {
        let body = r#"{"error":{"code":"Base.1.0.GeneralError","message":"Resource missing","@Message.ExtendedInfo":[{"Message":"Chassis 9 does not exist"}]}}"#;
        assert_eq!(
            error_message(body),
            "Resource missing; Chassis 9 does not exist"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("upstream timeout"), "upstream timeout");
    }
}
