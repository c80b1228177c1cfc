//! reqwest-backed transport.
//!
//! Responsibilities:
//! - Join resource paths onto the configured base URL.
//! - Send `GET` requests with JSON accept headers and W3C trace context.
//! - Apply retry, timeout and redirect policy.
//!
//! Does NOT handle:
//! - Authentication. Front the service with a proxy, or wrap this transport.

use std::time::{Duration, Instant};

use bytes::Bytes;
use futures::future::BoxFuture;
use reqwest::header::ACCEPT;
use tracing::debug;

use rackscale_config::Config;
use rackscale_config::constants::{
    DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BASE_DELAY_MS, DEFAULT_TIMEOUT_SECS,
};

use super::Transport;
use super::retry::send_with_retry;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::odata::ODataId;
use crate::tracing::inject_trace_context;

/// Transport talking to a management service over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    max_retries: usize,
    retry_delay: Duration,
    metrics: Option<MetricsCollector>,
}

impl HttpTransport {
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `uri`. Absolute URIs are passed through unchanged.
    pub fn url_for(&self, uri: &ODataId) -> Result<String> {
        let path = uri.path();
        if path.is_empty() {
            return Err(ClientError::InvalidUrl("empty resource URI".to_string()));
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(path.to_string());
        }
        if path.starts_with('/') {
            Ok(format!("{}{}", self.base_url, path))
        } else {
            Ok(format!("{}/{}", self.base_url, path))
        }
    }

    #[tracing::instrument(skip_all, fields(uri = %uri))]
    async fn fetch_bytes(&self, uri: &ODataId) -> Result<Bytes> {
        let url = self.url_for(uri)?;
        let request = inject_trace_context(self.http.get(&url).header(ACCEPT, "application/json"));
        let label = uri.path();
        let started = Instant::now();

        let result = async {
            let response = send_with_retry(
                request,
                self.max_retries,
                self.retry_delay,
                self.metrics.as_ref(),
                label,
            )
            .await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            Ok::<_, ClientError>((status, body))
        }
        .await;

        match result {
            Ok((status, body)) => {
                debug!(status, bytes = body.len(), "Fetched resource");
                if let Some(m) = &self.metrics {
                    m.record_fetch_duration(label, started.elapsed(), Some(status));
                }
                Ok(body)
            }
            Err(err) => {
                debug!(error = %err, "Fetch failed");
                if let Some(m) = &self.metrics {
                    m.record_fetch_duration(label, started.elapsed(), err.status());
                    m.record_client_error(label, &err);
                }
                Err(err)
            }
        }
    }
}

impl Transport for HttpTransport {
    fn fetch<'a>(&'a self, uri: &'a ODataId) -> BoxFuture<'a, Result<Bytes>> {
        Box::pin(self.fetch_bytes(uri))
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportBuilder {
    base_url: Option<String>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
    retry_delay: Duration,
    metrics: Option<MetricsCollector>,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransportBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
            metrics: None,
        }
    }

    /// Set the base URL (scheme, host and port; no path).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Skip TLS certificate verification. Only meaningful for https.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Backoff before the first retry; doubled for every further retry.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn metrics(mut self, collector: MetricsCollector) -> Self {
        self.metrics = Some(collector);
        self
    }

    /// Apply connection settings from a loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        let connection = &config.connection;
        self.base_url = Some(connection.base_url.clone());
        self.skip_verify = connection.skip_verify;
        self.timeout = connection.timeout;
        self.max_retries = connection.max_retries;
        self
    }

    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    pub fn build(self) -> Result<HttpTransport> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);
        reqwest::Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        Ok(HttpTransport {
            http: http_builder.build()?,
            base_url,
            max_retries: self.max_retries,
            retry_delay: self.retry_delay,
            metrics: self.metrics,
        })
    }
}
