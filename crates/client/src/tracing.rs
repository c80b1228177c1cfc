//! OpenTelemetry tracing initialization and trace context propagation.
//!
//! Binaries embedding the client call [`TracingConfig::init`] once. The HTTP
//! transport calls [`inject_trace_context`] on every request so spans started
//! by the caller continue on the management service.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rackscale_client::tracing::TracingConfig;
//!
//! let guard = TracingConfig::new()
//!     .with_otlp_endpoint("http://localhost:4317")
//!     .with_service_name("rack-inventory")
//!     .init()?;
//! // Run application...
//! guard.shutdown(); // Flush spans before exit
//! ```

use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the OTLP collector endpoint.
pub const OTLP_ENDPOINT_ENV: &str = "RACKSCALE_OTLP_ENDPOINT";

const TRACER_NAME: &str = "rackscale-client";

/// Output format of the stdout layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration for OpenTelemetry tracing.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// OTLP endpoint (e.g., "http://localhost:4317" for Jaeger/Tempo)
    pub otlp_endpoint: Option<String>,
    /// Service name for trace attribution
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Whether to enable stdout logging layer alongside OTLP
    pub enable_stdout: bool,
    pub format: LogFormat,
    /// Batch span processor timeout
    pub timeout: Duration,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: std::env::var(OTLP_ENDPOINT_ENV).ok().filter(|s| !s.trim().is_empty()),
            service_name: TRACER_NAME.to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            enable_stdout: true,
            format: LogFormat::Text,
            timeout: Duration::from_secs(5),
        }
    }
}

impl TracingConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    pub fn with_service_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    pub fn with_stdout(mut self, enable: bool) -> Self {
        self.enable_stdout = enable;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Initialize the global tracing subscriber.
    ///
    /// The returned guard must be held until shutdown so pending spans are
    /// flushed.
    ///
    /// # Errors
    /// Returns an error if the OTLP pipeline fails to initialize.
    pub fn init(&self) -> Result<TracingGuard, TracingError> {
        use tracing_subscriber::fmt;

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let provider = match self.otlp_endpoint.as_deref() {
            Some(endpoint) => Some(self.create_tracer_provider(endpoint)?),
            None => None,
        };
        let otel_layer = provider
            .as_ref()
            .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(TRACER_NAME)));

        let (text_layer, json_layer) = match (self.enable_stdout, self.format) {
            (false, _) => (None, None),
            (true, LogFormat::Text) => (Some(fmt::layer()), None),
            (true, LogFormat::Json) => (None, Some(fmt::layer().json())),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(otel_layer)
            .with(text_layer)
            .with(json_layer)
            .try_init()
            .map_err(|e| TracingError::InitError(e.to_string()))?;

        Ok(TracingGuard { provider })
    }

    fn create_tracer_provider(&self, endpoint: &str) -> Result<SdkTracerProvider, TracingError> {
        use opentelemetry_otlp::{Protocol, WithExportConfig};
        use opentelemetry_sdk::trace::{BatchConfig, BatchSpanProcessor, Sampler};

        let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .with_timeout(self.timeout)
            .with_protocol(Protocol::Grpc)
            .build()
            .map_err(|e| TracingError::InitError(e.to_string()))?;

        let batch_processor = BatchSpanProcessor::builder(otlp_exporter)
            .with_batch_config(BatchConfig::default())
            .build();

        let resource = opentelemetry_sdk::Resource::builder()
            .with_attributes(vec![
                opentelemetry::KeyValue::new("service.name", self.service_name.clone()),
                opentelemetry::KeyValue::new("service.version", self.service_version.clone()),
                opentelemetry::KeyValue::new("telemetry.sdk.name", "opentelemetry-rust"),
                opentelemetry::KeyValue::new("telemetry.sdk.language", "rust"),
            ])
            .build();

        Ok(SdkTracerProvider::builder()
            .with_span_processor(batch_processor)
            .with_resource(resource)
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
                1.0,
            ))))
            .build())
    }
}

/// Guard that holds tracer resources.
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
}

impl TracingGuard {
    /// Shutdown the tracer and flush any pending spans.
    pub fn shutdown(&self) {
        if let Some(ref provider) = self.provider {
            let _ = provider.shutdown();
        }
    }
}

/// Errors that can occur during tracing initialization.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Failed to initialize OpenTelemetry: {0}")]
    InitError(String),
}

/// Inject the current span context into request headers (W3C `traceparent`).
pub fn inject_trace_context(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    use opentelemetry::propagation::TextMapPropagator;
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use std::collections::HashMap;

    let propagator = TraceContextPropagator::new();
    let mut headers = HashMap::new();

    propagator.inject_context(&opentelemetry::Context::current(), &mut headers);

    headers
        .into_iter()
        .fold(builder, |builder, (key, value)| builder.header(key, value))
}
