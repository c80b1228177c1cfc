//! Builder for [`ResourceReader`].
//!
//! Responsibilities:
//! - Assemble transport, registry and metrics into a reader.
//! - Build an HTTP transport from a loaded configuration.
//!
//! Invariants:
//! - The registry defaults to [`TypeRegistry::standard`].
//! - A transport is required; `build` fails without one.

use std::sync::Arc;

use rackscale_config::Config;

use super::ResourceReader;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::odata::ODataId;
use crate::registry::TypeRegistry;
use crate::transport::{HttpTransport, Transport};

#[derive(Debug, Default)]
pub struct ResourceReaderBuilder {
    transport: Option<Arc<dyn Transport>>,
    registry: Option<Arc<TypeRegistry>>,
    metrics: Option<MetricsCollector>,
    service_root: Option<ODataId>,
}

impl ResourceReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom registry, e.g. one with vendor schemas registered ahead
    /// of the built-ins.
    pub fn registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn metrics(mut self, collector: MetricsCollector) -> Self {
        self.metrics = Some(collector);
        self
    }

    pub fn service_root(mut self, uri: impl AsRef<str>) -> Self {
        self.service_root = Some(ODataId::new(uri));
        self
    }

    /// Build an [`HttpTransport`] from `config` and take its service root.
    pub fn from_config(mut self, config: &Config) -> Result<Self> {
        let mut http = HttpTransport::builder().from_config(config);
        if let Some(collector) = &self.metrics {
            http = http.metrics(collector.clone());
        }
        self.transport = Some(Arc::new(http.build()?));
        self.service_root = Some(ODataId::new(&config.connection.service_root));
        Ok(self)
    }

    pub fn build(self) -> Result<ResourceReader> {
        let transport = self.transport.ok_or_else(|| {
            ClientError::InvalidUrl(
                "no transport configured; call transport() or from_config()".to_string(),
            )
        })?;
        let registry = match self.registry {
            Some(registry) => registry,
            None => Arc::new(TypeRegistry::standard()?),
        };

        Ok(ResourceReader {
            transport,
            registry,
            metrics: self.metrics,
            service_root: self.service_root.unwrap_or_else(ODataId::service_root),
        })
    }
}
