//! Fetch-and-decode front end.
//!
//! Responsibilities:
//! - Turn references into [`DeferredResource`] handles without I/O.
//! - Evaluate handles: fetch through the [`Transport`], decode through the
//!   [`TypeRegistry`], resolve `#/<Collection>/<MemberId>` fragments.
//! - Expand collections (following `Members@odata.nextLink` pages) into
//!   ordered handles.
//!
//! Does NOT handle:
//! - Caching or request coalescing. Every evaluation fetches again.
//! - Timeouts and cancellation (owned by the transport).
//!
//! Invariants:
//! - Member order is the service's order across pages; duplicates are kept.
//! - Each collection page is fetched at most once per expansion.
//! - A missing or non-array `Members` is a decode error.
//! - A fragment read only fails on the parent's OEM block if the member
//!   itself cannot be found; the member carries no part of that block.

mod builder;
mod deferred;

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::links::{LinkTarget, resolve_fragment};
use crate::metrics::MetricsCollector;
use crate::models::{
    RedfishResource, Resource, ResourceCollection, ResourceSchema, ResourceVariant, ServiceRoot,
};
use crate::odata::ODataId;
use crate::registry::TypeRegistry;
use crate::transport::Transport;

pub use builder::ResourceReaderBuilder;
pub use deferred::{DeferredCollection, DeferredLink, DeferredResource, DeferredTarget};

/// Reads resources from a management service.
///
/// Cheap to clone; clones share the transport and registry.
#[derive(Debug, Clone)]
pub struct ResourceReader {
    transport: Arc<dyn Transport>,
    registry: Arc<TypeRegistry>,
    metrics: Option<MetricsCollector>,
    service_root: ODataId,
}

impl ResourceReader {
    pub fn builder() -> ResourceReaderBuilder {
        ResourceReaderBuilder::new()
    }

    /// Reader over `transport` with the given registry.
    pub fn new(transport: Arc<dyn Transport>, registry: Arc<TypeRegistry>) -> Self {
        Self {
            transport,
            registry,
            metrics: None,
            service_root: ODataId::service_root(),
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn service_root_id(&self) -> &ODataId {
        &self.service_root
    }

    /// Fetch and decode the service root.
    pub async fn service_root(&self) -> Result<ServiceRoot> {
        self.read_as::<ServiceRoot>(&self.service_root).await
    }

    /// Fetch and decode `uri`, resolving its fragment if it has one.
    #[tracing::instrument(skip_all, fields(uri = %uri))]
    pub async fn read(&self, uri: &ODataId) -> Result<Resource> {
        let document = uri.without_fragment();
        let body = self.transport.fetch(&document).await?;
        let resource = match (uri.fragment(), self.decode_payload(&document, &body)) {
            (_, Ok(resource)) => resource,
            (Some(_), Err(ClientError::OemDecode { error, resource })) => {
                debug!(%error, "Parent OEM block failed; resolving member from partial resource");
                *resource
            }
            (_, Err(err)) => return Err(err),
        };

        match uri.fragment() {
            None => Ok(resource),
            Some(fragment) => resolve_fragment(&resource, fragment).ok_or_else(|| {
                let err = ClientError::decode(
                    resource.kind().as_str(),
                    Some(uri.as_str()),
                    format!("no embedded member matches #{fragment}"),
                );
                self.record_failure(&document, &err);
                err
            }),
        }
    }

    /// Like [`read`](Self::read), but require a specific resource type.
    pub async fn read_as<T>(&self, uri: &ODataId) -> Result<T>
    where
        T: ResourceSchema + ResourceVariant,
    {
        self.read(uri).await?.into_variant::<T>().map_err(|other| {
            ClientError::decode(
                T::KIND.as_str(),
                Some(uri.as_str()),
                format!("expected {}, found {}", T::KIND, other.kind()),
            )
        })
    }

    /// Decode a fetched document. A missing `@odata.id` is filled in from `uri`
    /// so embedded members can derive their own ids.
    pub fn decode_payload(&self, uri: &ODataId, body: &[u8]) -> Result<Resource> {
        let result = serde_json::from_slice::<Value>(body)
            .map_err(|e| ClientError::decode("resource", Some(uri.as_str()), e))
            .and_then(|mut payload| {
                match payload.as_object_mut() {
                    Some(object) => {
                        object
                            .entry("@odata.id")
                            .or_insert_with(|| Value::String(uri.as_str().to_string()));
                    }
                    None => {
                        return Err(ClientError::decode(
                            "resource",
                            Some(uri.as_str()),
                            "document is not a JSON object",
                        ));
                    }
                }
                self.registry.decode(payload)
            });

        match &result {
            Ok(resource) => {
                debug!(kind = resource.kind().as_str(), "Decoded resource");
                if let Some(m) = &self.metrics {
                    m.record_unrecognized_oem(
                        resource.kind().as_str(),
                        resource.oem().unrecognized_count(),
                    );
                }
            }
            Err(err) => self.record_failure(uri, err),
        }
        result
    }

    /// Deferred handle for `uri`. No I/O happens until it is evaluated.
    pub fn to_supplier(&self, uri: ODataId) -> DeferredResource {
        DeferredResource::new(self.clone(), uri)
    }

    /// Deferred handles for `uris`, in order.
    pub fn to_suppliers(&self, uris: impl IntoIterator<Item = ODataId>) -> Vec<DeferredResource> {
        uris.into_iter().map(|uri| self.to_supplier(uri)).collect()
    }

    /// Deferred handle for the members of a collection.
    pub fn to_collection(&self, uri: ODataId) -> DeferredCollection {
        DeferredCollection::new(self.clone(), uri)
    }

    /// Fetch the collection at `uri` and return one handle per member.
    #[tracing::instrument(skip_all, fields(uri = %uri))]
    pub async fn expand_members(&self, uri: &ODataId) -> Result<Vec<DeferredResource>> {
        let mut members = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(uri.without_fragment());

        while let Some(page_uri) = next.take() {
            if !visited.insert(page_uri.clone()) {
                warn!(page = %page_uri, "Collection paging loops back, stopping");
                break;
            }

            let body = self.transport.fetch(&page_uri).await?;
            let page = serde_json::from_slice::<ResourceCollection>(&body).map_err(|e| {
                let err = ClientError::decode("ResourceCollection", Some(page_uri.as_str()), e);
                self.record_failure(&page_uri, &err);
                err
            })?;

            debug!(
                page = %page_uri,
                members = page.members.len(),
                has_next = page.next_link.is_some(),
                "Expanded collection page"
            );
            members.extend(self.to_suppliers(page.member_ids()));
            next = page.next_link.filter(|link| !link.is_empty());
        }

        Ok(members)
    }

    /// Deferred handles for every named outgoing reference of `resource`.
    pub fn deferred_links(&self, resource: &dyn RedfishResource) -> Vec<DeferredLink> {
        resource
            .links()
            .into_iter()
            .map(|link| DeferredLink {
                name: link.name,
                target: match link.target {
                    LinkTarget::Single(uri) => DeferredTarget::Single(self.to_supplier(uri)),
                    LinkTarget::Multiple(uris) => {
                        DeferredTarget::Multiple(self.to_suppliers(uris))
                    }
                    LinkTarget::Collection(uri) => {
                        DeferredTarget::Collection(self.to_collection(uri))
                    }
                },
            })
            .collect()
    }

    fn record_failure(&self, uri: &ODataId, err: &ClientError) {
        if let Some(m) = &self.metrics {
            m.record_client_error(uri.path(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fan, ResourceKind, Thermal, decode_resource};
    use crate::oem::{OemAttachment, OemDecodeError};
    use crate::registry::Schema;
    use crate::testing::InMemoryTransport;
    use serde_json::json;

    fn reader(transport: InMemoryTransport) -> ResourceReader {
        ResourceReader::new(
            Arc::new(transport),
            Arc::new(TypeRegistry::standard().unwrap()),
        )
    }

    #[test]
    fn test_reader_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<ResourceReader>();
        assert_send_sync::<DeferredResource>();
    }

    #[test]
    fn test_decode_payload_fills_missing_id() {
        let reader = reader(InMemoryTransport::new());
        let body = json!({"@odata.type": "#Chassis.v1_2_0.Chassis", "Id": "1"}).to_string();
        let resource = reader
            .decode_payload(&ODataId::new("/redfish/v1/Chassis/1"), body.as_bytes())
            .unwrap();
        assert_eq!(resource.odata_id().as_str(), "/redfish/v1/Chassis/1");
    }

    #[test]
    fn test_decode_payload_rejects_non_objects() {
        let reader = reader(InMemoryTransport::new());
        let err = reader
            .decode_payload(&ODataId::new("/redfish/v1/Chassis/1"), b"[1, 2]")
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }

    fn thermal_with_broken_oem(payload: Value) -> Result<Resource> {
        let resource = decode_resource::<Thermal>(payload)?;
        Err(ClientError::OemDecode {
            error: OemDecodeError {
                namespace: "Contoso".to_string(),
                attachment: OemAttachment::TopLevel,
                reason: "unexpected shape".to_string(),
            },
            resource: Box::new(resource),
        })
    }

    #[tokio::test]
    async fn test_fragment_read_survives_parent_oem_failure() {
        let mut registry = TypeRegistry::new();
        registry
            .register(
                Schema::custom(ResourceKind::Thermal, thermal_with_broken_oem),
                &["#Thermal.{ver}.Thermal"],
            )
            .unwrap();
        let transport = InMemoryTransport::new().with_document(
            "/redfish/v1/Chassis/1/Thermal",
            json!({
                "@odata.type": "#Thermal.v1_1_0.Thermal",
                "Fans": [{"MemberId": "0", "Name": "Fan 0"}],
                "Oem": {"Contoso": {"Vendor": 1}}
            }),
        );
        let reader = ResourceReader::new(Arc::new(transport), Arc::new(registry));

        let fan = reader
            .read_as::<Fan>(&ODataId::new("/redfish/v1/Chassis/1/Thermal#/Fans/0"))
            .await
            .unwrap();
        assert_eq!(fan.name.get().map(String::as_str), Ok("Fan 0"));

        let err = reader
            .read(&ODataId::new("/redfish/v1/Chassis/1/Thermal"))
            .await
            .unwrap_err();
        let partial = err.into_partial_resource().expect("partial thermal");
        assert_eq!(partial.kind(), ResourceKind::Thermal);

        let err = reader
            .read(&ODataId::new("/redfish/v1/Chassis/1/Thermal#/Fans/9"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_to_supplier_does_no_io() {
        let transport = Arc::new(InMemoryTransport::new());
        let reader = ResourceReader::new(
            transport.clone(),
            Arc::new(TypeRegistry::standard().unwrap()),
        );
        let deferred = reader.to_supplier(ODataId::new("/redfish/v1/Chassis/1"));
        assert_eq!(deferred.uri().as_str(), "/redfish/v1/Chassis/1");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_paging_loop_is_cut() {
        let transport = InMemoryTransport::new().with_document(
            "/redfish/v1/Systems",
            json!({
                "Members": [{"@odata.id": "/redfish/v1/Systems/1"}],
                "Members@odata.nextLink": "/redfish/v1/Systems"
            }),
        );
        let members = reader(transport)
            .expand_members(&ODataId::new("/redfish/v1/Systems"))
            .await
            .unwrap();
        assert_eq!(members.len(), 1);
    }
}
