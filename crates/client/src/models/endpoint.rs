//! Fabric endpoints.

use serde::Deserialize;

use super::common::{Identifier, Protocol, Status};
use super::{RedfishResource, ResourceKind, ResourceSchema};
use crate::links::{LinkSet, ResourceLink, to_references};
use crate::odata::{Link, ODataId};
use crate::oem::rackscale::{self, EndpointOem};
use crate::oem::{OemBindings, OemSlots};
use crate::optional::Ref;
use crate::serde_helpers::{
    null_as_default, ref_u64_from_string_or_number, unassigned_when_null,
    unassigned_when_null_or_empty,
};

redfish_enum!(
    EntityRole {
        Initiator => "Initiator",
        Target => "Target",
        Both => "Both",
    }
);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Endpoint {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: ODataId,
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(rename = "Id", default, deserialize_with = "unassigned_when_null")]
    pub id: Ref<String>,
    #[serde(rename = "Name", default, deserialize_with = "unassigned_when_null")]
    pub name: Ref<String>,
    #[serde(rename = "Description", default, deserialize_with = "unassigned_when_null")]
    pub description: Ref<String>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
    #[serde(rename = "EndpointProtocol", default, deserialize_with = "unassigned_when_null")]
    pub endpoint_protocol: Ref<Protocol>,
    #[serde(rename = "Identifiers", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub identifiers: Ref<Vec<Identifier>>,
    #[serde(rename = "ConnectedEntities", default)]
    pub connected_entities: Option<Vec<ConnectedEntity>>,
    #[serde(
        rename = "HostReservationMemoryBytes",
        default,
        deserialize_with = "ref_u64_from_string_or_number"
    )]
    pub host_reservation_memory_bytes: Ref<u64>,
    #[serde(rename = "IPTransportDetails", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub ip_transport_details: Ref<Vec<IpTransportDetails>>,
    #[serde(rename = "Links", default, deserialize_with = "null_as_default")]
    pub links: EndpointLinks,
    #[serde(skip)]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConnectedEntity {
    #[serde(rename = "EntityType", default, deserialize_with = "unassigned_when_null")]
    pub entity_type: Ref<String>,
    #[serde(rename = "EntityRole", default, deserialize_with = "unassigned_when_null")]
    pub entity_role: Ref<EntityRole>,
    #[serde(rename = "EntityLink", default)]
    pub entity_link: Option<Link>,
    #[serde(rename = "Identifiers", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub identifiers: Ref<Vec<Identifier>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IpAddress {
    #[serde(rename = "Address", default, deserialize_with = "unassigned_when_null")]
    pub address: Ref<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IpTransportDetails {
    #[serde(rename = "TransportProtocol", default, deserialize_with = "unassigned_when_null")]
    pub transport_protocol: Ref<Protocol>,
    #[serde(rename = "IPv4Address", default, deserialize_with = "unassigned_when_null")]
    pub ipv4_address: Ref<IpAddress>,
    #[serde(rename = "IPv6Address", default, deserialize_with = "unassigned_when_null")]
    pub ipv6_address: Ref<IpAddress>,
    #[serde(rename = "Port", default, deserialize_with = "unassigned_when_null")]
    pub port: Ref<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EndpointLinks {
    #[serde(rename = "Ports", default)]
    pub ports: Option<Vec<Link>>,
    #[serde(rename = "MutuallyExclusiveEndpoints", default)]
    pub mutually_exclusive_endpoints: Option<Vec<Link>>,
}

impl Endpoint {
    pub fn rackscale(&self) -> Option<&EndpointOem> {
        self.oem.top_level.get::<EndpointOem>()
    }

    /// Resources on the other side of this endpoint, in payload order.
    pub fn connected_entity_links(&self) -> Vec<ODataId> {
        self.connected_entities
            .iter()
            .flatten()
            .filter_map(|e| e.entity_link.as_ref())
            .map(|l| l.odata_id.clone())
            .collect()
    }

    pub fn ports(&self) -> Vec<ODataId> {
        to_references(self.links.ports.as_deref())
    }
}

impl RedfishResource for Endpoint {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new()
            .multiple("ports", self.links.ports.as_deref())
            .multiple(
                "mutuallyExclusiveEndpoints",
                self.links.mutually_exclusive_endpoints.as_deref(),
            )
            .references("connectedEntities", self.connected_entity_links())
            .build()
    }
}

impl ResourceSchema for Endpoint {
    const KIND: ResourceKind = ResourceKind::Endpoint;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Endpoint.{ver}.Endpoint"];
    const OEM: OemBindings = OemBindings {
        top_level: &[rackscale::ENDPOINT],
        links: &[],
        actions: &[],
    };

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::decode_resource;
    use serde_json::json;

    #[test]
    fn test_connected_entities_and_transport() {
        let endpoint = decode_resource::<Endpoint>(json!({
            "@odata.id": "/redfish/v1/Fabrics/NVMeoE/Endpoints/1",
            "EndpointProtocol": "NVMeOverFabrics",
            "ConnectedEntities": [
                {"EntityRole": "Target", "EntityLink": {"@odata.id": "/redfish/v1/StorageServices/1/Volumes/1"}},
                {"EntityRole": "Target", "EntityLink": null}
            ],
            "IPTransportDetails": [
                {"TransportProtocol": "RoCEv2", "IPv4Address": {"Address": "10.0.0.5"}, "Port": 4420}
            ],
            "Oem": {"Intel_RackScale": {"Authentication": {"Username": "admin"}}}
        }))
        .unwrap()
        .into_variant::<Endpoint>()
        .unwrap();

        assert_eq!(endpoint.endpoint_protocol, Ref::of(Protocol::NvmeOverFabrics));
        assert_eq!(
            endpoint.connected_entity_links(),
            vec![ODataId::new("/redfish/v1/StorageServices/1/Volumes/1")]
        );
        let transport = endpoint.ip_transport_details.get().unwrap();
        assert_eq!(transport[0].port, Ref::of(4420));

        let auth = endpoint.rackscale().unwrap().authentication.get().unwrap();
        assert_eq!(auth.username, Ref::of("admin".to_string()));
    }
}
