//! Fabric switch ports.

use serde::Deserialize;

use super::common::{Protocol, Status};
use super::{RedfishResource, ResourceKind, ResourceSchema};
use crate::links::{LinkSet, ResourceLink};
use crate::odata::{Link, ODataId};
use crate::oem::OemSlots;
use crate::optional::Ref;
use crate::serde_helpers::{null_as_default, unassigned_when_null};

redfish_enum!(
    PortType {
        UpstreamPort => "UpstreamPort",
        DownstreamPort => "DownstreamPort",
        InterswitchPort => "InterswitchPort",
        ManagementPort => "ManagementPort",
        BidirectionalPort => "BidirectionalPort",
        UnconfiguredPort => "UnconfiguredPort",
    }
);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Port {
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
    #[serde(rename = "PortId", default, deserialize_with = "unassigned_when_null")]
    pub port_id: Ref<String>,
    #[serde(rename = "PortProtocol", default, deserialize_with = "unassigned_when_null")]
    pub port_protocol: Ref<Protocol>,
    #[serde(rename = "PortType", default, deserialize_with = "unassigned_when_null")]
    pub port_type: Ref<PortType>,
    #[serde(rename = "CurrentSpeedGbps", default, deserialize_with = "unassigned_when_null")]
    pub current_speed_gbps: Ref<f64>,
    #[serde(rename = "MaxSpeedGbps", default, deserialize_with = "unassigned_when_null")]
    pub max_speed_gbps: Ref<f64>,
    #[serde(rename = "Width", default, deserialize_with = "unassigned_when_null")]
    pub width: Ref<u32>,
    #[serde(rename = "Links", default, deserialize_with = "null_as_default")]
    pub links: PortLinks,
    #[serde(skip)]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PortLinks {
    #[serde(rename = "AssociatedEndpoints", default)]
    pub associated_endpoints: Option<Vec<Link>>,
    #[serde(rename = "ConnectedSwitches", default)]
    pub connected_switches: Option<Vec<Link>>,
    #[serde(rename = "ConnectedSwitchPorts", default)]
    pub connected_switch_ports: Option<Vec<Link>>,
}

impl RedfishResource for Port {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        let links = &self.links;
        LinkSet::new()
            .multiple("associatedEndpoints", links.associated_endpoints.as_deref())
            .multiple("connectedSwitches", links.connected_switches.as_deref())
            .multiple("connectedSwitchPorts", links.connected_switch_ports.as_deref())
            .build()
    }
}

impl ResourceSchema for Port {
    const KIND: ResourceKind = ResourceKind::Port;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Port.{ver}.Port"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}
