//! Ethernet switches and their ports.

use serde::Deserialize;

use super::common::Status;
use super::{RedfishResource, ResourceKind, ResourceSchema};
use crate::links::{LinkSet, ResourceLink, to_reference};
use crate::odata::{Link, ODataId};
use crate::oem::OemSlots;
use crate::optional::Ref;
use crate::serde_helpers::{null_as_default, unassigned_when_null};

redfish_enum!(
    LinkState {
        Up => "Up",
        Down => "Down",
    }
);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EthernetSwitch {
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
    #[serde(rename = "SwitchId", default, deserialize_with = "unassigned_when_null")]
    pub switch_id: Ref<String>,
    #[serde(rename = "Manufacturer", default, deserialize_with = "unassigned_when_null")]
    pub manufacturer: Ref<String>,
    #[serde(rename = "Model", default, deserialize_with = "unassigned_when_null")]
    pub model: Ref<String>,
    #[serde(rename = "ManufacturingDate", default, deserialize_with = "unassigned_when_null")]
    pub manufacturing_date: Ref<String>,
    #[serde(rename = "SerialNumber", default, deserialize_with = "unassigned_when_null")]
    pub serial_number: Ref<String>,
    #[serde(rename = "PartNumber", default, deserialize_with = "unassigned_when_null")]
    pub part_number: Ref<String>,
    #[serde(rename = "FirmwareName", default, deserialize_with = "unassigned_when_null")]
    pub firmware_name: Ref<String>,
    #[serde(rename = "FirmwareVersion", default, deserialize_with = "unassigned_when_null")]
    pub firmware_version: Ref<String>,
    #[serde(rename = "Role", default, deserialize_with = "unassigned_when_null")]
    pub role: Ref<String>,
    #[serde(rename = "MaxACLNumber", default, deserialize_with = "unassigned_when_null")]
    pub max_acl_number: Ref<u32>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
    #[serde(rename = "Ports", default)]
    pub ports: Option<Link>,
    #[serde(rename = "ACLs", default)]
    pub acls: Option<Link>,
    #[serde(rename = "Links", default, deserialize_with = "null_as_default")]
    pub links: EthernetSwitchLinks,
    #[serde(skip)]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EthernetSwitchLinks {
    #[serde(rename = "Chassis", default)]
    pub chassis: Option<Link>,
    #[serde(rename = "ManagedBy", default)]
    pub managed_by: Option<Vec<Link>>,
}

impl EthernetSwitch {
    pub fn ports(&self) -> Option<ODataId> {
        to_reference(self.ports.as_ref())
    }
}

impl RedfishResource for EthernetSwitch {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new()
            .collection("ports", self.ports.as_ref())
            .collection("acls", self.acls.as_ref())
            .single("chassis", self.links.chassis.as_ref())
            .multiple("managedBy", self.links.managed_by.as_deref())
            .build()
    }
}

impl ResourceSchema for EthernetSwitch {
    const KIND: ResourceKind = ResourceKind::EthernetSwitch;
    const TYPE_PATTERNS: &'static [&'static str] = &["#EthernetSwitch.{ver}.EthernetSwitch"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NeighborInfo {
    #[serde(rename = "SwitchId", default, deserialize_with = "unassigned_when_null")]
    pub switch_id: Ref<String>,
    #[serde(rename = "PortId", default, deserialize_with = "unassigned_when_null")]
    pub port_id: Ref<String>,
    #[serde(rename = "CableId", default, deserialize_with = "unassigned_when_null")]
    pub cable_id: Ref<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EthernetSwitchPort {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: ODataId,
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(rename = "Id", default, deserialize_with = "unassigned_when_null")]
    pub id: Ref<String>,
    #[serde(rename = "Name", default, deserialize_with = "unassigned_when_null")]
    pub name: Ref<String>,
    #[serde(rename = "PortId", default, deserialize_with = "unassigned_when_null")]
    pub port_id: Ref<String>,
    #[serde(rename = "LinkType", default, deserialize_with = "unassigned_when_null")]
    pub link_type: Ref<String>,
    #[serde(rename = "OperationalState", default, deserialize_with = "unassigned_when_null")]
    pub operational_state: Ref<LinkState>,
    #[serde(rename = "AdministrativeState", default, deserialize_with = "unassigned_when_null")]
    pub administrative_state: Ref<LinkState>,
    #[serde(rename = "LinkSpeedMbps", default, deserialize_with = "unassigned_when_null")]
    pub link_speed_mbps: Ref<u64>,
    #[serde(rename = "NeighborInfo", default, deserialize_with = "unassigned_when_null")]
    pub neighbor_info: Ref<NeighborInfo>,
    #[serde(rename = "NeighborMAC", default, deserialize_with = "unassigned_when_null")]
    pub neighbor_mac: Ref<String>,
    #[serde(rename = "FrameSize", default, deserialize_with = "unassigned_when_null")]
    pub frame_size: Ref<u32>,
    #[serde(rename = "Autosense", default, deserialize_with = "unassigned_when_null")]
    pub autosense: Ref<bool>,
    #[serde(rename = "FullDuplex", default, deserialize_with = "unassigned_when_null")]
    pub full_duplex: Ref<bool>,
    #[serde(rename = "MACAddress", default, deserialize_with = "unassigned_when_null")]
    pub mac_address: Ref<String>,
    #[serde(rename = "PortClass", default, deserialize_with = "unassigned_when_null")]
    pub port_class: Ref<String>,
    #[serde(rename = "PortMode", default, deserialize_with = "unassigned_when_null")]
    pub port_mode: Ref<String>,
    #[serde(rename = "PortType", default, deserialize_with = "unassigned_when_null")]
    pub port_type: Ref<String>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
    #[serde(rename = "VLANs", default)]
    pub vlans: Option<Link>,
    #[serde(rename = "StaticMACs", default)]
    pub static_macs: Option<Link>,
    #[serde(rename = "Links", default, deserialize_with = "null_as_default")]
    pub links: EthernetSwitchPortLinks,
    #[serde(skip)]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EthernetSwitchPortLinks {
    #[serde(rename = "PrimaryVLAN", default)]
    pub primary_vlan: Option<Link>,
    #[serde(rename = "Switch", default)]
    pub switch: Option<Link>,
    #[serde(rename = "MemberOfPort", default)]
    pub member_of_port: Option<Link>,
    #[serde(rename = "PortMembers", default)]
    pub port_members: Option<Vec<Link>>,
    #[serde(rename = "ActiveACLs", default)]
    pub active_acls: Option<Vec<Link>>,
}

impl RedfishResource for EthernetSwitchPort {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        let links = &self.links;
        LinkSet::new()
            .collection("vlans", self.vlans.as_ref())
            .collection("staticMacs", self.static_macs.as_ref())
            .single("primaryVlan", links.primary_vlan.as_ref())
            .single("switch", links.switch.as_ref())
            .single("memberOfPort", links.member_of_port.as_ref())
            .multiple("portMembers", links.port_members.as_deref())
            .multiple("activeAcls", links.active_acls.as_deref())
            .build()
    }
}

impl ResourceSchema for EthernetSwitchPort {
    const KIND: ResourceKind = ResourceKind::EthernetSwitchPort;
    const TYPE_PATTERNS: &'static [&'static str] = &["#EthernetSwitchPort.{ver}.EthernetSwitchPort"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}
