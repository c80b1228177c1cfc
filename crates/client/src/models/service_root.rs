//! Service root (`/redfish/v1`).

use serde::Deserialize;

use super::{RedfishResource, ResourceKind, ResourceSchema};
use crate::links::{LinkSet, ResourceLink, to_reference};
use crate::odata::{Link, ODataId};
use crate::oem::OemSlots;
use crate::optional::Ref;
use crate::serde_helpers::unassigned_when_null;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceRoot {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: ODataId,
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(rename = "Id", default, deserialize_with = "unassigned_when_null")]
    pub id: Ref<String>,
    #[serde(rename = "Name", default, deserialize_with = "unassigned_when_null")]
    pub name: Ref<String>,
    #[serde(rename = "RedfishVersion", default, deserialize_with = "unassigned_when_null")]
    pub redfish_version: Ref<String>,
    #[serde(rename = "UUID", default, deserialize_with = "unassigned_when_null")]
    pub uuid: Ref<String>,
    #[serde(rename = "Systems", default)]
    pub systems: Option<Link>,
    #[serde(rename = "Chassis", default)]
    pub chassis: Option<Link>,
    #[serde(rename = "Managers", default)]
    pub managers: Option<Link>,
    #[serde(rename = "Fabrics", default)]
    pub fabrics: Option<Link>,
    #[serde(rename = "EthernetSwitches", default)]
    pub ethernet_switches: Option<Link>,
    #[serde(rename = "StorageServices", default)]
    pub storage_services: Option<Link>,
    #[serde(rename = "Services", default)]
    pub services: Option<Link>,
    #[serde(skip)]
    pub oem: OemSlots,
}

impl ServiceRoot {
    pub fn systems(&self) -> Option<ODataId> {
        to_reference(self.systems.as_ref())
    }

    pub fn chassis(&self) -> Option<ODataId> {
        to_reference(self.chassis.as_ref())
    }
}

impl RedfishResource for ServiceRoot {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new()
            .collection("systems", self.systems.as_ref())
            .collection("chassis", self.chassis.as_ref())
            .collection("managers", self.managers.as_ref())
            .collection("fabrics", self.fabrics.as_ref())
            .collection("ethernetSwitches", self.ethernet_switches.as_ref())
            .collection("storageServices", self.storage_services.as_ref())
            .collection("services", self.services.as_ref())
            .build()
    }
}

impl ResourceSchema for ServiceRoot {
    const KIND: ResourceKind = ResourceKind::ServiceRoot;
    const TYPE_PATTERNS: &'static [&'static str] = &["#ServiceRoot.{ver}.ServiceRoot"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}
