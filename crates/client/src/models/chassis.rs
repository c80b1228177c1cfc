//! Chassis: racks, drawers, sleds and enclosures.

use serde::Deserialize;

use super::common::{ChassisType, IndicatorLed, PowerState, Status};
use super::{RedfishResource, ResourceKind, ResourceSchema};
use crate::links::{LinkSet, ResourceLink, to_reference, to_references};
use crate::odata::{Link, ODataId};
use crate::oem::rackscale::{self, ChassisLinksOem, ChassisOem, DrawerChassisOem, RackChassisOem};
use crate::oem::{OemBindings, OemSlots};
use crate::optional::Ref;
use crate::serde_helpers::{null_as_default, unassigned_when_null};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Chassis {
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
    #[serde(rename = "ChassisType", default, deserialize_with = "unassigned_when_null")]
    pub chassis_type: Ref<ChassisType>,
    #[serde(rename = "Manufacturer", default, deserialize_with = "unassigned_when_null")]
    pub manufacturer: Ref<String>,
    #[serde(rename = "Model", default, deserialize_with = "unassigned_when_null")]
    pub model: Ref<String>,
    #[serde(rename = "SKU", default, deserialize_with = "unassigned_when_null")]
    pub sku: Ref<String>,
    #[serde(rename = "SerialNumber", default, deserialize_with = "unassigned_when_null")]
    pub serial_number: Ref<String>,
    #[serde(rename = "PartNumber", default, deserialize_with = "unassigned_when_null")]
    pub part_number: Ref<String>,
    /// Writable; an explicit `null` means the tag was cleared.
    #[serde(rename = "AssetTag", default)]
    pub asset_tag: Ref<Option<String>>,
    #[serde(rename = "IndicatorLED", default, deserialize_with = "unassigned_when_null")]
    pub indicator_led: Ref<IndicatorLed>,
    #[serde(rename = "PowerState", default, deserialize_with = "unassigned_when_null")]
    pub power_state: Ref<PowerState>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
    #[serde(rename = "Thermal", default)]
    pub thermal: Option<Link>,
    #[serde(rename = "Power", default)]
    pub power: Option<Link>,
    #[serde(rename = "Links", default, deserialize_with = "null_as_default")]
    pub links: ChassisLinks,
    #[serde(skip)]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChassisLinks {
    #[serde(rename = "Contains", default)]
    pub contains: Option<Vec<Link>>,
    #[serde(rename = "ContainedBy", default)]
    pub contained_by: Option<Link>,
    #[serde(rename = "ComputerSystems", default)]
    pub computer_systems: Option<Vec<Link>>,
    #[serde(rename = "ManagedBy", default)]
    pub managed_by: Option<Vec<Link>>,
    #[serde(rename = "ManagersInChassis", default)]
    pub managers_in_chassis: Option<Vec<Link>>,
    #[serde(rename = "PoweredBy", default)]
    pub powered_by: Option<Vec<Link>>,
    #[serde(rename = "CooledBy", default)]
    pub cooled_by: Option<Vec<Link>>,
    #[serde(rename = "Drives", default)]
    pub drives: Option<Vec<Link>>,
    #[serde(rename = "Storage", default)]
    pub storage: Option<Vec<Link>>,
}

impl Chassis {
    /// Rack attributes, when the chassis reports itself as a rack.
    pub fn rack_attributes(&self) -> Option<&RackChassisOem> {
        self.oem.top_level.get::<RackChassisOem>()
    }

    /// Location identifier from whichever vendor shape the chassis uses.
    pub fn location_id(&self) -> Ref<&str> {
        let oem = &self.oem.top_level;
        if let Some(rack) = oem.get::<RackChassisOem>() {
            return rack
                .location
                .as_ref()
                .and_then(|l| l.id.as_ref())
                .map(String::as_str);
        }
        if let Some(drawer) = oem.get::<DrawerChassisOem>() {
            return drawer.location_id.as_ref().map(String::as_str);
        }
        oem.get::<ChassisOem>()
            .map_or(Ref::Unassigned, ChassisOem::location_id)
    }

    /// Location of the parent chassis, as reported by the vendor extension.
    pub fn location_parent_id(&self) -> Ref<&str> {
        let oem = &self.oem.top_level;
        if let Some(rack) = oem.get::<RackChassisOem>() {
            return rack
                .location
                .as_ref()
                .and_then(|l| l.parent_id.as_ref())
                .map(String::as_str);
        }
        oem.get::<ChassisOem>()
            .map_or(Ref::Unassigned, ChassisOem::parent_id)
    }

    fn links_oem(&self) -> Option<&ChassisLinksOem> {
        self.oem.links.get::<ChassisLinksOem>()
    }

    /// Parent chassis. Falls back to the vendor link block when the standard
    /// `Links.ContainedBy` is missing.
    pub fn contained_by(&self) -> Option<ODataId> {
        to_reference(self.links.contained_by.as_ref())
            .or_else(|| self.links_oem().and_then(|o| to_reference(o.contained_by.as_ref())))
    }

    pub fn contains(&self) -> Vec<ODataId> {
        to_references(self.links.contains.as_deref())
    }

    pub fn computer_systems(&self) -> Vec<ODataId> {
        to_references(self.links.computer_systems.as_deref())
    }

    pub fn switches(&self) -> Vec<ODataId> {
        to_references(self.links_oem().and_then(|o| o.switches.as_deref()))
    }

    pub fn drives(&self) -> Vec<ODataId> {
        to_references(self.links.drives.as_deref())
    }

    pub fn thermal(&self) -> Option<ODataId> {
        to_reference(self.thermal.as_ref())
    }

    pub fn power(&self) -> Option<ODataId> {
        to_reference(self.power.as_ref())
    }
}

impl RedfishResource for Chassis {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        let links = &self.links;
        let oem_links = self.links_oem();
        LinkSet::new()
            .single("thermal", self.thermal.as_ref())
            .single("power", self.power.as_ref())
            .multiple("containsChassis", links.contains.as_deref())
            .single(
                "containedBy",
                links
                    .contained_by
                    .as_ref()
                    .or_else(|| oem_links.and_then(|o| o.contained_by.as_ref())),
            )
            .multiple("computerSystems", links.computer_systems.as_deref())
            .multiple("managedBy", links.managed_by.as_deref())
            .multiple("managersInChassis", links.managers_in_chassis.as_deref())
            .multiple("poweredBy", links.powered_by.as_deref())
            .multiple("cooledBy", links.cooled_by.as_deref())
            .multiple("drives", links.drives.as_deref())
            .multiple("storage", links.storage.as_deref())
            .multiple("containsSwitches", oem_links.and_then(|o| o.switches.as_deref()))
            .build()
    }
}

impl ResourceSchema for Chassis {
    const KIND: ResourceKind = ResourceKind::Chassis;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Chassis.{ver}.Chassis"];
    const OEM: OemBindings = OemBindings {
        top_level: &[rackscale::CHASSIS],
        links: &[rackscale::CHASSIS_LINKS],
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

    fn decode(payload: serde_json::Value) -> Chassis {
        decode_resource::<Chassis>(payload)
            .unwrap()
            .into_variant::<Chassis>()
            .unwrap()
    }

    #[test]
    fn test_null_status_is_unassigned() {
        let chassis = decode(json!({
            "@odata.type": "#Chassis.v1_2_0.Chassis",
            "ChassisType": "Rack",
            "Status": null
        }));
        assert!(chassis.status.is_unassigned());
        assert_eq!(chassis.chassis_type, Ref::of(ChassisType::Rack));
    }

    #[test]
    fn test_asset_tag_keeps_explicit_null() {
        let cleared = decode(json!({"AssetTag": null}));
        assert_eq!(cleared.asset_tag, Ref::Assigned(None));

        let absent = decode(json!({}));
        assert!(absent.asset_tag.is_unassigned());
    }

    #[test]
    fn test_location_id_from_drawer_variant() {
        let chassis = decode(json!({
            "ChassisType": "Drawer",
            "Oem": {"Intel_RackScale": {"LocationId": "7"}}
        }));
        assert_eq!(chassis.location_id(), Ref::of("7"));
        assert!(chassis.rack_attributes().is_none());
    }

    #[test]
    fn test_null_links_block_is_empty() {
        let chassis = decode(json!({
            "@odata.type": "#Chassis.v1_2_0.Chassis",
            "ChassisType": "Rack",
            "Links": null
        }));
        assert!(chassis.contained_by().is_none());
        assert!(chassis.contains().is_empty());
        assert!(chassis.computer_systems().is_empty());
    }

    #[test]
    fn test_contained_by_falls_back_to_oem_link() {
        let chassis = decode(json!({
            "Links": {
                "Oem": {"Intel_RackScale": {"ContainedBy": {"@odata.id": "/redfish/v1/Chassis/Rack1"}}}
            }
        }));
        assert_eq!(chassis.contained_by(), Some(ODataId::new("/redfish/v1/Chassis/Rack1")));
    }

    #[test]
    fn test_links_are_named() {
        let chassis = decode(json!({
            "Thermal": {"@odata.id": "/redfish/v1/Chassis/1/Thermal"},
            "Links": {"Contains": [{"@odata.id": "/redfish/v1/Chassis/2"}]}
        }));
        let names: Vec<&str> = chassis.links().iter().map(|l| l.name).collect();
        assert_eq!(names[0], "thermal");
        assert!(names.contains(&"containsChassis"));
        assert!(!names.contains(&"power"));
    }
}
