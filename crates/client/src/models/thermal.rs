//! Thermal subsystem of a chassis.
//!
//! `Thermal` embeds its temperature sensors, fans and redundancy groups. Each
//! entry is a resource of its own, addressed as
//! `<thermal uri>#/<Collection>/<MemberId>`.

use serde::Deserialize;

use super::common::{PhysicalContext, Status};
use super::{RedfishResource, Resource, ResourceKind, ResourceSchema};
use crate::links::{LinkSet, ResourceLink, assign_member_ids, find_member};
use crate::odata::{Link, ODataId};
use crate::oem::{OemSlots, opaque_slots};
use crate::optional::Ref;
use crate::serde_helpers::{member_id, unassigned_when_null, unassigned_when_null_or_empty};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Thermal {
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
    #[serde(rename = "Temperatures", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub temperatures: Ref<Vec<Temperature>>,
    #[serde(rename = "Fans", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub fans: Ref<Vec<Fan>>,
    #[serde(rename = "Redundancy", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub redundancy: Ref<Vec<Redundancy>>,
    #[serde(skip)]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Temperature {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: ODataId,
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(rename = "MemberId", default, deserialize_with = "member_id")]
    pub member_id: Ref<String>,
    #[serde(rename = "Name", default, deserialize_with = "unassigned_when_null")]
    pub name: Ref<String>,
    #[serde(rename = "SensorNumber", default, deserialize_with = "unassigned_when_null")]
    pub sensor_number: Ref<i64>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
    #[serde(rename = "ReadingCelsius", default, deserialize_with = "unassigned_when_null")]
    pub reading_celsius: Ref<f64>,
    #[serde(flatten)]
    pub thresholds: Thresholds,
    #[serde(rename = "PhysicalContext", default, deserialize_with = "unassigned_when_null")]
    pub physical_context: Ref<PhysicalContext>,
    #[serde(rename = "RelatedItem", default)]
    pub related_item: Option<Vec<Link>>,
    #[serde(rename = "Oem", default, deserialize_with = "opaque_slots")]
    pub oem: OemSlots,
}

/// Threshold and range readings shared by sensors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Thresholds {
    #[serde(rename = "UpperThresholdNonCritical", default, deserialize_with = "unassigned_when_null")]
    pub upper_non_critical: Ref<f64>,
    #[serde(rename = "UpperThresholdCritical", default, deserialize_with = "unassigned_when_null")]
    pub upper_critical: Ref<f64>,
    #[serde(rename = "UpperThresholdFatal", default, deserialize_with = "unassigned_when_null")]
    pub upper_fatal: Ref<f64>,
    #[serde(rename = "LowerThresholdNonCritical", default, deserialize_with = "unassigned_when_null")]
    pub lower_non_critical: Ref<f64>,
    #[serde(rename = "LowerThresholdCritical", default, deserialize_with = "unassigned_when_null")]
    pub lower_critical: Ref<f64>,
    #[serde(rename = "LowerThresholdFatal", default, deserialize_with = "unassigned_when_null")]
    pub lower_fatal: Ref<f64>,
    #[serde(rename = "MinReadingRange", default, deserialize_with = "unassigned_when_null")]
    pub min_reading_range: Ref<f64>,
    #[serde(rename = "MaxReadingRange", default, deserialize_with = "unassigned_when_null")]
    pub max_reading_range: Ref<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Fan {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: ODataId,
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(rename = "MemberId", default, deserialize_with = "member_id")]
    pub member_id: Ref<String>,
    #[serde(rename = "Name", default, deserialize_with = "unassigned_when_null")]
    pub name: Ref<String>,
    /// Pre-1.1 spelling of `Name`.
    #[serde(rename = "FanName", default, deserialize_with = "unassigned_when_null")]
    pub fan_name: Ref<String>,
    #[serde(rename = "PhysicalContext", default, deserialize_with = "unassigned_when_null")]
    pub physical_context: Ref<PhysicalContext>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
    #[serde(rename = "Reading", default, deserialize_with = "unassigned_when_null")]
    pub reading: Ref<f64>,
    #[serde(rename = "ReadingUnits", default, deserialize_with = "unassigned_when_null")]
    pub reading_units: Ref<String>,
    #[serde(flatten)]
    pub thresholds: Thresholds,
    #[serde(rename = "RelatedItem", default)]
    pub related_item: Option<Vec<Link>>,
    #[serde(rename = "Redundancy", default)]
    pub redundancy: Option<Vec<Link>>,
    #[serde(rename = "Oem", default, deserialize_with = "opaque_slots")]
    pub oem: OemSlots,
}

impl Fan {
    /// `Name`, or the legacy `FanName` when only that is present.
    pub fn display_name(&self) -> Ref<&str> {
        self.name
            .as_ref()
            .or(self.fan_name.as_ref())
            .map(String::as_str)
    }
}

/// A redundancy group. Shared by the thermal and power subsystems.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Redundancy {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: ODataId,
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(rename = "MemberId", default, deserialize_with = "member_id")]
    pub member_id: Ref<String>,
    #[serde(rename = "Name", default, deserialize_with = "unassigned_when_null")]
    pub name: Ref<String>,
    #[serde(rename = "Mode", default, deserialize_with = "unassigned_when_null")]
    pub mode: Ref<String>,
    #[serde(rename = "MaxNumSupported", default, deserialize_with = "unassigned_when_null")]
    pub max_num_supported: Ref<u32>,
    #[serde(rename = "MinNumNeeded", default, deserialize_with = "unassigned_when_null")]
    pub min_num_needed: Ref<u32>,
    #[serde(rename = "RedundancyEnabled", default, deserialize_with = "unassigned_when_null")]
    pub redundancy_enabled: Ref<bool>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
    #[serde(rename = "RedundancySet", default)]
    pub redundancy_set: Option<Vec<Link>>,
    #[serde(rename = "Oem", default, deserialize_with = "opaque_slots")]
    pub oem: OemSlots,
}

embedded_member!(Temperature, Fan, Redundancy);

impl RedfishResource for Thermal {
    resource_identity!();

    fn embedded_member(&self, collection: &str, member_id: &str) -> Option<Resource> {
        match collection {
            "Temperatures" => find_member(self.temperatures.as_option()?, member_id),
            "Fans" => find_member(self.fans.as_option()?, member_id),
            "Redundancy" => find_member(self.redundancy.as_option()?, member_id),
            _ => None,
        }
    }
}

impl ResourceSchema for Thermal {
    const KIND: ResourceKind = ResourceKind::Thermal;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Thermal.{ver}.Thermal"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }

    fn finalize(&mut self) {
        let parent = self.odata_id.clone();
        if let Ref::Assigned(temperatures) = &mut self.temperatures {
            assign_member_ids(&parent, "Temperatures", temperatures);
        }
        if let Ref::Assigned(fans) = &mut self.fans {
            assign_member_ids(&parent, "Fans", fans);
        }
        if let Ref::Assigned(redundancy) = &mut self.redundancy {
            assign_member_ids(&parent, "Redundancy", redundancy);
        }
    }
}

impl RedfishResource for Temperature {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new()
            .multiple("relatedItems", self.related_item.as_deref())
            .build()
    }
}

impl ResourceSchema for Temperature {
    const KIND: ResourceKind = ResourceKind::Temperature;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Thermal.{ver}.Temperature"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}

impl RedfishResource for Fan {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new()
            .multiple("relatedItems", self.related_item.as_deref())
            .multiple("redundancy", self.redundancy.as_deref())
            .build()
    }
}

impl ResourceSchema for Fan {
    const KIND: ResourceKind = ResourceKind::Fan;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Thermal.{ver}.Fan"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}

impl RedfishResource for Redundancy {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new()
            .multiple("redundancySet", self.redundancy_set.as_deref())
            .build()
    }
}

impl ResourceSchema for Redundancy {
    const KIND: ResourceKind = ResourceKind::Redundancy;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Redundancy.{ver}.Redundancy"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::resolve_fragment;
    use crate::models::decode_resource;
    use serde_json::json;

    fn thermal() -> Resource {
        decode_resource::<Thermal>(json!({
            "@odata.id": "/redfish/v1/Chassis/1/Thermal",
            "@odata.type": "#Thermal.v1_1_0.Thermal",
            "Temperatures": [
                {"MemberId": "0", "Name": "Inlet", "ReadingCelsius": 21.5, "UpperThresholdCritical": 45},
                {"@odata.id": "/redfish/v1/Chassis/1/Thermal#/Temperatures/1", "MemberId": "1", "ReadingCelsius": null}
            ],
            "Fans": [
                {"MemberId": 0, "FanName": "Fan 1", "Reading": 4200, "ReadingUnits": "RPM",
                 "Oem": {"Contoso": {"Zone": 2}}}
            ],
            "Redundancy": []
        }))
        .unwrap()
    }

    #[test]
    fn test_member_ids_are_synthesized() {
        let resource = thermal();
        let thermal = resource.as_variant::<Thermal>().unwrap();
        let temperatures = thermal.temperatures.get().unwrap();

        assert_eq!(
            temperatures[0].odata_id,
            ODataId::new("/redfish/v1/Chassis/1/Thermal#/Temperatures/0")
        );
        assert_eq!(temperatures[0].thresholds.upper_critical, Ref::of(45.0));
        assert!(temperatures[1].reading_celsius.is_unassigned());
        assert!(thermal.redundancy.is_unassigned());
    }

    #[test]
    fn test_resolve_fragment_returns_member() {
        let resource = thermal();
        let fan = resolve_fragment(&resource, "#/Fans/0").unwrap();
        let fan = fan.as_variant::<Fan>().unwrap();

        assert_eq!(fan.display_name(), Ref::of("Fan 1"));
        assert!(fan.oem.top_level.unrecognized().contains_key("Contoso"));
        assert!(resolve_fragment(&resource, "/Fans/7").is_none());
        assert!(resolve_fragment(&resource, "/Redundancy/0").is_none());
        assert!(resolve_fragment(&resource, "/Pumps/0").is_none());
    }
}
