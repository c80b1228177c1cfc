//! Power subsystem of a chassis.
//!
//! Embeds power control domains, voltage sensors, power supplies and
//! redundancy groups, each addressable by fragment like the thermal members.

use serde::Deserialize;

use super::common::{IndicatorLed, PhysicalContext, Status};
use super::thermal::{Redundancy, Thresholds};
use super::{RedfishResource, Resource, ResourceKind, ResourceSchema};
use crate::links::{LinkSet, ResourceLink, assign_member_ids, find_member};
use crate::odata::{Link, ODataId};
use crate::oem::{OemSlots, opaque_slots};
use crate::optional::Ref;
use crate::serde_helpers::{member_id, unassigned_when_null, unassigned_when_null_or_empty};

redfish_enum!(
    PowerSupplyType {
        Ac => "AC",
        Dc => "DC",
        AcOrDc => "ACorDC",
    }
);

redfish_enum!(
    PowerLimitException {
        NoAction => "NoAction",
        HardPowerOff => "HardPowerOff",
        LogEventOnly => "LogEventOnly",
        Oem => "Oem",
    }
);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Power {
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
    #[serde(rename = "PowerControl", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub power_control: Ref<Vec<PowerControl>>,
    #[serde(rename = "Voltages", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub voltages: Ref<Vec<Voltage>>,
    #[serde(rename = "PowerSupplies", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub power_supplies: Ref<Vec<PowerSupply>>,
    #[serde(rename = "Redundancy", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub redundancy: Ref<Vec<Redundancy>>,
    #[serde(skip)]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PowerControl {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: ODataId,
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(rename = "MemberId", default, deserialize_with = "member_id")]
    pub member_id: Ref<String>,
    #[serde(rename = "Name", default, deserialize_with = "unassigned_when_null")]
    pub name: Ref<String>,
    #[serde(rename = "PowerConsumedWatts", default, deserialize_with = "unassigned_when_null")]
    pub power_consumed_watts: Ref<f64>,
    #[serde(rename = "PowerRequestedWatts", default, deserialize_with = "unassigned_when_null")]
    pub power_requested_watts: Ref<f64>,
    #[serde(rename = "PowerAvailableWatts", default, deserialize_with = "unassigned_when_null")]
    pub power_available_watts: Ref<f64>,
    #[serde(rename = "PowerCapacityWatts", default, deserialize_with = "unassigned_when_null")]
    pub power_capacity_watts: Ref<f64>,
    #[serde(rename = "PowerAllocatedWatts", default, deserialize_with = "unassigned_when_null")]
    pub power_allocated_watts: Ref<f64>,
    #[serde(rename = "PowerMetrics", default, deserialize_with = "unassigned_when_null")]
    pub power_metrics: Ref<PowerMetrics>,
    #[serde(rename = "PowerLimit", default, deserialize_with = "unassigned_when_null")]
    pub power_limit: Ref<PowerLimit>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
    #[serde(rename = "RelatedItem", default)]
    pub related_item: Option<Vec<Link>>,
    #[serde(rename = "Oem", default, deserialize_with = "opaque_slots")]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PowerMetrics {
    #[serde(rename = "IntervalInMin", default, deserialize_with = "unassigned_when_null")]
    pub interval_in_min: Ref<u32>,
    #[serde(rename = "MinConsumedWatts", default, deserialize_with = "unassigned_when_null")]
    pub min_consumed_watts: Ref<f64>,
    #[serde(rename = "MaxConsumedWatts", default, deserialize_with = "unassigned_when_null")]
    pub max_consumed_watts: Ref<f64>,
    #[serde(rename = "AverageConsumedWatts", default, deserialize_with = "unassigned_when_null")]
    pub average_consumed_watts: Ref<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PowerLimit {
    /// `null` means "no limit set", which differs from an absent limit.
    #[serde(rename = "LimitInWatts", default)]
    pub limit_in_watts: Ref<Option<f64>>,
    #[serde(rename = "LimitException", default, deserialize_with = "unassigned_when_null")]
    pub limit_exception: Ref<PowerLimitException>,
    #[serde(rename = "CorrectionInMs", default, deserialize_with = "unassigned_when_null")]
    pub correction_in_ms: Ref<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Voltage {
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
    #[serde(rename = "ReadingVolts", default, deserialize_with = "unassigned_when_null")]
    pub reading_volts: Ref<f64>,
    #[serde(flatten)]
    pub thresholds: Thresholds,
    #[serde(rename = "PhysicalContext", default, deserialize_with = "unassigned_when_null")]
    pub physical_context: Ref<PhysicalContext>,
    #[serde(rename = "RelatedItem", default)]
    pub related_item: Option<Vec<Link>>,
    #[serde(rename = "Oem", default, deserialize_with = "opaque_slots")]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputRange {
    #[serde(rename = "InputType", default, deserialize_with = "unassigned_when_null")]
    pub input_type: Ref<String>,
    #[serde(rename = "MinimumVoltage", default, deserialize_with = "unassigned_when_null")]
    pub minimum_voltage: Ref<f64>,
    #[serde(rename = "MaximumVoltage", default, deserialize_with = "unassigned_when_null")]
    pub maximum_voltage: Ref<f64>,
    #[serde(rename = "OutputWattage", default, deserialize_with = "unassigned_when_null")]
    pub output_wattage: Ref<f64>,
    #[serde(rename = "MinimumFrequencyHz", default, deserialize_with = "unassigned_when_null")]
    pub minimum_frequency_hz: Ref<f64>,
    #[serde(rename = "MaximumFrequencyHz", default, deserialize_with = "unassigned_when_null")]
    pub maximum_frequency_hz: Ref<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PowerSupply {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: ODataId,
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(rename = "MemberId", default, deserialize_with = "member_id")]
    pub member_id: Ref<String>,
    #[serde(rename = "Name", default, deserialize_with = "unassigned_when_null")]
    pub name: Ref<String>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
    #[serde(rename = "PowerSupplyType", default, deserialize_with = "unassigned_when_null")]
    pub power_supply_type: Ref<PowerSupplyType>,
    #[serde(rename = "LineInputVoltageType", default, deserialize_with = "unassigned_when_null")]
    pub line_input_voltage_type: Ref<String>,
    #[serde(rename = "LineInputVoltage", default, deserialize_with = "unassigned_when_null")]
    pub line_input_voltage: Ref<f64>,
    #[serde(rename = "PowerCapacityWatts", default, deserialize_with = "unassigned_when_null")]
    pub power_capacity_watts: Ref<f64>,
    #[serde(rename = "LastPowerOutputWatts", default, deserialize_with = "unassigned_when_null")]
    pub last_power_output_watts: Ref<f64>,
    #[serde(rename = "Model", default, deserialize_with = "unassigned_when_null")]
    pub model: Ref<String>,
    #[serde(rename = "Manufacturer", default, deserialize_with = "unassigned_when_null")]
    pub manufacturer: Ref<String>,
    #[serde(rename = "FirmwareVersion", default, deserialize_with = "unassigned_when_null")]
    pub firmware_version: Ref<String>,
    #[serde(rename = "SerialNumber", default, deserialize_with = "unassigned_when_null")]
    pub serial_number: Ref<String>,
    #[serde(rename = "PartNumber", default, deserialize_with = "unassigned_when_null")]
    pub part_number: Ref<String>,
    #[serde(rename = "SparePartNumber", default, deserialize_with = "unassigned_when_null")]
    pub spare_part_number: Ref<String>,
    #[serde(rename = "InputRanges", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub input_ranges: Ref<Vec<InputRange>>,
    #[serde(rename = "IndicatorLED", default, deserialize_with = "unassigned_when_null")]
    pub indicator_led: Ref<IndicatorLed>,
    #[serde(rename = "Redundancy", default)]
    pub redundancy: Option<Vec<Link>>,
    #[serde(rename = "RelatedItem", default)]
    pub related_item: Option<Vec<Link>>,
    #[serde(rename = "Oem", default, deserialize_with = "opaque_slots")]
    pub oem: OemSlots,
}

embedded_member!(PowerControl, Voltage, PowerSupply);

impl Power {
    /// Sum of `PowerConsumedWatts` over every control domain that reports it.
    pub fn total_consumed_watts(&self) -> Ref<f64> {
        let readings: Vec<f64> = self
            .power_control
            .as_option()
            .into_iter()
            .flatten()
            .filter_map(|c| c.power_consumed_watts.as_option().copied())
            .collect();
        if readings.is_empty() {
            Ref::Unassigned
        } else {
            Ref::of(readings.iter().sum())
        }
    }
}

impl RedfishResource for Power {
    resource_identity!();

    fn embedded_member(&self, collection: &str, member_id: &str) -> Option<Resource> {
        match collection {
            "PowerControl" => find_member(self.power_control.as_option()?, member_id),
            "Voltages" => find_member(self.voltages.as_option()?, member_id),
            "PowerSupplies" => find_member(self.power_supplies.as_option()?, member_id),
            "Redundancy" => find_member(self.redundancy.as_option()?, member_id),
            _ => None,
        }
    }
}

impl ResourceSchema for Power {
    const KIND: ResourceKind = ResourceKind::Power;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Power.{ver}.Power"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }

    fn finalize(&mut self) {
        let parent = self.odata_id.clone();
        if let Ref::Assigned(controls) = &mut self.power_control {
            assign_member_ids(&parent, "PowerControl", controls);
        }
        if let Ref::Assigned(voltages) = &mut self.voltages {
            assign_member_ids(&parent, "Voltages", voltages);
        }
        if let Ref::Assigned(supplies) = &mut self.power_supplies {
            assign_member_ids(&parent, "PowerSupplies", supplies);
        }
        if let Ref::Assigned(redundancy) = &mut self.redundancy {
            assign_member_ids(&parent, "Redundancy", redundancy);
        }
    }
}

impl RedfishResource for PowerControl {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new()
            .multiple("relatedItems", self.related_item.as_deref())
            .build()
    }
}

impl ResourceSchema for PowerControl {
    const KIND: ResourceKind = ResourceKind::PowerControl;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Power.{ver}.PowerControl"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}

impl RedfishResource for Voltage {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new()
            .multiple("relatedItems", self.related_item.as_deref())
            .build()
    }
}

impl ResourceSchema for Voltage {
    const KIND: ResourceKind = ResourceKind::Voltage;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Power.{ver}.Voltage"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}

impl RedfishResource for PowerSupply {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new()
            .multiple("redundancy", self.redundancy.as_deref())
            .multiple("relatedItems", self.related_item.as_deref())
            .build()
    }
}

impl ResourceSchema for PowerSupply {
    const KIND: ResourceKind = ResourceKind::PowerSupply;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Power.{ver}.PowerSupply"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}
