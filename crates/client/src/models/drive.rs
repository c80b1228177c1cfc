//! Drives.

use serde::Deserialize;

use super::common::{ActionTarget, Identifier, IndicatorLed, Protocol, Status};
use super::{RedfishResource, ResourceKind, ResourceSchema};
use crate::links::{LinkSet, ResourceLink, to_reference};
use crate::odata::{Link, ODataId};
use crate::oem::rackscale::{self, DriveOem};
use crate::oem::{OemBindings, OemSlots};
use crate::optional::Ref;
use crate::serde_helpers::{
    null_as_default, ref_u64_from_string_or_number, unassigned_when_null,
    unassigned_when_null_or_empty,
};

redfish_enum!(
    MediaType {
        Hdd => "HDD",
        Ssd => "SSD",
        Smr => "SMR",
    }
);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Drive {
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
    #[serde(rename = "IndicatorLED", default, deserialize_with = "unassigned_when_null")]
    pub indicator_led: Ref<IndicatorLed>,
    #[serde(rename = "Model", default, deserialize_with = "unassigned_when_null")]
    pub model: Ref<String>,
    #[serde(rename = "Revision", default, deserialize_with = "unassigned_when_null")]
    pub revision: Ref<String>,
    #[serde(rename = "Manufacturer", default, deserialize_with = "unassigned_when_null")]
    pub manufacturer: Ref<String>,
    #[serde(rename = "SKU", default, deserialize_with = "unassigned_when_null")]
    pub sku: Ref<String>,
    #[serde(rename = "SerialNumber", default, deserialize_with = "unassigned_when_null")]
    pub serial_number: Ref<String>,
    #[serde(rename = "PartNumber", default, deserialize_with = "unassigned_when_null")]
    pub part_number: Ref<String>,
    #[serde(rename = "AssetTag", default)]
    pub asset_tag: Ref<Option<String>>,
    #[serde(rename = "CapacityBytes", default, deserialize_with = "ref_u64_from_string_or_number")]
    pub capacity_bytes: Ref<u64>,
    #[serde(rename = "BlockSizeBytes", default, deserialize_with = "ref_u64_from_string_or_number")]
    pub block_size_bytes: Ref<u64>,
    #[serde(rename = "FailurePredicted", default, deserialize_with = "unassigned_when_null")]
    pub failure_predicted: Ref<bool>,
    #[serde(rename = "Protocol", default, deserialize_with = "unassigned_when_null")]
    pub protocol: Ref<Protocol>,
    #[serde(rename = "MediaType", default, deserialize_with = "unassigned_when_null")]
    pub media_type: Ref<MediaType>,
    #[serde(rename = "RotationSpeedRPM", default, deserialize_with = "unassigned_when_null")]
    pub rotation_speed_rpm: Ref<f64>,
    #[serde(rename = "CapableSpeedGbs", default, deserialize_with = "unassigned_when_null")]
    pub capable_speed_gbs: Ref<f64>,
    #[serde(rename = "NegotiatedSpeedGbs", default, deserialize_with = "unassigned_when_null")]
    pub negotiated_speed_gbs: Ref<f64>,
    #[serde(
        rename = "PredictedMediaLifeLeftPercent",
        default,
        deserialize_with = "unassigned_when_null"
    )]
    pub predicted_media_life_left_percent: Ref<f64>,
    #[serde(rename = "HotspareType", default, deserialize_with = "unassigned_when_null")]
    pub hotspare_type: Ref<String>,
    #[serde(rename = "EncryptionAbility", default, deserialize_with = "unassigned_when_null")]
    pub encryption_ability: Ref<String>,
    #[serde(rename = "EncryptionStatus", default, deserialize_with = "unassigned_when_null")]
    pub encryption_status: Ref<String>,
    #[serde(rename = "Identifiers", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub identifiers: Ref<Vec<Identifier>>,
    #[serde(rename = "Links", default, deserialize_with = "null_as_default")]
    pub links: DriveLinks,
    #[serde(rename = "Actions", default, deserialize_with = "null_as_default")]
    pub actions: DriveActions,
    #[serde(skip)]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DriveLinks {
    #[serde(rename = "Volumes", default)]
    pub volumes: Option<Vec<Link>>,
    #[serde(rename = "Endpoints", default)]
    pub endpoints: Option<Vec<Link>>,
    #[serde(rename = "Chassis", default)]
    pub chassis: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DriveActions {
    #[serde(rename = "#Drive.SecureErase", default, deserialize_with = "unassigned_when_null")]
    pub secure_erase: Ref<ActionTarget>,
}

impl Drive {
    pub fn rackscale(&self) -> Option<&DriveOem> {
        self.oem.top_level.get::<DriveOem>()
    }

    pub fn erase_on_detach(&self) -> Ref<bool> {
        self.rackscale()
            .map_or(Ref::Unassigned, |o| o.erase_on_detach.clone())
    }

    pub fn storage(&self) -> Option<ODataId> {
        self.rackscale().and_then(|o| to_reference(o.storage.as_ref()))
    }
}

impl RedfishResource for Drive {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        let oem = self.rackscale();
        LinkSet::new()
            .multiple("volumes", self.links.volumes.as_deref())
            .multiple("endpoints", self.links.endpoints.as_deref())
            .single("chassis", self.links.chassis.as_ref())
            .single("storage", oem.and_then(|o| o.storage.as_ref()))
            .single("pcieDeviceFunction", oem.and_then(|o| o.pcie_function.as_ref()))
            .build()
    }
}

impl ResourceSchema for Drive {
    const KIND: ResourceKind = ResourceKind::Drive;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Drive.{ver}.Drive"];
    const OEM: OemBindings = OemBindings {
        top_level: &[rackscale::DRIVE],
        links: &[],
        actions: &[],
    };

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}
