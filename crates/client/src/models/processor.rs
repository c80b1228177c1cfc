//! Processors.

use serde::Deserialize;

use super::common::Status;
use super::{RedfishResource, ResourceKind, ResourceSchema};
use crate::links::{LinkSet, ResourceLink, to_reference};
use crate::odata::{Link, ODataId};
use crate::oem::rackscale::{self, ProcessorOem};
use crate::oem::{OemBindings, OemSlots};
use crate::optional::Ref;
use crate::serde_helpers::unassigned_when_null;

redfish_enum!(
    ProcessorType {
        Cpu => "CPU",
        Gpu => "GPU",
        Fpga => "FPGA",
        Dsp => "DSP",
        Accelerator => "Accelerator",
        Core => "Core",
        Thread => "Thread",
        Oem => "OEM",
    }
);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Processor {
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
    #[serde(rename = "Socket", default, deserialize_with = "unassigned_when_null")]
    pub socket: Ref<String>,
    #[serde(rename = "ProcessorType", default, deserialize_with = "unassigned_when_null")]
    pub processor_type: Ref<ProcessorType>,
    #[serde(rename = "ProcessorArchitecture", default, deserialize_with = "unassigned_when_null")]
    pub processor_architecture: Ref<String>,
    #[serde(rename = "InstructionSet", default, deserialize_with = "unassigned_when_null")]
    pub instruction_set: Ref<String>,
    #[serde(rename = "Manufacturer", default, deserialize_with = "unassigned_when_null")]
    pub manufacturer: Ref<String>,
    #[serde(rename = "Model", default, deserialize_with = "unassigned_when_null")]
    pub model: Ref<String>,
    #[serde(rename = "MaxSpeedMHz", default, deserialize_with = "unassigned_when_null")]
    pub max_speed_mhz: Ref<u32>,
    #[serde(rename = "TotalCores", default, deserialize_with = "unassigned_when_null")]
    pub total_cores: Ref<u32>,
    #[serde(rename = "TotalThreads", default, deserialize_with = "unassigned_when_null")]
    pub total_threads: Ref<u32>,
    #[serde(rename = "ProcessorId", default, deserialize_with = "unassigned_when_null")]
    pub processor_id: Ref<ProcessorId>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
    #[serde(skip)]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessorId {
    #[serde(rename = "VendorId", default, deserialize_with = "unassigned_when_null")]
    pub vendor_id: Ref<String>,
    #[serde(rename = "IdentificationRegisters", default, deserialize_with = "unassigned_when_null")]
    pub identification_registers: Ref<String>,
    #[serde(rename = "EffectiveFamily", default, deserialize_with = "unassigned_when_null")]
    pub effective_family: Ref<String>,
    #[serde(rename = "EffectiveModel", default, deserialize_with = "unassigned_when_null")]
    pub effective_model: Ref<String>,
    #[serde(rename = "Step", default, deserialize_with = "unassigned_when_null")]
    pub step: Ref<String>,
    #[serde(rename = "MicrocodeInfo", default, deserialize_with = "unassigned_when_null")]
    pub microcode_info: Ref<String>,
}

impl Processor {
    pub fn rackscale(&self) -> Option<&ProcessorOem> {
        self.oem.top_level.get::<ProcessorOem>()
    }

    /// Processor metrics resource advertised by the vendor extension.
    pub fn metrics(&self) -> Option<ODataId> {
        self.rackscale().and_then(|o| to_reference(o.metrics.as_ref()))
    }

    fn metrics_link(&self) -> Option<&Link> {
        self.rackscale().and_then(|o| o.metrics.as_ref())
    }
}

impl RedfishResource for Processor {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new()
            .single("processorMetrics", self.metrics_link())
            .build()
    }
}

impl ResourceSchema for Processor {
    const KIND: ResourceKind = ResourceKind::Processor;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Processor.{ver}.Processor"];
    const OEM: OemBindings = OemBindings {
        top_level: &[rackscale::PROCESSOR],
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
    use crate::error::ClientError;
    use crate::models::decode_resource;
    use serde_json::json;

    #[test]
    fn test_metrics_link_from_oem() {
        let processor = decode_resource::<Processor>(json!({
            "@odata.id": "/redfish/v1/Systems/1/Processors/CPU1",
            "ProcessorType": "CPU",
            "TotalCores": 28,
            "Oem": {"Intel_RackScale": {
                "Brand": "E5",
                "Metrics": {"@odata.id": "/redfish/v1/Systems/1/Processors/CPU1/Metrics"}
            }}
        }))
        .unwrap()
        .into_variant::<Processor>()
        .unwrap();

        assert_eq!(
            processor.metrics(),
            Some(ODataId::new("/redfish/v1/Systems/1/Processors/CPU1/Metrics"))
        );
        assert_eq!(processor.links()[0].name, "processorMetrics");
    }

    #[test]
    fn test_bad_oem_keeps_standard_fields() {
        let err = decode_resource::<Processor>(json!({
            "TotalCores": 8,
            "Oem": {"Intel_RackScale": {"Brand": 42}}
        }))
        .unwrap_err();

        assert!(matches!(err, ClientError::OemDecode { .. }));
        let partial = err.into_partial_resource().unwrap();
        let processor = partial.as_variant::<Processor>().unwrap();
        assert_eq!(processor.total_cores, Ref::of(8));
        assert!(processor.rackscale().is_none());
    }
}
