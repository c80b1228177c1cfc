//! Test data generators using the fake crate.
//!
//! Build realistic service trees (service root, chassis and system
//! collections, thermal and power documents) with randomized names, serials
//! and readings.

use fake::Fake;
use fake::faker::boolean::en::Boolean;
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Word;
use serde_json::{Value, json};

use super::InMemoryTransport;
use crate::odata::{ODataId, SERVICE_ROOT};

// =============================================================================
// Rack Topology Generator
// =============================================================================

/// Generates a rack-scale service tree.
///
/// # Example
/// ```ignore
/// use rackscale_client::testing::generators::RackTopologyGenerator;
///
/// let transport = RackTopologyGenerator::new()
///     .with_chassis_count(4)
///     .with_fan_count(6)
///     .into_transport();
/// ```
#[derive(Debug, Clone)]
pub struct RackTopologyGenerator {
    chassis_count: usize,
    system_count: usize,
    fan_count: usize,
    temperature_count: usize,
    omit_member_ids: bool,
    foreign_oem: bool,
}

impl Default for RackTopologyGenerator {
    fn default() -> Self {
        Self {
            chassis_count: 2,
            system_count: 2,
            fan_count: 4,
            temperature_count: 3,
            omit_member_ids: false,
            foreign_oem: false,
        }
    }
}

impl RackTopologyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chassis_count(mut self, count: usize) -> Self {
        self.chassis_count = count;
        self
    }

    pub fn with_system_count(mut self, count: usize) -> Self {
        self.system_count = count;
        self
    }

    pub fn with_fan_count(mut self, count: usize) -> Self {
        self.fan_count = count;
        self
    }

    pub fn with_temperature_count(mut self, count: usize) -> Self {
        self.temperature_count = count;
        self
    }

    /// Leave out `MemberId` and `@odata.id` on embedded thermal members.
    pub fn with_omitted_member_ids(mut self, omit: bool) -> Self {
        self.omit_member_ids = omit;
        self
    }

    /// Sprinkle OEM namespaces of vendors nobody parses.
    pub fn with_foreign_oem(mut self, include: bool) -> Self {
        self.foreign_oem = include;
        self
    }

    /// Every document of the tree, keyed by URI.
    pub fn generate(&self) -> Vec<(ODataId, Value)> {
        let mut documents = vec![(ODataId::service_root(), self.service_root())];

        let chassis_ids: Vec<String> = (1..=self.chassis_count).map(|i| i.to_string()).collect();
        let system_ids: Vec<String> = (1..=self.system_count).map(|i| i.to_string()).collect();

        documents.push(collection("Chassis", "ChassisCollection", &chassis_ids));
        documents.push(collection("Systems", "ComputerSystemCollection", &system_ids));

        for id in &chassis_ids {
            let base = format!("{SERVICE_ROOT}/Chassis/{id}");
            documents.push((ODataId::new(&base), self.chassis(&base, id, &system_ids)));
            documents.push((ODataId::new(format!("{base}/Thermal")), self.thermal(&base)));
        }
        for id in &system_ids {
            let base = format!("{SERVICE_ROOT}/Systems/{id}");
            documents.push((ODataId::new(&base), self.system(&base, id)));
        }

        documents
    }

    /// Serve the generated tree from memory.
    pub fn into_transport(self) -> InMemoryTransport {
        InMemoryTransport::new().with_documents(self.generate())
    }

    fn service_root(&self) -> Value {
        json!({
            "@odata.id": SERVICE_ROOT,
            "@odata.type": "#ServiceRoot.v1_1_0.ServiceRoot",
            "Id": "RootService",
            "Name": "Root Service",
            "RedfishVersion": "1.1.0",
            "Chassis": {"@odata.id": format!("{SERVICE_ROOT}/Chassis")},
            "Systems": {"@odata.id": format!("{SERVICE_ROOT}/Systems")}
        })
    }

    fn chassis(&self, base: &str, id: &str, systems: &[String]) -> Value {
        let mut chassis = json!({
            "@odata.id": base,
            "@odata.type": "#Chassis.v1_2_0.Chassis",
            "Id": id,
            "Name": format!("Chassis {id}"),
            "ChassisType": "Drawer",
            "Manufacturer": CompanyName().fake::<String>(),
            "SerialNumber": format!("SN{}", (100000u32..999999u32).fake::<u32>()),
            "Status": {"State": "Enabled", "Health": "OK"},
            "Thermal": {"@odata.id": format!("{base}/Thermal")},
            "Links": {
                "ComputerSystems": systems
                    .iter()
                    .map(|s| json!({"@odata.id": format!("{SERVICE_ROOT}/Systems/{s}")}))
                    .collect::<Vec<_>>()
            }
        });
        if self.foreign_oem {
            chassis["Oem"] = foreign_oem();
        }
        chassis
    }

    fn system(&self, base: &str, id: &str) -> Value {
        let mut system = json!({
            "@odata.id": base,
            "@odata.type": "#ComputerSystem.v1_1_0.ComputerSystem",
            "Id": id,
            "Name": format!("System {id}"),
            "SystemType": "Physical",
            "PowerState": if Boolean(80).fake::<bool>() { "On" } else { "Off" },
            "Status": {"State": "Enabled", "Health": "OK"}
        });
        if self.foreign_oem {
            system["Oem"] = foreign_oem();
        }
        system
    }

    fn thermal(&self, chassis: &str) -> Value {
        let base = format!("{chassis}/Thermal");
        let member = |collection: &str, index: usize, mut body: Value| {
            if !self.omit_member_ids {
                body["MemberId"] = json!(index.to_string());
                body["@odata.id"] = json!(format!("{base}#/{collection}/{index}"));
            }
            body
        };

        let temperatures: Vec<Value> = (0..self.temperature_count)
            .map(|i| {
                member(
                    "Temperatures",
                    i,
                    json!({
                        "Name": format!("{} Temp", Word().fake::<String>()),
                        "ReadingCelsius": (20..70).fake::<i64>(),
                        "UpperThresholdCritical": 90,
                        "PhysicalContext": "CPU"
                    }),
                )
            })
            .collect();
        let fans: Vec<Value> = (0..self.fan_count)
            .map(|i| {
                member(
                    "Fans",
                    i,
                    json!({
                        "Name": format!("Fan {i}"),
                        "Reading": (2000..9000).fake::<i64>(),
                        "ReadingUnits": "RPM"
                    }),
                )
            })
            .collect();

        json!({
            "@odata.id": base,
            "@odata.type": "#Thermal.v1_1_0.Thermal",
            "Id": "Thermal",
            "Name": "Thermal",
            "Temperatures": temperatures,
            "Fans": fans
        })
    }
}

fn collection(segment: &str, type_name: &str, ids: &[String]) -> (ODataId, Value) {
    let uri = format!("{SERVICE_ROOT}/{segment}");
    let members: Vec<Value> = ids
        .iter()
        .map(|id| json!({"@odata.id": format!("{uri}/{id}")}))
        .collect();
    let document = json!({
        "@odata.id": uri,
        "@odata.type": format!("#{type_name}.{type_name}"),
        "Name": segment,
        "Members@odata.count": members.len(),
        "Members": members
    });
    (ODataId::new(&uri), document)
}

/// An OEM object keyed by a made-up vendor namespace.
pub fn foreign_oem() -> Value {
    let vendor = format!("Vendor_{}", Word().fake::<String>());
    json!({ vendor: {"Property": Word().fake::<String>(), "Level": (0..10).fake::<i64>()} })
}
