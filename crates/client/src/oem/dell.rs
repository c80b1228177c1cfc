//! `Dell` vendor extensions (iDRAC).

use serde::Deserialize;

use super::{OemParser, OemVariant, parse_as};
use crate::optional::Ref;
use crate::serde_helpers::unassigned_when_null;

pub const NAMESPACE: &str = "Dell";

pub const SYSTEM: OemParser = OemParser {
    namespace: NAMESPACE,
    variants: &[OemVariant::new("DellSystem", parse_as::<DellSystemOem>)],
};

/// `Oem.Dell` of a computer system.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DellSystemOem {
    #[serde(rename = "DellSystem")]
    pub dell_system: DellSystem,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DellSystem {
    #[serde(default, deserialize_with = "unassigned_when_null")]
    pub chassis_service_tag: Ref<String>,
    #[serde(default, deserialize_with = "unassigned_when_null")]
    pub express_service_code: Ref<String>,
    #[serde(rename = "NodeID", default, deserialize_with = "unassigned_when_null")]
    pub node_id: Ref<String>,
    #[serde(default, deserialize_with = "unassigned_when_null")]
    pub bios_release_date: Ref<String>,
    #[serde(rename = "CPURollupStatus", default, deserialize_with = "unassigned_when_null")]
    pub cpu_rollup_status: Ref<String>,
    #[serde(default, deserialize_with = "unassigned_when_null")]
    pub storage_rollup_status: Ref<String>,
    #[serde(default, deserialize_with = "unassigned_when_null")]
    pub system_generation: Ref<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oem::OemExtension;
    use serde_json::json;

    #[test]
    fn test_dell_system_parses_pascal_case() {
        let ext = parse_as::<DellSystemOem>(&json!({
            "DellSystem": {
                "ChassisServiceTag": "ABC1234",
                "NodeID": "ABC1234",
                "CPURollupStatus": "Ok",
                "SystemGeneration": null
            }
        }))
        .unwrap();
        let OemExtension::DellSystem(dell) = ext else {
            panic!("expected Dell variant");
        };
        assert_eq!(dell.dell_system.chassis_service_tag, Ref::of("ABC1234".to_string()));
        assert_eq!(dell.dell_system.cpu_rollup_status, Ref::of("Ok".to_string()));
        assert!(dell.dell_system.system_generation.is_unassigned());
    }

    #[test]
    fn test_dell_system_requires_inner_object() {
        assert!(parse_as::<DellSystemOem>(&json!({"Other": {}})).is_err());
    }
}
