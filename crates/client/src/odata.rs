//! OData identifiers and raw links.
//!
//! Responsibilities:
//! - [`ODataId`]: the normalized URI of a resource, optionally carrying a
//!   `#/<Collection>/<MemberId>` fragment for embedded members.
//! - [`Link`]: the raw `{"@odata.id": ...}` object found in payloads.
//! - Reading the `@odata.type` discriminator out of a JSON tree.
//!
//! Invariants:
//! - Two `ODataId`s are equal iff their normalized text is equal.
//! - Normalization trims whitespace, drops a trailing `/` (except the root
//!   `/`) and drops an empty fragment.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Service root path shared by every Redfish service.
pub const SERVICE_ROOT: &str = "/redfish/v1";

/// Normalized resource URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ODataId(String);

impl ODataId {
    pub fn new(uri: impl AsRef<str>) -> Self {
        Self(normalize(uri.as_ref()))
    }

    /// `/redfish/v1`.
    pub fn service_root() -> Self {
        Self(SERVICE_ROOT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The URI without its fragment.
    pub fn path(&self) -> &str {
        self.0.split_once('#').map_or(self.0.as_str(), |(path, _)| path)
    }

    /// The fragment after `#`, if any.
    pub fn fragment(&self) -> Option<&str> {
        self.0.split_once('#').map(|(_, fragment)| fragment)
    }

    /// The same resource without any fragment.
    pub fn without_fragment(&self) -> Self {
        Self(self.path().to_string())
    }

    /// Replace the fragment. `fragment` is given without the leading `#`.
    pub fn with_fragment(&self, fragment: &str) -> Self {
        Self::new(format!("{}#{}", self.path(), fragment))
    }

    /// Append a path segment.
    pub fn join(&self, segment: &str) -> Self {
        Self::new(format!("{}/{}", self.path(), segment.trim_start_matches('/')))
    }
}

fn normalize(raw: &str) -> String {
    let raw = raw.trim();
    let (path, fragment) = match raw.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment.trim())),
        None => (raw, None),
    };

    let mut path = path.trim_end_matches('/').to_string();
    if path.is_empty() && raw.starts_with('/') {
        path.push('/');
    }

    match fragment {
        Some(fragment) if !fragment.is_empty() => format!("{path}#{fragment}"),
        _ => path,
    }
}

impl From<String> for ODataId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ODataId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<ODataId> for String {
    fn from(value: ODataId) -> Self {
        value.0
    }
}

impl AsRef<str> for ODataId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ODataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw link object: `{"@odata.id": "/redfish/v1/Chassis/1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "@odata.id")]
    pub odata_id: ODataId,
}

impl Link {
    pub fn new(uri: impl AsRef<str>) -> Self {
        Self {
            odata_id: ODataId::new(uri),
        }
    }
}

/// Read the `@odata.type` discriminator from a payload.
pub fn odata_type(payload: &Value) -> Option<&str> {
    payload.get("@odata.type").and_then(Value::as_str)
}

/// Read the `@odata.id` of a payload.
pub fn odata_id(payload: &Value) -> Option<ODataId> {
    payload
        .get("@odata.id")
        .and_then(Value::as_str)
        .map(ODataId::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalization() {
        assert_eq!(ODataId::new("/redfish/v1/Chassis/1/"), ODataId::new("/redfish/v1/Chassis/1"));
        assert_eq!(ODataId::new("  /redfish/v1 ").as_str(), "/redfish/v1");
        assert_eq!(ODataId::new("/").as_str(), "/");
        assert_eq!(ODataId::new("/redfish/v1/Chassis/1#").as_str(), "/redfish/v1/Chassis/1");
    }

    #[test]
    fn test_fragment_split() {
        let id = ODataId::new("/redfish/v1/Chassis/1/Power#/PowerControl/0");
        assert_eq!(id.path(), "/redfish/v1/Chassis/1/Power");
        assert_eq!(id.fragment(), Some("/PowerControl/0"));
        assert_eq!(id.without_fragment().as_str(), "/redfish/v1/Chassis/1/Power");

        let plain = ODataId::new("/redfish/v1/Systems/1");
        assert_eq!(plain.fragment(), None);
        assert_eq!(
            plain.with_fragment("/Memory/2").as_str(),
            "/redfish/v1/Systems/1#/Memory/2"
        );
    }

    #[test]
    fn test_join() {
        let root = ODataId::service_root();
        assert_eq!(root.join("Chassis").as_str(), "/redfish/v1/Chassis");
        assert_eq!(root.join("/Systems/").as_str(), "/redfish/v1/Systems");
    }

    #[test]
    fn test_link_deserialize_normalizes() {
        let link: Link = serde_json::from_value(json!({"@odata.id": "/redfish/v1/Chassis/1/"})).unwrap();
        assert_eq!(link.odata_id.as_str(), "/redfish/v1/Chassis/1");
    }

    #[test]
    fn test_discriminator_extraction() {
        let payload = json!({"@odata.type": "#Chassis.v1_2_0.Chassis", "@odata.id": "/redfish/v1/Chassis/1"});
        assert_eq!(odata_type(&payload), Some("#Chassis.v1_2_0.Chassis"));
        assert_eq!(odata_id(&payload), Some(ODataId::new("/redfish/v1/Chassis/1")));
        assert_eq!(odata_type(&json!({})), None);
    }
}
