//! Resource collections.
//!
//! Collections are not registered schemas: the reader decodes them directly
//! when expanding members, whatever their `@odata.type`.

use serde::Deserialize;

use crate::odata::{Link, ODataId};
use crate::optional::Ref;
use crate::serde_helpers::unassigned_when_null;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResourceCollection {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: ODataId,
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "unassigned_when_null")]
    pub name: Ref<String>,
    #[serde(rename = "Members")]
    pub members: Vec<Link>,
    #[serde(rename = "Members@odata.count", default, deserialize_with = "unassigned_when_null")]
    pub members_count: Ref<u64>,
    /// Next page of members, when the service pages the collection.
    #[serde(rename = "Members@odata.nextLink", default)]
    pub next_link: Option<ODataId>,
}

impl ResourceCollection {
    /// Member references of this page, in order.
    pub fn member_ids(&self) -> Vec<ODataId> {
        self.members.iter().map(|m| m.odata_id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_members_required() {
        let missing = serde_json::from_value::<ResourceCollection>(json!({"Name": "Systems"}));
        assert!(missing.is_err());

        let not_array = serde_json::from_value::<ResourceCollection>(json!({"Members": {}}));
        assert!(not_array.is_err());
    }

    #[test]
    fn test_members_keep_order_and_duplicates() {
        let collection: ResourceCollection = serde_json::from_value(json!({
            "Members": [
                {"@odata.id": "/redfish/v1/Systems/2"},
                {"@odata.id": "/redfish/v1/Systems/1"},
                {"@odata.id": "/redfish/v1/Systems/2"}
            ],
            "Members@odata.count": 3,
            "Members@odata.nextLink": "/redfish/v1/Systems?$skip=3"
        }))
        .unwrap();

        let ids: Vec<String> = collection.member_ids().iter().map(|i| i.to_string()).collect();
        assert_eq!(ids, ["/redfish/v1/Systems/2", "/redfish/v1/Systems/1", "/redfish/v1/Systems/2"]);
        assert_eq!(collection.members_count, Ref::of(3));
        assert!(collection.next_link.is_some());
    }
}
