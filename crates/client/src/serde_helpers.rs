//! Serde helpers for Redfish payloads.
//!
//! Responsibilities:
//! - Bind a [`RefPolicy`] to a field through `deserialize_with`, so each schema
//!   fixes its null/empty handling at definition time.
//! - Accept either JSON numbers or strings for identifiers and sizes that some
//!   BMC firmware serializes inconsistently.
//! - Treat an explicit `null` for a structural block (`Links`, `Actions`) the
//!   same as an absent one.
//!
//! Explicitly does NOT handle:
//! - Absent keys. Every `Ref` field also carries `#[serde(default)]`, which
//!   yields `Unassigned` without calling these functions.
//!
//! Invariants / assumptions:
//! - `MemberId` may arrive as `"0"` or `0` depending on firmware.
//! - Errors are generic parse errors and never echo payload contents.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::optional::{Ref, RefPolicy};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum U64OrString {
    U64(u64),
    I64(i64),
    String(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    U64(u64),
    I64(i64),
    F64(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::U64(v) => v.to_string(),
            Self::I64(v) => v.to_string(),
            Self::F64(v) => v.to_string(),
        }
    }
}

fn with_policy<'de, D, T>(deserializer: D, policy: RefPolicy) -> Result<Ref<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    policy.apply(Some(value)).map_err(D::Error::custom)
}

/// `null` decodes to `Unassigned`.
pub fn unassigned_when_null<'de, D, T>(deserializer: D) -> Result<Ref<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    with_policy(deserializer, RefPolicy::COLLAPSE_NULL)
}

/// `null`, `[]` and `{}` decode to `Unassigned`.
pub fn unassigned_when_null_or_empty<'de, D, T>(deserializer: D) -> Result<Ref<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    with_policy(deserializer, RefPolicy::COLLAPSE_NULL_OR_EMPTY)
}

/// `null` decodes to `T::default()`, for blocks that have no absent state of
/// their own.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Embedded-member identifier: string or number, `null` collapses.
pub fn member_id<'de, D>(deserializer: D) -> Result<Ref<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(StringOrNumber::into_string).into())
}

/// Unsigned integer from a number or numeric string, `null` collapses.
pub fn ref_u64_from_string_or_number<'de, D>(deserializer: D) -> Result<Ref<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<U64OrString>::deserialize(deserializer)?;
    match value {
        None => Ok(Ref::Unassigned),
        Some(U64OrString::U64(v)) => Ok(Ref::Assigned(v)),
        Some(U64OrString::I64(v)) => u64::try_from(v).map(Ref::Assigned).map_err(D::Error::custom),
        Some(U64OrString::String(s)) => s.trim().parse::<u64>().map(Ref::Assigned).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "unassigned_when_null")]
        collapse: Ref<String>,
        #[serde(default)]
        keep: Ref<Option<String>>,
        #[serde(default, deserialize_with = "unassigned_when_null_or_empty")]
        list: Ref<Vec<String>>,
    }

    #[test]
    fn test_absent_keys_are_unassigned() {
        let parsed: Wrapper = serde_json::from_str("{}").unwrap();
        assert!(parsed.collapse.is_unassigned());
        assert!(parsed.keep.is_unassigned());
        assert!(parsed.list.is_unassigned());
    }

    #[test]
    fn test_null_collapses_only_where_declared() {
        let parsed: Wrapper =
            serde_json::from_str(r#"{ "collapse": null, "keep": null, "list": null }"#).unwrap();
        assert!(parsed.collapse.is_unassigned());
        assert_eq!(parsed.keep, Ref::Assigned(None));
        assert!(parsed.list.is_unassigned());
    }

    #[test]
    fn test_empty_collection_collapses() {
        let parsed: Wrapper = serde_json::from_str(r#"{ "list": [] }"#).unwrap();
        assert!(parsed.list.is_unassigned());

        let parsed: Wrapper = serde_json::from_str(r#"{ "list": ["a"] }"#).unwrap();
        assert_eq!(parsed.list, Ref::Assigned(vec!["a".to_string()]));
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{ "collapse": 42 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_null_block_decodes_as_default() {
        #[derive(Debug, Default, PartialEq, Deserialize)]
        struct Block {
            #[serde(rename = "Count", default)]
            count: u32,
        }

        #[derive(Deserialize)]
        struct Parent {
            #[serde(rename = "Links", default, deserialize_with = "null_as_default")]
            links: Block,
        }

        let parsed: Parent = serde_json::from_str(r#"{ "Links": null }"#).unwrap();
        assert_eq!(parsed.links, Block::default());

        let parsed: Parent = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.links, Block::default());

        let parsed: Parent = serde_json::from_str(r#"{ "Links": { "Count": 2 } }"#).unwrap();
        assert_eq!(parsed.links.count, 2);

        assert!(serde_json::from_str::<Parent>(r#"{ "Links": [] }"#).is_err());
    }

    #[test]
    fn test_member_id_accepts_number_and_string() {
        #[derive(Deserialize)]
        struct Member {
            #[serde(rename = "MemberId", default, deserialize_with = "member_id")]
            id: Ref<String>,
        }

        let parsed: Member = serde_json::from_str(r#"{ "MemberId": 3 }"#).unwrap();
        assert_eq!(parsed.id, Ref::of("3".to_string()));

        let parsed: Member = serde_json::from_str(r#"{ "MemberId": "PSU1" }"#).unwrap();
        assert_eq!(parsed.id, Ref::of("PSU1".to_string()));

        let parsed: Member = serde_json::from_str(r#"{ "MemberId": null }"#).unwrap();
        assert!(parsed.id.is_unassigned());
    }

    #[test]
    fn test_ref_u64_from_string_or_number() {
        #[derive(Deserialize)]
        struct Capacity {
            #[serde(default, deserialize_with = "ref_u64_from_string_or_number")]
            bytes: Ref<u64>,
        }

        let parsed: Capacity = serde_json::from_str(r#"{ "bytes": "1024" }"#).unwrap();
        assert_eq!(parsed.bytes, Ref::of(1024));

        let parsed: Capacity = serde_json::from_str(r#"{ "bytes": 2048 }"#).unwrap();
        assert_eq!(parsed.bytes, Ref::of(2048));

        assert!(serde_json::from_str::<Capacity>(r#"{ "bytes": -1 }"#).is_err());
    }
}
