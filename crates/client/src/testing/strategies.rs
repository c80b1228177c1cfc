//! Proptest strategies for discriminators and optional-field payloads.

use proptest::prelude::*;
use serde_json::{Value, json};

/// Version segment spellings accepted by `{ver}`.
pub fn version_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u8..4, 0u8..20, 0u8..10).prop_map(|(a, b, c)| format!("v{a}_{b}_{c}")),
        (0u8..4, 0u8..20).prop_map(|(a, b)| format!("v{a}_{b}")),
        (0u8..4, 0u8..20, 0u8..10).prop_map(|(a, b, c)| format!("{a}.{b}.{c}")),
        (1u8..4).prop_map(|a| format!("v{a}")),
    ]
}

/// `#<Namespace>.<version>.<Type>` discriminators with generated names.
pub fn discriminator_strategy() -> impl Strategy<Value = (String, String)> {
    ("[A-Z][a-zA-Z]{2,12}", version_strategy()).prop_map(|(name, version)| {
        let template = format!("#{name}.{{ver}}.{name}");
        let concrete = format!("#{name}.{version}.{name}");
        (template, concrete)
    })
}

/// JSON values a `Ref` field may see on the wire.
pub fn field_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!([])),
        Just(json!({})),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,16}".prop_map(|s| json!(s)),
        prop::collection::vec(any::<u16>(), 1..4).prop_map(|v| json!(v)),
    ]
}
