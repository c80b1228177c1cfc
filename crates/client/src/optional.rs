//! Tri-state optional value for resource fields.
//!
//! Responsibilities:
//! - Distinguish "the service did not return this field" (`Unassigned`) from
//!   "the service returned this value" (`Assigned`), including an explicit
//!   JSON `null` when the field is declared as `Ref<Option<T>>`.
//! - Apply a per-field [`RefPolicy`] that collapses `null` and/or empty
//!   collections to `Unassigned`.
//!
//! Does NOT handle:
//! - Choosing the policy. Each schema fixes it per field through the serde
//!   attribute it declares (see [`crate::serde_helpers`]).
//!
//! Invariants:
//! - An absent key always decodes to `Unassigned`.
//! - Combinators never invoke their closures on `Unassigned`.
//! - Downstream merge code treats `Unassigned` as "leave existing state alone"
//!   and `Assigned(v)` as "overwrite with v" ([`Ref::assign_to`]).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Reading a value out of an unassigned [`Ref`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Value is not assigned")]
pub struct IllegalStateError;

/// A field value that is either unassigned or carries a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ref<T> {
    /// The field was absent (or collapsed by policy).
    Unassigned,
    /// The field was present.
    Assigned(T),
}

impl<T> Ref<T> {
    pub const fn unassigned() -> Self {
        Self::Unassigned
    }

    pub const fn of(value: T) -> Self {
        Self::Assigned(value)
    }

    pub const fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    pub const fn is_unassigned(&self) -> bool {
        matches!(self, Self::Unassigned)
    }

    /// Borrow the value, failing with [`IllegalStateError`] when unassigned.
    pub fn get(&self) -> Result<&T, IllegalStateError> {
        match self {
            Self::Assigned(v) => Ok(v),
            Self::Unassigned => Err(IllegalStateError),
        }
    }

    pub const fn as_ref(&self) -> Ref<&T> {
        match self {
            Self::Assigned(v) => Ref::Assigned(v),
            Self::Unassigned => Ref::Unassigned,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Ref<U> {
        match self {
            Self::Assigned(v) => Ref::Assigned(f(v)),
            Self::Unassigned => Ref::Unassigned,
        }
    }

    pub fn and_then<U, F: FnOnce(T) -> Ref<U>>(self, f: F) -> Ref<U> {
        match self {
            Self::Assigned(v) => f(v),
            Self::Unassigned => Ref::Unassigned,
        }
    }

    /// Keep `self` when assigned, otherwise fall back to `other`.
    pub fn or(self, other: Ref<T>) -> Ref<T> {
        match self {
            Self::Assigned(_) => self,
            Self::Unassigned => other,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Assigned(v) => v,
            Self::Unassigned => default,
        }
    }

    pub fn unwrap_or_else<F: FnOnce() -> T>(self, f: F) -> T {
        match self {
            Self::Assigned(v) => v,
            Self::Unassigned => f(),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Assigned(v) => Some(v),
            Self::Unassigned => None,
        }
    }

    pub const fn as_option(&self) -> Option<&T> {
        match self {
            Self::Assigned(v) => Some(v),
            Self::Unassigned => None,
        }
    }

    /// Overwrite `target` only when assigned.
    pub fn assign_to(self, target: &mut T) {
        if let Self::Assigned(v) = self {
            *target = v;
        }
    }
}

impl<T> Ref<Option<T>> {
    /// Flatten an assigned-null into `Unassigned`.
    pub fn flatten(self) -> Ref<T> {
        match self {
            Self::Assigned(Some(v)) => Ref::Assigned(v),
            _ => Ref::Unassigned,
        }
    }
}

impl<T> Default for Ref<T> {
    fn default() -> Self {
        Self::Unassigned
    }
}

impl<T> From<Option<T>> for Ref<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unassigned, Self::Assigned)
    }
}

/// A present key always decodes as `Assigned`; absence is handled by
/// `#[serde(default)]`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Ref<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::Assigned)
    }
}

impl<T: Serialize> Serialize for Ref<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Assigned(v) => v.serialize(serializer),
            Self::Unassigned => serializer.serialize_none(),
        }
    }
}

/// Per-field decoding policy for [`Ref`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefPolicy {
    /// JSON `null` decodes to `Unassigned` instead of `Assigned(null)`.
    pub collapse_on_null: bool,
    /// An empty JSON array or object decodes to `Unassigned`.
    pub collapse_on_empty: bool,
}

impl RefPolicy {
    pub const KEEP_NULL: Self = Self {
        collapse_on_null: false,
        collapse_on_empty: false,
    };

    pub const COLLAPSE_NULL: Self = Self {
        collapse_on_null: true,
        collapse_on_empty: false,
    };

    pub const COLLAPSE_NULL_OR_EMPTY: Self = Self {
        collapse_on_null: true,
        collapse_on_empty: true,
    };

    /// Decode a raw JSON field (`None` = key absent) under this policy.
    pub fn apply<T: DeserializeOwned>(self, raw: Option<Value>) -> Result<Ref<T>, serde_json::Error> {
        let Some(value) = raw else {
            return Ok(Ref::Unassigned);
        };
        if self.collapses(&value) {
            return Ok(Ref::Unassigned);
        }
        serde_json::from_value(value).map(Ref::Assigned)
    }

    fn collapses(self, value: &Value) -> bool {
        match value {
            Value::Null => self.collapse_on_null,
            Value::Array(items) => self.collapse_on_empty && items.is_empty(),
            Value::Object(map) => self.collapse_on_empty && map.is_empty(),
            _ => false,
        }
    }
}
