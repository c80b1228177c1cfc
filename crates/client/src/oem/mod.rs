//! Vendor (OEM) extension resolution.
//!
//! Responsibilities:
//! - Detach the `Oem`, `Links.Oem` and `Actions.Oem` objects from a payload
//!   before structural decoding ([`RawOem`]).
//! - Route each namespace key to the parsers a schema declares for that
//!   attachment point ([`OemBindings`]) and keep the first variant that parses.
//! - Expose the result as a closed [`OemExtension`] union with typed lookups.
//!
//! Does NOT handle:
//! - Deciding what an extension means. Resource accessors interpret it.
//!
//! Invariants:
//! - A namespace nobody claims is never an error. It is kept verbatim in
//!   [`OemExtensions::unrecognized`].
//! - A claimed namespace whose every variant fails produces an
//!   [`OemDecodeError`], scoped to that namespace. Other namespaces and all
//!   non-OEM fields are unaffected.
//! - Variants are tried in declared order; the first structurally valid parse
//!   wins.

pub mod dell;
pub mod rackscale;

use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::trace;

/// Where an OEM object sits inside a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OemAttachment {
    /// `Oem` at the resource top level.
    TopLevel,
    /// `Links.Oem`.
    Links,
    /// `Actions.Oem`.
    Actions,
}

impl OemAttachment {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TopLevel => "Oem",
            Self::Links => "Links.Oem",
            Self::Actions => "Actions.Oem",
        }
    }
}

impl fmt::Display for OemAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A claimed vendor namespace that matched none of its variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("OEM extension '{namespace}' at {attachment} failed to decode: {reason}")]
pub struct OemDecodeError {
    pub namespace: String,
    pub attachment: OemAttachment,
    pub reason: String,
}

/// Parses one variant shape of a namespace.
pub type ParseFn = fn(&Value) -> Result<OemExtension, serde_json::Error>;

/// One candidate shape for a namespace.
#[derive(Debug, Clone, Copy)]
pub struct OemVariant {
    pub name: &'static str,
    pub parse: ParseFn,
}

impl OemVariant {
    pub const fn new(name: &'static str, parse: ParseFn) -> Self {
        Self { name, parse }
    }
}

/// All candidate shapes for one namespace key, in precedence order.
#[derive(Debug, Clone, Copy)]
pub struct OemParser {
    pub namespace: &'static str,
    pub variants: &'static [OemVariant],
}

/// The parsers a schema declares per attachment point.
#[derive(Debug, Clone, Copy, Default)]
pub struct OemBindings {
    pub top_level: &'static [OemParser],
    pub links: &'static [OemParser],
    pub actions: &'static [OemParser],
}

impl OemBindings {
    /// No vendor parsers; every namespace ends up unrecognized.
    pub const NONE: Self = Self {
        top_level: &[],
        links: &[],
        actions: &[],
    };

    pub const fn parsers(&self, attachment: OemAttachment) -> &'static [OemParser] {
        match attachment {
            OemAttachment::TopLevel => self.top_level,
            OemAttachment::Links => self.links,
            OemAttachment::Actions => self.actions,
        }
    }

    /// Resolve every attachment point. The first failure (if any) is returned
    /// alongside the slots that did resolve.
    pub fn resolve(&self, raw: RawOem) -> (OemSlots, Option<OemDecodeError>) {
        let mut first_error = None;
        let mut resolve = |attachment: OemAttachment, value: Option<Value>| {
            let (extensions, error) = resolve_attachment(self.parsers(attachment), attachment, value);
            if first_error.is_none() {
                first_error = error;
            }
            extensions
        };

        let slots = OemSlots {
            top_level: resolve(OemAttachment::TopLevel, raw.top_level),
            links: resolve(OemAttachment::Links, raw.links),
            actions: resolve(OemAttachment::Actions, raw.actions),
        };
        (slots, first_error)
    }
}

/// Decode `value` as `T` and wrap it.
pub fn parse_as<T>(value: &Value) -> Result<OemExtension, serde_json::Error>
where
    T: DeserializeOwned + Into<OemExtension>,
{
    T::deserialize(value).map(Into::into)
}

/// OEM objects detached from a payload, one per attachment point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOem {
    pub top_level: Option<Value>,
    pub links: Option<Value>,
    pub actions: Option<Value>,
}

impl RawOem {
    /// Remove the OEM objects from `payload`, leaving every other field as is.
    pub fn detach(payload: &mut Value) -> Self {
        let Some(object) = payload.as_object_mut() else {
            return Self::default();
        };
        let nested = |object: &mut Map<String, Value>, block: &str| {
            object
                .get_mut(block)
                .and_then(Value::as_object_mut)
                .and_then(|block| block.remove("Oem"))
        };

        Self {
            top_level: object.remove("Oem"),
            links: nested(object, "Links"),
            actions: nested(object, "Actions"),
        }
    }
}

fn resolve_attachment(
    parsers: &[OemParser],
    attachment: OemAttachment,
    raw: Option<Value>,
) -> (OemExtensions, Option<OemDecodeError>) {
    let mut extensions = OemExtensions::default();
    let namespaces = match raw {
        Some(Value::Object(namespaces)) => namespaces,
        None | Some(Value::Null) => return (extensions, None),
        Some(other) => {
            trace!(%attachment, kind = json_kind(&other), "Ignoring non-object OEM block");
            return (extensions, None);
        }
    };

    let mut first_error = None;
    for (namespace, value) in namespaces {
        let Some(parser) = parsers.iter().find(|p| p.namespace == namespace) else {
            trace!(%attachment, namespace = %namespace, "Unrecognized OEM namespace");
            extensions.unrecognized.insert(namespace, value);
            continue;
        };
        if value.is_null() {
            continue;
        }

        match parse_variants(parser, &value) {
            Ok(extension) => extensions.resolved.push((namespace, extension)),
            Err(reason) => {
                if first_error.is_none() {
                    first_error = Some(OemDecodeError {
                        namespace,
                        attachment,
                        reason,
                    });
                }
            }
        }
    }
    (extensions, first_error)
}

fn parse_variants(parser: &OemParser, value: &Value) -> Result<OemExtension, String> {
    let mut failures = Vec::with_capacity(parser.variants.len());
    for variant in parser.variants {
        match (variant.parse)(value) {
            Ok(extension) => {
                trace!(namespace = parser.namespace, variant = variant.name, "Resolved OEM variant");
                return Ok(extension);
            }
            Err(e) => failures.push(format!("{}: {e}", variant.name)),
        }
    }
    Err(failures.join("; "))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolved extensions at one attachment point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OemExtensions {
    resolved: Vec<(String, OemExtension)>,
    unrecognized: Map<String, Value>,
}

impl OemExtensions {
    /// Keep every namespace as opaque JSON. Used for embedded members that
    /// declare no vendor parsers.
    pub fn opaque(raw: Option<Value>) -> Self {
        let unrecognized = match raw {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self {
            resolved: Vec::new(),
            unrecognized,
        }
    }

    /// First resolved extension of type `T`.
    pub fn get<T: OemPayload>(&self) -> Option<&T> {
        self.resolved.iter().find_map(|(_, ext)| T::from_extension(ext))
    }

    /// The resolved extension for a namespace key.
    pub fn namespace(&self, namespace: &str) -> Option<&OemExtension> {
        self.resolved
            .iter()
            .find(|(ns, _)| ns == namespace)
            .map(|(_, ext)| ext)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OemExtension)> {
        self.resolved.iter().map(|(ns, ext)| (ns.as_str(), ext))
    }

    /// Namespaces no parser claimed, verbatim.
    pub fn unrecognized(&self) -> &Map<String, Value> {
        &self.unrecognized
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty() && self.unrecognized.is_empty()
    }
}

/// OEM extensions of one resource, per attachment point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OemSlots {
    pub top_level: OemExtensions,
    pub links: OemExtensions,
    pub actions: OemExtensions,
}

impl OemSlots {
    pub fn at(&self, attachment: OemAttachment) -> &OemExtensions {
        match attachment {
            OemAttachment::TopLevel => &self.top_level,
            OemAttachment::Links => &self.links,
            OemAttachment::Actions => &self.actions,
        }
    }

    /// Namespaces left opaque across all attachment points.
    pub fn unrecognized_count(&self) -> usize {
        self.top_level.unrecognized.len()
            + self.links.unrecognized.len()
            + self.actions.unrecognized.len()
    }
}

/// Serde helper for embedded members: keep their `Oem` object as opaque
/// top-level extensions.
pub fn opaque_slots<'de, D>(deserializer: D) -> Result<OemSlots, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(OemSlots {
        top_level: OemExtensions::opaque(raw),
        ..OemSlots::default()
    })
}

/// A payload type carried by one [`OemExtension`] variant.
pub trait OemPayload: Sized {
    fn from_extension(extension: &OemExtension) -> Option<&Self>;
}

macro_rules! oem_extensions {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        /// Every vendor extension shape this crate understands.
        #[derive(Debug, Clone, PartialEq)]
        pub enum OemExtension {
            $($variant($ty)),+
        }

        $(
            impl From<$ty> for OemExtension {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl OemPayload for $ty {
                fn from_extension(extension: &OemExtension) -> Option<&Self> {
                    match extension {
                        OemExtension::$variant(value) => Some(value),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )+
    };
}

oem_extensions! {
    RackChassis(rackscale::RackChassisOem),
    DrawerChassis(rackscale::DrawerChassisOem),
    RackScaleChassis(rackscale::ChassisOem),
    RackScaleChassisLinks(rackscale::ChassisLinksOem),
    RackScaleSystem(rackscale::SystemOem),
    RackScaleDrive(rackscale::DriveOem),
    RackScaleProcessor(rackscale::ProcessorOem),
    RackScaleEndpoint(rackscale::EndpointOem),
    StartDeepDiscovery(rackscale::StartDeepDiscoveryAction),
    ChangeTpmState(rackscale::ChangeTpmStateAction),
    DellSystem(dell::DellSystemOem),
}
