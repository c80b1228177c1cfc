//! Type discriminator registry.
//!
//! Responsibilities:
//! - Compile `@odata.type` templates (literal text plus `{ver}` wildcards)
//!   into [`TypePattern`]s.
//! - Map a discriminator string to the [`Schema`] that decodes it, trying
//!   patterns in registration order.
//!
//! Does NOT handle:
//! - Decoding fields. A [`Schema`] delegates to the resource's own decoder.
//! - Fetching payloads (see [`crate::reader`]).
//!
//! Invariants:
//! - The first registered pattern that matches wins; registration order is
//!   the only tie-break.
//! - A registry is immutable once shared. Build it fully, then wrap it in an
//!   `Arc` so concurrent resolution is deterministic without locking.

use regex::Regex;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ClientError, Result};
use crate::models::{self, Resource, ResourceKind, ResourceSchema};
use crate::odata;

/// Wildcard token accepted inside a template.
pub const VERSION_WILDCARD: &str = "{ver}";

/// What `{ver}` matches: `v1_2_0`, `v1_0`, `1.0.0`, `1`.
const VERSION_REGEX: &str = r"v?\d+(?:[._]\d+){0,2}";

/// A compiled discriminator template.
#[derive(Debug, Clone)]
pub struct TypePattern {
    template: String,
    regex: Regex,
}

impl TypePattern {
    /// Compile `template`. A leading `#` is optional in matched strings, since
    /// older firmware emits the discriminator without it.
    pub fn new(template: &str) -> Result<Self> {
        let body = template.strip_prefix('#').unwrap_or(template);
        let escaped: Vec<String> = body.split(VERSION_WILDCARD).map(regex::escape).collect();
        let prefix = if template.starts_with('#') { "#?" } else { "" };
        let source = format!("^{prefix}{}$", escaped.join(VERSION_REGEX));

        let regex = Regex::new(&source).map_err(|source| ClientError::InvalidTypePattern {
            template: template.to_string(),
            source,
        })?;

        Ok(Self {
            template: template.to_string(),
            regex,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn matches(&self, type_name: &str) -> bool {
        self.regex.is_match(type_name.trim())
    }
}

/// Decoder entry point stored per schema.
pub type DecodeFn = fn(Value) -> Result<Resource>;

/// A decodable resource shape.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    kind: ResourceKind,
    decode: DecodeFn,
}

impl Schema {
    /// Schema backed by a built-in resource type.
    pub fn of<T: ResourceSchema>() -> Self {
        Self {
            kind: T::KIND,
            decode: models::decode_resource::<T>,
        }
    }

    /// Schema with a custom decoder, e.g. a vendor variant of a built-in kind.
    pub const fn custom(kind: ResourceKind, decode: DecodeFn) -> Self {
        Self { kind, decode }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn decode(&self, payload: Value) -> Result<Resource> {
        (self.decode)(payload)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    pattern: TypePattern,
    schema: Schema,
}

/// Ordered discriminator → schema table.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: Vec<Entry>,
}

impl TypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in resource schema.
    pub fn standard() -> Result<Self> {
        let mut registry = Self::new();
        models::register_all(&mut registry)?;
        debug!(patterns = registry.len(), "Built standard type registry");
        Ok(registry)
    }

    /// Append `patterns` for `schema`. Earlier registrations take precedence.
    pub fn register(&mut self, schema: Schema, patterns: &[&str]) -> Result<&mut Self> {
        for template in patterns {
            self.entries.push(Entry {
                pattern: TypePattern::new(template)?,
                schema,
            });
        }
        Ok(self)
    }

    /// Append the declared patterns of a built-in schema.
    pub fn register_schema<T: ResourceSchema>(&mut self) -> Result<&mut Self> {
        self.register(Schema::of::<T>(), T::TYPE_PATTERNS)
    }

    /// First schema whose pattern matches `type_name`.
    pub fn resolve(&self, type_name: &str) -> Result<&Schema> {
        let found = self
            .entries
            .iter()
            .find(|entry| entry.pattern.matches(type_name));

        match found {
            Some(entry) => {
                trace!(
                    type_name,
                    pattern = entry.pattern.template(),
                    kind = entry.schema.kind().as_str(),
                    "Resolved type discriminator"
                );
                Ok(&entry.schema)
            }
            None => Err(ClientError::SchemaNotFound {
                type_name: type_name.to_string(),
            }),
        }
    }

    /// Resolve the payload's discriminator and decode it.
    pub fn decode(&self, payload: Value) -> Result<Resource> {
        let type_name = odata::odata_type(&payload).ok_or_else(|| {
            ClientError::decode(
                "resource",
                odata::odata_id(&payload).as_ref().map(|id| id.as_str()),
                "missing @odata.type discriminator",
            )
        })?;
        let schema = *self.resolve(type_name)?;
        schema.decode(payload)
    }

    /// Registered templates in precedence order.
    pub fn patterns(&self) -> impl Iterator<Item = (&str, ResourceKind)> {
        self.entries
            .iter()
            .map(|entry| (entry.pattern.template(), entry.schema.kind()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
