//! Reference extraction and embedded-member lookup.
//!
//! Responsibilities:
//! - Turn raw [`Link`] objects into [`ODataId`] references without I/O.
//! - Describe a resource's named outgoing references ([`ResourceLink`]).
//! - Resolve `#/<Collection>/<MemberId>` fragments against an already decoded
//!   composite resource.
//!
//! Does NOT handle:
//! - Fetching. Deferred evaluation lives in [`crate::reader`].
//!
//! Invariants:
//! - Reference lists keep input order and count; `null` or absent becomes an
//!   empty list.
//! - Fragment resolution matches `MemberId` equality and never fails: an
//!   unknown collection or member yields `None`.
//! - Every member of one collection gets a distinct key. A real `MemberId`
//!   always keeps its own key; members without one take their list index, or
//!   `<index>-<n>` when that index is already some other member's key.

use std::collections::HashSet;

use crate::models::{RedfishResource, Resource};
use crate::odata::{Link, ODataId};
use crate::optional::Ref;

/// Reference held by an optional single link.
pub fn to_reference(link: Option<&Link>) -> Option<ODataId> {
    link.map(|l| l.odata_id.clone())
}

/// References held by an optional link list, in order.
pub fn to_references(links: Option<&[Link]>) -> Vec<ODataId> {
    links
        .unwrap_or_default()
        .iter()
        .map(|l| l.odata_id.clone())
        .collect()
}

/// Shape of a named outgoing reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// One related resource.
    Single(ODataId),
    /// An ordered list of related resources.
    Multiple(Vec<ODataId>),
    /// A collection resource whose `Members` are the related resources.
    Collection(ODataId),
}

/// A named outgoing reference of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLink {
    pub name: &'static str,
    pub target: LinkTarget,
}

/// Accumulates [`ResourceLink`]s.
///
/// Absent single or collection links are skipped. Multi-valued links are
/// always emitted, possibly empty.
#[derive(Debug, Default)]
pub struct LinkSet {
    links: Vec<ResourceLink>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(mut self, name: &'static str, link: Option<&Link>) -> Self {
        if let Some(id) = to_reference(link) {
            self.links.push(ResourceLink {
                name,
                target: LinkTarget::Single(id),
            });
        }
        self
    }

    pub fn multiple(mut self, name: &'static str, links: Option<&[Link]>) -> Self {
        self.links.push(ResourceLink {
            name,
            target: LinkTarget::Multiple(to_references(links)),
        });
        self
    }

    pub fn references(mut self, name: &'static str, ids: Vec<ODataId>) -> Self {
        self.links.push(ResourceLink {
            name,
            target: LinkTarget::Multiple(ids),
        });
        self
    }

    pub fn collection(mut self, name: &'static str, link: Option<&Link>) -> Self {
        if let Some(id) = to_reference(link) {
            self.links.push(ResourceLink {
                name,
                target: LinkTarget::Collection(id),
            });
        }
        self
    }

    pub fn build(self) -> Vec<ResourceLink> {
        self.links
    }
}

/// Split `/<Collection>/<MemberId>` (optionally prefixed with `#`).
pub fn parse_fragment(fragment: &str) -> Option<(&str, &str)> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let fragment = fragment.strip_prefix('/')?;
    let (collection, member_id) = fragment.split_once('/')?;
    if collection.is_empty() || member_id.is_empty() || member_id.contains('/') {
        return None;
    }
    Some((collection, member_id))
}

/// The embedded member a fragment names, if the resource has one.
pub fn resolve_fragment(resource: &Resource, fragment: &str) -> Option<Resource> {
    let (collection, member_id) = parse_fragment(fragment)?;
    resource.embedded_member(collection, member_id)
}

/// An entry of an embedded collection addressed by `MemberId`.
pub trait EmbeddedMember {
    fn member_id(&self) -> &Ref<String>;

    fn odata_id_mut(&mut self) -> &mut ODataId;
}

/// Lookup key of every member, in order.
///
/// Real `MemberId`s are claimed first so that an index fallback can never
/// shadow them.
fn member_keys<T: EmbeddedMember>(members: &[T]) -> Vec<String> {
    let mut taken: HashSet<String> = members
        .iter()
        .filter_map(|m| m.member_id().as_option().cloned())
        .collect();

    members
        .iter()
        .enumerate()
        .map(|(index, member)| {
            if let Some(id) = member.member_id().as_option() {
                return id.clone();
            }
            let mut key = index.to_string();
            let mut suffix = 1;
            while taken.contains(&key) {
                key = format!("{index}-{suffix}");
                suffix += 1;
            }
            taken.insert(key.clone());
            key
        })
        .collect()
}

/// Give members without an `@odata.id` the fragment URI
/// `<parent>#/<collection>/<key>`, where the key is the `MemberId` or, for
/// members without one, a list-index key no other member uses.
pub fn assign_member_ids<T: EmbeddedMember>(parent: &ODataId, collection: &str, members: &mut [T]) {
    if parent.is_empty() {
        return;
    }
    let keys = member_keys(members);
    for (member, key) in members.iter_mut().zip(keys) {
        if member.odata_id_mut().is_empty() {
            *member.odata_id_mut() = parent.with_fragment(&format!("/{collection}/{key}"));
        }
    }
}

/// Find `member_id` in `members` and lift it into a [`Resource`].
///
/// Members without a `MemberId` answer to the key [`assign_member_ids`]
/// gave them; a real `MemberId` always wins over an index key.
pub fn find_member<T>(members: &[T], member_id: &str) -> Option<Resource>
where
    T: EmbeddedMember + Clone + Into<Resource>,
{
    members
        .iter()
        .zip(member_keys(members))
        .find(|(_, key)| key == member_id)
        .map(|(m, _)| m.clone().into())
}
