//! Capability catalogs: the fixed, per-category tables of introspection
//! members a front-end exposes, split by flavor and sorted by name.
//!
//! A catalog is built from a table of [`Capability`] entries once per
//! process and never invoked during construction. Every member named in
//! [`DENYLIST`] is dropped from every category.

use cxtree_core::{Category, Flavor};
use serde::Serialize;

/// Member names excluded from every catalog, with the reason each is unsafe
/// or meaningless to harvest.
pub const DENYLIST: &[(&str, &str)] = &[
    ("children", "structural; the tree builder walks children itself"),
    ("tokens", "structural; collected once per node by the tree builder"),
    ("translation_unit", "back-reference to the whole unit, not a node attribute"),
    ("evaluate", "constant folding aborts on non-constant expressions"),
    ("field_offsetof", "requires a record field context and a field name argument"),
    ("objc_type_encoding", "crashes outside Objective-C declarations"),
    ("completion_string", "only meaningful inside code completion results"),
    ("pretty_printer", "returns a printer object bound to the live unit"),
    ("walk_preorder", "recursive generator over the live tree"),
    ("xdata", "raw internal cursor word"),
    ("data", "raw internal cursor pointers"),
    ("hash", "per-process value, breaks output determinism"),
    ("extent", "source range handle; position is captured as line and column"),
    ("location", "source location handle; position is captured as line and column"),
];

/// Whether `name` is on the [`DENYLIST`].
#[must_use]
pub fn is_denied(name: &str) -> bool {
    DENYLIST.iter().any(|(denied, _)| *denied == name)
}

/// One harvestable member: its attribute name, its flavor, and the reader
/// that produces its value from a live object.
#[derive(Debug, Clone, Copy)]
pub struct Capability<R> {
    pub name: &'static str,
    pub flavor: Flavor,
    pub read: R,
}

impl<R> Capability<R> {
    pub const fn new(name: &'static str, flavor: Flavor, read: R) -> Self {
        Self { name, flavor, read }
    }
}

/// The capabilities of one category, partitioned by flavor.
#[derive(Debug)]
pub struct Catalog<R> {
    category: Category,
    checks: Vec<Capability<R>>,
    derived: Vec<Capability<R>>,
    properties: Vec<Capability<R>>,
}

impl<R> Catalog<R> {
    /// Build a catalog from a raw table: drop denylisted names, partition by
    /// flavor, sort each partition by name.
    #[must_use]
    pub fn from_table(category: Category, table: Vec<Capability<R>>) -> Self {
        let mut checks = Vec::new();
        let mut derived = Vec::new();
        let mut properties = Vec::new();
        for capability in table {
            if is_denied(capability.name) {
                continue;
            }
            match capability.flavor {
                Flavor::Check => checks.push(capability),
                Flavor::Get => derived.push(capability),
                Flavor::Property => properties.push(capability),
            }
        }
        for list in [&mut checks, &mut derived, &mut properties] {
            list.sort_by_key(|c| c.name);
        }
        Self {
            category,
            checks,
            derived,
            properties,
        }
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn checks(&self) -> &[Capability<R>] {
        &self.checks
    }

    #[must_use]
    pub fn derived(&self) -> &[Capability<R>] {
        &self.derived
    }

    #[must_use]
    pub fn properties(&self) -> &[Capability<R>] {
        &self.properties
    }

    /// Every capability: checks, then derived values, then properties.
    pub fn iter(&self) -> impl Iterator<Item = &Capability<R>> {
        self.checks
            .iter()
            .chain(&self.derived)
            .chain(&self.properties)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len() + self.derived.len() + self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|c| c.name == name)
    }

    /// Names only, for display.
    #[must_use]
    pub fn listing(&self) -> CatalogListing {
        let names = |list: &[Capability<R>]| -> Vec<&'static str> {
            list.iter().map(|c| c.name).collect()
        };
        CatalogListing {
            category: self.category,
            checks: names(&self.checks),
            derived: names(&self.derived),
            properties: names(&self.properties),
        }
    }
}

/// Serializable view of a catalog's member names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogListing {
    pub category: Category,
    pub checks: Vec<&'static str>,
    pub derived: Vec<&'static str>,
    pub properties: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> Vec<Capability<u8>> {
        vec![
            Capability::new("spelling", Flavor::Property, 0),
            Capability::new("is_definition", Flavor::Check, 1),
            Capability::new("get_usr", Flavor::Get, 2),
            Capability::new("is_anonymous", Flavor::Check, 3),
            Capability::new("children", Flavor::Property, 4),
            Capability::new("hash", Flavor::Property, 5),
            Capability::new("displayname", Flavor::Property, 6),
        ]
    }

    #[test]
    fn partitions_and_sorts_by_name() {
        let catalog = Catalog::from_table(Category::Node, table());
        let listing = catalog.listing();
        assert_eq!(listing.checks, vec!["is_anonymous", "is_definition"]);
        assert_eq!(listing.derived, vec!["get_usr"]);
        assert_eq!(listing.properties, vec!["displayname", "spelling"]);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn denylisted_names_are_excluded() {
        let catalog = Catalog::from_table(Category::Node, table());
        assert!(!catalog.contains("children"));
        assert!(!catalog.contains("hash"));
        assert!(catalog.contains("spelling"));
    }

    #[test]
    fn readers_follow_their_entries() {
        let catalog = Catalog::from_table(Category::Node, table());
        let reads: Vec<u8> = catalog.iter().map(|c| c.read).collect();
        assert_eq!(reads, vec![3, 1, 2, 6, 0]);
    }

    #[test]
    fn every_denylist_entry_has_a_reason() {
        for (name, reason) in DENYLIST {
            assert!(!name.is_empty());
            assert!(!reason.is_empty(), "{name} has no reason");
        }
    }
}
