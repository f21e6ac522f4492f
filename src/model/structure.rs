//! Structures: the recursive schema tree
//!
//! A structure is a set of attributes, unique by name. Attributes of kind
//! `STRUCTURE` (and lists of structures) own a nested structure, so a type
//! is the root of a tree of arbitrary depth. Paths through the tree are
//! dot-separated attribute names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::attribute::{Attribute, AttributeId};
use super::kind::AttributeKind;
use crate::item::{ItemValue, Record};

/// Separator between attribute names in a path.
pub const PATH_SEPARATOR: char = '.';

/// Set of attributes, possibly nested inside another attribute.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Structure {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Structure {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    /// Local attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Resolves an attribute by dotted path, descending through nested
    /// structures. Absent if a segment is missing or an intermediate
    /// attribute has no nested structure.
    pub fn resolve_by_path(&self, path: &str) -> Option<&Attribute> {
        match path.split_once(PATH_SEPARATOR) {
            None => self.attribute(path),
            Some((head, rest)) => self
                .attribute(head)?
                .nested_structure
                .as_ref()?
                .resolve_by_path(rest),
        }
    }

    /// Reverse lookup: dotted path of the attribute carrying `id`.
    ///
    /// Local attributes are searched first, then every attribute holding a
    /// nested structure, depth first. Duplicate ids are rejected by the
    /// type validator; which duplicate is found here is not defined.
    pub fn resolve_by_id(&self, id: AttributeId) -> Option<String> {
        if let Some(attr) = self.attributes.iter().find(|a| a.id == Some(id)) {
            return Some(attr.name.clone());
        }

        self.attributes
            .iter()
            .filter(|a| a.holds_structure())
            .find_map(|a| {
                let nested = a.nested_structure.as_ref()?.resolve_by_id(id)?;
                Some(format!("{}{}{}", a.name, PATH_SEPARATOR, nested))
            })
    }

    /// Flattens the tree: local attributes followed by nested ones, depth first.
    pub fn all_attributes(&self) -> Vec<&Attribute> {
        let mut out = Vec::new();
        self.collect_attributes(&mut out);
        out
    }

    fn collect_attributes<'a>(&'a self, out: &mut Vec<&'a Attribute>) {
        out.extend(self.attributes.iter());
        for attr in &self.attributes {
            if let Some(nested) = &attr.nested_structure {
                nested.collect_attributes(out);
            }
        }
    }

    /// Builds the flat `id -> paths` index of the whole tree.
    pub fn index(&self) -> AttributeIndex {
        let mut index = AttributeIndex::default();
        self.index_into("", &mut index);
        index
    }

    fn index_into(&self, prefix: &str, index: &mut AttributeIndex) {
        for attr in &self.attributes {
            let path = format!("{}{}", prefix, attr.name);
            if let Some(id) = attr.id {
                index.by_id.entry(id).or_default().push(path.clone());
            }
            if let Some(nested) = &attr.nested_structure {
                nested.index_into(&format!("{}{}", path, PATH_SEPARATOR), index);
            }
        }
    }

    /// Returns true if any attribute contributing to the unique key is
    /// flagged unique. Attributes inside lists of structures do not count.
    pub fn has_unique_attributes(&self) -> bool {
        !self.unique_paths().is_empty()
    }

    /// Computes the unique key of a record: `path -> value` for every
    /// attribute flagged unique, reached through nested structures.
    ///
    /// Absent when the structure defines no unique attribute or no record
    /// is given. Missing values appear as `ItemValue::Null`.
    pub fn unique_key(&self, record: Option<&Record>) -> Option<BTreeMap<String, ItemValue>> {
        let record = record?;
        let paths = self.unique_paths();
        if paths.is_empty() {
            return None;
        }

        let key = paths
            .into_iter()
            .map(|path| {
                let value = record
                    .try_get(&path)
                    .ok()
                    .flatten()
                    .cloned()
                    .unwrap_or(ItemValue::Null);
                (path, value)
            })
            .collect();
        Some(key)
    }

    fn unique_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_unique_paths("", &mut paths);
        paths
    }

    fn collect_unique_paths(&self, prefix: &str, out: &mut Vec<String>) {
        for attr in &self.attributes {
            let path = format!("{}{}", prefix, attr.name);
            if attr.unique {
                out.push(path.clone());
            }
            // Lists of structures have no single value per path
            if attr.kind == Some(AttributeKind::Structure) {
                if let Some(nested) = &attr.nested_structure {
                    nested.collect_unique_paths(&format!("{}{}", path, PATH_SEPARATOR), out);
                }
            }
        }
    }
}

/// Flat index of attribute ids to the dotted paths declaring them.
///
/// Built once per validation pass so that duplicate detection and
/// dependency checks do not search the tree repeatedly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeIndex {
    by_id: BTreeMap<AttributeId, Vec<String>>,
}

impl AttributeIndex {
    pub fn contains(&self, id: AttributeId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Paths of every attribute declaring `id`.
    pub fn paths(&self, id: AttributeId) -> &[String] {
        self.by_id.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids declared more than once, in ascending order.
    pub fn duplicates(&self) -> impl Iterator<Item = (AttributeId, &[String])> {
        self.by_id
            .iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(id, paths)| (*id, paths.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
