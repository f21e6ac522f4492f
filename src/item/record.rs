//! Records and items with dotted-path access
//!
//! A record maps attribute names to values; values of structure attributes
//! are nested records. Paths address nested values with `.` separators.
//! Setting a path creates missing intermediate records. Walking through an
//! intermediate value that exists but is not a record is a corrupt access:
//! the `try_*` accessors report it as `ItemError::CorruptValue`, the plain
//! accessors panic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::errors::{ItemError, ItemResult};
use super::value::ItemValue;
use crate::model::PATH_SEPARATOR;

/// Name-to-value map, possibly nested.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: BTreeMap<String, ItemValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `set`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Record::set`].
    pub fn with(mut self, path: &str, value: impl Into<ItemValue>) -> Self {
        self.set(path, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Top-level entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ItemValue)> {
        self.values.iter()
    }

    /// Value at a dotted path.
    ///
    /// # Panics
    ///
    /// Panics if an intermediate segment holds a non-record value.
    pub fn get(&self, path: &str) -> Option<&ItemValue> {
        self.try_get(path).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Value at a dotted path, reporting corrupt intermediates.
    ///
    /// Null intermediates count as absent.
    pub fn try_get(&self, path: &str) -> ItemResult<Option<&ItemValue>> {
        let mut current = self;
        let mut segments = path.split(PATH_SEPARATOR).peekable();
        let mut walked = String::new();

        while let Some(segment) = segments.next() {
            let value = match current.values.get(segment) {
                Some(value) => value,
                None => return Ok(None),
            };
            if segments.peek().is_none() {
                return Ok(Some(value));
            }

            push_segment(&mut walked, segment);
            match value {
                ItemValue::Record(nested) => current = nested,
                ItemValue::Null => return Ok(None),
                other => return Err(corrupt(path, &walked, other)),
            }
        }

        Ok(None)
    }

    /// Stores a value at a dotted path, creating missing nested records.
    ///
    /// # Panics
    ///
    /// Panics if the path is blank or has an empty segment, or if an
    /// intermediate segment holds a non-record value.
    pub fn set(&mut self, path: &str, value: impl Into<ItemValue>) {
        self.try_set(path, value).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Stores a value at a dotted path, reporting invalid paths and corrupt
    /// intermediates instead of panicking. Nothing is modified on error.
    pub fn try_set(&mut self, path: &str, value: impl Into<ItemValue>) -> ItemResult<()> {
        check_path(path)?;
        let value = value.into();

        // Check before creating anything so a failed set leaves no trace
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        let (last, parents) = match segments.split_last() {
            Some(split) => split,
            None => return Err(ItemError::InvalidPath(path.to_string())),
        };

        let mut walked = String::new();
        let mut probe = Some(&*self);
        for segment in parents {
            push_segment(&mut walked, segment);
            probe = match probe.and_then(|r| r.values.get(*segment)) {
                Some(ItemValue::Record(nested)) => Some(nested),
                Some(ItemValue::Null) | None => None,
                Some(other) => return Err(corrupt(path, &walked, other)),
            };
        }

        let mut current = self;
        for segment in parents {
            let slot = current
                .values
                .entry((*segment).to_string())
                .or_insert(ItemValue::Null);
            if !matches!(slot, ItemValue::Record(_)) {
                *slot = ItemValue::Record(Record::default());
            }
            current = match slot {
                ItemValue::Record(nested) => nested,
                _ => unreachable!("slot was just replaced by a record"),
            };
        }

        current.values.insert((*last).to_string(), value);
        Ok(())
    }

    /// Removes and returns the value at a dotted path.
    ///
    /// # Panics
    ///
    /// Panics if an intermediate segment holds a non-record value.
    pub fn remove(&mut self, path: &str) -> Option<ItemValue> {
        self.try_remove(path).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Removes the value at a dotted path, reporting corrupt intermediates.
    pub fn try_remove(&mut self, path: &str) -> ItemResult<Option<ItemValue>> {
        match path.split_once(PATH_SEPARATOR) {
            None => Ok(self.values.remove(path)),
            Some((head, rest)) => match self.values.get_mut(head) {
                None | Some(ItemValue::Null) => Ok(None),
                Some(ItemValue::Record(nested)) => {
                    nested.try_remove(rest).map_err(|e| prefixed(e, head))
                }
                Some(other) => Err(corrupt(path, head, other)),
            },
        }
    }

    /// Depth-first flattening of nested records into `"a.b.c" -> value`.
    ///
    /// Lists and scalars are leaves; empty nested records contribute nothing.
    pub fn flatten(&self) -> BTreeMap<String, &ItemValue> {
        let mut out = BTreeMap::new();
        self.flatten_into("", &mut out);
        out
    }

    fn flatten_into<'a>(&'a self, prefix: &str, out: &mut BTreeMap<String, &'a ItemValue>) {
        for (name, value) in &self.values {
            let path = format!("{}{}", prefix, name);
            match value {
                ItemValue::Record(nested) => {
                    nested.flatten_into(&format!("{}{}", path, PATH_SEPARATOR), out)
                }
                other => {
                    out.insert(path, other);
                }
            }
        }
    }
}

impl FromIterator<(String, ItemValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, ItemValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A concrete record validated against a generic type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    #[serde(default)]
    pub values: Record,
}

impl Item {
    /// Create an empty item of the given type.
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            id: None,
            type_id: Some(type_id.into()),
            values: Record::default(),
        }
    }

    /// Builder-style `set`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Record::set`].
    pub fn with(mut self, path: &str, value: impl Into<ItemValue>) -> Self {
        self.values.set(path, value);
        self
    }

    pub fn get(&self, path: &str) -> Option<&ItemValue> {
        self.values.get(path)
    }

    pub fn set(&mut self, path: &str, value: impl Into<ItemValue>) {
        self.values.set(path, value)
    }

    pub fn try_set(&mut self, path: &str, value: impl Into<ItemValue>) -> ItemResult<()> {
        self.values.try_set(path, value)
    }

    pub fn remove(&mut self, path: &str) -> Option<ItemValue> {
        self.values.remove(path)
    }

    pub fn flatten(&self) -> BTreeMap<String, &ItemValue> {
        self.values.flatten()
    }
}

fn check_path(path: &str) -> ItemResult<()> {
    if path.split(PATH_SEPARATOR).any(|s| s.trim().is_empty()) {
        return Err(ItemError::InvalidPath(path.to_string()));
    }
    Ok(())
}

fn push_segment(walked: &mut String, segment: &str) {
    if !walked.is_empty() {
        walked.push(PATH_SEPARATOR);
    }
    walked.push_str(segment);
}

fn corrupt(path: &str, segment: &str, found: &ItemValue) -> ItemError {
    ItemError::CorruptValue {
        path: path.to_string(),
        segment: segment.to_string(),
        found: found.type_name(),
    }
}

fn prefixed(err: ItemError, head: &str) -> ItemError {
    match err {
        ItemError::CorruptValue {
            path,
            segment,
            found,
        } => ItemError::CorruptValue {
            path: format!("{}{}{}", head, PATH_SEPARATOR, path),
            segment: format!("{}{}{}", head, PATH_SEPARATOR, segment),
            found,
        },
        other => other,
    }
}
