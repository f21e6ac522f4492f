//! Attribute definitions
//!
//! An attribute is one named, typed field of a structure. Which of the
//! optional fields may be set depends on the attribute kind; the type
//! validator enforces that, the model itself accepts any combination so
//! that a single validation pass can report every defect.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::kind::AttributeKind;
use super::structure::Structure;

/// Identifier of an attribute, unique across a whole type tree.
pub type AttributeId = i64;

/// A named scale factor relative to the base unit of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub factor: f64,
}

impl Unit {
    pub fn new(name: impl Into<String>, factor: f64) -> Self {
        Self {
            name: name.into(),
            factor,
        }
    }

    /// The base unit is the one with factor 1.0.
    pub fn is_base(&self) -> bool {
        self.factor == 1.0
    }
}

/// Field definition within a structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AttributeId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AttributeKind>,
    /// Element kind, only for `LIST` attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<AttributeKind>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub mandatory: bool,
    /// Only for `STRUCTURE` attributes and lists of structures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_structure: Option<Structure>,
    /// Lower bound: length for text, value for numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound: length for text, value for numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub value_proposal_dependencies: BTreeSet<AttributeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<Unit>,
}

impl Attribute {
    /// Create an attribute with the given id, name and kind; everything else unset.
    pub fn new(id: AttributeId, name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Create a `LIST` attribute of the given element kind.
    pub fn list(id: AttributeId, name: impl Into<String>, value_type: AttributeKind) -> Self {
        Self {
            value_type: Some(value_type),
            ..Self::new(id, name, AttributeKind::List)
        }
    }

    /// Create a `STRUCTURE` attribute owning the given nested structure.
    pub fn structure(id: AttributeId, name: impl Into<String>, nested: Structure) -> Self {
        Self {
            nested_structure: Some(nested),
            ..Self::new(id, name, AttributeKind::Structure)
        }
    }

    /// Create a `LIST` of `STRUCTURE` attribute.
    pub fn structure_list(id: AttributeId, name: impl Into<String>, nested: Structure) -> Self {
        Self {
            nested_structure: Some(nested),
            ..Self::list(id, name, AttributeKind::Structure)
        }
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Marks the attribute unique and mandatory.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self.mandatory = true;
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_units(mut self, units: Vec<Unit>) -> Self {
        self.units = units;
        self
    }

    pub fn with_dependencies(mut self, ids: impl IntoIterator<Item = AttributeId>) -> Self {
        self.value_proposal_dependencies = ids.into_iter().collect();
        self
    }

    /// Unit-based attributes carry their values wrapped in a unit.
    pub fn is_unit_based(&self) -> bool {
        !self.units.is_empty()
    }

    /// Returns the kind whose nested structure this attribute descends into,
    /// i.e. true for `STRUCTURE` and for `LIST` of `STRUCTURE`.
    pub fn holds_structure(&self) -> bool {
        match self.kind {
            Some(AttributeKind::Structure) => true,
            Some(AttributeKind::List) => self.value_type == Some(AttributeKind::Structure),
            _ => false,
        }
    }

    /// Looks up a declared unit by name.
    pub fn unit(&self, name: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.name == name)
    }
}
