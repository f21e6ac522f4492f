//! Generic types: a root structure plus identity and presentation metadata

use serde::{Deserialize, Serialize};

use super::attribute::Attribute;
use super::structure::Structure;

/// Who may see a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

/// A runtime-defined record schema.
///
/// The type is the root structure of its attribute tree; `AsRef<Structure>`
/// lets it be passed wherever a structure is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(flatten)]
    pub structure: Structure,
}

fn default_page_size() -> i64 {
    10
}

impl GenericType {
    /// Create a type without id, owner or attributes.
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            group: group.into(),
            owner: None,
            visibility: Visibility::default(),
            page_size: default_page_size(),
            structure: Structure::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.structure.attributes.push(attribute);
        self
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.structure.attributes
    }
}

impl AsRef<Structure> for GenericType {
    fn as_ref(&self) -> &Structure {
        &self.structure
    }
}
