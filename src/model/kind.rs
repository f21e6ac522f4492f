//! Attribute kinds and their capability table
//!
//! The table is fixed at compile time:
//!
//! | Kind | min/max | step | pattern | proposal deps | unit | accepted values |
//! |---|---|---|---|---|---|---|
//! | STRING | yes | no | yes | yes | no | text |
//! | LONG | yes | yes | no | no | yes | integer-valued numbers |
//! | DOUBLE | yes | yes | no | no | yes | any number |
//! | BOOLEAN | no | no | no | no | no | boolean |
//! | DATE / TIME / DATE_TIME | no | no | no | no | no | text |
//! | LIST | no | no | no | no | no | sequence of `value_type` |
//! | STRUCTURE | no | no | no | no | no | nested record |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::item::{ItemValue, ValueShape};

/// Primitive kind of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeKind {
    /// UTF-8 text
    String,
    /// 64-bit signed integer
    Long,
    /// 64-bit floating point
    Double,
    /// Boolean
    Boolean,
    /// Calendar date, carried as text
    Date,
    /// Time of day, carried as text
    Time,
    /// Date and time, carried as text
    DateTime,
    /// Ordered sequence of `value_type` elements
    List,
    /// Nested record described by a nested structure
    Structure,
}

/// Feature flags published by each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub min_max: bool,
    pub step: bool,
    pub pattern: bool,
    pub value_proposal_dependencies: bool,
    pub unit: bool,
}

impl AttributeKind {
    /// Every kind, in declaration order.
    pub const ALL: [AttributeKind; 9] = [
        AttributeKind::String,
        AttributeKind::Long,
        AttributeKind::Double,
        AttributeKind::Boolean,
        AttributeKind::Date,
        AttributeKind::Time,
        AttributeKind::DateTime,
        AttributeKind::List,
        AttributeKind::Structure,
    ];

    /// Returns the kind name used in error parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::String => "STRING",
            AttributeKind::Long => "LONG",
            AttributeKind::Double => "DOUBLE",
            AttributeKind::Boolean => "BOOLEAN",
            AttributeKind::Date => "DATE",
            AttributeKind::Time => "TIME",
            AttributeKind::DateTime => "DATE_TIME",
            AttributeKind::List => "LIST",
            AttributeKind::Structure => "STRUCTURE",
        }
    }

    /// Returns the capability flags of this kind.
    pub fn capabilities(&self) -> Capabilities {
        match self {
            AttributeKind::String => Capabilities {
                min_max: true,
                pattern: true,
                value_proposal_dependencies: true,
                ..Capabilities::default()
            },
            AttributeKind::Long | AttributeKind::Double => Capabilities {
                min_max: true,
                step: true,
                unit: true,
                ..Capabilities::default()
            },
            AttributeKind::Boolean
            | AttributeKind::Date
            | AttributeKind::Time
            | AttributeKind::DateTime
            | AttributeKind::List
            | AttributeKind::Structure => Capabilities::default(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, AttributeKind::Long | AttributeKind::Double)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, AttributeKind::String)
    }

    /// Date, time and date-time kinds. Their text format is not checked here.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            AttributeKind::Date | AttributeKind::Time | AttributeKind::DateTime
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(self, AttributeKind::List)
    }

    pub fn is_structure(&self) -> bool {
        matches!(self, AttributeKind::Structure)
    }

    /// Returns true if a value of the given shape may be stored under this kind.
    pub fn accepts(&self, shape: ValueShape) -> bool {
        match self {
            AttributeKind::String
            | AttributeKind::Date
            | AttributeKind::Time
            | AttributeKind::DateTime => shape == ValueShape::Text,
            AttributeKind::Long => shape == ValueShape::Integer,
            AttributeKind::Double => {
                matches!(shape, ValueShape::Integer | ValueShape::Decimal)
            }
            AttributeKind::Boolean => shape == ValueShape::Boolean,
            AttributeKind::List => shape == ValueShape::Sequence,
            AttributeKind::Structure => shape == ValueShape::Record,
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared assignability check used by both validators.
///
/// Null and unit-wrapped values have no shape and are never assignable;
/// callers unwrap unit values before asking.
pub fn is_assignable(kind: AttributeKind, value: &ItemValue) -> bool {
    value.shape().map_or(false, |shape| kind.accepts(shape))
}
