//! Item values
//!
//! Values arrive dynamically typed (typically from JSON), so the value
//! model is an untagged enum. Numbers keep their integral or floating
//! representation so that large integers are range-checked exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::Record;
use crate::model::Unit;

/// Shape classes the capability table matches values against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    Text,
    /// Integral number, including floats without a fractional part
    Integer,
    /// Number with a fractional part
    Decimal,
    Boolean,
    Sequence,
    Record,
}

impl ValueShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueShape::Text => "text",
            ValueShape::Integer => "integer",
            ValueShape::Decimal => "decimal",
            ValueShape::Boolean => "boolean",
            ValueShape::Sequence => "list",
            ValueShape::Record => "record",
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value stored under an attribute name in a record.
///
/// Variant order matters for deserialisation: integers are tried before
/// floats, and `{unit, value}` objects before plain records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<ItemValue>),
    Unit(UnitValue),
    Record(Record),
}

impl ItemValue {
    /// Shape of the value; `None` for null and unit-wrapped values.
    pub fn shape(&self) -> Option<ValueShape> {
        match self {
            ItemValue::Null | ItemValue::Unit(_) => None,
            ItemValue::Boolean(_) => Some(ValueShape::Boolean),
            ItemValue::Integer(_) => Some(ValueShape::Integer),
            ItemValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(ValueShape::Integer),
            ItemValue::Float(_) => Some(ValueShape::Decimal),
            ItemValue::Text(_) => Some(ValueShape::Text),
            ItemValue::List(_) => Some(ValueShape::Sequence),
            ItemValue::Record(_) => Some(ValueShape::Record),
        }
    }

    /// Name of the value's shape for error parameters.
    pub fn type_name(&self) -> &'static str {
        match self {
            ItemValue::Null => "null",
            ItemValue::Unit(_) => "unit value",
            other => other.shape().map_or("unknown", |s| s.as_str()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ItemValue::Null)
    }

    /// Common numeric representation of integral and floating values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ItemValue::Integer(i) => Some(*i as f64),
            ItemValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ItemValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ItemValue]> {
        match self {
            ItemValue::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            ItemValue::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_unit(&self) -> Option<&UnitValue> {
        match self {
            ItemValue::Unit(unit) => Some(unit),
            _ => None,
        }
    }
}

impl From<bool> for ItemValue {
    fn from(v: bool) -> Self {
        ItemValue::Boolean(v)
    }
}

impl From<i64> for ItemValue {
    fn from(v: i64) -> Self {
        ItemValue::Integer(v)
    }
}

impl From<i32> for ItemValue {
    fn from(v: i32) -> Self {
        ItemValue::Integer(v.into())
    }
}

impl From<f64> for ItemValue {
    fn from(v: f64) -> Self {
        ItemValue::Float(v)
    }
}

impl From<&str> for ItemValue {
    fn from(v: &str) -> Self {
        ItemValue::Text(v.to_string())
    }
}

impl From<String> for ItemValue {
    fn from(v: String) -> Self {
        ItemValue::Text(v)
    }
}

impl From<Vec<ItemValue>> for ItemValue {
    fn from(v: Vec<ItemValue>) -> Self {
        ItemValue::List(v)
    }
}

impl From<Record> for ItemValue {
    fn from(v: Record) -> Self {
        ItemValue::Record(v)
    }
}

impl From<UnitValue> for ItemValue {
    fn from(v: UnitValue) -> Self {
        ItemValue::Unit(v)
    }
}

/// A value expressed in a named unit of a unit-based attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UnitValue {
    pub unit: String,
    pub value: Box<ItemValue>,
    /// Value converted to the base unit, if computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_value: Option<f64>,
}

impl UnitValue {
    pub fn new(unit: impl Into<String>, value: impl Into<ItemValue>) -> Self {
        Self {
            unit: unit.into(),
            value: Box::new(value.into()),
            base_value: None,
        }
    }

    /// Converts the raw value to the base unit using the declared units.
    ///
    /// Absent when the unit is not declared or the raw value is not numeric.
    pub fn normalized(&self, units: &[Unit]) -> Option<f64> {
        let factor = units.iter().find(|u| u.name == self.unit)?.factor;
        Some(self.value.as_f64()? * factor)
    }

    /// Returns a copy with `base_value` filled in from the declared units.
    pub fn with_base(mut self, units: &[Unit]) -> Self {
        self.base_value = self.normalized(units);
        self
    }

    /// The same fields read as a plain record.
    ///
    /// A nested record whose keys are exactly `unit` and `value` (and
    /// optionally `baseValue`) deserialises as a unit value; structure
    /// attributes use this to read it back.
    pub fn to_record(&self) -> Record {
        let mut fields = vec![
            ("unit".to_string(), ItemValue::Text(self.unit.clone())),
            ("value".to_string(), (*self.value).clone()),
        ];
        if let Some(base) = self.base_value {
            fields.push(("baseValue".to_string(), ItemValue::Float(base)));
        }
        fields.into_iter().collect()
    }
}
