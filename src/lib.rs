//! gentype - runtime-defined record types and their validation
//!
//! A generic type is a tree of named, typed attributes; items are nested
//! records of values checked against such a type.

pub mod catalog;
pub mod cli;
pub mod item;
pub mod model;
pub mod observability;
pub mod validation;

pub use item::{Item, ItemValue, Record, UnitValue};
pub use model::{Attribute, AttributeKind, GenericType, Structure};
pub use validation::{validate_item, validate_type, ValidationResult};
