//! Schema model for generic types
//!
//! Types are data, not compiled classes: a `GenericType` is a tree of
//! `Attribute`s grouped into `Structure`s, built and changed at runtime.
//!
//! # Layout
//!
//! - `kind`: the closed set of attribute kinds and their capability table
//! - `attribute`: one field definition, units
//! - `structure`: the recursive attribute tree and path resolution
//! - `generic_type`: the root structure with identity metadata

mod attribute;
mod generic_type;
mod kind;
mod structure;

pub use attribute::{Attribute, AttributeId, Unit};
pub use generic_type::{GenericType, Visibility};
pub use kind::{is_assignable, AttributeKind, Capabilities};
pub use structure::{AttributeIndex, Structure, PATH_SEPARATOR};
