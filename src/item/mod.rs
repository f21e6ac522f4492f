//! Item model: concrete records of generic types
//!
//! Items hold a dotted-path addressable record of values. Nested records
//! are created lazily on `set`; `flatten` lists every leaf path, which the
//! item validator uses to find values the type does not define.

mod errors;
mod record;
mod value;

pub use errors::{ItemError, ItemResult};
pub use record::{Item, Record};
pub use value::{ItemValue, UnitValue, ValueShape};
