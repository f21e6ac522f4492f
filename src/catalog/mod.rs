//! Type catalog
//!
//! Persistence boundary for generic types: the [`TypeSource`] trait used
//! to fetch a type before item validation, and a file-backed
//! [`TypeCatalog`] implementing it.

mod errors;
mod loader;

pub use errors::{CatalogError, CatalogResult};
pub use loader::{TypeCatalog, TypeSource};
