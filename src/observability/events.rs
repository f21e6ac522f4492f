//! Observable validation and catalog events

use std::fmt;

/// Lifecycle events emitted by validators and the type catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Type validation
    TypeValidationBegin,
    TypeValidationComplete,
    TypeRejected,

    // Item validation
    ItemValidationBegin,
    ItemValidationComplete,
    ItemRejected,

    // Catalog
    CatalogLoaded,
    TypeRegistered,
    /// A stored type could not be read or parsed
    TypeLoadFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::TypeValidationBegin => "TYPE_VALIDATION_BEGIN",
            Event::TypeValidationComplete => "TYPE_VALIDATION_COMPLETE",
            Event::TypeRejected => "TYPE_REJECTED",
            Event::ItemValidationBegin => "ITEM_VALIDATION_BEGIN",
            Event::ItemValidationComplete => "ITEM_VALIDATION_COMPLETE",
            Event::ItemRejected => "ITEM_REJECTED",
            Event::CatalogLoaded => "CATALOG_LOADED",
            Event::TypeRegistered => "TYPE_REGISTERED",
            Event::TypeLoadFailed => "TYPE_LOAD_FAILED",
        }
    }

    /// Rejections are warnings, load failures errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::TypeRejected | Event::ItemRejected)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Event::TypeLoadFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
