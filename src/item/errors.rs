//! Item model errors
//!
//! These signal misuse of the record model by the calling code, never a
//! problem with user data. User data problems are validation errors.

use thiserror::Error;

/// Result type for record path operations
pub type ItemResult<T> = Result<T, ItemError>;

/// Record path errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("Corrupt value at '{path}': '{segment}' holds a {found}, not a nested record")]
    CorruptValue {
        /// Full path that was accessed
        path: String,
        /// Intermediate segment that is not a record
        segment: String,
        /// Shape found at that segment
        found: &'static str,
    },

    #[error("Invalid path: '{0}'")]
    InvalidPath(String),
}

impl ItemError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            ItemError::CorruptValue { .. } => "GT_ITEM_CORRUPT_VALUE",
            ItemError::InvalidPath(_) => "GT_ITEM_INVALID_PATH",
        }
    }
}
