//! # Catalog Errors

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Type catalog errors
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    // ==================
    // File Errors
    // ==================

    /// Reading or writing the catalog directory failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// A stored type file is not a valid type document
    #[error("Malformed type file {path}: {message}")]
    Malformed { path: String, message: String },

    // ==================
    // Registration Errors
    // ==================

    /// The type failed validation and was not stored
    #[error("Type '{name}' is invalid ({} errors)", .errors.len())]
    InvalidType {
        name: String,
        errors: Vec<ValidationError>,
    },

    /// No type with this id is registered
    #[error("Type not found: {0}")]
    TypeNotFound(String),

    /// Type ids become file names and may not contain path characters
    #[error("Invalid type id: {0}")]
    InvalidTypeId(String),
}

impl CatalogError {
    pub(crate) fn io(path: impl std::fmt::Display, err: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn malformed(path: impl std::fmt::Display, message: impl Into<String>) -> Self {
        CatalogError::Malformed {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::Io { .. } => "GT_CATALOG_IO",
            CatalogError::Malformed { .. } => "GT_CATALOG_MALFORMED",
            CatalogError::InvalidType { .. } => "GT_CATALOG_INVALID_TYPE",
            CatalogError::TypeNotFound(_) => "GT_CATALOG_TYPE_NOT_FOUND",
            CatalogError::InvalidTypeId(_) => "GT_CATALOG_INVALID_TYPE_ID",
        }
    }
}
