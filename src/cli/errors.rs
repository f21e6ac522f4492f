//! CLI-specific error types
//!
//! Validation findings are not CLI errors; they are reported as an
//! `invalid` response. These errors cover configuration, file and
//! catalog failures.

use std::io;

use thiserror::Error;

use crate::catalog::CatalogError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable or invalid
    #[error("{0}")]
    Config(String),

    /// Reading an input file or writing output failed
    #[error("{0}")]
    Io(String),

    /// Input file is not the expected JSON document
    #[error("{0}")]
    Input(String),

    /// The item references a type the catalog does not hold
    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        CliError::Io(msg.into())
    }

    pub fn input_error(msg: impl Into<String>) -> Self {
        CliError::Input(msg.into())
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "GT_CLI_CONFIG_ERROR",
            CliError::Io(_) => "GT_CLI_IO_ERROR",
            CliError::Input(_) => "GT_CLI_INPUT_ERROR",
            CliError::UnknownType(_) => "GT_CLI_UNKNOWN_TYPE",
            CliError::Catalog(e) => e.code(),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}
