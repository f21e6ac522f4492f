//! JSON I/O handling for CLI
//!
//! - Input: one JSON document per file argument
//! - Output: single JSON object via stdout (log lines go to stderr)

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read and parse a JSON input file
pub fn read_document<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_str(&content)
        .map_err(|e| CliError::input_error(format!("Invalid JSON in {}: {}", path.display(), e)))
}

/// Write a response object to stdout
pub fn write_response(status: &str, data: &Value) -> CliResult<()> {
    write_response_to(&mut io::stdout(), status, data)
}

/// Write a response object as one line to the given writer
pub fn write_response_to<W: Write>(out: &mut W, status: &str, data: &Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": status,
        "data": data
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
