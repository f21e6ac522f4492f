//! CLI module for gentype
//!
//! Provides command-line interface for:
//! - check-type: validate a type definition file
//! - check-item: validate an item against its catalogued type
//! - register: validate and store a type definition

mod args;
mod commands;
mod errors;
mod io;

pub use args::{CatalogArgs, Cli, Command};
pub use commands::{
    check_item, check_type, register, run_command, run_command_to, Config, Outcome, Response,
};
pub use errors::{CliError, CliResult};
pub use io::{read_document, write_error, write_response, write_response_to};

/// Parse arguments and run the selected command.
///
/// Errors are also reported on stdout as an `error` response.
pub fn run() -> CliResult<Outcome> {
    let cli = Cli::parse_args();
    let result = run_command(cli.command);
    if let Err(e) = &result {
        write_error(e.code(), &e.to_string())?;
    }
    result
}
