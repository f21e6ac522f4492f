//! gentype CLI entry point
//!
//! Minimal entrypoint: all parsing and command logic lives in the CLI
//! module. Exits non-zero when a command fails or its input is invalid.

use gentype::cli;

fn main() {
    match cli::run() {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("{}: {}", e.code(), e);
            std::process::exit(1);
        }
    }
}
