//! CLI argument definitions using clap
//!
//! Commands:
//! - gentype check-type <file>
//! - gentype check-item [--config <path>] [--types-dir <dir>] <file>
//! - gentype register [--config <path>] [--types-dir <dir>] <file>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// gentype - validate generic type definitions and their items
#[derive(Parser, Debug)]
#[command(name = "gentype")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options locating the type catalog.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Path to configuration file
    #[arg(long, default_value = "./gentype.json")]
    pub config: PathBuf,

    /// Catalog directory, overriding the configuration file
    #[arg(long)]
    pub types_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a type definition file
    CheckType {
        /// Type definition JSON file
        file: PathBuf,
    },

    /// Validate an item file against its registered type
    CheckItem {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Item JSON file
        file: PathBuf,
    },

    /// Validate a type definition and store it in the catalog
    Register {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Type definition JSON file
        file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_item() {
        let cli = Cli::try_parse_from([
            "gentype",
            "check-item",
            "--types-dir",
            "/tmp/types",
            "item.json",
        ])
        .unwrap();

        match cli.command {
            Command::CheckItem { catalog, file } => {
                assert_eq!(file, PathBuf::from("item.json"));
                assert_eq!(catalog.config, PathBuf::from("./gentype.json"));
                assert_eq!(catalog.types_dir, Some(PathBuf::from("/tmp/types")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_check_type_requires_file() {
        assert!(Cli::try_parse_from(["gentype", "check-type"]).is_err());
    }
}
