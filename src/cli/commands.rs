//! CLI command implementations
//!
//! Every command builds a `Response` first and writes it afterwards, so
//! the commands themselves never touch stdout.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::catalog::{CatalogError, TypeCatalog, TypeSource};
use crate::item::Item;
use crate::model::GenericType;
use crate::validation::{
    ItemValidator, NoopHooks, TypeValidator, ValidationReport, ValidatorConfig, DEFAULT_MAX_DEPTH,
};

use super::args::{CatalogArgs, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_document, write_response_to};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Type catalog directory (required)
    pub types_dir: String,

    /// Deepest nested structure accepted in a type (optional, default 32)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Log validation lifecycle events (optional, default false)
    #[serde(default)]
    pub emit_events: bool,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Config {
    /// Configuration with defaults for the given catalog directory
    pub fn for_types_dir(types_dir: &Path) -> Self {
        Self {
            types_dir: types_dir.display().to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            emit_events: false,
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve the configuration of a catalog command.
    ///
    /// `--types-dir` overrides the file; without a config file it stands
    /// in for it.
    pub fn resolve(args: &CatalogArgs) -> CliResult<Self> {
        let mut config = match (&args.types_dir, args.config.exists()) {
            (Some(dir), false) => return Ok(Self::for_types_dir(dir)),
            _ => Self::load(&args.config)?,
        };
        if let Some(dir) = &args.types_dir {
            config.types_dir = dir.display().to_string();
        }
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.types_dir.trim().is_empty() {
            return Err(CliError::config_error("types_dir must not be empty"));
        }
        self.validator_config()
            .validate()
            .map_err(CliError::config_error)
    }

    pub fn types_path(&self) -> PathBuf {
        PathBuf::from(&self.types_dir)
    }

    /// Settings passed to the validators
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            max_depth: self.max_depth,
            emit_events: self.emit_events,
        }
    }

    fn open_catalog(&self) -> CliResult<TypeCatalog> {
        let mut catalog = TypeCatalog::with_config(self.types_path(), self.validator_config());
        catalog.load_all()?;
        Ok(catalog)
    }
}

/// Whether the checked document was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    Invalid,
}

impl Outcome {
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Valid => "ok",
            Outcome::Invalid => "invalid",
        }
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Valid => 0,
            Outcome::Invalid => 1,
        }
    }
}

/// Result of a command, written to stdout by `run_command`.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub outcome: Outcome,
    pub data: Value,
}

impl Response {
    fn from_report(report: ValidationReport) -> CliResult<Self> {
        let outcome = if report.valid {
            Outcome::Valid
        } else {
            Outcome::Invalid
        };
        Ok(Self {
            outcome,
            data: serde_json::to_value(report)?,
        })
    }
}

/// Execute a command and write its response to stdout
pub fn run_command(command: Command) -> CliResult<Outcome> {
    run_command_to(command, &mut io::stdout())
}

/// Execute a command and write its response to the given writer
pub fn run_command_to<W: Write>(command: Command, out: &mut W) -> CliResult<Outcome> {
    let response = match command {
        Command::CheckType { file } => check_type(&file)?,
        Command::CheckItem { catalog, file } => check_item(&Config::resolve(&catalog)?, &file)?,
        Command::Register { catalog, file } => register(&Config::resolve(&catalog)?, &file)?,
    };

    write_response_to(out, response.outcome.status(), &response.data)?;
    Ok(response.outcome)
}

/// Validate a type definition file with default settings
pub fn check_type(file: &Path) -> CliResult<Response> {
    let generic_type: GenericType = read_document(file)?;
    let result = TypeValidator::default().validate_type(Some(&generic_type));
    Response::from_report(result.report())
}

/// Validate an item file against its type from the catalog
pub fn check_item(config: &Config, file: &Path) -> CliResult<Response> {
    let item: Item = read_document(file)?;
    let catalog = config.open_catalog()?;

    let type_id = item
        .type_id
        .as_deref()
        .ok_or_else(|| CliError::input_error("Item has no typeId"))?;
    let generic_type = catalog
        .fetch_type(type_id)
        .ok_or_else(|| CliError::UnknownType(type_id.to_string()))?;

    let validator = ItemValidator::new(&NoopHooks, config.validator_config());
    let result = validator.validate_item(Some(generic_type), Some(&item));
    Response::from_report(result.report())
}

/// Validate a type definition file and store it in the catalog
pub fn register(config: &Config, file: &Path) -> CliResult<Response> {
    let generic_type: GenericType = read_document(file)?;
    let mut catalog = config.open_catalog()?;

    let type_id = match catalog.put_type(generic_type) {
        Ok(id) => id,
        Err(CatalogError::InvalidType { errors, .. }) => {
            return Response::from_report(ValidationReport {
                valid: false,
                errors,
            });
        }
        Err(e) => return Err(e.into()),
    };
    let path = catalog.save_type(&type_id)?;

    Ok(Response {
        outcome: Outcome::Valid,
        data: json!({
            "typeId": type_id,
            "path": path.display().to_string(),
        }),
    })
}
