//! File-backed type catalog
//!
//! Types are stored one per file as `<types_dir>/type_<id>.json`. The
//! catalog keeps every loaded type in memory; validators never touch it,
//! callers fetch a type and pass it to the item validator themselves.
//! Load failures are always logged, other events only when the validator
//! settings enable them.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::errors::{CatalogError, CatalogResult};
use crate::model::GenericType;
use crate::observability::{log_event_with_fields, Event};
use crate::validation::{NoopHooks, TypeValidator, ValidatorConfig};

/// Read access to stored types by id.
pub trait TypeSource {
    fn fetch_type(&self, type_id: &str) -> Option<&GenericType>;
}

/// Type catalog that reads type files from disk and keeps them in memory.
pub struct TypeCatalog {
    /// Directory containing type files
    types_dir: PathBuf,
    /// Loaded types indexed by id
    types: HashMap<String, GenericType>,
    config: ValidatorConfig,
}

impl TypeCatalog {
    /// Creates an empty catalog over the given directory.
    pub fn new(types_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(types_dir, ValidatorConfig::default())
    }

    /// Creates an empty catalog validating types with the given settings.
    pub fn with_config(types_dir: impl Into<PathBuf>, config: ValidatorConfig) -> Self {
        Self {
            types_dir: types_dir.into(),
            types: HashMap::new(),
            config,
        }
    }

    pub fn types_dir(&self) -> &Path {
        &self.types_dir
    }

    /// Loads every type file from the catalog directory.
    ///
    /// A missing directory is created and yields an empty catalog. Non-JSON
    /// files are skipped; an unreadable, malformed or invalid type file
    /// fails the whole load.
    pub fn load_all(&mut self) -> CatalogResult<usize> {
        if !self.types_dir.exists() {
            fs::create_dir_all(&self.types_dir)
                .map_err(|e| CatalogError::io(self.types_dir.display(), e))?;
            return Ok(0);
        }

        let entries = fs::read_dir(&self.types_dir)
            .map_err(|e| CatalogError::io(self.types_dir.display(), e))?;

        let mut loaded = 0;
        for entry in entries {
            let path = entry
                .map_err(|e| CatalogError::io(self.types_dir.display(), e))?
                .path();

            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            if let Err(e) = self.load_type_file(&path) {
                let path = path.display().to_string();
                log_event_with_fields(
                    Event::TypeLoadFailed,
                    &[("code", e.code()), ("path", path.as_str())],
                );
                return Err(e);
            }
            loaded += 1;
        }

        if self.config.emit_events {
            let count = self.types.len().to_string();
            let dir = self.types_dir.display().to_string();
            log_event_with_fields(
                Event::CatalogLoaded,
                &[("dir", dir.as_str()), ("types", count.as_str())],
            );
        }
        Ok(loaded)
    }

    /// Loads a single type file.
    fn load_type_file(&mut self, path: &Path) -> CatalogResult<()> {
        let content = fs::read_to_string(path).map_err(|e| CatalogError::io(path.display(), e))?;

        let generic_type: GenericType = serde_json::from_str(&content)
            .map_err(|e| CatalogError::malformed(path.display(), format!("Invalid JSON: {}", e)))?;

        let id = match &generic_type.id {
            Some(id) => id.clone(),
            None => return Err(CatalogError::malformed(path.display(), "Missing type id")),
        };
        check_type_id(&id)?;
        self.check_valid(&generic_type)?;

        self.types.insert(id, generic_type);
        Ok(())
    }

    /// Validates and stores a type in memory, replacing any type with the
    /// same id. A type without an id is given a fresh UUID.
    ///
    /// Returns the id the type is stored under.
    pub fn put_type(&mut self, mut generic_type: GenericType) -> CatalogResult<String> {
        let id = match &generic_type.id {
            Some(id) => id.clone(),
            None => Uuid::new_v4().to_string(),
        };
        check_type_id(&id)?;
        self.check_valid(&generic_type)?;

        generic_type.id = Some(id.clone());
        self.types.insert(id.clone(), generic_type);

        if self.config.emit_events {
            log_event_with_fields(Event::TypeRegistered, &[("type_id", id.as_str())]);
        }
        Ok(id)
    }

    /// Writes a stored type to its file, overwriting a previous version.
    pub fn save_type(&self, type_id: &str) -> CatalogResult<PathBuf> {
        let generic_type = self
            .types
            .get(type_id)
            .ok_or_else(|| CatalogError::TypeNotFound(type_id.to_string()))?;

        if !self.types_dir.exists() {
            fs::create_dir_all(&self.types_dir)
                .map_err(|e| CatalogError::io(self.types_dir.display(), e))?;
        }

        let path = self.type_path(type_id);
        let content = serde_json::to_string_pretty(generic_type).map_err(|e| {
            CatalogError::malformed(path.display(), format!("Failed to serialize type: {}", e))
        })?;
        fs::write(&path, content).map_err(|e| CatalogError::io(path.display(), e))?;

        Ok(path)
    }

    /// Removes a type from memory and deletes its file if present.
    pub fn remove_type(&mut self, type_id: &str) -> CatalogResult<GenericType> {
        let removed = self
            .types
            .remove(type_id)
            .ok_or_else(|| CatalogError::TypeNotFound(type_id.to_string()))?;

        let path = self.type_path(type_id);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| CatalogError::io(path.display(), e))?;
        }
        Ok(removed)
    }

    /// Returns all loaded types.
    pub fn types(&self) -> impl Iterator<Item = &GenericType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn type_path(&self, type_id: &str) -> PathBuf {
        self.types_dir.join(format!("type_{}.json", type_id))
    }

    fn check_valid(&self, generic_type: &GenericType) -> CatalogResult<()> {
        let result = TypeValidator::new(&NoopHooks, self.config.clone())
            .validate_type(Some(generic_type));
        if result.is_valid() {
            return Ok(());
        }
        Err(CatalogError::InvalidType {
            name: generic_type.name.clone(),
            errors: result.into_errors(),
        })
    }
}

impl TypeSource for TypeCatalog {
    fn fetch_type(&self, type_id: &str) -> Option<&GenericType> {
        self.types.get(type_id)
    }
}

fn check_type_id(id: &str) -> CatalogResult<()> {
    let valid = !id.trim().is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(CatalogError::InvalidTypeId(id.to_string()));
    }
    Ok(())
}
