//! Type definition validation
//!
//! Walks a generic type top-down and checks every attribute against the
//! capability table of its kind, recursing into nested structures. All
//! findings are collected; only a missing type ends the walk early. Within
//! one attribute a missing kind skips the kind-dependent checks, the
//! sibling attributes are still checked.

use regex::Regex;
use std::collections::{BTreeMap, HashMap};

use super::config::ValidatorConfig;
use super::errors::ErrorCode;
use super::hooks::{TypeValidation, ValidationHooks, NOOP_HOOKS};
use super::result::ValidationResult;
use crate::model::{Attribute, AttributeIndex, AttributeKind, GenericType, Structure, PATH_SEPARATOR};
use crate::observability::{log_event_with_fields, Event};

/// Validates generic type definitions.
pub struct TypeValidator<'h> {
    hooks: &'h dyn ValidationHooks,
    config: ValidatorConfig,
}

impl Default for TypeValidator<'static> {
    fn default() -> Self {
        Self::new(&NOOP_HOOKS, ValidatorConfig::default())
    }
}

impl<'h> TypeValidator<'h> {
    pub fn new(hooks: &'h dyn ValidationHooks, config: ValidatorConfig) -> Self {
        Self { hooks, config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub(crate) fn hooks(&self) -> &'h dyn ValidationHooks {
        self.hooks
    }

    /// Validates a type definition.
    ///
    /// An absent type yields a single fatal `TypeRequired` error.
    pub fn validate_type<'a>(
        &self,
        generic_type: Option<&'a GenericType>,
    ) -> ValidationResult<'a, GenericType> {
        let name = generic_type.map(|t| t.name.as_str()).unwrap_or("");
        if self.config.emit_events {
            log_event_with_fields(Event::TypeValidationBegin, &[("type", name)]);
        }

        let result = self.collect(generic_type);

        if self.config.emit_events {
            let count = result.error_count().to_string();
            let fields = [("errors", count.as_str()), ("type", name)];
            if result.is_valid() {
                log_event_with_fields(Event::TypeValidationComplete, &fields);
            } else {
                log_event_with_fields(Event::TypeRejected, &fields);
            }
        }

        result
    }

    /// Runs the checks without logging; shared with the item validator.
    pub(crate) fn collect<'a>(
        &self,
        generic_type: Option<&'a GenericType>,
    ) -> ValidationResult<'a, GenericType> {
        let mut result = ValidationResult::new(generic_type);

        let generic_type = match generic_type {
            Some(t) => t,
            None => {
                result.add("", ErrorCode::TypeRequired);
                return result;
            }
        };

        if generic_type.name.trim().is_empty() {
            result.add("", ErrorCode::TypeNameBlank).param("name");
        }
        if generic_type.group.trim().is_empty() {
            result.add("", ErrorCode::TypeGroupBlank).param("group");
        }
        if generic_type.page_size < 1 {
            result
                .add("", ErrorCode::TypePageSizeInvalid)
                .param(generic_type.page_size);
        }

        self.hooks.type_validation(generic_type, &mut result);

        let index = generic_type.structure.index();
        for (id, paths) in index.duplicates() {
            result
                .add("", ErrorCode::AttributeIdAmbiguous)
                .param(id)
                .param(paths.join(", "));
        }

        let mut walk = TypeWalk {
            hooks: self.hooks,
            max_depth: self.config.max_depth,
            index: &index,
            result: &mut result,
        };
        walk.structure(&generic_type.structure, "", 0);

        result
    }
}

/// State of one pass over a type tree.
struct TypeWalk<'w, 'a> {
    hooks: &'w dyn ValidationHooks,
    max_depth: usize,
    index: &'w AttributeIndex,
    result: &'w mut TypeValidation<'a>,
}

impl<'w, 'a> TypeWalk<'w, 'a> {
    fn structure(&mut self, structure: &Structure, prefix: &str, depth: usize) {
        for attribute in &structure.attributes {
            self.attribute(attribute, prefix, depth);
        }

        let mut names: BTreeMap<&str, usize> = BTreeMap::new();
        for attribute in &structure.attributes {
            if !attribute.name.trim().is_empty() {
                *names.entry(attribute.name.as_str()).or_default() += 1;
            }
        }
        for (name, count) in names {
            if count > 1 {
                self.result
                    .add(structure_path(prefix), ErrorCode::AttributeNameAmbiguous)
                    .param(name);
            }
        }

        self.hooks.structure_validation(structure, prefix, self.result);
    }

    fn attribute(&mut self, attribute: &Attribute, prefix: &str, depth: usize) {
        let blank = attribute.name.trim().is_empty();
        // A nameless attribute is reported at its enclosing structure
        let path = if blank {
            structure_path(prefix).to_string()
        } else {
            format!("{}{}", prefix, attribute.name)
        };

        if attribute.id.is_none() {
            self.result.add(&path, ErrorCode::AttributeIdMissing);
        }
        if blank {
            let error = self.result.add(&path, ErrorCode::AttributeNameBlank);
            if let Some(id) = attribute.id {
                error.param(id);
            }
        } else if attribute.name.contains(PATH_SEPARATOR) {
            self.result
                .add(&path, ErrorCode::AttributeNameInvalid)
                .param(&attribute.name);
        }

        // Every remaining rule depends on the kind
        let kind = match attribute.kind {
            Some(kind) => kind,
            None => {
                self.result.add(&path, ErrorCode::AttributeKindMissing);
                return;
            }
        };

        if attribute.unique && !attribute.mandatory {
            self.result.add(&path, ErrorCode::UniqueNotMandatory);
        }

        self.range(attribute, kind, &path);
        self.step(attribute, kind, &path);
        self.pattern(attribute, kind, &path);
        self.dependencies(attribute, kind, &path);
        self.units(attribute, kind, &path);
        self.default_value(attribute, kind, &path);

        self.hooks.type_attribute_validation(attribute, &path, self.result);

        match kind {
            AttributeKind::List => self.list_attribute(attribute, &path, depth),
            AttributeKind::Structure => self.structure_attribute(attribute, &path, depth),
            _ => self.single_attribute(attribute, &path),
        }
    }

    fn range(&mut self, attribute: &Attribute, kind: AttributeKind, path: &str) {
        if attribute.min.is_none() && attribute.max.is_none() {
            return;
        }
        if !kind.capabilities().min_max {
            self.result.add(path, ErrorCode::MinMaxNotCapable).param(kind);
            return;
        }
        if let (Some(min), Some(max)) = (attribute.min, attribute.max) {
            if !(min < max) {
                self.result
                    .add(path, ErrorCode::MinNotLessThanMax)
                    .param(min)
                    .param(max);
            }
        }
    }

    fn step(&mut self, attribute: &Attribute, kind: AttributeKind, path: &str) {
        let step = match attribute.step {
            Some(step) => step,
            None => return,
        };
        if !kind.capabilities().step {
            self.result.add(path, ErrorCode::StepNotCapable).param(kind);
        } else if !(step > 0.0) {
            self.result.add(path, ErrorCode::StepNotPositive).param(step);
        }
    }

    fn pattern(&mut self, attribute: &Attribute, kind: AttributeKind, path: &str) {
        let pattern = match &attribute.pattern {
            Some(pattern) => pattern,
            None => return,
        };
        if !kind.capabilities().pattern {
            self.result.add(path, ErrorCode::PatternNotCapable).param(kind);
            return;
        }
        if pattern.trim().is_empty() {
            self.result.add(path, ErrorCode::PatternInvalid).param(pattern);
        } else if let Err(e) = full_match(pattern) {
            self.result
                .add(path, ErrorCode::PatternInvalid)
                .param(pattern)
                .param(e);
        }
    }

    fn dependencies(&mut self, attribute: &Attribute, kind: AttributeKind, path: &str) {
        if attribute.value_proposal_dependencies.is_empty() {
            return;
        }
        if !kind.capabilities().value_proposal_dependencies {
            self.result
                .add(path, ErrorCode::DependenciesNotCapable)
                .param(kind);
            return;
        }
        for &dependency in &attribute.value_proposal_dependencies {
            if attribute.id == Some(dependency) {
                self.result.add(path, ErrorCode::DependencySelf).param(dependency);
            } else if !self.index.contains(dependency) {
                self.result
                    .add(path, ErrorCode::DependencyUnknown)
                    .param(dependency);
            }
        }
    }

    fn units(&mut self, attribute: &Attribute, kind: AttributeKind, path: &str) {
        if attribute.units.is_empty() {
            return;
        }
        if !kind.capabilities().unit {
            self.result.add(path, ErrorCode::UnitsNotCapable).param(kind);
            return;
        }

        let base_units = attribute.units.iter().filter(|u| u.is_base()).count();
        if base_units != 1 {
            self.result
                .add(path, ErrorCode::UnitBaseInvalid)
                .param(base_units);
        }

        let mut names: BTreeMap<&str, usize> = BTreeMap::new();
        for unit in &attribute.units {
            if unit.name.trim().is_empty() {
                self.result.add(path, ErrorCode::UnitNameBlank);
            } else {
                *names.entry(unit.name.as_str()).or_default() += 1;
            }
        }
        for (name, count) in names {
            if count > 1 {
                self.result.add(path, ErrorCode::UnitNameAmbiguous).param(name);
            }
        }
    }

    fn default_value(&mut self, attribute: &Attribute, kind: AttributeKind, path: &str) {
        let value = match &attribute.default_value {
            Some(value) => value,
            None => return,
        };

        if attribute.is_unit_based() || kind.is_temporal() || kind.is_list() || kind.is_structure()
        {
            self.result
                .add(path, ErrorCode::DefaultValueNotAllowed)
                .param(kind);
            return;
        }

        match kind {
            AttributeKind::Boolean => {}
            AttributeKind::String => {
                let length = value.chars().count() as f64;
                if let Some(min) = attribute.min {
                    if length < min {
                        self.result
                            .add(path, ErrorCode::DefaultValueTooShort)
                            .param(min)
                            .param(length);
                    }
                }
                if let Some(max) = attribute.max {
                    if length > max {
                        self.result
                            .add(path, ErrorCode::DefaultValueTooLong)
                            .param(max)
                            .param(length);
                    }
                }
                if let Some(Ok(regex)) = attribute.pattern.as_deref().map(full_match) {
                    if !regex.is_match(value) {
                        self.result
                            .add(path, ErrorCode::DefaultValuePatternMismatch)
                            .param(attribute.pattern.as_deref().unwrap_or_default())
                            .param(value);
                    }
                }
            }
            AttributeKind::Long | AttributeKind::Double => {
                let parsed = if kind == AttributeKind::Long {
                    value.trim().parse::<i64>().ok().map(|v| v as f64)
                } else {
                    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
                };
                let number = match parsed {
                    Some(number) => number,
                    None => {
                        self.result
                            .add(path, ErrorCode::DefaultValueUnparsable)
                            .param(kind)
                            .param(value);
                        return;
                    }
                };
                if let Some(min) = attribute.min {
                    if number < min {
                        self.result
                            .add(path, ErrorCode::DefaultValueTooSmall)
                            .param(min)
                            .param(value);
                    }
                }
                if let Some(max) = attribute.max {
                    if number > max {
                        self.result
                            .add(path, ErrorCode::DefaultValueTooLarge)
                            .param(max)
                            .param(value);
                    }
                }
            }
            _ => {}
        }
    }

    fn list_attribute(&mut self, attribute: &Attribute, path: &str, depth: usize) {
        match attribute.value_type {
            None => {
                self.result.add(path, ErrorCode::ValueTypeMissing);
            }
            Some(AttributeKind::List) => {
                self.result.add(path, ErrorCode::NestedListNotAllowed);
            }
            Some(AttributeKind::Structure) => match &attribute.nested_structure {
                None => {
                    self.result.add(path, ErrorCode::NestedStructureMissing);
                }
                Some(nested) => self.nested(nested, path, depth),
            },
            Some(_) => {
                if attribute.nested_structure.is_some() {
                    self.result.add(path, ErrorCode::NestedStructureNotAllowed);
                }
            }
        }

        self.hooks
            .type_list_attribute_validation(attribute, path, self.result);
    }

    fn structure_attribute(&mut self, attribute: &Attribute, path: &str, depth: usize) {
        if let Some(value_type) = attribute.value_type {
            self.result
                .add(path, ErrorCode::ValueTypeNotAllowed)
                .param(value_type);
        }
        match &attribute.nested_structure {
            None => {
                self.result.add(path, ErrorCode::NestedStructureMissing);
            }
            Some(nested) => self.nested(nested, path, depth),
        }

        self.hooks
            .type_structure_attribute_validation(attribute, path, self.result);
    }

    fn single_attribute(&mut self, attribute: &Attribute, path: &str) {
        if let Some(value_type) = attribute.value_type {
            self.result
                .add(path, ErrorCode::ValueTypeNotAllowed)
                .param(value_type);
        }
        if attribute.nested_structure.is_some() {
            self.result.add(path, ErrorCode::NestedStructureNotAllowed);
        }

        self.hooks
            .type_single_attribute_validation(attribute, path, self.result);
    }

    fn nested(&mut self, nested: &Structure, path: &str, depth: usize) {
        if depth + 1 > self.max_depth {
            self.result
                .add(path, ErrorCode::NestingTooDeep)
                .param(self.max_depth);
            return;
        }
        let prefix = format!("{}{}", path, PATH_SEPARATOR);
        self.structure(nested, &prefix, depth + 1);
    }
}

/// Compiles a pattern that must match a whole value.
pub(crate) fn full_match(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}

/// Anchored patterns, each compiled at most once per pass.
#[derive(Debug, Default)]
pub(crate) struct PatternCache {
    compiled: HashMap<String, Option<Regex>>,
}

impl PatternCache {
    /// Whether the whole text matches; `None` if the pattern does not compile.
    pub(crate) fn is_match(&mut self, pattern: &str, text: &str) -> Option<bool> {
        if !self.compiled.contains_key(pattern) {
            self.compiled
                .insert(pattern.to_string(), full_match(pattern).ok());
        }
        self.compiled
            .get(pattern)?
            .as_ref()
            .map(|regex| regex.is_match(text))
    }
}

/// Error path of a structure from its attribute prefix.
fn structure_path(prefix: &str) -> &str {
    prefix.strip_suffix(PATH_SEPARATOR).unwrap_or(prefix)
}
