//! Item validation
//!
//! Items are checked in lock step with their type: each record level is
//! walked together with the structure describing it. The type is
//! re-validated first and an item is never checked against a broken type.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use super::config::ValidatorConfig;
use super::errors::ErrorCode;
use super::hooks::{ItemValidation, ValidationHooks, NOOP_HOOKS};
use super::result::ValidationResult;
use super::type_validator::{PatternCache, TypeValidator};
use crate::item::{Item, ItemValue, Record, UnitValue, ValueShape};
use crate::model::{is_assignable, Attribute, AttributeKind, GenericType, Structure, PATH_SEPARATOR};
use crate::observability::{log_event_with_fields, Event};

/// Validates items against their generic type.
pub struct ItemValidator<'h> {
    types: TypeValidator<'h>,
}

impl Default for ItemValidator<'static> {
    fn default() -> Self {
        Self::new(&NOOP_HOOKS, ValidatorConfig::default())
    }
}

impl<'h> ItemValidator<'h> {
    pub fn new(hooks: &'h dyn ValidationHooks, config: ValidatorConfig) -> Self {
        Self {
            types: TypeValidator::new(hooks, config),
        }
    }

    /// The type validator run before every item.
    pub fn type_validator(&self) -> &TypeValidator<'h> {
        &self.types
    }

    /// Validates an item against its type.
    ///
    /// Absent inputs, a type id mismatch and an invalid type each end
    /// validation with a single fatal error.
    pub fn validate_item<'a>(
        &self,
        generic_type: Option<&GenericType>,
        item: Option<&'a Item>,
    ) -> ValidationResult<'a, Item> {
        let emit = self.types.config().emit_events;
        let type_id = item.and_then(|i| i.type_id.as_deref()).unwrap_or("");
        if emit {
            log_event_with_fields(Event::ItemValidationBegin, &[("type_id", type_id)]);
        }

        let result = self.collect(generic_type, item);

        if emit {
            let count = result.error_count().to_string();
            let fields = [("errors", count.as_str()), ("type_id", type_id)];
            if result.is_valid() {
                log_event_with_fields(Event::ItemValidationComplete, &fields);
            } else {
                log_event_with_fields(Event::ItemRejected, &fields);
            }
        }

        result
    }

    fn collect<'a>(
        &self,
        generic_type: Option<&GenericType>,
        item: Option<&'a Item>,
    ) -> ValidationResult<'a, Item> {
        let mut result = ValidationResult::new(item);

        let generic_type = match generic_type {
            Some(t) => t,
            None => {
                result.add("", ErrorCode::TypeRequired);
                return result;
            }
        };
        let item = match item {
            Some(i) => i,
            None => {
                result.add("", ErrorCode::ItemRequired);
                return result;
            }
        };

        match (&item.type_id, &generic_type.id) {
            (Some(item_type), Some(type_id)) if item_type == type_id => {}
            (item_type, type_id) => {
                result
                    .add("", ErrorCode::ItemTypeMismatch)
                    .param(item_type.as_deref().unwrap_or(""))
                    .param(type_id.as_deref().unwrap_or(""));
                return result;
            }
        }

        let type_result = self.types.collect(Some(generic_type));
        if !type_result.is_valid() {
            result
                .add("", ErrorCode::ReferencedTypeInvalid)
                .param(type_result.error_count());
            return result;
        }

        let hooks = self.types.hooks();
        hooks.item_validation(generic_type, item, &mut result);

        let mut walk = ItemWalk {
            hooks,
            patterns: PatternCache::default(),
            result: &mut result,
        };
        walk.level(&generic_type.structure, &item.values, "");
        walk.undefined(&generic_type.structure, &item.values, "");

        result
    }
}

/// State of one pass over an item.
struct ItemWalk<'w, 'a> {
    hooks: &'w dyn ValidationHooks,
    patterns: PatternCache,
    result: &'w mut ItemValidation<'a>,
}

impl<'w, 'a> ItemWalk<'w, 'a> {
    fn level(&mut self, structure: &Structure, record: &Record, prefix: &str) {
        for attribute in &structure.attributes {
            self.attribute(attribute, record, prefix);
        }
        self.hooks
            .item_level_validation(structure, record, prefix, self.result);
    }

    /// Reports every value whose path the structure does not define.
    fn undefined(&mut self, structure: &Structure, record: &Record, prefix: &str) {
        for (path, value) in record.flatten() {
            let attribute = match structure.resolve_by_path(&path) {
                Some(attribute) => attribute,
                None => {
                    self.result
                        .add(format!("{}{}", prefix, path), ErrorCode::UndefinedAttribute);
                    continue;
                }
            };
            // Flattening stops at unit values, which a structure reads as a record
            if attribute.kind != Some(AttributeKind::Structure) {
                continue;
            }
            if let (ItemValue::Unit(unit), Some(nested)) = (value, &attribute.nested_structure) {
                let prefix = format!("{}{}{}", prefix, path, PATH_SEPARATOR);
                self.undefined(nested, &unit.to_record(), &prefix);
            }
        }
    }

    fn attribute(&mut self, attribute: &Attribute, record: &Record, prefix: &str) {
        let path = format!("{}{}", prefix, attribute.name);
        // Validated types always carry a kind
        let kind = match attribute.kind {
            Some(kind) => kind,
            None => return,
        };

        let read = record
            .get(&attribute.name)
            .filter(|v| !v.is_null())
            .map(|v| read_value(attribute, kind, v));
        let value = read.as_deref();

        let unit = value.and_then(ItemValue::as_unit);
        let check_value = match (value, unit) {
            (_, Some(unit)) => {
                if !attribute.is_unit_based() {
                    self.result
                        .add(&path, ErrorCode::UnitValueNotAllowed)
                        .param(&unit.unit);
                }
                Some(&*unit.value).filter(|v| !v.is_null())
            }
            (Some(plain), None) => {
                if attribute.is_unit_based() {
                    self.result
                        .add(&path, ErrorCode::UnitValueRequired)
                        .param(plain.type_name());
                }
                Some(plain)
            }
            (None, None) => None,
        };

        if attribute.mandatory && is_missing(kind, check_value) {
            self.result.add(&path, ErrorCode::ValueMissing);
        }

        if let Some(unit) = unit {
            if attribute.is_unit_based() && attribute.unit(&unit.unit).is_none() {
                self.result.add(&path, ErrorCode::UnitUnknown).param(&unit.unit);
            }
        }

        let value = match check_value {
            Some(value) => value,
            None => return,
        };

        if !is_assignable(kind, value) {
            self.result
                .add(&path, ErrorCode::ValueTypeMismatch)
                .param(kind)
                .param(value.type_name());
            return;
        }

        self.hooks
            .item_attribute_validation(attribute, value, &path, self.result);

        match (kind, value) {
            (AttributeKind::Structure, ItemValue::Record(nested_record)) => {
                if let Some(nested) = &attribute.nested_structure {
                    let prefix = format!("{}{}", path, PATH_SEPARATOR);
                    self.level(nested, nested_record, &prefix);
                }
            }
            (AttributeKind::List, ItemValue::List(values)) => {
                self.list(attribute, values, &path);
            }
            _ => self.simple(attribute, kind, value, unit, &path),
        }
    }

    fn list(&mut self, attribute: &Attribute, values: &[ItemValue], path: &str) {
        let value_type = match attribute.value_type {
            Some(value_type) => value_type,
            None => return,
        };

        let mismatched = values
            .iter()
            .filter(|v| !is_assignable(value_type, v))
            .count();
        if mismatched > 0 {
            self.result
                .add(path, ErrorCode::ListElementTypeMismatch)
                .param(value_type)
                .param(mismatched);
        }

        if let Some(nested) = &attribute.nested_structure {
            for (index, element) in values.iter().enumerate() {
                if let ItemValue::Record(record) = element {
                    let prefix = format!("{}[{}]{}", path, index, PATH_SEPARATOR);
                    self.level(nested, record, &prefix);
                    self.undefined(nested, record, &prefix);
                }
            }
        }

        self.hooks
            .item_list_attribute_value_validation(attribute, values, path, self.result);
    }

    fn simple(
        &mut self,
        attribute: &Attribute,
        kind: AttributeKind,
        value: &ItemValue,
        unit: Option<&UnitValue>,
        path: &str,
    ) {
        if kind == AttributeKind::String {
            if let Some(text) = value.as_str() {
                self.text(attribute, text, path);
            }
        } else if kind.is_numeric() {
            // Unit values compare in the base unit; unknown units were reported above
            let number = match unit {
                Some(unit) if attribute.is_unit_based() => {
                    unit.normalized(&attribute.units).map(Number::Float)
                }
                _ => Number::of(value),
            };
            if let Some(number) = number {
                self.range(attribute, number, path);
            }
        }

        self.hooks
            .item_simple_attribute_value_validation(attribute, value, path, self.result);
    }

    fn text(&mut self, attribute: &Attribute, text: &str, path: &str) {
        let length = text.chars().count() as f64;
        if let Some(min) = attribute.min {
            if length < min {
                self.result
                    .add(path, ErrorCode::ValueTooShort)
                    .param(min)
                    .param(length);
            }
        }
        if let Some(max) = attribute.max {
            if length > max {
                self.result
                    .add(path, ErrorCode::ValueTooLong)
                    .param(max)
                    .param(length);
            }
        }
        if let Some(pattern) = &attribute.pattern {
            if self.patterns.is_match(pattern, text) == Some(false) {
                self.result
                    .add(path, ErrorCode::PatternMismatch)
                    .param(pattern)
                    .param(text);
            }
        }
    }

    fn range(&mut self, attribute: &Attribute, number: Number, path: &str) {
        if let Some(min) = attribute.min {
            if number.cmp_bound(min) == Some(Ordering::Less) {
                self.result
                    .add(path, ErrorCode::ValueTooSmall)
                    .param(min)
                    .param(number);
            }
        }
        if let Some(max) = attribute.max {
            if number.cmp_bound(max) == Some(Ordering::Greater) {
                self.result
                    .add(path, ErrorCode::ValueTooLarge)
                    .param(max)
                    .param(number);
            }
        }
    }
}

/// Reads a value the way its attribute sees it.
///
/// Records holding exactly `unit` and `value` deserialise as unit values;
/// structures and lists of structures read them back as records.
fn read_value<'v>(
    attribute: &Attribute,
    kind: AttributeKind,
    value: &'v ItemValue,
) -> Cow<'v, ItemValue> {
    match (kind, value) {
        (AttributeKind::Structure, ItemValue::Unit(unit)) => {
            Cow::Owned(ItemValue::Record(unit.to_record()))
        }
        (AttributeKind::List, ItemValue::List(values))
            if attribute.value_type == Some(AttributeKind::Structure)
                && values.iter().any(|v| v.as_unit().is_some()) =>
        {
            let values = values
                .iter()
                .map(|v| match v {
                    ItemValue::Unit(unit) => ItemValue::Record(unit.to_record()),
                    other => other.clone(),
                })
                .collect();
            Cow::Owned(ItemValue::List(values))
        }
        _ => Cow::Borrowed(value),
    }
}

/// A numeric value in the representation it arrived in.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    fn of(value: &ItemValue) -> Option<Self> {
        match value {
            ItemValue::Integer(i) => Some(Number::Integer(*i)),
            ItemValue::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    /// Integers are compared exactly against integral bounds in `i64` range.
    fn cmp_bound(self, bound: f64) -> Option<Ordering> {
        match self {
            Number::Integer(i)
                if bound.fract() == 0.0 && bound >= i64::MIN as f64 && bound < i64::MAX as f64 =>
            {
                Some(i.cmp(&(bound as i64)))
            }
            Number::Integer(i) => (i as f64).partial_cmp(&bound),
            Number::Float(f) => f.partial_cmp(&bound),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Absent, blank text on a text-carrying kind, or an empty list.
fn is_missing(kind: AttributeKind, value: Option<&ItemValue>) -> bool {
    match value {
        None => true,
        Some(ItemValue::Text(text)) if kind.accepts(ValueShape::Text) => text.trim().is_empty(),
        Some(ItemValue::List(values)) if kind.is_list() => values.is_empty(),
        Some(_) => false,
    }
}
