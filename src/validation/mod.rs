//! Validation of generic types and items
//!
//! Two entry points: [`validate_type`] checks a type definition against
//! the attribute capability table, [`validate_item`] checks an item
//! against its (re-validated) type. Both return a [`ValidationResult`]
//! listing every defect found in one pass.
//!
//! Callers needing extra rules implement [`ValidationHooks`] and build a
//! [`TypeValidator`] or [`ItemValidator`] with them.

mod config;
mod errors;
mod hooks;
mod item_validator;
mod result;
mod type_validator;

pub use config::{ValidatorConfig, DEFAULT_MAX_DEPTH};
pub use errors::{ErrorCode, ErrorKind, ValidationError};
pub use hooks::{ItemValidation, NoopHooks, TypeValidation, ValidationHooks};
pub use item_validator::ItemValidator;
pub use result::{ValidationReport, ValidationResult};
pub use type_validator::TypeValidator;

use crate::item::Item;
use crate::model::GenericType;

/// Validates a type definition with default settings and no hooks.
pub fn validate_type(generic_type: Option<&GenericType>) -> ValidationResult<'_, GenericType> {
    TypeValidator::default().validate_type(generic_type)
}

/// Validates an item against its type with default settings and no hooks.
pub fn validate_item<'a>(
    generic_type: Option<&GenericType>,
    item: Option<&'a Item>,
) -> ValidationResult<'a, Item> {
    ItemValidator::default().validate_item(generic_type, item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemValue, Record};
    use crate::model::{Attribute, AttributeKind, Structure};
    use std::cell::RefCell;

    /// Rejects odd ages and records which hooks ran.
    #[derive(Default)]
    struct EvenAges {
        calls: RefCell<Vec<&'static str>>,
    }

    impl ValidationHooks for EvenAges {
        fn type_validation(&self, _: &GenericType, _: &mut TypeValidation<'_>) {
            self.calls.borrow_mut().push("type");
        }

        fn type_single_attribute_validation(
            &self,
            _: &Attribute,
            _: &str,
            _: &mut TypeValidation<'_>,
        ) {
            self.calls.borrow_mut().push("single");
        }

        fn item_validation(&self, _: &GenericType, _: &Item, _: &mut ItemValidation<'_>) {
            self.calls.borrow_mut().push("item");
        }

        fn item_simple_attribute_value_validation(
            &self,
            attribute: &Attribute,
            value: &ItemValue,
            path: &str,
            result: &mut ItemValidation<'_>,
        ) {
            self.calls.borrow_mut().push("simple");
            if attribute.name == "age" && value.as_f64().map_or(false, |v| v % 2.0 != 0.0) {
                result.add(path, ErrorCode::ValueTooLarge).param("even");
            }
        }
    }

    /// Records every callback with its path and rejects one attribute name.
    #[derive(Default)]
    struct Recording {
        calls: RefCell<Vec<String>>,
        reject_definition: Option<&'static str>,
        reject_value: Option<&'static str>,
    }

    impl Recording {
        fn record(&self, hook: &str, path: &str) {
            self.calls.borrow_mut().push(format!("{}:{}", hook, path));
        }

        fn take(&self) -> Vec<String> {
            self.calls.borrow_mut().drain(..).collect()
        }
    }

    impl ValidationHooks for Recording {
        fn type_validation(&self, _: &GenericType, _: &mut TypeValidation<'_>) {
            self.record("type", "");
        }

        fn structure_validation(&self, _: &Structure, path: &str, _: &mut TypeValidation<'_>) {
            self.record("structure", path);
        }

        fn type_attribute_validation(
            &self,
            attribute: &Attribute,
            path: &str,
            result: &mut TypeValidation<'_>,
        ) {
            self.record("attribute", path);
            if self.reject_definition == Some(attribute.name.as_str()) {
                result
                    .add(path, ErrorCode::AttributeNameInvalid)
                    .param(&attribute.name);
            }
        }

        fn type_list_attribute_validation(
            &self,
            _: &Attribute,
            path: &str,
            _: &mut TypeValidation<'_>,
        ) {
            self.record("list", path);
        }

        fn type_structure_attribute_validation(
            &self,
            _: &Attribute,
            path: &str,
            _: &mut TypeValidation<'_>,
        ) {
            self.record("structure-attribute", path);
        }

        fn type_single_attribute_validation(
            &self,
            _: &Attribute,
            path: &str,
            _: &mut TypeValidation<'_>,
        ) {
            self.record("single", path);
        }

        fn item_validation(&self, _: &GenericType, _: &Item, _: &mut ItemValidation<'_>) {
            self.record("item", "");
        }

        fn item_level_validation(
            &self,
            _: &Structure,
            _: &Record,
            path: &str,
            _: &mut ItemValidation<'_>,
        ) {
            self.record("level", path);
        }

        fn item_attribute_validation(
            &self,
            _: &Attribute,
            _: &ItemValue,
            path: &str,
            _: &mut ItemValidation<'_>,
        ) {
            self.record("value", path);
        }

        fn item_list_attribute_value_validation(
            &self,
            _: &Attribute,
            _: &[ItemValue],
            path: &str,
            _: &mut ItemValidation<'_>,
        ) {
            self.record("list-values", path);
        }

        fn item_simple_attribute_value_validation(
            &self,
            attribute: &Attribute,
            _: &ItemValue,
            path: &str,
            result: &mut ItemValidation<'_>,
        ) {
            self.record("simple", path);
            if self.reject_value == Some(attribute.name.as_str()) {
                result.add(path, ErrorCode::PatternMismatch);
            }
        }
    }

    fn order() -> GenericType {
        GenericType::new("order", "g")
            .with_id("o")
            .with_attribute(Attribute::new(1, "age", AttributeKind::Long))
            .with_attribute(Attribute::list(2, "tags", AttributeKind::String))
            .with_attribute(Attribute::structure(
                3,
                "address",
                Structure::new(vec![Attribute::new(31, "city", AttributeKind::String)]),
            ))
            .with_attribute(Attribute::structure_list(
                4,
                "phones",
                Structure::new(vec![Attribute::new(41, "number", AttributeKind::String)]),
            ))
    }

    fn order_item() -> Item {
        Item::new("o")
            .with("age", 4)
            .with("tags", vec![ItemValue::from("a")])
            .with("address.city", "x")
            .with("phones", vec![ItemValue::from(Record::new().with("number", "1"))])
    }

    fn person() -> GenericType {
        GenericType::new("t", "g").with_id("t1").with_attribute(
            Attribute::new(1, "age", AttributeKind::Long)
                .mandatory()
                .with_range(Some(0.0), Some(120.0)),
        )
    }

    #[test]
    fn test_entry_points() {
        let t = person();
        assert!(validate_type(Some(&t)).is_valid());

        let item = Item::new("t1").with("age", 150);
        let result = validate_item(Some(&t), Some(&item));
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.errors()[0].code, ErrorCode::ValueTooLarge);
        assert_eq!(result.errors()[0].kind(), ErrorKind::InvalidValue);
        assert_eq!(result.errors()[0].path, "age");
    }

    #[test]
    fn test_hooks_append_errors() {
        let hooks = EvenAges::default();
        let validator = ItemValidator::new(&hooks, ValidatorConfig::default());
        let t = person();

        let item = Item::new("t1").with("age", 33);
        let result = validator.validate_item(Some(&t), Some(&item));
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.errors()[0].params, vec!["even"]);

        assert_eq!(
            *hooks.calls.borrow(),
            vec!["type", "single", "item", "simple"]
        );
    }

    #[test]
    fn test_hook_call_order() {
        let hooks = Recording::default();
        let t = order();
        let item = order_item();

        let types = TypeValidator::new(&hooks, ValidatorConfig::default());
        assert!(types.validate_type(Some(&t)).is_valid());
        let type_calls = hooks.take();
        assert_eq!(
            type_calls,
            vec![
                "type:",
                "attribute:age",
                "single:age",
                "attribute:tags",
                "list:tags",
                "attribute:address",
                "attribute:address.city",
                "single:address.city",
                "structure:address.",
                "structure-attribute:address",
                "attribute:phones",
                "attribute:phones.number",
                "single:phones.number",
                "structure:phones.",
                "list:phones",
                "structure:",
            ]
        );

        let items = ItemValidator::new(&hooks, ValidatorConfig::default());
        assert!(items.validate_item(Some(&t), Some(&item)).is_valid());
        let item_calls = hooks.take();
        assert_eq!(item_calls[..type_calls.len()], type_calls[..]);
        assert_eq!(
            item_calls[type_calls.len()..],
            [
                "item:",
                "value:age",
                "simple:age",
                "value:tags",
                "list-values:tags",
                "value:address",
                "value:address.city",
                "simple:address.city",
                "level:address.",
                "value:phones",
                "value:phones[0].number",
                "simple:phones[0].number",
                "level:phones[0].",
                "list-values:phones",
                "level:",
            ]
        );
    }

    #[test]
    fn test_nested_hook_errors_carry_nested_paths() {
        let t = order();
        let item = order_item();

        let hooks = Recording {
            reject_value: Some("number"),
            ..Recording::default()
        };
        let result = ItemValidator::new(&hooks, ValidatorConfig::default())
            .validate_item(Some(&t), Some(&item));
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.errors()[0].path, "phones[0].number");

        let hooks = Recording {
            reject_definition: Some("city"),
            ..Recording::default()
        };
        let result = TypeValidator::new(&hooks, ValidatorConfig::default()).validate_type(Some(&t));
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.errors()[0].path, "address.city");

        // A hook rejecting the type also stops item validation
        let result = ItemValidator::new(&hooks, ValidatorConfig::default())
            .validate_item(Some(&t), Some(&item));
        assert_eq!(result.errors()[0].code, ErrorCode::ReferencedTypeInvalid);
    }

    #[test]
    fn test_hooks_not_called_for_fatal_results() {
        let hooks = EvenAges::default();
        let validator = ItemValidator::new(&hooks, ValidatorConfig::default());
        let t = person();

        let item = Item::new("other").with("age", 33);
        let result = validator.validate_item(Some(&t), Some(&item));
        assert!(result.has_fatal());
        assert!(hooks.calls.borrow().is_empty());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let t = person();
        let item = Item::new("t1").with("age", -1).with("extra", true);
        let first = validate_item(Some(&t), Some(&item));
        let second = validate_item(Some(&t), Some(&item));
        assert_eq!(first, second);
        assert_eq!(first.error_count(), 2);
    }

    #[test]
    fn test_events_do_not_change_results() {
        let t = person();
        let item = Item::new("t1").with("age", 7);
        let quiet = validate_item(Some(&t), Some(&item));
        let loud = ItemValidator::new(&NoopHooks, ValidatorConfig::with_events())
            .validate_item(Some(&t), Some(&item));
        assert_eq!(quiet, loud);
    }
}
