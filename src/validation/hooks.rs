//! Extension hooks
//!
//! Both validators call into a caller-supplied `ValidationHooks` at fixed
//! points of the walk. Hooks receive the in-progress result and may append
//! errors; the result type offers no way to remove them. Every method has
//! an empty default body, so implementations override only what they need.
//! `NoopHooks` is the default.

use super::result::ValidationResult;
use crate::item::{Item, ItemValue, Record};
use crate::model::{Attribute, GenericType, Structure};

/// Type-side result
pub type TypeValidation<'a> = ValidationResult<'a, GenericType>;

/// Item-side result
pub type ItemValidation<'a> = ValidationResult<'a, Item>;

/// Callbacks invoked during type and item validation.
///
/// `path` is the dotted path of the attribute being checked, or the prefix
/// (ending in `.`, empty at the root) of the structure being walked.
#[allow(unused_variables)]
pub trait ValidationHooks {
    /// After the type's own fields were checked.
    fn type_validation(&self, generic_type: &GenericType, result: &mut TypeValidation<'_>) {}

    /// After every attribute of a structure was checked.
    fn structure_validation(
        &self,
        structure: &Structure,
        path: &str,
        result: &mut TypeValidation<'_>,
    ) {
    }

    /// After the kind-independent checks of an attribute definition.
    fn type_attribute_validation(
        &self,
        attribute: &Attribute,
        path: &str,
        result: &mut TypeValidation<'_>,
    ) {
    }

    fn type_list_attribute_validation(
        &self,
        attribute: &Attribute,
        path: &str,
        result: &mut TypeValidation<'_>,
    ) {
    }

    fn type_structure_attribute_validation(
        &self,
        attribute: &Attribute,
        path: &str,
        result: &mut TypeValidation<'_>,
    ) {
    }

    fn type_single_attribute_validation(
        &self,
        attribute: &Attribute,
        path: &str,
        result: &mut TypeValidation<'_>,
    ) {
    }

    /// Once per item, after the type reference was checked.
    fn item_validation(
        &self,
        generic_type: &GenericType,
        item: &Item,
        result: &mut ItemValidation<'_>,
    ) {
    }

    /// After every attribute of one record level was checked.
    fn item_level_validation(
        &self,
        structure: &Structure,
        record: &Record,
        path: &str,
        result: &mut ItemValidation<'_>,
    ) {
    }

    /// For every present value whose shape matches its attribute.
    fn item_attribute_validation(
        &self,
        attribute: &Attribute,
        value: &ItemValue,
        path: &str,
        result: &mut ItemValidation<'_>,
    ) {
    }

    fn item_list_attribute_value_validation(
        &self,
        attribute: &Attribute,
        values: &[ItemValue],
        path: &str,
        result: &mut ItemValidation<'_>,
    ) {
    }

    fn item_simple_attribute_value_validation(
        &self,
        attribute: &Attribute,
        value: &ItemValue,
        path: &str,
        result: &mut ItemValidation<'_>,
    ) {
    }
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl ValidationHooks for NoopHooks {}

/// Shared no-op instance for validators built without hooks.
pub(crate) static NOOP_HOOKS: NoopHooks = NoopHooks;
