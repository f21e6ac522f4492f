//! Validation error codes
//!
//! Every code maps to one of seven error kinds and a stable `GT_*` string
//! that callers translate into localised messages. Four codes are fatal:
//! they end validation because the remaining checks would run against a
//! missing or wrong schema.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Coarse classification of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    MissingRequiredField,
    /// Range, length, pattern or parse failure
    InvalidValue,
    /// Feature used on a kind that does not support it
    CapabilityViolation,
    /// Wrong shape: list where scalar expected, missing or extra nested structure
    StructuralMismatch,
    /// Duplicate id or name, dangling or self reference
    IdentityConflict,
    /// Item type id or attribute path does not match the type
    CrossReferenceMismatch,
    /// The type failed validation, so the item cannot be checked
    UpstreamInvalid,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            ErrorKind::InvalidValue => "INVALID_VALUE",
            ErrorKind::CapabilityViolation => "CAPABILITY_VIOLATION",
            ErrorKind::StructuralMismatch => "STRUCTURAL_MISMATCH",
            ErrorKind::IdentityConflict => "IDENTITY_CONFLICT",
            ErrorKind::CrossReferenceMismatch => "CROSS_REFERENCE_MISMATCH",
            ErrorKind::UpstreamInvalid => "UPSTREAM_INVALID",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Specific validation conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Fatal
    /// No type given
    TypeRequired,
    /// No item given
    ItemRequired,
    /// Item type id unset or different from the type id
    ItemTypeMismatch,
    /// The item's type does not validate
    ReferencedTypeInvalid,

    // Type level
    TypeNameBlank,
    TypeGroupBlank,
    TypePageSizeInvalid,

    // Structure level
    AttributeIdAmbiguous,
    AttributeNameAmbiguous,
    NestingTooDeep,

    // Attribute definition
    AttributeIdMissing,
    AttributeNameBlank,
    /// Name contains the path separator
    AttributeNameInvalid,
    AttributeKindMissing,
    UniqueNotMandatory,
    MinMaxNotCapable,
    StepNotCapable,
    PatternNotCapable,
    DependenciesNotCapable,
    UnitsNotCapable,
    MinNotLessThanMax,
    StepNotPositive,
    PatternInvalid,
    DependencyUnknown,
    DependencySelf,
    /// Units do not declare exactly one base unit
    UnitBaseInvalid,
    UnitNameBlank,
    UnitNameAmbiguous,
    DefaultValueNotAllowed,
    DefaultValueUnparsable,
    DefaultValueTooShort,
    DefaultValueTooLong,
    DefaultValueTooSmall,
    DefaultValueTooLarge,
    DefaultValuePatternMismatch,
    ValueTypeMissing,
    ValueTypeNotAllowed,
    NestedListNotAllowed,
    NestedStructureMissing,
    NestedStructureNotAllowed,

    // Item values
    /// Mandatory value absent, blank or empty
    ValueMissing,
    UnitValueRequired,
    UnitValueNotAllowed,
    UnitUnknown,
    ValueTypeMismatch,
    ListElementTypeMismatch,
    ValueTooShort,
    ValueTooLong,
    ValueTooSmall,
    ValueTooLarge,
    PatternMismatch,
    UndefinedAttribute,
}

impl ErrorCode {
    /// Returns the stable code string
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::TypeRequired => "GT_TYPE_REQUIRED",
            ErrorCode::ItemRequired => "GT_ITEM_REQUIRED",
            ErrorCode::ItemTypeMismatch => "GT_ITEM_TYPE_MISMATCH",
            ErrorCode::ReferencedTypeInvalid => "GT_REFERENCED_TYPE_INVALID",
            ErrorCode::TypeNameBlank => "GT_TYPE_NAME_BLANK",
            ErrorCode::TypeGroupBlank => "GT_TYPE_GROUP_BLANK",
            ErrorCode::TypePageSizeInvalid => "GT_TYPE_PAGE_SIZE_INVALID",
            ErrorCode::AttributeIdAmbiguous => "GT_ATTRIBUTE_ID_AMBIGUOUS",
            ErrorCode::AttributeNameAmbiguous => "GT_ATTRIBUTE_NAME_AMBIGUOUS",
            ErrorCode::NestingTooDeep => "GT_NESTING_TOO_DEEP",
            ErrorCode::AttributeIdMissing => "GT_ATTRIBUTE_ID_MISSING",
            ErrorCode::AttributeNameBlank => "GT_ATTRIBUTE_NAME_BLANK",
            ErrorCode::AttributeNameInvalid => "GT_ATTRIBUTE_NAME_INVALID",
            ErrorCode::AttributeKindMissing => "GT_ATTRIBUTE_KIND_MISSING",
            ErrorCode::UniqueNotMandatory => "GT_UNIQUE_NOT_MANDATORY",
            ErrorCode::MinMaxNotCapable => "GT_MIN_MAX_NOT_CAPABLE",
            ErrorCode::StepNotCapable => "GT_STEP_NOT_CAPABLE",
            ErrorCode::PatternNotCapable => "GT_PATTERN_NOT_CAPABLE",
            ErrorCode::DependenciesNotCapable => "GT_DEPENDENCIES_NOT_CAPABLE",
            ErrorCode::UnitsNotCapable => "GT_UNITS_NOT_CAPABLE",
            ErrorCode::MinNotLessThanMax => "GT_MIN_NOT_LESS_THAN_MAX",
            ErrorCode::StepNotPositive => "GT_STEP_NOT_POSITIVE",
            ErrorCode::PatternInvalid => "GT_PATTERN_INVALID",
            ErrorCode::DependencyUnknown => "GT_DEPENDENCY_UNKNOWN",
            ErrorCode::DependencySelf => "GT_DEPENDENCY_SELF",
            ErrorCode::UnitBaseInvalid => "GT_UNIT_BASE_INVALID",
            ErrorCode::UnitNameBlank => "GT_UNIT_NAME_BLANK",
            ErrorCode::UnitNameAmbiguous => "GT_UNIT_NAME_AMBIGUOUS",
            ErrorCode::DefaultValueNotAllowed => "GT_DEFAULT_VALUE_NOT_ALLOWED",
            ErrorCode::DefaultValueUnparsable => "GT_DEFAULT_VALUE_UNPARSABLE",
            ErrorCode::DefaultValueTooShort => "GT_DEFAULT_VALUE_TOO_SHORT",
            ErrorCode::DefaultValueTooLong => "GT_DEFAULT_VALUE_TOO_LONG",
            ErrorCode::DefaultValueTooSmall => "GT_DEFAULT_VALUE_TOO_SMALL",
            ErrorCode::DefaultValueTooLarge => "GT_DEFAULT_VALUE_TOO_LARGE",
            ErrorCode::DefaultValuePatternMismatch => "GT_DEFAULT_VALUE_PATTERN_MISMATCH",
            ErrorCode::ValueTypeMissing => "GT_VALUE_TYPE_MISSING",
            ErrorCode::ValueTypeNotAllowed => "GT_VALUE_TYPE_NOT_ALLOWED",
            ErrorCode::NestedListNotAllowed => "GT_NESTED_LIST_NOT_ALLOWED",
            ErrorCode::NestedStructureMissing => "GT_NESTED_STRUCTURE_MISSING",
            ErrorCode::NestedStructureNotAllowed => "GT_NESTED_STRUCTURE_NOT_ALLOWED",
            ErrorCode::ValueMissing => "GT_VALUE_MISSING",
            ErrorCode::UnitValueRequired => "GT_UNIT_VALUE_REQUIRED",
            ErrorCode::UnitValueNotAllowed => "GT_UNIT_VALUE_NOT_ALLOWED",
            ErrorCode::UnitUnknown => "GT_UNIT_UNKNOWN",
            ErrorCode::ValueTypeMismatch => "GT_VALUE_TYPE_MISMATCH",
            ErrorCode::ListElementTypeMismatch => "GT_LIST_ELEMENT_TYPE_MISMATCH",
            ErrorCode::ValueTooShort => "GT_VALUE_TOO_SHORT",
            ErrorCode::ValueTooLong => "GT_VALUE_TOO_LONG",
            ErrorCode::ValueTooSmall => "GT_VALUE_TOO_SMALL",
            ErrorCode::ValueTooLarge => "GT_VALUE_TOO_LARGE",
            ErrorCode::PatternMismatch => "GT_PATTERN_MISMATCH",
            ErrorCode::UndefinedAttribute => "GT_UNDEFINED_ATTRIBUTE",
        }
    }

    /// Returns the error kind of this code
    pub fn kind(&self) -> ErrorKind {
        use ErrorCode::*;
        match self {
            TypeRequired | ItemRequired | TypeNameBlank | TypeGroupBlank | AttributeIdMissing
            | AttributeNameBlank | AttributeKindMissing | UnitNameBlank | ValueTypeMissing
            | ValueMissing => ErrorKind::MissingRequiredField,

            TypePageSizeInvalid | AttributeNameInvalid | MinNotLessThanMax | StepNotPositive
            | PatternInvalid | UnitBaseInvalid | DefaultValueUnparsable | DefaultValueTooShort
            | DefaultValueTooLong | DefaultValueTooSmall | DefaultValueTooLarge
            | DefaultValuePatternMismatch | ValueTooShort | ValueTooLong | ValueTooSmall
            | ValueTooLarge | PatternMismatch => ErrorKind::InvalidValue,

            MinMaxNotCapable | StepNotCapable | PatternNotCapable | DependenciesNotCapable
            | UnitsNotCapable | DefaultValueNotAllowed => ErrorKind::CapabilityViolation,

            NestingTooDeep | ValueTypeNotAllowed | NestedListNotAllowed
            | NestedStructureMissing | NestedStructureNotAllowed | UnitValueRequired
            | UnitValueNotAllowed | UnitUnknown | ValueTypeMismatch
            | ListElementTypeMismatch => ErrorKind::StructuralMismatch,

            AttributeIdAmbiguous | AttributeNameAmbiguous | UniqueNotMandatory
            | DependencyUnknown | DependencySelf | UnitNameAmbiguous => {
                ErrorKind::IdentityConflict
            }

            ItemTypeMismatch | UndefinedAttribute => ErrorKind::CrossReferenceMismatch,

            ReferencedTypeInvalid => ErrorKind::UpstreamInvalid,
        }
    }

    /// Returns whether this code ends validation
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ErrorCode::TypeRequired
                | ErrorCode::ItemRequired
                | ErrorCode::ItemTypeMismatch
                | ErrorCode::ReferencedTypeInvalid
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// One validation finding: where, what, and message parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending attribute or value; empty for the root
    pub path: String,
    pub code: ErrorCode,
    /// Values substituted into the localised message
    pub params: Vec<String>,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            path: path.into(),
            code,
            params: Vec::new(),
        }
    }

    /// Appends a message parameter.
    pub fn param(&mut self, value: impl ToString) -> &mut Self {
        self.params.push(value.to_string());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    pub fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "$root" } else { &self.path };
        write!(f, "[{}] {}: {}", self.code.kind(), path, self.code.code())?;
        if !self.params.is_empty() {
            write!(f, " ({})", self.params.join(", "))?;
        }
        Ok(())
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationError", 4)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("kind", &self.code.kind())?;
        state.serialize_field("params", &self.params)?;
        state.end()
    }
}
