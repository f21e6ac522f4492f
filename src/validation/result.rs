//! Accumulating validation result
//!
//! Validation never stops at the first defect. Every check appends to one
//! `ValidationResult` threaded through the recursive walk, and the caller
//! receives the full list. The list is append-only: hooks may add errors
//! but cannot remove or rewrite existing ones.

use serde::Serialize;

use super::errors::{ErrorCode, ValidationError};

/// Outcome of validating a subject (a type or an item).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult<'a, T> {
    subject: Option<&'a T>,
    errors: Vec<ValidationError>,
}

impl<'a, T> ValidationResult<'a, T> {
    pub fn new(subject: Option<&'a T>) -> Self {
        Self {
            subject,
            errors: Vec::new(),
        }
    }

    /// The validated subject, absent when none was given.
    pub fn subject(&self) -> Option<&'a T> {
        self.subject
    }

    /// Valid means no errors were recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors in the order they were found.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Records an error and returns it for adding message parameters.
    pub fn add(&mut self, path: impl Into<String>, code: ErrorCode) -> &mut ValidationError {
        self.errors.push(ValidationError::new(path, code));
        let last = self.errors.len() - 1;
        &mut self.errors[last]
    }

    /// Returns true if a fatal error was recorded.
    pub fn has_fatal(&self) -> bool {
        self.errors.iter().any(ValidationError::is_fatal)
    }

    /// Returns true if an error with the given code was recorded.
    pub fn contains(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Number of errors with the given code.
    pub fn count(&self, code: ErrorCode) -> usize {
        self.errors.iter().filter(|e| e.code == code).count()
    }

    /// Errors recorded at the given path.
    pub fn errors_at<'p>(&'p self, path: &'p str) -> impl Iterator<Item = &'p ValidationError> {
        self.errors.iter().filter(move |e| e.path == path)
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Owned, serialisable summary of this result.
    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            valid: self.is_valid(),
            errors: self.errors.clone(),
        }
    }
}

/// Serialisable form of a validation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_valid() {
        let subject = 5;
        let result = ValidationResult::new(Some(&subject));
        assert!(result.is_valid());
        assert_eq!(result.subject(), Some(&5));
        assert!(!result.has_fatal());
    }

    #[test]
    fn test_errors_keep_insertion_order() {
        let mut result: ValidationResult<'_, ()> = ValidationResult::new(None);
        result.add("b", ErrorCode::ValueMissing);
        result.add("a", ErrorCode::ValueTooLarge).param(10);
        result.add("a", ErrorCode::PatternMismatch);

        assert!(!result.is_valid());
        assert_eq!(result.error_count(), 3);
        assert_eq!(result.errors()[0].path, "b");
        assert_eq!(result.errors()[1].params, vec!["10"]);
        assert_eq!(result.errors_at("a").count(), 2);
        assert_eq!(result.count(ErrorCode::ValueMissing), 1);
        assert!(result.contains(ErrorCode::PatternMismatch));
    }

    #[test]
    fn test_fatal_detection() {
        let mut result: ValidationResult<'_, ()> = ValidationResult::new(None);
        result.add("", ErrorCode::TypeRequired);
        assert!(result.has_fatal());
    }

    #[test]
    fn test_report_serializes() {
        let mut result: ValidationResult<'_, ()> = ValidationResult::new(None);
        result.add("x", ErrorCode::UndefinedAttribute);
        let json = serde_json::to_value(result.report()).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0]["code"], "GT_UNDEFINED_ATTRIBUTE");
    }
}
