//! Structured validation results
//!
//! Composite validators collect every problem into a [`RecipeValidationResult`] instead
//! of stopping at the first one, so a form can highlight all offending fields at once.

use super::input::ValidationError;
use crate::models::ErrorCode;
use serde::{Deserialize, Serialize};

/// One reported problem, addressed by a camelCase field path such as
/// `recipeItems[2].quantity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: ErrorCode,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }

    /// Report an input error against a field path
    pub fn from_validation(field: impl Into<String>, error: &ValidationError) -> Self {
        Self::new(field, error.to_string(), error.code())
    }
}

/// Result of a composite validation.
///
/// `is_valid` is true iff `errors` is empty. Warnings never block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use = "validation results should be checked before using the validated input"]
pub struct RecipeValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
    pub warnings: Vec<FieldError>,
}

impl Default for RecipeValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeValidationResult {
    /// An empty, valid result
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// A result holding a single error
    pub fn from_error(error: FieldError) -> Self {
        let mut result = Self::new();
        result.push_error(error);
        result
    }

    pub fn push_error(&mut self, error: FieldError) {
        self.errors.push(error);
        self.is_valid = false;
    }

    pub fn push_warning(&mut self, warning: FieldError) {
        self.warnings.push(warning);
    }

    /// Record an input error against a field path
    pub fn reject(&mut self, field: impl Into<String>, error: &ValidationError) {
        self.push_error(FieldError::from_validation(field, error));
    }

    /// Record the error of a single-field check, if any
    pub fn check<T>(&mut self, field: impl Into<String>, outcome: Result<T, ValidationError>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(e) => {
                self.reject(field, &e);
                None
            }
        }
    }

    /// Append all errors and warnings of another result
    pub fn merge(&mut self, other: RecipeValidationResult) {
        for error in other.errors {
            self.push_error(error);
        }
        self.warnings.extend(other.warnings);
    }

    /// First error message, if any
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    /// Whether any error was reported for exactly this field path
    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Whether any error carries the given code
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// `Ok(value)` when valid, otherwise the result itself as the error
    pub fn into_result<T>(self, value: T) -> Result<T, RecipeValidationResult> {
        if self.is_valid { Ok(value) } else { Err(self) }
    }
}

/// Result of a single-field validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use = "validation results should be checked"]
pub struct FieldValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FieldValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }
}

impl From<&RecipeValidationResult> for FieldValidation {
    fn from(result: &RecipeValidationResult) -> Self {
        match result.first_error() {
            Some(message) => FieldValidation::invalid(message),
            None => FieldValidation::valid(),
        }
    }
}
