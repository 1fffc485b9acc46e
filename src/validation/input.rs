//! Single-field input validation.
//!
//! These checks are the building blocks of the composite recipe and request validators.
//! Each returns a [`ValidationError`] naming the field it rejected; the composite
//! validators attach the full field path and collect the errors into a
//! [`RecipeValidationResult`](super::RecipeValidationResult).

use crate::models::ErrorCode;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

/// Minimum length for recipe names (after trimming)
pub const MIN_RECIPE_NAME_LENGTH: usize = 3;

/// Maximum length for recipe names (after trimming)
pub const MAX_RECIPE_NAME_LENGTH: usize = 100;

/// Maximum length for recipe descriptions
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Maximum length for recipe notes
pub const MAX_RECIPE_NOTES_LENGTH: usize = 2000;

/// Maximum length for item, step and batch notes and adjustment reasons
pub const MAX_SHORT_NOTES_LENGTH: usize = 500;

/// Maximum length for workflow notes and test results text
pub const MAX_WORKFLOW_TEXT_LENGTH: usize = 1000;

/// Minimum length for step instructions (after trimming)
pub const MIN_INSTRUCTION_LENGTH: usize = 10;

/// Maximum length for step instructions (after trimming)
pub const MAX_INSTRUCTION_LENGTH: usize = 500;

/// Largest quantity or generated amount accepted
pub const MAX_QUANTITY: f64 = 999_999.99;

/// Largest serving count accepted
pub const MAX_SERVINGS: u32 = 999;

/// Largest step number accepted
pub const MAX_STEP_NUMBER: u32 = 999;

/// Largest step duration accepted, in minutes
pub const MAX_STEP_MINUTES: f64 = 9999.0;

/// Errors that can occur during input validation.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum ValidationError {
    /// Input is absent or blank when a value is required
    #[error("{0} is required")]
    Required(&'static str),

    /// Text is shorter than allowed
    #[error("{field} must have at least {min} characters (got {actual})")]
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },

    /// Text exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Number must be strictly greater than zero
    #[error("{field} must be greater than zero (got {actual})")]
    NotPositive { field: &'static str, actual: f64 },

    /// Number is below the allowed minimum
    #[error("{field} must be at least {min} (got {actual})")]
    BelowMinimum {
        field: &'static str,
        min: f64,
        actual: f64,
    },

    /// Number exceeds the allowed maximum
    #[error("{field} must be at most {max} (got {actual})")]
    AboveMaximum {
        field: &'static str,
        max: f64,
        actual: f64,
    },

    /// Number must be a whole number
    #[error("{0} must be a whole number")]
    NotInteger(&'static str),

    /// Number is NaN or infinite
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    /// Value is not one of the accepted choices
    #[error("{0}: {1}")]
    InvalidChoice(&'static str, String),

    /// Value is present where it must be absent
    #[error("{field} is not allowed: {reason}")]
    NotAllowed { field: &'static str, reason: String },
}

impl ValidationError {
    /// Error code reported to callers
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::Required(_) => ErrorCode::Required,
            ValidationError::TooShort { .. }
            | ValidationError::NotPositive { .. }
            | ValidationError::BelowMinimum { .. } => ErrorCode::MinValue,
            ValidationError::TooLong { .. } | ValidationError::AboveMaximum { .. } => {
                ErrorCode::MaxValue
            }
            ValidationError::NotInteger(_)
            | ValidationError::NotFinite(_)
            | ValidationError::InvalidChoice(..)
            | ValidationError::NotAllowed { .. } => ErrorCode::Invalid,
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Require a non-blank text value, returning it trimmed.
///
/// # Examples
///
/// ```
/// use recipe_costing_sdk::validation::input::require_text;
///
/// assert_eq!(require_text("recipeId", Some("  rec_1 ")), Ok("rec_1"));
/// assert!(require_text("recipeId", Some("   ")).is_err());
/// assert!(require_text("recipeId", None).is_err());
/// ```
pub fn require_text<'a>(field: &'static str, value: Option<&'a str>) -> ValidationResult<&'a str> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed),
        _ => Err(ValidationError::Required(field)),
    }
}

/// Validate the trimmed character count of a text value.
pub fn validate_text_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> ValidationResult<()> {
    let actual = value.trim().chars().count();
    if actual < min {
        return Err(ValidationError::TooShort { field, min, actual });
    }
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

/// Validate an optional free-text value against a maximum character count.
pub fn validate_max_length(field: &'static str, value: &str, max: usize) -> ValidationResult<()> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

/// Require a finite number.
pub fn require_number(field: &'static str, value: Option<f64>) -> ValidationResult<f64> {
    let value = value.ok_or(ValidationError::Required(field))?;
    if !value.is_finite() {
        return Err(ValidationError::NotFinite(field));
    }
    Ok(value)
}

/// Validate a number that must be greater than zero and at most `max`.
///
/// # Examples
///
/// ```
/// use recipe_costing_sdk::validation::input::validate_positive;
///
/// assert!(validate_positive("quantity", 0.5, 100.0).is_ok());
/// assert!(validate_positive("quantity", 0.0, 100.0).is_err());
/// assert!(validate_positive("quantity", 101.0, 100.0).is_err());
/// ```
pub fn validate_positive(field: &'static str, value: f64, max: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite(field));
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive {
            field,
            actual: value,
        });
    }
    if value > max {
        return Err(ValidationError::AboveMaximum {
            field,
            max,
            actual: value,
        });
    }
    Ok(value)
}

/// Validate a number that must be zero or greater, with an optional upper bound.
pub fn validate_non_negative(
    field: &'static str,
    value: f64,
    max: Option<f64>,
) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite(field));
    }
    if value < 0.0 {
        return Err(ValidationError::BelowMinimum {
            field,
            min: 0.0,
            actual: value,
        });
    }
    if let Some(max) = max
        && value > max
    {
        return Err(ValidationError::AboveMaximum {
            field,
            max,
            actual: value,
        });
    }
    Ok(value)
}

/// Validate a whole-number count in `[min, max]`.
///
/// Counts arrive as JSON numbers, so `2.5` servings must be rejected here rather than
/// silently truncated.
pub fn validate_count(field: &'static str, value: f64, min: u32, max: u32) -> ValidationResult<u32> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite(field));
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::NotInteger(field));
    }
    if value < min as f64 {
        return Err(ValidationError::BelowMinimum {
            field,
            min: min as f64,
            actual: value,
        });
    }
    if value > max as f64 {
        return Err(ValidationError::AboveMaximum {
            field,
            max: max as f64,
            actual: value,
        });
    }
    Ok(value as u32)
}

/// Parse a required closed-enum value from its wire name.
///
/// # Examples
///
/// ```
/// use recipe_costing_sdk::models::RecipeCategory;
/// use recipe_costing_sdk::validation::input::parse_choice;
///
/// assert_eq!(parse_choice::<RecipeCategory>("category", Some("cakes")), Ok(RecipeCategory::Cakes));
/// assert!(parse_choice::<RecipeCategory>("category", Some("pies")).is_err());
/// ```
pub fn parse_choice<T>(field: &'static str, value: Option<&str>) -> ValidationResult<T>
where
    T: FromStr<Err = String>,
{
    let raw = require_text(field, value)?;
    raw.parse::<T>()
        .map_err(|reason| ValidationError::InvalidChoice(field, reason))
}
