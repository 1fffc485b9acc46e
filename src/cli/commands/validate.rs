//! Validate command implementation

use crate::cli::error::CliError;
use crate::cli::input::{print_json, read_document};
use crate::models::RecipeDraft;
use crate::validation::{RecipeValidationResult, validate_recipe};

/// Validate a recipe draft file without printing
pub fn validate_draft_file(input: &str) -> Result<RecipeValidationResult, CliError> {
    let draft: RecipeDraft = read_document(input)?;
    Ok(validate_recipe(&draft))
}

/// Handle the validate command
///
/// Prints the validation result as JSON and fails when the draft is invalid.
pub fn handle_validate(input: &str) -> Result<(), CliError> {
    let result = validate_draft_file(input)?;
    print_json(&result)?;

    if result.is_valid {
        Ok(())
    } else {
        Err(CliError::ValidationFailed(format!(
            "{} error(s) in {}",
            result.errors.len(),
            input
        )))
    }
}
