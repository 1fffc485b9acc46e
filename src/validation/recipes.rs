//! Recipe validation
//!
//! Validates recipe drafts (create and partial update) and converts valid drafts into
//! typed [`Recipe`] values.

use super::input::{
    MAX_DESCRIPTION_LENGTH, MAX_INSTRUCTION_LENGTH, MAX_QUANTITY, MAX_RECIPE_NAME_LENGTH,
    MAX_RECIPE_NOTES_LENGTH, MAX_SERVINGS, MAX_SHORT_NOTES_LENGTH, MAX_STEP_MINUTES,
    MAX_STEP_NUMBER, MIN_INSTRUCTION_LENGTH, MIN_RECIPE_NAME_LENGTH, ValidationError,
    ValidationResult, parse_choice, require_number, require_text, validate_count,
    validate_max_length, validate_non_negative, validate_positive, validate_text_length,
};
use super::result::{FieldError, FieldValidation, RecipeValidationResult};
use crate::models::{
    ErrorCode, ItemKind, Recipe, RecipeCategory, RecipeDifficulty, RecipeDraft, RecipeItem,
    RecipeItemDraft, RecipeStep, RecipeStepDraft, RecipeUpdateDraft, Unit,
};
use chrono::Utc;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

/// Validate a recipe name: 3 to 100 characters after trimming.
///
/// # Examples
///
/// ```
/// use recipe_costing_sdk::validation::validate_recipe_name;
///
/// assert!(validate_recipe_name("Bolo").is_valid);
/// assert!(!validate_recipe_name("  ab  ").is_valid);
/// ```
pub fn validate_recipe_name(name: &str) -> FieldValidation {
    match validate_text_length("name", name, MIN_RECIPE_NAME_LENGTH, MAX_RECIPE_NAME_LENGTH) {
        Ok(()) => FieldValidation::valid(),
        Err(e) => FieldValidation::invalid(e.to_string()),
    }
}

/// Validate a single recipe item, reporting the first problem found.
pub fn validate_recipe_item(item: &RecipeItemDraft) -> FieldValidation {
    let mut result = RecipeValidationResult::new();
    check_item(item, "", &mut result);
    FieldValidation::from(&result)
}

/// Validate a single preparation step, reporting the first problem found.
pub fn validate_recipe_step(step: &RecipeStepDraft) -> FieldValidation {
    let mut result = RecipeValidationResult::new();
    check_step(step, "", &mut result);
    FieldValidation::from(&result)
}

/// Validate a recipe create request.
///
/// Every field is checked and every problem reported. Repeated step numbers are
/// reported as warnings and do not block.
pub fn validate_recipe(draft: &RecipeDraft) -> RecipeValidationResult {
    let mut result = RecipeValidationResult::new();
    check_recipe_fields(draft, true, &mut result);
    debug!(
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated recipe draft"
    );
    result
}

/// Validate a partial recipe update. `id` is required; any other field present must
/// obey the create rules.
pub fn validate_recipe_update(update: &RecipeUpdateDraft) -> RecipeValidationResult {
    let mut result = RecipeValidationResult::new();
    result.check("id", require_text("id", update.id.as_deref()));
    check_recipe_fields(&update.fields, false, &mut result);
    result
}

/// Validate a draft and convert it into a typed recipe with fresh item and step ids.
///
/// Warnings are not returned; call [`validate_recipe`] to inspect them.
pub fn build_recipe(
    draft: &RecipeDraft,
    id: impl Into<String>,
    created_by: impl Into<String>,
) -> Result<Recipe, RecipeValidationResult> {
    let result = validate_recipe(draft);
    if !result.is_valid {
        return Err(result);
    }
    recipe_from_draft(draft, id.into(), created_by.into()).map_err(conversion_failure)
}

/// Apply a partial update to an existing recipe.
///
/// The update is validated on its own, then the merged record is validated as a full
/// recipe. Items and steps are replaced wholesale when present and kept otherwise.
/// Identity and audit fields come from `existing`. Derived costs are cleared and must
/// be recomputed.
pub fn merge_update(
    existing: &Recipe,
    update: &RecipeUpdateDraft,
) -> Result<Recipe, RecipeValidationResult> {
    let mut result = validate_recipe_update(update);
    if let Some(id) = update.id.as_deref().map(str::trim)
        && !id.is_empty()
        && id != existing.id
    {
        result.push_error(FieldError::new(
            "id",
            format!("update for recipe {} cannot be applied to recipe {}", id, existing.id),
            ErrorCode::Invalid,
        ));
    }
    if !result.is_valid {
        return Err(result);
    }

    let merged_draft = RecipeDraft::from(existing).overlay(&update.fields);
    let merged_result = validate_recipe(&merged_draft);
    if !merged_result.is_valid {
        return Err(merged_result);
    }

    let mut merged = recipe_from_draft(&merged_draft, existing.id.clone(), existing.created_by.clone())
        .map_err(conversion_failure)?;
    if update.fields.recipe_items.is_none() {
        merged.recipe_items = existing.recipe_items.clone();
    }
    if update.fields.instructions.is_none() {
        merged.instructions = existing.instructions.clone();
    }
    merged.is_active = existing.is_active;
    merged.created_at = existing.created_at;
    merged.updated_at = Utc::now();
    merged.recalculate_derived();
    Ok(merged)
}

fn conversion_failure(error: ValidationError) -> RecipeValidationResult {
    RecipeValidationResult::from_error(FieldError::from_validation("recipe", &error))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn check_recipe_fields(draft: &RecipeDraft, required: bool, result: &mut RecipeValidationResult) {
    if required || draft.name.is_some() {
        result.check(
            "name",
            require_text("name", draft.name.as_deref()).and_then(|name| {
                validate_text_length("name", name, MIN_RECIPE_NAME_LENGTH, MAX_RECIPE_NAME_LENGTH)
            }),
        );
    }
    if let Some(description) = &draft.description {
        result.check(
            "description",
            validate_max_length("description", description, MAX_DESCRIPTION_LENGTH),
        );
    }
    if required || draft.category.is_some() {
        result.check(
            "category",
            parse_choice::<RecipeCategory>("category", draft.category.as_deref()),
        );
    }
    if required || draft.generated_amount.is_some() {
        result.check(
            "generatedAmount",
            require_number("generatedAmount", draft.generated_amount)
                .and_then(|amount| validate_positive("generatedAmount", amount, MAX_QUANTITY)),
        );
    }
    if required || draft.generated_unit.is_some() {
        result.check(
            "generatedUnit",
            parse_choice::<Unit>("generatedUnit", draft.generated_unit.as_deref()),
        );
    }
    if required || draft.servings.is_some() {
        result.check(
            "servings",
            require_number("servings", draft.servings)
                .and_then(|servings| validate_count("servings", servings, 1, MAX_SERVINGS)),
        );
    }
    if required || draft.difficulty.is_some() {
        result.check(
            "difficulty",
            parse_choice::<RecipeDifficulty>("difficulty", draft.difficulty.as_deref()),
        );
    }

    match draft.recipe_items.as_deref() {
        Some([]) => result.push_error(FieldError::new(
            "recipeItems",
            "recipe must have at least one item",
            ErrorCode::Required,
        )),
        Some(items) => {
            for (index, item) in items.iter().enumerate() {
                check_item(item, &format!("recipeItems[{}].", index), result);
            }
        }
        None if required => result.push_error(FieldError::new(
            "recipeItems",
            "recipe must have at least one item",
            ErrorCode::Required,
        )),
        None => {}
    }

    match draft.instructions.as_deref() {
        Some([]) => result.push_error(FieldError::new(
            "instructions",
            "recipe must have at least one instruction",
            ErrorCode::Required,
        )),
        Some(steps) => {
            let mut seen = HashSet::new();
            for (index, step) in steps.iter().enumerate() {
                let prefix = format!("instructions[{}].", index);
                if let Some(number) = check_step(step, &prefix, result)
                    && !seen.insert(number)
                {
                    result.push_warning(FieldError::new(
                        format!("{}stepNumber", prefix),
                        format!("step number {} is used by more than one step", number),
                        ErrorCode::Duplicate,
                    ));
                }
            }
        }
        None if required => result.push_error(FieldError::new(
            "instructions",
            "recipe must have at least one instruction",
            ErrorCode::Required,
        )),
        None => {}
    }

    if let Some(notes) = &draft.notes {
        result.check(
            "notes",
            validate_max_length("notes", notes, MAX_RECIPE_NOTES_LENGTH),
        );
    }
}

fn check_item(item: &RecipeItemDraft, prefix: &str, result: &mut RecipeValidationResult) {
    let kind = result.check(
        format!("{}type", prefix),
        parse_choice::<ItemKind>("type", item.item_type.as_deref()),
    );
    result.check(
        format!("{}quantity", prefix),
        require_number("quantity", item.quantity)
            .and_then(|quantity| validate_positive("quantity", quantity, MAX_QUANTITY)),
    );
    result.check(
        format!("{}unit", prefix),
        parse_choice::<Unit>("unit", item.unit.as_deref()),
    );

    let ingredient_id = present(item.ingredient_id.as_deref());
    let sub_recipe_id = present(item.sub_recipe_id.as_deref());
    match kind {
        Some(ItemKind::Ingredient) => {
            if ingredient_id.is_none() {
                result.reject(
                    format!("{}ingredientId", prefix),
                    &ValidationError::Required("ingredientId"),
                );
            }
            if sub_recipe_id.is_some() {
                result.reject(
                    format!("{}subRecipeId", prefix),
                    &ValidationError::NotAllowed {
                        field: "subRecipeId",
                        reason: "ingredient items cannot reference a sub-recipe".to_string(),
                    },
                );
            }
        }
        Some(ItemKind::Recipe) => {
            if sub_recipe_id.is_none() {
                result.reject(
                    format!("{}subRecipeId", prefix),
                    &ValidationError::Required("subRecipeId"),
                );
            }
            if ingredient_id.is_some() {
                result.reject(
                    format!("{}ingredientId", prefix),
                    &ValidationError::NotAllowed {
                        field: "ingredientId",
                        reason: "sub-recipe items cannot reference an ingredient".to_string(),
                    },
                );
            }
        }
        None => {}
    }

    if let Some(notes) = &item.notes {
        result.check(
            format!("{}notes", prefix),
            validate_max_length("notes", notes, MAX_SHORT_NOTES_LENGTH),
        );
    }
}

/// Returns the step number when it is valid
fn check_step(step: &RecipeStepDraft, prefix: &str, result: &mut RecipeValidationResult) -> Option<u32> {
    let number = result.check(
        format!("{}stepNumber", prefix),
        require_number("stepNumber", step.step_number)
            .and_then(|n| validate_count("stepNumber", n, 1, MAX_STEP_NUMBER)),
    );
    result.check(
        format!("{}instruction", prefix),
        require_text("instruction", step.instruction.as_deref()).and_then(|text| {
            validate_text_length("instruction", text, MIN_INSTRUCTION_LENGTH, MAX_INSTRUCTION_LENGTH)
        }),
    );
    result.check(
        format!("{}timeMinutes", prefix),
        require_number("timeMinutes", step.time_minutes)
            .and_then(|t| validate_non_negative("timeMinutes", t, Some(MAX_STEP_MINUTES))),
    );
    if let Some(notes) = &step.notes {
        result.check(
            format!("{}notes", prefix),
            validate_max_length("notes", notes, MAX_SHORT_NOTES_LENGTH),
        );
    }
    number
}

fn recipe_from_draft(draft: &RecipeDraft, id: String, created_by: String) -> ValidationResult<Recipe> {
    let name = require_text("name", draft.name.as_deref())?;
    let category = parse_choice::<RecipeCategory>("category", draft.category.as_deref())?;
    let generated_amount = require_number("generatedAmount", draft.generated_amount)?;
    let generated_unit = parse_choice::<Unit>("generatedUnit", draft.generated_unit.as_deref())?;
    let servings = require_number("servings", draft.servings)
        .and_then(|s| validate_count("servings", s, 1, MAX_SERVINGS))?;
    let difficulty = parse_choice::<RecipeDifficulty>("difficulty", draft.difficulty.as_deref())?;

    let mut recipe = Recipe::new(id, name, category, generated_amount, generated_unit, servings)
        .with_difficulty(difficulty);
    recipe.description = draft.description.clone();
    recipe.notes = draft.notes.clone();
    recipe.created_by = created_by;
    recipe.recipe_items = draft
        .recipe_items
        .as_deref()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, item)| item_from_draft(item, index as u32))
        .collect::<ValidationResult<Vec<_>>>()?;
    recipe.instructions = draft
        .instructions
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(step_from_draft)
        .collect::<ValidationResult<Vec<_>>>()?;
    recipe.recalculate_derived();
    Ok(recipe)
}

fn item_from_draft(draft: &RecipeItemDraft, sort_order: u32) -> ValidationResult<RecipeItem> {
    let kind = parse_choice::<ItemKind>("type", draft.item_type.as_deref())?;
    let quantity = require_number("quantity", draft.quantity)?;
    let unit = parse_choice::<Unit>("unit", draft.unit.as_deref())?;
    let id = Uuid::new_v4().to_string();
    let mut item = match kind {
        ItemKind::Ingredient => RecipeItem::ingredient(
            id,
            require_text("ingredientId", draft.ingredient_id.as_deref())?,
            quantity,
            unit,
        ),
        ItemKind::Recipe => RecipeItem::sub_recipe(
            id,
            require_text("subRecipeId", draft.sub_recipe_id.as_deref())?,
            quantity,
            unit,
        ),
    };
    item.notes = draft.notes.clone();
    item.sort_order = sort_order;
    Ok(item)
}

fn step_from_draft(draft: &RecipeStepDraft) -> ValidationResult<RecipeStep> {
    let step_number = require_number("stepNumber", draft.step_number)
        .and_then(|n| validate_count("stepNumber", n, 1, MAX_STEP_NUMBER))?;
    let instruction = require_text("instruction", draft.instruction.as_deref())?;
    let time_minutes = require_number("timeMinutes", draft.time_minutes)?;
    let mut step = RecipeStep::new(Uuid::new_v4().to_string(), step_number, instruction, time_minutes);
    step.notes = draft.notes.clone();
    Ok(step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flour_item() -> RecipeItemDraft {
        RecipeItemDraft::ingredient("ing_flour", 200.0, "gram")
    }

    #[test]
    fn name_rules() {
        assert!(!validate_recipe_name("ab").is_valid);
        assert!(validate_recipe_name("abc").is_valid);
        assert!(validate_recipe_name(&"x".repeat(100)).is_valid);
        assert!(!validate_recipe_name(&"x".repeat(101)).is_valid);
        assert!(!validate_recipe_name("   ab   ").is_valid);
    }

    #[test]
    fn item_reference_must_match_type() {
        assert!(validate_recipe_item(&flour_item()).is_valid);

        let mut both = flour_item();
        both.sub_recipe_id = Some("rec_x".to_string());
        assert!(!validate_recipe_item(&both).is_valid);

        let mut missing = flour_item();
        missing.ingredient_id = None;
        let outcome = validate_recipe_item(&missing);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.error.as_deref(), Some("ingredientId is required"));

        let mut wrong_type = RecipeItemDraft::sub_recipe("rec_base", 1.0, "kilogram");
        wrong_type.item_type = Some("ingredient".to_string());
        assert!(!validate_recipe_item(&wrong_type).is_valid);
    }

    #[test]
    fn item_quantity_bounds() {
        let mut item = flour_item();
        item.quantity = Some(0.0);
        assert!(!validate_recipe_item(&item).is_valid);
        item.quantity = Some(1_000_000.0);
        assert!(!validate_recipe_item(&item).is_valid);
        item.quantity = Some(0.001);
        assert!(validate_recipe_item(&item).is_valid);
    }

    #[test]
    fn step_rules() {
        assert!(validate_recipe_step(&RecipeStepDraft::new(1, "Misture tudo muito bem", 5.0)).is_valid);
        assert!(!validate_recipe_step(&RecipeStepDraft::new(0, "Misture tudo muito bem", 5.0)).is_valid);
        assert!(!validate_recipe_step(&RecipeStepDraft::new(1, "Misture", 5.0)).is_valid);
        assert!(!validate_recipe_step(&RecipeStepDraft::new(1, "Misture tudo muito bem", -1.0)).is_valid);

        let mut fractional = RecipeStepDraft::new(1, "Misture tudo muito bem", 5.0);
        fractional.step_number = Some(1.5);
        assert!(!validate_recipe_step(&fractional).is_valid);
    }

    #[test]
    fn update_requires_only_id() {
        let update = RecipeUpdateDraft {
            id: Some("rec_1".to_string()),
            fields: RecipeDraft::default(),
        };
        assert!(validate_recipe_update(&update).is_valid);

        let missing = RecipeUpdateDraft::default();
        let result = validate_recipe_update(&missing);
        assert!(result.has_error_for("id"));
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn update_checks_present_fields() {
        let update = RecipeUpdateDraft {
            id: Some("rec_1".to_string()),
            fields: RecipeDraft {
                servings: Some(0.0),
                recipe_items: Some(Vec::new()),
                ..Default::default()
            },
        };
        let result = validate_recipe_update(&update);
        assert!(result.has_error_for("servings"));
        assert!(result.has_error_for("recipeItems"));
    }
}
