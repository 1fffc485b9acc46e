//! Validators for the API request records
//!
//! Listing filters, scaling, duplication, cost and price requests, workflow status
//! changes and batch updates. Typed conversions of the validated requests live next to
//! the code that consumes them.

use super::input::{
    MAX_RECIPE_NAME_LENGTH, MAX_SERVINGS, MAX_SHORT_NOTES_LENGTH, MAX_WORKFLOW_TEXT_LENGTH,
    MIN_RECIPE_NAME_LENGTH, ValidationError, parse_choice, require_number, require_text,
    validate_count, validate_max_length, validate_non_negative, validate_text_length,
};
use super::result::{FieldError, RecipeValidationResult};
use crate::models::{
    BatchRecipeUpdateRequest, BatchUpdateType, CostBreakdownRequest, DuplicateRecipeRequest,
    ErrorCode, PriceUpdateRequest, Recipe, RecipeCategory, RecipeDifficulty,
    RecipeFilters, RecipeScalingRequest, RecipeStatus, RecipeStatusChangeRequest,
};
use crate::models::requests::MAX_PAGE_SIZE;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Validate recipe list filters. Absent page and limit take their defaults.
pub fn validate_recipe_filters(filters: &RecipeFilters) -> RecipeValidationResult {
    let mut result = RecipeValidationResult::new();
    if let Some(page) = filters.page {
        result.check("page", validate_count("page", page, 1, u32::MAX));
    }
    if let Some(limit) = filters.limit {
        result.check("limit", validate_count("limit", limit, 1, MAX_PAGE_SIZE));
    }
    if filters.category.is_some() {
        result.check(
            "category",
            parse_choice::<RecipeCategory>("category", filters.category.as_deref()),
        );
    }
    if filters.difficulty.is_some() {
        result.check(
            "difficulty",
            parse_choice::<RecipeDifficulty>("difficulty", filters.difficulty.as_deref()),
        );
    }
    if let Some(max_cost) = filters.max_cost_per_serving {
        result.check(
            "maxCostPerServing",
            validate_non_negative("maxCostPerServing", max_cost, None),
        );
    }
    if let Some(max_time) = filters.max_preparation_time {
        result.check(
            "maxPreparationTime",
            validate_non_negative("maxPreparationTime", max_time, None),
        );
    }
    result
}

/// Validate a scaling request: a whole target serving count and well-formed
/// per-ingredient overrides.
pub fn validate_recipe_scaling(request: &RecipeScalingRequest) -> RecipeValidationResult {
    let mut result = RecipeValidationResult::new();
    result.check(
        "targetServings",
        require_number("targetServings", request.target_servings)
            .and_then(|t| validate_count("targetServings", t, 1, MAX_SERVINGS)),
    );
    for (index, adjustment) in request.adjustments.iter().flatten().enumerate() {
        let prefix = format!("adjustments[{}].", index);
        result.check(
            format!("{}ingredientId", prefix),
            require_text("ingredientId", adjustment.ingredient_id.as_deref()),
        );
        result.check(
            format!("{}customQuantity", prefix),
            require_number("customQuantity", adjustment.custom_quantity)
                .and_then(|q| validate_non_negative("customQuantity", q, None)),
        );
        if let Some(reason) = &adjustment.reason {
            result.check(
                format!("{}reason", prefix),
                validate_max_length("reason", reason, MAX_SHORT_NOTES_LENGTH),
            );
        }
    }
    result
}

/// Validate a duplicate request: a valid new name, optional serving count and
/// optional category override.
pub fn validate_duplicate_recipe_request(request: &DuplicateRecipeRequest) -> RecipeValidationResult {
    let mut result = RecipeValidationResult::new();
    result.check(
        "newName",
        require_text("newName", request.new_name.as_deref()).and_then(|name| {
            validate_text_length("newName", name, MIN_RECIPE_NAME_LENGTH, MAX_RECIPE_NAME_LENGTH)
        }),
    );
    if let Some(servings) = request.adjust_servings {
        result.check(
            "adjustServings",
            validate_count("adjustServings", servings, 1, MAX_SERVINGS),
        );
    }
    if request.category_override.is_some() {
        result.check(
            "categoryOverride",
            parse_choice::<RecipeCategory>("categoryOverride", request.category_override.as_deref()),
        );
    }
    result
}

/// Validate a cost breakdown request.
pub fn validate_cost_breakdown_request(request: &CostBreakdownRequest) -> RecipeValidationResult {
    let mut result = RecipeValidationResult::new();
    result.check("recipeId", require_text("recipeId", request.recipe_id.as_deref()));
    if let Some(rate) = request.labor_hour_rate {
        result.check("laborHourRate", validate_non_negative("laborHourRate", rate, None));
    }
    if let Some(margin) = request.margin {
        result.check("margin", validate_non_negative("margin", margin, None));
    }
    result
}

/// Validate a price update request. Per-category margin keys must name known
/// categories.
pub fn validate_price_update_request(request: &PriceUpdateRequest) -> RecipeValidationResult {
    let mut result = RecipeValidationResult::new();
    result.check("recipeId", require_text("recipeId", request.recipe_id.as_deref()));
    if let Some(rate) = request.labor_hour_rate {
        result.check("laborHourRate", validate_non_negative("laborHourRate", rate, None));
    }
    if let Some(margin) = request.default_margin {
        result.check("defaultMargin", validate_non_negative("defaultMargin", margin, None));
    }
    for (key, margin) in request.margins_by_category.iter().flatten() {
        let field = format!("marginsByCategory.{}", key);
        if let Err(reason) = key.parse::<RecipeCategory>() {
            result.reject(
                field.clone(),
                &ValidationError::InvalidChoice("marginsByCategory", reason),
            );
        }
        result.check(field, validate_non_negative("margin", *margin, None));
    }
    result
}

/// Validate a workflow status change.
///
/// Test results are checked only when moving to `testing`; on any other status they
/// are ignored with a warning.
pub fn validate_recipe_status_change(request: &RecipeStatusChangeRequest) -> RecipeValidationResult {
    let mut result = RecipeValidationResult::new();
    result.check("recipeId", require_text("recipeId", request.recipe_id.as_deref()));
    let status = result.check(
        "status",
        parse_choice::<RecipeStatus>("status", request.status.as_deref()),
    );
    if let Some(notes) = &request.notes {
        result.check("notes", validate_max_length("notes", notes, MAX_WORKFLOW_TEXT_LENGTH));
    }

    let Some(test_results) = &request.test_results else {
        return result;
    };
    match status {
        Some(RecipeStatus::Testing) => {
            result.check(
                "testResults.difficultyRating",
                parse_choice::<RecipeDifficulty>(
                    "difficultyRating",
                    test_results.difficulty_rating.as_deref(),
                ),
            );
            match &test_results.cost_accuracy {
                Some(serde_json::Value::Bool(_)) => {}
                Some(other) => result.reject(
                    "testResults.costAccuracy",
                    &ValidationError::InvalidChoice(
                        "costAccuracy",
                        format!("expected true or false, got {}", other),
                    ),
                ),
                None => result.reject(
                    "testResults.costAccuracy",
                    &ValidationError::Required("costAccuracy"),
                ),
            }
            match &test_results.tasting_notes {
                Some(notes) => {
                    result.check(
                        "testResults.tastingNotes",
                        validate_max_length("tastingNotes", notes, MAX_WORKFLOW_TEXT_LENGTH),
                    );
                }
                None => result.reject(
                    "testResults.tastingNotes",
                    &ValidationError::Required("tastingNotes"),
                ),
            }
            if let Some(changes) = &test_results.recommended_changes {
                result.check(
                    "testResults.recommendedChanges",
                    validate_max_length("recommendedChanges", changes, MAX_WORKFLOW_TEXT_LENGTH),
                );
            }
        }
        Some(other) => result.push_warning(FieldError::new(
            "testResults",
            format!("test results are only recorded for testing, not {}", other),
            ErrorCode::Invalid,
        )),
        None => {}
    }
    result
}

/// Validate a batch update: at least one recipe id, a known update type, and the
/// field that type needs. `archive` needs no extra field.
pub fn validate_batch_recipe_update(request: &BatchRecipeUpdateRequest) -> RecipeValidationResult {
    let mut result = RecipeValidationResult::new();
    match request.recipe_ids.as_deref() {
        None | Some([]) => result.push_error(FieldError::new(
            "recipeIds",
            "select at least one recipe",
            ErrorCode::Required,
        )),
        Some(ids) => {
            let mut seen = HashSet::new();
            for (index, id) in ids.iter().enumerate() {
                let field = format!("recipeIds[{}]", index);
                if let Some(id) = result.check(field.clone(), require_text("recipeId", Some(id)))
                    && !seen.insert(id)
                {
                    result.push_warning(FieldError::new(
                        field,
                        format!("recipe {} is listed more than once", id),
                        ErrorCode::Duplicate,
                    ));
                }
            }
        }
    }

    let update_type = result.check(
        "updateType",
        parse_choice::<BatchUpdateType>("updateType", request.update_type.as_deref()),
    );
    match update_type {
        Some(BatchUpdateType::Category) => {
            result.check(
                "category",
                parse_choice::<RecipeCategory>("category", request.category.as_deref()),
            );
        }
        Some(BatchUpdateType::Difficulty) => {
            result.check(
                "difficulty",
                parse_choice::<RecipeDifficulty>("difficulty", request.difficulty.as_deref()),
            );
        }
        Some(BatchUpdateType::Status) => {
            result.check(
                "status",
                parse_choice::<RecipeStatus>("status", request.status.as_deref()),
            );
        }
        Some(BatchUpdateType::Archive) | None => {}
    }
    if let Some(notes) = &request.notes {
        result.check("notes", validate_max_length("notes", notes, MAX_SHORT_NOTES_LENGTH));
    }
    result
}

/// A validated batch change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "updateType", content = "value", rename_all = "lowercase")]
pub enum BatchUpdate {
    Category(RecipeCategory),
    Difficulty(RecipeDifficulty),
    Status(RecipeStatus),
    Archive,
}

impl BatchUpdate {
    /// Validate a batch request and return the targeted ids with the typed change
    pub fn from_request(
        request: &BatchRecipeUpdateRequest,
    ) -> Result<(Vec<String>, BatchUpdate), RecipeValidationResult> {
        let result = validate_batch_recipe_update(request);
        if !result.is_valid {
            return Err(result);
        }
        let to_result =
            |e: ValidationError| RecipeValidationResult::from_error(FieldError::from_validation("updateType", &e));
        let update = match parse_choice::<BatchUpdateType>("updateType", request.update_type.as_deref())
            .map_err(to_result)?
        {
            BatchUpdateType::Category => BatchUpdate::Category(
                parse_choice("category", request.category.as_deref()).map_err(to_result)?,
            ),
            BatchUpdateType::Difficulty => BatchUpdate::Difficulty(
                parse_choice("difficulty", request.difficulty.as_deref()).map_err(to_result)?,
            ),
            BatchUpdateType::Status => BatchUpdate::Status(
                parse_choice("status", request.status.as_deref()).map_err(to_result)?,
            ),
            BatchUpdateType::Archive => BatchUpdate::Archive,
        };

        let mut ids: Vec<String> = Vec::new();
        for id in request.recipe_ids.iter().flatten() {
            let id = id.trim().to_string();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok((ids, update))
    }

    /// Apply the change to a recipe, returning the updated copy.
    ///
    /// Recipes carry no workflow status of their own: `archived` deactivates the recipe
    /// and any other status reactivates it.
    pub fn apply(&self, recipe: &Recipe) -> Recipe {
        let mut updated = recipe.clone();
        match self {
            BatchUpdate::Category(category) => updated.category = *category,
            BatchUpdate::Difficulty(difficulty) => updated.difficulty = *difficulty,
            BatchUpdate::Status(status) => updated.is_active = *status != RecipeStatus::Archived,
            BatchUpdate::Archive => updated.is_active = false,
        }
        updated.updated_at = Utc::now();
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScalingAdjustmentDraft, TestResultsDraft};

    #[test]
    fn filters_default_and_bounds() {
        assert!(validate_recipe_filters(&RecipeFilters::default()).is_valid);

        let filters = RecipeFilters {
            page: Some(0.0),
            limit: Some(101.0),
            category: Some("pies".to_string()),
            max_cost_per_serving: Some(-1.0),
            ..Default::default()
        };
        let result = validate_recipe_filters(&filters);
        assert!(result.has_error_for("page"));
        assert!(result.has_error_for("limit"));
        assert!(result.has_error_for("category"));
        assert!(result.has_error_for("maxCostPerServing"));
    }

    #[test]
    fn scaling_requires_whole_positive_target() {
        let mut request = RecipeScalingRequest {
            target_servings: Some(20.0),
            adjustments: None,
        };
        assert!(validate_recipe_scaling(&request).is_valid);
        request.target_servings = Some(0.0);
        assert!(!validate_recipe_scaling(&request).is_valid);
        request.target_servings = Some(2.5);
        assert!(!validate_recipe_scaling(&request).is_valid);
        request.target_servings = None;
        assert!(result_code(&validate_recipe_scaling(&request), "targetServings") == Some(ErrorCode::Required));
    }

    #[test]
    fn scaling_adjustments_are_checked() {
        let request = RecipeScalingRequest {
            target_servings: Some(20.0),
            adjustments: Some(vec![ScalingAdjustmentDraft {
                ingredient_id: Some(" ".to_string()),
                custom_quantity: Some(-5.0),
                reason: Some("r".repeat(501)),
            }]),
        };
        let result = validate_recipe_scaling(&request);
        assert!(result.has_error_for("adjustments[0].ingredientId"));
        assert!(result.has_error_for("adjustments[0].customQuantity"));
        assert!(result.has_error_for("adjustments[0].reason"));
    }

    #[test]
    fn price_update_rejects_unknown_category_keys() {
        let request = PriceUpdateRequest {
            recipe_id: Some("rec_1".to_string()),
            margins_by_category: Some([("pies".to_string(), 0.4)].into_iter().collect()),
            ..Default::default()
        };
        let result = validate_price_update_request(&request);
        assert!(result.has_error_for("marginsByCategory.pies"));
    }

    #[test]
    fn status_change_checks_test_results_only_for_testing() {
        let results = TestResultsDraft {
            cost_accuracy: Some(serde_json::json!("yes")),
            difficulty_rating: Some("medium".to_string()),
            ..Default::default()
        };
        let testing = RecipeStatusChangeRequest {
            recipe_id: Some("rec_1".to_string()),
            status: Some("testing".to_string()),
            notes: None,
            test_results: Some(results.clone()),
        };
        let result = validate_recipe_status_change(&testing);
        assert!(result.has_error_for("testResults.costAccuracy"));

        let approved = RecipeStatusChangeRequest {
            status: Some("approved".to_string()),
            ..testing
        };
        let result = validate_recipe_status_change(&approved);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn batch_archive_needs_no_field_but_category_does() {
        let archive = BatchRecipeUpdateRequest {
            recipe_ids: Some(vec!["r1".to_string()]),
            update_type: Some("archive".to_string()),
            ..Default::default()
        };
        assert!(validate_batch_recipe_update(&archive).is_valid);

        let category = BatchRecipeUpdateRequest {
            update_type: Some("category".to_string()),
            ..archive.clone()
        };
        let result = validate_batch_recipe_update(&category);
        assert!(!result.is_valid);
        assert_eq!(result_code(&result, "category"), Some(ErrorCode::Required));

        let empty = BatchRecipeUpdateRequest {
            recipe_ids: Some(Vec::new()),
            ..archive
        };
        assert!(validate_batch_recipe_update(&empty).has_error_for("recipeIds"));
    }

    #[test]
    fn batch_update_deduplicates_ids() {
        let request = BatchRecipeUpdateRequest {
            recipe_ids: Some(vec!["r1".to_string(), "r2".to_string(), "r1".to_string()]),
            update_type: Some("difficulty".to_string()),
            difficulty: Some("hard".to_string()),
            ..Default::default()
        };
        let (ids, update) = BatchUpdate::from_request(&request).unwrap();
        assert_eq!(ids, vec!["r1".to_string(), "r2".to_string()]);
        assert_eq!(update, BatchUpdate::Difficulty(RecipeDifficulty::Hard));
    }

    fn result_code(result: &RecipeValidationResult, field: &str) -> Option<ErrorCode> {
        result.errors.iter().find(|e| e.field == field).map(|e| e.code)
    }
}
