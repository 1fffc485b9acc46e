//! Recipe scaling and duplication
//!
//! Scaling produces a new recipe for a different number of servings. Item quantities
//! and the generated amount scale linearly, except for ingredients named by an explicit
//! adjustment, which take the adjusted quantity verbatim. The input recipe is never
//! modified.

use crate::costing::{CatalogProvider, CostBreakdown, calculate_cost};
use crate::models::{
    DuplicateRecipeRequest, ErrorCode, ItemKind, ItemReference, Recipe, RecipeCategory, RecipeCosts, RecipeScalingRequest,
    RecipeSettings,
};
use crate::validation::input::{ValidationError, parse_choice};
use crate::validation::{
    FieldError, RecipeValidationResult, validate_duplicate_recipe_request, validate_recipe_scaling,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// How step durations react to scaling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreparationTimePolicy {
    /// Step durations are kept as they are
    #[default]
    Fixed,
    /// Step durations are multiplied by the scaling factor
    Proportional,
}

impl PreparationTimePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreparationTimePolicy::Fixed => "fixed",
            PreparationTimePolicy::Proportional => "proportional",
        }
    }
}

impl FromStr for PreparationTimePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(PreparationTimePolicy::Fixed),
            "proportional" => Ok(PreparationTimePolicy::Proportional),
            _ => Err(format!(
                "Unknown preparation time policy: {}. Use 'fixed' or 'proportional'.",
                s
            )),
        }
    }
}

impl fmt::Display for PreparationTimePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replace the scaled quantity of an ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityAdjustment {
    pub ingredient_id: String,
    pub custom_quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
}

/// Options for [`scale_recipe`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingOptions {
    pub target_servings: u32,
    #[serde(default)]
    pub adjustments: Vec<QuantityAdjustment>,
    #[serde(default)]
    pub preparation_time: PreparationTimePolicy,
}

impl ScalingOptions {
    pub fn new(target_servings: u32) -> Self {
        Self {
            target_servings,
            adjustments: Vec::new(),
            preparation_time: PreparationTimePolicy::default(),
        }
    }

    pub fn with_adjustment(
        mut self,
        ingredient_id: impl Into<String>,
        custom_quantity: f64,
        reason: Option<&str>,
    ) -> Self {
        self.adjustments.push(QuantityAdjustment {
            ingredient_id: ingredient_id.into(),
            custom_quantity,
            reason: reason.map(str::to_string),
        });
        self
    }

    pub fn with_preparation_time(mut self, policy: PreparationTimePolicy) -> Self {
        self.preparation_time = policy;
        self
    }

    /// Validate a scaling request and convert it into options
    pub fn from_request(
        request: &RecipeScalingRequest,
        policy: PreparationTimePolicy,
    ) -> Result<Self, RecipeValidationResult> {
        let result = validate_recipe_scaling(request);
        if !result.is_valid {
            return Err(result);
        }
        // Validation guarantees a whole number in range
        let target_servings = request.target_servings.map(|t| t as u32).unwrap_or_default();
        let adjustments = request
            .adjustments
            .iter()
            .flatten()
            .filter_map(|adjustment| {
                Some(QuantityAdjustment {
                    ingredient_id: adjustment.ingredient_id.as_deref()?.trim().to_string(),
                    custom_quantity: adjustment.custom_quantity?,
                    reason: adjustment.reason.clone(),
                })
            })
            .collect();
        Ok(Self {
            target_servings,
            adjustments,
            preparation_time: policy,
        })
    }
}

/// An item whose quantity came from an adjustment instead of the scaling factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeScalingAdjustment {
    pub item_id: String,
    pub item_type: ItemKind,
    pub original_quantity: f64,
    /// Quantity the item holds in the scaled recipe
    pub scaled_quantity: f64,
    /// Quantity the scaling factor alone would have produced
    pub linear_quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
}

/// Result of scaling a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct ScalingResult {
    pub scaled_recipe: Recipe,
    pub scaling_factor: f64,
    pub adjustments: Vec<RecipeScalingAdjustment>,
    /// Adjustments naming an ingredient the recipe does not use
    #[serde(default)]
    pub unmatched_adjustments: Vec<QuantityAdjustment>,
}

/// Errors that prevent scaling
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ScalingError {
    #[error("Recipe {0} has no servings to scale from")]
    NoServings(String),

    #[error("Target servings must be greater than zero")]
    NoTargetServings,
}

/// Scale a recipe to `options.target_servings`.
///
/// The scaled recipe keeps the original id. Its derived cost fields are reset and
/// must be recomputed.
///
/// # Example
///
/// ```rust
/// use recipe_costing_sdk::models::{Recipe, RecipeCategory, RecipeItem, Unit};
/// use recipe_costing_sdk::scaling::{ScalingOptions, scale_recipe};
///
/// let recipe = Recipe::new("rec_1", "Cookies", RecipeCategory::Cookies, 600.0, Unit::Gram, 10)
///     .with_item(RecipeItem::ingredient("i1", "ing_flour", 100.0, Unit::Gram))
///     .with_item(RecipeItem::ingredient("i2", "ing_eggs", 2.0, Unit::Unit));
///
/// let options = ScalingOptions::new(20).with_adjustment("ing_eggs", 3.0, Some("eggs do not split"));
/// let result = scale_recipe(&recipe, &options).unwrap();
///
/// assert_eq!(result.scaling_factor, 2.0);
/// assert_eq!(result.scaled_recipe.recipe_items[0].quantity, 200.0);
/// assert_eq!(result.scaled_recipe.recipe_items[1].quantity, 3.0);
/// assert_eq!(result.adjustments.len(), 1);
/// ```
pub fn scale_recipe(recipe: &Recipe, options: &ScalingOptions) -> Result<ScalingResult, ScalingError> {
    if recipe.servings == 0 {
        return Err(ScalingError::NoServings(recipe.id.clone()));
    }
    if options.target_servings == 0 {
        return Err(ScalingError::NoTargetServings);
    }

    let factor = options.target_servings as f64 / recipe.servings as f64;
    let mut scaled = recipe.clone();
    let mut adjustments = Vec::new();
    let mut matched = vec![false; options.adjustments.len()];

    for item in &mut scaled.recipe_items {
        let original_quantity = item.quantity;
        let linear_quantity = original_quantity * factor;
        item.cost = 0.0;

        let override_index = match &item.reference {
            ItemReference::Ingredient { ingredient_id, .. } => options
                .adjustments
                .iter()
                .position(|a| a.ingredient_id == *ingredient_id),
            ItemReference::Recipe { .. } => None,
        };
        match override_index {
            Some(index) => {
                let adjustment = &options.adjustments[index];
                matched[index] = true;
                item.quantity = adjustment.custom_quantity;
                adjustments.push(RecipeScalingAdjustment {
                    item_id: item.id.clone(),
                    item_type: item.kind(),
                    original_quantity,
                    scaled_quantity: adjustment.custom_quantity,
                    linear_quantity,
                    reason: adjustment.reason.clone(),
                });
            }
            None => item.quantity = linear_quantity,
        }
    }

    if options.preparation_time == PreparationTimePolicy::Proportional {
        for step in &mut scaled.instructions {
            step.time_minutes *= factor;
        }
    }

    scaled.generated_amount = recipe.generated_amount * factor;
    scaled.servings = options.target_servings;
    scaled.costs = RecipeCosts::default();
    scaled.updated_at = Utc::now();
    scaled.recalculate_derived();

    let unmatched_adjustments: Vec<QuantityAdjustment> = options
        .adjustments
        .iter()
        .zip(&matched)
        .filter(|(_, matched)| !**matched)
        .map(|(adjustment, _)| adjustment.clone())
        .collect();

    info!(
        recipe_id = %recipe.id,
        from_servings = recipe.servings,
        to_servings = options.target_servings,
        scaling_factor = factor,
        adjusted = adjustments.len(),
        unmatched = unmatched_adjustments.len(),
        "scaled recipe"
    );

    Ok(ScalingResult {
        scaled_recipe: scaled,
        scaling_factor: factor,
        adjustments,
        unmatched_adjustments,
    })
}

/// Cost breakdown of the recipe as it would be after scaling
pub fn project_cost<C>(
    recipe: &Recipe,
    options: &ScalingOptions,
    catalog: &C,
    settings: &RecipeSettings,
) -> Result<CostBreakdown, ScalingError>
where
    C: CatalogProvider + ?Sized,
{
    let result = scale_recipe(recipe, options)?;
    Ok(calculate_cost(&result.scaled_recipe, catalog, settings))
}

/// Copy a recipe under a new name and a fresh id.
///
/// Items and steps get fresh ids. When `adjust_servings` is present the copy is scaled
/// to it with fixed step durations. Derived costs are reset.
pub fn duplicate_recipe(
    recipe: &Recipe,
    request: &DuplicateRecipeRequest,
) -> Result<Recipe, RecipeValidationResult> {
    let result = validate_duplicate_recipe_request(request);
    if !result.is_valid {
        return Err(result);
    }

    let mut copy = match request.adjust_servings {
        Some(servings) => {
            let options = ScalingOptions::new(servings as u32);
            scale_recipe(recipe, &options)
                .map_err(|e| {
                    RecipeValidationResult::from_error(FieldError::new(
                        "adjustServings",
                        e.to_string(),
                        ErrorCode::Invalid,
                    ))
                })?
                .scaled_recipe
        }
        None => recipe.clone(),
    };

    if let Some(name) = request.new_name.as_deref() {
        copy.name = name.trim().to_string();
    }
    if request.category_override.is_some() {
        copy.category = parse_choice::<RecipeCategory>(
            "categoryOverride",
            request.category_override.as_deref(),
        )
        .map_err(|e: ValidationError| {
            RecipeValidationResult::from_error(FieldError::from_validation("categoryOverride", &e))
        })?;
    }

    let now = Utc::now();
    copy.id = Uuid::new_v4().to_string();
    for item in &mut copy.recipe_items {
        item.id = Uuid::new_v4().to_string();
        item.cost = 0.0;
    }
    for step in &mut copy.instructions {
        step.id = Uuid::new_v4().to_string();
    }
    copy.costs = RecipeCosts::default();
    copy.is_active = true;
    copy.created_at = now;
    copy.updated_at = now;

    info!(source_id = %recipe.id, copy_id = %copy.id, "duplicated recipe");
    Ok(copy)
}
