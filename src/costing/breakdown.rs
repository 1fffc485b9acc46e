//! Cost breakdown produced by the cost engine

use crate::models::{ErrorCode, ItemKind, Unit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems found while costing a recipe.
///
/// These do not abort the calculation: the affected item is costed at zero, the error is
/// recorded on the breakdown, and the breakdown is marked unreliable.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum CostError {
    #[error("Ingredient {ingredient_id} used by item {item_id} of recipe {recipe_id} was not found")]
    MissingIngredient {
        recipe_id: String,
        item_id: String,
        ingredient_id: String,
    },

    #[error("Sub-recipe {sub_recipe_id} used by item {item_id} of recipe {recipe_id} was not found")]
    MissingSubRecipe {
        recipe_id: String,
        item_id: String,
        sub_recipe_id: String,
    },

    #[error("Item {item_id} of recipe {recipe_id} is measured in {item_unit} but priced in {priced_unit}")]
    IncompatibleUnit {
        recipe_id: String,
        item_id: String,
        item_unit: Unit,
        priced_unit: Unit,
    },

    #[error("Ingredient {ingredient_id} has no usable package size or price")]
    InvalidPackage {
        recipe_id: String,
        item_id: String,
        ingredient_id: String,
    },

    #[error("Sub-recipe {sub_recipe_id} has no usable generated amount")]
    InvalidYield {
        recipe_id: String,
        item_id: String,
        sub_recipe_id: String,
    },

    #[error("Sub-recipe nesting in recipe {recipe_id} exceeds the maximum depth of {max_depth}")]
    DepthExceeded { recipe_id: String, max_depth: usize },

    #[error("Circular sub-recipe reference: {}", path.join(" -> "))]
    CircularReference { recipe_id: String, path: Vec<String> },
}

impl CostError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CostError::MissingIngredient { .. }
            | CostError::MissingSubRecipe { .. }
            | CostError::InvalidPackage { .. }
            | CostError::InvalidYield { .. } => ErrorCode::Invalid,
            CostError::IncompatibleUnit { .. } => ErrorCode::IncompatibleUnit,
            CostError::DepthExceeded { .. } => ErrorCode::MaxValue,
            CostError::CircularReference { .. } => ErrorCode::CircularDependency,
        }
    }

    /// Recipe whose item list contains the problem
    pub fn recipe_id(&self) -> &str {
        match self {
            CostError::MissingIngredient { recipe_id, .. }
            | CostError::MissingSubRecipe { recipe_id, .. }
            | CostError::IncompatibleUnit { recipe_id, .. }
            | CostError::InvalidPackage { recipe_id, .. }
            | CostError::InvalidYield { recipe_id, .. }
            | CostError::DepthExceeded { recipe_id, .. }
            | CostError::CircularReference { recipe_id, .. } => recipe_id,
        }
    }
}

/// Cost of one recipe item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeItemCost {
    pub item_id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Ingredient or sub-recipe id
    pub reference_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    /// Cost of one `unit` of this item
    pub unit_cost: f64,
    pub total_cost: f64,
    /// Share of the sub-recipe's generated amount used by this item
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub proportion_used: Option<f64>,
}

/// Full cost breakdown of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use = "cost breakdowns carry errors that should be checked with is_reliable()"]
pub struct CostBreakdown {
    pub recipe_id: String,
    pub item_costs: Vec<RecipeItemCost>,
    pub ingredient_cost: f64,
    pub sub_recipe_cost: f64,
    pub total_item_cost: f64,
    pub labor_cost: f64,
    pub total_cost: f64,
    pub cost_per_serving: f64,
    pub suggested_price: f64,
    /// Margin applied, as a fraction
    pub margin: f64,
    pub profit_amount: f64,
    pub profit_percentage: f64,
    pub servings: u32,
    pub calculated_at: DateTime<Utc>,
    #[serde(default)]
    pub errors: Vec<CostError>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl CostBreakdown {
    /// Whether every item was costed. An unreliable breakdown understates the cost.
    pub fn is_reliable(&self) -> bool {
        self.errors.is_empty()
    }

    /// Cost line for an item id
    pub fn item_cost(&self, item_id: &str) -> Option<&RecipeItemCost> {
        self.item_costs.iter().find(|c| c.item_id == item_id)
    }
}
