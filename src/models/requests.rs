//! API request records validated at the boundary
//!
//! Like the drafts, these keep enums as raw strings and numbers as optional floats so
//! the validators can report structured errors for malformed input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default page number for recipe listings
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size for recipe listings
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size a listing may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Recipe list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cost_per_serving: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_preparation_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    /// Only recipes that use this ingredient directly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
}

impl RecipeFilters {
    /// Requested page, or the default when absent. Assumes validated filters.
    pub fn page_or_default(&self) -> u32 {
        self.page.map(|p| p as u32).unwrap_or(DEFAULT_PAGE)
    }

    /// Requested page size, or the default when absent. Assumes validated filters.
    pub fn limit_or_default(&self) -> u32 {
        self.limit.map(|l| l as u32).unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

/// One per-ingredient override in a scaling request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScalingAdjustmentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Request to scale a recipe to a number of servings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeScalingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_servings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustments: Option<Vec<ScalingAdjustmentDraft>>,
}

/// Request to duplicate a recipe under a new name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DuplicateRecipeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjust_servings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_override: Option<String>,
}

/// Request for a cost breakdown, optionally overriding labor rate and margin
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CostBreakdownRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labor_hour_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
}

/// Request to change the pricing settings used for a recipe
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labor_hour_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_margin: Option<f64>,
    /// Category name to margin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins_by_category: Option<BTreeMap<String, f64>>,
}

/// Results of a test bake, attached when a recipe moves to `testing`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TestResultsDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasting_notes: Option<String>,
    /// Kept as a raw JSON value so a non-boolean can be reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_accuracy: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_changes: Option<String>,
}

/// Request to move a recipe through the draft/testing/approved/archived workflow
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStatusChangeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_results: Option<TestResultsDraft>,
}

/// Request to apply the same change to several recipes
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchRecipeUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
