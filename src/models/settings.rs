//! Recipe settings used by the cost calculation engine
//!
//! A single settings record is shared by the whole bakery. It is passed explicitly to
//! every cost calculation instead of being read from global state.

use super::enums::RecipeCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default labor rate in R$ per hour
pub const DEFAULT_LABOR_HOUR_RATE: f64 = 25.0;

/// Default margin as a fraction (0.5 = 50% markup over cost)
pub const DEFAULT_MARGIN: f64 = 0.5;

/// Id used for settings that were never persisted
pub const DEFAULT_SETTINGS_ID: &str = "default";

/// Labor rate and margins for cost calculations.
///
/// Margins are fractions: a margin of `0.30` means the suggested price is the cost per
/// serving plus 30%.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSettings {
    #[serde(default = "default_settings_id")]
    pub id: String,
    /// R$ per hour of preparation time
    pub labor_hour_rate: f64,
    pub default_margin: f64,
    /// Per-category overrides of `default_margin`
    #[serde(default)]
    pub margins_by_category: BTreeMap<RecipeCategory, f64>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_settings_id() -> String {
    DEFAULT_SETTINGS_ID.to_string()
}

impl Default for RecipeSettings {
    fn default() -> Self {
        let margins_by_category = BTreeMap::from([
            (RecipeCategory::Cakes, 0.5),
            (RecipeCategory::Cupcakes, 0.8),
            (RecipeCategory::Cookies, 1.0),
            (RecipeCategory::Breads, 0.2),
            (RecipeCategory::Pastries, 0.6),
            (RecipeCategory::Icings, 2.0),
            (RecipeCategory::Fillings, 1.5),
            (RecipeCategory::Other, 0.5),
        ]);
        Self {
            id: default_settings_id(),
            labor_hour_rate: DEFAULT_LABOR_HOUR_RATE,
            default_margin: DEFAULT_MARGIN,
            margins_by_category,
            updated_at: Utc::now(),
        }
    }
}

impl RecipeSettings {
    /// Settings with a labor rate, a default margin and no category overrides
    pub fn new(labor_hour_rate: f64, default_margin: f64) -> Self {
        Self {
            id: default_settings_id(),
            labor_hour_rate,
            default_margin,
            margins_by_category: BTreeMap::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn with_category_margin(mut self, category: RecipeCategory, margin: f64) -> Self {
        self.margins_by_category.insert(category, margin);
        self
    }

    /// Margin for a category: its override if present, otherwise the default margin
    pub fn margin_for(&self, category: RecipeCategory) -> f64 {
        self.margins_by_category
            .get(&category)
            .copied()
            .unwrap_or(self.default_margin)
    }
}
