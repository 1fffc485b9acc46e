//! Recipe Costing SDK - Costing and validation core for bakery recipes
//!
//! Provides unified interfaces for:
//! - Unit conversion between mass, volume and count units
//! - Recipe, ingredient and settings models
//! - Validation of recipe drafts and API requests
//! - Cost calculation with nested sub-recipes
//! - Recipe scaling and duplication
//! - Listing, statistics and display formatting
//! - Configuration files
//!
//! # Example
//!
//! ```rust
//! use recipe_costing_sdk::{Catalog, Ingredient, Recipe, RecipeCategory, RecipeItem, RecipeSettings, RecipeStep, Unit};
//! use recipe_costing_sdk::calculate_cost;
//!
//! let catalog = Catalog::new()
//!     .with_ingredient(Ingredient::new("ing_flour", "Farinha", Unit::Gram, 1000.0, 8.0));
//! let recipe = Recipe::new("rec_cake", "Bolo de Chocolate", RecipeCategory::Cakes, 1.0, Unit::Kilogram, 10)
//!     .with_item(RecipeItem::ingredient("i1", "ing_flour", 200.0, Unit::Gram))
//!     .with_step(RecipeStep::new("s1", 1, "Misture a farinha com o cacau", 5.0));
//!
//! let breakdown = calculate_cost(&recipe, &catalog, &RecipeSettings::new(60.0, 0.30));
//! assert!((breakdown.total_cost - 6.60).abs() < 1e-9);
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod costing;
pub mod models;
pub mod query;
pub mod scaling;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, ConfigResult, CostingConfig};
pub use convert::{ConversionError, convert_units, is_convertible};
pub use costing::{
    Catalog, CatalogProvider, CostBreakdown, CostCalculator, CostError, RecipeItemCost,
    calculate_cost,
};
pub use scaling::{ScalingError, ScalingOptions, ScalingResult, duplicate_recipe, scale_recipe};
pub use validation::{
    CircularDependencyCheck, FieldError, RecipeValidationResult, check_circular_dependency,
    validate_recipe,
};

// Re-export models
pub use models::enums::*;
pub use models::{
    Ingredient, ItemReference, Recipe, RecipeCosts, RecipeDraft, RecipeItem, RecipeItemDraft,
    RecipeSettings, RecipeStep, RecipeStepDraft,
};
