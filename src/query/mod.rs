//! Recipe listing, statistics and display formatting
//!
//! Everything here works on in-memory recipe slices and never mutates them.

pub mod filter;
pub mod format;
pub mod stats;

pub use filter::{Page, RecipeQuery, SortKey, SortOrder, filter_recipes, paginate, sort_recipes};
pub use format::{format_price, format_time};
pub use stats::{
    CategoryCount, DifficultyCount, IngredientUsage, MOST_USED_INGREDIENTS_LIMIT,
    RecipeCostSummary, RecipeStats, recipe_stats,
};
