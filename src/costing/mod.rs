//! Cost calculation
//!
//! Prices recipes from a catalog of ingredients and sub-recipes:
//! - [`catalog`]: the catalog trait and its in-memory implementation
//! - [`calculator`]: the recursive cost engine
//! - [`breakdown`]: the breakdown record and cost errors

pub mod breakdown;
pub mod calculator;
pub mod catalog;

pub use breakdown::{CostBreakdown, CostError, RecipeItemCost};
pub use calculator::{CostCalculator, DEFAULT_MAX_DEPTH, apply_costs, calculate_cost};
pub use catalog::{Catalog, CatalogProvider};
