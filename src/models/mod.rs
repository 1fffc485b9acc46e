//! Models module for the SDK
//!
//! Defines the plain data records consumed and produced by the costing core: catalog
//! ingredients, recipes with their items and steps, pricing settings, and the untrusted
//! drafts/requests that arrive from the UI.

pub mod drafts;
pub mod enums;
pub mod ingredient;
pub mod recipe;
pub mod requests;
pub mod settings;

pub use drafts::{RecipeDraft, RecipeItemDraft, RecipeStepDraft, RecipeUpdateDraft};
pub use enums::*;
pub use ingredient::Ingredient;
pub use recipe::{ItemReference, Recipe, RecipeCosts, RecipeItem, RecipeStep};
pub use requests::{
    BatchRecipeUpdateRequest, CostBreakdownRequest, DuplicateRecipeRequest, PriceUpdateRequest,
    RecipeFilters, RecipeScalingRequest, RecipeStatusChangeRequest, ScalingAdjustmentDraft,
    TestResultsDraft,
};
pub use settings::{DEFAULT_LABOR_HOUR_RATE, DEFAULT_MARGIN, RecipeSettings};
