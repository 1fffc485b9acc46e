//! Validation functionality
//!
//! Provides validation logic for:
//! - Recipe drafts and partial updates (field rules, item/step structure)
//! - API requests (filters, scaling, duplication, pricing, workflow, batch updates)
//! - Sub-recipe dependencies (circular references)
//! - Pricing settings

pub mod dependencies;
pub mod input;
pub mod recipes;
pub mod requests;
pub mod result;
pub mod settings;

pub use dependencies::{
    CircularDependencyCheck, check_circular_dependency, check_sub_recipe_addition, ensure_acyclic,
    validate_sub_recipe_references,
};
pub use input::{ValidationError, ValidationResult};
pub use recipes::{
    build_recipe, merge_update, validate_recipe, validate_recipe_item, validate_recipe_name,
    validate_recipe_step, validate_recipe_update,
};
pub use requests::{
    BatchUpdate, validate_batch_recipe_update, validate_cost_breakdown_request,
    validate_duplicate_recipe_request, validate_price_update_request, validate_recipe_filters,
    validate_recipe_scaling, validate_recipe_status_change,
};
pub use result::{FieldError, FieldValidation, RecipeValidationResult};
pub use settings::{apply_price_update, validate_recipe_settings};
