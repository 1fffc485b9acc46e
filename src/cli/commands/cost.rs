//! Cost command implementation

use crate::cli::error::CliError;
use crate::cli::input::{print_json, read_document};
use crate::config::CostingConfig;
use crate::costing::{Catalog, CatalogProvider, CostBreakdown, CostCalculator};
use crate::models::Recipe;
use crate::validation::ensure_acyclic;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Arguments for the cost command
#[derive(Debug, Clone)]
pub struct CostArgs {
    /// Recipe file, or the id of a recipe in the catalog
    pub recipe: String,
    pub catalog: PathBuf,
    /// Directory holding `.recipe-costing.toml`, defaults to the current directory
    pub config_dir: Option<PathBuf>,
}

/// Load the catalog file named on the command line
pub fn load_catalog(path: &Path) -> Result<Catalog, CliError> {
    let input = path.to_string_lossy();
    read_document(&input)
}

/// Resolve a recipe argument. Existing files and `-` are read as documents; anything
/// else is looked up by id in the catalog.
pub fn resolve_recipe(recipe: &str, catalog: &Catalog) -> Result<Recipe, CliError> {
    if recipe == "-" || Path::new(recipe).exists() {
        return read_document(recipe);
    }
    catalog
        .recipe(recipe)
        .cloned()
        .ok_or_else(|| CliError::RecipeNotFound(recipe.to_string()))
}

/// Load configuration from `dir`, or the current directory
pub fn load_config(dir: Option<&Path>) -> Result<CostingConfig, CliError> {
    let dir = dir.unwrap_or_else(|| Path::new("."));
    Ok(CostingConfig::load(dir)?)
}

/// Cycle-check and cost a recipe against a catalog
pub fn cost_recipe(
    recipe: &Recipe,
    catalog: &Catalog,
    config: &CostingConfig,
) -> Result<CostBreakdown, CliError> {
    let cycles = ensure_acyclic(recipe, |id| catalog.recipe(id));
    if let Some(message) = cycles.first_error() {
        return Err(CliError::CircularDependency(message.to_string()));
    }

    let settings = config.to_settings()?;
    let breakdown = CostCalculator::new(catalog, &settings)
        .with_max_depth(config.costing.max_depth)
        .calculate(recipe);

    if !breakdown.is_reliable() {
        warn!(
            recipe_id = %recipe.id,
            errors = breakdown.errors.len(),
            "cost breakdown is incomplete"
        );
    }
    Ok(breakdown)
}

/// Handle the cost command
pub fn handle_cost(args: &CostArgs) -> Result<(), CliError> {
    let catalog = load_catalog(&args.catalog)?;
    let recipe = resolve_recipe(&args.recipe, &catalog)?;
    let config = load_config(args.config_dir.as_deref())?;

    let breakdown = cost_recipe(&recipe, &catalog, &config)?;
    print_json(&breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, RecipeCategory, RecipeItem, Unit};

    fn catalog() -> Catalog {
        let loop_a = Recipe::new("A", "Massa A", RecipeCategory::Other, 1.0, Unit::Kilogram, 1)
            .with_item(RecipeItem::sub_recipe("a1", "B", 100.0, Unit::Gram));
        let loop_b = Recipe::new("B", "Massa B", RecipeCategory::Other, 1.0, Unit::Kilogram, 1)
            .with_item(RecipeItem::sub_recipe("b1", "A", 100.0, Unit::Gram));
        let bread = Recipe::new("bread", "Pão", RecipeCategory::Breads, 1.0, Unit::Kilogram, 10)
            .with_item(RecipeItem::ingredient("i1", "flour", 500.0, Unit::Gram));
        Catalog::new()
            .with_ingredient(Ingredient::new("flour", "Farinha", Unit::Kilogram, 1.0, 6.0))
            .with_recipe(loop_a)
            .with_recipe(loop_b)
            .with_recipe(bread)
    }

    #[test]
    fn resolves_recipe_by_id() {
        let catalog = catalog();
        assert_eq!(resolve_recipe("bread", &catalog).unwrap().name, "Pão");
        assert!(matches!(
            resolve_recipe("missing", &catalog),
            Err(CliError::RecipeNotFound(_))
        ));
    }

    #[test]
    fn costs_catalog_recipe() {
        let catalog = catalog();
        let recipe = resolve_recipe("bread", &catalog).unwrap();
        let breakdown = cost_recipe(&recipe, &catalog, &CostingConfig::default()).unwrap();
        assert!(breakdown.is_reliable());
        assert!((breakdown.ingredient_cost - 3.0).abs() < 1e-9);
    }

    #[test]
    fn refuses_cyclic_recipe() {
        let catalog = catalog();
        let recipe = resolve_recipe("A", &catalog).unwrap();
        let err = cost_recipe(&recipe, &catalog, &CostingConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::CircularDependency(_)));
        assert!(err.to_string().contains("A -> B -> A"));
    }
}
