//! Check-cycles command implementation

use crate::cli::commands::cost::{load_catalog, resolve_recipe};
use crate::cli::error::CliError;
use crate::cli::input::print_json;
use crate::costing::CatalogProvider;
use crate::validation::check_circular_dependency;
use std::path::PathBuf;

/// Arguments for the check-cycles command
#[derive(Debug, Clone)]
pub struct CheckCyclesArgs {
    /// Recipe file, or the id of a recipe in the catalog
    pub recipe: String,
    pub catalog: PathBuf,
}

/// Handle the check-cycles command
///
/// Prints the check as JSON and fails when a cycle is found.
pub fn handle_check_cycles(args: &CheckCyclesArgs) -> Result<(), CliError> {
    let catalog = load_catalog(&args.catalog)?;
    let recipe = resolve_recipe(&args.recipe, &catalog)?;

    let check = check_circular_dependency(&recipe.id, &recipe.recipe_items, |id| {
        catalog.recipe(id)
    });
    print_json(&check)?;

    match check.message {
        Some(message) if check.has_circular_dependency => {
            Err(CliError::CircularDependency(message))
        }
        _ => Ok(()),
    }
}
