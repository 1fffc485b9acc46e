//! Scale command implementation

use crate::cli::commands::cost::load_config;
use crate::cli::error::CliError;
use crate::cli::input::{print_json, read_document};
use crate::models::Recipe;
use crate::scaling::{PreparationTimePolicy, ScalingOptions, scale_recipe};
use std::path::PathBuf;

/// Arguments for the scale command
#[derive(Debug, Clone)]
pub struct ScaleArgs {
    pub recipe: String,
    pub servings: u32,
    /// Scale step durations with the recipe instead of keeping them
    pub proportional_time: bool,
    pub config_dir: Option<PathBuf>,
}

/// Handle the scale command
pub fn handle_scale(args: &ScaleArgs) -> Result<(), CliError> {
    let recipe: Recipe = read_document(&args.recipe)?;

    let policy = if args.proportional_time {
        PreparationTimePolicy::Proportional
    } else {
        load_config(args.config_dir.as_deref())?
            .scaling
            .preparation_time
    };

    let options = ScalingOptions::new(args.servings).with_preparation_time(policy);
    let result = scale_recipe(&recipe, &options)?;
    print_json(&result)
}
