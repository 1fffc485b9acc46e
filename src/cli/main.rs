//! CLI binary entry point for recipe-costing-cli

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use recipe_costing_sdk::cli::commands::config::handle_init_config;
#[cfg(feature = "cli")]
use recipe_costing_sdk::cli::commands::cost::{CostArgs, handle_cost};
#[cfg(feature = "cli")]
use recipe_costing_sdk::cli::commands::cycles::{CheckCyclesArgs, handle_check_cycles};
#[cfg(feature = "cli")]
use recipe_costing_sdk::cli::commands::scale::{ScaleArgs, handle_scale};
#[cfg(feature = "cli")]
use recipe_costing_sdk::cli::commands::validate::handle_validate;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "recipe-costing-cli")]
#[command(about = "Validate, cost and scale bakery recipes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Validate a recipe draft and print the result as JSON
    Validate {
        /// Recipe draft file (JSON or YAML), or '-' for stdin
        input: String,
    },
    /// Print the cost breakdown of a recipe
    Cost {
        /// Recipe file, '-' for stdin, or the id of a recipe in the catalog
        recipe: String,
        /// Catalog file with ingredients and sub-recipes
        #[arg(short, long)]
        catalog: PathBuf,
        /// Directory containing .recipe-costing.toml
        #[arg(long)]
        config_dir: Option<PathBuf>,
    },
    /// Scale a recipe to a number of servings
    Scale {
        /// Recipe file (JSON or YAML), or '-' for stdin
        recipe: String,
        /// Target number of servings
        #[arg(short, long)]
        servings: u32,
        /// Scale step durations along with the quantities
        #[arg(long)]
        proportional_time: bool,
        /// Directory containing .recipe-costing.toml
        #[arg(long)]
        config_dir: Option<PathBuf>,
    },
    /// Check a recipe for circular sub-recipe references
    CheckCycles {
        /// Recipe file, '-' for stdin, or the id of a recipe in the catalog
        recipe: String,
        /// Catalog file with sub-recipes
        #[arg(short, long)]
        catalog: PathBuf,
    },
    /// Write a sample .recipe-costing.toml
    InitConfig {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { input } => handle_validate(&input),
        Commands::Cost {
            recipe,
            catalog,
            config_dir,
        } => {
            let args = CostArgs {
                recipe,
                catalog,
                config_dir,
            };
            handle_cost(&args)
        }
        Commands::Scale {
            recipe,
            servings,
            proportional_time,
            config_dir,
        } => {
            let args = ScaleArgs {
                recipe,
                servings,
                proportional_time,
                config_dir,
            };
            handle_scale(&args)
        }
        Commands::CheckCycles { recipe, catalog } => {
            let args = CheckCyclesArgs { recipe, catalog };
            handle_check_cycles(&args)
        }
        Commands::InitConfig { dir, force } => handle_init_config(&dir, force).map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
