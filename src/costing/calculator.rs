//! Recipe cost calculation
//!
//! Walks a recipe's items, pricing ingredients from the catalog and costing nested
//! sub-recipes recursively, then adds labor and derives per-serving cost and the
//! suggested price.

use super::breakdown::{CostBreakdown, CostError, RecipeItemCost};
use super::catalog::CatalogProvider;
use crate::convert::{convert_units, rate_factor};
use crate::models::{ItemKind, Recipe, RecipeItem, RecipeSettings};
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Default limit on sub-recipe nesting
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Calculate the cost breakdown of a recipe with the default depth limit.
///
/// Never mutates its inputs. Missing references, incompatible units and broken
/// sub-recipe nesting are collected in [`CostBreakdown::errors`].
///
/// # Example
///
/// ```rust
/// use recipe_costing_sdk::costing::{Catalog, calculate_cost};
/// use recipe_costing_sdk::models::{Ingredient, Recipe, RecipeCategory, RecipeItem, RecipeSettings, RecipeStep, Unit};
///
/// let catalog = Catalog::new()
///     .with_ingredient(Ingredient::new("ing_flour", "Farinha", Unit::Kilogram, 1.0, 8.0));
/// let recipe = Recipe::new("rec_1", "Bolo", RecipeCategory::Cakes, 1.0, Unit::Kilogram, 10)
///     .with_item(RecipeItem::ingredient("i1", "ing_flour", 200.0, Unit::Gram))
///     .with_step(RecipeStep::new("s1", 1, "Misture todos os ingredientes", 5.0));
///
/// let breakdown = calculate_cost(&recipe, &catalog, &RecipeSettings::new(60.0, 0.3));
/// assert!(breakdown.is_reliable());
/// assert!((breakdown.total_cost - 6.60).abs() < 1e-9);
/// ```
pub fn calculate_cost<C>(recipe: &Recipe, catalog: &C, settings: &RecipeSettings) -> CostBreakdown
where
    C: CatalogProvider + ?Sized,
{
    CostCalculator::new(catalog, settings).calculate(recipe)
}

/// Cost calculator bound to a catalog and settings.
pub struct CostCalculator<'a, C: CatalogProvider + ?Sized> {
    catalog: &'a C,
    settings: &'a RecipeSettings,
    max_depth: usize,
}

impl<'a, C: CatalogProvider + ?Sized> CostCalculator<'a, C> {
    pub fn new(catalog: &'a C, settings: &'a RecipeSettings) -> Self {
        Self {
            catalog,
            settings,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how many levels of sub-recipes may be nested below the costed recipe
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn calculate(&self, recipe: &Recipe) -> CostBreakdown {
        let mut run = CostingRun {
            catalog: self.catalog,
            settings: self.settings,
            max_depth: self.max_depth,
            stack: vec![recipe.id.clone()],
            memo: HashMap::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        };
        let totals = run.cost_recipe(recipe);

        let total_item_cost = totals.ingredient_cost + totals.sub_recipe_cost;
        let total_cost = total_item_cost + totals.labor_cost;
        let cost_per_serving = if recipe.servings > 0 {
            total_cost / recipe.servings as f64
        } else {
            run.warnings
                .push(format!("Recipe {} has no servings; cost per serving is zero", recipe.id));
            0.0
        };
        let margin = self.settings.margin_for(recipe.category);
        let suggested_price = cost_per_serving * (1.0 + margin);

        info!(
            recipe_id = %recipe.id,
            total_cost,
            cost_per_serving,
            errors = run.errors.len(),
            "calculated recipe cost"
        );

        CostBreakdown {
            recipe_id: recipe.id.clone(),
            item_costs: totals.items,
            ingredient_cost: totals.ingredient_cost,
            sub_recipe_cost: totals.sub_recipe_cost,
            total_item_cost,
            labor_cost: totals.labor_cost,
            total_cost,
            cost_per_serving,
            suggested_price,
            margin,
            profit_amount: suggested_price - cost_per_serving,
            profit_percentage: margin * 100.0,
            servings: recipe.servings,
            calculated_at: Utc::now(),
            errors: run.errors,
            warnings: run.warnings,
        }
    }
}

/// Return a copy of `recipe` carrying the totals and per-item costs of `breakdown`.
///
/// Items without a matching cost line keep their previous cost.
pub fn apply_costs(recipe: &Recipe, breakdown: &CostBreakdown) -> Recipe {
    let mut costed = recipe.clone();
    costed.costs.total_cost = breakdown.total_cost;
    costed.costs.cost_per_serving = breakdown.cost_per_serving;
    costed.costs.labor_cost = breakdown.labor_cost;
    costed.costs.suggested_price = breakdown.suggested_price;
    for item in &mut costed.recipe_items {
        if let Some(line) = breakdown.item_cost(&item.id) {
            item.cost = line.total_cost;
        }
    }
    costed.updated_at = Utc::now();
    costed
}

struct RecipeTotals {
    items: Vec<RecipeItemCost>,
    ingredient_cost: f64,
    sub_recipe_cost: f64,
    labor_cost: f64,
}

impl RecipeTotals {
    fn total(&self) -> f64 {
        self.ingredient_cost + self.sub_recipe_cost + self.labor_cost
    }
}

/// State of one top-level calculation
struct CostingRun<'a, C: CatalogProvider + ?Sized> {
    catalog: &'a C,
    settings: &'a RecipeSettings,
    max_depth: usize,
    /// Recipes currently being costed, outermost first
    stack: Vec<String>,
    /// Total cost of sub-recipes already costed in this run
    memo: HashMap<String, f64>,
    errors: Vec<CostError>,
    warnings: Vec<String>,
}

impl<'a, C: CatalogProvider + ?Sized> CostingRun<'a, C> {
    fn cost_recipe(&mut self, recipe: &Recipe) -> RecipeTotals {
        let mut totals = RecipeTotals {
            items: Vec::with_capacity(recipe.recipe_items.len()),
            ingredient_cost: 0.0,
            sub_recipe_cost: 0.0,
            labor_cost: recipe.total_step_minutes() / 60.0 * self.settings.labor_hour_rate,
        };

        for item in &recipe.recipe_items {
            let line = match item.kind() {
                ItemKind::Ingredient => self.cost_ingredient_item(recipe, item),
                ItemKind::Recipe => self.cost_sub_recipe_item(recipe, item),
            };
            debug!(
                recipe_id = %recipe.id,
                item_id = %line.item_id,
                quantity = line.quantity,
                unit = line.unit.symbol(),
                total_cost = line.total_cost,
                "costed recipe item"
            );
            match line.kind {
                ItemKind::Ingredient => totals.ingredient_cost += line.total_cost,
                ItemKind::Recipe => totals.sub_recipe_cost += line.total_cost,
            }
            totals.items.push(line);
        }
        totals
    }

    fn cost_ingredient_item(&mut self, recipe: &Recipe, item: &RecipeItem) -> RecipeItemCost {
        let ingredient_id = item.reference_id();
        let mut line = empty_line(item);
        let catalog = self.catalog;
        let Some(ingredient) = catalog.ingredient(ingredient_id) else {
            warn!(recipe_id = %recipe.id, ingredient_id, "ingredient not found in catalog");
            self.errors.push(CostError::MissingIngredient {
                recipe_id: recipe.id.clone(),
                item_id: item.id.clone(),
                ingredient_id: ingredient_id.to_string(),
            });
            return line;
        };
        if item.display_name().is_none() {
            line.name = ingredient.name.clone();
        }
        if !ingredient.is_active {
            self.warnings.push(format!(
                "Ingredient {} ({}) used by recipe {} is inactive",
                ingredient.name, ingredient.id, recipe.id
            ));
        }

        let Some(price_per_unit) = ingredient.price_per_unit() else {
            self.errors.push(CostError::InvalidPackage {
                recipe_id: recipe.id.clone(),
                item_id: item.id.clone(),
                ingredient_id: ingredient_id.to_string(),
            });
            return line;
        };
        match rate_factor(ingredient.unit, item.unit) {
            Ok(factor) => {
                line.unit_cost = price_per_unit * factor;
                line.total_cost = line.unit_cost * item.quantity;
            }
            Err(e) => {
                warn!(recipe_id = %recipe.id, item_id = %item.id, error = %e, "incompatible units");
                self.errors.push(CostError::IncompatibleUnit {
                    recipe_id: recipe.id.clone(),
                    item_id: item.id.clone(),
                    item_unit: item.unit,
                    priced_unit: ingredient.unit,
                });
            }
        }
        line
    }

    fn cost_sub_recipe_item(&mut self, recipe: &Recipe, item: &RecipeItem) -> RecipeItemCost {
        let sub_recipe_id = item.reference_id();
        let mut line = empty_line(item);
        // Copy the reference out so the sub-recipe borrow does not hold `self`
        let catalog = self.catalog;
        let Some(sub_recipe) = catalog.recipe(sub_recipe_id) else {
            warn!(recipe_id = %recipe.id, sub_recipe_id, "sub-recipe not found in catalog");
            self.errors.push(CostError::MissingSubRecipe {
                recipe_id: recipe.id.clone(),
                item_id: item.id.clone(),
                sub_recipe_id: sub_recipe_id.to_string(),
            });
            return line;
        };
        if item.display_name().is_none() {
            line.name = sub_recipe.name.clone();
        }
        if !sub_recipe.is_active {
            self.warnings.push(format!(
                "Sub-recipe {} ({}) used by recipe {} is inactive",
                sub_recipe.name, sub_recipe.id, recipe.id
            ));
        }
        if !(sub_recipe.generated_amount > 0.0) {
            self.errors.push(CostError::InvalidYield {
                recipe_id: recipe.id.clone(),
                item_id: item.id.clone(),
                sub_recipe_id: sub_recipe_id.to_string(),
            });
            return line;
        }

        let converted = match convert_units(item.unit, sub_recipe.generated_unit, item.quantity) {
            Ok(converted) => converted,
            Err(e) => {
                warn!(recipe_id = %recipe.id, item_id = %item.id, error = %e, "incompatible units");
                self.errors.push(CostError::IncompatibleUnit {
                    recipe_id: recipe.id.clone(),
                    item_id: item.id.clone(),
                    item_unit: item.unit,
                    priced_unit: sub_recipe.generated_unit,
                });
                return line;
            }
        };
        let Some(sub_total) = self.sub_recipe_total(recipe, sub_recipe) else {
            return line;
        };

        let proportion = converted / sub_recipe.generated_amount;
        line.proportion_used = Some(proportion);
        line.total_cost = sub_total * proportion;
        line.unit_cost = if item.quantity > 0.0 {
            line.total_cost / item.quantity
        } else {
            0.0
        };
        line
    }

    /// Total cost of a sub-recipe, guarded against cycles and excessive nesting
    fn sub_recipe_total(&mut self, parent: &Recipe, sub_recipe: &Recipe) -> Option<f64> {
        if let Some(total) = self.memo.get(&sub_recipe.id) {
            return Some(*total);
        }
        if let Some(start) = self.stack.iter().position(|id| *id == sub_recipe.id) {
            let mut path = self.stack[start..].to_vec();
            path.push(sub_recipe.id.clone());
            warn!(path = %path.join(" -> "), "circular sub-recipe reference while costing");
            self.errors.push(CostError::CircularReference {
                recipe_id: parent.id.clone(),
                path,
            });
            return None;
        }
        if self.stack.len() > self.max_depth {
            warn!(recipe_id = %parent.id, max_depth = self.max_depth, "sub-recipe depth limit reached");
            self.errors.push(CostError::DepthExceeded {
                recipe_id: parent.id.clone(),
                max_depth: self.max_depth,
            });
            return None;
        }

        self.stack.push(sub_recipe.id.clone());
        let totals = self.cost_recipe(sub_recipe);
        self.stack.pop();

        let total = totals.total();
        self.memo.insert(sub_recipe.id.clone(), total);
        Some(total)
    }
}

fn empty_line(item: &RecipeItem) -> RecipeItemCost {
    RecipeItemCost {
        item_id: item.id.clone(),
        kind: item.kind(),
        reference_id: item.reference_id().to_string(),
        name: item
            .display_name()
            .unwrap_or_else(|| item.reference_id())
            .to_string(),
        quantity: item.quantity,
        unit: item.unit,
        unit_cost: 0.0,
        total_cost: 0.0,
        proportion_used: None,
    }
}
