//! Aggregate statistics over a recipe collection

use crate::models::{Recipe, RecipeCategory, RecipeDifficulty};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Number of entries in [`RecipeStats::most_used_ingredients`]
pub const MOST_USED_INGREDIENTS_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: RecipeCategory,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyCount {
    pub difficulty: RecipeDifficulty,
    pub count: usize,
    pub percentage: f64,
}

/// Short reference to a recipe with its cost per serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCostSummary {
    pub id: String,
    pub name: String,
    pub cost_per_serving: f64,
}

impl From<&Recipe> for RecipeCostSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            cost_per_serving: recipe.costs.cost_per_serving,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientUsage {
    pub ingredient_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ingredient_name: Option<String>,
    /// Number of active recipes using the ingredient directly
    pub recipe_count: usize,
}

/// Summary of the active recipes in a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStats {
    pub total_recipes: usize,
    pub average_cost_per_serving: f64,
    pub average_preparation_time: f64,
    /// Every category, in declaration order, including empty ones
    pub category_distribution: Vec<CategoryCount>,
    /// Every difficulty, in declaration order, including empty ones
    pub difficulty_distribution: Vec<DifficultyCount>,
    pub most_expensive: Option<RecipeCostSummary>,
    pub least_expensive: Option<RecipeCostSummary>,
    pub most_used_ingredients: Vec<IngredientUsage>,
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Compute statistics over the active recipes. Inactive recipes are ignored.
///
/// An empty collection yields zero averages and empty distributions.
pub fn recipe_stats(recipes: &[Recipe]) -> RecipeStats {
    let active: Vec<&Recipe> = recipes.iter().filter(|r| r.is_active).collect();
    let total = active.len();

    if total == 0 {
        return RecipeStats {
            total_recipes: 0,
            average_cost_per_serving: 0.0,
            average_preparation_time: 0.0,
            category_distribution: Vec::new(),
            difficulty_distribution: Vec::new(),
            most_expensive: None,
            least_expensive: None,
            most_used_ingredients: Vec::new(),
        };
    }

    let average_cost_per_serving =
        active.iter().map(|r| r.costs.cost_per_serving).sum::<f64>() / total as f64;
    let average_preparation_time =
        active.iter().map(|r| r.preparation_time).sum::<f64>() / total as f64;

    let category_distribution = RecipeCategory::ALL
        .iter()
        .map(|&category| {
            let count = active.iter().filter(|r| r.category == category).count();
            CategoryCount {
                category,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect();

    let difficulty_distribution = RecipeDifficulty::ALL
        .iter()
        .map(|&difficulty| {
            let count = active.iter().filter(|r| r.difficulty == difficulty).count();
            DifficultyCount {
                difficulty,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect();

    // First of equal costs wins in both directions
    let most_expensive = active
        .iter()
        .copied()
        .reduce(|best, r| {
            if r.costs.cost_per_serving > best.costs.cost_per_serving {
                r
            } else {
                best
            }
        })
        .map(RecipeCostSummary::from);
    let least_expensive = active
        .iter()
        .copied()
        .reduce(|best, r| {
            if r.costs.cost_per_serving < best.costs.cost_per_serving {
                r
            } else {
                best
            }
        })
        .map(RecipeCostSummary::from);

    RecipeStats {
        total_recipes: total,
        average_cost_per_serving,
        average_preparation_time,
        category_distribution,
        difficulty_distribution,
        most_expensive,
        least_expensive,
        most_used_ingredients: most_used_ingredients(&active),
    }
}

fn most_used_ingredients(active: &[&Recipe]) -> Vec<IngredientUsage> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut names: HashMap<&str, &str> = HashMap::new();
    for recipe in active {
        let mut seen = HashSet::new();
        for item in &recipe.recipe_items {
            let Some(id) = item.ingredient_id() else {
                continue;
            };
            if seen.insert(id) {
                *counts.entry(id).or_default() += 1;
            }
            if let Some(name) = item.display_name() {
                names.entry(id).or_insert(name);
            }
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(MOST_USED_INGREDIENTS_LIMIT)
        .map(|(id, recipe_count)| IngredientUsage {
            ingredient_id: id.to_string(),
            ingredient_name: names.get(id).map(|n| n.to_string()),
            recipe_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecipeItem, Unit};

    fn recipe(id: &str, category: RecipeCategory, cps: f64, minutes: f64) -> Recipe {
        let mut r = Recipe::new(id, format!("Receita {}", id), category, 1.0, Unit::Kilogram, 10);
        r.costs.cost_per_serving = cps;
        r.preparation_time = minutes;
        r
    }

    #[test]
    fn empty_collection() {
        let stats = recipe_stats(&[]);
        assert_eq!(stats.total_recipes, 0);
        assert_eq!(stats.average_cost_per_serving, 0.0);
        assert!(stats.category_distribution.is_empty());
        assert!(stats.most_expensive.is_none());
    }

    #[test]
    fn averages_and_distribution_ignore_inactive() {
        let mut archived = recipe("x", RecipeCategory::Cakes, 100.0, 500.0);
        archived.is_active = false;
        let recipes = vec![
            recipe("a", RecipeCategory::Cakes, 2.0, 60.0),
            recipe("b", RecipeCategory::Breads, 1.0, 30.0),
            recipe("c", RecipeCategory::Cakes, 3.0, 90.0),
            recipe("d", RecipeCategory::Cookies, 2.0, 20.0),
            archived,
        ];
        let stats = recipe_stats(&recipes);
        assert_eq!(stats.total_recipes, 4);
        assert!((stats.average_cost_per_serving - 2.0).abs() < 1e-9);
        assert!((stats.average_preparation_time - 50.0).abs() < 1e-9);

        assert_eq!(stats.category_distribution.len(), RecipeCategory::ALL.len());
        let cakes = stats
            .category_distribution
            .iter()
            .find(|c| c.category == RecipeCategory::Cakes)
            .unwrap();
        assert_eq!(cakes.count, 2);
        assert!((cakes.percentage - 50.0).abs() < 1e-9);

        assert_eq!(stats.most_expensive.unwrap().id, "c");
        assert_eq!(stats.least_expensive.unwrap().id, "b");
    }

    #[test]
    fn ranks_ingredients_by_recipe_count() {
        let recipes = vec![
            recipe("a", RecipeCategory::Cakes, 1.0, 10.0)
                .with_item(RecipeItem::ingredient("1", "flour", 100.0, Unit::Gram))
                .with_item(RecipeItem::ingredient("2", "flour", 50.0, Unit::Gram))
                .with_item(RecipeItem::ingredient("3", "sugar", 50.0, Unit::Gram)),
            recipe("b", RecipeCategory::Breads, 1.0, 10.0)
                .with_item(RecipeItem::ingredient("1", "flour", 500.0, Unit::Gram))
                .with_item(RecipeItem::ingredient("2", "yeast", 10.0, Unit::Gram)),
        ];
        let stats = recipe_stats(&recipes);
        let ranked: Vec<(&str, usize)> = stats
            .most_used_ingredients
            .iter()
            .map(|u| (u.ingredient_id.as_str(), u.recipe_count))
            .collect();
        assert_eq!(ranked, vec![("flour", 2), ("sugar", 1), ("yeast", 1)]);
    }
}
