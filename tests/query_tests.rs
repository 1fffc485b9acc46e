//! Tests for recipe listing, statistics and formatting

use recipe_costing_sdk::costing::{Catalog, apply_costs, calculate_cost};
use recipe_costing_sdk::models::{
    Ingredient, Recipe, RecipeCategory, RecipeDifficulty, RecipeFilters, RecipeItem,
    RecipeSettings, RecipeStep, Unit,
};
use recipe_costing_sdk::query::{
    RecipeQuery, SortKey, SortOrder, filter_recipes, format_price, format_time, paginate,
    recipe_stats, sort_recipes,
};
use serde_json::json;

fn costed_recipes() -> Vec<Recipe> {
    let catalog = Catalog::new()
        .with_ingredient(Ingredient::new("ing_flour", "Farinha", Unit::Kilogram, 1.0, 6.0))
        .with_ingredient(Ingredient::new("ing_butter", "Manteiga", Unit::Gram, 200.0, 9.0));
    let settings = RecipeSettings::default();

    let recipes = vec![
        Recipe::new("r_bread", "Pão Caseiro", RecipeCategory::Breads, 1.0, Unit::Kilogram, 10)
            .with_item(RecipeItem::ingredient("1", "ing_flour", 600.0, Unit::Gram))
            .with_step(RecipeStep::new("s", 1, "Sove a massa por dez minutos", 90.0))
            .with_difficulty(RecipeDifficulty::Easy),
        Recipe::new("r_croissant", "Croissant", RecipeCategory::Pastries, 1.0, Unit::Kilogram, 12)
            .with_item(RecipeItem::ingredient("1", "ing_flour", 500.0, Unit::Gram))
            .with_item(RecipeItem::ingredient("2", "ing_butter", 250.0, Unit::Gram))
            .with_step(RecipeStep::new("s", 1, "Lamine a massa com a manteiga", 180.0))
            .with_difficulty(RecipeDifficulty::Hard),
        Recipe::new("r_cookie", "Cookie", RecipeCategory::Cookies, 500.0, Unit::Gram, 20)
            .with_item(RecipeItem::ingredient("1", "ing_butter", 100.0, Unit::Gram))
            .with_step(RecipeStep::new("s", 1, "Misture e asse por doze minutos", 15.0)),
    ];
    recipes
        .iter()
        .map(|r| apply_costs(r, &calculate_cost(r, &catalog, &settings)))
        .collect()
}

mod listing_tests {
    use super::*;

    #[test]
    fn test_filter_sort_paginate() {
        let recipes = costed_recipes();
        let filters: RecipeFilters = serde_json::from_value(json!({
            "ingredientId": "ing_butter",
            "limit": 1
        }))
        .unwrap();
        let query = RecipeQuery::from_filters(&filters).unwrap();

        let mut found = filter_recipes(&recipes, &query);
        assert_eq!(found.len(), 2);

        sort_recipes(&mut found, SortKey::Time, SortOrder::Desc);
        let page = paginate(&found, query.page, query.limit);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "r_croissant");
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next);
    }

    #[test]
    fn test_max_preparation_time_and_category() {
        let recipes = costed_recipes();
        let query = RecipeQuery {
            max_preparation_time: Some(100.0),
            category: Some(RecipeCategory::Breads),
            ..Default::default()
        };
        let found = filter_recipes(&recipes, &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "r_bread");
    }

    #[test]
    fn test_limit_above_maximum_rejected() {
        let filters = RecipeFilters {
            limit: Some(500.0),
            ..Default::default()
        };
        let err = RecipeQuery::from_filters(&filters).unwrap_err();
        assert!(err.has_error_for("limit"));
    }

    #[test]
    fn test_sort_keys_parse() {
        assert_eq!("COST".parse::<SortKey>().unwrap(), SortKey::Cost);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("price".parse::<SortKey>().is_err());
    }
}

mod stats_tests {
    use super::*;

    #[test]
    fn test_stats_over_costed_recipes() {
        let recipes = costed_recipes();
        let stats = recipe_stats(&recipes);
        assert_eq!(stats.total_recipes, 3);
        assert!((stats.average_preparation_time - 95.0).abs() < 1e-9);

        let most_used = &stats.most_used_ingredients;
        assert_eq!(most_used.len(), 2);
        assert_eq!(most_used[0].recipe_count, 2);

        let most_expensive = stats.most_expensive.unwrap();
        assert_eq!(most_expensive.id, "r_croissant");
    }
}

mod format_tests {
    use super::*;

    #[test]
    fn test_display_helpers() {
        assert_eq!(format_price(0.858), "R$ 0,86");
        assert_eq!(format_price(12345.678), "R$ 12.345,68");
        assert_eq!(format_time(25.0), "25 min");
        assert_eq!(format_time(180.0), "3h");
        assert_eq!(format_time(95.0), "1h 35min");
    }
}
