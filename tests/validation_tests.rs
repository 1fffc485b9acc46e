//! Tests for recipe, request and dependency validation

use recipe_costing_sdk::models::{
    BatchRecipeUpdateRequest, ErrorCode, PriceUpdateRequest, Recipe, RecipeCategory, RecipeDraft,
    RecipeItem, RecipeItemDraft, RecipeSettings, RecipeStatusChangeRequest, RecipeStepDraft,
    RecipeUpdateDraft, TestResultsDraft, Unit,
};
use recipe_costing_sdk::validation::{
    BatchUpdate, apply_price_update, build_recipe, check_circular_dependency,
    check_sub_recipe_addition, ensure_acyclic, merge_update, validate_batch_recipe_update,
    validate_recipe, validate_recipe_item, validate_recipe_name, validate_recipe_status_change,
    validate_recipe_step, validate_sub_recipe_references,
};
use serde_json::json;
use std::collections::BTreeMap;

fn valid_draft() -> RecipeDraft {
    RecipeDraft {
        name: Some("Bolo de Chocolate".to_string()),
        category: Some("cakes".to_string()),
        generated_amount: Some(1.2),
        generated_unit: Some("kilogram".to_string()),
        servings: Some(12.0),
        difficulty: Some("medium".to_string()),
        recipe_items: Some(vec![
            RecipeItemDraft::ingredient("ing_flour", 300.0, "gram"),
            RecipeItemDraft::sub_recipe("rec_ganache", 200.0, "gram"),
        ]),
        instructions: Some(vec![
            RecipeStepDraft::new(1, "Misture os ingredientes secos", 10.0),
            RecipeStepDraft::new(2, "Asse por quarenta minutos a 180 graus", 40.0),
        ]),
        ..Default::default()
    }
}

mod recipe_draft_tests {
    use super::*;

    #[test]
    fn test_valid_draft() {
        let result = validate_recipe(&valid_draft());
        assert!(result.is_valid, "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_name_length_is_trimmed() {
        assert!(validate_recipe_name("Pão").is_valid);
        assert!(!validate_recipe_name(" ab ").is_valid);
        assert!(!validate_recipe_name(&"x".repeat(101)).is_valid);
    }

    #[test]
    fn test_items_and_steps_required() {
        let draft = RecipeDraft {
            recipe_items: Some(vec![]),
            instructions: None,
            ..valid_draft()
        };
        let result = validate_recipe(&draft);
        assert!(!result.is_valid);
        assert!(result.has_error_for("recipeItems"));
        assert!(result.has_error_for("instructions"));
        assert!(result.has_code(ErrorCode::Required));
    }

    #[test]
    fn test_item_reference_must_match_type() {
        let mut both = RecipeItemDraft::ingredient("ing_flour", 100.0, "gram");
        both.sub_recipe_id = Some("rec_ganache".to_string());
        assert!(!validate_recipe_item(&both).is_valid);

        let mut missing = RecipeItemDraft::sub_recipe("rec_ganache", 100.0, "gram");
        missing.sub_recipe_id = None;
        assert!(!validate_recipe_item(&missing).is_valid);

        assert!(validate_recipe_item(&RecipeItemDraft::ingredient("ing_flour", 1.0, "kg")).is_valid);
    }

    #[test]
    fn test_item_errors_carry_index() {
        let mut draft = valid_draft();
        if let Some(items) = draft.recipe_items.as_mut() {
            items[1].quantity = Some(0.0);
        }
        let result = validate_recipe(&draft);
        assert!(result.has_error_for("recipeItems[1].quantity"));
        assert!(result.has_code(ErrorCode::MinValue));
    }

    #[test]
    fn test_short_instruction_rejected() {
        assert!(!validate_recipe_step(&RecipeStepDraft::new(1, "Misture", 5.0)).is_valid);
        assert!(validate_recipe_step(&RecipeStepDraft::new(1, "Misture bem a massa", 0.0)).is_valid);
    }

    #[test]
    fn test_duplicate_step_numbers_warn() {
        let draft = RecipeDraft {
            instructions: Some(vec![
                RecipeStepDraft::new(1, "Misture os ingredientes secos", 10.0),
                RecipeStepDraft::new(1, "Adicione os ovos um a um", 5.0),
            ]),
            ..valid_draft()
        };
        let result = validate_recipe(&draft);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, ErrorCode::Duplicate);
    }

    #[test]
    fn test_draft_from_json_with_legacy_ingredients_key() {
        let draft: RecipeDraft = serde_json::from_value(json!({
            "name": "Brigadeiro",
            "category": "fillings",
            "generatedAmount": 500,
            "generatedUnit": "g",
            "servings": 25,
            "difficulty": "easy",
            "ingredients": [
                {"type": "ingredient", "ingredientId": "ing_condensed_milk", "quantity": 395, "unit": "g"}
            ],
            "instructions": [
                {"stepNumber": 1, "instruction": "Cozinhe em fogo baixo mexendo sempre", "timeMinutes": 15}
            ]
        }))
        .unwrap();
        assert!(validate_recipe(&draft).is_valid);
    }

    #[test]
    fn test_build_recipe_assigns_ids() {
        let recipe = build_recipe(&valid_draft(), "rec_1", "user_1").unwrap();
        assert_eq!(recipe.id, "rec_1");
        assert_eq!(recipe.recipe_items.len(), 2);
        assert!(!recipe.recipe_items[0].id.is_empty());
        assert_ne!(recipe.recipe_items[0].id, recipe.recipe_items[1].id);
        assert_eq!(recipe.preparation_time, 50.0);
        assert!((recipe.portion_size - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_merge_update_keeps_items() {
        let existing = build_recipe(&valid_draft(), "rec_1", "user_1").unwrap();
        let update = RecipeUpdateDraft {
            id: Some("rec_1".to_string()),
            fields: RecipeDraft {
                servings: Some(24.0),
                ..Default::default()
            },
        };
        let merged = merge_update(&existing, &update).unwrap();
        assert_eq!(merged.servings, 24);
        assert_eq!(merged.recipe_items, existing.recipe_items);
        assert_eq!(merged.created_by, "user_1");

        let wrong_id = RecipeUpdateDraft {
            id: Some("rec_2".to_string()),
            ..update
        };
        assert!(merge_update(&existing, &wrong_id).is_err());
    }
}

mod request_tests {
    use super::*;

    #[test]
    fn test_batch_update_requires_field_for_type() {
        let request = BatchRecipeUpdateRequest {
            recipe_ids: Some(vec!["a".to_string(), "b".to_string()]),
            update_type: Some("category".to_string()),
            ..Default::default()
        };
        let result = validate_batch_recipe_update(&request);
        assert!(!result.is_valid);
        assert!(result.has_error_for("category"));

        let archive = BatchRecipeUpdateRequest {
            update_type: Some("archive".to_string()),
            ..request
        };
        let (ids, update) = BatchUpdate::from_request(&archive).unwrap();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(update, BatchUpdate::Archive);
    }

    #[test]
    fn test_batch_update_applies() {
        let recipe = Recipe::new("a", "Pão Francês", RecipeCategory::Other, 1.0, Unit::Kilogram, 10);
        let request = BatchRecipeUpdateRequest {
            recipe_ids: Some(vec!["a".to_string()]),
            update_type: Some("category".to_string()),
            category: Some("breads".to_string()),
            ..Default::default()
        };
        let (_, update) = BatchUpdate::from_request(&request).unwrap();
        assert_eq!(update.apply(&recipe).category, RecipeCategory::Breads);
        assert!(!BatchUpdate::Archive.apply(&recipe).is_active);
    }

    #[test]
    fn test_status_change_to_testing() {
        let request = RecipeStatusChangeRequest {
            recipe_id: Some("a".to_string()),
            status: Some("testing".to_string()),
            test_results: Some(TestResultsDraft {
                cost_accuracy: Some(json!("yes")),
                difficulty_rating: Some("easy".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = validate_recipe_status_change(&request);
        assert!(!result.is_valid);
        assert!(result.has_error_for("testResults.costAccuracy"));
    }

    #[test]
    fn test_testing_status_requires_tasting_notes() {
        let mut request = RecipeStatusChangeRequest {
            recipe_id: Some("a".to_string()),
            status: Some("testing".to_string()),
            test_results: Some(TestResultsDraft {
                cost_accuracy: Some(json!(true)),
                difficulty_rating: Some("medium".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = validate_recipe_status_change(&request);
        assert!(!result.is_valid);
        assert!(result.has_error_for("testResults.tastingNotes"));
        assert!(result.has_code(ErrorCode::Required));

        if let Some(results) = request.test_results.as_mut() {
            results.tasting_notes = Some("Massa úmida, cobertura doce demais".to_string());
        }
        assert!(validate_recipe_status_change(&request).is_valid);
    }

    #[test]
    fn test_price_update_merges_categories() {
        let request = PriceUpdateRequest {
            recipe_id: Some("rec_1".to_string()),
            labor_hour_rate: Some(40.0),
            margins_by_category: Some(BTreeMap::from([("breads".to_string(), 0.35)])),
            ..Default::default()
        };
        let updated = apply_price_update(&RecipeSettings::default(), &request).unwrap();
        assert_eq!(updated.labor_hour_rate, 40.0);
        assert_eq!(updated.margin_for(RecipeCategory::Breads), 0.35);
        assert_eq!(updated.margin_for(RecipeCategory::Icings), 2.0);

        let unknown = PriceUpdateRequest {
            recipe_id: Some("rec_1".to_string()),
            margins_by_category: Some(BTreeMap::from([("muffins".to_string(), 0.35)])),
            ..Default::default()
        };
        let err = apply_price_update(&RecipeSettings::default(), &unknown).unwrap_err();
        assert!(err.has_error_for("marginsByCategory.muffins"));
    }
}

mod dependency_tests {
    use super::*;

    fn recipe(id: &str, subs: &[&str]) -> Recipe {
        subs.iter().enumerate().fold(
            Recipe::new(id, format!("Receita {}", id), RecipeCategory::Fillings, 1.0, Unit::Kilogram, 1),
            |r, (i, sub)| r.with_item(RecipeItem::sub_recipe(format!("{}{}", id, i), *sub, 100.0, Unit::Gram)),
        )
    }

    #[test]
    fn test_two_recipe_cycle() {
        let b = recipe("B", &["A"]);
        let a = recipe("A", &["B"]);
        let check = check_circular_dependency("A", &a.recipe_items, |id| (id == "B").then_some(&b));
        assert!(check.has_circular_dependency);
        assert_eq!(check.dependency_path.unwrap(), vec!["A", "B", "A"]);
    }

    #[test]
    fn test_chain_without_cycle() {
        let recipes = [recipe("A", &["B"]), recipe("B", &["C"]), recipe("C", &[])];
        let resolve = |id: &str| recipes.iter().find(|r| r.id == id);
        let check = check_circular_dependency("A", &recipes[0].recipe_items, resolve);
        assert!(!check.has_circular_dependency);
        assert!(check.dependency_path.is_none());
        assert!(ensure_acyclic(&recipes[0], resolve).is_valid);
    }

    #[test]
    fn test_addition_that_closes_a_loop() {
        let recipes = [recipe("A", &["B"]), recipe("B", &["C"]), recipe("C", &[])];
        let resolve = |id: &str| recipes.iter().find(|r| r.id == id);
        let check = check_sub_recipe_addition("C", "A", resolve);
        assert!(check.has_circular_dependency);
        assert_eq!(check.dependency_path.unwrap(), vec!["C", "A", "B", "C"]);
    }

    #[test]
    fn test_missing_sub_recipe_blocks_save() {
        let a = recipe("A", &["B"]);
        let result = validate_sub_recipe_references(&a, |_| None);
        assert!(!result.is_valid);
        assert!(result.has_error_for("recipeItems[0].subRecipeId"));
        assert!(result.has_code(ErrorCode::Required));
    }

    #[test]
    fn test_inactive_sub_recipe_blocks_save() {
        let mut b = recipe("B", &[]);
        b.is_active = false;
        let a = recipe("A", &["B"]);
        let result = validate_sub_recipe_references(&a, |id| (id == "B").then_some(&b));
        assert!(!result.is_valid);
        assert!(result.has_code(ErrorCode::Invalid));

        b.is_active = true;
        assert!(validate_sub_recipe_references(&a, |id| (id == "B").then_some(&b)).is_valid);
    }

    #[test]
    fn test_self_reference() {
        let a = recipe("A", &["A"]);
        let result = ensure_acyclic(&a, |_| None);
        assert!(result.has_code(ErrorCode::CircularDependency));
    }
}
