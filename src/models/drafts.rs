//! Recipe drafts: untrusted create/update input
//!
//! Drafts mirror [`Recipe`](super::Recipe) but keep every field optional and every enum
//! as a raw string, so that a malformed form submission deserializes and the validators
//! can report every problem at once.

use super::recipe::{ItemReference, Recipe, RecipeItem, RecipeStep};
use serde::{Deserialize, Serialize};

/// Untrusted recipe item as submitted by a form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeItemDraft {
    /// `ingredient` or `recipe`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_recipe_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RecipeItemDraft {
    pub fn ingredient(ingredient_id: impl Into<String>, quantity: f64, unit: &str) -> Self {
        Self {
            item_type: Some("ingredient".to_string()),
            ingredient_id: Some(ingredient_id.into()),
            quantity: Some(quantity),
            unit: Some(unit.to_string()),
            ..Default::default()
        }
    }

    pub fn sub_recipe(sub_recipe_id: impl Into<String>, quantity: f64, unit: &str) -> Self {
        Self {
            item_type: Some("recipe".to_string()),
            sub_recipe_id: Some(sub_recipe_id.into()),
            quantity: Some(quantity),
            unit: Some(unit.to_string()),
            ..Default::default()
        }
    }
}

/// Untrusted preparation step
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_number: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RecipeStepDraft {
    pub fn new(step_number: u32, instruction: impl Into<String>, time_minutes: f64) -> Self {
        Self {
            step_number: Some(step_number as f64),
            instruction: Some(instruction.into()),
            time_minutes: Some(time_minutes),
            notes: None,
        }
    }
}

/// Untrusted recipe create request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Older clients send the item list as `ingredients`
    #[serde(alias = "ingredients", skip_serializing_if = "Option::is_none")]
    pub recipe_items: Option<Vec<RecipeItemDraft>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<RecipeStepDraft>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Untrusted partial update. Only `id` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeUpdateDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: RecipeDraft,
}

impl From<&RecipeItem> for RecipeItemDraft {
    fn from(item: &RecipeItem) -> Self {
        let (ingredient_id, sub_recipe_id) = match &item.reference {
            ItemReference::Ingredient { ingredient_id, .. } => (Some(ingredient_id.clone()), None),
            ItemReference::Recipe { sub_recipe_id, .. } => (None, Some(sub_recipe_id.clone())),
        };
        Self {
            item_type: Some(item.kind().as_str().to_string()),
            ingredient_id,
            sub_recipe_id,
            quantity: Some(item.quantity),
            unit: Some(item.unit.as_str().to_string()),
            notes: item.notes.clone(),
        }
    }
}

impl From<&RecipeStep> for RecipeStepDraft {
    fn from(step: &RecipeStep) -> Self {
        Self {
            step_number: Some(step.step_number as f64),
            instruction: Some(step.instruction.clone()),
            time_minutes: Some(step.time_minutes),
            notes: step.notes.clone(),
        }
    }
}

impl From<&Recipe> for RecipeDraft {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: Some(recipe.name.clone()),
            description: recipe.description.clone(),
            category: Some(recipe.category.as_str().to_string()),
            generated_amount: Some(recipe.generated_amount),
            generated_unit: Some(recipe.generated_unit.as_str().to_string()),
            servings: Some(recipe.servings as f64),
            difficulty: Some(recipe.difficulty.as_str().to_string()),
            recipe_items: Some(recipe.recipe_items.iter().map(RecipeItemDraft::from).collect()),
            instructions: Some(recipe.instructions.iter().map(RecipeStepDraft::from).collect()),
            notes: recipe.notes.clone(),
        }
    }
}

impl RecipeDraft {
    /// Fields present in `update` replace the corresponding fields of `self`
    pub fn overlay(self, update: &RecipeDraft) -> RecipeDraft {
        RecipeDraft {
            name: update.name.clone().or(self.name),
            description: update.description.clone().or(self.description),
            category: update.category.clone().or(self.category),
            generated_amount: update.generated_amount.or(self.generated_amount),
            generated_unit: update.generated_unit.clone().or(self.generated_unit),
            servings: update.servings.or(self.servings),
            difficulty: update.difficulty.clone().or(self.difficulty),
            recipe_items: update.recipe_items.clone().or(self.recipe_items),
            instructions: update.instructions.clone().or(self.instructions),
            notes: update.notes.clone().or(self.notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_ingredients_alias() {
        let json = r#"{"name":"Cookies","ingredients":[{"type":"ingredient","ingredientId":"i1","quantity":100,"unit":"gram"}]}"#;
        let draft: RecipeDraft = serde_json::from_str(json).unwrap();
        let items = draft.recipe_items.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].ingredient_id.as_deref(), Some("i1"));
    }

    #[test]
    fn malformed_enums_still_deserialize() {
        let json = r#"{"category":"pies","difficulty":"impossible","servings":2.5}"#;
        let draft: RecipeDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.category.as_deref(), Some("pies"));
        assert_eq!(draft.servings, Some(2.5));
    }

    #[test]
    fn update_draft_flattens_fields() {
        let json = r#"{"id":"rec_1","servings":8}"#;
        let update: RecipeUpdateDraft = serde_json::from_str(json).unwrap();
        assert_eq!(update.id.as_deref(), Some("rec_1"));
        assert_eq!(update.fields.servings, Some(8.0));
        assert!(update.fields.name.is_none());
    }

    #[test]
    fn overlay_keeps_absent_fields() {
        let base = RecipeDraft {
            name: Some("Bolo de Fubá".to_string()),
            servings: Some(10.0),
            ..Default::default()
        };
        let update = RecipeDraft {
            servings: Some(20.0),
            ..Default::default()
        };
        let merged = base.overlay(&update);
        assert_eq!(merged.name.as_deref(), Some("Bolo de Fubá"));
        assert_eq!(merged.servings, Some(20.0));
    }
}
