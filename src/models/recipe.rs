//! Recipe model for the SDK

use super::enums::{ItemKind, RecipeCategory, RecipeDifficulty, Unit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a recipe item points at.
///
/// An item references either a raw ingredient or another recipe used as a component.
/// Carrying the id inside the variant makes "exactly one reference, matching the type"
/// a property of the type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ItemReference {
    Ingredient {
        ingredient_id: String,
        /// Denormalized name for display
        #[serde(skip_serializing_if = "Option::is_none", default)]
        ingredient_name: Option<String>,
    },
    Recipe {
        sub_recipe_id: String,
        /// Denormalized name for display
        #[serde(skip_serializing_if = "Option::is_none", default)]
        sub_recipe_name: Option<String>,
    },
}

/// One line of a recipe's bill of materials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeItem {
    pub id: String,
    #[serde(flatten)]
    pub reference: ItemReference,
    pub quantity: f64,
    pub unit: Unit,
    /// Derived from current prices, never authored directly
    #[serde(default)]
    pub cost: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub sort_order: u32,
}

impl RecipeItem {
    /// Create an item that uses a raw ingredient
    pub fn ingredient(
        id: impl Into<String>,
        ingredient_id: impl Into<String>,
        quantity: f64,
        unit: Unit,
    ) -> Self {
        Self {
            id: id.into(),
            reference: ItemReference::Ingredient {
                ingredient_id: ingredient_id.into(),
                ingredient_name: None,
            },
            quantity,
            unit,
            cost: 0.0,
            notes: None,
            sort_order: 0,
        }
    }

    /// Create an item that uses another recipe as a component
    pub fn sub_recipe(
        id: impl Into<String>,
        sub_recipe_id: impl Into<String>,
        quantity: f64,
        unit: Unit,
    ) -> Self {
        Self {
            id: id.into(),
            reference: ItemReference::Recipe {
                sub_recipe_id: sub_recipe_id.into(),
                sub_recipe_name: None,
            },
            quantity,
            unit,
            cost: 0.0,
            notes: None,
            sort_order: 0,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self.reference {
            ItemReference::Ingredient { .. } => ItemKind::Ingredient,
            ItemReference::Recipe { .. } => ItemKind::Recipe,
        }
    }

    pub fn ingredient_id(&self) -> Option<&str> {
        match &self.reference {
            ItemReference::Ingredient { ingredient_id, .. } => Some(ingredient_id),
            ItemReference::Recipe { .. } => None,
        }
    }

    pub fn sub_recipe_id(&self) -> Option<&str> {
        match &self.reference {
            ItemReference::Recipe { sub_recipe_id, .. } => Some(sub_recipe_id),
            ItemReference::Ingredient { .. } => None,
        }
    }

    /// Id of whatever the item references
    pub fn reference_id(&self) -> &str {
        match &self.reference {
            ItemReference::Ingredient { ingredient_id, .. } => ingredient_id,
            ItemReference::Recipe { sub_recipe_id, .. } => sub_recipe_id,
        }
    }

    /// Denormalized display name, if the caller stored one
    pub fn display_name(&self) -> Option<&str> {
        match &self.reference {
            ItemReference::Ingredient {
                ingredient_name, ..
            } => ingredient_name.as_deref(),
            ItemReference::Recipe {
                sub_recipe_name, ..
            } => sub_recipe_name.as_deref(),
        }
    }
}

/// A single preparation step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    pub id: String,
    pub step_number: u32,
    pub instruction: String,
    pub time_minutes: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
}

impl RecipeStep {
    pub fn new(
        id: impl Into<String>,
        step_number: u32,
        instruction: impl Into<String>,
        time_minutes: f64,
    ) -> Self {
        Self {
            id: id.into(),
            step_number,
            instruction: instruction.into(),
            time_minutes,
            notes: None,
        }
    }
}

/// Cost figures stored on a recipe after a cost calculation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeCosts {
    pub total_cost: f64,
    pub cost_per_serving: f64,
    pub labor_cost: f64,
    pub suggested_price: f64,
}

/// Recipe model: a bill of materials, preparation steps and derived costs.
///
/// Recipes can be used as sub-recipes inside other recipes. `portion_size` and
/// `preparation_time` are derived from the other fields; call
/// [`Recipe::recalculate_derived`] after editing amounts or steps directly.
///
/// # Example
///
/// ```rust
/// use recipe_costing_sdk::models::{Recipe, RecipeCategory, RecipeItem, RecipeStep, Unit};
///
/// let recipe = Recipe::new("rec_001", "Pão de Queijo", RecipeCategory::Breads, 600.0, Unit::Gram, 12)
///     .with_item(RecipeItem::ingredient("item_1", "ing_polvilho", 250.0, Unit::Gram))
///     .with_step(RecipeStep::new("step_1", 1, "Misture o polvilho com o leite quente", 10.0));
///
/// assert_eq!(recipe.portion_size, 50.0);
/// assert_eq!(recipe.preparation_time, 10.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub category: RecipeCategory,
    /// Total amount produced (e.g. 600 for 600 g)
    pub generated_amount: f64,
    pub generated_unit: Unit,
    pub servings: u32,
    /// generated_amount / servings
    #[serde(default)]
    pub portion_size: f64,
    /// Sum of step durations, in minutes
    #[serde(default)]
    pub preparation_time: f64,
    pub difficulty: RecipeDifficulty,
    pub recipe_items: Vec<RecipeItem>,
    pub instructions: Vec<RecipeStep>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub costs: RecipeCosts,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: String,
}

fn default_active() -> bool {
    true
}

impl Recipe {
    /// Create a recipe with no items or steps, medium difficulty and current timestamps.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: RecipeCategory,
        generated_amount: f64,
        generated_unit: Unit,
        servings: u32,
    ) -> Self {
        let now = Utc::now();
        let mut recipe = Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category,
            generated_amount,
            generated_unit,
            servings,
            portion_size: 0.0,
            preparation_time: 0.0,
            difficulty: RecipeDifficulty::Medium,
            recipe_items: Vec::new(),
            instructions: Vec::new(),
            notes: None,
            costs: RecipeCosts::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
            created_by: String::new(),
        };
        recipe.recalculate_derived();
        recipe
    }

    /// Append an item, assigning the next sort order
    pub fn with_item(mut self, mut item: RecipeItem) -> Self {
        item.sort_order = self.recipe_items.len() as u32;
        self.recipe_items.push(item);
        self
    }

    /// Append a step and refresh the derived preparation time
    pub fn with_step(mut self, step: RecipeStep) -> Self {
        self.instructions.push(step);
        self.recalculate_derived();
        self
    }

    pub fn with_difficulty(mut self, difficulty: RecipeDifficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sum of all step durations in minutes
    pub fn total_step_minutes(&self) -> f64 {
        self.instructions.iter().map(|s| s.time_minutes).sum()
    }

    /// Refresh `portion_size` and `preparation_time` from the authored fields
    pub fn recalculate_derived(&mut self) {
        self.portion_size = if self.servings > 0 {
            self.generated_amount / self.servings as f64
        } else {
            0.0
        };
        self.preparation_time = self.total_step_minutes();
    }

    /// Ids of every sub-recipe referenced directly by this recipe, in item order
    pub fn sub_recipe_ids(&self) -> impl Iterator<Item = &str> {
        self.recipe_items.iter().filter_map(RecipeItem::sub_recipe_id)
    }

    /// Whether the recipe uses the given ingredient directly
    pub fn uses_ingredient(&self, ingredient_id: &str) -> bool {
        self.recipe_items
            .iter()
            .any(|item| item.ingredient_id() == Some(ingredient_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_as_tagged_union() {
        let item = RecipeItem::ingredient("item_1", "ing_flour", 200.0, Unit::Gram);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "ingredient");
        assert_eq!(json["ingredientId"], "ing_flour");
        assert!(json.get("subRecipeId").is_none());

        let sub = RecipeItem::sub_recipe("item_2", "rec_base", 1.0, Unit::Kilogram);
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["type"], "recipe");
        assert_eq!(json["subRecipeId"], "rec_base");
    }

    #[test]
    fn item_deserializes_from_ui_shape() {
        let json = r#"{
            "id": "i1",
            "type": "recipe",
            "subRecipeId": "rec_brigadeiro",
            "subRecipeName": "Brigadeiro",
            "quantity": 300,
            "unit": "gram",
            "sortOrder": 2
        }"#;
        let item: RecipeItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind(), ItemKind::Recipe);
        assert_eq!(item.sub_recipe_id(), Some("rec_brigadeiro"));
        assert_eq!(item.display_name(), Some("Brigadeiro"));
        assert_eq!(item.cost, 0.0);
    }

    #[test]
    fn derived_fields_follow_steps_and_servings() {
        let recipe = Recipe::new("r1", "Bolo de Cenoura", RecipeCategory::Cakes, 1200.0, Unit::Gram, 12)
            .with_step(RecipeStep::new("s1", 1, "Bata as cenouras com os ovos", 10.0))
            .with_step(RecipeStep::new("s2", 2, "Asse por quarenta minutos", 40.0));
        assert_eq!(recipe.portion_size, 100.0);
        assert_eq!(recipe.preparation_time, 50.0);
    }

    #[test]
    fn recipe_round_trips_through_json_with_flattened_costs() {
        let mut recipe = Recipe::new("r1", "Brigadeiro", RecipeCategory::Fillings, 500.0, Unit::Gram, 25)
            .with_item(RecipeItem::ingredient("i1", "ing_leite_condensado", 395.0, Unit::Gram));
        recipe.costs.total_cost = 12.5;
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["totalCost"], 12.5);
        let parsed: Recipe = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, recipe);
    }
}
