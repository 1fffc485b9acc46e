//! Price catalog consumed by the cost engine

use crate::models::{Ingredient, Recipe};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Source of ingredients and sub-recipes for cost calculations.
///
/// `None` means "not found", which the cost engine reports as an error. It is never
/// treated as a zero price.
pub trait CatalogProvider {
    fn ingredient(&self, id: &str) -> Option<&Ingredient>;
    fn recipe(&self, id: &str) -> Option<&Recipe>;
}

/// In-memory catalog keyed by id.
///
/// Serializes as two lists, which is how catalog files are written:
///
/// ```json
/// { "ingredients": [ ... ], "recipes": [ ... ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CatalogFile", into = "CatalogFile")]
pub struct Catalog {
    ingredients: HashMap<String, Ingredient>,
    recipes: HashMap<String, Recipe>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    recipes: Vec<Recipe>,
}

impl From<CatalogFile> for Catalog {
    fn from(file: CatalogFile) -> Self {
        let mut catalog = Catalog::new();
        for ingredient in file.ingredients {
            catalog.insert_ingredient(ingredient);
        }
        for recipe in file.recipes {
            catalog.insert_recipe(recipe);
        }
        catalog
    }
}

impl From<Catalog> for CatalogFile {
    fn from(catalog: Catalog) -> Self {
        let mut ingredients: Vec<Ingredient> = catalog.ingredients.into_values().collect();
        let mut recipes: Vec<Recipe> = catalog.recipes.into_values().collect();
        ingredients.sort_by(|a, b| a.id.cmp(&b.id));
        recipes.sort_by(|a, b| a.id.cmp(&b.id));
        CatalogFile {
            ingredients,
            recipes,
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.insert_ingredient(ingredient);
        self
    }

    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.insert_recipe(recipe);
        self
    }

    /// Insert or replace an ingredient, returning the previous entry
    pub fn insert_ingredient(&mut self, ingredient: Ingredient) -> Option<Ingredient> {
        self.ingredients.insert(ingredient.id.clone(), ingredient)
    }

    /// Insert or replace a recipe, returning the previous entry
    pub fn insert_recipe(&mut self, recipe: Recipe) -> Option<Recipe> {
        self.recipes.insert(recipe.id.clone(), recipe)
    }

    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.values()
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.recipes.is_empty()
    }
}

impl CatalogProvider for Catalog {
    fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.get(id)
    }

    fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }
}
