//! Filtering, sorting and pagination of recipe lists

use crate::models::requests::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::models::{Recipe, RecipeCategory, RecipeDifficulty, RecipeFilters};
use crate::validation::{RecipeValidationResult, validate_recipe_filters};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Validated recipe list filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeQuery {
    pub category: Option<RecipeCategory>,
    pub difficulty: Option<RecipeDifficulty>,
    pub max_cost_per_serving: Option<f64>,
    pub max_preparation_time: Option<f64>,
    pub search_query: Option<String>,
    pub ingredient_id: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for RecipeQuery {
    fn default() -> Self {
        Self {
            category: None,
            difficulty: None,
            max_cost_per_serving: None,
            max_preparation_time: None,
            search_query: None,
            ingredient_id: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RecipeQuery {
    /// Validate raw filters and convert them
    pub fn from_filters(filters: &RecipeFilters) -> Result<Self, RecipeValidationResult> {
        let result = validate_recipe_filters(filters);
        if !result.is_valid {
            return Err(result);
        }
        let category = filters.category.as_deref().and_then(|c| c.parse().ok());
        let difficulty = filters.difficulty.as_deref().and_then(|d| d.parse().ok());
        Ok(Self {
            category,
            difficulty,
            max_cost_per_serving: filters.max_cost_per_serving,
            max_preparation_time: filters.max_preparation_time,
            search_query: filters
                .search_query
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            ingredient_id: filters.ingredient_id.clone(),
            page: filters.page_or_default(),
            limit: filters.limit_or_default(),
        })
    }

    /// Whether an active recipe passes every filter
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if !recipe.is_active {
            return false;
        }
        if self.category.is_some_and(|c| c != recipe.category) {
            return false;
        }
        if self.difficulty.is_some_and(|d| d != recipe.difficulty) {
            return false;
        }
        if self
            .max_cost_per_serving
            .is_some_and(|max| recipe.costs.cost_per_serving > max)
        {
            return false;
        }
        if self
            .max_preparation_time
            .is_some_and(|max| recipe.preparation_time > max)
        {
            return false;
        }
        if let Some(ingredient_id) = &self.ingredient_id
            && !recipe.uses_ingredient(ingredient_id)
        {
            return false;
        }
        match &self.search_query {
            Some(query) => matches_search(recipe, &query.to_lowercase()),
            None => true,
        }
    }
}

/// Case-insensitive search across name, description, notes and item names
fn matches_search(recipe: &Recipe, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);
    contains(&recipe.name)
        || recipe.description.as_deref().is_some_and(contains)
        || recipe.notes.as_deref().is_some_and(contains)
        || recipe
            .recipe_items
            .iter()
            .filter_map(|item| item.display_name())
            .any(contains)
}

/// Active recipes matching the query, in input order
pub fn filter_recipes<'a>(recipes: &'a [Recipe], query: &RecipeQuery) -> Vec<&'a Recipe> {
    recipes.iter().filter(|r| query.matches(r)).collect()
}

/// Field to sort recipes by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    /// Cost per serving
    Cost,
    /// Preparation time
    Time,
    Updated,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "cost" => Ok(SortKey::Cost),
            "time" => Ok(SortKey::Time),
            "updated" => Ok(SortKey::Updated),
            _ => Err(format!(
                "Unknown sort key: {}. Use 'name', 'cost', 'time' or 'updated'.",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {}. Use 'asc' or 'desc'.", s)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// Sort recipes in place. The sort is stable, so equal keys keep their order.
///
/// Names compare case-insensitively.
pub fn sort_recipes<R: Borrow<Recipe>>(recipes: &mut [R], key: SortKey, order: SortOrder) {
    recipes.sort_by(|a, b| {
        let (a, b) = (a.borrow(), b.borrow());
        let ordering = match key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Cost => a.costs.cost_per_serving.total_cmp(&b.costs.cost_per_serving),
            SortKey::Time => a.preparation_time.total_cmp(&b.preparation_time),
            SortKey::Updated => a.updated_at.cmp(&b.updated_at),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// One page of a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total_items: usize,
    pub total_pages: u32,
    pub has_next: bool,
}

/// Slice out page `page` (1-based) of `limit` items. Page and limit below 1 are
/// treated as 1.
pub fn paginate<T: Clone>(items: &[T], page: u32, limit: u32) -> Page<T> {
    let page = page.max(1);
    let limit = limit.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(limit as usize) as u32;
    let start = (page as usize - 1).saturating_mul(limit as usize);
    let slice = items
        .get(start..)
        .map(|rest| &rest[..rest.len().min(limit as usize)])
        .unwrap_or_default();
    Page {
        items: slice.to_vec(),
        page,
        limit,
        total_items,
        total_pages,
        has_next: page < total_pages,
    }
}
