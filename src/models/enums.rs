//! Enums for recipe costing
//!
//! # Serde Casing Conventions
//!
//! The enums in this module use different serde `rename_all` strategies based on where
//! their values travel:
//!
//! - `lowercase`: Values exchanged with the UI and stored on documents (RecipeCategory,
//!   RecipeDifficulty, RecipeStatus, Unit, ItemKind, BatchUpdateType)
//! - `SCREAMING_SNAKE_CASE`: Machine-readable error codes (ErrorCode)
//!
//! Every enum that is accepted from untrusted input also implements `FromStr`, so that
//! validators can report an `INVALID` error instead of failing at deserialization time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recipe category used for organization and per-category margins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeCategory {
    /// Cakes and large pastries
    Cakes,
    /// Individual cupcakes
    Cupcakes,
    /// Cookies and small bites
    Cookies,
    /// Breads and rolls
    Breads,
    /// Pastries and croissants
    Pastries,
    /// Icings and frostings
    Icings,
    /// Fillings and creams
    Fillings,
    Other,
}

impl RecipeCategory {
    pub const ALL: [RecipeCategory; 8] = [
        RecipeCategory::Cakes,
        RecipeCategory::Cupcakes,
        RecipeCategory::Cookies,
        RecipeCategory::Breads,
        RecipeCategory::Pastries,
        RecipeCategory::Icings,
        RecipeCategory::Fillings,
        RecipeCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeCategory::Cakes => "cakes",
            RecipeCategory::Cupcakes => "cupcakes",
            RecipeCategory::Cookies => "cookies",
            RecipeCategory::Breads => "breads",
            RecipeCategory::Pastries => "pastries",
            RecipeCategory::Icings => "icings",
            RecipeCategory::Fillings => "fillings",
            RecipeCategory::Other => "other",
        }
    }

    /// Portuguese label shown in the bakery UI
    pub fn display_name(&self) -> &'static str {
        match self {
            RecipeCategory::Cakes => "Bolos",
            RecipeCategory::Cupcakes => "Cupcakes",
            RecipeCategory::Cookies => "Biscoitos",
            RecipeCategory::Breads => "Pães",
            RecipeCategory::Pastries => "Doces",
            RecipeCategory::Icings => "Coberturas",
            RecipeCategory::Fillings => "Recheios",
            RecipeCategory::Other => "Outros",
        }
    }
}

impl FromStr for RecipeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        RecipeCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("Unknown recipe category: {}", s))
    }
}

impl fmt::Display for RecipeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty level of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeDifficulty {
    Easy,
    Medium,
    Hard,
}

impl RecipeDifficulty {
    pub const ALL: [RecipeDifficulty; 3] = [
        RecipeDifficulty::Easy,
        RecipeDifficulty::Medium,
        RecipeDifficulty::Hard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeDifficulty::Easy => "easy",
            RecipeDifficulty::Medium => "medium",
            RecipeDifficulty::Hard => "hard",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RecipeDifficulty::Easy => "Fácil",
            RecipeDifficulty::Medium => "Médio",
            RecipeDifficulty::Hard => "Difícil",
        }
    }
}

impl FromStr for RecipeDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        RecipeDifficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| format!("Unknown recipe difficulty: {}", s))
    }
}

impl fmt::Display for RecipeDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow status of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeStatus {
    Draft,
    Testing,
    Approved,
    Archived,
}

impl RecipeStatus {
    pub const ALL: [RecipeStatus; 4] = [
        RecipeStatus::Draft,
        RecipeStatus::Testing,
        RecipeStatus::Approved,
        RecipeStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeStatus::Draft => "draft",
            RecipeStatus::Testing => "testing",
            RecipeStatus::Approved => "approved",
            RecipeStatus::Archived => "archived",
        }
    }
}

impl FromStr for RecipeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        RecipeStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == normalized)
            .ok_or_else(|| format!("Unknown recipe status: {}", s))
    }
}

impl fmt::Display for RecipeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measurement family. Conversion is only defined inside a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    Mass,
    Volume,
    Count,
}

/// Unit of measurement for ingredients, recipe items and generated amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kilogram,
    Gram,
    Pound,
    Ounce,
    Liter,
    Milliliter,
    Cup,
    Tablespoon,
    Teaspoon,
    /// Individual unit (eggs, items, etc.)
    Unit,
}

impl Unit {
    pub const ALL: [Unit; 10] = [
        Unit::Kilogram,
        Unit::Gram,
        Unit::Pound,
        Unit::Ounce,
        Unit::Liter,
        Unit::Milliliter,
        Unit::Cup,
        Unit::Tablespoon,
        Unit::Teaspoon,
        Unit::Unit,
    ];

    pub fn family(&self) -> UnitFamily {
        match self {
            Unit::Kilogram | Unit::Gram | Unit::Pound | Unit::Ounce => UnitFamily::Mass,
            Unit::Liter | Unit::Milliliter | Unit::Cup | Unit::Tablespoon | Unit::Teaspoon => {
                UnitFamily::Volume
            }
            Unit::Unit => UnitFamily::Count,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kilogram => "kilogram",
            Unit::Gram => "gram",
            Unit::Pound => "pound",
            Unit::Ounce => "ounce",
            Unit::Liter => "liter",
            Unit::Milliliter => "milliliter",
            Unit::Cup => "cup",
            Unit::Tablespoon => "tablespoon",
            Unit::Teaspoon => "teaspoon",
            Unit::Unit => "unit",
        }
    }

    /// Short symbol used in log lines and CLI output
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
            Unit::Pound => "lb",
            Unit::Ounce => "oz",
            Unit::Liter => "l",
            Unit::Milliliter => "ml",
            Unit::Cup => "cup",
            Unit::Tablespoon => "tbsp",
            Unit::Teaspoon => "tsp",
            Unit::Unit => "un",
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Unit::ALL
            .into_iter()
            .find(|u| u.as_str() == normalized || u.symbol() == normalized)
            .ok_or_else(|| format!("Unknown unit: {}", s))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminant of a recipe item: a raw ingredient or a sub-recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Ingredient,
    Recipe,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Ingredient => "ingredient",
            ItemKind::Recipe => "recipe",
        }
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ingredient" => Ok(ItemKind::Ingredient),
            "recipe" => Ok(ItemKind::Recipe),
            _ => Err(format!(
                "Unknown item type: {}. Use 'ingredient' or 'recipe'.",
                s
            )),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of change applied by a batch recipe update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchUpdateType {
    Category,
    Difficulty,
    Status,
    Archive,
}

impl FromStr for BatchUpdateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "category" => Ok(BatchUpdateType::Category),
            "difficulty" => Ok(BatchUpdateType::Difficulty),
            "status" => Ok(BatchUpdateType::Status),
            "archive" => Ok(BatchUpdateType::Archive),
            _ => Err(format!("Unknown batch update type: {}", s)),
        }
    }
}

/// Machine-readable code attached to every reported validation or costing problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Required,
    Invalid,
    MinValue,
    MaxValue,
    Duplicate,
    CircularDependency,
    IncompatibleUnit,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::Required => "REQUIRED",
            ErrorCode::Invalid => "INVALID",
            ErrorCode::MinValue => "MIN_VALUE",
            ErrorCode::MaxValue => "MAX_VALUE",
            ErrorCode::Duplicate => "DUPLICATE",
            ErrorCode::CircularDependency => "CIRCULAR_DEPENDENCY",
            ErrorCode::IncompatibleUnit => "INCOMPATIBLE_UNIT",
        };
        f.write_str(code)
    }
}
