//! Ingredient catalog entry

use super::enums::Unit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An ingredient as priced by the catalog.
///
/// `current_price` is the price of one package holding `measurement_value` of `unit`
/// (e.g. R$ 5.50 for 1 kilogram of flour). Both numbers are non-negative.
///
/// # Example
///
/// ```rust
/// use recipe_costing_sdk::models::{Ingredient, Unit};
///
/// let flour = Ingredient::new("ing_flour", "Farinha de Trigo", Unit::Kilogram, 1.0, 5.50);
/// assert_eq!(flour.price_per_unit(), Some(5.50));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    /// Unit the package is measured in
    pub unit: Unit,
    /// Package size expressed in `unit`
    pub measurement_value: f64,
    /// Price of one package in R$
    pub current_price: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub supplier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_updated: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Ingredient {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit: Unit,
        measurement_value: f64,
        current_price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit,
            measurement_value,
            current_price,
            is_active: true,
            brand: None,
            supplier_id: None,
            last_updated: None,
        }
    }

    /// Price of a single `unit` of this ingredient.
    ///
    /// Returns `None` when the package size is not positive or the price is negative
    /// or not a number, since no per-unit price can be derived from them.
    pub fn price_per_unit(&self) -> Option<f64> {
        if self.measurement_value > 0.0 && self.current_price.is_finite() && self.current_price >= 0.0 {
            Some(self.current_price / self.measurement_value)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_price_per_unit_from_package() {
        let butter = Ingredient::new("ing_butter", "Manteiga", Unit::Gram, 200.0, 12.0);
        assert!((butter.price_per_unit().unwrap() - 0.06).abs() < 1e-12);
    }

    #[test]
    fn zero_package_has_no_unit_price() {
        let eggs = Ingredient::new("ing_eggs", "Ovos", Unit::Unit, 0.0, 18.0);
        assert_eq!(eggs.price_per_unit(), None);
    }

    #[test]
    fn negative_price_has_no_unit_price() {
        let milk = Ingredient::new("ing_milk", "Leite", Unit::Liter, 1.0, -4.5);
        assert_eq!(milk.price_per_unit(), None);
        let free = Ingredient::new("ing_water", "Água", Unit::Liter, 1.0, 0.0);
        assert_eq!(free.price_per_unit(), Some(0.0));
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let json = r#"{"id":"i1","name":"Açúcar","unit":"kilogram","measurementValue":5,"currentPrice":22.9}"#;
        let ing: Ingredient = serde_json::from_str(json).unwrap();
        assert!(ing.is_active);
        assert_eq!(ing.unit, Unit::Kilogram);
        assert_eq!(ing.measurement_value, 5.0);
    }
}
