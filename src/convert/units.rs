//! Unit conversion table
//!
//! Every unit belongs to exactly one family (mass, volume, count) and carries a fixed
//! factor to the family's base unit: gram for mass, milliliter for volume and a single
//! item for count. Conversion is a linear rescale inside a family and is refused across
//! families. No rounding is applied here.

use crate::models::enums::{ErrorCode, Unit, UnitFamily};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Grams in a pound (international avoirdupois pound)
pub const GRAMS_PER_POUND: f64 = 453.592_37;

/// Grams in an ounce
pub const GRAMS_PER_OUNCE: f64 = 28.349_523_125;

/// Milliliters in a cup (Brazilian/metric cup, 240 ml)
pub const MILLILITERS_PER_CUP: f64 = 240.0;

/// Milliliters in a tablespoon
pub const MILLILITERS_PER_TABLESPOON: f64 = 15.0;

/// Milliliters in a teaspoon
pub const MILLILITERS_PER_TEASPOON: f64 = 5.0;

/// Errors raised by the unit conversion table.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ConversionError {
    /// The two units belong to different families
    #[error("Cannot convert {from} ({from_family:?}) to {to} ({to_family:?})")]
    IncompatibleUnits {
        from: Unit,
        to: Unit,
        from_family: UnitFamily,
        to_family: UnitFamily,
    },

    /// The value to convert is NaN or infinite
    #[error("Cannot convert non-finite value {0}")]
    NonFiniteValue(f64),
}

impl ConversionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConversionError::IncompatibleUnits { .. } => ErrorCode::IncompatibleUnit,
            ConversionError::NonFiniteValue(_) => ErrorCode::Invalid,
        }
    }
}

/// Factor from `unit` to the base unit of its family.
pub fn base_factor(unit: Unit) -> f64 {
    match unit {
        Unit::Kilogram => 1000.0,
        Unit::Gram => 1.0,
        Unit::Pound => GRAMS_PER_POUND,
        Unit::Ounce => GRAMS_PER_OUNCE,
        Unit::Liter => 1000.0,
        Unit::Milliliter => 1.0,
        Unit::Cup => MILLILITERS_PER_CUP,
        Unit::Tablespoon => MILLILITERS_PER_TABLESPOON,
        Unit::Teaspoon => MILLILITERS_PER_TEASPOON,
        Unit::Unit => 1.0,
    }
}

/// Whether a value expressed in `from` can be expressed in `to`.
///
/// # Example
///
/// ```rust
/// use recipe_costing_sdk::convert::is_convertible;
/// use recipe_costing_sdk::models::Unit;
///
/// assert!(is_convertible(Unit::Kilogram, Unit::Ounce));
/// assert!(!is_convertible(Unit::Gram, Unit::Liter));
/// ```
pub fn is_convertible(from: Unit, to: Unit) -> bool {
    from.family() == to.family()
}

/// Convert `value` from one unit to another unit of the same family.
///
/// # Returns
///
/// The converted value, or `ConversionError::IncompatibleUnits` when the units belong
/// to different families. A wrong number is never returned for a cross-family request.
///
/// # Example
///
/// ```rust
/// use recipe_costing_sdk::convert::convert_units;
/// use recipe_costing_sdk::models::Unit;
///
/// assert_eq!(convert_units(Unit::Kilogram, Unit::Gram, 1.5).unwrap(), 1500.0);
/// assert!(convert_units(Unit::Cup, Unit::Gram, 1.0).is_err());
/// ```
pub fn convert_units(from: Unit, to: Unit, value: f64) -> Result<f64, ConversionError> {
    if !is_convertible(from, to) {
        return Err(ConversionError::IncompatibleUnits {
            from,
            to,
            from_family: from.family(),
            to_family: to.family(),
        });
    }
    if !value.is_finite() {
        return Err(ConversionError::NonFiniteValue(value));
    }
    if from == to {
        return Ok(value);
    }

    Ok(value * base_factor(from) / base_factor(to))
}

/// Ratio that turns "per `from`" rates into "per `to`" rates.
///
/// A price of `p` per `from` equals `p * rate_factor(from, to)` per `to`.
pub fn rate_factor(from: Unit, to: Unit) -> Result<f64, ConversionError> {
    convert_units(to, from, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9 * b.abs().max(1.0), "{} != {}", a, b);
    }

    #[test]
    fn converts_within_mass_family() {
        assert_close(convert_units(Unit::Kilogram, Unit::Gram, 2.0).unwrap(), 2000.0);
        assert_close(convert_units(Unit::Pound, Unit::Ounce, 1.0).unwrap(), 16.0);
        assert_close(convert_units(Unit::Gram, Unit::Kilogram, 250.0).unwrap(), 0.25);
    }

    #[test]
    fn converts_within_volume_family() {
        assert_close(convert_units(Unit::Cup, Unit::Milliliter, 2.0).unwrap(), 480.0);
        assert_close(convert_units(Unit::Tablespoon, Unit::Teaspoon, 1.0).unwrap(), 3.0);
        assert_close(convert_units(Unit::Liter, Unit::Cup, 1.2).unwrap(), 5.0);
    }

    #[test]
    fn same_unit_is_identity() {
        assert_eq!(convert_units(Unit::Unit, Unit::Unit, 12.0).unwrap(), 12.0);
    }

    #[test]
    fn refuses_cross_family_conversion() {
        let err = convert_units(Unit::Gram, Unit::Liter, 10.0).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IncompatibleUnit);
        assert!(!is_convertible(Unit::Unit, Unit::Gram));
        assert!(!is_convertible(Unit::Milliliter, Unit::Ounce));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(matches!(
            convert_units(Unit::Gram, Unit::Kilogram, f64::NAN),
            Err(ConversionError::NonFiniteValue(_))
        ));
    }

    #[test]
    fn rate_factor_turns_per_kilogram_into_per_gram() {
        // R$ 8.00 per kilogram is R$ 0.008 per gram
        let per_gram = 8.0 * rate_factor(Unit::Kilogram, Unit::Gram).unwrap();
        assert_close(per_gram, 0.008);
    }

    #[test]
    fn round_trips_every_same_family_pair() {
        for from in Unit::ALL {
            for to in Unit::ALL.into_iter().filter(|u| is_convertible(from, *u)) {
                let value = 123.456;
                let there = convert_units(from, to, value).unwrap();
                let back = convert_units(to, from, there).unwrap();
                assert_close(back, value);
            }
        }
    }
}
