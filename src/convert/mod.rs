//! Unit conversion module
//!
//! Provides the static conversion table between mass, volume and count units.

pub mod units;

pub use units::{ConversionError, base_factor, convert_units, is_convertible, rate_factor};
