//! Command-line interface support for `recipe-costing-cli`

pub mod commands;
pub mod error;
pub mod input;
