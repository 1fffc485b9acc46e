//! CLI command implementations

pub mod config;
pub mod cost;
pub mod cycles;
pub mod scale;
pub mod validate;
