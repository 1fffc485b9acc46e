//! CLI-specific error types

use crate::config::ConfigError;
use crate::models::ErrorCode;
use crate::scaling::ScalingError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read file {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Failed to write file {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("{0}")]
    CircularDependency(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Scaling error: {0}")]
    ScalingError(#[from] ScalingError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CliError {
    /// Error code for failures that map onto the validation taxonomy
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            CliError::ValidationFailed(_) => Some(ErrorCode::Invalid),
            CliError::CircularDependency(_) => Some(ErrorCode::CircularDependency),
            CliError::RecipeNotFound(_) => Some(ErrorCode::Required),
            _ => None,
        }
    }
}
