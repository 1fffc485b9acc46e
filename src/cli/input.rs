//! Input loading and output printing for CLI commands

use crate::cli::error::CliError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Document format, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// YAML for `.yaml`/`.yml`, JSON for everything else including stdin
    pub fn from_input(input: &str) -> Self {
        if input == "-" {
            return InputFormat::Json;
        }
        match Path::new(input)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => InputFormat::Yaml,
            _ => InputFormat::Json,
        }
    }
}

/// Load input content from file or stdin
pub fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        if !path.exists() {
            return Err(CliError::FileNotFound(path));
        }
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Parse document content in the given format
pub fn parse_content<T: DeserializeOwned>(
    content: &str,
    format: InputFormat,
    source: &str,
) -> Result<T, CliError> {
    match format {
        InputFormat::Json => serde_json::from_str(content)
            .map_err(|e| CliError::ParseError(source.to_string(), e.to_string())),
        InputFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| CliError::ParseError(source.to_string(), e.to_string())),
    }
}

/// Load and parse a JSON or YAML document
pub fn read_document<T: DeserializeOwned>(input: &str) -> Result<T, CliError> {
    let content = load_input(input)?;
    parse_content(&content, InputFormat::from_input(input), input)
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::SerializationError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
