//! Costing configuration file support
//!
//! Handles parsing of `.recipe-costing.toml` configuration files and
//! environment variable overrides.

use crate::costing::DEFAULT_MAX_DEPTH;
use crate::models::{DEFAULT_LABOR_HOUR_RATE, DEFAULT_MARGIN, RecipeCategory, RecipeSettings};
use crate::scaling::PreparationTimePolicy;
use crate::validation::validate_recipe_settings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".recipe-costing.toml";

/// Environment variable for the labor rate
pub const ENV_LABOR_HOUR_RATE: &str = "RECIPE_COSTING_LABOR_HOUR_RATE";

/// Environment variable for the default margin
pub const ENV_DEFAULT_MARGIN: &str = "RECIPE_COSTING_DEFAULT_MARGIN";

/// Environment variable for the sub-recipe depth limit
pub const ENV_MAX_DEPTH: &str = "RECIPE_COSTING_MAX_DEPTH";

/// Environment variable for the preparation time scaling policy
pub const ENV_PREPARATION_TIME: &str = "RECIPE_COSTING_PREPARATION_TIME";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("IO error: {0}")]
    IoError(String),

    /// The file is not valid configuration TOML
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A value parsed but is out of range or unknown
    #[error("Invalid config value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Pricing settings section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsSection {
    /// R$ per hour of preparation time
    #[serde(default = "default_labor_hour_rate")]
    pub labor_hour_rate: f64,

    /// Margin as a fraction (0.5 = 50%)
    #[serde(default = "default_margin")]
    pub default_margin: f64,

    /// Per-category margins keyed by category name
    #[serde(default = "default_margins_by_category")]
    pub margins_by_category: BTreeMap<String, f64>,
}

fn default_labor_hour_rate() -> f64 {
    DEFAULT_LABOR_HOUR_RATE
}

fn default_margin() -> f64 {
    DEFAULT_MARGIN
}

fn default_margins_by_category() -> BTreeMap<String, f64> {
    RecipeSettings::default()
        .margins_by_category
        .into_iter()
        .map(|(category, margin)| (category.as_str().to_string(), margin))
        .collect()
}

impl Default for SettingsSection {
    fn default() -> Self {
        Self {
            labor_hour_rate: default_labor_hour_rate(),
            default_margin: default_margin(),
            margins_by_category: default_margins_by_category(),
        }
    }
}

/// Cost engine section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostingSection {
    /// Deepest sub-recipe nesting the engine will follow
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for CostingSection {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

/// Scaling section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ScalingSection {
    #[serde(default)]
    pub preparation_time: PreparationTimePolicy,
}

/// Main configuration structure
///
/// Represents the `.recipe-costing.toml` configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CostingConfig {
    #[serde(default)]
    pub settings: SettingsSection,

    #[serde(default)]
    pub costing: CostingSection,

    #[serde(default)]
    pub scaling: ScalingSection,
}

impl CostingConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a directory
    ///
    /// Looks for `.recipe-costing.toml` in the directory.
    /// Falls back to defaults if not found.
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let config_path = dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(format!("Failed to read config: {}", e)))?;
            Self::parse(&content)?
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a directory
    pub fn save(&self, dir: &Path) -> ConfigResult<()> {
        let config_path = dir.join(CONFIG_FILENAME);
        let content = self.to_toml()?;

        std::fs::write(&config_path, content)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Values that fail to parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rate) = lookup(ENV_LABOR_HOUR_RATE)
            && let Ok(rate) = rate.trim().parse::<f64>()
        {
            self.settings.labor_hour_rate = rate;
        }

        if let Some(margin) = lookup(ENV_DEFAULT_MARGIN)
            && let Ok(margin) = margin.trim().parse::<f64>()
        {
            self.settings.default_margin = margin;
        }

        if let Some(depth) = lookup(ENV_MAX_DEPTH)
            && let Ok(depth) = depth.trim().parse::<usize>()
        {
            self.costing.max_depth = depth;
        }

        if let Some(policy) = lookup(ENV_PREPARATION_TIME)
            && let Ok(policy) = policy.parse::<PreparationTimePolicy>()
        {
            self.scaling.preparation_time = policy;
        }
    }

    /// Build validated pricing settings from the `[settings]` section
    pub fn to_settings(&self) -> ConfigResult<RecipeSettings> {
        let mut settings = RecipeSettings::new(
            self.settings.labor_hour_rate,
            self.settings.default_margin,
        );
        for (key, margin) in &self.settings.margins_by_category {
            let category: RecipeCategory =
                key.parse().map_err(|message| ConfigError::InvalidValue {
                    key: format!("settings.margins_by_category.{}", key),
                    message,
                })?;
            settings.margins_by_category.insert(category, *margin);
        }

        let result = validate_recipe_settings(&settings);
        if let Some(error) = result.errors.first() {
            return Err(ConfigError::InvalidValue {
                key: error.field.clone(),
                message: error.message.clone(),
            });
        }
        Ok(settings)
    }

    /// Check if configuration exists in a directory
    pub fn exists(dir: &Path) -> bool {
        dir.join(CONFIG_FILENAME).exists()
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Recipe Costing Configuration

[settings]
# R$ per hour of preparation time
labor_hour_rate = 25.0

# Margin over cost per serving, as a fraction (0.5 = 50%)
default_margin = 0.5

# Margins by recipe category; categories not listed use default_margin
[settings.margins_by_category]
cakes = 0.5
cupcakes = 0.8
cookies = 1.0
breads = 0.2
pastries = 0.6
icings = 2.0
fillings = 1.5
other = 0.5

[costing]
# Deepest sub-recipe nesting followed when costing
max_depth = 16

[scaling]
# Step durations when scaling: "fixed" (default) or "proportional"
preparation_time = "fixed"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = CostingConfig::new();
        assert_eq!(config.settings.labor_hour_rate, DEFAULT_LABOR_HOUR_RATE);
        assert_eq!(config.settings.default_margin, DEFAULT_MARGIN);
        assert_eq!(config.settings.margins_by_category.get("icings"), Some(&2.0));
        assert_eq!(config.costing.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.scaling.preparation_time, PreparationTimePolicy::Fixed);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[settings]
labor_hour_rate = 60.0
default_margin = 0.3

[settings.margins_by_category]
breads = 0.25

[scaling]
preparation_time = "proportional"
"#;
        let config = CostingConfig::parse(toml).unwrap();
        assert_eq!(config.settings.labor_hour_rate, 60.0);
        assert_eq!(config.settings.margins_by_category.len(), 1);
        assert_eq!(config.costing.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(
            config.scaling.preparation_time,
            PreparationTimePolicy::Proportional
        );

        let settings = config.to_settings().unwrap();
        assert_eq!(settings.margin_for(RecipeCategory::Breads), 0.25);
        assert_eq!(settings.margin_for(RecipeCategory::Cakes), 0.3);
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(matches!(
            CostingConfig::parse("[settings\nlabor"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let toml = r#"
[settings.margins_by_category]
muffins = 0.4
"#;
        let config = CostingConfig::parse(toml).unwrap();
        let err = config.to_settings().unwrap_err();
        assert!(err.to_string().contains("settings.margins_by_category.muffins"));
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let mut config = CostingConfig::new();
        config.settings.labor_hour_rate = -1.0;
        assert!(matches!(
            config.to_settings(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut config = CostingConfig::new();
        config.costing.max_depth = 4;

        config.save(dir.path()).unwrap();
        assert!(CostingConfig::exists(dir.path()));

        let loaded = CostingConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.costing.max_depth, 4);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let loaded = CostingConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.settings, SettingsSection::default());
    }

    #[test]
    fn test_overrides() {
        let mut config = CostingConfig::new();
        config.apply_overrides(|key| match key {
            ENV_LABOR_HOUR_RATE => Some("40".to_string()),
            ENV_MAX_DEPTH => Some("not a number".to_string()),
            ENV_PREPARATION_TIME => Some("Proportional".to_string()),
            _ => None,
        });
        assert_eq!(config.settings.labor_hour_rate, 40.0);
        assert_eq!(config.costing.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(
            config.scaling.preparation_time,
            PreparationTimePolicy::Proportional
        );
    }

    #[test]
    fn test_sample_config_is_valid() {
        let config = CostingConfig::parse(sample_config()).unwrap();
        assert_eq!(config, CostingConfig::default());
        assert!(config.to_settings().is_ok());
    }
}
