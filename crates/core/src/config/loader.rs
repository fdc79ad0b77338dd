//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result, ResultExt};
use std::path::Path;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "RECIPE_FINDER_CONFIG";

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults.
    ///
    /// An explicit path must exist; without one the standard locations are
    /// searched and defaults are used when nothing is found.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !Path::new(p).exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_string()),
            None => find_config_file(),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        schema
            .search
            .validate()
            .map_err(Error::from)
            .context(format!(
                "In [search] of {}",
                config_path.as_deref().unwrap_or("built-in defaults")
            ))?;

        tracing::debug!(path = ?config_path, "Configuration loaded");

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let schema: ConfigSchema = toml::from_str(content)?;
        schema.search.validate()?;
        Ok(Self { schema, path: None })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        ".recipe-finder.toml",
        "recipe-finder.toml",
        ".config/recipe-finder.toml",
    ];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }

    None
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::new(ErrorCode::ConfigError, format!("Failed to read config file {}: {}", path, e))
            .with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(ErrorCode::ConfigParseError, format!("Failed to parse config file {}: {}", path, e))
            .with_source(e)
    })
}
