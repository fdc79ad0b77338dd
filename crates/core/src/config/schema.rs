//! Configuration schema definitions

use recipe_search::ScoringConfig;
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub search: ScoringConfig,
}

/// General tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Recipe catalog used when none is given on the command line
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Maximum results printed per search (0 = all)
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Log level when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            default_limit: default_limit(),
            log_level: default_log_level(),
        }
    }
}

fn default_limit() -> usize {
    20
}

fn default_log_level() -> String {
    "warn".to_string()
}
