// Configuration module for reading Cycle.toml
// Holds the tunables of the light-cycle bot: default search depth, shuffle
// seeding and debug logging.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    #[serde(default)]
    pub rng: RngConfig,
    pub debug: DebugConfig,
}

/// Search constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Depth used when a request carries no maxDepth
    pub default_max_depth: u32,
}

/// Shuffle randomness
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RngConfig {
    /// Fixed seed for every call; fresh entropy per call when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Cycle.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Cycle.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Cycle.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Cycle.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                default_max_depth: 2,
            },
            rng: RngConfig { seed: None },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "light_cycle_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Cycle.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
