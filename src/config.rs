use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;

use crate::ai::{Difficulty, OracleBackend, OracleConfig};
use crate::error::ConfigError;
use crate::scores::ScoresConfig;

/// Deepest search the Hard oracle may be configured with.
pub const MAX_SEARCH_DEPTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            difficulty: Difficulty::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of off, error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.level.trim()).map_err(|_| {
            ConfigError::Validation(format!(
                "logging.level '{}' is not one of off, error, warn, info, debug, trace",
                self.level
            ))
        })
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub oracle: OracleConfig,
    pub scores: ScoresConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.oracle.medium_depth == 0 {
            return Err(ConfigError::Validation(
                "oracle.medium_depth must be >= 1".into(),
            ));
        }
        if self.oracle.hard_depth == 0 || self.oracle.hard_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "oracle.hard_depth must be in [1, {MAX_SEARCH_DEPTH}]"
            )));
        }
        if self.oracle.medium_depth > self.oracle.hard_depth {
            return Err(ConfigError::Validation(
                "oracle.medium_depth must be <= oracle.hard_depth".into(),
            ));
        }
        if self.oracle.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "oracle.timeout_ms must be > 0".into(),
            ));
        }
        if self.oracle.backend == OracleBackend::Command && self.oracle.command.is_empty() {
            return Err(ConfigError::Validation(
                "oracle.command must be set when oracle.backend = \"command\"".into(),
            ));
        }
        if self.scores.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("scores.path must not be empty".into()));
        }
        self.logging.level_filter()?;

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
