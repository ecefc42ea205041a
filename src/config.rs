//! Configuration module for Corkboard.
//!
//! The configuration is read once at startup and handed to whatever needs it
//! by reference. There is no process-wide settings object.

use serde::Deserialize;
use std::path::Path;

use crate::{CorkboardError, Result};

/// Environment variable that overrides `database.path`.
pub const DATABASE_PATH_ENV: &str = "CORKBOARD_DATABASE_PATH";

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/corkboard.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/corkboard.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Board behaviour configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Title given to boards created without one.
    #[serde(default = "default_board_title")]
    pub default_title: String,
    /// Maximum board title length in characters.
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
}

fn default_board_title() -> String {
    "Untitled board".to_string()
}

fn default_max_title_length() -> usize {
    100
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_title: default_board_title(),
            max_title_length: default_max_title_length(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Board configuration.
    #[serde(default)]
    pub board: BoardConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CorkboardError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CorkboardError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CORKBOARD_DATABASE_PATH`: Override the database file path
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(DATABASE_PATH_ENV) {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - `board.max_title_length` is zero
    /// - `board.default_title` is blank or longer than `max_title_length`
    pub fn validate(&self) -> Result<()> {
        if self.board.max_title_length == 0 {
            return Err(CorkboardError::Config(
                "board.max_title_length must be greater than zero".to_string(),
            ));
        }
        let default_title = self.board.default_title.trim();
        if default_title.is_empty() {
            return Err(CorkboardError::Config(
                "board.default_title must not be empty".to_string(),
            ));
        }
        if default_title.chars().count() > self.board.max_title_length {
            return Err(CorkboardError::Config(format!(
                "board.default_title exceeds {} characters",
                self.board.max_title_length
            )));
        }
        Ok(())
    }
}
