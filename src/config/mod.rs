//! Configuration management for querysh.
//!
//! Configuration is loaded from a TOML file and overridden by command-line
//! arguments. Precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Display configuration.
    #[serde(default)]
    pub display: DisplayConfig,

    /// History configuration.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Suggestion behavior.
    #[serde(default)]
    pub suggestions: SuggestionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Display and output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Enable colored output.
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Enable syntax highlighting in the console.
    #[serde(default = "default_syntax_highlighting")]
    pub syntax_highlighting: bool,

    /// Show the suggestion detail column in the completion menu.
    #[serde(default = "default_show_details")]
    pub show_details: bool,
}

/// Command history configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries.
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file.
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence.
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Suggestion behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Maximum suggestions shown per request (0 = unlimited).
    #[serde(default = "default_suggestion_limit")]
    pub limit: usize,

    /// Drop a candidate that exactly matches the typed prefix, so
    /// completion cycles through the alternatives instead.
    #[serde(default = "default_skip_exact_match")]
    pub skip_exact_match: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace).
    #[serde(default = "default_log_level")]
    pub level: LogLevel,
}

/// Log level options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The `tracing_subscriber` filter directive for this level.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// Default value functions
fn default_color_output() -> bool {
    true
}

fn default_syntax_highlighting() -> bool {
    true
}

fn default_show_details() -> bool {
    true
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("querysh")
        .join("history.txt")
}

fn default_persist_history() -> bool {
    true
}

fn default_suggestion_limit() -> usize {
    50
}

fn default_skip_exact_match() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: default_color_output(),
            syntax_highlighting: default_syntax_highlighting(),
            show_details: default_show_details(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            limit: default_suggestion_limit(),
            skip_exact_match: default_skip_exact_match(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Default config file location, under the platform config directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("querysh")
            .join("config.toml")
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        Ok(config)
    }

    /// Load configuration: the given file if any, else the default path if
    /// present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::load_from_file(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }
}
