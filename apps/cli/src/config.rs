//! CLI configuration management
//!
//! Values come from, lowest to highest priority: built-in defaults, an
//! optional JSON config file, environment variables and command line flags.
//! `clap` folds the last two together, so they arrive here as one set of
//! overrides.

use safecap_core::utils::RateUnit;
use safecap_core::MfnTreatment;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: off, trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: text, json")]
    InvalidLogFormat(String),

    #[error("Invalid output format: {0}. Must be one of: text, json")]
    InvalidOutputFormat(String),

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Verbosity of diagnostics on stderr. Parses anything `tracing` accepts,
/// case-insensitively, including `off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct LogLevel(pub LevelFilter);

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(LevelFilter::WARN)
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LevelFilter::from_str(s)
            .map(LogLevel)
            .map_err(|_| ConfigError::InvalidLogLevel(s.to_string()))
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

/// Shape of diagnostic log lines on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

/// Shape of command results on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

/// Resolved CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub log_level: LogLevel,
    pub log_format: LogFormat,
    pub output: OutputFormat,
    /// Unit of discount rates read from scenarios and flags
    pub discount_rate_unit: RateUnit,
    pub mfn_treatment: MfnTreatment,
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse JSON: {}", e)))
    }

    /// Merge with overrides (overrides take precedence)
    pub fn merge_with_overrides(&mut self, overrides: &ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(level) = &overrides.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(format) = &overrides.log_format {
            self.log_format = LogFormat::from_str(format)?;
        }
        if let Some(output) = &overrides.output {
            self.output = OutputFormat::from_str(output)?;
        }
        if let Some(unit) = &overrides.discount_rate_unit {
            self.discount_rate_unit =
                RateUnit::from_str(unit).map_err(|_| ConfigError::InvalidValue {
                    key: "discount_rate_unit",
                    value: unit.clone(),
                })?;
        }
        if let Some(treatment) = &overrides.mfn_treatment {
            self.mfn_treatment =
                MfnTreatment::from_str(treatment).map_err(|_| ConfigError::InvalidValue {
                    key: "mfn_treatment",
                    value: treatment.clone(),
                })?;
        }
        Ok(())
    }
}

/// Flag and environment overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub output: Option<String>,
    pub discount_rate_unit: Option<String>,
    pub mfn_treatment: Option<String>,
}

/// Build configuration from all sources
pub fn build_config(overrides: &ConfigOverrides) -> Result<AppConfig, ConfigError> {
    let mut config = match &overrides.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    config.merge_with_overrides(overrides)?;
    Ok(config)
}
