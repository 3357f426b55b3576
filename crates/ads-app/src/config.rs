//! Application configuration
//!
//! Layering, lowest to highest: built-in defaults, a config file (TOML, YAML
//! or JSON, chosen by extension), then `ADS_*` environment variables.

use crate::error::ConfigError;
use ads_scorecard::TierThresholds;
use ads_source::{FetchOptions, SourceError, SourceLocation};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default document location
pub const DEFAULT_SOURCE: &str = "demo/data/scorecard-demo.json";

/// Default retrieval timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Environment variable names
pub mod env {
    /// Document URL or path
    pub const SOURCE: &str = "ADS_SOURCE";
    /// Export directory
    pub const EXPORT_DIR: &str = "ADS_EXPORT_DIR";
    /// Retrieval timeout, seconds
    pub const FETCH_TIMEOUT_SECS: &str = "ADS_FETCH_TIMEOUT_SECS";
    /// Log filter directive
    pub const LOG_LEVEL: &str = "ADS_LOG_LEVEL";
    /// JSON log output (1/true/yes or 0/false/no)
    pub const LOG_JSON: &str = "ADS_LOG_JSON";
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Scorecard app configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Document URL or file path
    pub source: String,
    /// Directory the export is written to
    pub export_dir: PathBuf,
    /// Retrieval timeout in seconds
    pub fetch_timeout_secs: u64,
    /// Tier bands for the summary
    pub tiers: TierThresholds,
    /// Logging
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            export_dir: PathBuf::from("."),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            tiers: TierThresholds::default(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With document source
    #[inline]
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// With export directory
    #[inline]
    #[must_use]
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// With retrieval timeout
    #[inline]
    #[must_use]
    pub fn with_fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    /// With tier thresholds
    #[inline]
    #[must_use]
    pub fn with_tiers(mut self, tiers: TierThresholds) -> Self {
        self.tiers = tiers;
        self
    }

    /// Parse a config file, format chosen by extension
    ///
    /// # Errors
    /// IO failure, unknown extension, or a syntax/shape error in the file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let config = match extension.as_str() {
            "toml" => toml::from_str(&text)?,
            "yaml" | "yml" => serde_yaml::from_str(&text)?,
            "json" => serde_json::from_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        Ok(config)
    }

    /// Defaults or `path`, then process environment, then validation
    ///
    /// # Errors
    /// Any [`ConfigError`] from reading, overriding or validating.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        config.apply_process_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `ADS_*` overrides using `lookup` to read variables
    ///
    /// # Errors
    /// A numeric or boolean variable that does not parse.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup(env::SOURCE) {
            self.source = source;
        }
        if let Some(dir) = lookup(env::EXPORT_DIR) {
            self.export_dir = PathBuf::from(dir);
        }
        if let Some(secs) = lookup(env::FETCH_TIMEOUT_SECS) {
            self.fetch_timeout_secs = secs.trim().parse().map_err(|_| {
                ConfigError::invalid(
                    env::FETCH_TIMEOUT_SECS,
                    format!("'{secs}' is not a whole number of seconds"),
                )
            })?;
        }
        if let Some(level) = lookup(env::LOG_LEVEL) {
            self.log.level = level;
        }
        if let Some(json) = lookup(env::LOG_JSON) {
            self.log.json = parse_bool(&json).ok_or_else(|| {
                ConfigError::invalid(env::LOG_JSON, format!("'{json}' is not a boolean"))
            })?;
        }
        Ok(())
    }

    /// Apply overrides from the process environment
    ///
    /// # Errors
    /// See [`apply_env`](Self::apply_env).
    pub fn apply_process_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Empty source, zero timeout, or tier thresholds out of order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.trim().is_empty() {
            return Err(ConfigError::invalid("source", "must not be empty"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::invalid("fetch_timeout_secs", "must be greater than zero"));
        }
        if !self.tiers.is_ordered() {
            return Err(ConfigError::invalid("tiers", "thresholds must satisfy bronze <= silver <= gold"));
        }
        Ok(())
    }

    /// Retrieval timeout
    #[inline]
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Options for opening the configured source
    #[inline]
    #[must_use]
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::default().with_timeout(self.fetch_timeout())
    }

    /// Parsed document location
    ///
    /// # Errors
    /// The source string is not a usable location.
    pub fn source_location(&self) -> Result<SourceLocation, SourceError> {
        self.source.parse()
    }

    /// Effective configuration as TOML
    ///
    /// # Errors
    /// Serialization failure.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
