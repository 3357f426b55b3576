//! Error types for the scorecard app
//!
//! Load failures never leave the controller: they are logged and shown as a
//! single status message. The types below exist so the detail can be logged
//! and tested.

use ads_scorecard::DocumentError;
use ads_source::SourceError;
use std::path::PathBuf;

/// User-facing failure kinds; both show the same status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadFailure {
    /// Document could not be retrieved
    Retrieval,
    /// Document could not be interpreted
    Parse,
}

impl LoadFailure {
    /// Metric/log label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Retrieval => "retrieval",
            Self::Parse => "parse",
        }
    }
}

/// Why a load failed, with detail for logs
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Fetch failed, timed out, or returned a non-success status
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] SourceError),

    /// Body is not a valid scorecard
    #[error("parse failed: {0}")]
    Parse(#[from] DocumentError),
}

impl LoadError {
    /// Collapse to the user-facing kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> LoadFailure {
        match self {
            Self::Retrieval(_) => LoadFailure::Retrieval,
            Self::Parse(_) => LoadFailure::Parse,
        }
    }
}

/// Errors from the host save mechanism
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// IO error writing the export
    #[error("io error writing {path}: {source}")]
    Io {
        /// Target file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Host refused or failed the save
    #[error("save rejected: {0}")]
    Rejected(String),
}

impl SaveError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("io error reading {path}: {source}")]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or shape error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML syntax or shape error
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON syntax or shape error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Could not render the effective config as TOML
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// File extension not recognized
    #[error("unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    /// Value out of range
    #[error("invalid config value {key}: {reason}")]
    Invalid {
        /// Offending key
        key: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Create invalid-value error
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Top-level app error
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Export could not be saved
    #[error("save error: {0}")]
    Save(#[from] SaveError),

    /// Configuration could not be loaded
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Configured source could not be opened
    #[error("source error: {0}")]
    Source(#[from] SourceError),
}
