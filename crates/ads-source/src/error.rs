//! Error types for document retrieval

use std::path::PathBuf;

/// Errors raised while retrieving a scorecard document
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Nothing exists at the location
    #[error("document not found at {location}")]
    NotFound { location: String },

    /// Server answered with a non-success status
    #[error("{location} answered with status {status}")]
    Status { location: String, status: u16 },

    /// Connection or protocol failure
    #[error("transport error fetching {location}: {message}")]
    Transport { location: String, message: String },

    /// Retrieval did not finish in time
    #[error("timed out fetching {location} after {after_ms}ms")]
    Timeout { location: String, after_ms: u64 },

    /// IO error reading a local document
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Location string could not be interpreted
    #[error("invalid source location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },
}

impl SourceError {
    /// Create not-found error
    pub fn not_found(location: impl Into<String>) -> Self {
        Self::NotFound {
            location: location.into(),
        }
    }

    /// Create transport error
    pub fn transport(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create invalid-location error
    pub fn invalid_location(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLocation {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Whether the document simply does not exist
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the failure was a timeout
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
