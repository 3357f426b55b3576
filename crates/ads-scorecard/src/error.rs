//! Error types for scorecard documents

/// Errors raised while reading a scorecard document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Body is not JSON, or does not have the scorecard shape
    #[error("malformed scorecard document: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Shape is right but a value is unusable
    #[error("invalid scorecard field {field}: {reason}")]
    Invalid {
        /// Path of the offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

impl DocumentError {
    /// Create invalid-field error
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
