//! The document source seam

use crate::error::SourceError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

/// Default time allowed for one retrieval
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Something a scorecard document can be retrieved from
///
/// Every call to [`DocumentSource::fetch`] must return a fresh copy; sources
/// never serve a cached body.
#[async_trait]
pub trait DocumentSource: Send + Sync + Debug {
    /// Retrieve the raw document body
    async fn fetch(&self) -> Result<Vec<u8>, SourceError>;

    /// Human-readable location, used in logs
    fn describe(&self) -> String;
}

/// Options shared by the concrete sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Time allowed for one retrieval
    pub timeout: Duration,
}

impl FetchOptions {
    /// With retrieval timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}
