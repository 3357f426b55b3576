//! In-memory document source

use crate::error::SourceError;
use crate::source::DocumentSource;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Serves a fixed body, for hosts that already hold the document
#[derive(Debug, Clone)]
pub struct MemorySource {
    label: String,
    body: Arc<[u8]>,
    fetches: Arc<AtomicUsize>,
}

impl MemorySource {
    /// Create a source serving `body`
    #[must_use]
    pub fn new(label: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.into(),
            body: Arc::from(body.into()),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times the body has been fetched
    #[inline]
    #[must_use]
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.to_vec())
    }

    fn describe(&self) -> String {
        format!("memory:{}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_body_and_counts() {
        let source = MemorySource::new("demo", "{}");
        assert_eq!(source.fetch().await.unwrap(), b"{}");
        assert_eq!(source.fetch().await.unwrap(), b"{}");
        assert_eq!(source.fetches(), 2);
        assert_eq!(source.describe(), "memory:demo");
    }
}
