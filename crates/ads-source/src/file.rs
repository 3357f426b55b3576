//! Local file document source

use crate::error::SourceError;
use crate::source::DocumentSource;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads the document from disk on every fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Document path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        tokio::fs::read(&self.path).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                SourceError::not_found(self.path.display().to_string())
            } else {
                SourceError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
