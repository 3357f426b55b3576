//! Host file-save mechanism
//!
//! The renderer only produces an [`ExportFile`]; getting it onto disk (or a
//! browser download, or a test buffer) is the host's job behind
//! [`FileSaver`].

use crate::error::SaveError;
use ads_scorecard::ExportFile;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::PathBuf;

/// Where a saved export ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// Path or host-specific location
    pub location: String,
    /// Bytes written
    pub bytes: usize,
    /// SHA-256 of the contents, hex
    pub sha256: String,
}

impl SavedFile {
    fn describe(location: impl Into<String>, file: &ExportFile) -> Self {
        Self {
            location: location.into(),
            bytes: file.bytes.len(),
            sha256: file.sha256_hex(),
        }
    }
}

/// Saves export files on behalf of the host
#[async_trait]
pub trait FileSaver: Send + Sync {
    /// Persist `file` using its suggested name and MIME type
    async fn save(&self, file: &ExportFile) -> Result<SavedFile, SaveError>;
}

/// Writes exports into a directory, creating it when missing
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    /// Save into `dir`
    #[inline]
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[async_trait]
impl FileSaver for DirectorySaver {
    #[tracing::instrument(skip_all, fields(dir = %self.dir.display(), filename = %file.filename))]
    async fn save(&self, file: &ExportFile) -> Result<SavedFile, SaveError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| SaveError::io_error(&self.dir, e))?;

        let path = self.dir.join(&file.filename);
        tokio::fs::write(&path, &file.bytes)
            .await
            .map_err(|e| SaveError::io_error(&path, e))?;

        tracing::debug!(bytes = file.bytes.len(), mime = file.mime, "wrote export");
        Ok(SavedFile::describe(path.display().to_string(), file))
    }
}

/// Keeps saved exports in memory
#[derive(Debug, Default)]
pub struct MemorySaver {
    saved: Mutex<Vec<ExportFile>>,
}

impl MemorySaver {
    /// Create an empty saver
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every file saved so far, oldest first
    #[must_use]
    pub fn saved(&self) -> Vec<ExportFile> {
        self.saved.lock().clone()
    }

    /// Most recent save
    #[must_use]
    pub fn last(&self) -> Option<ExportFile> {
        self.saved.lock().last().cloned()
    }
}

#[async_trait]
impl FileSaver for MemorySaver {
    async fn save(&self, file: &ExportFile) -> Result<SavedFile, SaveError> {
        self.saved.lock().push(file.clone());
        Ok(SavedFile::describe(format!("memory:{}", file.filename), file))
    }
}
