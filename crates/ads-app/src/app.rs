//! Load/export controller
//!
//! [`ScorecardApp`] is what a UI binds its two triggers to. It owns the
//! source, the saver and the renderer; the renderer sits behind a
//! `parking_lot::Mutex` that is only ever locked between awaits.
//!
//! # Workflow
//! 1. `on_trigger_load` claims the load control (inert if already claimed)
//! 2. The document is fetched under a timeout and parsed
//! 3. Summary, sections and evidence render under one lock
//! 4. `on_trigger_export` builds the CSV and hands it to the saver

use crate::config::AppConfig;
use crate::error::{AppError, LoadError, LoadFailure};
use crate::page::Page;
use crate::renderer::ScorecardRenderer;
use crate::saver::{DirectorySaver, FileSaver, SavedFile};
use crate::telemetry::{EXPORTS_TOTAL, LOADS_TOTAL};
use ads_scorecard::{EvidenceItem, ScorecardDocument, TierThresholds};
use ads_source::{DocumentSource, SourceError, DEFAULT_FETCH_TIMEOUT};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use ulid::Ulid;

/// Identifier of one load attempt (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadId(pub Ulid);

impl LoadId {
    /// Generate new load ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for LoadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a load trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Document rendered
    Loaded {
        /// Attempt identifier
        load_id: LoadId,
        /// Evidence rows rendered
        evidence_count: usize,
    },
    /// Retrieval or parsing failed; prior views kept
    Failed {
        /// Attempt identifier
        load_id: LoadId,
        /// Failure kind
        failure: LoadFailure,
    },
    /// Another load was in flight
    Ignored,
}

impl LoadOutcome {
    /// Whether a document was rendered
    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Failure kind, if the load failed
    #[inline]
    #[must_use]
    pub fn failure(&self) -> Option<LoadFailure> {
        match self {
            Self::Failed { failure, .. } => Some(*failure),
            _ => None,
        }
    }
}

/// Result of an export trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// File handed to the saver
    Saved(SavedFile),
    /// No evidence to export
    Skipped,
}

/// Releases the load control when a load ends, including when the
/// load future is dropped before finishing
struct LoadGuard<'a> {
    renderer: &'a Mutex<ScorecardRenderer>,
    armed: bool,
}

impl<'a> LoadGuard<'a> {
    fn new(renderer: &'a Mutex<ScorecardRenderer>) -> Self {
        Self {
            renderer,
            armed: true,
        }
    }

    fn complete(&mut self, document: &ScorecardDocument) {
        self.armed = false;
        self.renderer.lock().complete_load(document);
    }

    fn fail(&mut self) {
        self.armed = false;
        self.renderer.lock().fail_load();
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("scorecard load cancelled before completion");
            metrics::counter!(LOADS_TOTAL, "outcome" => "cancelled").increment(1);
            self.renderer.lock().fail_load();
        }
    }
}

/// Scorecard load/export controller
pub struct ScorecardApp {
    source: Arc<dyn DocumentSource>,
    saver: Arc<dyn FileSaver>,
    renderer: Mutex<ScorecardRenderer>,
    fetch_timeout: Duration,
}

impl ScorecardApp {
    /// Create a controller with default tiers and timeout
    #[must_use]
    pub fn new(source: Arc<dyn DocumentSource>, saver: Arc<dyn FileSaver>) -> Self {
        Self {
            source,
            saver,
            renderer: Mutex::new(ScorecardRenderer::default()),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// With tier thresholds
    #[must_use]
    pub fn with_tiers(mut self, tiers: TierThresholds) -> Self {
        self.renderer = Mutex::new(ScorecardRenderer::new(tiers));
        self
    }

    /// With retrieval timeout
    #[inline]
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Build from configuration: configured source, directory saver
    ///
    /// # Errors
    /// The configured source is not a usable location.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let source = config.source_location()?.open(&config.fetch_options())?;
        let saver = DirectorySaver::new(config.export_dir.clone());
        Ok(Self::new(Arc::from(source), Arc::new(saver))
            .with_tiers(config.tiers)
            .with_fetch_timeout(config.fetch_timeout()))
    }

    /// Snapshot of the page
    #[must_use]
    pub fn page(&self) -> Page {
        self.renderer.lock().page().clone()
    }

    /// Evidence the next export is built from
    #[must_use]
    pub fn current_evidence(&self) -> Arc<[EvidenceItem]> {
        self.renderer.lock().current_evidence()
    }

    /// Configured source
    #[inline]
    #[must_use]
    pub fn source(&self) -> &dyn DocumentSource {
        self.source.as_ref()
    }

    /// Load trigger: load from the configured source
    pub async fn on_trigger_load(&self) -> LoadOutcome {
        self.load_and_render(self.source.as_ref()).await
    }

    /// Retrieve, parse and render a document from `source`
    ///
    /// Never fails: errors are logged, shown as the load-failed status and
    /// reported in the outcome. Returns [`LoadOutcome::Ignored`] without
    /// fetching while another load holds the load control.
    pub async fn load_and_render(&self, source: &dyn DocumentSource) -> LoadOutcome {
        let started = self.renderer.lock().begin_load();
        if !started {
            tracing::debug!("load already in flight, ignoring trigger");
            metrics::counter!(LOADS_TOTAL, "outcome" => "ignored").increment(1);
            return LoadOutcome::Ignored;
        }

        let mut guard = LoadGuard::new(&self.renderer);
        let load_id = LoadId::new();
        let span = tracing::info_span!("scorecard_load", %load_id, source = %source.describe());

        async move {
            match self.fetch_document(source).await {
                Ok(document) => {
                    let evidence_count = document.evidence.len();
                    guard.complete(&document);
                    tracing::info!(
                        score_run_id = %document.score_run_id,
                        sections = document.sections.len(),
                        evidence = evidence_count,
                        "scorecard loaded"
                    );
                    metrics::counter!(LOADS_TOTAL, "outcome" => "loaded").increment(1);
                    LoadOutcome::Loaded {
                        load_id,
                        evidence_count,
                    }
                }
                Err(err) => {
                    let failure = err.kind();
                    tracing::warn!(error = %err, kind = failure.label(), "scorecard load failed");
                    guard.fail();
                    metrics::counter!(LOADS_TOTAL, "outcome" => failure.label()).increment(1);
                    LoadOutcome::Failed { load_id, failure }
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn fetch_document(&self, source: &dyn DocumentSource) -> Result<ScorecardDocument, LoadError> {
        let body = tokio::time::timeout(self.fetch_timeout, source.fetch())
            .await
            .map_err(|_| SourceError::Timeout {
                location: source.describe(),
                after_ms: u64::try_from(self.fetch_timeout.as_millis()).unwrap_or(u64::MAX),
            })??;
        tracing::debug!(bytes = body.len(), "fetched document");
        Ok(ScorecardDocument::from_json_slice(&body)?)
    }

    /// Export trigger: build the CSV and save it
    ///
    /// # Errors
    /// [`AppError::Save`] when the saver fails; the page shows the save
    /// failure status.
    pub async fn on_trigger_export(&self) -> Result<ExportOutcome, AppError> {
        let file = self.renderer.lock().export_csv();
        let Some(file) = file else {
            tracing::debug!("no evidence to export");
            metrics::counter!(EXPORTS_TOTAL, "outcome" => "skipped").increment(1);
            return Ok(ExportOutcome::Skipped);
        };

        match self.saver.save(&file).await {
            Ok(saved) => {
                tracing::info!(
                    location = %saved.location,
                    bytes = saved.bytes,
                    sha256 = %saved.sha256,
                    "export saved"
                );
                metrics::counter!(EXPORTS_TOTAL, "outcome" => "saved").increment(1);
                Ok(ExportOutcome::Saved(saved))
            }
            Err(err) => {
                tracing::warn!(error = %err, filename = %file.filename, "export save failed");
                self.renderer.lock().mark_save_failed();
                metrics::counter!(EXPORTS_TOTAL, "outcome" => "failed").increment(1);
                Err(err.into())
            }
        }
    }
}

impl fmt::Debug for ScorecardApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScorecardApp")
            .field("source", &self.source.describe())
            .field("fetch_timeout", &self.fetch_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SaveError;
    use crate::page::StatusMessage;
    use crate::saver::MemorySaver;
    use ads_scorecard::ExportFile;
    use ads_source::MemorySource;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        Saver {}

        #[async_trait]
        impl FileSaver for Saver {
            async fn save(&self, file: &ExportFile) -> Result<SavedFile, SaveError>;
        }
    }

    const DOCUMENT: &str = r#"{
        "score_run_id": "run-9",
        "generated_at": "2024-05-01T14:03:09Z",
        "candidate": {"name": "Ada", "cohort": "A"},
        "assessment": {"title": "Algebra", "version": "2"},
        "totals": {"total_score": 17, "max_score": 20},
        "evidence": [
            {"item_id": "b2", "section": "S", "score": 4, "max_score": 5, "response": "x", "evidence": "y"},
            {"item_id": "a1", "section": "S", "score": 5, "max_score": 5, "response": "x", "evidence": "y"}
        ]
    }"#;

    fn app_with(saver: Arc<dyn FileSaver>) -> ScorecardApp {
        ScorecardApp::new(Arc::new(MemorySource::new("doc", DOCUMENT)), saver)
    }

    #[tokio::test]
    async fn load_then_export() {
        let saver = Arc::new(MemorySaver::new());
        let app = app_with(saver.clone());

        let outcome = app.on_trigger_load().await;
        assert!(matches!(outcome, LoadOutcome::Loaded { evidence_count: 2, .. }));

        let page = app.page();
        assert_eq!(page.status, StatusMessage::Loaded);
        assert_eq!(page.summary.as_ref().unwrap().percent_line, "85% overall");
        assert!(page.export_control.is_enabled());

        let ExportOutcome::Saved(saved) = app.on_trigger_export().await.unwrap() else {
            panic!("expected a saved export");
        };
        let file = saver.last().unwrap();
        assert_eq!(saved.sha256, file.sha256_hex());
        let lines: Vec<&str> = file.text().lines().collect();
        assert!(lines[1].starts_with("\"a1\""));
    }

    #[tokio::test]
    async fn export_before_load_is_skipped() {
        let mut saver = MockSaver::new();
        saver.expect_save().never();
        let app = app_with(Arc::new(saver));

        assert_eq!(app.on_trigger_export().await.unwrap(), ExportOutcome::Skipped);
        assert_eq!(app.page().status, StatusMessage::Idle);
    }

    #[tokio::test]
    async fn save_failure_sets_status() {
        let mut saver = MockSaver::new();
        saver
            .expect_save()
            .times(1)
            .returning(|_| Err(SaveError::Rejected("read-only host".to_string())));
        let app = app_with(Arc::new(saver));

        app.on_trigger_load().await;
        let err = app.on_trigger_export().await.unwrap_err();
        assert!(matches!(err, AppError::Save(_)));
        assert_eq!(app.page().status, StatusMessage::SaveFailed);
        assert_eq!(app.page().status.text(), "Unable to save export.");
    }

    #[tokio::test]
    async fn saver_receives_csv_metadata() {
        let mut saver = MockSaver::new();
        saver
            .expect_save()
            .withf(|file| file.filename == "scorecard-demo.csv" && file.mime == "text/csv")
            .times(1)
            .returning(|file| {
                Ok(SavedFile {
                    location: "mock".to_string(),
                    bytes: file.bytes.len(),
                    sha256: file.sha256_hex(),
                })
            });
        let app = app_with(Arc::new(saver));

        app.on_trigger_load().await;
        assert!(matches!(app.on_trigger_export().await, Ok(ExportOutcome::Saved(_))));
    }

    #[tokio::test]
    async fn parse_failure_is_reported() {
        let app = ScorecardApp::new(
            Arc::new(MemorySource::new("bad", "{not json")),
            Arc::new(MemorySaver::new()),
        );

        let outcome = app.on_trigger_load().await;
        assert_eq!(outcome.failure(), Some(LoadFailure::Parse));
        let page = app.page();
        assert_eq!(page.status, StatusMessage::LoadFailed);
        assert!(page.load_control.is_enabled());
        assert!(!page.has_content());
    }

    #[test]
    fn from_config_uses_file_source() {
        let config = AppConfig::default()
            .with_source("data/scorecard.json")
            .with_fetch_timeout_secs(3);
        let app = ScorecardApp::from_config(&config).unwrap();
        assert_eq!(app.source().describe(), "data/scorecard.json");
        assert_eq!(app.fetch_timeout, Duration::from_secs(3));
    }

    #[test]
    fn load_ids_are_unique() {
        assert_ne!(LoadId::new(), LoadId::new());
    }
}
