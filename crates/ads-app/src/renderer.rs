//! Scorecard renderer
//!
//! Holds the page and the evidence that backs the export. All methods are
//! synchronous and take `&mut self`; the controller in [`crate::app`]
//! decides when they run and guards them with a lock.

use crate::page::{ControlState, Page, StatusMessage};
use ads_scorecard::{
    export_csv, EvidenceItem, EvidenceView, ExportFile, ScorecardDocument, Section,
    SectionsView, SummaryView, TierThresholds,
};
use std::sync::Arc;

/// Renders documents into a [`Page`] and exports the current evidence
#[derive(Debug, Clone)]
pub struct ScorecardRenderer {
    page: Page,
    current_evidence: Arc<[EvidenceItem]>,
    tiers: TierThresholds,
}

impl ScorecardRenderer {
    /// Create a renderer with the initial page
    #[inline]
    #[must_use]
    pub fn new(tiers: TierThresholds) -> Self {
        Self {
            page: Page::new(),
            current_evidence: Arc::from(Vec::new()),
            tiers,
        }
    }

    /// Current page
    #[inline]
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Evidence the next export is built from
    #[inline]
    #[must_use]
    pub fn current_evidence(&self) -> Arc<[EvidenceItem]> {
        Arc::clone(&self.current_evidence)
    }

    /// Tier thresholds used by the summary
    #[inline]
    #[must_use]
    pub fn tiers(&self) -> &TierThresholds {
        &self.tiers
    }

    /// Start a load if none is in flight
    ///
    /// Returns `false` without touching anything when the load control is
    /// disabled. Otherwise shows the loading status and disables the load
    /// control until [`complete_load`](Self::complete_load) or
    /// [`fail_load`](Self::fail_load).
    pub fn begin_load(&mut self) -> bool {
        if !self.page.load_control.is_enabled() {
            return false;
        }
        self.page.status = StatusMessage::Loading;
        self.page.load_control = ControlState::Disabled;
        true
    }

    /// Render a freshly loaded document and re-enable loading
    pub fn complete_load(&mut self, document: &ScorecardDocument) {
        self.render_summary(document);
        self.render_sections(&document.sections);
        self.render_evidence(Arc::from(document.evidence.as_slice()));
        self.page.status = StatusMessage::Loaded;
        self.page.load_control = ControlState::Enabled;
    }

    /// Record a failed load
    ///
    /// Previously rendered views and the export control keep their state.
    pub fn fail_load(&mut self) {
        self.page.status = StatusMessage::LoadFailed;
        self.page.load_control = ControlState::Enabled;
    }

    /// Replace the summary panel
    pub fn render_summary(&mut self, document: &ScorecardDocument) {
        let summary = SummaryView::from_document(document, &self.tiers);
        tracing::debug!(percent = summary.percent, tier = %summary.tier, "rendered summary");
        self.page.summary = Some(summary);
    }

    /// Replace the sections panel
    pub fn render_sections(&mut self, sections: &[Section]) {
        let view = SectionsView::from_sections(sections);
        tracing::debug!(sections = sections.len(), "rendered sections");
        self.page.sections = Some(view);
    }

    /// Replace the evidence table and the export source
    ///
    /// The export control is enabled iff `evidence` is non-empty.
    pub fn render_evidence(&mut self, evidence: Arc<[EvidenceItem]>) {
        let view = EvidenceView::from_items(&evidence);
        tracing::debug!(items = evidence.len(), "rendered evidence");
        self.page.evidence = Some(view);
        self.page.export_control = ControlState::enabled_if(!evidence.is_empty());
        self.current_evidence = evidence;
    }

    /// Build the CSV for the current evidence; `None` when there is none
    #[must_use]
    pub fn export_csv(&self) -> Option<ExportFile> {
        export_csv(&self.current_evidence)
    }

    /// Show the save failure status
    pub fn mark_save_failed(&mut self) {
        self.page.status = StatusMessage::SaveFailed;
    }
}

impl Default for ScorecardRenderer {
    fn default() -> Self {
        Self::new(TierThresholds::default())
    }
}
