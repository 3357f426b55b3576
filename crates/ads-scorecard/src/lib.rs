//! ADS Scorecard
//!
//! Read-only model of an assessment scorecard and everything derived from
//! it for display and export.
//!
//! # Core Concepts
//!
//! - [`ScorecardDocument`]: validated scorecard as produced by the scoring pipeline
//! - [`SummaryView`], [`SectionsView`], [`EvidenceView`]: display models
//! - [`export_csv`]: canonical evidence CSV, sorted by `item_id`
//! - [`TierThresholds`]: credential bands for the overall percentage
//!
//! # Example
//!
//! ```rust,ignore
//! use ads_scorecard::{export_csv, ScorecardDocument, SummaryView, TierThresholds};
//!
//! let document = ScorecardDocument::from_json_slice(&bytes)?;
//! let summary = SummaryView::from_document(&document, &TierThresholds::default());
//! println!("{summary}");
//!
//! if let Some(file) = export_csv(&document.evidence) {
//!     std::fs::write(&file.filename, &file.bytes)?;
//! }
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod document;
pub mod error;
pub mod export;
pub mod format;
pub mod tier;
pub mod view;

// Re-exports for convenience
pub use document::{
    stringify_response, Assessment, Candidate, EvidenceItem, ScorecardDocument, Section, Totals,
};
pub use error::DocumentError;
pub use export::{build_csv, export_csv, quote_field, ExportFile, CSV_HEADER, CSV_MIME, EXPORT_FILENAME};
pub use format::{format_number, format_score, format_timestamp, percent};
pub use tier::{Tier, TierThresholds};
pub use view::{
    EvidenceRow, EvidenceRowView, EvidenceView, SectionBlock, SectionNode, SectionsView,
    SummaryView, NO_EVIDENCE, NO_SECTION_DATA,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "score_run_id": "run-7",
        "generated_at": "2024-05-01T14:03:09Z",
        "candidate": {"name": "Grace", "cohort": "B"},
        "assessment": {"title": "Compilers", "version": "3"},
        "totals": {"total_score": 17, "max_score": 20},
        "sections": [{"name": "Parsing", "score": 9, "max_score": 10, "notes": "Strong"}],
        "evidence": [
            {"item_id": "b2", "section": "Parsing", "score": 4, "max_score": 5, "response": "LL(1)", "evidence": "ok"},
            {"item_id": "a1", "section": "Parsing", "score": 5, "max_score": 5, "response": "LR", "evidence": "ok"}
        ]
    }"#;

    #[test]
    fn document_to_views_and_export() {
        let document = ScorecardDocument::from_json_str(DOCUMENT).unwrap();

        let summary = SummaryView::from_document(&document, &TierThresholds::default());
        assert_eq!(summary.score_line, "17 / 20");
        assert_eq!(summary.percent_line, "85% overall");

        let sections = SectionsView::from_sections(&document.sections);
        assert_eq!(sections.nodes.len(), 1);

        let evidence = EvidenceView::from_items(&document.evidence);
        assert_eq!(evidence.count_label, "2 items");

        let file = export_csv(&document.evidence).unwrap();
        let lines: Vec<&str> = file.text().lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("\"a1\""));
        assert!(lines[2].starts_with("\"b2\""));
    }
}
