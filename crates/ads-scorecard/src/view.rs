//! View models derived from a scorecard document
//!
//! Each view is a plain value built from the document; nothing here holds
//! state between renders. `Display` impls give the plain-text rendering
//! used by the command line.

use crate::document::{EvidenceItem, ScorecardDocument, Section};
use crate::format::{format_number, format_timestamp, percent, score_ratio};
use crate::tier::{Tier, TierThresholds};
use std::fmt;

/// Placeholder shown when a document has no sections
pub const NO_SECTION_DATA: &str = "No section data available.";

/// Placeholder shown when a document has no evidence
pub const NO_EVIDENCE: &str = "No evidence found.";

const EVIDENCE_COLUMNS: [&str; 5] = ["Item", "Section", "Score", "Response", "Evidence"];

/// Item-count label for the evidence table
#[must_use]
pub fn item_count_label(count: usize) -> String {
    format!("{count} items")
}

/// Overall summary panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    /// Candidate name
    pub candidate_name: String,
    /// Candidate cohort
    pub cohort: String,
    /// Assessment title
    pub assessment_title: String,
    /// Assessment version
    pub assessment_version: String,
    /// `"<total> / <max>"`
    pub score_line: String,
    /// Whole-number percentage
    pub percent: i64,
    /// `"<percent>% overall"`
    pub percent_line: String,
    /// Tier band for the percentage
    pub tier: Tier,
    /// Score run identifier
    pub score_run_id: String,
    /// Display form of the generation timestamp
    pub generated_at: String,
}

impl SummaryView {
    /// Build the summary for `document`
    #[must_use]
    pub fn from_document(document: &ScorecardDocument, tiers: &TierThresholds) -> Self {
        let totals = document.totals;
        let percent = percent(totals.total_score, totals.max_score);

        #[allow(clippy::cast_precision_loss)]
        let tier = tiers.classify(percent as f64);

        Self {
            candidate_name: document.candidate.name.clone(),
            cohort: document.candidate.cohort.clone(),
            assessment_title: document.assessment.title.clone(),
            assessment_version: document.assessment.version.clone(),
            score_line: format!(
                "{} / {}",
                format_number(totals.total_score),
                format_number(totals.max_score)
            ),
            percent,
            percent_line: format!("{percent}% overall"),
            tier,
            score_run_id: document.score_run_id.clone(),
            generated_at: format_timestamp(&document.generated_at),
        }
    }
}

impl fmt::Display for SummaryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.candidate_name, self.cohort)?;
        writeln!(
            f,
            "{} v{}",
            self.assessment_title, self.assessment_version
        )?;
        writeln!(f, "Score: {} ({})", self.score_line, self.percent_line)?;
        writeln!(f, "Tier: {}", self.tier)?;
        writeln!(f, "Run: {}", self.score_run_id)?;
        write!(f, "Generated: {}", self.generated_at)
    }
}

/// One section block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBlock {
    /// Section name
    pub name: String,
    /// `"<score> / <max>"`
    pub score_line: String,
    /// Section notes
    pub notes: String,
}

/// Node in the sections view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionNode {
    /// Empty-state text
    Placeholder(&'static str),
    /// A rendered section
    Block(SectionBlock),
}

/// Sections panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionsView {
    /// Rendered nodes, input order
    pub nodes: Vec<SectionNode>,
}

impl SectionsView {
    /// Build the sections panel
    #[must_use]
    pub fn from_sections(sections: &[Section]) -> Self {
        if sections.is_empty() {
            return Self {
                nodes: vec![SectionNode::Placeholder(NO_SECTION_DATA)],
            };
        }

        let nodes = sections
            .iter()
            .map(|section| {
                SectionNode::Block(SectionBlock {
                    name: section.name.clone(),
                    score_line: score_ratio(section.score, section.max_score),
                    notes: section.notes.clone(),
                })
            })
            .collect();
        Self { nodes }
    }

    /// Whether only the empty-state placeholder is shown
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self.nodes.as_slice(), [SectionNode::Placeholder(_)])
    }
}

impl Default for SectionsView {
    fn default() -> Self {
        Self::from_sections(&[])
    }
}

impl fmt::Display for SectionsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, node) in self.nodes.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            match node {
                SectionNode::Placeholder(text) => write!(f, "{text}")?,
                SectionNode::Block(block) => {
                    write!(f, "{}: {}", block.name, block.score_line)?;
                    if !block.notes.is_empty() {
                        write!(f, "\n  {}", block.notes)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// One evidence row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceRowView {
    /// Item identifier
    pub item_id: String,
    /// Section name
    pub section: String,
    /// `"<score> / <max>"`
    pub score_line: String,
    /// Response text
    pub response: String,
    /// Evidence text
    pub evidence: String,
}

impl EvidenceRowView {
    fn cells(&self) -> [&str; 5] {
        [
            &self.item_id,
            &self.section,
            &self.score_line,
            &self.response,
            &self.evidence,
        ]
    }
}

/// Row in the evidence table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvidenceRow {
    /// Empty-state text
    Placeholder(&'static str),
    /// A rendered item
    Item(EvidenceRowView),
}

/// Evidence table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceView {
    /// Rows in input order
    pub rows: Vec<EvidenceRow>,
    /// `"<n> items"`
    pub count_label: String,
}

impl EvidenceView {
    /// Build the evidence table. Rows keep input order; only the export
    /// is sorted.
    #[must_use]
    pub fn from_items(items: &[EvidenceItem]) -> Self {
        if items.is_empty() {
            return Self {
                rows: vec![EvidenceRow::Placeholder(NO_EVIDENCE)],
                count_label: item_count_label(0),
            };
        }

        let rows = items
            .iter()
            .map(|item| {
                EvidenceRow::Item(EvidenceRowView {
                    item_id: item.item_id.clone(),
                    section: item.section.clone(),
                    score_line: score_ratio(item.score, item.max_score),
                    response: item.response.clone(),
                    evidence: item.evidence.clone(),
                })
            })
            .collect();

        Self {
            rows,
            count_label: item_count_label(items.len()),
        }
    }

    /// Number of item rows (placeholder excluded)
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, EvidenceRow::Item(_)))
            .count()
    }
}

impl Default for EvidenceView {
    fn default() -> Self {
        Self::from_items(&[])
    }
}

impl fmt::Display for EvidenceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<&EvidenceRowView> = self
            .rows
            .iter()
            .filter_map(|row| match row {
                EvidenceRow::Item(item) => Some(item),
                EvidenceRow::Placeholder(_) => None,
            })
            .collect();

        writeln!(f, "Evidence ({})", self.count_label)?;
        if items.is_empty() {
            return write!(f, "{NO_EVIDENCE}");
        }

        let mut widths = EVIDENCE_COLUMNS.map(|title| title.chars().count());
        for item in &items {
            for (width, cell) in widths.iter_mut().zip(item.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(f, &EVIDENCE_COLUMNS, &widths)?;
        for item in items {
            writeln!(f)?;
            write_row(f, &item.cells(), &widths)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[&str; 5], widths: &[usize; 5]) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    f.write_str(line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Assessment, Candidate, Totals};
    use pretty_assertions::assert_eq;

    fn document(total: f64, max: f64) -> ScorecardDocument {
        ScorecardDocument {
            score_run_id: "run-42".to_string(),
            generated_at: "2024-05-01T14:03:09Z".to_string(),
            candidate: Candidate {
                name: "Ada Lovelace".to_string(),
                cohort: "Spring".to_string(),
            },
            assessment: Assessment {
                title: "Analytical Engines".to_string(),
                version: "2.1".to_string(),
            },
            totals: Totals {
                total_score: total,
                max_score: max,
            },
            sections: Vec::new(),
            evidence: Vec::new(),
        }
    }

    #[test]
    fn summary_example() {
        let view = SummaryView::from_document(&document(17.0, 20.0), &TierThresholds::default());
        assert_eq!(view.score_line, "17 / 20");
        assert_eq!(view.percent_line, "85% overall");
        assert_eq!(view.tier, Tier::Gold);
        assert_eq!(view.generated_at, "5/1/2024, 2:03:09 PM");
    }

    #[test]
    fn summary_zero_max() {
        let view = SummaryView::from_document(&document(3.5, 0.0), &TierThresholds::default());
        assert_eq!(view.percent, 0);
        assert_eq!(view.score_line, "3.5 / 0");
        assert_eq!(view.tier, Tier::Insufficient);
    }

    #[test]
    fn summary_text() {
        let view = SummaryView::from_document(&document(17.0, 20.0), &TierThresholds::default());
        assert_eq!(
            view.to_string(),
            "Ada Lovelace (Spring)\n\
             Analytical Engines v2.1\n\
             Score: 17 / 20 (85% overall)\n\
             Tier: Gold\n\
             Run: run-42\n\
             Generated: 5/1/2024, 2:03:09 PM"
        );
    }

    #[test]
    fn empty_sections_render_single_placeholder() {
        let view = SectionsView::from_sections(&[]);
        assert_eq!(view.nodes, vec![SectionNode::Placeholder(NO_SECTION_DATA)]);
        assert!(view.is_placeholder());
        assert_eq!(view.to_string(), NO_SECTION_DATA);
    }

    #[test]
    fn sections_keep_input_order() {
        let sections = vec![
            Section {
                name: "Writing".to_string(),
                score: Some(4.0),
                max_score: Some(5.0),
                notes: "Clear structure".to_string(),
            },
            Section {
                name: "Algebra".to_string(),
                score: None,
                max_score: Some(10.0),
                notes: String::new(),
            },
        ];
        let view = SectionsView::from_sections(&sections);
        assert!(!view.is_placeholder());
        assert_eq!(view.to_string(), "Writing: 4 / 5\n  Clear structure\nAlgebra: - / 10");
    }

    #[test]
    fn empty_evidence_renders_placeholder_row() {
        let view = EvidenceView::from_items(&[]);
        assert_eq!(view.rows, vec![EvidenceRow::Placeholder(NO_EVIDENCE)]);
        assert_eq!(view.count_label, "0 items");
        assert_eq!(view.item_count(), 0);
    }

    #[test]
    fn evidence_rows_keep_input_order() {
        let items = vec![
            EvidenceItem::new("b2", "Algebra").with_scores(1.0, 2.0),
            EvidenceItem::new("a1", "Writing").with_scores(2.5, 3.0),
        ];
        let view = EvidenceView::from_items(&items);
        let ids: Vec<&str> = view
            .rows
            .iter()
            .filter_map(|row| match row {
                EvidenceRow::Item(item) => Some(item.item_id.as_str()),
                EvidenceRow::Placeholder(_) => None,
            })
            .collect();
        assert_eq!(ids, vec!["b2", "a1"]);
        assert_eq!(view.count_label, "2 items");
    }

    #[test]
    fn evidence_table_text() {
        let items = vec![EvidenceItem::new("a1", "Writing")
            .with_scores(2.5, 3.0)
            .with_response("x = 2")
            .with_evidence("correct")];
        let view = EvidenceView::from_items(&items);
        assert_eq!(
            view.to_string(),
            "Evidence (1 items)\n\
             Item | Section | Score   | Response | Evidence\n\
             a1   | Writing | 2.5 / 3 | x = 2    | correct"
        );
    }
}
