//! Evidence CSV export
//!
//! The export is canonical: rows are ordered by `item_id`, every field is
//! quoted, and the same evidence always yields the same bytes.

use crate::document::EvidenceItem;
use crate::format::format_score;
use sha2::{Digest, Sha256};

/// File name offered for the download
pub const EXPORT_FILENAME: &str = "scorecard-demo.csv";

/// MIME type of the export
pub const CSV_MIME: &str = "text/csv";

/// Fixed header fields, in column order
pub const CSV_HEADER: [&str; 6] = [
    "item_id",
    "section",
    "score",
    "max_score",
    "response",
    "evidence",
];

/// A file ready to hand to the host's save mechanism
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested file name
    pub filename: String,
    /// MIME type
    pub mime: &'static str,
    /// UTF-8 encoded contents
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Contents as text
    #[must_use]
    pub fn text(&self) -> &str {
        // bytes always come from a String
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }

    /// SHA-256 of the contents, lowercase hex
    #[must_use]
    pub fn sha256_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

/// Wrap a field in double quotes, doubling any embedded quote
#[must_use]
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_line<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|field| quote_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Copy of `items` ordered by `item_id`; equal ids keep input order
#[must_use]
pub fn sorted_by_item_id(items: &[EvidenceItem]) -> Vec<&EvidenceItem> {
    let mut sorted: Vec<&EvidenceItem> = items.iter().collect();
    sorted.sort_by(|a, b| a.item_id.cmp(&b.item_id));
    sorted
}

/// Build the CSV text: header, then one row per item sorted by `item_id`.
/// Rows are joined by `\n` with no trailing newline.
#[must_use]
pub fn build_csv(items: &[EvidenceItem]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(csv_line(CSV_HEADER));

    for item in sorted_by_item_id(items) {
        lines.push(csv_line([
            item.item_id.clone(),
            item.section.clone(),
            format_score(item.score),
            format_score(item.max_score),
            item.response.clone(),
            item.evidence.clone(),
        ]));
    }

    lines.join("\n")
}

/// Export `items`, or `None` when there is nothing to export
#[must_use]
pub fn export_csv(items: &[EvidenceItem]) -> Option<ExportFile> {
    if items.is_empty() {
        return None;
    }
    Some(ExportFile {
        filename: EXPORT_FILENAME.to_string(),
        mime: CSV_MIME,
        bytes: build_csv(items).into_bytes(),
    })
}
