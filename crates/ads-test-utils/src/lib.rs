//! Testing utilities for the ADS scorecard workspace
//!
//! Shared fixtures, controllable sources and a small RFC 4180 reader.

#![allow(missing_docs)]

use ads_scorecard::ScorecardDocument;
use ads_source::{DocumentSource, SourceError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// The demo scorecard shipped with the repository
pub const DEMO_JSON: &str = include_str!("../../../demo/data/scorecard-demo.json");

pub fn demo_document() -> ScorecardDocument {
    ScorecardDocument::from_json_str(DEMO_JSON).unwrap()
}

/// Minimal valid document as a JSON value, totals 17/20, no sections
pub fn document_value(evidence: Vec<Value>) -> Value {
    json!({
        "score_run_id": "run-test",
        "generated_at": "2024-05-01T14:03:09Z",
        "candidate": {"name": "Test Candidate", "cohort": "Cohort T"},
        "assessment": {"title": "Test Assessment", "version": "1.0"},
        "totals": {"total_score": 17, "max_score": 20},
        "sections": [],
        "evidence": evidence,
    })
}

/// Document JSON whose evidence items have the given ids, in order
pub fn document_json_with_evidence(ids: &[&str]) -> String {
    let evidence = ids
        .iter()
        .map(|id| {
            json!({
                "item_id": id,
                "section": "General",
                "score": 1,
                "max_score": 2,
                "response": format!("response to {id}"),
                "evidence": "observed",
            })
        })
        .collect();
    document_value(evidence).to_string()
}

/// Two evidence rows stored out of item_id order
pub fn sample_document() -> ScorecardDocument {
    ScorecardDocument::from_json_str(&document_json_with_evidence(&["b2", "a1"])).unwrap()
}

/// Source whose fetch blocks until released
#[derive(Debug)]
pub struct GatedSource {
    body: Vec<u8>,
    entered: Notify,
    release: Notify,
    fetches: AtomicUsize,
}

impl GatedSource {
    pub fn new(body: impl Into<Vec<u8>>) -> Arc<Self> {
        Arc::new(Self {
            body: body.into(),
            entered: Notify::new(),
            release: Notify::new(),
            fetches: AtomicUsize::new(0),
        })
    }

    /// Resolves once a fetch has started
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    /// Let one pending (or the next) fetch finish
    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentSource for GatedSource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.body.clone())
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

/// Source that always answers with an HTTP-style status
#[derive(Debug, Clone, Copy)]
pub struct FailingSource {
    status: u16,
}

impl FailingSource {
    pub fn status(status: u16) -> Self {
        Self { status }
    }

    pub fn not_found() -> Self {
        Self::status(404)
    }
}

#[async_trait]
impl DocumentSource for FailingSource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        if self.status == 404 {
            return Err(SourceError::not_found(self.describe()));
        }
        Err(SourceError::Status {
            location: self.describe(),
            status: self.status,
        })
    }

    fn describe(&self) -> String {
        format!("failing:{}", self.status)
    }
}

/// Parse RFC 4180 CSV text into records
///
/// Accepts `\n` or `\r\n` record separators. Panics on a quote in an
/// unquoted field or an unterminated quoted field.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' => {
                assert!(field.is_empty(), "quote inside unquoted field");
                in_quotes = true;
            }
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            other => field.push(other),
        }
    }

    assert!(!in_quotes, "unterminated quoted field");
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_document_parses() {
        let document = demo_document();
        assert_eq!(document.evidence.len(), 4);
    }

    #[test]
    fn csv_reader_handles_quotes_and_newlines() {
        let records = parse_csv("\"a\",\"b \"\"q\"\"\"\n\"line\nbreak\",\"\"");
        assert_eq!(
            records,
            vec![
                vec!["a".to_string(), "b \"q\"".to_string()],
                vec!["line\nbreak".to_string(), String::new()],
            ]
        );
    }

    #[tokio::test]
    async fn failing_source_statuses() {
        assert!(FailingSource::not_found().fetch().await.unwrap_err().is_not_found());
        assert!(matches!(
            FailingSource::status(503).fetch().await,
            Err(SourceError::Status { status: 503, .. })
        ));
    }
}
