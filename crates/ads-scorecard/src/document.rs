//! Scorecard document model
//!
//! The document is produced elsewhere (by the scoring pipeline) and is only
//! ever read here. Parsing validates the shape up front so rendering never
//! has to deal with missing fields.

use crate::error::DocumentError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Candidate the scorecard belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display name
    pub name: String,
    /// Cohort label
    pub cohort: String,
}

/// Assessment the scorecard was produced for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Assessment title
    pub title: String,
    /// Assessment version label
    pub version: String,
}

/// Overall totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Points earned
    pub total_score: f64,
    /// Points available; may be zero
    pub max_score: f64,
}

/// Per-section result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section name
    pub name: String,
    /// Points earned, if scored
    #[serde(default)]
    pub score: Option<f64>,
    /// Points available, if known
    #[serde(default)]
    pub max_score: Option<f64>,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
}

/// A single scored response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Item identifier; export order key
    pub item_id: String,
    /// Section the item belongs to
    pub section: String,
    /// Points earned, if scored
    #[serde(default)]
    pub score: Option<f64>,
    /// Points available, if known
    #[serde(default)]
    pub max_score: Option<f64>,
    /// Candidate response, normalized to text
    #[serde(default, deserialize_with = "response_text")]
    pub response: String,
    /// Evidence or rationale text
    #[serde(default)]
    pub evidence: String,
}

impl EvidenceItem {
    /// Create an item with the required fields and no scores
    #[must_use]
    pub fn new(item_id: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            section: section.into(),
            score: None,
            max_score: None,
            response: String::new(),
            evidence: String::new(),
        }
    }

    /// With score and max score
    #[inline]
    #[must_use]
    pub fn with_scores(mut self, score: f64, max_score: f64) -> Self {
        self.score = Some(score);
        self.max_score = Some(max_score);
        self
    }

    /// With response text
    #[inline]
    #[must_use]
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }

    /// With evidence text
    #[inline]
    #[must_use]
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = evidence.into();
        self
    }
}

/// Complete scorecard as delivered by the scoring pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardDocument {
    /// Score run that produced this scorecard
    pub score_run_id: String,
    /// Generation timestamp (RFC 3339), display only
    pub generated_at: String,
    /// Candidate details
    pub candidate: Candidate,
    /// Assessment details
    pub assessment: Assessment,
    /// Overall totals
    pub totals: Totals,
    /// Sections in display order
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Evidence items in display order
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
}

impl ScorecardDocument {
    /// Parse and validate a JSON document
    ///
    /// # Errors
    /// Returns [`DocumentError::Syntax`] when the body is not JSON of the
    /// expected shape, and [`DocumentError::Invalid`] when a required
    /// identifier is blank.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_slice(bytes)?;
        document.validate()?;
        Ok(document)
    }

    /// Parse and validate a JSON string
    ///
    /// # Errors
    /// See [`ScorecardDocument::from_json_slice`].
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        Self::from_json_slice(text.as_bytes())
    }

    /// Check identifiers that serde cannot express
    ///
    /// # Errors
    /// Returns [`DocumentError::Invalid`] naming the first blank identifier.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.score_run_id.trim().is_empty() {
            return Err(DocumentError::invalid("score_run_id", "must not be blank"));
        }
        for (index, item) in self.evidence.iter().enumerate() {
            if item.item_id.trim().is_empty() {
                return Err(DocumentError::invalid(
                    format!("evidence[{index}].item_id"),
                    "must not be blank",
                ));
            }
        }
        Ok(())
    }

    /// Whether the document carries any evidence rows
    #[inline]
    #[must_use]
    pub fn has_evidence(&self) -> bool {
        !self.evidence.is_empty()
    }
}

/// Normalize a response value to display text.
///
/// Strings pass through, `null` becomes empty, anything else is written as
/// compact JSON with object keys sorted.
#[must_use]
pub fn stringify_response(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => serde_json::to_string(&SortedKeys(other)).unwrap_or_else(|_| other.to_string()),
    }
}

/// Serializes a JSON value with object keys in sorted order, whatever map
/// backing `serde_json` was built with.
struct SortedKeys<'a>(&'a Value);

impl Serialize for SortedKeys<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self.0 {
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&SortedKeys(item))?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, item) in entries {
                    out.serialize_entry(key, &SortedKeys(item))?;
                }
                out.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}

fn response_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(stringify_response(&value))
}
