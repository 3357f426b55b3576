//! Page state: views, status message and control states
//!
//! A UI-binding layer reads a [`Page`] snapshot and mirrors it onto real
//! widgets. The two controls only ever flip between enabled and disabled.

use ads_scorecard::{EvidenceView, SectionsView, SummaryView};
use std::fmt;

/// Enabled/disabled state of a trigger control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlState {
    /// Clickable
    Enabled,
    /// Inert
    Disabled,
}

impl ControlState {
    /// Whether the control accepts triggers
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Enabled iff `condition`
    #[inline]
    #[must_use]
    pub fn enabled_if(condition: bool) -> Self {
        if condition {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Status line shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusMessage {
    /// Nothing loaded yet
    Idle,
    /// Load in flight
    Loading,
    /// Last load succeeded
    Loaded,
    /// Last load failed (retrieval or parse; not distinguished)
    LoadFailed,
    /// Host could not save the export
    SaveFailed,
}

impl StatusMessage {
    /// Display text
    #[must_use]
    pub fn text(&self) -> &'static str {
        match self {
            Self::Idle => "Ready.",
            Self::Loading => "Loading scorecard…",
            Self::Loaded => "Scorecard loaded.",
            Self::LoadFailed => "Unable to load scorecard data.",
            Self::SaveFailed => "Unable to save export.",
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Everything the user can see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Summary panel, once a document has rendered
    pub summary: Option<SummaryView>,
    /// Sections panel, once a document has rendered
    pub sections: Option<SectionsView>,
    /// Evidence table, once a document has rendered
    pub evidence: Option<EvidenceView>,
    /// Status line
    pub status: StatusMessage,
    /// Load trigger
    pub load_control: ControlState,
    /// Export trigger
    pub export_control: ControlState,
}

impl Page {
    /// Initial page: nothing rendered, load enabled, export disabled
    #[must_use]
    pub fn new() -> Self {
        Self {
            summary: None,
            sections: None,
            evidence: None,
            status: StatusMessage::Idle,
            load_control: ControlState::Enabled,
            export_control: ControlState::Disabled,
        }
    }

    /// Whether any document has been rendered
    #[inline]
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.summary.is_some()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status)?;
        if let Some(summary) = &self.summary {
            write!(f, "\n\n{summary}")?;
        }
        if let Some(sections) = &self.sections {
            write!(f, "\n\nSections\n{sections}")?;
        }
        if let Some(evidence) = &self.evidence {
            write!(f, "\n\n{evidence}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_page_state() {
        let page = Page::new();
        assert!(!page.has_content());
        assert!(page.load_control.is_enabled());
        assert!(!page.export_control.is_enabled());
        assert_eq!(page.to_string(), "Ready.");
    }

    #[test]
    fn control_state_from_condition() {
        assert_eq!(ControlState::enabled_if(true), ControlState::Enabled);
        assert_eq!(ControlState::enabled_if(false), ControlState::Disabled);
    }

    #[test]
    fn failure_text_is_generic() {
        assert_eq!(StatusMessage::LoadFailed.to_string(), "Unable to load scorecard data.");
    }
}
