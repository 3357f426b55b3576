//! Source locations as written in configuration or on the command line

use crate::error::SourceError;
use crate::file::FileSource;
use crate::http::HttpSource;
use crate::source::{DocumentSource, FetchOptions};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Where a scorecard document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// `http://` or `https://` URL
    Http(String),
    /// Local path
    File(PathBuf),
}

impl SourceLocation {
    /// Open a source for this location
    ///
    /// # Errors
    /// Returns [`SourceError::InvalidLocation`] when an HTTP URL is malformed.
    pub fn open(&self, options: &FetchOptions) -> Result<Box<dyn DocumentSource>, SourceError> {
        match self {
            Self::Http(url) => Ok(Box::new(HttpSource::new(url, options)?)),
            Self::File(path) => Ok(Box::new(FileSource::new(path.clone()))),
        }
    }

    /// Whether retrieval goes over the network
    #[inline]
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

impl FromStr for SourceLocation {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SourceError::invalid_location(s, "location is empty"));
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Http(trimmed.to_string()))
        } else if let Some(path) = trimmed.strip_prefix("file://") {
            Ok(Self::File(PathBuf::from(path)))
        } else {
            Ok(Self::File(PathBuf::from(trimmed)))
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_http_and_file() {
        assert_eq!(
            "https://example.com/a.json".parse::<SourceLocation>().unwrap(),
            SourceLocation::Http("https://example.com/a.json".to_string())
        );
        assert_eq!(
            "HTTP://example.com/a.json".parse::<SourceLocation>().unwrap(),
            SourceLocation::Http("HTTP://example.com/a.json".to_string())
        );
        assert_eq!(
            "data/scorecard.json".parse::<SourceLocation>().unwrap(),
            SourceLocation::File(PathBuf::from("data/scorecard.json"))
        );
        assert_eq!(
            "file:///tmp/s.json".parse::<SourceLocation>().unwrap(),
            SourceLocation::File(PathBuf::from("/tmp/s.json"))
        );
    }

    #[test]
    fn empty_location_is_invalid() {
        assert!("   ".parse::<SourceLocation>().is_err());
    }

    #[test]
    fn open_builds_matching_source() {
        let options = FetchOptions::default();
        let http = SourceLocation::Http("http://localhost:9/x.json".to_string());
        assert!(http.is_remote());
        assert_eq!(http.open(&options).unwrap().describe(), "http://localhost:9/x.json");

        let file = SourceLocation::File(PathBuf::from("x.json"));
        assert!(!file.is_remote());
        assert_eq!(file.open(&options).unwrap().describe(), "x.json");
    }
}
