//! HTTP document source
//!
//! Sends `Cache-Control: no-cache, no-store` and `Pragma: no-cache` on every
//! request so intermediaries and the server never hand back a stale copy.

use crate::error::SourceError;
use crate::source::{DocumentSource, FetchOptions};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::{StatusCode, Url};
use std::time::Duration;

const NO_CACHE: &str = "no-cache, no-store";

/// Retrieves a document with a plain GET
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpSource {
    /// Create a source for `url`
    ///
    /// # Errors
    /// Returns [`SourceError::InvalidLocation`] for unparseable or non-HTTP
    /// URLs and [`SourceError::Transport`] if the client cannot be built.
    pub fn new(url: &str, options: &FetchOptions) -> Result<Self, SourceError> {
        let parsed =
            Url::parse(url).map_err(|e| SourceError::invalid_location(url, e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SourceError::invalid_location(url, "scheme must be http or https"));
        }

        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| SourceError::transport(url, e.to_string()))?;

        Ok(Self {
            url: parsed,
            client,
            timeout: options.timeout,
        })
    }

    /// Target URL
    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn request_error(&self, error: &reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::Timeout {
                location: self.url.to_string(),
                after_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            SourceError::transport(self.url.as_str(), error.to_string())
        }
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    #[tracing::instrument(name = "http_source_fetch", skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(CACHE_CONTROL, NO_CACHE)
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| self.request_error(&e))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "scorecard response received");

        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::not_found(self.url.as_str()));
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                location: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(|e| self.request_error(&e))
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_scheme() {
        let err = HttpSource::new("ftp://example.com/doc.json", &FetchOptions::default())
            .unwrap_err();
        assert!(matches!(err, SourceError::InvalidLocation { .. }));
    }

    #[test]
    fn rejects_garbage_url() {
        assert!(HttpSource::new("http://", &FetchOptions::default()).is_err());
    }

    #[test]
    fn describe_is_url() {
        let source =
            HttpSource::new("https://example.com/data/scorecard.json", &FetchOptions::default())
                .unwrap();
        assert_eq!(source.describe(), "https://example.com/data/scorecard.json");
        assert_eq!(source.url().path(), "/data/scorecard.json");
    }
}
