//! ADS Source
//!
//! Retrieval of scorecard documents. A [`DocumentSource`] hands back the
//! raw body; parsing is left to the caller.
//!
//! - [`HttpSource`]: cache-busted GET
//! - [`FileSource`]: local file, re-read on every fetch
//! - [`MemorySource`]: fixed bytes
//!
//! # Example
//!
//! ```rust,ignore
//! use ads_source::{FetchOptions, SourceLocation};
//!
//! let location: SourceLocation = "https://example.com/scorecard.json".parse()?;
//! let source = location.open(&FetchOptions::default())?;
//! let body = source.fetch().await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod file;
pub mod http;
pub mod location;
pub mod memory;
pub mod source;

pub use error::SourceError;
pub use file::FileSource;
pub use http::HttpSource;
pub use location::SourceLocation;
pub use memory::MemorySource;
pub use source::{DocumentSource, FetchOptions, DEFAULT_FETCH_TIMEOUT};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
