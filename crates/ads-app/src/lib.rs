//! ADS App
//!
//! Scorecard renderer state and the controller a UI binds to.
//!
//! # Core Concepts
//!
//! - [`ScorecardApp`]: load/export triggers over a [`DocumentSource`] and a [`FileSaver`]
//! - [`ScorecardRenderer`]: page state and the evidence backing the export
//! - [`Page`]: snapshot of views, status message and control states
//! - [`AppConfig`]: defaults, config file, `ADS_*` environment
//!
//! # Example
//!
//! ```rust,ignore
//! use ads_app::{AppConfig, ScorecardApp};
//!
//! let config = AppConfig::load(None)?;
//! let app = ScorecardApp::from_config(&config)?;
//! app.on_trigger_load().await;
//! println!("{}", app.page());
//! app.on_trigger_export().await?;
//! ```
//!
//! [`DocumentSource`]: ads_source::DocumentSource

#![warn(unreachable_pub)]

pub mod app;
pub mod config;
pub mod error;
pub mod page;
pub mod renderer;
pub mod saver;
pub mod telemetry;

pub use app::{ExportOutcome, LoadId, LoadOutcome, ScorecardApp};
pub use config::{AppConfig, LogConfig};
pub use error::{AppError, ConfigError, LoadError, LoadFailure, SaveError};
pub use page::{ControlState, Page, StatusMessage};
pub use renderer::ScorecardRenderer;
pub use saver::{DirectorySaver, FileSaver, MemorySaver, SavedFile};
pub use telemetry::init_tracing;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
