//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured level. Output goes to stderr so the
//! rendered views on stdout stay clean.

use crate::config::LogConfig;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Metric: loads by outcome (`loaded`, `retrieval`, `parse`, `ignored`, `cancelled`)
pub const LOADS_TOTAL: &str = "scorecard_loads_total";

/// Metric: exports by outcome (`saved`, `skipped`, `failed`)
pub const EXPORTS_TOTAL: &str = "scorecard_exports_total";

/// Filter from `RUST_LOG`, falling back to `fallback`
#[must_use]
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber
///
/// # Errors
/// A global subscriber is already set.
pub fn init_tracing(log: &LogConfig) -> Result<(), TryInitError> {
    let filter = env_filter(&log.level);
    if log.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    }
}
