//! Display formatting for scores, percentages and timestamps
//!
//! Scores are shown with at most one decimal. Rounding follows the
//! browser's `Number.prototype.toFixed(1)`: the exact binary value is
//! rounded to the nearest tenth and exact ties go away from zero. Rust's
//! `{:.1}` agrees everywhere except on those ties, where it rounds to even,
//! so ties are handled separately.

use chrono::{DateTime, NaiveDateTime};

/// Placeholder for a missing score
pub const MISSING: &str = "-";

const TIMESTAMP_DISPLAY: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Render `value` with exactly one decimal, `toFixed(1)` style
#[must_use]
pub fn to_fixed_1(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    let body = match tie_quarters(magnitude) {
        Some(quarters) => {
            // magnitude = quarters / 4 and quarters is odd, so ten times the
            // magnitude ends in exactly .5; round that away from zero.
            let tenths = (5 * quarters + 1) / 2;
            format!("{}.{}", tenths / 10, tenths % 10)
        }
        None => format!("{magnitude:.1}"),
    };

    // -0.0 is not negative here, matching toFixed
    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

/// Odd quarter count when `magnitude` sits exactly halfway between tenths
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn tie_quarters(magnitude: f64) -> Option<u64> {
    let quarters = magnitude * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 && quarters < 9.0e15 {
        Some(quarters as u64)
    } else {
        None
    }
}

/// One-decimal rendering with a trailing `.0` dropped
///
/// `8.0` renders as `8`, `8.5` as `8.5`, `8.25` as `8.3`.
#[must_use]
pub fn format_number(value: f64) -> String {
    let fixed = to_fixed_1(value);
    match fixed.strip_suffix(".0") {
        Some(trimmed) => trimmed.to_string(),
        None => fixed,
    }
}

/// Render an optional score, `-` when absent
#[must_use]
pub fn format_score(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), format_number)
}

/// `"<score> / <max>"` with both sides formatted
#[must_use]
pub fn score_ratio(score: Option<f64>, max_score: Option<f64>) -> String {
    format!("{} / {}", format_score(score), format_score(max_score))
}

/// `Math.round`: nearest integer, halves toward positive infinity
#[must_use]
pub fn js_round(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Whole-number percentage of `total` over `max`
///
/// A zero (or NaN) `max` short-circuits to `0`, so the result is never
/// NaN or infinite.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn percent(total: f64, max: f64) -> i64 {
    if max == 0.0 || max.is_nan() {
        return 0;
    }
    let ratio = total / max * 100.0;
    if !ratio.is_finite() {
        return 0;
    }
    js_round(ratio) as i64
}

/// Render a generation timestamp for display
///
/// RFC 3339 values are shown in their own offset as
/// `M/D/YYYY, h:mm:ss AM`; offset-less ISO values are shown as-is in the
/// same layout. Anything else is returned untouched.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format(TIMESTAMP_DISPLAY).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(TIMESTAMP_DISPLAY).to_string();
    }
    raw.to_string()
}
