//! Credential tier bands
//!
//! A score is placed in the highest band whose threshold it reaches. A band
//! without a threshold can never be reached.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tier assigned to an overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Below every configured threshold
    Insufficient,
    /// Bronze band
    Bronze,
    /// Silver band
    Silver,
    /// Gold band
    Gold,
}

impl Tier {
    /// Display label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Gold => "Gold",
            Tier::Silver => "Silver",
            Tier::Bronze => "Bronze",
            Tier::Insufficient => "Insufficient",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimum percentages for each band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Gold threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold: Option<f64>,
    /// Silver threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silver: Option<f64>,
    /// Bronze threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bronze: Option<f64>,
}

impl TierThresholds {
    /// Thresholds with no bands configured
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self {
            gold: None,
            silver: None,
            bronze: None,
        }
    }

    /// Place `score` in a band
    #[must_use]
    pub fn classify(&self, score: f64) -> Tier {
        let reaches = |threshold: Option<f64>| threshold.is_some_and(|t| score >= t);
        if reaches(self.gold) {
            Tier::Gold
        } else if reaches(self.silver) {
            Tier::Silver
        } else if reaches(self.bronze) {
            Tier::Bronze
        } else {
            Tier::Insufficient
        }
    }

    /// Configured thresholds must not decrease from bronze to gold
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        let configured: Vec<f64> = [self.bronze, self.silver, self.gold]
            .into_iter()
            .flatten()
            .collect();
        configured.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            gold: Some(85.0),
            silver: Some(70.0),
            bronze: Some(50.0),
        }
    }
}
