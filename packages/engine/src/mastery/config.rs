//! Tunables for the mastery engine.
//!
//! Everything the scoring, decay, and recommendation paths depend on lives
//! here, including the foundation/applied transfer mapping: the engine
//! compiles in no domain table, callers inject one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Weights of the confidence formula
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    /// Starting score before adjustments
    pub base: f64,
    /// Multiplier on the averaged engagement rates
    pub engagement_weight: f64,
    /// Bonus per attempt
    pub familiarity_per_attempt: f64,
    /// Cap on the familiarity bonus
    pub familiarity_cap: f64,
    /// Penalty scale for choosing the brute strategy first
    pub discipline_penalty: f64,
    /// Penalty scale for replays
    pub complexity_penalty: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            base: 40.0,
            engagement_weight: 0.4,
            familiarity_per_attempt: 5.0,
            familiarity_cap: 25.0,
            discipline_penalty: 30.0,
            complexity_penalty: 15.0,
        }
    }
}

/// Time-based confidence decay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayParams {
    /// Days of inactivity before decay starts
    pub grace_days: i64,
    /// Upper bound on the reduction of a single decay pass
    pub max_loss: f64,
}

impl Default for DecayParams {
    fn default() -> Self {
        Self {
            grace_days: 14,
            max_loss: 10.0,
        }
    }
}

/// Cutoffs used by recommendation precedence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendThresholds {
    /// A side of the transfer pair counts as strong above this
    pub strong: f64,
    /// A side of the transfer pair counts as weak below this
    pub weak: f64,
    /// Weak-spot candidates sit below this confidence
    pub focus: f64,
}

impl Default for RecommendThresholds {
    fn default() -> Self {
        Self {
            strong: 70.0,
            weak: 50.0,
            focus: 60.0,
        }
    }
}

/// Confidence bands for adaptive guidance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidanceBands {
    /// Below this the learner gets the full focus-area treatment
    pub focus_below: f64,
    /// At or above this assistance is reduced
    pub reduce_at: f64,
}

impl Default for GuidanceBands {
    fn default() -> Self {
        Self {
            focus_below: 50.0,
            reduce_at: 80.0,
        }
    }
}

/// Bidirectional mapping between foundation patterns and the applied
/// patterns that exercise them. Injected configuration; empty by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferMap {
    links: BTreeMap<String, Vec<String>>,
}

impl TransferMap {
    pub fn new(links: BTreeMap<String, Vec<String>>) -> Self {
        Self { links }
    }

    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<T>)>,
        S: Into<String>,
        T: Into<String>,
    {
        let links = pairs
            .into_iter()
            .map(|(foundation, applied)| {
                (
                    foundation.into(),
                    applied.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        Self { links }
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn is_foundation(&self, pattern: &str) -> bool {
        self.links.contains_key(pattern)
    }

    /// Applied patterns exercising a foundation, when `pattern` is one.
    pub fn applied_of(&self, pattern: &str) -> Option<&[String]> {
        self.links.get(pattern).map(Vec::as_slice)
    }

    /// The foundation behind an applied pattern, when `pattern` is one.
    pub fn foundation_of(&self, pattern: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|(_, applied)| applied.iter().any(|a| a == pattern))
            .map(|(foundation, _)| foundation.as_str())
    }
}

/// Full mastery engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MasteryConfig {
    pub confidence: ConfidenceWeights,
    pub decay: DecayParams,
    pub thresholds: RecommendThresholds,
    pub guidance: GuidanceBands,
    pub transfer: TransferMap,
}
