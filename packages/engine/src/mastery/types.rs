//! State and output types for the mastery engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discrete activity metric reported by the surrounding UI.
///
/// Counter metrics accumulate; rate metrics (and the running time average)
/// overwrite the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityMetric {
    Attempts,
    ReplayCount,
    BruteFirstCount,
    Sessions,
    CompareModeUsage,
    ChecklistCompletionRate,
    GuideSectionCompletionRate,
    AvgTimeBeforeVisualization,
}

impl ActivityMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attempts => "attempts",
            Self::ReplayCount => "replayCount",
            Self::BruteFirstCount => "bruteFirstCount",
            Self::Sessions => "sessions",
            Self::CompareModeUsage => "compareModeUsage",
            Self::ChecklistCompletionRate => "checklistCompletionRate",
            Self::GuideSectionCompletionRate => "guideSectionCompletionRate",
            Self::AvgTimeBeforeVisualization => "avgTimeBeforeVisualization",
        }
    }

    /// Whether recording this metric overwrites instead of accumulating.
    pub fn overwrites(&self) -> bool {
        matches!(
            self,
            Self::ChecklistCompletionRate
                | Self::GuideSectionCompletionRate
                | Self::AvgTimeBeforeVisualization
        )
    }
}

/// Accumulated engagement and performance record for one pattern.
///
/// Created lazily on the first activity event, mutated on every subsequent
/// event, never deleted. `confidence` is clamped to `[0, 100]` after every
/// mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternStat {
    pub attempts: u32,
    pub replay_count: u32,
    pub brute_first_count: u32,
    pub sessions: u32,
    pub compare_mode_usage: u32,
    /// Checklist completion, 0-100
    pub checklist_completion_rate: f64,
    /// Guide-section completion, 0-100
    pub guide_section_completion_rate: f64,
    /// Running average of time spent before the first visualization, seconds
    pub avg_time_before_visualization: f64,
    /// Derived confidence, 0-100
    pub confidence: f64,
    pub last_practiced: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foundation_confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_score: Option<f64>,
}

impl PatternStat {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            attempts: 0,
            replay_count: 0,
            brute_first_count: 0,
            sessions: 0,
            compare_mode_usage: 0,
            checklist_completion_rate: 0.0,
            guide_section_completion_rate: 0.0,
            avg_time_before_visualization: 0.0,
            confidence: 0.0,
            last_practiced: now,
            foundation_confidence: None,
            applied_confidence: None,
            transfer_score: None,
        }
    }
}

/// Why a recommendation was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    /// Strong application over weak theory: review the foundation
    Foundation,
    /// A pattern has gone stale and needs a refresh
    Decay,
    /// Low confidence on an attempted pattern, or theory outpacing practice
    Weakness,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Foundation => "foundation",
            Self::Decay => "decay",
            Self::Weakness => "weakness",
        }
    }
}

/// Single best next action, derived on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub message: String,
    pub target_link: String,
    pub label: String,
}

/// Confidence band a pattern currently sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GuidanceLabel {
    #[serde(rename = "Focus Area")]
    FocusArea,
    #[serde(rename = "Strong Pattern")]
    StrongPattern,
}

/// How much guidance the UI should surface for a pattern, derived from its
/// current confidence. The UI may use `compare_by_default` to parameterize
/// the next trace session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceProfile {
    pub auto_expand_guide: bool,
    pub highlight_signals: bool,
    pub compare_by_default: bool,
    pub show_pattern_capsule: bool,
    pub reduce_assistance: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_label: Option<GuidanceLabel>,
}

impl Default for GuidanceProfile {
    fn default() -> Self {
        Self {
            auto_expand_guide: true,
            highlight_signals: false,
            compare_by_default: false,
            show_pattern_capsule: false,
            reduce_assistance: false,
            status_label: None,
        }
    }
}
