//! Per-pattern mastery tracking: activity aggregation, confidence scoring,
//! time decay, transfer scoring, and recommendations.

pub mod config;
pub mod engine;
pub mod persistence;
pub mod types;

pub use config::{
    ConfidenceWeights, DecayParams, GuidanceBands, MasteryConfig, RecommendThresholds, TransferMap,
};
pub use engine::MasteryEngine;
pub use persistence::{MemoryStore, PatternStore, StoreError, PATTERN_STATS_KEY};
pub use types::{
    ActivityMetric, GuidanceLabel, GuidanceProfile, PatternStat, Recommendation,
    RecommendationKind,
};
