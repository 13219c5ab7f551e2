//! Property-based tests for the mastery engine.
//!
//! Tests the following invariants:
//! - Confidence bound: confidence stays in [0, 100] after any event sequence
//! - Decay bound: one decay pass removes at most `max_loss` and never goes
//!   below zero
//! - Transfer bound: the transfer score stays in [0, 100] and is zero when
//!   either side is zero
//! - Persistence round-trip: the serialized stat map reloads unchanged

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use algoscope_engine::mastery::{
    ActivityMetric, MasteryConfig, MasteryEngine, TransferMap,
};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn arb_metric() -> impl Strategy<Value = ActivityMetric> {
    prop_oneof![
        Just(ActivityMetric::Attempts),
        Just(ActivityMetric::ReplayCount),
        Just(ActivityMetric::BruteFirstCount),
        Just(ActivityMetric::Sessions),
        Just(ActivityMetric::CompareModeUsage),
        Just(ActivityMetric::ChecklistCompletionRate),
        Just(ActivityMetric::GuideSectionCompletionRate),
        Just(ActivityMetric::AvgTimeBeforeVisualization),
    ]
}

fn arb_event() -> impl Strategy<Value = (ActivityMetric, f64)> {
    arb_metric().prop_flat_map(|metric| {
        let value = if metric.overwrites() {
            (0u64..=1000u64).prop_map(|v| v as f64 / 10.0).boxed()
        } else {
            (1u64..=3u64).prop_map(|v| v as f64).boxed()
        };
        value.prop_map(move |v| (metric, v))
    })
}

fn arb_pattern() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("pair-sum".to_string()),
        Just("distinct-substring".to_string()),
        Just("graph-bfs".to_string()),
        Just("word-ladder".to_string()),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn confidence_stays_bounded_after_every_event(
        events in prop::collection::vec((arb_pattern(), arb_event()), 1..60)
    ) {
        let mut engine = MasteryEngine::new(MasteryConfig::default());
        let now = base_time();

        for (pattern, (metric, value)) in events {
            engine.record_activity_at(&pattern, metric, value, now);
            let stat = engine.stat(&pattern).unwrap();
            prop_assert!(
                (0.0..=100.0).contains(&stat.confidence),
                "confidence {} escaped [0, 100]",
                stat.confidence
            );
        }
    }

    #[test]
    fn one_decay_pass_is_bounded(
        events in prop::collection::vec((arb_pattern(), arb_event()), 1..40),
        idle_days in 0i64..400
    ) {
        let mut engine = MasteryEngine::new(MasteryConfig::default());
        let practiced = base_time();

        for (pattern, (metric, value)) in events {
            engine.record_activity_at(&pattern, metric, value, practiced);
        }

        let before: Vec<(String, f64)> = engine
            .stats()
            .iter()
            .map(|(k, s)| (k.clone(), s.confidence))
            .collect();

        engine.apply_decay(practiced + Duration::days(idle_days));

        for (pattern, old_confidence) in before {
            let new_confidence = engine.stat(&pattern).unwrap().confidence;
            prop_assert!(new_confidence >= 0.0);
            prop_assert!(new_confidence <= old_confidence);
            prop_assert!(
                old_confidence - new_confidence <= 10.0,
                "decay removed {} in one pass",
                old_confidence - new_confidence
            );
        }
    }

    #[test]
    fn transfer_score_stays_bounded(
        foundation_events in prop::collection::vec(arb_event(), 0..20),
        applied_events in prop::collection::vec(arb_event(), 0..20)
    ) {
        let config = MasteryConfig {
            transfer: TransferMap::from_pairs([("graph-bfs", vec!["word-ladder"])]),
            ..Default::default()
        };
        let mut engine = MasteryEngine::new(config);
        let now = base_time();

        engine.record_activity_at("graph-bfs", ActivityMetric::Attempts, 1.0, now);
        engine.record_activity_at("word-ladder", ActivityMetric::Attempts, 1.0, now);
        for (metric, value) in foundation_events {
            engine.record_activity_at("graph-bfs", metric, value, now);
        }
        for (metric, value) in applied_events {
            engine.record_activity_at("word-ladder", metric, value, now);
        }

        for pattern in ["graph-bfs", "word-ladder"] {
            let score = engine.transfer_score(pattern).unwrap();
            prop_assert!((0.0..=100.0).contains(&score), "score {} out of range", score);

            let stat = engine.stat(pattern).unwrap();
            let foundation = stat.foundation_confidence.unwrap();
            let applied = stat.applied_confidence.unwrap();
            if foundation == 0.0 || applied == 0.0 {
                prop_assert!(score == 0.0, "score must collapse to 0 when a side is 0");
            }
        }
    }

    #[test]
    fn stat_map_round_trips_through_json(
        events in prop::collection::vec((arb_pattern(), arb_event()), 1..40)
    ) {
        let mut engine = MasteryEngine::new(MasteryConfig::default());
        let now = base_time();
        for (pattern, (metric, value)) in events {
            engine.record_activity_at(&pattern, metric, value, now);
        }

        let blob = serde_json::to_value(engine.stats()).unwrap();
        let reloaded: std::collections::BTreeMap<String, algoscope_engine::PatternStat> =
            serde_json::from_value(blob).unwrap();
        prop_assert_eq!(&reloaded, engine.stats());
    }
}
