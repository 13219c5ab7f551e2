//! Mastery scoring core.
//!
//! Turns the UI's discrete activity events into a bounded per-pattern
//! confidence signal, applies time-based decay, relates foundation and
//! applied skills through a transfer score, and derives a single best
//! recommendation. All state lives in one in-memory map with a write-through
//! persistence side effect.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::config::MasteryConfig;
use super::persistence::{load_stats, save_stats, PatternStore};
use super::types::{
    ActivityMetric, GuidanceLabel, GuidanceProfile, PatternStat, Recommendation,
    RecommendationKind,
};

pub struct MasteryEngine {
    config: MasteryConfig,
    stats: BTreeMap<String, PatternStat>,
    store: Option<Box<dyn PatternStore>>,
}

impl MasteryEngine {
    pub fn new(config: MasteryConfig) -> Self {
        Self {
            config,
            stats: BTreeMap::new(),
            store: None,
        }
    }

    /// Build an engine backed by a key-value store. The persisted stat map
    /// is read once here; every later mutation writes the full map back.
    pub fn with_store(config: MasteryConfig, store: Box<dyn PatternStore>) -> Self {
        let stats = load_stats(store.as_ref());
        Self {
            config,
            stats,
            store: Some(store),
        }
    }

    pub fn config(&self) -> &MasteryConfig {
        &self.config
    }

    /// Read-only view for the rendering layer.
    pub fn stats(&self) -> &BTreeMap<String, PatternStat> {
        &self.stats
    }

    pub fn stat(&self, pattern: &str) -> Option<&PatternStat> {
        self.stats.get(pattern)
    }

    /// Record one activity event with the default value of 1.
    pub fn record_activity(&mut self, pattern: &str, metric: ActivityMetric) {
        self.record_activity_at(pattern, metric, 1.0, Utc::now());
    }

    /// Record one activity event with an explicit value.
    pub fn record_activity_with(&mut self, pattern: &str, metric: ActivityMetric, value: f64) {
        self.record_activity_at(pattern, metric, value, Utc::now());
    }

    /// Clock-injected variant of [`Self::record_activity_with`].
    pub fn record_activity_at(
        &mut self,
        pattern: &str,
        metric: ActivityMetric,
        value: f64,
        now: DateTime<Utc>,
    ) {
        let stat = self
            .stats
            .entry(pattern.to_string())
            .or_insert_with(|| PatternStat::new(now));

        match metric {
            ActivityMetric::Attempts => stat.attempts += whole(value),
            ActivityMetric::ReplayCount => stat.replay_count += whole(value),
            ActivityMetric::BruteFirstCount => stat.brute_first_count += whole(value),
            ActivityMetric::Sessions => stat.sessions += whole(value),
            ActivityMetric::CompareModeUsage => stat.compare_mode_usage += whole(value),
            ActivityMetric::ChecklistCompletionRate => stat.checklist_completion_rate = value,
            ActivityMetric::GuideSectionCompletionRate => {
                stat.guide_section_completion_rate = value
            }
            ActivityMetric::AvgTimeBeforeVisualization => {
                stat.avg_time_before_visualization = value
            }
        }

        stat.confidence = compute_confidence(&self.config, stat);
        stat.last_practiced = now;

        self.persist();
    }

    /// Fold one thinking-time sample (seconds spent before the first
    /// visualization) into the running average.
    pub fn record_thinking_time(&mut self, pattern: &str, seconds: f64) {
        self.record_thinking_time_at(pattern, seconds, Utc::now());
    }

    pub fn record_thinking_time_at(&mut self, pattern: &str, seconds: f64, now: DateTime<Utc>) {
        let (current_avg, attempts) = self
            .stats
            .get(pattern)
            .map(|s| (s.avg_time_before_visualization, s.attempts.max(1)))
            .unwrap_or((0.0, 1));
        let new_avg = (current_avg * (attempts - 1) as f64 + seconds) / attempts as f64;
        self.record_activity_at(
            pattern,
            ActivityMetric::AvgTimeBeforeVisualization,
            new_avg,
            now,
        );
    }

    /// Reduce the confidence of every pattern not practiced within the grace
    /// window. One pass subtracts at most `max_loss` per pattern, floored at
    /// zero.
    ///
    /// Not idempotent within a day boundary: invoking it twice in the same
    /// session re-subtracts from the already-reduced value. Callers invoke
    /// it once per process start.
    pub fn apply_decay(&mut self, now: DateTime<Utc>) {
        let grace = self.config.decay.grace_days as f64;
        let max_loss = self.config.decay.max_loss;
        let mut changed = false;

        for stat in self.stats.values_mut() {
            let days_since = (now - stat.last_practiced).num_seconds() as f64 / 86_400.0;
            if days_since <= grace {
                continue;
            }
            let loss = (days_since - grace).floor().min(max_loss);
            if loss > 0.0 {
                stat.confidence = (stat.confidence - loss).max(0.0);
                changed = true;
            }
        }

        if changed {
            self.persist();
        }
    }

    /// Relate a pattern's confidence to its counterpart across the
    /// foundation/applied mapping and store the resulting transfer score.
    /// Patterns absent from the mapping (or never practiced) have none.
    pub fn transfer_score(&mut self, pattern: &str) -> Option<f64> {
        let own_confidence = self.stats.get(pattern)?.confidence;

        let (foundation_conf, applied_conf) =
            if let Some(applied) = self.config.transfer.applied_of(pattern) {
                // Foundation side: average the applied siblings.
                let total: f64 = applied
                    .iter()
                    .map(|slug| self.stats.get(slug).map_or(0.0, |s| s.confidence))
                    .sum();
                let average = if applied.is_empty() {
                    0.0
                } else {
                    total / applied.len() as f64
                };
                (own_confidence, average)
            } else if let Some(foundation) = self.config.transfer.foundation_of(pattern) {
                let foundation_conf = self
                    .stats
                    .get(foundation)
                    .map_or(0.0, |s| s.confidence);
                (foundation_conf, own_confidence)
            } else {
                return None;
            };

        let score =
            (foundation_conf.min(applied_conf) - 0.5 * (foundation_conf - applied_conf).abs())
                .max(0.0);

        if let Some(stat) = self.stats.get_mut(pattern) {
            stat.foundation_confidence = Some(foundation_conf);
            stat.applied_confidence = Some(applied_conf);
            stat.transfer_score = Some(score);
        }

        self.persist();
        Some(score)
    }

    /// Evaluate recommendation candidates in fixed precedence and return the
    /// first match: transfer gap, then decay, then weak spot.
    pub fn recommend(&self) -> Option<Recommendation> {
        self.recommend_at(Utc::now())
    }

    pub fn recommend_at(&self, now: DateTime<Utc>) -> Option<Recommendation> {
        let thresholds = &self.config.thresholds;

        // 1. Transfer gaps.
        for stat in self.stats.values() {
            let foundation = stat.foundation_confidence.unwrap_or(0.0);
            let applied = stat.applied_confidence.unwrap_or(0.0);

            if applied > thresholds.strong && foundation < thresholds.weak {
                return Some(Recommendation {
                    kind: RecommendationKind::Foundation,
                    message: "Strong application, but weak theory detected in this area."
                        .to_string(),
                    target_link: "/foundations".to_string(),
                    label: "Review Theory".to_string(),
                });
            }
            if foundation > thresholds.strong && applied < thresholds.weak {
                return Some(Recommendation {
                    kind: RecommendationKind::Weakness,
                    message: "Theory is strong, but application lags. Apply your knowledge now."
                        .to_string(),
                    target_link: "/problems".to_string(),
                    label: "Solve Problems".to_string(),
                });
            }
        }

        // 2. Stale patterns.
        let grace_seconds = self.config.decay.grace_days * 86_400;
        for (pattern, stat) in &self.stats {
            if (now - stat.last_practiced).num_seconds() > grace_seconds {
                return Some(Recommendation {
                    kind: RecommendationKind::Decay,
                    message: format!("Skill fade detected: {pattern}. Refresh your memory."),
                    target_link: format!("/mastery/{pattern}"),
                    label: "Restore Skill".to_string(),
                });
            }
        }

        // 3. Weakest attempted pattern below the focus threshold.
        let weakest = self
            .stats
            .iter()
            .filter(|(_, stat)| stat.attempts > 0 && stat.confidence < thresholds.focus)
            .min_by(|(_, a), (_, b)| a.confidence.total_cmp(&b.confidence));

        weakest.map(|(pattern, _)| Recommendation {
            kind: RecommendationKind::Weakness,
            message: format!("Confidence low in {pattern}. Boost it now."),
            target_link: format!("/mastery/{pattern}"),
            label: "Train Now".to_string(),
        })
    }

    /// Map a pattern's confidence band to the amount of guidance the UI
    /// should surface. Unknown patterns get the focus-area treatment.
    pub fn guidance(&self, pattern: &str) -> GuidanceProfile {
        let confidence = self.stats.get(pattern).map_or(0.0, |s| s.confidence);
        let bands = &self.config.guidance;

        if confidence < bands.focus_below {
            GuidanceProfile {
                auto_expand_guide: true,
                highlight_signals: true,
                compare_by_default: true,
                show_pattern_capsule: true,
                reduce_assistance: false,
                status_label: Some(GuidanceLabel::FocusArea),
            }
        } else if confidence >= bands.reduce_at {
            GuidanceProfile {
                auto_expand_guide: false,
                highlight_signals: false,
                compare_by_default: false,
                show_pattern_capsule: false,
                reduce_assistance: true,
                status_label: Some(GuidanceLabel::StrongPattern),
            }
        } else {
            GuidanceProfile::default()
        }
    }

    /// Every behavioral insight the current stats support, in a fixed order.
    pub fn insights(&self, pattern: &str) -> Vec<String> {
        let stat = match self.stats.get(pattern) {
            Some(stat) if stat.attempts >= 1 => stat,
            _ => {
                return vec!["Start exploring to generate cognitive insights.".to_string()];
            }
        };

        let attempts = stat.attempts as f64;
        let mut insights = Vec::new();

        if stat.brute_first_count as f64 / attempts > 0.6 {
            insights.push(
                "You often rely on naive strategies first. Try identifying the core constraint earlier."
                    .to_string(),
            );
        }
        if stat.guide_section_completion_rate < 40.0 {
            insights.push(
                "You frequently bypass the thinking guide. Deepening your mental model can reduce replays."
                    .to_string(),
            );
        }
        if stat.replay_count as f64 / attempts > 3.0 {
            insights.push(
                "High replay count detected. Consider pausing to sketch the state transition."
                    .to_string(),
            );
        }
        if stat.checklist_completion_rate > 80.0 && stat.confidence > 70.0 {
            insights.push(
                "Excellent discipline. Your systematic approach is building strong pattern recognition."
                    .to_string(),
            );
        }

        if insights.is_empty() {
            insights
                .push("Maintain your current focus. Consistency is building neural familiarity.".to_string());
        }
        insights
    }

    fn persist(&mut self) {
        if let Some(store) = self.store.as_mut() {
            save_stats(store.as_mut(), &self.stats);
        }
    }
}

fn whole(value: f64) -> u32 {
    value.max(0.0).round() as u32
}

fn compute_confidence(config: &MasteryConfig, stat: &PatternStat) -> f64 {
    let weights = &config.confidence;
    let attempts = stat.attempts.max(1) as f64;

    let engagement =
        (stat.checklist_completion_rate + stat.guide_section_completion_rate) / 2.0;
    let discipline_penalty =
        weights.discipline_penalty * stat.brute_first_count as f64 / attempts;
    let complexity_penalty = weights.complexity_penalty * stat.replay_count as f64 / attempts;
    let familiarity_bonus =
        (stat.attempts as f64 * weights.familiarity_per_attempt).min(weights.familiarity_cap);

    (weights.base + engagement * weights.engagement_weight + familiarity_bonus
        - discipline_penalty
        - complexity_penalty)
        .clamp(0.0, 100.0)
}
