//! Key-value persistence boundary for pattern statistics.
//!
//! The engine reads the full stat map once at startup and writes the full
//! map back after every mutation; there are no partial updates. Writes are
//! best-effort: a failure is logged and the in-memory state stays
//! authoritative until the next successful write.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::types::PatternStat;

/// Storage key for the serialized pattern stat map
pub const PATTERN_STATS_KEY: &str = "algoscope_pattern_stats";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Minimal key-value blob store the engine persists into.
pub trait PatternStore: Send {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// In-memory reference store, also used by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatternStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Read the persisted stat map. Missing or unreadable data yields an empty
/// map; a corrupt blob is not fatal to startup.
pub(crate) fn load_stats(store: &dyn PatternStore) -> BTreeMap<String, PatternStat> {
    match store.get(PATTERN_STATS_KEY) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, "persisted pattern stats are corrupt, starting empty");
                BTreeMap::new()
            }
        },
        Ok(None) => BTreeMap::new(),
        Err(err) => {
            warn!(error = %err, "failed to read pattern stats, starting empty");
            BTreeMap::new()
        }
    }
}

/// Write the full stat map through to the store. Best-effort: failures are
/// logged and never roll back the in-memory state.
pub(crate) fn save_stats(store: &mut dyn PatternStore, stats: &BTreeMap<String, PatternStat>) {
    let value = match serde_json::to_value(stats) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "failed to serialize pattern stats");
            return;
        }
    };
    if let Err(err) = store.set(PATTERN_STATS_KEY, value) {
        warn!(error = %err, "failed to persist pattern stats");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_round_trip_through_memory_store() {
        let mut store = MemoryStore::new();
        let mut stats = BTreeMap::new();
        let mut stat = PatternStat::new(Utc::now());
        stat.attempts = 2;
        stat.confidence = 55.0;
        stats.insert("pair-sum".to_string(), stat);

        save_stats(&mut store, &stats);
        let loaded = load_stats(&store);
        assert_eq!(loaded, stats);
    }

    #[test]
    fn test_missing_blob_loads_empty() {
        let store = MemoryStore::new();
        assert!(load_stats(&store).is_empty());
    }

    #[test]
    fn test_corrupt_blob_loads_empty() {
        let mut store = MemoryStore::new();
        store
            .set(PATTERN_STATS_KEY, json!("definitely not a stat map"))
            .unwrap();
        assert!(load_stats(&store).is_empty());
    }
}
