//! Pair-sum search: find two entries of an ordered number list that add up
//! to a target value.
//!
//! The brute variant enumerates all index pairs `(i, j)` with `i < j` in
//! row-major order. The optimal variant makes a single left-to-right pass
//! over the list while maintaining a value-to-index dictionary, emitting a
//! lookup step and, when the complement is absent, an insert step per index.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::types::{Pointer, StepSnapshot, Strategy, TraceBuilder, TracePair};

const BRUTE_LINE_CHECK: u32 = 5;
const BRUTE_LINE_FOUND: u32 = 6;
const OPTIMAL_LINE_LOOKUP: u32 = 5;
const OPTIMAL_LINE_FOUND: u32 = 7;
const OPTIMAL_LINE_INSERT: u32 = 9;

/// Generate the brute and optimal traces for one pair-sum instance.
///
/// Caller guarantees `values.len() >= 2`.
pub fn generate(values: &[i64], target: i64) -> TracePair {
    TracePair {
        brute: generate_brute(values, target),
        optimal: generate_optimal(values, target),
    }
}

fn generate_brute(values: &[i64], target: i64) -> crate::types::Trace {
    let mut builder = TraceBuilder::new(Strategy::Brute);

    'outer: for i in 0..values.len() {
        for j in (i + 1)..values.len() {
            let sum = values[i] + values[j];
            let is_match = sum == target;

            let narrative = if is_match {
                format!("Target {target} found at indices {i} and {j}!")
            } else {
                format!(
                    "Checking index i={i} (val={vi}) and j={j} (val={vj}). Sum: {sum}",
                    vi = values[i],
                    vj = values[j],
                )
            };
            let line = if is_match { BRUTE_LINE_FOUND } else { BRUTE_LINE_CHECK };

            builder.push(
                narrative,
                line,
                StepSnapshot::new(vec![Pointer::at("i", i), Pointer::at("j", j)])
                    .with_found(is_match)
                    .with_value("sum", json!(sum))
                    .with_value("target", json!(target)),
            );

            // Stop at the first matching pair; a no-match run simply ends
            // after the last pair without a found step.
            if is_match {
                break 'outer;
            }
        }
    }

    builder.finish()
}

fn generate_optimal(values: &[i64], target: i64) -> crate::types::Trace {
    let mut builder = TraceBuilder::new(Strategy::Optimal);
    let mut seen: BTreeMap<i64, usize> = BTreeMap::new();

    for (i, &value) in values.iter().enumerate() {
        let complement = target - value;
        let found_at = seen.get(&complement).copied();
        let is_match = found_at.is_some();

        let narrative = match found_at {
            Some(index) => format!("Found complement {complement} at index {index}!"),
            None => format!(
                "Iterating index i={i} (val={value}). Looking for complement: {complement}"
            ),
        };
        let line = if is_match { OPTIMAL_LINE_FOUND } else { OPTIMAL_LINE_LOOKUP };

        // Lookup step: dictionary snapshot taken before any insertion.
        builder.push(
            narrative,
            line,
            StepSnapshot::new(vec![Pointer::at("i", i)])
                .with_map(map_snapshot(&seen))
                .with_found(is_match)
                .with_value("complement", json!(complement))
                .with_value("target", json!(target)),
        );

        if is_match {
            break;
        }

        seen.insert(value, i);

        // Insert step: snapshot reflects the dictionary after insertion.
        builder.push(
            format!("Complement not found. Adding {value} to the hash map."),
            OPTIMAL_LINE_INSERT,
            StepSnapshot::new(vec![Pointer::at("i", i)]).with_map(map_snapshot(&seen)),
        );
    }

    builder.finish()
}

fn map_snapshot(seen: &BTreeMap<i64, usize>) -> BTreeMap<String, Value> {
    seen.iter()
        .map(|(value, index)| (value.to_string(), json!(index)))
        .collect()
}
