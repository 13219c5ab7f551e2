//! Duplicate-free maximal substring: find the longest window of a text that
//! repeats no character.
//!
//! The brute variant enumerates every contiguous substring in order of
//! increasing start then end, scanning each once for a repeat. The optimal
//! variant expands a two-pointer window, contracting from the left while the
//! incoming character is already present, then admitting it. All character
//! indexing is on `char` boundaries.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde_json::{json, Value};

use crate::types::{Pointer, StepSnapshot, Strategy, TraceBuilder, TracePair};

const BRUTE_LINE_VALID: u32 = 10;
const BRUTE_LINE_REPEAT: u32 = 15;
const OPTIMAL_LINE_SHRINK: u32 = 10;
const OPTIMAL_LINE_EXPAND: u32 = 12;
const OPTIMAL_LINE_NEW_MAX: u32 = 13;

/// Generate the brute and optimal traces for one substring instance.
///
/// Caller guarantees `text` is non-empty.
pub fn generate(text: &str) -> TracePair {
    let chars: Vec<char> = text.chars().collect();
    TracePair {
        brute: generate_brute(&chars),
        optimal: generate_optimal(&chars),
    }
}

fn generate_brute(chars: &[char]) -> crate::types::Trace {
    let mut builder = TraceBuilder::new(Strategy::Brute);
    let mut max_len = 0usize;

    for i in 0..chars.len() {
        for j in i..chars.len() {
            let sub: String = chars[i..=j].iter().collect();
            let has_repeat = {
                let mut seen = HashSet::new();
                chars[i..=j].iter().any(|c| !seen.insert(*c))
            };

            let len = j - i + 1;
            let is_current_max = !has_repeat && len > max_len;
            if is_current_max {
                max_len = len;
            }

            let narrative = if has_repeat {
                format!("Substring \"{sub}\" has repeating characters.")
            } else {
                format!("Substring \"{sub}\" is valid. Length: {len}")
            };
            let line = if has_repeat { BRUTE_LINE_REPEAT } else { BRUTE_LINE_VALID };

            builder.push(
                narrative,
                line,
                StepSnapshot::new(vec![Pointer::at("i", i), Pointer::at("j", j)])
                    .with_window(i, j)
                    .with_found(is_current_max)
                    .with_value("currentLen", json!(len))
                    .with_value("maxLen", json!(max_len))
                    .with_value("hasRepeat", json!(has_repeat)),
            );
        }
    }

    builder.finish()
}

fn generate_optimal(chars: &[char]) -> crate::types::Trace {
    let mut builder = TraceBuilder::new(Strategy::Optimal);
    let mut window: BTreeSet<char> = BTreeSet::new();
    let mut left = 0usize;
    let mut max_len = 0usize;

    for right in 0..chars.len() {
        let incoming = chars[right];

        // One step per left-pointer contraction while the incoming character
        // is still inside the window.
        while window.contains(&incoming) {
            let removed = chars[left];
            builder.push(
                format!(
                    "Duplicate detected! Removing \"{removed}\" at index {left} and shrinking window."
                ),
                OPTIMAL_LINE_SHRINK,
                StepSnapshot::new(vec![Pointer::at("l", left), Pointer::at("r", right)])
                    .with_window(left, right)
                    .with_map(set_snapshot(&window))
                    .with_value("currentLen", json!(right - left))
                    .with_value("maxLen", json!(max_len))
                    .with_value("duplicateChar", json!(incoming.to_string())),
            );
            window.remove(&removed);
            left += 1;
        }

        window.insert(incoming);
        let current_len = right - left + 1;
        let is_new_max = current_len > max_len;
        if is_new_max {
            max_len = current_len;
        }

        let spelled: String = chars[left..=right].iter().collect();
        let narrative = if is_new_max {
            format!("New maximum length found! Window: \"{spelled}\", Length: {current_len}")
        } else {
            format!("Expanding window to include \"{incoming}\" at index {right}. Window: \"{spelled}\"")
        };
        let line = if is_new_max { OPTIMAL_LINE_NEW_MAX } else { OPTIMAL_LINE_EXPAND };

        builder.push(
            narrative,
            line,
            StepSnapshot::new(vec![Pointer::at("l", left), Pointer::at("r", right)])
                .with_window(left, right)
                .with_map(set_snapshot(&window))
                .with_found(is_new_max)
                .with_value("currentLen", json!(current_len))
                .with_value("maxLen", json!(max_len)),
        );
    }

    builder.finish()
}

fn set_snapshot(window: &BTreeSet<char>) -> BTreeMap<String, Value> {
    window.iter().map(|c| (c.to_string(), json!(true))).collect()
}
