//! Common Types and Constants
//!
//! Shared data structures used across trace generation and playback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ==================== Constants ====================

/// Default auto-advance interval between playback ticks (milliseconds)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

// ==================== Problem Identification ====================

/// Algorithm family supported by the trace generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemFamily {
    PairSum,
    DistinctSubstring,
}

impl ProblemFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PairSum => "pair-sum",
            Self::DistinctSubstring => "distinct-substring",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pair-sum" => Some(Self::PairSum),
            "distinct-substring" => Some(Self::DistinctSubstring),
            _ => None,
        }
    }
}

/// Concrete, validated input for one problem instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ProblemInput {
    /// Ordered list of numbers plus a target sum (pair-sum family)
    #[serde(rename_all = "camelCase")]
    Numbers { values: Vec<i64>, target: i64 },
    /// Text to scan for a duplicate-free window (substring family)
    #[serde(rename_all = "camelCase")]
    Text { value: String },
}

/// Identifies the family and concrete input used to generate one trace pair.
///
/// Not retained by the engine beyond the call that consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemInstance {
    pub family: ProblemFamily,
    pub input: ProblemInput,
}

// ==================== Step Types ====================

/// Execution strategy a trace belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Brute,
    Optimal,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brute => "brute",
            Self::Optimal => "optimal",
        }
    }
}

/// Named cursor position at one instant of execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pointer {
    /// Display identifier, e.g. "i", "j", "l", "r"
    pub id: String,
    /// Index into the input, or None when the cursor points nowhere
    pub index: Option<usize>,
}

impl Pointer {
    pub fn at(id: &str, index: usize) -> Self {
        Self {
            id: id.to_string(),
            index: Some(index),
        }
    }
}

/// Contiguous window over the input, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRange {
    pub left: usize,
    pub right: usize,
}

/// Frozen record of algorithm state at one instant.
///
/// `map_state` and `window_range` are owned copies taken at emission time.
/// Once a snapshot is stored on a [`Step`] it shares no live data with any
/// other step of the same trace; a learner scrubbing backward must observe
/// exactly what was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSnapshot {
    /// Named cursor positions
    pub pointers: Vec<Pointer>,
    /// Current window, when the algorithm maintains one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_range: Option<WindowRange>,
    /// Auxiliary dictionary/set contents at this instant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_state: Option<BTreeMap<String, Value>>,
    /// Marks a terminal/successful instant
    pub found: bool,
    /// Free-form bag of named scalars (sums, lengths, targets, flags)
    pub values: BTreeMap<String, Value>,
}

impl StepSnapshot {
    pub fn new(pointers: Vec<Pointer>) -> Self {
        Self {
            pointers,
            window_range: None,
            map_state: None,
            found: false,
            values: BTreeMap::new(),
        }
    }

    pub fn with_window(mut self, left: usize, right: usize) -> Self {
        self.window_range = Some(WindowRange { left, right });
        self
    }

    pub fn with_map(mut self, map: BTreeMap<String, Value>) -> Self {
        self.map_state = Some(map);
        self
    }

    pub fn with_found(mut self, found: bool) -> Self {
        self.found = found;
        self
    }

    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

/// One instrumented instant of an algorithm's execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// 1-based position in its trace, strictly increasing, no gaps
    pub index: u32,
    /// Human-readable description of what happened at this instant
    pub narrative: String,
    /// Opaque reference to the logical source line being executed
    pub highlighted_line: u32,
    pub snapshot: StepSnapshot,
}

// ==================== Trace Types ====================

/// Ordered, non-empty sequence of steps for one strategy of one problem
/// instance. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    strategy: Strategy,
    steps: Vec<Step>,
}

impl Trace {
    pub(crate) fn new(strategy: Strategy, steps: Vec<Step>) -> Self {
        debug_assert!(!steps.is_empty(), "a trace must hold at least one step");
        Self { strategy, steps }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn first(&self) -> &Step {
        &self.steps[0]
    }

    pub fn last(&self) -> &Step {
        &self.steps[self.steps.len() - 1]
    }
}

/// Brute and optimal traces generated together for one problem instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracePair {
    pub brute: Trace,
    pub optimal: Trace,
}

impl TracePair {
    pub fn trace_for(&self, strategy: Strategy) -> &Trace {
        match strategy {
            Strategy::Brute => &self.brute,
            Strategy::Optimal => &self.optimal,
        }
    }
}

/// Accumulates steps for one strategy, assigning contiguous 1-based indexes.
#[derive(Debug)]
pub(crate) struct TraceBuilder {
    strategy: Strategy,
    steps: Vec<Step>,
}

impl TraceBuilder {
    pub(crate) fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            steps: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, narrative: String, highlighted_line: u32, snapshot: StepSnapshot) {
        let index = self.steps.len() as u32 + 1;
        self.steps.push(Step {
            index,
            narrative,
            highlighted_line,
            snapshot,
        });
    }

    pub(crate) fn finish(self) -> Trace {
        Trace::new(self.strategy, self.steps)
    }
}

// ==================== Tests ====================
