//! # algoscope-engine - core engine for the AlgoScope algorithm tutor
//!
//! This crate provides the pure-Rust core behind the tutor:
//!
//! - **Trace generation** - instruments two competing strategies (brute and
//!   optimal) of an algorithm family into ordered, inspectable step
//!   sequences with frozen state snapshots
//! - **Playback control** - a cursor state machine over a generated trace,
//!   with a cancellable auto-advance timer and a synchronized dual-trace
//!   compare mode
//! - **Mastery tracking** - aggregates per-pattern activity into a bounded
//!   confidence score, applies time decay, relates foundation and applied
//!   skills, and derives recommendations and guidance levels
//!
//! ## Design
//!
//! - Generation is deterministic and synchronous; identical inputs yield
//!   identical traces
//! - Each component owns only its own state and is composed by the
//!   surrounding application
//! - The playback timer is the sole asynchronous entry point and is managed
//!   as a cancellable resource
//! - Mastery state persists through a minimal key-value trait with
//!   best-effort write-through
//!
//! ## Module structure
//!
//! - [`types`] - shared data model (steps, snapshots, traces, problems)
//! - [`input`] - raw input validation with a visible default-fallback signal
//! - [`trace`] - trace generation for the supported algorithm families
//! - [`playback`] - playback state machine and auto-advance timer
//! - [`mastery`] - mastery scoring, decay, transfer, and recommendations
//!
//! ## Usage example
//!
//! ```rust
//! use algoscope_engine::mastery::{ActivityMetric, MasteryConfig, MasteryEngine};
//! use algoscope_engine::trace;
//! use algoscope_engine::types::{ProblemFamily, ProblemInput};
//!
//! let pair = trace::generate(
//!     ProblemFamily::PairSum,
//!     &ProblemInput::Numbers { values: vec![2, 7, 11, 15], target: 9 },
//! )
//! .unwrap();
//! assert_eq!(pair.optimal.len(), 2);
//!
//! let mut mastery = MasteryEngine::new(MasteryConfig::default());
//! mastery.record_activity("pair-sum", ActivityMetric::Attempts);
//! ```

pub mod input;
pub mod mastery;
pub mod playback;
pub mod trace;
pub mod types;

pub use input::{InputError, InputSource, Parsed};
pub use mastery::{
    ActivityMetric, MasteryConfig, MasteryEngine, MemoryStore, PatternStat, PatternStore,
    Recommendation, RecommendationKind, TransferMap,
};
pub use playback::{AutoAdvance, PlaybackController, PlaybackState};
pub use trace::{generate, generate_for_slug, generate_instance, GenerateError};
pub use types::{
    Pointer, ProblemFamily, ProblemInput, ProblemInstance, Step, StepSnapshot, Strategy, Trace,
    TracePair, WindowRange,
};
