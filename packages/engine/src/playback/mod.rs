//! Playback control: a cursor-based state machine over one generated trace,
//! or two traces sharing a single cursor in compare mode.
//!
//! The state machine itself is synchronous; auto-advance is driven by the
//! cancellable timer task in [`timer`].

pub mod timer;

pub use timer::AutoAdvance;

use serde::Serialize;
use tracing::debug;

use crate::types::{Step, Strategy, Trace, TracePair, DEFAULT_TICK_INTERVAL_MS};

/// Lifecycle of a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No trace loaded
    Idle,
    /// Trace loaded, cursor at the first step
    Ready,
    /// Timer armed, cursor auto-advances
    Playing,
    Paused,
    /// Cursor reached the last index
    AtEnd,
}

impl PlaybackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::AtEnd => "atend",
        }
    }
}

#[derive(Debug, Clone)]
enum Loaded {
    None,
    Single(Trace),
    Pair(TracePair),
}

/// Cursor-based state machine over one trace (single mode) or two traces
/// sharing one cursor (compare mode).
#[derive(Debug)]
pub struct PlaybackController {
    loaded: Loaded,
    cursor: usize,
    state: PlaybackState,
    interval_ms: u64,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackController {
    pub fn new() -> Self {
        Self {
            loaded: Loaded::None,
            cursor: 0,
            state: PlaybackState::Idle,
            interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn has_trace(&self) -> bool {
        !matches!(self.loaded, Loaded::None)
    }

    pub fn is_compare(&self) -> bool {
        matches!(self.loaded, Loaded::Pair(_))
    }

    /// Number of cursor positions. In compare mode the cursor spans the
    /// longer of the two traces.
    pub fn len(&self) -> usize {
        match &self.loaded {
            Loaded::None => 0,
            Loaded::Single(trace) => trace.len(),
            Loaded::Pair(pair) => pair.brute.len().max(pair.optimal.len()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn last_index(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Load a single trace. Any state transitions to `Ready`, cursor 0.
    /// Callers driving a timer must cancel it before swapping data.
    pub fn load(&mut self, trace: Trace) {
        self.loaded = Loaded::Single(trace);
        self.cursor = 0;
        self.state = PlaybackState::Ready;
        debug!(state = self.state.as_str(), "trace loaded");
    }

    /// Load a brute/optimal pair for compare mode. One cursor drives both.
    pub fn load_pair(&mut self, pair: TracePair) {
        self.loaded = Loaded::Pair(pair);
        self.cursor = 0;
        self.state = PlaybackState::Ready;
        debug!(state = self.state.as_str(), "trace pair loaded");
    }

    /// `Ready`/`Paused` -> `Playing`. Returns whether the transition
    /// happened; `AtEnd` and `Idle` are no-ops.
    pub fn play(&mut self) -> bool {
        match self.state {
            PlaybackState::Ready | PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                true
            }
            _ => false,
        }
    }

    /// `Playing` -> `Paused`.
    pub fn pause(&mut self) -> bool {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            true
        } else {
            false
        }
    }

    /// Advance the cursor by one while `Playing`. Fired by the timer task.
    /// Reaching the last index transitions to `AtEnd`; a tick that starts at
    /// the last index transitions without incrementing further.
    pub fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        let last = self.last_index();
        if self.cursor < last {
            self.cursor += 1;
        }
        if self.cursor >= last {
            self.state = PlaybackState::AtEnd;
        }
        true
    }

    /// Clamp `index` to `[0, len - 1]` and move the cursor. Disallowed while
    /// `Playing` (callers pause first); out-of-range indexes are clamped,
    /// never an error. Returns the resulting cursor.
    pub fn seek(&mut self, index: usize) -> usize {
        if self.state == PlaybackState::Idle {
            return 0;
        }
        if self.state == PlaybackState::Playing {
            debug!(index, "seek ignored while playing");
            return self.cursor;
        }
        self.cursor = index.min(self.last_index());
        self.state = if self.cursor == self.last_index() {
            PlaybackState::AtEnd
        } else if self.cursor == 0 {
            PlaybackState::Ready
        } else {
            PlaybackState::Paused
        };
        self.cursor
    }

    /// Any state with a loaded trace -> `Ready`, cursor 0.
    pub fn reset(&mut self) -> bool {
        if !self.has_trace() {
            return false;
        }
        self.cursor = 0;
        self.state = PlaybackState::Ready;
        true
    }

    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms.max(1);
    }

    /// The step under the cursor in single mode.
    pub fn current_step(&self) -> Option<&Step> {
        match &self.loaded {
            Loaded::Single(trace) => trace.step(self.cursor),
            Loaded::Pair(pair) => lenient_step(&pair.optimal, self.cursor),
            Loaded::None => None,
        }
    }

    /// The step under the cursor for one strategy. In compare mode the
    /// shared cursor may run past the shorter trace; such a lookup resolves
    /// to that trace's first step rather than failing. Known rough edge,
    /// kept as the documented behavior.
    pub fn step_for(&self, strategy: Strategy) -> Option<&Step> {
        match &self.loaded {
            Loaded::None => None,
            Loaded::Single(trace) => {
                if trace.strategy() == strategy {
                    lenient_step(trace, self.cursor)
                } else {
                    None
                }
            }
            Loaded::Pair(pair) => lenient_step(pair.trace_for(strategy), self.cursor),
        }
    }
}

fn lenient_step(trace: &Trace, cursor: usize) -> Option<&Step> {
    trace.step(cursor).or_else(|| trace.steps().first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace;
    use crate::types::{ProblemFamily, ProblemInput};

    fn sample_pair() -> TracePair {
        trace::generate(
            ProblemFamily::PairSum,
            &ProblemInput::Numbers {
                values: vec![2, 7, 11, 15],
                target: 9,
            },
        )
        .unwrap()
    }

    fn long_pair() -> TracePair {
        // No match: brute enumerates all 6 pairs, optimal runs 8 steps.
        trace::generate(
            ProblemFamily::PairSum,
            &ProblemInput::Numbers {
                values: vec![1, 2, 3, 4],
                target: 100,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_initial_state_is_idle() {
        let controller = PlaybackController::new();
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(!controller.has_trace());
        assert!(controller.current_step().is_none());
    }

    #[test]
    fn test_play_without_trace_is_noop() {
        let mut controller = PlaybackController::new();
        assert!(!controller.play());
        assert_eq!(controller.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_load_resets_cursor_and_state() {
        let mut controller = PlaybackController::new();
        controller.load(sample_pair().optimal);
        controller.play();
        controller.tick();

        controller.load(sample_pair().brute);
        assert_eq!(controller.state(), PlaybackState::Ready);
        assert_eq!(controller.cursor(), 0);
    }

    #[test]
    fn test_tick_advances_and_stops_at_end() {
        let mut controller = PlaybackController::new();
        controller.load(sample_pair().optimal); // 2 steps
        controller.play();

        assert!(controller.tick());
        assert_eq!(controller.cursor(), 1);
        assert_eq!(controller.state(), PlaybackState::AtEnd);

        // Further ticks neither advance nor fire.
        assert!(!controller.tick());
        assert_eq!(controller.cursor(), 1);
    }

    #[test]
    fn test_tick_at_last_index_does_not_increment() {
        // A one-step trace is Ready with the cursor already on the last
        // index; the first tick must end playback without moving it.
        let mut controller = PlaybackController::new();
        controller.load(sample_pair().brute);
        assert_eq!(controller.len(), 1);

        controller.play();
        controller.tick();
        assert_eq!(controller.cursor(), 0);
        assert_eq!(controller.state(), PlaybackState::AtEnd);
    }

    #[test]
    fn test_play_from_at_end_is_noop() {
        let mut controller = PlaybackController::new();
        controller.load(sample_pair().optimal);
        controller.seek(controller.len() - 1);
        assert_eq!(controller.state(), PlaybackState::AtEnd);

        assert!(!controller.play());
        assert_eq!(controller.state(), PlaybackState::AtEnd);
    }

    #[test]
    fn test_seek_clamps_to_range() {
        let mut controller = PlaybackController::new();
        controller.load(long_pair().brute); // 6 steps

        assert_eq!(controller.seek(999), 5);
        assert_eq!(controller.state(), PlaybackState::AtEnd);

        assert_eq!(controller.seek(3), 3);
        assert_eq!(controller.state(), PlaybackState::Paused);

        assert_eq!(controller.seek(0), 0);
        assert_eq!(controller.state(), PlaybackState::Ready);
    }

    #[test]
    fn test_seek_while_playing_is_ignored() {
        let mut controller = PlaybackController::new();
        controller.load(long_pair().brute);
        controller.play();
        controller.tick();

        let cursor = controller.cursor();
        assert_eq!(controller.seek(4), cursor);
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut controller = PlaybackController::new();
        controller.load(long_pair().brute);
        controller.play();
        controller.tick();
        assert!(controller.pause());
        assert_eq!(controller.state(), PlaybackState::Paused);

        assert!(controller.play());
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_reset_returns_to_ready() {
        let mut controller = PlaybackController::new();
        controller.load(long_pair().brute);
        controller.seek(4);
        assert!(controller.reset());
        assert_eq!(controller.state(), PlaybackState::Ready);
        assert_eq!(controller.cursor(), 0);

        let mut empty = PlaybackController::new();
        assert!(!empty.reset());
    }

    #[test]
    fn test_compare_mode_shares_cursor_over_longer_trace() {
        let mut controller = PlaybackController::new();
        let pair = long_pair();
        let (brute_len, optimal_len) = (pair.brute.len(), pair.optimal.len());
        controller.load_pair(pair);

        assert_eq!(controller.len(), brute_len.max(optimal_len));
        assert!(controller.is_compare());
    }

    #[test]
    fn test_compare_mode_short_trace_falls_back_to_first_step() {
        let mut controller = PlaybackController::new();
        let pair = sample_pair(); // brute: 1 step, optimal: 2 steps
        controller.load_pair(pair);
        controller.seek(1);

        let brute_step = controller.step_for(Strategy::Brute).unwrap();
        assert_eq!(brute_step.index, 1, "past-the-end resolves to first step");

        let optimal_step = controller.step_for(Strategy::Optimal).unwrap();
        assert_eq!(optimal_step.index, 2);
    }

    #[test]
    fn test_single_mode_step_for_other_strategy_is_none() {
        let mut controller = PlaybackController::new();
        controller.load(sample_pair().optimal);
        assert!(controller.step_for(Strategy::Brute).is_none());
        assert!(controller.step_for(Strategy::Optimal).is_some());
    }
}
