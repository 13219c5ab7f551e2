//! Auto-advance timer for playback.
//!
//! The interval timer is the only asynchronous entry point of the engine and
//! is treated as a cancellable resource: it is armed on `play`, re-armed when
//! the interval changes mid-playback, and aborted on every exit from
//! `Playing` (pause, reset, reload, drop). A callback that fires after an
//! abort races only up to the lock; it re-checks the playback state before
//! advancing, so it can never act on a swapped trace.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use super::PlaybackController;
use crate::types::{Trace, TracePair};

/// Owns a shared [`PlaybackController`] and the timer task driving it.
pub struct AutoAdvance {
    controller: Arc<RwLock<PlaybackController>>,
    timer: Option<JoinHandle<()>>,
}

impl AutoAdvance {
    pub fn new() -> Self {
        Self {
            controller: Arc::new(RwLock::new(PlaybackController::new())),
            timer: None,
        }
    }

    /// Shared handle for readers (the rendering layer).
    pub fn controller(&self) -> Arc<RwLock<PlaybackController>> {
        Arc::clone(&self.controller)
    }

    /// Cancel any armed timer, then swap in a new trace.
    pub async fn load(&mut self, trace: Trace) {
        self.disarm();
        self.controller.write().await.load(trace);
    }

    /// Cancel any armed timer, then swap in a trace pair for compare mode.
    pub async fn load_pair(&mut self, pair: TracePair) {
        self.disarm();
        self.controller.write().await.load_pair(pair);
    }

    /// Start auto-advancing. No-op unless the controller accepts the
    /// transition.
    pub async fn play(&mut self) {
        let (started, interval_ms) = {
            let mut controller = self.controller.write().await;
            (controller.play(), controller.interval_ms())
        };
        if started {
            self.arm(interval_ms);
        }
    }

    pub async fn pause(&mut self) {
        self.disarm();
        self.controller.write().await.pause();
    }

    pub async fn seek(&mut self, index: usize) -> usize {
        self.controller.write().await.seek(index)
    }

    pub async fn reset(&mut self) {
        self.disarm();
        self.controller.write().await.reset();
    }

    /// Change the tick interval, re-arming the timer when playback is
    /// currently running.
    pub async fn set_interval_ms(&mut self, interval_ms: u64) {
        let playing = {
            let mut controller = self.controller.write().await;
            controller.set_interval_ms(interval_ms);
            controller.is_playing()
        };
        if playing {
            self.disarm();
            self.arm(interval_ms.max(1));
        }
    }

    fn arm(&mut self, interval_ms: u64) {
        self.disarm();
        let controller = Arc::clone(&self.controller);
        debug!(interval_ms, "arming playback timer");
        self.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // interval yields immediately on the first call; consume it so
            // the first advance happens one full period after play.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let mut controller = controller.write().await;
                if !controller.tick() {
                    break;
                }
                if !controller.is_playing() {
                    break;
                }
            }
        }));
    }

    fn disarm(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            debug!("playback timer cancelled");
        }
    }
}

impl Default for AutoAdvance {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackState;
    use crate::trace;
    use crate::types::{ProblemFamily, ProblemInput};

    const TICK_MS: u64 = 10;

    fn long_trace() -> Trace {
        trace::generate(
            ProblemFamily::PairSum,
            &ProblemInput::Numbers {
                values: vec![1, 2, 3, 4, 5],
                target: 1000,
            },
        )
        .unwrap()
        .brute
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(TICK_MS * 5)).await;
    }

    #[tokio::test]
    async fn test_play_advances_cursor_automatically() {
        let mut player = AutoAdvance::new();
        player.load(long_trace()).await;
        player.set_interval_ms(TICK_MS).await;
        player.play().await;

        settle().await;

        let controller = player.controller();
        let cursor = controller.read().await.cursor();
        assert!(cursor > 0, "timer should have advanced the cursor");
    }

    #[tokio::test]
    async fn test_pause_cancels_the_timer() {
        let mut player = AutoAdvance::new();
        player.load(long_trace()).await;
        player.set_interval_ms(TICK_MS).await;
        player.play().await;
        settle().await;
        player.pause().await;

        let controller = player.controller();
        let frozen = controller.read().await.cursor();
        settle().await;
        assert_eq!(
            controller.read().await.cursor(),
            frozen,
            "no tick may land after pause"
        );
        assert_eq!(controller.read().await.state(), PlaybackState::Paused);
    }

    #[tokio::test]
    async fn test_reload_mid_playback_cancels_before_swapping() {
        let mut player = AutoAdvance::new();
        player.load(long_trace()).await;
        player.set_interval_ms(TICK_MS).await;
        player.play().await;
        settle().await;

        player.load(long_trace()).await;
        let controller = player.controller();
        assert_eq!(controller.read().await.state(), PlaybackState::Ready);
        settle().await;
        assert_eq!(
            controller.read().await.cursor(),
            0,
            "a stale tick must not advance the fresh trace"
        );
    }

    #[tokio::test]
    async fn test_playback_runs_to_at_end_and_stops() {
        let mut player = AutoAdvance::new();
        player.load(long_trace()).await;
        player.set_interval_ms(TICK_MS).await;
        player.play().await;

        tokio::time::sleep(Duration::from_millis(TICK_MS * 30)).await;

        let controller = player.controller();
        let guard = controller.read().await;
        assert_eq!(guard.state(), PlaybackState::AtEnd);
        assert_eq!(guard.cursor(), guard.len() - 1);
    }

    #[tokio::test]
    async fn test_interval_change_while_playing_rearms() {
        let mut player = AutoAdvance::new();
        player.load(long_trace()).await;
        player.set_interval_ms(60_000).await;
        player.play().await;

        // Nothing advances at the slow rate.
        tokio::time::sleep(Duration::from_millis(TICK_MS * 3)).await;
        let controller = player.controller();
        assert_eq!(controller.read().await.cursor(), 0);

        // Speeding up re-arms the timer at the new rate.
        player.set_interval_ms(TICK_MS).await;
        settle().await;
        assert!(controller.read().await.cursor() > 0);
    }
}
