//! Cosmetic stage animation for the improvement call.
//!
//! While the improvement request is in flight, a timer walks
//! [`qcraft_core::session::STAGES`] at a fixed cadence. The ticker never
//! reports real backend progress; stopping it (or running out of stages)
//! simply freezes the display on the last label reached.

use qcraft_core::session::{RefinementState, STAGE_TICK, STAGES};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Callback invoked after every stage advance with the new stage index and
/// label. Used by the CLI to print progress lines.
pub type StageListener = Arc<dyn Fn(usize, &'static str) + Send + Sync>;

/// Advances `state.current_stage` by one step.
///
/// Returns `false` when no further ticks should happen: either processing
/// has finished or the ladder is already on its last stage. The last stage
/// is sticky; the ticker parks there until the call completes.
pub fn advance_stage(state: &mut RefinementState) -> bool {
    if !state.is_processing_question {
        return false;
    }
    if state.current_stage + 1 >= STAGES.len() {
        return false;
    }
    state.current_stage += 1;
    true
}

/// Drives [`advance_stage`] on a fixed-interval background task.
pub struct StageTicker {
    running: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
    listener: Mutex<Option<StageListener>>,
}

impl StageTicker {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
            listener: Mutex::new(None),
        }
    }

    pub fn set_listener(&self, listener: StageListener) {
        *lock(&self.listener) = Some(listener);
    }

    /// Starts ticking over the given state. Any previous ticker task is
    /// stopped first; at most one task runs at a time.
    pub fn start(&self, state: Arc<RwLock<RefinementState>>) {
        self.stop();
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let listener = lock(&self.listener).clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(STAGE_TICK);
            // The first tick of a tokio interval fires immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if !running.load(Ordering::SeqCst) {
                    break;
                }
                let stage = {
                    let mut state = state.write().await;
                    if !advance_stage(&mut state) {
                        break;
                    }
                    state.current_stage
                };
                if let Some(listener) = &listener {
                    listener(stage, STAGES[stage].name);
                }
            }
        });
        *lock(&self.handle) = Some(handle);
    }

    /// Stops the ticker task. The stage index stays wherever it was.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = lock(&self.handle).take() {
            handle.abort();
        }
    }
}

impl Default for StageTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StageTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_the_ladder_and_parks_on_the_last_stage() {
        let mut state = RefinementState::new();
        state.is_processing_question = true;
        state.current_stage = 0;

        let mut steps = 0;
        while advance_stage(&mut state) {
            steps += 1;
        }
        assert_eq!(steps, STAGES.len() - 1);
        assert_eq!(state.current_stage, STAGES.len() - 1);

        // Parked: further ticks are no-ops.
        assert!(!advance_stage(&mut state));
        assert_eq!(state.current_stage, STAGES.len() - 1);
    }

    #[test]
    fn advance_is_inert_outside_processing() {
        let mut state = RefinementState::new();
        state.is_processing_question = false;
        state.current_stage = 2;
        assert!(!advance_stage(&mut state));
        assert_eq!(state.current_stage, 2);
    }

    #[tokio::test]
    async fn ticker_advances_under_paused_time() {
        tokio::time::pause();
        let state = Arc::new(RwLock::new(RefinementState::new()));
        state.write().await.is_processing_question = true;

        let ticker = StageTicker::new();
        ticker.start(Arc::clone(&state));

        // Give the spawned task a chance to register its timer, then step
        // the paused clock past a few tick intervals.
        for _ in 0..4 {
            tokio::task::yield_now().await;
            tokio::time::advance(STAGE_TICK).await;
            tokio::task::yield_now().await;
        }
        assert!(state.read().await.current_stage >= 1);
        ticker.stop();
    }
}
