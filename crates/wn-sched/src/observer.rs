//! Run observer trait for reporting and data collection.

use wn_env::Environment;

use crate::{ActivationScheduler, TickCounters};

/// Callbacks invoked by [`EpisodeController`][crate::EpisodeController] at
/// key points in the run.
///
/// All methods have default no-op implementations, and all receive shared
/// references only — an observer can read aggregate state but never mutate
/// the core.
pub trait ModelObserver<E: Environment> {
    /// Called once per `advance`, after the tick completes, regardless of
    /// whether the episode ended.
    fn collect(&mut self, _scheduler: &ActivationScheduler<E>) {}

    /// Called after an episode terminated and the environment was reset.
    fn on_episode_end(&mut self, _remaining_episodes: u32) {}

    /// Called once when the episode budget is exhausted.
    fn on_run_end(&mut self, _counters: &TickCounters) {}
}

/// A [`ModelObserver`] that does nothing.
pub struct NoopObserver;

impl<E: Environment> ModelObserver<E> for NoopObserver {}
