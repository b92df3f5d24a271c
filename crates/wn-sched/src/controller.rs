//! The outer run loop: episode budget and reset-on-done semantics.

use wn_env::Environment;

use crate::{ActivationScheduler, ModelObserver, SchedError, SchedResult};

/// Owns the episode budget and drives the scheduler tick by tick.
///
/// Per [`advance`][Self::advance]: one scheduler tick, one observer
/// collection, then — if the episode terminated — an environment reset and
/// a budget decrement. `running` flips to `false` exactly once, on the
/// tick where the budget reaches zero, and never flips back.
pub struct EpisodeController<E: Environment> {
    scheduler: ActivationScheduler<E>,
    remaining_episodes: u32,
    running: bool,
}

impl<E: Environment> core::fmt::Debug for EpisodeController<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EpisodeController")
            .field("remaining_episodes", &self.remaining_episodes)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl<E: Environment> EpisodeController<E> {
    /// A zero episode budget would never run and is rejected here rather
    /// than producing a controller that is born stopped.
    pub fn new(scheduler: ActivationScheduler<E>, nb_episodes: u32) -> SchedResult<Self> {
        if nb_episodes == 0 {
            return Err(SchedError::Construction(
                "episode budget must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            scheduler,
            remaining_episodes: nb_episodes,
            running: true,
        })
    }

    /// Process one external tick request.
    ///
    /// Callers must check [`running`][Self::running] first; advancing a
    /// stopped controller is refused with [`SchedError::Stopped`].
    pub fn advance<Ob: ModelObserver<E>>(&mut self, observer: &mut Ob) -> SchedResult<()> {
        if !self.running {
            return Err(SchedError::Stopped);
        }

        let done = self.scheduler.step()?;
        observer.collect(&self.scheduler);

        if done {
            self.scheduler.env_mut().reset();
            self.remaining_episodes -= 1;
            observer.on_episode_end(self.remaining_episodes);
        }
        if self.remaining_episodes == 0 {
            self.running = false;
            observer.on_run_end(self.scheduler.counters());
        }
        Ok(())
    }

    /// Advance until the episode budget is exhausted.
    pub fn run<Ob: ModelObserver<E>>(&mut self, observer: &mut Ob) -> SchedResult<()> {
        while self.running {
            self.advance(observer)?;
        }
        Ok(())
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn remaining_episodes(&self) -> u32 {
        self.remaining_episodes
    }

    pub fn scheduler(&self) -> &ActivationScheduler<E> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut ActivationScheduler<E> {
        &mut self.scheduler
    }
}
