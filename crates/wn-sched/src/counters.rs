//! Tick and reward accounting.

/// Counters owned exclusively by the
/// [`ActivationScheduler`][crate::ActivationScheduler]: single writer,
/// read-only to everyone else, mutated at most once per tick.
///
/// `steps` and `ticks_elapsed` mirror each other and are maintained as
/// separate fields deliberately; they must be equal at every observation
/// point. Neither the reward sums nor the tick counts reset at episode
/// boundaries — they span the whole run.
#[derive(Debug, Clone, Default)]
pub struct TickCounters {
    steps: u64,
    ticks_elapsed: u64,
    cumulative_reward: f64,
    last_reward: f64,
}

impl TickCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks fully completed since scheduler construction.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Mirror of [`steps`][Self::steps].
    #[inline]
    pub fn ticks_elapsed(&self) -> u64 {
        self.ticks_elapsed
    }

    /// Sum of every reward from every completed environment step.
    #[inline]
    pub fn cumulative_reward(&self) -> f64 {
        self.cumulative_reward
    }

    /// Reward of the most recent completed environment step.
    #[inline]
    pub fn last_reward(&self) -> f64 {
        self.last_reward
    }

    /// Record the reward of a completed environment step.
    pub(crate) fn record_reward(&mut self, reward: f64) {
        self.last_reward = reward;
        self.cumulative_reward += reward;
    }

    /// Mark one full tick as complete.
    pub(crate) fn advance_tick(&mut self) {
        self.steps += 1;
        self.ticks_elapsed += 1;
        debug_assert_eq!(self.steps, self.ticks_elapsed);
    }
}
