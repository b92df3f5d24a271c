//! The `ActivationScheduler` and its two-phase tick.

use wn_core::{SimRng, Tick};
use wn_env::Environment;
use wn_policy::PolicyAgent;

use crate::{AgentRegistry, SchedResult, TickContext, TickCounters};

/// Drives one simulation tick: policy decision, environment transition,
/// randomized local agent activation, reward/tick accounting.
///
/// The two phases never interleave, and a failure in Phase 1 leaves the
/// counters untouched — a tick either fully transitions the environment or
/// does not happen at all from the counters' point of view.
pub struct ActivationScheduler<E: Environment> {
    env: E,
    policy: PolicyAgent<E::Observation, E::Action>,
    registry: AgentRegistry<E::Observation>,
    counters: TickCounters,
    rng: SimRng,
}

impl<E: Environment> ActivationScheduler<E> {
    /// Assemble a scheduler. `rng` drives only the per-tick activation
    /// shuffle; environment and agent randomness use their own streams.
    pub fn new(
        env: E,
        policy: PolicyAgent<E::Observation, E::Action>,
        registry: AgentRegistry<E::Observation>,
        rng: SimRng,
    ) -> Self {
        Self {
            env,
            policy,
            registry,
            counters: TickCounters::new(),
            rng,
        }
    }

    /// Execute one tick. Returns the episode-termination flag from the
    /// environment transition.
    pub fn step(&mut self) -> SchedResult<bool> {
        // ── Phase 1: global transition ────────────────────────────────────
        let obs = self.env.observe();
        let action = self.policy.decide(&obs)?;
        let transition = self.env.step(&action)?;
        self.counters.record_reward(transition.reward);
        if transition.done {
            self.policy.notify_terminal(&transition.observation)?;
        }

        // ── Phase 2: local agent ticks ────────────────────────────────────
        //
        // Runs even on terminal steps: local agent state must stay
        // consistent for post-episode inspection before the caller resets
        // the environment.
        let mut order: Vec<usize> = (0..self.registry.len()).collect();
        self.rng.shuffle(&mut order);
        let ctx = TickContext {
            tick: self.tick(),
            observation: &transition.observation,
        };
        self.registry.step_in_order(&order, &ctx)?;

        self.counters.advance_tick();
        Ok(transition.done)
    }

    /// The tick the next `step` call will process.
    #[inline]
    pub fn tick(&self) -> Tick {
        Tick(self.counters.steps())
    }

    pub fn counters(&self) -> &TickCounters {
        &self.counters
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// Mutable environment access — needed by the episode controller for
    /// `reset`, and by nothing else.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn registry(&self) -> &AgentRegistry<E::Observation> {
        &self.registry
    }

    /// Name of the wrapped policy backend.
    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }
}
