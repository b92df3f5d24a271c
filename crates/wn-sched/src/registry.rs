//! The local agent population: trait, tick context, and registry.

use std::any::Any;

use wn_core::{AgentId, AgentRng, Tick};

use crate::error::{AgentStepError, SchedError, SchedResult};

/// Read-only view handed to every local agent during Phase 2 of a tick.
///
/// `observation` is the environment observation produced by this tick's
/// global transition — agents may read it (e.g. to mirror a fill level)
/// but can never reach the environment itself or the global action.
pub struct TickContext<'a, O> {
    /// The tick being processed.
    pub tick: Tick,
    /// Observation after this tick's environment step.
    pub observation: &'a O,
}

/// A population member with a single-step behavior over its own state.
///
/// Local agents are independent of the global action: `step` mutates only
/// the agent's own fields, driven by the read-only [`TickContext`] and the
/// agent's private RNG stream.
pub trait LocalAgent<O>: Send {
    /// Stable identifier, assigned at registration.
    fn id(&self) -> AgentId;

    /// Advance this agent by one tick.
    fn step(&mut self, ctx: &TickContext<'_, O>, rng: &mut AgentRng)
    -> Result<(), AgentStepError>;

    /// Concrete-type escape hatch for reporting and portrayal code.
    fn as_any(&self) -> &dyn Any;
}

/// Ordered collection of local agents plus their parallel RNG streams.
///
/// Insertion order is the topology traversal order at model construction;
/// agents are added once and never removed during a run. The *stepping*
/// order is a fresh random permutation chosen by the scheduler every tick.
pub struct AgentRegistry<O> {
    agents: Vec<Box<dyn LocalAgent<O>>>,
    rngs: Vec<AgentRng>,
}

impl<O> AgentRegistry<O> {
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            rngs: Vec::new(),
        }
    }

    /// Register an agent with its own deterministic RNG stream.
    pub fn add(&mut self, agent: Box<dyn LocalAgent<O>>, rng: AgentRng) {
        self.agents.push(agent);
        self.rngs.push(rng);
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Iterate agents in insertion order (read-only).
    pub fn iter(&self) -> impl Iterator<Item = &dyn LocalAgent<O>> {
        self.agents.iter().map(|a| a.as_ref())
    }

    pub fn get(&self, index: usize) -> Option<&dyn LocalAgent<O>> {
        self.agents.get(index).map(|a| a.as_ref())
    }

    /// Step agents sequentially in the given index order.
    ///
    /// Sequential visibility: each agent is stepped in place, so an agent
    /// later in `order` would observe earlier agents' same-tick updates if
    /// a future context extension exposed sibling state. A failing agent
    /// aborts the whole tick; agents after it stay unstepped.
    pub(crate) fn step_in_order(
        &mut self,
        order: &[usize],
        ctx: &TickContext<'_, O>,
    ) -> SchedResult<()> {
        for &i in order {
            let agent = &mut self.agents[i];
            let id = agent.id();
            agent
                .step(ctx, &mut self.rngs[i])
                .map_err(|source| SchedError::AgentStep { id, source })?;
        }
        Ok(())
    }
}

impl<O> Default for AgentRegistry<O> {
    fn default() -> Self {
        Self::new()
    }
}
