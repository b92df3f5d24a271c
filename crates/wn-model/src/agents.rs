//! The local agent population.
//!
//! Two kinds: inert depot endpoints and one dumpster agent per route node
//! between them. Dumpster agents carry a local copy of their fill level,
//! refreshed each tick from the observation, so reporting and portrayal
//! read agent state rather than reaching into the environment.

use std::any::Any;

use wn_core::{AgentId, AgentRng, NodeId};
use wn_env::WasteNetObs;
use wn_sched::{AgentStepError, LocalAgent, TickContext};

/// Inert agent occupying a depot endpoint.
pub struct DepotAgent {
    id: AgentId,
    node: NodeId,
}

impl DepotAgent {
    pub fn new(id: AgentId, node: NodeId) -> Self {
        Self { id, node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl LocalAgent<WasteNetObs> for DepotAgent {
    fn id(&self) -> AgentId {
        self.id
    }

    fn step(
        &mut self,
        _ctx: &TickContext<'_, WasteNetObs>,
        _rng: &mut AgentRng,
    ) -> Result<(), AgentStepError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Agent mirroring one dumpster's fill level.
pub struct DumpsterAgent {
    id: AgentId,
    node: NodeId,
    /// Index into the observation's `fills` vector.
    dumpster: usize,
    fill_level: u8,
}

impl DumpsterAgent {
    pub fn new(id: AgentId, node: NodeId, dumpster: usize, initial_fill: u8) -> Self {
        Self {
            id,
            node,
            dumpster,
            fill_level: initial_fill,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The fill level as of this agent's last step (percent, 0..=100).
    pub fn fill_level(&self) -> u8 {
        self.fill_level
    }
}

impl LocalAgent<WasteNetObs> for DumpsterAgent {
    fn id(&self) -> AgentId {
        self.id
    }

    fn step(
        &mut self,
        ctx: &TickContext<'_, WasteNetObs>,
        _rng: &mut AgentRng,
    ) -> Result<(), AgentStepError> {
        self.fill_level = ctx
            .observation
            .fills
            .get(self.dumpster)
            .copied()
            .ok_or_else(|| {
                AgentStepError(format!(
                    "dumpster index {} out of range for observation with {} fills",
                    self.dumpster,
                    ctx.observation.fills.len()
                ))
            })?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
