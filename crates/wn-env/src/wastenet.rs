//! `WasteNetEnv` — the waste-collection route environment.
//!
//! A garbage truck drives a fixed route of `nb_nodes` nodes: a depot at
//! each end and `nb_nodes - 2` dumpsters between them. Every step the
//! truck advances one node and either collects the dumpster it arrives at
//! or skips it. Dumpster fill levels grow stochastically each step; a
//! dumpster stuck at [`MAX_FILL`] overflows and is penalized every step it
//! stays full. The episode ends when the truck reaches the far depot.
//!
//! Reward per step:
//!
//!   + fill / 100            for a collected dumpster (value of the pickup)
//!   - 0.3                   flat cost of stopping to collect
//!   - 1.0 per overflow      for every dumpster at MAX_FILL after growth

use rustc_hash::FxHashMap;
use wn_core::SimRng;

use crate::{EnvError, EnvResult, Environment, InfoValue, Transition};

/// A dumpster at this level overflows.
pub const MAX_FILL: u8 = 100;

/// Upper bound (inclusive) of a dumpster's initial fill after `reset`.
const INIT_FILL_MAX: u8 = 40;
/// Upper bound (inclusive) of per-step stochastic fill growth.
const GROWTH_MAX: u8 = 15;
/// Flat cost of stopping the truck to collect.
const COLLECT_COST: f64 = 0.3;
/// Per-step penalty for each overflowing dumpster.
const OVERFLOW_PENALTY: f64 = 1.0;

/// The global action chosen by the policy each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WasteAction {
    /// Drive past the next node without collecting.
    Skip,
    /// Collect the dumpster at the next node (no-op at a depot).
    Collect,
}

/// Observation: truck position along the route plus all dumpster fills.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WasteNetObs {
    /// Route position, `0..nb_nodes`. 0 and `nb_nodes - 1` are depots.
    pub truck: usize,
    /// Fill level per dumpster (route nodes `1..nb_nodes - 1`), 0..=100.
    pub fills: Vec<u8>,
}

impl WasteNetObs {
    /// Flatten into a numeric feature vector for policies that want one:
    /// normalized truck position followed by normalized fills.
    pub fn features(&self) -> Vec<f64> {
        let route_len = (self.fills.len() + 1) as f64;
        let mut v = Vec::with_capacity(self.fills.len() + 1);
        v.push(self.truck as f64 / route_len);
        v.extend(self.fills.iter().map(|&f| f as f64 / MAX_FILL as f64));
        v
    }

    /// Fill level of the dumpster the truck would reach on the next step,
    /// if that node is a dumpster.
    pub fn upcoming_fill(&self) -> Option<u8> {
        let next = self.truck + 1;
        if next >= 1 && next <= self.fills.len() {
            Some(self.fills[next - 1])
        } else {
            None
        }
    }
}

/// The waste-collection environment. See the module docs for dynamics.
pub struct WasteNetEnv {
    nb_nodes: usize,
    truck: usize,
    fills: Vec<u8>,
    done: bool,
    rng: SimRng,
}

impl WasteNetEnv {
    /// Build an environment for a route of `nb_nodes` nodes (two depots
    /// plus at least one dumpster) with its own seeded RNG stream.
    pub fn new(nb_nodes: usize, mut rng: SimRng) -> EnvResult<Self> {
        if nb_nodes < 3 {
            return Err(EnvError::Config(format!(
                "route needs at least 3 nodes (two depots + one dumpster), got {nb_nodes}"
            )));
        }
        let fills = (0..nb_nodes - 2)
            .map(|_| rng.gen_range(0..=INIT_FILL_MAX))
            .collect();
        Ok(Self {
            nb_nodes,
            truck: 0,
            fills,
            done: false,
            rng,
        })
    }

    /// Number of nodes on the route, depots included.
    pub fn nb_nodes(&self) -> usize {
        self.nb_nodes
    }

    /// Current fill level per dumpster.
    pub fn fill_levels(&self) -> &[u8] {
        &self.fills
    }

    /// Route index of the dumpster behind route node `node`, if any.
    fn dumpster_at(&self, node: usize) -> Option<usize> {
        if node >= 1 && node < self.nb_nodes - 1 {
            Some(node - 1)
        } else {
            None
        }
    }

    fn grow_fills(&mut self) -> usize {
        let mut overflows = 0;
        for fill in &mut self.fills {
            let growth = self.rng.gen_range(0..=GROWTH_MAX);
            *fill = fill.saturating_add(growth).min(MAX_FILL);
            if *fill == MAX_FILL {
                overflows += 1;
            }
        }
        overflows
    }
}

impl Environment for WasteNetEnv {
    type Action = WasteAction;
    type Observation = WasteNetObs;

    fn observe(&self) -> WasteNetObs {
        WasteNetObs {
            truck: self.truck,
            fills: self.fills.clone(),
        }
    }

    fn step(&mut self, action: &WasteAction) -> EnvResult<Transition<WasteNetObs>> {
        if self.done {
            return Err(EnvError::EpisodeFinished);
        }

        self.truck += 1;
        let mut reward = 0.0;
        let mut collected = false;

        if *action == WasteAction::Collect {
            if let Some(d) = self.dumpster_at(self.truck) {
                reward += self.fills[d] as f64 / MAX_FILL as f64 - COLLECT_COST;
                self.fills[d] = 0;
                collected = true;
            }
        }

        let overflows = self.grow_fills();
        reward -= overflows as f64 * OVERFLOW_PENALTY;

        self.done = self.truck == self.nb_nodes - 1;

        let mut info = FxHashMap::default();
        info.insert("truck".to_string(), InfoValue::Int(self.truck as i64));
        info.insert("collected".to_string(), InfoValue::Bool(collected));
        info.insert("overflows".to_string(), InfoValue::Int(overflows as i64));

        Ok(Transition {
            observation: self.observe(),
            reward,
            done: self.done,
            info,
        })
    }

    fn reset(&mut self) -> WasteNetObs {
        self.truck = 0;
        self.done = false;
        for fill in &mut self.fills {
            *fill = self.rng.gen_range(0..=INIT_FILL_MAX);
        }
        self.observe()
    }
}
