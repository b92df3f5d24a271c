//! The `Environment` trait and its transition types.

use rustc_hash::FxHashMap;

use crate::EnvResult;

/// Diagnostic side-channel attached to every transition.
///
/// Keys are environment-defined; the scheduler passes the map through
/// untouched. Reporting code may read it.
pub type Info = FxHashMap<String, InfoValue>;

/// A single diagnostic value in a transition's [`Info`] map.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// The result of one environment step.
#[derive(Debug, Clone)]
pub struct Transition<O> {
    /// Observation after the step.
    pub observation: O,
    /// Reward produced by this step.
    pub reward: f64,
    /// Whether this step ended the episode.
    pub done: bool,
    /// Diagnostic side-channel.
    pub info: Info,
}

/// One unit of simulated time per `step` call, reset at episode boundaries.
///
/// # Contract
///
/// - `step` is called exactly once per scheduler tick. Calling it again
///   after it returned `done == true`, without a `reset` in between, is an
///   error — implementations must refuse rather than silently continue.
/// - `reset` replaces the episode state wholesale and is called only by the
///   episode controller, only after a `done` transition.
/// - `observe` is side-effect free and readable at any time.
pub trait Environment {
    /// The action payload the policy produces. Opaque to the scheduler.
    type Action;
    /// The observation the policy consumes.
    type Observation: Clone;

    /// Current observation.
    fn observe(&self) -> Self::Observation;

    /// Advance one unit of simulated time under `action`.
    fn step(&mut self, action: &Self::Action) -> EnvResult<Transition<Self::Observation>>;

    /// Reinitialize for a new episode and return the initial observation.
    fn reset(&mut self) -> Self::Observation;
}
