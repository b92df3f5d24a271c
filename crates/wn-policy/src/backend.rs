//! The two backend capability traits.

use crate::PolicyResult;

/// A backend that computes an action as a pure function of the current
/// observation (the RLlib `compute_action` shape).
///
/// Implementations may cache internally — the receiver is `&mut self` for
/// that reason — but callers must not depend on any state carrying over
/// between calls.
pub trait ComputePolicy<O, A>: Send {
    /// Compute the next action from `obs`.
    fn compute_action(&mut self, obs: &O) -> PolicyResult<A>;

    /// Human-readable backend name, for reporting.
    fn name(&self) -> &str;
}

/// A backend driven through the forward/backward protocol (the Keras-RL
/// shape): `forward` chooses an action and records the pending decision,
/// `backward` folds the resulting reward into backend state.
pub trait ForwardBackwardPolicy<O, A>: Send {
    /// Choose the next action from `obs`. May mutate backend state.
    fn forward(&mut self, obs: &O) -> PolicyResult<A>;

    /// Report the reward for the most recent `forward`.
    fn backward(&mut self, reward: f64, terminal: bool) -> PolicyResult<()>;

    /// Human-readable backend name, for reporting.
    fn name(&self) -> &str;
}
