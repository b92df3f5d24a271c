//! `PolicyAgent` — one interface over the two backend protocols.

use crate::{ComputePolicy, ForwardBackwardPolicy, PolicyResult};

/// The policy seam the scheduler talks to.
///
/// The protocol variant is fixed once at construction and never changes
/// during a run; the scheduler calls [`decide`][Self::decide] each tick and
/// [`notify_terminal`][Self::notify_terminal] on terminal ticks without
/// knowing which protocol is underneath.
pub enum PolicyAgent<O, A> {
    /// Stateless compute-from-observation backend.
    Compute(Box<dyn ComputePolicy<O, A>>),
    /// Stateful forward/backward backend.
    ForwardBackward(Box<dyn ForwardBackwardPolicy<O, A>>),
}

impl<O, A> PolicyAgent<O, A> {
    pub fn compute(backend: impl ComputePolicy<O, A> + 'static) -> Self {
        PolicyAgent::Compute(Box::new(backend))
    }

    pub fn forward_backward(backend: impl ForwardBackwardPolicy<O, A> + 'static) -> Self {
        PolicyAgent::ForwardBackward(Box::new(backend))
    }

    /// Produce the next global action from `obs`.
    pub fn decide(&mut self, obs: &O) -> PolicyResult<A> {
        match self {
            PolicyAgent::Compute(p) => p.compute_action(obs),
            PolicyAgent::ForwardBackward(p) => p.forward(obs),
        }
    }

    /// Episode-end correction, called exactly when the environment reports
    /// termination in the same tick.
    ///
    /// For a forward/backward backend this performs one more `forward` with
    /// the final observation followed by a zero-reward `backward` flagged
    /// *non*-terminal — the protocol the Keras-RL agent family expects at
    /// episode end. For a compute backend it is a no-op.
    pub fn notify_terminal(&mut self, final_obs: &O) -> PolicyResult<()> {
        match self {
            PolicyAgent::Compute(_) => Ok(()),
            PolicyAgent::ForwardBackward(p) => {
                p.forward(final_obs)?;
                p.backward(0.0, false)
            }
        }
    }

    /// Name of the wrapped backend.
    pub fn name(&self) -> &str {
        match self {
            PolicyAgent::Compute(p) => p.name(),
            PolicyAgent::ForwardBackward(p) => p.name(),
        }
    }
}
