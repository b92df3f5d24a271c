use thiserror::Error;
use wn_core::AgentId;
use wn_env::EnvError;
use wn_policy::PolicyError;

/// A local agent's own step failure, wrapped into
/// [`SchedError::AgentStep`] with the failing agent's ID.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct AgentStepError(pub String);

#[derive(Debug, Error)]
pub enum SchedError {
    /// Invalid construction input — surfaced before any tick runs.
    #[error("construction error: {0}")]
    Construction(String),

    /// The policy failed to produce an action. The tick was aborted with
    /// no environment step and no agent stepping; counters are untouched.
    #[error("policy decision failed: {0}")]
    Decision(#[from] PolicyError),

    /// The environment step failed. The tick was aborted before any
    /// counter update.
    #[error("environment transition failed: {0}")]
    Transition(#[from] EnvError),

    /// One local agent's step failed. The whole tick is failed: agents
    /// after it in this tick's permutation are left unstepped and the tick
    /// counters are not incremented.
    #[error("step failed for {id}: {source}")]
    AgentStep {
        id: AgentId,
        #[source]
        source: AgentStepError,
    },

    /// `advance` was called after the episode budget was exhausted.
    #[error("run already stopped: episode budget exhausted")]
    Stopped,
}

pub type SchedResult<T> = Result<T, SchedError>;
