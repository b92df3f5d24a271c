use thiserror::Error;
use wn_env::EnvError;
use wn_policy::PolicyError;
use wn_sched::SchedError;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Invalid model configuration — surfaced before any tick runs.
    #[error("model construction error: {0}")]
    Construction(String),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Sched(#[from] SchedError),

    #[error("output error: {0}")]
    Output(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;
