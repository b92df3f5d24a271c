use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    /// The backend failed to produce a decision.
    #[error("policy backend error: {0}")]
    Backend(String),

    /// A persisted checkpoint could not be loaded. Surfaces at
    /// construction time, before any tick runs.
    #[error("failed to load policy checkpoint {path}: {reason}")]
    Checkpoint { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PolicyResult<T> = Result<T, PolicyError>;
