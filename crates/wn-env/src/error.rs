use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("environment configuration error: {0}")]
    Config(String),

    /// `step` was called on a finished episode without an intervening
    /// `reset`. The driver must check the `done` flag it was handed.
    #[error("episode already finished; call reset before stepping again")]
    EpisodeFinished,
}

pub type EnvResult<T> = Result<T, EnvError>;
