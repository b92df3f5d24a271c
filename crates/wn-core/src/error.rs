//! Base error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` or wrap it as one variant — whichever keeps the
//! error sites clean.

use thiserror::Error;

/// The top-level error type for `wn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `wn-*` crates that use the base error.
pub type CoreResult<T> = Result<T, CoreError>;
