//! `wn-env` — the environment seam of the wastenet simulation.
//!
//! | Module          | Contents                                             |
//! |-----------------|------------------------------------------------------|
//! | [`environment`] | `Environment` trait, `Transition`, `Info`/`InfoValue`|
//! | [`wastenet`]    | `WasteNetEnv` — truck on a depot-to-depot route      |
//! | [`error`]       | `EnvError`, `EnvResult`                              |
//!
//! The scheduler only ever sees the [`Environment`] trait: an observation
//! accessor, a fallible one-tick `step`, and a `reset` for episode
//! boundaries. Everything about *what* the environment simulates stays
//! behind that seam.

pub mod environment;
pub mod error;
pub mod wastenet;


pub use environment::{Environment, Info, InfoValue, Transition};
pub use error::{EnvError, EnvResult};
pub use wastenet::{WasteAction, WasteNetEnv, WasteNetObs, MAX_FILL};
