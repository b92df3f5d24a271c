//! `wn-policy` — the decision-making seam of the wastenet simulation.
//!
//! | Module      | Contents                                             |
//! |-------------|------------------------------------------------------|
//! | [`backend`] | `ComputePolicy`, `ForwardBackwardPolicy` traits      |
//! | [`agent`]   | `PolicyAgent` — the two-protocol adapter             |
//! | [`error`]   | `PolicyError`, `PolicyResult`                        |
//!
//! Decision backends come in two protocol shapes: a stateless
//! compute-an-action-from-an-observation call, and a stateful
//! forward/backward pair that additionally wants a terminal correction at
//! episode end. [`PolicyAgent`] fixes the shape once at construction and
//! presents one interface to the scheduler, so neither protocol leaks into
//! the tick loop.

pub mod agent;
pub mod backend;
pub mod error;


pub use agent::PolicyAgent;
pub use backend::{ComputePolicy, ForwardBackwardPolicy};
pub use error::{PolicyError, PolicyResult};
