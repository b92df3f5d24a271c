//! `wn-core` — foundational types for the wastenet simulation workspace.
//!
//! This crate is a dependency of every other `wn-*` crate. It has no `wn-*`
//! dependencies and minimal external ones (`rand` and `thiserror`, plus
//! optional `serde`).
//!
//! | Module    | Contents                                  |
//! |-----------|-------------------------------------------|
//! | [`ids`]   | `AgentId`, `NodeId`                       |
//! | [`time`]  | `Tick`                                    |
//! | [`rng`]   | `SimRng` (global), `AgentRng` (per-agent) |
//! | [`error`] | `CoreError`, `CoreResult`                 |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, NodeId};
pub use rng::{AgentRng, SimRng};
pub use time::Tick;
