//! `wn-sched` — tick loop orchestrator for the wastenet simulation.
//!
//! # Two-phase tick
//!
//! ```text
//! ActivationScheduler::step():
//!   Phase 1 — global transition (exactly once, always first)
//!     ① observe   — read the environment's current observation
//!     ② decide    — PolicyAgent produces the global action
//!     ③ transition— Environment::step(action) → (obs', reward, done, info)
//!     ④ account   — last_reward / cumulative_reward updated
//!     ⑤ terminal  — if done, PolicyAgent::notify_terminal(obs')
//!   Phase 2 — local agent ticks (always second, even when done)
//!     ⑥ shuffle   — fresh random permutation of the registry
//!     ⑦ step      — every local agent stepped once, sequentially
//!     ⑧ count     — steps / ticks_elapsed incremented
//! ```
//!
//! The [`EpisodeController`] wraps the scheduler with episode-boundary
//! semantics: collect-always reporting, reset-on-done, a decrementing
//! episode budget, and an irreversible `running` latch.
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`counters`]  | `TickCounters`                                     |
//! | [`registry`]  | `LocalAgent` trait, `TickContext`, `AgentRegistry` |
//! | [`scheduler`] | `ActivationScheduler`                              |
//! | [`controller`]| `EpisodeController`                                |
//! | [`observer`]  | `ModelObserver`, `NoopObserver`                    |
//! | [`error`]     | `SchedError`, `AgentStepError`, `SchedResult`      |

pub mod controller;
pub mod counters;
pub mod error;
pub mod observer;
pub mod registry;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use controller::EpisodeController;
pub use counters::TickCounters;
pub use error::{AgentStepError, SchedError, SchedResult};
pub use observer::{ModelObserver, NoopObserver};
pub use registry::{AgentRegistry, LocalAgent, TickContext};
pub use scheduler::ActivationScheduler;
