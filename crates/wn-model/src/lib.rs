//! `wn-model` — the WasteNet application built on the `wn-*` framework.
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`config`]    | `ModelConfig`, `PolicyMode` (serde, JSON-loadable)      |
//! | [`topology`]  | Collection-route graph builder (petgraph)               |
//! | [`agents`]    | `DepotAgent`, `DumpsterAgent`                           |
//! | [`policies`]  | Greedy / checkpoint / learner policy backends           |
//! | [`builder`]   | `WasteNetBuilder` — validating model construction       |
//! | [`model`]     | `WasteNet` — the runnable model facade                  |
//! | [`collect`]   | `DataCollector` — per-tick reporters + CSV dump         |
//! | [`portrayal`] | Agent-to-display mapping                                |
//! | [`error`]     | `ModelError`, `ModelResult`                             |

pub mod agents;
pub mod builder;
pub mod collect;
pub mod config;
pub mod error;
pub mod model;
pub mod policies;
pub mod portrayal;
pub mod topology;


pub use agents::{DepotAgent, DumpsterAgent};
pub use builder::WasteNetBuilder;
pub use collect::{AgentRow, DataCollector, ModelRow};
pub use config::{ModelConfig, PolicyMode};
pub use error::{ModelError, ModelResult};
pub use model::WasteNet;
pub use policies::{Checkpoint, CheckpointPolicy, GreedyThresholdPolicy, ThresholdLearner};
pub use portrayal::{agent_portrayal, Portrayal};
pub use topology::{generate_route, NodeKind, Route};
