//! Model configuration, loadable from JSON.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ModelError, ModelResult};

/// Which policy backend drives the truck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyMode {
    /// Collect whenever the upcoming dumpster is at least this full.
    Greedy { threshold: u8 },
    /// Per-dumpster thresholds loaded from a persisted checkpoint.
    Checkpoint { path: PathBuf },
    /// Forward/backward learner backend.
    Learner,
}

/// Top-level model configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Route length including both depots; at least 3.
    pub nb_nodes: usize,
    /// Episodes to run before the model stops; at least 1.
    pub nb_episodes: u32,
    /// Master seed. Environment, shuffle, and per-agent streams all derive
    /// from it; the same seed reproduces the run exactly.
    pub seed: u64,
    pub mode: PolicyMode,
}

impl ModelConfig {
    pub fn from_json_file(path: &Path) -> ModelResult<Self> {
        let file = File::open(path)?;
        serde_json::from_reader(file)
            .map_err(|e| ModelError::Construction(format!("bad config {}: {e}", path.display())))
    }
}
