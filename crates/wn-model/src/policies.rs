//! Concrete policy backends for the WasteNet truck.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wn_env::{WasteAction, WasteNetObs};
use wn_policy::{ComputePolicy, ForwardBackwardPolicy, PolicyError, PolicyResult};

// ── Greedy ────────────────────────────────────────────────────────────────────

/// Collect whenever the upcoming dumpster is at least `threshold` full.
pub struct GreedyThresholdPolicy {
    threshold: u8,
}

impl GreedyThresholdPolicy {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }
}

impl ComputePolicy<WasteNetObs, WasteAction> for GreedyThresholdPolicy {
    fn compute_action(&mut self, obs: &WasteNetObs) -> PolicyResult<WasteAction> {
        let collect = obs.upcoming_fill().is_some_and(|f| f >= self.threshold);
        Ok(if collect {
            WasteAction::Collect
        } else {
            WasteAction::Skip
        })
    }

    fn name(&self) -> &str {
        "greedy-threshold"
    }
}

// ── Checkpoint ────────────────────────────────────────────────────────────────

/// On-disk checkpoint: one collection threshold per dumpster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub thresholds: Vec<u8>,
}

/// A trained policy restored from a [`Checkpoint`] file.
///
/// Loading happens before the model is built; any failure (missing file,
/// bad JSON, dumpster-count mismatch) is a construction-time error.
pub struct CheckpointPolicy {
    thresholds: Vec<u8>,
}

impl CheckpointPolicy {
    pub fn load(path: &Path, nb_dumpsters: usize) -> PolicyResult<Self> {
        let checkpoint_err = |reason: String| PolicyError::Checkpoint {
            path: path.display().to_string(),
            reason,
        };

        let file = File::open(path).map_err(|e| checkpoint_err(e.to_string()))?;
        let checkpoint: Checkpoint =
            serde_json::from_reader(file).map_err(|e| checkpoint_err(e.to_string()))?;

        if checkpoint.thresholds.len() != nb_dumpsters {
            return Err(checkpoint_err(format!(
                "checkpoint has {} thresholds but the route has {} dumpsters",
                checkpoint.thresholds.len(),
                nb_dumpsters
            )));
        }
        Ok(Self {
            thresholds: checkpoint.thresholds,
        })
    }
}

impl ComputePolicy<WasteNetObs, WasteAction> for CheckpointPolicy {
    fn compute_action(&mut self, obs: &WasteNetObs) -> PolicyResult<WasteAction> {
        let next = obs.truck + 1;
        let collect = match obs.upcoming_fill() {
            Some(fill) => fill >= self.thresholds[next - 1],
            None => false,
        };
        Ok(if collect {
            WasteAction::Collect
        } else {
            WasteAction::Skip
        })
    }

    fn name(&self) -> &str {
        "checkpoint"
    }
}

// ── Learner ───────────────────────────────────────────────────────────────────

/// Forward/backward backend: a single collection threshold nudged by the
/// rewards reported through `backward`.
///
/// In this model the scheduler only drives `backward` through the terminal
/// correction (zero reward, non-terminal), so the threshold stays put
/// during inference runs. A training driver calling `backward` with real
/// rewards would move it.
pub struct ThresholdLearner {
    /// Collection threshold as a fill fraction in [0, 1].
    threshold: f64,
    learning_rate: f64,
    /// Action taken by the most recent `forward`, awaiting its reward.
    last_collected: Option<bool>,
}

impl ThresholdLearner {
    pub fn new(initial_threshold: f64, learning_rate: f64) -> Self {
        Self {
            threshold: initial_threshold.clamp(0.0, 1.0),
            learning_rate,
            last_collected: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl ForwardBackwardPolicy<WasteNetObs, WasteAction> for ThresholdLearner {
    fn forward(&mut self, obs: &WasteNetObs) -> PolicyResult<WasteAction> {
        let collect = obs
            .upcoming_fill()
            .is_some_and(|f| f as f64 / 100.0 >= self.threshold);
        self.last_collected = Some(collect);
        Ok(if collect {
            WasteAction::Collect
        } else {
            WasteAction::Skip
        })
    }

    fn backward(&mut self, reward: f64, _terminal: bool) -> PolicyResult<()> {
        let Some(collected) = self.last_collected.take() else {
            return Err(PolicyError::Backend(
                "backward called with no pending forward".to_string(),
            ));
        };
        // A rewarded collection lowers the threshold (collect more often);
        // a rewarded skip raises it. Zero reward leaves it unchanged.
        let direction = if collected { -1.0 } else { 1.0 };
        self.threshold = (self.threshold + direction * self.learning_rate * reward).clamp(0.0, 1.0);
        Ok(())
    }

    fn name(&self) -> &str {
        "threshold-learner"
    }
}
