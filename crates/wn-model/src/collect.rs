//! Per-tick data collection and CSV output.
//!
//! Fill bands: empty ≤ 20 < medium < 80 ≤ full < 100 = overflow.

use std::path::Path;

use serde::Serialize;
use wn_env::WasteNetEnv;
use wn_sched::{ActivationScheduler, ModelObserver};

use crate::agents::DumpsterAgent;
use crate::ModelResult;

/// One model-level row per tick.
#[derive(Debug, Clone, Serialize)]
pub struct ModelRow {
    pub tick: u64,
    pub empty: usize,
    pub medium: usize,
    pub full: usize,
    pub overflow: usize,
    pub last_reward: f64,
    pub cumulative_reward: f64,
}

/// One row per dumpster agent per tick.
#[derive(Debug, Clone, Serialize)]
pub struct AgentRow {
    pub tick: u64,
    pub agent_id: u32,
    pub fill_level: u8,
}

/// Accumulates model and agent rows each tick; dump with
/// [`write_csv`][Self::write_csv] after the run.
///
/// Reads aggregate state only — fill levels from the environment, fill
/// mirrors from the dumpster agents, reward totals from the counters.
#[derive(Default)]
pub struct DataCollector {
    model_rows: Vec<ModelRow>,
    agent_rows: Vec<AgentRow>,
}

impl DataCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model_rows(&self) -> &[ModelRow] {
        &self.model_rows
    }

    pub fn agent_rows(&self) -> &[AgentRow] {
        &self.agent_rows
    }

    /// Write `model_rows.csv` and `agent_rows.csv` into `dir`.
    pub fn write_csv(&self, dir: &Path) -> ModelResult<()> {
        let mut model = csv::Writer::from_path(dir.join("model_rows.csv"))?;
        for row in &self.model_rows {
            model.serialize(row)?;
        }
        model.flush()?;

        let mut agents = csv::Writer::from_path(dir.join("agent_rows.csv"))?;
        for row in &self.agent_rows {
            agents.serialize(row)?;
        }
        agents.flush()?;
        Ok(())
    }
}

impl ModelObserver<WasteNetEnv> for DataCollector {
    fn collect(&mut self, scheduler: &ActivationScheduler<WasteNetEnv>) {
        let counters = scheduler.counters();
        let tick = counters.steps();
        let fills = scheduler.env().fill_levels();

        self.model_rows.push(ModelRow {
            tick,
            empty: fills.iter().filter(|&&f| f <= 20).count(),
            medium: fills.iter().filter(|&&f| f > 20 && f < 80).count(),
            full: fills.iter().filter(|&&f| f >= 80 && f < 100).count(),
            overflow: fills.iter().filter(|&&f| f == 100).count(),
            last_reward: counters.last_reward(),
            cumulative_reward: counters.cumulative_reward(),
        });

        for agent in scheduler.registry().iter() {
            if let Some(dumpster) = agent.as_any().downcast_ref::<DumpsterAgent>() {
                self.agent_rows.push(AgentRow {
                    tick,
                    agent_id: agent.id().0,
                    fill_level: dumpster.fill_level(),
                });
            }
        }
    }
}
