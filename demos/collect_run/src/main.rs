//! collect_run — smallest end-to-end WasteNet run.
//!
//! Builds an 8-node route (6 dumpsters), drives a greedy truck through 3
//! collection episodes, prints one line per tick, and dumps the collector
//! CSVs to `./wastenet_out/`.

use std::fs;
use std::path::Path;

use anyhow::Result;

use wn_model::{DataCollector, ModelConfig, PolicyMode, WasteNet};

// ── Constants ─────────────────────────────────────────────────────────────────

const NB_NODES: usize = 8;
const NB_EPISODES: u32 = 3;
const SEED: u64 = 42;
const COLLECT_THRESHOLD: u8 = 60;
const OUT_DIR: &str = "wastenet_out";

fn main() -> Result<()> {
    let config = ModelConfig {
        nb_nodes: NB_NODES,
        nb_episodes: NB_EPISODES,
        seed: SEED,
        mode: PolicyMode::Greedy {
            threshold: COLLECT_THRESHOLD,
        },
    };

    let mut model = WasteNet::build(config)?;
    let mut collector = DataCollector::new();

    println!(
        "wastenet: {} nodes, {} episodes, policy = {}",
        NB_NODES,
        NB_EPISODES,
        model.scheduler().policy_name()
    );

    while model.running() {
        model.advance(&mut collector)?;
        let c = model.counters();
        let fills = model.env().fill_levels();
        let overflowing = fills.iter().filter(|&&f| f == 100).count();
        println!(
            "tick {:>3}  reward {:+.2}  total {:+.2}  overflowing {}  episodes left {}",
            c.steps(),
            c.last_reward(),
            c.cumulative_reward(),
            overflowing,
            model.remaining_episodes()
        );
    }

    let c = model.counters();
    println!(
        "done: {} ticks, cumulative reward {:+.2}",
        c.steps(),
        c.cumulative_reward()
    );

    fs::create_dir_all(OUT_DIR)?;
    collector.write_csv(Path::new(OUT_DIR))?;
    println!(
        "wrote {} model rows and {} agent rows to {OUT_DIR}/",
        collector.model_rows().len(),
        collector.agent_rows().len()
    );

    Ok(())
}
