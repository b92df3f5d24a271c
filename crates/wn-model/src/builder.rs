//! Validating construction of a runnable [`WasteNet`] model.

use wn_core::{AgentId, AgentRng, NodeId, SimRng};
use wn_env::{WasteAction, WasteNetEnv, WasteNetObs};
use wn_policy::PolicyAgent;
use wn_sched::{ActivationScheduler, AgentRegistry, EpisodeController};

use crate::agents::{DepotAgent, DumpsterAgent};
use crate::policies::{CheckpointPolicy, GreedyThresholdPolicy, ThresholdLearner};
use crate::topology::{generate_route, NodeKind};
use crate::{ModelConfig, ModelError, ModelResult, PolicyMode, WasteNet};

/// Default starting threshold for the learner backend (fill fraction).
const LEARNER_INITIAL_THRESHOLD: f64 = 0.5;
const LEARNER_RATE: f64 = 0.05;

/// Builds a [`WasteNet`] from a [`ModelConfig`].
///
/// All construction failures — bad route size, zero episode budget, an
/// unloadable policy checkpoint — surface here, before the first tick.
pub struct WasteNetBuilder {
    config: ModelConfig,
}

impl WasteNetBuilder {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> ModelResult<WasteNet> {
        let config = self.config;
        if config.nb_nodes < 3 {
            return Err(ModelError::Construction(format!(
                "nb_nodes must be at least 3 (two depots + one dumpster), got {}",
                config.nb_nodes
            )));
        }
        if config.nb_episodes == 0 {
            return Err(ModelError::Construction(
                "nb_episodes must be at least 1".to_string(),
            ));
        }

        // Independent deterministic streams derived from the master seed.
        let mut root = SimRng::new(config.seed);
        let env_rng = root.child(1);
        let shuffle_rng = root.child(2);

        let route = generate_route(config.nb_nodes)?;
        let env = WasteNetEnv::new(config.nb_nodes, env_rng)?;

        let policy = Self::build_policy(&config)?;

        // Registry in topology traversal order, mirroring the route:
        // depots at the ends, one dumpster agent per node in between.
        let mut registry: AgentRegistry<WasteNetObs> = AgentRegistry::new();
        for (i, _node) in route.order.iter().enumerate() {
            let id = AgentId(i as u32);
            let node = NodeId(i as u32);
            let rng = AgentRng::new(config.seed, id);
            match route.kind(i) {
                NodeKind::Depot => registry.add(Box::new(DepotAgent::new(id, node)), rng),
                NodeKind::Dumpster => {
                    let dumpster = i - 1;
                    let initial_fill = env.fill_levels()[dumpster];
                    registry.add(
                        Box::new(DumpsterAgent::new(id, node, dumpster, initial_fill)),
                        rng,
                    );
                }
            }
        }

        let scheduler = ActivationScheduler::new(env, policy, registry, shuffle_rng);
        let controller = EpisodeController::new(scheduler, config.nb_episodes)?;

        Ok(WasteNet::from_parts(controller, route, config))
    }

    fn build_policy(
        config: &ModelConfig,
    ) -> ModelResult<PolicyAgent<WasteNetObs, WasteAction>> {
        let nb_dumpsters = config.nb_nodes - 2;
        let policy = match &config.mode {
            PolicyMode::Greedy { threshold } => {
                PolicyAgent::compute(GreedyThresholdPolicy::new(*threshold))
            }
            PolicyMode::Checkpoint { path } => {
                PolicyAgent::compute(CheckpointPolicy::load(path, nb_dumpsters)?)
            }
            PolicyMode::Learner => PolicyAgent::forward_backward(ThresholdLearner::new(
                LEARNER_INITIAL_THRESHOLD,
                LEARNER_RATE,
            )),
        };
        Ok(policy)
    }
}
