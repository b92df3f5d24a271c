//! The `WasteNet` model facade.

use wn_env::{WasteNetEnv, WasteNetObs};
use wn_sched::{
    ActivationScheduler, AgentRegistry, EpisodeController, ModelObserver, TickCounters,
};

use crate::topology::Route;
use crate::{ModelConfig, ModelResult, WasteNetBuilder};

/// A fully wired waste-collection model: environment, policy, agent
/// population, scheduler, and episode controller.
///
/// Create via [`WasteNet::build`] (or [`WasteNetBuilder`] directly), then
/// drive with [`advance`][Self::advance] per external tick request — or
/// [`run`][Self::run] to exhaust the episode budget in one call.
pub struct WasteNet {
    controller: EpisodeController<WasteNetEnv>,
    route: Route,
    config: ModelConfig,
}

impl WasteNet {
    pub fn build(config: ModelConfig) -> ModelResult<Self> {
        WasteNetBuilder::new(config).build()
    }

    pub(crate) fn from_parts(
        controller: EpisodeController<WasteNetEnv>,
        route: Route,
        config: ModelConfig,
    ) -> Self {
        Self {
            controller,
            route,
            config,
        }
    }

    /// One external tick: scheduler step, collection, reset-on-done.
    pub fn advance<Ob: ModelObserver<WasteNetEnv>>(&mut self, observer: &mut Ob) -> ModelResult<()> {
        self.controller.advance(observer)?;
        Ok(())
    }

    /// Advance until the episode budget is exhausted.
    pub fn run<Ob: ModelObserver<WasteNetEnv>>(&mut self, observer: &mut Ob) -> ModelResult<()> {
        self.controller.run(observer)?;
        Ok(())
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.controller.running()
    }

    #[inline]
    pub fn remaining_episodes(&self) -> u32 {
        self.controller.remaining_episodes()
    }

    pub fn counters(&self) -> &TickCounters {
        self.controller.scheduler().counters()
    }

    pub fn scheduler(&self) -> &ActivationScheduler<WasteNetEnv> {
        self.controller.scheduler()
    }

    pub fn env(&self) -> &WasteNetEnv {
        self.controller.scheduler().env()
    }

    pub fn registry(&self) -> &AgentRegistry<WasteNetObs> {
        self.controller.scheduler().registry()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}
