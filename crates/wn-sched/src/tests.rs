//! Integration tests for the scheduler and episode controller, driven by a
//! scripted environment and scripted policy backends.

use std::any::Any;
use std::sync::{Arc, Mutex};

use wn_core::{AgentId, AgentRng, SimRng};
use wn_env::{EnvError, EnvResult, Environment, Info, Transition};
use wn_policy::{ComputePolicy, ForwardBackwardPolicy, PolicyAgent, PolicyError, PolicyResult};

use crate::{
    ActivationScheduler, AgentRegistry, AgentStepError, EpisodeController, LocalAgent,
    ModelObserver, NoopObserver, SchedError, TickContext, TickCounters,
};

// ── Scripted environment ──────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct ScriptStep {
    reward: f64,
    done: bool,
    fail: bool,
}

fn ok(reward: f64, done: bool) -> ScriptStep {
    ScriptStep {
        reward,
        done,
        fail: false,
    }
}

/// Environment that plays back a fixed script of transitions. Once the
/// script runs out, the last entry repeats. Observation is the number of
/// completed steps.
struct ScriptEnv {
    script: Vec<ScriptStep>,
    steps_taken: usize,
    resets: Arc<Mutex<usize>>,
    phase_log: Option<Arc<Mutex<Vec<String>>>>,
}

impl ScriptEnv {
    fn new(script: Vec<ScriptStep>) -> (Self, Arc<Mutex<usize>>) {
        let resets = Arc::new(Mutex::new(0));
        (
            Self {
                script,
                steps_taken: 0,
                resets: Arc::clone(&resets),
                phase_log: None,
            },
            resets,
        )
    }

    fn always_done() -> (Self, Arc<Mutex<usize>>) {
        Self::new(vec![ok(1.0, true)])
    }
}

impl Environment for ScriptEnv {
    type Action = u32;
    type Observation = i64;

    fn observe(&self) -> i64 {
        self.steps_taken as i64
    }

    fn step(&mut self, _action: &u32) -> EnvResult<Transition<i64>> {
        let idx = self.steps_taken.min(self.script.len() - 1);
        let entry = self.script[idx];
        if entry.fail {
            return Err(EnvError::Config("scripted transition failure".into()));
        }
        self.steps_taken += 1;
        if let Some(log) = &self.phase_log {
            log.lock().unwrap().push("env.step".to_string());
        }
        Ok(Transition {
            observation: self.steps_taken as i64,
            reward: entry.reward,
            done: entry.done,
            info: Info::default(),
        })
    }

    fn reset(&mut self) -> i64 {
        *self.resets.lock().unwrap() += 1;
        self.observe()
    }
}

// ── Scripted policies ─────────────────────────────────────────────────────────

/// Compute backend that succeeds with a constant action, optionally failing
/// on one specific decide call (0-based).
struct ScriptedCompute {
    calls: usize,
    fail_on: Option<usize>,
    phase_log: Option<Arc<Mutex<Vec<String>>>>,
}

impl ScriptedCompute {
    fn ok() -> Self {
        Self {
            calls: 0,
            fail_on: None,
            phase_log: None,
        }
    }

    fn failing_on(call: usize) -> Self {
        Self {
            calls: 0,
            fail_on: Some(call),
            phase_log: None,
        }
    }
}

impl ComputePolicy<i64, u32> for ScriptedCompute {
    fn compute_action(&mut self, _obs: &i64) -> PolicyResult<u32> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_on == Some(call) {
            return Err(PolicyError::Backend("scripted decision failure".into()));
        }
        if let Some(log) = &self.phase_log {
            log.lock().unwrap().push("decide".to_string());
        }
        Ok(1)
    }

    fn name(&self) -> &str {
        "scripted-compute"
    }
}

/// Forward/backward backend recording its full call sequence.
struct RecordingLearner {
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingLearner {
    fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (Self { log: Arc::clone(&log) }, log)
    }
}

impl ForwardBackwardPolicy<i64, u32> for RecordingLearner {
    fn forward(&mut self, obs: &i64) -> PolicyResult<u32> {
        self.log.lock().unwrap().push(format!("forward({obs})"));
        Ok(0)
    }

    fn backward(&mut self, reward: f64, terminal: bool) -> PolicyResult<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("backward({reward}, {terminal})"));
        Ok(())
    }

    fn name(&self) -> &str {
        "recording-learner"
    }
}

// ── Stub agents ───────────────────────────────────────────────────────────────

/// Agent that appends its ID to a shared log on every step.
struct LoggingAgent {
    id: AgentId,
    step_log: Arc<Mutex<Vec<u32>>>,
    phase_log: Option<Arc<Mutex<Vec<String>>>>,
}

impl LocalAgent<i64> for LoggingAgent {
    fn id(&self) -> AgentId {
        self.id
    }

    fn step(
        &mut self,
        _ctx: &TickContext<'_, i64>,
        _rng: &mut AgentRng,
    ) -> Result<(), AgentStepError> {
        self.step_log.lock().unwrap().push(self.id.0);
        if let Some(log) = &self.phase_log {
            log.lock().unwrap().push(format!("agent({})", self.id.0));
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct FailingAgent {
    id: AgentId,
}

impl LocalAgent<i64> for FailingAgent {
    fn id(&self) -> AgentId {
        self.id
    }

    fn step(
        &mut self,
        _ctx: &TickContext<'_, i64>,
        _rng: &mut AgentRng,
    ) -> Result<(), AgentStepError> {
        Err(AgentStepError("bin lid jammed".to_string()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn logging_registry(n: u32) -> (AgentRegistry<i64>, Arc<Mutex<Vec<u32>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut registry = AgentRegistry::new();
    for i in 0..n {
        registry.add(
            Box::new(LoggingAgent {
                id: AgentId(i),
                step_log: Arc::clone(&log),
                phase_log: None,
            }),
            AgentRng::new(42, AgentId(i)),
        );
    }
    (registry, log)
}

fn compute_scheduler(
    env: ScriptEnv,
    registry: AgentRegistry<i64>,
    seed: u64,
) -> ActivationScheduler<ScriptEnv> {
    ActivationScheduler::new(
        env,
        PolicyAgent::compute(ScriptedCompute::ok()),
        registry,
        SimRng::new(seed),
    )
}

/// Observer counting every hook invocation.
#[derive(Default)]
struct CountingObserver {
    collects: usize,
    episode_ends: Vec<u32>,
    run_ends: usize,
}

impl ModelObserver<ScriptEnv> for CountingObserver {
    fn collect(&mut self, _scheduler: &ActivationScheduler<ScriptEnv>) {
        self.collects += 1;
    }

    fn on_episode_end(&mut self, remaining: u32) {
        self.episode_ends.push(remaining);
    }

    fn on_run_end(&mut self, _counters: &TickCounters) {
        self.run_ends += 1;
    }
}

// ── Counter semantics ─────────────────────────────────────────────────────────

#[test]
fn steps_increment_once_per_tick_independent_of_done() {
    let (env, _) = ScriptEnv::new(vec![ok(0.0, false), ok(0.0, true), ok(0.0, false)]);
    let (registry, _) = logging_registry(2);
    let mut controller =
        EpisodeController::new(compute_scheduler(env, registry, 1), 10).unwrap();

    for expected in 1..=3u64 {
        controller.advance(&mut NoopObserver).unwrap();
        let c = controller.scheduler().counters();
        assert_eq!(c.steps(), expected);
        assert_eq!(c.ticks_elapsed(), expected);
    }
}

#[test]
fn cumulative_reward_is_the_exact_sum_of_step_rewards() {
    // Binary-exact values so equality is meaningful.
    let (env, _) = ScriptEnv::new(vec![ok(0.5, false), ok(-1.25, false), ok(2.0, true)]);
    let (registry, _) = logging_registry(1);
    let mut scheduler = compute_scheduler(env, registry, 1);

    scheduler.step().unwrap();
    scheduler.step().unwrap();
    scheduler.step().unwrap();

    assert_eq!(scheduler.counters().cumulative_reward(), 1.25);
    assert_eq!(scheduler.counters().last_reward(), 2.0);
}

#[test]
fn reward_accumulates_across_episode_boundaries() {
    let (env, _) = ScriptEnv::always_done();
    let (registry, _) = logging_registry(1);
    let mut controller =
        EpisodeController::new(compute_scheduler(env, registry, 1), 3).unwrap();
    controller.run(&mut NoopObserver).unwrap();

    // Three one-tick episodes at reward 1.0 each; nothing reset the sum.
    assert_eq!(controller.scheduler().counters().cumulative_reward(), 3.0);
    assert_eq!(controller.scheduler().counters().steps(), 3);
}

// ── Terminal protocol ─────────────────────────────────────────────────────────

#[test]
fn notify_terminal_fires_iff_done_exactly_once() {
    let (env, _) = ScriptEnv::new(vec![ok(0.0, false), ok(0.0, true), ok(0.0, false)]);
    let (learner, log) = RecordingLearner::new();
    let (registry, _) = logging_registry(1);
    let mut scheduler = ActivationScheduler::new(
        env,
        PolicyAgent::forward_backward(learner),
        registry,
        SimRng::new(1),
    );

    assert!(!scheduler.step().unwrap());
    assert!(scheduler.step().unwrap());
    assert!(!scheduler.step().unwrap());

    // Tick 1: forward only. Tick 2 (terminal): forward, then the terminal
    // correction — forward with the final observation and a zero-reward
    // non-terminal backward. Tick 3: forward only.
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "forward(0)".to_string(),
            "forward(1)".to_string(),
            "forward(2)".to_string(),
            "backward(0, false)".to_string(),
            "forward(2)".to_string(),
        ]
    );
}

// ── Phase 2 semantics ─────────────────────────────────────────────────────────

#[test]
fn agents_are_stepped_even_on_terminal_ticks() {
    let (env, _) = ScriptEnv::always_done();
    let (registry, log) = logging_registry(5);
    let mut scheduler = compute_scheduler(env, registry, 1);

    assert!(scheduler.step().unwrap());
    assert_eq!(log.lock().unwrap().len(), 5);
}

#[test]
fn each_agent_steps_exactly_once_per_tick_covering_the_registry() {
    let (env, _) = ScriptEnv::new(vec![ok(0.0, false)]);
    let (registry, log) = logging_registry(5);
    let mut scheduler = compute_scheduler(env, registry, 42);

    for tick in 0..3 {
        scheduler.step().unwrap();
        let log = log.lock().unwrap();
        let mut this_tick: Vec<u32> = log[tick * 5..(tick + 1) * 5].to_vec();
        this_tick.sort_unstable();
        assert_eq!(this_tick, vec![0, 1, 2, 3, 4]);
    }
}

#[test]
fn activation_order_is_deterministic_under_a_fixed_seed() {
    let order_for = |seed: u64| {
        let (env, _) = ScriptEnv::new(vec![ok(0.0, false)]);
        let (registry, log) = logging_registry(20);
        let mut scheduler = compute_scheduler(env, registry, seed);
        scheduler.step().unwrap();
        scheduler.step().unwrap();
        let order = log.lock().unwrap().clone();
        order
    };

    assert_eq!(order_for(7), order_for(7));
    assert_ne!(order_for(7), order_for(8));
}

#[test]
fn activation_order_is_reshuffled_every_tick() {
    let (env, _) = ScriptEnv::new(vec![ok(0.0, false)]);
    let (registry, log) = logging_registry(20);
    let mut scheduler = compute_scheduler(env, registry, 3);

    for _ in 0..4 {
        scheduler.step().unwrap();
    }
    let log = log.lock().unwrap();
    let ticks: Vec<&[u32]> = log.chunks(20).collect();
    // Four identical permutations of 20 elements by chance is (1/20!)³.
    assert!(
        ticks.windows(2).any(|w| w[0] != w[1]),
        "permutation never changed across ticks"
    );
}

// ── Failure semantics ─────────────────────────────────────────────────────────

#[test]
fn decision_error_aborts_the_tick_with_no_partial_state() {
    let (env, resets) = ScriptEnv::new(vec![ok(1.0, false)]);
    let (registry, agent_log) = logging_registry(3);
    let scheduler = ActivationScheduler::new(
        env,
        PolicyAgent::compute(ScriptedCompute::failing_on(2)),
        registry,
        SimRng::new(1),
    );
    let mut controller = EpisodeController::new(scheduler, 10).unwrap();
    let mut observer = CountingObserver::default();

    controller.advance(&mut observer).unwrap();
    controller.advance(&mut observer).unwrap();

    // Tick 3: the backend fails. Nothing moves.
    let err = controller.advance(&mut observer).unwrap_err();
    assert!(matches!(err, SchedError::Decision(_)));
    let c = controller.scheduler().counters();
    assert_eq!(c.steps(), 2);
    assert_eq!(c.cumulative_reward(), 2.0);
    assert_eq!(agent_log.lock().unwrap().len(), 6);
    assert_eq!(observer.collects, 2);
    assert_eq!(*resets.lock().unwrap(), 0);

    // Retried externally, tick 4 proceeds normally.
    controller.advance(&mut observer).unwrap();
    assert_eq!(controller.scheduler().counters().steps(), 3);
    assert_eq!(agent_log.lock().unwrap().len(), 9);
}

#[test]
fn transition_error_leaves_counters_unmodified() {
    let (env, _) = ScriptEnv::new(vec![ScriptStep {
        reward: 0.0,
        done: false,
        fail: true,
    }]);
    let (registry, agent_log) = logging_registry(2);
    let mut scheduler = compute_scheduler(env, registry, 1);

    let err = scheduler.step().unwrap_err();
    assert!(matches!(err, SchedError::Transition(_)));
    assert_eq!(scheduler.counters().steps(), 0);
    assert_eq!(scheduler.counters().cumulative_reward(), 0.0);
    assert!(agent_log.lock().unwrap().is_empty());
}

#[test]
fn failing_agent_aborts_the_tick_and_names_the_agent() {
    let (env, _) = ScriptEnv::new(vec![ok(1.0, false)]);
    let mut registry: AgentRegistry<i64> = AgentRegistry::new();
    registry.add(
        Box::new(FailingAgent { id: AgentId(9) }),
        AgentRng::new(42, AgentId(9)),
    );
    let mut scheduler = compute_scheduler(env, registry, 1);

    let err = scheduler.step().unwrap_err();
    match err {
        SchedError::AgentStep { id, .. } => assert_eq!(id, AgentId(9)),
        other => panic!("expected AgentStep, got {other:?}"),
    }
    // The environment transition completed, so its reward is accounted,
    // but the tick itself did not: steps stays at zero.
    assert_eq!(scheduler.counters().steps(), 0);
    assert_eq!(scheduler.counters().cumulative_reward(), 1.0);
}

// ── Episode controller ────────────────────────────────────────────────────────

#[test]
fn zero_episode_budget_is_rejected_at_construction() {
    let (env, _) = ScriptEnv::always_done();
    let (registry, _) = logging_registry(1);
    let err = EpisodeController::new(compute_scheduler(env, registry, 1), 0).unwrap_err();
    assert!(matches!(err, SchedError::Construction(_)));
}

#[test]
fn single_episode_immediately_done_scenario() {
    let (env, resets) = ScriptEnv::always_done();
    let (registry, _) = logging_registry(2);
    let mut controller =
        EpisodeController::new(compute_scheduler(env, registry, 1), 1).unwrap();
    let mut observer = CountingObserver::default();

    controller.advance(&mut observer).unwrap();

    assert_eq!(controller.remaining_episodes(), 0);
    assert!(!controller.running());
    assert_eq!(*resets.lock().unwrap(), 1);
    assert_eq!(controller.scheduler().counters().steps(), 1);
    assert_eq!(observer.collects, 1);
    assert_eq!(observer.episode_ends, vec![0]);
    assert_eq!(observer.run_ends, 1);
}

#[test]
fn reset_happens_exactly_when_done() {
    let (env, resets) = ScriptEnv::new(vec![
        ok(0.0, false),
        ok(0.0, true),
        ok(0.0, false),
        ok(0.0, true),
    ]);
    let (registry, _) = logging_registry(1);
    let mut controller =
        EpisodeController::new(compute_scheduler(env, registry, 3), 3).unwrap();

    for _ in 0..4 {
        controller.advance(&mut NoopObserver).unwrap();
    }
    assert_eq!(*resets.lock().unwrap(), 2);
    assert!(controller.running());
    assert_eq!(controller.remaining_episodes(), 1);
}

#[test]
fn collect_runs_every_advance_regardless_of_done() {
    let (env, _) = ScriptEnv::new(vec![ok(0.0, false), ok(0.0, true)]);
    let (registry, _) = logging_registry(1);
    let mut controller =
        EpisodeController::new(compute_scheduler(env, registry, 1), 5).unwrap();
    let mut observer = CountingObserver::default();

    for _ in 0..2 {
        controller.advance(&mut observer).unwrap();
    }
    assert_eq!(observer.collects, 2);
    assert_eq!(observer.episode_ends.len(), 1);
}

#[test]
fn running_latches_false_once_and_further_advances_are_refused() {
    let (env, _) = ScriptEnv::always_done();
    let (registry, _) = logging_registry(1);
    let mut controller =
        EpisodeController::new(compute_scheduler(env, registry, 1), 2).unwrap();

    controller.advance(&mut NoopObserver).unwrap();
    assert!(controller.running());
    controller.advance(&mut NoopObserver).unwrap();
    assert!(!controller.running());

    assert!(matches!(
        controller.advance(&mut NoopObserver),
        Err(SchedError::Stopped)
    ));
    // Still stopped; nothing flipped back.
    assert!(!controller.running());
}

#[test]
fn run_drains_the_whole_episode_budget() {
    let (env, resets) = ScriptEnv::always_done();
    let (registry, _) = logging_registry(3);
    let mut controller =
        EpisodeController::new(compute_scheduler(env, registry, 1), 4).unwrap();
    let mut observer = CountingObserver::default();

    controller.run(&mut observer).unwrap();

    assert!(!controller.running());
    assert_eq!(controller.scheduler().counters().steps(), 4);
    assert_eq!(*resets.lock().unwrap(), 4);
    assert_eq!(observer.collects, 4);
    assert_eq!(observer.episode_ends, vec![3, 2, 1, 0]);
    assert_eq!(observer.run_ends, 1);
}

// ── Phase ordering ────────────────────────────────────────────────────────────

#[test]
fn policy_then_environment_then_agents_within_a_tick() {
    let phase_log = Arc::new(Mutex::new(Vec::new()));

    let (mut env, _) = ScriptEnv::new(vec![ok(0.0, false)]);
    env.phase_log = Some(Arc::clone(&phase_log));

    let mut policy = ScriptedCompute::ok();
    policy.phase_log = Some(Arc::clone(&phase_log));

    let step_log = Arc::new(Mutex::new(Vec::new()));
    let mut registry = AgentRegistry::new();
    for i in 0..3 {
        registry.add(
            Box::new(LoggingAgent {
                id: AgentId(i),
                step_log: Arc::clone(&step_log),
                phase_log: Some(Arc::clone(&phase_log)),
            }),
            AgentRng::new(42, AgentId(i)),
        );
    }

    let mut scheduler =
        ActivationScheduler::new(env, PolicyAgent::compute(policy), registry, SimRng::new(1));
    scheduler.step().unwrap();

    let log = phase_log.lock().unwrap();
    assert_eq!(log[0], "decide");
    assert_eq!(log[1], "env.step");
    assert_eq!(log.len(), 5);
    assert!(log[2..].iter().all(|e| e.starts_with("agent(")));
}
