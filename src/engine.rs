//! The worker iteration pipeline and the coordinator.

use crate::acceptance::{classify, Classification};
use crate::error::PalnsError;
use crate::operators::{pair_count, resolve_pair, DestroyOperator, RepairOperator};
use crate::problem::{AbortPredicate, ConstructionHeuristic, ProgressCallback, Solution};
use crate::random::{fresh_master_seed, uniform01, worker_rng};
use crate::state::SharedState;
use crate::config::PalnsConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::task::JoinSet;

/// Builds and runs a PALNS search.
///
/// Generic over the solution type `S`, the construction heuristic `Con`, the
/// destroy/repair operator types `D`/`Rp`, and the abort predicate `Ab`,
/// plus an optional progress callback registered separately.
pub struct PalnsEngine<S, Con, D, Rp, Ab>
where
    S: Solution,
    Con: ConstructionHeuristic<S>,
    D: DestroyOperator<S>,
    Rp: RepairOperator<S>,
    Ab: AbortPredicate<S>,
{
    construction: Con,
    destroy_ops: Vec<D>,
    repair_ops: Vec<Rp>,
    config: PalnsConfig,
    abort: Ab,
    progress: Option<Arc<dyn ProgressCallback<S> + Send + Sync>>,
}

impl<S, Con, D, Rp, Ab> PalnsEngine<S, Con, D, Rp, Ab>
where
    S: Solution,
    Con: ConstructionHeuristic<S>,
    D: DestroyOperator<S>,
    Rp: RepairOperator<S>,
    Ab: AbortPredicate<S>,
{
    /// Constructs a new engine, validating configuration eagerly. A bad
    /// configuration or an empty operator list is fatal at construction,
    /// not at the first iteration.
    pub fn new(
        construction: Con,
        destroy_ops: Vec<D>,
        repair_ops: Vec<Rp>,
        config: PalnsConfig,
        abort: Ab,
    ) -> Result<Self, PalnsError> {
        config.validate()?;
        if destroy_ops.is_empty() {
            return Err(PalnsError::Config(
                "at least one destroy operator is required".to_string(),
            ));
        }
        if repair_ops.is_empty() {
            return Err(PalnsError::Config(
                "at least one repair operator is required".to_string(),
            ));
        }
        Ok(Self {
            construction,
            destroy_ops,
            repair_ops,
            config,
            abort,
            progress: None,
        })
    }

    /// Registers a progress callback receiving the current best after every
    /// iteration of every worker.
    pub fn with_progress_callback<F>(mut self, callback: F) -> Self
    where
        F: ProgressCallback<S> + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }
}

/// Mutable run-scoped bookkeeping that does not belong in [`SharedState`]:
/// the cooperative stop flag and the first-failure slot. The first failing
/// worker sets both, causing every other worker to stop on its next
/// iteration boundary; the coordinator re-surfaces that original failure.
struct RunControl {
    stop: AtomicBool,
    failure: StdMutex<Option<PalnsError>>,
}

impl RunControl {
    fn new() -> Self {
        Self {
            stop: AtomicBool::new(false),
            failure: StdMutex::new(None),
        }
    }

    fn record_failure(&self, err: PalnsError) {
        self.stop.store(true, Ordering::Relaxed);
        let mut guard = self.failure.lock().unwrap();
        if guard.is_none() {
            *guard = Some(err);
        }
    }

    fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    fn take_failure(&self) -> Option<PalnsError> {
        self.failure.lock().unwrap().take()
    }
}

impl<S, Con, D, Rp, Ab> PalnsEngine<S, Con, D, Rp, Ab>
where
    S: Solution + 'static,
    Con: ConstructionHeuristic<S> + 'static,
    D: DestroyOperator<S> + 'static,
    Rp: RepairOperator<S> + 'static,
    Ab: AbortPredicate<S> + 'static,
{
    /// Runs the search to completion.
    ///
    /// Builds `x0` on the caller's task, seeds `x = x* = x0`, launches `N`
    /// workers, blocks until all workers terminate, then returns `x*`.
    /// Errors from any operator or the abort predicate terminate every
    /// worker and are re-surfaced here; `x*` is not returned on failure.
    pub async fn solve(self) -> Result<S, PalnsError> {
        let x0 = self.construction.build();
        let pairs = pair_count(self.destroy_ops.len(), self.repair_ops.len());
        let state = SharedState::new(x0, pairs, self.config.initial_weight);
        let master_seed = self.config.random_seed.unwrap_or_else(fresh_master_seed);
        let worker_count = self.config.resolved_thread_count();

        let run = Arc::new(Run {
            engine: self,
            state,
            control: RunControl::new(),
        });

        log::debug!("starting PALNS search with {worker_count} workers");
        let mut workers = JoinSet::new();
        for worker_index in 0..worker_count {
            let run = run.clone();
            workers.spawn(async move { worker_loop(run, worker_index, master_seed).await });
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(join_err) = joined {
                run.control.record_failure(PalnsError::Operator {
                    operator: "worker".to_string(),
                    source: Box::new(join_err),
                });
            }
        }
        log::debug!("all workers joined");

        if let Some(err) = run.control.take_failure() {
            log::warn!("search terminated with an error: {err}");
            return Err(err);
        }

        Ok(run.state.clone_best().await)
    }
}

/// Everything a spawned worker needs, bundled so a single `Arc` clone hands
/// a task shared access to the engine's collaborators, the shared state, and
/// the run-scoped control flags.
struct Run<S, Con, D, Rp, Ab>
where
    S: Solution,
    Con: ConstructionHeuristic<S>,
    D: DestroyOperator<S>,
    Rp: RepairOperator<S>,
    Ab: AbortPredicate<S>,
{
    engine: PalnsEngine<S, Con, D, Rp, Ab>,
    state: SharedState<S>,
    control: RunControl,
}

/// One worker's loop: repeats the seven-stage pipeline until the abort
/// predicate returns true, an error is encountered, or another worker
/// signals termination.
async fn worker_loop<S, Con, D, Rp, Ab>(
    run: Arc<Run<S, Con, D, Rp, Ab>>,
    worker_index: usize,
    master_seed: u64,
) where
    S: Solution,
    Con: ConstructionHeuristic<S>,
    D: DestroyOperator<S>,
    Rp: RepairOperator<S>,
    Ab: AbortPredicate<S>,
{
    let mut rng = worker_rng(master_seed, worker_index);
    let mut temperature = run.engine.config.initial_temperature;
    let repair_count = run.engine.repair_ops.len();

    loop {
        if run.control.should_stop() {
            break;
        }

        // Stage 1: select pair, under the weight lock.
        let k = {
            let table = run.state.weights.lock().await;
            let u = uniform01(&mut rng);
            table.select(u)
        };
        let pair = resolve_pair(k, repair_count);

        // Stage 2: snapshot the incumbent, under the clone lock.
        let snapshot = { run.state.current.lock().await.x.clone_solution() };

        // Stage 3: transform, outside all locks.
        let destroy_op = &run.engine.destroy_ops[pair.destroy];
        let destroyed = match destroy_op.destroy(&snapshot).await {
            Ok(s) => s,
            Err(source) => {
                run.control.record_failure(PalnsError::Operator {
                    operator: destroy_op.name().to_string(),
                    source,
                });
                break;
            }
        };
        let repair_op = &run.engine.repair_ops[pair.repair];
        let candidate = match repair_op.repair(&destroyed).await {
            Ok(s) => s,
            Err(source) => {
                run.control.record_failure(PalnsError::Operator {
                    operator: repair_op.name().to_string(),
                    source,
                });
                break;
            }
        };

        // Stage 4: reconsider the incumbent, under the clone lock.
        let mut classification = {
            let mut current = run.state.current.lock().await;
            let c = classify(
                &candidate,
                &current.x,
                temperature,
                run.engine.config.precision,
                &mut rng,
            );
            if c >= Classification::Accepted {
                current.x = candidate.clone_solution();
            }
            c
        };

        // Stage 5: reconsider the best, under the best lock.
        {
            let mut best = run.state.best.lock().await;
            if best.x_star.objective() - candidate.objective() > run.engine.config.precision {
                best.x_star = candidate;
                classification = Classification::NewGlobalBest;
                log::info!("new global best: {}", best.x_star.objective());
            }
        }

        // Stage 6: update weights, under the weight lock.
        {
            let mut table = run.state.weights.lock().await;
            table.update(k, classification, &run.engine.config);
        }

        // Stage 7: cool and report.
        temperature *= run.engine.config.alpha;
        let best_snapshot = run.state.clone_best().await;
        if let Some(callback) = &run.engine.progress {
            callback.on_progress(&best_snapshot);
        }
        log::trace!(
            "worker {worker_index}: pair {k:?} -> {classification:?}, temperature {temperature}"
        );

        match run.engine.abort.should_abort(&best_snapshot) {
            Ok(true) => {
                run.control.stop.store(true, Ordering::Relaxed);
                break;
            }
            Ok(false) => {}
            Err(source) => {
                run.control
                    .record_failure(PalnsError::Abort { source });
                break;
            }
        }
    }
}
