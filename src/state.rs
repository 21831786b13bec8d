//! Shared mutable state and its three guards.
//!
//! Three independent [`tokio::sync::Mutex`]es, one per critical section, so
//! that no stage ever needs more than one lock at a time — there is no
//! nested acquisition, so deadlock is structurally impossible.
//! `tokio::sync::Mutex` rather than a thread-blocking primitive because
//! destroy/repair operators may suspend while a caller holds one of these
//! guards across an await point, even though no stage here actually does so
//! across a stage boundary.

use crate::problem::Solution;
use crate::weights::WeightTable;
use tokio::sync::Mutex;

/// The incumbent solution `x`, guarded by the *clone lock*.
pub struct CurrentSolution<S: Solution> {
    pub x: S,
}

/// The best solution ever observed `x*`, guarded by the *best lock*.
pub struct BestSolution<S: Solution> {
    pub x_star: S,
}

/// All shared mutable state a PALNS search touches, grouped one lock per
/// field so stages never contend on state they don't need.
pub struct SharedState<S: Solution> {
    /// Guards `W` and `C` (stages 1 and 6).
    pub weights: Mutex<WeightTable>,
    /// Guards the incumbent `x` (stages 2 and 4).
    pub current: Mutex<CurrentSolution<S>>,
    /// Guards the best solution `x*` (stage 5).
    pub best: Mutex<BestSolution<S>>,
}

impl<S: Solution> SharedState<S> {
    /// Seeds `x = x* = x0` and builds an empty weight table of `pairs`
    /// entries. Called once by the coordinator before any worker starts.
    pub fn new(x0: S, pairs: usize, initial_weight: f64) -> Self {
        Self {
            weights: Mutex::new(WeightTable::new(pairs, initial_weight)),
            current: Mutex::new(CurrentSolution {
                x: x0.clone_solution(),
            }),
            best: Mutex::new(BestSolution { x_star: x0 }),
        }
    }

    /// Snapshots the current best's objective without holding the lock
    /// longer than necessary; used by the abort predicate and progress
    /// callback, which only need to read, never write.
    pub async fn best_objective(&self) -> f64 {
        self.best.lock().await.x_star.objective()
    }

    /// Clones the current best out from under its lock.
    pub async fn clone_best(&self) -> S {
        self.best.lock().await.x_star.clone_solution()
    }
}
