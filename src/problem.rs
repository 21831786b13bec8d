//! External collaborator traits: the solution type, the construction
//! heuristic, the abort predicate, and the progress callback.
//!
//! Everything in this module is an interface the caller supplies; none of
//! it is implemented by the engine itself.

/// The opaque solution type the engine searches over.
///
/// Implementors must provide an independent deep copy: mutating the clone
/// must never affect the original.
pub trait Solution: Send + 'static {
    /// Objective value; smaller is better (minimization).
    fn objective(&self) -> f64;

    /// An independent deep copy. Named `clone_solution` rather than
    /// `Clone::clone` so problem types are free to also derive `Clone` for
    /// unrelated reasons without ambiguity at call sites.
    fn clone_solution(&self) -> Self;
}

/// Builds the initial solution `x0`.
///
/// Called exactly once, on the coordinator's thread, before any worker
/// starts.
pub trait ConstructionHeuristic<S: Solution>: Send + Sync {
    /// Produces the initial feasible solution.
    fn build(&self) -> S;
}

/// Error raised by a failing abort predicate, propagated identically to an
/// operator error.
pub type AbortError = Box<dyn std::error::Error + Send + Sync>;

/// Cooperative cancellation predicate.
///
/// Always passes the current best; implementors that don't need it simply
/// ignore the argument, which subsumes a nullary `() -> bool` predicate
/// without needing a second trait shape (see DESIGN.md, Open Question (b)).
pub trait AbortPredicate<S: Solution>: Send + Sync {
    /// Evaluated at the end of every iteration of every worker. Must be
    /// thread-safe; called from arbitrary worker tasks. A failing predicate
    /// terminates the search the same way a failing operator does.
    fn should_abort(&self, current_best: &S) -> Result<bool, AbortError>;
}

/// An abort predicate that never fires; useful in tests or when termination
/// is governed entirely by an external cancellation token.
pub struct Never;

impl<S: Solution> AbortPredicate<S> for Never {
    fn should_abort(&self, _current_best: &S) -> Result<bool, AbortError> {
        Ok(false)
    }
}

/// Stops after a fixed number of iterations have been observed across all
/// workers combined.
pub struct MaxIterations {
    remaining: std::sync::atomic::AtomicUsize,
}

impl MaxIterations {
    pub fn new(max_iterations: usize) -> Self {
        Self {
            remaining: std::sync::atomic::AtomicUsize::new(max_iterations),
        }
    }
}

impl<S: Solution> AbortPredicate<S> for MaxIterations {
    fn should_abort(&self, _current_best: &S) -> Result<bool, AbortError> {
        use std::sync::atomic::Ordering;
        // Each call consumes one unit of budget; once exhausted, every
        // worker's next check observes zero and aborts.
        let prev = self.remaining.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |r| {
            Some(r.saturating_sub(1))
        });
        Ok(prev.map(|r| r == 0).unwrap_or(true))
    }
}

/// Receives the current best after every iteration of every worker.
pub trait ProgressCallback<S: Solution>: Send + Sync {
    fn on_progress(&self, current_best: &S);
}

impl<S, F> ProgressCallback<S> for F
where
    S: Solution,
    F: Fn(&S) + Send + Sync,
{
    fn on_progress(&self, current_best: &S) {
        self(current_best)
    }
}
