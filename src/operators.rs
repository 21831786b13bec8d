//! Destroy/repair operators and the fixed pair linearization.

use crate::problem::Solution;
use std::error::Error as StdError;

/// Boxed error type returned by a failing operator. Operators are not
/// required to use any particular error type; the engine wraps whatever
/// they return with the operator's name before surfacing it through
/// [`crate::error::PalnsError`].
pub type OperatorError = Box<dyn StdError + Send + Sync>;

/// A destroy operator: `S -> S`, possibly asynchronous.
///
/// Operators must be side-effect-free with respect to engine state: they
/// read their input and return a new or modified solution; they must not
/// reach into shared engine state.
pub trait DestroyOperator<S: Solution>: Send + Sync {
    /// Human-readable operator name, used in diagnostics and in
    /// [`PalnsError::Operator`](crate::error::PalnsError::Operator).
    fn name(&self) -> &str;

    /// Partially dismantles `solution`, returning a new solution.
    fn destroy(
        &self,
        solution: &S,
    ) -> impl std::future::Future<Output = Result<S, OperatorError>> + Send;
}

/// A repair operator: `S -> S`, possibly asynchronous.
pub trait RepairOperator<S: Solution>: Send + Sync {
    /// Human-readable operator name, used in diagnostics.
    fn name(&self) -> &str;

    /// Reconstructs a full solution from a partially destroyed one.
    fn repair(
        &self,
        solution: &S,
    ) -> impl std::future::Future<Output = Result<S, OperatorError>> + Send;
}

/// The fixed linearization of the destroy x repair Cartesian product: pair
/// index `k` corresponds to destroy `k / R` and repair `k % R`, where `R`
/// is the number of repair operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairIndex {
    pub destroy: usize,
    pub repair: usize,
}

/// Total number of operator pairs `P = D * R`.
pub fn pair_count(destroy_count: usize, repair_count: usize) -> usize {
    destroy_count * repair_count
}

/// Resolves a linear pair index `k` into its `(destroy, repair)` components.
pub fn resolve_pair(k: usize, repair_count: usize) -> PairIndex {
    PairIndex {
        destroy: k / repair_count,
        repair: k % repair_count,
    }
}
