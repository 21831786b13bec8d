//! Acceptance oracle and classification tag.

use crate::problem::Solution;
use crate::random::uniform01;
use rand::Rng;

/// Outcome of classifying one candidate against the incumbent, ordered by
/// merit: `Rejected < Accepted < BetterThanCurrent < NewGlobalBest`.
///
/// Declaration order doubles as merit order so `#[derive(Ord)]` gives the
/// needed comparison directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Classification {
    Rejected,
    Accepted,
    BetterThanCurrent,
    NewGlobalBest,
}

/// Classifies a candidate `x'` against the incumbent `x` under a
/// simulated-annealing acceptance rule.
///
/// 1. If `x.objective - x'.objective > precision`: `BetterThanCurrent`.
/// 2. Otherwise, accept with probability `exp(-delta / temperature)` where
///    `delta = x'.objective - x.objective` (non-negative within `precision`).
///
/// `temperature` must be `> 0` (a worker-loop precondition, not re-checked
/// here — see [`crate::config::PalnsConfig::validate`]).
pub fn classify<S: Solution, R: Rng + ?Sized>(
    candidate: &S,
    incumbent: &S,
    temperature: f64,
    precision: f64,
    rng: &mut R,
) -> Classification {
    let improvement = incumbent.objective() - candidate.objective();
    if improvement > precision {
        return Classification::BetterThanCurrent;
    }

    let delta = candidate.objective() - incumbent.objective();
    let acceptance_probability = (-delta / temperature).exp();
    let draw = uniform01(rng);
    if draw <= acceptance_probability {
        Classification::Accepted
    } else {
        Classification::Rejected
    }
}
