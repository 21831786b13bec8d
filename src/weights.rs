//! Weight table, cumulative distribution, and roulette-wheel operator
//! selection.

use crate::acceptance::Classification;
use crate::config::PalnsConfig;

/// Per-pair weights `W` and their derived cumulative distribution `C`.
///
/// `C` is recomputed every time `W` is mutated, so the two are always
/// consistent with each other.
#[derive(Debug, Clone)]
pub struct WeightTable {
    weights: Vec<f64>,
    cumulative: Vec<f64>,
}

impl WeightTable {
    /// Builds a table of `pairs` entries, all initialized to `initial_weight`.
    ///
    /// # Panics
    /// Panics if `pairs == 0` or `initial_weight <= 0.0`; both are
    /// configuration invariants validated earlier by [`PalnsConfig::validate`].
    pub fn new(pairs: usize, initial_weight: f64) -> Self {
        assert!(pairs > 0, "operator pair count must be positive");
        assert!(initial_weight > 0.0, "initial_weight must be positive");
        let weights = vec![initial_weight; pairs];
        let mut table = Self {
            cumulative: weights.clone(),
            weights,
        };
        table.recompute_cumulative();
        table
    }

    /// Number of operator pairs `P`.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Current weight vector.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Current cumulative distribution. `cumulative()[len() - 1] == 1.0`
    /// (to floating-point tolerance) as long as `len() > 0`.
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Applies the exponential-smoothing weight update to pair `k` given
    /// the final classification `c`, then recomputes `C`.
    ///
    /// `W[k] <- decay * W[k] + (1 - decay) * reward(c)`
    pub fn update(&mut self, pair: usize, classification: Classification, config: &PalnsConfig) {
        let reward = config.reward(classification);
        let w = &mut self.weights[pair];
        *w = config.decay * *w + (1.0 - config.decay) * reward;
        self.recompute_cumulative();
    }

    fn recompute_cumulative(&mut self) {
        let total: f64 = self.weights.iter().sum();
        let mut running = 0.0;
        for (c, &w) in self.cumulative.iter_mut().zip(self.weights.iter()) {
            running += w;
            *c = running / total;
        }
        if let Some(last) = self.cumulative.last_mut() {
            *last = 1.0;
        }
    }

    /// Selects a pair index via inverse-CDF sampling.
    ///
    /// Returns the smallest `i` such that `cumulative()[i] > u`; falls back
    /// to the last index if no such `i` exists (rounding at `u == 1.0`).
    pub fn select(&self, u: f64) -> usize {
        self.cumulative
            .iter()
            .position(|&c| c > u)
            .unwrap_or(self.cumulative.len() - 1)
    }
}
