//! Engine configuration and its validation.
//!
//! A plain struct of public fields plus `with_*` builder methods and a
//! `validate`, so configuration can be constructed either fluently or by
//! direct field assignment.

use crate::acceptance::Classification;
use crate::error::PalnsError;

/// Configuration for the PALNS engine.
///
/// # Examples
///
/// ```
/// use palns::config::PalnsConfig;
///
/// let config = PalnsConfig::default()
///     .with_temperature(100.0, 0.9995)
///     .with_rewards(33.0, 9.0, 3.0, 0.0)
///     .with_decay(0.9)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PalnsConfig {
    /// Starting annealing temperature `T0`. Must be `> 0`.
    pub initial_temperature: f64,

    /// Per-iteration cooling factor `alpha`, in `(0, 1)`.
    pub alpha: f64,

    /// Starting value for every pair's weight `W[k]`. Must be `> 0`.
    pub initial_weight: f64,

    /// Reward for `NewGlobalBest`.
    pub w_best: f64,
    /// Reward for `BetterThanCurrent`.
    pub w_better: f64,
    /// Reward for `Accepted`.
    pub w_accept: f64,
    /// Reward for `Rejected`.
    pub w_reject: f64,

    /// Weight exponential smoothing factor, in `[0, 1]`. `1.0` freezes
    /// weights; `0.0` makes them memoryless.
    pub decay: f64,

    /// Objective-comparison tolerance `epsilon`, must be `>= 0`.
    pub precision: f64,

    /// Number of parallel workers. `None` defaults to half the available
    /// hardware concurrency, floored at 1.
    pub number_of_threads: Option<usize>,

    /// Seed for the per-worker random sources. `None` draws a fresh seed
    /// from the OS at `solve` time.
    pub random_seed: Option<u64>,
}

impl Default for PalnsConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            alpha: 0.9995,
            initial_weight: 1.0,
            w_best: 33.0,
            w_better: 9.0,
            w_accept: 3.0,
            w_reject: 0.0,
            decay: 0.8,
            precision: 1e-9,
            number_of_threads: None,
            random_seed: None,
        }
    }
}

impl PalnsConfig {
    pub fn with_temperature(mut self, initial: f64, alpha: f64) -> Self {
        self.initial_temperature = initial;
        self.alpha = alpha;
        self
    }

    pub fn with_initial_weight(mut self, initial_weight: f64) -> Self {
        self.initial_weight = initial_weight;
        self
    }

    pub fn with_rewards(mut self, best: f64, better: f64, accept: f64, reject: f64) -> Self {
        self.w_best = best;
        self.w_better = better;
        self.w_accept = accept;
        self.w_reject = reject;
        self
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_threads(mut self, n: usize) -> Self {
        self.number_of_threads = Some(n);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Resolves `number_of_threads`, applying the default heuristic of
    /// half the hardware concurrency, floored at 1.
    pub fn resolved_thread_count(&self) -> usize {
        self.number_of_threads.unwrap_or_else(|| {
            let available = std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1);
            (available / 2).max(1)
        })
    }

    /// The configured reward for a given classification.
    pub fn reward(&self, classification: Classification) -> f64 {
        match classification {
            Classification::Rejected => self.w_reject,
            Classification::Accepted => self.w_accept,
            Classification::BetterThanCurrent => self.w_better,
            Classification::NewGlobalBest => self.w_best,
        }
    }

    /// Validates configuration invariants.
    ///
    /// Surfaced at construction time and is fatal: see
    /// [`crate::engine::PalnsEngine::new`].
    pub fn validate(&self) -> Result<(), PalnsError> {
        if self.initial_temperature <= 0.0 {
            return Err(PalnsError::Config(format!(
                "initial_temperature must be > 0, got {}",
                self.initial_temperature
            )));
        }
        if !(0.0 < self.alpha && self.alpha < 1.0) {
            return Err(PalnsError::Config(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if self.initial_weight <= 0.0 {
            return Err(PalnsError::Config(format!(
                "initial_weight must be > 0, got {}",
                self.initial_weight
            )));
        }
        if !(0.0..=1.0).contains(&self.decay) {
            return Err(PalnsError::Config(format!(
                "decay must be in [0, 1], got {}",
                self.decay
            )));
        }
        if self.precision < 0.0 {
            return Err(PalnsError::Config(format!(
                "precision must be >= 0, got {}",
                self.precision
            )));
        }
        if let Some(n) = self.number_of_threads {
            if n == 0 {
                return Err(PalnsError::Config(
                    "number_of_threads must be >= 1".to_string(),
                ));
            }
        }
        for (name, reward) in [
            ("w_best", self.w_best),
            ("w_better", self.w_better),
            ("w_accept", self.w_accept),
            ("w_reject", self.w_reject),
        ] {
            if reward < 0.0 {
                return Err(PalnsError::Config(format!(
                    "{name} must be >= 0, got {reward}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(PalnsConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_nonpositive_temperature() {
        let config = PalnsConfig::default().with_temperature(0.0, 0.9);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_alpha_out_of_range() {
        assert!(PalnsConfig::default()
            .with_temperature(1.0, 0.0)
            .validate()
            .is_err());
        assert!(PalnsConfig::default()
            .with_temperature(1.0, 1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn rejects_nonpositive_initial_weight() {
        assert!(PalnsConfig::default()
            .with_initial_weight(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn rejects_decay_out_of_range() {
        assert!(PalnsConfig::default().with_decay(-0.1).validate().is_err());
        assert!(PalnsConfig::default().with_decay(1.1).validate().is_err());
    }

    #[test]
    fn rejects_negative_precision() {
        assert!(PalnsConfig::default()
            .with_precision(-1e-9)
            .validate()
            .is_err());
    }

    #[test]
    fn rejects_zero_threads() {
        assert!(PalnsConfig::default().with_threads(0).validate().is_err());
    }

    #[test]
    fn reward_table_matches_classification() {
        let config = PalnsConfig::default().with_rewards(40.0, 20.0, 10.0, 1.0);
        assert_eq!(config.reward(Classification::NewGlobalBest), 40.0);
        assert_eq!(config.reward(Classification::BetterThanCurrent), 20.0);
        assert_eq!(config.reward(Classification::Accepted), 10.0);
        assert_eq!(config.reward(Classification::Rejected), 1.0);
    }

    #[test]
    fn resolved_thread_count_honors_explicit_override() {
        let config = PalnsConfig::default().with_threads(7);
        assert_eq!(config.resolved_thread_count(), 7);
    }
}
