//! Per-worker random source construction.
//!
//! Rather than pooling a single generator behind a lock, each worker gets
//! its own [`rand::rngs::StdRng`], seeded by mixing the configured (or
//! OS-drawn) master seed with the worker's index. No generator is ever
//! shared across an `await` point, and cheap RNG construction makes
//! per-worker seeding equivalent to (and simpler than) a pooled source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic RNG from a master seed and a worker index.
///
/// Two distinct worker indices under the same master seed produce
/// statistically independent streams (splitmix64-style seed derivation);
/// the same `(seed, worker_index)` pair always reproduces the same stream,
/// which makes a single-worker run fully reproducible for fixed inputs.
pub fn worker_rng(master_seed: u64, worker_index: usize) -> StdRng {
    StdRng::seed_from_u64(mix_seed(master_seed, worker_index as u64))
}

/// Draws a fresh, OS-derived master seed for unseeded runs.
pub fn fresh_master_seed() -> u64 {
    rand::random()
}

/// splitmix64 finalizer, used to decorrelate `(seed, index)` pairs.
fn mix_seed(seed: u64, index: u64) -> u64 {
    let mut z = seed.wrapping_add(index.wrapping_mul(0x9E3779B97F4A7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Draws a uniform value in `[0, 1)` from the given generator.
///
/// Thin wrapper so call sites read as "draw a uniform" rather than
/// spelling out the range every time.
pub fn uniform01<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random_range(0.0..1.0)
}
