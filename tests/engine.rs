//! Integration tests running the full engine against a small but
//! nontrivial problem: pack items into a capacity-limited knapsack.

use palns::config::PalnsConfig;
use palns::engine::PalnsEngine;
use palns::operators::{DestroyOperator, RepairOperator, OperatorError};
use palns::problem::{ConstructionHeuristic, MaxIterations, Solution};

const ITEM_WEIGHTS: [u32; 8] = [2, 3, 4, 5, 9, 7, 1, 6];
const ITEM_VALUES: [u32; 8] = [3, 4, 5, 8, 10, 9, 1, 7];
const CAPACITY: u32 = 15;

/// A candidate packing, scored as `-value` (minimization) with a large
/// penalty for exceeding capacity so infeasible packings are never
/// preferred over feasible ones of lower value.
#[derive(Clone, Debug)]
struct Knapsack {
    taken: Vec<bool>,
}

impl Knapsack {
    fn weight(&self) -> u32 {
        self.taken
            .iter()
            .zip(ITEM_WEIGHTS.iter())
            .filter(|(&t, _)| t)
            .map(|(_, &w)| w)
            .sum()
    }

    fn value(&self) -> u32 {
        self.taken
            .iter()
            .zip(ITEM_VALUES.iter())
            .filter(|(&t, _)| t)
            .map(|(_, &v)| v)
            .sum()
    }
}

impl Solution for Knapsack {
    fn objective(&self) -> f64 {
        let over = self.weight().saturating_sub(CAPACITY);
        -(self.value() as f64) + (over as f64) * 1000.0
    }

    fn clone_solution(&self) -> Self {
        self.clone()
    }
}

struct EmptyStart;
impl ConstructionHeuristic<Knapsack> for EmptyStart {
    fn build(&self) -> Knapsack {
        Knapsack {
            taken: vec![false; ITEM_WEIGHTS.len()],
        }
    }
}

/// Drops a deterministic item from the packing, freeing capacity for repair
/// to fill with something else.
struct DropHeaviestTaken;
impl DestroyOperator<Knapsack> for DropHeaviestTaken {
    fn name(&self) -> &str {
        "drop_heaviest_taken"
    }

    async fn destroy(&self, solution: &Knapsack) -> Result<Knapsack, OperatorError> {
        let mut taken = solution.taken.clone();
        if let Some(i) = taken
            .iter()
            .enumerate()
            .filter(|(_, &t)| t)
            .max_by_key(|&(i, _)| ITEM_WEIGHTS[i])
            .map(|(i, _)| i)
        {
            taken[i] = false;
        }
        Ok(Knapsack { taken })
    }
}

/// Greedily adds the first untaken item that still fits.
struct GreedyFill;
impl RepairOperator<Knapsack> for GreedyFill {
    fn name(&self) -> &str {
        "greedy_fill"
    }

    async fn repair(&self, solution: &Knapsack) -> Result<Knapsack, OperatorError> {
        let mut taken = solution.taken.clone();
        let mut weight: u32 = taken
            .iter()
            .zip(ITEM_WEIGHTS.iter())
            .filter(|(&t, _)| t)
            .map(|(_, &w)| w)
            .sum();
        for (i, &w) in ITEM_WEIGHTS.iter().enumerate() {
            if !taken[i] && weight + w <= CAPACITY {
                taken[i] = true;
                weight += w;
            }
        }
        Ok(Knapsack { taken })
    }
}

#[tokio::test]
async fn engine_finds_a_feasible_packing_at_least_as_good_as_greedy_from_empty() {
    let config = PalnsConfig::default()
        .with_temperature(10.0, 0.995)
        .with_threads(4)
        .with_seed(20260727);
    let engine = PalnsEngine::new(
        EmptyStart,
        vec![DropHeaviestTaken],
        vec![GreedyFill],
        config,
        MaxIterations::new(500),
    )
    .unwrap();

    let result = engine.solve().await.unwrap();
    assert!(result.weight() <= CAPACITY, "result overflowed capacity: {}", result.weight());

    let greedy_baseline = GreedyFill
        .repair(&Knapsack {
            taken: vec![false; ITEM_WEIGHTS.len()],
        })
        .await
        .unwrap();
    assert!(result.value() >= greedy_baseline.value());
}

/// Write-half of a shared in-memory sink, so `env_logger` can be pointed at
/// a buffer this test can read back instead of stderr.
struct SharedBuf(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Installs (once per test binary) an `env_logger` targeting a shared
/// buffer, and returns that buffer so tests can inspect what was logged.
fn captured_log() -> std::sync::Arc<std::sync::Mutex<Vec<u8>>> {
    static BUF: std::sync::OnceLock<std::sync::Arc<std::sync::Mutex<Vec<u8>>>> =
        std::sync::OnceLock::new();
    BUF.get_or_init(|| {
        let buf = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .target(env_logger::Target::Pipe(Box::new(SharedBuf(buf.clone()))))
            .init();
        buf
    })
    .clone()
}

#[tokio::test]
async fn new_global_best_is_reported_through_env_logger() {
    let log = captured_log();

    let config = PalnsConfig::default()
        .with_temperature(10.0, 0.995)
        .with_threads(2)
        .with_seed(4242);
    let engine = PalnsEngine::new(
        EmptyStart,
        vec![DropHeaviestTaken],
        vec![GreedyFill],
        config,
        MaxIterations::new(200),
    )
    .unwrap();

    engine.solve().await.unwrap();

    let output = String::from_utf8(log.lock().unwrap().clone()).unwrap();
    assert!(
        output.contains("new global best"),
        "expected an info-level 'new global best' record, got:\n{output}"
    );
}

#[tokio::test]
async fn single_worker_run_is_reproducible_for_a_fixed_seed() {
    let make_engine = || {
        let config = PalnsConfig::default()
            .with_temperature(10.0, 0.995)
            .with_threads(1)
            .with_seed(7);
        PalnsEngine::new(
            EmptyStart,
            vec![DropHeaviestTaken],
            vec![GreedyFill],
            config,
            MaxIterations::new(300),
        )
        .unwrap()
    };

    let a = make_engine().solve().await.unwrap();
    let b = make_engine().solve().await.unwrap();
    assert_eq!(a.taken, b.taken);
}
