//! Simulation runner for memoization strategies
//!
//! Every range strategy replays the same workload against its own copy of the
//! initial array. The uncached strategy always runs first and provides the
//! reference answers; any other strategy that disagrees on a single range query
//! aborts the run with [`WorkloadError::Mismatch`].
//!
//! Latency is measured per operation with [`Instant`], excluding the answer
//! check, and summarized with a bounded sample reservoir.

use std::num::NonZeroUsize;
use std::time::Instant;

use ahash::RandomState as AHashRandomState;
use lru::LruCache;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use range_memo::config::RangeSumConfig;
use range_memo::{fibonacci_by_splay, InvalidationPolicy, RangeSumCache, SplayTree};
use tracing::{debug, info};

use crate::input::WorkloadError;
use crate::models::{
    FibRunConfig, FibSample, OpLatencyStats, Operation, RangeRunConfig, RangeRunResult, Strategy,
    StrategyStats, Workload,
};

/// Maximum latency samples kept per operation type
const MAX_SAMPLES: usize = 5000;

/// Tracks latency for a single operation type
#[derive(Debug)]
struct OpLatencyTracker {
    total_ns: u64,
    count: u64,
    min_ns: u64,
    max_ns: u64,
    /// Sample reservoir for percentile calculation
    samples: Vec<u64>,
}

impl OpLatencyTracker {
    fn new() -> Self {
        Self {
            total_ns: 0,
            count: 0,
            min_ns: u64::MAX,
            max_ns: 0,
            samples: Vec::with_capacity(MAX_SAMPLES),
        }
    }

    #[inline]
    fn record(&mut self, latency_ns: u64) {
        self.total_ns += latency_ns;
        self.count += 1;
        self.min_ns = self.min_ns.min(latency_ns);
        self.max_ns = self.max_ns.max(latency_ns);

        // Reservoir sampling for percentiles
        if self.samples.len() < MAX_SAMPLES {
            self.samples.push(latency_ns);
        } else {
            let slot = rand::random::<u64>() % self.count;
            if (slot as usize) < MAX_SAMPLES {
                self.samples[slot as usize] = latency_ns;
            }
        }
    }

    fn finalize(mut self) -> OpLatencyStats {
        self.samples.sort_unstable();
        let len = self.samples.len();
        let percentile = |p: usize| {
            if len == 0 {
                0
            } else {
                self.samples[(len * p / 100).min(len - 1)]
            }
        };
        OpLatencyStats {
            total_ns: self.total_ns,
            count: self.count,
            min_ns: if self.min_ns == u64::MAX { 0 } else { self.min_ns },
            max_ns: self.max_ns,
            p50_ns: percentile(50),
            p99_ns: percentile(99),
        }
    }
}

/// Common surface of the range strategies
trait RangeBackend {
    fn range_sum(&mut self, low: usize, high: usize) -> Result<u64, WorkloadError>;
    fn update(&mut self, index: usize, value: u64) -> Result<(), WorkloadError>;
    /// Fill in hits, misses, evictions and invalidated entries.
    fn fill_counters(&self, stats: &mut StrategyStats);
}

/// Plain array, every query summed from scratch
struct Uncached {
    data: Vec<u64>,
    queries: u64,
}

impl RangeBackend for Uncached {
    fn range_sum(&mut self, low: usize, high: usize) -> Result<u64, WorkloadError> {
        self.queries += 1;
        Ok(self.data[low..=high].iter().sum())
    }

    fn update(&mut self, index: usize, value: u64) -> Result<(), WorkloadError> {
        self.data[index] = value;
        Ok(())
    }

    fn fill_counters(&self, stats: &mut StrategyStats) {
        stats.misses = self.queries;
    }
}

impl RangeBackend for RangeSumCache<u64> {
    fn range_sum(&mut self, low: usize, high: usize) -> Result<u64, WorkloadError> {
        Ok(RangeSumCache::range_sum(self, low, high)?)
    }

    fn update(&mut self, index: usize, value: u64) -> Result<(), WorkloadError> {
        RangeSumCache::update(self, index, value)?;
        Ok(())
    }

    fn fill_counters(&self, stats: &mut StrategyStats) {
        let counters = self.cache().counters();
        stats.hits = counters.core.cache_hits;
        stats.misses = counters.core.cache_misses();
        stats.evictions = counters.core.evictions;
        stats.invalidated = counters.entries_invalidated;
    }
}

/// `lru::LruCache` of sums, cleared on every update
struct ExternalLru {
    data: Vec<u64>,
    cache: LruCache<(usize, usize), u64, AHashRandomState>,
    hits: u64,
    misses: u64,
    evictions: u64,
    invalidated: u64,
}

impl RangeBackend for ExternalLru {
    fn range_sum(&mut self, low: usize, high: usize) -> Result<u64, WorkloadError> {
        if let Some(&sum) = self.cache.get(&(low, high)) {
            self.hits += 1;
            return Ok(sum);
        }
        self.misses += 1;
        let sum = self.data[low..=high].iter().sum();
        if self.cache.push((low, high), sum).is_some() {
            self.evictions += 1;
        }
        Ok(sum)
    }

    fn update(&mut self, index: usize, value: u64) -> Result<(), WorkloadError> {
        self.data[index] = value;
        self.invalidated += self.cache.len() as u64;
        self.cache.clear();
        Ok(())
    }

    fn fill_counters(&self, stats: &mut StrategyStats) {
        stats.hits = self.hits;
        stats.misses = self.misses;
        stats.evictions = self.evictions;
        stats.invalidated = self.invalidated;
    }
}

fn create_backend(
    strategy: Strategy,
    data: Vec<u64>,
    capacity: NonZeroUsize,
) -> Box<dyn RangeBackend> {
    match strategy {
        Strategy::Uncached => Box::new(Uncached { data, queries: 0 }),
        Strategy::Overlap | Strategy::ClearAll => {
            let policy = if strategy == Strategy::Overlap {
                InvalidationPolicy::Overlap
            } else {
                InvalidationPolicy::ClearAll
            };
            let config = RangeSumConfig { capacity, policy };
            let sums: RangeSumCache<u64> = RangeSumCache::init(data, config, None);
            Box::new(sums)
        }
        Strategy::ExternalLru => Box::new(ExternalLru {
            data,
            cache: LruCache::with_hasher(capacity, AHashRandomState::new()),
            hits: 0,
            misses: 0,
            evictions: 0,
            invalidated: 0,
        }),
    }
}

/// Replays the workload through one strategy.
///
/// When `expected` is given, every range answer is compared against it in
/// order; otherwise the answers are returned for later comparison.
fn run_strategy(
    strategy: Strategy,
    workload: &Workload,
    capacity: NonZeroUsize,
    expected: Option<&[u64]>,
) -> Result<(StrategyStats, Vec<u64>), WorkloadError> {
    let mut backend = create_backend(strategy, workload.array.clone(), capacity);
    let mut query_tracker = OpLatencyTracker::new();
    let mut update_tracker = OpLatencyTracker::new();
    let mut answers = Vec::with_capacity(workload.range_queries());

    let start = Instant::now();
    for op in &workload.operations {
        match *op {
            Operation::RangeQuery { low, high } => {
                let op_start = Instant::now();
                let sum = backend.range_sum(low, high)?;
                query_tracker.record(op_start.elapsed().as_nanos() as u64);

                if let Some(expected) = expected {
                    let want = expected[answers.len()];
                    if want != sum {
                        return Err(WorkloadError::Mismatch {
                            strategy: strategy.as_str(),
                            low,
                            high,
                            expected: want,
                            got: sum,
                        });
                    }
                }
                answers.push(sum);
            }
            Operation::PointUpdate { index, value } => {
                let op_start = Instant::now();
                backend.update(index, value)?;
                update_tracker.record(op_start.elapsed().as_nanos() as u64);
            }
        }
    }

    let mut stats = StrategyStats {
        elapsed: start.elapsed(),
        query_latency: query_tracker.finalize(),
        update_latency: update_tracker.finalize(),
        ..Default::default()
    };
    backend.fill_counters(&mut stats);
    Ok((stats, answers))
}

/// Runs every configured strategy over `workload` and checks that they agree.
///
/// The uncached strategy is always executed to produce the reference answers,
/// but only reported when it is listed in `config.strategies`.
pub fn run_range(
    workload: &Workload,
    config: &RangeRunConfig,
) -> Result<RangeRunResult, WorkloadError> {
    info!(
        array_len = workload.array.len(),
        range_queries = workload.range_queries(),
        point_updates = workload.point_updates(),
        capacity = config.capacity.get(),
        "running range workload"
    );

    let (reference_stats, reference) =
        run_strategy(Strategy::Uncached, workload, config.capacity, None)?;
    debug!(elapsed = ?reference_stats.elapsed, "reference answers computed");

    let mut stats = Vec::with_capacity(config.strategies.len());
    for &strategy in &config.strategies {
        if strategy == Strategy::Uncached {
            stats.push((strategy, reference_stats.clone()));
            continue;
        }
        let (strategy_stats, _) =
            run_strategy(strategy, workload, config.capacity, Some(&reference))?;
        debug!(
            %strategy,
            elapsed = ?strategy_stats.elapsed,
            hits = strategy_stats.hits,
            misses = strategy_stats.misses,
            "strategy finished"
        );
        stats.push((strategy, strategy_stats));
    }

    Ok(RangeRunResult {
        stats,
        range_queries: workload.range_queries(),
        point_updates: workload.point_updates(),
        capacity: config.capacity.get(),
    })
}

/// Fibonacci memoized in an unbounded `lru::LruCache`.
///
/// Plain recursion through the memo, so the call depth grows with the first
/// unmemoized `n`.
pub fn fibonacci_by_lru(n: u64, memo: &mut LruCache<u64, BigUint, AHashRandomState>) -> BigUint {
    if let Some(value) = memo.get(&n) {
        return value.clone();
    }
    let value = match n {
        0 => BigUint::zero(),
        1 => BigUint::one(),
        _ => fibonacci_by_lru(n - 1, memo) + fibonacci_by_lru(n - 2, memo),
    };
    memo.put(n, value.clone());
    value
}

/// Times both memo strategies for `n = 0, step, 2 * step, ..., max_n`.
///
/// Each strategy keeps one memo table for the whole run, so later values of
/// `n` reuse everything computed for earlier ones. Values are arbitrary
/// precision, so `max_n` has no upper bound.
pub fn run_fib(config: &FibRunConfig) -> Result<Vec<FibSample>, WorkloadError> {
    let step = config.step.max(1) as usize;
    let repeats = config.repeats.max(1);
    info!(max_n = config.max_n, step, repeats, "running fibonacci comparison");

    let mut memo = LruCache::unbounded_with_hasher(AHashRandomState::new());
    let mut tree: SplayTree<u64, BigUint> = SplayTree::new();
    let mut samples = Vec::new();

    for n in (0..=config.max_n).step_by(step) {
        let start = Instant::now();
        let mut lru_value = BigUint::zero();
        for _ in 0..repeats {
            lru_value = fibonacci_by_lru(n, &mut memo);
        }
        let lru_mean_ns = start.elapsed().as_nanos() as f64 / f64::from(repeats);

        let start = Instant::now();
        let mut splay_value = BigUint::zero();
        for _ in 0..repeats {
            splay_value = fibonacci_by_splay(n, &mut tree)?;
        }
        let splay_mean_ns = start.elapsed().as_nanos() as f64 / f64::from(repeats);

        if lru_value != splay_value {
            return Err(WorkloadError::FibMismatch {
                n,
                expected: lru_value,
                got: splay_value,
            });
        }

        debug!(n, lru_mean_ns, splay_mean_ns, "fibonacci sample");
        samples.push(FibSample {
            n,
            value: splay_value,
            lru_mean_ns,
            splay_mean_ns,
        });
    }

    debug!(
        tree_len = tree.len(),
        tree_height = tree.height(),
        rotations = tree.counters().rotations,
        "splay memo after run"
    );
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{WorkloadConfig, WorkloadGenerator};

    fn workload(seed: u64) -> Workload {
        WorkloadGenerator::new(WorkloadConfig {
            array_len: 200,
            queries: 3000,
            range_ratio: 0.7,
            max_value: 1000,
            seed: Some(seed),
        })
        .unwrap()
        .generate()
    }

    #[test]
    fn test_all_strategies_agree() {
        let workload = workload(42);
        let config = RangeRunConfig {
            capacity: NonZeroUsize::new(64).unwrap(),
            strategies: Strategy::all(),
        };
        let result = run_range(&workload, &config).unwrap();
        assert_eq!(result.stats.len(), 4);
        for (_, stats) in &result.stats {
            assert_eq!(stats.hits + stats.misses, workload.range_queries() as u64);
            assert_eq!(stats.query_latency.count, workload.range_queries() as u64);
            assert_eq!(stats.update_latency.count, workload.point_updates() as u64);
        }
    }

    #[test]
    fn test_overlap_keeps_more_than_clear_all() {
        // Narrow ranges over a wide array, so most updates miss most cached sums.
        let array = vec![1; 1000];
        let mut operations = Vec::new();
        for round in 0..50 {
            for low in (0..100).step_by(10) {
                operations.push(Operation::RangeQuery { low, high: low + 5 });
            }
            operations.push(Operation::PointUpdate {
                index: 500 + round,
                value: 2,
            });
        }
        let workload = Workload { array, operations };
        let config = RangeRunConfig {
            capacity: NonZeroUsize::new(16).unwrap(),
            strategies: vec![Strategy::Overlap, Strategy::ClearAll],
        };
        let result = run_range(&workload, &config).unwrap();
        let (_, overlap) = &result.stats[0];
        let (_, clear_all) = &result.stats[1];
        assert_eq!(overlap.misses, 10);
        assert_eq!(overlap.invalidated, 0);
        assert!(clear_all.misses > overlap.misses);
    }

    #[test]
    fn test_uncached_only_reports_misses() {
        let workload = workload(5);
        let config = RangeRunConfig {
            capacity: NonZeroUsize::new(8).unwrap(),
            strategies: vec![Strategy::Uncached],
        };
        let result = run_range(&workload, &config).unwrap();
        let (strategy, stats) = &result.stats[0];
        assert_eq!(*strategy, Strategy::Uncached);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, workload.range_queries() as u64);
    }

    #[test]
    fn test_fibonacci_by_lru() {
        let mut memo = LruCache::unbounded_with_hasher(AHashRandomState::new());
        assert_eq!(fibonacci_by_lru(10, &mut memo), BigUint::from(55u32));
        assert_eq!(memo.len(), 11);
        assert_eq!(
            fibonacci_by_lru(200, &mut memo).to_string(),
            "280571172992510140037611932413038677189525"
        );
        assert_eq!(memo.len(), 201);
    }

    #[test]
    fn test_run_fib_samples() {
        let config = FibRunConfig {
            max_n: 100,
            step: 25,
            repeats: 3,
        };
        let samples = run_fib(&config).unwrap();
        let ns: Vec<u64> = samples.iter().map(|s| s.n).collect();
        assert_eq!(ns, vec![0, 25, 50, 75, 100]);
        assert_eq!(samples[1].value, BigUint::from(75_025u32));
        assert_eq!(
            samples[4].value,
            BigUint::from(354_224_848_179_261_915_075u128)
        );
    }

    #[test]
    fn test_run_fib_past_fixed_width() {
        let config = FibRunConfig {
            max_n: 950,
            step: 50,
            repeats: 1,
        };
        let samples = run_fib(&config).unwrap();
        assert_eq!(samples.len(), 20);
        assert_eq!(samples[0].value, BigUint::zero());
        assert_eq!(
            samples[10].value.to_string(),
            "139423224561697880139724382870407283950070256587697307264108962948325571622863290\
             691557658876222521294125"
        );
        let last = samples.last().unwrap();
        assert_eq!(last.n, 950);
        assert_eq!(
            last.value.to_string(),
            "1544447803282326157141063860798140565135175279561812695372311151183404978544074576\
             084779694906092198758336762454048905401589449506607204278264939097537573413980490\
             519471907060934663660744135522705225"
        );
    }

    #[test]
    fn test_fib_mismatch_reports_full_values() {
        let err = WorkloadError::FibMismatch {
            n: 200,
            expected: "280571172992510140037611932413038677189525".parse().unwrap(),
            got: BigUint::from(7u32),
        };
        assert_eq!(
            err.to_string(),
            "splay memo answered fib(200) = 7, lru memo answered \
             280571172992510140037611932413038677189525"
        );
    }
}
