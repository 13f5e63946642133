// Data models for workload simulation

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

/// A single step of a range workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Sum of `array[low..=high]`
    RangeQuery { low: usize, high: usize },
    /// `array[index] = value`
    PointUpdate { index: usize, value: u64 },
}

impl Operation {
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::RangeQuery { .. } => "range",
            Operation::PointUpdate { .. } => "update",
        }
    }
}

/// A generated or loaded workload: the initial array and the operations to replay on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub array: Vec<u64>,
    pub operations: Vec<Operation>,
}

impl Workload {
    pub fn range_queries(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::RangeQuery { .. }))
            .count()
    }

    pub fn point_updates(&self) -> usize {
        self.operations.len() - self.range_queries()
    }
}

/// One row of a workload operations file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRow {
    pub kind: String,
    pub a: u64,
    pub b: u64,
}

/// One row of a workload array file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayRow {
    pub index: usize,
    pub value: u64,
}

/// Range workload strategies supported for simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    /// Recompute every sum from the array
    Uncached,
    /// `RangeSumCache` dropping only the sums covering an updated index
    Overlap,
    /// `RangeSumCache` dropping every cached sum on update
    ClearAll,
    /// `lru::LruCache` keyed by `(low, high)`, cleared on update (external crate for comparison)
    ExternalLru,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Uncached => "uncached",
            Strategy::Overlap => "overlap",
            Strategy::ClearAll => "clear-all",
            Strategy::ExternalLru => "lru",
        }
    }

    /// Get all available strategies
    pub fn all() -> Vec<Strategy> {
        vec![
            Strategy::Uncached,
            Strategy::Overlap,
            Strategy::ClearAll,
            Strategy::ExternalLru,
        ]
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uncached" | "none" => Ok(Strategy::Uncached),
            "overlap" => Ok(Strategy::Overlap),
            "clear-all" | "clearall" | "clear" => Ok(Strategy::ClearAll),
            "lru" => Ok(Strategy::ExternalLru),
            other => Err(format!("unknown strategy '{other}'")),
        }
    }
}

/// Configuration for a range workload run
#[derive(Debug, Clone)]
pub struct RangeRunConfig {
    /// Interval cache capacity for the cached strategies
    pub capacity: NonZeroUsize,
    /// Strategies to run, in report order
    pub strategies: Vec<Strategy>,
}

/// Configuration for a Fibonacci memo comparison
#[derive(Debug, Clone, Copy)]
pub struct FibRunConfig {
    /// Largest `n` measured
    pub max_n: u64,
    /// Distance between measured values of `n`
    pub step: u64,
    /// Timed repetitions per `n`
    pub repeats: u32,
}

/// Latency statistics for a single operation type
#[derive(Debug, Clone, Default)]
pub struct OpLatencyStats {
    /// Total time spent (nanoseconds)
    pub total_ns: u64,
    /// Number of operations
    pub count: u64,
    /// Minimum latency (nanoseconds)
    pub min_ns: u64,
    /// Maximum latency (nanoseconds)
    pub max_ns: u64,
    /// Median latency from the sample reservoir (nanoseconds)
    pub p50_ns: u64,
    /// 99th percentile latency from the sample reservoir (nanoseconds)
    pub p99_ns: u64,
}

impl OpLatencyStats {
    /// Calculate average latency in nanoseconds
    pub fn avg_ns(&self) -> f64 {
        if self.count > 0 {
            self.total_ns as f64 / self.count as f64
        } else {
            0.0
        }
    }

    /// Calculate throughput in operations per second
    pub fn ops_per_sec(&self) -> f64 {
        if self.total_ns > 0 {
            (self.count as f64 * 1_000_000_000.0) / self.total_ns as f64
        } else {
            0.0
        }
    }
}

/// Statistics for a single strategy over one workload
#[derive(Debug, Clone, Default)]
pub struct StrategyStats {
    /// Range queries answered from a cache
    pub hits: u64,
    /// Range queries computed from the array
    pub misses: u64,
    /// Cached sums dropped to make room
    pub evictions: u64,
    /// Cached sums dropped because an update touched them
    pub invalidated: u64,
    /// Wall time for the whole workload
    pub elapsed: Duration,
    /// Range query latencies
    pub query_latency: OpLatencyStats,
    /// Point update latencies
    pub update_latency: OpLatencyStats,
}

impl StrategyStats {
    /// Calculate hit rate as percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            (self.hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Results of a range workload run
#[derive(Debug, Clone)]
pub struct RangeRunResult {
    /// Per-strategy statistics, in the order the strategies ran
    pub stats: Vec<(Strategy, StrategyStats)>,
    /// Number of range queries in the workload
    pub range_queries: usize,
    /// Number of point updates in the workload
    pub point_updates: usize,
    /// Cache capacity used
    pub capacity: usize,
}

/// Timing of both memo strategies for one `n`
#[derive(Debug, Clone, PartialEq)]
pub struct FibSample {
    pub n: u64,
    pub value: BigUint,
    /// Mean time per call with an unbounded `lru` memo (nanoseconds)
    pub lru_mean_ns: f64,
    /// Mean time per call with the shared splay tree (nanoseconds)
    pub splay_mean_ns: f64,
}

/// CSV export row for range workload results
#[derive(Debug, Serialize)]
pub struct RangeCsvRow {
    pub strategy: String,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub evictions: u64,
    pub invalidated: u64,
    pub elapsed_ms: f64,
    pub query_ops: u64,
    pub query_avg_ns: f64,
    pub query_p99_ns: u64,
    pub update_ops: u64,
    pub update_avg_ns: f64,
    pub update_p99_ns: u64,
}

/// CSV export row for Fibonacci memo results
#[derive(Debug, Serialize)]
pub struct FibCsvRow {
    pub n: u64,
    pub value: String,
    pub lru_mean_ns: f64,
    pub splay_mean_ns: f64,
}
