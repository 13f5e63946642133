//! Random range workload generation
//!
//! Produces an array of values in `1..=max_value` and a mix of range queries
//! and point updates over it. Each operation is a range query with probability
//! `range_ratio`; range bounds are drawn as `low` uniform over the array and
//! `high` uniform over `low..len`.

use crate::input::WorkloadError;
use crate::models::{Operation, Workload};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Parameters for generating a random range workload
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Number of array elements
    pub array_len: usize,
    /// Number of operations
    pub queries: usize,
    /// Probability that an operation is a range query rather than an update
    pub range_ratio: f64,
    /// Largest element or update value
    pub max_value: u64,
    /// Seed for reproducible workloads (`None` draws from the OS)
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            array_len: 100_000,
            queries: 50_000,
            range_ratio: 0.7,
            max_value: 1000,
            seed: None,
        }
    }
}

impl WorkloadConfig {
    /// Check that the parameters describe a workload that can be drawn
    pub fn validate(&self) -> Result<(), WorkloadError> {
        if !(0.0..=1.0).contains(&self.range_ratio) {
            return Err(WorkloadError::InvalidConfig(format!(
                "range ratio must be within [0, 1], got {}",
                self.range_ratio
            )));
        }
        Ok(())
    }
}

/// Generator for random range workloads
#[derive(Debug)]
pub struct WorkloadGenerator {
    config: WorkloadConfig,
}

impl WorkloadGenerator {
    /// Create a new generator with the given configuration
    ///
    /// Fails if `range_ratio` is NaN or outside `[0, 1]`.
    pub fn new(config: WorkloadConfig) -> Result<Self, WorkloadError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generate a workload according to the configuration
    pub fn generate(&self) -> Workload {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let len = self.config.array_len;
        let max_value = self.config.max_value.max(1);
        let range_ratio = self.config.range_ratio;

        debug!(
            array_len = len,
            queries = self.config.queries,
            range_ratio,
            max_value,
            seed = ?self.config.seed,
            "generating workload"
        );

        let array: Vec<u64> = (0..len).map(|_| rng.gen_range(1..=max_value)).collect();

        // An empty array admits no valid operation.
        if len == 0 {
            return Workload {
                array,
                operations: Vec::new(),
            };
        }

        let operations = (0..self.config.queries)
            .map(|_| {
                if rng.gen_bool(range_ratio) {
                    let low = rng.gen_range(0..len);
                    let high = rng.gen_range(low..len);
                    Operation::RangeQuery { low, high }
                } else {
                    Operation::PointUpdate {
                        index: rng.gen_range(0..len),
                        value: rng.gen_range(1..=max_value),
                    }
                }
            })
            .collect();

        Workload { array, operations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(seed: u64) -> WorkloadConfig {
        WorkloadConfig {
            array_len: 50,
            queries: 2000,
            range_ratio: 0.7,
            max_value: 10,
            seed: Some(seed),
        }
    }

    #[test]
    fn test_default_config() {
        let config = WorkloadConfig::default();
        assert_eq!(config.array_len, 100_000);
        assert_eq!(config.queries, 50_000);
        assert_eq!(config.max_value, 1000);
        assert!((config.range_ratio - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_same_seed_same_workload() {
        let a = WorkloadGenerator::new(small(7)).unwrap().generate();
        let b = WorkloadGenerator::new(small(7)).unwrap().generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_values_and_bounds_in_range() {
        let workload = WorkloadGenerator::new(small(1)).unwrap().generate();
        assert_eq!(workload.array.len(), 50);
        assert_eq!(workload.operations.len(), 2000);
        assert!(workload.array.iter().all(|v| (1..=10).contains(v)));
        for op in &workload.operations {
            match *op {
                Operation::RangeQuery { low, high } => {
                    assert!(low <= high);
                    assert!(high < 50);
                }
                Operation::PointUpdate { index, value } => {
                    assert!(index < 50);
                    assert!((1..=10).contains(&value));
                }
            }
        }
    }

    #[test]
    fn test_mix_is_approximately_range_ratio() {
        let workload = WorkloadGenerator::new(small(3)).unwrap().generate();
        let ratio = workload.range_queries() as f64 / workload.operations.len() as f64;
        assert!((0.6..0.8).contains(&ratio), "ratio {ratio}");
    }

    #[test]
    fn test_empty_array_has_no_operations() {
        let config = WorkloadConfig {
            array_len: 0,
            ..small(2)
        };
        let workload = WorkloadGenerator::new(config).unwrap().generate();
        assert!(workload.array.is_empty());
        assert!(workload.operations.is_empty());
    }

    #[test]
    fn test_rejects_invalid_range_ratio() {
        for range_ratio in [f64::NAN, f64::INFINITY, -0.1, 1.5] {
            let config = WorkloadConfig {
                range_ratio,
                ..small(4)
            };
            assert!(matches!(
                WorkloadGenerator::new(config),
                Err(WorkloadError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_ratio_extremes_are_accepted() {
        let only_queries = WorkloadGenerator::new(WorkloadConfig {
            range_ratio: 1.0,
            ..small(5)
        })
        .unwrap()
        .generate();
        assert_eq!(only_queries.point_updates(), 0);

        let only_updates = WorkloadGenerator::new(WorkloadConfig {
            range_ratio: 0.0,
            ..small(5)
        })
        .unwrap()
        .generate();
        assert_eq!(only_updates.range_queries(), 0);
    }
}
