//! Interval Cache Metrics
//!
//! Metrics specific to [`IntervalCache`](crate::IntervalCache): on top of the
//! core hit/miss/eviction counters it tracks the cost and effect of point
//! invalidation.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Interval cache metrics (extends CoreCacheMetrics).
#[derive(Debug, Default, Clone)]
pub struct IntervalCacheMetrics {
    /// Core metrics common to all structures.
    pub core: CoreCacheMetrics,

    /// Number of `invalidate` calls.
    pub invalidations: u64,

    /// Resident entries examined across all invalidation scans.
    pub entries_scanned: u64,

    /// Entries removed because their interval contained an updated index.
    pub entries_invalidated: u64,

    /// Number of `clear` calls.
    pub clears: u64,
}

impl IntervalCacheMetrics {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one invalidation scan over `scanned` entries that removed `removed`.
    pub fn record_invalidation(&mut self, scanned: usize, removed: usize) {
        self.invalidations += 1;
        self.entries_scanned += scanned as u64;
        self.entries_invalidated += removed as u64;
    }

    /// Records a full clear.
    pub fn record_clear(&mut self) {
        self.clears += 1;
    }

    /// Mean number of entries removed per invalidation, or 0.0 if none ran.
    pub fn avg_invalidated_per_scan(&self) -> f64 {
        if self.invalidations > 0 {
            self.entries_invalidated as f64 / self.invalidations as f64
        } else {
            0.0
        }
    }

    /// Converts all metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("invalidations".to_string(), self.invalidations as f64);
        metrics.insert("entries_scanned".to_string(), self.entries_scanned as f64);
        metrics.insert(
            "entries_invalidated".to_string(),
            self.entries_invalidated as f64,
        );
        metrics.insert("clears".to_string(), self.clears as f64);
        metrics.insert(
            "avg_invalidated_per_scan".to_string(),
            self.avg_invalidated_per_scan(),
        );
        metrics
    }
}

impl CacheMetrics for IntervalCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "IntervalLRU"
    }
}
