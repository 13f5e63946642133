//! Splay Tree Metrics
//!
//! Counts lookups and the restructuring work they trigger.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Splay tree metrics (extends CoreCacheMetrics).
///
/// `core.evictions` stays at zero: the tree never discards nodes.
#[derive(Debug, Default, Clone)]
pub struct SplayTreeMetrics {
    /// Core metrics common to all structures.
    pub core: CoreCacheMetrics,

    /// Splay operations (one per successful find).
    pub splays: u64,

    /// Single rotations performed by all splays.
    pub rotations: u64,

    /// Zig steps (parent was the root).
    pub zig: u64,

    /// Zig-zig steps (node and parent on the same side).
    pub zig_zig: u64,

    /// Zig-zag steps (node and parent on opposite sides).
    pub zig_zag: u64,
}

impl SplayTreeMetrics {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean number of rotations per splay, or 0.0 if nothing was splayed.
    pub fn avg_rotations_per_splay(&self) -> f64 {
        if self.splays > 0 {
            self.rotations as f64 / self.splays as f64
        } else {
            0.0
        }
    }

    /// Converts all metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("splays".to_string(), self.splays as f64);
        metrics.insert("rotations".to_string(), self.rotations as f64);
        metrics.insert("zig".to_string(), self.zig as f64);
        metrics.insert("zig_zig".to_string(), self.zig_zig as f64);
        metrics.insert("zig_zag".to_string(), self.zig_zag as f64);
        metrics.insert(
            "avg_rotations_per_splay".to_string(),
            self.avg_rotations_per_splay(),
        );
        metrics
    }
}

impl CacheMetrics for SplayTreeMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "Splay"
    }
}
