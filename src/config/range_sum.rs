//! Configuration for [`RangeSumCache`](crate::RangeSumCache).
//!
//! # Invalidation Policies
//!
//! | Policy | On `update(i, _)` | Keeps |
//! |--------|-------------------|-------|
//! | `Overlap` | drops every cached `[low, high]` with `low <= i <= high` | all other results |
//! | `ClearAll` | drops every cached result | nothing |
//!
//! `ClearAll` is never more precise than `Overlap`; it exists to measure what the
//! precise rule buys on a given workload.
//!
//! # Examples
//!
//! ```
//! use range_memo::config::{InvalidationPolicy, RangeSumConfig};
//! use range_memo::RangeSumCache;
//! use core::num::NonZeroUsize;
//!
//! let config = RangeSumConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//!     policy: InvalidationPolicy::Overlap,
//! };
//! let sums: RangeSumCache<u64> = RangeSumCache::init(vec![1, 2, 3], config, None);
//! assert_eq!(sums.len(), 3);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// What a point update removes from the range cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InvalidationPolicy {
    /// Remove only the cached intervals containing the updated index.
    #[default]
    Overlap,
    /// Remove every cached interval.
    ClearAll,
}

impl InvalidationPolicy {
    /// Short lowercase name, used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidationPolicy::Overlap => "overlap",
            InvalidationPolicy::ClearAll => "clear-all",
        }
    }
}

impl fmt::Display for InvalidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a [`RangeSumCache`](crate::RangeSumCache).
///
/// # Fields
///
/// - `capacity`: Number of range results kept by the underlying
///   [`IntervalCache`](crate::IntervalCache)
/// - `policy`: How point updates invalidate cached results
#[derive(Clone, Copy)]
pub struct RangeSumConfig {
    /// Maximum number of cached range results.
    pub capacity: NonZeroUsize,
    /// Invalidation rule applied on every update.
    pub policy: InvalidationPolicy,
}

impl fmt::Debug for RangeSumConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSumConfig")
            .field("capacity", &self.capacity)
            .field("policy", &self.policy)
            .finish()
    }
}
