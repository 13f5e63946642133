//! Configuration for the interval-keyed LRU cache.
//!
//! # Sizing Guidelines
//!
//! `capacity` bounds the number of resident `(low, high)` results. Invalidation
//! scans every resident entry, so the cost of a point update grows with the
//! number of resident entries, not with the size of the underlying array.
//! Keep the cache small relative to the array it answers queries over:
//!
//! ```text
//! cost(update) ≈ len(cache)
//! cost(miss)   ≈ high - low + 1
//! ```
//!
//! # Examples
//!
//! ```
//! use range_memo::config::IntervalCacheConfig;
//! use range_memo::IntervalCache;
//! use core::num::NonZeroUsize;
//!
//! let config = IntervalCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache: IntervalCache<usize, u64> = IntervalCache::init(config, None);
//! cache.put(0, 5, 100);
//! assert_eq!(cache.get(0, 5), Some(&100));
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an [`IntervalCache`](crate::IntervalCache).
///
/// # Fields
///
/// - `capacity`: Maximum number of interval results the cache can hold. Fixed for
///   the lifetime of the cache.
#[derive(Clone, Copy)]
pub struct IntervalCacheConfig {
    /// Maximum number of resident entries.
    pub capacity: NonZeroUsize,
}

impl fmt::Debug for IntervalCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
