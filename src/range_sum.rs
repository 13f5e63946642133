//! Cached range sums over a mutable array.
//!
//! [`RangeSumCache`] owns the source array and an [`IntervalCache`] of sums
//! computed over it. Every point update invalidates the cached sums that could
//! have read the old element before the update returns, so a cached answer is
//! never stale.

extern crate alloc;

use crate::config::{IntervalCacheConfig, InvalidationPolicy, RangeSumConfig};
use crate::error::Error;
use crate::interval_cache::IntervalCache;
use alloc::vec::Vec;
use core::hash::BuildHasher;
use core::iter::Sum;
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
extern crate std;
#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// An array whose inclusive range sums are memoized in an interval-keyed LRU cache.
///
/// # Examples
///
/// ```
/// use range_memo::RangeSumCache;
/// use core::num::NonZeroUsize;
///
/// let mut sums = RangeSumCache::new(vec![1u64, 2, 3, 4, 5], NonZeroUsize::new(8).unwrap());
/// assert_eq!(sums.range_sum(1, 3), Ok(9));
/// assert_eq!(sums.range_sum(3, 4), Ok(9));
///
/// // Index 2 changes: [1, 3] is dropped from the cache, [3, 4] is kept.
/// assert_eq!(sums.update(2, 10), Ok(3));
/// assert_eq!(sums.cache().len(), 1);
/// assert_eq!(sums.range_sum(1, 3), Ok(16));
/// ```
pub struct RangeSumCache<T, S = DefaultHashBuilder> {
    data: Vec<T>,
    cache: IntervalCache<usize, T, S>,
    policy: InvalidationPolicy,
}

impl<T> RangeSumCache<T>
where
    T: Copy + Sum<T>,
{
    /// Wraps `data` with a cache of `capacity` sums using [`InvalidationPolicy::Overlap`].
    pub fn new(data: Vec<T>, capacity: NonZeroUsize) -> RangeSumCache<T, DefaultHashBuilder> {
        RangeSumCache {
            data,
            cache: IntervalCache::new(capacity),
            policy: InvalidationPolicy::Overlap,
        }
    }
}

impl<T, S> RangeSumCache<T, S>
where
    T: Copy + Sum<T>,
    S: BuildHasher,
{
    /// Wraps `data` according to `config`, with an optional hash builder.
    pub fn init(data: Vec<T>, config: RangeSumConfig, hash_builder: Option<S>) -> Self
    where
        S: Default,
    {
        let cache_config = IntervalCacheConfig {
            capacity: config.capacity,
        };
        RangeSumCache {
            data,
            cache: IntervalCache::init(cache_config, hash_builder),
            policy: config.policy,
        }
    }

    /// Sum of `data[low..=high]`, answered from the cache when possible.
    ///
    /// # Errors
    ///
    /// [`Error::InvertedInterval`] if `low > high`, [`Error::IndexOutOfBounds`]
    /// if `high` is past the end of the array.
    pub fn range_sum(&mut self, low: usize, high: usize) -> Result<T, Error> {
        if low > high {
            return Err(Error::InvertedInterval);
        }
        self.check_index(high)?;

        if let Some(&sum) = self.cache.get(low, high) {
            return Ok(sum);
        }
        let sum = self.data[low..=high].iter().copied().sum();
        self.cache.put(low, high, sum);
        Ok(sum)
    }

    /// Sets `data[index] = value`, invalidates per the configured policy and
    /// returns the previous element.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if `index` is past the end of the array. The
    /// array and the cache are left unchanged.
    pub fn update(&mut self, index: usize, value: T) -> Result<T, Error> {
        self.check_index(index)?;
        let old = core::mem::replace(&mut self.data[index], value);
        match self.policy {
            InvalidationPolicy::Overlap => {
                self.cache.invalidate(index);
            }
            InvalidationPolicy::ClearAll => self.cache.clear(),
        }
        Ok(old)
    }

    /// Element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The underlying interval cache.
    #[inline]
    pub fn cache(&self) -> &IntervalCache<usize, T, S> {
        &self.cache
    }

    #[inline]
    pub fn policy(&self) -> InvalidationPolicy {
        self.policy
    }

    /// Consumes the wrapper and returns the array.
    pub fn into_inner(self) -> Vec<T> {
        self.data
    }

    fn check_index(&self, index: usize) -> Result<(), Error> {
        if index >= self.data.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.data.len(),
            });
        }
        Ok(())
    }
}

impl<T, S> core::fmt::Debug for RangeSumCache<T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RangeSumCache")
            .field("len", &self.data.len())
            .field("policy", &self.policy)
            .field("cache", &self.cache)
            .finish()
    }
}
