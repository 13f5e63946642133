//! Interval-Keyed LRU Cache
//!
//! This module provides a fixed-capacity cache for range-aggregate results. Each
//! entry is keyed by the exact closed interval `[low, high]` it was computed over,
//! and entries are kept in order of recency of use.
//!
//! # Algorithm
//!
//! Lookups and insertions follow plain LRU: a hit or an overwrite moves the entry
//! to the front, and inserting a new key into a full cache evicts the entry that
//! has gone untouched the longest.
//!
//! On top of that, [`IntervalCache::invalidate`] removes every entry whose
//! interval contains a given point. The source array behind the cache calls it
//! whenever element `i` changes, so no resident result can depend on a stale
//! element.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1)
//!   - Put: O(1)
//!   - Invalidate: O(n) where n is the number of resident entries
//!
//! - **Space Complexity**:
//!   - O(capacity)
//!
//! Invalidation is a full scan. There is no secondary index by covered point, so
//! keep the capacity small relative to the array.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe and is meant to be owned by a single
//! driver.

extern crate alloc;

use crate::config::IntervalCacheConfig;
use crate::interval::Interval;
use crate::list::List;
use crate::metrics::{CacheMetrics, IntervalCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
extern crate std;
#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// A fixed-capacity LRU cache keyed by closed intervals, with point invalidation.
///
/// # Panics
///
/// Every method taking `(low, high)` panics if `low > high`. Inverted bounds can
/// never name a resident entry, so they are treated as a caller bug rather than a
/// miss.
///
/// # Examples
///
/// ```
/// use range_memo::IntervalCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = IntervalCache::new(NonZeroUsize::new(2).unwrap());
/// cache.put(0, 5, 100);
/// cache.put(6, 9, 50);
/// cache.put(0, 5, 100); // refresh
/// cache.put(10, 12, 7); // evicts [6, 9]
///
/// assert_eq!(cache.get(6, 9), None);
/// assert_eq!(cache.get(0, 5), Some(&100));
///
/// // Element 4 changed: [0, 5] is stale, [10, 12] is not.
/// assert_eq!(cache.invalidate(4), 1);
/// assert_eq!(cache.get(0, 5), None);
/// assert_eq!(cache.get(10, 12), Some(&7));
/// ```
pub struct IntervalCache<I, V, S = DefaultHashBuilder> {
    config: IntervalCacheConfig,
    list: List<(Interval<I>, V)>,
    map: HashMap<Interval<I>, usize, S>,
    metrics: IntervalCacheMetrics,
}

impl<I, V> IntervalCache<I, V>
where
    I: Ord + Copy + Hash,
{
    /// Creates a cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> IntervalCache<I, V, DefaultHashBuilder> {
        IntervalCache::with_hasher(cap, DefaultHashBuilder::default())
    }
}

impl<I, V, S> IntervalCache<I, V, S>
where
    I: Ord + Copy + Hash,
    S: BuildHasher,
{
    /// Creates a cache holding at most `cap` entries, using `hash_builder` for the key index.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        let map_capacity = cap.get().next_power_of_two();
        IntervalCache {
            config: IntervalCacheConfig { capacity: cap },
            list: List::new(cap),
            map: HashMap::with_capacity_and_hasher(map_capacity, hash_builder),
            metrics: IntervalCacheMetrics::new(),
        }
    }

    /// Creates a cache from a configuration and an optional hash builder.
    pub fn init(config: IntervalCacheConfig, hash_builder: Option<S>) -> Self
    where
        S: Default,
    {
        IntervalCache::with_hasher(config.capacity, hash_builder.unwrap_or_default())
    }

    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Raw counters behind [`CacheMetrics::metrics`].
    #[inline]
    pub fn counters(&self) -> &IntervalCacheMetrics {
        &self.metrics
    }

    /// Returns the value cached for exactly `[low, high]` and marks it most recently used.
    #[track_caller]
    pub fn get(&mut self, low: I, high: I) -> Option<&V> {
        let key = Interval::new(low, high);
        match self.map.get(&key).copied() {
            Some(idx) => {
                self.list.move_to_front(idx);
                self.metrics.core.record_hit();
                self.list.get(idx).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Returns the value cached for `[low, high]` without touching its recency.
    #[track_caller]
    pub fn peek(&self, low: I, high: I) -> Option<&V> {
        let idx = *self.map.get(&Interval::new(low, high))?;
        self.list.get(idx).map(|(_, v)| v)
    }

    /// Returns `true` if `[low, high]` is resident. Does not touch recency.
    #[track_caller]
    pub fn contains(&self, low: I, high: I) -> bool {
        self.map.contains_key(&Interval::new(low, high))
    }

    /// Caches `value` for `[low, high]` as the most recently used entry.
    ///
    /// If the key was already resident its value is replaced and the old entry is
    /// returned; occupancy does not change. Otherwise, if the cache is full, the
    /// least recently used entry is evicted and returned.
    #[track_caller]
    pub fn put(&mut self, low: I, high: I, value: V) -> Option<(Interval<I>, V)> {
        let key = Interval::new(low, high);

        if let Some(&idx) = self.map.get(&key) {
            self.list.move_to_front(idx);
            self.metrics.core.record_update();
            let (_, slot) = self.list.get_mut(idx)?;
            let old = core::mem::replace(slot, value);
            return Some((key, old));
        }

        let mut evicted = None;
        if self.list.is_full() {
            if let Some((old_key, old_value)) = self.list.remove_last() {
                self.map.remove(&old_key);
                self.metrics.core.record_eviction();
                evicted = Some((old_key, old_value));
            }
        }

        if let Some(idx) = self.list.add((key, value)) {
            self.map.insert(key, idx);
            self.metrics.core.record_insertion();
        }

        evicted
    }

    /// Removes `[low, high]` and returns its value.
    #[track_caller]
    pub fn remove(&mut self, low: I, high: I) -> Option<V> {
        let idx = self.map.remove(&Interval::new(low, high))?;
        self.list.remove(idx).map(|(_, v)| v)
    }

    /// Removes every entry whose interval contains `index` and returns how many
    /// were removed.
    ///
    /// Scans all resident entries. Afterwards no resident `[low, high]` satisfies
    /// `low <= index <= high`.
    pub fn invalidate(&mut self, index: I) -> usize {
        let scanned = self.list.len();
        let stale: Vec<usize> = self
            .list
            .iter()
            .filter(|(_, (interval, _))| interval.contains(index))
            .map(|(idx, _)| idx)
            .collect();

        for &idx in &stale {
            if let Some((key, _)) = self.list.remove(idx) {
                self.map.remove(&key);
            }
        }

        self.metrics.record_invalidation(scanned, stale.len());
        stale.len()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
        self.metrics.record_clear();
    }

    /// Iterates resident entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, I, V> {
        Iter {
            inner: self.list.iter(),
        }
    }
}

impl<I, V, S> core::fmt::Debug for IntervalCache<I, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntervalCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .finish()
    }
}

impl<I, V, S> CacheMetrics for IntervalCache<I, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

/// Iterator over the entries of an [`IntervalCache`], most recently used first.
pub struct Iter<'a, I, V> {
    inner: crate::list::Iter<'a, (Interval<I>, V)>,
}

impl<'a, I, V> Iterator for Iter<'a, I, V> {
    type Item = (&'a Interval<I>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, (k, v))| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, V> core::fmt::Debug for Iter<'_, I, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter").finish_non_exhaustive()
    }
}
