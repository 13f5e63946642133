#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Which Structure Should I Use?
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  What are you memoizing?                                             │
//! │                                                                      │
//! │  ┌───────────────────────┐                                           │
//! │  │ Aggregates over       │──Yes──▶ ┌───────────────┐                 │
//! │  │ [low, high] of a      │         │ IntervalCache │ (or RangeSumCache│
//! │  │ mutable array?        │         └───────────────┘  for plain sums)│
//! │  └──────────┬────────────┘                                           │
//! │            No                                                        │
//! │             ▼                                                        │
//! │  ┌───────────────────────┐                                           │
//! │  │ A recurrence over     │──Yes──▶ ┌───────────────┐                 │
//! │  │ ordered keys, reused  │         │  SplayTree    │                 │
//! │  │ across calls?         │         └───────────────┘                 │
//! │  └───────────────────────┘                                           │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Structure | Bounded | Restructures on | Invalidation |
//! |-----------|---------|-----------------|--------------|
//! | [`IntervalCache`] | yes, LRU | get / put | by point, full scan |
//! | [`SplayTree`] | no | successful find | none |
//! | [`RangeSumCache`] | yes, LRU | range_sum | per [`config::InvalidationPolicy`] |
//!
//! ## Performance Characteristics
//!
//! | Structure | Lookup | Insert | Invalidate |
//! |-----------|--------|--------|------------|
//! | IntervalCache | O(1) | O(1) | O(len) |
//! | SplayTree | O(log n) amortized | O(depth) | n/a |
//!
//! ## Code Examples
//!
//! ### Interval cache
//!
//! ```rust
//! use range_memo::IntervalCache;
//! use range_memo::config::IntervalCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = IntervalCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache: IntervalCache<usize, u64> = IntervalCache::init(config, None);
//! cache.put(0, 5, 100);
//! cache.put(10, 12, 7);
//! cache.invalidate(4);              // element 4 changed
//! assert_eq!(cache.get(0, 5), None);
//! assert_eq!(cache.get(10, 12), Some(&7));
//! ```
//!
//! ### Splay tree memo
//!
//! ```rust
//! use range_memo::{fibonacci_by_splay, SplayTree};
//!
//! let mut tree: SplayTree<u64, u128> = SplayTree::new();
//! assert_eq!(fibonacci_by_splay(90, &mut tree), Ok(2_880_067_194_370_816_120));
//! assert_eq!(tree.root().map(|(k, _)| *k), Some(90));
//! ```
//!
//! Any value type with checked addition works. Fixed-width integers report
//! [`Error::Overflow`] past their largest Fibonacci number; an
//! arbitrary-precision integer keeps going:
//!
//! ```rust
//! use num_bigint::BigUint;
//! use range_memo::{fibonacci_by_splay, SplayTree};
//!
//! let mut tree: SplayTree<u64, BigUint> = SplayTree::new();
//! let value = fibonacci_by_splay(300, &mut tree).unwrap();
//! assert_eq!(value.to_string(), "222232244629420445529739893461909967206666939096499764990979600");
//! ```
//!
//! ### Metrics
//!
//! ```rust
//! use range_memo::metrics::CacheMetrics;
//! use range_memo::SplayTree;
//!
//! let mut tree = SplayTree::new();
//! tree.insert(2, "two");
//! tree.insert(1, "one");
//! tree.find(&1);
//! assert_eq!(tree.metrics().get("rotations"), Some(&1.0));
//! assert_eq!(tree.algorithm_name(), "Splay");
//! ```
//!
//! ## Modules
//!
//! - [`interval_cache`]: Interval-keyed LRU cache with point invalidation
//! - [`splay`]: Arena-backed splay tree
//! - [`memo`]: Recurrences memoized through a splay tree
//! - [`range_sum`]: Array wrapper with cached range sums
//! - [`config`]: Configuration structures
//! - [`metrics`]: Metrics collection

#![no_std]

extern crate alloc;

/// Error type for checked entry points.
pub mod error;

/// Closed intervals used as cache keys.
pub mod interval;

/// Doubly linked list stored in a slab, ordered by recency.
///
/// Internal infrastructure for the interval cache.
pub(crate) mod list;

/// Configuration structures.
pub mod config;

/// Interval-keyed LRU cache.
///
/// A fixed-capacity cache of range results that can drop every result covering
/// a point in one call.
pub mod interval_cache;

/// Splay tree.
///
/// An unbounded ordered map that rotates every successfully found key to the
/// root.
pub mod splay;

/// Memoized recurrences over a splay tree.
pub mod memo;

/// Cached range sums over an owned array.
pub mod range_sum;

/// Metrics system.
///
/// Counters for both structures, reported through the [`metrics::CacheMetrics`] trait.
pub mod metrics;

pub use config::InvalidationPolicy;
pub use error::Error;
pub use interval::Interval;
pub use interval_cache::IntervalCache;
pub use memo::{fibonacci_by_splay, MAX_FIB_INDEX};
pub use range_sum::RangeSumCache;
pub use splay::SplayTree;

pub use metrics::{CacheMetrics, IntervalCacheMetrics, SplayTreeMetrics};
