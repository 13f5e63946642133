//! Configuration Module
//!
//! This module provides configuration structures for the structures in this crate.
//! Each structure has its own dedicated configuration struct with public fields.
//!
//! # Design Philosophy
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//! - **No boilerplate**: No constructors or builder methods needed
//!
//! # Configs
//!
//! | Config | Structure | Description |
//! |--------|-----------|-------------|
//! | `IntervalCacheConfig` | [`IntervalCache`](crate::IntervalCache) | Interval-keyed LRU |
//! | `SplayTreeConfig` | [`SplayTree`](crate::SplayTree) | Self-adjusting memo tree |
//! | `RangeSumConfig` | [`RangeSumCache`](crate::RangeSumCache) | Array + interval cache |
//!
//! # Examples
//!
//! ```
//! use range_memo::config::IntervalCacheConfig;
//! use range_memo::IntervalCache;
//! use core::num::NonZeroUsize;
//!
//! let config = IntervalCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: IntervalCache<usize, u64> = IntervalCache::init(config, None);
//! assert_eq!(cache.cap().get(), 1000);
//! ```

pub mod interval_cache;
pub mod range_sum;
pub mod splay;

pub use interval_cache::IntervalCacheConfig;
pub use range_sum::{InvalidationPolicy, RangeSumConfig};
pub use splay::SplayTreeConfig;
