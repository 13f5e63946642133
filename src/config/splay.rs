//! Configuration for the splay tree.
//!
//! The tree never evicts, so there is no capacity limit. `initial_capacity`
//! only pre-sizes the node arena to avoid reallocation while a memo table
//! fills up.
//!
//! # Examples
//!
//! ```
//! use range_memo::config::SplayTreeConfig;
//! use range_memo::SplayTree;
//!
//! // A Fibonacci memo for n <= 180 needs 181 nodes.
//! let config = SplayTreeConfig { initial_capacity: 181 };
//! let tree: SplayTree<u64, u128> = SplayTree::init(config);
//! assert!(tree.is_empty());
//! ```

use core::fmt;

/// Configuration for a [`SplayTree`](crate::SplayTree).
#[derive(Clone, Copy, Default)]
pub struct SplayTreeConfig {
    /// Number of nodes to reserve in the arena up front.
    pub initial_capacity: usize,
}

impl fmt::Debug for SplayTreeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplayTreeConfig")
            .field("initial_capacity", &self.initial_capacity)
            .finish()
    }
}
