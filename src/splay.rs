//! Splay Tree Implementation
//!
//! This module provides a self-adjusting binary search tree used as an
//! unbounded memo table. Every successful [`SplayTree::find`] rotates the found
//! node up to the root, so keys that were looked up recently sit near the top
//! and are cheap to reach again.
//!
//! # Algorithm
//!
//! A splay moves node `x` to the root with a sequence of steps, each chosen by
//! the position of `x` relative to its parent `p` and grandparent `g`:
//!
//! ```text
//!   Zig (p is the root)      Zig-zig (same side)        Zig-zag (opposite sides)
//!
//!       p          x              g          x              g            x
//!      / \        / \            / \        / \            / \         /   \
//!     x   C  ->  A   p          p   D  ->  A   p          p   D  ->   p     g
//!    / \            / \        / \            / \        / \         / \   / \
//!   A   B          B   C      x   C          B   g      A   x       A   B C   D
//!                            / \                / \        / \
//!                           A   B              C   D      B   C
//! ```
//!
//! Zig-zig rotates at `g` first and then at `p`; zig-zag rotates at `p` and then
//! at the new parent of `x` (the old `g`). Mirror images apply when `x` is a
//! right child.
//!
//! Insertion is a plain BST descent that attaches a leaf and does **not** splay.
//! Only successful finds restructure the tree.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity** (amortized over a sequence of finds):
//!   - Find: O(log n) amortized, O(n) worst case for a single call
//!   - Insert: O(depth), which can be O(n) after a run of ascending inserts
//!
//! - **Space Complexity**:
//!   - O(n) for n distinct keys; nodes are never removed
//!
//! No heights or balance factors are stored.
//!
//! # Representation
//!
//! Nodes live in an arena (`Vec`) and refer to each other by index. `left` and
//! `right` are the owning edges of the tree; `parent` is the back-edge used by
//! the bottom-up splay. A rotation rewrites a constant number of indices.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe and is meant to be owned by a single
//! driver.

extern crate alloc;

use crate::config::SplayTreeConfig;
use crate::metrics::{CacheMetrics, SplayTreeMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

/// Index of a node in the arena.
type NodeId = usize;

struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, parent: Option<NodeId>) -> Self {
        Node {
            key,
            value,
            parent,
            left: None,
            right: None,
        }
    }
}

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// A splay tree mapping ordered keys to values.
///
/// # Examples
///
/// ```
/// use range_memo::SplayTree;
///
/// let mut tree = SplayTree::new();
/// for key in [5, 3, 8, 1] {
///     tree.insert(key, key * 10);
/// }
///
/// // Inserting does not restructure: 5 is still the root.
/// assert_eq!(tree.root(), Some((&5, &50)));
///
/// // A successful find splays the node to the root.
/// assert_eq!(tree.find(&1), Some(&10));
/// assert_eq!(tree.root(), Some((&1, &10)));
///
/// // A miss leaves the tree untouched.
/// assert_eq!(tree.find(&4), None);
/// assert_eq!(tree.root(), Some((&1, &10)));
///
/// let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
/// assert_eq!(keys, [1, 3, 5, 8]);
/// ```
pub struct SplayTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
    metrics: SplayTreeMetrics,
}

impl<K: Ord, V> SplayTree<K, V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        SplayTree::with_capacity(0)
    }

    /// Creates an empty tree with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        SplayTree {
            nodes: Vec::with_capacity(capacity),
            root: None,
            metrics: SplayTreeMetrics::new(),
        }
    }

    /// Creates an empty tree from a configuration.
    pub fn init(config: SplayTreeConfig) -> Self {
        SplayTree::with_capacity(config.initial_capacity)
    }

    /// Number of distinct keys stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Raw counters behind [`CacheMetrics::metrics`].
    #[inline]
    pub fn counters(&self) -> &SplayTreeMetrics {
        &self.metrics
    }

    /// Key and value at the root, if any.
    pub fn root(&self) -> Option<(&K, &V)> {
        self.root.map(|id| {
            let node = &self.nodes[id];
            (&node.key, &node.value)
        })
    }

    /// Inserts `key` as a new leaf without splaying.
    ///
    /// Descends from the root going left when `key` is strictly less than the
    /// node's key and right otherwise. If `key` is already present its value is
    /// replaced in place and the previous value is returned; no node is added
    /// and the shape of the tree does not change.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(mut current) = self.root else {
            self.nodes.push(Node::new(key, value, None));
            self.root = Some(self.nodes.len() - 1);
            self.metrics.core.record_insertion();
            return None;
        };

        loop {
            let node = &mut self.nodes[current];
            let (side, next) = match key.cmp(&node.key) {
                Ordering::Less => (Side::Left, node.left),
                Ordering::Greater => (Side::Right, node.right),
                Ordering::Equal => {
                    self.metrics.core.record_update();
                    return Some(core::mem::replace(&mut node.value, value));
                }
            };
            match next {
                Some(child) => current = child,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(Node::new(key, value, Some(current)));
                    self.set_child(current, side, Some(id));
                    self.metrics.core.record_insertion();
                    return None;
                }
            }
        }
    }

    /// Looks up `key`; on success splays its node to the root and returns the value.
    ///
    /// A miss returns `None` and leaves the tree unchanged.
    pub fn find(&mut self, key: &K) -> Option<&V> {
        let id = self.find_and_splay(key)?;
        Some(&self.nodes[id].value)
    }

    /// Like [`find`](Self::find) but returns a mutable reference.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find_and_splay(key)?;
        Some(&mut self.nodes[id].value)
    }

    /// Looks up `key` without restructuring the tree or recording metrics.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.locate(key).map(|id| &self.nodes[id].value)
    }

    /// Returns `true` if `key` is present. Does not restructure the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    /// Number of nodes on the longest root-to-leaf path (0 for an empty tree).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|c| (c, depth + 1)));
            stack.extend(node.right.map(|c| (c, depth + 1)));
        }
        height
    }

    /// Iterates entries in ascending key order. Does not restructure the tree.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: self,
            next: self.root.map(|id| self.leftmost(id)),
            remaining: self.nodes.len(),
        }
    }

    fn find_and_splay(&mut self, key: &K) -> Option<NodeId> {
        match self.locate(key) {
            Some(id) => {
                self.metrics.core.record_hit();
                self.splay(id);
                Some(id)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    fn locate(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }
}

impl<K, V> SplayTree<K, V> {
    /// Which side of its parent `id` hangs on, or `None` for the root.
    fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.nodes[id].parent?;
        if self.nodes[parent].left == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    fn set_child(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.nodes[parent].left = child,
            Side::Right => self.nodes[parent].right = child,
        }
    }

    /// Points whatever referenced `old` (its parent's child slot, or the root)
    /// at `new`, and gives `new` the parent of `old`.
    fn replace_in_parent(&mut self, old: NodeId, new: NodeId) {
        let parent = self.nodes[old].parent;
        match (parent, self.side_of(old)) {
            (Some(p), Some(side)) => self.set_child(p, side, Some(new)),
            _ => self.root = Some(new),
        }
        self.nodes[new].parent = parent;
    }

    /// Rotates `pivot` down to the left; its right child takes its place.
    ///
    /// ```text
    ///     pivot            r
    ///     /   \          /   \
    ///    A     r   ->  pivot  C
    ///         / \      /   \
    ///        B   C    A     B
    /// ```
    fn rotate_left(&mut self, pivot: NodeId) {
        let Some(r) = self.nodes[pivot].right else {
            return;
        };
        let inner = self.nodes[r].left;
        self.nodes[pivot].right = inner;
        if let Some(b) = inner {
            self.nodes[b].parent = Some(pivot);
        }
        self.replace_in_parent(pivot, r);
        self.nodes[r].left = Some(pivot);
        self.nodes[pivot].parent = Some(r);
        self.metrics.rotations += 1;
    }

    /// Rotates `pivot` down to the right; its left child takes its place.
    ///
    /// ```text
    ///       pivot          l
    ///       /   \        /   \
    ///      l     C  ->  A   pivot
    ///     / \               /   \
    ///    A   B             B     C
    /// ```
    fn rotate_right(&mut self, pivot: NodeId) {
        let Some(l) = self.nodes[pivot].left else {
            return;
        };
        let inner = self.nodes[l].right;
        self.nodes[pivot].left = inner;
        if let Some(b) = inner {
            self.nodes[b].parent = Some(pivot);
        }
        self.replace_in_parent(pivot, l);
        self.nodes[l].right = Some(pivot);
        self.nodes[pivot].parent = Some(l);
        self.metrics.rotations += 1;
    }

    /// Rotates at `parent` so that its child on `side` moves up one level.
    fn rotate_up(&mut self, parent: NodeId, side: Side) {
        match side {
            Side::Left => self.rotate_right(parent),
            Side::Right => self.rotate_left(parent),
        }
    }

    /// Moves `x` to the root.
    ///
    /// Each step lifts `x` by one (zig) or two (zig-zig, zig-zag) levels, so the
    /// loop ends after at most depth(x) rotations.
    fn splay(&mut self, x: NodeId) {
        self.metrics.splays += 1;
        while let Some(p) = self.nodes[x].parent {
            let Some(x_side) = self.side_of(x) else {
                break;
            };
            match (self.nodes[p].parent, self.side_of(p)) {
                (Some(g), Some(p_side)) if p_side == x_side => {
                    self.metrics.zig_zig += 1;
                    self.rotate_up(g, p_side);
                    self.rotate_up(p, x_side);
                }
                (Some(g), Some(_)) => {
                    self.metrics.zig_zag += 1;
                    self.rotate_up(p, x_side);
                    // After the first rotation x hangs from g on the side p used to.
                    let Some(new_side) = self.side_of(x) else {
                        break;
                    };
                    self.rotate_up(g, new_side);
                }
                _ => {
                    self.metrics.zig += 1;
                    self.rotate_up(p, x_side);
                }
            }
        }
        debug_assert_eq!(self.root, Some(x));
    }
}

impl<K: Ord, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        SplayTree::new()
    }
}

impl<K, V> fmt::Debug for SplayTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplayTree")
            .field("len", &self.nodes.len())
            .field("root", &self.root)
            .finish()
    }
}

impl<K, V> CacheMetrics for SplayTree<K, V> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

/// In-order iterator over a [`SplayTree`].
///
/// Walks successor links through parent back-references, so it needs no stack.
pub struct Iter<'a, K, V> {
    tree: &'a SplayTree<K, V>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let nodes = &self.tree.nodes;

        self.next = match nodes[id].right {
            Some(mut succ) => {
                while let Some(left) = nodes[succ].left {
                    succ = left;
                }
                Some(succ)
            }
            None => {
                // Climb until we arrive from a left child.
                let mut child = id;
                let mut parent = nodes[id].parent;
                while let Some(p) = parent {
                    if nodes[p].left == Some(child) {
                        break;
                    }
                    child = p;
                    parent = nodes[p].parent;
                }
                parent
            }
        };
        self.remaining -= 1;

        let node = &nodes[id];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
