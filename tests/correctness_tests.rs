//! Correctness Tests for the Memo Structures
//!
//! This module validates the observable behavior of each structure through its
//! public API, using small, predictable access patterns.
//!
//! ## Test Strategy
//! - Small capacities (2-4 entries) so every eviction is predictable
//! - Each eviction test checks exactly which interval was dropped
//! - Splay tests check the root and the in-order contents after each step
//! - Range sums are checked against a plain recomputation

use num_bigint::BigUint;
use range_memo::config::{
    IntervalCacheConfig, InvalidationPolicy, RangeSumConfig, SplayTreeConfig,
};
use range_memo::{
    fibonacci_by_splay, CacheMetrics, Error, Interval, IntervalCache, RangeSumCache, SplayTree,
};
use std::num::NonZeroUsize;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Helper to create an IntervalCache with the given capacity
fn make_cache<V>(cap: usize) -> IntervalCache<usize, V> {
    let config = IntervalCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    IntervalCache::init(config, None)
}

/// Helper to create a RangeSumCache over `data`
fn make_sums(data: Vec<i64>, cap: usize, policy: InvalidationPolicy) -> RangeSumCache<i64> {
    let config = RangeSumConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
        policy,
    };
    RangeSumCache::init(data, config, None)
}

fn root_key<K: Ord + Copy, V>(tree: &SplayTree<K, V>) -> Option<K> {
    tree.root().map(|(k, _)| *k)
}

fn keys<K: Ord + Copy, V>(tree: &SplayTree<K, V>) -> Vec<K> {
    tree.iter().map(|(k, _)| *k).collect()
}

// ============================================================================
// INTERVAL CACHE
// ============================================================================

#[test]
fn test_interval_cache_refresh_changes_victim() {
    let mut cache = make_cache(2);
    cache.put(0, 5, 100);
    cache.put(6, 9, 50);

    // Touch (0, 5) so (6, 9) becomes least recently used
    assert_eq!(cache.get(0, 5), Some(&100));

    let evicted = cache.put(10, 12, 7);
    assert_eq!(evicted, Some((Interval::new(6, 9), 50)));
    assert_eq!(cache.get(6, 9), None);
    assert_eq!(cache.get(0, 5), Some(&100));
    assert_eq!(cache.get(10, 12), Some(&7));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_interval_cache_invalidate_removes_only_covering() {
    let mut cache = make_cache(4);
    cache.put(0, 5, 100);
    cache.put(10, 12, 7);

    assert_eq!(cache.invalidate(4), 1);
    assert_eq!(cache.get(0, 5), None);
    assert_eq!(cache.get(10, 12), Some(&7));
}

#[test]
fn test_interval_cache_lru_order_without_access() {
    let mut cache = make_cache(3);
    cache.put(0, 0, 'a');
    cache.put(1, 1, 'b');
    cache.put(2, 2, 'c');

    // Insertion order is recency order; the first key is the first victim
    assert_eq!(cache.put(3, 3, 'd'), Some((Interval::new(0, 0), 'a')));
    assert_eq!(cache.put(4, 4, 'e'), Some((Interval::new(1, 1), 'b')));

    let order: Vec<(usize, usize)> = cache.iter().map(|(k, _)| (k.low(), k.high())).collect();
    assert_eq!(order, vec![(4, 4), (3, 3), (2, 2)]);
}

#[test]
fn test_interval_cache_put_existing_refreshes_without_eviction() {
    let mut cache = make_cache(2);
    cache.put(0, 1, 1);
    cache.put(2, 3, 2);

    // Updating (0, 1) makes it most recent and evicts nothing
    assert_eq!(cache.put(0, 1, 10), Some((Interval::new(0, 1), 1)));
    assert_eq!(cache.len(), 2);

    assert_eq!(cache.put(4, 5, 3), Some((Interval::new(2, 3), 2)));
    assert_eq!(cache.peek(0, 1), Some(&10));
}

#[test]
fn test_interval_cache_peek_does_not_refresh() {
    let mut cache = make_cache(2);
    cache.put(0, 1, 1);
    cache.put(2, 3, 2);

    assert_eq!(cache.peek(0, 1), Some(&1));
    assert_eq!(cache.put(4, 5, 3), Some((Interval::new(0, 1), 1)));
}

#[test]
fn test_interval_cache_invalidate_boundaries() {
    let mut cache = make_cache(8);
    cache.put(0, 4, ());
    cache.put(4, 8, ());
    cache.put(5, 5, ());
    cache.put(9, 20, ());

    // Both closed endpoints count as covered
    assert_eq!(cache.invalidate(4), 2);
    assert!(!cache.contains(0, 4));
    assert!(!cache.contains(4, 8));
    assert!(cache.contains(5, 5));
    assert!(cache.contains(9, 20));

    // A point covered by nothing is a no-op
    assert_eq!(cache.invalidate(100), 0);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_interval_cache_slots_reused_after_invalidation() {
    let mut cache = make_cache(3);
    for round in 0..10 {
        cache.put(0, 10, round);
        cache.put(20, 30, round);
        cache.put(40, 50, round);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.invalidate(25), 1);
        assert_eq!(cache.len(), 2);
    }
    assert_eq!(cache.counters().core.evictions, 0);
}

#[test]
#[should_panic]
fn test_interval_cache_inverted_bounds_panic() {
    let mut cache: IntervalCache<usize, u8> = make_cache(2);
    cache.put(5, 4, 0);
}

#[test]
fn test_interval_cache_metrics() {
    let mut cache = make_cache(2);
    cache.put(0, 5, 1);
    cache.put(6, 9, 2);
    cache.get(0, 5);
    cache.get(1, 2);
    cache.put(10, 12, 3);
    cache.invalidate(0);

    let metrics = cache.metrics();
    assert_eq!(cache.algorithm_name(), "IntervalLRU");
    assert_eq!(metrics.get("requests"), Some(&2.0));
    assert_eq!(metrics.get("cache_hits"), Some(&1.0));
    assert_eq!(metrics.get("cache_misses"), Some(&1.0));
    assert_eq!(metrics.get("evictions"), Some(&1.0));
    assert_eq!(metrics.get("invalidations"), Some(&1.0));
    assert_eq!(metrics.get("entries_scanned"), Some(&2.0));
    assert_eq!(metrics.get("entries_invalidated"), Some(&1.0));
}

// ============================================================================
// SPLAY TREE
// ============================================================================

#[test]
fn test_splay_find_moves_key_to_root() {
    let mut tree = SplayTree::new();
    for k in [5, 3, 8, 1] {
        tree.insert(k, k * 10);
    }
    assert_eq!(root_key(&tree), Some(5));

    assert_eq!(tree.find(&1), Some(&10));
    assert_eq!(root_key(&tree), Some(1));

    // Every key is still reachable and in order
    assert_eq!(keys(&tree), vec![1, 3, 5, 8]);
    for k in [3, 5, 8] {
        assert_eq!(tree.peek(&k), Some(&(k * 10)));
    }
}

#[test]
fn test_splay_miss_leaves_tree_unchanged() {
    let mut tree = SplayTree::new();
    for k in [5, 3, 8] {
        tree.insert(k, ());
    }
    let height = tree.height();
    assert_eq!(tree.find(&4), None);
    assert_eq!(root_key(&tree), Some(5));
    assert_eq!(tree.height(), height);
    assert_eq!(tree.counters().splays, 0);
}

#[test]
fn test_splay_repeated_find_is_stable() {
    let mut tree = SplayTree::new();
    for k in [50, 20, 70, 10, 30, 60, 80] {
        tree.insert(k, k);
    }
    tree.find(&30);
    let rotations = tree.counters().rotations;
    assert_eq!(tree.find(&30), Some(&30));
    assert_eq!(root_key(&tree), Some(30));
    assert_eq!(tree.counters().rotations, rotations);
}

#[test]
fn test_splay_insert_does_not_splay() {
    let mut tree = SplayTree::new();
    for k in 0..10 {
        tree.insert(k, ());
    }
    // Ascending inserts without splaying build a right spine
    assert_eq!(root_key(&tree), Some(0));
    assert_eq!(tree.height(), 10);
    assert_eq!(tree.counters().rotations, 0);

    // One find on the deepest key roughly halves the depth of the path
    tree.find(&9);
    assert_eq!(root_key(&tree), Some(9));
    assert!(tree.height() < 10);
}

#[test]
fn test_splay_insert_existing_replaces_value() {
    let mut tree = SplayTree::init(SplayTreeConfig {
        initial_capacity: 4,
    });
    assert_eq!(tree.insert(1, "one"), None);
    assert_eq!(tree.insert(1, "uno"), Some("one"));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.find(&1), Some(&"uno"));
}

#[test]
fn test_splay_find_mut() {
    let mut tree = SplayTree::new();
    tree.insert("b", 1);
    tree.insert("a", 2);
    if let Some(v) = tree.find_mut(&"a") {
        *v += 40;
    }
    assert_eq!(root_key(&tree), Some("a"));
    assert_eq!(tree.peek(&"a"), Some(&42));
}

// ============================================================================
// FIBONACCI MEMO
// ============================================================================

#[test]
fn test_fibonacci_memo_inserts_each_key_once() {
    let mut tree: SplayTree<u64, u128> = SplayTree::new();
    assert_eq!(fibonacci_by_splay(10, &mut tree), Ok(55));
    assert_eq!(keys(&tree), (0..=10).collect::<Vec<u64>>());

    let values: Vec<u128> = (0..=10).map(|k| *tree.peek(&k).unwrap()).collect();
    assert_eq!(values, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55]);

    // Repeated lookups return the same values and add nothing
    assert_eq!(fibonacci_by_splay(10, &mut tree), Ok(55));
    assert_eq!(fibonacci_by_splay(4, &mut tree), Ok(3));
    assert_eq!(tree.len(), 11);
    assert_eq!(tree.counters().core.insertions, 11);
}

#[test]
fn test_fibonacci_memo_extends_shared_tree() {
    let mut tree: SplayTree<u64, u128> = SplayTree::new();
    fibonacci_by_splay(20, &mut tree).unwrap();
    assert_eq!(fibonacci_by_splay(40, &mut tree), Ok(102_334_155));
    assert_eq!(tree.len(), 41);
}

#[test]
fn test_fibonacci_memo_overflow() {
    let mut tree: SplayTree<u64, u128> = SplayTree::new();
    assert_eq!(
        fibonacci_by_splay(range_memo::MAX_FIB_INDEX + 1, &mut tree),
        Err(Error::Overflow { n: 187 })
    );
    assert!(fibonacci_by_splay(range_memo::MAX_FIB_INDEX, &mut tree).is_ok());
}

#[test]
fn test_fibonacci_memo_big_values() {
    let mut tree: SplayTree<u64, BigUint> = SplayTree::new();
    let mut previous = BigUint::from(0u32);
    for n in (0..=950).step_by(50) {
        let value = fibonacci_by_splay(n, &mut tree).unwrap();
        assert!(n < 2 || value > previous);
        previous = value;
    }
    assert_eq!(tree.len(), 951);
    assert_eq!(
        previous.to_string(),
        "1544447803282326157141063860798140565135175279561812695372311151183404978544074576\
         084779694906092198758336762454048905401589449506607204278264939097537573413980490\
         519471907060934663660744135522705225"
    );

    // fib(n) = fib(n - 1) + fib(n - 2) holds for every memoized key
    for n in 2..=950u64 {
        let sum = tree.peek(&(n - 1)).unwrap() + tree.peek(&(n - 2)).unwrap();
        assert_eq!(tree.peek(&n), Some(&sum));
    }
}

// ============================================================================
// RANGE SUM CACHE
// ============================================================================

#[test]
fn test_range_sums_match_recomputation() {
    let data: Vec<i64> = (0..64).map(|i| (i * 37 % 19) - 9).collect();
    for policy in [InvalidationPolicy::Overlap, InvalidationPolicy::ClearAll] {
        let mut sums = make_sums(data.clone(), 16, policy);
        let mut model = data.clone();

        let mut state = 12345u64;
        let mut next = |bound: usize| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) as usize) % bound
        };

        for step in 0..2000 {
            if step % 3 == 0 {
                let index = next(model.len());
                let value = next(100) as i64 - 50;
                assert_eq!(sums.update(index, value), Ok(model[index]));
                model[index] = value;
            } else {
                let low = next(model.len());
                let high = low + next(model.len() - low);
                let expected: i64 = model[low..=high].iter().sum();
                assert_eq!(sums.range_sum(low, high), Ok(expected), "{policy} [{low}, {high}]");
            }
        }
        assert_eq!(sums.as_slice(), model.as_slice());
    }
}

#[test]
fn test_range_sum_errors() {
    let mut sums = make_sums(vec![1, 2, 3], 2, InvalidationPolicy::Overlap);
    assert_eq!(sums.range_sum(2, 1), Err(Error::InvertedInterval));
    assert_eq!(
        sums.range_sum(0, 3),
        Err(Error::IndexOutOfBounds { index: 3, len: 3 })
    );
    assert_eq!(
        sums.update(3, 0),
        Err(Error::IndexOutOfBounds { index: 3, len: 3 })
    );
    assert_eq!(sums.range_sum(0, 2), Ok(6));
}

#[test]
fn test_range_sum_overlap_keeps_disjoint_results() {
    let mut sums = make_sums(vec![1; 10], 4, InvalidationPolicy::Overlap);
    sums.range_sum(0, 3).unwrap();
    sums.range_sum(6, 9).unwrap();
    sums.update(5, 100).unwrap();

    assert_eq!(sums.cache().len(), 2);
    assert_eq!(sums.range_sum(6, 9), Ok(4));
    assert_eq!(sums.cache().counters().core.cache_hits, 1);
    assert_eq!(sums.range_sum(4, 6), Ok(102));
}
