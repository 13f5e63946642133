//! Memoized recurrences over a shared [`SplayTree`].
//!
//! The tree is passed by `&mut` through the whole evaluation and keeps every
//! value it has seen, so later calls (and later arguments) reuse earlier work.
//! Each completed lookup splays the key it found, which keeps the small,
//! already-resolved keys near the root while the recursion descends.

extern crate alloc;

use crate::error::Error;
use crate::splay::SplayTree;
use alloc::vec;
use num_traits::{CheckedAdd, One, Zero};

/// Largest `n` whose Fibonacci number fits in a `u128`.
pub const MAX_FIB_INDEX: u64 = 186;

/// Computes `fib(n)` using `tree` as the memo table.
///
/// Looks up `n`; on a miss, resolves `fib(n - 1)` and `fib(n - 2)` through the
/// same tree and inserts `n`. Every key in `0..=n` is inserted at most once over
/// the lifetime of the tree, and a key already present is only looked up.
/// `fib(0) = 0`, `fib(1) = 1`.
///
/// The value type decides the range: fixed-width integers stop at their
/// largest Fibonacci number (`MAX_FIB_INDEX` for `u128`), while an
/// arbitrary-precision type such as `num_bigint::BigUint` never overflows.
///
/// The recursion is driven by an explicit stack, so deep arguments do not grow
/// the call stack.
///
/// # Errors
///
/// Returns [`Error::Overflow`] with the first key whose value does not fit in
/// `V`. Every key resolved before that stays memoized.
///
/// # Examples
///
/// ```
/// use range_memo::{fibonacci_by_splay, SplayTree};
///
/// let mut tree: SplayTree<u64, u128> = SplayTree::new();
/// assert_eq!(fibonacci_by_splay(10, &mut tree), Ok(55));
/// assert_eq!(tree.len(), 11);
///
/// // Everything below 10 is already memoized.
/// assert_eq!(fibonacci_by_splay(7, &mut tree), Ok(13));
/// assert_eq!(tree.len(), 11);
/// ```
pub fn fibonacci_by_splay<V>(n: u64, tree: &mut SplayTree<u64, V>) -> Result<V, Error>
where
    V: Clone + Zero + One + CheckedAdd,
{
    if let Some(value) = tree.find(&n) {
        return Ok(value.clone());
    }

    // Each frame is a key whose value is not yet in the tree. A frame is popped
    // once both of its operands have been resolved.
    let mut pending = vec![n];
    while let Some(&k) = pending.last() {
        // Resolved meanwhile as an operand of a deeper frame.
        if tree.contains_key(&k) {
            pending.pop();
            continue;
        }
        if k < 2 {
            let base = if k == 0 { V::zero() } else { V::one() };
            tree.insert(k, base);
            pending.pop();
            continue;
        }

        let a = tree.find(&(k - 1)).cloned();
        let b = tree.find(&(k - 2)).cloned();
        match (a, b) {
            (Some(a), Some(b)) => {
                let value = a.checked_add(&b).ok_or(Error::Overflow { n: k })?;
                tree.insert(k, value);
                pending.pop();
            }
            (a, b) => {
                // n - 1 is resolved first, as in the plain recursion.
                if b.is_none() {
                    pending.push(k - 2);
                }
                if a.is_none() {
                    pending.push(k - 1);
                }
            }
        }
    }

    tree.find(&n).cloned().ok_or(Error::Overflow { n })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use num_bigint::BigUint;

    fn naive(n: u64) -> u128 {
        let (mut a, mut b) = (0u128, 1u128);
        for _ in 0..n {
            (a, b) = (b, a.wrapping_add(b));
        }
        a
    }

    #[test]
    fn test_base_cases() {
        let mut tree: SplayTree<u64, u128> = SplayTree::new();
        assert_eq!(fibonacci_by_splay(0, &mut tree), Ok(0));
        assert_eq!(fibonacci_by_splay(1, &mut tree), Ok(1));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_fib_ten_inserts_each_key_once() {
        let mut tree: SplayTree<u64, u128> = SplayTree::new();
        assert_eq!(fibonacci_by_splay(10, &mut tree), Ok(55));
        let keys: Vec<u64> = tree.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, (0..=10).collect::<Vec<_>>());
        assert_eq!(tree.counters().core.insertions, 11);
        assert_eq!(tree.counters().core.updates, 0);

        let five = tree.find(&5).copied();
        assert_eq!(fibonacci_by_splay(10, &mut tree), Ok(55));
        assert_eq!(tree.find(&5).copied(), five);
        assert_eq!(five, Some(5));
        assert_eq!(tree.counters().core.insertions, 11);
    }

    #[test]
    fn test_matches_iterative_fibonacci() {
        let mut tree: SplayTree<u64, u128> = SplayTree::new();
        for n in (0..=MAX_FIB_INDEX).step_by(7) {
            assert_eq!(fibonacci_by_splay(n, &mut tree), Ok(naive(n)));
        }
        assert_eq!(fibonacci_by_splay(MAX_FIB_INDEX, &mut tree), Ok(naive(MAX_FIB_INDEX)));
        assert_eq!(tree.len() as u64, MAX_FIB_INDEX + 1);
    }

    #[test]
    fn test_repeat_call_is_single_lookup() {
        let mut tree: SplayTree<u64, u128> = SplayTree::new();
        fibonacci_by_splay(30, &mut tree).unwrap();
        let before = tree.counters().core.requests;
        fibonacci_by_splay(30, &mut tree).unwrap();
        assert_eq!(tree.counters().core.requests, before + 1);
        assert_eq!(tree.root(), Some((&30, &832_040)));
    }

    #[test]
    fn test_fixed_width_overflow_keeps_resolved_keys() {
        let mut tree: SplayTree<u64, u128> = SplayTree::new();
        assert_eq!(
            fibonacci_by_splay(MAX_FIB_INDEX + 10, &mut tree),
            Err(Error::Overflow { n: MAX_FIB_INDEX + 1 })
        );
        assert_eq!(tree.len() as u64, MAX_FIB_INDEX + 1);
        assert_eq!(fibonacci_by_splay(MAX_FIB_INDEX, &mut tree), Ok(naive(MAX_FIB_INDEX)));
        assert_eq!(tree.len() as u64, MAX_FIB_INDEX + 1);

        let mut small: SplayTree<u64, u64> = SplayTree::new();
        assert_eq!(fibonacci_by_splay(93, &mut small), Ok(12_200_160_415_121_876_738));
        assert_eq!(fibonacci_by_splay(94, &mut small), Err(Error::Overflow { n: 94 }));
    }

    #[test]
    fn test_big_values_past_fixed_width() {
        let mut tree: SplayTree<u64, BigUint> = SplayTree::new();
        for n in (0..=950).step_by(50) {
            assert!(fibonacci_by_splay(n, &mut tree).is_ok());
        }
        assert_eq!(tree.len(), 951);
        assert_eq!(
            fibonacci_by_splay(200, &mut tree).unwrap().to_string(),
            "280571172992510140037611932413038677189525"
        );
        assert_eq!(
            fibonacci_by_splay(950, &mut tree).unwrap().to_string(),
            "1544447803282326157141063860798140565135175279561812695372311151183404978544074576\
             084779694906092198758336762454048905401589449506607204278264939097537573413980490\
             519471907060934663660744135522705225"
        );
        assert_eq!(
            fibonacci_by_splay(MAX_FIB_INDEX, &mut tree),
            Ok(BigUint::from(naive(MAX_FIB_INDEX)))
        );
        assert_eq!(tree.counters().core.insertions, 951);
    }
}
