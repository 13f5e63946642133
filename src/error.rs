//! Error type for the checked entry points of this crate.
//!
//! The caches themselves never fail: a lookup miss is `None`. Errors only
//! arise when a caller hands in arguments that violate a precondition
//! (inverted bounds, an index past the end of the source array) or when a
//! memoized recurrence leaves the range of its value type.

use thiserror::Error;

/// Errors returned by [`Interval::try_new`](crate::Interval::try_new),
/// [`RangeSumCache`](crate::RangeSumCache) and
/// [`fibonacci_by_splay`](crate::fibonacci_by_splay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The lower bound of an interval is greater than its upper bound.
    #[error("interval lower bound exceeds upper bound")]
    InvertedInterval,
    /// An index lies outside the source array.
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Length of the array the index was checked against.
        len: usize,
    },
    /// The recurrence value for `n` does not fit in the value type.
    #[error("recurrence value for n = {n} overflows")]
    Overflow {
        /// The argument whose value overflowed.
        n: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::InvertedInterval.to_string(),
            "interval lower bound exceeds upper bound"
        );
        assert_eq!(
            Error::IndexOutOfBounds { index: 7, len: 3 }.to_string(),
            "index 7 out of bounds for array of length 3"
        );
        assert_eq!(
            Error::Overflow { n: 200 }.to_string(),
            "recurrence value for n = 200 overflows"
        );
    }

    #[test]
    fn test_error_implements_core_error() {
        fn assert_error<E: core::error::Error>(_: &E) {}
        assert_error(&Error::InvertedInterval);
        let err = Error::Overflow { n: 187 };
        assert!(core::error::Error::source(&err).is_none());
    }
}
