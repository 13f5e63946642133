//! Closed intervals used as cache keys.

use crate::error::Error;
use core::fmt;

/// A closed interval `[low, high]` with `low <= high`.
///
/// Intervals are compared and hashed by their exact bounds: `[0, 5]` and
/// `[0, 6]` are distinct keys even though one contains the other.
///
/// # Examples
///
/// ```
/// use range_memo::Interval;
///
/// let interval = Interval::new(3, 7);
/// assert!(interval.contains(3));
/// assert!(interval.contains(7));
/// assert!(!interval.contains(8));
/// assert!(Interval::try_new(7, 3).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval<I> {
    low: I,
    high: I,
}

impl<I: Ord + Copy> Interval<I> {
    /// Creates the interval `[low, high]`.
    ///
    /// # Panics
    ///
    /// Panics if `low > high`.
    #[inline]
    #[track_caller]
    pub fn new(low: I, high: I) -> Self {
        assert!(low <= high, "interval lower bound exceeds upper bound");
        Interval { low, high }
    }

    /// Creates the interval `[low, high]`, or returns
    /// [`Error::InvertedInterval`] if `low > high`.
    #[inline]
    pub fn try_new(low: I, high: I) -> Result<Self, Error> {
        if low > high {
            return Err(Error::InvertedInterval);
        }
        Ok(Interval { low, high })
    }

    /// Lower bound (inclusive).
    #[inline]
    pub fn low(&self) -> I {
        self.low
    }

    /// Upper bound (inclusive).
    #[inline]
    pub fn high(&self) -> I {
        self.high
    }

    /// Returns `true` if `point` lies in `[low, high]`.
    #[inline]
    pub fn contains(&self, point: I) -> bool {
        self.low <= point && point <= self.high
    }

    /// Returns `true` if the two intervals share at least one point.
    #[inline]
    pub fn overlaps(&self, other: &Interval<I>) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

impl<I: Ord + Copy> TryFrom<(I, I)> for Interval<I> {
    type Error = Error;

    fn try_from((low, high): (I, I)) -> Result<Self, Self::Error> {
        Interval::try_new(low, high)
    }
}

impl<I: fmt::Debug> fmt::Debug for Interval<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}]", self.low, self.high)
    }
}
