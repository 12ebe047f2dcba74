use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

use thiserror::Error;

/// Error produced when an interval would have a lower bound greater than its upper bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("lower bound {lower} is greater than upper bound {upper}")]
pub struct BoundsError {
    pub lower: usize,
    pub upper: usize,
}

/// Closed interval of time-step offsets `[lower, upper]` attached to a temporal operator
///
/// The interval can only be created or modified through checked operations, so every value of
/// this type satisfies `lower <= upper`. Intervals order lexicographically by lower bound and
/// then upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    lower: usize,
    upper: usize,
}

impl Interval {
    pub fn new(lower: usize, upper: usize) -> Result<Self, BoundsError> {
        if lower > upper {
            return Err(BoundsError { lower, upper });
        }

        Ok(Self { lower, upper })
    }

    /// Interval containing the single offset `step`
    pub fn point(step: usize) -> Self {
        Self {
            lower: step,
            upper: step,
        }
    }

    pub fn lower(&self) -> usize {
        self.lower
    }

    pub fn upper(&self) -> usize {
        self.upper
    }

    /// Replace the lower bound, returning the previous value
    pub fn set_lower(&mut self, lower: usize) -> Result<usize, BoundsError> {
        let previous = self.lower;
        *self = Self::new(lower, self.upper)?;

        Ok(previous)
    }

    /// Replace the upper bound, returning the previous value
    pub fn set_upper(&mut self, upper: usize) -> Result<usize, BoundsError> {
        let previous = self.upper;
        *self = Self::new(self.lower, upper)?;

        Ok(previous)
    }

    /// Replace both bounds at once, returning the previous interval
    ///
    /// Useful when moving an interval past its current bounds, where setting the bounds one at
    /// a time would pass through an invalid state.
    pub fn set(&mut self, lower: usize, upper: usize) -> Result<Interval, BoundsError> {
        let previous = *self;
        *self = Self::new(lower, upper)?;

        Ok(previous)
    }

    /// Absolute trace indices covered by this interval when evaluated over `[begin, end)`
    ///
    /// The range is clipped to `end - 1` and is empty when the window is too short to reach the
    /// lower bound.
    pub(crate) fn window(&self, begin: usize, end: usize) -> std::ops::Range<usize> {
        let start = begin.saturating_add(self.lower);
        let stop = begin.saturating_add(self.upper).saturating_add(1).min(end);

        start..stop.max(start)
    }
}

impl TryFrom<(usize, usize)> for Interval {
    type Error = BoundsError;

    fn try_from((lower, upper): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(lower, upper)
    }
}

impl TryFrom<RangeInclusive<usize>> for Interval {
    type Error = BoundsError;

    fn try_from(range: RangeInclusive<usize>) -> Result<Self, Self::Error> {
        let (lower, upper) = range.into_inner();
        Self::new(lower, upper)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.lower, self.upper)
    }
}
