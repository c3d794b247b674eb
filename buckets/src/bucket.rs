//! Buckets represent a labeled range of an ordered domain. Every operation on
//! a bucket is expressed through `Ord::cmp`, so any totally ordered type can
//! be used for the range.

use core::cmp::Ordering;
use core::fmt;
use core::ops::Bound;

use crate::BuildError;

/// The boundary semantics of a bucket.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum Bounds<T> {
    /// Half-open range `[lower, upper)`.
    Standard { lower: T, upper: T },
    /// Closed range `[lower, upper]`.
    Inclusive { lower: T, upper: T },
    /// Unbounded below and closed above, `(.., upper]`.
    Below { upper: T },
}

/// A bucket pairs an identifier with a range of values. Buckets are immutable
/// once constructed.
///
/// Construction does not check that `lower <= upper`. Use [`Bucket::try_new`]
/// or [`Bucket::try_inclusive`] when that should be rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Bucket<I, T> {
    pub(crate) id: I,
    pub(crate) bounds: Bounds<T>,
}

impl<I, T: Ord> Bucket<I, T> {
    /// Create a bucket covering the half-open range `[lower, upper)`.
    pub fn new(id: I, lower: T, upper: T) -> Self {
        Self {
            id,
            bounds: Bounds::Standard { lower, upper },
        }
    }

    /// Create a bucket covering the closed range `[lower, upper]`.
    pub fn inclusive(id: I, lower: T, upper: T) -> Self {
        Self {
            id,
            bounds: Bounds::Inclusive { lower, upper },
        }
    }

    /// Create a bucket covering every value up to and including `upper`.
    pub fn below(id: I, upper: T) -> Self {
        Self {
            id,
            bounds: Bounds::Below { upper },
        }
    }

    /// Like [`Bucket::new`], but rejects a lower bound above the upper bound.
    pub fn try_new(id: I, lower: T, upper: T) -> Result<Self, BuildError> {
        Self::new(id, lower, upper).checked()
    }

    /// Like [`Bucket::inclusive`], but rejects a lower bound above the upper
    /// bound.
    pub fn try_inclusive(id: I, lower: T, upper: T) -> Result<Self, BuildError> {
        Self::inclusive(id, lower, upper).checked()
    }

    pub(crate) fn checked(self) -> Result<Self, BuildError> {
        if self.is_inverted() {
            return Err(BuildError::InvertedRange { index: 0 });
        }
        Ok(self)
    }

    pub(crate) fn is_inverted(&self) -> bool {
        match self.lower() {
            Some(lower) => lower.cmp(self.upper()) == Ordering::Greater,
            None => false,
        }
    }

    pub fn id(&self) -> &I {
        &self.id
    }

    pub fn bounds(&self) -> &Bounds<T> {
        &self.bounds
    }

    /// Returns the lower bound, or `None` for a bucket that is unbounded
    /// below. `None` orders before every bounded lower value.
    pub fn lower(&self) -> Option<&T> {
        match &self.bounds {
            Bounds::Standard { lower, .. } | Bounds::Inclusive { lower, .. } => Some(lower),
            Bounds::Below { .. } => None,
        }
    }

    pub fn upper(&self) -> &T {
        match &self.bounds {
            Bounds::Standard { upper, .. }
            | Bounds::Inclusive { upper, .. }
            | Bounds::Below { upper } => upper,
        }
    }

    /// Returns the range as a pair of std bounds, usable anywhere a
    /// `RangeBounds<T>` is accepted.
    pub fn range(&self) -> (Bound<&T>, Bound<&T>) {
        match &self.bounds {
            Bounds::Standard { lower, upper } => (Bound::Included(lower), Bound::Excluded(upper)),
            Bounds::Inclusive { lower, upper } => (Bound::Included(lower), Bound::Included(upper)),
            Bounds::Below { upper } => (Bound::Unbounded, Bound::Included(upper)),
        }
    }

    /// Returns true if the value falls within the range of this bucket.
    pub fn contains(&self, value: &T) -> bool {
        match &self.bounds {
            Bounds::Standard { lower, upper } => lower.cmp(value).is_le() && value.cmp(upper).is_lt(),
            Bounds::Inclusive { lower, upper } => lower.cmp(value).is_le() && value.cmp(upper).is_le(),
            Bounds::Below { upper } => value.cmp(upper).is_le(),
        }
    }

    /// Returns true if the upper end of this bucket reaches into `higher`.
    ///
    /// This is only meaningful when `self` sorts before `higher` by lower
    /// bound. It is not a symmetric overlap test.
    pub fn overlaps(&self, higher: &Bucket<I, T>) -> bool {
        // an unbounded lower end is below any upper bound
        let Some(lower) = higher.lower() else {
            return true;
        };

        let ordering = self.upper().cmp(lower);

        match self.bounds {
            Bounds::Inclusive { .. } => ordering.is_ge(),
            Bounds::Standard { .. } | Bounds::Below { .. } => ordering.is_gt(),
        }
    }
}

impl<I: fmt::Display, T: fmt::Display> fmt::Display for Bucket<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bounds {
            Bounds::Standard { lower, upper } | Bounds::Inclusive { lower, upper } => {
                write!(f, "{}:{}-{}", self.id, lower, upper)
            }
            Bounds::Below { upper } => write!(f, "{}: Up to {}", self.id, upper),
        }
    }
}
