use crate::Bucket;
use core::fmt;

/// A pair of buckets whose ranges overlap. `lower` sorts before `higher` by
/// lower bound.
#[derive(Debug, PartialEq)]
pub struct Overlap<'a, I, T> {
    pub(crate) lower: &'a Bucket<I, T>,
    pub(crate) higher: &'a Bucket<I, T>,
    pub(crate) positions: (usize, usize),
}

impl<'a, I, T> Overlap<'a, I, T> {
    pub fn lower(&self) -> &'a Bucket<I, T> {
        self.lower
    }

    pub fn higher(&self) -> &'a Bucket<I, T> {
        self.higher
    }

    /// Returns the positions of the lower and higher bucket within the
    /// collection that was checked.
    pub fn positions(&self) -> (usize, usize) {
        self.positions
    }
}

impl<I: fmt::Display, T: fmt::Display> fmt::Display for Overlap<'_, I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bucket [{}] overlaps bucket [{}]", self.lower, self.higher)
    }
}
