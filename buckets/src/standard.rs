use crate::{Bucket, BuildError, Partition};
use log::warn;

/// Collects buckets in order and produces an immutable [`Buckets`].
pub struct Builder<I, T> {
    buckets: Vec<Bucket<I, T>>,
}

impl<I, T: Ord> Default for Builder<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, T: Ord> Builder<I, T> {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }

    /// Append a half-open `[lower, upper)` bucket.
    pub fn standard(self, id: I, lower: T, upper: T) -> Self {
        self.bucket(Bucket::new(id, lower, upper))
    }

    /// Append a closed `[lower, upper]` bucket.
    pub fn inclusive(self, id: I, lower: T, upper: T) -> Self {
        self.bucket(Bucket::inclusive(id, lower, upper))
    }

    /// Append a bucket holding every value up to and including `upper`.
    pub fn below(self, id: I, upper: T) -> Self {
        self.bucket(Bucket::below(id, upper))
    }

    /// Append an already constructed bucket.
    pub fn bucket(mut self, bucket: Bucket<I, T>) -> Self {
        self.buckets.push(bucket);
        self
    }

    /// Build the collection without any checks.
    pub fn build(self) -> Buckets<I, T> {
        Buckets::from(self.buckets)
    }

    /// Build the collection, rejecting any bucket with inverted bounds and
    /// any overlap between buckets. Positions in the returned error refer to
    /// the order in which buckets were added.
    pub fn build_checked(self) -> Result<Buckets<I, T>, BuildError> {
        if let Some(index) = self.buckets.iter().position(|b| b.is_inverted()) {
            warn!("bucket at position {index} has inverted bounds");
            return Err(BuildError::InvertedRange { index });
        }

        let overlap = self.buckets.overlaps().first().map(|o| o.positions());

        if let Some((lower, higher)) = overlap {
            warn!("bucket at position {lower} overlaps bucket at position {higher}");
            return Err(BuildError::Overlapping { lower, higher });
        }

        Ok(self.build())
    }
}

/// An immutable, owned collection of buckets.
#[derive(Clone, Debug, PartialEq)]
pub struct Buckets<I, T> {
    pub(crate) buckets: Box<[Bucket<I, T>]>,
}

impl<I, T> Buckets<I, T> {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Bucket<I, T>> {
        self.buckets.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bucket<I, T>> {
        self.buckets.iter()
    }
}

impl<I, T: Ord> Partition<I, T> for Buckets<I, T> {
    fn buckets(&self) -> &[Bucket<I, T>] {
        &self.buckets
    }
}

impl<I, T> From<Vec<Bucket<I, T>>> for Buckets<I, T> {
    fn from(buckets: Vec<Bucket<I, T>>) -> Self {
        Self {
            buckets: buckets.into(),
        }
    }
}

impl<I, T> FromIterator<Bucket<I, T>> for Buckets<I, T> {
    fn from_iter<It: IntoIterator<Item = Bucket<I, T>>>(iter: It) -> Self {
        Self {
            buckets: iter.into_iter().collect(),
        }
    }
}

impl<'a, I, T> IntoIterator for &'a Buckets<I, T> {
    type Item = &'a Bucket<I, T>;
    type IntoIter = std::slice::Iter<'a, Bucket<I, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
