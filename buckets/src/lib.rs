//! This crate classifies values of an ordered type into labeled ranges, or
//! buckets. Each bucket carries an identifier and one of three boundary
//! semantics:
//!
//! * `Standard` - half-open `[lower, upper)`
//! * `Inclusive` - closed `[lower, upper]`
//! * `Below` - everything up to and including `upper`
//!
//! A collection of buckets is expected to be non-overlapping. This is not
//! enforced on construction, instead [`Partition::validate`] and
//! [`Partition::overlaps`] check a collection on demand. [`Builder`] offers a
//! checked construction path for callers that want the guarantee up front.
//!
//! ```
//! use buckets::{Bucket, Partition};
//!
//! let buckets = [
//!     Bucket::below(1, 10),
//!     Bucket::new(2, 10, 20),
//!     Bucket::new(3, 20, 30),
//!     Bucket::new(4, 30, 40),
//! ];
//!
//! assert_eq!(buckets.which(&25).map(|b| *b.id()), Some(3));
//! assert!(buckets.which(&45).is_none());
//! assert!(buckets.validate());
//! ```

mod bucket;
mod errors;
mod overlap;
mod standard;

pub use bucket::{Bounds, Bucket};
pub use errors::BuildError;
pub use overlap::Overlap;
pub use standard::{Buckets, Builder};

use core::borrow::Borrow;
use core::fmt;
use std::io;

use log::debug;

/// Operations over an ordered collection of buckets. Implementors only need to
/// expose the buckets as a slice.
pub trait Partition<I, T: Ord> {
    fn buckets(&self) -> &[Bucket<I, T>];

    /// Returns the first bucket, in iteration order, which contains the value.
    /// `None` means the value is outside of every bucket.
    ///
    /// This is a linear scan. If buckets overlap, the earliest one wins.
    fn which(&self, value: &T) -> Option<&Bucket<I, T>> {
        self.buckets().iter().find(|bucket| bucket.contains(value))
    }

    /// Returns every overlapping pair of buckets.
    ///
    /// Buckets are stably sorted by lower bound and only neighbors in that
    /// order are compared, which assumes upper bounds increase along with
    /// lower bounds.
    fn overlaps(&self) -> Vec<Overlap<'_, I, T>> {
        let buckets = self.buckets();

        let mut order: Vec<usize> = (0..buckets.len()).collect();
        order.sort_by(|a, b| buckets[*a].lower().cmp(&buckets[*b].lower()));

        let mut result = Vec::new();

        for pair in order.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);

            if buckets[lower].overlaps(&buckets[higher]) {
                debug!("bucket at position {lower} overlaps bucket at position {higher}");
                result.push(Overlap {
                    lower: &buckets[lower],
                    higher: &buckets[higher],
                    positions: (lower, higher),
                });
            }
        }

        result
    }

    /// Returns true if no two buckets overlap. An empty collection is valid.
    fn validate(&self) -> bool {
        self.overlaps().is_empty()
    }

    /// Like [`Partition::validate`], but also writes one line for each
    /// overlapping pair to the provided writer. Only errors from the writer
    /// are returned.
    fn validate_to<W>(&self, writer: &mut W) -> io::Result<bool>
    where
        W: io::Write + ?Sized,
        I: fmt::Display,
        T: fmt::Display,
    {
        let overlaps = self.overlaps();

        for overlap in &overlaps {
            writeln!(writer, "{overlap}")?;
        }

        Ok(overlaps.is_empty())
    }

    /// Classifies each value and counts the values per bucket. Groups appear
    /// in the order in which they were first seen. Values outside of every
    /// bucket are counted under `None`.
    fn tally<V>(&self, values: V) -> Vec<(Option<&Bucket<I, T>>, u64)>
    where
        V: IntoIterator,
        V::Item: Borrow<T>,
    {
        let buckets = self.buckets();

        // slot for each bucket, plus a trailing slot for unmatched values
        let mut slots: Vec<Option<usize>> = vec![None; buckets.len() + 1];
        let mut result: Vec<(Option<&Bucket<I, T>>, u64)> = Vec::new();

        for value in values {
            let index = buckets
                .iter()
                .position(|bucket| bucket.contains(value.borrow()));
            let slot = index.unwrap_or(buckets.len());

            match slots[slot] {
                Some(group) => result[group].1 += 1,
                None => {
                    slots[slot] = Some(result.len());
                    result.push((index.map(|i| &buckets[i]), 1));
                }
            }
        }

        result
    }
}

impl<I, T: Ord> Partition<I, T> for [Bucket<I, T>] {
    fn buckets(&self) -> &[Bucket<I, T>] {
        self
    }
}

impl<I, T: Ord, const N: usize> Partition<I, T> for [Bucket<I, T>; N] {
    fn buckets(&self) -> &[Bucket<I, T>] {
        self
    }
}

impl<I, T: Ord> Partition<I, T> for Vec<Bucket<I, T>> {
    fn buckets(&self) -> &[Bucket<I, T>] {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn scenario() -> [Bucket<i32, i32>; 4] {
        [
            Bucket::below(1, 10),
            Bucket::new(2, 10, 20),
            Bucket::new(3, 20, 30),
            Bucket::new(4, 30, 40),
        ]
    }

    #[test]
    fn which() {
        let buckets = scenario();
        assert_eq!(buckets.which(&25), Some(&Bucket::new(3, 20, 30)));
        // 10 is claimed by both the first and second bucket, the first wins.
        // validate() still accepts this because `Below` overlaps with a
        // strict comparison.
        assert_eq!(buckets.which(&10).map(|b| *b.id()), Some(1));
        assert_eq!(buckets.which(&11).map(|b| *b.id()), Some(2));
        assert!(buckets.validate());
        assert_eq!(buckets.which(&-50).map(|b| *b.id()), Some(1));
        assert_eq!(buckets.which(&39).map(|b| *b.id()), Some(4));
        assert_eq!(buckets.which(&40), None);
        assert_eq!(buckets.which(&45), None);
    }

    #[test]
    // Overlapping buckets resolve to whichever comes first
    fn which_first_match() {
        let buckets = vec![Bucket::new(1, 0, 15), Bucket::new(2, 10, 20)];
        assert_eq!(buckets.which(&12).map(|b| *b.id()), Some(1));

        let buckets = vec![Bucket::new(2, 10, 20), Bucket::new(1, 0, 15)];
        assert_eq!(buckets.which(&12).map(|b| *b.id()), Some(2));
    }

    #[test]
    fn which_is_idempotent() {
        let buckets = scenario();
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let value = rng.gen_range(-10..50);
            let first = buckets.which(&value);
            for _ in 0..3 {
                assert_eq!(buckets.which(&value), first);
            }
        }
    }

    #[test]
    fn which_empty() {
        let buckets: Vec<Bucket<u8, u64>> = Vec::new();
        assert_eq!(buckets.which(&0), None);
    }

    #[test]
    fn validate_empty() {
        let buckets: Vec<Bucket<u8, u64>> = Vec::new();
        assert!(buckets.validate());
        assert!(buckets.overlaps().is_empty());

        let mut report = Vec::new();
        assert!(buckets.validate_to(&mut report).unwrap());
        assert!(report.is_empty());
    }

    struct FailingWriter;

    impl io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    // Errors from the report writer are returned to the caller
    fn validate_to_writer_error() {
        let buckets = [Bucket::new(1, 0, 15), Bucket::new(2, 10, 20)];
        let result = buckets.validate_to(&mut FailingWriter);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::Other);

        // nothing is written for a valid partition, so the writer is unused
        let buckets = [Bucket::new(1, 0, 10), Bucket::new(2, 10, 20)];
        assert!(buckets.validate_to(&mut FailingWriter).unwrap());
    }

    #[test]
    fn validate_single() {
        let buckets = [Bucket::inclusive(1, 20, 10)];
        assert!(buckets.validate());
    }

    #[test]
    fn validate_touching() {
        let buckets = [
            Bucket::below(1, 10),
            Bucket::new(2, 10, 20),
            Bucket::new(3, 20, 30),
        ];
        assert!(buckets.validate());

        // order of the collection does not matter
        let buckets = [
            Bucket::new(3, 20, 30),
            Bucket::below(1, 10),
            Bucket::new(2, 10, 20),
        ];
        assert!(buckets.validate());
    }

    #[test]
    fn validate_overlapping() {
        let buckets = [Bucket::new(1, 0, 15), Bucket::new(2, 10, 20)];
        assert!(!buckets.validate());

        let overlaps = buckets.overlaps();
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].lower().id(), &1);
        assert_eq!(overlaps[0].higher().id(), &2);
        assert_eq!(overlaps[0].positions(), (0, 1));

        let mut report = Vec::new();
        assert!(!buckets.validate_to(&mut report).unwrap());
        assert_eq!(
            String::from_utf8(report).unwrap(),
            "Bucket [1:0-15] overlaps bucket [2:10-20]\n"
        );
    }

    #[test]
    fn validate_inclusive() {
        let buckets = [
            Bucket::inclusive(1, 0, 9),
            Bucket::inclusive(2, 10, 19),
            Bucket::new(3, 20, 30),
            Bucket::inclusive(4, 30, 39),
        ];
        assert!(buckets.validate());

        let buckets = [Bucket::inclusive(1, 0, 10), Bucket::new(2, 10, 20)];
        assert!(!buckets.validate());
    }

    #[test]
    // Reports every adjacent overlap, not just the first
    fn validate_reports_all() {
        let buckets = [
            Bucket::new("c", 20, 35),
            Bucket::new("a", 0, 15),
            Bucket::new("b", 10, 25),
            Bucket::new("d", 40, 50),
        ];

        let mut report = Vec::new();
        assert!(!buckets.validate_to(&mut report).unwrap());
        assert_eq!(
            String::from_utf8(report).unwrap(),
            "Bucket [a:0-15] overlaps bucket [b:10-25]\n\
             Bucket [b:10-25] overlaps bucket [c:20-35]\n"
        );

        let positions: Vec<(usize, usize)> =
            buckets.overlaps().iter().map(|o| o.positions()).collect();
        assert_eq!(positions, vec![(1, 2), (2, 0)]);
    }

    #[test]
    fn validate_two_below() {
        let buckets = [Bucket::below(1, 10), Bucket::below(2, 20)];
        assert!(!buckets.validate());
    }

    #[test]
    fn validate_dates() {
        // days since epoch, partitioned into age ranges
        let buckets = [
            Bucket::new("180+", 100, 280),
            Bucket::new("180-91", 280, 370),
            Bucket::new("90-31", 370, 430),
            Bucket::new("last month", 400, 461),
        ];

        let mut report = Vec::new();
        assert!(!buckets.validate_to(&mut report).unwrap());
        assert_eq!(
            String::from_utf8(report).unwrap(),
            "Bucket [90-31:370-430] overlaps bucket [last month:400-461]\n"
        );
    }

    #[test]
    fn tally() {
        let buckets = scenario();
        let counts = buckets.tally([25, 5, 26, 45, 5, 5, -3, 39]);
        let counts: Vec<(Option<i32>, u64)> = counts
            .into_iter()
            .map(|(bucket, count)| (bucket.map(|b| *b.id()), count))
            .collect();
        assert_eq!(
            counts,
            vec![(Some(3), 2), (Some(1), 4), (None, 1), (Some(4), 1)]
        );
    }

    #[test]
    // Every randomly drawn value is counted exactly once
    fn tally_random() {
        let buckets = scenario();
        let mut rng = rand::thread_rng();
        let values: Vec<i32> = (0..100_000).map(|_| rng.gen_range(0..40)).collect();

        let counts = buckets.tally(&values);
        assert_eq!(counts.iter().map(|(_, c)| c).sum::<u64>(), 100_000);
        assert!(counts.iter().all(|(bucket, _)| bucket.is_some()));
        assert!(counts.len() <= 4);

        for (bucket, count) in counts {
            let bucket = bucket.unwrap();
            let expected = values
                .iter()
                .filter(|v| buckets.which(*v).map(|b| b.id()) == Some(bucket.id()))
                .count() as u64;
            assert_eq!(count, expected);
        }
    }
}
