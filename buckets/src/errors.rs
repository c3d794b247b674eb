use thiserror::Error;

/// Errors returned by the checked construction paths. The unchecked
/// constructors never fail.
///
/// Positions count buckets in the order they were added. A single checked
/// bucket is always at position 0.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    #[error("bucket at position {index} has a lower bound above its upper bound")]
    InvertedRange { index: usize },
    #[error("bucket at position {lower} overlaps bucket at position {higher}")]
    Overlapping { lower: usize, higher: usize },
}
