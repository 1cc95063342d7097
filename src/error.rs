//! Errors shared by every sampling algorithm.

use thiserror::Error;

/// Coarse classification of a [`SamplingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid construction parameters or batch input shape.
    IllegalArgument,
    /// A required item was absent.
    NullItem,
    /// A weight outside the algorithm's domain.
    IllegalWeight,
    /// The stream counter cannot advance any further.
    StreamOverflow,
    /// An item was fed twice through a [`UniqueSampling`](crate::UniqueSampling).
    DuplicateItem,
}

/// Errors returned by sampling algorithms.
///
/// A failed call never mutates the sampler: the stream counter and the sample
/// are exactly what they were before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplingError {
    #[error("sample size must be at least 1 (got {0})")]
    InvalidSampleSize(usize),

    #[error("sampler has already been fed {0} items")]
    AlreadyFed(u64),

    #[error("items and weights size mismatch")]
    SizeMismatch,

    #[error("item is absent")]
    NullItem,

    #[error("weight must be finite (got {0})")]
    NonFiniteWeight(f64),

    #[error("weight must be > 0 (got {0})")]
    NonPositiveWeight(f64),

    #[error("stream size overflow")]
    StreamOverflow,

    #[error("item has already been fed")]
    DuplicateItem,
}

impl SamplingError {
    /// The broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        use SamplingError::*;
        match self {
            InvalidSampleSize(_) | AlreadyFed(_) | SizeMismatch => ErrorKind::IllegalArgument,
            NullItem => ErrorKind::NullItem,
            NonFiniteWeight(_) | NonPositiveWeight(_) => ErrorKind::IllegalWeight,
            StreamOverflow => ErrorKind::StreamOverflow,
            DuplicateItem => ErrorKind::DuplicateItem,
        }
    }
}

/// Reject sample sizes below 1.
pub(crate) fn check_sample_size(sample_size: usize) -> Result<(), SamplingError> {
    if sample_size == 0 {
        return Err(SamplingError::InvalidSampleSize(sample_size));
    }
    Ok(())
}

/// Reject weights that are NaN, infinite, zero or negative.
pub(crate) fn check_weight(weight: f64) -> Result<(), SamplingError> {
    if !weight.is_finite() {
        return Err(SamplingError::NonFiniteWeight(weight));
    }
    if weight <= 0.0 {
        return Err(SamplingError::NonPositiveWeight(weight));
    }
    Ok(())
}

/// The stream size after accepting one more item.
pub(crate) fn next_stream_size(stream_size: u64) -> Result<u64, SamplingError> {
    stream_size.checked_add(1).ok_or_else(|| {
        tracing::warn!(stream_size, "stream counter cannot advance");
        SamplingError::StreamOverflow
    })
}
