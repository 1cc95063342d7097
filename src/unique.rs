//! A decorator that refuses duplicate items.

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::SamplingError;
use crate::sampling::{RandomSampling, Sample, WeightedRandomSampling};

/// Wraps a sampler and rejects any item that was already accepted.
///
/// Items are identified by `Eq + Hash`. The wrapped sampler is taken by value
/// and must not have been fed yet, so every item it ever sees passed through
/// the duplicate check.
///
/// ```
/// use reservoir_kit::{RandomSampling, SamplingError, UniqueSampling, VitterXSampling};
///
/// let inner = VitterXSampling::<&str>::with_thread_rng(10)?;
/// let mut s = UniqueSampling::new(inner)?;
/// s.feed("a")?;
/// assert_eq!(s.feed("a"), Err(SamplingError::DuplicateItem));
/// assert_eq!(s.stream_size(), 1);
/// # Ok::<(), SamplingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct UniqueSampling<T, S> {
    source: S,
    seen: HashSet<T>,
}

impl<T, S> UniqueSampling<T, S>
where
    T: Eq + Hash + Clone,
    S: RandomSampling<T>,
{
    /// Decorate `source`.
    ///
    /// Fails with [`SamplingError::AlreadyFed`] if `source` has accepted any item.
    pub fn new(source: S) -> Result<Self, SamplingError> {
        let stream_size = source.stream_size();
        if stream_size != 0 {
            return Err(SamplingError::AlreadyFed(stream_size));
        }
        Ok(Self {
            source,
            seen: HashSet::new(),
        })
    }

    /// The wrapped sampler.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    fn check_new(&self, item: &T) -> Result<(), SamplingError> {
        if self.seen.contains(item) {
            tracing::debug!(stream_size = self.source.stream_size(), "duplicate item rejected");
            return Err(SamplingError::DuplicateItem);
        }
        Ok(())
    }
}

impl<T, S> RandomSampling<T> for UniqueSampling<T, S>
where
    T: Eq + Hash + Clone,
    S: RandomSampling<T>,
{
    fn feed(&mut self, item: T) -> Result<bool, SamplingError> {
        self.check_new(&item)?;
        let key = item.clone();
        // Recorded only after the source accepts it.
        let changed = self.source.feed(item)?;
        self.seen.insert(key);
        Ok(changed)
    }

    fn sample_size(&self) -> usize {
        self.source.sample_size()
    }

    fn stream_size(&self) -> u64 {
        self.source.stream_size()
    }

    fn sample(&self) -> Sample<'_, T> {
        self.source.sample()
    }
}

impl<T, S> WeightedRandomSampling<T> for UniqueSampling<T, S>
where
    T: Eq + Hash + Clone,
    S: WeightedRandomSampling<T>,
{
    fn feed_weighted(&mut self, item: T, weight: f64) -> Result<bool, SamplingError> {
        self.check_new(&item)?;
        let key = item.clone();
        let changed = self.source.feed_weighted(item, weight)?;
        self.seen.insert(key);
        Ok(changed)
    }
}
