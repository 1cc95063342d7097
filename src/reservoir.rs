//! Unweighted reservoir sampling.
//!
//! Maintains a uniform sample of size `k` from a stream of unknown length.
//!
//! The first `k` items fill the reservoir. After that, instead of drawing a
//! random number for every item, a [`SkipPolicy`] computes how many items to
//! *skip* before the next replacement; the replaced slot is uniform over
//! `[0, k)`. The reservoir bookkeeping is the same for every policy.
//!
//! Notes:
//! - `*_with_thread_rng` constructors are convenience wrappers and are not
//!   deterministic across processes. Pass a seeded RNG to `new` where
//!   determinism matters (tests/benches).

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::error::{check_sample_size, next_stream_size, SamplingError};
use crate::sampling::{RandomSampling, Sample};
use crate::skip::{LiL, SkipPolicy, VitterX, VitterZ, Waterman};

/// Upper bound on the slots reserved up front; larger reservoirs grow as they fill.
pub(crate) const PREALLOC_LIMIT: usize = 1024;

/// Algorithm R: one random draw per item.
pub type WatermanSampling<T, R = ThreadRng> = SkipSampler<T, Waterman, R>;
/// Algorithm X: sequential search for the skip distance.
pub type VitterXSampling<T, R = ThreadRng> = SkipSampler<T, VitterX, R>;
/// Algorithm Z: rejection sampling for the skip distance on long streams.
pub type VitterZSampling<T, R = ThreadRng> = SkipSampler<T, VitterZ, R>;
/// Algorithm L: geometric jumps.
pub type LiLSampling<T, R = ThreadRng> = SkipSampler<T, LiL, R>;

/// A reservoir sampler that keeps a uniform sample of `sample_size` items,
/// skipping stream items as directed by the policy `P`.
#[derive(Debug, Clone)]
pub struct SkipSampler<T, P, R> {
    sample_size: usize,
    stream_size: u64,
    samples: Vec<T>,
    /// Items still to discard before the next replacement.
    skip: u64,
    policy: P,
    rng: R,
}

impl<T, P: SkipPolicy + Default, R: Rng> SkipSampler<T, P, R> {
    /// Create a sampler that keeps at most `sample_size` items.
    ///
    /// Fails with [`SamplingError::InvalidSampleSize`] if `sample_size == 0`.
    pub fn new(sample_size: usize, rng: R) -> Result<Self, SamplingError> {
        Self::with_policy(sample_size, P::default(), rng)
    }
}

impl<T, P: SkipPolicy + Default> SkipSampler<T, P, ThreadRng> {
    /// Create a sampler driven by the thread-local RNG.
    pub fn with_thread_rng(sample_size: usize) -> Result<Self, SamplingError> {
        Self::new(sample_size, rand::rng())
    }
}

impl<T, P: SkipPolicy, R: Rng> SkipSampler<T, P, R> {
    /// Create a sampler with an explicitly configured policy, e.g.
    /// [`VitterZ::with_threshold`].
    pub fn with_policy(sample_size: usize, policy: P, rng: R) -> Result<Self, SamplingError> {
        check_sample_size(sample_size)?;
        tracing::debug!(sample_size, policy = std::any::type_name::<P>(), "new reservoir");
        Ok(Self {
            sample_size,
            stream_size: 0,
            samples: Vec::with_capacity(sample_size.min(PREALLOC_LIMIT)),
            skip: 0,
            policy,
            rng,
        })
    }

    /// Whether the fill phase is over.
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.sample_size
    }

    /// The skip policy, with whatever state it carries.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Consume the sampler and return the sample.
    pub fn into_sample(self) -> Vec<T> {
        self.samples
    }

    fn next_skip(&mut self) -> u64 {
        self.policy
            .skip_length(self.stream_size, self.sample_size, &mut self.rng)
    }
}

impl<T, P: SkipPolicy, R: Rng> RandomSampling<T> for SkipSampler<T, P, R> {
    fn feed(&mut self, item: T) -> Result<bool, SamplingError> {
        let next = next_stream_size(self.stream_size)?;

        // Phase 1: filling the reservoir
        if self.samples.len() < self.sample_size {
            self.samples.push(item);
            self.stream_size = next;
            if self.is_full() {
                self.skip = self.next_skip();
                tracing::trace!(
                    stream_size = self.stream_size,
                    skip = self.skip,
                    "reservoir full"
                );
            }
            return Ok(true);
        }

        // Phase 2: skip items
        if self.skip > 0 {
            self.skip -= 1;
            self.stream_size = next;
            return Ok(false);
        }

        // Skip counter hit 0: replace a uniformly chosen slot
        let replace_idx = self.rng.random_range(0..self.sample_size);
        self.samples[replace_idx] = item;
        self.stream_size = next;
        self.skip = self.next_skip();
        Ok(true)
    }

    fn sample_size(&self) -> usize {
        self.sample_size
    }

    fn stream_size(&self) -> u64 {
        self.stream_size
    }

    fn sample(&self) -> Sample<'_, T> {
        self.samples.iter().collect()
    }
}
