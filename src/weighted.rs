//! Weighted reservoir sampling (Efraimidis & Spirakis, 2006, A-Res).
//!
//! Each item with weight `w_i` gets a key `u^(1/w_i)` where `u ~ Uniform(0,1)`,
//! and the sampler keeps the `k` largest keys. Larger weights push the key
//! toward 1, so an item's inclusion probability grows with its weight relative
//! to the other weights seen, without knowing the stream length or the total
//! weight in advance.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rand::distr::Open01;
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::error::{check_sample_size, check_weight, next_stream_size, SamplingError};
use crate::reservoir::PREALLOC_LIMIT;
use crate::sampling::{RandomSampling, Sample, WeightedRandomSampling};

/// An item with the log of its reservoir key, ordered by that only.
///
/// `ln(u) / w` orders items exactly like `u^(1/w)` but stays distinct for
/// small weights, where `u^(1/w)` underflows to 0.
#[derive(Debug, Clone)]
struct Keyed<T> {
    log_key: f64,
    item: T,
}

impl<T> PartialEq for Keyed<T> {
    fn eq(&self, other: &Self) -> bool {
        self.log_key.total_cmp(&other.log_key) == Ordering::Equal
    }
}

impl<T> Eq for Keyed<T> {}

impl<T> PartialOrd for Keyed<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Keyed<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.log_key.total_cmp(&other.log_key)
    }
}

/// A weighted reservoir sampler (Efraimidis–Spirakis, A-Res).
///
/// Weights must be finite and strictly positive. Unweighted
/// [`feed`](RandomSampling::feed) uses weight `1.0`, which reduces to uniform
/// sampling.
#[derive(Debug, Clone)]
pub struct EfraimidisSampling<T, R = ThreadRng> {
    sample_size: usize,
    stream_size: u64,
    /// Min-heap on key: the root is the first pair to evict.
    heap: BinaryHeap<Reverse<Keyed<T>>>,
    rng: R,
}

impl<T> EfraimidisSampling<T, ThreadRng> {
    /// Create a sampler driven by the thread-local RNG.
    pub fn with_thread_rng(sample_size: usize) -> Result<Self, SamplingError> {
        Self::new(sample_size, rand::rng())
    }
}

impl<T, R: Rng> EfraimidisSampling<T, R> {
    /// Create a sampler that keeps at most `sample_size` items.
    pub fn new(sample_size: usize, rng: R) -> Result<Self, SamplingError> {
        check_sample_size(sample_size)?;
        tracing::debug!(sample_size, "new weighted reservoir");
        Ok(Self {
            sample_size,
            stream_size: 0,
            heap: BinaryHeap::with_capacity(sample_size.min(PREALLOC_LIMIT)),
            rng,
        })
    }

    /// Keys `u^(1/w)` of the retained items, for diagnostics. Unordered.
    ///
    /// May read 0 for very small weights; ordering uses the log-key.
    pub fn keys(&self) -> impl Iterator<Item = f64> + '_ {
        self.heap.iter().map(|Reverse(e)| e.log_key.exp())
    }

    /// Smallest retained log-key `ln(u) / w`, i.e. the bar a new item must
    /// clear once the sampler is full.
    pub fn min_log_key(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(e)| e.log_key)
    }

    /// Consume the sampler and return the sample.
    pub fn into_sample(self) -> Vec<T> {
        self.heap.into_iter().map(|Reverse(e)| e.item).collect()
    }
}

impl<T, R: Rng> RandomSampling<T> for EfraimidisSampling<T, R> {
    fn feed(&mut self, item: T) -> Result<bool, SamplingError> {
        self.feed_weighted(item, 1.0)
    }

    fn sample_size(&self) -> usize {
        self.sample_size
    }

    fn stream_size(&self) -> u64 {
        self.stream_size
    }

    fn sample(&self) -> Sample<'_, T> {
        self.heap.iter().map(|Reverse(e)| &e.item).collect()
    }
}

impl<T, R: Rng> WeightedRandomSampling<T> for EfraimidisSampling<T, R> {
    fn feed_weighted(&mut self, item: T, weight: f64) -> Result<bool, SamplingError> {
        check_weight(weight)?;
        let next = next_stream_size(self.stream_size)?;

        let u: f64 = self.rng.sample(Open01);
        let log_key = u.ln() / weight;
        self.stream_size = next;

        if self.heap.len() < self.sample_size {
            self.heap.push(Reverse(Keyed { log_key, item }));
            return Ok(true);
        }

        if let Some(mut min) = self.heap.peek_mut() {
            if log_key > min.0.log_key {
                // Re-sifts when `min` is dropped.
                *min = Reverse(Keyed { log_key, item });
                return Ok(true);
            }
        }
        Ok(false)
    }
}
