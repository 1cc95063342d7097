//! `reservoir-kit`: online reservoir sampling.
//!
//! Draws a fixed-size random sample from a stream whose length is not known in
//! advance, in one pass and O(k) memory. Items may carry weights, in which case
//! a larger weight means a larger inclusion probability.
//!
//! Exposed modules:
//! - `sampling`: the [`RandomSampling`] / [`WeightedRandomSampling`] contract and the [`Sample`] view.
//! - `reservoir`: unweighted skip-based reservoir ([`SkipSampler`]) and its aliases.
//! - `skip`: skip-distance policies (Algorithms R, X, Z and L).
//! - `weighted`: weighted reservoir sampling (Efraimidis–Spirakis A-Res).
//! - `unique`: a decorator that rejects duplicate items.
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use reservoir_kit::{RandomSampling, VitterZSampling};
//!
//! let mut s = VitterZSampling::new(10, ChaCha8Rng::seed_from_u64(7))?;
//! s.feed_all(0..1_000_000u32)?;
//! assert_eq!(s.sample().len(), 10);
//! assert_eq!(s.stream_size(), 1_000_000);
//! # Ok::<(), reservoir_kit::SamplingError>(())
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod reservoir;
pub mod sampling;
pub mod skip;
pub mod unique;
pub mod weighted;

#[cfg(test)]
mod test_util;

pub use error::{ErrorKind, SamplingError};
pub use reservoir::{LiLSampling, SkipSampler, VitterXSampling, VitterZSampling, WatermanSampling};
pub use sampling::{RandomSampling, Sample, WeightedRandomSampling};
pub use skip::{LiL, SkipPolicy, VitterX, VitterZ, Waterman};
pub use unique::UniqueSampling;
pub use weighted::EfraimidisSampling;
