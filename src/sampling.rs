//! The sampling contract shared by every algorithm.
//!
//! An algorithm accepts items one at a time, counts them, and keeps a sample of
//! at most `sample_size()` of them. Batch feeds are plain loops over the
//! single-item feed and stop at the first error.

use crate::error::SamplingError;

/// An online random sampling algorithm over items of type `T`.
pub trait RandomSampling<T> {
    /// Feed one item from the stream.
    ///
    /// Returns `true` if the item entered the sample. On error nothing changes.
    fn feed(&mut self, item: T) -> Result<bool, SamplingError>;

    /// Feed every item of `items`, in order, stopping at the first error.
    ///
    /// Returns `true` if any item entered the sample.
    fn feed_all<I>(&mut self, items: I) -> Result<bool, SamplingError>
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        let mut changed = false;
        for item in items {
            changed |= self.feed(item)?;
        }
        Ok(changed)
    }

    /// Feed an item that may be absent, failing with [`SamplingError::NullItem`]
    /// if it is.
    fn feed_option(&mut self, item: Option<T>) -> Result<bool, SamplingError> {
        match item {
            Some(item) => self.feed(item),
            None => Err(SamplingError::NullItem),
        }
    }

    /// The configured sample size `k`.
    fn sample_size(&self) -> usize;

    /// Number of items accepted so far.
    fn stream_size(&self) -> u64;

    /// The current sample, of length `min(stream_size, sample_size)`.
    fn sample(&self) -> Sample<'_, T>;
}

/// A sampling algorithm where each item carries a weight.
///
/// A larger weight means a larger probability of being included. Plain
/// [`RandomSampling::feed`] uses weight `1.0`.
pub trait WeightedRandomSampling<T>: RandomSampling<T> {
    /// Feed one item with its weight.
    fn feed_weighted(&mut self, item: T, weight: f64) -> Result<bool, SamplingError>;

    /// Feed items with the weight at the same position in `weights`.
    ///
    /// Pairs are fed while both sequences yield. If one is longer the call
    /// fails with [`SamplingError::SizeMismatch`]; the common prefix has
    /// already been fed at that point.
    fn feed_weighted_all<I, W>(&mut self, items: I, weights: W) -> Result<bool, SamplingError>
    where
        I: IntoIterator<Item = T>,
        W: IntoIterator<Item = f64>,
        Self: Sized,
    {
        let mut items = items.into_iter();
        let mut weights = weights.into_iter();
        let mut changed = false;
        loop {
            match (items.next(), weights.next()) {
                (Some(item), Some(weight)) => changed |= self.feed_weighted(item, weight)?,
                (None, None) => return Ok(changed),
                _ => return Err(SamplingError::SizeMismatch),
            }
        }
    }

    /// Feed `(item, weight)` pairs, e.g. the entries of a map.
    fn feed_weighted_pairs<I>(&mut self, pairs: I) -> Result<bool, SamplingError>
    where
        I: IntoIterator<Item = (T, f64)>,
        Self: Sized,
    {
        let mut changed = false;
        for (item, weight) in pairs {
            changed |= self.feed_weighted(item, weight)?;
        }
        Ok(changed)
    }
}

/// A read-only, unordered view of a sampler's current sample.
///
/// The view borrows the sampler, so it cannot outlive or observe later feeds.
/// Use [`Sample::to_vec`] for an owned snapshot.
#[derive(Debug, Clone)]
pub struct Sample<'a, T> {
    items: Vec<&'a T>,
}

impl<'a, T> Sample<'a, T> {
    /// Number of sampled items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been sampled yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the sampled items.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.items.iter().copied()
    }

    /// Whether `item` is in the sample.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.iter().any(|&x| x == item)
    }

    /// Clone the sampled items into an owned vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.iter().map(|&x| x.clone()).collect()
    }
}

impl<'a, T> FromIterator<&'a T> for Sample<'a, T> {
    fn from_iter<I: IntoIterator<Item = &'a T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for Sample<'a, T> {
    type Item = &'a T;
    type IntoIter = std::vec::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'s, 'a, T> IntoIterator for &'s Sample<'a, T> {
    type Item = &'a T;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, &'a T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Keeps everything; enough to exercise the provided methods.
    #[derive(Default)]
    struct KeepAll {
        items: Vec<u32>,
        weights: Vec<f64>,
    }

    impl RandomSampling<u32> for KeepAll {
        fn feed(&mut self, item: u32) -> Result<bool, SamplingError> {
            self.feed_weighted(item, 1.0)
        }

        fn sample_size(&self) -> usize {
            usize::MAX
        }

        fn stream_size(&self) -> u64 {
            self.items.len() as u64
        }

        fn sample(&self) -> Sample<'_, u32> {
            self.items.iter().collect()
        }
    }

    impl WeightedRandomSampling<u32> for KeepAll {
        fn feed_weighted(&mut self, item: u32, weight: f64) -> Result<bool, SamplingError> {
            crate::error::check_weight(weight)?;
            self.items.push(item);
            self.weights.push(weight);
            Ok(true)
        }
    }

    #[test]
    fn feed_all_stops_at_first_error() {
        let mut s = KeepAll::default();
        let err = s
            .feed_weighted_pairs([(1, 1.0), (2, -1.0), (3, 1.0)])
            .expect_err("negative weight");
        assert_eq!(err, SamplingError::NonPositiveWeight(-1.0));
        assert_eq!(s.sample().to_vec(), vec![1]);
    }

    #[test]
    fn feed_weighted_all_size_mismatch() {
        let mut s = KeepAll::default();
        let err = s
            .feed_weighted_all([1, 2, 3], [1.0, 2.0])
            .expect_err("length mismatch");
        assert_eq!(err, SamplingError::SizeMismatch);
        assert_eq!(s.stream_size(), 2);

        let mut s = KeepAll::default();
        let err = s
            .feed_weighted_all([1], [1.0, 2.0, 3.0])
            .expect_err("length mismatch");
        assert_eq!(err, SamplingError::SizeMismatch);
        assert_eq!(s.weights, vec![1.0]);
    }

    #[test]
    fn feed_option_rejects_none() {
        let mut s = KeepAll::default();
        assert_eq!(s.feed_option(None), Err(SamplingError::NullItem));
        assert_eq!(s.feed_option(Some(7)), Ok(true));
        assert_eq!(s.stream_size(), 1);
    }

    #[test]
    fn sample_view() {
        let mut s = KeepAll::default();
        s.feed_all([4, 5, 6]).expect("feed");
        let view = s.sample();
        assert_eq!(view.len(), 3);
        assert!(view.contains(&5));
        assert!(!view.contains(&7));
        let sum: u32 = (&view).into_iter().sum();
        assert_eq!(sum, 15);
        assert_eq!(view.iter().count(), 3);
    }
}
