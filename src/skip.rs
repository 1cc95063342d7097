//! Skip-distance policies for unweighted reservoir sampling.
//!
//! Once the reservoir is full, a policy decides how many of the following
//! items are discarded before the next one replaces a random slot. Every
//! policy here produces the same distribution (each of the first `n` items is
//! in the sample with probability `k / n`); they differ in how many random
//! variates and loop iterations they spend.
//!
//! ## References
//!
//! - Vitter (1985), *Random Sampling with a Reservoir*: Algorithms R, X and Z.
//! - Li (1994), *Reservoir-Sampling Algorithms of Time Complexity
//!   O(n(1 + log(N/n)))*: Algorithm L.

use rand::distr::Open01;
use rand::Rng;

/// Computes skip distances for [`SkipSampler`](crate::SkipSampler).
pub trait SkipPolicy {
    /// Number of items to discard after `stream_size` items have been seen,
    /// before the next one replaces a slot of a reservoir of `sample_size`.
    ///
    /// Called when the reservoir first fills and after every replacement.
    fn skip_length<R: Rng + ?Sized>(
        &mut self,
        stream_size: u64,
        sample_size: usize,
        rng: &mut R,
    ) -> u64;
}

/// Algorithm R, attributed by Vitter to Waterman.
///
/// One uniform integer draw per stream item: item number `t` is taken with
/// probability `k / t`. The baseline against which the others are checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct Waterman;

impl SkipPolicy for Waterman {
    fn skip_length<R: Rng + ?Sized>(
        &mut self,
        stream_size: u64,
        sample_size: usize,
        rng: &mut R,
    ) -> u64 {
        let k = sample_size as u64;
        let mut current = stream_size.saturating_add(1);
        let mut gamma = 0u64;
        while current < u64::MAX && rng.random_range(0..current) >= k {
            gamma += 1;
            current += 1;
        }
        gamma
    }
}

/// Algorithm X: sequential search for the skip distance.
///
/// One uniform variate per call. The loop runs once per skipped item, so it
/// slows down once the stream is much longer than the sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct VitterX;

impl SkipPolicy for VitterX {
    fn skip_length<R: Rng + ?Sized>(
        &mut self,
        stream_size: u64,
        sample_size: usize,
        rng: &mut R,
    ) -> u64 {
        let k = sample_size as f64;
        let mut current = stream_size.wrapping_add(1);

        let r: f64 = rng.random();
        let mut gamma = 0u64;

        // `quot` is the probability that the next `gamma + 1` items are all
        // skipped. It underflows for very long streams; that is tolerated.
        let mut quot = (current as f64 - k) / current as f64;
        while quot > r && current > 0 {
            gamma += 1;
            current = current.wrapping_add(1);
            quot = (quot * (current as f64 - k)) / current as f64;
        }

        gamma
    }
}

/// Stream-to-sample ratio below which [`VitterZ`] falls back to Algorithm X.
pub const VITTER_Z_THRESHOLD: u64 = 22;

/// Algorithm Z: acceptance/rejection for the skip distance.
///
/// Uses Algorithm X while `stream_size <= threshold * sample_size`, where X is
/// cheaper. Beyond that, draws a candidate skip from a continuous envelope and
/// accepts or rejects it with a squeeze test, so the expected cost per call
/// is constant.
#[derive(Debug, Clone, Copy)]
pub struct VitterZ {
    threshold: u64,
    /// Envelope parameter carried between calls, drawn lazily.
    w: Option<f64>,
}

impl Default for VitterZ {
    fn default() -> Self {
        Self::with_threshold(VITTER_Z_THRESHOLD)
    }
}

impl VitterZ {
    /// Switch to rejection sampling once `stream_size > threshold * sample_size`.
    pub fn with_threshold(threshold: u64) -> Self {
        Self { threshold, w: None }
    }

    /// Stream-to-sample ratio above which rejection sampling takes over.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    fn draw_w<R: Rng + ?Sized>(rng: &mut R, n: f64) -> f64 {
        let u: f64 = rng.sample(Open01);
        (-u.ln() / n).exp()
    }
}

impl SkipPolicy for VitterZ {
    fn skip_length<R: Rng + ?Sized>(
        &mut self,
        stream_size: u64,
        sample_size: usize,
        rng: &mut R,
    ) -> u64 {
        if stream_size <= self.threshold.saturating_mul(sample_size as u64) {
            return VitterX.skip_length(stream_size, sample_size, rng);
        }

        let n = sample_size as f64;
        let t = stream_size as f64;
        let term = t - n + 1.0;
        let mut w = match self.w {
            Some(w) => w,
            None => Self::draw_w(rng, n),
        };

        loop {
            let u: f64 = rng.sample(Open01);
            let x = t * (w - 1.0);
            let s = x.floor();

            // U <= h(S) / cg(X)
            let lhs = ((u * ((t + 1.0) / term).powi(2) * (term + s) / (t + x)).ln() / n).exp();
            let rhs = (((t + x) / (term + s)) * term) / t;
            if lhs <= rhs {
                self.w = Some(rhs / lhs);
                return s as u64;
            }

            // U <= f(S) / cg(X)
            let mut y = (((u * (t + 1.0)) / term) * (t + s + 1.0)) / (t + x);
            let (mut denom, numer_lim) = if n < s {
                (t, term + s)
            } else {
                (t - n + s, t + 1.0)
            };
            let mut numer = t + s;
            while numer >= numer_lim {
                y = (y * numer) / denom;
                denom -= 1.0;
                numer -= 1.0;
            }

            w = Self::draw_w(rng, n);
            if (y.ln() / n).exp() <= (t + x) / t {
                self.w = Some(w);
                return s as u64;
            }
        }
    }
}

/// Algorithm L: geometric jumps driven by a shrinking acceptance weight.
///
/// Two uniform variates per replacement, independent of how many items are
/// skipped.
#[derive(Debug, Clone, Copy)]
pub struct LiL {
    /// `ln(W)`; `W` itself underflows or rounds to 1 at the extremes.
    log_w: f64,
}

impl Default for LiL {
    fn default() -> Self {
        Self { log_w: 0.0 }
    }
}

impl LiL {
    /// `ln(1 - W)`, accurate for `W` near 0 and near 1.
    fn ln_one_minus_w(&self) -> f64 {
        if self.log_w < -std::f64::consts::LN_2 {
            (-self.log_w.exp()).ln_1p()
        } else {
            (-self.log_w.exp_m1()).ln()
        }
    }
}

impl SkipPolicy for LiL {
    fn skip_length<R: Rng + ?Sized>(
        &mut self,
        _stream_size: u64,
        sample_size: usize,
        rng: &mut R,
    ) -> u64 {
        // W <- W * exp(log(U) / k); the first call yields the initial W.
        let u: f64 = rng.sample(Open01);
        self.log_w += u.ln() / sample_size as f64;

        // S = floor(log(U) / log(1 - W)), saturating on the float-to-int cast.
        let u: f64 = rng.sample(Open01);
        (u.ln() / self.ln_one_minus_w()).floor() as u64
    }
}
