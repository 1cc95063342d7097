//! Statistical checks that every algorithm samples with the right distribution.
//!
//! Seeds are fixed, so these are deterministic; tolerances are several
//! standard deviations wide.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reservoir_kit::{
    EfraimidisSampling, LiLSampling, RandomSampling, SamplingError, VitterXSampling,
    VitterZSampling, WatermanSampling, WeightedRandomSampling,
};

const STREAM: usize = 20;
const SAMPLE: usize = 10;
const REPS: usize = 100_000;

/// Count how often each of `0..stream` ends up in the sample over `reps` runs.
fn selection_counts<S, F>(stream: usize, reps: usize, mut make: F) -> Vec<usize>
where
    S: RandomSampling<usize>,
    F: FnMut(ChaCha8Rng) -> Result<S, SamplingError>,
{
    let mut counts = vec![0usize; stream];
    for rep in 0..reps {
        let mut s = make(ChaCha8Rng::seed_from_u64(rep as u64)).expect("k > 0");
        for i in 0..stream {
            s.feed(i).expect("feed");
        }
        for &i in &s.sample() {
            counts[i] += 1;
        }
    }
    counts
}

/// Every observed/expected ratio is within `tolerance` of 1.
fn assert_uniform(counts: &[usize], reps: usize, sample: usize, tolerance: f64) {
    let expected = reps as f64 * sample as f64 / counts.len() as f64;
    for (i, &c) in counts.iter().enumerate() {
        let ratio = c as f64 / expected;
        assert!(
            (ratio - 1.0).abs() < tolerance,
            "item {i}: count={c} expected~{expected:.0} counts={counts:?}"
        );
    }
}

#[test]
fn waterman_is_uniform() {
    let counts = selection_counts(STREAM, REPS, |rng| {
        WatermanSampling::<usize, _>::new(SAMPLE, rng)
    });
    assert_uniform(&counts, REPS, SAMPLE, 0.02);
}

#[test]
fn vitter_x_is_uniform() {
    let counts = selection_counts(STREAM, REPS, |rng| {
        VitterXSampling::<usize, _>::new(SAMPLE, rng)
    });
    assert_uniform(&counts, REPS, SAMPLE, 0.02);
}

#[test]
fn vitter_z_is_uniform() {
    let counts = selection_counts(STREAM, REPS, |rng| {
        VitterZSampling::<usize, _>::new(SAMPLE, rng)
    });
    assert_uniform(&counts, REPS, SAMPLE, 0.02);
}

#[test]
fn li_l_is_uniform() {
    let counts = selection_counts(STREAM, REPS, |rng| {
        LiLSampling::<usize, _>::new(SAMPLE, rng)
    });
    assert_uniform(&counts, REPS, SAMPLE, 0.02);
}

#[test]
fn efraimidis_unit_weight_is_uniform() {
    let counts = selection_counts(STREAM, REPS, |rng| {
        EfraimidisSampling::<usize, _>::new(SAMPLE, rng)
    });
    assert_uniform(&counts, REPS, SAMPLE, 0.02);
}

#[test]
fn vitter_z_rejection_phase_is_uniform() {
    // 22 * 3 = 66 < 300, so most skips come from the rejection sampler.
    let (stream, sample, reps) = (300, 3, 40_000);
    let counts = selection_counts(stream, reps, |rng| {
        VitterZSampling::<usize, _>::new(sample, rng)
    });

    let expected = reps as f64 * sample as f64 / stream as f64;
    let chi2: f64 = counts
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum();

    // df = 299; sd ~ sqrt(2 * df) ~ 24.5.
    assert!(chi2 < 420.0, "chi2={chi2:.1} counts={counts:?}");

    // Early and late halves of the stream are equally represented.
    let early: usize = counts[..stream / 2].iter().sum();
    let late: usize = counts[stream / 2..].iter().sum();
    let ratio = early as f64 / late as f64;
    assert!((ratio - 1.0).abs() < 0.03, "early={early} late={late}");
}

#[test]
fn li_l_long_stream_is_uniform() {
    let (stream, sample, reps) = (300, 3, 40_000);
    let counts = selection_counts(stream, reps, |rng| {
        LiLSampling::<usize, _>::new(sample, rng)
    });
    let early: usize = counts[..stream / 2].iter().sum();
    let late: usize = counts[stream / 2..].iter().sum();
    let ratio = early as f64 / late as f64;
    assert!((ratio - 1.0).abs() < 0.03, "early={early} late={late}");
}

#[test]
fn weighted_inclusion_tracks_weight() {
    // Items 0 to 3 have weight 1, item 4 has weight 4; sample one item.
    // P(item 4) = 4 / 8, P(each unit item) = 1 / 8.
    let reps = 40_000;
    let mut counts = [0usize; 5];
    for rep in 0..reps {
        let rng = ChaCha8Rng::seed_from_u64(rep as u64);
        let mut s = EfraimidisSampling::new(1, rng).expect("k > 0");
        s.feed_weighted_all(0..5usize, [1.0, 1.0, 1.0, 1.0, 4.0])
            .expect("weights ok");
        counts[s.into_sample()[0]] += 1;
    }

    let heavy = counts[4] as f64 / reps as f64;
    assert!((heavy - 0.5).abs() < 0.02, "counts={counts:?}");
    for &c in &counts[..4] {
        let p = c as f64 / reps as f64;
        assert!((p - 0.125).abs() < 0.01, "counts={counts:?}");
    }
}
