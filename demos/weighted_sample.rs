//! Weighted vs. unweighted sampling of the same stream.
//!
//! Feeds 50 items whose weights fall off like a power law, then compares which
//! indices a uniform reservoir and a weighted (A-Res) reservoir keep. Duplicate
//! ids in the input are filtered by `UniqueSampling`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reservoir_kit::{
    EfraimidisSampling, RandomSampling, SamplingError, UniqueSampling, VitterZSampling,
    WeightedRandomSampling,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Many small weights, few big ones.
    let weights: Vec<f64> = (0..50)
        .map(|i| 1.0 / (1.0 + (i as f64)).powf(1.3))
        .collect();

    let k = 10usize;

    let mut uniform = VitterZSampling::new(k, ChaCha8Rng::seed_from_u64(7))?;
    uniform.feed_all(0..weights.len())?;

    let weighted = EfraimidisSampling::<usize, _>::new(k, ChaCha8Rng::seed_from_u64(7))?;
    let mut weighted = UniqueSampling::new(weighted)?;
    for (i, &w) in weights.iter().enumerate() {
        // A-Res requires w>0.
        weighted.feed_weighted(i, w)?;
    }
    // The same id again is refused.
    match weighted.feed_weighted(0, weights[0]) {
        Err(SamplingError::DuplicateItem) => {}
        other => return Err(format!("expected a duplicate error, got {other:?}").into()),
    }

    let mut pick_u: Vec<usize> = uniform.sample().to_vec();
    let mut pick_w: Vec<usize> = weighted.sample().to_vec();
    pick_u.sort_unstable();
    pick_w.sort_unstable();

    println!("weights[0..10]:");
    for (i, w) in weights.iter().take(10).enumerate() {
        println!("  i={i:2}  w={w:.6}");
    }
    println!();
    println!("stream size: {}", weighted.stream_size());
    println!("uniform reservoir (Algorithm Z) indices: {pick_u:?}");
    println!("weighted reservoir (A-Res) indices:      {pick_w:?}");

    Ok(())
}
