//! Deterministic RNGs for hand-evaluated tests.

use rand::RngCore;

/// Returns the same 64 bits forever.
///
/// `rng.random::<f64>()` keeps the top 53 bits, so [`ConstRng::from_f64`]
/// reproduces `r` up to 2^-53.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConstRng(u64);

impl ConstRng {
    pub(crate) fn from_f64(r: f64) -> Self {
        Self(((r * (1u64 << 53) as f64) as u64) << 11)
    }

    pub(crate) fn max() -> Self {
        Self(u64::MAX)
    }
}

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.0.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
