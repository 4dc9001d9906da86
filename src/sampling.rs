//! Uniform subsampling without replacement used to cap bucket sizes.

use rand::Rng;

/// Indices to keep from a sequence of `len` values, at most `cap` of them.
///
/// When `len <= cap` every index is returned in order. Otherwise `cap`
/// distinct indices are drawn uniformly at random from `rng`.
pub fn subsample_indices<R: Rng + ?Sized>(len: usize, cap: usize, rng: &mut R) -> Vec<usize> {
    if len <= cap {
        return (0..len).collect();
    }
    rand::seq::index::sample(rng, len, cap).into_vec()
}

/// Gather `values` at the subsampled indices.
pub fn subsample<R: Rng + ?Sized>(values: &[f64], cap: usize, rng: &mut R) -> Vec<f64> {
    subsample_indices(values.len(), cap, rng)
        .into_iter()
        .map(|i| values[i])
        .collect()
}

/// splitmix64 finalizer; spreads a base seed over independent streams.
#[inline]
pub(crate) fn derive_seed(base: u64, stream: u64) -> u64 {
    let mut z = base.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
