//! Seeded RNG streams for the generation session and per-community builds.

use rand::{SeedableRng, rngs::SmallRng};

/// SplitMix64 increment (the 64-bit golden ratio) used to space community
/// seeds apart.
const COMMUNITY_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

/// RNG driving the sequential stages of one generation run.
pub(crate) fn session_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Independent RNG for the community at `index`.
///
/// Streams depend only on `(base_seed, index)`, so communities can be built
/// in any order or in parallel with identical results.
pub(crate) fn community_rng(base_seed: u64, index: usize) -> SmallRng {
    SmallRng::seed_from_u64(mix_community_seed(base_seed, index))
}

#[inline]
fn mix_community_seed(base_seed: u64, index: usize) -> u64 {
    let offset = (index as u64).wrapping_add(1);
    splitmix64(base_seed ^ offset.wrapping_mul(COMMUNITY_SEED_SPACING))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(COMMUNITY_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}
