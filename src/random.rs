//! Seeded random number generation.
//!
//! Every optimization run owns one generator created from a caller-supplied
//! seed. Nothing in the crate touches a thread-local or global generator,
//! so runs are reproducible regardless of how a host schedules them.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generator type threaded through every stochastic operation.
pub type RunRng = StdRng;

/// Creates the generator for one run.
pub fn create_rng(seed: u64) -> RunRng {
    StdRng::seed_from_u64(seed)
}

/// Derives an independent seed for the `index`-th run of a batch.
///
/// Uses the SplitMix64 finalizer so neighbouring indices map to
/// well-separated streams.
pub fn derive_seed(base: u64, index: u64) -> u64 {
    let mut z = base.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
