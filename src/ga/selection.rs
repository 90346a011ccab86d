//! Parent selection for the steady-state GA.
//!
//! Parents are drawn uniformly, without rank or fitness bias. Selection
//! pressure comes entirely from the replacement gate, which only admits
//! children better than the current worst member.

use rand::seq::index;
use rand::Rng;

/// Draws two distinct indices uniformly from `0..n`.
///
/// # Panics
/// Panics if `n < 2`.
pub fn select_parents<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    assert!(n >= 2, "need at least two individuals to select parents");
    let picks = index::sample(rng, n, 2);
    (picks.index(0), picks.index(1))
}
