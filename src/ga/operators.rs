//! Real-coded genetic operators.
//!
//! Both operators work on `&[f64]` gene vectors and keep every gene inside
//! its [`Bounds`] interval: crossover only moves genes between positions of
//! the same index, and mutation redraws from the gene's own interval.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: Exchange the suffixes after a random cut
//!
//! # Mutation Operators
//!
//! - [`reset_mutation`]: Redraw `k` distinct genes uniformly — O(k)
//!
//! # References
//!
//! - Chu & Beasley (1997), "A genetic algorithm for the generalised
//!   assignment problem", *Computers & Operations Research* 24(1), 17–23
//! - Michalewicz (1996), *Genetic Algorithms + Data Structures = Evolution
//!   Programs*, ch. 5 (uniform/resetting mutation)

use crate::scenario::Bounds;
use rand::seq::index;
use rand::Rng;

/// Single-point crossover.
///
/// Draws a cut point `cp` uniformly from `[1, n − 1]` and returns
/// `(p1[..cp] ++ p2[cp..], p2[..cp] ++ p1[cp..])`. Vectors shorter than two
/// genes cannot be cut; copies of the parents are returned.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn single_point_crossover<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let cp = rng.random_range(1..n);
    (splice(parent1, parent2, cp), splice(parent2, parent1, cp))
}

fn splice(head: &[f64], tail: &[f64], cp: usize) -> Vec<f64> {
    let mut child = Vec::with_capacity(head.len());
    child.extend_from_slice(&head[..cp]);
    child.extend_from_slice(&tail[cp..]);
    child
}

/// Resetting mutation: redraw `count` distinct genes uniformly within their
/// bounds.
///
/// `count` is capped at the gene count.
///
/// # Panics
/// Panics if `genes` and `bounds` differ in length.
pub fn reset_mutation<R: Rng>(genes: &mut [f64], bounds: &Bounds, count: usize, rng: &mut R) {
    assert_eq!(genes.len(), bounds.len(), "genes must match bounds");

    let count = count.min(genes.len());
    for i in index::sample(rng, genes.len(), count).into_iter() {
        genes[i] = bounds.sample(i, rng);
    }
}
