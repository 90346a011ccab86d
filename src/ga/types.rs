//! Core types shared by the GA components.
//!
//! [`GaProblem`] is the contract between the steady-state engine and a
//! concrete fitness landscape; [`Individual`] is the candidate solution the
//! engine manipulates.

use crate::scenario::Bounds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A candidate solution: a real gene vector plus its cached fitness.
///
/// Lower fitness is better. A freshly built individual carries
/// `f64::INFINITY` until it is evaluated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Individual {
    pub genes: Vec<f64>,
    pub fitness: f64,
}

impl Individual {
    /// Creates an unevaluated individual.
    pub fn new(genes: Vec<f64>) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    /// Creates an individual and evaluates it against `problem`.
    pub fn evaluated<P: GaProblem + ?Sized>(genes: Vec<f64>, problem: &P) -> Self {
        let fitness = problem.evaluate(&genes);
        Self { genes, fitness }
    }

    /// True when every gene is within `tolerance` of the matching gene of `other`.
    pub fn is_near(&self, other: &[f64], tolerance: f64) -> bool {
        self.genes.len() == other.len()
            && self
                .genes
                .iter()
                .zip(other)
                .all(|(a, b)| (a - b).abs() < tolerance)
    }
}

/// A continuous, box-bounded minimization problem.
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` so that independent runs over
/// different problems can be scheduled on a thread pool.
pub trait GaProblem: Send + Sync {
    /// The search box. Its length fixes the gene count.
    fn bounds(&self) -> &Bounds;

    /// Scores a gene vector. Lower is better; zero is a perfect score.
    ///
    /// Must not panic for any vector inside [`bounds`](Self::bounds).
    fn evaluate(&self, genes: &[f64]) -> f64;

    /// Called at the end of each generation with the current best fitness.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}
