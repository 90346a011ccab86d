//! Fitness-sorted population with duplicate rejection.

use super::types::{GaProblem, Individual};
use crate::constants::DUPLICATE_TOLERANCE;
use rand::Rng;
use std::collections::HashMap;

/// Width of the first-gene buckets used to pre-filter duplicate checks.
///
/// Must be at least [`DUPLICATE_TOLERANCE`] so that any near-duplicate lies
/// in the same or an adjacent bucket.
const BUCKET_WIDTH: f64 = 1e-9;

/// A fixed-size population kept sorted ascending by fitness.
///
/// Index 0 is the best member and the last index the worst. The size never
/// changes after construction: the only mutation is
/// [`try_replace_worst`](Self::try_replace_worst).
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Individual>,
    buckets: HashMap<i64, usize>,
}

impl Population {
    /// Creates `size` individuals drawn uniformly within the problem bounds,
    /// evaluates them and sorts them.
    pub fn initialize<P: GaProblem, R: Rng>(problem: &P, size: usize, rng: &mut R) -> Self {
        let bounds = problem.bounds();
        let members = (0..size)
            .map(|_| Individual::evaluated(bounds.sample_all(rng), problem))
            .collect();
        Self::from_members(members)
    }

    /// Wraps already-evaluated individuals, sorting them by fitness.
    pub fn from_members(mut members: Vec<Individual>) -> Self {
        members.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
        let mut buckets = HashMap::with_capacity(members.len());
        for m in &members {
            *buckets.entry(bucket_of(&m.genes)).or_insert(0) += 1;
        }
        Self { members, buckets }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members, best first.
    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    /// # Panics
    /// Panics if the population is empty.
    pub fn best(&self) -> &Individual {
        &self.members[0]
    }

    /// # Panics
    /// Panics if the population is empty.
    pub fn worst(&self) -> &Individual {
        &self.members[self.members.len() - 1]
    }

    /// True when some member matches `genes` on every position within
    /// [`DUPLICATE_TOLERANCE`].
    pub fn contains_near(&self, genes: &[f64]) -> bool {
        let k = bucket_of(genes);
        let occupied = [k.saturating_sub(1), k, k.saturating_add(1)]
            .iter()
            .any(|b| self.buckets.contains_key(b));
        if !occupied {
            return false;
        }
        self.members
            .iter()
            .any(|m| m.is_near(genes, DUPLICATE_TOLERANCE))
    }

    /// Replaces the worst member with `child` if the child is strictly better
    /// and not a near-duplicate of any member.
    ///
    /// Returns whether the child was admitted. The population stays sorted.
    pub fn try_replace_worst(&mut self, child: Individual) -> bool {
        if self.members.is_empty()
            || !(child.fitness < self.worst().fitness)
            || self.contains_near(&child.genes)
        {
            return false;
        }

        if let Some(evicted) = self.members.pop() {
            let key = bucket_of(&evicted.genes);
            if let Some(c) = self.buckets.get_mut(&key) {
                *c -= 1;
                if *c == 0 {
                    self.buckets.remove(&key);
                }
            }
        }
        *self.buckets.entry(bucket_of(&child.genes)).or_insert(0) += 1;

        // after equals, as a stable sort would place it
        let at = self
            .members
            .partition_point(|m| m.fitness <= child.fitness);
        self.members.insert(at, child);
        true
    }

    pub fn into_members(self) -> Vec<Individual> {
        self.members
    }
}

fn bucket_of(genes: &[f64]) -> i64 {
    genes
        .first()
        .map_or(0, |&g| (g / BUCKET_WIDTH).floor() as i64)
}
