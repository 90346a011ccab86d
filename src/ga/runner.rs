//! Steady-state GA loop execution.
//!
//! [`GaRunner`] orchestrates the complete search:
//! initialization → (selection → crossover → mutation → replacement) → repeat.
//!
//! Each generation makes exactly one insertion attempt. The population is
//! owned by the run and mutated in place; nothing is shared between runs.

use super::config::GaConfig;
use super::operators::{reset_mutation, single_point_crossover};
use super::population::Population;
use super::selection::select_parents;
use super::types::{GaProblem, Individual};
use crate::error::{CoordError, Result};
use crate::random::{create_rng, RunRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopReason {
    /// The best fitness reached exactly zero.
    Converged,
    /// `stagnation_limit` generations passed without improvement.
    Stagnated,
    /// `max_generations` was reached.
    MaxGenerations,
    /// The cancellation flag was raised or the time limit elapsed.
    Cancelled,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best individual found during the entire run.
    pub best: Individual,

    /// Number of generations executed.
    pub generations: usize,

    pub stop_reason: StopReason,

    /// Best fitness after initialization, then after each generation.
    pub fitness_history: Vec<f64>,

    /// Population at termination, best first.
    pub population: Vec<Individual>,
}

impl GaResult {
    pub fn best_fitness(&self) -> f64 {
        self.best.fitness
    }
}

/// Executes the steady-state GA.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::fast();
/// let result = GaRunner::run(&problem, &config, 42)?;
/// println!("Best fitness: {}", result.best_fitness());
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from `seed`.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig, seed: u64) -> Result<GaResult> {
        Self::run_with_cancel(problem, config, seed, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops
    /// before the next generation and returns the best solution found so
    /// far. Cancellation is never an error.
    ///
    /// # Errors
    ///
    /// [`CoordError::InvalidConfig`] if the configuration fails validation
    /// or the problem has no genes.
    #[instrument(level = "debug", skip(problem, config, cancel), fields(population = config.population_size, genes = problem.bounds().len()))]
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        seed: u64,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        config.validate().map_err(CoordError::InvalidConfig)?;
        if problem.bounds().is_empty() {
            return Err(CoordError::InvalidConfig("problem has no genes".into()));
        }

        let started = Instant::now();
        let mut rng = create_rng(seed);

        // 1. Initialize population
        let mut population = Population::initialize(problem, config.population_size, &mut rng);

        // 2. Track best
        let mut best = population.best().clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations.min(4096) + 1);
        fitness_history.push(best.fitness);
        tracing::debug!(generation = 0, tmt = best.fitness, "population initialized");

        if best.fitness == 0.0 {
            return Ok(finish(best, 0, StopReason::Converged, fitness_history, population));
        }

        let mut stall = 0usize;

        // 3. Steady-state loop
        for gen in 1..=config.max_generations {
            if is_cancelled(cancel.as_deref(), config.time_limit_ms, started) {
                tracing::debug!(generation = gen - 1, "run cancelled");
                return Ok(finish(
                    best,
                    gen - 1,
                    StopReason::Cancelled,
                    fitness_history,
                    population,
                ));
            }

            step(problem, &mut population, config.mutation_count, &mut rng);

            // Update best
            if population.best().fitness < best.fitness {
                best = population.best().clone();
                stall = 0;
            } else {
                stall += 1;
            }
            fitness_history.push(best.fitness);

            // Callback
            problem.on_generation(gen, best.fitness);

            if config.log_interval > 0 && gen % config.log_interval == 0 {
                tracing::debug!(generation = gen, tmt = best.fitness, stall, "progress");
            }

            if best.fitness == 0.0 {
                return Ok(finish(best, gen, StopReason::Converged, fitness_history, population));
            }
            if config.stagnation_limit > 0 && stall >= config.stagnation_limit {
                return Ok(finish(best, gen, StopReason::Stagnated, fitness_history, population));
            }
        }

        Ok(finish(
            best,
            config.max_generations,
            StopReason::MaxGenerations,
            fitness_history,
            population,
        ))
    }
}

/// One insertion attempt: two parents, two children, keep the better child
/// if it passes the replacement gate.
fn step<P: GaProblem>(
    problem: &P,
    population: &mut Population,
    mutation_count: usize,
    rng: &mut RunRng,
) -> bool {
    let bounds = problem.bounds();

    // Selection
    let (s1, s2) = select_parents(population.len(), rng);
    let members = population.members();

    // Crossover
    let (mut h1, mut h2) = single_point_crossover(&members[s1].genes, &members[s2].genes, rng);

    // Mutation
    reset_mutation(&mut h1, bounds, mutation_count, rng);
    reset_mutation(&mut h2, bounds, mutation_count, rng);

    let c1 = Individual::evaluated(h1, problem);
    let c2 = Individual::evaluated(h2, problem);
    let child = if c2.fitness < c1.fitness { c2 } else { c1 };

    population.try_replace_worst(child)
}

fn is_cancelled(cancel: Option<&AtomicBool>, time_limit_ms: Option<u64>, started: Instant) -> bool {
    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
        return true;
    }
    time_limit_ms.is_some_and(|ms| started.elapsed().as_millis() >= u128::from(ms))
}

fn finish(
    best: Individual,
    generations: usize,
    stop_reason: StopReason,
    fitness_history: Vec<f64>,
    population: Population,
) -> GaResult {
    GaResult {
        best,
        generations,
        stop_reason,
        fitness_history,
        population: population.into_members(),
    }
}

// ============================================================================
// Tests
// ============================================================================
