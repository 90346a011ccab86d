//! Relay-coordination entry points.
//!
//! [`derive_bounds`](crate::scenario::derive_bounds) and [`optimize`] are the
//! two operations a host needs: the first validates a scenario and builds
//! its search box, the second runs the steady-state GA and returns the
//! settings mapping with run metadata.

use crate::error::{CoordError, Result};
use crate::ga::{GaConfig, GaProblem, GaRunner, StopReason};
use crate::scenario::{Bounds, Scenario};
use crate::settings::{extract_settings, RelaySettings};
use crate::timing::evaluate_tmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::instrument;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A scenario viewed as a GA problem: minimize TMT inside the derived bounds.
pub struct CoordinationProblem<'a> {
    scenario: &'a Scenario,
    bounds: &'a Bounds,
}

impl<'a> CoordinationProblem<'a> {
    /// Pairs a scenario with its bounds.
    ///
    /// # Errors
    ///
    /// - [`CoordError::EmptyScenario`] when the scenario has no relays or pairs.
    /// - [`CoordError::InvalidConfig`] when the bounds were not derived for a
    ///   scenario of this size.
    pub fn new(scenario: &'a Scenario, bounds: &'a Bounds) -> Result<Self> {
        if scenario.is_empty() {
            return Err(CoordError::empty(
                scenario.id(),
                scenario.relay_count(),
                scenario.pair_count(),
            ));
        }
        if bounds.len() != 2 * scenario.relay_count() {
            return Err(CoordError::InvalidConfig(format!(
                "bounds have {} genes, scenario {} needs {}",
                bounds.len(),
                scenario.id(),
                2 * scenario.relay_count()
            )));
        }
        Ok(Self { scenario, bounds })
    }

    pub fn scenario(&self) -> &Scenario {
        self.scenario
    }
}

impl GaProblem for CoordinationProblem<'_> {
    fn bounds(&self) -> &Bounds {
        self.bounds
    }

    fn evaluate(&self, genes: &[f64]) -> f64 {
        evaluate_tmt(genes, self.scenario)
    }
}

/// Run metadata handed to reporting collaborators.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizationMeta {
    /// TMT of the best individual (unrounded genes).
    pub final_fitness: f64,
    pub generations_run: usize,
    pub stopped_reason: StopReason,
    /// Best TMT after initialization, then after each generation.
    pub fitness_history: Vec<f64>,
}

/// Optimized settings plus run metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Optimization {
    pub settings: RelaySettings,
    pub meta: OptimizationMeta,
}

/// Optimizes the relay settings of one scenario.
///
/// The run is sequential and owns its generator, seeded from `seed`; the
/// same scenario, bounds, seed and config always produce the same result.
///
/// ```
/// use u_relaycoord::{derive_bounds, optimize, GaConfig, Scenario};
///
/// let mut builder = Scenario::builder("feeder_1");
/// builder.add_pair("R1", "R2", 1000.0, 1000.0)?;
/// let scenario = builder.build();
///
/// let bounds = derive_bounds(&scenario)?;
/// let config = GaConfig::fast().with_population_size(20).with_max_generations(200);
/// let result = optimize(&scenario, &bounds, 42, &config)?;
///
/// assert!(result.meta.final_fitness < 1e-3);
/// assert_eq!(result.settings.len(), 2);
/// # Ok::<(), u_relaycoord::CoordError>(())
/// ```
///
/// # Errors
///
/// - [`CoordError::EmptyScenario`] for a scenario without relays or pairs;
///   the search loop is never entered.
/// - [`CoordError::InvalidConfig`] for an invalid config or mismatched bounds.
pub fn optimize(
    scenario: &Scenario,
    bounds: &Bounds,
    seed: u64,
    config: &GaConfig,
) -> Result<Optimization> {
    optimize_with_cancel(scenario, bounds, seed, config, None)
}

/// [`optimize`] with an external cancellation flag.
///
/// Raising the flag stops the run before its next generation; the best
/// settings found so far are returned with
/// [`StopReason::Cancelled`].
#[instrument(level = "info", skip(scenario, bounds, config, cancel), fields(scenario = %scenario.id(), relays = scenario.relay_count(), pairs = scenario.pair_count()))]
pub fn optimize_with_cancel(
    scenario: &Scenario,
    bounds: &Bounds,
    seed: u64,
    config: &GaConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<Optimization> {
    let problem = CoordinationProblem::new(scenario, bounds)?;
    let result = GaRunner::run_with_cancel(&problem, config, seed, cancel)?;
    let settings = extract_settings(&result.best, scenario)?;

    tracing::info!(
        generations = result.generations,
        tmt = result.best_fitness(),
        reason = ?result.stop_reason,
        "optimization finished"
    );

    Ok(Optimization {
        settings,
        meta: OptimizationMeta {
            final_fitness: result.best.fitness,
            generations_run: result.generations,
            stopped_reason: result.stop_reason,
            fitness_history: result.fitness_history,
        },
    })
}
