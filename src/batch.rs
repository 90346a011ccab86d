//! Multi-scenario driver with per-scenario failure isolation.
//!
//! Each scenario runs in its own GA with a seed derived from the batch seed
//! and the scenario's position, so results are identical whether the batch
//! runs sequentially or on a thread pool. A failing scenario is recorded
//! and the rest continue.

use crate::error::CoordError;
use crate::ga::GaConfig;
use crate::optimize::{optimize_with_cancel, Optimization};
use crate::random::derive_seed;
use crate::scenario::{derive_bounds, Scenario};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::instrument;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Batch parameters.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// GA parameters applied to every scenario.
    pub ga: GaConfig,

    /// Scenarios with fewer pairs are skipped. Defaults to 5.
    pub min_pairs: usize,

    /// Scenarios with fewer relays are skipped. Defaults to 3.
    pub min_relays: usize,

    /// Whether to run scenarios on the rayon pool. Ignored without the
    /// `parallel` feature.
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            ga: GaConfig::default(),
            min_pairs: 5,
            min_relays: 3,
            parallel: true,
        }
    }
}

impl BatchConfig {
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_min_pairs(mut self, n: usize) -> Self {
        self.min_pairs = n;
        self
    }

    pub fn with_min_relays(mut self, n: usize) -> Self {
        self.min_relays = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// What happened to one scenario.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioStatus {
    Optimized(Optimization),
    /// Too small to optimize; carries the reasons.
    Skipped(Vec<String>),
    Failed(CoordError),
}

/// Outcome of one scenario in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub scenario: String,
    pub seed: u64,
    pub status: ScenarioStatus,
}

/// Outcomes in input order plus summary counters.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub outcomes: Vec<ScenarioOutcome>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn successful(&self) -> usize {
        self.count(|s| matches!(s, ScenarioStatus::Optimized(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, ScenarioStatus::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, ScenarioStatus::Failed(_)))
    }

    /// Fraction of scenarios that produced settings, in `[0, 1]`.
    pub fn success_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.successful() as f64 / self.total() as f64
    }

    pub fn get(&self, scenario: &str) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| o.scenario == scenario)
    }

    fn count(&self, pred: impl Fn(&ScenarioStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// Optimizes every scenario independently.
pub fn optimize_batch(scenarios: &[Scenario], seed: u64, config: &BatchConfig) -> BatchReport {
    optimize_batch_with_cancel(scenarios, seed, config, None)
}

/// [`optimize_batch`] with a cancellation flag shared by every run.
///
/// Runs that have not finished when the flag is raised return their best
/// settings so far; none of them fail because of it.
#[instrument(level = "info", skip(scenarios, config, cancel), fields(scenarios = scenarios.len()))]
pub fn optimize_batch_with_cancel(
    scenarios: &[Scenario],
    seed: u64,
    config: &BatchConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> BatchReport {
    let started = Instant::now();
    let run = |(i, scenario): (usize, &Scenario)| {
        run_one(scenario, derive_seed(seed, i as u64), config, cancel.clone())
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<ScenarioOutcome> = if config.parallel {
        scenarios.par_iter().enumerate().map(run).collect()
    } else {
        scenarios.iter().enumerate().map(run).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<ScenarioOutcome> = scenarios.iter().enumerate().map(run).collect();

    let report = BatchReport {
        outcomes,
        elapsed: started.elapsed(),
    };
    tracing::info!(
        total = report.total(),
        successful = report.successful(),
        skipped = report.skipped(),
        failed = report.failed(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "batch finished"
    );
    report
}

fn run_one(
    scenario: &Scenario,
    seed: u64,
    config: &BatchConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> ScenarioOutcome {
    let outcome = |status| ScenarioOutcome {
        scenario: scenario.id().to_string(),
        seed,
        status,
    };

    let issues = scenario.size_issues(config.min_pairs, config.min_relays);
    if !issues.is_empty() {
        tracing::warn!(scenario = %scenario.id(), ?issues, "skipping scenario");
        return outcome(ScenarioStatus::Skipped(issues));
    }

    let result = derive_bounds(scenario)
        .and_then(|bounds| optimize_with_cancel(scenario, &bounds, seed, &config.ga, cancel));
    match result {
        Ok(optimization) => outcome(ScenarioStatus::Optimized(optimization)),
        Err(err) => {
            tracing::warn!(scenario = %scenario.id(), kind = err.kind(), error = %err, "scenario failed");
            outcome(ScenarioStatus::Failed(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::RelayPair;

    fn scenario(id: &str, currents: &[f64]) -> Scenario {
        let mut b = Scenario::builder(id);
        for (i, &c) in currents.iter().enumerate() {
            b.add_pair(&format!("R{}", i + 1), &format!("R{}", i + 2), c, c * 0.9)
                .unwrap();
        }
        b.build()
    }

    fn config() -> BatchConfig {
        BatchConfig::default()
            .with_ga(
                GaConfig::fast()
                    .with_population_size(20)
                    .with_max_generations(300)
                    .with_log_interval(0),
            )
            .with_min_pairs(1)
            .with_min_relays(1)
    }

    #[test]
    fn test_default_size_thresholds() {
        let defaults = BatchConfig::default();
        assert_eq!((defaults.min_pairs, defaults.min_relays), (5, 3));

        let scenarios = vec![
            scenario("four_pairs", &[3000.0, 2600.0, 2200.0, 1800.0]),
            scenario("five_pairs", &[3000.0, 2600.0, 2200.0, 1800.0, 1400.0]),
        ];
        let report = optimize_batch(&scenarios, 5, &defaults.with_ga(config().ga));

        match &report.get("four_pairs").unwrap().status {
            ScenarioStatus::Skipped(issues) => {
                assert_eq!(issues, &vec!["Too few pairs (4)".to_string()])
            }
            other => panic!("expected skip, got {other:?}"),
        }
        assert!(matches!(
            report.get("five_pairs").unwrap().status,
            ScenarioStatus::Optimized(_)
        ));
    }

    #[test]
    fn test_failures_are_isolated() {
        let degenerate = Scenario::from_parts(
            "orphan",
            vec!["A".into(), "B".into(), "C".into()],
            vec![RelayPair::new("A", "B", 500.0, 500.0)],
        )
        .unwrap();
        let scenarios = vec![
            scenario("s1", &[3000.0, 2500.0]),
            degenerate,
            Scenario::builder("empty").build(),
            scenario("s4", &[1800.0]),
        ];

        let report = optimize_batch(&scenarios, 42, &config());
        assert_eq!(report.total(), 4);
        assert_eq!(report.successful(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
        assert!((report.success_rate() - 0.5).abs() < 1e-12);

        let names: Vec<&str> = report.outcomes.iter().map(|o| o.scenario.as_str()).collect();
        assert_eq!(names, ["s1", "orphan", "empty", "s4"]);

        match &report.get("orphan").unwrap().status {
            ScenarioStatus::Failed(err) => assert_eq!(err.kind(), "DegenerateScenario"),
            other => panic!("expected failure, got {other:?}"),
        }
        match &report.get("empty").unwrap().status {
            ScenarioStatus::Skipped(issues) => {
                assert_eq!(issues, &vec!["No valid pairs found".to_string()])
            }
            other => panic!("expected skip, got {other:?}"),
        }
    }

    #[test]
    fn test_min_size_skips() {
        let scenarios = vec![scenario("small", &[1000.0]), scenario("big", &[3000.0, 2000.0, 1500.0])];
        let config = config().with_min_pairs(2).with_min_relays(3);
        let report = optimize_batch(&scenarios, 1, &config);

        assert!(matches!(
            report.get("small").unwrap().status,
            ScenarioStatus::Skipped(_)
        ));
        assert!(matches!(
            report.get("big").unwrap().status,
            ScenarioStatus::Optimized(_)
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scenarios: Vec<Scenario> = (0..6)
            .map(|i| scenario(&format!("s{i}"), &[4000.0 - 200.0 * i as f64, 2500.0, 1600.0]))
            .collect();

        let seq = optimize_batch(&scenarios, 7, &config().with_parallel(false));
        let par = optimize_batch(&scenarios, 7, &config().with_parallel(true));
        assert_eq!(seq.outcomes, par.outcomes);

        let seeds: Vec<u64> = seq.outcomes.iter().map(|o| o.seed).collect();
        let mut unique = seeds.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), seeds.len());
    }

    #[test]
    fn test_cancelled_batch_still_yields_settings() {
        let scenarios = vec![scenario("s1", &[3000.0, 2000.0])];
        let cancel = Arc::new(AtomicBool::new(true));
        let report = optimize_batch_with_cancel(&scenarios, 3, &config(), Some(cancel));
        assert_eq!(report.successful(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let report = optimize_batch(&[], 1, &config());
        assert_eq!(report.total(), 0);
        assert_eq!(report.success_rate(), 0.0);
    }
}
