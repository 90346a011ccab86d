//! Search bounds derived from fault-current data.

use super::model::Scenario;
use crate::constants::{MAX_PICKUP_FACTOR, MAX_TDS, MIN_PICKUP, MIN_TDS};
use crate::error::{CoordError, Result};
use rand::Rng;
use tracing::instrument;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-gene search box.
///
/// For a relay scenario with `R` relays the box has `2R` genes: positions
/// `0..R` hold time-dial settings and `R..2R` hold pickup currents, both
/// indexed by the scenario's relay order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates a box from explicit per-gene limits.
    ///
    /// Fails when the vectors differ in length, are empty, or any interval
    /// is inverted or non-finite.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(CoordError::InvalidConfig(format!(
                "bounds length mismatch: {} lower vs {} upper",
                lower.len(),
                upper.len()
            )));
        }
        if lower.is_empty() {
            return Err(CoordError::InvalidConfig("bounds must not be empty".into()));
        }
        for (i, (lo, hi)) in lower.iter().zip(&upper).enumerate() {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(CoordError::InvalidConfig(format!(
                    "gene {i} has invalid interval [{lo}, {hi}]"
                )));
            }
        }
        Ok(Self { lower, upper })
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Number of relays, assuming the TDS/pickup layout.
    pub fn relay_count(&self) -> usize {
        self.lower.len() / 2
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// `[lower, upper]` of gene `i`.
    pub fn interval(&self, i: usize) -> (f64, f64) {
        (self.lower[i], self.upper[i])
    }

    /// TDS interval of relay `r`.
    pub fn tds(&self, r: usize) -> (f64, f64) {
        self.interval(r)
    }

    /// Pickup interval of relay `r`.
    pub fn pickup(&self, r: usize) -> (f64, f64) {
        self.interval(self.relay_count() + r)
    }

    /// Draws gene `i` uniformly from its interval.
    pub fn sample<R: Rng>(&self, i: usize, rng: &mut R) -> f64 {
        let (lo, hi) = self.interval(i);
        lo + rng.random::<f64>() * (hi - lo)
    }

    /// Draws a full gene vector.
    pub fn sample_all<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.len()).map(|i| self.sample(i, rng)).collect()
    }

    /// True when `genes` has the right length and every gene is inside its interval.
    pub fn contains(&self, genes: &[f64]) -> bool {
        genes.len() == self.len()
            && genes
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(g, (lo, hi))| lo <= g && g <= hi)
    }
}

/// Derives the search box of a scenario.
///
/// TDS is limited to `[MIN_TDS, MAX_TDS]`. Pickup is limited to
/// `[MIN_PICKUP, MAX_PICKUP_FACTOR * Imin]`, where `Imin` is the smallest
/// fault current the relay sees across every pair it takes part in, as main
/// or as backup.
///
/// # Errors
///
/// - [`CoordError::EmptyScenario`] when the scenario has no relays or no pairs.
/// - [`CoordError::DegenerateScenario`] when a relay never appears in a pair
///   or its pickup ceiling falls below `MIN_PICKUP`.
#[instrument(level = "debug", skip(scenario), fields(scenario = %scenario.id(), relays = scenario.relay_count()))]
pub fn derive_bounds(scenario: &Scenario) -> Result<Bounds> {
    let r = scenario.relay_count();
    if scenario.is_empty() {
        return Err(CoordError::empty(scenario.id(), r, scenario.pair_count()));
    }

    let mut min_current = vec![f64::INFINITY; r];
    for (pair, &(main, backup)) in scenario.pairs().iter().zip(scenario.pair_indices()) {
        min_current[main] = min_current[main].min(pair.fault_current_main);
        min_current[backup] = min_current[backup].min(pair.fault_current_backup);
    }

    let mut lower = Vec::with_capacity(2 * r);
    let mut upper = Vec::with_capacity(2 * r);
    lower.resize(r, MIN_TDS);
    upper.resize(r, MAX_TDS);

    for (relay, &imin) in scenario.relays().iter().zip(&min_current) {
        if !imin.is_finite() {
            return Err(CoordError::degenerate(
                scenario.id(),
                relay,
                "relay does not appear in any pair",
            ));
        }
        let ceiling = MAX_PICKUP_FACTOR * imin;
        if ceiling < MIN_PICKUP {
            return Err(CoordError::degenerate(
                scenario.id(),
                relay,
                format!("pickup ceiling {ceiling} is below the minimum pickup {MIN_PICKUP}"),
            ));
        }
        lower.push(MIN_PICKUP);
        upper.push(ceiling);
    }

    tracing::debug!(genes = lower.len(), "derived search bounds");
    Ok(Bounds { lower, upper })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::scenario::RelayPair;

    #[test]
    fn test_pickup_ceiling_uses_min_current_on_either_side() {
        let mut b = Scenario::builder("s");
        b.add_pair("R1", "R2", 1000.0, 800.0).unwrap();
        b.add_pair("R2", "R3", 500.0, 300.0).unwrap();
        b.add_pair("R3", "R1", 900.0, 2000.0).unwrap();
        let bounds = derive_bounds(&b.build()).unwrap();

        assert_eq!(bounds.len(), 6);
        assert_eq!(bounds.tds(1), (MIN_TDS, MAX_TDS));
        // R1: min(1000 as main, 2000 as backup)
        assert!((bounds.pickup(0).1 - 600.0).abs() < 1e-9);
        // R2: min(800 as backup, 500 as main)
        assert!((bounds.pickup(1).1 - 300.0).abs() < 1e-9);
        // R3: min(300 as backup, 900 as main)
        assert!((bounds.pickup(2).1 - 180.0).abs() < 1e-9);
        assert_eq!(bounds.pickup(2).0, MIN_PICKUP);
    }

    #[test]
    fn test_empty_scenario_rejected() {
        let s = Scenario::builder("empty").build();
        let err = derive_bounds(&s).unwrap_err();
        assert_eq!(err.kind(), "EmptyScenario");
    }

    #[test]
    fn test_relay_without_pairs_is_degenerate() {
        let s = Scenario::from_parts(
            "s",
            vec!["A".into(), "B".into(), "C".into()],
            vec![RelayPair::new("A", "B", 100.0, 100.0)],
        )
        .unwrap();
        let err = derive_bounds(&s).unwrap_err();
        assert_eq!(
            err,
            CoordError::DegenerateScenario {
                scenario: "s".into(),
                relay: "C".into(),
                reason: "relay does not appear in any pair".into(),
            }
        );
    }

    #[test]
    fn test_tiny_fault_current_is_degenerate() {
        let mut b = Scenario::builder("s");
        b.add_pair("A", "B", 0.05, 100.0).unwrap();
        let err = derive_bounds(&b.build()).unwrap_err();
        assert_eq!(err.kind(), "DegenerateScenario");
    }

    #[test]
    fn test_new_validates() {
        assert!(Bounds::new(vec![0.0], vec![1.0]).is_ok());
        assert!(Bounds::new(vec![0.0, 0.0], vec![1.0]).is_err());
        assert!(Bounds::new(vec![], vec![]).is_err());
        assert!(Bounds::new(vec![2.0], vec![1.0]).is_err());
        assert!(Bounds::new(vec![0.0], vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn test_samples_stay_inside() {
        let bounds = Bounds::new(vec![0.05, 0.05, 1.0], vec![0.8, 600.0, 1.0]).unwrap();
        let mut rng = create_rng(3);
        for _ in 0..1000 {
            let genes = bounds.sample_all(&mut rng);
            assert!(bounds.contains(&genes));
        }
        // degenerate interval always yields its single point
        assert_eq!(bounds.sample(2, &mut rng), 1.0);
    }

    #[test]
    fn test_contains_checks_length() {
        let bounds = Bounds::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        assert!(!bounds.contains(&[0.5]));
        assert!(!bounds.contains(&[0.5, 1.5]));
        assert!(bounds.contains(&[0.0, 1.0]));
    }
}
