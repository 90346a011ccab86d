//! Relay pairs and scenarios.

use crate::error::{CoordError, Result};
use crate::settings::{RelaySetting, RelaySettings};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Label used for pairs that carry no fault-type information.
const UNKNOWN_FAULT: &str = "unknown";

/// A main/backup protection relationship for one fault location.
///
/// `fault_current_main` is the short-circuit current seen by the main relay
/// and `fault_current_backup` the current seen by the backup relay for the
/// same fault. Both are strictly positive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelayPair {
    pub main_relay: String,
    pub backup_relay: String,
    pub fault_current_main: f64,
    pub fault_current_backup: f64,
    /// Optional fault-type label (e.g. `"3ph"`, `"SLG"`).
    pub fault: Option<String>,
}

impl RelayPair {
    /// Creates an unlabeled pair.
    pub fn new(
        main_relay: impl Into<String>,
        backup_relay: impl Into<String>,
        fault_current_main: f64,
        fault_current_backup: f64,
    ) -> Self {
        Self {
            main_relay: main_relay.into(),
            backup_relay: backup_relay.into(),
            fault_current_main,
            fault_current_backup,
            fault: None,
        }
    }

    /// Attaches a fault-type label.
    pub fn with_fault(mut self, fault: impl Into<String>) -> Self {
        self.fault = Some(fault.into());
        self
    }
}

/// One operating scenario of the protected network.
///
/// Relays are kept in first-appearance order; that order defines the gene
/// layout of every candidate solution. Pair endpoints are resolved to relay
/// indices once, at construction.
///
/// A scenario may also carry the settings the relays were commissioned with,
/// used as the baseline when judging an optimized mapping.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Scenario {
    id: String,
    relays: Vec<String>,
    pairs: Vec<RelayPair>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pair_indices: Vec<(usize, usize)>,
    initial_settings: RelaySettings,
}

impl Scenario {
    /// Builds a scenario from an explicit relay list and pair list.
    ///
    /// Fails when a relay id is repeated, a pair references a relay that is
    /// not listed, or a fault current is not strictly positive and finite.
    /// An empty scenario is accepted here; it is rejected when bounds are
    /// derived or an optimization is started.
    pub fn from_parts(
        id: impl Into<String>,
        relays: Vec<String>,
        pairs: Vec<RelayPair>,
    ) -> Result<Self> {
        let id = id.into();
        let mut index = HashMap::with_capacity(relays.len());
        for (i, relay) in relays.iter().enumerate() {
            if index.insert(relay.clone(), i).is_some() {
                return Err(CoordError::invalid_pair(
                    &id,
                    format!("relay {relay} listed twice"),
                ));
            }
        }

        let mut pair_indices = Vec::with_capacity(pairs.len());
        for pair in &pairs {
            check_currents(&id, pair)?;
            let main = *index
                .get(&pair.main_relay)
                .ok_or_else(|| CoordError::unknown_relay(&id, &pair.main_relay))?;
            let backup = *index
                .get(&pair.backup_relay)
                .ok_or_else(|| CoordError::unknown_relay(&id, &pair.backup_relay))?;
            pair_indices.push((main, backup));
        }

        Ok(Self {
            id,
            relays,
            pairs,
            pair_indices,
            initial_settings: RelaySettings::new(),
        })
    }

    /// Attaches baseline settings, replacing any already present.
    pub fn with_initial_settings(mut self, settings: RelaySettings) -> Self {
        self.initial_settings = settings;
        self
    }

    /// Starts a builder for scenario `id`.
    pub fn builder(id: impl Into<String>) -> ScenarioBuilder {
        ScenarioBuilder::new(id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Relay ids in first-appearance order.
    pub fn relays(&self) -> &[String] {
        &self.relays
    }

    pub fn pairs(&self) -> &[RelayPair] {
        &self.pairs
    }

    pub fn relay_count(&self) -> usize {
        self.relays.len()
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// `(main, backup)` relay indices for each pair, aligned with [`pairs`](Self::pairs).
    pub fn pair_indices(&self) -> &[(usize, usize)] {
        &self.pair_indices
    }

    /// Index of `relay` in the gene layout.
    pub fn relay_index(&self, relay: &str) -> Option<usize> {
        self.relays.iter().position(|r| r == relay)
    }

    /// Baseline settings, possibly empty or covering only some relays.
    pub fn initial_settings(&self) -> &RelaySettings {
        &self.initial_settings
    }

    /// True when the scenario has no relays or no pairs.
    pub fn is_empty(&self) -> bool {
        self.relays.is_empty() || self.pairs.is_empty()
    }

    /// Distinct fault-type labels in first-seen order.
    ///
    /// Unlabeled pairs are reported as `"unknown"`.
    pub fn fault_types(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for pair in &self.pairs {
            let label = pair.fault.as_deref().unwrap_or(UNKNOWN_FAULT);
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        seen
    }

    /// Lists the reasons this scenario is too small to be worth optimizing.
    ///
    /// An empty list means the scenario passes.
    pub fn size_issues(&self, min_pairs: usize, min_relays: usize) -> Vec<String> {
        if self.pairs.is_empty() {
            return vec!["No valid pairs found".to_string()];
        }
        if self.relays.is_empty() {
            return vec!["No relays identified".to_string()];
        }

        let mut issues = Vec::new();
        if self.pairs.len() < min_pairs {
            issues.push(format!("Too few pairs ({})", self.pairs.len()));
        }
        if self.relays.len() < min_relays {
            issues.push(format!("Too few relays ({})", self.relays.len()));
        }
        issues
    }
}

/// Incremental scenario construction.
///
/// Relays are registered the first time they appear in a pair, which fixes
/// the gene layout of the resulting [`Scenario`].
///
/// ```
/// use u_relaycoord::scenario::Scenario;
///
/// let mut builder = Scenario::builder("scenario_1");
/// builder.add_pair("R1", "R2", 1200.0, 950.0)?;
/// builder.add_pair("R2", "R3", 900.0, 700.0)?;
/// let scenario = builder.build();
///
/// assert_eq!(scenario.relays(), ["R1", "R2", "R3"]);
/// # Ok::<(), u_relaycoord::CoordError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    id: String,
    relays: Vec<String>,
    index: HashMap<String, usize>,
    pairs: Vec<RelayPair>,
    pair_indices: Vec<(usize, usize)>,
    initial_settings: RelaySettings,
}

impl ScenarioBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            relays: Vec::new(),
            index: HashMap::new(),
            pairs: Vec::new(),
            pair_indices: Vec::new(),
            initial_settings: RelaySettings::new(),
        }
    }

    /// Adds an unlabeled main/backup pair.
    pub fn add_pair(
        &mut self,
        main: &str,
        backup: &str,
        fault_current_main: f64,
        fault_current_backup: f64,
    ) -> Result<&mut Self> {
        self.push(RelayPair::new(
            main.trim(),
            backup.trim(),
            fault_current_main,
            fault_current_backup,
        ))
    }

    /// Adds a pair carrying a fault-type label.
    pub fn add_labeled_pair(
        &mut self,
        main: &str,
        backup: &str,
        fault_current_main: f64,
        fault_current_backup: f64,
        fault: &str,
    ) -> Result<&mut Self> {
        self.push(
            RelayPair::new(
                main.trim(),
                backup.trim(),
                fault_current_main,
                fault_current_backup,
            )
            .with_fault(fault),
        )
    }

    /// Adds an already-built pair.
    pub fn push(&mut self, pair: RelayPair) -> Result<&mut Self> {
        if pair.main_relay.is_empty() || pair.backup_relay.is_empty() {
            return Err(CoordError::invalid_pair(&self.id, "relay name is empty"));
        }
        check_currents(&self.id, &pair)?;

        let main = self.register(&pair.main_relay);
        let backup = self.register(&pair.backup_relay);
        self.pair_indices.push((main, backup));
        self.pairs.push(pair);
        Ok(self)
    }

    /// Records the commissioned setting of `relay`.
    ///
    /// Only the first value seen for a relay is kept, since raw records
    /// repeat each relay once per pair it takes part in.
    pub fn with_initial_setting(&mut self, relay: &str, tds: f64, pickup: f64) -> &mut Self {
        let relay = relay.trim();
        if !relay.is_empty() && self.initial_settings.get(relay).is_none() {
            self.initial_settings.insert(relay, RelaySetting { tds, pickup });
        }
        self
    }

    pub fn build(self) -> Scenario {
        Scenario {
            id: self.id,
            relays: self.relays,
            pairs: self.pairs,
            pair_indices: self.pair_indices,
            initial_settings: self.initial_settings,
        }
    }

    fn register(&mut self, relay: &str) -> usize {
        if let Some(&i) = self.index.get(relay) {
            return i;
        }
        let i = self.relays.len();
        self.relays.push(relay.to_string());
        self.index.insert(relay.to_string(), i);
        i
    }
}

fn check_currents(scenario: &str, pair: &RelayPair) -> Result<()> {
    for (relay, value) in [
        (&pair.main_relay, pair.fault_current_main),
        (&pair.backup_relay, pair.fault_current_backup),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(CoordError::invalid_fault_current(scenario, relay, value));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feeder() -> Scenario {
        let mut b = Scenario::builder("feeder");
        b.add_labeled_pair("R1", "R2", 3000.0, 2500.0, "3ph")
            .unwrap()
            .add_labeled_pair("R2", "R3", 2200.0, 1800.0, "SLG")
            .unwrap()
            .add_labeled_pair("R1", "R3", 2900.0, 1700.0, "3ph")
            .unwrap();
        b.build()
    }

    #[test]
    fn test_relays_in_first_appearance_order() {
        let s = feeder();
        assert_eq!(s.relays(), ["R1", "R2", "R3"]);
        assert_eq!(s.pair_indices(), [(0, 1), (1, 2), (0, 2)]);
        assert_eq!(s.relay_index("R3"), Some(2));
        assert_eq!(s.relay_index("R9"), None);
    }

    #[test]
    fn test_fault_types_distinct_in_order() {
        let s = feeder();
        assert_eq!(s.fault_types(), ["3ph", "SLG"]);

        let mut b = Scenario::builder("plain");
        b.add_pair("A", "B", 10.0, 10.0).unwrap();
        assert_eq!(b.build().fault_types(), ["unknown"]);
    }

    #[test]
    fn test_builder_trims_names() {
        let mut b = Scenario::builder("s");
        b.add_pair(" R1 ", "R2", 10.0, 10.0).unwrap();
        b.add_pair("R1", "R2 ", 10.0, 10.0).unwrap();
        let s = b.build();
        assert_eq!(s.relay_count(), 2);
    }

    #[test]
    fn test_builder_rejects_bad_currents() {
        let mut b = Scenario::builder("s");
        let err = b.add_pair("R1", "R2", 0.0, 10.0).unwrap_err();
        assert_eq!(err.kind(), "InvalidFaultCurrent");
        let err = b.add_pair("R1", "R2", 10.0, f64::NAN).unwrap_err();
        assert_eq!(err.kind(), "InvalidFaultCurrent");
        // rejected pairs leave no trace
        assert!(b.build().is_empty());
    }

    #[test]
    fn test_builder_rejects_empty_names() {
        let mut b = Scenario::builder("s");
        let err = b.add_pair("  ", "R2", 10.0, 10.0).unwrap_err();
        assert_eq!(err.kind(), "InvalidPair");
    }

    #[test]
    fn test_from_parts_checks_endpoints() {
        let pairs = vec![RelayPair::new("A", "C", 100.0, 100.0)];
        let err = Scenario::from_parts("s", vec!["A".into(), "B".into()], pairs).unwrap_err();
        assert_eq!(
            err,
            CoordError::UnknownRelay {
                scenario: "s".into(),
                relay: "C".into()
            }
        );
    }

    #[test]
    fn test_from_parts_rejects_repeated_relay() {
        let err = Scenario::from_parts("s", vec!["A".into(), "A".into()], vec![]).unwrap_err();
        assert_eq!(err.kind(), "InvalidPair");
    }

    #[test]
    fn test_from_parts_matches_builder() {
        let built = feeder();
        let parts = Scenario::from_parts(
            "feeder",
            built.relays().to_vec(),
            built.pairs().to_vec(),
        )
        .unwrap();
        assert_eq!(parts, built);
    }

    #[test]
    fn test_initial_settings_keep_first_value() {
        let mut b = Scenario::builder("s");
        b.add_pair("R1", "R2", 10.0, 10.0).unwrap();
        b.with_initial_setting(" R1", 0.1, 2.0)
            .with_initial_setting("R1", 0.7, 5.0)
            .with_initial_setting("R2", 0.2, 3.0)
            .with_initial_setting("", 0.3, 1.0);
        let s = b.build();

        let initial = s.initial_settings();
        assert_eq!(initial.len(), 2);
        assert_eq!(initial.get("R1"), Some(&RelaySetting { tds: 0.1, pickup: 2.0 }));
        assert_eq!(initial.get("R2").map(|r| r.tds), Some(0.2));
    }

    #[test]
    fn test_from_parts_has_no_baseline_until_attached() {
        let built = feeder();
        let parts =
            Scenario::from_parts("feeder", built.relays().to_vec(), built.pairs().to_vec())
                .unwrap();
        assert!(parts.initial_settings().is_empty());

        let mut baseline = RelaySettings::new();
        baseline.insert("R1", RelaySetting { tds: 0.1, pickup: 1.0 });
        let parts = parts.with_initial_settings(baseline.clone());
        assert_eq!(parts.initial_settings(), &baseline);
    }

    #[test]
    fn test_size_issues() {
        let s = feeder();
        assert!(s.size_issues(1, 1).is_empty());
        assert_eq!(
            s.size_issues(5, 3),
            vec!["Too few pairs (3)".to_string()]
        );
        assert_eq!(
            s.size_issues(5, 4),
            vec!["Too few pairs (3)".to_string(), "Too few relays (3)".to_string()]
        );

        let empty = Scenario::builder("empty").build();
        assert_eq!(empty.size_issues(1, 1), vec!["No valid pairs found".to_string()]);
    }
}
