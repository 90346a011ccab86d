//! Relay settings extracted from an optimized gene vector.

use crate::constants::SETTINGS_DECIMALS;
use crate::error::{CoordError, Result};
use crate::ga::Individual;
use crate::scenario::Scenario;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Time-dial setting and pickup current of one relay.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelaySetting {
    pub tds: f64,
    pub pickup: f64,
}

/// Relay id to setting mapping, in scenario relay order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelaySettings {
    entries: Vec<(String, RelaySetting)>,
}

impl RelaySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `relay`, replacing any earlier value.
    pub fn insert(&mut self, relay: impl Into<String>, setting: RelaySetting) {
        let relay = relay.into();
        match self.entries.iter_mut().find(|(id, _)| *id == relay) {
            Some((_, slot)) => *slot = setting,
            None => self.entries.push((relay, setting)),
        }
    }

    pub fn get(&self, relay: &str) -> Option<&RelaySetting> {
        self.entries
            .iter()
            .find(|(id, _)| id == relay)
            .map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelaySetting)> {
        self.entries.iter().map(|(id, s)| (id.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, RelaySetting)> for RelaySettings {
    fn from_iter<T: IntoIterator<Item = (String, RelaySetting)>>(iter: T) -> Self {
        let mut settings = Self::new();
        for (relay, setting) in iter {
            settings.insert(relay, setting);
        }
        settings
    }
}

/// Splits the best individual into per-relay settings.
///
/// Values are rounded to five decimals, so a rounded pickup may exceed its
/// derived ceiling by less than `5e-6`.
///
/// # Errors
///
/// - [`CoordError::EmptyScenario`] when the scenario has no relays.
/// - [`CoordError::InvalidConfig`] when the gene vector length is not `2R`.
pub fn extract_settings(best: &Individual, scenario: &Scenario) -> Result<RelaySettings> {
    let r = scenario.relay_count();
    if r == 0 {
        return Err(CoordError::empty(scenario.id(), 0, scenario.pair_count()));
    }
    if best.genes.len() != 2 * r {
        return Err(CoordError::InvalidConfig(format!(
            "individual has {} genes, scenario {} needs {}",
            best.genes.len(),
            scenario.id(),
            2 * r
        )));
    }

    let (tds, pickup) = best.genes.split_at(r);
    Ok(scenario
        .relays()
        .iter()
        .zip(tds.iter().zip(pickup))
        .map(|(relay, (&tds, &pickup))| {
            (
                relay.clone(),
                RelaySetting {
                    tds: round_to(tds, SETTINGS_DECIMALS),
                    pickup: round_to(pickup, SETTINGS_DECIMALS),
                },
            )
        })
        .collect())
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Scenario {
        let mut b = Scenario::builder("s");
        b.add_pair("R1", "R2", 1000.0, 900.0).unwrap();
        b.add_pair("R2", "R3", 800.0, 700.0).unwrap();
        b.build()
    }

    #[test]
    fn test_extract_splits_and_rounds() {
        let best = Individual::new(vec![0.123456789, 0.2, 0.3, 10.000004, 20.5, 30.999996]);
        let settings = extract_settings(&best, &scenario()).unwrap();

        assert_eq!(settings.len(), 3);
        let names: Vec<&str> = settings.iter().map(|(id, _)| id).collect();
        assert_eq!(names, ["R1", "R2", "R3"]);
        assert_eq!(
            settings.get("R1"),
            Some(&RelaySetting {
                tds: 0.12346,
                pickup: 10.0
            })
        );
        assert_eq!(settings.get("R3").unwrap().pickup, 31.0);
        assert!(settings.get("R4").is_none());
    }

    #[test]
    fn test_extract_empty_scenario() {
        let empty = Scenario::builder("empty").build();
        let err = extract_settings(&Individual::new(vec![]), &empty).unwrap_err();
        assert_eq!(err.kind(), "EmptyScenario");
    }

    #[test]
    fn test_extract_length_mismatch() {
        let err = extract_settings(&Individual::new(vec![0.1, 1.0]), &scenario()).unwrap_err();
        assert_eq!(err.kind(), "InvalidConfig");
    }

    #[test]
    fn test_insert_replaces() {
        let mut settings = RelaySettings::new();
        settings.insert("A", RelaySetting { tds: 0.1, pickup: 1.0 });
        settings.insert("A", RelaySetting { tds: 0.2, pickup: 2.0 });
        assert_eq!(settings.len(), 1);
        assert_eq!(settings.get("A").unwrap().tds, 0.2);
    }
}
