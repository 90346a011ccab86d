//! Per-pair coordination report for a settings mapping, and comparison of
//! an optimized mapping against the commissioned baseline.

use super::curve::operating_time;
use super::tmt::pair_penalty;
use crate::constants::{CTI, IMPROVEMENT_THRESHOLD};
use crate::error::{CoordError, Result};
use crate::scenario::Scenario;
use crate::settings::{RelaySetting, RelaySettings};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operating times of one main/backup pair.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PairTiming {
    pub main_relay: String,
    pub backup_relay: String,
    pub t_main: f64,
    pub t_backup: f64,
    /// `(t_backup − t_main) − CTI`; negative means miscoordinated.
    pub margin: f64,
    pub coordinated: bool,
}

/// Coordination summary of a whole scenario.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinationReport {
    pub scenario: String,
    pub pairs: Vec<PairTiming>,
    /// Same score the optimizer minimizes.
    pub tmt: f64,
}

impl CoordinationReport {
    /// Fraction of pairs with a non-negative margin, in `[0, 1]`.
    pub fn coordinated_ratio(&self) -> f64 {
        if self.pairs.is_empty() {
            return 0.0;
        }
        let ok = self.pairs.iter().filter(|p| p.coordinated).count();
        ok as f64 / self.pairs.len() as f64
    }

    /// Sum of the negative margins. Zero when every pair is coordinated.
    pub fn miscoordination_sum(&self) -> f64 {
        self.pairs.iter().map(|p| p.margin.min(0.0)).sum()
    }

    /// The `n` pairs with the smallest margin, worst first.
    pub fn worst_pairs(&self, n: usize) -> Vec<&PairTiming> {
        let mut sorted: Vec<&PairTiming> = self.pairs.iter().collect();
        sorted.sort_by(|a, b| a.margin.total_cmp(&b.margin));
        sorted.truncate(n);
        sorted
    }
}

/// Evaluates a settings mapping against every pair of a scenario.
///
/// # Errors
///
/// [`CoordError::UnknownRelay`] when a relay of the scenario has no setting.
pub fn analyze(scenario: &Scenario, settings: &RelaySettings) -> Result<CoordinationReport> {
    let mut pairs = Vec::with_capacity(scenario.pair_count());
    let mut tmt = 0.0;
    for pair in scenario.pairs() {
        let main = setting_for(scenario, settings, &pair.main_relay)?;
        let backup = setting_for(scenario, settings, &pair.backup_relay)?;
        let t_main = operating_time(pair.fault_current_main, main.pickup, main.tds);
        let t_backup = operating_time(pair.fault_current_backup, backup.pickup, backup.tds);
        let margin = (t_backup - t_main) - CTI;

        tmt += pair_penalty(t_main, t_backup);
        pairs.push(PairTiming {
            main_relay: pair.main_relay.clone(),
            backup_relay: pair.backup_relay.clone(),
            t_main,
            t_backup,
            margin,
            coordinated: margin >= 0.0,
        });
    }

    Ok(CoordinationReport {
        scenario: scenario.id().to_string(),
        pairs,
        tmt,
    })
}

/// Direction of the TMT change between a baseline and an optimized mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComparisonStatus {
    Improved,
    Degraded,
    /// The change is within [`IMPROVEMENT_THRESHOLD`] either way.
    Unchanged,
}

/// TMT of a baseline mapping next to that of an optimized one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TmtComparison {
    pub scenario: String,
    pub baseline_tmt: f64,
    pub optimized_tmt: f64,
    /// `baseline_tmt − optimized_tmt`; positive when the optimized mapping
    /// miscoordinates less.
    pub improvement: f64,
    pub status: ComparisonStatus,
}

impl TmtComparison {
    /// Improvement relative to the baseline, in percent. Zero when the
    /// baseline was already fully coordinated.
    pub fn improvement_percent(&self) -> f64 {
        if self.baseline_tmt == 0.0 {
            return 0.0;
        }
        self.improvement / self.baseline_tmt.abs() * 100.0
    }
}

/// Scores `initial` and `optimized` on the same scenario and classifies the
/// change.
///
/// A typical baseline is [`Scenario::initial_settings`].
///
/// # Errors
///
/// [`CoordError::UnknownRelay`] when either mapping lacks a relay of the
/// scenario.
pub fn compare(
    scenario: &Scenario,
    initial: &RelaySettings,
    optimized: &RelaySettings,
) -> Result<TmtComparison> {
    let baseline_tmt = analyze(scenario, initial)?.tmt;
    let optimized_tmt = analyze(scenario, optimized)?.tmt;
    let improvement = baseline_tmt - optimized_tmt;

    let status = if improvement > IMPROVEMENT_THRESHOLD {
        ComparisonStatus::Improved
    } else if improvement < -IMPROVEMENT_THRESHOLD {
        ComparisonStatus::Degraded
    } else {
        ComparisonStatus::Unchanged
    };

    Ok(TmtComparison {
        scenario: scenario.id().to_string(),
        baseline_tmt,
        optimized_tmt,
        improvement,
        status,
    })
}

fn setting_for<'a>(
    scenario: &Scenario,
    settings: &'a RelaySettings,
    relay: &str,
) -> Result<&'a RelaySetting> {
    settings
        .get(relay)
        .ok_or_else(|| CoordError::unknown_relay(scenario.id(), relay))
}
