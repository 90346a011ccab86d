//! Total Miscoordination Time (TMT).

use super::curve::operating_time;
use crate::constants::{CTI, MAX_TIME};
use crate::scenario::Scenario;

/// Penalty contributed by one pair given the main and backup operating times.
///
/// Adds the CTI shortfall `CTI − (t_backup − t_main)` when the margin is
/// too small, plus the overshoot `t_main − MAX_TIME` when the main relay is
/// too slow.
pub fn pair_penalty(t_main: f64, t_backup: f64) -> f64 {
    let mut penalty = 0.0;
    let gap = t_backup - t_main;
    if gap < CTI {
        penalty += CTI - gap;
    }
    if t_main > MAX_TIME {
        penalty += t_main - MAX_TIME;
    }
    penalty
}

/// Scores a settings vector against a scenario.
///
/// `genes` uses the TDS/pickup layout: `genes[..R]` are time-dial settings
/// and `genes[R..]` pickups, both in scenario relay order. The result is
/// never negative; zero means every pair is coordinated and every main
/// relay trips within `MAX_TIME`.
pub fn evaluate_tmt(genes: &[f64], scenario: &Scenario) -> f64 {
    let r = scenario.relay_count();
    debug_assert_eq!(genes.len(), 2 * r, "gene vector does not match scenario");
    let (tds, pickup) = genes.split_at(r);

    scenario
        .pairs()
        .iter()
        .zip(scenario.pair_indices())
        .map(|(pair, &(m, b))| {
            let t_main = operating_time(pair.fault_current_main, pickup[m], tds[m]);
            let t_backup = operating_time(pair.fault_current_backup, pickup[b], tds[b]);
            pair_penalty(t_main, t_backup)
        })
        .sum()
}
