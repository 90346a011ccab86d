//! IEC inverse-time relay curve.

use crate::constants::{K, N, PENALTY_TIME};

/// Operating time of a relay seeing current `current` with the given
/// `pickup` and time-dial setting `tds`.
///
/// `t = tds · K / ((I / pickup)^N − 1)`, clamped to `[0, PENALTY_TIME]`.
///
/// Returns exactly [`PENALTY_TIME`] when the relay cannot see the fault
/// (`current <= pickup`) or when the evaluation is not finite. The search
/// relies on this never failing.
///
/// ```
/// use u_relaycoord::constants::PENALTY_TIME;
/// use u_relaycoord::timing::operating_time;
///
/// assert_eq!(operating_time(100.0, 150.0, 0.1), PENALTY_TIME);
/// let t = operating_time(1000.0, 100.0, 0.1);
/// assert!(t > 0.29 && t < 0.31);
/// ```
pub fn operating_time(current: f64, pickup: f64, tds: f64) -> f64 {
    // NaN inputs fail the comparison and land in the non-finite check below
    if current <= pickup {
        return PENALTY_TIME;
    }

    let ratio = current / pickup;
    if !ratio.is_finite() {
        return PENALTY_TIME;
    }
    let t = tds * K / (ratio.powf(N) - 1.0);
    if !t.is_finite() {
        return PENALTY_TIME;
    }
    t.clamp(0.0, PENALTY_TIME)
}
