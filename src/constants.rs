//! Physical and search constants.
//!
//! Values follow the IEC 60255 standard-inverse characteristic and the
//! coordination practice used for the distribution feeders this crate was
//! built for. They are deliberately not runtime-configurable.

/// IEC standard-inverse curve constant `k`.
pub const K: f64 = 0.14;

/// IEC standard-inverse curve exponent `α`.
pub const N: f64 = 0.02;

/// Coordination time interval: minimum backup-minus-main margin in seconds.
pub const CTI: f64 = 0.20;

/// Lower bound of the time-dial setting.
pub const MIN_TDS: f64 = 0.05;

/// Upper bound of the time-dial setting.
pub const MAX_TDS: f64 = 0.8;

/// Lower bound of the pickup current.
pub const MIN_PICKUP: f64 = 0.05;

/// Pickup ceiling as a fraction of the relay's minimum fault current.
pub const MAX_PICKUP_FACTOR: f64 = 0.6;

/// Maximum acceptable main-relay operating time in seconds.
pub const MAX_TIME: f64 = 10.0;

/// Operating time reported when a relay cannot see the fault or the curve
/// evaluation breaks down.
pub const PENALTY_TIME: f64 = MAX_TIME * 10.0;

/// Per-gene tolerance below which two candidates count as the same point.
pub const DUPLICATE_TOLERANCE: f64 = 1e-12;

/// Decimal places kept in extracted relay settings.
pub const SETTINGS_DECIMALS: i32 = 5;

/// TMT change in seconds below which two mappings are judged equally good.
pub const IMPROVEMENT_THRESHOLD: f64 = 1e-3;
