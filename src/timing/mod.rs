//! Relay timing and coordination scoring.
//!
//! - [`operating_time`]: IEC standard-inverse operating time of one relay
//! - [`evaluate_tmt`]: Total Miscoordination Time of a settings vector
//! - [`analyze`]: Per-pair timing report for a finished settings mapping
//! - [`compare`]: Baseline versus optimized TMT, classified
//!
//! # References
//!
//! - IEC 60255-151, *Functional requirements for over/under current protection*
//! - Urdaneta, Nadira & Pérez Jiménez (1988), "Optimal coordination of
//!   directional overcurrent relays in interconnected power systems"

mod analysis;
mod curve;
mod tmt;

pub use analysis::{
    analyze, compare, ComparisonStatus, CoordinationReport, PairTiming, TmtComparison,
};
pub use curve::operating_time;
pub use tmt::{evaluate_tmt, pair_penalty};
