//! Crate-wide error type.
//!
//! Every failure is scoped to a single scenario. Numeric trouble inside the
//! relay time model is never reported here; it is folded into the penalty
//! sentinel instead (see [`crate::timing::operating_time`]).

/// Errors raised while building scenarios, deriving bounds or running
/// an optimization.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordError {
    #[error("EmptyScenario: scenario {scenario} has {relays} relays and {pairs} pairs")]
    EmptyScenario {
        scenario: String,
        relays: usize,
        pairs: usize,
    },

    #[error("DegenerateScenario: relay {relay} in scenario {scenario}: {reason}")]
    DegenerateScenario {
        scenario: String,
        relay: String,
        reason: String,
    },

    #[error("UnknownRelay: relay {relay} is not part of scenario {scenario}")]
    UnknownRelay { scenario: String, relay: String },

    #[error("InvalidFaultCurrent: relay {relay} in scenario {scenario} has fault current {value}")]
    InvalidFaultCurrent {
        scenario: String,
        relay: String,
        value: f64,
    },

    #[error("InvalidPair: scenario {scenario}: {reason}")]
    InvalidPair { scenario: String, reason: String },

    #[error("InvalidConfig: {0}")]
    InvalidConfig(String),
}

impl CoordError {
    pub(crate) fn empty(scenario: &str, relays: usize, pairs: usize) -> Self {
        Self::EmptyScenario {
            scenario: scenario.to_string(),
            relays,
            pairs,
        }
    }

    pub(crate) fn degenerate(scenario: &str, relay: &str, reason: impl Into<String>) -> Self {
        Self::DegenerateScenario {
            scenario: scenario.to_string(),
            relay: relay.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_relay(scenario: &str, relay: &str) -> Self {
        Self::UnknownRelay {
            scenario: scenario.to_string(),
            relay: relay.to_string(),
        }
    }

    pub(crate) fn invalid_fault_current(scenario: &str, relay: &str, value: f64) -> Self {
        Self::InvalidFaultCurrent {
            scenario: scenario.to_string(),
            relay: relay.to_string(),
            value,
        }
    }

    pub(crate) fn invalid_pair(scenario: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPair {
            scenario: scenario.to_string(),
            reason: reason.into(),
        }
    }

    /// Short, stable name of the failure kind for batch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyScenario { .. } => "EmptyScenario",
            Self::DegenerateScenario { .. } => "DegenerateScenario",
            Self::UnknownRelay { .. } => "UnknownRelay",
            Self::InvalidFaultCurrent { .. } => "InvalidFaultCurrent",
            Self::InvalidPair { .. } => "InvalidPair",
            Self::InvalidConfig(_) => "InvalidConfig",
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CoordError>;
