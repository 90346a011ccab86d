//! Scenario data and search bounds.
//!
//! A [`Scenario`] is one network operating condition: the relays that take
//! part in it and the main/backup pairs that must stay coordinated, each
//! with the fault currents the two relays see. [`derive_bounds`] turns a
//! scenario into the per-gene search box used by the GA.
//!
//! # Key Types
//!
//! - [`RelayPair`]: One main/backup coordination relationship
//! - [`Scenario`]: Relays in first-appearance order plus their pairs
//! - [`ScenarioBuilder`]: Incremental, validating construction
//! - [`Bounds`]: Lower/upper limits for every gene

mod bounds;
mod model;

pub use bounds::{derive_bounds, Bounds};
pub use model::{RelayPair, Scenario, ScenarioBuilder};
