//! Protective-relay coordination by steady-state genetic search.
//!
//! Given a network scenario (relays and the main/backup pairs between them,
//! with the fault currents each relay sees), this crate searches for
//! time-dial settings (TDS) and pickup currents that make every backup relay
//! trip at least one coordination time interval after its main relay, while
//! keeping operating times bounded.
//!
//! - **Scenario model**: relays in first-appearance order, pairs with
//!   resolved indices, and a validating builder.
//! - **Bounds**: per-relay TDS and pickup limits derived from the minimum
//!   fault current each relay sees.
//! - **Timing**: IEC standard-inverse operating time with a penalty sentinel
//!   instead of numeric errors, and the Total Miscoordination Time (TMT)
//!   score.
//! - **GA**: steady-state, duplicate-rejecting search with a per-run seeded
//!   generator, stagnation and budget termination.
//! - **Batch**: independent runs over many scenarios with failure isolation.
//!
//! # Architecture
//!
//! The crate is a pure computation layer: it consumes already-grouped
//! scenario data and returns settings mappings. It reads no files,
//! environment variables or command-line flags. Every run owns its
//! population and generator, so runs for different scenarios can execute
//! concurrently without coordination.
//!
//! # Example
//!
//! ```
//! use u_relaycoord::{derive_bounds, optimize, GaConfig, Scenario};
//!
//! let mut builder = Scenario::builder("scenario_1");
//! builder.add_pair("R1", "R2", 2400.0, 1900.0)?;
//! builder.add_pair("R2", "R3", 1500.0, 1100.0)?;
//! let scenario = builder.build();
//!
//! let bounds = derive_bounds(&scenario)?;
//! let result = optimize(&scenario, &bounds, 42, &GaConfig::fast())?;
//!
//! for (relay, setting) in result.settings.iter() {
//!     println!("{relay}: TDS={} pickup={}", setting.tds, setting.pickup);
//! }
//! # Ok::<(), u_relaycoord::CoordError>(())
//! ```

pub mod batch;
pub mod constants;
mod error;
pub mod ga;
mod optimize;
pub mod random;
pub mod scenario;
pub mod settings;
pub mod timing;

pub use error::{CoordError, Result};
pub use ga::{GaConfig, StopReason};
pub use optimize::{
    optimize, optimize_with_cancel, CoordinationProblem, Optimization, OptimizationMeta,
};
pub use scenario::{derive_bounds, Bounds, RelayPair, Scenario};
pub use settings::{extract_settings, RelaySetting, RelaySettings};
