//! Steady-state Genetic Algorithm.
//!
//! A real-coded, box-bounded GA in the Chu & Beasley style: every
//! generation breeds two children from two uniformly chosen parents, keeps
//! the better one, and lets it replace the worst member only if it is
//! strictly better and not a near-duplicate of an existing member.
//! Survival of the best member is therefore guaranteed without an explicit
//! elite set.
//!
//! # Core Types
//!
//! - [`GaProblem`]: Problem definition — bounds and evaluation
//! - [`Individual`]: Gene vector plus cached fitness
//! - [`Population`]: Fitness-sorted members with duplicate rejection
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, limits, presets)
//! - [`GaRunner`]: Executes the steady-state loop
//! - [`GaResult`]: Final result with convergence history
//!
//! # Submodules
//!
//! - [`operators`]: Single-point crossover and resetting mutation
//!
//! # References
//!
//! - Chu & Beasley (1997), "A genetic algorithm for the generalised
//!   assignment problem"
//! - Whitley (1989), "The GENITOR algorithm and selection pressure"

mod config;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use population::Population;
pub use runner::{GaResult, GaRunner, StopReason};
pub use selection::select_parents;
pub use types::{GaProblem, Individual};
