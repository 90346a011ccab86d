//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the steady-state loop.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the steady-state Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_relaycoord::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 80);
/// assert_eq!(config.max_generations, 50_000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_relaycoord::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_max_generations(2_000)
///     .with_stagnation_limit(500)
///     .with_mutation_count(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population (`Ni`).
    pub population_size: usize,

    /// Hard cap on generations (`maxGen`). One generation is one insertion
    /// attempt.
    pub max_generations: usize,

    /// Generations without improvement of the best solution before stopping
    /// (`iterno`).
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Genes reset by mutation in each child (`nMut`).
    ///
    /// Capped at the gene count when the problem is smaller.
    pub mutation_count: usize,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// The check happens at the start of each generation, so the actual
    /// runtime may exceed the limit by one generation's worth of work.
    ///
    /// `None` disables time-based termination (the default).
    pub time_limit_ms: Option<u64>,

    /// Emit a progress event every this many generations. 0 disables it.
    pub log_interval: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self::thorough()
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the number of genes reset per child.
    pub fn with_mutation_count(mut self, n: usize) -> Self {
        self.mutation_count = n;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Sets the progress logging interval (0 to disable).
    pub fn with_log_interval(mut self, n: usize) -> Self {
        self.log_interval = n;
        self
    }

    /// Preset for quick runs: 1 000 generations, stagnation after 1 000.
    pub fn fast() -> Self {
        Self {
            population_size: 80,
            max_generations: 1_000,
            stagnation_limit: 1_000,
            mutation_count: 2,
            time_limit_ms: None,
            log_interval: 100,
        }
    }

    /// Preset for full studies: 50 000 generations, stagnation after 50 000.
    pub fn thorough() -> Self {
        Self {
            max_generations: 50_000,
            stagnation_limit: 50_000,
            ..Self::fast()
        }
    }

    /// Selects a preset from the number of relays in the scenario.
    ///
    /// - `relays < 10` → [`fast()`](Self::fast)
    /// - `relays ≥ 10` → [`thorough()`](Self::thorough)
    pub fn auto_select(relays: usize) -> Self {
        if relays < 10 {
            Self::fast()
        } else {
            Self::thorough()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.mutation_count == 0 {
            return Err("mutation_count must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}
