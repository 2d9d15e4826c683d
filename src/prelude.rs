//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use popdyn::prelude::*;
//!
//! let mut sim = Simulation::new();
//! sim.set_linear(2.0, 10, 100.0).unwrap();
//! sim.start().unwrap();
//! sim.tick(1.0);
//! assert_eq!(sim.current_population(), 12);
//! ```

pub use crate::errors::{ConfigError, EngineError, GrowthError};
pub use crate::simulation::{Phase, Regime, Simulation, SimulationConfig};

// Growth model re-exports
pub use crate::growth::{
    compute_series, exponential_population_at, exponential_population_map, linear_population_at,
    linear_population_map, logistic_population_at, logistic_population_map,
};
