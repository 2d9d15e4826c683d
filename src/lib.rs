//! Popdyn: a library for simulating population growth over a bounded time horizon.
//!
//! Two cooperating components form the core: pure closed-form growth models
//! for producing population-over-time series (plotting/export), and a live
//! tick-driven simulation engine with stochastic per-individual variants of
//! exponential and logistic growth.

pub mod errors;
pub mod growth;
pub mod prelude;
pub mod simulation;

// Re-export commonly used types for convenient external access.
//
// These types form the public, stable surface that most consumers of the
// library will use when configuring and driving simulations. Re-exporting
// them here makes them available as `popdyn::Simulation`, `popdyn::Regime`,
// etc.
pub use simulation::{Phase, Regime, Simulation, SimulationConfig};
