//! Simulation engine, configuration, and run lifecycle.
//!
//! The most commonly used simulation types are re-exported here for
//! convenience so consumers can import them from `popdyn::simulation`.
//!
//! - `Simulation`: the tick-driven engine that owns one run and its state
//!   machine.
//! - `SimulationConfig`: the validated parameter set for a run, built
//!   through per-regime constructors.
//! - `Regime` / `Phase`: the growth model selector and the run lifecycle
//!   phase.

pub mod engine;
pub mod parameters;

pub use engine::{Phase, Simulation};
pub use parameters::{Regime, SimulationConfig};
