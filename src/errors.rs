//! Error types for configuration, engine control, and growth model evaluation.

use thiserror::Error;

use crate::simulation::Regime;

/// Errors raised when a simulation configuration fails validation.
///
/// A configuration is valid iff every field the chosen regime requires is
/// non-zero. Validation never partially constructs a config: on error the
/// caller gets exactly which field was rejected and nothing is mutated.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Growth rate of zero would freeze the population in place.
    #[error("growth rate must be non-zero")]
    ZeroGrowthRate,

    /// A run must begin with at least one individual.
    #[error("initial population must be greater than zero")]
    ZeroInitialPopulation,

    /// Exponential and logistic regimes require a positive carrying capacity.
    #[error("carrying capacity must be greater than zero")]
    ZeroCarryingCapacity,

    /// The run must span a positive number of simulated days.
    #[error("simulation duration must be greater than zero")]
    ZeroDuration,
}

/// Errors raised by engine control calls made in the wrong phase.
///
/// Redundant transitions (starting while running, pausing while paused) are
/// deliberately *not* errors; they log a warning and leave the state machine
/// unchanged so repeated calls stay idempotent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// `start()` or `pause()` was called before any successful configuration.
    #[error("simulation has not been configured")]
    NotConfigured,

    /// `configure()` was called while a run was in progress; the new config
    /// was rejected and the run is unchanged.
    #[error("a run is in progress; pause is not a reset")]
    RunInProgress,

    /// The supplied configuration failed validation.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Errors raised by closed-form growth model evaluation.
///
/// Unlike the warning-grade conditions above, these indicate a caller bug
/// (undefined arithmetic domain) and must be handled explicitly.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GrowthError {
    /// The logistic formula divides by the initial population.
    #[error("logistic model is undefined for an initial population of zero")]
    ZeroInitialPopulation,

    /// The logistic formula is undefined for a non-positive carrying capacity.
    #[error("carrying capacity must be greater than zero")]
    ZeroCarryingCapacity,

    /// A series was requested for the logistic regime without a capacity.
    #[error("carrying capacity is required for the logistic series")]
    MissingCapacity,

    /// The regime has no closed-form curve to sample.
    #[error("the {0:?} regime has no closed-form series")]
    NoClosedForm(Regime),
}
