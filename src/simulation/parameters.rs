//! Simulation parameters and configuration.
//!
//! This module provides the growth regime selector and the validated
//! parameter set a run requires. A `SimulationConfig` can be serialized to a
//! file and deserialized to fully reproduce a simulation setup.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// The selected growth model for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    /// Population grows by a fixed amount per unit time.
    Linear,
    /// Per-capita Bernoulli birth process approximating exponential growth.
    Exponential,
    /// Birth process with the per-trial chance scaled by crowding.
    Logistic,
    /// Per-capita Bernoulli death process; monotonic decrease.
    Decay,
}

impl Regime {
    /// Whether the regime requires a carrying capacity to be configured.
    pub fn requires_capacity(self) -> bool {
        matches!(self, Regime::Exponential | Regime::Logistic)
    }
}

/// The validated parameter set required before a run starts.
///
/// Built through the per-regime constructors ([`SimulationConfig::linear`]
/// and friends), each taking only the parameters that regime needs.
/// Construction is the validation boundary: an invalid combination never
/// produces a partially built config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Selected growth model
    pub regime: Regime,
    /// Growth (or decay) rate per simulated day
    pub growth_rate: f64,
    /// Population at `t = 0`
    pub initial_population: u64,
    /// Maximum population the environment can sustain
    /// (required for exponential/logistic)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrying_capacity: Option<u64>,
    /// Optional hard ceiling, independent of carrying capacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_population: Option<u64>,
    /// Time-scale multiplier applied to every tick delta
    #[serde(default = "default_speed")]
    pub simulation_speed: f64,
    /// Total simulated days the run may span
    pub simulation_duration: f64,
    /// Optional RNG seed for reproducibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_speed() -> f64 {
    1.0
}

impl SimulationConfig {
    /// Configure a linear run. Linear growth never requires a carrying
    /// capacity.
    pub fn linear(
        growth_rate: f64,
        initial_population: u64,
        simulation_duration: f64,
    ) -> Result<Self, ConfigError> {
        Self::build(
            Regime::Linear,
            growth_rate,
            initial_population,
            None,
            simulation_duration,
        )
    }

    /// Configure an exponential run with a hard carrying capacity.
    pub fn exponential(
        growth_rate: f64,
        initial_population: u64,
        carrying_capacity: u64,
        simulation_duration: f64,
    ) -> Result<Self, ConfigError> {
        Self::build(
            Regime::Exponential,
            growth_rate,
            initial_population,
            Some(carrying_capacity),
            simulation_duration,
        )
    }

    /// Configure a logistic run with a hard carrying capacity.
    pub fn logistic(
        growth_rate: f64,
        initial_population: u64,
        carrying_capacity: u64,
        simulation_duration: f64,
    ) -> Result<Self, ConfigError> {
        Self::build(
            Regime::Logistic,
            growth_rate,
            initial_population,
            Some(carrying_capacity),
            simulation_duration,
        )
    }

    /// Configure a decay run. The magnitude of `growth_rate` is used as the
    /// per-capita death chance scale.
    pub fn decay(
        growth_rate: f64,
        initial_population: u64,
        simulation_duration: f64,
    ) -> Result<Self, ConfigError> {
        Self::build(
            Regime::Decay,
            growth_rate,
            initial_population,
            None,
            simulation_duration,
        )
    }

    fn build(
        regime: Regime,
        growth_rate: f64,
        initial_population: u64,
        carrying_capacity: Option<u64>,
        simulation_duration: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            regime,
            growth_rate,
            initial_population,
            carrying_capacity,
            max_population: None,
            simulation_speed: default_speed(),
            simulation_duration,
            seed: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the time-scale multiplier (default 1.0).
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.simulation_speed = speed;
        self
    }

    /// Set a hard population ceiling that ends the run when reached.
    pub fn with_max_population(mut self, max_population: u64) -> Self {
        self.max_population = Some(max_population);
        self
    }

    /// Set the RNG seed for a reproducible trajectory.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the required-nonzero invariant for the chosen regime.
    ///
    /// Also the safety net for configs deserialized from a file, which
    /// bypass the per-regime constructors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.growth_rate == 0.0 {
            return Err(ConfigError::ZeroGrowthRate);
        }
        if self.initial_population == 0 {
            return Err(ConfigError::ZeroInitialPopulation);
        }
        if self.simulation_duration <= 0.0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.regime.requires_capacity() && self.carrying_capacity.unwrap_or(0) == 0 {
            return Err(ConfigError::ZeroCarryingCapacity);
        }
        Ok(())
    }
}
