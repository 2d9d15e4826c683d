//! Live tick-driven simulation engine.
//!
//! The engine owns one run: its configuration, its mutable state, and the
//! phase state machine `Unconfigured → Configured → Running ⇄ Paused →
//! Ended`. `Ended` is terminal for the run; configuring again starts a fresh
//! run on the same instance. An external driver advances the run by calling
//! [`Simulation::tick`] once per scheduling frame; nothing happens between
//! ticks.

use std::fmt;

use log::warn;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::errors::{ConfigError, EngineError};
use crate::growth;
use crate::simulation::{Regime, SimulationConfig};

/// Lifecycle phase of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No configuration has been accepted yet.
    #[default]
    Unconfigured,
    /// Configured and ready to start.
    Configured,
    /// Advancing on every tick.
    Running,
    /// Configured mid-run, not advancing.
    Paused,
    /// The run finished; state is frozen until re-configuration.
    Ended,
}

type EndedCallback = Box<dyn FnMut()>;

/// The simulation engine.
///
/// Single-threaded and cooperative: every operation runs to completion
/// synchronously, and the engine exclusively owns its config and run state.
/// Randomness for the stochastic steppers comes from a seedable generator
/// (using Xoshiro256++, the same generator used for reproducible runs
/// elsewhere in this stack); a config with a fixed seed reproduces an
/// identical population trajectory.
pub struct Simulation {
    /// Accepted configuration, if any
    config: Option<SimulationConfig>,
    /// Simulated days elapsed; clamped to the duration at termination
    time_elapsed: f64,
    /// Population after the most recent tick
    current_population: u64,
    /// State machine phase
    phase: Phase,
    /// Random number generator for the per-individual Bernoulli trials
    rng: Xoshiro256PlusPlus,
    /// Subscribers notified exactly once per run, on entering `Ended`
    ended_callbacks: Vec<EndedCallback>,
}

impl Simulation {
    /// Create an unconfigured engine.
    pub fn new() -> Self {
        Self {
            config: None,
            time_elapsed: 0.0,
            current_population: 0,
            phase: Phase::Unconfigured,
            rng: Xoshiro256PlusPlus::from_seed(rand::rng().random()),
            ended_callbacks: Vec::new(),
        }
    }

    /// Accept a configuration and reset the run state.
    ///
    /// Valid from `Unconfigured`, `Configured`, or `Ended` (starting a fresh
    /// run). While `Running` or `Paused` the call is rejected with a warning
    /// and [`EngineError::RunInProgress`], so callers can tell an accepted
    /// config from a dropped one. An invalid config leaves the engine
    /// exactly as it was, in its prior phase.
    pub fn configure(&mut self, config: SimulationConfig) -> Result<(), EngineError> {
        if matches!(self.phase, Phase::Running | Phase::Paused) {
            warn!("configure rejected: a run is in progress; pause is not a reset");
            return Err(EngineError::RunInProgress);
        }
        if let Err(e) = config.validate() {
            warn!("invalid configuration rejected: {e}");
            return Err(e.into());
        }

        self.rng = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        };
        self.time_elapsed = 0.0;
        self.current_population = config.initial_population;
        self.config = Some(config);
        self.phase = Phase::Configured;
        Ok(())
    }

    /// Configure a linear run. See [`SimulationConfig::linear`].
    pub fn set_linear(
        &mut self,
        growth_rate: f64,
        initial_population: u64,
        simulation_duration: f64,
    ) -> Result<(), EngineError> {
        self.configure(SimulationConfig::linear(
            growth_rate,
            initial_population,
            simulation_duration,
        )?)
    }

    /// Configure an exponential run. See [`SimulationConfig::exponential`].
    pub fn set_exponential(
        &mut self,
        growth_rate: f64,
        initial_population: u64,
        carrying_capacity: u64,
        simulation_duration: f64,
    ) -> Result<(), EngineError> {
        self.configure(SimulationConfig::exponential(
            growth_rate,
            initial_population,
            carrying_capacity,
            simulation_duration,
        )?)
    }

    /// Configure a logistic run. See [`SimulationConfig::logistic`].
    pub fn set_logistic(
        &mut self,
        growth_rate: f64,
        initial_population: u64,
        carrying_capacity: u64,
        simulation_duration: f64,
    ) -> Result<(), EngineError> {
        self.configure(SimulationConfig::logistic(
            growth_rate,
            initial_population,
            carrying_capacity,
            simulation_duration,
        )?)
    }

    /// Configure a decay run. See [`SimulationConfig::decay`].
    pub fn set_decay(
        &mut self,
        growth_rate: f64,
        initial_population: u64,
        simulation_duration: f64,
    ) -> Result<(), EngineError> {
        self.configure(SimulationConfig::decay(
            growth_rate,
            initial_population,
            simulation_duration,
        )?)
    }

    /// Begin (or resume) advancing on ticks.
    ///
    /// Valid from `Configured` or `Paused`. Calling while already `Running`
    /// is an idempotent no-op with a warning; calling after `Ended` warns
    /// that a fresh configuration is needed.
    pub fn start(&mut self) -> Result<(), EngineError> {
        match self.phase {
            Phase::Configured | Phase::Paused => {
                self.phase = Phase::Running;
                Ok(())
            }
            Phase::Running => {
                warn!("start ignored: simulation is already running");
                Ok(())
            }
            Phase::Ended => {
                warn!("start ignored: the run has ended; configure a new run first");
                Ok(())
            }
            Phase::Unconfigured => {
                warn!("start failed: simulation has not been configured");
                Err(EngineError::NotConfigured)
            }
        }
    }

    /// Stop advancing on ticks without ending the run.
    ///
    /// Valid from `Running`. Calling while already `Paused` is an idempotent
    /// no-op with a warning.
    pub fn pause(&mut self) -> Result<(), EngineError> {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                Ok(())
            }
            Phase::Paused => {
                warn!("pause ignored: simulation is already paused");
                Ok(())
            }
            Phase::Configured | Phase::Ended => {
                warn!("pause ignored: simulation is not running");
                Ok(())
            }
            Phase::Unconfigured => {
                warn!("pause failed: simulation has not been configured");
                Err(EngineError::NotConfigured)
            }
        }
    }

    /// Advance the run by one frame's worth of simulated time.
    ///
    /// Only does work while `Running`: elapsed time advances by
    /// `delta_time * simulation_speed`, the regime stepper updates the
    /// population, and the termination predicates are evaluated. In every
    /// other phase the tick is ignored (`Unconfigured` logs a warning).
    pub fn tick(&mut self, delta_time: f64) {
        match self.phase {
            Phase::Running => {}
            Phase::Unconfigured => {
                warn!("tick ignored: simulation has not been configured");
                return;
            }
            _ => return,
        }
        let Some(config) = self.config.clone() else {
            return;
        };

        let dt = delta_time * config.simulation_speed;
        self.time_elapsed += dt;
        self.current_population = self.step_population(&config, dt);

        // Termination: the look-ahead duration check ends the run on the
        // tick that would otherwise overshoot the duration.
        let duration_reached = self.time_elapsed >= config.simulation_duration - dt;
        let extinct = self.current_population == 0;
        let ceiling_hit = config
            .max_population
            .is_some_and(|max| self.current_population >= max);

        if duration_reached || extinct || ceiling_hit {
            self.time_elapsed = config.simulation_duration;
            self.phase = Phase::Ended;
            for callback in &mut self.ended_callbacks {
                callback();
            }
        }
    }

    /// Dispatch to the regime stepper and return the new population.
    fn step_population(&mut self, config: &SimulationConfig, dt: f64) -> u64 {
        match config.regime {
            // Closed-form re-evaluation at the new elapsed time; stateless
            // with respect to the previous tick's population.
            Regime::Linear => growth::linear_population_at(
                config.initial_population,
                config.growth_rate,
                self.time_elapsed,
            ),
            Regime::Exponential => {
                let capacity = config.carrying_capacity.unwrap_or(u64::MAX);
                let chance = config.growth_rate * dt;
                self.step_births(chance, capacity)
            }
            Regime::Logistic => {
                let capacity = config.carrying_capacity.unwrap_or(u64::MAX);
                let crowding = 1.0 - self.current_population as f64 / capacity as f64;
                let chance = config.growth_rate * crowding * dt;
                self.step_births(chance, capacity)
            }
            Regime::Decay => self.step_deaths(config.growth_rate.abs() * dt),
        }
    }

    /// Per-capita Bernoulli birth process: one independent trial per
    /// individual present at the start of the tick.
    fn step_births(&mut self, chance: f64, capacity: u64) -> u64 {
        let mut births = 0u64;
        for _ in 0..self.current_population {
            if self.rng.random::<f64>() < chance {
                births += 1;
            }
        }
        (self.current_population + births).min(capacity)
    }

    /// Per-capita Bernoulli death process, symmetric to the birth process.
    fn step_deaths(&mut self, chance: f64) -> u64 {
        let mut deaths = 0u64;
        for _ in 0..self.current_population {
            if self.rng.random::<f64>() < chance {
                deaths += 1;
            }
        }
        self.current_population.saturating_sub(deaths)
    }

    /// Subscribe to the one-shot "simulation ended" notification.
    ///
    /// Fired exactly once per run, at the transition into `Ended`.
    /// Subscribers persist across re-configuration and fire again when the
    /// next run terminates.
    pub fn on_ended<F>(&mut self, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.ended_callbacks.push(Box::new(callback));
    }

    /// Simulated days elapsed in the current run.
    pub fn time_elapsed(&self) -> f64 {
        self.time_elapsed
    }

    /// Population after the most recent tick.
    pub fn current_population(&self) -> u64 {
        self.current_population
    }

    /// Current state machine phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether ticks currently advance the run.
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// The accepted configuration, if any.
    pub fn config(&self) -> Option<&SimulationConfig> {
        self.config.as_ref()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("phase", &self.phase)
            .field("time_elapsed", &self.time_elapsed)
            .field("current_population", &self.current_population)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
