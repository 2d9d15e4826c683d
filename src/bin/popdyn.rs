//! Popdyn CLI - Command-line interface for population growth simulations.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use popdyn::growth;
use popdyn::{Regime, Simulation, SimulationConfig};
use std::fs;
use std::path::PathBuf;

/// Popdyn - Population growth simulator
#[derive(Parser, Debug)]
#[command(name = "popdyn")]
#[command(author, version, about = "Population growth simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a closed-form population series as CSV (time,population)
    Series {
        /// Growth regime: linear, exponential, or logistic
        #[arg(long)]
        regime: String,

        /// Initial population
        #[arg(short = 'p', long, default_value = "10")]
        initial_population: u64,

        /// Growth rate per simulated day
        #[arg(short = 'r', long, default_value = "1.0")]
        growth_rate: f64,

        /// Carrying capacity (logistic only)
        #[arg(short = 'k', long)]
        carrying_capacity: Option<u64>,

        /// Number of samples
        #[arg(short = 'n', long, default_value = "100")]
        samples: usize,

        /// Total simulated time to sample over (days)
        #[arg(short = 'T', long, default_value = "100")]
        total_time: f64,
    },

    /// Drive a live simulation to completion and print the final state
    Run {
        /// JSON config file (overrides the individual parameters)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Growth regime: linear, exponential, logistic, or decay
        #[arg(long, default_value = "linear")]
        regime: String,

        /// Initial population
        #[arg(short = 'p', long, default_value = "10")]
        initial_population: u64,

        /// Growth rate per simulated day
        #[arg(short = 'r', long, default_value = "1.0")]
        growth_rate: f64,

        /// Carrying capacity (exponential/logistic)
        #[arg(short = 'k', long)]
        carrying_capacity: Option<u64>,

        /// Hard population ceiling that ends the run when reached
        #[arg(long)]
        max_population: Option<u64>,

        /// Total simulated days
        #[arg(short = 'd', long, default_value = "100")]
        duration: f64,

        /// Time-scale multiplier
        #[arg(long, default_value = "1.0")]
        speed: f64,

        /// Simulated days advanced per tick
        #[arg(long, default_value = "1.0")]
        tick: f64,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Disable the progress bar
        #[arg(long)]
        no_progress: bool,
    },
}

fn parse_regime(name: &str) -> Result<Regime> {
    match name.to_ascii_lowercase().as_str() {
        "linear" => Ok(Regime::Linear),
        "exponential" => Ok(Regime::Exponential),
        "logistic" => Ok(Regime::Logistic),
        "decay" => Ok(Regime::Decay),
        other => bail!("unknown regime '{other}' (expected linear, exponential, logistic, or decay)"),
    }
}

fn build_config(
    regime: Regime,
    growth_rate: f64,
    initial_population: u64,
    carrying_capacity: Option<u64>,
    duration: f64,
) -> Result<SimulationConfig> {
    let config = match regime {
        Regime::Linear => SimulationConfig::linear(growth_rate, initial_population, duration),
        Regime::Exponential => {
            let k = carrying_capacity
                .context("--carrying-capacity is required for the exponential regime")?;
            SimulationConfig::exponential(growth_rate, initial_population, k, duration)
        }
        Regime::Logistic => {
            let k = carrying_capacity
                .context("--carrying-capacity is required for the logistic regime")?;
            SimulationConfig::logistic(growth_rate, initial_population, k, duration)
        }
        Regime::Decay => SimulationConfig::decay(growth_rate, initial_population, duration),
    };
    config.context("invalid configuration")
}

fn cmd_series(
    regime: &str,
    initial_population: u64,
    growth_rate: f64,
    carrying_capacity: Option<u64>,
    samples: usize,
    total_time: f64,
) -> Result<()> {
    let regime = parse_regime(regime)?;
    let series = growth::compute_series(
        regime,
        initial_population,
        growth_rate,
        carrying_capacity,
        samples,
        total_time,
    )
    .context("failed to compute series")?;

    let step = total_time / samples as f64;
    println!("time,population");
    for (i, population) in series.iter().enumerate() {
        println!("{},{}", step * i as f64, population);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    config_path: Option<PathBuf>,
    regime: &str,
    initial_population: u64,
    growth_rate: f64,
    carrying_capacity: Option<u64>,
    max_population: Option<u64>,
    duration: f64,
    speed: f64,
    tick: f64,
    seed: Option<u64>,
    progress: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            serde_json::from_str::<SimulationConfig>(&text)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => {
            let mut config = build_config(
                parse_regime(regime)?,
                growth_rate,
                initial_population,
                carrying_capacity,
                duration,
            )?
            .with_speed(speed);
            if let Some(max) = max_population {
                config = config.with_max_population(max);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            config
        }
    };

    let total_days = config.simulation_duration;
    let mut sim = Simulation::new();
    sim.configure(config).context("invalid configuration")?;
    sim.start().context("failed to start simulation")?;

    let bar = if progress {
        let bar = ProgressBar::new(total_days.ceil() as u64);
        bar.set_style(
            ProgressStyle::with_template("[{bar:40}] {pos}/{len} days  pop {msg}")
                .context("invalid progress template")?,
        );
        Some(bar)
    } else {
        None
    };

    while sim.is_running() {
        sim.tick(tick);
        if let Some(bar) = &bar {
            bar.set_position(sim.time_elapsed().min(total_days) as u64);
            bar.set_message(sim.current_population().to_string());
        }
    }
    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }

    println!("Simulation ended at t = {:.2} days", sim.time_elapsed());
    println!("Final population: {}", sim.current_population());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Series {
            regime,
            initial_population,
            growth_rate,
            carrying_capacity,
            samples,
            total_time,
        } => cmd_series(
            &regime,
            initial_population,
            growth_rate,
            carrying_capacity,
            samples,
            total_time,
        ),
        Commands::Run {
            config,
            regime,
            initial_population,
            growth_rate,
            carrying_capacity,
            max_population,
            duration,
            speed,
            tick,
            seed,
            no_progress,
        } => cmd_run(
            config,
            &regime,
            initial_population,
            growth_rate,
            carrying_capacity,
            max_population,
            duration,
            speed,
            tick,
            seed,
            !no_progress,
        ),
    }
}
