//! Closed-form growth models and batch series sampling.
//!
//! Everything here is pure and stateless: point evaluations map
//! `(initial population, growth rate, elapsed time, [carrying capacity])` to
//! a population value, and the batch maps re-sample the same closed-form
//! curve at evenly spaced times. The batch maps are *not* recurrences — every
//! sample is anchored to the original initial population, so samples are
//! independent and computed in parallel.

use rayon::prelude::*;

use crate::errors::GrowthError;
use crate::simulation::Regime;

/// Linear growth evaluated at elapsed time `t`: `round(p0 + r * t)`.
///
/// A negative rate can drive the formula below zero; the result is clamped
/// so population values are never negative in output.
pub fn linear_population_at(p0: u64, r: f64, t: f64) -> u64 {
    let value = (p0 as f64 + r * t).round();
    value.max(0.0) as u64
}

/// Exponential growth evaluated at elapsed time `t`: `round(p0 * e^(r*t))`.
pub fn exponential_population_at(p0: u64, r: f64, t: f64) -> u64 {
    (p0 as f64 * (r * t).exp()).round() as u64
}

/// Logistic growth evaluated at elapsed time `t`:
/// `round(K / (1 + ((K - p0) / p0) * e^(-r*t)))`.
///
/// Fails when `p0 == 0` (the formula divides by the initial population) or
/// when `k == 0` (undefined domain).
pub fn logistic_population_at(p0: u64, r: f64, t: f64, k: u64) -> Result<u64, GrowthError> {
    if p0 == 0 {
        return Err(GrowthError::ZeroInitialPopulation);
    }
    if k == 0 {
        return Err(GrowthError::ZeroCarryingCapacity);
    }
    Ok(logistic_value(p0, r, t, k))
}

/// Logistic point evaluation with the domain already validated.
fn logistic_value(p0: u64, r: f64, t: f64, k: u64) -> u64 {
    let k = k as f64;
    let p0 = p0 as f64;
    let value = (k / (1.0 + ((k - p0) / p0) * (-r * t).exp())).round();
    value.max(0.0) as u64
}

/// Sample the linear curve at `t_i = total_time / samples * i` for
/// `i = 0..samples-1`.
pub fn linear_population_map(p0: u64, r: f64, samples: usize, total_time: f64) -> Vec<u64> {
    let step = total_time / samples as f64;
    (0..samples)
        .into_par_iter()
        .map(|i| linear_population_at(p0, r, step * i as f64))
        .collect()
}

/// Sample the exponential curve at `t_i = total_time / samples * i` for
/// `i = 0..samples-1`.
pub fn exponential_population_map(p0: u64, r: f64, samples: usize, total_time: f64) -> Vec<u64> {
    let step = total_time / samples as f64;
    (0..samples)
        .into_par_iter()
        .map(|i| exponential_population_at(p0, r, step * i as f64))
        .collect()
}

/// Sample the logistic curve at `t_i = total_time / samples * i` for
/// `i = 0..samples-1`. The domain is validated once up front.
pub fn logistic_population_map(
    p0: u64,
    r: f64,
    k: u64,
    samples: usize,
    total_time: f64,
) -> Result<Vec<u64>, GrowthError> {
    if p0 == 0 {
        return Err(GrowthError::ZeroInitialPopulation);
    }
    if k == 0 {
        return Err(GrowthError::ZeroCarryingCapacity);
    }
    let step = total_time / samples as f64;
    Ok((0..samples)
        .into_par_iter()
        .map(|i| logistic_value(p0, r, step * i as f64, k))
        .collect())
}

/// Compute a full population series for a regime, for plotting/export.
///
/// `carrying_capacity` is consulted only by the logistic regime. Decay has
/// no closed form defined and always fails with
/// [`GrowthError::NoClosedForm`].
pub fn compute_series(
    regime: Regime,
    initial_population: u64,
    growth_rate: f64,
    carrying_capacity: Option<u64>,
    samples: usize,
    total_time: f64,
) -> Result<Vec<u64>, GrowthError> {
    match regime {
        Regime::Linear => Ok(linear_population_map(
            initial_population,
            growth_rate,
            samples,
            total_time,
        )),
        Regime::Exponential => Ok(exponential_population_map(
            initial_population,
            growth_rate,
            samples,
            total_time,
        )),
        Regime::Logistic => {
            let k = carrying_capacity.ok_or(GrowthError::MissingCapacity)?;
            logistic_population_map(initial_population, growth_rate, k, samples, total_time)
        }
        Regime::Decay => Err(GrowthError::NoClosedForm(Regime::Decay)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_point() {
        assert_eq!(linear_population_at(10, 2.0, 5.0), 20);
        assert_eq!(linear_population_at(10, 0.5, 1.0), 11); // 10.5 rounds away from zero
        assert_eq!(linear_population_at(5, 1.0, 0.0), 5);
    }

    #[test]
    fn test_linear_never_negative() {
        // 10 - 2 * 20 = -30, clamped
        assert_eq!(linear_population_at(10, -2.0, 20.0), 0);
    }

    #[test]
    fn test_exponential_point() {
        assert_eq!(exponential_population_at(10, 1.0, 0.0), 10);
        // 10 * e^1 = 27.18...
        assert_eq!(exponential_population_at(10, 1.0, 1.0), 27);
    }

    #[test]
    fn test_closed_form_determinism() {
        let a = exponential_population_at(37, 0.13, 42.0);
        let b = exponential_population_at(37, 0.13, 42.0);
        assert_eq!(a, b);

        let c = linear_population_at(37, 0.13, 42.0);
        let d = linear_population_at(37, 0.13, 42.0);
        assert_eq!(c, d);
    }

    #[test]
    fn test_logistic_point() {
        // At t = 0 the curve passes through p0.
        assert_eq!(logistic_population_at(10, 1.0, 0.0, 100).unwrap(), 10);
        // The curve saturates toward K.
        assert_eq!(logistic_population_at(10, 1.0, 50.0, 100).unwrap(), 100);
    }

    #[test]
    fn test_logistic_zero_population_rejected() {
        assert_eq!(
            logistic_population_at(0, 1.0, 1.0, 100),
            Err(GrowthError::ZeroInitialPopulation)
        );
        assert_eq!(
            logistic_population_at(10, 1.0, 1.0, 0),
            Err(GrowthError::ZeroCarryingCapacity)
        );
    }

    #[test]
    fn test_linear_map_sampling() {
        // Samples at t = 0, 10, 20, ..., 90.
        let series = linear_population_map(5, 1.0, 10, 100.0);
        assert_eq!(series.len(), 10);
        assert_eq!(series[0], 5);
        assert_eq!(series[1], 15);
        assert_eq!(series[9], 95);
    }

    #[test]
    fn test_map_anchored_to_original_p0() {
        // Every sample must equal the point evaluation at the same cumulative
        // time, never a recurrence compounding on the previous sample.
        let series = exponential_population_map(10, 0.5, 8, 16.0);
        for (i, &value) in series.iter().enumerate() {
            let t = 16.0 / 8.0 * i as f64;
            assert_eq!(value, exponential_population_at(10, 0.5, t));
        }
    }

    #[test]
    fn test_logistic_map_bounded_by_capacity() {
        let series = logistic_population_map(1, 1.0, 100, 50, 100.0).unwrap();
        assert_eq!(series.len(), 50);
        assert!(series.iter().all(|&p| p <= 100));
        assert_eq!(series[0], 1);
    }

    #[test]
    fn test_empty_map() {
        assert!(linear_population_map(5, 1.0, 0, 100.0).is_empty());
    }

    #[test]
    fn test_compute_series_dispatch() {
        let linear = compute_series(Regime::Linear, 5, 1.0, None, 10, 100.0).unwrap();
        assert_eq!(linear, linear_population_map(5, 1.0, 10, 100.0));

        let logistic = compute_series(Regime::Logistic, 1, 1.0, Some(100), 10, 100.0).unwrap();
        assert_eq!(logistic.len(), 10);

        assert_eq!(
            compute_series(Regime::Logistic, 1, 1.0, None, 10, 100.0),
            Err(GrowthError::MissingCapacity)
        );
        assert_eq!(
            compute_series(Regime::Decay, 10, 1.0, None, 10, 100.0),
            Err(GrowthError::NoClosedForm(Regime::Decay))
        );
    }
}
