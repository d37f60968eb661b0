//! Seasonality period estimation from derivative sign flips.

use crate::error::{AnomalyError, Result};

/// Estimates the dominant period of a series by counting sign flips of
/// its discrete derivative.
///
/// The derivative's magnitude is irrelevant; only its sign pattern is
/// inspected. Every `flips_per_cycle`-th sign flip closes one oscillation
/// cycle, and the estimate is the mean recorded cycle length, discarding
/// the first cycle (it starts at an arbitrary phase). The heuristic is
/// approximate by design: it is parameter-free at call time, which the
/// decomposer requires, and all knobs are exposed for calibration.
///
/// With the default `flips_per_cycle` of 3, a simple oscillation (two
/// derivative sign flips per cycle, e.g. a sinusoid of period p)
/// estimates `1.5 * p`; a setting of 2 recovers p itself.
#[derive(Debug, Clone)]
pub struct PeriodEstimator {
    /// Derivative step. Used purely as a scaling constant that cancels
    /// itself; it does not affect the sign pattern.
    dx: f64,
    /// Number of derivative sign flips that close one cycle.
    flips_per_cycle: usize,
    /// Period reported when fewer than two cycles are observed.
    fallback_period: usize,
}

impl Default for PeriodEstimator {
    fn default() -> Self {
        Self {
            dx: 0.001,
            flips_per_cycle: 3,
            fallback_period: 3,
        }
    }
}

impl PeriodEstimator {
    /// Create an estimator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the derivative step constant.
    pub fn with_derivative_step(mut self, dx: f64) -> Self {
        self.dx = dx;
        self
    }

    /// Set how many derivative sign flips close one cycle.
    pub fn with_flips_per_cycle(mut self, flips: usize) -> Self {
        self.flips_per_cycle = flips;
        self
    }

    /// Set the period reported for series with too few oscillations.
    pub fn with_fallback_period(mut self, period: usize) -> Self {
        self.fallback_period = period;
        self
    }

    /// Estimate the dominant period of `series`. Always returns a period
    /// of at least 1.
    pub fn estimate(&self, series: &[f64]) -> Result<usize> {
        if self.flips_per_cycle == 0 {
            return Err(AnomalyError::InvalidConfig(
                "flips_per_cycle must be positive".to_string(),
            ));
        }
        if self.fallback_period == 0 {
            return Err(AnomalyError::InvalidConfig(
                "fallback_period must be positive".to_string(),
            ));
        }
        if series.len() < 2 {
            // the derivative of fewer than two points is empty
            return Err(AnomalyError::EmptySeries);
        }

        let derivative: Vec<f64> = series
            .windows(2)
            .map(|w| (w[1] - w[0]) / self.dx * self.dx)
            .collect();

        let mut sign = if derivative[0] >= 0.0 { 1.0 } else { -1.0 };
        let mut flips = 0usize;
        let mut count = 0usize;
        let mut cycles: Vec<usize> = Vec::new();

        for &d in &derivative {
            count += 1;
            if d * sign < 0.0 {
                sign = -sign;
                flips += 1;
                if flips == self.flips_per_cycle {
                    flips = 0;
                    cycles.push(count);
                    count = 0;
                }
            }
        }

        if cycles.len() < 2 {
            return Ok(self.fallback_period);
        }

        let mean =
            cycles[1..].iter().sum::<usize>() as f64 / (cycles.len() - 1) as f64;
        Ok((mean.round() as usize).max(1))
    }
}
