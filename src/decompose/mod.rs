//! Seasonal-trend decomposition.
//!
//! Splits a series into trend, seasonal, and residual components: the
//! trend comes from a wide sliding median filter, the seasonal component
//! from a classical additive decomposition at the supplied period, and
//! the residual is what remains. Undefined residual entries (possible at
//! the decomposition boundaries) are imputed to the residual median so
//! the downstream outlier test never sees a non-finite value.

mod classical;
mod median_filter;

pub use median_filter::median_filter;

use crate::error::{AnomalyError, Result};
use crate::stats::median;
use classical::{moving_average_trend, seasonal_component};

/// Default trend window: wide enough to flatten seasonal structure out of
/// periodic telemetry sampled at minute-level resolution.
pub const DEFAULT_TREND_WINDOW: usize = 301;

/// Result of a seasonal-trend decomposition.
///
/// All three components have the same length as the input and are aligned
/// index-for-index with it. `residual` is guaranteed finite at every
/// position.
#[derive(Debug, Clone)]
pub struct DecompositionResult {
    /// Sliding-median trend component.
    pub trend: Vec<f64>,
    /// Tiled seasonal component.
    pub seasonal: Vec<f64>,
    /// Residual after removing trend and seasonal, with undefined entries
    /// imputed to the residual median.
    pub residual: Vec<f64>,
    /// The trend window actually used, after clamping to the series
    /// length.
    pub trend_window: usize,
}

impl DecompositionResult {
    /// Length of the decomposed series.
    pub fn len(&self) -> usize {
        self.residual.len()
    }

    /// Whether the decomposition is empty (never true for a result
    /// produced by [`SeasonalDecomposer::decompose`]).
    pub fn is_empty(&self) -> bool {
        self.residual.is_empty()
    }

    /// Strength of the seasonal component, from 0 (none) to 1 (dominant).
    pub fn seasonal_strength(&self) -> f64 {
        let var_residual = variance(&self.residual);
        let seasonal_plus_residual: Vec<f64> = self
            .seasonal
            .iter()
            .zip(self.residual.iter())
            .map(|(s, r)| s + r)
            .collect();
        let var_sr = variance(&seasonal_plus_residual);

        if var_sr < 1e-10 {
            return 0.0;
        }
        (1.0 - var_residual / var_sr).clamp(0.0, 1.0)
    }
}

/// Seasonal-trend decomposer for a fixed period.
#[derive(Debug, Clone)]
pub struct SeasonalDecomposer {
    period: usize,
    trend_window: usize,
}

impl SeasonalDecomposer {
    /// Create a decomposer for the given seasonal period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            trend_window: DEFAULT_TREND_WINDOW,
        }
    }

    /// Set the sliding-median trend window (must be odd; clamped to the
    /// series length at decomposition time).
    pub fn with_trend_window(mut self, window: usize) -> Self {
        self.trend_window = window;
        self
    }

    /// Decompose a series into trend, seasonal, and residual components.
    ///
    /// The series must be finite, hold at least three points, and cover
    /// at least two full seasonal cycles.
    pub fn decompose(&self, series: &[f64]) -> Result<DecompositionResult> {
        if series.is_empty() {
            return Err(AnomalyError::EmptySeries);
        }
        if self.period == 0 {
            return Err(AnomalyError::InvalidConfig(
                "period must be positive".to_string(),
            ));
        }
        if self.trend_window == 0 || self.trend_window.is_multiple_of(2) {
            return Err(AnomalyError::InvalidConfig(format!(
                "trend window must be odd and non-zero, got {}",
                self.trend_window
            )));
        }
        if series.iter().any(|v| !v.is_finite()) {
            return Err(AnomalyError::InvalidConfig(
                "series contains non-finite values".to_string(),
            ));
        }
        let n = series.len();
        if n < 3 {
            return Err(AnomalyError::InsufficientData { needed: 3, got: n });
        }
        if n < 2 * self.period {
            return Err(AnomalyError::InsufficientData {
                needed: 2 * self.period,
                got: n,
            });
        }

        // clamp to the largest odd window that fits the series
        let window = if self.trend_window > n {
            if n.is_multiple_of(2) {
                n - 1
            } else {
                n
            }
        } else {
            self.trend_window
        };

        let trend = median_filter(series, window)?;
        let ma = moving_average_trend(series, self.period);
        let detrended: Vec<f64> = series.iter().zip(ma.iter()).map(|(y, t)| y - t).collect();
        let seasonal = seasonal_component(&detrended, self.period);

        let mut residual: Vec<f64> = series
            .iter()
            .zip(trend.iter())
            .zip(seasonal.iter())
            .map(|((y, t), s)| y - t - s)
            .collect();

        // single pre-pass median over defined entries, then impute
        let defined: Vec<f64> = residual.iter().copied().filter(|v| v.is_finite()).collect();
        let Some(fill) = median(&defined) else {
            return Err(AnomalyError::EmptySeries);
        };
        for value in residual.iter_mut() {
            if !value.is_finite() {
                *value = fill;
            }
        }

        Ok(DecompositionResult {
            trend,
            seasonal,
            residual,
            trend_window: window,
        })
    }
}

fn variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean: f64 = values.iter().sum::<f64>() / n as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
}
