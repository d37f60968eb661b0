//! Median and MAD based robust statistics.
//!
//! These primitives drive both the residual imputation in the decomposer
//! and the generalized ESD test: the test statistic is a robust z-score
//! (distance from the median in units of scaled MAD) rather than a
//! mean/standard-deviation z-score, which keeps single extreme points
//! from masking each other.

use crate::error::{AnomalyError, Result};

/// Scale factor making the MAD a consistent estimator of the standard
/// deviation under normality (1 / 0.6745, the 0.75 quantile of the
/// standard normal).
pub const MAD_SCALE: f64 = 1.4826;

/// Median of a slice. Returns `None` for empty input.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n.is_multiple_of(2) {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}

/// Scaled median absolute deviation: `MAD_SCALE * median(|x - center|)`.
///
/// `center` defaults to `median(values)`. Returns `None` for empty input.
pub fn mad(values: &[f64], center: Option<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let center = match center {
        Some(c) => c,
        None => median(values)?,
    };
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    median(&deviations).map(|m| MAD_SCALE * m)
}

/// Robust z-score: `|value - center| / scale`.
///
/// A zero scale is a degenerate condition (all values identical within
/// the window) and is signaled rather than returned as infinity, which
/// would trivially pass any outlier threshold.
pub fn robust_z_score(value: f64, center: f64, scale: f64) -> Result<f64> {
    if scale == 0.0 {
        return Err(AnomalyError::DegenerateScale);
    }
    Ok((value - center).abs() / scale)
}

/// Flag values whose robust z-score against the series median exceeds
/// `threshold`.
///
/// Constant input has zero MAD, so no outlier decision is possible and
/// `DegenerateScale` is returned.
pub fn mad_outliers(values: &[f64], threshold: f64) -> Result<Vec<bool>> {
    let Some(center) = median(values) else {
        return Err(AnomalyError::EmptySeries);
    };
    // non-empty input, so the MAD is defined
    let scale = mad(values, Some(center)).unwrap_or(0.0);
    values
        .iter()
        .map(|&v| Ok(robust_z_score(v, center, scale)? > threshold))
        .collect()
}
