//! Sliding median filter.

use crate::error::{AnomalyError, Result};

/// Apply a centered sliding median filter of odd `window` length.
///
/// Boundary handling replicates the edge values, so the output always has
/// the same length as the input and windows larger than the series are
/// effectively clamped at the edges. `window` must be odd and non-zero.
pub fn median_filter(series: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 || window.is_multiple_of(2) {
        return Err(AnomalyError::InvalidConfig(format!(
            "median filter window must be odd and non-zero, got {window}"
        )));
    }
    if series.is_empty() {
        return Err(AnomalyError::EmptySeries);
    }

    let n = series.len();
    let half = (window / 2) as isize;
    let mut buf = vec![0.0; window];
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        for (k, slot) in buf.iter_mut().enumerate() {
            let j = (i as isize + k as isize - half).clamp(0, n as isize - 1);
            *slot = series[j as usize];
        }
        buf.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        out.push(buf[window / 2]);
    }

    Ok(out)
}
