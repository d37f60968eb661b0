//! Classical additive decomposition pieces: centered moving-average trend
//! and tiled per-cycle-position seasonal means.

/// Centered moving-average trend for the given seasonal period.
///
/// Odd periods use a plain centered window of `period` samples; even
/// periods use the standard `period + 1` window with half weights on the
/// endpoints. The first and last `period / 2` entries are undefined (NaN)
/// — this boundary region is expected, not an error, and downstream
/// consumers impute around it.
pub(crate) fn moving_average_trend(series: &[f64], period: usize) -> Vec<f64> {
    let n = series.len();
    let mut trend = vec![f64::NAN; n];
    let half = period / 2;
    if n < period + 1 && period.is_multiple_of(2) {
        return trend;
    }
    if n < period {
        return trend;
    }

    if period.is_multiple_of(2) {
        for i in half..n - half {
            let mut acc = 0.5 * (series[i - half] + series[i + half]);
            acc += series[i - half + 1..i + half].iter().sum::<f64>();
            trend[i] = acc / period as f64;
        }
    } else {
        for i in half..n - half {
            let sum: f64 = series[i - half..=i + half].iter().sum();
            trend[i] = sum / period as f64;
        }
    }
    trend
}

/// Seasonal component: per-cycle-position means of the detrended series,
/// centered to sum to zero and tiled across the full length.
///
/// Means are taken over defined (finite) entries only, so the NaN
/// boundary of the moving-average trend does not poison whole cycle
/// positions. A position with no defined entries stays NaN.
pub(crate) fn seasonal_component(detrended: &[f64], period: usize) -> Vec<f64> {
    let n = detrended.len();
    let mut means = vec![f64::NAN; period];

    for (pos, mean_slot) in means.iter_mut().enumerate() {
        let mut sum = 0.0;
        let mut count = 0usize;
        let mut idx = pos;
        while idx < n {
            if detrended[idx].is_finite() {
                sum += detrended[idx];
                count += 1;
            }
            idx += period;
        }
        if count > 0 {
            *mean_slot = sum / count as f64;
        }
    }

    let defined: Vec<f64> = means.iter().copied().filter(|m| m.is_finite()).collect();
    let grand = if defined.is_empty() {
        0.0
    } else {
        defined.iter().sum::<f64>() / defined.len() as f64
    };

    (0..n).map(|i| means[i % period] - grand).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn odd_period_trend_is_plain_centered_mean() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let trend = moving_average_trend(&series, 3);
        assert!(trend[0].is_nan());
        assert_relative_eq!(trend[1], 2.0);
        assert_relative_eq!(trend[2], 3.0);
        assert_relative_eq!(trend[4], 5.0);
        assert!(trend[5].is_nan());
    }

    #[test]
    fn even_period_trend_half_weights_endpoints() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let trend = moving_average_trend(&series, 2);
        assert!(trend[0].is_nan());
        // (0.5*1 + 2 + 0.5*3) / 2 = 2
        assert_relative_eq!(trend[1], 2.0);
        assert_relative_eq!(trend[4], 5.0);
        assert!(trend[5].is_nan());
    }

    #[test]
    fn trend_boundary_width_is_half_period() {
        let series: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let trend = moving_average_trend(&series, 5);
        assert!(trend[..2].iter().all(|v| v.is_nan()));
        assert!(trend[18..].iter().all(|v| v.is_nan()));
        assert!(trend[2..18].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn seasonal_means_are_centered() {
        // period-2 alternation around a flat trend
        let detrended = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let seasonal = seasonal_component(&detrended, 2);
        assert_relative_eq!(seasonal[0], 1.0);
        assert_relative_eq!(seasonal[1], -1.0);
        assert_relative_eq!(seasonal[2], 1.0);
        let sum: f64 = seasonal[..2].iter().sum();
        assert_relative_eq!(sum, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn seasonal_means_skip_undefined_entries() {
        let detrended = [f64::NAN, -1.0, 1.0, -1.0, 1.0, f64::NAN];
        let seasonal = seasonal_component(&detrended, 2);
        // position 0 mean over [1.0, 1.0], position 1 over [-1.0, -1.0]
        assert_relative_eq!(seasonal[0], 1.0);
        assert_relative_eq!(seasonal[1], -1.0);
    }

    #[test]
    fn position_with_no_defined_entries_stays_undefined() {
        let detrended = [f64::NAN, 2.0, f64::NAN, 2.0];
        let seasonal = seasonal_component(&detrended, 2);
        assert!(seasonal[0].is_nan());
        assert!(seasonal[2].is_nan());
        assert_relative_eq!(seasonal[1], 0.0);
    }
}
