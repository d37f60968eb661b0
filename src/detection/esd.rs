//! Generalized ESD outlier test over residual series.

use crate::error::{AnomalyError, Result};
use crate::stats::{mad, median, robust_z_score};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// A point flagged by the generalized ESD test.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyCandidate {
    /// Value of the original series at the flagged index.
    pub value: f64,
    /// Index into the original series.
    pub index: usize,
    /// Anomaly score `1 - critical/statistic`, in `[0, 1)`. Closer to 1
    /// means the point exceeded the critical value by a wider margin.
    pub score: f64,
}

/// Iterative generalized ESD test with robust (median/MAD) statistics.
///
/// Each round finds the point with the largest robust z-score inside the
/// eligible index window and compares it against a Student-t derived
/// critical value. A flagged point is "removed" by imputing it to the
/// value that keeps the mean consistent with one fewer free point; the
/// working buffer never changes length, which keeps index bookkeeping
/// exact. The test terminates on the first round whose maximum statistic
/// fails the critical value.
#[derive(Debug, Clone)]
pub struct GeneralizedEsd {
    alpha: f64,
}

impl Default for GeneralizedEsd {
    fn default() -> Self {
        Self { alpha: 0.025 }
    }
}

impl GeneralizedEsd {
    /// Create a test with the default significance level (0.025).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the significance level. Must lie in the open interval (0, 1).
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Run the test over `residuals`, flagging positions in
    /// `[start, end]` (inclusive). `originals` supplies the values
    /// reported in the candidates and must be index-aligned with
    /// `residuals`.
    ///
    /// `residuals` must be finite (the decomposer's imputation guarantees
    /// this for pipeline callers). Candidates are returned in detection
    /// order.
    pub fn run(
        &self,
        residuals: &[f64],
        originals: &[f64],
        start: usize,
        end: usize,
    ) -> Result<Vec<AnomalyCandidate>> {
        if residuals.is_empty() {
            return Err(AnomalyError::EmptySeries);
        }
        if originals.len() != residuals.len() {
            return Err(AnomalyError::InvalidConfig(format!(
                "original series length {} does not match residual length {}",
                originals.len(),
                residuals.len()
            )));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(AnomalyError::InvalidConfig(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if start > end {
            return Err(AnomalyError::InvalidConfig(format!(
                "start {start} is after end {end}"
            )));
        }
        if end >= residuals.len() {
            return Err(AnomalyError::InvalidConfig(format!(
                "end {end} is out of bounds for length {}",
                residuals.len()
            )));
        }

        let m = residuals.len();
        let mut working = residuals.to_vec();
        let mut candidates: Vec<AnomalyCandidate> = Vec::new();

        loop {
            let n = m - candidates.len();
            if n <= 2 {
                if candidates.is_empty() {
                    // the t distribution needs at least one degree of
                    // freedom, so a first round with n <= 2 means the
                    // series was too short to test at all
                    return Err(AnomalyError::InsufficientData { needed: 3, got: n });
                }
                break;
            }
            let nf = n as f64;

            // statistics over the full working buffer: imputed points
            // still participate, converging toward the mean
            let mean = working.iter().sum::<f64>() / m as f64;
            let center = median(&working).ok_or(AnomalyError::EmptySeries)?;
            let scale = mad(&working, Some(center)).ok_or(AnomalyError::EmptySeries)?;
            if scale == 0.0 {
                return Err(AnomalyError::DegenerateScale);
            }

            let mut statistic = 0.0;
            let mut max_index = start;
            for (j, &value) in working.iter().enumerate().take(end + 1).skip(start) {
                let z = robust_z_score(value, center, scale)?;
                if z > statistic {
                    statistic = z;
                    max_index = j;
                }
            }

            let critical = self.critical_value(n);
            if statistic > critical {
                candidates.push(AnomalyCandidate {
                    value: originals[max_index],
                    index: max_index,
                    score: 1.0 - critical / statistic,
                });
                // impute so the mean is consistent with one fewer free
                // point; array shape stays intact
                working[max_index] = (mean * nf - working[max_index]) / (nf - 1.0);
            } else {
                break;
            }
        }

        Ok(candidates)
    }

    /// Critical value for a round with `n` free points:
    /// `((n-1)/sqrt(n)) * sqrt(t^2 / (n-2 + t^2))` with `t` the
    /// upper-tail Student-t quantile at `alpha/(2n)` and `n-2` degrees of
    /// freedom.
    fn critical_value(&self, n: usize) -> f64 {
        let nf = n as f64;
        let df = nf - 2.0;
        let p = self.alpha / (2.0 * nf);
        // degrees of freedom are at least 1 because callers guard n > 2
        let t_dist = StudentsT::new(0.0, 1.0, df).unwrap();
        let t = t_dist.inverse_cdf(1.0 - p);
        let t2 = t * t;
        ((nf - 1.0) / nf.sqrt()) * (t2 / (df + t2)).sqrt()
    }
}
