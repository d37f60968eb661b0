//! End-to-end seasonal ESD detection pipeline.

use crate::core::TimeSeries;
use crate::decompose::{SeasonalDecomposer, DEFAULT_TREND_WINDOW};
use crate::detection::esd::{AnomalyCandidate, GeneralizedEsd};
use crate::detection::period::PeriodEstimator;
use crate::error::{AnomalyError, Result};

/// Configuration for [`SeasonalEsdDetector`].
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Significance level for the ESD test, in (0, 1).
    pub alpha: f64,
    /// Seasonal period override. `None` estimates the period from the
    /// series.
    pub period: Option<usize>,
    /// First index eligible for flagging. `None` means 0.
    pub start: Option<usize>,
    /// Last index (inclusive) eligible for flagging. `None` means the
    /// last index of the series.
    pub end: Option<usize>,
    /// Sliding-median trend window (odd; clamped to the series length).
    pub trend_window: usize,
    /// Period estimation knobs, used when `period` is `None`.
    pub estimator: PeriodEstimator,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            alpha: 0.025,
            period: None,
            start: None,
            end: None,
            trend_window: DEFAULT_TREND_WINDOW,
            estimator: PeriodEstimator::default(),
        }
    }
}

impl DetectorConfig {
    /// Set the significance level.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Fix the seasonal period instead of estimating it.
    pub fn with_period(mut self, period: usize) -> Self {
        self.period = Some(period);
        self
    }

    /// Restrict flagging to the inclusive index window `[start, end]`.
    pub fn with_window(mut self, start: usize, end: usize) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Set the sliding-median trend window.
    pub fn with_trend_window(mut self, window: usize) -> Self {
        self.trend_window = window;
        self
    }

    /// Replace the period estimator.
    pub fn with_estimator(mut self, estimator: PeriodEstimator) -> Self {
        self.estimator = estimator;
        self
    }
}

/// Result of a detection run: the decomposition components plus the
/// flagged anomalies, sorted ascending by index.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// Sliding-median trend component, aligned with the input.
    pub trend: Vec<f64>,
    /// Seasonal component, aligned with the input.
    pub seasonal: Vec<f64>,
    /// Finite residual component, aligned with the input.
    pub residual: Vec<f64>,
    /// Flagged anomalies, sorted ascending by index.
    pub anomalies: Vec<AnomalyCandidate>,
    /// Seasonal period used by the decomposition (estimated or
    /// overridden).
    pub period: usize,
}

impl DetectionResult {
    /// Number of anomalies flagged.
    pub fn anomaly_count(&self) -> usize {
        self.anomalies.len()
    }

    /// Whether `index` was flagged.
    pub fn is_anomaly(&self, index: usize) -> bool {
        self.anomalies.iter().any(|c| c.index == index)
    }

    /// Flagged indices, ascending.
    pub fn anomaly_indices(&self) -> Vec<usize> {
        self.anomalies.iter().map(|c| c.index).collect()
    }
}

/// Seasonal-trend decomposition plus generalized ESD anomaly detection.
///
/// Orchestration only: estimates the seasonal period (unless overridden),
/// decomposes the series, runs the robust ESD test over the residual
/// restricted to the configured index window, and returns the score
/// annotated anomalies sorted by index together with the decomposition
/// components. The input is copied before any internal mutation, so the
/// same slice can be handed to concurrent detectors.
#[derive(Debug, Clone, Default)]
pub struct SeasonalEsdDetector {
    config: DetectorConfig,
}

impl SeasonalEsdDetector {
    /// Create a detector with the given configuration.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detect anomalies in `series`.
    pub fn detect(&self, series: &[f64]) -> Result<DetectionResult> {
        if series.is_empty() {
            return Err(AnomalyError::EmptySeries);
        }
        let n = series.len();

        let start = self.config.start.unwrap_or(0);
        let end = self.config.end.unwrap_or(n - 1);
        if start > end {
            return Err(AnomalyError::InvalidConfig(format!(
                "start {start} is after end {end}"
            )));
        }
        if end >= n {
            return Err(AnomalyError::InvalidConfig(format!(
                "end {end} is out of bounds for length {n}"
            )));
        }
        if let Some(period) = self.config.period {
            if period == 0 {
                return Err(AnomalyError::InvalidConfig(
                    "period must be positive".to_string(),
                ));
            }
        }

        // keep the caller's series immutable
        let inputs = series.to_vec();

        let period = match self.config.period {
            Some(period) => period,
            None => self.config.estimator.estimate(&inputs)?,
        };

        let decomposition = SeasonalDecomposer::new(period)
            .with_trend_window(self.config.trend_window)
            .decompose(&inputs)?;

        let mut anomalies = GeneralizedEsd::new()
            .with_alpha(self.config.alpha)
            .run(&decomposition.residual, &inputs, start, end)?;
        anomalies.sort_by_key(|c| c.index);

        Ok(DetectionResult {
            trend: decomposition.trend,
            seasonal: decomposition.seasonal,
            residual: decomposition.residual,
            anomalies,
            period,
        })
    }

    /// Detect anomalies in a [`TimeSeries`].
    pub fn detect_series(&self, series: &TimeSeries) -> Result<DetectionResult> {
        self.detect(series.values())
    }
}
