//! Anomaly detection for univariate time series.
//!
//! This module provides:
//! - [`PeriodEstimator`]: seasonality period estimation from derivative
//!   sign flips
//! - [`GeneralizedEsd`]: the iterative robust ESD outlier test
//! - [`SeasonalEsdDetector`]: the end-to-end decomposition + detection
//!   pipeline

mod esd;
mod period;
mod pipeline;

pub use esd::{AnomalyCandidate, GeneralizedEsd};
pub use period::PeriodEstimator;
pub use pipeline::{DetectionResult, DetectorConfig, SeasonalEsdDetector};
