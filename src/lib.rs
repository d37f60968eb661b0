//! # anofox-anomaly
//!
//! Anomaly detection for univariate time series.
//!
//! Combines seasonal-trend decomposition (median-filter trend plus a
//! classical additive seasonal component) with an iterative generalized
//! ESD outlier test driven by robust median/MAD statistics. Designed for
//! periodic telemetry such as CPU utilization, where operators need
//! statistically significant deviations flagged together with a
//! trend/seasonal/residual breakdown for diagnosis.
//!
//! ```
//! use anofox_anomaly::prelude::*;
//!
//! // A long periodic signal with a single injected spike.
//! let mut values: Vec<f64> = (0..2000)
//!     .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 20.0).sin())
//!     .collect();
//! values[1000] += 100.0;
//!
//! let detector = SeasonalEsdDetector::default();
//! let result = detector.detect(&values).unwrap();
//!
//! assert_eq!(result.anomaly_count(), 1);
//! assert!(result.is_anomaly(1000));
//! ```

pub mod core;
pub mod decompose;
pub mod detection;
pub mod error;
pub mod stats;

pub use error::{AnomalyError, Result};

pub mod prelude {
    pub use crate::core::TimeSeries;
    pub use crate::decompose::{DecompositionResult, SeasonalDecomposer};
    pub use crate::detection::{
        AnomalyCandidate, DetectionResult, DetectorConfig, SeasonalEsdDetector,
    };
    pub use crate::error::{AnomalyError, Result};
}
