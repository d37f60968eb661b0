//! TimeSeries data structure for representing telemetry data.

use crate::error::{AnomalyError, Result};
use chrono::{DateTime, Utc};

/// A univariate time series with optional timestamps.
///
/// Values are addressed by index; when timestamps are present they form a
/// parallel rail of the same length. The structure is immutable after
/// construction and all algorithms operate on copies of the value slice,
/// so a `TimeSeries` can be shared freely across concurrent detection
/// calls.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    values: Vec<f64>,
    timestamps: Option<Vec<DateTime<Utc>>>,
}

impl TimeSeries {
    /// Create a time series from values alone.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(AnomalyError::EmptySeries);
        }
        Ok(Self {
            values,
            timestamps: None,
        })
    }

    /// Create a time series with a parallel timestamp rail.
    ///
    /// Timestamps must be strictly increasing and match the value count.
    pub fn with_timestamps(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(AnomalyError::EmptySeries);
        }
        if timestamps.len() != values.len() {
            return Err(AnomalyError::InvalidConfig(format!(
                "timestamp count {} does not match value count {}",
                timestamps.len(),
                values.len()
            )));
        }
        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(AnomalyError::InvalidConfig(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }
        Ok(Self {
            values,
            timestamps: Some(timestamps),
        })
    }

    /// The observed values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The timestamp rail, if one was provided.
    pub fn timestamps(&self) -> Option<&[DateTime<Utc>]> {
        self.timestamps.as_deref()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series holds no observations.
    ///
    /// Always false for a constructed series; provided for slice-like
    /// API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Timestamp at `index`, if a rail is present and `index` is in bounds.
    pub fn timestamp(&self, index: usize) -> Option<DateTime<Utc>> {
        self.timestamps.as_ref().and_then(|ts| ts.get(index)).copied()
    }
}
