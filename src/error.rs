//! Error types for the anofox-anomaly library.

use thiserror::Error;

/// Result type alias for detection operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;

/// Errors that can occur during anomaly detection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnomalyError {
    /// Input series is empty, or a robust statistic was asked to operate
    /// on zero defined elements where an undefined result cannot be
    /// tolerated.
    #[error("empty input series")]
    EmptySeries,

    /// The median absolute deviation of the working data is zero, so a
    /// robust z-score would divide by zero. Signaled instead of returning
    /// infinity, which would trivially pass the outlier test.
    #[error("degenerate scale: median absolute deviation is zero")]
    DegenerateScale,

    /// Not enough data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid configuration or input shape.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = AnomalyError::EmptySeries;
        assert_eq!(err.to_string(), "empty input series");

        let err = AnomalyError::DegenerateScale;
        assert_eq!(
            err.to_string(),
            "degenerate scale: median absolute deviation is zero"
        );

        let err = AnomalyError::InsufficientData { needed: 3, got: 2 };
        assert_eq!(err.to_string(), "insufficient data: need at least 3, got 2");

        let err = AnomalyError::InvalidConfig("alpha must be in (0, 1)".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: alpha must be in (0, 1)"
        );
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = AnomalyError::DegenerateScale;
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
