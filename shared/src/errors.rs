//! Error types for the analytics core

use thiserror::Error;

/// Errors raised by the analytics core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result alias used across the analytics core
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Fail with a computation error when a derived metric is NaN or infinite
pub fn ensure_finite(metric: &str, value: f64) -> AnalyticsResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalyticsError::Computation(format!(
            "{} evaluated to a non-finite value",
            metric
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite_passes_regular_values() {
        assert_eq!(ensure_finite("calories", 12.5), Ok(12.5));
        assert_eq!(ensure_finite("calories", 0.0), Ok(0.0));
    }

    #[test]
    fn test_ensure_finite_rejects_nan_and_infinity() {
        assert!(matches!(
            ensure_finite("calories", f64::NAN),
            Err(AnalyticsError::Computation(_))
        ));
        assert!(matches!(
            ensure_finite("calories", f64::INFINITY),
            Err(AnalyticsError::Computation(_))
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = AnalyticsError::InvalidPeriod("fortnight".to_string());
        assert_eq!(err.to_string(), "Invalid period: fortnight");
    }
}
