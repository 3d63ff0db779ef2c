//! Error types shared across VarFlow crates.

use thiserror::Error;

/// VarFlow error type.
///
/// Construction of parameterized objects validates its inputs and reports
/// problems through [`Error::Validation`]. Numeric trouble encountered
/// *inside* a transform (division by a zero scale, log of a negative value)
/// is deliberately not checked per element: it propagates as NaN or infinity
/// in the output, matching the behavior of the underlying float operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument detected when an object was constructed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Numeric failure surfaced by a caller (singular system, divergence).
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias used throughout VarFlow.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Validation("`diag` must have exactly one dimension".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: `diag` must have exactly one dimension"
        );

        let err = Error::Computation("matrix is singular".to_string());
        assert_eq!(err.to_string(), "Computation error: matrix is singular");
    }

    #[test]
    fn test_result_alias() {
        fn checked(v: f64) -> Result<f64> {
            if v > 0.0 {
                Ok(v.ln())
            } else {
                Err(Error::Validation(format!("expected positive value, got {}", v)))
            }
        }

        assert!(checked(1.0).is_ok());
        assert!(checked(-1.0).is_err());
    }
}
