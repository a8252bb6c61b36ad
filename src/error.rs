//! Error types for the conditioned predictor.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PredictorError>;

/// Errors raised before any tensor operation runs.
///
/// Shapes are validated up front so the backend never sees a tensor of the
/// wrong width; nothing is truncated or padded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictorError {
    /// A tensor width (or batch size) disagrees with the configured sizes.
    #[error("dimension mismatch for {what}: got {got}, expected {expected}")]
    DimensionMismatch {
        /// Which tensor or axis was checked (e.g. "combined input width").
        what: &'static str,
        /// Observed size.
        got: usize,
        /// Size required by the configuration.
        expected: usize,
    },

    /// The predictor configuration cannot produce a valid model.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PredictorError {
    pub(crate) fn mismatch(what: &'static str, got: usize, expected: usize) -> Self {
        log::warn!("{what}: got {got}, expected {expected}");
        PredictorError::DimensionMismatch {
            what,
            got,
            expected,
        }
    }
}

/// Returns `DimensionMismatch` unless `got == expected`.
pub(crate) fn ensure_dim(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got == expected {
        Ok(())
    } else {
        Err(PredictorError::mismatch(what, got, expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dim_accepts_equal() {
        assert_eq!(ensure_dim("width", 7, 7), Ok(()));
    }

    #[test]
    fn test_ensure_dim_reports_sizes() {
        let err = ensure_dim("combined input width", 204, 205).unwrap_err();
        assert_eq!(
            err,
            PredictorError::DimensionMismatch {
                what: "combined input width",
                got: 204,
                expected: 205,
            }
        );
        assert_eq!(
            err.to_string(),
            "dimension mismatch for combined input width: got 204, expected 205"
        );
    }
}
