//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpsError {
    /// The input image violates the operator's contract.
    #[error(transparent)]
    Image(#[from] filmgrade_core::Error),

    /// A lookup table was malformed or misapplied.
    #[error(transparent)]
    Lut(#[from] filmgrade_lut::LutError),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operator name not in the supported set.
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Fails with [`OpsError::InvalidParameter`] unless `value` lies in `[0, 1]`.
pub(crate) fn check_unit(name: &str, value: f32) -> OpsResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(OpsError::InvalidParameter(format!(
            "{name} must be in [0, 1], got {value}"
        )));
    }
    Ok(())
}
