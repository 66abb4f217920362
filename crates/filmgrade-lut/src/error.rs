//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur during LUT operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LutError {
    /// A channel table doesn't have exactly 256 entries.
    #[error("invalid LUT size: expected 256 entries, got {0}")]
    InvalidSize(usize),

    /// The image handed to [`apply_lut`](crate::apply_lut) violates its contract.
    #[error(transparent)]
    Image(#[from] filmgrade_core::Error),
}
