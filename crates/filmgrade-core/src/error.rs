//! Error types for filmgrade-core operations.
//!
//! Every failure here is a caller contract violation: a buffer whose length
//! doesn't match its declared shape, a zero-sized image, or an operator
//! handed the wrong number of channels. They are reported immediately and
//! never coerced.
//!
//! # Usage
//!
//! ```rust
//! use filmgrade_core::{Error, Result};
//!
//! fn need_rgb(channels: u32) -> Result<()> {
//!     if channels != 3 {
//!         return Err(Error::channel_mismatch(3, channels, "sepia"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(need_rgb(1).is_err());
//! ```
//!
//! # Used By
//!
//! - [`crate::image::Image`] - Buffer construction and channel guards
//! - `filmgrade-lut` - Wrapped into `LutError`
//! - `filmgrade-ops` - Wrapped into `OpsError`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or validating image buffers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operator received an image with the wrong channel count.
    ///
    /// `op` names the operator so the failure is diagnosable from the
    /// message alone.
    #[error("{op}: expected {expected} channel(s), got {actual}")]
    ChannelMismatch {
        /// Channel count the operator requires
        expected: u32,
        /// Channel count of the image that was passed
        actual: u32,
        /// Operator name
        op: &'static str,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when width, height or channels is zero, when the buffer size
    /// would overflow, or when the sample buffer length doesn't match.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: u32, actual: u32, op: &'static str) -> Self {
        Self::ChannelMismatch { expected, actual, op }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a channel-count violation.
    #[inline]
    pub fn is_channel_error(&self) -> bool {
        matches!(self, Self::ChannelMismatch { .. })
    }
}
