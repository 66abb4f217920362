//! # filmgrade-core
//!
//! Core types for the filmgrade color-grading engine.
//!
//! - [`Image`] - Owned 8-bit image buffer, shape `(height, width, channels)`
//! - [`Error`] / [`Result`] - Contract-violation errors
//! - [`pixel`] - Luma weights and the float-to-byte [`quantize`] helper
//!
//! ## Crate Structure
//!
//! ```text
//! filmgrade-core (this crate)
//!    ^
//!    +-- filmgrade-lut (channel lookup tables)
//!    +-- filmgrade-ops (operators, presets, vintage pipeline)
//!    +-- filmgrade-cli (decode/encode glue)
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - Row-level parallelism in [`Image::map_rows`] via rayon
//!   (enabled by default). Results are identical with or without it.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, Result};
pub use image::Image;
pub use pixel::{from_unit, luma_bt601, quantize, to_unit, BT601_LUMA};
