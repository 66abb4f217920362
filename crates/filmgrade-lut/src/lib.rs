//! # filmgrade-lut
//!
//! Per-channel lookup tables for 8-bit images.
//!
//! A [`ChannelLut`] maps every possible input byte to an output byte. Three of
//! them, bundled as an [`RgbLut`], define one color grade. Tables are built
//! once from a tone curve with [`build_channel_lut`] and then applied with
//! [`apply_lut`], which is a pure table lookup per sample.
//!
//! # Usage
//!
//! ```rust
//! use filmgrade_core::Image;
//! use filmgrade_lut::{apply_lut, build_channel_lut, ChannelLut};
//!
//! let warm_r = build_channel_lut(|i| i as f64 + 20.0);
//! let id = ChannelLut::identity();
//! let cool_b = build_channel_lut(|i| i as f64 - 20.0);
//!
//! let img = Image::filled(2, 2, &[100, 100, 100]).unwrap();
//! let out = apply_lut(&img, &warm_r, &id, &cool_b).unwrap();
//! assert_eq!(out.pixel(0, 0), &[120, 100, 80]);
//! ```
//!
//! # Used By
//!
//! - `filmgrade-ops` - Film-stock presets

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod lut;

pub use error::{LutError, LutResult};
pub use lut::{apply_lut, build_channel_lut, ChannelLut, RgbLut, LUT_SIZE};
