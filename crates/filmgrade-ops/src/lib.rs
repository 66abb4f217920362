//! # filmgrade-ops
//!
//! Film-emulation operators for 8-bit RGB images.
//!
//! ## Operators
//!
//! | Operator | Module | Output |
//! |----------|--------|--------|
//! | Grayscale, Sepia, Blur | [`filter`] | 1 / 3 / same channels |
//! | EdgeDetection | [`edge`] | 1-channel binary map |
//! | Film-stock presets, CustomWarm | [`preset`] | 3 channels |
//! | VintageEffect | [`pipeline`] | 3 channels |
//!
//! Grain, light leaks and vignette live in [`overlay`] and are used by the
//! vintage chain; they are public for callers composing their own chains.
//!
//! ## Dispatch
//!
//! ```rust
//! use filmgrade_core::Image;
//! use filmgrade_ops::{apply, OpParams, Operator};
//!
//! let img = Image::filled(16, 16, &[200, 200, 200]).unwrap();
//! let out = apply(Operator::KodakPortra400, &img, &OpParams::default()).unwrap();
//! assert_eq!(out.pixel(3, 3), &[200, 202, 190]);
//!
//! // names are matched case-insensitively, display labels too
//! let op: Operator = "vintage film effect".parse().unwrap();
//! assert_eq!(op, Operator::VintageEffect);
//! ```
//!
//! ## Determinism
//!
//! Everything except VintageEffect is a pure function of its input. The
//! vintage chain takes its randomness from [`OpParams::seed`]; with a seed the
//! output is reproducible, without one it varies run to run.
//!
//! ## Feature Flags
//!
//! - `parallel` - Row-parallel processing via rayon (default). Output does
//!   not depend on the flag.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod operator;

pub mod edge;
pub mod filter;
pub mod overlay;
pub mod params;
pub mod pipeline;
pub mod preset;
pub mod random;

pub use error::{OpsError, OpsResult};
pub use operator::{apply, apply_named, apply_with, Operator};
pub use params::OpParams;

pub use edge::{canny, edge_detect};
pub use filter::{gaussian_blur, grayscale, sepia};
pub use overlay::{add_grain, add_light_leaks, add_vignette, VignetteFalloff};
pub use pipeline::{vintage_effect, vintage_effect_with_rng, VintageConfig};
pub use preset::{apply_preset, FilmStock, PresetRegistry};
