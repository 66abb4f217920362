//! Stochastic and radial overlay operators.
//!
//! - [`add_grain`] - Gaussian noise blended into the image
//! - [`add_light_leaks`] - Randomly placed warm radial glows, accumulated
//! - [`add_vignette`] - Radial attenuation toward the corners
//!
//! Grain and light leaks take an injected [`rand::Rng`]; with a seeded
//! generator their output is reproducible, otherwise it is expected to vary
//! between calls.

mod grain;
mod light_leak;
mod vignette;

pub use grain::add_grain;
pub use light_leak::{add_light_leaks, composite_light_leaks, LightLeak};
pub use vignette::{add_vignette, VignetteFalloff};
