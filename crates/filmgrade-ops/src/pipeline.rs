//! The "vintage" composite.
//!
//! Fixed sequential chain, each stage consuming the previous stage's output:
//!
//! ```text
//! sepia -> gaussian_blur(5x5) -> add_grain(0.2)
//!       -> add_light_leaks(0.3, 3) -> add_vignette(0.5, linear)
//! ```
//!
//! Grain and light leaks draw from the same generator in that order, so a
//! seeded run equals running the five stages by hand with one seeded
//! generator. Without a seed, two runs on the same input differ.

use crate::filter::{gaussian_blur, sepia};
use crate::overlay::{add_grain, add_light_leaks, add_vignette, VignetteFalloff};
use crate::random::rng_from_seed;
use crate::OpsResult;
use filmgrade_core::Image;
use rand::Rng;
use tracing::{debug, trace};

/// Stage parameters of the vintage composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VintageConfig {
    /// Blur kernel size (width, height)
    pub blur_kernel: (usize, usize),
    /// Grain blend weight
    pub grain_intensity: f32,
    /// Light-leak blend weight
    pub leak_intensity: f32,
    /// Number of light leaks
    pub leak_count: usize,
    /// Vignette strength
    pub vignette_strength: f32,
    /// Vignette curve
    pub vignette_falloff: VignetteFalloff,
}

impl Default for VintageConfig {
    fn default() -> Self {
        Self {
            blur_kernel: (5, 5),
            grain_intensity: 0.2,
            leak_intensity: 0.3,
            leak_count: 3,
            vignette_strength: 0.5,
            vignette_falloff: VignetteFalloff::Linear,
        }
    }
}

/// Runs the vintage composite with an entropy-seeded generator.
pub fn vintage_effect(image: &Image) -> OpsResult<Image> {
    vintage_effect_with_rng(image, &mut rng_from_seed(None))
}

/// Runs the vintage composite with default stages and the given generator.
///
/// # Errors
///
/// Channel mismatch unless the image has 3 channels.
///
/// # Example
///
/// ```rust
/// use filmgrade_core::Image;
/// use filmgrade_ops::pipeline::vintage_effect_with_rng;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let img = Image::filled(24, 16, &[180, 140, 90]).unwrap();
/// let a = vintage_effect_with_rng(&img, &mut StdRng::seed_from_u64(3)).unwrap();
/// let b = vintage_effect_with_rng(&img, &mut StdRng::seed_from_u64(3)).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn vintage_effect_with_rng<R: Rng + ?Sized>(image: &Image, rng: &mut R) -> OpsResult<Image> {
    vintage_effect_with_config(image, &VintageConfig::default(), rng)
}

/// Runs the vintage chain with explicit stage parameters.
pub fn vintage_effect_with_config<R: Rng + ?Sized>(
    image: &Image,
    config: &VintageConfig,
    rng: &mut R,
) -> OpsResult<Image> {
    trace!(width = image.width(), height = image.height(), ?config, "vintage_effect");

    let toned = sepia(image)?;
    let blurred = gaussian_blur(&toned, config.blur_kernel)?;
    let grainy = add_grain(&blurred, config.grain_intensity, rng)?;
    let leaked = add_light_leaks(&grainy, config.leak_intensity, config.leak_count, rng)?;
    let result = add_vignette(&leaked, config.vignette_strength, config.vignette_falloff)?;

    debug!("Vintage effect complete");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpsError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Image {
        let data: Vec<u8> = (0..40 * 30 * 3).map(|i| (i * 11 % 256) as u8).collect();
        Image::from_raw(40, 30, 3, data).unwrap()
    }

    #[test]
    fn test_matches_manual_chain() {
        let img = sample();
        let composite = vintage_effect_with_rng(&img, &mut StdRng::seed_from_u64(77)).unwrap();

        let mut rng = StdRng::seed_from_u64(77);
        let s = sepia(&img).unwrap();
        let b = gaussian_blur(&s, (5, 5)).unwrap();
        let g = add_grain(&b, 0.2, &mut rng).unwrap();
        let l = add_light_leaks(&g, 0.3, 3, &mut rng).unwrap();
        let manual = add_vignette(&l, 0.5, VignetteFalloff::Linear).unwrap();

        assert_eq!(composite, manual);
    }

    #[test]
    fn test_unseeded_runs_differ() {
        let img = sample();
        let a = vintage_effect(&img).unwrap();
        let b = vintage_effect(&img).unwrap();
        assert_eq!(a.shape(), img.shape());
        assert_ne!(a, b);
    }

    #[test]
    fn test_corners_darker_than_center() {
        let img = Image::filled(64, 64, &[200, 200, 200]).unwrap();
        let out = vintage_effect_with_rng(&img, &mut StdRng::seed_from_u64(1)).unwrap();
        let corner: u32 = out.pixel(0, 0).iter().map(|&v| v as u32).sum();
        let center: u32 = out.pixel(32, 32).iter().map(|&v| v as u32).sum();
        assert!(corner < center);
    }

    #[test]
    fn test_requires_rgb() {
        let gray = Image::new(8, 8, 1).unwrap();
        assert!(matches!(vintage_effect(&gray), Err(OpsError::Image(_))));
    }
}
