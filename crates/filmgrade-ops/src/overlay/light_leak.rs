//! Light leaks: warm radial glows added on top of the image.
//!
//! Each leak is a Gaussian-falloff disc `exp(-d^2 / (2 r^2))` tinted
//! `(1, g, 0)` and added at weight `intensity` in normalized `[0, 1]` space.
//! Leaks accumulate; the sum is clamped only once, after the last leak.

use crate::error::check_unit;
use crate::{OpsError, OpsResult};
use filmgrade_core::{from_unit, to_unit, Image};
use rand::Rng;
use tracing::{debug, trace};

/// Geometry and tint of one leak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightLeak {
    /// Center x in pixel coordinates
    pub center_x: f32,
    /// Center y in pixel coordinates
    pub center_y: f32,
    /// Falloff radius in pixels (the Gaussian sigma)
    pub radius: f32,
    /// Green component of the tint; red is 1 and blue is 0
    pub green: f32,
}

impl LightLeak {
    /// Draws a leak for a `width` x `height` image.
    ///
    /// Draw order: center x in `[0, w)`, center y in `[0, h)`, radius in
    /// `[0.2, 0.5) * min(w, h)`, green in `[0.2, 0.6)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: u32, height: u32) -> Self {
        let min_side = width.min(height) as f32;
        Self {
            center_x: rng.gen_range(0.0..width as f32),
            center_y: rng.gen_range(0.0..height as f32),
            radius: rng.gen_range(0.2 * min_side..0.5 * min_side),
            green: rng.gen_range(0.2..0.6),
        }
    }

    /// RGB tint in `[0, 1]`.
    #[inline]
    pub fn color(&self) -> [f32; 3] {
        [1.0, self.green, 0.0]
    }

    /// Falloff weight at pixel `(x, y)`.
    #[inline]
    pub fn weight(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        (-(dx * dx + dy * dy) / (2.0 * self.radius * self.radius)).exp()
    }
}

/// Adds `count` randomly placed light leaks.
///
/// Every leak's center, radius and tint are drawn independently from `rng`
/// before compositing (see [`LightLeak::random`]), then the leaks are
/// composited with [`composite_light_leaks`].
///
/// # Errors
///
/// - Channel mismatch unless the image has 3 channels
/// - [`OpsError::InvalidParameter`] if `intensity` is outside `[0, 1]` or
///   `count` is zero
///
/// # Example
///
/// ```rust
/// use filmgrade_core::Image;
/// use filmgrade_ops::overlay::add_light_leaks;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let img = Image::filled(32, 32, &[40, 40, 40]).unwrap();
/// let out = add_light_leaks(&img, 0.3, 3, &mut StdRng::seed_from_u64(7)).unwrap();
/// assert_eq!(out.shape(), img.shape());
/// ```
pub fn add_light_leaks<R: Rng + ?Sized>(
    image: &Image,
    intensity: f32,
    count: usize,
    rng: &mut R,
) -> OpsResult<Image> {
    image.require_channels(3, "add_light_leaks")?;
    check_unit("leak intensity", intensity)?;
    if count == 0 {
        return Err(OpsError::InvalidParameter(
            "leak count must be a positive integer".into(),
        ));
    }
    trace!(width = image.width(), height = image.height(), intensity, count, "add_light_leaks");

    let leaks: Vec<LightLeak> = (0..count)
        .map(|_| LightLeak::random(rng, image.width(), image.height()))
        .collect();
    for leak in &leaks {
        debug!(
            cx = leak.center_x,
            cy = leak.center_y,
            radius = leak.radius,
            green = leak.green,
            "Light leak"
        );
    }

    composite_light_leaks(image, intensity, &leaks)
}

/// Composites the given leaks additively at weight `intensity`.
///
/// Deterministic counterpart of [`add_light_leaks`].
pub fn composite_light_leaks(image: &Image, intensity: f32, leaks: &[LightLeak]) -> OpsResult<Image> {
    image.require_channels(3, "add_light_leaks")?;
    check_unit("leak intensity", intensity)?;

    Ok(image.map_pixels(3, |x, y, src, dst| {
        let mut rgb = [to_unit(src[0]), to_unit(src[1]), to_unit(src[2])];
        for leak in leaks {
            let w = intensity * leak.weight(x as f32, y as f32);
            let color = leak.color();
            for (v, c) in rgb.iter_mut().zip(color) {
                *v += w * c;
            }
        }
        for (d, v) in dst.iter_mut().zip(rgb) {
            *d = from_unit(v);
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn centered(radius: f32) -> LightLeak {
        LightLeak {
            center_x: 10.0,
            center_y: 10.0,
            radius,
            green: 0.5,
        }
    }

    #[test]
    fn test_zero_intensity_identity() {
        let data: Vec<u8> = (0..20 * 20 * 3).map(|i| (i * 7 % 256) as u8).collect();
        let img = Image::from_raw(20, 20, 3, data).unwrap();
        let out = add_light_leaks(&img, 0.0, 3, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_center_pixel_value() {
        let img = Image::new(21, 21, 3).unwrap();
        let out = composite_light_leaks(&img, 0.4, &[centered(5.0)]).unwrap();
        // weight 1 at the center: (0.4, 0.2, 0) * 255
        assert_eq!(out.pixel(10, 10), &[102, 51, 0]);
        // falls off with distance
        assert!(out.pixel(15, 10)[0] < 102);
        assert!(out.pixel(15, 10)[0] > out.pixel(20, 10)[0]);
    }

    #[test]
    fn test_leaks_accumulate() {
        let img = Image::new(21, 21, 3).unwrap();
        let one = composite_light_leaks(&img, 0.3, &[centered(4.0)]).unwrap();
        let two = composite_light_leaks(&img, 0.3, &[centered(4.0), centered(4.0)]).unwrap();
        assert!(two.pixel(10, 10)[0] > one.pixel(10, 10)[0]);
        assert_eq!(two.pixel(10, 10)[0], 153);
    }

    #[test]
    fn test_sum_is_clamped() {
        let img = Image::filled(21, 21, &[250, 250, 250]).unwrap();
        let out = composite_light_leaks(&img, 1.0, &[centered(6.0); 4]).unwrap();
        assert_eq!(out.pixel(10, 10), &[255, 255, 250]);
    }

    #[test]
    fn test_blue_never_changes() {
        let data: Vec<u8> = (0..24 * 16 * 3).map(|i| (i % 251) as u8).collect();
        let img = Image::from_raw(24, 16, 3, data).unwrap();
        let out = add_light_leaks(&img, 1.0, 5, &mut StdRng::seed_from_u64(11)).unwrap();
        for (a, b) in img.data().chunks(3).zip(out.data().chunks(3)) {
            assert_eq!(a[2], b[2]);
            assert!(b[0] >= a[0]);
            assert!(b[1] >= a[1]);
        }
    }

    #[test]
    fn test_random_leak_ranges() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..1000 {
            let leak = LightLeak::random(&mut rng, 200, 100);
            assert!((0.0..200.0).contains(&leak.center_x));
            assert!((0.0..100.0).contains(&leak.center_y));
            assert!((20.0..50.0).contains(&leak.radius));
            assert!((0.2..0.6).contains(&leak.green));
        }
    }

    #[test]
    fn test_seeded_reproducible() {
        let img = Image::filled(30, 20, &[60, 70, 80]).unwrap();
        let a = add_light_leaks(&img, 0.3, 3, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = add_light_leaks(&img, 0.3, 3, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_contract_violations() {
        let mut rng = StdRng::seed_from_u64(0);
        let gray = Image::new(8, 8, 1).unwrap();
        assert!(matches!(
            add_light_leaks(&gray, 0.3, 3, &mut rng),
            Err(OpsError::Image(_))
        ));
        let rgb = Image::new(8, 8, 3).unwrap();
        assert!(matches!(
            add_light_leaks(&rgb, 0.3, 0, &mut rng),
            Err(OpsError::InvalidParameter(_))
        ));
        assert!(add_light_leaks(&rgb, 1.2, 3, &mut rng).is_err());
    }
}
