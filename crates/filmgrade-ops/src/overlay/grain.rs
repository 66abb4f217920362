//! Film grain: additive Gaussian noise blended into the image.

use crate::error::check_unit;
use crate::random::standard_normal;
use crate::OpsResult;
use filmgrade_core::{quantize, Image};
use rand::Rng;
use tracing::trace;

/// Blends per-sample Gaussian noise into the image.
///
/// Noise has mean 0 and standard deviation `255 * intensity`. Each sample
/// becomes `(1 - intensity) * v + intensity * noise`, rounded and clamped to
/// `[0, 255]`. Any channel count is accepted.
///
/// Noise is drawn sequentially in memory order, so a seeded generator always
/// yields the same result. `intensity == 0` returns the input unchanged.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`](crate::OpsError::InvalidParameter) unless
/// `intensity` lies in `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use filmgrade_core::Image;
/// use filmgrade_ops::overlay::add_grain;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let img = Image::filled(8, 8, &[128, 128, 128]).unwrap();
/// let a = add_grain(&img, 0.2, &mut StdRng::seed_from_u64(1)).unwrap();
/// let b = add_grain(&img, 0.2, &mut StdRng::seed_from_u64(1)).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn add_grain<R: Rng + ?Sized>(image: &Image, intensity: f32, rng: &mut R) -> OpsResult<Image> {
    check_unit("grain intensity", intensity)?;
    trace!(width = image.width(), height = image.height(), intensity, "add_grain");

    let sigma = 255.0 * intensity;
    let noise: Vec<f32> = (0..image.data().len())
        .map(|_| sigma * standard_normal(rng))
        .collect();

    let keep = 1.0 - intensity;
    let row_len = image.row_len();
    Ok(image.map_rows(image.channels(), |y, src, dst| {
        let noise_row = &noise[y * row_len..(y + 1) * row_len];
        for ((d, &s), &n) in dst.iter_mut().zip(src).zip(noise_row) {
            *d = quantize(keep * s as f32 + intensity * n);
        }
    }))
}
