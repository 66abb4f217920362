//! Radial vignette.
//!
//! Distance is measured from the geometric center `((w-1)/2, (h-1)/2)` and
//! normalized by the center-to-corner distance, so all four corners sit at
//! exactly 1.0.

use crate::error::check_unit;
use crate::{OpsError, OpsResult};
use filmgrade_core::{quantize, Image};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Shape of the attenuation curve over normalized distance `d`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VignetteFalloff {
    /// `1 - strength * d`
    #[default]
    Linear,
    /// `1 - strength * d^midpoint`; midpoints below 1 darken earlier.
    ///
    /// Strength scales the whole term, unlike the `1 - (1 - strength) * d^midpoint`
    /// form: 0 leaves the image unchanged and 1 blackens the corners, as with
    /// [`Linear`](Self::Linear).
    Power {
        /// Exponent applied to the normalized distance (> 0)
        midpoint: f32,
    },
}

impl VignetteFalloff {
    /// Attenuation factor at normalized distance `d` in `[0, 1]`.
    #[inline]
    pub fn attenuation(&self, strength: f32, d: f32) -> f32 {
        match *self {
            Self::Linear => 1.0 - strength * d,
            Self::Power { midpoint } => 1.0 - strength * d.powf(midpoint),
        }
    }

    fn validate(&self) -> OpsResult<()> {
        if let Self::Power { midpoint } = *self {
            if !(midpoint > 0.0 && midpoint.is_finite()) {
                return Err(OpsError::InvalidParameter(format!(
                    "vignette midpoint must be positive, got {midpoint}"
                )));
            }
        }
        Ok(())
    }
}

/// Darkens the image radially.
///
/// Every channel of a pixel is multiplied by the same attenuation factor,
/// then rounded and clamped. `strength == 0` leaves the image unchanged;
/// `strength == 1` with [`VignetteFalloff::Linear`] drives the corners to 0.
/// Any channel count is accepted.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `strength` is outside `[0, 1]` or the
/// power-law midpoint isn't positive.
///
/// # Example
///
/// ```rust
/// use filmgrade_core::Image;
/// use filmgrade_ops::overlay::{add_vignette, VignetteFalloff};
///
/// let img = Image::filled(9, 9, &[200, 200, 200]).unwrap();
/// let out = add_vignette(&img, 1.0, VignetteFalloff::Linear).unwrap();
/// assert_eq!(out.pixel(0, 0), &[0, 0, 0]);
/// assert_eq!(out.pixel(4, 4), &[200, 200, 200]);
/// ```
pub fn add_vignette(image: &Image, strength: f32, falloff: VignetteFalloff) -> OpsResult<Image> {
    check_unit("vignette strength", strength)?;
    falloff.validate()?;
    trace!(width = image.width(), height = image.height(), strength, ?falloff, "add_vignette");

    let cx = (image.width() as f32 - 1.0) * 0.5;
    let cy = (image.height() as f32 - 1.0) * 0.5;
    let max_dist = (cx * cx + cy * cy).sqrt();

    Ok(image.map_pixels(image.channels(), |x, y, src, dst| {
        let factor = if max_dist > 0.0 {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            falloff.attenuation(strength, (dx * dx + dy * dy).sqrt() / max_dist)
        } else {
            1.0
        };
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = quantize(s as f32 * factor);
        }
    }))
}
