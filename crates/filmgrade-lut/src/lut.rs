//! 256-entry channel lookup tables.
//!
//! A channel LUT applies an independent, arbitrary (not necessarily
//! monotonic) remapping to one color channel. Because inputs are bytes, the
//! table is indexed directly and no interpolation is involved.

use crate::{LutError, LutResult};
use filmgrade_core::Image;
use tracing::trace;

/// Number of entries in a [`ChannelLut`].
pub const LUT_SIZE: usize = 256;

/// A lookup table mapping each input byte to an output byte.
///
/// The length is fixed by the type, so every table is total over `u8`.
/// Tables are immutable once built.
///
/// # Example
///
/// ```rust
/// use filmgrade_lut::ChannelLut;
///
/// let lut = ChannelLut::identity();
/// assert_eq!(lut.get(42), 42);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ChannelLut([u8; LUT_SIZE]);

impl ChannelLut {
    /// Creates the identity table (`lut[i] = i`).
    pub fn identity() -> Self {
        Self(std::array::from_fn(|i| i as u8))
    }

    /// Creates a table from raw entries.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::InvalidSize`] unless `entries` has exactly 256
    /// values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use filmgrade_lut::{ChannelLut, LutError};
    ///
    /// assert!(ChannelLut::from_slice(&[0u8; 256]).is_ok());
    /// assert_eq!(
    ///     ChannelLut::from_slice(&[0u8; 255]),
    ///     Err(LutError::InvalidSize(255))
    /// );
    /// ```
    pub fn from_slice(entries: &[u8]) -> LutResult<Self> {
        let table: [u8; LUT_SIZE] = entries
            .try_into()
            .map_err(|_| LutError::InvalidSize(entries.len()))?;
        Ok(Self(table))
    }

    /// Looks up the output for `value`.
    #[inline]
    pub fn get(&self, value: u8) -> u8 {
        self.0[value as usize]
    }

    /// The raw table.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl Default for ChannelLut {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::fmt::Debug for ChannelLut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ChannelLut")
            .field(&format_args!("[{}, {}, .., {}]", self.0[0], self.0[1], self.0[255]))
            .finish()
    }
}

/// Builds a channel table by evaluating a tone curve at every index.
///
/// Each result is rounded to nearest and clamped to `[0, 255]`; NaN becomes 0.
/// This is the only place tone curves are narrowed to bytes.
///
/// # Example
///
/// ```rust
/// use filmgrade_lut::build_channel_lut;
///
/// let lut = build_channel_lut(|i| i as f64 * 0.95 + 12.0);
/// assert_eq!(lut.get(200), 202);
/// assert_eq!(lut.get(255), 254);
/// ```
pub fn build_channel_lut<F>(curve: F) -> ChannelLut
where
    F: Fn(u8) -> f64,
{
    ChannelLut(std::array::from_fn(|i| narrow(curve(i as u8))))
}

#[inline]
fn narrow(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Three channel tables defining one RGB grade.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RgbLut {
    /// Red channel table
    pub r: ChannelLut,
    /// Green channel table
    pub g: ChannelLut,
    /// Blue channel table
    pub b: ChannelLut,
}

impl RgbLut {
    /// Bundles three channel tables.
    pub fn new(r: ChannelLut, g: ChannelLut, b: ChannelLut) -> Self {
        Self { r, g, b }
    }

    /// Identity on all three channels.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Applies the tables to an RGB image. See [`apply_lut`].
    pub fn apply(&self, image: &Image) -> LutResult<Image> {
        apply_lut(image, &self.r, &self.g, &self.b)
    }
}

/// Remaps every channel of an RGB image through its table.
///
/// Output has the same dimensions and channel order as the input. Cost is a
/// single table lookup per sample.
///
/// # Errors
///
/// Returns [`LutError::Image`] wrapping a channel mismatch if the image
/// doesn't have exactly 3 channels.
pub fn apply_lut(
    image: &Image,
    lut_r: &ChannelLut,
    lut_g: &ChannelLut,
    lut_b: &ChannelLut,
) -> LutResult<Image> {
    image.require_channels(3, "apply_lut")?;
    trace!(width = image.width(), height = image.height(), "apply_lut");

    Ok(image.map_rows(3, |_, src, dst| {
        for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(3)) {
            d[0] = lut_r.get(s[0]);
            d[1] = lut_g.get(s[1]);
            d[2] = lut_b.get(s[2]);
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Image {
        let data: Vec<u8> = (0..=255u8).flat_map(|v| [v, v, v]).collect();
        Image::from_raw(256, 1, 3, data).unwrap()
    }

    #[test]
    fn test_identity() {
        let lut = ChannelLut::identity();
        for i in 0..=255u8 {
            assert_eq!(lut.get(i), i);
        }
    }

    #[test]
    fn test_build_clamps_and_rounds() {
        let lut = build_channel_lut(|i| i as f64 * 2.0 - 10.4);
        assert_eq!(lut.get(0), 0);
        assert_eq!(lut.get(10), 10);
        assert_eq!(lut.get(200), 255);
        let half = build_channel_lut(|i| i as f64 + 0.5);
        assert_eq!(half.get(3), 4);
    }

    #[test]
    fn test_build_nan_is_zero() {
        let lut = build_channel_lut(|_| f64::NAN);
        assert!(lut.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_non_monotonic_allowed() {
        let lut = build_channel_lut(|i| 255.0 - i as f64);
        assert_eq!(lut.get(0), 255);
        assert_eq!(lut.get(255), 0);
    }

    #[test]
    fn test_from_slice_size() {
        assert!(ChannelLut::from_slice(&[7u8; 256]).is_ok());
        assert_eq!(ChannelLut::from_slice(&[]), Err(LutError::InvalidSize(0)));
        assert_eq!(
            ChannelLut::from_slice(&[0u8; 257]),
            Err(LutError::InvalidSize(257))
        );
    }

    #[test]
    fn test_apply_identity_roundtrip() {
        let img = ramp();
        let id = ChannelLut::identity();
        let out = apply_lut(&img, &id, &id, &id).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_apply_per_channel() {
        let img = ramp();
        let zero = ChannelLut::from_slice(&[0u8; 256]).unwrap();
        let full = ChannelLut::from_slice(&[255u8; 256]).unwrap();
        let out = apply_lut(&img, &zero, &ChannelLut::identity(), &full).unwrap();
        for x in 0..256u32 {
            assert_eq!(out.pixel(x, 0), &[0, x as u8, 255]);
        }
    }

    #[test]
    fn test_apply_rejects_gray() {
        let gray = Image::new(4, 4, 1).unwrap();
        let err = RgbLut::identity().apply(&gray).unwrap_err();
        assert!(matches!(err, LutError::Image(e) if e.is_channel_error()));
    }

    #[test]
    fn test_rgb_lut_apply() {
        let lut = RgbLut::new(
            build_channel_lut(|i| i as f64 + 20.0),
            ChannelLut::identity(),
            build_channel_lut(|i| i as f64 - 20.0),
        );
        let img = Image::filled(2, 2, &[250, 7, 10]).unwrap();
        assert_eq!(lut.apply(&img).unwrap().pixel(1, 1), &[255, 7, 0]);
    }
}
