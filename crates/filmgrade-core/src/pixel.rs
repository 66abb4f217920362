//! Sample-level helpers: luma weights and float-to-byte quantization.
//!
//! All operators compute in floating point and narrow back to `u8` through
//! [`quantize`], so the clamp-then-round discipline lives in one place.

/// BT.601 luma coefficient for red channel.
pub const BT601_LUMA_R: f32 = 0.299;

/// BT.601 luma coefficient for green channel.
pub const BT601_LUMA_G: f32 = 0.587;

/// BT.601 luma coefficient for blue channel.
pub const BT601_LUMA_B: f32 = 0.114;

/// BT.601 luma coefficients as an array [R, G, B].
///
/// # Example
/// ```
/// use filmgrade_core::pixel::BT601_LUMA;
/// let sum: f32 = BT601_LUMA.iter().sum();
/// assert!((sum - 1.0).abs() < 1e-6);
/// ```
pub const BT601_LUMA: [f32; 3] = [BT601_LUMA_R, BT601_LUMA_G, BT601_LUMA_B];

/// Luma of an 8-bit RGB triple on the 0-255 scale (unrounded).
///
/// `Y = 0.299*R + 0.587*G + 0.114*B`
#[inline]
pub fn luma_bt601(rgb: [u8; 3]) -> f32 {
    rgb[0] as f32 * BT601_LUMA_R + rgb[1] as f32 * BT601_LUMA_G + rgb[2] as f32 * BT601_LUMA_B
}

/// Rounds to nearest (half away from zero) and clamps into `[0, 255]`.
///
/// NaN maps to 0.
///
/// # Example
/// ```
/// use filmgrade_core::pixel::quantize;
/// assert_eq!(quantize(300.7), 255);
/// assert_eq!(quantize(-4.0), 0);
/// assert_eq!(quantize(127.5), 128);
/// ```
#[inline]
pub fn quantize(value: f32) -> u8 {
    // `as` saturates and sends NaN to 0
    value.round().clamp(0.0, 255.0) as u8
}

/// Maps a byte into `[0, 1]`.
#[inline]
pub fn to_unit(value: u8) -> f32 {
    value as f32 / 255.0
}

/// Maps a `[0, 1]` value back to a byte, clamping first.
#[inline]
pub fn from_unit(value: f32) -> u8 {
    quantize(value.clamp(0.0, 1.0) * 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_bounds() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(255.0), 255);
        assert_eq!(quantize(255.49), 255);
        assert_eq!(quantize(1000.0), 255);
        assert_eq!(quantize(-0.4), 0);
        assert_eq!(quantize(f32::NAN), 0);
        assert_eq!(quantize(f32::INFINITY), 255);
    }

    #[test]
    fn test_luma_white_black() {
        assert!((luma_bt601([255, 255, 255]) - 255.0).abs() < 1e-3);
        assert_eq!(luma_bt601([0, 0, 0]), 0.0);
    }

    #[test]
    fn test_unit_roundtrip() {
        for v in 0..=255u8 {
            assert_eq!(from_unit(to_unit(v)), v);
        }
        assert_eq!(from_unit(1.7), 255);
        assert_eq!(from_unit(-0.2), 0);
    }
}
