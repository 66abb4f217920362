//! Pixel-wise color transforms and Gaussian smoothing.
//!
//! - [`grayscale`] - BT.601 luma reduction to one channel
//! - [`sepia`] - Fixed 3x3 color-mixing matrix
//! - [`gaussian_blur`] - Separable Gaussian with automatic sigma
//!
//! Edge detection lives in [`crate::edge`].
//!
//! # Border Handling
//!
//! Neighborhood reads past the image edge use reflect-101 mirroring
//! (`dcb|abcd|cba`): the edge sample itself is not repeated. See
//! [`reflect101`].
//!
//! # Example
//!
//! ```rust
//! use filmgrade_core::Image;
//! use filmgrade_ops::filter::{gaussian_blur, sepia};
//!
//! let img = Image::filled(16, 16, &[200, 120, 40]).unwrap();
//! let toned = sepia(&img).unwrap();
//! let soft = gaussian_blur(&toned, (5, 5)).unwrap();
//! assert_eq!(soft.shape(), img.shape());
//! ```

use crate::{OpsError, OpsResult};
use filmgrade_core::{luma_bt601, quantize, Image};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sepia color-mixing matrix. Output channel `k` is row `k` dotted with the
/// input `(R, G, B)`.
pub const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.272, 0.534, 0.131],
    [0.349, 0.686, 0.168],
    [0.393, 0.769, 0.189],
];

/// Default blur kernel size for the standalone Blur operator.
pub const DEFAULT_BLUR_KERNEL: (usize, usize) = (15, 15);

/// Largest accepted blur kernel dimension.
pub const MAX_BLUR_KERNEL: usize = 4095;

/// Converts an RGB image to single-channel luma.
///
/// `Y = round(0.299*R + 0.587*G + 0.114*B)`
///
/// # Errors
///
/// Channel mismatch unless the image has 3 channels.
///
/// # Example
///
/// ```rust
/// use filmgrade_core::Image;
/// use filmgrade_ops::filter::grayscale;
///
/// let img = Image::filled(2, 2, &[255, 255, 255]).unwrap();
/// let gray = grayscale(&img).unwrap();
/// assert_eq!(gray.channels(), 1);
/// assert_eq!(gray.pixel(0, 0), &[255]);
/// ```
pub fn grayscale(image: &Image) -> OpsResult<Image> {
    image.require_channels(3, "grayscale")?;
    trace!(width = image.width(), height = image.height(), "grayscale");

    Ok(image.map_pixels(1, |_, _, src, dst| {
        dst[0] = quantize(luma_bt601([src[0], src[1], src[2]]));
    }))
}

/// Applies the sepia matrix to every pixel.
///
/// Each output channel is rounded and clamped to `[0, 255]`; two of the
/// matrix rows sum above 1, so bright input saturates rather than wrapping.
///
/// # Errors
///
/// Channel mismatch unless the image has 3 channels.
///
/// # Example
///
/// ```rust
/// use filmgrade_core::Image;
/// use filmgrade_ops::filter::sepia;
///
/// let white = Image::filled(1, 1, &[255, 255, 255]).unwrap();
/// assert_eq!(sepia(&white).unwrap().pixel(0, 0), &[239, 255, 255]);
/// ```
pub fn sepia(image: &Image) -> OpsResult<Image> {
    image.require_channels(3, "sepia")?;
    trace!(width = image.width(), height = image.height(), "sepia");

    Ok(image.map_pixels(3, |_, _, src, dst| {
        let rgb = [src[0] as f32, src[1] as f32, src[2] as f32];
        for (d, row) in dst.iter_mut().zip(SEPIA_MATRIX.iter()) {
            *d = quantize(row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]);
        }
    }))
}

/// Sigma derived from kernel size when none is given.
///
/// `sigma = 0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`
#[inline]
pub fn auto_sigma(ksize: usize) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1D Gaussian weights of length `size` with the auto sigma.
///
/// # Example
///
/// ```rust
/// use filmgrade_ops::filter::gaussian_kernel;
///
/// let k = gaussian_kernel(5);
/// assert_eq!(k.len(), 5);
/// assert!((k.iter().sum::<f32>() - 1.0).abs() < 1e-5);
/// ```
pub fn gaussian_kernel(size: usize) -> Vec<f32> {
    let sigma = auto_sigma(size);
    // size / 2 never exceeds isize::MAX
    let half = (size / 2) as isize;
    let sigma2 = 2.0 * sigma * sigma;

    let mut data: Vec<f32> = (-half..=half)
        .map(|x| (-(x as f32).powi(2) / sigma2).exp())
        .collect();

    // Normalize
    let sum: f32 = data.iter().sum();
    for w in &mut data {
        *w /= sum;
    }
    data
}

/// Mirrors an out-of-range coordinate back into `[0, n)` without repeating
/// the edge sample.
///
/// # Example
///
/// ```rust
/// use filmgrade_ops::filter::reflect101;
///
/// assert_eq!(reflect101(-1, 4), 1);
/// assert_eq!(reflect101(4, 4), 2);
/// assert_eq!(reflect101(2, 4), 2);
/// ```
#[inline]
pub fn reflect101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let m = i.rem_euclid(period);
    if m >= n as isize {
        (period - m) as usize
    } else {
        m as usize
    }
}

/// Fails with [`OpsError::InvalidParameter`] unless both kernel dimensions
/// are odd and in `1..=MAX_BLUR_KERNEL`.
pub fn check_kernel(ksize: (usize, usize)) -> OpsResult<()> {
    let (kw, kh) = ksize;
    let valid = |k: usize| k % 2 == 1 && k <= MAX_BLUR_KERNEL;
    if !(valid(kw) && valid(kh)) {
        return Err(OpsError::InvalidParameter(format!(
            "blur kernel dimensions must be odd and in 1..={MAX_BLUR_KERNEL}, got {kw}x{kh}"
        )));
    }
    Ok(())
}

/// Gaussian blur with kernel `(width, height)` and automatic sigma.
///
/// Separable: a horizontal then a vertical pass in `f32`, quantized once at
/// the end. Works for any channel count.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if either kernel dimension is even or
/// outside `1..=MAX_BLUR_KERNEL` (see [`check_kernel`]).
pub fn gaussian_blur(image: &Image, ksize: (usize, usize)) -> OpsResult<Image> {
    check_kernel(ksize)?;
    let (kw, kh) = ksize;
    trace!(width = image.width(), height = image.height(), kw, kh, "gaussian_blur");
    debug!(sigma_x = auto_sigma(kw), sigma_y = auto_sigma(kh), "Applying gaussian blur");

    let kx = gaussian_kernel(kw);
    let ky = gaussian_kernel(kh);

    let width = image.width() as usize;
    let height = image.height() as usize;
    let channels = image.channels() as usize;

    let temp = blur_horizontal(image.data(), width, height, channels, &kx);
    let src = &temp;
    let row_len = width * channels;
    let ry = (kh / 2) as isize;

    Ok(image.map_rows(image.channels(), |y, _, dst| {
        for (i, d) in dst.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for (k, w) in ky.iter().enumerate() {
                let sy = reflect101(y as isize + k as isize - ry, height);
                sum += src[sy * row_len + i] * w;
            }
            *d = quantize(sum);
        }
    }))
}

/// Horizontal pass into an `f32` buffer.
fn blur_horizontal(src: &[u8], width: usize, height: usize, channels: usize, kernel: &[f32]) -> Vec<f32> {
    let row_len = width * channels;
    let mut dst = vec![0.0f32; row_len * height];
    let rx = (kernel.len() / 2) as isize;

    let pass = |y: usize, row: &mut [f32]| {
        let line = &src[y * row_len..(y + 1) * row_len];
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (k, w) in kernel.iter().enumerate() {
                    let sx = reflect101(x as isize + k as isize - rx, width);
                    sum += line[sx * channels + c] as f32 * w;
                }
                row[x * channels + c] = sum;
            }
        }
    };

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| pass(y, row));

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| pass(y, row));

    dst
}
