//! Canny-style edge detection.
//!
//! Pipeline: luma reduction, 3x3 Sobel gradients, non-maximum suppression
//! along the quantized gradient direction, then double-threshold hysteresis
//! with 8-connectivity. Output is a single-channel map of 0 or 255.
//!
//! Gradient magnitude is the L1 norm `|gx| + |gy|` of the raw Sobel
//! responses, so thresholds are on that scale (a full black/white step
//! gives 1020).

use crate::filter::{grayscale, reflect101};
use crate::{OpsError, OpsResult};
use filmgrade_core::{Error, Image};
use tracing::{debug, trace};

/// Lower hysteresis threshold used by [`edge_detect`].
pub const CANNY_LOW: u32 = 100;

/// Upper hysteresis threshold used by [`edge_detect`].
pub const CANNY_HIGH: u32 = 200;

// tan(22.5) and tan(67.5)
const TAN_22_5: f32 = 0.414_213_56;
const TAN_67_5: f32 = 2.414_213_6;

/// Edge map with the fixed thresholds ([`CANNY_LOW`], [`CANNY_HIGH`]).
///
/// RGB input is reduced to luma first; single-channel input is used as is.
///
/// # Example
///
/// ```rust
/// use filmgrade_core::Image;
/// use filmgrade_ops::edge::edge_detect;
///
/// let flat = Image::filled(8, 8, &[90, 90, 90]).unwrap();
/// let edges = edge_detect(&flat).unwrap();
/// assert_eq!(edges.channels(), 1);
/// assert!(edges.data().iter().all(|&v| v == 0));
/// ```
pub fn edge_detect(image: &Image) -> OpsResult<Image> {
    canny(image, CANNY_LOW, CANNY_HIGH)
}

/// Edge map with caller-chosen hysteresis thresholds.
///
/// Pixels whose suppressed gradient exceeds `high` seed edges; pixels above
/// `low` are kept only when 8-connected to a seed.
///
/// # Errors
///
/// - Channel mismatch unless the image has 1 or 3 channels
/// - [`OpsError::InvalidParameter`] if `low > high`
pub fn canny(image: &Image, low: u32, high: u32) -> OpsResult<Image> {
    if low > high {
        return Err(OpsError::InvalidParameter(format!(
            "canny low threshold {low} exceeds high threshold {high}"
        )));
    }
    let gray = match image.channels() {
        1 => image.clone(),
        3 => grayscale(image)?,
        n => return Err(Error::channel_mismatch(3, n, "edge_detect").into()),
    };
    trace!(width = gray.width(), height = gray.height(), low, high, "canny");

    let width = gray.width() as usize;
    let height = gray.height() as usize;
    let (gx, gy) = sobel(gray.data(), width, height);
    let mag: Vec<u32> = gx
        .iter()
        .zip(&gy)
        .map(|(x, y)| x.unsigned_abs() + y.unsigned_abs())
        .collect();

    let suppressed = non_max_suppression(&mag, &gx, &gy, width, height);
    let edges = hysteresis(&suppressed, width, height, low, high);
    debug!(
        edge_pixels = edges.iter().filter(|&&v| v == 255).count(),
        "Edge detection complete"
    );

    Ok(Image::from_raw(gray.width(), gray.height(), 1, edges)?)
}

/// 3x3 Sobel derivatives with reflect-101 borders.
fn sobel(src: &[u8], width: usize, height: usize) -> (Vec<i32>, Vec<i32>) {
    let mut gx = vec![0i32; width * height];
    let mut gy = vec![0i32; width * height];
    let at = |x: isize, y: isize| -> i32 {
        src[reflect101(y, height) * width + reflect101(x, width)] as i32
    };

    for y in 0..height as isize {
        for x in 0..width as isize {
            let idx = y as usize * width + x as usize;
            gx[idx] = (at(x + 1, y - 1) + 2 * at(x + 1, y) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x - 1, y) + at(x - 1, y + 1));
            gy[idx] = (at(x - 1, y + 1) + 2 * at(x, y + 1) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x, y - 1) + at(x + 1, y - 1));
        }
    }
    (gx, gy)
}

/// Zeroes every magnitude that isn't a local maximum across the edge.
///
/// Ties resolve toward the lower/left pixel so a symmetric step yields a
/// one-pixel-wide line.
fn non_max_suppression(mag: &[u32], gx: &[i32], gy: &[i32], width: usize, height: usize) -> Vec<u32> {
    let mut out = vec![0u32; mag.len()];
    let get = |x: isize, y: isize| -> u32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            mag[y as usize * width + x as usize]
        }
    };

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let m = mag[idx];
            if m == 0 {
                continue;
            }
            let (xi, yi) = (x as isize, y as isize);
            let ax = gx[idx].unsigned_abs() as f32;
            let ay = gy[idx].unsigned_abs() as f32;

            let keep = if ay <= ax * TAN_22_5 {
                m > get(xi - 1, yi) && m >= get(xi + 1, yi)
            } else if ay >= ax * TAN_67_5 {
                m > get(xi, yi - 1) && m >= get(xi, yi + 1)
            } else {
                let s: isize = if (gx[idx] < 0) != (gy[idx] < 0) { -1 } else { 1 };
                m > get(xi - s, yi - 1) && m > get(xi + s, yi + 1)
            };

            if keep {
                out[idx] = m;
            }
        }
    }
    out
}

/// Double threshold plus 8-connected edge tracking.
fn hysteresis(mag: &[u32], width: usize, height: usize, low: u32, high: u32) -> Vec<u8> {
    let mut out = vec![0u8; mag.len()];
    let mut stack: Vec<usize> = mag
        .iter()
        .enumerate()
        .filter(|&(_, &m)| m > high)
        .map(|(i, _)| i)
        .collect();
    for &i in &stack {
        out[i] = 255;
    }

    while let Some(idx) = stack.pop() {
        let (x, y) = ((idx % width) as isize, (idx / width) as isize);
        for dy in -1..=1isize {
            for dx in -1..=1isize {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let n = ny as usize * width + nx as usize;
                if out[n] == 0 && mag[n] > low {
                    out[n] = 255;
                    stack.push(n);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step(width: u32, height: u32, split: u32) -> Image {
        let mut img = Image::new(width, height, 3).unwrap();
        for y in 0..height {
            for x in split..width {
                img.set_pixel(x, y, &[255, 255, 255]);
            }
        }
        img
    }

    #[test]
    fn test_step_gives_single_line() {
        let img = vertical_step(8, 6, 4);
        let edges = edge_detect(&img).unwrap();
        assert_eq!(edges.shape(), (6, 8, 1));
        for y in 0..6 {
            for x in 0..8 {
                let expected = if x == 3 { 255 } else { 0 };
                assert_eq!(edges.pixel(x, y)[0], expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_output_binary() {
        let data: Vec<u8> = (0..32 * 32).map(|i| ((i * 37) % 256) as u8).collect();
        let img = Image::from_raw(32, 32, 1, data).unwrap();
        let edges = edge_detect(&img).unwrap();
        assert!(edges.data().iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn test_weak_step_below_low_threshold() {
        // 20-level step -> magnitude 80 < 100
        let mut img = Image::filled(8, 4, &[100]).unwrap();
        for y in 0..4 {
            for x in 4..8 {
                img.set_pixel(x, y, &[120]);
            }
        }
        let edges = edge_detect(&img).unwrap();
        assert!(edges.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_hysteresis_links_weak_to_strong() {
        // row 0 strong seed, row 1 weak but connected, row 2 weak isolated
        let width = 5;
        let mag = vec![
            0, 0, 250, 0, 0, //
            0, 0, 150, 0, 0, //
            0, 0, 0, 0, 0, //
            150, 0, 0, 0, 0,
        ];
        let out = hysteresis(&mag, width, 4, 100, 200);
        assert_eq!(out[2], 255);
        assert_eq!(out[7], 255);
        assert_eq!(out[15], 0);
    }

    #[test]
    fn test_rejects_two_channel_and_bad_thresholds() {
        let img = Image::new(4, 4, 2).unwrap();
        assert!(matches!(edge_detect(&img), Err(OpsError::Image(_))));
        let rgb = Image::new(4, 4, 3).unwrap();
        assert!(matches!(
            canny(&rgb, 300, 200),
            Err(OpsError::InvalidParameter(_))
        ));
    }
}
