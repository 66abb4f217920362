//! The 8-bit image buffer every operator consumes and produces.
//!
//! # Memory Layout
//!
//! Samples are stored in **row-major** order, top-to-bottom, with channels
//! interleaved. The logical shape is `(height, width, channels)`:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! Channel order is fixed to RGB for color images. Grayscale and edge maps
//! are single-channel.
//!
//! # Value Semantics
//!
//! Operators take `&Image` and return a fresh `Image`; nothing mutates its
//! input, so callers never observe aliasing between input and output.
//!
//! # Usage
//!
//! ```rust
//! use filmgrade_core::Image;
//!
//! let mut img = Image::new(4, 2, 3).unwrap();
//! img.set_pixel(1, 0, &[255, 128, 0]);
//! assert_eq!(img.pixel(1, 0), &[255, 128, 0]);
//! assert_eq!(img.shape(), (2, 4, 3));
//! ```

use crate::{Error, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Owned 8-bit image, shape `(height, width, channels)`.
///
/// Samples are always valid bytes, so the `[0, 255]` range invariant holds by
/// construction; operators are responsible for clamping their float
/// intermediates before writing (see [`crate::pixel::quantize`]).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Image {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u32,
}

impl Image {
    /// Creates a zero-filled image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if any dimension is zero or the
    /// buffer size overflows `usize`.
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        let len = buffer_len(width, height, channels)?;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
            channels,
        })
    }

    /// Creates an image from existing samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not exactly
    /// `width * height * channels` or any dimension is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use filmgrade_core::Image;
    ///
    /// let img = Image::from_raw(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(img.pixel(1, 0), &[4, 5, 6]);
    /// assert!(Image::from_raw(2, 1, 3, vec![0; 5]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        let expected = buffer_len(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates an image with every pixel set to `pixel`.
    ///
    /// The channel count is taken from `pixel.len()`.
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> Result<Self> {
        let channels = pixel.len() as u32;
        let len = buffer_len(width, height, channels)?;
        let data = pixel.iter().copied().cycle().take(len).collect();
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Returns `(height, width, channels)`.
    #[inline]
    pub fn shape(&self) -> (u32, u32, u32) {
        (self.height, self.width, self.channels)
    }

    /// Number of samples in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image and returns its samples.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let len = self.row_len();
        let start = y as usize * len;
        &self.data[start..start + len]
    }

    /// Samples of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let idx = self.index(x, y);
        &self.data[idx..idx + self.channels as usize]
    }

    /// Overwrites the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds or `pixel.len()` differs
    /// from the channel count.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: &[u8]) {
        let idx = self.index(x, y);
        self.data[idx..idx + self.channels as usize].copy_from_slice(pixel);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for image {}x{}",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }

    /// Fails with [`Error::ChannelMismatch`] unless the image has exactly
    /// `expected` channels.
    ///
    /// # Example
    ///
    /// ```rust
    /// use filmgrade_core::Image;
    ///
    /// let gray = Image::new(2, 2, 1).unwrap();
    /// assert!(gray.require_channels(3, "apply_lut").is_err());
    /// ```
    pub fn require_channels(&self, expected: u32, op: &'static str) -> Result<()> {
        if self.channels != expected {
            return Err(Error::channel_mismatch(expected, self.channels, op));
        }
        Ok(())
    }

    /// Builds a new image of the same width/height by mapping each source row
    /// into a destination row with `out_channels` channels.
    ///
    /// `f` receives the row index, the source row and the destination row.
    /// Rows are processed in parallel when the `parallel` feature is enabled;
    /// `f` must therefore depend only on its arguments for the result to be
    /// independent of scheduling.
    pub fn map_rows<F>(&self, out_channels: u32, f: F) -> Image
    where
        F: Fn(usize, &[u8], &mut [u8]) + Send + Sync,
    {
        let src_row = self.row_len();
        let dst_row = self.width as usize * out_channels as usize;
        let mut data = vec![0u8; dst_row * self.height as usize];

        #[cfg(feature = "parallel")]
        data.par_chunks_mut(dst_row)
            .zip(self.data.par_chunks(src_row))
            .enumerate()
            .for_each(|(y, (dst, src))| f(y, src, dst));

        #[cfg(not(feature = "parallel"))]
        data.chunks_mut(dst_row)
            .zip(self.data.chunks(src_row))
            .enumerate()
            .for_each(|(y, (dst, src))| f(y, src, dst));

        Image {
            data,
            width: self.width,
            height: self.height,
            channels: out_channels,
        }
    }

    /// Applies `f` to every pixel, producing an image with `out_channels`
    /// channels. Convenience over [`map_rows`](Self::map_rows).
    ///
    /// # Example
    ///
    /// ```rust
    /// use filmgrade_core::Image;
    ///
    /// let img = Image::filled(3, 3, &[10, 20, 30]).unwrap();
    /// let inverted = img.map_pixels(3, |_, _, src, dst| {
    ///     for (d, s) in dst.iter_mut().zip(src) {
    ///         *d = 255 - s;
    ///     }
    /// });
    /// assert_eq!(inverted.pixel(2, 2), &[245, 235, 225]);
    /// ```
    pub fn map_pixels<F>(&self, out_channels: u32, f: F) -> Image
    where
        F: Fn(usize, usize, &[u8], &mut [u8]) + Send + Sync,
    {
        let in_ch = self.channels as usize;
        let out_ch = out_channels as usize;
        self.map_rows(out_channels, |y, src, dst| {
            for (x, (s, d)) in src
                .chunks_exact(in_ch)
                .zip(dst.chunks_exact_mut(out_ch))
                .enumerate()
            {
                f(x, y, s, d);
            }
        })
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}

/// Validates dimensions and returns the total sample count.
fn buffer_len(width: u32, height: u32, channels: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    if channels == 0 {
        return Err(Error::invalid_dimensions(width, height, "channel count must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels as usize))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
}
