//! CLI command implementations

pub mod apply;
pub mod list;

use anyhow::{bail, Context, Result};
use filmgrade_core::Image;
use image::{GrayImage, RgbImage};
use std::path::Path;
use tracing::debug;

/// Load image from path as 8-bit RGB.
///
/// Gray, alpha and 16-bit sources are converted; the engine only sees RGB.
pub fn load_image(path: &Path) -> Result<Image> {
    let decoded = image::open(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    debug!(path = %path.display(), color = ?decoded.color(), "Decoded image");

    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    Image::from_raw(width, height, 3, rgb.into_raw())
        .with_context(|| format!("Unusable image: {}", path.display()))
}

/// Save image to path; format follows the extension.
///
/// 1-channel results are written as grayscale.
pub fn save_image(path: &Path, image: Image) -> Result<()> {
    let (width, height, channels) = (image.width(), image.height(), image.channels());
    let data = image.into_raw();
    let result = match channels {
        1 => GrayImage::from_raw(width, height, data).map(|buf| buf.save(path)),
        3 => RgbImage::from_raw(width, height, data).map(|buf| buf.save(path)),
        n => bail!("Cannot encode {n}-channel image"),
    };
    match result {
        Some(saved) => saved.with_context(|| format!("Failed to save: {}", path.display())),
        None => bail!("Buffer does not match {width}x{height}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_roundtrip_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        let data: Vec<u8> = (0..6 * 4 * 3).map(|i| (i * 7 % 256) as u8).collect();
        let img = Image::from_raw(6, 4, 3, data).unwrap();

        save_image(&path, img.clone()).unwrap();
        assert_eq!(load_image(&path).unwrap(), img);
    }

    #[test]
    fn test_gray_saved_and_reloaded_as_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let img = Image::filled(3, 2, &[90]).unwrap();

        save_image(&path, img).unwrap();
        let back = load_image(&path).unwrap();
        assert_eq!(back.channels(), 3);
        assert_eq!(back.pixel(1, 1), &[90, 90, 90]);
    }

    #[test]
    fn test_missing_file() {
        let err = load_image(Path::new("/nonexistent/frame.png")).unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }
}
