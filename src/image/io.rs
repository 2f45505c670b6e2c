//! I/O helpers for normalized images, transform planes and JSON.
//!
//! - `load_normalized_image`: read a PNG/JPEG/etc. into a luminance grid in `[0, 1]`.
//! - `save_normalized_grid`: write a grid to a grayscale PNG, no-data cells transparent.
//! - `save_rgb_image`: write an RGB buffer, used for line overlays.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::grid::{Grid2d, NormalizedImage};
use super::traits::ImageView;
use image::{GrayAlphaImage, LumaA, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

const RED_WEIGHT: f64 = 0.2126;
const GREEN_WEIGHT: f64 = 0.7152;
const BLUE_WEIGHT: f64 = 0.0722;

/// Integer gray level of an RGB pixel (Rec. 709 luminance, truncated).
#[inline]
pub fn gray_level(r: u8, g: u8, b: u8) -> u8 {
    (RED_WEIGHT * r as f64 + GREEN_WEIGHT * g as f64 + BLUE_WEIGHT * b as f64) as u8
}

/// Gray level of an RGB pixel scaled into `[0, 1]`.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    gray_level(r, g, b) as f64 / 255.0
}

/// Inverse of [`luminance`] for cells that carry data; `None` for no-data.
#[inline]
pub fn intensity_to_gray(value: f64) -> Option<u8> {
    (value >= 0.0).then(|| (value * 255.0).clamp(0.0, 255.0) as u8)
}

/// Normalized luminance grid of an RGB buffer.
pub fn normalize_rgb(image: &RgbImage) -> NormalizedImage {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let data = image
        .pixels()
        .map(|px| luminance(px.0[0], px.0[1], px.0[2]))
        .collect();
    Grid2d {
        w,
        h,
        stride: w,
        data,
    }
}

/// Load an image from disk and convert it to normalized luminance.
pub fn load_normalized_image(path: &Path) -> Result<NormalizedImage, String> {
    let img = load_rgb_image(path)?;
    Ok(normalize_rgb(&img))
}

/// Load an image from disk as 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbImage, String> {
    Ok(image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8())
}

/// Save a grid to a gray+alpha PNG. Cells with values in `[0, 1]` become
/// opaque gray levels, no-data cells stay fully transparent.
pub fn save_normalized_grid(grid: &Grid2d, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayAlphaImage::new(grid.w as u32, grid.h as u32);
    for (y, row) in grid.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            let px = match intensity_to_gray(v) {
                Some(gray) => LumaA([gray, 255]),
                None => LumaA([0, 0]),
            };
            out.put_pixel(x as u32, y as u32, px);
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save an RGB buffer to disk; the format follows the file extension.
pub fn save_rgb_image(image: &RgbImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn luminance_truncates_before_scaling() {
        // the weights sum to 1 only up to rounding, so white lands on 254
        assert_eq!(gray_level(255, 255, 255), 254);
        assert_eq!(gray_level(0, 0, 0), 0);
        // 0.2126 * 100 = 21.26 -> 21
        assert_eq!(gray_level(100, 0, 0), 21);
        assert_eq!(luminance(100, 0, 0), 21.0 / 255.0);
    }

    #[test]
    fn intensity_to_gray_truncates() {
        assert_eq!(intensity_to_gray(0.0), Some(0));
        assert_eq!(intensity_to_gray(0.5), Some(127));
        assert_eq!(intensity_to_gray(1.0), Some(255));
        for gray in [1u8, 17, 128, 254] {
            let back = intensity_to_gray(gray as f64 / 255.0).unwrap();
            assert!(gray - back <= 1);
        }
        assert_eq!(intensity_to_gray(-1.0), None);
    }

    #[test]
    fn normalize_rgb_keeps_layout() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(2, 1, Rgb([255, 255, 255]));
        let grid = normalize_rgb(&img);
        assert_eq!((grid.w, grid.h), (3, 2));
        assert_eq!(grid.get(2, 1), 254.0 / 255.0);
        assert_eq!(grid.get(0, 0), 0.0);
    }
}
