//! Image cropping in pixel coordinates.
//!
//! Crop rectangles are clamped into the source rather than rejected, and are
//! never smaller than the configured minimum edge (20 px by default) unless
//! the source itself is smaller.

use serde::{Deserialize, Serialize};

use super::TransformError;
use crate::raster::RasterBuffer;

/// A crop region in source pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Fit the rectangle inside a `src_w x src_h` image.
    ///
    /// Each edge is raised to `min_size` (capped at the source edge) and to at
    /// least one pixel, capped at the source edge, then the origin is moved so
    /// the rectangle fits.
    pub fn clamp_to(&self, src_w: u32, src_h: u32, min_size: u32) -> CropRect {
        let width = self.width.max(min_size.min(src_w)).max(1).min(src_w);
        let height = self.height.max(min_size.min(src_h)).max(1).min(src_h);
        CropRect {
            x: self.x.min(src_w - width),
            y: self.y.min(src_h - height),
            width,
            height,
        }
    }
}

/// Copy a sub-rectangle into a new buffer of that size.
///
/// The rectangle is clamped with [`CropRect::clamp_to`]; a full-image
/// rectangle returns a copy of the source.
pub fn crop(image: &RasterBuffer, rect: CropRect, min_size: u32) -> RasterBuffer {
    let rect = rect.clamp_to(image.width, image.height, min_size);

    // Fast path: full crop returns a clone
    if rect.x == 0 && rect.y == 0 && rect.width == image.width && rect.height == image.height {
        return image.clone();
    }

    let src_stride = image.width as usize * 4;
    let row_len = rect.width as usize * 4;
    let mut output = Vec::with_capacity(row_len * rect.height as usize);

    // Copy pixel data row by row for efficiency
    for y in rect.y..rect.y + rect.height {
        let start = y as usize * src_stride + rect.x as usize * 4;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    RasterBuffer {
        width: rect.width,
        height: rect.height,
        pixels: output,
    }
}

/// The largest centered rectangle with `width / height == ratio`.
pub fn center_crop_rect(src_w: u32, src_h: u32, ratio: f64) -> Result<CropRect, TransformError> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(TransformError::InvalidAspectRatio(ratio));
    }
    if src_w == 0 || src_h == 0 {
        return Err(TransformError::InvalidDimensions {
            width: src_w,
            height: src_h,
        });
    }

    // Absorb float error so an exact ratio match keeps the full edge
    let floor = |v: f64| (v + 1e-9).floor() as u32;

    let current = src_w as f64 / src_h as f64;
    let (crop_w, crop_h) = if current > ratio {
        // Wider than target: limit width
        (floor(src_h as f64 * ratio).clamp(1, src_w), src_h)
    } else {
        // Taller than target: limit height
        (src_w, floor(src_w as f64 / ratio).clamp(1, src_h))
    };

    Ok(CropRect {
        x: (src_w - crop_w) / 2,
        y: (src_h - crop_h) / 2,
        width: crop_w,
        height: crop_h,
    })
}

/// Crop the largest centered region of the given aspect ratio.
pub fn crop_center(
    image: &RasterBuffer,
    ratio: f64,
    min_size: u32,
) -> Result<RasterBuffer, TransformError> {
    let rect = center_crop_rect(image.width, image.height, ratio)?;
    Ok(crop(image, rect, min_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> RasterBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        RasterBuffer::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(100, 100);
        assert_eq!(crop(&img, CropRect::new(0, 0, 100, 100), 20), img);
    }

    #[test]
    fn test_explicit_crop_copies_region() {
        let img = test_image(100, 80);
        let out = crop(&img, CropRect::new(10, 5, 30, 25), 20);
        assert_eq!(out.dimensions(), (30, 25));
        assert_eq!(out.pixel(0, 0), Some([10, 5, 0, 255]));
        assert_eq!(out.pixel(29, 24), Some([39, 29, 0, 255]));
    }

    #[test]
    fn test_minimum_size_enforced() {
        let img = test_image(100, 100);
        let out = crop(&img, CropRect::new(50, 50, 3, 4), 20);
        assert_eq!(out.dimensions(), (20, 20));
        assert_eq!(out.pixel(0, 0), Some([50, 50, 0, 255]));
    }

    #[test]
    fn test_minimum_size_capped_by_source() {
        let img = test_image(10, 30);
        let out = crop(&img, CropRect::new(0, 0, 1, 1), 20);
        assert_eq!(out.dimensions(), (10, 20));
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(100, 100);
        let out = crop(&img, CropRect::new(90, 95, 50, 50), 20);
        assert_eq!(out.dimensions(), (50, 50));
        // Origin shifted so the rectangle fits
        assert_eq!(out.pixel(0, 0), Some([50, 50, 0, 255]));

        let out = crop(&img, CropRect::new(0, 0, 500, 500), 20);
        assert_eq!(out, img);
    }

    #[test]
    fn test_center_crop_rect_wide_source() {
        let rect = center_crop_rect(200, 100, 1.0).unwrap();
        assert_eq!(rect, CropRect::new(50, 0, 100, 100));
    }

    #[test]
    fn test_center_crop_rect_tall_source() {
        let rect = center_crop_rect(100, 200, 16.0 / 9.0).unwrap();
        assert_eq!(rect.width, 100);
        assert_eq!(rect.height, 56);
        assert_eq!(rect.y, 72);
    }

    #[test]
    fn test_center_crop_rect_same_ratio() {
        let rect = center_crop_rect(160, 90, 16.0 / 9.0).unwrap();
        assert_eq!(rect, CropRect::new(0, 0, 160, 90));
    }

    #[test]
    fn test_center_crop_invalid_ratio() {
        assert!(matches!(
            center_crop_rect(10, 10, 0.0),
            Err(TransformError::InvalidAspectRatio(_))
        ));
        assert!(center_crop_rect(10, 10, f64::NAN).is_err());
        assert!(center_crop_rect(10, 10, -2.0).is_err());
    }

    #[test]
    fn test_crop_center() {
        let img = test_image(120, 60);
        let out = crop_center(&img, 1.0, 20).unwrap();
        assert_eq!(out.dimensions(), (60, 60));
        assert_eq!(out.pixel(0, 0), Some([30, 0, 0, 255]));
    }
}
