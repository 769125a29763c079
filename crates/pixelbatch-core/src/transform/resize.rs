//! Resampling to new dimensions using the `image` crate's filters.
//!
//! All functions return new buffers without modifying the input.

use super::{FilterType, TransformError};
use crate::raster::RasterBuffer;

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `TransformError::InvalidDimensions` if either target edge is zero
/// and `TransformError::CorruptBuffer` if the source pixels don't match its
/// dimensions.
pub fn resize(
    image: &RasterBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterBuffer, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba = image.to_rgba_image().ok_or(TransformError::CorruptBuffer {
        width: image.width,
        height: image.height,
    })?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(RasterBuffer::from_rgba_image(resized))
}

/// Scale an image to fit inside `max_width x max_height`, keeping its aspect
/// ratio. Small images are scaled up.
pub fn resize_to_fit(
    image: &RasterBuffer,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<RasterBuffer, TransformError> {
    let (width, height) = fit_dimensions(image.width, image.height, max_width, max_height)?;
    resize(image, width, height, filter)
}

/// Dimensions of `width x height` scaled to fit a `max_width x max_height`
/// box, each edge at least 1.
pub fn fit_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> Result<(u32, u32), TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }
    if max_width == 0 || max_height == 0 {
        return Err(TransformError::InvalidDimensions {
            width: max_width,
            height: max_height,
        });
    }

    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let fit = |edge: u32, max: u32| ((edge as f64 * scale).round() as u32).clamp(1, max);
    Ok((fit(width, max_width), fit(height, max_height)))
}
