//! Error types and shared validation for encoders.

use thiserror::Error;

use crate::format::ImageFormat;
use crate::raster::RasterBuffer;

/// Errors that can occur during encoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The format is import-only
    #[error("Cannot encode to {0}")]
    UnsupportedFormat(ImageFormat),

    /// The underlying encoder failed
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed { format: ImageFormat, reason: String },
}

impl EncodeError {
    pub(crate) fn failed(format: ImageFormat, err: impl std::fmt::Display) -> Self {
        EncodeError::EncodingFailed {
            format,
            reason: err.to_string(),
        }
    }
}

/// Reject buffers whose fields were edited into an inconsistent state.
pub(crate) fn validate(image: &RasterBuffer) -> Result<(), EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

/// Map a `[0, 1]` quality to the 1-100 scale used by lossy encoders.
pub(crate) fn quality_percent(quality: f32) -> u8 {
    if !quality.is_finite() {
        return (crate::config::DEFAULT_QUALITY * 100.0).round() as u8;
    }
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}
