//! Error types for image decoding.

use thiserror::Error;

use crate::raster::RasterError;

/// Error types for image decoding operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The container, compression or pixel layout is not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The header declares a zero width or height.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The source bytes are malformed or truncated.
    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),
}

impl From<RasterError> for DecodeError {
    fn from(err: RasterError) -> Self {
        match err {
            RasterError::InvalidDimensions { width, height } => {
                DecodeError::InvalidDimensions { width, height }
            }
            other => DecodeError::DecodeFailure(other.to_string()),
        }
    }
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(e) => DecodeError::UnsupportedFormat(e.to_string()),
            other => DecodeError::DecodeFailure(other.to_string()),
        }
    }
}
