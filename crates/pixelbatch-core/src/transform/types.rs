//! Shared types for geometric transforms.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from geometric transforms.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// Requested output width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Crop aspect ratio is zero, negative or not finite.
    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(f64),

    /// The source buffer's pixel data doesn't match its dimensions.
    #[error("Source buffer is inconsistent with its dimensions ({width}x{height})")]
    CorruptBuffer { width: u32, height: u32 },
}

/// Filter type for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Catmull-Rom bicubic interpolation.
    CatmullRom,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::CatmullRom => image::imageops::FilterType::CatmullRom,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_error_display() {
        let err = TransformError::InvalidAspectRatio(-1.5);
        assert_eq!(err.to_string(), "Invalid aspect ratio: -1.5");
    }
}
