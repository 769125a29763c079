//! Engine-wide settings shared by the batch engine, editor and export paths.

use serde::{Deserialize, Serialize};

use crate::collage::CollageOptions;
use crate::transform::FilterType;

/// Minimum edge length of an explicit crop rectangle.
pub const MIN_CROP_SIZE: u32 = 20;

/// Quality used for lossy encodes when the caller doesn't pick one.
pub const DEFAULT_QUALITY: f32 = 0.92;

/// Tunable engine settings.
///
/// Deserializes from partial input; any missing field keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Quality (0.0 to 1.0) for lossy re-encodes during export.
    pub default_quality: f32,
    /// Filter used by the resize operation.
    pub resize_filter: FilterType,
    /// Minimum crop edge in pixels.
    pub min_crop_size: u32,
    /// Collage cell geometry.
    pub collage: CollageOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_quality: DEFAULT_QUALITY,
            resize_filter: FilterType::Lanczos3,
            min_crop_size: MIN_CROP_SIZE,
            collage: CollageOptions::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// `default_quality` clamped into `[0, 1]`.
    pub fn quality(&self) -> f32 {
        if self.default_quality.is_finite() {
            self.default_quality.clamp(0.0, 1.0)
        } else {
            DEFAULT_QUALITY
        }
    }
}
