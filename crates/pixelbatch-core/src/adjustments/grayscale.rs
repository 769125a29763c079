//! Grayscale reduction.

use serde::{Deserialize, Serialize};

use crate::raster::RasterBuffer;

/// How RGB is reduced to a single gray level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrayscaleAlgorithm {
    /// `max(r, g, b)`; keeps saturated colors bright.
    Max,
    /// `(r + g + b) / 3`
    Average,
    /// ITU-R BT.601 luma: `0.299r + 0.587g + 0.114b`
    #[default]
    Weighted,
}

impl GrayscaleAlgorithm {
    #[inline]
    pub fn gray(self, r: u8, g: u8, b: u8) -> u8 {
        match self {
            GrayscaleAlgorithm::Max => r.max(g).max(b),
            GrayscaleAlgorithm::Average => {
                ((r as f32 + g as f32 + b as f32) / 3.0).round() as u8
            }
            GrayscaleAlgorithm::Weighted => (0.299 * r as f32 + 0.587 * g as f32
                + 0.114 * b as f32)
                .round()
                .clamp(0.0, 255.0) as u8,
        }
    }
}

/// Replace RGB with the gray level of each pixel. Alpha is untouched.
pub fn grayscale(image: &RasterBuffer, algorithm: GrayscaleAlgorithm) -> RasterBuffer {
    image.map_pixels(|[r, g, b, a]| {
        let v = algorithm.gray(r, g, b);
        [v, v, v, a]
    })
}
