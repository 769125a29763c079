//! The operation value dispatched by the batch engine and the editor.
//!
//! An [`Operation`] deserializes from the tagged objects the UI sends, for
//! example `{"type": "rotate", "angle": 90}` or `{"type": "remove-bg-black"}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adjustments::{
    adjust_color, cutout_color, grayscale, parse_hex_color_or_white, remove_black_background,
    ChromaKey, ColorAdjustment, GrayscaleAlgorithm,
};
use crate::config::{EngineConfig, DEFAULT_QUALITY};
use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::format::ImageFormat;
use crate::raster::RasterBuffer;
use crate::transform::{
    center_crop_rect, compute_rotated_bounds, crop_center, fit_dimensions, flip, resize,
    rotate, FlipDirection, TransformError,
};

/// Errors from running an operation end to end (decode, apply, encode).
#[derive(Debug, Error, PartialEq)]
pub enum ProcessError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

fn default_quality() -> f32 {
    DEFAULT_QUALITY
}

/// A single edit, applied identically to every selected image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Operation {
    /// Rotate by `angle` degrees clockwise, expanding the canvas.
    Rotate { angle: f64 },

    Flip { direction: FlipDirection },

    /// Resample to `width x height`, or to fit inside that box when
    /// `maintain_aspect` is set.
    Resize {
        width: u32,
        height: u32,
        #[serde(default, rename = "maintainAspect")]
        maintain_aspect: bool,
    },

    /// Center crop to `width / height == ratio`.
    Crop { ratio: f64 },

    Grayscale {
        #[serde(default)]
        algorithm: GrayscaleAlgorithm,
    },

    /// Re-encode to another format. Pixels are unchanged.
    Convert {
        format: ImageFormat,
        #[serde(default = "default_quality")]
        quality: f32,
    },

    ColorAdjust(ColorAdjustment),

    /// Chroma-key cutout; `color` is a `#rrggbb` string.
    CutoutColor {
        color: String,
        tolerance: f32,
        #[serde(default)]
        softness: f32,
    },

    RemoveBgBlack,
}

impl Operation {
    /// Output size for a `width x height` input, without touching pixels.
    pub fn target_dimensions(
        &self,
        width: u32,
        height: u32,
        config: &EngineConfig,
    ) -> Result<(u32, u32), TransformError> {
        match self {
            Operation::Rotate { angle } => Ok(compute_rotated_bounds(width, height, *angle)),
            Operation::Resize {
                width: w,
                height: h,
                maintain_aspect,
            } => {
                if *maintain_aspect {
                    fit_dimensions(width, height, *w, *h)
                } else if *w == 0 || *h == 0 {
                    Err(TransformError::InvalidDimensions {
                        width: *w,
                        height: *h,
                    })
                } else {
                    Ok((*w, *h))
                }
            }
            Operation::Crop { ratio } => {
                let rect = center_crop_rect(width, height, *ratio)?
                    .clamp_to(width, height, config.min_crop_size);
                Ok((rect.width, rect.height))
            }
            Operation::Flip { .. }
            | Operation::Grayscale { .. }
            | Operation::Convert { .. }
            | Operation::ColorAdjust(_)
            | Operation::CutoutColor { .. }
            | Operation::RemoveBgBlack => Ok((width, height)),
        }
    }

    /// Apply the pixel or geometric part of the operation.
    ///
    /// `Convert` returns a copy; the re-encode happens where the result is
    /// stored.
    pub fn apply(
        &self,
        image: &RasterBuffer,
        config: &EngineConfig,
    ) -> Result<RasterBuffer, ProcessError> {
        let output = match self {
            Operation::Rotate { angle } => rotate(image, *angle),
            Operation::Flip { direction } => flip(image, *direction),
            Operation::Resize { width, height, .. } => {
                let (w, h) = self.target_dimensions(image.width, image.height, config)?;
                tracing::trace!(width, height, w, h, "resize target");
                resize(image, w, h, config.resize_filter)?
            }
            Operation::Crop { ratio } => crop_center(image, *ratio, config.min_crop_size)?,
            Operation::Grayscale { algorithm } => grayscale(image, *algorithm),
            Operation::Convert { .. } => image.clone(),
            Operation::ColorAdjust(adjustment) => adjust_color(image, adjustment),
            Operation::CutoutColor {
                color,
                tolerance,
                softness,
            } => {
                let key = ChromaKey::new(parse_hex_color_or_white(color), *tolerance, *softness);
                cutout_color(image, &key)
            }
            Operation::RemoveBgBlack => remove_black_background(image),
        };
        Ok(output)
    }

    /// Target format and quality when the operation is a conversion.
    pub fn output_format(&self) -> Option<(ImageFormat, f32)> {
        match self {
            Operation::Convert { format, quality } => Some((*format, *quality)),
            _ => None,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Rotate { .. } => "rotate",
            Operation::Flip { .. } => "flip",
            Operation::Resize { .. } => "resize",
            Operation::Crop { .. } => "crop",
            Operation::Grayscale { .. } => "grayscale",
            Operation::Convert { .. } => "convert",
            Operation::ColorAdjust(_) => "color-adjust",
            Operation::CutoutColor { .. } => "cutout-color",
            Operation::RemoveBgBlack => "remove-bg-black",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_target_dimensions() {
        let cfg = config();
        let rot = Operation::Rotate { angle: 90.0 };
        assert_eq!(rot.target_dimensions(40, 10, &cfg), Ok((10, 40)));

        let rot = Operation::Rotate { angle: 45.0 };
        assert_eq!(rot.target_dimensions(100, 100, &cfg), Ok((141, 141)));

        let crop = Operation::Crop { ratio: 1.0 };
        assert_eq!(crop.target_dimensions(300, 100, &cfg), Ok((100, 100)));

        let gray = Operation::Grayscale {
            algorithm: GrayscaleAlgorithm::Max,
        };
        assert_eq!(gray.target_dimensions(7, 9, &cfg), Ok((7, 9)));
    }

    #[test]
    fn test_resize_dimensions() {
        let cfg = config();
        let exact = Operation::Resize {
            width: 30,
            height: 20,
            maintain_aspect: false,
        };
        assert_eq!(exact.target_dimensions(100, 100, &cfg), Ok((30, 20)));

        let fit = Operation::Resize {
            width: 30,
            height: 20,
            maintain_aspect: true,
        };
        assert_eq!(fit.target_dimensions(100, 100, &cfg), Ok((20, 20)));

        let zero = Operation::Resize {
            width: 0,
            height: 20,
            maintain_aspect: false,
        };
        assert!(zero.target_dimensions(100, 100, &cfg).is_err());
    }

    #[test]
    fn test_apply_matches_target_dimensions() {
        let cfg = config();
        let img = RasterBuffer::filled(64, 48, [90, 120, 200, 255]);
        let ops = [
            Operation::Rotate { angle: 30.0 },
            Operation::Rotate { angle: -90.0 },
            Operation::Flip {
                direction: FlipDirection::Vertical,
            },
            Operation::Resize {
                width: 20,
                height: 25,
                maintain_aspect: false,
            },
            Operation::Crop { ratio: 16.0 / 9.0 },
            Operation::RemoveBgBlack,
        ];
        for op in ops {
            let out = op.apply(&img, &cfg).unwrap();
            assert_eq!(
                Ok(out.dimensions()),
                op.target_dimensions(64, 48, &cfg),
                "{}",
                op.name()
            );
        }
    }

    #[test]
    fn test_apply_does_not_touch_source() {
        let img = RasterBuffer::filled(4, 4, [200, 10, 10, 255]);
        let before = img.clone();
        let op = Operation::Grayscale {
            algorithm: GrayscaleAlgorithm::Weighted,
        };
        let out = op.apply(&img, &config()).unwrap();
        assert_eq!(img, before);
        assert_ne!(out, img);
    }

    #[test]
    fn test_convert_keeps_pixels() {
        let img = RasterBuffer::filled(3, 3, [1, 2, 3, 4]);
        let op = Operation::Convert {
            format: ImageFormat::Webp,
            quality: 0.5,
        };
        assert_eq!(op.apply(&img, &config()).unwrap(), img);
        assert_eq!(op.output_format(), Some((ImageFormat::Webp, 0.5)));
        assert_eq!(Operation::RemoveBgBlack.output_format(), None);
    }

    #[test]
    fn test_cutout_with_bad_color_uses_white() {
        let img = RasterBuffer::filled(1, 1, [255, 255, 255, 255]);
        let op = Operation::CutoutColor {
            color: "nope".to_string(),
            tolerance: 0.0,
            softness: 0.0,
        };
        assert_eq!(op.apply(&img, &config()).unwrap().pixel(0, 0), Some([255, 255, 255, 0]));
    }

    #[test]
    fn test_bad_crop_ratio_is_an_error() {
        let img = RasterBuffer::filled(4, 4, [0, 0, 0, 255]);
        let op = Operation::Crop { ratio: 0.0 };
        assert!(matches!(
            op.apply(&img, &config()),
            Err(ProcessError::Transform(TransformError::InvalidAspectRatio(_)))
        ));
    }
}
