//! Hue, saturation and brightness adjustment.
//!
//! Uses the filter-effects color matrices (`hue-rotate`, `saturate`,
//! `brightness`) applied in that order, each stage clamped to `[0, 1]`.
//! These operate directly on sRGB values.

use serde::{Deserialize, Serialize};

use crate::raster::RasterBuffer;

type Matrix = [[f32; 3]; 3];

/// Hue rotation plus saturation and brightness scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorAdjustment {
    /// Hue rotation in degrees (wraps mod 360)
    pub hue: f32,
    /// Saturation percent (100 = unchanged, 0 = gray)
    pub saturation: f32,
    /// Brightness percent (100 = unchanged, 0 = black)
    pub brightness: f32,
}

impl Default for ColorAdjustment {
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 100.0,
            brightness: 100.0,
        }
    }
}

impl ColorAdjustment {
    pub fn new(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Check if all values are at their defaults
    pub fn is_identity(&self) -> bool {
        self.hue.rem_euclid(360.0).abs() < 1e-4
            && (self.saturation - 100.0).abs() < 1e-4
            && (self.brightness - 100.0).abs() < 1e-4
    }

    /// Adjust a single RGB triple.
    #[inline]
    fn apply(&self, hue: &Matrix, saturate: &Matrix, rgb: [f32; 3]) -> [f32; 3] {
        let rgb = mul(hue, rgb);
        let rgb = mul(saturate, rgb);
        let k = (self.brightness / 100.0).max(0.0);
        [
            (rgb[0] * k).clamp(0.0, 1.0),
            (rgb[1] * k).clamp(0.0, 1.0),
            (rgb[2] * k).clamp(0.0, 1.0),
        ]
    }
}

/// Apply a color adjustment. Alpha is untouched.
pub fn adjust_color(image: &RasterBuffer, adjustment: &ColorAdjustment) -> RasterBuffer {
    // Early exit if no adjustments
    if adjustment.is_identity() {
        return image.clone();
    }

    let hue = hue_rotate_matrix(adjustment.hue);
    let saturate = saturate_matrix((adjustment.saturation / 100.0).max(0.0));

    image.map_pixels(|[r, g, b, a]| {
        let out = adjustment.apply(
            &hue,
            &saturate,
            [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0],
        );
        [
            (out[0] * 255.0).round() as u8,
            (out[1] * 255.0).round() as u8,
            (out[2] * 255.0).round() as u8,
            a,
        ]
    })
}

fn hue_rotate_matrix(degrees: f32) -> Matrix {
    let (sin, cos) = degrees.rem_euclid(360.0).to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

fn saturate_matrix(s: f32) -> Matrix {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

#[inline]
fn mul(m: &Matrix, v: [f32; 3]) -> [f32; 3] {
    let row = |r: &[f32; 3]| (r[0] * v[0] + r[1] * v[1] + r[2] * v[2]).clamp(0.0, 1.0);
    [row(&m[0]), row(&m[1]), row(&m[2])]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RasterBuffer {
        RasterBuffer::new(
            2,
            1,
            vec![200, 100, 50, 255, 10, 220, 90, 128],
        )
        .unwrap()
    }

    #[test]
    fn test_identity() {
        let img = sample();
        assert!(ColorAdjustment::default().is_identity());
        assert_eq!(adjust_color(&img, &ColorAdjustment::default()), img);
        assert!(ColorAdjustment::new(360.0, 100.0, 100.0).is_identity());
    }

    #[test]
    fn test_identity_matrices_do_not_drift() {
        // Going through the matrix path with a full turn must still be exact.
        let hue = hue_rotate_matrix(0.0);
        let sat = saturate_matrix(1.0);
        let adj = ColorAdjustment::default();
        for v in [0u8, 1, 64, 128, 254, 255] {
            let f = v as f32 / 255.0;
            let out = adj.apply(&hue, &sat, [f, f, f]);
            assert_eq!((out[0] * 255.0).round() as u8, v);
        }
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let out = adjust_color(&sample(), &ColorAdjustment::new(0.0, 0.0, 100.0));
        for px in out.pixels.chunks_exact(4) {
            assert!((px[0] as i32 - px[1] as i32).abs() <= 1);
            assert!((px[1] as i32 - px[2] as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_zero_brightness_is_black_keeps_alpha() {
        let out = adjust_color(&sample(), &ColorAdjustment::new(0.0, 100.0, 0.0));
        assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(out.pixel(1, 0), Some([0, 0, 0, 128]));
    }

    #[test]
    fn test_brightness_scales() {
        let img = RasterBuffer::filled(1, 1, [100, 50, 20, 255]);
        let out = adjust_color(&img, &ColorAdjustment::new(0.0, 100.0, 50.0));
        assert_eq!(out.pixel(0, 0), Some([50, 25, 10, 255]));
    }

    #[test]
    fn test_hue_rotation_moves_red_toward_green() {
        let img = RasterBuffer::filled(1, 1, [255, 0, 0, 255]);
        let out = adjust_color(&img, &ColorAdjustment::new(120.0, 100.0, 100.0));
        let [r, g, _, _] = out.pixel(0, 0).unwrap();
        assert!(g > r, "expected green to dominate, got {:?}", out.pixel(0, 0));
    }

    #[test]
    fn test_hue_wraps() {
        let img = sample();
        let a = adjust_color(&img, &ColorAdjustment::new(30.0, 100.0, 100.0));
        let b = adjust_color(&img, &ColorAdjustment::new(390.0, 100.0, 100.0));
        let c = adjust_color(&img, &ColorAdjustment::new(-330.0, 100.0, 100.0));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }
}
