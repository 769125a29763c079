//! Image rotation.
//!
//! Angles are in degrees and follow screen coordinates: positive rotates
//! clockwise. Quarter turns are exact pixel remaps. Any other angle expands
//! the canvas to the rotated bounding box and fills the uncovered area with
//! transparent pixels.
//!
//! # Algorithm
//!
//! Arbitrary angles use inverse mapping: for each output pixel center we find
//! the source position and sample it with bilinear interpolation on
//! premultiplied alpha, treating everything outside the source as
//! transparent. For clockwise rotation by θ the inverse transform is:
//!
//! ```text
//! src_x =  (dst_x - dst_cx) * cos(θ) + (dst_y - dst_cy) * sin(θ) + src_cx
//! src_y = -(dst_x - dst_cx) * sin(θ) + (dst_y - dst_cy) * cos(θ) + src_cy
//! ```

use serde::{Deserialize, Serialize};

use crate::raster::RasterBuffer;

const ANGLE_EPSILON: f64 = 0.001;

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateDirection {
    /// Counter-clockwise (-90°).
    Left,
    /// Clockwise (+90°).
    Right,
}

impl RotateDirection {
    pub fn degrees(self) -> f64 {
        match self {
            RotateDirection::Left => -90.0,
            RotateDirection::Right => 90.0,
        }
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// `new_w = |w cos θ| + |h sin θ|`, `new_h = |w sin θ| + |h cos θ|`,
/// rounded to whole pixels. Quarter turns are exact.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate by a quarter turn in the given direction. Width and height swap.
pub fn rotate_90(image: &RasterBuffer, direction: RotateDirection) -> RasterBuffer {
    match direction {
        RotateDirection::Right => rotate_quarter(image, 1),
        RotateDirection::Left => rotate_quarter(image, 3),
    }
}

/// Rotate by an arbitrary angle, expanding the canvas so nothing is clipped.
///
/// The source is rotated about its center and drawn centered on the new
/// canvas. Multiples of 90° are exact remaps with no resampling.
pub fn rotate(image: &RasterBuffer, angle_degrees: f64) -> RasterBuffer {
    if let Some(turns) = quarter_turns(angle_degrees) {
        return rotate_quarter(image, turns);
    }

    let (src_w, src_h) = (image.width as f64, image.height as f64);
    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);

    let (sin, cos) = angle_degrees.to_radians().sin_cos();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * 4];

    for dst_y in 0..dst_h {
        let dy = dst_y as f64 + 0.5 - dst_cy;
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - dst_cx;

            let src_x = dx * cos + dy * sin + src_cx;
            let src_y = -dx * sin + dy * cos + src_cy;

            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * 4;
            // Sample in pixel-index space (pixel centers at integer coordinates)
            let pixel = sample_bilinear(image, src_x - 0.5, src_y - 0.5);
            output[dst_idx..dst_idx + 4].copy_from_slice(&pixel);
        }
    }

    RasterBuffer {
        width: dst_w,
        height: dst_h,
        pixels: output,
    }
}

/// Number of clockwise quarter turns if `angle_degrees` is a multiple of 90°.
fn quarter_turns(angle_degrees: f64) -> Option<u8> {
    let normalized = angle_degrees.rem_euclid(360.0);
    let turns = (normalized / 90.0).round();
    if (normalized - turns * 90.0).abs() < ANGLE_EPSILON {
        Some((turns as u8) % 4)
    } else {
        None
    }
}

/// Exact clockwise rotation by `turns` quarter turns.
fn rotate_quarter(image: &RasterBuffer, turns: u8) -> RasterBuffer {
    let (w, h) = (image.width as usize, image.height as usize);
    let turns = turns % 4;
    if turns == 0 {
        return image.clone();
    }

    let (out_w, out_h) = if turns == 2 { (w, h) } else { (h, w) };
    let mut output = vec![0u8; w * h * 4];

    for y in 0..h {
        for x in 0..w {
            let (nx, ny) = match turns {
                1 => (h - 1 - y, x),
                2 => (w - 1 - x, h - 1 - y),
                _ => (y, w - 1 - x),
            };
            let src = (y * w + x) * 4;
            let dst = (ny * out_w + nx) * 4;
            output[dst..dst + 4].copy_from_slice(&image.pixels[src..src + 4]);
        }
    }

    RasterBuffer {
        width: out_w as u32,
        height: out_h as u32,
        pixels: output,
    }
}

/// Premultiplied RGBA at integer coordinates, transparent outside the image.
#[inline]
fn premultiplied(image: &RasterBuffer, px: i64, py: i64) -> [f64; 4] {
    if px < 0 || py < 0 || px >= image.width as i64 || py >= image.height as i64 {
        return [0.0; 4];
    }
    let idx = (py as usize * image.width as usize + px as usize) * 4;
    let p = &image.pixels[idx..idx + 4];
    let a = p[3] as f64;
    let k = a / 255.0;
    [p[0] as f64 * k, p[1] as f64 * k, p[2] as f64 * k, a]
}

/// Sample a pixel using bilinear interpolation.
///
/// Interpolates the 4 nearest pixels in premultiplied space so transparent
/// neighbors don't darken edges.
fn sample_bilinear(image: &RasterBuffer, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = premultiplied(image, x0, y0);
    let p10 = premultiplied(image, x0 + 1, y0);
    let p01 = premultiplied(image, x0, y0 + 1);
    let p11 = premultiplied(image, x0 + 1, y0 + 1);

    let mut sum = [0.0f64; 4];
    for i in 0..4 {
        sum[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    let alpha = sum[3];
    if alpha < 0.5 {
        return [0, 0, 0, 0];
    }
    let unpremultiply = |c: f64| (c * 255.0 / alpha).round().clamp(0.0, 255.0) as u8;
    [
        unpremultiply(sum[0]),
        unpremultiply(sum[1]),
        unpremultiply(sum[2]),
        alpha.round().clamp(0.0, 255.0) as u8,
    ]
}
