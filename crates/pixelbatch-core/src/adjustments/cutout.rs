//! Chroma-key cutout and black-background removal.

use thiserror::Error;

use crate::raster::RasterBuffer;

/// Fallback key color when a hex string can't be parsed.
pub const WHITE: [u8; 3] = [255, 255, 255];

/// A hex color string that isn't `#rrggbb`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid hex color: {0:?}")]
pub struct ColorParseError(pub String);

/// Parse `#rrggbb` (the leading `#` is optional).
pub fn parse_hex_color(input: &str) -> Result<[u8; 3], ColorParseError> {
    let hex = input.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ColorParseError(input.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorParseError(input.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Parse a hex color, falling back to white.
///
/// A bad color never fails the cutout; the failure is logged instead.
pub fn parse_hex_color_or_white(input: &str) -> [u8; 3] {
    parse_hex_color(input).unwrap_or_else(|err| {
        tracing::warn!(%err, "falling back to white key color");
        WHITE
    })
}

/// Chroma-key parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromaKey {
    /// Key color.
    pub color: [u8; 3],
    /// Distance at or below which pixels become fully transparent.
    pub tolerance: f32,
    /// Width of the feathered band beyond `tolerance`.
    pub softness: f32,
}

impl ChromaKey {
    pub fn new(color: [u8; 3], tolerance: f32, softness: f32) -> Self {
        Self {
            color,
            tolerance: tolerance.max(0.0),
            softness: softness.max(0.0),
        }
    }

    /// Alpha for a pixel; never larger than `alpha`.
    #[inline]
    pub fn key_alpha(&self, r: u8, g: u8, b: u8, alpha: u8) -> u8 {
        let dr = r as f32 - self.color[0] as f32;
        let dg = g as f32 - self.color[1] as f32;
        let db = b as f32 - self.color[2] as f32;
        let dist = (dr * dr + dg * dg + db * db).sqrt();

        if dist <= self.tolerance {
            0
        } else if dist <= self.tolerance + self.softness {
            // softness > 0 here, otherwise the first branch would have matched
            let feathered = (255.0 * (dist - self.tolerance) / self.softness).floor() as u8;
            feathered.min(alpha)
        } else {
            alpha
        }
    }
}

/// Make pixels near `key.color` transparent, with a feathered edge.
///
/// Alpha only ever decreases.
pub fn cutout_color(image: &RasterBuffer, key: &ChromaKey) -> RasterBuffer {
    image.map_pixels(|[r, g, b, a]| [r, g, b, key.key_alpha(r, g, b, a)])
}

/// Recover color and alpha from an image composited over black.
///
/// Each pixel's brightest channel becomes its alpha and the color is scaled
/// back up, so `(0, 64, 0)` becomes `(0, 255, 0)` at alpha 64. Pure black
/// becomes fully transparent.
pub fn remove_black_background(image: &RasterBuffer) -> RasterBuffer {
    image.map_pixels(|[r, g, b, a]| {
        let m = r.max(g).max(b);
        if m == 0 {
            return [r, g, b, 0];
        }
        let scale = |c: u8| (c as f32 / m as f32 * 255.0).round() as u8;
        [scale(r), scale(g), scale(b), m]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000"), Ok([255, 128, 0]));
        assert_eq!(parse_hex_color("00FF7f"), Ok([0, 255, 127]));
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("").is_err());
        assert!(parse_hex_color("#ééé").is_err());
    }

    #[test]
    fn test_bad_color_falls_back_to_white() {
        assert_eq!(parse_hex_color_or_white("not a color"), WHITE);
        assert_eq!(parse_hex_color_or_white("#102030"), [16, 32, 48]);
    }

    #[test]
    fn test_white_key_zero_tolerance() {
        let key = ChromaKey::new(WHITE, 0.0, 0.0);

        let white = RasterBuffer::filled(1, 1, [255, 255, 255, 255]);
        assert_eq!(cutout_color(&white, &key).pixel(0, 0), Some([255, 255, 255, 0]));

        let black = RasterBuffer::filled(1, 1, [0, 0, 0, 255]);
        assert_eq!(cutout_color(&black, &key).pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_feathered_band() {
        let key = ChromaKey::new([0, 0, 0], 10.0, 20.0);
        // distance 20 -> halfway through the band -> floor(127.5)
        let img = RasterBuffer::filled(1, 1, [20, 0, 0, 255]);
        assert_eq!(cutout_color(&img, &key).pixel(0, 0), Some([20, 0, 0, 127]));
    }

    #[test]
    fn test_feathering_never_raises_alpha() {
        let key = ChromaKey::new([0, 0, 0], 10.0, 20.0);
        let img = RasterBuffer::filled(1, 1, [20, 0, 0, 40]);
        assert_eq!(cutout_color(&img, &key).pixel(0, 0), Some([20, 0, 0, 40]));
    }

    #[test]
    fn test_negative_parameters_are_clamped() {
        let key = ChromaKey::new(WHITE, -5.0, -1.0);
        assert_eq!(key.tolerance, 0.0);
        assert_eq!(key.softness, 0.0);
    }

    #[test]
    fn test_remove_black_background() {
        let img = RasterBuffer::filled(1, 1, [0, 128, 0, 255]);
        assert_eq!(remove_black_background(&img).pixel(0, 0), Some([0, 255, 0, 128]));

        let img = RasterBuffer::filled(1, 1, [0, 64, 0, 255]);
        assert_eq!(remove_black_background(&img).pixel(0, 0), Some([0, 255, 0, 64]));

        let img = RasterBuffer::filled(1, 1, [0, 0, 0, 255]);
        assert_eq!(remove_black_background(&img).pixel(0, 0).map(|p| p[3]), Some(0));

        let img = RasterBuffer::filled(1, 1, [100, 50, 25, 255]);
        assert_eq!(remove_black_background(&img).pixel(0, 0), Some([255, 128, 64, 100]));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: cutout never increases alpha.
        #[test]
        fn prop_cutout_monotonic(
            px in any::<[u8; 4]>(),
            key in any::<[u8; 3]>(),
            tolerance in 0.0f32..450.0,
            softness in 0.0f32..450.0,
        ) {
            let key = ChromaKey::new(key, tolerance, softness);
            prop_assert!(key.key_alpha(px[0], px[1], px[2], px[3]) <= px[3]);
        }

        /// Property: compositing the unmultiplied pixel over black restores it.
        #[test]
        fn prop_unmultiply_composites_back(rgb in any::<[u8; 3]>()) {
            let img = RasterBuffer::filled(1, 1, [rgb[0], rgb[1], rgb[2], 255]);
            let [r, g, b, a] = remove_black_background(&img).pixel(0, 0).unwrap();
            for (out, src) in [r, g, b].into_iter().zip(rgb) {
                let composited = (out as f32 * a as f32 / 255.0).round() as i32;
                prop_assert!((composited - src as i32).abs() <= 1);
            }
        }
    }
}
