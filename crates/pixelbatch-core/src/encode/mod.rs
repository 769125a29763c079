//! Image encoding for Pixelbatch.
//!
//! This module provides functionality for:
//! - Bit-exact 32-bit BMP output (top-down, `BI_RGB`)
//! - ICO output wrapping a single PNG entry
//! - An SVG container embedding a base64 PNG
//! - PNG, JPEG, WebP, AVIF and TIFF through the `image` crate
//!
//! All encoders take an RGBA [`RasterBuffer`] and return the file bytes.
//! [`encode`] dispatches on [`ImageFormat`].
//!
//! # Examples
//!
//! ```ignore
//! use pixelbatch_core::{encode::encode, ImageFormat, RasterBuffer};
//!
//! let image = RasterBuffer::filled(2, 2, [255, 0, 0, 255]);
//! let bmp = encode(&image, ImageFormat::Bmp, 1.0).unwrap();
//! assert_eq!(bmp.len(), 70);
//! ```

mod bmp;
mod ico;
mod raster;
mod svg;
mod types;

pub use bmp::{encode_bmp, BMP_HEADER_LEN};
pub use ico::{encode_ico, ICO_DATA_OFFSET};
pub use raster::{encode_avif, encode_jpeg, encode_png, encode_tiff, encode_webp};
pub use svg::encode_svg;
pub use types::EncodeError;

use crate::format::{EncodedImage, ImageFormat};
use crate::raster::RasterBuffer;

/// Encode `image` into `format`.
///
/// `quality` (0.0 to 1.0) is only meaningful for lossy formats and is
/// ignored otherwise.
///
/// # Errors
///
/// `UnsupportedFormat` for import-only formats (TGA), plus any error from the
/// selected encoder.
pub fn encode(image: &RasterBuffer, format: ImageFormat, quality: f32) -> Result<Vec<u8>, EncodeError> {
    match format {
        ImageFormat::Png => encode_png(image),
        ImageFormat::Jpeg => encode_jpeg(image, quality),
        ImageFormat::Webp => encode_webp(image),
        ImageFormat::Avif => encode_avif(image, quality),
        ImageFormat::Tiff => encode_tiff(image),
        ImageFormat::Bmp => encode_bmp(image),
        ImageFormat::Ico => encode_ico(image),
        ImageFormat::Svg => encode_svg(image),
        ImageFormat::Tga => Err(EncodeError::UnsupportedFormat(format)),
    }
}

/// [`encode`], keeping the format alongside the bytes.
pub fn encode_image(
    image: &RasterBuffer,
    format: ImageFormat,
    quality: f32,
) -> Result<EncodedImage, EncodeError> {
    encode(image, format, quality).map(|bytes| EncodedImage::new(format, bytes))
}
