//! PNG, JPEG, WebP, AVIF and TIFF encoding via the `image` crate.
//!
//! Quality is a float in `[0, 1]`. It is honored by the JPEG and AVIF
//! encoders and ignored by the lossless ones (the `image` crate's WebP encoder
//! is lossless-only).

use std::io::Cursor;

use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::types::{quality_percent, validate};
use super::EncodeError;
use crate::format::ImageFormat;
use crate::raster::RasterBuffer;

/// AVIF encoder speed (1 = slowest/best, 10 = fastest).
const AVIF_SPEED: u8 = 8;

/// Encode to PNG, preserving alpha.
pub fn encode_png(image: &RasterBuffer) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;
    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::failed(ImageFormat::Png, e))?;
    Ok(buffer.into_inner())
}

/// Encode to JPEG.
///
/// JPEG has no alpha channel; pixels are composited over black first, which
/// matches what a browser canvas produces for the same export.
pub fn encode_jpeg(image: &RasterBuffer, quality: f32) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;
    let rgb = flatten_over_black(&image.pixels);

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality_percent(quality))
        .write_image(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::failed(ImageFormat::Jpeg, e))?;
    Ok(buffer.into_inner())
}

/// Encode to lossless WebP.
pub fn encode_webp(image: &RasterBuffer) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;
    let mut buffer = Cursor::new(Vec::new());
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::failed(ImageFormat::Webp, e))?;
    Ok(buffer.into_inner())
}

/// Encode to AVIF.
pub fn encode_avif(image: &RasterBuffer, quality: f32) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;
    let mut buffer = Cursor::new(Vec::new());
    AvifEncoder::new_with_speed_quality(&mut buffer, AVIF_SPEED, quality_percent(quality))
        .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::failed(ImageFormat::Avif, e))?;
    Ok(buffer.into_inner())
}

/// Encode to uncompressed RGBA TIFF.
pub fn encode_tiff(image: &RasterBuffer) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;
    let mut buffer = Cursor::new(Vec::new());
    TiffEncoder::new(&mut buffer)
        .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::failed(ImageFormat::Tiff, e))?;
    Ok(buffer.into_inner())
}

fn flatten_over_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let a = px[3] as u32;
        for &c in &px[..3] {
            rgb.push(((c as u32 * a + 127) / 255) as u8);
        }
    }
    rgb
}
