//! Image encoding WASM bindings.
//!
//! Formats are named by MIME type, matching what the UI stores as an item's
//! current format.
//!
//! # Example
//!
//! ```typescript
//! import { encode_image, to_data_url } from '@pixelbatch/wasm';
//!
//! const bytes = encode_image(image, 'image/jpeg', 0.9);
//! const blob = new Blob([bytes], { type: 'image/jpeg' });
//! preview.src = to_data_url(image, 'image/png', 1.0);
//! ```

use crate::types::{format_from_mime, js_error, JsRasterBuffer};
use pixelbatch_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image to the format named by `mime`.
///
/// `quality` (0.0 to 1.0) applies to JPEG and AVIF only.
///
/// # Errors
///
/// Returns an error for unknown or import-only formats (TGA), or when the
/// pixel buffer doesn't match the image dimensions.
#[wasm_bindgen]
pub fn encode_image(image: &JsRasterBuffer, mime: &str, quality: f32) -> Result<Vec<u8>, JsValue> {
    encode_inner(image, mime, quality).map_err(js_error)
}

/// Encode an image and wrap it in a `data:` URL.
#[wasm_bindgen]
pub fn to_data_url(image: &JsRasterBuffer, mime: &str, quality: f32) -> Result<String, JsValue> {
    let format = format_from_mime(mime).map_err(js_error)?;
    let bytes = encode_inner(image, mime, quality).map_err(js_error)?;
    Ok(format.data_url(&bytes))
}

/// Canonical file extension for a MIME type (`"image/jpeg"` -> `"jpg"`).
#[wasm_bindgen]
pub fn extension_for(mime: &str) -> Option<String> {
    format_from_mime(mime)
        .ok()
        .map(|format| format.extension().to_string())
}

fn encode_inner(image: &JsRasterBuffer, mime: &str, quality: f32) -> Result<Vec<u8>, String> {
    let format = format_from_mime(mime)?;
    let raster = image.to_raster()?;
    encode::encode(&raster, format, quality).map_err(|e| e.to_string())
}
