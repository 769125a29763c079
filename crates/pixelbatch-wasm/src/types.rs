//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Pixelbatch
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use pixelbatch_core::{ImageFormat, RasterBuffer};
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// The pixel layout matches a canvas `ImageData`: 4 bytes per pixel,
/// row-major, top-down, so `new ImageData(new Uint8ClampedArray(img.pixels()),
/// img.width, img.height)` works directly.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsRasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterBuffer {
    /// Create a new JsRasterBuffer from dimensions and RGBA pixel data.
    ///
    /// The length is checked when the buffer is first used by an operation.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterBuffer {
        JsRasterBuffer {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRasterBuffer {
    pub(crate) fn from_raster(img: RasterBuffer) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Validate and convert to a core RasterBuffer (clones the pixels).
    pub(crate) fn to_raster(&self) -> Result<RasterBuffer, String> {
        RasterBuffer::new(self.width, self.height, self.pixels.clone()).map_err(|e| e.to_string())
    }
}

/// Parse a MIME type such as `"image/webp"`.
pub(crate) fn format_from_mime(mime: &str) -> Result<ImageFormat, String> {
    ImageFormat::from_mime(mime).ok_or_else(|| format!("Unsupported format: {mime}"))
}

/// Convert an error message into a JS exception value.
pub(crate) fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// Write a warning to the browser console. No-op off the web.
pub(crate) fn console_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_buffer_creation() {
        let img = JsRasterBuffer::new(100, 50, vec![0u8; 100 * 50 * 4]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 20000);
    }

    #[test]
    fn test_to_raster_validates_length() {
        let ok = JsRasterBuffer::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(ok.to_raster().unwrap().pixel(1, 0), Some([5, 6, 7, 8]));

        let bad = JsRasterBuffer::new(2, 2, vec![0; 3]);
        assert!(bad.to_raster().is_err());
    }

    #[test]
    fn test_round_trip_through_core() {
        let core = RasterBuffer::filled(3, 2, [9, 8, 7, 6]);
        let js = JsRasterBuffer::from_raster(core.clone());
        assert_eq!(js.to_raster().unwrap(), core);
    }

    #[test]
    fn test_format_from_mime() {
        assert_eq!(format_from_mime("image/x-icon"), Ok(ImageFormat::Ico));
        assert!(format_from_mime("text/plain").is_err());
    }
}
