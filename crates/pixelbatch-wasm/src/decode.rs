//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, probe_format } from '@pixelbatch/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! console.log(probe_format(bytes, file.name)); // e.g. "image/x-tga"
//! const image = decode_image(bytes, file.name);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::{js_error, JsRasterBuffer};
use pixelbatch_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uncompressed 24/32-bit TGA file.
///
/// # Errors
///
/// Returns an error for RLE or color-mapped files, unsupported bit depths,
/// zero dimensions, or truncated data.
#[wasm_bindgen]
pub fn decode_tga(bytes: &[u8]) -> Result<JsRasterBuffer, JsValue> {
    decode::decode_tga(bytes)
        .map(JsRasterBuffer::from_raster)
        .map_err(js_error)
}

/// Decode any supported image file.
///
/// `file_name` is used to recognize TGA files (which have no signature) and
/// as a fallback when the content can't be sniffed.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8], file_name: Option<String>) -> Result<JsRasterBuffer, JsValue> {
    decode_image_inner(bytes, file_name.as_deref()).map_err(js_error)
}

/// MIME type of the file, or `undefined` if unrecognized.
#[wasm_bindgen]
pub fn probe_format(bytes: &[u8], file_name: Option<String>) -> Option<String> {
    decode::probe_format(bytes, file_name.as_deref()).map(|format| format.mime().to_string())
}

fn decode_image_inner(bytes: &[u8], file_name: Option<&str>) -> Result<JsRasterBuffer, String> {
    let hint = decode::probe_format(bytes, file_name);
    decode::decode_image(bytes, hint)
        .map(JsRasterBuffer::from_raster)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelbatch_core::encode::{encode_bmp, encode_png};
    use pixelbatch_core::RasterBuffer;

    /// Minimal bottom-up 24-bit TGA with every pixel set to `bgr`.
    fn tga(width: u16, height: u16, bgr: [u8; 3]) -> Vec<u8> {
        let mut bytes = vec![0u8; 18];
        bytes[2] = 2;
        bytes[12..14].copy_from_slice(&width.to_le_bytes());
        bytes[14..16].copy_from_slice(&height.to_le_bytes());
        bytes[16] = 24;
        for _ in 0..(width as usize * height as usize) {
            bytes.extend_from_slice(&bgr);
        }
        bytes
    }

    #[test]
    fn test_decode_tga() {
        let img = decode_tga(&tga(3, 2, [30, 20, 10])).unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(&img.pixels()[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_image_by_name() {
        let img = decode_image_inner(&tga(2, 2, [0, 0, 255]), Some("a.tga")).unwrap();
        assert_eq!(&img.pixels()[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_image_sniffs_content() {
        let png = encode_png(&RasterBuffer::filled(4, 3, [1, 2, 3, 4])).unwrap();
        let img = decode_image_inner(&png, None).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
        assert_eq!(&img.pixels()[0..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_decode_image_rejects_garbage() {
        assert!(decode_image_inner(b"definitely not an image", Some("x.png")).is_err());
    }

    #[test]
    fn test_probe_format() {
        let bmp = encode_bmp(&RasterBuffer::filled(1, 1, [0, 0, 0, 255])).unwrap();
        assert_eq!(probe_format(&bmp, None).as_deref(), Some("image/bmp"));
        assert_eq!(probe_format(b"tga?", Some("x.tga".to_string())).as_deref(), Some("image/x-tga"));
        assert_eq!(probe_format(b"nope", None), None);
    }
}
