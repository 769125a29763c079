//! WASM bindings for pixel and geometric operations.
//!
//! [`apply_operation`] takes the same tagged objects the batch engine runs,
//! so the single-image editor and gallery share one operation vocabulary.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const rotated = apply_operation(image, { type: 'rotate', angle: 15 });
//! const keyed = apply_operation(image, {
//!   type: 'cutout-color', color: '#00ff00', tolerance: 40, softness: 10,
//! });
//! const square = apply_crop(image, 10, 10, 200, 200);
//! ```

use crate::types::{js_error, JsRasterBuffer};
use pixelbatch_core::transform::{self, CropRect, FlipDirection, RotateDirection};
use pixelbatch_core::{EngineConfig, Operation};
use wasm_bindgen::prelude::*;

/// Apply an operation object (`{ type: 'grayscale', ... }`) to an image.
///
/// `convert` returns the pixels unchanged; use `encode_image` to change the
/// format.
#[wasm_bindgen]
pub fn apply_operation(image: &JsRasterBuffer, operation: JsValue) -> Result<JsRasterBuffer, JsValue> {
    let operation: Operation = serde_wasm_bindgen::from_value(operation)
        .map_err(|e| js_error(format!("Invalid operation: {e}")))?;
    apply_operation_inner(image, &operation).map_err(js_error)
}

/// Rotate clockwise by `angle_degrees`, expanding the canvas.
#[wasm_bindgen]
pub fn apply_rotation(image: &JsRasterBuffer, angle_degrees: f64) -> Result<JsRasterBuffer, JsValue> {
    let src = image.to_raster().map_err(js_error)?;
    Ok(JsRasterBuffer::from_raster(transform::rotate(&src, angle_degrees)))
}

/// Exact quarter turn; `clockwise = false` turns left.
#[wasm_bindgen]
pub fn rotate_90(image: &JsRasterBuffer, clockwise: bool) -> Result<JsRasterBuffer, JsValue> {
    let src = image.to_raster().map_err(js_error)?;
    let direction = if clockwise {
        RotateDirection::Right
    } else {
        RotateDirection::Left
    };
    Ok(JsRasterBuffer::from_raster(transform::rotate_90(&src, direction)))
}

/// Mirror horizontally, or vertically when `horizontal` is false.
#[wasm_bindgen]
pub fn apply_flip(image: &JsRasterBuffer, horizontal: bool) -> Result<JsRasterBuffer, JsValue> {
    let src = image.to_raster().map_err(js_error)?;
    let direction = if horizontal {
        FlipDirection::Horizontal
    } else {
        FlipDirection::Vertical
    };
    Ok(JsRasterBuffer::from_raster(transform::flip(&src, direction)))
}

/// Crop to a pixel rectangle.
///
/// The rectangle is moved inside the image and grown to the minimum crop
/// edge (20 px) when smaller.
#[wasm_bindgen]
pub fn apply_crop(
    image: &JsRasterBuffer,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<JsRasterBuffer, JsValue> {
    let src = image.to_raster().map_err(js_error)?;
    let min_size = EngineConfig::default().min_crop_size;
    let out = transform::crop(&src, CropRect::new(x, y, width, height), min_size);
    Ok(JsRasterBuffer::from_raster(out))
}

/// Output `[width, height]` of an operation without running it.
#[wasm_bindgen]
pub fn operation_dimensions(width: u32, height: u32, operation: JsValue) -> Result<Vec<u32>, JsValue> {
    let operation: Operation = serde_wasm_bindgen::from_value(operation)
        .map_err(|e| js_error(format!("Invalid operation: {e}")))?;
    let (w, h) = operation
        .target_dimensions(width, height, &EngineConfig::default())
        .map_err(js_error)?;
    Ok(vec![w, h])
}

fn apply_operation_inner(image: &JsRasterBuffer, operation: &Operation) -> Result<JsRasterBuffer, String> {
    let src = image.to_raster()?;
    operation
        .apply(&src, &EngineConfig::default())
        .map(JsRasterBuffer::from_raster)
        .map_err(|e| e.to_string())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_apply_operation_from_js_object() {
        let img = JsRasterBuffer::new(40, 10, vec![255; 40 * 10 * 4]);
        let op = serde_wasm_bindgen::to_value(&Operation::Rotate { angle: 90.0 }).unwrap();
        let out = apply_operation(&img, op).unwrap();
        assert_eq!((out.width(), out.height()), (10, 40));
    }

    #[wasm_bindgen_test]
    fn test_invalid_operation_is_an_error() {
        let img = JsRasterBuffer::new(1, 1, vec![0; 4]);
        assert!(apply_operation(&img, JsValue::from_str("spin")).is_err());
    }
}
