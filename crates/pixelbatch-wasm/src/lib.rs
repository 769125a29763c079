//! Pixelbatch WASM - WebAssembly bindings for Pixelbatch
//!
//! This crate exposes the pixelbatch-core engine to the browser UI.
//!
//! # Module Structure
//!
//! - `types` - `JsRasterBuffer`, the RGBA image handle shared by every binding
//! - `decode` - TGA and generic decoding, format probing
//! - `encode` - encoding by MIME type, data URLs
//! - `transform` - operation objects, rotation, flip, crop
//! - `collage` - collage composition
//! - `editor` - single-image editing session with undo
//! - `gallery` - gallery import, batch runs and batch export
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, apply_operation, encode_image } from '@pixelbatch/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes, file.name);
//! const gray = apply_operation(image, { type: 'grayscale' });
//! const png = encode_image(gray, 'image/png', 1.0);
//! ```

use wasm_bindgen::prelude::*;

mod collage;
mod decode;
mod editor;
mod encode;
mod gallery;
mod transform;
mod types;

// Re-export public types
pub use collage::compose_collage;
pub use decode::{decode_image, decode_tga, probe_format};
pub use editor::{JsEditor, JsExportedFile};
pub use encode::{encode_image, extension_for, to_data_url};
pub use gallery::JsGallery;
pub use transform::{
    apply_crop, apply_flip, apply_operation, apply_rotation, operation_dimensions, rotate_90,
};
pub use types::JsRasterBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// MIME types that can be exported, in menu order.
#[wasm_bindgen]
pub fn export_formats() -> Vec<String> {
    pixelbatch_core::ImageFormat::all()
        .filter(|format| format.is_encodable())
        .map(|format| format.mime().to_string())
        .collect()
}
