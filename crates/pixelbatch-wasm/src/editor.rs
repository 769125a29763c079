//! Single-image editor WASM bindings.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const editor = new JsEditor();
//! editor.open(file.name, new Uint8Array(await file.arrayBuffer()));
//! editor.apply({ type: 'grayscale' });
//! editor.rotate_90(true);
//! editor.undo();
//! const file = editor.export('image/webp', undefined);
//! download(file.name, file.bytes());
//! ```

use crate::collage::parse_layout;
use crate::types::{format_from_mime, js_error, JsRasterBuffer};
use pixelbatch_core::editor::Editor;
use pixelbatch_core::transform::{CropRect, RotateDirection};
use pixelbatch_core::{compose, ImageFormat, Operation, RasterBuffer};
use wasm_bindgen::prelude::*;

/// A named file ready to download.
#[wasm_bindgen]
pub struct JsExportedFile {
    name: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsExportedFile {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// Encoded file contents (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

/// Editing session with undo.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsEditor {
    inner: Editor,
}

#[wasm_bindgen]
impl JsEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditor {
        JsEditor::default()
    }

    /// Open a file, discarding the previous session and its history.
    pub fn open(&mut self, name: &str, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.open(name, bytes).map_err(js_error)
    }

    /// Start a session from a collage of the given images.
    pub fn open_collage(
        &mut self,
        images: Vec<JsRasterBuffer>,
        layout: &str,
        cols: u32,
        rows: u32,
    ) -> Result<(), JsValue> {
        self.open_collage_inner(&images, layout, cols, rows)
            .map_err(js_error)
    }

    /// Apply an operation object and return the new current image.
    pub fn apply(&mut self, operation: JsValue) -> Result<JsRasterBuffer, JsValue> {
        let operation: Operation = serde_wasm_bindgen::from_value(operation)
            .map_err(|e| js_error(format!("Invalid operation: {e}")))?;
        self.apply_inner(&operation).map_err(js_error)
    }

    pub fn crop(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<JsRasterBuffer, JsValue> {
        self.inner
            .crop(CropRect::new(x, y, width, height))
            .map(|img| JsRasterBuffer::from_raster(img.clone()))
            .map_err(js_error)
    }

    pub fn rotate_90(&mut self, clockwise: bool) -> Result<JsRasterBuffer, JsValue> {
        let direction = if clockwise {
            RotateDirection::Right
        } else {
            RotateDirection::Left
        };
        self.inner
            .rotate_90(direction)
            .map(|img| JsRasterBuffer::from_raster(img.clone()))
            .map_err(js_error)
    }

    /// Initial crop selection as `[x, y, width, height]`.
    pub fn default_crop_rect(&self) -> Option<Vec<u32>> {
        self.inner
            .default_crop_rect()
            .map(|r| vec![r.x, r.y, r.width, r.height])
    }

    /// Step back one edit; `false` when nothing is left to undo.
    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.history().can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn history_length(&self) -> usize {
        self.inner.history().len()
    }

    /// The current image, or `undefined` before anything is opened.
    pub fn current(&self) -> Option<JsRasterBuffer> {
        self.inner
            .current()
            .map(|img| JsRasterBuffer::from_raster(img.clone()))
    }

    /// MIME type the next export will use by default.
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.inner.format().mime().to_string()
    }

    /// Encode the current image. Omitted arguments use the session's format
    /// and quality.
    pub fn export(&self, mime: Option<String>, quality: Option<f32>) -> Result<JsExportedFile, JsValue> {
        self.export_inner(mime.as_deref(), quality).map_err(js_error)
    }
}

impl JsEditor {
    fn apply_inner(&mut self, operation: &Operation) -> Result<JsRasterBuffer, String> {
        self.inner
            .apply(operation)
            .map(|img| JsRasterBuffer::from_raster(img.clone()))
            .map_err(|e| e.to_string())
    }

    fn open_collage_inner(
        &mut self,
        images: &[JsRasterBuffer],
        layout: &str,
        cols: u32,
        rows: u32,
    ) -> Result<(), String> {
        let layout = parse_layout(layout, cols, rows)?;
        let sources = images
            .iter()
            .map(JsRasterBuffer::to_raster)
            .collect::<Result<Vec<RasterBuffer>, String>>()?;
        let collage = compose(&sources, layout, &Default::default()).map_err(|e| e.to_string())?;
        self.inner.open_raster("collage", collage);
        Ok(())
    }

    fn export_inner(&self, mime: Option<&str>, quality: Option<f32>) -> Result<JsExportedFile, String> {
        let format: Option<ImageFormat> = mime.map(format_from_mime).transpose()?;
        let (name, bytes) = self.inner.export(format, quality).map_err(|e| e.to_string())?;
        Ok(JsExportedFile { name, bytes })
    }
}
