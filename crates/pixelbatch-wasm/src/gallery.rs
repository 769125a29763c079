//! Gallery and batch engine WASM bindings.
//!
//! Items are addressed by the numeric id returned from `import`. Batch runs
//! process the selected ids one at a time; a failing item is marked as such
//! and the rest of the batch continues.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const gallery = new JsGallery();
//! const ids = files.map((f, i) => gallery.import(f.name, buffers[i]));
//!
//! const report = gallery.run(ids, { type: 'resize', width: 800, height: 800, maintainAspect: true });
//! console.log(`${report.succeeded.length} done, ${report.failed.length} failed`);
//!
//! for (const [name, bytes] of gallery.export(ids)) {
//!   zip.file(name, bytes);
//! }
//! ```

use std::collections::BTreeMap;

use crate::collage::parse_layout;
use crate::types::{console_warn, js_error, JsRasterBuffer};
use pixelbatch_core::batch::{export_batch, ItemSummary};
use pixelbatch_core::decode::decode_image;
use pixelbatch_core::{compose, BatchEngine, BatchReport, EngineConfig, Gallery, ItemId, Operation};
use wasm_bindgen::prelude::*;

/// Imported images plus the engine that edits them.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsGallery {
    gallery: Gallery,
    engine: BatchEngine,
}

#[wasm_bindgen]
impl JsGallery {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsGallery {
        JsGallery::default()
    }

    /// Replace the engine settings. Missing fields keep their defaults.
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: EngineConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| js_error(format!("Invalid config: {e}")))?;
        self.engine = BatchEngine::new(config);
        Ok(())
    }

    /// Import a file and return its id.
    pub fn import(&mut self, name: &str, bytes: Vec<u8>) -> Result<u32, JsValue> {
        self.gallery
            .import(name, bytes)
            .map(|id| id.0)
            .map_err(js_error)
    }

    /// Remove an item. Returns `false` for unknown ids.
    pub fn remove(&mut self, id: u32) -> bool {
        self.gallery.remove(ItemId(id)).is_some()
    }

    /// Drop an item's edits and restore the imported original.
    pub fn reset(&mut self, id: u32) -> Result<(), JsValue> {
        self.gallery.reset(ItemId(id)).map_err(js_error)
    }

    pub fn clear(&mut self) {
        self.gallery.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.gallery.len()
    }

    /// Item ids in import order.
    pub fn ids(&self) -> Vec<u32> {
        self.gallery.ids().into_iter().map(|id| id.0).collect()
    }

    /// Metadata for every item (no pixel data).
    pub fn items(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.summaries()).map_err(|e| js_error(e.to_string()))
    }

    /// Run one operation over the given ids and return a
    /// `{ succeeded, failed, skipped }` report.
    pub fn run(&mut self, ids: Vec<u32>, operation: JsValue) -> Result<JsValue, JsValue> {
        let operation: Operation = serde_wasm_bindgen::from_value(operation)
            .map_err(|e| js_error(format!("Invalid operation: {e}")))?;
        let report = self.run_inner(&ids, &operation);
        serde_wasm_bindgen::to_value(&report).map_err(|e| js_error(e.to_string()))
    }

    /// Current bytes of an item (processed output, else the original).
    pub fn latest_bytes(&self, id: u32) -> Option<Vec<u8>> {
        self.gallery
            .get(ItemId(id))
            .map(|item| item.latest().bytes.clone())
    }

    /// Current version of an item as a `data:` URL for previews.
    pub fn latest_data_url(&self, id: u32) -> Option<String> {
        self.gallery
            .get(ItemId(id))
            .map(|item| item.latest().data_url())
    }

    /// Decode an item's current version, e.g. to open it in the editor.
    ///
    /// Converted items decode from their lossless working copy.
    pub fn decode(&self, id: u32) -> Result<JsRasterBuffer, JsValue> {
        self.decode_inner(ItemId(id)).map_err(js_error)
    }

    /// Compose the selected items into a collage.
    pub fn collage(&self, ids: Vec<u32>, layout: &str, cols: u32, rows: u32) -> Result<JsRasterBuffer, JsValue> {
        self.collage_inner(&ids, layout, cols, rows).map_err(js_error)
    }

    /// Export the selected items as a `Map` of file name to bytes.
    ///
    /// Names are `{stem}_edited.{ext}`, suffixed `_2`, `_3`, ... on collision.
    pub fn export(&self, ids: Vec<u32>) -> Result<js_sys::Map, JsValue> {
        let files = self.export_inner(&ids).map_err(js_error)?;
        let map = js_sys::Map::new();
        for (name, bytes) in files {
            map.set(
                &JsValue::from_str(&name),
                &js_sys::Uint8Array::from(bytes.as_slice()),
            );
        }
        Ok(map)
    }
}

impl JsGallery {
    fn summaries(&self) -> Vec<ItemSummary> {
        self.gallery.items().iter().map(|item| item.summary()).collect()
    }

    fn run_inner(&mut self, ids: &[u32], operation: &Operation) -> BatchReport {
        let ids: Vec<ItemId> = ids.iter().copied().map(ItemId).collect();
        let report = self.engine.run(&mut self.gallery, &ids, operation);
        if !report.failed.is_empty() {
            console_warn(&format!(
                "{}: {} of {} items failed",
                operation.name(),
                report.failed.len(),
                ids.len()
            ));
        }
        report
    }

    fn decode_inner(&self, id: ItemId) -> Result<JsRasterBuffer, String> {
        let item = self
            .gallery
            .get(id)
            .ok_or_else(|| format!("Unknown gallery item {id}"))?;
        let working = item.working_copy();
        decode_image(&working.bytes, Some(working.format))
            .map(JsRasterBuffer::from_raster)
            .map_err(|e| e.to_string())
    }

    fn collage_inner(&self, ids: &[u32], layout: &str, cols: u32, rows: u32) -> Result<JsRasterBuffer, String> {
        let layout = parse_layout(layout, cols, rows)?;
        let sources = ids
            .iter()
            .map(|&id| self.decode_inner(ItemId(id)).and_then(|img| img.to_raster()))
            .collect::<Result<Vec<_>, String>>()?;
        compose(&sources, layout, &self.engine.config().collage)
            .map(JsRasterBuffer::from_raster)
            .map_err(|e| e.to_string())
    }

    fn export_inner(&self, ids: &[u32]) -> Result<BTreeMap<String, Vec<u8>>, String> {
        let ids: Vec<ItemId> = ids.iter().copied().map(ItemId).collect();
        export_batch(&self.gallery, &ids, self.engine.config()).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelbatch_core::encode::encode_png;
    use pixelbatch_core::{ImageFormat, ItemStatus, RasterBuffer};

    fn png(width: u32, height: u32) -> Vec<u8> {
        encode_png(&RasterBuffer::filled(width, height, [40, 80, 120, 255])).unwrap()
    }

    #[test]
    fn test_import_and_remove() {
        let mut gallery = JsGallery::new();
        let a = gallery.import("a.png", png(4, 4)).unwrap();
        let b = gallery.import("b.png", png(2, 2)).unwrap();
        assert_eq!(gallery.ids(), vec![a, b]);
        assert_eq!(gallery.length(), 2);

        assert!(gallery.remove(a));
        assert!(!gallery.remove(a));
        assert_eq!(gallery.ids(), vec![b]);

        gallery.clear();
        assert_eq!(gallery.length(), 0);
    }

    #[test]
    fn test_run_and_summaries() {
        let mut gallery = JsGallery::new();
        let a = gallery.import("a.png", png(40, 10)).unwrap();
        let b = gallery.import("b.png", png(8, 8)).unwrap();

        let report = gallery.run_inner(&[a, b, 999], &Operation::Rotate { angle: 90.0 });
        assert_eq!(report.succeeded, vec![ItemId(a), ItemId(b)]);
        assert_eq!(report.skipped, vec![ItemId(999)]);

        let summaries = gallery.summaries();
        assert_eq!(summaries[0].status, ItemStatus::Done);
        assert_eq!((summaries[0].current_width, summaries[0].current_height), (10, 40));
        assert_eq!(summaries[0].current_format, ImageFormat::Png);

        let decoded = gallery.decode_inner(ItemId(a)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (10, 40));
    }

    #[test]
    fn test_reset_restores_original() {
        let mut gallery = JsGallery::new();
        let bytes = png(6, 3);
        let id = gallery.import("a.png", bytes.clone()).unwrap();
        gallery.run_inner(&[id], &Operation::RemoveBgBlack);
        assert_ne!(gallery.latest_bytes(id), Some(bytes.clone()));

        gallery.reset(id).unwrap();
        assert_eq!(gallery.latest_bytes(id), Some(bytes));
        assert!(gallery.latest_data_url(id).unwrap().starts_with("data:image/png;base64,"));
        assert_eq!(gallery.latest_bytes(42), None);
    }

    #[test]
    fn test_export_after_convert() {
        let mut gallery = JsGallery::new();
        let id = gallery.import("photo.png", png(4, 4)).unwrap();
        let convert = Operation::Convert {
            format: ImageFormat::Jpeg,
            quality: 0.8,
        };
        assert!(gallery.run_inner(&[id], &convert).is_success());

        let files = gallery.export_inner(&[id]).unwrap();
        assert_eq!(files.keys().collect::<Vec<_>>(), vec!["photo_edited.jpg"]);
        assert_eq!(&files["photo_edited.jpg"][0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_avif_item_still_decodes_and_composes() {
        let mut gallery = JsGallery::new();
        let a = gallery.import("a.png", png(20, 10)).unwrap();
        let b = gallery.import("b.png", png(10, 20)).unwrap();
        let convert = Operation::Convert {
            format: ImageFormat::Avif,
            quality: 0.8,
        };
        assert!(gallery.run_inner(&[a], &convert).is_success());
        assert_eq!(&gallery.latest_bytes(a).unwrap()[4..8], b"ftyp");

        let decoded = gallery.decode_inner(ItemId(a)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 10));
        let out = gallery.collage_inner(&[a, b], "horizontal", 0, 0).unwrap();
        assert_eq!((out.width(), out.height()), (410, 200));
    }

    #[test]
    fn test_collage_from_items() {
        let mut gallery = JsGallery::new();
        let a = gallery.import("a.png", png(20, 10)).unwrap();
        let b = gallery.import("b.png", png(10, 20)).unwrap();

        let out = gallery.collage_inner(&[a, b], "vertical", 0, 0).unwrap();
        assert_eq!((out.width(), out.height()), (200, 410));
        assert!(gallery.collage_inner(&[a, 77], "grid", 2, 2).is_err());
    }
}
