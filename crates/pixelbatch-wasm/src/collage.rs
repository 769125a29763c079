//! Collage WASM bindings.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const sheet = compose_collage([a, b, c], 'grid', 2, 2);
//! const strip = compose_collage([a, b, c], 'horizontal', 0, 0);
//! ```

use crate::types::{js_error, JsRasterBuffer};
use pixelbatch_core::{compose, CollageLayout, CollageOptions, RasterBuffer};
use wasm_bindgen::prelude::*;

/// Lay images out in 200x200 cells with a 10 px gap.
///
/// `layout` is `"horizontal"`, `"vertical"` or `"grid"`; `cols` and `rows`
/// are only read for grids and are raised to at least 1. Images that don't
/// fit the grid are left out.
#[wasm_bindgen]
pub fn compose_collage(
    images: Vec<JsRasterBuffer>,
    layout: &str,
    cols: u32,
    rows: u32,
) -> Result<JsRasterBuffer, JsValue> {
    let layout = parse_layout(layout, cols, rows).map_err(js_error)?;
    let sources = images
        .iter()
        .map(JsRasterBuffer::to_raster)
        .collect::<Result<Vec<RasterBuffer>, String>>()
        .map_err(js_error)?;
    compose(&sources, layout, &CollageOptions::default())
        .map(JsRasterBuffer::from_raster)
        .map_err(js_error)
}

pub(crate) fn parse_layout(layout: &str, cols: u32, rows: u32) -> Result<CollageLayout, String> {
    match layout.trim().to_ascii_lowercase().as_str() {
        "horizontal" => Ok(CollageLayout::Horizontal),
        "vertical" => Ok(CollageLayout::Vertical),
        "grid" => Ok(CollageLayout::Grid { cols, rows }),
        other => Err(format!("Unknown collage layout: {other}")),
    }
}
