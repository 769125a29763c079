//! Export file naming and the `name -> bytes` batch export map.

use std::collections::BTreeMap;

use thiserror::Error;

use super::gallery::Gallery;
use super::item::{GalleryItem, ItemId};
use crate::config::EngineConfig;
use crate::decode::decode_image;
use crate::encode::encode;
use crate::format::ImageFormat;
use crate::operation::ProcessError;

/// An item that couldn't be written out.
#[derive(Debug, Error, PartialEq)]
#[error("Cannot export {name}: {source}")]
pub struct ExportError {
    pub name: String,
    #[source]
    pub source: ProcessError,
}

/// `name` without its last extension.
///
/// Only a dot followed by at least one character and no path separator
/// starts an extension, so `dir.v2/file` and `archive.` are unchanged.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() && !name[dot + 1..].contains('/') => &name[..dot],
        _ => name,
    }
}

/// `{stem}.{ext}` for a single-image download.
pub fn download_name(name: &str, format: ImageFormat) -> String {
    format!("{}.{}", strip_extension(name), format.extension())
}

/// `{stem}_edited.{ext}` for a batch export.
///
/// Formats that can't be written (TGA) export as PNG.
pub fn batch_export_name(name: &str, format: ImageFormat) -> String {
    format!(
        "{}_edited.{}",
        strip_extension(name),
        format.export_format().extension()
    )
}

/// Bytes to write for one item, in its export format.
///
/// Stored bytes are used as-is when they are already in the export format;
/// otherwise the working copy is decoded and re-encoded at the configured
/// default quality.
pub fn export_item(item: &GalleryItem, config: &EngineConfig) -> Result<Vec<u8>, ProcessError> {
    let latest = item.latest();
    let target = item.current_format.export_format();
    if latest.format == target {
        return Ok(latest.bytes.clone());
    }

    let working = item.working_copy();
    tracing::trace!(id = %item.id, from = %working.format, to = %target, "re-encoding for export");
    let raster = decode_image(&working.bytes, Some(working.format))?;
    Ok(encode(&raster, target, config.quality())?)
}

/// Build the archive contents for `ids`.
///
/// Unknown ids are ignored. Names that collide get a numeric suffix
/// (`a_edited.png`, `a_edited_2.png`, ...).
pub fn export_batch(
    gallery: &Gallery,
    ids: &[ItemId],
    config: &EngineConfig,
) -> Result<BTreeMap<String, Vec<u8>>, ExportError> {
    let mut files = BTreeMap::new();

    for item in ids.iter().filter_map(|&id| gallery.get(id)) {
        let bytes = export_item(item, config).map_err(|source| ExportError {
            name: item.name.clone(),
            source,
        })?;
        let name = unique_name(&files, batch_export_name(&item.name, item.current_format));
        files.insert(name, bytes);
    }

    tracing::debug!(files = files.len(), "batch export ready");
    Ok(files)
}

fn unique_name(files: &BTreeMap<String, Vec<u8>>, name: String) -> String {
    if !files.contains_key(&name) {
        return name;
    }
    let (stem, ext) = name.rsplit_once('.').unwrap_or((name.as_str(), ""));
    let mut n = 2;
    loop {
        let candidate = format!("{stem}_{n}.{ext}");
        if !files.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
