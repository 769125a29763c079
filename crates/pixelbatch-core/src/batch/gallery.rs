//! The collection of imported images the batch engine works on.

use thiserror::Error;

use super::item::{GalleryItem, ItemId};
use crate::decode::{decode_image, probe_format, DecodeError};
use crate::format::EncodedImage;

/// Errors from gallery bookkeeping.
#[derive(Debug, Error, PartialEq)]
pub enum GalleryError {
    /// No item has the given id.
    #[error("Unknown gallery item {0}")]
    UnknownItem(ItemId),

    /// The imported file couldn't be read.
    #[error("Cannot import {name}: {source}")]
    Import {
        name: String,
        #[source]
        source: DecodeError,
    },
}

/// Ordered gallery of imported images.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<GalleryItem>,
    next_id: u32,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import a file, returning the new item's id.
    ///
    /// The file is decoded once to validate it and read its dimensions; the
    /// original bytes are kept as the item's source.
    pub fn import(&mut self, name: &str, bytes: Vec<u8>) -> Result<ItemId, GalleryError> {
        let import_error = |source: DecodeError| GalleryError::Import {
            name: name.to_string(),
            source,
        };

        let format = probe_format(&bytes, Some(name)).ok_or_else(|| {
            import_error(DecodeError::UnsupportedFormat(format!(
                "unrecognized file type for {name}"
            )))
        })?;
        let raster = decode_image(&bytes, Some(format)).map_err(import_error)?;

        self.next_id += 1;
        let id = ItemId(self.next_id);
        tracing::debug!(%id, name, %format, width = raster.width, height = raster.height, "imported");

        self.items.push(GalleryItem::new(
            id,
            name,
            EncodedImage::new(format, bytes),
            raster.width,
            raster.height,
        ));
        Ok(id)
    }

    /// Remove an item, returning it.
    pub fn remove(&mut self, id: ItemId) -> Option<GalleryItem> {
        let pos = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn get(&self, id: ItemId) -> Option<&GalleryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut GalleryItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Items in import order.
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Discard an item's processing and restore its original state.
    pub fn reset(&mut self, id: ItemId) -> Result<(), GalleryError> {
        let item = self.get_mut(id).ok_or(GalleryError::UnknownItem(id))?;
        item.reset();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::ItemStatus;
    use crate::decode::build_tga;
    use crate::encode::encode_png;
    use crate::format::ImageFormat;
    use crate::raster::RasterBuffer;

    fn png(width: u32, height: u32) -> Vec<u8> {
        encode_png(&RasterBuffer::filled(width, height, [9, 8, 7, 255])).unwrap()
    }

    #[test]
    fn test_import_png() {
        let mut gallery = Gallery::new();
        let id = gallery.import("a.png", png(5, 3)).unwrap();
        let item = gallery.get(id).unwrap();
        assert_eq!(item.status, ItemStatus::Idle);
        assert_eq!((item.original_width, item.original_height), (5, 3));
        assert_eq!(item.current_format, ImageFormat::Png);
        assert_eq!(item.name, "a.png");
    }

    #[test]
    fn test_import_tga_by_extension() {
        let tga = build_tga(2, 2, 24, false, &[], &[[1, 2, 3, 255]; 4]);
        let mut gallery = Gallery::new();
        let id = gallery.import("sprite.TGA", tga).unwrap();
        assert_eq!(gallery.get(id).unwrap().current_format, ImageFormat::Tga);
    }

    #[test]
    fn test_magic_beats_wrong_extension() {
        let mut gallery = Gallery::new();
        let id = gallery.import("mislabeled.jpg", png(2, 2)).unwrap();
        assert_eq!(gallery.get(id).unwrap().current_format, ImageFormat::Png);
    }

    #[test]
    fn test_import_garbage_fails() {
        let mut gallery = Gallery::new();
        let err = gallery.import("notes.txt", b"hello".to_vec()).unwrap_err();
        assert!(matches!(err, GalleryError::Import { ref name, .. } if name == "notes.txt"));
        assert!(gallery.is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut gallery = Gallery::new();
        let a = gallery.import("a.png", png(1, 1)).unwrap();
        let b = gallery.import("b.png", png(1, 1)).unwrap();
        assert_ne!(a, b);
        assert_eq!(gallery.ids(), vec![a, b]);

        assert!(gallery.remove(a).is_some());
        assert!(gallery.remove(a).is_none());
        let c = gallery.import("c.png", png(1, 1)).unwrap();
        assert_ne!(c, a);
        assert_eq!(gallery.ids(), vec![b, c]);
    }

    #[test]
    fn test_reset_unknown_item() {
        let mut gallery = Gallery::new();
        assert_eq!(
            gallery.reset(ItemId(42)),
            Err(GalleryError::UnknownItem(ItemId(42)))
        );
    }
}
