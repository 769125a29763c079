//! Gallery, batch execution and export.
//!
//! A [`Gallery`] holds imported images. [`BatchEngine::run`] applies one
//! [`Operation`](crate::Operation) to a selection of items, sequentially and
//! independently, recording success or failure on each item.
//! [`export_batch`] then produces the `name -> bytes` map handed to an
//! archiver.

mod engine;
mod export;
mod gallery;
mod item;

pub use engine::{BatchEngine, BatchReport};
pub use export::{
    batch_export_name, download_name, export_batch, export_item, strip_extension, ExportError,
};
pub use gallery::{Gallery, GalleryError};
pub use item::{GalleryItem, ItemId, ItemStatus, ItemSummary, ProcessedOutput, ProcessingToken};
