//! Gallery items and their processing lifecycle.

use serde::{Deserialize, Serialize};

use crate::format::{EncodedImage, ImageFormat};

/// Stable identifier of a gallery item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an item is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Idle,
    Processing,
    Done,
    Error,
}

/// Proof that an item was moved to `Processing`.
///
/// Only [`GalleryItem::begin_processing`] hands these out, and finishing the
/// item consumes it, so one item never has two operations in flight.
#[derive(Debug)]
#[must_use = "an item left in processing is skipped by later batches"]
pub struct ProcessingToken {
    id: ItemId,
}

impl ProcessingToken {
    pub fn id(&self) -> ItemId {
        self.id
    }
}

/// A successful operation result for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedOutput {
    pub image: EncodedImage,
    /// Lossless PNG copy kept next to a converted `image`, so later
    /// operations never decode the export format.
    pub working: Option<EncodedImage>,
    pub width: u32,
    pub height: u32,
    /// Set when the operation was a conversion.
    pub converted_to: Option<ImageFormat>,
}

/// One imported image and everything done to it so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub id: ItemId,
    /// File name as imported, e.g. `photo.tga`.
    pub name: String,
    pub source: EncodedImage,
    pub status: ItemStatus,
    /// Output of the last successful operation.
    pub processed: Option<EncodedImage>,
    /// PNG copy of `processed` when that is in a converted format.
    pub working: Option<EncodedImage>,
    /// Message from the last failed operation.
    pub error: Option<String>,
    pub original_width: u32,
    pub original_height: u32,
    pub current_width: u32,
    pub current_height: u32,
    /// Format the item exports as. Only conversions change it.
    pub current_format: ImageFormat,
}

impl GalleryItem {
    pub fn new(id: ItemId, name: impl Into<String>, source: EncodedImage, width: u32, height: u32) -> Self {
        let current_format = source.format;
        Self {
            id,
            name: name.into(),
            source,
            status: ItemStatus::Idle,
            processed: None,
            working: None,
            error: None,
            original_width: width,
            original_height: height,
            current_width: width,
            current_height: height,
            current_format,
        }
    }

    /// The most recent version: processed output if any, else the source.
    pub fn latest(&self) -> &EncodedImage {
        self.processed.as_ref().unwrap_or(&self.source)
    }

    /// The version operations and previews decode: the lossless working
    /// copy after a conversion, else [`latest`](Self::latest).
    pub fn working_copy(&self) -> &EncodedImage {
        self.working.as_ref().unwrap_or_else(|| self.latest())
    }

    pub fn is_processing(&self) -> bool {
        self.status == ItemStatus::Processing
    }

    /// Move to `Processing`. Returns `None` if an operation is already in
    /// flight for this item.
    pub fn begin_processing(&mut self) -> Option<ProcessingToken> {
        if self.is_processing() {
            return None;
        }
        self.status = ItemStatus::Processing;
        Some(ProcessingToken { id: self.id })
    }

    /// Record the outcome of the operation started with `token`.
    ///
    /// A failure keeps the previous output so the item can be retried.
    pub fn finish(&mut self, token: ProcessingToken, result: Result<ProcessedOutput, String>) {
        debug_assert_eq!(token.id, self.id);
        match result {
            Ok(output) => {
                self.status = ItemStatus::Done;
                self.error = None;
                self.current_width = output.width;
                self.current_height = output.height;
                if let Some(format) = output.converted_to {
                    self.current_format = format;
                }
                self.processed = Some(output.image);
                self.working = output.working;
            }
            Err(message) => {
                self.status = ItemStatus::Error;
                self.error = Some(message);
            }
        }
    }

    /// Drop all processing and go back to the imported source.
    pub fn reset(&mut self) {
        self.status = ItemStatus::Idle;
        self.processed = None;
        self.working = None;
        self.error = None;
        self.current_width = self.original_width;
        self.current_height = self.original_height;
        self.current_format = self.source.format;
    }

    /// Metadata view without the image bytes.
    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            id: self.id,
            name: self.name.clone(),
            status: self.status,
            error: self.error.clone(),
            original_width: self.original_width,
            original_height: self.original_height,
            current_width: self.current_width,
            current_height: self.current_height,
            current_format: self.current_format,
        }
    }
}

/// Serializable item metadata for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub id: ItemId,
    pub name: String,
    pub status: ItemStatus,
    pub error: Option<String>,
    pub original_width: u32,
    pub original_height: u32,
    pub current_width: u32,
    pub current_height: u32,
    pub current_format: ImageFormat,
}
