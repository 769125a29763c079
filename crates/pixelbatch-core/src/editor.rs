//! Single-image editing session.
//!
//! The editor keeps a working name, an [`EditHistory`] and the export format
//! preference. Every edit produces a new snapshot; [`Editor::undo`] steps
//! back through them.

use thiserror::Error;

use crate::batch::download_name;
use crate::config::EngineConfig;
use crate::decode::{decode_image, probe_format, DecodeError};
use crate::encode::{encode, EncodeError};
use crate::format::ImageFormat;
use crate::history::EditHistory;
use crate::operation::{Operation, ProcessError};
use crate::raster::RasterBuffer;
use crate::transform::{crop, rotate_90, CropRect, RotateDirection};

/// Errors surfaced to the caller of an editor action.
#[derive(Debug, Error, PartialEq)]
pub enum EditorError {
    /// No image has been opened yet.
    #[error("No image is open")]
    NoImage,

    #[error("Failed to open image: {0}")]
    Open(#[from] DecodeError),

    #[error("Failed to apply edit: {0}")]
    Process(#[from] ProcessError),

    #[error("Failed to export image: {0}")]
    Export(#[from] EncodeError),
}

/// Editing session for one image.
#[derive(Debug, Clone)]
pub struct Editor {
    name: String,
    history: EditHistory,
    format: ImageFormat,
    quality: f32,
    config: EngineConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Editor {
    pub fn new(config: EngineConfig) -> Self {
        let quality = config.quality();
        Self {
            name: String::new(),
            history: EditHistory::new(),
            format: ImageFormat::Png,
            quality,
            config,
        }
    }

    /// Open encoded file bytes, replacing any previous session.
    pub fn open(&mut self, name: &str, bytes: &[u8]) -> Result<(), EditorError> {
        let format = probe_format(bytes, Some(name)).ok_or_else(|| {
            DecodeError::UnsupportedFormat(format!("unrecognized file type for {name}"))
        })?;
        let image = decode_image(bytes, Some(format))?;
        self.open_raster(name, image);
        self.format = format.export_format();
        Ok(())
    }

    /// Start a session from an already decoded image (e.g. a collage).
    pub fn open_raster(&mut self, name: &str, image: RasterBuffer) {
        tracing::debug!(name, width = image.width, height = image.height, "editor opened");
        self.name = name.to_string();
        self.history.load(image);
        self.format = ImageFormat::Png;
        self.quality = self.config.quality();
    }

    /// Apply an operation to the current image and record the result.
    ///
    /// `Convert` only changes the export format and quality.
    pub fn apply(&mut self, operation: &Operation) -> Result<&RasterBuffer, EditorError> {
        if let Some((format, quality)) = operation.output_format() {
            if self.history.is_empty() {
                return Err(EditorError::NoImage);
            }
            self.format = format;
            self.quality = quality;
            return self.history.current().ok_or(EditorError::NoImage);
        }

        let current = self.history.current().ok_or(EditorError::NoImage)?;
        let next = operation.apply(current, &self.config)?;
        self.commit(next)
    }

    /// Crop to an explicit rectangle (clamped, minimum edge from config).
    pub fn crop(&mut self, rect: CropRect) -> Result<&RasterBuffer, EditorError> {
        let current = self.history.current().ok_or(EditorError::NoImage)?;
        let next = crop(current, rect, self.config.min_crop_size);
        self.commit(next)
    }

    /// Initial crop selection: the middle 80% of the current image.
    pub fn default_crop_rect(&self) -> Option<CropRect> {
        let current = self.history.current()?;
        let inset = |edge: u32| (edge as f64 * 0.1) as u32;
        let span = |edge: u32| (edge as f64 * 0.8) as u32;
        Some(CropRect::new(
            inset(current.width),
            inset(current.height),
            span(current.width),
            span(current.height),
        ))
    }

    pub fn rotate_90(&mut self, direction: RotateDirection) -> Result<&RasterBuffer, EditorError> {
        let current = self.history.current().ok_or(EditorError::NoImage)?;
        let next = rotate_90(current, direction);
        self.commit(next)
    }

    /// Step back one edit. Returns `false` at the first snapshot.
    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn current(&self) -> Option<&RasterBuffer> {
        self.history.current()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Export format chosen by the last `Convert`, or the source format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Encode the current image, returning the download file name and bytes.
    ///
    /// `None` arguments use the session's format and quality.
    pub fn export(
        &self,
        format: Option<ImageFormat>,
        quality: Option<f32>,
    ) -> Result<(String, Vec<u8>), EditorError> {
        let current = self.history.current().ok_or(EditorError::NoImage)?;
        let format = format.unwrap_or(self.format);
        let quality = quality.unwrap_or(self.quality);

        let bytes = encode(current, format, quality)?;
        Ok((download_name(&self.name, format), bytes))
    }

    fn commit(&mut self, image: RasterBuffer) -> Result<&RasterBuffer, EditorError> {
        self.history.commit(image);
        self.history.current().ok_or(EditorError::NoImage)
    }
}
