//! Sequential batch execution over gallery items.
//!
//! Each selected item goes through decode → apply → encode on its own. A
//! failure is recorded on the item that failed and the batch moves on; no
//! state is shared between items except the read-only configuration.

use std::collections::HashSet;

use serde::Serialize;

use super::gallery::Gallery;
use super::item::{ItemId, ProcessedOutput};
use crate::config::EngineConfig;
use crate::decode::decode_image;
use crate::encode::encode_image;
use crate::format::{EncodedImage, ImageFormat};
use crate::operation::{Operation, ProcessError};

/// Outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub succeeded: Vec<ItemId>,
    /// Items now in the error state; the message is on the item.
    pub failed: Vec<ItemId>,
    /// Unknown ids, duplicates, and items already being processed.
    pub skipped: Vec<ItemId>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Applies one operation to many gallery items.
#[derive(Debug, Clone, Default)]
pub struct BatchEngine {
    config: EngineConfig,
}

impl BatchEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run `operation` over `ids`, in order.
    pub fn run(&self, gallery: &mut Gallery, ids: &[ItemId], operation: &Operation) -> BatchReport {
        let mut report = BatchReport::default();
        let mut seen = HashSet::with_capacity(ids.len());

        tracing::debug!(operation = operation.name(), items = ids.len(), "batch started");

        for &id in ids {
            if !seen.insert(id) {
                report.skipped.push(id);
                continue;
            }
            let Some(item) = gallery.get_mut(id) else {
                tracing::warn!(%id, "batch target not in gallery");
                report.skipped.push(id);
                continue;
            };
            let Some(token) = item.begin_processing() else {
                tracing::warn!(%id, "item already processing, skipped");
                report.skipped.push(id);
                continue;
            };

            match self.process(item.working_copy(), operation) {
                Ok(output) => {
                    tracing::trace!(%id, width = output.width, height = output.height, "item done");
                    item.finish(token, Ok(output));
                    report.succeeded.push(id);
                }
                Err(err) => {
                    tracing::warn!(%id, name = %item.name, %err, "item failed");
                    item.finish(token, Err(err.to_string()));
                    report.failed.push(id);
                }
            }
        }

        tracing::debug!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            skipped = report.skipped.len(),
            "batch finished"
        );
        report
    }

    /// Decode, apply and re-encode a single image.
    ///
    /// Conversions encode to their target format and also keep a PNG working
    /// copy; every other operation stores PNG. Chained edits therefore never
    /// decode a lossy or encode-only format.
    pub fn process(
        &self,
        source: &EncodedImage,
        operation: &Operation,
    ) -> Result<ProcessedOutput, ProcessError> {
        let raster = decode_image(&source.bytes, Some(source.format))?;
        let output = operation.apply(&raster, &self.config)?;

        let converted_to = operation.output_format().map(|(format, _)| format);
        let (format, quality) = operation.output_format().unwrap_or((ImageFormat::Png, 1.0));
        let image = encode_image(&output, format, quality)?;
        let working = match format {
            ImageFormat::Png => None,
            _ => Some(encode_image(&output, ImageFormat::Png, 1.0)?),
        };

        Ok(ProcessedOutput {
            image,
            working,
            width: output.width,
            height: output.height,
            converted_to,
        })
    }
}
