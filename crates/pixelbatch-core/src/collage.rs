//! Collage assembly.
//!
//! Images are laid out in equal cells separated by a fixed gap. Each image
//! is scaled to fit its cell (preserving aspect ratio) and centered; the
//! canvas background is transparent.

use serde::{Deserialize, Serialize};

use crate::raster::RasterBuffer;
use crate::transform::{fit_dimensions, resize, FilterType, TransformError};

/// How cells are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CollageLayout {
    /// One row, one cell per image.
    Horizontal,
    /// One column, one cell per image.
    Vertical,
    /// Fixed grid; images past `cols * rows` are dropped.
    Grid { cols: u32, rows: u32 },
}

impl Default for CollageLayout {
    fn default() -> Self {
        CollageLayout::Grid { cols: 2, rows: 2 }
    }
}

impl CollageLayout {
    /// `(cols, rows)` for `count` images. Grid edges are at least 1.
    pub fn grid_size(self, count: usize) -> (u32, u32) {
        let count = u32::try_from(count).unwrap_or(u32::MAX).max(1);
        match self {
            CollageLayout::Horizontal => (count, 1),
            CollageLayout::Vertical => (1, count),
            CollageLayout::Grid { cols, rows } => (cols.max(1), rows.max(1)),
        }
    }
}

/// Cell geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollageOptions {
    pub cell_width: u32,
    pub cell_height: u32,
    /// Space between neighboring cells.
    pub gap: u32,
    /// Filter used when scaling images into cells.
    pub filter: FilterType,
}

impl Default for CollageOptions {
    fn default() -> Self {
        Self {
            cell_width: 200,
            cell_height: 200,
            gap: 10,
            filter: FilterType::Bilinear,
        }
    }
}

impl CollageOptions {
    /// Canvas size for a `cols x rows` grid, or `None` if it doesn't fit in
    /// `u32` edges or its RGBA buffer exceeds `isize::MAX` bytes.
    pub fn canvas_size(&self, cols: u32, rows: u32) -> Option<(u32, u32)> {
        let edge = |n: u32, cell: u32| {
            n.checked_mul(cell)?
                .checked_add(n.saturating_sub(1).checked_mul(self.gap)?)
        };
        let (width, height) = (edge(cols, self.cell_width)?, edge(rows, self.cell_height)?);
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)
            .filter(|&len| len <= isize::MAX as usize)?;
        Some((width, height))
    }
}

/// Compose images into a single collage.
///
/// # Errors
///
/// Returns `TransformError::InvalidDimensions` for an empty image list, a
/// zero-sized cell or a canvas too large to allocate, and propagates resize
/// failures for corrupt inputs.
pub fn compose(
    images: &[RasterBuffer],
    layout: CollageLayout,
    options: &CollageOptions,
) -> Result<RasterBuffer, TransformError> {
    if images.is_empty() || options.cell_width == 0 || options.cell_height == 0 {
        return Err(TransformError::InvalidDimensions {
            width: options.cell_width,
            height: options.cell_height,
        });
    }

    let (cols, rows) = layout.grid_size(images.len());
    let Some((canvas_w, canvas_h)) = options.canvas_size(cols, rows) else {
        return Err(TransformError::InvalidDimensions {
            width: options.cell_width,
            height: options.cell_height,
        });
    };
    let mut canvas = image::RgbaImage::new(canvas_w, canvas_h);

    let capacity = cols as usize * rows as usize;
    if images.len() > capacity {
        tracing::debug!(
            dropped = images.len() - capacity,
            "collage grid full, ignoring extra images"
        );
    }

    for (index, source) in images.iter().take(capacity).enumerate() {
        let col = index as u32 % cols;
        let row = index as u32 / cols;
        // Both terms stay inside the checked canvas edge
        let cell_x = col * options.cell_width + col * options.gap;
        let cell_y = row * options.cell_height + row * options.gap;

        let (w, h) = fit_dimensions(
            source.width,
            source.height,
            options.cell_width,
            options.cell_height,
        )?;
        let scaled = resize(source, w, h, options.filter)?;
        let tile = scaled.into_rgba_image().ok_or(TransformError::CorruptBuffer {
            width: w,
            height: h,
        })?;

        let x = cell_x + (options.cell_width - w) / 2;
        let y = cell_y + (options.cell_height - h) / 2;
        // Cells never overlap, so a straight copy is exact
        image::imageops::replace(&mut canvas, &tile, x as i64, y as i64);
    }

    Ok(RasterBuffer::from_rgba_image(canvas))
}
