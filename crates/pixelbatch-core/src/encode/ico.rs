//! ICO encoding with a single PNG-compressed entry.
//!
//! ```text
//! 0   reserved       u16 LE = 0
//! 2   type           u16 LE = 1 (icon)
//! 4   image count    u16 LE = 1
//! 6   width          u8, 0 means 256 or more
//! 7   height         u8, 0 means 256 or more
//! 8   color count    u8 = 0
//! 9   reserved       u8 = 0
//! 10  planes         u16 LE = 1
//! 12  bits per pixel u16 LE = 32
//! 14  data size      u32 LE
//! 18  data offset    u32 LE = 22
//! 22  PNG bytes
//! ```

use super::raster::encode_png;
use super::EncodeError;
use crate::format::ImageFormat;
use crate::raster::RasterBuffer;

/// Offset of the embedded PNG: 6-byte header + one 16-byte directory entry.
pub const ICO_DATA_OFFSET: u32 = 22;

/// Encode an RGBA buffer as a single-image ICO wrapping a PNG.
pub fn encode_ico(image: &RasterBuffer) -> Result<Vec<u8>, EncodeError> {
    let png = encode_png(image)?;
    let data_size = u32::try_from(png.len())
        .map_err(|_| EncodeError::failed(ImageFormat::Ico, "embedded PNG exceeds 4 GiB"))?;

    let mut out = Vec::with_capacity(ICO_DATA_OFFSET as usize + png.len());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());

    out.push(dimension_byte(image.width));
    out.push(dimension_byte(image.height));
    out.push(0);
    out.push(0);
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&32u16.to_le_bytes());
    out.extend_from_slice(&data_size.to_le_bytes());
    out.extend_from_slice(&ICO_DATA_OFFSET.to_le_bytes());

    out.extend_from_slice(&png);
    Ok(out)
}

#[inline]
fn dimension_byte(value: u32) -> u8 {
    if value >= 256 {
        0
    } else {
        value as u8
    }
}
