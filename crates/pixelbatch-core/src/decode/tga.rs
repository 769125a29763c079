//! Truevision TGA decoding.
//!
//! Only uncompressed true-color images (image type 2) with 24 or 32 bits per
//! pixel are accepted. Run-length encoded images (type 10), color-mapped and
//! grayscale images are rejected rather than misread.
//!
//! # Header layout (18 bytes)
//!
//! ```text
//! 0      id length
//! 1      color map type
//! 2      image type (2 = uncompressed true-color)
//! 3..8   color map specification (skipped for type 2)
//! 8..12  x/y origin
//! 12..14 width  (u16 LE)
//! 14..16 height (u16 LE)
//! 16     pixel depth (24 or 32)
//! 17     image descriptor (bit 5 = top-down rows)
//! ```
//!
//! Pixel data follows the image id and any color map, in BGR(A) order. A
//! true-color file may still carry a color map; it is skipped, never used.

use super::DecodeError;
use crate::raster::RasterBuffer;

const HEADER_LEN: usize = 18;
const TYPE_TRUE_COLOR: u8 = 2;
const DESCRIPTOR_TOP_DOWN: u8 = 0x20;

/// Parsed TGA header fields the decoder needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map_length: u16,
    /// Bits per color map entry.
    pub color_map_entry_size: u8,
    pub width: u16,
    pub height: u16,
    pub pixel_depth: u8,
    pub descriptor: u8,
}

impl TgaHeader {
    /// Read the fixed 18-byte header.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < HEADER_LEN {
            return Err(DecodeError::DecodeFailure(format!(
                "TGA header truncated: {} of {} bytes",
                bytes.len(),
                HEADER_LEN
            )));
        }
        Ok(Self {
            id_length: bytes[0],
            color_map_type: bytes[1],
            image_type: bytes[2],
            color_map_length: u16::from_le_bytes([bytes[5], bytes[6]]),
            color_map_entry_size: bytes[7],
            width: u16::from_le_bytes([bytes[12], bytes[13]]),
            height: u16::from_le_bytes([bytes[14], bytes[15]]),
            pixel_depth: bytes[16],
            descriptor: bytes[17],
        })
    }

    pub fn is_top_down(&self) -> bool {
        self.descriptor & DESCRIPTOR_TOP_DOWN != 0
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.pixel_depth as usize / 8
    }

    /// Size of the color map block between the image id and pixel data.
    pub fn color_map_len(&self) -> usize {
        if self.color_map_type == 0 {
            return 0;
        }
        self.color_map_length as usize * (self.color_map_entry_size as usize).div_ceil(8)
    }

    pub fn data_offset(&self) -> usize {
        HEADER_LEN + self.id_length as usize + self.color_map_len()
    }

    fn validate(&self) -> Result<(), DecodeError> {
        if self.width == 0 || self.height == 0 {
            return Err(DecodeError::InvalidDimensions {
                width: self.width as u32,
                height: self.height as u32,
            });
        }
        if self.color_map_type > 1 {
            return Err(DecodeError::UnsupportedFormat(format!(
                "TGA color map type {}",
                self.color_map_type
            )));
        }
        if self.image_type != TYPE_TRUE_COLOR {
            return Err(DecodeError::UnsupportedFormat(format!(
                "TGA type {}; only uncompressed true-color (type 2) is supported",
                self.image_type
            )));
        }
        if self.pixel_depth != 24 && self.pixel_depth != 32 {
            return Err(DecodeError::UnsupportedFormat(format!(
                "TGA pixel depth {}; only 24 and 32 bits are supported",
                self.pixel_depth
            )));
        }
        Ok(())
    }
}

/// Decode an uncompressed 24/32-bit TGA into a top-down RGBA buffer.
///
/// 24-bit sources get an opaque alpha channel. Bottom-up sources (descriptor
/// bit 5 clear, the common case) are flipped during decode.
///
/// # Errors
///
/// - `InvalidDimensions` for a zero width or height
/// - `UnsupportedFormat` for any image type other than 2, a depth other
///   than 24/32, or an unknown color map type
/// - `DecodeFailure` when the header or pixel data is truncated
pub fn decode_tga(bytes: &[u8]) -> Result<RasterBuffer, DecodeError> {
    let header = TgaHeader::parse(bytes)?;
    header.validate()?;

    let width = header.width as usize;
    let height = header.height as usize;
    let bpp = header.bytes_per_pixel();
    let offset = header.data_offset();
    // Checked: 65535 x 65535 x 4 overflows a 32-bit usize
    let data_len = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(bpp))
        .ok_or_else(|| DecodeError::DecodeFailure("TGA dimensions too large".to_string()))?;

    let data = offset
        .checked_add(data_len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| {
            DecodeError::DecodeFailure(format!(
                "TGA pixel data truncated: expected {} bytes at offset {}, file has {}",
                data_len,
                offset,
                bytes.len()
            ))
        })?;

    let top_down = header.is_top_down();
    let mut pixels = vec![0u8; width * height * 4];

    for (src_row, row) in data.chunks_exact(width * bpp).enumerate() {
        let dst_row = if top_down { src_row } else { height - 1 - src_row };
        let dst = &mut pixels[dst_row * width * 4..(dst_row + 1) * width * 4];

        for (src, out) in row.chunks_exact(bpp).zip(dst.chunks_exact_mut(4)) {
            out[0] = src[2];
            out[1] = src[1];
            out[2] = src[0];
            out[3] = if bpp == 4 { src[3] } else { 255 };
        }
    }

    tracing::debug!(
        width,
        height,
        depth = header.pixel_depth,
        top_down,
        "decoded TGA"
    );

    Ok(RasterBuffer::new(header.width as u32, header.height as u32, pixels)?)
}

/// Build a TGA file from top-down RGBA rows. Test helper.
#[cfg(test)]
pub(crate) fn build_tga(
    width: u16,
    height: u16,
    depth: u8,
    top_down: bool,
    id: &[u8],
    rgba: &[[u8; 4]],
) -> Vec<u8> {
    let mut out = vec![0u8; HEADER_LEN];
    out[0] = id.len() as u8;
    out[2] = TYPE_TRUE_COLOR;
    out[12..14].copy_from_slice(&width.to_le_bytes());
    out[14..16].copy_from_slice(&height.to_le_bytes());
    out[16] = depth;
    out[17] = if top_down { DESCRIPTOR_TOP_DOWN } else { 0 };
    out.extend_from_slice(id);

    let w = width as usize;
    for row in 0..height as usize {
        let src_row = if top_down { row } else { height as usize - 1 - row };
        for px in &rgba[src_row * w..(src_row + 1) * w] {
            out.extend_from_slice(&[px[2], px[1], px[0]]);
            if depth == 32 {
                out.push(px[3]);
            }
        }
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = (u16, u16, Vec<[u8; 4]>)> {
        (1u16..=12, 1u16..=12).prop_flat_map(|(w, h)| {
            let n = w as usize * h as usize;
            (
                Just(w),
                Just(h),
                prop::collection::vec(any::<[u8; 4]>(), n..=n),
            )
        })
    }

    proptest! {
        /// Property: row order in the file never changes the decoded image.
        #[test]
        fn prop_orientation_independent(
            (w, h, rgba) in image_strategy(),
        ) {
            let bottom_up = decode_tga(&build_tga(w, h, 32, false, &[], &rgba)).unwrap();
            let top_down = decode_tga(&build_tga(w, h, 32, true, &[], &rgba)).unwrap();
            prop_assert_eq!(&bottom_up, &top_down);

            let expected: Vec<u8> = rgba.iter().flatten().copied().collect();
            prop_assert_eq!(bottom_up.pixels, expected);
        }

        /// Property: 24-bit decode keeps RGB and sets alpha to 255.
        #[test]
        fn prop_24bit_is_opaque(
            (w, h, rgba) in image_strategy(),
            top_down in any::<bool>(),
        ) {
            let img = decode_tga(&build_tga(w, h, 24, top_down, &[], &rgba)).unwrap();
            for (px, src) in img.pixels.chunks_exact(4).zip(&rgba) {
                prop_assert_eq!(&px[..3], &src[..3]);
                prop_assert_eq!(px[3], 255);
            }
        }

        /// Property: arbitrary bytes never panic.
        #[test]
        fn prop_garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
            let _ = decode_tga(&bytes);
        }
    }
}
