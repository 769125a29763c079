//! 32-bit BMP encoding.
//!
//! Layout is fixed and bit-exact:
//!
//! ```text
//! 0   "BM"
//! 2   file size            u32 LE
//! 6   reserved             u32 = 0
//! 10  pixel data offset    u32 LE = 54
//! 14  DIB header size      u32 LE = 40
//! 18  width                i32 LE
//! 22  height               i32 LE, negative => rows are top-down
//! 26  planes               u16 LE = 1
//! 28  bits per pixel       u16 LE = 32
//! 30  compression          u32 LE = 0 (BI_RGB)
//! 34  image size           u32 LE
//! 38  resolution, palette  zero
//! 54  BGRA pixel data, 4 bytes per pixel, no row padding
//! ```

use super::types::validate;
use super::EncodeError;
use crate::format::ImageFormat;
use crate::raster::RasterBuffer;

/// Combined size of the file header and the BITMAPINFOHEADER.
pub const BMP_HEADER_LEN: usize = 54;

const FILE_HEADER_LEN: usize = 14;
const DIB_HEADER_LEN: u32 = 40;

/// Encode an RGBA buffer as an uncompressed top-down 32-bit BMP.
pub fn encode_bmp(image: &RasterBuffer) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let too_large = || EncodeError::failed(ImageFormat::Bmp, "image exceeds BMP size limits");
    let image_size = u32::try_from(image.pixels.len()).map_err(|_| too_large())?;
    let file_size = image_size
        .checked_add(BMP_HEADER_LEN as u32)
        .ok_or_else(too_large)?;
    let width = i32::try_from(image.width).map_err(|_| too_large())?;
    let height = i32::try_from(image.height).map_err(|_| too_large())?;

    let mut out = Vec::with_capacity(file_size as usize);

    // File header
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(BMP_HEADER_LEN as u32).to_le_bytes());
    debug_assert_eq!(out.len(), FILE_HEADER_LEN);

    // DIB header
    out.extend_from_slice(&DIB_HEADER_LEN.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&(-height).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&32u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&image_size.to_le_bytes());
    out.resize(BMP_HEADER_LEN, 0);

    for px in image.pixels.chunks_exact(4) {
        out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{build_tga, decode_image, decode_tga};

    fn read_u32(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    fn read_i32(bytes: &[u8], at: usize) -> i32 {
        i32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    #[test]
    fn test_red_2x2_layout() {
        let img = RasterBuffer::filled(2, 2, [255, 0, 0, 255]);
        let bmp = encode_bmp(&img).unwrap();

        assert_eq!(bmp.len(), 70);
        assert_eq!(&bmp[0..2], &[0x42, 0x4D]);
        assert_eq!(read_u32(&bmp, 2), 70);
        assert_eq!(read_u32(&bmp, 6), 0);
        assert_eq!(read_u32(&bmp, 10), 54);
        assert_eq!(read_u32(&bmp, 14), 40);
        assert_eq!(read_i32(&bmp, 18), 2);
        assert_eq!(read_i32(&bmp, 22), -2);
        assert_eq!(u16::from_le_bytes([bmp[26], bmp[27]]), 1);
        assert_eq!(u16::from_le_bytes([bmp[28], bmp[29]]), 32);
        assert_eq!(read_u32(&bmp, 30), 0);
        assert_eq!(read_u32(&bmp, 34), 16);
        assert!(bmp[38..54].iter().all(|&b| b == 0));

        // BGRA
        assert_eq!(&bmp[54..58], &[0, 0, 255, 255]);
    }

    #[test]
    fn test_rows_are_top_down() {
        let mut img = RasterBuffer::filled(1, 2, [0, 0, 0, 255]);
        img.pixels[0] = 200; // top pixel red
        let bmp = encode_bmp(&img).unwrap();
        assert_eq!(&bmp[54..58], &[0, 0, 200, 255]);
        assert_eq!(&bmp[58..62], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_alpha_is_written() {
        let img = RasterBuffer::filled(1, 1, [1, 2, 3, 77]);
        let bmp = encode_bmp(&img).unwrap();
        assert_eq!(&bmp[54..58], &[3, 2, 1, 77]);
    }

    #[test]
    fn test_rejects_inconsistent_buffer() {
        let img = RasterBuffer {
            width: 2,
            height: 2,
            pixels: vec![0; 8],
        };
        assert!(matches!(
            encode_bmp(&img),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_tga_to_bmp_preserves_rgb() {
        let rgba = [[255, 0, 0, 255], [0, 255, 0, 10], [0, 0, 255, 255], [9, 8, 7, 0]];
        let tga = build_tga(2, 2, 32, false, &[], &rgba);
        let decoded = decode_tga(&tga).unwrap();

        let bmp = encode_bmp(&decoded).unwrap();
        let back = decode_image(&bmp, Some(ImageFormat::Bmp)).unwrap();

        assert_eq!(back.dimensions(), (2, 2));
        for (a, b) in back.pixels.chunks_exact(4).zip(decoded.pixels.chunks_exact(4)) {
            assert_eq!(&a[..3], &b[..3]);
        }
    }
}
