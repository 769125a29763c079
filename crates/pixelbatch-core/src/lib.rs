//! Pixelbatch Core - raster transformation and codec engine
//!
//! This crate provides the image processing functionality behind Pixelbatch:
//! TGA and generic decoding, BMP/ICO/SVG and generic raster encoding, pixel
//! and geometric operations, collage assembly, the batch engine over a
//! gallery of images, and the linear edit history used by the single-image
//! editor.
//!
//! All pixel data flows through [`RasterBuffer`], an owned RGBA8 buffer.
//! Operations never mutate their input; each returns a new buffer.

pub mod adjustments;
pub mod batch;
pub mod collage;
pub mod config;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod format;
pub mod history;
pub mod operation;
pub mod raster;
pub mod transform;

pub use batch::{BatchEngine, BatchReport, Gallery, GalleryItem, ItemId, ItemStatus};
pub use collage::{compose, CollageLayout, CollageOptions};
pub use config::EngineConfig;
pub use editor::{Editor, EditorError};
pub use format::{EncodedImage, ImageFormat};
pub use history::EditHistory;
pub use operation::{Operation, ProcessError};
pub use raster::{RasterBuffer, RasterError};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustments::{
        cutout_color, grayscale, remove_black_background, ChromaKey, GrayscaleAlgorithm, WHITE,
    };
    use crate::decode::{build_tga, decode_image, decode_tga};
    use crate::encode::encode_bmp;
    use crate::transform::rotate;

    #[test]
    fn test_tga_to_bmp_round_trip_keeps_rgb() {
        let pixels = [[10, 20, 30, 255], [40, 50, 60, 255], [70, 80, 90, 255], [1, 2, 3, 255]];
        let tga = build_tga(2, 2, 24, false, &[], &pixels);
        let decoded = decode_tga(&tga).unwrap();

        let bmp = encode_bmp(&decoded).unwrap();
        let back = decode_image(&bmp, Some(ImageFormat::Bmp)).unwrap();
        for (a, b) in decoded.pixels.chunks_exact(4).zip(back.pixels.chunks_exact(4)) {
            assert_eq!(a[..3], b[..3]);
        }
    }

    #[test]
    fn test_reference_pixel_values() {
        let red = RasterBuffer::filled(1, 1, [255, 0, 0, 255]);
        let gray = grayscale(&red, GrayscaleAlgorithm::Weighted);
        assert_eq!(gray.pixel(0, 0), Some([76, 76, 76, 255]));
        let white = RasterBuffer::filled(1, 1, [255, 255, 255, 255]);
        let gray = grayscale(&white, GrayscaleAlgorithm::Weighted);
        assert_eq!(gray.pixel(0, 0), Some([255, 255, 255, 255]));

        let key = ChromaKey::new(WHITE, 0.0, 0.0);
        assert_eq!(cutout_color(&white, &key).pixel(0, 0).map(|p| p[3]), Some(0));

        let green = RasterBuffer::filled(1, 1, [0, 128, 0, 255]);
        assert_eq!(remove_black_background(&green).pixel(0, 0), Some([0, 255, 0, 128]));
    }

    #[test]
    fn test_rotate_45_square() {
        let img = RasterBuffer::filled(100, 100, [0, 0, 255, 255]);
        let out = rotate(&img, 45.0);
        let (w, h) = out.dimensions();
        assert!((140..=142).contains(&w) && (140..=142).contains(&h));
        assert_eq!(out.pixel(0, 0).map(|p| p[3]), Some(0));
        assert_eq!(out.pixel(w / 2, h / 2).map(|p| p[3]), Some(255));
    }

    #[test]
    fn test_bmp_2x2_is_70_bytes() {
        let bmp = encode_bmp(&RasterBuffer::filled(2, 2, [255, 0, 0, 255])).unwrap();
        assert_eq!(bmp.len(), 70);
        assert_eq!(&bmp[0..2], b"BM");
    }
}
