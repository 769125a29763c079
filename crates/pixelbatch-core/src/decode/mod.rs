//! Image decoding for Pixelbatch.
//!
//! This module provides functionality for:
//! - Decoding uncompressed 24/32-bit TGA files (RLE and color-mapped files are
//!   rejected)
//! - Decoding PNG, JPEG, WebP, AVIF, TIFF, BMP and ICO through the `image` crate
//! - Unwrapping the raster embedded in the engine's own SVG export
//! - Sniffing the format of an imported file
//!
//! Every decoder produces a top-down RGBA [`RasterBuffer`](crate::RasterBuffer).
//!
//! # Examples
//!
//! ```ignore
//! use pixelbatch_core::decode::{decode_image, probe_format};
//!
//! let bytes = std::fs::read("sprite.tga").unwrap();
//! let format = probe_format(&bytes, Some("sprite.tga"));
//! let image = decode_image(&bytes, format).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod generic;
mod tga;
mod types;

pub use generic::{decode_image, decode_svg_wrapper, probe_format};
pub use tga::{decode_tga, TgaHeader};
pub use types::DecodeError;

#[cfg(test)]
pub(crate) use tga::build_tga;
