//! Photometric pixel operations.
//!
//! Every function takes a [`RasterBuffer`](crate::RasterBuffer) by reference
//! and returns a new buffer of the same size:
//!
//! - [`grayscale`] - max / average / weighted reduction
//! - [`cutout_color`] - chroma-key transparency with a feathered band
//! - [`remove_black_background`] - alpha unmultiply from a black matte
//! - [`adjust_color`] - hue rotation, saturation and brightness

mod color;
mod cutout;
mod grayscale;

pub use color::{adjust_color, ColorAdjustment};
pub use cutout::{
    cutout_color, parse_hex_color, parse_hex_color_or_white, remove_black_background,
    ChromaKey, ColorParseError, WHITE,
};
pub use grayscale::{grayscale, GrayscaleAlgorithm};
