//! Geometric transforms: rotation, flip, crop and resize.
//!
//! Every function takes the source by reference and returns a new buffer.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise
//! - Crop coordinates are in source pixels
//! - Origin is top-left corner

mod crop;
mod flip;
mod resize;
mod rotation;
mod types;

pub use crop::{center_crop_rect, crop, crop_center, CropRect};
pub use flip::{flip, FlipDirection};
pub use resize::{fit_dimensions, resize, resize_to_fit};
pub use rotation::{compute_rotated_bounds, rotate, rotate_90, RotateDirection};
pub use types::{FilterType, TransformError};
