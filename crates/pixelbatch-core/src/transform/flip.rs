//! Horizontal and vertical mirroring.

use serde::{Deserialize, Serialize};

use crate::raster::RasterBuffer;

/// Mirror axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipDirection {
    /// Mirror left to right.
    Horizontal,
    /// Mirror top to bottom.
    Vertical,
}

/// Mirror an image. Dimensions are unchanged.
pub fn flip(image: &RasterBuffer, direction: FlipDirection) -> RasterBuffer {
    if image.is_empty() {
        return image.clone();
    }

    let stride = image.width as usize * 4;
    let mut output = Vec::with_capacity(image.pixels.len());

    match direction {
        FlipDirection::Horizontal => {
            for row in image.pixels.chunks_exact(stride) {
                for px in row.chunks_exact(4).rev() {
                    output.extend_from_slice(px);
                }
            }
        }
        FlipDirection::Vertical => {
            for row in image.pixels.chunks_exact(stride).rev() {
                output.extend_from_slice(row);
            }
        }
    }

    RasterBuffer {
        width: image.width,
        height: image.height,
        pixels: output,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: flipping twice on the same axis is the identity.
        #[test]
        fn prop_flip_involution(
            (width, height) in (1u32..16, 1u32..16),
            seed in any::<u8>(),
            vertical in any::<bool>(),
        ) {
            let pixels: Vec<u8> = (0..width * height * 4)
                .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
                .collect();
            let img = RasterBuffer::new(width, height, pixels).unwrap();
            let dir = if vertical { FlipDirection::Vertical } else { FlipDirection::Horizontal };
            prop_assert_eq!(flip(&flip(&img, dir), dir), img);
        }
    }
}
