//! SVG container for raster images.
//!
//! This is not vectorization: the output is a minimal SVG document whose only
//! element is an `<image>` referencing a base64 PNG data URL.

use super::raster::encode_png;
use super::EncodeError;
use crate::format::ImageFormat;
use crate::raster::RasterBuffer;

/// Wrap a PNG rendering of `image` in an SVG document sized to the image.
pub fn encode_svg(image: &RasterBuffer) -> Result<Vec<u8>, EncodeError> {
    let png = encode_png(image)?;
    let (width, height) = image.dimensions();
    let svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n  <image href=\"{href}\" width=\"{width}\" height=\"{height}\" />\n</svg>\n",
        href = ImageFormat::Png.data_url(&png),
    );
    Ok(svg.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_structure() {
        let img = RasterBuffer::filled(7, 3, [1, 2, 3, 255]);
        let svg = String::from_utf8(encode_svg(&img).unwrap()).unwrap();

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("width=\"7\" height=\"3\""));
        assert!(svg.contains("<image href=\"data:image/png;base64,"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
