//! Format detection and decoding of arbitrary gallery sources.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::{decode_tga, DecodeError};
use crate::format::ImageFormat;
use crate::raster::RasterBuffer;

/// Guess the format of `bytes`, using the file name as a fallback.
///
/// Magic bytes win over the extension, except for TGA which has no magic
/// number and is only recognized by name.
pub fn probe_format(bytes: &[u8], file_name: Option<&str>) -> Option<ImageFormat> {
    let by_name = file_name.and_then(ImageFormat::from_file_name);
    if by_name == Some(ImageFormat::Tga) {
        return by_name;
    }
    if looks_like_svg(bytes) {
        return Some(ImageFormat::Svg);
    }
    image::guess_format(bytes)
        .ok()
        .and_then(ImageFormat::from_image_format)
        .or(by_name)
}

/// Decode any supported source into a RasterBuffer.
///
/// `hint` is the format the caller believes the bytes are in. TGA sources
/// must be hinted. SVG is only accepted when it is a raster wrapper produced
/// by [`crate::encode::encode_svg`] (or any SVG whose image is an embedded
/// base64 raster); vector content cannot be rasterized.
pub fn decode_image(bytes: &[u8], hint: Option<ImageFormat>) -> Result<RasterBuffer, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::DecodeFailure("empty input".to_string()));
    }

    match hint {
        Some(ImageFormat::Tga) => return decode_tga(bytes),
        Some(ImageFormat::Svg) => return decode_svg_wrapper(bytes),
        _ => {}
    }
    if looks_like_svg(bytes) {
        return decode_svg_wrapper(bytes);
    }

    let format = match image::guess_format(bytes) {
        Ok(format) => format,
        Err(_) => hint
            .and_then(ImageFormat::to_image_format)
            .ok_or_else(|| DecodeError::UnsupportedFormat("unrecognized image data".to_string()))?,
    };

    let decoded = image::load_from_memory_with_format(bytes, format)?;
    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    tracing::trace!(?format, width, height, "decoded raster");
    Ok(RasterBuffer::from_rgba_image(decoded.into_rgba8()))
}

/// Decode an SVG document whose content is a single embedded raster image.
pub fn decode_svg_wrapper(bytes: &[u8]) -> Result<RasterBuffer, DecodeError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| DecodeError::DecodeFailure("SVG is not valid UTF-8".to_string()))?;

    let payload = embedded_data_url(text).ok_or_else(|| {
        DecodeError::UnsupportedFormat("SVG without an embedded raster image".to_string())
    })?;
    let raster = STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| DecodeError::DecodeFailure(format!("embedded image: {e}")))?;

    decode_image(&raster, None)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    // The cut may split a multi-byte character
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        Err(e) => match std::str::from_utf8(&head[..e.valid_up_to()]) {
            Ok(text) => text,
            Err(_) => return false,
        },
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

/// The base64 payload of the first `data:image/...;base64,` URL in `svg`.
fn embedded_data_url(svg: &str) -> Option<&str> {
    let start = svg.find("data:image/")?;
    let rest = &svg[start..];
    let comma = rest.find(";base64,")? + ";base64,".len();
    let payload = &rest[comma..];
    let end = payload.find(['"', '\'']).unwrap_or(payload.len());
    Some(payload[..end].trim())
}
