//! Image container formats and the single MIME/extension lookup table.
//!
//! Encoders, decoders, export naming and the batch engine all resolve formats
//! through [`ImageFormat`], so the MIME type and file extension of a format are
//! defined exactly once.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Container formats known to the engine.
///
/// Serialized as MIME types (`"image/png"`, `"image/x-icon"`, ...), which is
/// how the UI names formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageFormat {
    #[default]
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg", alias = "image/jpg")]
    Jpeg,
    #[serde(rename = "image/webp")]
    Webp,
    #[serde(rename = "image/avif")]
    Avif,
    #[serde(rename = "image/tiff")]
    Tiff,
    #[serde(rename = "image/bmp")]
    Bmp,
    #[serde(rename = "image/x-icon", alias = "image/vnd.microsoft.icon")]
    Ico,
    #[serde(rename = "image/svg+xml")]
    Svg,
    /// Import-only; never an encode target.
    #[serde(rename = "image/x-tga")]
    Tga,
}

/// `(format, mime, canonical extension, extra extensions)`.
const FORMAT_TABLE: &[(ImageFormat, &str, &str, &[&str])] = &[
    (ImageFormat::Png, "image/png", "png", &[]),
    (ImageFormat::Jpeg, "image/jpeg", "jpg", &["jpeg", "jpe"]),
    (ImageFormat::Webp, "image/webp", "webp", &[]),
    (ImageFormat::Avif, "image/avif", "avif", &[]),
    (ImageFormat::Tiff, "image/tiff", "tiff", &["tif"]),
    (ImageFormat::Bmp, "image/bmp", "bmp", &["dib"]),
    (ImageFormat::Ico, "image/x-icon", "ico", &[]),
    (ImageFormat::Svg, "image/svg+xml", "svg", &[]),
    (ImageFormat::Tga, "image/x-tga", "tga", &["tpic"]),
];

impl ImageFormat {
    /// Every known format, in table order.
    pub fn all() -> impl Iterator<Item = ImageFormat> {
        FORMAT_TABLE.iter().map(|(format, ..)| *format)
    }

    fn entry(self) -> &'static (ImageFormat, &'static str, &'static str, &'static [&'static str]) {
        FORMAT_TABLE
            .iter()
            .find(|(format, ..)| *format == self)
            .unwrap_or(&FORMAT_TABLE[0])
    }

    /// MIME type, e.g. `image/jpeg`.
    pub fn mime(self) -> &'static str {
        self.entry().1
    }

    /// Canonical file extension without the dot, e.g. `jpg`.
    pub fn extension(self) -> &'static str {
        self.entry().2
    }

    /// Parse a MIME type. Accepts the common aliases for JPEG and ICO.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        match mime.as_str() {
            "image/jpg" | "image/pjpeg" => return Some(ImageFormat::Jpeg),
            "image/vnd.microsoft.icon" => return Some(ImageFormat::Ico),
            "image/tga" | "image/x-targa" => return Some(ImageFormat::Tga),
            _ => {}
        }
        FORMAT_TABLE
            .iter()
            .find(|(_, m, ..)| *m == mime)
            .map(|(format, ..)| *format)
    }

    /// Parse a file extension (with or without a leading dot, any case).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        FORMAT_TABLE
            .iter()
            .find(|(_, _, canonical, extra)| *canonical == ext || extra.contains(&ext.as_str()))
            .map(|(format, ..)| *format)
    }

    /// Guess the format from a file name's extension.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        if ext.contains('/') {
            return None;
        }
        Self::from_extension(ext)
    }

    /// Whether the engine can produce this format.
    pub fn is_encodable(self) -> bool {
        !matches!(self, ImageFormat::Tga)
    }

    /// Whether the `quality` parameter affects encoding.
    pub fn is_lossy(self) -> bool {
        matches!(self, ImageFormat::Jpeg | ImageFormat::Avif)
    }

    /// Format used when exporting an item whose current format is `self`.
    ///
    /// Import-only formats fall back to PNG.
    pub fn export_format(self) -> ImageFormat {
        if self.is_encodable() {
            self
        } else {
            ImageFormat::Png
        }
    }

    /// Build a `data:` URL for encoded bytes of this format.
    pub fn data_url(self, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", self.mime(), STANDARD.encode(bytes))
    }

    /// Map to the `image` crate's format, where one exists.
    pub(crate) fn to_image_format(self) -> Option<image::ImageFormat> {
        match self {
            ImageFormat::Png => Some(image::ImageFormat::Png),
            ImageFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            ImageFormat::Webp => Some(image::ImageFormat::WebP),
            ImageFormat::Avif => Some(image::ImageFormat::Avif),
            ImageFormat::Tiff => Some(image::ImageFormat::Tiff),
            ImageFormat::Bmp => Some(image::ImageFormat::Bmp),
            ImageFormat::Ico => Some(image::ImageFormat::Ico),
            ImageFormat::Tga => Some(image::ImageFormat::Tga),
            ImageFormat::Svg => None,
        }
    }

    pub(crate) fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(ImageFormat::Png),
            image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            image::ImageFormat::WebP => Some(ImageFormat::Webp),
            image::ImageFormat::Avif => Some(ImageFormat::Avif),
            image::ImageFormat::Tiff => Some(ImageFormat::Tiff),
            image::ImageFormat::Bmp => Some(ImageFormat::Bmp),
            image::ImageFormat::Ico => Some(ImageFormat::Ico),
            image::ImageFormat::Tga => Some(ImageFormat::Tga),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime())
    }
}

/// An encoded image file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn new(format: ImageFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    pub fn data_url(&self) -> String {
        self.format.data_url(&self.bytes)
    }
}
