//! Core types for source image intake.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest upload accepted before decoding (4 MiB).
pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Error types for upload validation and decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The MIME type is not JPEG or PNG.
    #[error("Unsupported file format ({0}). Please upload JPG/JPEG or PNG.")]
    UnsupportedFormat(String),

    /// The file is larger than the upload limit.
    #[error("File size {} exceeds {} limit.", megabytes(.size), megabytes(.limit))]
    OversizedInput { size: usize, limit: usize },

    /// The bytes could not be decoded into pixels.
    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),
}

fn megabytes(bytes: &usize) -> String {
    crate::format_megabytes(*bytes as u64)
}

/// Encoded format of an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Jpeg,
    Png,
}

impl SourceFormat {
    /// Parse a browser-reported MIME type.
    ///
    /// `image/jpg` is accepted alongside `image/jpeg` since some platforms
    /// report it for `.jpg` files.
    pub fn from_mime(mime: &str) -> Result<Self, DecodeError> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Ok(SourceFormat::Jpeg),
            "image/png" => Ok(SourceFormat::Png),
            _ => Err(DecodeError::UnsupportedFormat(mime.to_string())),
        }
    }

    /// Canonical MIME type string.
    pub fn mime_type(self) -> &'static str {
        match self {
            SourceFormat::Jpeg => "image/jpeg",
            SourceFormat::Png => "image/png",
        }
    }

    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            SourceFormat::Jpeg => image::ImageFormat::Jpeg,
            SourceFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded upload with RGBA pixel data.
///
/// Immutable once decoded. The caller owns it for the duration of one
/// conversion.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Width in pixels, after orientation correction.
    pub width: u32,
    /// Height in pixels, after orientation correction.
    pub height: u32,
    /// Format the upload was encoded in.
    pub format: SourceFormat,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl SourceImage {
    /// Create a new SourceImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, format: SourceFormat, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Create a SourceImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage, format: SourceFormat) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            format,
            pixels: img.into_raw(),
        }
    }

    /// Borrow the pixels as an image::RgbaImage view.
    pub(crate) fn as_rgba_view(&self) -> Option<image::ImageBuffer<image::Rgba<u8>, &[u8]>> {
        image::ImageBuffer::from_raw(self.width, self.height, self.pixels.as_slice())
    }

    /// Natural (decoded) dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
