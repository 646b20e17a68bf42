//! Core types for the output raster.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for building a RasterSurface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Width or height is zero or negative.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be positive")]
    InvalidDimensions { width: i64, height: i64 },

    /// The source pixel buffer does not match its stated dimensions.
    #[error("Invalid source pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// Filter type for scaling the source onto the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Requested output size, validated from raw user input.
///
/// Form fields arrive as signed integers (a cleared or negative field is
/// possible), so validation happens here before a surface is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDimensions {
    width: u32,
    height: u32,
}

impl OutputDimensions {
    /// Validate a width/height pair.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError::InvalidDimensions` if either value is `<= 0`
    /// or does not fit in a `u32`.
    pub fn new(width: i64, height: i64) -> Result<Self, SurfaceError> {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok(Self {
                width: w,
                height: h,
            }),
            _ => Err(SurfaceError::InvalidDimensions { width, height }),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// An RGBA pixel buffer at exactly the requested output size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl RasterSurface {
    /// Create a RasterSurface from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// RGB pixels with alpha composited over black.
    ///
    /// This is what a canvas produces when exporting transparent content to
    /// a format without an alpha channel.
    pub fn to_rgb_flattened(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixel_count() * 3);
        for px in self.pixels.chunks_exact(4) {
            let alpha = u16::from(px[3]);
            for &channel in &px[..3] {
                rgb.push(((u16::from(channel) * alpha + 127) / 255) as u8);
            }
        }
        rgb
    }
}
