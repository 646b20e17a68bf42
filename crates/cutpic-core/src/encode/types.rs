//! Core types for encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::SourceFormat;

/// Errors that can occur while encoding a surface.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying codec failed or produced no output
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed {
        format: &'static str,
        reason: String,
    },
}

/// Encoded format of a conversion result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy; the quality parameter is honored.
    #[default]
    Jpeg,
    /// Lossless; the quality parameter is ignored.
    Png,
}

impl OutputFormat {
    /// Output format for a given upload: PNG stays PNG, everything else is JPEG.
    pub fn for_source(source: SourceFormat) -> Self {
        match source {
            SourceFormat::Png => OutputFormat::Png,
            SourceFormat::Jpeg => OutputFormat::Jpeg,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    /// Whether lowering the quality parameter can shrink the output.
    pub fn is_lossy(self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
        }
    }
}
