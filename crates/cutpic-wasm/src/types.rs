//! WASM-compatible wrapper types.
//!
//! This module provides JavaScript-friendly types that wrap the core CutPic
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use cutpic_core::decode::{SourceFormat, SourceImage};
use cutpic_core::{download_filename, ConversionResult, FilterType, OutputFormat};
use wasm_bindgen::prelude::*;

/// A decoded upload wrapper for JavaScript.
///
/// The pixel data stays in WASM memory. A conversion copies it, so the same
/// image can be converted repeatedly with different settings.
#[wasm_bindgen]
pub struct JsSourceImage {
    inner: SourceImage,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Wrap RGBA pixels obtained elsewhere (e.g. `ImageData.data`).
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `mime` - MIME type of the original upload
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, mime: &str, pixels: Vec<u8>) -> Result<JsSourceImage, JsValue> {
        let format = SourceFormat::from_mime(mime).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected || expected == 0 {
            return Err(JsValue::from_str(&format!(
                "Invalid pixel data: expected {expected} bytes (width * height * 4), got {}",
                pixels.len()
            )));
        }
        Ok(Self::from_source(SourceImage::new(width, height, format, pixels)))
    }

    /// Natural width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Natural height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.format.mime_type().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }
}

impl JsSourceImage {
    pub(crate) fn from_source(inner: SourceImage) -> Self {
        Self { inner }
    }

    pub(crate) fn source(&self) -> &SourceImage {
        &self.inner
    }
}

/// The outcome of a conversion, ready for download.
#[wasm_bindgen]
pub struct JsConversionResult {
    inner: ConversionResult,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl JsConversionResult {
    /// Encoded file bytes.
    ///
    /// Note: This creates a copy for JavaScript.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// Final size in bytes
    #[wasm_bindgen(getter)]
    pub fn size_bytes(&self) -> f64 {
        self.inner.size_bytes as f64
    }

    /// Quality of the final attempt (0.0 to 1.0)
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f64 {
        self.inner.quality
    }

    /// Number of quality reductions; 20 means the limit was hit
    #[wasm_bindgen(getter)]
    pub fn iterations_used(&self) -> u32 {
        self.inner.iterations_used
    }

    #[wasm_bindgen(getter)]
    pub fn met_target(&self) -> bool {
        self.inner.met_target()
    }

    /// MIME type for the download `Blob`
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// User-facing message, e.g. `"Final Size: 0.45MB"`.
    #[wasm_bindgen(getter)]
    pub fn summary(&self) -> String {
        self.inner.summary()
    }

    /// Download name derived from the uploaded file's name.
    pub fn filename(&self, original_name: &str) -> String {
        download_filename(original_name, self.width, self.height, self.format())
    }

    /// Metadata (everything except the bytes) as a plain JS object.
    pub fn metadata(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsConversionResult {
    pub(crate) fn new(inner: ConversionResult, width: u32, height: u32) -> Self {
        Self {
            inner,
            width,
            height,
        }
    }

    pub(crate) fn format(&self) -> OutputFormat {
        self.inner.format
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear, // Default
    }
}
