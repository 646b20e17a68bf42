//! Upload intake WASM bindings.
//!
//! # Functions
//!
//! - [`validate_upload`] - Check MIME type and size before reading the file
//! - [`decode_source`] - Decode a JPEG/PNG upload
//!
//! # Example
//!
//! ```typescript
//! import { validate_upload, decode_source } from '@cutpic/wasm';
//!
//! try {
//!   validate_upload(file.type, file.size);
//! } catch (message) {
//!   alert(message);
//!   return;
//! }
//! const image = decode_source(new Uint8Array(await file.arrayBuffer()), file.type);
//! widthInput.value = image.width;
//! heightInput.value = image.height;
//! ```

use crate::types::JsSourceImage;
use cutpic_core::decode;
use wasm_bindgen::prelude::*;

/// Maximum accepted upload size in bytes (4 MiB).
#[wasm_bindgen]
pub fn max_upload_bytes() -> usize {
    decode::MAX_UPLOAD_BYTES
}

/// Check an upload's MIME type and size.
///
/// # Errors
///
/// Throws a user-facing message if the type is not JPEG/PNG or the file is
/// larger than 4 MiB.
#[wasm_bindgen]
pub fn validate_upload(mime: &str, size: usize) -> Result<(), JsValue> {
    decode::validate_upload(mime, size)
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Validate and decode an uploaded JPEG or PNG.
///
/// JPEG uploads have their EXIF orientation applied.
///
/// # Errors
///
/// Throws if the upload is rejected by [`validate_upload`] or cannot be decoded.
#[wasm_bindgen]
pub fn decode_source(bytes: &[u8], mime: &str) -> Result<JsSourceImage, JsValue> {
    decode::decode_source(bytes, mime)
        .map(JsSourceImage::from_source)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests that work on all targets

    #[test]
    fn test_max_upload_bytes() {
        assert_eq!(max_upload_bytes(), 4 * 1024 * 1024);
    }

    #[test]
    fn test_core_decode_roundtrip_dimensions() {
        let pixels = vec![128u8; 20 * 10 * 3];
        let jpeg = cutpic_core::encode::encode_jpeg(&pixels, 20, 10, 90).unwrap();

        let source = decode::decode_source(&jpeg, "image/jpeg").unwrap();
        let js = JsSourceImage::from_source(source);
        assert_eq!(js.width(), 20);
        assert_eq!(js.height(), 10);
        assert_eq!(js.mime_type(), "image/jpeg");
    }
}
