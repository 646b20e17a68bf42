//! CutPic WASM - WebAssembly bindings for CutPic
//!
//! This crate exposes cutpic-core to the browser page that loads an image,
//! resizes it and downloads a copy close to a chosen file size.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for images and results
//! - `decode` - Upload validation and decoding
//! - `convert` - Resize + size-targeted re-encode
//! - `logging` - `tracing` subscriber writing to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_source, convert } from '@cutpic/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = decode_source(new Uint8Array(await file.arrayBuffer()), file.type);
//! const result = await convert(image, 800, 600, 0.5, 1);
//! console.log(result.summary);
//! ```

use wasm_bindgen::prelude::*;

mod convert;
mod decode;
mod logging;
mod types;

// Re-export public types
pub use convert::{convert, convert_blocking, default_search_params, download_filename};
pub use decode::{decode_source, max_upload_bytes, validate_upload};
pub use types::{JsConversionResult, JsSourceImage};

/// Initialize the WASM module (called automatically on load)
///
/// Routes `tracing` output from the core to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    logging::install();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
