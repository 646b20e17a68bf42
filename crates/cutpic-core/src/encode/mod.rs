//! Image encoding for CutPic.
//!
//! This module provides functionality for:
//! - Encoding surfaces to JPEG with a `[0, 1]` quality parameter
//! - Encoding surfaces to PNG (lossless, quality ignored)
//! - The [`SurfaceEncoder`] seam the size-targeting loop drives
//!
//! # Examples
//!
//! ```ignore
//! use cutpic_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod encoder;
mod jpeg;
mod png;
mod types;

pub use encoder::{CodecEncoder, SurfaceEncoder};
pub use jpeg::{encode_jpeg, quality_to_jpeg};
pub use png::encode_png;
pub use types::{EncodeError, OutputFormat};
