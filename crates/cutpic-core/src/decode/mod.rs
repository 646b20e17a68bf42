//! Upload intake for CutPic.
//!
//! This module provides functionality for:
//! - Checking an upload's MIME type and size before any work is done
//! - Decoding JPEG and PNG uploads into RGBA pixels
//! - Applying EXIF orientation to JPEG uploads
//!
//! # Examples
//!
//! ```ignore
//! use cutpic_core::decode::decode_source;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let source = decode_source(&bytes, "image/jpeg").unwrap();
//! println!("Decoded {}x{} image", source.width, source.height);
//! ```

mod source;
mod types;

pub use source::{decode_source, validate_upload};
pub use types::{DecodeError, Orientation, SourceFormat, SourceImage, MAX_UPLOAD_BYTES};
