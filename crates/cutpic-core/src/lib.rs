//! CutPic Core - resize and size-targeted re-encoding
//!
//! This crate turns an uploaded JPEG or PNG into a resized file whose size
//! approximates a user-chosen budget:
//!
//! - [`decode`] validates and decodes the upload
//! - [`surface`] draws it onto a raster at the requested dimensions
//! - [`encode`] holds the JPEG/PNG encoders
//! - [`target`] runs the quality search against a byte budget
//! - [`convert`] ties them together for one request

pub mod convert;
pub mod decode;
pub mod encode;
pub mod error;
pub mod surface;
pub mod target;

pub use convert::{convert, convert_async, download_filename, format_megabytes, ConversionRequest};
pub use decode::{decode_source, validate_upload, SourceFormat, SourceImage};
pub use encode::OutputFormat;
pub use error::ConvertError;
pub use surface::{FilterType, RasterSurface};
pub use target::{ConversionResult, SearchParams, TargetSpec};
