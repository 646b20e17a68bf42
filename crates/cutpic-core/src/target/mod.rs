//! Size-targeted re-encoding.
//!
//! Given a [`RasterSurface`](crate::surface::RasterSurface) and a byte
//! budget, encode it repeatedly at decreasing quality until the output fits
//! or the reduction budget runs out. The result is always the most recent
//! attempt; there is no rollback to an earlier one.
//!
//! # Examples
//!
//! ```ignore
//! use cutpic_core::encode::{CodecEncoder, OutputFormat};
//! use cutpic_core::target::{encode_to_target, SearchParams, TargetSpec};
//!
//! let spec = TargetSpec::from_megabytes(0.5, OutputFormat::Jpeg)?;
//! let result = encode_to_target(&surface, spec, SearchParams::default(), CodecEncoder::new())?;
//! println!("{}", result.summary());
//! ```

mod driver;
mod params;
mod search;
#[cfg(test)]
pub(crate) mod testing;

pub use driver::{encode_to_target, encode_to_target_async, ConversionResult};
pub use params::{SearchParams, TargetSpec, BYTES_PER_MB};
pub use search::{EncodeAttempt, QualitySearch, SearchStep};
