//! Encoder double for exercising the search without a real codec.

use crate::encode::{EncodeError, OutputFormat, SurfaceEncoder};
use crate::surface::RasterSurface;

type SizeFn = Box<dyn Fn(f64) -> usize>;

/// Returns `size(quality)` zero bytes and records every quality asked for.
pub(crate) struct ScriptedEncoder {
    size: SizeFn,
    fail_below: Option<f64>,
    pub qualities: Vec<f64>,
}

impl ScriptedEncoder {
    pub fn new(size: impl Fn(f64) -> usize + 'static) -> Self {
        Self {
            size: Box::new(size),
            fail_below: None,
            qualities: Vec::new(),
        }
    }

    pub fn constant(size: usize) -> Self {
        Self::new(move |_| size)
    }

    /// Fails any attempt with quality under `threshold`.
    pub fn failing_below(threshold: f64, size: usize) -> Self {
        Self {
            fail_below: Some(threshold),
            ..Self::constant(size)
        }
    }
}

impl SurfaceEncoder for ScriptedEncoder {
    fn encode(
        &mut self,
        _surface: &RasterSurface,
        _format: OutputFormat,
        quality: f64,
    ) -> Result<Vec<u8>, EncodeError> {
        self.qualities.push(quality);
        if self.fail_below.is_some_and(|t| quality < t) {
            return Err(EncodeError::EncodingFailed {
                format: "JPEG",
                reason: "scripted failure".to_string(),
            });
        }
        Ok(vec![0u8; (self.size)(quality)])
    }
}
