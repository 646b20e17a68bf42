//! Search parameters and the per-conversion target.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::encode::OutputFormat;
use crate::error::ConvertError;

/// Bytes per megabyte used when converting user input.
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Tuning for the size-targeting loop.
///
/// Deserializes with every field optional, so a partial JS object like
/// `{ maxIterations: 10 }` overrides only what it names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchParams {
    /// Quality of the first attempt (0.0 to 1.0)
    pub initial_quality: f64,
    /// Amount quality drops after each oversized attempt
    pub quality_step: f64,
    /// Quality never goes below this
    pub quality_floor: f64,
    /// Maximum number of quality reductions
    pub max_iterations: u32,
    /// Pause between attempts in the async driver, in milliseconds
    pub retry_delay_ms: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            initial_quality: 0.92,
            quality_step: 0.05,
            quality_floor: 0.0,
            max_iterations: 20,
            retry_delay_ms: 50,
        }
    }
}

impl SearchParams {
    /// Quality used for the attempt after `iteration` reductions.
    ///
    /// Computed from the iteration count rather than accumulated, so every
    /// step is exactly `quality_step` until the floor is reached.
    pub fn quality_at(&self, iteration: u32) -> f64 {
        (self.initial_quality - self.quality_step * f64::from(iteration)).max(self.quality_floor)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.retry_delay_ms))
    }

    /// Check that the parameters describe a usable search.
    pub fn validate(&self) -> Result<(), ConvertError> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);

        if !in_unit(self.initial_quality) {
            return Err(ConvertError::InvalidSearchParams(format!(
                "initial quality {} is outside 0..=1",
                self.initial_quality
            )));
        }
        if !in_unit(self.quality_floor) || self.quality_floor > self.initial_quality {
            return Err(ConvertError::InvalidSearchParams(format!(
                "quality floor {} must be within 0..={}",
                self.quality_floor, self.initial_quality
            )));
        }
        if !(self.quality_step.is_finite() && self.quality_step > 0.0) {
            return Err(ConvertError::InvalidSearchParams(format!(
                "quality step {} must be positive",
                self.quality_step
            )));
        }
        Ok(())
    }
}

/// Size budget and format for one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSpec {
    /// Maximum output size the loop tries not to exceed
    pub target_bytes: u64,
    pub output_format: OutputFormat,
}

impl TargetSpec {
    pub fn new(target_bytes: u64, output_format: OutputFormat) -> Self {
        Self {
            target_bytes,
            output_format,
        }
    }

    /// Build a target from a user-entered size in megabytes.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::InvalidTargetSize` if `megabytes` is not a
    /// positive finite number.
    pub fn from_megabytes(megabytes: f64, output_format: OutputFormat) -> Result<Self, ConvertError> {
        if !(megabytes.is_finite() && megabytes > 0.0) {
            return Err(ConvertError::InvalidTargetSize(megabytes));
        }
        // Sizes are whole bytes, so flooring keeps `size > target` exact.
        let target_bytes = (megabytes * BYTES_PER_MB).floor() as u64;
        Ok(Self::new(target_bytes, output_format))
    }
}
