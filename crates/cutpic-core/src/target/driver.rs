//! Drivers that run a [`QualitySearch`] against an encoder.
//!
//! Both drivers run attempts strictly one after another: attempt `n + 1` is
//! never started before the size of attempt `n` is known. The async driver
//! additionally awaits a caller-supplied pause between attempts so a browser
//! event loop can repaint.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;

use super::{EncodeAttempt, QualitySearch, SearchParams, SearchStep, TargetSpec};
use crate::encode::{EncodeError, OutputFormat, SurfaceEncoder};
use crate::error::ConvertError;
use crate::format_megabytes;
use crate::surface::RasterSurface;

/// Final artifact of one conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    /// Encoded bytes of the last attempt
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub size_bytes: u64,
    /// Quality of the last attempt (0.0 to 1.0)
    pub quality: f64,
    /// Quality reductions taken; equals `max_iterations` when the bound was hit
    pub iterations_used: u32,
    pub format: OutputFormat,
    pub target_bytes: u64,
}

impl ConversionResult {
    fn from_attempt(attempt: EncodeAttempt, search: &QualitySearch) -> Self {
        Self {
            size_bytes: attempt.size_bytes(),
            quality: attempt.quality,
            bytes: attempt.bytes,
            iterations_used: search.iteration(),
            format: search.spec().output_format,
            target_bytes: search.spec().target_bytes,
        }
    }

    /// Whether the final size is within the budget.
    pub fn met_target(&self) -> bool {
        self.size_bytes <= self.target_bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// One-line message for the user once the file is ready.
    pub fn summary(&self) -> String {
        let mut message = format!("Final Size: {}", format_megabytes(self.size_bytes));
        if !self.met_target() {
            message.push_str(&format!(
                " (target of {} not reached)",
                format_megabytes(self.target_bytes)
            ));
        }
        message
    }
}

/// Encode a surface, lowering quality until it fits the target.
///
/// # Errors
///
/// Returns `ConvertError::InvalidSearchParams` before any attempt if `params`
/// is unusable, and `ConvertError::EncodeFailure` as soon as an attempt
/// fails or comes back empty.
pub fn encode_to_target<E: SurfaceEncoder>(
    surface: &RasterSurface,
    spec: TargetSpec,
    params: SearchParams,
    mut encoder: E,
) -> Result<ConversionResult, ConvertError> {
    params.validate()?;
    let mut search = QualitySearch::new(spec, params);

    loop {
        let attempt = run_attempt(&mut encoder, surface, &search)?;
        if let SearchStep::Accept = step(&mut search, &attempt) {
            return Ok(accept(attempt, &search));
        }
    }
}

/// Async variant of [`encode_to_target`].
///
/// `pause` is awaited with `params.retry_delay()` before every retry. It
/// only yields to the caller's scheduler; its duration carries no meaning
/// for the search.
pub async fn encode_to_target_async<E, P, F>(
    surface: &RasterSurface,
    spec: TargetSpec,
    params: SearchParams,
    mut encoder: E,
    mut pause: P,
) -> Result<ConversionResult, ConvertError>
where
    E: SurfaceEncoder,
    P: FnMut(Duration) -> F,
    F: Future<Output = ()>,
{
    params.validate()?;
    let mut search = QualitySearch::new(spec, params);

    loop {
        let attempt = run_attempt(&mut encoder, surface, &search)?;
        match step(&mut search, &attempt) {
            SearchStep::Accept => return Ok(accept(attempt, &search)),
            SearchStep::Retry { .. } => pause(params.retry_delay()).await,
        }
    }
}

fn run_attempt<E: SurfaceEncoder>(
    encoder: &mut E,
    surface: &RasterSurface,
    search: &QualitySearch,
) -> Result<EncodeAttempt, ConvertError> {
    let quality = search.quality();
    let format = search.spec().output_format;

    let bytes = encoder
        .encode(surface, format, quality)
        .map_err(|source| ConvertError::EncodeFailure { quality, source })?;

    if bytes.is_empty() {
        return Err(ConvertError::EncodeFailure {
            quality,
            source: EncodeError::EncodingFailed {
                format: format.name(),
                reason: "encoder produced no output".to_string(),
            },
        });
    }

    Ok(EncodeAttempt::new(quality, bytes))
}

fn step(search: &mut QualitySearch, attempt: &EncodeAttempt) -> SearchStep {
    let next = search.observe(attempt.size_bytes());
    if let SearchStep::Retry { quality } = next {
        tracing::debug!(
            iteration = search.iteration(),
            size_bytes = attempt.size_bytes(),
            target_bytes = search.spec().target_bytes,
            previous_quality = attempt.quality,
            next_quality = quality,
            "attempt over budget, lowering quality"
        );
    }
    next
}

fn accept(attempt: EncodeAttempt, search: &QualitySearch) -> ConversionResult {
    let result = ConversionResult::from_attempt(attempt, search);

    if result.met_target() || !result.format.is_lossy() {
        tracing::info!(
            size_bytes = result.size_bytes,
            quality = result.quality,
            iterations = result.iterations_used,
            format = result.mime_type(),
            "conversion accepted"
        );
    } else {
        tracing::warn!(
            size_bytes = result.size_bytes,
            target_bytes = result.target_bytes,
            iterations = result.iterations_used,
            "iteration limit reached above target size; keeping last attempt"
        );
    }
    result
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::target::testing::ScriptedEncoder;
    use proptest::prelude::*;

    fn surface() -> RasterSurface {
        RasterSurface {
            width: 2,
            height: 2,
            pixels: vec![0u8; 16],
        }
    }

    proptest! {
        /// Property: attempted qualities start at 0.92 and drop by exactly
        /// 0.05 per attempt, clamped at 0.
        #[test]
        fn prop_quality_steps_down_exactly(
            target in 1u64..=5000,
            base in 1usize..=6000,
        ) {
            let mut encoder = ScriptedEncoder::new(move |q| base + (q * 4000.0) as usize);
            encode_to_target(
                &surface(),
                TargetSpec::new(target, OutputFormat::Jpeg),
                SearchParams::default(),
                &mut encoder,
            ).unwrap();

            prop_assert!((encoder.qualities[0] - 0.92).abs() < 1e-9);
            for (i, pair) in encoder.qualities.windows(2).enumerate() {
                prop_assert!(pair[1] <= pair[0]);
                let expected = (0.92 - 0.05 * (i + 1) as f64).max(0.0);
                prop_assert!((pair[1] - expected).abs() < 1e-9);
            }
        }

        /// Property: iterations never exceed the bound and the loop never
        /// fails because the target is unreachable.
        #[test]
        fn prop_iteration_bound(target in 0u64..=10_000, size in 1usize..=20_000) {
            let mut encoder = ScriptedEncoder::constant(size);
            let result = encode_to_target(
                &surface(),
                TargetSpec::new(target, OutputFormat::Jpeg),
                SearchParams::default(),
                &mut encoder,
            ).unwrap();

            prop_assert!(result.iterations_used <= 20);
            prop_assert_eq!(encoder.qualities.len() as u32, result.iterations_used + 1);
            prop_assert_eq!(result.size_bytes, size as u64);
        }

        /// Property: PNG output yields exactly one attempt for any target.
        #[test]
        fn prop_png_single_attempt(target in 0u64..=u64::MAX, size in 1usize..=50_000) {
            let mut encoder = ScriptedEncoder::constant(size);
            let result = encode_to_target(
                &surface(),
                TargetSpec::new(target, OutputFormat::Png),
                SearchParams::default(),
                &mut encoder,
            ).unwrap();

            prop_assert_eq!(encoder.qualities.len(), 1);
            prop_assert_eq!(result.iterations_used, 0);
        }

        /// Property: the first attempt within budget ends the search.
        #[test]
        fn prop_terminates_on_success(fit_at in 0u32..=20) {
            let threshold = SearchParams::default().quality_at(fit_at) + 1e-9;
            let mut encoder = ScriptedEncoder::new(move |q| if q <= threshold { 10 } else { 1000 });
            let result = encode_to_target(
                &surface(),
                TargetSpec::new(100, OutputFormat::Jpeg),
                SearchParams::default(),
                &mut encoder,
            ).unwrap();

            // Once the floor is hit, later qualities repeat; the first fit wins
            let first_fit = (0..=fit_at)
                .find(|&i| SearchParams::default().quality_at(i) <= threshold)
                .unwrap();
            prop_assert_eq!(result.iterations_used, first_fit);
            prop_assert!(result.met_target());
        }
    }
}
