//! One conversion from a decoded upload to downloadable bytes.
//!
//! A [`ConversionRequest`] carries everything a conversion needs. Nothing is
//! kept between calls, so two conversions never share a surface.

use std::future::Future;
use std::time::Duration;

use crate::decode::SourceImage;
use crate::encode::{CodecEncoder, OutputFormat};
use crate::error::ConvertError;
use crate::surface::{render, FilterType, OutputDimensions, RasterSurface};
use crate::target::{
    encode_to_target, encode_to_target_async, ConversionResult, SearchParams, TargetSpec,
    BYTES_PER_MB,
};

/// Prefix of every downloaded file name.
pub const FILENAME_PREFIX: &str = "cutpic-";

/// Raw user input for one conversion.
#[derive(Debug, Clone, Copy)]
pub struct ConversionRequest<'a> {
    pub source: &'a SourceImage,
    /// Requested width as entered (validated during conversion)
    pub width: i64,
    /// Requested height as entered (validated during conversion)
    pub height: i64,
    /// Target size in megabytes
    pub target_megabytes: f64,
    pub filter: FilterType,
}

impl<'a> ConversionRequest<'a> {
    pub fn new(source: &'a SourceImage, width: i64, height: i64, target_megabytes: f64) -> Self {
        Self {
            source,
            width,
            height,
            target_megabytes,
            filter: FilterType::default(),
        }
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Output format: PNG uploads stay PNG, JPEG uploads become JPEG.
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::for_source(self.source.format)
    }

    /// Validate the input and draw the surface.
    ///
    /// All validation happens here, before any encode attempt.
    fn prepare(&self) -> Result<(RasterSurface, TargetSpec), ConvertError> {
        let dims = OutputDimensions::new(self.width, self.height)?;
        let spec = TargetSpec::from_megabytes(self.target_megabytes, self.output_format())?;
        let surface = render(self.source, dims.width(), dims.height(), self.filter)?;

        tracing::debug!(
            source_width = self.source.width,
            source_height = self.source.height,
            width = surface.width,
            height = surface.height,
            target_bytes = spec.target_bytes,
            "rendered surface"
        );
        Ok((surface, spec))
    }
}

/// Run a conversion with the blocking driver.
pub fn convert(
    request: &ConversionRequest<'_>,
    params: SearchParams,
) -> Result<ConversionResult, ConvertError> {
    let (surface, spec) = request.prepare()?;
    encode_to_target(&surface, spec, params, CodecEncoder::new())
}

/// Run a conversion, awaiting `pause` between encode attempts.
pub async fn convert_async<P, F>(
    request: &ConversionRequest<'_>,
    params: SearchParams,
    pause: P,
) -> Result<ConversionResult, ConvertError>
where
    P: FnMut(Duration) -> F,
    F: Future<Output = ()>,
{
    let (surface, spec) = request.prepare()?;
    encode_to_target_async(&surface, spec, params, CodecEncoder::new(), pause).await
}

/// File name for a converted image.
///
/// Produces `cutpic-<basename>_<width>x<height>.<ext>`, where the basename
/// drops a trailing `.jpg`, `.jpeg` or `.png` (any case) and the extension
/// follows the encoded format.
pub fn download_filename(original_name: &str, width: u32, height: u32, format: OutputFormat) -> String {
    format!(
        "{FILENAME_PREFIX}{}_{width}x{height}.{}",
        strip_image_extension(original_name),
        format.extension()
    )
}

fn strip_image_extension(name: &str) -> &str {
    if let Some((stem, ext)) = name.rsplit_once('.') {
        if ["jpg", "jpeg", "png"]
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
        {
            return stem;
        }
    }
    name
}

/// Format a byte count as megabytes with two decimals, e.g. `"0.45MB"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / BYTES_PER_MB)
}
