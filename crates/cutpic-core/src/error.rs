//! Top-level error type for a conversion.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::surface::SurfaceError;

/// Any failure that aborts a conversion.
///
/// None of these are retried. The only repeated work in a conversion is the
/// quality reduction of the size-targeting loop, which is not error recovery.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Upload rejected or undecodable.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Requested output dimensions are not usable.
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// Target size is zero, negative, or not a number.
    #[error("Invalid target size: {0} MB (must be a positive number)")]
    InvalidTargetSize(f64),

    /// Search parameters are out of range.
    #[error("Invalid search parameters: {0}")]
    InvalidSearchParams(String),

    /// The encoder produced no usable output.
    #[error("Encoding failed at quality {quality:.2}: {source}")]
    EncodeFailure { quality: f64, source: EncodeError },
}

impl ConvertError {
    /// True for errors caused by the request itself rather than by encoding.
    ///
    /// These are raised before any encode attempt runs.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ConvertError::Surface(SurfaceError::InvalidDimensions { .. })
                | ConvertError::InvalidTargetSize(_)
                | ConvertError::InvalidSearchParams(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_classification() {
        let err = ConvertError::from(SurfaceError::InvalidDimensions {
            width: 0,
            height: 10,
        });
        assert!(err.is_invalid_input());
        assert!(ConvertError::InvalidTargetSize(-1.0).is_invalid_input());

        let err = ConvertError::EncodeFailure {
            quality: 0.5,
            source: EncodeError::InvalidDimensions {
                width: 0,
                height: 0,
            },
        };
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_display_passes_through() {
        let err = ConvertError::from(DecodeError::UnsupportedFormat("image/gif".into()));
        assert_eq!(
            err.to_string(),
            "Unsupported file format (image/gif). Please upload JPG/JPEG or PNG."
        );

        let err = ConvertError::EncodeFailure {
            quality: 0.87,
            source: EncodeError::EncodingFailed {
                format: "JPEG",
                reason: "no output".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Encoding failed at quality 0.87: JPEG encoding failed: no output"
        );
    }
}
