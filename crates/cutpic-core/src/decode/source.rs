//! Upload validation and decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{DecodeError, Orientation, SourceFormat, SourceImage, MAX_UPLOAD_BYTES};

/// Check an upload against the accepted formats and size limit.
///
/// The format is checked first, so an oversized GIF reports
/// `UnsupportedFormat` rather than `OversizedInput`.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` for anything other than JPEG or PNG.
/// Returns `DecodeError::OversizedInput` if `byte_len` exceeds [`MAX_UPLOAD_BYTES`].
pub fn validate_upload(mime: &str, byte_len: usize) -> Result<SourceFormat, DecodeError> {
    let format = SourceFormat::from_mime(mime)?;
    if byte_len > MAX_UPLOAD_BYTES {
        return Err(DecodeError::OversizedInput {
            size: byte_len,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(format)
}

/// Validate and decode an uploaded JPEG or PNG.
///
/// JPEG uploads have their EXIF orientation applied so the pixels match what
/// the browser shows in its preview.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes
/// * `mime` - MIME type reported for the file
///
/// # Returns
///
/// A `SourceImage` with RGBA pixel data.
///
/// # Errors
///
/// Any error from [`validate_upload`], or `DecodeError::DecodeFailure` if the
/// bytes cannot be decoded.
pub fn decode_source(bytes: &[u8], mime: &str) -> Result<SourceImage, DecodeError> {
    let format = validate_upload(mime, bytes.len())?;

    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format.to_image_format());
    let reader = reader
        .with_guessed_format()
        .map_err(|e| DecodeError::DecodeFailure(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::DecodeFailure(e.to_string()))?;

    let img = match format {
        SourceFormat::Jpeg => apply_orientation(img, extract_orientation(bytes)),
        SourceFormat::Png => img,
    };

    let source = SourceImage::from_rgba_image(img.into_rgba8(), format);
    if source.is_empty() {
        return Err(DecodeError::DecodeFailure("image has no pixels".to_string()));
    }

    tracing::debug!(
        width = source.width,
        height = source.height,
        format = format.mime_type(),
        "decoded source image"
    );
    Ok(source)
}

/// Extract EXIF orientation from JPEG bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
