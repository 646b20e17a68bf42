//! PNG encoding.
//!
//! PNG is lossless, so there is no quality knob: a surface always encodes to
//! the same bytes.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::EncodeError;

/// Encode RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "PNG",
            reason: e.to_string(),
        })?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_basic() {
        let pixels = vec![64u8; 30 * 20 * 4];
        let png = encode_png(&pixels, 30, 20).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_deterministic() {
        let pixels: Vec<u8> = (0..16 * 16 * 4).map(|i| (i % 251) as u8).collect();
        assert_eq!(
            encode_png(&pixels, 16, 16).unwrap(),
            encode_png(&pixels, 16, 16).unwrap()
        );
    }

    #[test]
    fn test_encode_png_invalid_input() {
        assert!(matches!(
            encode_png(&[0u8; 10], 2, 2),
            Err(EncodeError::InvalidPixelData { expected: 16, actual: 10 })
        ));
        assert!(matches!(
            encode_png(&[], 0, 2),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }
}
