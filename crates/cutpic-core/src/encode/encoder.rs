//! The encode primitive the size-targeting loop drives.

use super::{encode_jpeg, encode_png, quality_to_jpeg, EncodeError, OutputFormat};
use crate::surface::RasterSurface;

/// Encodes a surface at a given quality.
///
/// Implementations must return non-empty bytes or an error; the loop treats
/// an empty buffer as a failed encode.
pub trait SurfaceEncoder {
    fn encode(
        &mut self,
        surface: &RasterSurface,
        format: OutputFormat,
        quality: f64,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// Encoder backed by the `image` crate codecs.
///
/// JPEG has no alpha channel, so the surface is flattened to RGB once and
/// reused for every later attempt on the same surface. Create one encoder
/// per conversion; a different surface replaces the cached buffer.
#[derive(Debug, Clone, Default)]
pub struct CodecEncoder {
    flattened: Option<FlattenedRgb>,
}

#[derive(Debug, Clone)]
struct FlattenedRgb {
    /// Buffer address, length and dimensions of the surface it came from
    key: (usize, usize, u32, u32),
    rgb: Vec<u8>,
}

impl CodecEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn rgb_for(&mut self, surface: &RasterSurface) -> &[u8] {
        let key = (
            surface.pixels.as_ptr() as usize,
            surface.pixels.len(),
            surface.width,
            surface.height,
        );
        if self.flattened.as_ref().is_some_and(|f| f.key != key) {
            self.flattened = None;
        }
        &self
            .flattened
            .get_or_insert_with(|| FlattenedRgb {
                key,
                rgb: surface.to_rgb_flattened(),
            })
            .rgb
    }
}

impl SurfaceEncoder for CodecEncoder {
    fn encode(
        &mut self,
        surface: &RasterSurface,
        format: OutputFormat,
        quality: f64,
    ) -> Result<Vec<u8>, EncodeError> {
        match format {
            OutputFormat::Jpeg => {
                let (width, height) = (surface.width, surface.height);
                encode_jpeg(self.rgb_for(surface), width, height, quality_to_jpeg(quality))
            }
            OutputFormat::Png => encode_png(&surface.pixels, surface.width, surface.height),
        }
    }
}

impl<E: SurfaceEncoder + ?Sized> SurfaceEncoder for &mut E {
    fn encode(
        &mut self,
        surface: &RasterSurface,
        format: OutputFormat,
        quality: f64,
    ) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(surface, format, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(width: u32, height: u32) -> RasterSurface {
        RasterSurface {
            width,
            height,
            pixels: vec![180u8; (width * height * 4) as usize],
        }
    }

    #[test]
    fn test_codec_encoder_jpeg() {
        let bytes = CodecEncoder::new()
            .encode(&surface(32, 24), OutputFormat::Jpeg, 0.92)
            .unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_codec_encoder_png_ignores_quality() {
        let s = surface(32, 24);
        let mut encoder = CodecEncoder::new();
        let high = encoder.encode(&s, OutputFormat::Png, 0.92).unwrap();
        let low = encoder.encode(&s, OutputFormat::Png, 0.1).unwrap();
        assert_eq!(high, low);
        assert_eq!(&high[1..4], b"PNG");
    }

    #[test]
    fn test_codec_encoder_through_mut_ref() {
        let mut encoder = CodecEncoder::new();
        let by_ref = &mut encoder;
        assert!(by_ref.encode(&surface(4, 4), OutputFormat::Jpeg, 0.5).is_ok());
    }

    #[test]
    fn test_codec_encoder_flattens_once_per_surface() {
        let s = surface(16, 12);
        let mut encoder = CodecEncoder::new();

        encoder.encode(&s, OutputFormat::Jpeg, 0.92).unwrap();
        let first = encoder.flattened.as_ref().unwrap().rgb.as_ptr();
        encoder.encode(&s, OutputFormat::Jpeg, 0.87).unwrap();
        let second = encoder.flattened.as_ref().unwrap().rgb.as_ptr();

        assert_eq!(first, second);
        assert_eq!(encoder.flattened.as_ref().unwrap().rgb.len(), 16 * 12 * 3);
    }

    #[test]
    fn test_codec_encoder_refreshes_for_new_surface() {
        let mut encoder = CodecEncoder::new();
        encoder.encode(&surface(16, 12), OutputFormat::Jpeg, 0.92).unwrap();

        let other = surface(8, 4);
        let bytes = encoder.encode(&other, OutputFormat::Jpeg, 0.92).unwrap();
        assert_eq!(encoder.flattened.as_ref().unwrap().rgb.len(), 8 * 4 * 3);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 4));
    }

    #[test]
    fn test_codec_encoder_png_skips_flattening() {
        let mut encoder = CodecEncoder::new();
        encoder.encode(&surface(4, 4), OutputFormat::Png, 0.5).unwrap();
        assert!(encoder.flattened.is_none());
    }
}
