//! Drawing a source image onto a RasterSurface.
//!
//! The whole source bounding box is mapped onto the whole surface. There is
//! no crop rectangle and no letterboxing: a target with a different aspect
//! ratio than the source stretches it.

use super::{FilterType, RasterSurface, SurfaceError};
use crate::decode::SourceImage;

/// Render a source image at exact output dimensions.
///
/// # Arguments
///
/// * `source` - The decoded source image
/// * `width` - Surface width in pixels
/// * `height` - Surface height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Returns
///
/// A new `RasterSurface` of `width x height` pixels.
///
/// # Errors
///
/// Returns `SurfaceError::InvalidDimensions` if either dimension is zero.
/// Returns `SurfaceError::InvalidPixelData` if the source buffer is inconsistent.
pub fn render(
    source: &SourceImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterSurface, SurfaceError> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::InvalidDimensions {
            width: width.into(),
            height: height.into(),
        });
    }

    let view = source
        .as_rgba_view()
        .ok_or(SurfaceError::InvalidPixelData {
            expected: source.width as usize * source.height as usize * 4,
            actual: source.pixels.len(),
        })?;

    // Fast path: if dimensions match, just copy
    if source.width == width && source.height == height {
        return Ok(RasterSurface {
            width,
            height,
            pixels: source.pixels.clone(),
        });
    }

    let scaled = image::imageops::resize(&view, width, height, filter.to_image_filter());
    Ok(RasterSurface::from_rgba_image(scaled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::SourceFormat;

    fn create_test_image(width: u32, height: u32) -> SourceImage {
        // Create a simple gradient image for testing
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
                pixels.push(255); // A
            }
        }
        SourceImage::new(width, height, SourceFormat::Jpeg, pixels)
    }

    #[test]
    fn test_render_downscale() {
        let img = create_test_image(400, 300);
        let surface = render(&img, 80, 60, FilterType::Bilinear).unwrap();

        assert_eq!(surface.width, 80);
        assert_eq!(surface.height, 60);
        assert_eq!(surface.pixels.len(), 80 * 60 * 4);
    }

    #[test]
    fn test_render_same_dimensions_copies() {
        let img = create_test_image(50, 50);
        let surface = render(&img, 50, 50, FilterType::Bilinear).unwrap();

        assert_eq!(surface.pixels, img.pixels);
    }

    #[test]
    fn test_render_upscale() {
        let img = create_test_image(50, 25);
        let surface = render(&img, 100, 50, FilterType::Lanczos3).unwrap();

        assert_eq!(surface.width, 100);
        assert_eq!(surface.height, 50);
    }

    #[test]
    fn test_render_stretches_aspect_ratio() {
        // 2:1 source onto a 1:2 surface: no letterboxing, exact size
        let img = create_test_image(200, 100);
        let surface = render(&img, 40, 80, FilterType::Bilinear).unwrap();

        assert_eq!((surface.width, surface.height), (40, 80));
        // Every pixel stays opaque, so no transparent bars were introduced
        assert!(surface.pixels.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_render_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(matches!(
            render(&img, 0, 50, FilterType::Bilinear),
            Err(SurfaceError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            render(&img, 50, 0, FilterType::Bilinear),
            Err(SurfaceError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_render_inconsistent_source_error() {
        let img = SourceImage {
            width: 10,
            height: 10,
            format: SourceFormat::Png,
            pixels: vec![0u8; 12],
        };
        assert!(matches!(
            render(&img, 5, 5, FilterType::Nearest),
            Err(SurfaceError::InvalidPixelData { expected: 400, actual: 12 })
        ));
    }

    #[test]
    fn test_all_filter_types() {
        let img = create_test_image(100, 50);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let surface = render(&img, 50, 25, filter).unwrap();
            assert_eq!(surface.width, 50);
            assert_eq!(surface.height, 25);
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::SourceFormat;
    use crate::surface::OutputDimensions;
    use proptest::prelude::*;

    fn source(width: u32, height: u32) -> SourceImage {
        let size = (width * height * 4) as usize;
        SourceImage::new(width, height, SourceFormat::Png, vec![77u8; size])
    }

    proptest! {
        /// Property: the surface always has exactly the requested size.
        #[test]
        fn prop_surface_matches_requested_size(
            (src_w, src_h) in (1u32..=40, 1u32..=40),
            (w, h) in (1u32..=60, 1u32..=60),
        ) {
            let surface = render(&source(src_w, src_h), w, h, FilterType::Bilinear).unwrap();
            prop_assert_eq!(surface.width, w);
            prop_assert_eq!(surface.height, h);
            prop_assert_eq!(surface.pixels.len(), (w * h * 4) as usize);
        }

        /// Property: any non-positive dimension is rejected before rendering.
        #[test]
        fn prop_non_positive_dimensions_rejected(
            w in -1000i64..=1000,
            h in -1000i64..=1000,
        ) {
            prop_assume!(w <= 0 || h <= 0);
            let rejected = matches!(
                OutputDimensions::new(w, h),
                Err(SurfaceError::InvalidDimensions { .. })
            );
            prop_assert!(rejected, "({}, {}) should be rejected", w, h);
        }
    }
}
