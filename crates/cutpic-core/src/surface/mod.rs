//! The output raster for a conversion.
//!
//! A [`RasterSurface`] is created fresh for every conversion by drawing the
//! full source image onto a buffer of the requested size. It carries no
//! iteration logic; the size-targeting loop only reads it.

mod render;
mod types;

pub use render::render;
pub use types::{FilterType, OutputDimensions, RasterSurface, SurfaceError};
