//! Triangle rasterization.
//!
//! A [`Rasterizer`] turns one shaded [`Polygon`] into depth-tested pixel
//! writes on a [`FrameBuffer`]. The scanline implementation consumes the
//! span list produced by [`Polygon::edge_list`].

mod scanline;

pub use scanline::ScanlineRasterizer;

use super::framebuffer::FrameBuffer;
use crate::polygon::Polygon;

/// Trait for triangle rasterization algorithms.
pub trait Rasterizer {
    /// Fill a triangle into the frame buffer with a single flat color.
    ///
    /// # Arguments
    /// * `polygon` - The triangle to rasterize, already in canvas coordinates
    /// * `buffer` - The frame buffer to draw into
    /// * `color` - Packed ARGB color for every covered pixel
    ///
    /// Returns the number of pixels that passed the depth test.
    fn fill_polygon(&self, polygon: &Polygon, buffer: &mut FrameBuffer, color: u32) -> usize;
}
