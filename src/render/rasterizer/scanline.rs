//! Span-based scanline rasterization with depth buffering.
//!
//! The triangle is first reduced to one horizontal [`Span`] per visible
//! pixel row (see [`Polygon::clipped_edge_list`]). Each span is then walked
//! left to right:
//!
//! ```text
//! row 0      L=====R          depth(x) = left_z + dz_dx * (x - left_x)
//! row 1     L=========R
//! row 2    L=============R
//! ```
//!
//! Depth is interpolated in floating point per column and rounded to the
//! integer depth grid only when the pixel is tested.
//!
//! Rows outside the canvas are never scan-converted, and columns outside it
//! are clipped before the walk, so the work per triangle is bounded by the
//! canvas size.

use super::Rasterizer;
use crate::polygon::{to_pixel, Polygon, Span};
use crate::render::framebuffer::FrameBuffer;

/// Scanline triangle rasterizer driven by per-row spans.
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Walks one span on row `y`, depth-testing each column.
    fn fill_span(y: i32, span: &Span, buffer: &mut FrameBuffer, color: u32) -> usize {
        if y < 0 || y > last_index(buffer.height()) {
            return 0;
        }

        let dz = span.dz_dx();
        let x_start = to_pixel(span.left_x).max(0);
        let x_end = to_pixel(span.right_x).min(last_index(buffer.width()));

        let mut written = 0;
        for x in x_start..=x_end {
            let z = span.left_z + dz * (x as f32 - span.left_x);
            if buffer.set_pixel_with_depth(x, y, to_pixel(z), color) {
                written += 1;
            }
        }
        written
    }
}

/// Largest pixel coordinate along an axis of `len` pixels; -1 when empty.
fn last_index(len: u32) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX) - 1
}

impl Default for ScanlineRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_polygon(&self, polygon: &Polygon, buffer: &mut FrameBuffer, color: u32) -> usize {
        let (top, spans) = polygon.clipped_edge_list(0..=last_index(buffer.height()));
        spans
            .iter()
            .enumerate()
            .map(|(row, span)| Self::fill_span(top + row as i32, span, buffer, color))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Rgb;
    use crate::math::vec3::Vec3;
    use crate::render::framebuffer::FAR_DEPTH;

    const W: u32 = 32;
    const H: u32 = 32;

    fn buffers() -> (Vec<u32>, Vec<i32>) {
        (vec![0; (W * H) as usize], vec![FAR_DEPTH; (W * H) as usize])
    }

    fn triangle(offset: f32, z: [f32; 3]) -> Polygon {
        Polygon::new(
            [
                Vec3::new(offset, offset, z[0]),
                Vec3::new(offset, offset + 10.0, z[1]),
                Vec3::new(offset + 10.0, offset, z[2]),
            ],
            Rgb::gray(255),
        )
        .unwrap()
    }

    #[test]
    fn fills_every_row_of_the_triangle() {
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H);
        let written = ScanlineRasterizer::new().fill_polygon(&triangle(2.0, [0.0; 3]), &mut fb, 1);

        // Rows hold 11, 10, ..., 1 pixels.
        assert_eq!(written, 66);
        assert_eq!(fb.get_pixel(2, 2), Some(1));
        assert_eq!(fb.get_pixel(12, 2), Some(1));
        assert_eq!(fb.get_pixel(2, 12), Some(1));
        assert_eq!(fb.get_pixel(3, 12), Some(0));
        assert_eq!(fb.get_pixel(1, 2), Some(0));
    }

    #[test]
    fn depth_is_interpolated_across_rows_and_columns() {
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H);
        // Depth rises by 1 per pixel in x and 2 per pixel in y.
        ScanlineRasterizer::new().fill_polygon(&triangle(0.0, [0.0, 20.0, 10.0]), &mut fb, 1);

        assert_eq!(fb.get_depth(0, 0), Some(0));
        assert_eq!(fb.get_depth(10, 0), Some(10));
        assert_eq!(fb.get_depth(0, 5), Some(10));
        assert_eq!(fb.get_depth(3, 4), Some(11));
    }

    #[test]
    fn off_canvas_parts_are_clipped() {
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H);
        let straddling = Polygon::new(
            [
                Vec3::new(-5.0, -5.0, 0.0),
                Vec3::new(-5.0, 15.0, 0.0),
                Vec3::new(15.0, -5.0, 0.0),
            ],
            Rgb::gray(255),
        )
        .unwrap();
        let written = ScanlineRasterizer::new().fill_polygon(&straddling, &mut fb, 1);

        // Only x >= 0, y >= 0, x + y <= 10 survives: rows 0..=10 hold 11..1 pixels.
        assert_eq!(written, 66);
        assert_eq!(fb.get_pixel(0, 0), Some(1));
        assert_eq!(fb.get_pixel(10, 0), Some(1));
        assert_eq!(fb.get_pixel(11, 0), Some(0));

        let far = triangle(1000.0, [0.0; 3]);
        assert_eq!(ScanlineRasterizer::new().fill_polygon(&far, &mut fb, 1), 0);
    }

    #[test]
    fn very_tall_triangle_fills_only_visible_rows() {
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H);
        let tall = Polygon::new(
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 3.0e9, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
            ],
            Rgb::gray(255),
        )
        .unwrap();
        let written = ScanlineRasterizer::new().fill_polygon(&tall, &mut fb, 1);

        // Every one of the 32 rows holds x = 0..=10.
        assert_eq!(written, 32 * 11);
        assert_eq!(fb.get_pixel(10, 31), Some(1));
        assert_eq!(fb.get_pixel(11, 31), Some(0));
    }
}
