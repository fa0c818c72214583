//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a safe view into color and depth buffers with bounds-checked access.
//! The depth buffer enables hidden surface removal via the z-buffer algorithm.

use super::renderer::pixel_count;

/// Depth of a pixel nothing has been drawn to yet.
pub const FAR_DEPTH: i32 = i32::MAX;

/// A view into color and depth buffers.
///
/// Wraps 1D row-major slices (`y * width + x`) with width/height metadata to
/// enable safe 2D pixel access. This is a borrowed view, not an owning type -
/// it's meant to be created temporarily when you need to pass buffers +
/// dimensions together.
///
/// # Depth Buffer
///
/// The depth buffer stores integer scene z per pixel. Smaller values are
/// nearer the viewer; cleared pixels hold [`FAR_DEPTH`].
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [i32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    ///
    /// # Panics
    /// Panics in debug builds if buffer lengths don't match width * height
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [i32],
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            pixel_count(width, height),
            "Color buffer size doesn't match dimensions"
        );
        debug_assert_eq!(
            depth_buffer.len(),
            pixel_count(width, height),
            "Depth buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is only written if `depth` is strictly less than the stored
    /// depth; on a tie the existing pixel stays. Depths are whole numbers, so
    /// two surfaces whose z rounds to the same value tie and the first one
    /// drawn is kept. Drawing order only stops mattering once overlapping
    /// surfaces differ by at least one depth unit.
    ///
    /// Out-of-bounds coordinates are ignored. Returns whether the pixel was
    /// written.
    ///
    /// # Arguments
    /// * `x`, `y` - Pixel coordinates
    /// * `depth` - Scene z for this pixel (smaller = nearer)
    /// * `color` - The color to write if depth test passes
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: i32, color: u32) -> bool {
        match self.index(x, y) {
            Some(idx) if depth < self.depth_buffer[idx] => {
                self.depth_buffer[idx] = depth;
                self.color_buffer[idx] = color;
                true
            }
            _ => false,
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[cfg(test)]
    pub(crate) fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the depth at (x, y), or None if out of bounds.
    #[cfg(test)]
    pub(crate) fn get_depth(&self, x: i32, y: i32) -> Option<i32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }
}
