//! Owned pixel storage.
//!
//! Provides the [`Renderer`] struct which owns the color and depth grids for
//! one canvas and hands out [`FrameBuffer`] views for rasterization.

use image::RgbImage;

use super::framebuffer::{FrameBuffer, FAR_DEPTH};
use crate::colors::{self, Rgb};

/// Number of pixels in a `width` x `height` grid, computed without `u32`
/// overflow.
pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<i32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = pixel_count(width, height);
        Self {
            color_buffer: vec![colors::BACKGROUND.to_argb(); size],
            depth_buffer: vec![FAR_DEPTH; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = pixel_count(width, height);
        self.color_buffer = vec![colors::BACKGROUND.to_argb(); size];
        self.depth_buffer = vec![FAR_DEPTH; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset both grids for a new frame: every pixel to `background`, every
    /// depth to [`FAR_DEPTH`].
    pub fn clear(&mut self, background: Rgb) {
        self.color_buffer.fill(background.to_argb());
        self.depth_buffer.fill(FAR_DEPTH);
    }

    /// Packed `0xAARRGGBB` pixels in row-major order.
    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[i32] {
        &self.depth_buffer
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.index(x, y).map(|idx| Rgb::from_argb(self.color_buffer[idx]))
    }

    pub fn depth(&self, x: u32, y: u32) -> Option<i32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    /// Copies the color grid into an RGB image for encoding.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let c = self.pixel(x, y).unwrap_or(colors::BACKGROUND);
            image::Rgb(c.to_array())
        })
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }
}
