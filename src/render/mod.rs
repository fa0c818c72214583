//! Pixel storage and triangle rasterization.

mod framebuffer;
mod rasterizer;
mod renderer;

pub use framebuffer::{FrameBuffer, FAR_DEPTH};
pub use rasterizer::{Rasterizer, ScanlineRasterizer};
pub use renderer::Renderer;
