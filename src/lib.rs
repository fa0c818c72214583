//! A CPU-based flat-shaded triangle renderer.
//!
//! Scenes are plain-text lists of triangles lit by a single directional
//! light. The pipeline fits the scene to the canvas, culls back faces,
//! flat-shades each triangle, and scan-converts it into a depth-buffered
//! pixel grid that can be saved as PNG.
//!
//! # Quick Start
//!
//! ```no_run
//! use flatrast::prelude::*;
//!
//! let mut engine = Engine::new(RenderConfig::default());
//! engine.load_scene("monkey.txt")?;
//! engine.handle_command(Command::RotateYPos);
//! engine.render();
//! let out = engine.output_path(".");
//! engine.save_png(&out)?;
//! # Ok::<(), flatrast::RenderError>(())
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod command;
pub mod config;
pub mod engine;
pub mod light;
pub mod math;
pub mod polygon;
pub mod scene;
pub mod transform;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use command::Command;
pub use config::RenderConfig;
pub use engine::{Engine, RenderError, RenderStats};
pub use polygon::{GeometryError, Polygon};
pub use scene::{Scene, SceneError};
pub use transform::Transform;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::colors::Rgb;
    pub use crate::command::Command;
    pub use crate::config::RenderConfig;
    pub use crate::engine::{Engine, RenderStats};
    pub use crate::light::DirectionalLight;
    pub use crate::math::vec3::Vec3;
    pub use crate::polygon::Polygon;
    pub use crate::scene::Scene;
    pub use crate::transform::Transform;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{FrameBuffer, Rasterizer, Renderer, ScanlineRasterizer, FAR_DEPTH};
}
