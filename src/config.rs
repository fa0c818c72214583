//! Render settings shared by the engine and the command-line front end.

use std::fmt;

use crate::colors::{self, Rgb};

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 600;
/// Gap left between the canvas origin and the scene's top-left corner.
pub const CANVAS_MARGIN: i32 = 50;
pub const AMBIENT_LIGHT: f32 = 0.1;
pub const ROTATION_STEP_DEGREES: f32 = 10.0;
pub const LIGHT_STEP: f32 = 1.0;
/// Largest accepted canvas width or height.
pub const MAX_CANVAS_SIZE: u32 = 16_384;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    CanvasSize { width: u32, height: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::CanvasSize { width, height } => write!(
                f,
                "canvas {}x{} must be between 1x1 and {}x{}",
                width, height, MAX_CANVAS_SIZE, MAX_CANVAS_SIZE
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub margin: i32,
    pub ambient: f32,
    /// Angle of one interactive rotation, in degrees.
    pub rotation_step: f32,
    /// Light nudge along x and y. Depth nudges use half of this.
    pub light_step: f32,
    pub background: Rgb,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            margin: CANVAS_MARGIN,
            ambient: AMBIENT_LIGHT,
            rotation_step: ROTATION_STEP_DEGREES,
            light_step: LIGHT_STEP,
            background: colors::BACKGROUND,
        }
    }
}

impl RenderConfig {
    /// Checks that the canvas can be allocated and addressed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = 1..=MAX_CANVAS_SIZE;
        if valid.contains(&self.width) && valid.contains(&self.height) {
            Ok(())
        } else {
            Err(ConfigError::CanvasSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}
