//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// A directional light plus the scene's ambient level.
///
/// The direction is kept exactly as given and is not renormalized after
/// edits; shading normalizes it on use, so any non-zero vector is valid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels, toward the surface.
    pub direction: Vec3,
    pub ambient_intensity: f32,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, ambient_intensity: f32) -> Self {
        DirectionalLight {
            direction,
            ambient_intensity,
        }
    }

    /// Moves the direction by `delta` without renormalizing.
    pub fn nudge(&mut self, delta: Vec3) {
        self.direction = self.direction + delta;
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::BACK, 0.1)
    }
}
