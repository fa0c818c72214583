//! Immutable affine transforms applied to scene geometry.
//!
//! A [`Transform`] wraps a [`Mat4`] and only ever produces new values:
//! composing two transforms or applying one to a point never mutates the
//! operands.

use crate::math::{mat4::Mat4, vec3::Vec3};

/// An affine transform (translation and axis rotations).
///
/// ```ignore
/// let fit = Transform::translation(50.0, 50.0, 0.0);
/// let spin = Transform::rotation_y(10.0);
/// let both = fit.compose(&spin); // spin first, then fit
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            matrix: Mat4::identity(),
        }
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            matrix: Mat4::translation(x, y, z),
        }
    }

    /// Rotation about the X axis by `degrees`.
    pub fn rotation_x(degrees: f32) -> Self {
        Self {
            matrix: Mat4::rotation_x(degrees.to_radians()),
        }
    }

    /// Rotation about the Y axis by `degrees`.
    pub fn rotation_y(degrees: f32) -> Self {
        Self {
            matrix: Mat4::rotation_y(degrees.to_radians()),
        }
    }

    /// Returns `self × other`: the result applies `other` first, then `self`.
    pub fn compose(&self, other: &Transform) -> Transform {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Maps a point through this transform.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.matrix * point
    }

    #[cfg(test)]
    pub(crate) fn matrix(&self) -> Mat4 {
        self.matrix
    }
}
