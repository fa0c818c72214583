use std::fmt;
use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const BACK: Self = Self {
        x: 0.0,
        y: 0.0,
        z: -1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    pub fn subtract(&self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Returns the unit vector pointing the same way, or `None` when the
    /// vector has zero (or non-finite) length and has no direction.
    pub fn unit_vector(&self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return None;
        }
        Some(Self {
            x: self.x / magnitude,
            y: self.y / magnitude,
            z: self.z / magnitude,
        })
    }

    /// Cosine of the angle between `self` and `other`, assuming `self` is
    /// already a unit vector. `other` is normalized here, so any non-zero
    /// length is accepted. A zero-length `other` yields 0.0.
    pub fn cos_theta(&self, other: Self) -> f32 {
        other.unit_vector().map_or(0.0, |l| self.dot(l))
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        self.subtract(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cross_of_axes_follows_right_hand_rule() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), Vec3::BACK);
    }

    #[test]
    fn unit_vector_has_length_one() {
        let v = Vec3::new(3.0, 4.0, 12.0).unit_vector().unwrap();
        assert_relative_eq!(v.magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(v.x, 3.0 / 13.0, epsilon = 1e-6);
    }

    #[test]
    fn unit_vector_of_zero_is_none() {
        assert!(Vec3::ZERO.unit_vector().is_none());
    }

    #[test]
    fn cos_theta_normalizes_the_light_argument() {
        let normal = Vec3::BACK;
        assert_relative_eq!(normal.cos_theta(Vec3::new(0.0, 0.0, -7.5)), 1.0);
        assert_relative_eq!(normal.cos_theta(Vec3::new(0.0, 0.0, 2.0)), -1.0);
        assert_relative_eq!(normal.cos_theta(Vec3::new(1.0, 0.0, -1.0)), 0.70710677, epsilon = 1e-6);
    }

    #[test]
    fn cos_theta_against_zero_light_is_zero() {
        assert_eq!(Vec3::BACK.cos_theta(Vec3::ZERO), 0.0);
    }

    #[test]
    fn operators_match_named_methods() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, -1.0, 4.0);
        assert_eq!(a - b, a.subtract(b));
        assert_eq!(a + b - b, a);
    }
}
