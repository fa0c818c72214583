//! Flat-shaded triangles and everything derived from their geometry.
//!
//! A [`Polygon`] owns three vertices and a base reflectivity. Its unit
//! normal and `facing` flag are derived from the vertices and recomputed
//! from scratch whenever the vertices change; they are never patched
//! incrementally.
//!
//! # Viewing convention
//!
//! The camera looks down +Z with X to the right and Y down the canvas.
//! A triangle faces the viewer when its normal `(v1 - v0) × (v2 - v1)`
//! has a z component ≤ 0.

use std::fmt;
use std::ops::RangeInclusive;

use crate::colors::Rgb;
use crate::math::vec3::Vec3;
use crate::transform::Transform;

/// Errors raised while deriving triangle geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// The vertices are collinear or coincident, so no normal exists.
    DegenerateTriangle,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::DegenerateTriangle => {
                write!(f, "degenerate triangle: vertices do not span an area")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Axis-aligned 2D footprint of a triangle: origin plus extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }
}

/// One scanline row of a triangle: the leftmost and rightmost x touched by
/// any edge on that row, with the depth at each end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub left_x: f32,
    pub left_z: f32,
    pub right_x: f32,
    pub right_z: f32,
}

impl Span {
    fn new(x: f32, z: f32) -> Self {
        Self {
            left_x: x,
            left_z: z,
            right_x: x,
            right_z: z,
        }
    }

    /// Widens the span to include `x`.
    fn add(&mut self, x: f32, z: f32) {
        if x < self.left_x {
            self.left_x = x;
            self.left_z = z;
        }
        if x > self.right_x {
            self.right_x = x;
            self.right_z = z;
        }
    }

    /// Depth change per pixel moving right along the span.
    pub fn dz_dx(&self) -> f32 {
        let width = self.right_x - self.left_x;
        if width > 0.0 {
            (self.right_z - self.left_z) / width
        } else {
            0.0
        }
    }
}

/// Rounds a coordinate to the nearest pixel, halves rounding up.
///
/// Values beyond the `i32` range saturate.
#[inline]
pub(crate) fn to_pixel(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// A triangle with flat material and derived lighting state.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: [Vec3; 3],
    reflectivity: Rgb,
    normal: Vec3,
    facing: bool,
    color: Rgb,
}

impl Polygon {
    /// Builds a triangle and derives its normal.
    ///
    /// Returns [`GeometryError::DegenerateTriangle`] when the vertices are
    /// collinear, since such a triangle has no normal.
    pub fn new(vertices: [Vec3; 3], reflectivity: Rgb) -> Result<Self, GeometryError> {
        let normal = Self::compute_normal(&vertices)?;
        Ok(Self {
            vertices,
            reflectivity,
            normal,
            facing: normal.z <= 0.0,
            color: reflectivity,
        })
    }

    fn compute_normal(vertices: &[Vec3; 3]) -> Result<Vec3, GeometryError> {
        let [v0, v1, v2] = *vertices;
        (v1 - v0)
            .cross(v2 - v1)
            .unit_vector()
            .ok_or(GeometryError::DegenerateTriangle)
    }

    pub fn vertices(&self) -> &[Vec3; 3] {
        &self.vertices
    }

    pub fn reflectivity(&self) -> Rgb {
        self.reflectivity
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Whether the triangle faces the viewer and should be drawn.
    pub fn facing(&self) -> bool {
        self.facing
    }

    /// The flat color from the most recent [`Polygon::shading`] call.
    /// Before any shading it is the raw reflectivity.
    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let [v0, v1, v2] = self.vertices;
        let min_x = v0.x.min(v1.x).min(v2.x);
        let min_y = v0.y.min(v1.y).min(v2.y);
        let max_x = v0.x.max(v1.x).max(v2.x);
        let max_y = v0.y.max(v1.y).max(v2.y);
        BoundingBox {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    pub fn min_x(&self) -> i32 {
        to_pixel(self.bounding_box().x)
    }

    pub fn min_y(&self) -> i32 {
        to_pixel(self.bounding_box().y)
    }

    pub fn max_x(&self) -> i32 {
        to_pixel(self.bounding_box().max_x())
    }

    pub fn max_y(&self) -> i32 {
        to_pixel(self.bounding_box().max_y())
    }

    /// Screen bounds summary, handy in debug logs.
    pub fn bounds_string(&self) -> String {
        format!(
            "L: {} T: {} R: {} B: {}",
            self.min_x(),
            self.min_y(),
            self.max_x(),
            self.max_y()
        )
    }

    /// Computes the flat shaded color for this triangle.
    ///
    /// Reflectance is `ambient` plus the Lambertian term when the light hits
    /// the front of the surface. Channels are clamped to [0, 255].
    pub fn shading(&mut self, light: Vec3, ambient: f32) -> Rgb {
        let cos = self.normal.cos_theta(light);
        let reflectance = if cos > 0.0 { ambient + cos } else { ambient };
        self.color = self.reflectivity.scaled(reflectance);
        self.color
    }

    /// Scan-converts the triangle into one [`Span`] per pixel row.
    ///
    /// Index `0` is the row at [`Polygon::min_y`], and the list holds
    /// `max_y - min_y + 1` rows. Each edge is walked from its upper to its
    /// lower endpoint, stepping x and z by `dx/dy` and `dz/dy` per row.
    /// Horizontal edges contribute nothing.
    ///
    /// Returns an empty list when every edge is horizontal (the triangle is
    /// seen exactly edge-on and covers no rows).
    ///
    /// The list grows with the triangle's height. Use
    /// [`Polygon::clipped_edge_list`] when only some rows can be shown.
    pub fn edge_list(&self) -> Vec<Span> {
        self.clipped_edge_list(i32::MIN..=i32::MAX).1
    }

    /// Like [`Polygon::edge_list`], but only for the rows inside `rows`.
    ///
    /// Returns the row of the first span along with the spans. Rows outside
    /// the window are neither allocated nor walked, so the cost is bounded
    /// by the window height however tall the triangle is.
    pub fn clipped_edge_list(&self, rows: RangeInclusive<i32>) -> (i32, Vec<Span>) {
        let first = self.min_y().max(*rows.start());
        let last = self.max_y().min(*rows.end());
        if first > last {
            return (first, Vec::new());
        }

        let count = (i64::from(last) - i64::from(first) + 1) as usize;
        let mut spans: Vec<Option<Span>> = vec![None; count];

        for i in 0..3 {
            let mut va = self.vertices[i];
            let mut vb = self.vertices[(i + 1) % 3];
            if va.y > vb.y {
                std::mem::swap(&mut va, &mut vb);
            }

            let dy = vb.y - va.y;
            if dy == 0.0 {
                continue;
            }
            let mx = (vb.x - va.x) / dy;
            let mz = (vb.z - va.z) / dy;

            let edge_top = to_pixel(va.y);
            let start = edge_top.max(first);
            let end = to_pixel(vb.y).min(last);
            if start > end {
                continue;
            }

            // Rows above the window are skipped, not walked.
            let skipped = (i64::from(start) - i64::from(edge_top)) as f32;
            let mut x = va.x + mx * skipped;
            let mut z = va.z + mz * skipped;

            for row in start..=end {
                let index = (i64::from(row) - i64::from(first)) as usize;
                if let Some(slot) = spans.get_mut(index) {
                    match slot {
                        Some(span) => span.add(x, z),
                        None => *slot = Some(Span::new(x, z)),
                    }
                }
                x += mx;
                z += mz;
            }
        }

        // A non-horizontal edge from the top vertex to the bottom vertex
        // touches every row, so gaps only occur when all edges are flat.
        let spans = spans
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default();
        (first, spans)
    }

    /// Replaces every vertex with its image under `transform` and derives
    /// the normal and facing flag again from the new positions.
    ///
    /// On error the triangle is left unchanged.
    pub fn apply(&mut self, transform: &Transform) -> Result<(), GeometryError> {
        let vertices = self.vertices.map(|v| transform.apply(v));
        let normal = Self::compute_normal(&vertices)?;
        self.vertices = vertices;
        self.normal = normal;
        self.facing = normal.z <= 0.0;
        Ok(())
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Poly:")?;
        for v in &self.vertices {
            write!(f, " {}", v)?;
        }
        write!(
            f,
            " {} normal {} facing {}",
            self.reflectivity, self.normal, self.facing
        )
    }
}
