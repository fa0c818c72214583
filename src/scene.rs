//! Scene description and the strict scene-file reader.
//!
//! # File format
//!
//! Whitespace-separated tokens, one record per line. Blank lines are ignored.
//!
//! ```text
//! lx ly lz                                  <- light direction, 3 floats
//! x0 y0 z0 x1 y1 z1 x2 y2 z2 r g b          <- one triangle, 9 floats + 3 ints (0-255)
//! ...
//! ```
//!
//! Any line with the wrong number of tokens, an unparsable number, or a
//! color channel outside 0-255 fails the whole load. Triangles whose
//! vertices are collinear are skipped with a warning.

use std::fmt;
use std::path::Path;

use log::{debug, warn};

use crate::colors::Rgb;
use crate::light::DirectionalLight;
use crate::math::vec3::Vec3;
use crate::polygon::Polygon;
use crate::transform::Transform;

const LIGHT_TOKENS: usize = 3;
const POLYGON_TOKENS: usize = 12;

#[derive(Debug)]
pub enum SceneError {
    Io(std::io::Error),
    /// The input holds no light line.
    Empty,
    TokenCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    InvalidNumber {
        line: usize,
        token: String,
    },
    ColorOutOfRange {
        line: usize,
        value: i64,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "failed to read scene: {}", e),
            SceneError::Empty => write!(f, "scene has no light direction line"),
            SceneError::TokenCount {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected {} values, found {}",
                line, expected, found
            ),
            SceneError::InvalidNumber { line, token } => {
                write!(f, "line {}: '{}' is not a valid number", line, token)
            }
            SceneError::ColorOutOfRange { line, value } => {
                write!(f, "line {}: color channel {} is outside 0-255", line, value)
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::Io(e)
    }
}

/// Triangles in file order plus the single light.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    polygons: Vec<Polygon>,
    light: DirectionalLight,
}

impl Scene {
    pub fn new(polygons: Vec<Polygon>, light: DirectionalLight) -> Self {
        Self { polygons, light }
    }

    /// Reads and parses a scene file.
    pub fn load(path: impl AsRef<Path>, ambient: f32) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&text, ambient)
    }

    /// Parses scene text. `ambient` is the ambient level given to the light.
    pub fn parse(text: &str, ambient: f32) -> Result<Self, SceneError> {
        let mut records = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (light_line, light_text) = records.next().ok_or(SceneError::Empty)?;
        let tokens = split_exact(light_line, light_text, LIGHT_TOKENS)?;
        let direction = Vec3::new(
            parse_float(light_line, tokens[0])?,
            parse_float(light_line, tokens[1])?,
            parse_float(light_line, tokens[2])?,
        );

        let mut polygons = Vec::new();
        for (line, text) in records {
            let tokens = split_exact(line, text, POLYGON_TOKENS)?;

            let mut coords = [0.0f32; 9];
            for (slot, token) in coords.iter_mut().zip(&tokens[..9]) {
                *slot = parse_float(line, token)?;
            }
            let reflectivity = Rgb::new(
                parse_channel(line, tokens[9])?,
                parse_channel(line, tokens[10])?,
                parse_channel(line, tokens[11])?,
            );
            let vertices = [
                Vec3::new(coords[0], coords[1], coords[2]),
                Vec3::new(coords[3], coords[4], coords[5]),
                Vec3::new(coords[6], coords[7], coords[8]),
            ];

            match Polygon::new(vertices, reflectivity) {
                Ok(polygon) => polygons.push(polygon),
                Err(e) => warn!("line {}: skipping triangle: {}", line, e),
            }
        }

        debug!("parsed {} triangles, light {}", polygons.len(), direction);
        Ok(Self::new(
            polygons,
            DirectionalLight::new(direction, ambient),
        ))
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn polygons_mut(&mut self) -> &mut [Polygon] {
        &mut self.polygons
    }

    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    pub fn light_mut(&mut self) -> &mut DirectionalLight {
        &mut self.light
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Applies `transform` to every triangle. Triangles that can no longer
    /// produce a normal afterwards are dropped with a warning.
    pub fn apply(&mut self, transform: &Transform) {
        self.polygons.retain_mut(|polygon| match polygon.apply(transform) {
            Ok(()) => true,
            Err(e) => {
                warn!("dropping triangle after transform: {}", e);
                false
            }
        });
    }

    /// Top-left corner of the scene's rounded 2D extent, or `None` when
    /// the scene has no triangles.
    pub fn top_left(&self) -> Option<(i32, i32)> {
        let left = self.polygons.iter().map(Polygon::min_x).min()?;
        let top = self.polygons.iter().map(Polygon::min_y).min()?;
        Some((left, top))
    }

    /// Unrounded minimum x and y over every triangle's bounding box.
    pub fn min_corner(&self) -> Option<(f32, f32)> {
        self.polygons
            .iter()
            .map(|polygon| polygon.bounding_box())
            .map(|bb| (bb.x, bb.y))
            .reduce(|(x0, y0), (x1, y1)| (x0.min(x1), y0.min(y1)))
    }
}

fn split_exact(line: usize, text: &str, expected: usize) -> Result<Vec<&str>, SceneError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(SceneError::TokenCount {
            line,
            expected,
            found: tokens.len(),
        });
    }
    Ok(tokens)
}

fn parse_float(line: usize, token: &str) -> Result<f32, SceneError> {
    token
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SceneError::InvalidNumber {
            line,
            token: token.to_string(),
        })
}

fn parse_channel(line: usize, token: &str) -> Result<u8, SceneError> {
    let value = token
        .parse::<i64>()
        .map_err(|_| SceneError::InvalidNumber {
            line,
            token: token.to_string(),
        })?;
    u8::try_from(value).map_err(|_| SceneError::ColorOutOfRange { line, value })
}
