//! Color helpers.
//!
//! Pixels are stored packed as `0xAARRGGBB` in the color buffer; [`Rgb`] is
//! the unpacked triple used for reflectivity and shading results.

use std::fmt;

/// An 8-bit-per-channel RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Multiplies each channel by `factor` and clamps the result to [0, 255].
    ///
    /// Fractions are truncated toward zero. A NaN factor produces black.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            r: scale_channel(self.r, factor),
            g: scale_channel(self.g, factor),
            b: scale_channel(self.b, factor),
        }
    }

    /// Packs into `0xFFRRGGBB`.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpacks from `0xAARRGGBB`, ignoring alpha.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[inline]
fn scale_channel(channel: u8, factor: f32) -> u8 {
    // `as u8` saturates and maps NaN to 0.
    (channel as f32 * factor).clamp(0.0, 255.0) as u8
}

/// Canvas background before any triangle is drawn.
pub const BACKGROUND: Rgb = Rgb::gray(128);
