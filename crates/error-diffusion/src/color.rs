//! Real-valued RGB color type.
//!
//! During dithering a pixel's channels are unconstrained reals: diffusion
//! adjustments are additive and may push a channel below 0 or above 255.
//! [`Color::clamp_to_byte_range`] is the only place range is enforced, and
//! [`Color::to_bytes`] (clamp + truncate) is the only place rounding happens.

use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use crate::vector::Vector;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// A 3-channel (R, G, B) color with real-valued channels.
///
/// Channels are *not* constrained to [0, 255]: error diffusion adds signed
/// compensation values to neighboring pixels, so intermediate colors
/// routinely leave the byte range. Callers must clamp before persisting a
/// value to the pixel buffer or exporting it.
///
/// # Example
///
/// ```
/// use error_diffusion::Color;
///
/// let c = Color::new(-10.0, 300.0, 128.0).clamp_to_byte_range();
/// assert_eq!(c, Color::new(0.0, 255.0, 128.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    channels: Vector<f64, 3>,
}

impl Color {
    /// Create a color from real-valued channels.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            channels: Vector::new([r, g, b]),
        }
    }

    /// Create a color from 8-bit channel values.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(f64::from(r), f64::from(g), f64::from(b))
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Red channel.
    #[inline]
    pub fn r(&self) -> f64 {
        self.channels.component(0)
    }

    /// Green channel.
    #[inline]
    pub fn g(&self) -> f64 {
        self.channels.component(1)
    }

    /// Blue channel.
    #[inline]
    pub fn b(&self) -> f64 {
        self.channels.component(2)
    }

    /// Componentwise sum.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self {
            channels: self.channels.add(other.channels),
        }
    }

    /// Componentwise difference (`self - other`).
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self {
            channels: self.channels.sub(other.channels),
        }
    }

    /// Multiply every channel by `scalar`.
    #[inline]
    pub fn scale(self, scalar: f64) -> Self {
        Self {
            channels: self.channels.scale(scalar),
        }
    }

    /// Euclidean magnitude in RGB space.
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.channels.magnitude()
    }

    /// Clamp every channel into [0, 255], returning a new color.
    ///
    /// Channels stay real-valued; truncation to integers happens only in
    /// [`to_bytes`](Self::to_bytes).
    #[inline]
    pub fn clamp_to_byte_range(self) -> Self {
        Self {
            channels: Vector::new(self.channels.components().map(|c| c.clamp(0.0, 255.0))),
        }
    }

    /// Convert to a byte array `[R, G, B]`, clamping then truncating.
    ///
    /// Truncation (not rounding) matches the export contract: a channel of
    /// 254.9 becomes 254.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        let clamped = self.clamp_to_byte_range();
        [clamped.r() as u8, clamped.g() as u8, clamped.b() as u8]
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` - standard 6-digit hex with hash
    /// - `RRGGBB` - standard 6-digit hex without hash
    /// - `#RGB` - shorthand 3-digit hex with hash (expands to RRGGBB)
    /// - `RGB` - shorthand 3-digit hex without hash
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use error_diffusion::Color;
    ///
    /// let white: Color = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Color::new(255.0, 255.0, 255.0));
    ///
    /// let red: Color = "#F00".parse().unwrap();
    /// assert_eq!(red, Color::new(255.0, 0.0, 0.0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        // The byte slicing below requires char boundaries at every index;
        // valid hex is ASCII, so anything else is rejected here.
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
