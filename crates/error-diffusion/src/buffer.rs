//! In-memory pixel buffer.
//!
//! [`PixelBuffer`] owns a dense width x height grid of [`Color`] values in
//! row-major order. It is populated once from decoded 8-bit RGB samples,
//! mutated in place by the traversal driver, and read once at the end via
//! [`export`](PixelBuffer::export).

use thiserror::Error;

use crate::color::Color;
use crate::position::Position;

/// Error type for pixel buffer access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Position outside the buffer's declared dimensions.
    ///
    /// This is a defensive check: the traversal driver only emits in-range
    /// positions and the kernel pre-validates neighbor targets, so seeing
    /// this error indicates a caller bug rather than bad input data.
    #[error("position ({x}, {y}) outside {width}x{height} buffer")]
    OutOfBounds {
        /// Offending x coordinate
        x: i32,
        /// Offending y coordinate
        y: i32,
        /// Buffer width in pixels
        width: usize,
        /// Buffer height in pixels
        height: usize,
    },
}

/// A dense, mutable width x height grid of colors.
///
/// Stored colors are real-valued and may temporarily leave the byte range
/// while diffusion adjustments accumulate; [`set`](Self::set) performs no
/// implicit clamping, and only [`export`](Self::export) rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    /// Row-major: index = y * width + x.
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a buffer from interleaved 8-bit RGB samples.
    ///
    /// # Arguments
    ///
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `samples` - `[R, G, B, R, G, B, ...]` bytes, row-major
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() != width * height * 3`. A mismatched
    /// sample slice is a construction bug; failing here beats a later
    /// index panic deep inside the traversal.
    pub fn from_rgb_bytes(width: usize, height: usize, samples: &[u8]) -> Self {
        assert_eq!(
            samples.len(),
            width * height * 3,
            "sample length ({}) must match width * height * 3 ({}x{}x3={})",
            samples.len(),
            width,
            height,
            width * height * 3,
        );
        let pixels = samples
            .chunks_exact(3)
            .map(|c| Color::from_u8(c[0], c[1], c[2]))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer by evaluating `f` at every position, row-major.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(Position) -> Color) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(Position::new(x as i32, y as i32)));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, pos: Position) -> Result<usize, BufferError> {
        if pos.is_valid(self.width, self.height) {
            Ok(pos.y() as usize * self.width + pos.x() as usize)
        } else {
            Err(BufferError::OutOfBounds {
                x: pos.x(),
                y: pos.y(),
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Read the color at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if `pos` is outside the buffer.
    #[inline]
    pub fn get(&self, pos: Position) -> Result<Color, BufferError> {
        Ok(self.pixels[self.index(pos)?])
    }

    /// Overwrite the color at `pos` in place.
    ///
    /// No clamping is applied; the caller must clamp beforehand if the
    /// value is meant to stay in the byte range.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if `pos` is outside the buffer.
    #[inline]
    pub fn set(&mut self, pos: Position, color: Color) -> Result<(), BufferError> {
        let idx = self.index(pos)?;
        self.pixels[idx] = color;
        Ok(())
    }

    /// Export the buffer as interleaved 8-bit RGB samples.
    ///
    /// Every stored color is clamped to [0, 255] and truncated to an
    /// integer. This is the only place rounding happens.
    pub fn export(&self) -> Vec<u8> {
        let mut samples = Vec::with_capacity(self.pixels.len() * 3);
        for pixel in &self.pixels {
            samples.extend_from_slice(&pixel.to_bytes());
        }
        samples
    }
}
