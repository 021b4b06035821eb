//! Integer pixel coordinate type.

use crate::vector::Vector;

/// A 2-channel integer pixel coordinate `(x, y)`.
///
/// Also used for the *relative* offsets in a diffusion kernel, where
/// either coordinate may be negative. [`is_valid`](Self::is_valid) checks
/// an absolute position against buffer dimensions; kernel code must call
/// it before any buffer access that did not originate from the traversal
/// driver's own bounded iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    coords: Vector<i32, 2>,
}

impl Position {
    /// Create a position from `(x, y)` coordinates.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            coords: Vector::new([x, y]),
        }
    }

    /// Horizontal coordinate.
    #[inline]
    pub fn x(&self) -> i32 {
        self.coords.component(0)
    }

    /// Vertical coordinate.
    #[inline]
    pub fn y(&self) -> i32 {
        self.coords.component(1)
    }

    /// Componentwise sum, typically `absolute.translate(offset)`.
    #[inline]
    pub fn translate(self, offset: Self) -> Self {
        Self {
            coords: self.coords.add(offset.coords),
        }
    }

    /// Whether this position lies inside a `width` x `height` buffer:
    /// `0 <= x < width` and `0 <= y < height`.
    #[inline]
    pub fn is_valid(&self, width: usize, height: usize) -> bool {
        self.x() >= 0
            && (self.x() as usize) < width
            && self.y() >= 0
            && (self.y() as usize) < height
    }
}
