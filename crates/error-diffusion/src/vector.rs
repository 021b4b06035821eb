//! Fixed-arity numeric vector primitive.
//!
//! [`Vector`] is the arithmetic base for the crate's two coordinate types:
//! [`Color`](crate::Color) (3 real channels) and [`Position`](crate::Position)
//! (2 integer coordinates). Arity is a compile-time parameter, so operations
//! on mismatched arities or with a scalar of the wrong type are rejected by
//! the compiler rather than surfacing as runtime errors.

use std::ops::{Add, Mul, Sub};

/// An immutable fixed-arity numeric tuple.
///
/// All operations are pure: they take operands by value and return a new
/// vector, leaving the receiver untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector<T, const N: usize> {
    components: [T; N],
}

impl<T: Copy, const N: usize> Vector<T, N> {
    /// Create a vector from its components.
    #[inline]
    pub const fn new(components: [T; N]) -> Self {
        Self { components }
    }

    /// The component at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= N`.
    #[inline]
    pub fn component(&self, i: usize) -> T {
        self.components[i]
    }

    /// All components, in order.
    #[inline]
    pub fn components(&self) -> [T; N] {
        self.components
    }
}

impl<T: Copy + Add<Output = T>, const N: usize> Vector<T, N> {
    /// Componentwise sum.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self::new(std::array::from_fn(|i| {
            self.components[i] + other.components[i]
        }))
    }
}

impl<T: Copy + Sub<Output = T>, const N: usize> Vector<T, N> {
    /// Componentwise difference (`self - other`).
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self::new(std::array::from_fn(|i| {
            self.components[i] - other.components[i]
        }))
    }
}

impl<T: Copy + Mul<Output = T>, const N: usize> Vector<T, N> {
    /// Multiply every component by `scalar`.
    #[inline]
    pub fn scale(self, scalar: T) -> Self {
        Self::new(self.components.map(|c| c * scalar))
    }
}

impl<T: Copy + Into<f64>, const N: usize> Vector<T, N> {
    /// Euclidean magnitude: `sqrt(sum(component^2))`.
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.components
            .iter()
            .map(|&c| {
                let c: f64 = c.into();
                c * c
            })
            .sum::<f64>()
            .sqrt()
    }
}
