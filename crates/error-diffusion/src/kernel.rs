//! Error diffusion kernels and the quantize-and-propagate step.
//!
//! A [`Kernel`] is an ordered list of [`DistributionPoint`]s: relative
//! neighbor offsets paired with the fraction of quantization error each
//! neighbor receives. [`Kernel::apply`] performs one full step — quantize
//! the current pixel, finalize it, and push a weighted, negated share of
//! the error into each valid neighbor.
//!
//! # Causality
//!
//! A kernel and the traversal order form a matched pair. Under the
//! row-major scan used by [`Ditherer`](crate::Ditherer), an offset is
//! causally correct only if it points to a position visited *after* the
//! current one: `dy > 0`, or `dy == 0 && dx > 0`. Every named kernel in
//! this module satisfies this; [`Kernel::is_causal`] checks a custom one.
//! A backward offset is accepted silently — the write lands on an
//! already-finalized pixel and the propagated error is effectively lost,
//! which is a correctness bug in the kernel/traversal pairing, not a
//! runtime error.

use crate::buffer::{BufferError, PixelBuffer};
use crate::palette::Palette;
use crate::position::Position;

/// One neighbor relationship in a diffusion kernel.
///
/// `offset` is relative to the position currently being processed;
/// `weight` is the fraction of the quantization error this neighbor
/// receives (already divided by the kernel's divisor).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionPoint {
    /// Offset from the current position (either coordinate may be negative).
    pub offset: Position,
    /// Fraction of error diffused to this neighbor.
    pub weight: f64,
}

impl DistributionPoint {
    /// Create a distribution point.
    #[inline]
    pub const fn new(offset: Position, weight: f64) -> Self {
        Self { offset, weight }
    }
}

/// An error diffusion kernel: an immutable ordered list of
/// [`DistributionPoint`]s.
///
/// The point order does not affect the numeric result (each neighbor is
/// independent) but is preserved for deterministic, reproducible
/// application.
///
/// # Example
///
/// ```
/// use error_diffusion::Kernel;
///
/// let stucki = Kernel::stucki();
/// assert_eq!(stucki.points().len(), 12);
/// assert!((stucki.weight_sum() - 1.0).abs() < 1e-12);
/// assert!(stucki.is_causal());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    points: Vec<DistributionPoint>,
}

impl Kernel {
    /// Create a kernel from an ordered list of distribution points.
    pub fn new(points: Vec<DistributionPoint>) -> Self {
        Self { points }
    }

    /// Create a kernel from `(dx, dy, numerator)` entries over a common
    /// divisor, the conventional notation for published kernels.
    ///
    /// Each entry becomes a point with `weight = numerator / divisor`.
    pub fn from_entries(entries: &[(i32, i32, u32)], divisor: u32) -> Self {
        let divisor = f64::from(divisor);
        Self::new(
            entries
                .iter()
                .map(|&(dx, dy, num)| {
                    DistributionPoint::new(Position::new(dx, dy), f64::from(num) / divisor)
                })
                .collect(),
        )
    }

    /// The distribution points, in application order.
    #[inline]
    pub fn points(&self) -> &[DistributionPoint] {
        &self.points
    }

    /// Total fraction of error this kernel propagates.
    ///
    /// 1.0 for full-propagation kernels; Atkinson intentionally sums to
    /// 0.75, losing a quarter of the error to reduce bleeding.
    pub fn weight_sum(&self) -> f64 {
        self.points.iter().map(|p| p.weight).sum()
    }

    /// Whether every offset points strictly forward in row-major scan
    /// order (`dy > 0`, or `dy == 0 && dx > 0`).
    ///
    /// Non-causal kernels are still applied without complaint; this
    /// predicate exists so callers can detect the mispairing up front.
    pub fn is_causal(&self) -> bool {
        self.points
            .iter()
            .all(|p| p.offset.y() > 0 || (p.offset.y() == 0 && p.offset.x() > 0))
    }

    /// Stucki kernel: 12 neighbors over 3 rows, divisor 42, 100%
    /// propagation. Higher center weights than Jarvis-Judice-Ninke give
    /// slightly sharper results.
    ///
    /// ```text
    ///            X   8   4
    ///    2   4   8   4   2
    ///    1   2   4   2   1
    /// ```
    pub fn stucki() -> Self {
        Self::from_entries(
            &[
                (1, 0, 8),
                (2, 0, 4),
                (-2, 1, 2),
                (-1, 1, 4),
                (0, 1, 8),
                (1, 1, 4),
                (2, 1, 2),
                (-2, 2, 1),
                (-1, 2, 2),
                (0, 2, 4),
                (1, 2, 2),
                (2, 2, 1),
            ],
            42,
        )
    }

    /// Floyd-Steinberg kernel: 4 neighbors, divisor 16, 100% propagation.
    /// The most widely known error diffusion kernel.
    ///
    /// ```text
    ///        X   7
    ///    3   5   1
    /// ```
    pub fn floyd_steinberg() -> Self {
        Self::from_entries(&[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)], 16)
    }

    /// Atkinson kernel: 6 neighbors, divisor 8, 75% propagation.
    /// The deliberately lost quarter of the error reduces bleeding with
    /// small palettes.
    ///
    /// ```text
    ///        X   1   1
    ///    1   1   1
    ///        1
    /// ```
    pub fn atkinson() -> Self {
        Self::from_entries(
            &[(1, 0, 1), (2, 0, 1), (-1, 1, 1), (0, 1, 1), (1, 1, 1), (0, 2, 1)],
            8,
        )
    }

    /// Jarvis-Judice-Ninke kernel: 12 neighbors over 3 rows, divisor 48,
    /// 100% propagation. Smoother gradients than Floyd-Steinberg at the
    /// cost of a larger neighborhood.
    ///
    /// ```text
    ///            X   7   5
    ///    3   5   7   5   3
    ///    1   3   5   3   1
    /// ```
    pub fn jarvis_judice_ninke() -> Self {
        Self::from_entries(
            &[
                (1, 0, 7),
                (2, 0, 5),
                (-2, 1, 3),
                (-1, 1, 5),
                (0, 1, 7),
                (1, 1, 5),
                (2, 1, 3),
                (-2, 2, 1),
                (-1, 2, 3),
                (0, 2, 5),
                (1, 2, 3),
                (2, 2, 1),
            ],
            48,
        )
    }

    /// Sierra (full) kernel: 10 neighbors over 3 rows, divisor 32, 100%
    /// propagation.
    ///
    /// ```text
    ///            X   5   3
    ///    2   4   5   4   2
    ///        2   3   2
    /// ```
    pub fn sierra() -> Self {
        Self::from_entries(
            &[
                (1, 0, 5),
                (2, 0, 3),
                (-2, 1, 2),
                (-1, 1, 4),
                (0, 1, 5),
                (1, 1, 4),
                (2, 1, 2),
                (-1, 2, 2),
                (0, 2, 3),
                (1, 2, 2),
            ],
            32,
        )
    }

    /// Sierra Two-Row kernel: 7 neighbors over 2 rows, divisor 16, 100%
    /// propagation. A faster approximation of the full Sierra kernel.
    ///
    /// ```text
    ///            X   4   3
    ///    1   2   3   2   1
    /// ```
    pub fn sierra_two_row() -> Self {
        Self::from_entries(
            &[
                (1, 0, 4),
                (2, 0, 3),
                (-2, 1, 1),
                (-1, 1, 2),
                (0, 1, 3),
                (1, 1, 2),
                (2, 1, 1),
            ],
            16,
        )
    }

    /// Sierra Lite kernel: 3 neighbors, divisor 4, 100% propagation.
    /// The fastest Sierra variant.
    ///
    /// ```text
    ///    X   2
    ///    1   1
    /// ```
    pub fn sierra_lite() -> Self {
        Self::from_entries(&[(1, 0, 2), (-1, 1, 1), (0, 1, 1)], 4)
    }

    /// Burkes kernel: 7 neighbors over 2 rows, divisor 32, 100%
    /// propagation. A two-row simplification of Stucki.
    ///
    /// ```text
    ///            X   8   4
    ///    2   4   8   4   2
    /// ```
    pub fn burkes() -> Self {
        Self::from_entries(
            &[
                (1, 0, 8),
                (2, 0, 4),
                (-2, 1, 2),
                (-1, 1, 4),
                (0, 1, 8),
                (1, 1, 4),
                (2, 1, 2),
            ],
            32,
        )
    }

    /// Quantize the pixel at `at` and propagate its error.
    ///
    /// The step, atomic with respect to the buffer it mutates:
    ///
    /// 1. Read the *current* (possibly already error-adjusted) color.
    /// 2. Find the closest palette entry.
    /// 3. Write it back, finalizing the pixel.
    /// 4. `error = quantized - root`.
    /// 5. For each point, add `error * (-weight * error_factor)` to the
    ///    neighbor at `at + offset`, clamped to the byte range. Targets
    ///    outside the buffer are silently dropped: diffusion energy is
    ///    lost at image borders by design, not an error.
    ///
    /// The compensation is the *negative* of the weighted error: if
    /// quantization rounded this pixel up, neighbors are pushed down,
    /// preserving average tone across the neighborhood. `error_factor`
    /// is a gain on that compensation (1.0 = exact).
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] only if `at` itself is outside
    /// the buffer; neighbor targets are pre-validated and never fail.
    pub fn apply(
        &self,
        buffer: &mut PixelBuffer,
        at: Position,
        palette: &Palette,
        error_factor: f64,
    ) -> Result<(), BufferError> {
        let root = buffer.get(at)?;
        let quantized = palette.find_closest(root);
        buffer.set(at, quantized)?;

        let error = quantized.sub(root);

        for point in &self.points {
            let compensation = error.scale(-point.weight * error_factor);
            let target = at.translate(point.offset);
            if target.is_valid(buffer.width(), buffer.height()) {
                let old = buffer.get(target)?;
                buffer.set(target, old.add(compensation).clamp_to_byte_range())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn black_white() -> Palette {
        Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap()
    }

    #[test]
    fn test_stucki_weights() {
        let k = Kernel::stucki();
        assert_eq!(k.points().len(), 12, "Stucki should have 12 points");
        assert!(
            (k.weight_sum() - 1.0).abs() < 1e-12,
            "Stucki should propagate 100% of error (42/42)"
        );
        // First point is the immediate right neighbor at 8/42
        assert_eq!(k.points()[0].offset, Position::new(1, 0));
        assert!((k.points()[0].weight - 8.0 / 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_floyd_steinberg_weights() {
        let k = Kernel::floyd_steinberg();
        assert_eq!(k.points().len(), 4);
        assert!((k.weight_sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_atkinson_propagates_75_percent() {
        let k = Kernel::atkinson();
        assert_eq!(k.points().len(), 6);
        assert!(
            (k.weight_sum() - 0.75).abs() < 1e-12,
            "Atkinson should propagate 75% of error (6/8)"
        );
    }

    #[test]
    fn test_remaining_catalog_weights() {
        for (kernel, points, sum) in [
            (Kernel::jarvis_judice_ninke(), 12, 1.0),
            (Kernel::sierra(), 10, 1.0),
            (Kernel::sierra_two_row(), 7, 1.0),
            (Kernel::sierra_lite(), 3, 1.0),
            (Kernel::burkes(), 7, 1.0),
        ] {
            assert_eq!(kernel.points().len(), points);
            assert!((kernel.weight_sum() - sum).abs() < 1e-12);
        }
    }

    #[test]
    fn test_catalog_is_causal() {
        // Every named kernel must be valid under row-major traversal.
        for kernel in [
            Kernel::stucki(),
            Kernel::floyd_steinberg(),
            Kernel::atkinson(),
            Kernel::jarvis_judice_ninke(),
            Kernel::sierra(),
            Kernel::sierra_two_row(),
            Kernel::sierra_lite(),
            Kernel::burkes(),
        ] {
            assert!(kernel.is_causal());
        }
    }

    #[test]
    fn test_is_causal_rejects_backward_offsets() {
        let backward = Kernel::from_entries(&[(-1, 0, 1)], 1);
        assert!(!backward.is_causal());

        let upward = Kernel::from_entries(&[(0, -1, 1)], 1);
        assert!(!upward.is_causal());

        let self_offset = Kernel::from_entries(&[(0, 0, 1)], 1);
        assert!(!self_offset.is_causal(), "zero offset points at the current pixel");
    }

    #[test]
    fn test_apply_finalizes_pixel_to_palette_color() {
        let mut buf = PixelBuffer::from_rgb_bytes(2, 1, &[200, 200, 200, 0, 0, 0]);
        let kernel = Kernel::from_entries(&[(1, 0, 1)], 1);
        kernel
            .apply(&mut buf, Position::new(0, 0), &black_white(), 1.0)
            .unwrap();
        assert_eq!(
            buf.get(Position::new(0, 0)).unwrap(),
            Color::new(255.0, 255.0, 255.0)
        );
    }

    #[test]
    fn test_apply_negates_weighted_error() {
        // Pixel quantizes up (200 -> 255, error +55); the neighbor must be
        // pushed down by the full weighted error.
        let mut buf = PixelBuffer::from_rgb_bytes(2, 1, &[200, 200, 200, 100, 100, 100]);
        let kernel = Kernel::from_entries(&[(1, 0, 1)], 1);
        kernel
            .apply(&mut buf, Position::new(0, 0), &black_white(), 1.0)
            .unwrap();
        assert_eq!(
            buf.get(Position::new(1, 0)).unwrap(),
            Color::new(45.0, 45.0, 45.0)
        );
    }

    #[test]
    fn test_apply_error_factor_scales_compensation() {
        let mut buf = PixelBuffer::from_rgb_bytes(2, 1, &[200, 200, 200, 100, 100, 100]);
        let kernel = Kernel::from_entries(&[(1, 0, 1)], 1);
        kernel
            .apply(&mut buf, Position::new(0, 0), &black_white(), 0.5)
            .unwrap();
        // Half the compensation: 100 - 55/2 = 72.5
        assert_eq!(
            buf.get(Position::new(1, 0)).unwrap(),
            Color::new(72.5, 72.5, 72.5)
        );
    }

    #[test]
    fn test_apply_drops_out_of_bounds_targets() {
        // Single pixel, Stucki: every target is outside the buffer.
        let mut buf = PixelBuffer::from_rgb_bytes(1, 1, &[200, 10, 10]);
        let palette = Palette::from_hex(&["#FF0000", "#000000"]).unwrap();
        Kernel::stucki()
            .apply(&mut buf, Position::new(0, 0), &palette, 1.0)
            .unwrap();
        assert_eq!(buf.export(), vec![255, 0, 0]);
    }

    #[test]
    fn test_apply_clamps_neighbor_adjustment() {
        // Neighbor near white pushed further up must clamp at 255.
        let mut buf = PixelBuffer::from_rgb_bytes(2, 1, &[10, 10, 10, 250, 250, 250]);
        let kernel = Kernel::from_entries(&[(1, 0, 1)], 1);
        kernel
            .apply(&mut buf, Position::new(0, 0), &black_white(), 1.0)
            .unwrap();
        // error = -10, compensation = +10; 250 + 10 clamps to 255
        assert_eq!(
            buf.get(Position::new(1, 0)).unwrap(),
            Color::new(255.0, 255.0, 255.0)
        );
    }

    #[test]
    fn test_apply_at_out_of_bounds_position() {
        let mut buf = PixelBuffer::from_rgb_bytes(1, 1, &[0, 0, 0]);
        let result = Kernel::stucki().apply(&mut buf, Position::new(5, 0), &black_white(), 1.0);
        assert!(matches!(result, Err(BufferError::OutOfBounds { .. })));
    }
}
