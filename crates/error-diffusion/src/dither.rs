//! Traversal driver: the [`Ditherer`] builder.
//!
//! [`Ditherer`] owns the read-only collaborators of a dithering pass (the
//! palette, the kernel, and the error gain) and drives the kernel over a
//! [`PixelBuffer`] in a fixed scan order.

use crate::buffer::PixelBuffer;
use crate::error::DitherError;
use crate::kernel::Kernel;
use crate::palette::Palette;
use crate::position::Position;

/// Error-diffusion traversal driver.
///
/// # Design
///
/// - Constructor requires a [`Palette`] (no invalid states; empty palettes
///   are rejected at `Palette` construction, before any traversal)
/// - Configuration methods consume and return `self` (standard builder)
/// - [`dither()`](Self::dither) takes `&self`, so the builder is reusable
///   across multiple buffers
///
/// # Scan order
///
/// Positions are visited in row-major order, rows outer, columns inner,
/// both ascending. The configured kernel's offsets must point strictly
/// forward under this order ([`Kernel::is_causal`]) for diffusion to be
/// causally correct; a non-causal kernel is accepted and applied silently,
/// with its backward contributions landing on already-finalized pixels.
///
/// # Example
///
/// ```
/// use error_diffusion::{Ditherer, Kernel, Palette, PixelBuffer};
///
/// let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
/// let ditherer = Ditherer::new(palette).kernel(Kernel::floyd_steinberg());
///
/// let mut buffer = PixelBuffer::from_rgb_bytes(2, 2, &[128; 12]);
/// ditherer.dither(&mut buffer).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Ditherer {
    palette: Palette,
    kernel: Kernel,
    error_factor: f64,
}

impl Ditherer {
    /// Create a ditherer with the given palette.
    ///
    /// Defaults: Stucki kernel, error factor 1.0.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            kernel: Kernel::stucki(),
            error_factor: 1.0,
        }
    }

    /// Set the diffusion kernel.
    #[inline]
    pub fn kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Set the error gain applied to every propagated compensation.
    ///
    /// 1.0 (the default) diffuses the exact weighted error; values below
    /// under-compensate, values above over-compensate.
    #[inline]
    pub fn error_factor(mut self, factor: f64) -> Self {
        self.error_factor = factor;
        self
    }

    /// The configured palette.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Dither `buffer` in place.
    ///
    /// Visits every position in row-major order (y from 0 to height-1,
    /// and for each y, x from 0 to width-1) and applies the kernel. The
    /// buffer is exclusively owned by this pass for its duration; after
    /// it returns, every pixel holds a palette color.
    ///
    /// # Errors
    ///
    /// Propagates [`BufferError`](crate::BufferError) from defensive
    /// bounds checks; these do not occur with the positions this driver
    /// emits. There is no partial-success mode: either the full traversal
    /// completes or the first error aborts it.
    pub fn dither(&self, buffer: &mut PixelBuffer) -> Result<(), DitherError> {
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                self.kernel.apply(
                    buffer,
                    Position::new(x as i32, y as i32),
                    &self.palette,
                    self.error_factor,
                )?;
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
    fn test_defaults() {
        let ditherer = Ditherer::new(black_white());
        assert_eq!(ditherer.kernel, Kernel::stucki());
        assert!((ditherer.error_factor - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder_chaining() {
        let ditherer = Ditherer::new(black_white())
            .kernel(Kernel::atkinson())
            .error_factor(0.8);
        assert_eq!(ditherer.kernel, Kernel::atkinson());
        assert!((ditherer.error_factor - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_forward_propagation_2x1() {
        // Pixel 0 quantizes to black (error -10 per channel); compensation
        // +10 lands on pixel 1 before it is processed, pushing 250 to 260,
        // clamped to 255, which then quantizes to white.
        let ditherer = Ditherer::new(black_white())
            .kernel(Kernel::from_entries(&[(1, 0, 1)], 1));
        let mut buffer = PixelBuffer::from_rgb_bytes(2, 1, &[10, 10, 10, 250, 250, 250]);
        ditherer.dither(&mut buffer).unwrap();
        assert_eq!(buffer.export(), vec![0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_single_pixel_no_neighbors() {
        let palette = Palette::from_hex(&["#FF0000", "#000000"]).unwrap();
        let ditherer = Ditherer::new(palette);
        let mut buffer = PixelBuffer::from_rgb_bytes(1, 1, &[200, 10, 10]);
        ditherer.dither(&mut buffer).unwrap();
        assert_eq!(buffer.export(), vec![255, 0, 0]);
    }

    #[test]
    fn test_backward_kernel_border_drop() {
        // Kernel points backward only. The first pixel's target (-1, 0) is
        // out of range and silently dropped; the second pixel's real error
        // would land on the finalized first pixel, but here it is zero, so
        // the output equals independent per-pixel quantization.
        let ditherer = Ditherer::new(black_white())
            .kernel(Kernel::from_entries(&[(-1, 0, 1)], 1));
        let mut buffer = PixelBuffer::from_rgb_bytes(2, 1, &[100, 100, 100, 0, 0, 0]);
        ditherer.dither(&mut buffer).unwrap();

        // Independent per-pixel quantization of the same input
        let palette = black_white();
        let expected: Vec<u8> = [[100u8; 3], [0u8; 3]]
            .iter()
            .flat_map(|&c| palette.find_closest(Color::from_bytes(c)).to_bytes())
            .collect();
        assert_eq!(buffer.export(), expected);
    }

    #[test]
    fn test_backward_offset_writes_through_finalized_pixel() {
        // Deliberate carried-over behavior: when a backward target IS in
        // range, the compensation is written onto the already-finalized
        // pixel, leaving a non-palette color in the output. Pixel 1 (grey
        // 100) quantizes to black with error -100; compensation +100 lands
        // on finalized pixel 0 (black), exporting as grey.
        let ditherer = Ditherer::new(black_white())
            .kernel(Kernel::from_entries(&[(-1, 0, 1)], 1));
        let mut buffer = PixelBuffer::from_rgb_bytes(2, 1, &[0, 0, 0, 100, 100, 100]);
        ditherer.dither(&mut buffer).unwrap();
        assert_eq!(buffer.export(), vec![100, 100, 100, 0, 0, 0]);
    }

    #[test]
    fn test_ditherer_reusable() {
        let ditherer = Ditherer::new(black_white());
        let samples = [128u8; 4 * 4 * 3];

        let mut first = PixelBuffer::from_rgb_bytes(4, 4, &samples);
        let mut second = PixelBuffer::from_rgb_bytes(4, 4, &samples);
        ditherer.dither(&mut first).unwrap();
        ditherer.dither(&mut second).unwrap();
        assert_eq!(first.export(), second.export());
    }
}
