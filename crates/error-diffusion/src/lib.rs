//! error-diffusion: dithering against a fixed color palette
//!
//! This library reduces a full-color raster image to a small fixed palette
//! while visually preserving tone and detail, by propagating each pixel's
//! quantization error into neighboring not-yet-finalized pixels.
//!
//! # Quick Start
//!
//! The [`Ditherer`] builder is the primary entry point:
//!
//! ```
//! use error_diffusion::{Ditherer, Kernel, Palette, PixelBuffer};
//!
//! let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
//! let ditherer = Ditherer::new(palette).kernel(Kernel::stucki());
//!
//! // 2x2 mid-grey image, interleaved RGB bytes
//! let mut buffer = PixelBuffer::from_rgb_bytes(2, 2, &[128; 12]);
//! ditherer.dither(&mut buffer).unwrap();
//!
//! // Every output pixel is now a palette color
//! let rgb = buffer.export();
//! assert_eq!(rgb.len(), 2 * 2 * 3);
//! ```
//!
//! # How Error Diffusion Works
//!
//! The buffer is traversed in row-major order. At each position the engine:
//!
//! 1. Reads the *current* color — which may already carry adjustments
//!    diffused from earlier pixels.
//! 2. Replaces it with the closest palette entry, finalizing the pixel.
//! 3. Computes the quantization error (`quantized - original`).
//! 4. Pushes a weighted, *negated* fraction of that error into each
//!    neighbor named by the kernel, clamped to the byte range. If
//!    quantization brightened this pixel, its neighbors are darkened, so
//!    average tone is preserved across the neighborhood.
//!
//! Contributions aimed outside the image are silently dropped: diffusion
//! energy is lost at borders by design.
//!
//! # The Causality Invariant
//!
//! Kernel offsets must point only at positions the traversal has not yet
//! visited (`dy > 0`, or `dy == 0 && dx > 0` under row-major order).
//! Diffusion is causally correct only then: the adjustment takes effect
//! before the target pixel is quantized. A backward offset instead writes
//! onto an already-finalized pixel — accepted silently, but a correctness
//! bug in the kernel/traversal pairing. [`Kernel::is_causal`] lets callers
//! check a custom kernel; every kernel in the built-in catalog is causal.
//!
//! The same read-after-write dependency chain is why the pass is strictly
//! sequential: the color read at position P may have been written while
//! processing any earlier position whose kernel reaches P. Naive per-pixel
//! parallelism is therefore unsafe; only wavefront scheduling that
//! respects the invariant could parallelize this, and none is attempted.
//!
//! # Kernels
//!
//! Eight classic kernels are built in: Stucki (the default),
//! Floyd-Steinberg, Atkinson, Jarvis-Judice-Ninke, the Sierra family
//! (full, two-row, lite), and Burkes. Custom kernels can be built with
//! [`Kernel::from_entries`] from the conventional numerator/divisor
//! notation.
//!
//! # Scope
//!
//! The crate is a pure function from (pixels, palette, kernel, gain) to
//! pixels. Decoding and encoding image files, palette selection, and any
//! CLI layer live with the caller — [`PixelBuffer`] speaks interleaved
//! 8-bit RGB bytes at both ends.

pub mod buffer;
pub mod color;
pub mod dither;
pub mod error;
pub mod kernel;
pub mod palette;
pub mod position;
pub mod vector;


pub use buffer::{BufferError, PixelBuffer};
pub use color::{Color, ParseColorError};
pub use dither::Ditherer;
pub use error::DitherError;
pub use kernel::{DistributionPoint, Kernel};
pub use palette::{Palette, PaletteError};
pub use position::Position;
pub use vector::Vector;
