//! Unified error type for the error-diffusion public API.
//!
//! [`DitherError`] wraps the crate's error types into a single enum for
//! convenient `?` propagation in application code.

use thiserror::Error;

use crate::buffer::BufferError;
use crate::color::ParseColorError;
use crate::palette::PaletteError;

/// Unified error type for the error-diffusion public API.
///
/// # Example
///
/// ```
/// use error_diffusion::{DitherError, Palette};
///
/// fn create_palette() -> Result<Palette, DitherError> {
///     let palette = Palette::from_hex(&["#000000", "#FFFFFF"])?;
///     Ok(palette)
/// }
/// ```
#[derive(Debug, Error)]
pub enum DitherError {
    /// Palette configuration error (empty palette or bad hex color)
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
    /// Color parsing error (invalid hex string)
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
    /// Buffer access outside declared dimensions (defensive; indicates a
    /// caller bug, not bad input)
    #[error("buffer error: {0}")]
    Buffer(#[from] BufferError),
}
