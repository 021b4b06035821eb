//! Palette type and nearest-color quantization.
//!
//! A [`Palette`] is a non-empty *ordered* sequence of colors. Order is
//! meaningful: when two entries are equidistant from an input color, the
//! earlier entry wins. Callers that care about tie-breaking (and dithered
//! output is sensitive to it) should treat palette order as part of their
//! configuration.

use std::str::FromStr;

use thiserror::Error;

use crate::color::{Color, ParseColorError};

/// Error type for palette construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No colors provided. There is no defined "closest color" in an empty
    /// palette, so this is rejected before any traversal begins.
    #[error("palette cannot be empty")]
    Empty,
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}

/// A non-empty ordered sequence of target colors.
///
/// Duplicate entries are permitted; the strict-less-than comparison in
/// [`find_closest`](Self::find_closest) means the first occurrence always
/// wins, so duplicates are harmless.
///
/// # Example
///
/// ```
/// use error_diffusion::{Color, Palette};
///
/// let palette = Palette::new(vec![
///     Color::new(0.0, 0.0, 0.0),
///     Color::new(255.0, 255.0, 255.0),
/// ]).unwrap();
/// assert_eq!(palette.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Create a palette from an ordered sequence of colors.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Empty`] if `colors` is empty.
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Create a palette from hex color strings.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] if any hex string is invalid,
    /// or [`PaletteError::Empty`] for an empty sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use error_diffusion::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000000", "#FFFFFF", "#FF0000"]).unwrap();
    /// assert_eq!(palette.len(), 3);
    /// ```
    pub fn from_hex(hex: &[&str]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .map(|s| Color::from_str(s).map_err(PaletteError::from))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`: empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The palette entries, in order.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Find the palette entry closest to `color` in Euclidean RGB distance.
    ///
    /// Entries are scanned in order with a **strict** less-than comparison
    /// against the running minimum, so the *first* entry achieving the
    /// minimum distance wins on ties. This stable, order-dependent
    /// tie-break is part of the contract: palette ordering is a meaningful
    /// input.
    ///
    /// NaN policy: the first entry is the initial incumbent, and a NaN
    /// distance never satisfies `dist < best`, so NaN-valued input pixels
    /// quantize to the first entry and a NaN-distance entry never wins.
    ///
    /// # Example
    ///
    /// ```
    /// use error_diffusion::{Color, Palette};
    ///
    /// let palette = Palette::new(vec![
    ///     Color::new(0.0, 0.0, 0.0),
    ///     Color::new(255.0, 255.0, 255.0),
    /// ]).unwrap();
    ///
    /// // Equidistant from both entries: the earlier one wins.
    /// let grey = Color::new(127.5, 127.5, 127.5);
    /// assert_eq!(palette.find_closest(grey), Color::new(0.0, 0.0, 0.0));
    /// ```
    pub fn find_closest(&self, color: Color) -> Color {
        // Non-emptiness is guaranteed at construction.
        let mut best = self.colors[0];
        let mut best_dist = best.sub(color).magnitude();

        for &option in &self.colors[1..] {
            let dist = option.sub(color).magnitude();
            if dist < best_dist {
                best_dist = dist;
                best = option;
            }
        }

        best
    }
}
