//! Error types for map generation.

use thiserror::Error;

/// Errors surfaced by the generation pipeline.
///
/// Degenerate geometry is never an error (it falls back to a trivial
/// open layout); these cover genuinely unusable requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// The requested layout would exceed the supported cell count.
    #[error("layout of {width}x{height} exceeds the maximum supported size")]
    LayoutTooLarge { width: i32, height: i32 },

    /// Dimensions that cannot describe a grid at all (zero or negative
    /// after resolution).
    #[error("layout dimensions {width}x{height} are not usable")]
    BadDimensions { width: i32, height: i32 },
}

/// Upper bound on layout cells, checked before allocation so an absurd
/// request surfaces as an error instead of aborting the process.
pub const MAX_LAYOUT_CELLS: u64 = 1 << 24;

/// Validate requested dimensions against [`MAX_LAYOUT_CELLS`].
pub fn check_dimensions(width: i32, height: i32) -> Result<(usize, usize), GenError> {
    if width <= 0 || height <= 0 {
        return Err(GenError::BadDimensions { width, height });
    }
    if (width as u64) * (height as u64) > MAX_LAYOUT_CELLS {
        return Err(GenError::LayoutTooLarge { width, height });
    }
    Ok((width as usize, height as usize))
}
