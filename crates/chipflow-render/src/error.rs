//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while producing rasters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Invalid raster dimensions (zero width or height).
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Raw pixel data does not match the requested dimensions.
    #[error("invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
