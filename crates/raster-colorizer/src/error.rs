//! Error types for raster colorization.

use thiserror::Error;

/// Result type alias using ColorizeError.
pub type ColorizeResult<T> = Result<T, ColorizeError>;

/// Errors raised while colorizing or persisting a raster.
#[derive(Debug, Error)]
pub enum ColorizeError {
    // === Input Errors ===
    #[error("Invalid value range: {0}")]
    InvalidRange(String),

    #[error("Invalid palette table: {0}")]
    InvalidPalette(String),

    #[error("Sample array shape mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    // === Internal Errors ===
    #[error("Palette index out of range at row {row}, column {col}")]
    IndexOutOfRange { row: usize, col: usize },

    // === Output Errors ===
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid palette JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ColorizeError {
    /// Whether the error was caused by the caller's input rather than a
    /// failure inside the colorizer or the filesystem.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ColorizeError::InvalidRange(_)
                | ColorizeError::InvalidPalette(_)
                | ColorizeError::ShapeMismatch { .. }
                | ColorizeError::Json(_)
        )
    }
}
