//! Error types for the nimbus-field crate.

/// Error type for all fallible operations in the nimbus-field crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FieldError {
    /// Returned when a grid dimension is zero.
    #[error("invalid dimensions: {rows}x{cols} (both must be >= 1)")]
    InvalidDimension {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        cols: usize,
    },

    /// Returned when the backing buffer length does not match rows * cols.
    #[error("data length mismatch: expected {expected} values, got {got}")]
    LengthMismatch {
        /// Expected number of values (rows * cols).
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },

    /// Returned when a pixel value is NaN or infinite.
    #[error("field contains non-finite pixel values")]
    NonFiniteData,

    /// Returned when min-max normalization hits a constant field.
    #[error("degenerate range: field minimum equals field maximum ({value})")]
    DegenerateRange {
        /// The single value the field holds everywhere.
        value: f64,
    },
}
