//! Error types for the nimbus-synth crate.

use nimbus_field::FieldError;

/// Error type for all fallible operations in the nimbus-synth crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SynthError {
    /// Returned when a coarse grid size is zero or exceeds the output size.
    #[error(
        "invalid dimensions: coarse grid {coarse_rows}x{coarse_cols} must be at least 1x1 and no larger than the output {rows}x{cols}"
    )]
    InvalidDimension {
        /// Coarse generation rows.
        coarse_rows: usize,
        /// Coarse generation columns.
        coarse_cols: usize,
        /// Output rows.
        rows: usize,
        /// Output columns.
        cols: usize,
    },

    /// Returned when explicit weights do not match the scale count.
    #[error("weight count mismatch: {weights} weights for {scales} scales")]
    WeightCountMismatch {
        /// Number of weights supplied.
        weights: usize,
        /// Number of scales configured.
        scales: usize,
    },

    /// Returned when the variability score is outside the open interval
    /// (0, 180), where the weight rule's logarithm is defined.
    #[error("invalid variability score: {vs} (must be in the open interval (0, 180))")]
    InvalidVariabilityScore {
        /// The offending score.
        vs: f64,
    },

    /// Returned when a scale index is zero.
    #[error("invalid scale index: {scale} (must be >= 1)")]
    InvalidScale {
        /// The offending scale index.
        scale: u32,
    },

    /// Returned when weights cannot be normalized to sum 1.
    #[error("degenerate weights: {reason}")]
    DegenerateWeights {
        /// Description of the problem.
        reason: String,
    },

    /// Propagated from field construction or normalization.
    #[error(transparent)]
    Field(#[from] FieldError),
}
