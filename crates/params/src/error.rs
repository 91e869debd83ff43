//! Error types for the nimbus-params crate.

use nimbus_synth::SynthError;

/// Error type for all fallible operations in the nimbus-params crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParamsError {
    /// Returned when the observed series has no finite samples.
    #[error("observed series has no finite samples")]
    EmptySeries,

    /// Returned when a calibration parameter is out of range.
    #[error("invalid parameter {name} = {value}: {requirement}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
        /// The constraint that was violated.
        requirement: &'static str,
    },

    /// Returned when the weight count does not match the scale count.
    #[error("weight count mismatch: {weights} weights for {scales} scales")]
    WeightCountMismatch {
        /// Number of weights supplied.
        weights: usize,
        /// Number of scales supplied.
        scales: usize,
    },

    /// Returned when weights are negative, non-finite, or do not sum to 1.
    #[error("invalid weights: {reason}")]
    InvalidWeights {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a scale index is zero or the scale list is empty.
    #[error("invalid scales: {reason}")]
    InvalidScales {
        /// Description of the problem.
        reason: String,
    },

    /// Propagated from weight computation during extraction.
    #[error(transparent)]
    Synth(#[from] SynthError),
}
