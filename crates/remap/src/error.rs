//! Error types for the nimbus-remap crate.

use nimbus_field::FieldError;

/// Error type for all fallible operations in the nimbus-remap crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemapError {
    /// Returned when a distribution needed for rescaling collapses, for
    /// example an all-clear field or a zero-mean cloud distribution.
    #[error("degenerate distribution: {quantity}")]
    DegenerateDistribution {
        /// Which intermediate quantity collapsed.
        quantity: String,
    },

    /// Returned when a mask does not match the field dimensions.
    #[error("mask size {got:?} does not match field size {expected:?}")]
    MaskDimensionMismatch {
        /// Field dimensions `(rows, cols)`.
        expected: (usize, usize),
        /// Mask dimensions `(rows, cols)`.
        got: (usize, usize),
    },

    /// Returned when a remap configuration fails validation.
    #[error("invalid remap configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Propagated from field construction.
    #[error(transparent)]
    Field(#[from] FieldError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_degenerate_distribution() {
        let e = RemapError::DegenerateDistribution {
            quantity: "non-clear pixel range".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "degenerate distribution: non-clear pixel range"
        );
    }

    #[test]
    fn error_mask_dimension_mismatch() {
        let e = RemapError::MaskDimensionMismatch {
            expected: (4, 4),
            got: (4, 5),
        };
        assert_eq!(e.to_string(), "mask size (4, 5) does not match field size (4, 4)");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<RemapError>();
    }
}
