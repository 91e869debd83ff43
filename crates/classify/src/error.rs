//! Error types for the nimbus-classify crate.

use nimbus_field::FieldError;

/// Error type for all fallible operations in the nimbus-classify crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassifyError {
    /// Returned when the target clear fraction is outside (0, 1).
    #[error("invalid clear fraction: {value} (must be in the open interval (0, 1))")]
    InvalidClearFraction {
        /// The offending fraction.
        value: f64,
    },

    /// Returned when quantile classification misses the target fraction by
    /// more than the relative tolerance of 1e-3. On a continuous-valued
    /// field this indicates a statistical bug upstream, so it is surfaced
    /// rather than accepted.
    #[error(
        "clear fraction mismatch: target {target}, realized {realized} (relative tolerance 1e-3)"
    )]
    ClearFractionMismatch {
        /// Requested clear fraction.
        target: f64,
        /// Fraction of pixels actually classified clear.
        realized: f64,
    },

    /// Returned when the smoothing window size is zero.
    #[error("invalid smoothing window: {size} (must be >= 1)")]
    InvalidWindow {
        /// The offending window size.
        size: usize,
    },

    /// Returned when the mask has no clear/cloud boundary, so no edge band
    /// can be derived.
    #[error("no edge signal: the mask has no clear/cloud boundary")]
    NoEdgeSignal,

    /// Propagated from field construction.
    #[error(transparent)]
    Field(#[from] FieldError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_clear_fraction() {
        let e = ClassifyError::InvalidClearFraction { value: 1.5 };
        assert_eq!(
            e.to_string(),
            "invalid clear fraction: 1.5 (must be in the open interval (0, 1))"
        );
    }

    #[test]
    fn error_clear_fraction_mismatch() {
        let e = ClassifyError::ClearFractionMismatch {
            target: 0.4,
            realized: 0.9,
        };
        assert_eq!(
            e.to_string(),
            "clear fraction mismatch: target 0.4, realized 0.9 (relative tolerance 1e-3)"
        );
    }

    #[test]
    fn error_invalid_window() {
        let e = ClassifyError::InvalidWindow { size: 0 };
        assert_eq!(e.to_string(), "invalid smoothing window: 0 (must be >= 1)");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ClassifyError>();
    }
}
