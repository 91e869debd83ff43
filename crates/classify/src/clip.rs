//! Quantile-based clear/cloud classification.

use nimbus_field::{Field, Mask};
use tracing::debug;

use crate::error::ClassifyError;

/// Classifies a field into clear (true) and cloudy (false) pixels so that
/// the clear fraction matches `clear_frac`.
///
/// The threshold is the `clear_frac`-quantile of the pixel distribution;
/// pixels at or below it are clear, pixels strictly above it are cloudy.
/// Thresholding by quantile (rather than by value) is what makes the
/// realized fraction track the target on an arbitrary pixel distribution.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ClassifyError::InvalidClearFraction`] | `clear_frac` outside (0, 1) |
/// | [`ClassifyError::ClearFractionMismatch`] | realized fraction off target by more than 1e-3 relative (heavily tied pixel values) |
pub fn clip_field(field: &Field, clear_frac: f64) -> Result<Mask, ClassifyError> {
    if !clear_frac.is_finite() || clear_frac <= 0.0 || clear_frac >= 1.0 {
        return Err(ClassifyError::InvalidClearFraction { value: clear_frac });
    }

    let quant = field.quantile(clear_frac);
    let flags: Vec<bool> = field.as_slice().iter().map(|&v| v <= quant).collect();
    let mask = Mask::from_vec(field.rows(), field.cols(), flags)?;

    let realized = mask.fraction_set();
    if (realized - clear_frac).abs() > 1e-3 * clear_frac {
        return Err(ClassifyError::ClearFractionMismatch {
            target: clear_frac,
            realized,
        });
    }

    debug!(target_frac = clear_frac, realized, threshold = quant, "field classified");
    Ok(mask)
}
