//! Mean-shift remapping of a normalized field.

use nimbus_field::Field;
use tracing::info;

use crate::config::ShiftMeanConfig;
use crate::error::RemapError;
use crate::result::RemapResult;

/// Rescales a normalized field into the clear-sky-index range and shifts
/// the cloudy-pixel mean so the global mean matches `ktmean`.
///
/// Pixels at exactly 1.0 are treated as clear and pinned; the rescale range
/// comes from robust quantiles of the pixels below 1.0 so single outliers
/// cannot stretch the whole distribution. After rescaling into
/// `[ktmin, 1]`, the cloudy pixels get a common multiplier chosen so the
/// global mean equals `ktmean`. When the clear pixels alone already exceed
/// the target budget the multiplier is skipped and the mean overshoots;
/// the caller can read both means off the returned [`RemapResult`].
///
/// The multiplier can push individual cloudy pixels back above 1.0. They
/// are deliberately not re-clipped, as clipping would break the exact mean.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`RemapError::InvalidConfig`] | `config` fails validation |
/// | [`RemapError::DegenerateDistribution`] | no pixels below 1.0, or their quantile range collapses |
pub fn shift_mean_lave(
    field: &Field,
    ktmean: f64,
    config: &ShiftMeanConfig,
) -> Result<RemapResult, RemapError> {
    config.validate()?;

    let nonclear: Vec<f64> = field
        .as_slice()
        .iter()
        .copied()
        .filter(|&v| v < 1.0)
        .collect();
    if nonclear.is_empty() {
        return Err(RemapError::DegenerateDistribution {
            quantity: "no pixels below 1.0 to rescale".to_string(),
        });
    }
    let sorted = nimbus_stats::sorted_copy(&nonclear);
    let field_min = nimbus_stats::quantile_linear(&sorted, config.min_quant());
    let field_max = nimbus_stats::quantile_linear(&sorted, config.max_quant());
    let range = field_max - field_min;
    if range == 0.0 {
        return Err(RemapError::DegenerateDistribution {
            quantity: format!("non-clear pixel range collapsed at {field_max}"),
        });
    }

    let ktmin = config.ktmin();
    let scaled = field.map(|v| ((v - field_min) / range * (1.0 - ktmin) + ktmin).clamp(0.0, 1.0));

    // After clamping, "clear" means exactly 1.0 and "cloudy" means < 1.0.
    let clear_count = scaled.as_slice().iter().filter(|&&v| v == 1.0).count();
    let cloudy: Vec<f64> = scaled
        .as_slice()
        .iter()
        .copied()
        .filter(|&v| v < 1.0)
        .collect();
    if cloudy.is_empty() {
        return Err(RemapError::DegenerateDistribution {
            quantity: "every pixel rescaled to 1.0".to_string(),
        });
    }

    let diff_sum = scaled.len() as f64 * ktmean - clear_count as f64;
    let tgt_cloud_mean = diff_sum / cloudy.len() as f64;
    let current_cloud_mean = nimbus_stats::mean(&cloudy);

    let out = if diff_sum > 0.0 {
        if current_cloud_mean == 0.0 {
            return Err(RemapError::DegenerateDistribution {
                quantity: "cloudy pixel mean is zero".to_string(),
            });
        }
        let factor = tgt_cloud_mean / current_cloud_mean;
        scaled.map(|v| if v == 1.0 { v } else { factor * v })
    } else {
        scaled
    };

    let result = RemapResult::new(out, ktmean);
    info!(
        target_mean = result.target_mean(),
        achieved_mean = result.achieved_mean(),
        clear_count,
        "mean-shift remap complete"
    );
    Ok(result)
}
