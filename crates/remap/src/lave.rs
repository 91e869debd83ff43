//! Exact mean-matching remap with cloud-edge enhancement.

use nimbus_field::{Field, Mask};
use nimbus_params::CalibrationParameters;
use tracing::info;

use crate::config::LaveScalingConfig;
use crate::error::RemapError;
use crate::result::RemapResult;

/// Remaps a normalized field onto the observed clear-sky-index
/// distribution, with cloud enhancement along the clear/cloud boundary.
///
/// The field is inverted into a cloud-attenuation distribution anchored at
/// the observed 1st percentile: the darkest synthetic cloud lands near
/// `kt1pct` and thin cloud near 1. A separate enhancement distribution
/// scales the same shape into `[1, ktmax]`. The pixels are then assigned by
/// class:
///
/// - clear pixels are exactly 1.0 (clear wins over edge),
/// - edge pixels take the enhancement value,
/// - interior cloudy pixels take the attenuation value, multiplied by a
///   common factor chosen so the global mean equals `ktmean`.
///
/// As with [`shift_mean_lave`](crate::shift_mean_lave), the factor is
/// skipped when the clear and enhanced pixels alone exceed the mean budget.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`RemapError::InvalidConfig`] | `config` fails validation |
/// | [`RemapError::MaskDimensionMismatch`] | a mask does not match the field size |
/// | [`RemapError::DegenerateDistribution`] | no non-clear pixels, a zero field maximum, a collapsed attenuation distribution, or no interior cloudy pixels |
pub fn lave_scaling_exact(
    field: &Field,
    clear_mask: &Mask,
    edge_mask: &Mask,
    params: &CalibrationParameters,
    config: &LaveScalingConfig,
) -> Result<RemapResult, RemapError> {
    config.validate()?;
    for mask in [clear_mask, edge_mask] {
        if mask.size() != field.size() {
            return Err(RemapError::MaskDimensionMismatch {
                expected: field.size(),
                got: mask.size(),
            });
        }
    }

    let nonclear = field.masked_values(clear_mask, false);
    if nonclear.is_empty() {
        return Err(RemapError::DegenerateDistribution {
            quantity: "no non-clear pixels".to_string(),
        });
    }
    let sorted = nimbus_stats::sorted_copy(&nonclear);
    let field_max = nimbus_stats::quantile_linear(&sorted, config.max_quant());
    if field_max <= 0.0 {
        return Err(RemapError::DegenerateDistribution {
            quantity: format!("non-clear field maximum is {field_max}"),
        });
    }

    // Flip into an attenuation distribution: the strongest synthetic signal
    // maps near kt1pct, the weakest near 1.
    let kt1pct = params.kt1pct();
    let clouds = field.map(|v| (1.0 - v * (1.0 - kt1pct) / field_max).clamp(0.0, 1.0));

    let mean_c = clouds.mean();
    if mean_c == 0.0 {
        return Err(RemapError::DegenerateDistribution {
            quantity: "attenuation distribution mean is zero".to_string(),
        });
    }
    let nmin = clouds.min() / mean_c;
    let nrange = clouds.max() / mean_c - nmin;
    if nrange == 0.0 {
        return Err(RemapError::DegenerateDistribution {
            quantity: "attenuation distribution has no spread".to_string(),
        });
    }

    // Same shape rescaled into [1, ktmax].
    let ktmax = params.ktmax();
    let enhancement = clouds.map(|v| 1.0 + (v / mean_c - nmin) / nrange * (ktmax - 1.0));

    // Budget the mean: clear pixels contribute 1.0 each and enhanced edge
    // pixels their enhancement value; the interior cloudy pixels absorb the
    // remainder.
    let ktmean = params.ktmean();
    let mut enhanced_sum = 0.0;
    let mut plain_sum = 0.0;
    let mut plain_count = 0usize;
    for (i, (&clear, &edge)) in clear_mask
        .as_slice()
        .iter()
        .zip(edge_mask.as_slice())
        .enumerate()
    {
        if clear {
            continue;
        }
        if edge {
            enhanced_sum += enhancement.as_slice()[i];
        } else {
            plain_sum += clouds.as_slice()[i];
            plain_count += 1;
        }
    }
    if plain_count == 0 {
        return Err(RemapError::DegenerateDistribution {
            quantity: "no interior cloudy pixels".to_string(),
        });
    }

    let clear_count = clear_mask.count_set();
    let diff_sum = field.len() as f64 * ktmean - clear_count as f64 - enhanced_sum;
    let tgt_cloud_mean = diff_sum / plain_count as f64;
    let current_cloud_mean = plain_sum / plain_count as f64;

    let scaled_clouds = if diff_sum > 0.0 {
        if current_cloud_mean == 0.0 {
            return Err(RemapError::DegenerateDistribution {
                quantity: "interior cloudy pixel mean is zero".to_string(),
            });
        }
        let factor = tgt_cloud_mean / current_cloud_mean;
        clouds.map(|v| factor * v)
    } else {
        clouds
    };

    let data: Vec<f64> = scaled_clouds
        .as_slice()
        .iter()
        .zip(enhancement.as_slice())
        .zip(clear_mask.as_slice().iter().zip(edge_mask.as_slice()))
        .map(|((&cloud, &enhanced), (&clear, &edge))| {
            if clear {
                1.0
            } else if edge {
                enhanced
            } else {
                cloud
            }
        })
        .collect();
    let (rows, cols) = field.size();
    let out = Field::from_vec(rows, cols, data)?;

    let result = RemapResult::new(out, ktmean);
    info!(
        target_mean = result.target_mean(),
        achieved_mean = result.achieved_mean(),
        clear_count,
        edge_count = edge_mask.count_set(),
        plain_count,
        "exact remap complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(ktmean: f64) -> CalibrationParameters {
        CalibrationParameters::new(ktmean, 0.2, 1.4, 0.25, 40.0, vec![1], None).unwrap()
    }

    /// 2x2 scene: (0,0) is clear and on the boundary, (0,1) is a boundary
    /// cloud, the bottom row is interior cloud.
    fn scene() -> (Field, Mask, Mask) {
        let field = Field::from_vec(2, 2, vec![0.5, 0.4, 0.3, 0.2]).unwrap();
        let clear = Mask::from_fn(2, 2, |r, c| r == 0 && c == 0);
        let edge = Mask::from_fn(2, 2, |r, _| r == 0);
        (field, clear, edge)
    }

    #[test]
    fn clear_overrides_edge_enhancement() {
        let (field, clear, edge) = scene();
        let r =
            lave_scaling_exact(&field, &clear, &edge, &params(0.7), &LaveScalingConfig::new())
                .unwrap();
        assert_eq!(r.field().get(0, 0), 1.0);
    }

    #[test]
    fn edge_pixels_are_enhanced() {
        let (field, clear, edge) = scene();
        let r =
            lave_scaling_exact(&field, &clear, &edge, &params(0.7), &LaveScalingConfig::new())
                .unwrap();
        // A boundary cloud sees enhanced irradiance.
        assert!(r.field().get(0, 1) > 1.0);
        assert!(r.field().get(0, 1) <= 1.4);
    }

    #[test]
    fn interior_pixels_balance_the_mean() {
        let (field, clear, edge) = scene();
        let r =
            lave_scaling_exact(&field, &clear, &edge, &params(0.7), &LaveScalingConfig::new())
                .unwrap();
        assert_relative_eq!(r.achieved_mean(), 0.7, epsilon = 1e-9);
        assert!(r.field().get(1, 0) < 1.0);
        assert!(r.field().get(1, 1) < 1.0);
        // Darker synthetic signal stays darker after attenuation.
        assert!(r.field().get(1, 0) < r.field().get(1, 1));
    }

    #[test]
    fn negative_budget_skips_multiplier() {
        let (field, clear, edge) = scene();
        let r =
            lave_scaling_exact(&field, &clear, &edge, &params(0.3), &LaveScalingConfig::new())
                .unwrap();
        assert!(r.achieved_mean() > r.target_mean());
        // Unscaled attenuation values stay within [0, 1].
        assert!((0.0..=1.0).contains(&r.field().get(1, 0)));
        assert!((0.0..=1.0).contains(&r.field().get(1, 1)));
    }

    #[test]
    fn all_clear_mask_errors() {
        let (field, _, edge) = scene();
        let clear = Mask::from_fn(2, 2, |_, _| true);
        let err =
            lave_scaling_exact(&field, &clear, &edge, &params(0.7), &LaveScalingConfig::new())
                .unwrap_err();
        assert!(matches!(err, RemapError::DegenerateDistribution { .. }));
    }

    #[test]
    fn zero_field_errors() {
        let field = Field::filled(2, 2, 0.0).unwrap();
        let clear = Mask::from_fn(2, 2, |_, _| false);
        let edge = Mask::from_fn(2, 2, |_, _| false);
        let err =
            lave_scaling_exact(&field, &clear, &edge, &params(0.7), &LaveScalingConfig::new())
                .unwrap_err();
        assert!(matches!(err, RemapError::DegenerateDistribution { .. }));
    }

    #[test]
    fn no_interior_pixels_errors() {
        let (field, clear, _) = scene();
        let edge = Mask::from_fn(2, 2, |_, _| true);
        let err =
            lave_scaling_exact(&field, &clear, &edge, &params(0.7), &LaveScalingConfig::new())
                .unwrap_err();
        assert!(matches!(err, RemapError::DegenerateDistribution { .. }));
    }

    #[test]
    fn mask_size_mismatch_errors() {
        let (field, clear, _) = scene();
        let edge = Mask::from_fn(2, 3, |_, _| false);
        let err =
            lave_scaling_exact(&field, &clear, &edge, &params(0.7), &LaveScalingConfig::new())
                .unwrap_err();
        assert!(matches!(
            err,
            RemapError::MaskDimensionMismatch {
                expected: (2, 2),
                got: (2, 3)
            }
        ));
    }
}
