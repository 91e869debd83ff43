//! Per-scale weight calculation.
//!
//! Two paths produce the weights that blend the random layers: a scalar
//! variability score (when only a summary statistic of the observed series
//! is available) or the per-timescale wavelet coefficients themselves.

use crate::error::SynthError;

/// Weights from a variability score.
///
/// `VS1 = -ln(1 - vs/180) / 0.6`; the raw weight of scale `s` is
/// `s^(1/VS1)`, normalized to sum 1. The exponent shrinks as the score
/// grows, so a higher score flattens the distribution toward the coarser
/// scales while a low score concentrates it on the finest one.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SynthError::InvalidVariabilityScore`] | `vs` outside (0, 180) or non-finite |
/// | [`SynthError::InvalidScale`] | any scale index is 0 |
/// | [`SynthError::DegenerateWeights`] | `scales` is empty |
pub fn vs_weights(scales: &[u32], vs: f64) -> Result<Vec<f64>, SynthError> {
    if scales.is_empty() {
        return Err(SynthError::DegenerateWeights {
            reason: "no scales given".to_string(),
        });
    }
    if let Some(&scale) = scales.iter().find(|&&s| s == 0) {
        return Err(SynthError::InvalidScale { scale });
    }
    if !vs.is_finite() || vs <= 0.0 || vs >= 180.0 {
        return Err(SynthError::InvalidVariabilityScore { vs });
    }

    let vs1 = -(1.0 - vs / 180.0).ln() / 0.6;
    let raw: Vec<f64> = scales
        .iter()
        .map(|&s| (s as f64).powf(1.0 / vs1))
        .collect();
    let sum: f64 = raw.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(SynthError::DegenerateWeights {
            reason: format!("raw weight sum is {sum}"),
        });
    }
    Ok(raw.into_iter().map(|w| w / sum).collect())
}

/// Weights from wavelet timescale components.
///
/// The weight of component row `i` is proportional to the mean of its
/// squared coefficients, normalized to sum 1. Non-finite coefficients are
/// skipped, matching a NaN-aware mean over observed decompositions.
///
/// # Errors
///
/// Returns [`SynthError::DegenerateWeights`] if `waves` is empty, a row has
/// no finite coefficients, or the total power is zero.
pub fn wavelet_weights(waves: &[Vec<f64>]) -> Result<Vec<f64>, SynthError> {
    if waves.is_empty() {
        return Err(SynthError::DegenerateWeights {
            reason: "no wavelet components given".to_string(),
        });
    }

    let mut raw = Vec::with_capacity(waves.len());
    for (i, row) in waves.iter().enumerate() {
        let finite: Vec<f64> = row.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Err(SynthError::DegenerateWeights {
                reason: format!("wavelet component {i} has no finite coefficients"),
            });
        }
        let power = finite.iter().map(|v| v * v).sum::<f64>() / finite.len() as f64;
        raw.push(power);
    }

    let sum: f64 = raw.iter().sum();
    if sum <= 0.0 {
        return Err(SynthError::DegenerateWeights {
            reason: "total wavelet power is zero".to_string(),
        });
    }
    Ok(raw.into_iter().map(|w| w / sum).collect())
}
