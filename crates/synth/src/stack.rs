//! Weighted multi-scale field stacking.

use nimbus_field::Field;
use rand::Rng;
use tracing::debug;

use crate::error::SynthError;
use crate::random::random_at_scale;
use crate::weights::vs_weights;

/// Configuration for [`stacked_field`].
///
/// Use the builder methods to customize scales and weights.
///
/// # Example
///
/// ```ignore
/// use nimbus_synth::StackedFieldConfig;
///
/// let config = StackedFieldConfig::new()
///     .with_scales(vec![1, 2, 3, 4, 5])
///     .with_weights(vec![0.4, 0.3, 0.15, 0.1, 0.05]);
/// ```
#[derive(Clone, Debug)]
pub struct StackedFieldConfig {
    scales: Vec<u32>,
    weights: Option<Vec<f64>>,
}

impl StackedFieldConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `scales = [1, 2, 3, 4, 5, 6, 7]`, `weights = None`
    /// (derived from the variability score at synthesis time).
    pub fn new() -> Self {
        Self {
            scales: (1..=7).collect(),
            weights: None,
        }
    }

    /// Sets the scale indices.
    pub fn with_scales(mut self, scales: Vec<u32>) -> Self {
        self.scales = scales;
        self
    }

    /// Sets explicit per-scale weights, bypassing the variability-score rule.
    ///
    /// Weights are used as given, without renormalization; enforcing the
    /// sum-to-1 invariant is the caller's responsibility.
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Returns the scale indices.
    pub fn scales(&self) -> &[u32] {
        &self.scales
    }

    /// Returns the explicit weights, if set.
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }
}

impl Default for StackedFieldConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Synthesizes one normalized multi-scale random field.
///
/// For each scale `s` with weight `w`, a layer is generated at coarseness
/// proportion `2^(1-s)` of the output size and accumulated as `w` times the
/// layer. The accumulated sum is then min-max normalized so the result
/// spans exactly `[0, 1]`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SynthError::WeightCountMismatch`] | explicit weight count differs from scale count |
/// | [`SynthError::InvalidVariabilityScore`] | no explicit weights and `vs` outside (0, 180) |
/// | [`SynthError::InvalidDimension`] | output too small for the finest scale |
/// | [`SynthError::Field`] | the accumulated field is constant |
pub fn stacked_field(
    vs: f64,
    size: (usize, usize),
    config: &StackedFieldConfig,
    rng: &mut impl Rng,
) -> Result<Field, SynthError> {
    let scales = config.scales();
    let weights = match config.weights() {
        Some(w) => {
            if w.len() != scales.len() {
                return Err(SynthError::WeightCountMismatch {
                    weights: w.len(),
                    scales: scales.len(),
                });
            }
            w.to_vec()
        }
        None => vs_weights(scales, vs)?,
    };

    let (rows, cols) = size;
    let mut accum = vec![0.0_f64; rows.saturating_mul(cols)];
    for (&scale, &weight) in scales.iter().zip(&weights) {
        let prop = 2.0_f64.powi(1 - scale as i32);
        let coarse = (
            (rows as f64 * prop).floor() as usize,
            (cols as f64 * prop).floor() as usize,
        );
        let layer = random_at_scale(coarse, size, rng)?;
        debug!(scale, weight, coarse_rows = coarse.0, coarse_cols = coarse.1, "layer stacked");
        for (acc, &v) in accum.iter_mut().zip(layer.as_slice()) {
            *acc += weight * v;
        }
    }

    let field = Field::from_vec(rows, cols, accum)?;
    Ok(field.normalized()?)
}
