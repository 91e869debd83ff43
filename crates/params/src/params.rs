//! The immutable calibration bundle.

use crate::error::ParamsError;

/// Summary statistics of an observed clear-sky index series, used to
/// calibrate a synthetic field.
///
/// Immutable after construction; the pipeline only reads it.
#[derive(Clone, Debug)]
pub struct CalibrationParameters {
    ktmean: f64,
    kt1pct: f64,
    ktmax: f64,
    frac_clear: f64,
    vs: f64,
    scales: Vec<u32>,
    weights: Option<Vec<f64>>,
}

impl CalibrationParameters {
    /// Creates and validates a calibration bundle.
    ///
    /// `weights`, when given, must pair up with `scales` and carry the
    /// sum-to-1 invariant; when `None` the synthesizer derives weights from
    /// the variability score `vs`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ParamsError::InvalidParameter`] | non-finite or out-of-range statistic |
    /// | [`ParamsError::InvalidScales`] | empty scale list or a zero scale index |
    /// | [`ParamsError::WeightCountMismatch`] | weight and scale counts differ |
    /// | [`ParamsError::InvalidWeights`] | negative weight or sum away from 1 by more than 1e-6 |
    pub fn new(
        ktmean: f64,
        kt1pct: f64,
        ktmax: f64,
        frac_clear: f64,
        vs: f64,
        scales: Vec<u32>,
        weights: Option<Vec<f64>>,
    ) -> Result<Self, ParamsError> {
        if !ktmean.is_finite() || ktmean <= 0.0 {
            return Err(ParamsError::InvalidParameter {
                name: "ktmean",
                value: ktmean,
                requirement: "must be finite and > 0",
            });
        }
        if !kt1pct.is_finite() || kt1pct <= 0.0 || kt1pct > 1.0 {
            return Err(ParamsError::InvalidParameter {
                name: "kt1pct",
                value: kt1pct,
                requirement: "must be in (0, 1]",
            });
        }
        if !ktmax.is_finite() || ktmax < ktmean {
            return Err(ParamsError::InvalidParameter {
                name: "ktmax",
                value: ktmax,
                requirement: "must be finite and >= ktmean",
            });
        }
        if !frac_clear.is_finite() || frac_clear <= 0.0 || frac_clear >= 1.0 {
            return Err(ParamsError::InvalidParameter {
                name: "frac_clear",
                value: frac_clear,
                requirement: "must be in the open interval (0, 1)",
            });
        }
        if !vs.is_finite() || vs <= 0.0 || vs >= 180.0 {
            return Err(ParamsError::InvalidParameter {
                name: "vs",
                value: vs,
                requirement: "must be in the open interval (0, 180)",
            });
        }
        if scales.is_empty() {
            return Err(ParamsError::InvalidScales {
                reason: "scale list is empty".to_string(),
            });
        }
        if scales.iter().any(|&s| s == 0) {
            return Err(ParamsError::InvalidScales {
                reason: "scale indices must be >= 1".to_string(),
            });
        }
        if let Some(w) = &weights {
            if w.len() != scales.len() {
                return Err(ParamsError::WeightCountMismatch {
                    weights: w.len(),
                    scales: scales.len(),
                });
            }
            if w.iter().any(|&x| !x.is_finite() || x < 0.0) {
                return Err(ParamsError::InvalidWeights {
                    reason: "weights must be finite and non-negative".to_string(),
                });
            }
            let sum: f64 = w.iter().sum();
            if (sum - 1.0).abs() > 1e-6 {
                return Err(ParamsError::InvalidWeights {
                    reason: format!("weights sum to {sum}, expected 1"),
                });
            }
        }
        Ok(Self {
            ktmean,
            kt1pct,
            ktmax,
            frac_clear,
            vs,
            scales,
            weights,
        })
    }

    /// Returns the target global mean clear-sky index.
    pub fn ktmean(&self) -> f64 {
        self.ktmean
    }

    /// Returns the target 1st-percentile clear-sky index (darkest clouds).
    pub fn kt1pct(&self) -> f64 {
        self.kt1pct
    }

    /// Returns the target maximum clear-sky index (peak cloud enhancement).
    pub fn ktmax(&self) -> f64 {
        self.ktmax
    }

    /// Returns the target clear-sky fraction.
    pub fn frac_clear(&self) -> f64 {
        self.frac_clear
    }

    /// Returns the variability score.
    pub fn vs(&self) -> f64 {
        self.vs
    }

    /// Returns the scale indices.
    pub fn scales(&self) -> &[u32] {
        &self.scales
    }

    /// Returns the per-scale weights, if extracted or supplied explicitly.
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }
}
