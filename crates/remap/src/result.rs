//! Output bundle of a remapping run.

use nimbus_field::Field;

/// A remapped field together with its mean-matching diagnostics.
///
/// `achieved_mean` equals `target_mean` whenever the clear and enhanced
/// pixels leave a positive budget for the cloudy interior; otherwise the
/// cloudy pixels are left unscaled and the achieved mean overshoots.
#[derive(Clone, Debug)]
pub struct RemapResult {
    field: Field,
    target_mean: f64,
    achieved_mean: f64,
}

impl RemapResult {
    pub(crate) fn new(field: Field, target_mean: f64) -> Self {
        let achieved_mean = field.mean();
        Self {
            field,
            target_mean,
            achieved_mean,
        }
    }

    /// Returns the remapped clear-sky-index field.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Returns the requested global mean.
    pub fn target_mean(&self) -> f64 {
        self.target_mean
    }

    /// Returns the realized global mean.
    pub fn achieved_mean(&self) -> f64 {
        self.achieved_mean
    }

    /// Consumes the result, returning the field.
    pub fn into_field(self) -> Field {
        self.field
    }
}
