//! Tuning knobs for the two remapping strategies.

use crate::error::RemapError;

/// Configuration for [`shift_mean_lave`](crate::shift_mean_lave).
#[derive(Clone, Debug)]
pub struct ShiftMeanConfig {
    ktmin: f64,
    min_quant: f64,
    max_quant: f64,
}

impl ShiftMeanConfig {
    /// Creates a configuration with the standard defaults: pixel floor
    /// `ktmin = 0.2` and robust range quantiles `0.005` / `0.995`.
    pub fn new() -> Self {
        Self {
            ktmin: 0.2,
            min_quant: 0.005,
            max_quant: 0.995,
        }
    }

    /// Sets the lowest clear-sky index a cloudy pixel rescales to.
    pub fn with_ktmin(mut self, ktmin: f64) -> Self {
        self.ktmin = ktmin;
        self
    }

    /// Sets the lower quantile used to estimate the cloudy-pixel minimum.
    pub fn with_min_quant(mut self, min_quant: f64) -> Self {
        self.min_quant = min_quant;
        self
    }

    /// Sets the upper quantile used to estimate the cloudy-pixel maximum.
    pub fn with_max_quant(mut self, max_quant: f64) -> Self {
        self.max_quant = max_quant;
        self
    }

    /// Returns the cloudy-pixel floor.
    pub fn ktmin(&self) -> f64 {
        self.ktmin
    }

    /// Returns the lower range quantile.
    pub fn min_quant(&self) -> f64 {
        self.min_quant
    }

    /// Returns the upper range quantile.
    pub fn max_quant(&self) -> f64 {
        self.max_quant
    }

    /// Checks internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`RemapError::InvalidConfig`] when `ktmin` is outside
    /// `[0, 1)` or the quantiles are not ordered within `[0, 1]`.
    pub fn validate(&self) -> Result<(), RemapError> {
        if !self.ktmin.is_finite() || !(0.0..1.0).contains(&self.ktmin) {
            return Err(RemapError::InvalidConfig {
                reason: format!("ktmin = {} must be in [0, 1)", self.ktmin),
            });
        }
        if !(0.0..=1.0).contains(&self.min_quant)
            || !(0.0..=1.0).contains(&self.max_quant)
            || self.min_quant >= self.max_quant
        {
            return Err(RemapError::InvalidConfig {
                reason: format!(
                    "quantiles ({}, {}) must satisfy 0 <= min < max <= 1",
                    self.min_quant, self.max_quant
                ),
            });
        }
        Ok(())
    }
}

impl Default for ShiftMeanConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for [`lave_scaling_exact`](crate::lave_scaling_exact).
#[derive(Clone, Debug)]
pub struct LaveScalingConfig {
    max_quant: f64,
}

impl LaveScalingConfig {
    /// Creates a configuration with the standard upper quantile `0.99`.
    pub fn new() -> Self {
        Self { max_quant: 0.99 }
    }

    /// Sets the quantile of the non-clear pixels used as the field maximum.
    pub fn with_max_quant(mut self, max_quant: f64) -> Self {
        self.max_quant = max_quant;
        self
    }

    /// Returns the upper range quantile.
    pub fn max_quant(&self) -> f64 {
        self.max_quant
    }

    /// Checks internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`RemapError::InvalidConfig`] when `max_quant` is outside
    /// `(0, 1]`.
    pub fn validate(&self) -> Result<(), RemapError> {
        if !self.max_quant.is_finite() || self.max_quant <= 0.0 || self.max_quant > 1.0 {
            return Err(RemapError::InvalidConfig {
                reason: format!("max_quant = {} must be in (0, 1]", self.max_quant),
            });
        }
        Ok(())
    }
}

impl Default for LaveScalingConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn shift_defaults() {
        let c = ShiftMeanConfig::new();
        assert_relative_eq!(c.ktmin(), 0.2, epsilon = 1e-12);
        assert_relative_eq!(c.min_quant(), 0.005, epsilon = 1e-12);
        assert_relative_eq!(c.max_quant(), 0.995, epsilon = 1e-12);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn shift_builders() {
        let c = ShiftMeanConfig::new()
            .with_ktmin(0.1)
            .with_min_quant(0.01)
            .with_max_quant(0.99);
        assert_relative_eq!(c.ktmin(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(c.min_quant(), 0.01, epsilon = 1e-12);
        assert_relative_eq!(c.max_quant(), 0.99, epsilon = 1e-12);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn shift_rejects_bad_ktmin() {
        let c = ShiftMeanConfig::new().with_ktmin(1.0);
        assert!(matches!(
            c.validate().unwrap_err(),
            RemapError::InvalidConfig { .. }
        ));
    }

    #[test]
    fn shift_rejects_unordered_quantiles() {
        let c = ShiftMeanConfig::new().with_min_quant(0.9).with_max_quant(0.1);
        assert!(matches!(
            c.validate().unwrap_err(),
            RemapError::InvalidConfig { .. }
        ));
    }

    #[test]
    fn lave_defaults() {
        let c = LaveScalingConfig::new();
        assert_relative_eq!(c.max_quant(), 0.99, epsilon = 1e-12);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn lave_rejects_zero_quantile() {
        let c = LaveScalingConfig::new().with_max_quant(0.0);
        assert!(matches!(
            c.validate().unwrap_err(),
            RemapError::InvalidConfig { .. }
        ));
    }
}
