//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::{RemapToml, TargetToml};

use nimbus_params::CalibrationParameters;
use nimbus_remap::{LaveScalingConfig, ShiftMeanConfig};
use nimbus_synth::StackedFieldConfig;

/// Which remapping strategy closes the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemapVariant {
    /// [`nimbus_remap::lave_scaling_exact`], with edge enhancement.
    Exact,
    /// [`nimbus_remap::shift_mean_lave`], field-only.
    Shift,
}

/// Parses a remap variant name string into the corresponding enum variant.
pub fn parse_variant(s: &str) -> Result<RemapVariant> {
    match s.to_lowercase().as_str() {
        "exact" => Ok(RemapVariant::Exact),
        "shift" => Ok(RemapVariant::Shift),
        other => bail!("unknown remap variant: {other:?}"),
    }
}

/// Builds a [`CalibrationParameters`] bundle from the TOML target section.
pub fn build_calibration(target: &TargetToml) -> Result<CalibrationParameters> {
    Ok(CalibrationParameters::new(
        target.ktmean,
        target.kt1pct,
        target.ktmax,
        target.frac_clear,
        target.vs,
        target.scales.clone(),
        target.weights.clone(),
    )?)
}

/// Builds a [`StackedFieldConfig`] from the TOML target section.
pub fn build_stack_config(target: &TargetToml) -> StackedFieldConfig {
    let mut cfg = StackedFieldConfig::new().with_scales(target.scales.clone());
    if let Some(ref w) = target.weights {
        cfg = cfg.with_weights(w.clone());
    }
    cfg
}

/// Builds a [`ShiftMeanConfig`] from the TOML remap section.
pub fn build_shift_config(remap: &RemapToml) -> ShiftMeanConfig {
    ShiftMeanConfig::new()
        .with_ktmin(remap.ktmin)
        .with_min_quant(remap.min_quant)
        .with_max_quant(remap.max_quant.unwrap_or(0.995))
}

/// Builds a [`LaveScalingConfig`] from the TOML remap section.
pub fn build_lave_config(remap: &RemapToml) -> LaveScalingConfig {
    LaveScalingConfig::new().with_max_quant(remap.max_quant.unwrap_or(0.99))
}
