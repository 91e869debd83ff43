use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Nimbus configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NimbusConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Output field dimensions.
    #[serde(default)]
    pub size: SizeToml,

    /// Target statistics the field is calibrated against.
    pub target: TargetToml,

    /// Edge detection settings.
    #[serde(default)]
    pub edges: EdgesToml,

    /// Remapping settings.
    #[serde(default)]
    pub remap: RemapToml,

    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeToml {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
}

impl Default for SizeToml {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
        }
    }
}

fn default_rows() -> usize {
    512
}
fn default_cols() -> usize {
    512
}

/// Observed clear-sky-index statistics. These have no sensible defaults;
/// the whole point of the generator is matching them.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetToml {
    pub ktmean: f64,
    pub kt1pct: f64,
    pub ktmax: f64,
    pub frac_clear: f64,
    pub vs: f64,
    #[serde(default = "default_scales")]
    pub scales: Vec<u32>,
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
}

fn default_scales() -> Vec<u32> {
    (1..=7).collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgesToml {
    #[serde(default = "default_window")]
    pub window: usize,
}

impl Default for EdgesToml {
    fn default() -> Self {
        Self {
            window: default_window(),
        }
    }
}

fn default_window() -> usize {
    3
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemapToml {
    /// Remapping strategy: "exact" or "shift".
    #[serde(default = "default_variant")]
    pub variant: String,
    #[serde(default = "default_ktmin")]
    pub ktmin: f64,
    #[serde(default = "default_min_quant")]
    pub min_quant: f64,
    /// Upper range quantile. Defaults per variant: 0.995 for "shift",
    /// 0.99 for "exact".
    #[serde(default)]
    pub max_quant: Option<f64>,
}

impl Default for RemapToml {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            ktmin: default_ktmin(),
            min_quant: default_min_quant(),
            max_quant: None,
        }
    }
}

fn default_variant() -> String {
    "exact".to_string()
}
fn default_ktmin() -> f64 {
    0.2
}
fn default_min_quant() -> f64 {
    0.005
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub output: Option<PathBuf>,
}
