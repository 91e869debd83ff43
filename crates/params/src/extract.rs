//! Extraction of calibration parameters from an observed series.

use nimbus_synth::wavelet_weights;
use tracing::debug;

use crate::error::ParamsError;
use crate::params::CalibrationParameters;

/// Conventional clear-sky-index threshold above which a sample counts as
/// clear.
pub const DEFAULT_CLEAR_THRESHOLD: f64 = 0.95;

/// Scores the temporal variability of a clear-sky index series.
///
/// The score lives on an open (0, 180) scale where small values mean a
/// placid sky and large values a highly broken one.
pub trait VariabilityScorer {
    /// Computes the variability score of `series`.
    fn score(&self, series: &[f64]) -> f64;
}

/// Decomposes a series into per-scale detail modes.
///
/// Returns one coefficient row per mode, coarsest last, together with the
/// characteristic duration (in samples) of each mode. The final row is the
/// steady (approximation) mode and carries no fluctuation information.
pub trait WaveletDecomposer {
    /// Decomposes `series` into `(modes, durations)`.
    fn decompose(&self, series: &[f64]) -> (Vec<Vec<f64>>, Vec<usize>);
}

impl CalibrationParameters {
    /// Extracts a calibration bundle from an observed clear-sky index
    /// series.
    ///
    /// Non-finite samples are dropped before any statistic is computed.
    /// Samples strictly above `clear_threshold` count as clear
    /// ([`DEFAULT_CLEAR_THRESHOLD`] is the conventional choice). The scale
    /// weights come from the fluctuation power of the decomposer's detail
    /// modes; the steady mode (last row) is excluded.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::EmptySeries`] when no finite samples remain,
    /// [`ParamsError::InvalidWeights`] when the decomposer yields fewer than
    /// two modes, and [`ParamsError::InvalidParameter`] when the extracted
    /// statistics fall outside their valid ranges (a series that is all
    /// clear or all cloudy, for example).
    pub fn from_timeseries(
        series: &[f64],
        clear_threshold: f64,
        scorer: &dyn VariabilityScorer,
        decomposer: &dyn WaveletDecomposer,
    ) -> Result<Self, ParamsError> {
        let finite: Vec<f64> = series.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Err(ParamsError::EmptySeries);
        }

        let n = finite.len() as f64;
        let ktmean = nimbus_stats::mean(&finite);
        let ktmax = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let sorted = nimbus_stats::sorted_copy(&finite);
        let kt1pct = nimbus_stats::quantile_linear(&sorted, 0.01);
        let clear_count = finite.iter().filter(|&&v| v > clear_threshold).count();
        let frac_clear = clear_count as f64 / n;

        let vs = scorer.score(&finite);

        let (modes, _durations) = decomposer.decompose(&finite);
        if modes.len() < 2 {
            return Err(ParamsError::InvalidWeights {
                reason: format!(
                    "decomposition produced {} modes, need at least 2",
                    modes.len()
                ),
            });
        }
        // The last mode is the steady component; only the detail modes
        // carry fluctuation power.
        let detail = &modes[..modes.len() - 1];
        let weights = wavelet_weights(detail)?;
        let scales: Vec<u32> = (1..=detail.len() as u32).collect();

        debug!(
            samples = finite.len(),
            ktmean,
            kt1pct,
            ktmax,
            frac_clear,
            vs,
            modes = scales.len(),
            "extracted calibration parameters"
        );

        Self::new(ktmean, kt1pct, ktmax, frac_clear, vs, scales, Some(weights))
    }
}
