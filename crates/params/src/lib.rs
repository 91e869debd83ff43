//! Calibration parameters driving field synthesis and remapping.
//!
//! [`CalibrationParameters`] is the immutable bundle of summary statistics
//! a synthetic field is calibrated against. It is either assembled directly
//! (when the statistics are known) or extracted from an observed clear-sky
//! index series via [`CalibrationParameters::from_timeseries`], which keeps
//! the numeric heavy lifting behind the [`VariabilityScorer`] and
//! [`WaveletDecomposer`] capability traits so this crate stays independent
//! of any particular signal-processing implementation.

mod error;
mod extract;
mod params;

pub use error::ParamsError;
pub use extract::{DEFAULT_CLEAR_THRESHOLD, VariabilityScorer, WaveletDecomposer};
pub use params::CalibrationParameters;
