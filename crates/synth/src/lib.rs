//! Multi-scale random field synthesis.
//!
//! A synthetic cloud-shadow field is built by stacking several layers of
//! smoothly interpolated uniform noise at different coarseness scales. The
//! per-scale weights come either from a scalar variability score or from
//! wavelet coefficients of an observed time series.
//!
//! # Pipeline
//!
//! 1. [`random_at_scale`] — one layer: coarse uniform draw, bilinearly
//!    upsampled to the output resolution
//! 2. [`vs_weights`] / [`wavelet_weights`] — per-scale weights summing to 1
//! 3. [`stacked_field`] — weighted sum of layers, min-max normalized to
//!    exactly `[0, 1]`
//!
//! All randomness flows through an explicit `&mut impl Rng`; a fixed seed
//! reproduces every layer bit-for-bit.

mod error;
mod random;
mod stack;
mod weights;

pub use error::SynthError;
pub use random::random_at_scale;
pub use stack::{StackedFieldConfig, stacked_field};
pub use weights::{vs_weights, wavelet_weights};
