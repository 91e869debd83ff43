//! Remapping of normalized cloud fields onto clear-sky-index statistics.
//!
//! A stacked field carries spatial structure but its values are plain
//! `[0, 1]` noise. The two remappers here stretch that distribution onto
//! the clear-sky-index scale so that the global mean matches the observed
//! `ktmean`:
//!
//! - [`shift_mean_lave`] rescales the whole field into `[ktmin, 1]` and
//!   applies a mean-matching multiplier to the cloudy pixels. It only needs
//!   the field itself.
//! - [`lave_scaling_exact`] inverts the field into a cloud-attenuation
//!   distribution anchored at the observed 1st percentile, models cloud
//!   enhancement along the clear/cloud boundary, and balances the cloudy
//!   interior so the global mean lands on `ktmean` exactly whenever the
//!   budget allows. It needs the clear and edge masks from classification.

mod config;
mod error;
mod lave;
mod result;
mod shift;

pub use config::{LaveScalingConfig, ShiftMeanConfig};
pub use error::RemapError;
pub use lave::lave_scaling_exact;
pub use result::RemapResult;
pub use shift::shift_mean_lave;
