//! Clear/cloud classification and cloud-edge detection.
//!
//! [`clip_field`] thresholds a normalized field at the quantile matching a
//! target clear-sky fraction, producing the clear/cloud [`Mask`]. Then
//! [`find_edges`] locates the band around the cloud boundary where
//! cloud-enhancement effects apply.
//!
//! [`Mask`]: nimbus_field::Mask

mod clip;
mod edges;
mod error;

pub use clip::clip_field;
pub use edges::find_edges;
pub use error::ClassifyError;
