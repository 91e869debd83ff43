//! 2-D field and mask containers for the nimbus cloud-field generator.
//!
//! A [`Field`] is a row-major grid of `f64` pixel values (a raw stacked
//! field, an edge-magnitude map, or a calibrated clear-sky-index field).
//! A [`Mask`] is a grid of booleans (clear vs cloudy, edge vs not-edge).
//! Both are created once by a pipeline stage and consumed read-only by the
//! next; no stage mutates a field in place.

mod error;
mod field;
mod mask;

pub use error::FieldError;
pub use field::Field;
pub use mask::Mask;
