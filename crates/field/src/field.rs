//! Row-major 2-D grid of pixel values.

use crate::error::FieldError;
use crate::mask::Mask;

/// A validated 2-D grid of finite `f64` pixel values, row-major.
///
/// Guarantees:
/// - both dimensions are at least 1
/// - the backing buffer holds exactly `rows * cols` values
/// - every value is finite (no NaN or infinity)
///
/// All transforms produce a new `Field`; nothing mutates in place.
#[derive(Clone, Debug)]
pub struct Field {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Field {
    /// Creates a field from a row-major buffer after validating it.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`FieldError::InvalidDimension`] | `rows == 0` or `cols == 0` |
    /// | [`FieldError::LengthMismatch`] | `data.len() != rows * cols` |
    /// | [`FieldError::NonFiniteData`] | any value is NaN or infinite |
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, FieldError> {
        if rows == 0 || cols == 0 {
            return Err(FieldError::InvalidDimension { rows, cols });
        }
        if data.len() != rows * cols {
            return Err(FieldError::LengthMismatch {
                expected: rows * cols,
                got: data.len(),
            });
        }
        if !data.iter().all(|v| v.is_finite()) {
            return Err(FieldError::NonFiniteData);
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a field filled with a single value.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidDimension`] for zero dimensions and
    /// [`FieldError::NonFiniteData`] for a non-finite fill value.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self, FieldError> {
        if rows == 0 || cols == 0 {
            return Err(FieldError::InvalidDimension { rows, cols });
        }
        if !value.is_finite() {
            return Err(FieldError::NonFiniteData);
        }
        Ok(Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        })
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the total pixel count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the field holds no pixels.
    ///
    /// Note: a valid `Field` is never empty (minimum size is 1x1).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Returns the row-major pixel buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns one row of pixels (the space-for-time cross-section).
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Returns the minimum pixel value.
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Returns the maximum pixel value.
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Returns the mean pixel value.
    pub fn mean(&self) -> f64 {
        nimbus_stats::mean(&self.data)
    }

    /// Returns the `p`-quantile of the pixel distribution (NumPy default
    /// linear interpolation). Sorts a copy of the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `p` is outside `[0, 1]`.
    pub fn quantile(&self, p: f64) -> f64 {
        assert!((0.0..=1.0).contains(&p), "quantile: p must be in [0, 1]");
        let sorted = nimbus_stats::sorted_copy(&self.data);
        nimbus_stats::quantile_linear(&sorted, p)
    }

    /// Applies `f` to every pixel, producing a new field.
    ///
    /// The closure must return finite values; this constructor skips
    /// re-validation because every transform in the pipeline is bounded.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Field {
        Field {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Applies `f` to every pixel together with its mask flag.
    ///
    /// # Panics
    ///
    /// Panics if the mask size differs from the field size.
    pub fn map_masked(&self, mask: &Mask, f: impl Fn(f64, bool) -> f64) -> Field {
        assert_eq!(self.size(), mask.size(), "map_masked: size mismatch");
        Field {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(mask.as_slice())
                .map(|(&v, &m)| f(v, m))
                .collect(),
        }
    }

    /// Collects the pixels where the mask flag equals `keep`.
    ///
    /// # Panics
    ///
    /// Panics if the mask size differs from the field size.
    pub fn masked_values(&self, mask: &Mask, keep: bool) -> Vec<f64> {
        assert_eq!(self.size(), mask.size(), "masked_values: size mismatch");
        self.data
            .iter()
            .zip(mask.as_slice())
            .filter(|&(_, &m)| m == keep)
            .map(|(&v, _)| v)
            .collect()
    }

    /// Min-max normalizes to `[0, 1]`: the global minimum maps to exactly
    /// 0.0 and the global maximum to exactly 1.0.
    ///
    /// The shift is applied before the divide so that `min - min == 0.0` and
    /// `(max - min) / (max - min) == 1.0` hold bit-exactly.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::DegenerateRange`] if all pixels are equal.
    pub fn normalized(&self) -> Result<Field, FieldError> {
        let min = self.min();
        let shifted = self.map(|v| v - min);
        let max = shifted.max();
        if max == 0.0 {
            return Err(FieldError::DegenerateRange { value: min });
        }
        Ok(shifted.map(|v| v / max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn field_2x3() -> Field {
        Field::from_vec(2, 3, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap()
    }

    #[test]
    fn from_vec_valid() {
        let f = field_2x3();
        assert_eq!(f.size(), (2, 3));
        assert_eq!(f.len(), 6);
        assert!(!f.is_empty());
        assert_relative_eq!(f.get(1, 2), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn from_vec_zero_rows() {
        let err = Field::from_vec(0, 3, vec![]).unwrap_err();
        assert!(matches!(
            err,
            FieldError::InvalidDimension { rows: 0, cols: 3 }
        ));
    }

    #[test]
    fn from_vec_length_mismatch() {
        let err = Field::from_vec(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            FieldError::LengthMismatch {
                expected: 4,
                got: 3
            }
        ));
    }

    #[test]
    fn from_vec_nan_rejected() {
        let err = Field::from_vec(1, 2, vec![1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, FieldError::NonFiniteData));
    }

    #[test]
    fn filled_constant() {
        let f = Field::filled(3, 3, 0.7).unwrap();
        assert_eq!(f.len(), 9);
        assert!(f.as_slice().iter().all(|&v| v == 0.7));
    }

    #[test]
    fn filled_infinite_rejected() {
        let err = Field::filled(2, 2, f64::INFINITY).unwrap_err();
        assert!(matches!(err, FieldError::NonFiniteData));
    }

    #[test]
    fn row_is_cross_section() {
        let f = field_2x3();
        assert_eq!(f.row(0), &[0.1, 0.2, 0.3]);
        assert_eq!(f.row(1), &[0.4, 0.5, 0.6]);
    }

    #[test]
    fn min_max_mean() {
        let f = field_2x3();
        assert_relative_eq!(f.min(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(f.max(), 0.6, epsilon = 1e-12);
        assert_relative_eq!(f.mean(), 0.35, epsilon = 1e-12);
    }

    #[test]
    fn quantile_median() {
        let f = field_2x3();
        assert_relative_eq!(f.quantile(0.5), 0.35, epsilon = 1e-12);
    }

    #[test]
    fn map_new_field() {
        let f = field_2x3();
        let doubled = f.map(|v| v * 2.0);
        assert_relative_eq!(doubled.get(0, 0), 0.2, epsilon = 1e-12);
        // Original untouched
        assert_relative_eq!(f.get(0, 0), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn masked_values_partition() {
        let f = field_2x3();
        let mask = Mask::from_fn(2, 3, |r, _| r == 0);
        let kept = f.masked_values(&mask, true);
        let dropped = f.masked_values(&mask, false);
        assert_eq!(kept, vec![0.1, 0.2, 0.3]);
        assert_eq!(dropped, vec![0.4, 0.5, 0.6]);
    }

    #[test]
    fn map_masked_overwrite() {
        let f = field_2x3();
        let mask = Mask::from_fn(2, 3, |_, c| c == 1);
        let out = f.map_masked(&mask, |v, m| if m { 1.0 } else { v });
        assert_eq!(out.get(0, 1), 1.0);
        assert_eq!(out.get(1, 1), 1.0);
        assert_relative_eq!(out.get(0, 0), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn normalized_exact_bounds() {
        let f = Field::from_vec(2, 2, vec![0.3, 0.9, 0.5, 0.7]).unwrap();
        let n = f.normalized().unwrap();
        assert_eq!(n.min(), 0.0);
        assert_eq!(n.max(), 1.0);
    }

    #[test]
    fn normalized_constant_errors() {
        let f = Field::filled(2, 2, 0.4).unwrap();
        let err = f.normalized().unwrap_err();
        assert!(matches!(err, FieldError::DegenerateRange { .. }));
    }

    #[test]
    fn field_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<Field>();
    }
}
