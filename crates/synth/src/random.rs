//! Single-scale random layer generation.

use nimbus_field::Field;
use rand::Rng;

use crate::error::SynthError;

/// Interpolation position along one axis: source indices `(lo, hi)` and the
/// fractional distance `t` between them.
///
/// Both the source grid (`n_src` points) and the target grid (`n_out`
/// points) are evenly spaced over `[0, 1]`, so target index `idx` lands at
/// source-grid coordinate `idx / (n_out - 1) * (n_src - 1)`. Degenerate
/// single-point axes are constant.
#[inline]
fn axis_position(idx: usize, n_out: usize, n_src: usize) -> (usize, usize, f64) {
    if n_src == 1 || n_out == 1 {
        return (0, 0, 0.0);
    }
    let h = idx as f64 / (n_out - 1) as f64 * (n_src - 1) as f64;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n_src - 1);
    (lo, hi, h - h.floor())
}

/// Generates one random layer: an i.i.d. uniform `[0, 1)` draw on a coarse
/// `rand_size` grid, bilinearly interpolated up to `final_size`.
///
/// The coarse grid is drawn row-major, so a fixed RNG seed fully determines
/// the layer. When `rand_size == final_size` the draw is returned unchanged
/// (interpolation is the identity at matching resolution), and interpolation
/// queries at the boundary coordinates reproduce the coarse boundary values
/// exactly.
///
/// # Errors
///
/// Returns [`SynthError::InvalidDimension`] if any dimension is zero or the
/// coarse grid is larger than the output grid.
pub fn random_at_scale(
    rand_size: (usize, usize),
    final_size: (usize, usize),
    rng: &mut impl Rng,
) -> Result<Field, SynthError> {
    let (src_rows, src_cols) = rand_size;
    let (rows, cols) = final_size;
    if src_rows == 0 || src_cols == 0 || rows == 0 || cols == 0 || src_rows > rows || src_cols > cols
    {
        return Err(SynthError::InvalidDimension {
            coarse_rows: src_rows,
            coarse_cols: src_cols,
            rows,
            cols,
        });
    }

    let coarse: Vec<f64> = (0..src_rows * src_cols).map(|_| rng.random()).collect();

    if rand_size == final_size {
        return Ok(Field::from_vec(rows, cols, coarse)?);
    }

    // Column positions are the same for every row; compute them once.
    let col_pos: Vec<(usize, usize, f64)> = (0..cols)
        .map(|j| axis_position(j, cols, src_cols))
        .collect();

    let mut data = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        let (r0, r1, tr) = axis_position(i, rows, src_rows);
        let top = &coarse[r0 * src_cols..(r0 + 1) * src_cols];
        let bottom = &coarse[r1 * src_cols..(r1 + 1) * src_cols];
        for &(c0, c1, tc) in &col_pos {
            let v00 = top[c0];
            let v01 = top[c1];
            let v10 = bottom[c0];
            let v11 = bottom[c1];
            let v = v00 * (1.0 - tr) * (1.0 - tc)
                + v01 * (1.0 - tr) * tc
                + v10 * tr * (1.0 - tc)
                + v11 * tr * tc;
            data.push(v);
        }
    }

    Ok(Field::from_vec(rows, cols, data)?)
}
