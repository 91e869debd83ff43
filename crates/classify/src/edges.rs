//! Cloud-boundary edge detection.

use nimbus_field::{Field, Mask};
use tracing::debug;

use crate::error::ClassifyError;

/// Smoothed magnitudes below this are floating-point noise from the filter
/// arithmetic, not edge signal.
const NOISE_FLOOR: f64 = 1e-5;

/// Clamped pixel lookup (nearest-neighbour padding at the grid border).
#[inline]
fn sample(data: &[f64], rows: usize, cols: usize, r: i64, c: i64) -> f64 {
    let rr = r.clamp(0, rows as i64 - 1) as usize;
    let cc = c.clamp(0, cols as i64 - 1) as usize;
    data[rr * cols + cc]
}

/// Sobel gradient magnitude, both axes combined.
fn sobel_magnitude(data: &[f64], rows: usize, cols: usize) -> Vec<f64> {
    let mut out = vec![0.0_f64; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            let g = |dr: i64, dc: i64| sample(data, rows, cols, r as i64 + dr, c as i64 + dc);
            let gx = -g(-1, -1) + g(-1, 1) - 2.0 * g(0, -1) + 2.0 * g(0, 1) - g(1, -1) + g(1, 1);
            let gy = -g(-1, -1) - 2.0 * g(-1, 0) - g(-1, 1) + g(1, -1) + 2.0 * g(1, 0) + g(1, 1);
            out[r * cols + c] = (gx * gx + gy * gy).sqrt().abs();
        }
    }
    out
}

/// Local-mean (box) filter of the given window size, borders clamped.
fn box_filter(data: &[f64], rows: usize, cols: usize, window: usize) -> Vec<f64> {
    let half = (window / 2) as i64;
    let lo = half - window as i64 + 1; // window offsets are lo..=half
    let norm = (window * window) as f64;
    let mut out = vec![0.0_f64; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            let mut sum = 0.0;
            for dr in lo..=half {
                for dc in lo..=half {
                    sum += sample(data, rows, cols, r as i64 + dr, c as i64 + dc);
                }
            }
            out[r * cols + c] = sum / norm;
        }
    }
    out
}

/// Finds the band of pixels around the clear/cloud boundary.
///
/// 1. Sobel gradient magnitude of the binarized mask (both axes, combined).
/// 2. Box filter of `window` pixels to widen the response into a band.
/// 3. Smoothed values below 1e-5 zeroed out.
/// 4. Binarize at the median of the remaining strictly positive values —
///    a fixed-value threshold would instead select whole cloud interiors on
///    large windows, while the median keeps the band straddling the
///    boundary about half inside, half outside.
///
/// Returns the raw edge-magnitude field and the binary near-boundary mask.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ClassifyError::InvalidWindow`] | `window == 0` |
/// | [`ClassifyError::NoEdgeSignal`] | the mask is uniform (no boundary) |
pub fn find_edges(base_mask: &Mask, window: usize) -> Result<(Field, Mask), ClassifyError> {
    if window == 0 {
        return Err(ClassifyError::InvalidWindow { size: window });
    }

    let (rows, cols) = base_mask.size();
    let base: Vec<f64> = base_mask
        .as_slice()
        .iter()
        .map(|&m| if m { 1.0 } else { 0.0 })
        .collect();

    let edges = sobel_magnitude(&base, rows, cols);
    let mut smoothed = box_filter(&edges, rows, cols, window);
    for v in &mut smoothed {
        if *v < NOISE_FLOOR {
            *v = 0.0;
        }
    }

    let positive: Vec<f64> = smoothed.iter().copied().filter(|&v| v > 0.0).collect();
    if positive.is_empty() {
        return Err(ClassifyError::NoEdgeSignal);
    }
    let baseline = nimbus_stats::median(&nimbus_stats::sorted_copy(&positive));

    let flags: Vec<bool> = smoothed.iter().map(|&v| v > baseline).collect();
    let edge_mask = Mask::from_vec(rows, cols, flags)?;
    let edge_field = Field::from_vec(rows, cols, edges)?;

    debug!(
        window,
        baseline,
        edge_pixels = edge_mask.count_set(),
        "edge band detected"
    );
    Ok((edge_field, edge_mask))
}
