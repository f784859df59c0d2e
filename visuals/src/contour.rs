//! Contour band boundaries and marching-squares isoline extraction.

use ndarray::ArrayView2;

/// A contour line segment in data coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Start point (x, y).
    pub a: (f64, f64),
    /// End point (x, y).
    pub b: (f64, f64),
}

/// Evenly spaced boundaries dividing a value range into `bands` bands.
///
/// Returns `bands + 1` values from min to max inclusive;
/// the interior boundaries are the levels to draw isolines at.
/// A degenerate range is widened to one unit so that banding stays defined.
pub fn level_values(range: (f64, f64), bands: usize) -> Vec<f64> {
    let bands = bands.max(1);
    let (min, max) = range;
    let max = if max > min { max } else { min + 1.0 };
    let step = (max - min) / bands as f64;
    (0..=bands).map(|k| min + step * k as f64).collect()
}

/// Which band of `boundaries` (as produced by [`level_values`])
/// a value falls in, clamped to the outermost bands.
pub fn band_index(value: f64, boundaries: &[f64]) -> usize {
    let bands = boundaries.len().saturating_sub(1).max(1);
    let mut idx = 0;
    while idx + 1 < boundaries.len() - 1 && value >= boundaries[idx + 1] {
        idx += 1;
    }
    idx.min(bands - 1)
}

/// Extract the isolines of `frame` at `level` as line segments
/// in data coordinates, one cell at a time with the standard
/// 16-case marching-squares table and linear edge interpolation.
///
/// `frame` has shape (ny, nx); `xs` and `ys` are the 1-D axes.
/// Cells containing non-finite values are skipped.
pub fn isolines(xs: &[f64], ys: &[f64], frame: ArrayView2<'_, f64>, level: f64) -> Vec<Segment> {
    let (ny, nx) = frame.dim();
    let mut segments = Vec::new();
    if nx < 2 || ny < 2 {
        return segments;
    }
    for j in 0..ny - 1 {
        for i in 0..nx - 1 {
            // corners in bl, br, tr, tl order
            let values = [
                frame[[j, i]],
                frame[[j, i + 1]],
                frame[[j + 1, i + 1]],
                frame[[j + 1, i]],
            ];
            if values.iter().any(|v| !v.is_finite()) {
                continue;
            }
            let corners = [
                (xs[i], ys[j]),
                (xs[i + 1], ys[j]),
                (xs[i + 1], ys[j + 1]),
                (xs[i], ys[j + 1]),
            ];

            let case = (values[0] > level) as u8
                | (((values[1] > level) as u8) << 1)
                | (((values[2] > level) as u8) << 2)
                | (((values[3] > level) as u8) << 3);

            // edges: 0 bottom, 1 right, 2 top, 3 left
            let mut emit = |edge_a: usize, edge_b: usize| {
                segments.push(Segment {
                    a: edge_point(edge_a, &corners, &values, level),
                    b: edge_point(edge_b, &corners, &values, level),
                });
            };
            match case {
                0 | 15 => {}
                1 | 14 => emit(3, 0),
                2 | 13 => emit(0, 1),
                3 | 12 => emit(3, 1),
                4 | 11 => emit(1, 2),
                6 | 9 => emit(0, 2),
                7 | 8 => emit(3, 2),
                5 => {
                    emit(3, 2);
                    emit(0, 1);
                }
                10 => {
                    emit(0, 1);
                    emit(3, 2);
                }
                _ => unreachable!(),
            }
        }
    }
    segments
}

fn edge_point(
    edge: usize,
    corners: &[(f64, f64); 4],
    values: &[f64; 4],
    level: f64,
) -> (f64, f64) {
    let (a_idx, b_idx) = match edge {
        0 => (0, 1),
        1 => (1, 2),
        2 => (2, 3),
        _ => (3, 0),
    };
    let (ax, ay) = corners[a_idx];
    let (bx, by) = corners[b_idx];
    let (va, vb) = (values[a_idx], values[b_idx]);
    let denom = (vb - va).abs().max(1e-12);
    let t = ((level - va) / denom).clamp(0.0, 1.0);
    (ax + (bx - ax) * t, ay + (by - ay) * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn boundaries_are_evenly_spaced() {
        let bounds = level_values((0.0, 10.0), 5);
        assert_eq!(bounds.len(), 6);
        for (k, b) in bounds.iter().enumerate() {
            assert_abs_diff_eq!(*b, 2.0 * k as f64);
        }
        // degenerate range is widened
        let degenerate = level_values((3.0, 3.0), 4);
        assert_abs_diff_eq!(degenerate[0], 3.0);
        assert_abs_diff_eq!(*degenerate.last().unwrap(), 4.0);
    }

    #[test]
    fn band_lookup_is_clamped() {
        let bounds = level_values((0.0, 4.0), 4);
        assert_eq!(band_index(-1.0, &bounds), 0);
        assert_eq!(band_index(0.5, &bounds), 0);
        assert_eq!(band_index(1.5, &bounds), 1);
        assert_eq!(band_index(3.9, &bounds), 3);
        assert_eq!(band_index(99.0, &bounds), 3);
    }

    #[test]
    fn flat_cell_yields_no_segments() {
        let frame = array![[1.0, 1.0], [1.0, 1.0]];
        assert!(isolines(&[0.0, 1.0], &[0.0, 1.0], frame.view(), 1.0).is_empty());
        assert!(isolines(&[0.0, 1.0], &[0.0, 1.0], frame.view(), 0.5).is_empty());
    }

    #[test]
    fn single_crossing_yields_one_segment() {
        // bottom row 0, top row 1; crossing 0.5 is horizontal at y = 0.5
        let frame = array![[0.0, 0.0], [1.0, 1.0]];
        let segs = isolines(&[0.0, 1.0], &[0.0, 1.0], frame.view(), 0.5);
        assert_eq!(segs.len(), 1);
        let seg = segs[0];
        assert_abs_diff_eq!(seg.a.1, 0.5);
        assert_abs_diff_eq!(seg.b.1, 0.5);
        let (x_lo, x_hi) = (seg.a.0.min(seg.b.0), seg.a.0.max(seg.b.0));
        assert_abs_diff_eq!(x_lo, 0.0);
        assert_abs_diff_eq!(x_hi, 1.0);
    }

    #[test]
    fn saddle_yields_two_segments() {
        let frame = array![[1.0, 0.0], [0.0, 1.0]];
        let segs = isolines(&[0.0, 1.0], &[0.0, 1.0], frame.view(), 0.5);
        assert_eq!(segs.len(), 2);
    }

    #[test]
    fn non_finite_cells_are_skipped() {
        let frame = array![[0.0, f64::NAN], [1.0, 1.0]];
        assert!(isolines(&[0.0, 1.0], &[0.0, 1.0], frame.view(), 0.5).is_empty());
    }
}
