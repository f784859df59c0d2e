//! Deterministic placeholder data for demonstrations and tests.
//!
//! Real use cases construct a [`FieldSeries`] from solver or
//! neural-operator output instead.

use std::f64::consts::PI;

use ndarray::{Array, Array3, Axis, Zip};

use crate::{FieldSeries, Grid};

/// Generate an evolving wave pattern on the [0, 2π] × [0, 2π] square
/// with `nt` time steps uniformly spaced over [0, 2]:
///
/// u(x, y, t) = sin(x + t) · cos(y + t/2) · e^(−t/10)
///            + 0.3 · sin(2x − t) · sin(y + t)
///
/// Pure and deterministic: identical inputs yield bit-identical output.
pub fn evolving_wave(nx: usize, ny: usize, nt: usize) -> FieldSeries {
    let x_axis = Array::linspace(0.0, 2.0 * PI, nx);
    let y_axis = Array::linspace(0.0, 2.0 * PI, ny);
    let grid = Grid::meshgrid(&x_axis, &y_axis);
    let times = Array::linspace(0.0, 2.0, nt);

    let mut values = Array3::zeros((nt, ny, nx));
    for (i, &t) in times.iter().enumerate() {
        let mut frame = values.index_axis_mut(Axis(0), i);
        Zip::from(&mut frame)
            .and(grid.x())
            .and(grid.y())
            .for_each(|u, &x, &y| {
                *u = (x + t).sin() * (y + 0.5 * t).cos() * (-0.1 * t).exp()
                    + 0.3 * (2.0 * x - t).sin() * (y + t).sin();
            });
    }

    FieldSeries::new_unchecked(grid, times, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn shapes_match_the_requested_sizes() {
        for (nx, ny, nt) in [(1, 1, 1), (5, 4, 3), (60, 60, 25)] {
            let series = evolving_wave(nx, ny, nt);
            assert_eq!(series.grid().shape(), (ny, nx));
            assert_eq!(series.times().len(), nt);
            assert_eq!(series.values().dim(), (nt, ny, nx));
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = evolving_wave(17, 11, 6);
        let b = evolving_wave(17, 11, 6);
        assert_eq!(a.values(), b.values());
        assert_eq!(a.times(), b.times());
        assert_eq!(a.grid().x(), b.grid().x());
    }

    #[test]
    fn values_follow_the_wave_formula() {
        let series = evolving_wave(4, 3, 5);
        let i = 3;
        let t = series.time(i).unwrap();
        let frame = series.frame(i).unwrap();
        for j in 0..3 {
            for k in 0..4 {
                let x = series.grid().x()[[j, k]];
                let y = series.grid().y()[[j, k]];
                let expected = (x + t).sin() * (y + 0.5 * t).cos() * (-0.1 * t).exp()
                    + 0.3 * (2.0 * x - t).sin() * (y + t).sin();
                assert_abs_diff_eq!(frame[[j, k]], expected);
            }
        }
    }

    #[test]
    fn domain_covers_the_two_pi_square() {
        let series = evolving_wave(10, 10, 2);
        let xs = series.grid().x_axis();
        assert_abs_diff_eq!(xs[0], 0.0);
        assert_abs_diff_eq!(xs[9], 2.0 * PI);
        assert_abs_diff_eq!(series.times()[0], 0.0);
        assert_abs_diff_eq!(series.times()[1], 2.0);
    }
}
