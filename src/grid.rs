//! Spatial coordinate grids built from two independent 1-D axes.

use itertools::izip;
use ndarray::{Array1, Array2};

use crate::series::ShapeError;

/// A pair of 2-D coordinate arrays of equal shape (ny × nx),
/// the outer product of an x axis and a y axis.
///
/// Row `j` of the x array repeats the x axis,
/// column `i` of the y array repeats the y axis,
/// so `(x[[j, i]], y[[j, i]])` is the position of grid point `(i, j)`.
#[derive(Clone, Debug)]
pub struct Grid {
    x: Array2<f64>,
    y: Array2<f64>,
}

impl Grid {
    /// Build a grid from two 1-D coordinate vectors.
    pub fn meshgrid(x_axis: &Array1<f64>, y_axis: &Array1<f64>) -> Self {
        let (nx, ny) = (x_axis.len(), y_axis.len());
        let mut x = Array2::zeros((ny, nx));
        let mut y = Array2::zeros((ny, nx));
        for (mut x_row, mut y_row, &yv) in
            izip!(x.outer_iter_mut(), y.outer_iter_mut(), y_axis.iter())
        {
            x_row.assign(x_axis);
            y_row.fill(yv);
        }
        Self { x, y }
    }

    /// Wrap premade coordinate arrays, e.g. from an external data source.
    ///
    /// Fails if the arrays do not have the same shape.
    pub fn from_arrays(x: Array2<f64>, y: Array2<f64>) -> Result<Self, ShapeError> {
        if x.dim() != y.dim() {
            return Err(ShapeError::GridMismatch {
                x: x.dim(),
                y: y.dim(),
            });
        }
        Ok(Self { x, y })
    }

    /// The x coordinate array.
    #[inline]
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// The y coordinate array.
    #[inline]
    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    /// Number of grid points along the x axis.
    #[inline]
    pub fn nx(&self) -> usize {
        self.x.dim().1
    }

    /// Number of grid points along the y axis.
    #[inline]
    pub fn ny(&self) -> usize {
        self.x.dim().0
    }

    /// Shape of the coordinate arrays as (ny, nx).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }

    /// Recover the 1-D x axis (the first row of the x array).
    pub fn x_axis(&self) -> Array1<f64> {
        self.x.row(0).to_owned()
    }

    /// Recover the 1-D y axis (the first column of the y array).
    pub fn y_axis(&self) -> Array1<f64> {
        self.y.column(0).to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array;

    #[test]
    fn meshgrid_shapes_and_values() {
        let x = Array::linspace(0.0, 3.0, 4);
        let y = Array::linspace(0.0, 2.0, 3);
        let grid = Grid::meshgrid(&x, &y);

        assert_eq!(grid.shape(), (3, 4));
        assert_eq!(grid.nx(), 4);
        assert_eq!(grid.ny(), 3);
        // every row of X repeats the x axis, every column of Y the y axis
        for j in 0..3 {
            for i in 0..4 {
                assert_abs_diff_eq!(grid.x()[[j, i]], x[i]);
                assert_abs_diff_eq!(grid.y()[[j, i]], y[j]);
            }
        }
    }

    #[test]
    fn axes_are_recovered() {
        let x = Array::linspace(-1.0, 1.0, 5);
        let y = Array::linspace(0.0, 10.0, 7);
        let grid = Grid::meshgrid(&x, &y);
        assert_abs_diff_eq!(grid.x_axis(), x, epsilon = 1e-12);
        assert_abs_diff_eq!(grid.y_axis(), y, epsilon = 1e-12);
    }

    #[test]
    fn from_arrays_rejects_mismatched_shapes() {
        let x = Array2::zeros((3, 4));
        let y = Array2::zeros((4, 3));
        assert!(Grid::from_arrays(x, y).is_err());
    }
}
