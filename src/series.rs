//! Time series of scalar fields over a fixed spatial grid.

use ndarray::{Array1, Array3, ArrayView2, Axis};

use crate::grid::Grid;

/// Error type for dimension disagreements between
/// coordinate arrays, the time vector, and the solution tensor.
#[derive(thiserror::Error, Debug)]
pub enum ShapeError {
    /// The grid's coordinate arrays have different shapes.
    #[error("grid coordinate arrays disagree: x is {x:?}, y is {y:?}")]
    GridMismatch {
        /// Shape of the x coordinate array.
        x: (usize, usize),
        /// Shape of the y coordinate array.
        y: (usize, usize),
    },
    /// The tensor's leading dimension does not match the time vector.
    #[error("solution tensor has {actual} time slices, expected {expected}")]
    TimeMismatch {
        /// Length of the time vector.
        expected: usize,
        /// Leading dimension of the tensor.
        actual: usize,
    },
    /// The tensor's spatial dimensions do not match the grid.
    #[error("solution tensor frames are {actual:?}, expected grid shape {expected:?}")]
    FrameMismatch {
        /// Shape of the grid, (ny, nx).
        expected: (usize, usize),
        /// Trailing dimensions of the tensor.
        actual: (usize, usize),
    },
}

/// A solution tensor of shape (nt, ny, nx) together with
/// the grid and time vector it is sampled on.
///
/// `values.index_axis(0, i)` is the scalar field at `times[i]`.
/// The series is immutable once constructed;
/// rendering operations only ever borrow it.
#[derive(Clone, Debug)]
pub struct FieldSeries {
    grid: Grid,
    times: Array1<f64>,
    values: Array3<f64>,
}

impl FieldSeries {
    /// Assemble a series, checking the shape contract:
    /// the tensor's leading dimension must equal the time vector's length
    /// and its trailing dimensions must equal the grid shape.
    pub fn from_parts(
        grid: Grid,
        times: Array1<f64>,
        values: Array3<f64>,
    ) -> Result<Self, ShapeError> {
        let (nt, ny, nx) = values.dim();
        if nt != times.len() {
            return Err(ShapeError::TimeMismatch {
                expected: times.len(),
                actual: nt,
            });
        }
        if (ny, nx) != grid.shape() {
            return Err(ShapeError::FrameMismatch {
                expected: grid.shape(),
                actual: (ny, nx),
            });
        }
        Ok(Self {
            grid,
            times,
            values,
        })
    }

    /// Constructor for series whose shapes are correct by construction.
    pub(crate) fn new_unchecked(grid: Grid, times: Array1<f64>, values: Array3<f64>) -> Self {
        Self {
            grid,
            times,
            values,
        }
    }

    /// The spatial grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The time vector.
    #[inline]
    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    /// The full solution tensor.
    #[inline]
    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }

    /// Number of time steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the series contains any time steps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The scalar field at time index `i`, or `None` if `i` is out of range.
    pub fn frame(&self, i: usize) -> Option<ArrayView2<'_, f64>> {
        (i < self.len()).then(|| self.values.index_axis(Axis(0), i))
    }

    /// The time value at index `i`, or `None` if `i` is out of range.
    pub fn time(&self, i: usize) -> Option<f64> {
        self.times.get(i).copied()
    }

    /// (min, max) over the *entire* tensor, ignoring non-finite values.
    ///
    /// This is the fixed color scale shared by every frame of an animation
    /// and every panel of a snapshot grid, so that the color-to-value
    /// mapping does not drift between frames.
    /// `None` if the series holds no finite values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &self.values {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        (min <= max).then_some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    fn square_grid(n: usize) -> Grid {
        let axis = Array::linspace(0.0, 1.0, n);
        Grid::meshgrid(&axis, &axis)
    }

    #[test]
    fn shape_contract_is_enforced() {
        let grid = square_grid(4);
        let times = Array::linspace(0.0, 1.0, 3);

        // wrong number of time slices
        let bad_t = Array3::zeros((2, 4, 4));
        assert!(matches!(
            FieldSeries::from_parts(grid.clone(), times.clone(), bad_t),
            Err(ShapeError::TimeMismatch { .. })
        ));

        // wrong spatial shape
        let bad_s = Array3::zeros((3, 4, 5));
        assert!(matches!(
            FieldSeries::from_parts(grid.clone(), times.clone(), bad_s),
            Err(ShapeError::FrameMismatch { .. })
        ));

        let ok = Array3::zeros((3, 4, 4));
        assert!(FieldSeries::from_parts(grid, times, ok).is_ok());
    }

    #[test]
    fn value_range_spans_the_whole_tensor() {
        let grid = square_grid(2);
        let times = Array::linspace(0.0, 1.0, 2);
        let mut values = Array3::zeros((2, 2, 2));
        // frame 0 peaks at 1.0, frame 1 dips to -3.0 and peaks at 5.0
        values[[0, 0, 0]] = 1.0;
        values[[1, 1, 1]] = 5.0;
        values[[1, 0, 1]] = -3.0;
        let series = FieldSeries::from_parts(grid, times, values).unwrap();

        // the global range is not affected by which frame is inspected
        assert_eq!(series.value_range(), Some((-3.0, 5.0)));
        let f0 = series.frame(0).unwrap();
        let local_max = f0.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(local_max, 1.0);
        assert_eq!(series.value_range(), Some((-3.0, 5.0)));
    }

    #[test]
    fn frame_access_is_bounds_checked() {
        let grid = square_grid(3);
        let times = Array::linspace(0.0, 1.0, 4);
        let values = Array3::zeros((4, 3, 3));
        let series = FieldSeries::from_parts(grid, times, values).unwrap();

        assert!(series.frame(3).is_some());
        assert!(series.frame(4).is_none());
        assert!(series.time(4).is_none());
    }
}
