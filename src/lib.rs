//! Data model for spatial-temporal scalar fields,
//! such as the output of a PDE solver or a neural operator.
//!
//! This crate holds the arrays and their shape invariants:
//! coordinate grids ([`Grid`]), time vectors,
//! and the solution tensor wrapped in a [`FieldSeries`].
//! Rendering these as contour images and animations
//! is done by the `fieldframe-visuals` crate.
//!
//! In the absence of a real data source,
//! [`sample::evolving_wave`] produces a deterministic placeholder series.

#![warn(missing_docs)]

pub mod grid;
#[doc(inline)]
pub use grid::Grid;

pub mod series;
#[doc(inline)]
pub use series::{FieldSeries, ShapeError};

pub mod sample;

// ndarray re-export for convenience, so downstream code
// can name the array types without a separate dependency version to match
pub use ndarray;
