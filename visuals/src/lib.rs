//! Contour visualization for [`fieldframe`] field series.
//!
//! Takes a [`fieldframe::FieldSeries`] and renders it as filled contour
//! plots: a single [static image][Renderer::render_static], a
//! [looping GIF animation][Renderer::render_animation] with a color
//! scale held fixed over the whole series, or a
//! [grid of snapshots][Renderer::render_snapshots] in one combined image.
//!
//! ```no_run
//! use fieldframe_visuals::{Renderer, RendererParams, AnimationOptions};
//!
//! let series = fieldframe::sample::evolving_wave(60, 60, 25);
//! let renderer = Renderer::new(RendererParams::default());
//! renderer.render_animation(&series, &AnimationOptions::default())?;
//! # Ok::<(), fieldframe_visuals::RenderError>(())
//! ```

#![warn(missing_docs)]

mod color_map;
pub mod contour;
mod renderer;

#[doc(inline)]
pub use color_map::{builtin_color_maps, ColorMap};
#[doc(inline)]
pub use renderer::{
    AnimationOptions, RenderError, Renderer, RendererParams, SnapshotOptions, StaticOptions,
};

pub use palette;
