//! The field renderer and its three rendering operations.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::info;
use ndarray::ArrayView2;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;

use fieldframe::FieldSeries;

use crate::color_map::{builtin_color_maps, ColorMap};
use crate::contour;

/// Errors surfaced by rendering operations.
///
/// None of these are recovered from; they propagate to the caller
/// and terminate the invoking operation. A failed file write may
/// leave a partial file behind.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// A requested time index does not exist in the series.
    #[error("time index {index} out of range for series of length {len}")]
    FrameOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of time steps in the series.
        len: usize,
    },
    /// The series or snapshot selection holds nothing to draw.
    #[error("nothing to draw (empty series or snapshot selection)")]
    Empty,
    /// The plotting backend failed.
    #[error("drawing failed: {0}")]
    Draw(String),
    /// A filesystem operation failed.
    #[error("filesystem operation failed: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Configuration for a [`Renderer`].
///
/// Created once at construction and read-only afterwards;
/// all rendering operations share it.
#[derive(Clone, Debug)]
pub struct RendererParams {
    /// Figure size in inches (width, height). Default: 12 × 8.
    pub fig_size: (f64, f64),
    /// Output resolution in dots per inch. Default: 100.
    pub dpi: u32,
    /// Color map for filled contours and legends.
    /// Default: [`builtin_color_maps::vivid`].
    pub color_map: ColorMap,
}

impl Default for RendererParams {
    fn default() -> Self {
        Self {
            fig_size: (12.0, 8.0),
            dpi: 100,
            color_map: builtin_color_maps::vivid(),
        }
    }
}

/// Options for [`Renderer::render_static`].
#[derive(Clone, Debug)]
pub struct StaticOptions {
    /// Plot title; the time index is appended to it.
    pub title: String,
    /// Where to write the image. `None` renders to a throwaway
    /// in-memory buffer (the draw path still runs in full).
    pub output_path: Option<PathBuf>,
    /// Number of filled contour bands. Default: 20.
    pub levels: usize,
}

impl Default for StaticOptions {
    fn default() -> Self {
        Self {
            title: "PDE Solution".to_string(),
            output_path: None,
            levels: 20,
        }
    }
}

/// Options for [`Renderer::render_animation`].
#[derive(Clone, Debug)]
pub struct AnimationOptions {
    /// Animation title; the current time value is appended per frame.
    pub title: String,
    /// Whether to encode the frames to `output_path`.
    /// When false, frames are drawn to an in-memory buffer instead.
    pub save: bool,
    /// Path of the GIF to write. Default: `pde_evolution.gif`.
    pub output_path: PathBuf,
    /// Number of filled contour bands. Default: 20.
    pub levels: usize,
    /// Delay between GIF frames in milliseconds.
    /// Default: 200 (5 frames per second).
    pub frame_interval_ms: u32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            title: "Dynamic PDE Evolution".to_string(),
            save: true,
            output_path: PathBuf::from("pde_evolution.gif"),
            levels: 20,
            frame_interval_ms: 200,
        }
    }
}

/// Options for [`Renderer::render_snapshots`].
#[derive(Clone, Debug)]
pub struct SnapshotOptions {
    /// Number of filled contour bands per panel. Default: 20.
    pub levels: usize,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self { levels: 20 }
    }
}

/// Renders a [`FieldSeries`] as filled contour plots:
/// single stills, looping GIF animations, and snapshot grids.
///
/// Each filled band is drawn as per-cell rectangles colored by the band
/// of the cell-average value, with marching-squares isolines overlaid
/// and a color legend in a right-hand strip.
pub struct Renderer {
    params: RendererParams,
}

impl Renderer {
    /// Create a renderer with the given configuration.
    pub fn new(params: RendererParams) -> Self {
        Self { params }
    }

    /// The renderer's configuration.
    pub fn params(&self) -> &RendererParams {
        &self.params
    }

    fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.params.fig_size;
        (
            (w * self.params.dpi as f64).round() as u32,
            (h * self.params.dpi as f64).round() as u32,
        )
    }

    /// Render a single time slice as a filled contour plot.
    ///
    /// The color scale is local to the chosen frame.
    /// Writes a PNG when `opts.output_path` is set.
    pub fn render_static(
        &self,
        series: &FieldSeries,
        frame_idx: usize,
        opts: &StaticOptions,
    ) -> Result<(), RenderError> {
        let frame = series
            .frame(frame_idx)
            .ok_or(RenderError::FrameOutOfRange {
                index: frame_idx,
                len: series.len(),
            })?;
        let range = view_range(frame).ok_or(RenderError::Empty)?;
        let title = format!("{} (t = {})", opts.title, frame_idx);
        let xs = series.grid().x_axis().to_vec();
        let ys = series.grid().y_axis().to_vec();
        let (w, h) = self.pixel_size();

        match &opts.output_path {
            Some(path) => {
                let root = BitMapBackend::new(path, (w, h)).into_drawing_area();
                self.draw_figure(&root, &xs, &ys, frame, &title, range, opts.levels)?;
                root.present().map_err(draw_err)?;
                info!("Static plot saved to: {}", path.display());
            }
            None => {
                let mut buf = vec![0u8; (w * h * 3) as usize];
                let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
                self.draw_figure(&root, &xs, &ys, frame, &title, range, opts.levels)?;
                root.present().map_err(draw_err)?;
            }
        }
        Ok(())
    }

    /// Render the whole series as an animation, one frame per time step.
    ///
    /// Every frame is fully redrawn with a color scale fixed to the
    /// (min, max) of the *entire* tensor, so the color-to-value mapping
    /// cannot drift between frames. The frame title shows the current
    /// time value to 3 decimal places. With `opts.save` set, the frames
    /// are encoded as a looping GIF at `opts.frame_interval_ms` per frame.
    pub fn render_animation(
        &self,
        series: &FieldSeries,
        opts: &AnimationOptions,
    ) -> Result<(), RenderError> {
        // global scale, computed once over the full tensor
        let range = series.value_range().ok_or(RenderError::Empty)?;
        let xs = series.grid().x_axis().to_vec();
        let ys = series.grid().y_axis().to_vec();
        let (w, h) = self.pixel_size();

        if opts.save {
            let root =
                BitMapBackend::gif(&opts.output_path, (w, h), opts.frame_interval_ms)
                    .map_err(draw_err)?
                    .into_drawing_area();
            self.draw_animation_frames(&root, series, &xs, &ys, range, opts)?;
            info!("Animation saved as: {}", opts.output_path.display());
        } else {
            let mut buf = vec![0u8; (w * h * 3) as usize];
            let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
            self.draw_animation_frames(&root, series, &xs, &ys, range, opts)?;
        }
        Ok(())
    }

    fn draw_animation_frames<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        series: &FieldSeries,
        xs: &[f64],
        ys: &[f64],
        range: (f64, f64),
        opts: &AnimationOptions,
    ) -> Result<(), RenderError> {
        for i in 0..series.len() {
            let frame = series.frame(i).ok_or(RenderError::FrameOutOfRange {
                index: i,
                len: series.len(),
            })?;
            let t = series.time(i).unwrap_or_default();
            let title = format!("{} (t = {:.3})", opts.title, t);
            self.draw_figure(root, xs, ys, frame, &title, range, opts.levels)?;
            // with the GIF backend, each present() finalizes one frame
            root.present().map_err(draw_err)?;
        }
        Ok(())
    }

    /// Render a grid of time slices into one combined image.
    ///
    /// With `indices` of `None`, four evenly spaced snapshots
    /// {0, nt/3, 2·nt/3, nt−1} are chosen. The panel grid has at most
    /// two columns; unused slots stay blank. All panels share a color
    /// scale fixed to the (min, max) of the entire tensor, independent
    /// of which indices were chosen, and one shared legend.
    ///
    /// Creates `out_dir` if needed and writes
    /// `snapshots_<YYYYMMDD_HHMMSS>.png` inside it,
    /// returning the written path.
    pub fn render_snapshots(
        &self,
        series: &FieldSeries,
        indices: Option<&[usize]>,
        out_dir: &Path,
        opts: &SnapshotOptions,
    ) -> Result<PathBuf, RenderError> {
        if series.is_empty() {
            return Err(RenderError::Empty);
        }
        let indices: Vec<usize> = match indices {
            Some(idx) => idx.to_vec(),
            None => default_snapshot_indices(series.len()),
        };
        if indices.is_empty() {
            return Err(RenderError::Empty);
        }
        for &idx in &indices {
            if idx >= series.len() {
                return Err(RenderError::FrameOutOfRange {
                    index: idx,
                    len: series.len(),
                });
            }
        }
        let range = series.value_range().ok_or(RenderError::Empty)?;
        let xs = series.grid().x_axis().to_vec();
        let ys = series.grid().y_axis().to_vec();

        let (rows, cols) = snapshot_layout(indices.len());
        let (base_w, base_h) = self.pixel_size();
        let w = (base_w * cols as u32 / 2).max(1);
        let h = (base_h * rows as u32 / 2).max(1);

        fs::create_dir_all(out_dir)?;
        let filename = format!("snapshots_{}.png", Local::now().format("%Y%m%d_%H%M%S"));
        let path = out_dir.join(filename);

        {
            let root = BitMapBackend::new(&path, (w, h)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            let root = root
                .titled("PDE Solution Snapshots", ("sans-serif", 24))
                .map_err(draw_err)?;

            let (rw, _) = root.dim_in_pixel();
            let bar_w = color_bar_width(rw);
            let (main, bar) = root.split_horizontally((rw - bar_w) as i32);

            let panels = main.split_evenly((rows, cols));
            for (panel, &idx) in panels.iter().zip(&indices) {
                let frame = series.frame(idx).ok_or(RenderError::FrameOutOfRange {
                    index: idx,
                    len: series.len(),
                })?;
                let t = series.time(idx).unwrap_or_default();
                let title = format!("t = {:.3}", t);
                draw_panel(
                    panel,
                    &xs,
                    &ys,
                    frame,
                    &title,
                    range,
                    opts.levels,
                    &self.params.color_map,
                    17,
                    14,
                )?;
            }
            draw_color_bar(&bar, &self.params.color_map, range, 14)?;
            root.present().map_err(draw_err)?;
        }
        info!("Snapshots saved to: {}", path.display());
        Ok(path)
    }

    /// Fill the canvas and draw one panel plus its color legend.
    fn draw_figure<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        xs: &[f64],
        ys: &[f64],
        frame: ArrayView2<'_, f64>,
        title: &str,
        range: (f64, f64),
        levels: usize,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(draw_err)?;
        let (w, _) = root.dim_in_pixel();
        let bar_w = color_bar_width(w);
        let (main, bar) = root.split_horizontally((w - bar_w) as i32);
        draw_panel(
            &main,
            xs,
            ys,
            frame,
            title,
            range,
            levels,
            &self.params.color_map,
            20,
            16,
        )?;
        draw_color_bar(&bar, &self.params.color_map, range, 15)
    }
}

/// Default snapshot selection: 4 indices evenly spaced across [0, nt),
/// {0, nt/3, 2·nt/3, nt−1} with integer division.
pub(crate) fn default_snapshot_indices(nt: usize) -> Vec<usize> {
    vec![0, nt / 3, 2 * nt / 3, nt.saturating_sub(1)]
}

/// Subplot grid layout for `n` panels: at most 2 columns,
/// as many rows as needed. Returns (rows, cols).
pub(crate) fn snapshot_layout(n: usize) -> (usize, usize) {
    let cols = n.min(2).max(1);
    ((n + cols - 1) / cols, cols)
}

fn color_bar_width(w: u32) -> u32 {
    (w / 8).max(36).min(90).min((w / 2).max(1))
}

fn view_range(frame: ArrayView2<'_, f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in frame.iter() {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    (min <= max).then_some((min, max))
}

fn axis_span(axis: &[f64]) -> (f64, f64) {
    let lo = axis.first().copied().unwrap_or(0.0);
    let hi = axis.last().copied().unwrap_or(0.0);
    if hi > lo {
        (lo, hi)
    } else {
        (lo, lo + 1.0)
    }
}

/// Draw one filled contour panel: banded cells, grid mesh with axis
/// labels, and semi-transparent isoline overlays, with margins chosen
/// to square the chart box (equal aspect for the square spatial domain).
#[allow(clippy::too_many_arguments)]
fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    xs: &[f64],
    ys: &[f64],
    frame: ArrayView2<'_, f64>,
    title: &str,
    range: (f64, f64),
    levels: usize,
    cmap: &ColorMap,
    title_font: u32,
    label_font: u32,
) -> Result<(), RenderError> {
    let (w, h) = area.dim_in_pixel();
    // label areas shrink with the panel so small subplots keep a chart box
    let x_label_area = (h / 5).min(36).max(8);
    let y_label_area = (w / 5).min(52).max(8);
    let caption_area = title_font + 8;

    // square the chart box by absorbing the excess into margins
    let plot_w = w.saturating_sub(y_label_area + 12);
    let plot_h = h.saturating_sub(x_label_area + caption_area + 12);
    let side = plot_w.min(plot_h);
    let (extra_w, extra_h) = (plot_w - side, plot_h - side);
    let (ml, mt) = (6 + extra_w / 2, 6 + extra_h / 2);
    let (mr, mb) = (6 + extra_w - extra_w / 2, 6 + extra_h - extra_h / 2);

    let (x0, x1) = axis_span(xs);
    let (y0, y1) = axis_span(ys);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", title_font))
        .margin_left(ml)
        .margin_right(mr)
        .margin_top(mt)
        .margin_bottom(mb)
        .x_label_area_size(x_label_area)
        .y_label_area_size(y_label_area)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(draw_err)?;

    let boundaries = contour::level_values(range, levels);
    let bands = boundaries.len() - 1;

    let (ny, nx) = frame.dim();
    let mut cells = Vec::with_capacity(nx.saturating_sub(1) * ny.saturating_sub(1));
    for j in 0..ny.saturating_sub(1) {
        for i in 0..nx - 1 {
            let corners = [
                frame[[j, i]],
                frame[[j, i + 1]],
                frame[[j + 1, i]],
                frame[[j + 1, i + 1]],
            ];
            if corners.iter().any(|v| !v.is_finite()) {
                continue;
            }
            let avg = corners.iter().sum::<f64>() / 4.0;
            let band = contour::band_index(avg, &boundaries);
            let color = cmap.sample((band as f64 + 0.5) / bands as f64);
            cells.push(Rectangle::new(
                [(xs[i], ys[j]), (xs[i + 1], ys[j + 1])],
                color.filled(),
            ));
        }
    }
    chart.draw_series(cells).map_err(draw_err)?;

    let grid_line = BLACK.mix(0.15);
    chart
        .configure_mesh()
        .x_desc("X")
        .y_desc("Y")
        .axis_desc_style(("sans-serif", label_font))
        .label_style(("sans-serif", label_font.saturating_sub(2).max(8)))
        .bold_line_style(&grid_line)
        .light_line_style(&TRANSPARENT)
        .draw()
        .map_err(draw_err)?;

    // thin semi-transparent contour lines over the fill
    let line_color = WHITE.mix(0.3);
    let line_style = ShapeStyle::from(&line_color).stroke_width(1);
    for &level in &boundaries[1..boundaries.len() - 1] {
        let segments = contour::isolines(xs, ys, frame, level);
        chart
            .draw_series(
                segments
                    .into_iter()
                    .map(|s| PathElement::new(vec![s.a, s.b], line_style)),
            )
            .map_err(draw_err)?;
    }
    Ok(())
}

/// Draw a vertical color legend: gradient strip, min/mid/max tick
/// labels, and a rotated "Solution Value" caption.
fn draw_color_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    cmap: &ColorMap,
    range: (f64, f64),
    label_font: u32,
) -> Result<(), RenderError> {
    let (w, h) = area.dim_in_pixel();
    let top = (h as i32 / 10).max(10);
    let bottom = h as i32 - top - 12;
    if bottom <= top || w < 24 {
        return Ok(());
    }
    let (x0, x1) = (4i32, 16i32);

    for y in top..bottom {
        let t = 1.0 - (y - top) as f64 / (bottom - 1 - top).max(1) as f64;
        area.draw(&Rectangle::new(
            [(x0, y), (x1, y + 1)],
            cmap.sample(t).filled(),
        ))
        .map_err(draw_err)?;
    }
    area.draw(&Rectangle::new(
        [(x0, top), (x1, bottom)],
        ShapeStyle::from(&BLACK),
    ))
    .map_err(draw_err)?;

    let (lo, hi) = range;
    let ticks = [(hi, top), (0.5 * (lo + hi), (top + bottom) / 2), (lo, bottom)];
    for (value, y) in ticks {
        area.draw(&Text::new(
            format!("{:.2}", value),
            (x1 + 4, y - label_font as i32 / 2),
            ("sans-serif", label_font).into_font(),
        ))
        .map_err(draw_err)?;
    }

    if w >= 70 {
        area.draw(&Text::new(
            "Solution Value",
            (w as i32 - 6, (top + bottom) / 2 - 40),
            ("sans-serif", label_font)
                .into_font()
                .transform(FontTransform::Rotate90),
        ))
        .map_err(draw_err)?;
    }
    Ok(())
}
