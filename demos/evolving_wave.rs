//! Generates an evolving wave and renders all three output kinds:
//! a static contour still, a looping GIF animation, and a snapshot grid.
//!
//! Run with `RUST_LOG=info` to see where each file lands.

use std::path::Path;

use fieldframe::sample;
use fieldframe_visuals::{
    AnimationOptions, Renderer, RendererParams, SnapshotOptions, StaticOptions,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Starting PDE visualization...");
    println!("Generating sample data...");
    let series = sample::evolving_wave(60, 60, 25);

    let renderer = Renderer::new(RendererParams::default());

    println!("Creating static contour plot...");
    renderer.render_static(
        &series,
        10,
        &StaticOptions {
            output_path: Some("static_contour.png".into()),
            ..Default::default()
        },
    )?;

    println!("Creating animated contour plot...");
    renderer.render_animation(
        &series,
        &AnimationOptions {
            levels: 25,
            ..Default::default()
        },
    )?;

    println!("Creating snapshot grid...");
    let snapshot_path = renderer.render_snapshots(
        &series,
        Some(&[0, 8, 16, 24]),
        Path::new("snapshots"),
        &SnapshotOptions::default(),
    )?;

    println!();
    println!("Visualization complete!");
    println!("Generated files:");
    println!("- static_contour.png: static contour plot");
    println!("- pde_evolution.gif: animated contour evolution");
    println!("- {}: combined snapshots", snapshot_path.display());
    Ok(())
}
