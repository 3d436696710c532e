//! Load a chart file and log the scene layout it produces.
//!
//! Prints the axis ranges and steps, the grid planes, the placed labels and
//! the default camera for a 3D chart, or the legend for a 2D chart.
//!
//! Run with: cargo run -p flyplot --example inspect -- [-v] path/to/chart.txt
//!
//! `-v` logs every placed glyph. Building with `--features profiling-server`
//! serves puffin scopes on 127.0.0.1:8585, one frame per opened file.

use flyplot::prelude::*;

fn inspect_3d(plot: &Plot3D) {
    tracing::info!("Scene: {}", plot.description());
    for (axis, state) in plot.axes().iter() {
        let f = state.frame;
        tracing::info!(
            "  {}: [{}, {}] step {} {:?}, {} ticks, names {:?}",
            axis,
            f.min,
            f.max,
            f.space,
            f.direction,
            state.values.glyphs.len(),
            state.names.texts().collect::<Vec<_>>()
        );
    }
    for plane in plot.grid().planes() {
        tracing::info!(
            "  plane {} at {} ({} lines)",
            plane.plane,
            plane.transform.translation(),
            plane.line_segments().len()
        );
    }
    for area in plot.areas() {
        tracing::info!("  area r={} at {}", area.radius(), area.center());
    }
    let camera = plot.camera();
    tracing::info!(
        "  camera at {} (azimuth {:.1}, elevation {:.1})",
        camera.position(),
        camera.azimuth,
        camera.elevation
    );
}

fn inspect_2d(plot: &Plot2D) {
    let legend = plot.legend();
    tracing::info!("Scene: {}", plot.description());
    tracing::info!("  left: '{}', bottom: '{}'", legend.left_title, legend.bottom_title);
    if let Some((x, y)) = plot.view_bounds() {
        tracing::info!("  view x [{}, {}], y [{}, {}]", x.min, x.max, y.min, y.max);
    }
}

fn main() {
    let (flags, paths): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|arg| arg.starts_with('-'));
    if flags.iter().any(|f| f == "-v") {
        flyplot::core::logging::init_with_filter("info,flyplot_scene=trace,flyplot_chart=trace");
    } else {
        flyplot::core::logging::init();
    }

    #[cfg(feature = "profiling-server")]
    flyplot::core::profiling::init_server("127.0.0.1:8585");

    if paths.is_empty() {
        eprintln!("usage: inspect [-v] <chart file>...");
        std::process::exit(2);
    }

    let mut plot3d = Plot3D::default();
    let mut plot2d = Plot2D::default();
    for path in &paths {
        if let Err(e) = flyplot::open_chart(path, &mut plot3d, &mut plot2d) {
            tracing::error!("{}", e);
        }
        flyplot::core::profiling::new_frame();
    }

    if !plot3d.charts().is_empty() {
        inspect_3d(&plot3d);
    }
    if !plot2d.series().is_empty() {
        inspect_2d(&plot2d);
    }
}
