//! Flyplot - trajectory chart viewer core
//!
//! Flyplot reads small text chart files and lays out everything a plot
//! window needs to draw them:
//!
//! - **Chart files**: line-oriented `2D`/`3D` chart parsing with located errors
//! - **Axes**: grid step, rounded range and resting side from the data bounds
//! - **Grid**: three bounding planes that turn toward the camera
//! - **Labels**: tick values and axis names placed along the grid edges
//! - **Scenes**: 3D and 2D controllers over a chart and area list
//!
//! # Quick Start
//!
//! ```no_run
//! use flyplot::prelude::*;
//!
//! fn main() -> ChartResult<()> {
//!     flyplot::core::logging::init();
//!
//!     let mut plot = Plot3D::default();
//!     plot.add_chart_file("runs/flight.txt")?;
//!
//!     let (min, max) = plot.scene_bounds();
//!     println!("grid from {} to {}", min, max);
//!     Ok(())
//! }
//! ```

pub use flyplot_chart as chart;
pub use flyplot_core as core;
pub use flyplot_core::math;
pub use flyplot_scene as scene;

pub use flyplot_chart::{
    AnyChart, Chart2D, Chart3D, ChartError, ChartResult, ChartSource, load_chart,
};
pub use flyplot_scene::{ChartScene, Plot2D, Plot3D, SceneConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use flyplot_chart::{
        AnyChart, AreaSpec, Axis, AxisLabel, Chart2D, Chart3D, ChartError, ChartKind, ChartParser,
        ChartResult, ChartSource, FormatError, Parser2DChartFile, Parser3DChartFile, load_chart,
    };

    pub use flyplot_core::Color;
    pub use flyplot_core::math::{DMat4, DVec2, DVec3, Extent};

    pub use flyplot_scene::{
        AreaMarker, AxisFrame, ChartScene, Direction, Glyph, Grid, GridPlane, OrbitCamera, Plane,
        Plot2D, Plot3D, SceneConfig, Snapshot, TextMetrics,
    };
}

/// Load any chart file into the matching scene kind.
///
/// A 3D chart goes into `plot3d`, a 2D chart into `plot2d`, each together
/// with the areas its file declares. Returns the chart's index in its scene.
pub fn open_chart(
    path: impl AsRef<std::path::Path>,
    plot3d: &mut Plot3D,
    plot2d: &mut Plot2D,
) -> ChartResult<(chart::ChartKind, usize)> {
    let kind = match load_chart(path)? {
        AnyChart::ThreeD(chart) => (chart::ChartKind::ThreeD, plot3d.add_chart_with_areas(chart)),
        AnyChart::TwoD(chart) => (chart::ChartKind::TwoD, plot2d.add_chart_with_areas(chart)),
    };
    tracing::debug!("Opened {} chart #{}", kind.0, kind.1);
    Ok(kind)
}
