//! Flyplot Scene - axis scaling, grid layout and label placement
//!
//! This crate provides:
//! - Per-axis range, grid step and direction derived from chart bounds
//! - Grid planes that turn toward the camera
//! - Tick value and axis name glyph placement
//! - An orbit camera with a default framing rule
//! - 3D and 2D scene controllers tying the above to a chart list
//!
//! Everything here is geometry: the rendering layer reads
//! [`GridPlane::line_segments`], [`Glyph::corners`] and [`AreaMarker::transform`]
//! and draws them however it likes.
//!
//! # Example
//!
//! ```no_run
//! use flyplot_scene::Plot3D;
//!
//! let mut plot = Plot3D::default();
//! plot.add_chart_file("runs/flight.txt")?;
//! plot.orbit(30.0, 0.0);
//!
//! for plane in plot.grid().planes() {
//!     println!("{}: {} lines", plane.plane, plane.line_segments().len());
//! }
//! # Ok::<(), flyplot_chart::ChartError>(())
//! ```

// Layout
pub mod axis;
pub mod grid;
pub mod label;
pub mod transform;

// Scene
pub mod area;
pub mod camera;
pub mod config;
pub mod plot2d;
pub mod plot3d;
pub mod scene;

pub mod snapshot;

pub use area::AreaMarker;
pub use axis::{AxisFrame, AxisSet, AxisState, Direction};
pub use camera::OrbitCamera;
pub use config::SceneConfig;
pub use grid::{Grid, GridPlane, Plane};
pub use label::{Glyph, MonospaceMetrics, NameLabels, TextMetrics, ValueLabels};
pub use plot2d::{Legend, LegendEntry, Plot2D, PlottedSeries};
pub use plot3d::{Plot3D, PlottedChart};
pub use scene::ChartScene;
pub use snapshot::Snapshot;
pub use transform::{GlyphFrame, Transform3D};
