//! Flyplot Chart
//!
//! Chart records and the line-oriented chart file format.
//!
//! ```no_run
//! use flyplot_chart::{AnyChart, load_chart};
//!
//! match load_chart("runs/flight.txt")? {
//!     AnyChart::ThreeD(chart) => println!("{} samples", chart.coords.len()),
//!     AnyChart::TwoD(chart) => println!("{} points", chart.x.len()),
//! }
//! # Ok::<(), flyplot_chart::ChartError>(())
//! ```

pub mod error;
pub mod model;
pub mod parser;
pub mod source;

pub use error::{ChartError, ChartResult, FormatError};
pub use model::{AnyChart, AreaSpec, Axis, AxisInfo, AxisLabel, Chart2D, Chart3D, ChartKind};
pub use parser::{ChartParser, LineCursor, Parser2DChartFile, Parser3DChartFile, Section, load_chart};
pub use source::{ChartSource, read_chart_file};
