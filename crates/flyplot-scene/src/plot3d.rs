//! The 3D scene: charts, areas, axes, grid and camera of one plot view.
//!
//! Every change to the chart or area set runs the same cycle:
//! recompute the axes, rebuild the grid, regenerate and place the labels,
//! then turn the grid planes toward the camera.

use std::path::Path;

use flyplot_chart::{Axis, Chart3D, ChartParser, ChartResult, Parser3DChartFile};
use flyplot_core::Color;
use flyplot_core::math::DVec3;

use crate::area::AreaMarker;
use crate::axis::{AxisSet, AxisState};
use crate::camera::OrbitCamera;
use crate::config::SceneConfig;
use crate::grid::Grid;
use crate::label;
use crate::scene::ChartScene;

/// A chart in the scene with its assigned line color.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedChart {
    pub chart: Chart3D,
    pub color: Color,
}

/// Controller for a 3D plot view.
///
/// # Example
///
/// ```
/// use flyplot_chart::{ChartParser, ChartSource, Parser3DChartFile};
/// use flyplot_scene::Plot3D;
///
/// let chart = Parser3DChartFile
///     .parse_str(
///         ChartSource::new("/runs/flight.txt"),
///         "type: 3D\nx: East | m\ncoords\n0 -> 0 0 0\n1 -> 2400 800 950\n",
///     )
///     .unwrap();
///
/// let mut plot = Plot3D::default();
/// plot.add_chart(chart);
///
/// let x = plot.axes()[flyplot_chart::Axis::X].frame;
/// assert_eq!((x.min, x.max, x.space), (0.0, 2400.0, 300.0));
/// ```
#[derive(Debug, Clone)]
pub struct Plot3D {
    config: SceneConfig,
    charts: Vec<PlottedChart>,
    areas: Vec<AreaMarker>,
    axes: AxisSet,
    grid: Grid,
    camera: OrbitCamera,
}

impl Default for Plot3D {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Plot3D {
    /// An empty scene showing the default axis range.
    pub fn new(config: SceneConfig) -> Self {
        let axes = Self::default_axes(&config);
        let grid = Grid::new(&axes);
        let camera = OrbitCamera::with_fov(config.fov);
        let mut plot = Self {
            config,
            charts: Vec::new(),
            areas: Vec::new(),
            axes,
            grid,
            camera,
        };
        plot.grid.rebuild(&mut plot.axes);
        plot.set_default_view();
        plot
    }

    fn default_axes(config: &SceneConfig) -> AxisSet {
        AxisSet::new(config.default_range, config.default_step).with_label_angle(config.label_angle)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn charts(&self) -> &[PlottedChart] {
        &self.charts
    }

    pub fn areas(&self) -> &[AreaMarker] {
        &self.areas
    }

    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    pub fn axis(&self, axis: Axis) -> &AxisState {
        &self.axes[axis]
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Color the export collaborator crops away.
    pub fn background(&self) -> Color {
        self.config.background
    }

    /// Opposite corners of the grid cube.
    pub fn scene_bounds(&self) -> (DVec3, DVec3) {
        let [x, y, z] = self.axes.frames();
        (DVec3::new(x.min, y.min, z.min), DVec3::new(x.max, y.max, z.max))
    }

    /// Chart names joined by `" | "`.
    pub fn description(&self) -> String {
        self.charts
            .iter()
            .map(|c| c.chart.name.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Index of the chart loaded from `path`.
    pub fn find_chart(&self, path: impl AsRef<Path>) -> Option<usize> {
        let path = path.as_ref();
        self.charts.iter().position(|c| c.chart.source.matches(path))
    }

    /// Add a chart with the next palette color, rescale and reframe.
    /// Returns its index.
    pub fn add_chart(&mut self, chart: Chart3D) -> usize {
        let in_use: Vec<Color> = self.charts.iter().map(|c| c.color).collect();
        let color = self.config.next_color(&in_use);
        tracing::info!(
            "Adding chart '{}' ({}) with {} samples",
            chart.name,
            chart.source.short_path(),
            chart.coords.len()
        );

        let titles = Axis::ALL.map(|axis| chart.axis(axis).label.title());
        self.charts.push(PlottedChart { chart, color });
        self.recompute(Some(&titles));
        self.set_default_view();
        self.charts.len() - 1
    }

    /// Load a 3D chart file, add it, then add each of its areas in the
    /// default area color. A load error leaves the scene untouched.
    pub fn add_chart_file(&mut self, path: impl AsRef<Path>) -> ChartResult<usize> {
        let chart = Parser3DChartFile.load(path)?;
        Ok(self.add_chart_with_areas(chart))
    }

    /// Remove a chart and rescale. Removing the last chart with no areas
    /// left cleans the scene.
    pub fn remove_chart(&mut self, index: usize) -> Option<PlottedChart> {
        if index >= self.charts.len() {
            return None;
        }
        let removed = self.charts.remove(index);
        tracing::info!("Removed chart '{}'", removed.chart.name);
        self.redraw();
        Some(removed)
    }

    pub fn set_chart_color(&mut self, index: usize, color: Color) -> bool {
        match self.charts.get_mut(index) {
            Some(plotted) => {
                plotted.color = color;
                true
            }
            None => false,
        }
    }

    /// Append `(t, point)` samples to a chart and rescale.
    pub fn extend_chart<I>(&mut self, index: usize, samples: I) -> bool
    where
        I: IntoIterator<Item = (f64, DVec3)>,
    {
        let Some(plotted) = self.charts.get_mut(index) else {
            return false;
        };
        plotted.chart.extend(samples);
        self.redraw();
        true
    }

    /// Insert an area marker at `index` (or at the end) and rescale.
    /// Returns where it was inserted.
    pub fn add_area(&mut self, center: DVec3, radius: f64, color: Color, index: Option<usize>) -> usize {
        let index = index.map_or(self.areas.len(), |i| i.min(self.areas.len()));
        self.areas.insert(index, AreaMarker::new(center, radius, color));
        tracing::info!("Added area r={} at {} (#{})", radius, center, index);
        self.redraw();
        index
    }

    pub fn remove_area(&mut self, index: usize) -> Option<AreaMarker> {
        if index >= self.areas.len() {
            return None;
        }
        let removed = self.areas.remove(index);
        tracing::info!("Removed area #{}", index);
        self.redraw();
        Some(removed)
    }

    pub fn set_area_color(&mut self, index: usize, color: Color) -> bool {
        match self.areas.get_mut(index) {
            Some(area) => {
                area.color = color;
                true
            }
            None => false,
        }
    }

    /// Move and resize an area in place, keeping its color and position in
    /// the list.
    pub fn replace_area(&mut self, index: usize, center: DVec3, radius: f64) -> bool {
        let Some(area) = self.areas.get_mut(index) else {
            return false;
        };
        *area = AreaMarker::new(center, radius, area.color);
        self.redraw();
        true
    }

    /// Drop every chart and area and return to the default axes and view.
    pub fn clean(&mut self) {
        self.charts.clear();
        self.areas.clear();
        self.axes = Self::default_axes(&self.config);
        self.grid.rebuild(&mut self.axes);
        self.set_default_view();
        tracing::info!("Scene cleaned");
    }

    /// Rescale after the chart or area set changed.
    pub fn redraw(&mut self) {
        if self.charts.is_empty() && self.areas.is_empty() {
            self.clean();
            return;
        }
        self.recompute(None);
        self.face_camera();
    }

    /// Look at the grid from beyond its far corner.
    pub fn set_default_view(&mut self) {
        let [x, y, z] = self.axes.frames();
        self.camera
            .frame_corner(DVec3::new(x.amax, y.amax, z.amax), self.config.zoom_out);
        self.face_camera();
    }

    /// Rotate the camera and turn the grid toward it.
    pub fn orbit(&mut self, d_azimuth: f64, d_elevation: f64) {
        self.camera.orbit(d_azimuth, d_elevation);
        self.face_camera();
    }

    /// Pan the camera by a mouse drag and turn the grid toward it.
    pub fn pan(&mut self, dx: f64, dy: f64, viewport_width: f64) {
        self.camera.pan(dx, dy, viewport_width);
        self.face_camera();
    }

    /// Replace the camera, e.g. after the renderer moved it.
    pub fn set_camera(&mut self, camera: OrbitCamera) {
        self.camera = camera;
        self.face_camera();
    }

    /// Flip grid planes that face away from the camera. Returns how many
    /// moved.
    pub fn face_camera(&mut self) -> usize {
        self.grid.face_camera(&mut self.axes, self.camera.position())
    }

    fn recompute(&mut self, new_titles: Option<&[String; 3]>) {
        self.axes.recompute(
            self.charts.iter().map(|c| &c.chart),
            self.areas.iter().map(|a| &a.spec),
        );
        self.grid.rebuild(&mut self.axes);

        let metrics = self.config.metrics;
        for (axis, state) in self.axes.iter_mut() {
            state.names.remeasure(&metrics);
            if let Some(titles) = new_titles {
                state.names.add(&titles[axis.index()], &metrics);
            }
            let frame = state.frame;
            state.values.regenerate(&frame, &metrics);
        }
        label::place_all(&mut self.axes);
    }
}
