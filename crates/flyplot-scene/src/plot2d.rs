//! The 2D scene: series charts with a legend and axis titles.

use std::path::Path;

use flyplot_chart::{Chart2D, ChartParser, ChartResult, Parser2DChartFile};
use flyplot_core::Color;
use flyplot_core::math::{DVec3, Extent};

use crate::area::AreaMarker;
use crate::config::SceneConfig;
use crate::scene::ChartScene;

/// Left axis title when more than one chart shares the plot.
pub const SHARED_VALUES_TITLE: &str = "values";

/// A series in the scene with its assigned pen color.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedSeries {
    pub chart: Chart2D,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub title: String,
    pub color: Color,
}

/// Legend and axis titles, derived from the chart list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub visible: bool,
    pub left_title: String,
    pub bottom_title: String,
}

impl Legend {
    fn build(series: &[PlottedSeries]) -> Self {
        let mut legend = Legend {
            entries: Vec::with_capacity(series.len()),
            ..Default::default()
        };
        let mut x_titles: Vec<String> = Vec::new();
        for s in series {
            let x = s.chart.x_label().title();
            if !x_titles.contains(&x) {
                x_titles.push(x);
            }
            legend.entries.push(LegendEntry {
                title: s.chart.y_label().title(),
                color: s.color,
            });
        }

        legend.visible = series.len() > 1;
        legend.left_title = if legend.visible {
            SHARED_VALUES_TITLE.to_string()
        } else {
            legend.entries.last().map(|e| e.title.clone()).unwrap_or_default()
        };
        legend.bottom_title = x_titles.join(" | ");
        legend
    }
}

/// Controller for a 2D plot view.
#[derive(Debug, Clone)]
pub struct Plot2D {
    config: SceneConfig,
    series: Vec<PlottedSeries>,
    areas: Vec<AreaMarker>,
    legend: Legend,
}

impl Default for Plot2D {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Plot2D {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            series: Vec::new(),
            areas: Vec::new(),
            legend: Legend::default(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn series(&self) -> &[PlottedSeries] {
        &self.series
    }

    pub fn areas(&self) -> &[AreaMarker] {
        &self.areas
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn background(&self) -> Color {
        self.config.background
    }

    pub fn description(&self) -> String {
        self.series
            .iter()
            .map(|s| s.chart.name.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn find_chart(&self, path: impl AsRef<Path>) -> Option<usize> {
        let path = path.as_ref();
        self.series.iter().position(|s| s.chart.source.matches(path))
    }

    /// Add a series with the next palette color. Returns its index.
    pub fn add_chart(&mut self, chart: Chart2D) -> usize {
        let in_use: Vec<Color> = self.series.iter().map(|s| s.color).collect();
        let color = self.config.next_color(&in_use);
        tracing::info!(
            "Adding 2D chart '{}' ({}) with {} samples",
            chart.name,
            chart.source.short_path(),
            chart.x.len()
        );
        self.series.push(PlottedSeries { chart, color });
        self.update_legend();
        self.series.len() - 1
    }

    /// Load a 2D chart file and add it along with its areas.
    pub fn add_chart_file(&mut self, path: impl AsRef<Path>) -> ChartResult<usize> {
        let chart = Parser2DChartFile.load(path)?;
        Ok(self.add_chart_with_areas(chart))
    }

    /// Remove a series. Removing the last one cleans the scene.
    pub fn remove_chart(&mut self, index: usize) -> Option<PlottedSeries> {
        if index >= self.series.len() {
            return None;
        }
        let removed = self.series.remove(index);
        tracing::info!("Removed 2D chart '{}'", removed.chart.name);
        if self.series.is_empty() {
            self.clean();
        } else {
            self.update_legend();
        }
        Some(removed)
    }

    pub fn set_chart_color(&mut self, index: usize, color: Color) -> bool {
        let Some(series) = self.series.get_mut(index) else {
            return false;
        };
        series.color = color;
        self.update_legend();
        true
    }

    /// Append samples to the series loaded from `path`.
    pub fn extend_chart(&mut self, path: impl AsRef<Path>, x: &[f64], y: &[f64]) -> bool {
        let Some(index) = self.find_chart(path) else {
            return false;
        };
        self.series[index].chart.extend(x, y);
        true
    }

    pub fn add_area(&mut self, center: DVec3, radius: f64, color: Color, index: Option<usize>) -> usize {
        let index = index.map_or(self.areas.len(), |i| i.min(self.areas.len()));
        self.areas.insert(index, AreaMarker::new(center, radius, color));
        index
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

    pub fn remove_area(&mut self, index: usize) -> Option<AreaMarker> {
        (index < self.areas.len()).then(|| self.areas.remove(index))
    }

    /// Rectangle covering every series sample and every area disk, as
    /// `(x, y)` extents. `None` when there is nothing to show.
    pub fn view_bounds(&self) -> Option<(Extent, Extent)> {
        let mut ex = Extent::EMPTY;
        let mut ey = Extent::EMPTY;
        for (sx, sy) in self.series.iter().filter_map(|s| s.chart.series_extent()) {
            ex.merge(&sx);
            ey.merge(&sy);
        }
        for area in &self.areas {
            let c = area.center();
            ex.include_span(c.x, area.radius());
            ey.include_span(c.y, area.radius());
        }
        (!ex.is_empty()).then_some((ex, ey))
    }

    /// Drop every series and area and clear the titles.
    pub fn clean(&mut self) {
        self.series.clear();
        self.areas.clear();
        self.legend = Legend::default();
        tracing::info!("2D scene cleaned");
    }

    fn update_legend(&mut self) {
        self.legend = Legend::build(&self.series);
    }
}
