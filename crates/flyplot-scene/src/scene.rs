//! What the 3D and 2D scenes share when a chart arrives.

use flyplot_chart::{AreaSpec, Chart2D, Chart3D};
use flyplot_core::Color;
use flyplot_core::math::DVec3;

use crate::plot2d::Plot2D;
use crate::plot3d::Plot3D;

/// A scene that holds one kind of chart plus a list of area markers.
pub trait ChartScene {
    type Chart;

    /// The areas a chart file declares.
    fn chart_areas(chart: &Self::Chart) -> &[AreaSpec];

    fn add_chart(&mut self, chart: Self::Chart) -> usize;

    fn add_area(&mut self, center: DVec3, radius: f64, color: Color, index: Option<usize>) -> usize;

    /// Color given to areas that come in with a chart.
    fn default_area_color(&self) -> Color;

    /// Add a chart, then append each of its areas in the default area
    /// color. Returns the chart's index.
    fn add_chart_with_areas(&mut self, chart: Self::Chart) -> usize {
        let areas = Self::chart_areas(&chart).to_vec();
        let index = self.add_chart(chart);
        let color = self.default_area_color();
        for area in areas {
            self.add_area(area.center, area.radius, color, None);
        }
        index
    }
}

impl ChartScene for Plot3D {
    type Chart = Chart3D;

    fn chart_areas(chart: &Chart3D) -> &[AreaSpec] {
        &chart.areas
    }

    fn add_chart(&mut self, chart: Chart3D) -> usize {
        Plot3D::add_chart(self, chart)
    }

    fn add_area(&mut self, center: DVec3, radius: f64, color: Color, index: Option<usize>) -> usize {
        Plot3D::add_area(self, center, radius, color, index)
    }

    fn default_area_color(&self) -> Color {
        self.config().area_color
    }
}

impl ChartScene for Plot2D {
    type Chart = Chart2D;

    fn chart_areas(chart: &Chart2D) -> &[AreaSpec] {
        &chart.areas
    }

    fn add_chart(&mut self, chart: Chart2D) -> usize {
        Plot2D::add_chart(self, chart)
    }

    fn add_area(&mut self, center: DVec3, radius: f64, color: Color, index: Option<usize>) -> usize {
        Plot2D::add_area(self, center, radius, color, index)
    }

    fn default_area_color(&self) -> Color {
        self.config().area_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyplot_chart::{AxisInfo, AxisLabel, ChartSource};

    fn areas() -> Vec<AreaSpec> {
        vec![
            AreaSpec::new(DVec3::new(10.0, 20.0, 0.0), 5.0),
            AreaSpec::new(DVec3::new(-10.0, 0.0, 30.0), 2.0),
        ]
    }

    fn add_twice<S: ChartScene>(scene: &mut S, chart: S::Chart, again: S::Chart) -> (usize, usize) {
        (scene.add_chart_with_areas(chart), scene.add_chart_with_areas(again))
    }

    #[test]
    fn test_3d_chart_brings_areas() {
        let chart = |path: &str| Chart3D {
            source: ChartSource::new(path),
            name: path.to_string(),
            axes: [0, 1, 2].map(|_| AxisInfo {
                label: AxisLabel::new("d", "m"),
                min: 0.0,
                max: 50.0,
            }),
            times: vec![0.0],
            coords: vec![DVec3::ZERO],
            cube: vec![],
            areas: areas(),
        };

        let mut plot = Plot3D::default();
        assert_eq!(add_twice(&mut plot, chart("/r/a.txt"), chart("/r/b.txt")), (0, 1));
        assert_eq!(plot.areas().len(), 4);
        assert!(plot.areas().iter().all(|a| a.color == plot.config().area_color));
        assert_eq!(plot.areas()[2].spec.radius, 5.0);
    }

    #[test]
    fn test_2d_chart_brings_areas() {
        let chart = |path: &str| Chart2D {
            source: ChartSource::new(path),
            name: path.to_string(),
            axes: [AxisLabel::new("t", "s"), AxisLabel::new("v", "")],
            x: vec![0.0, 1.0],
            y: vec![0.0, 1.0],
            areas: areas(),
        };

        let mut plot = Plot2D::default();
        assert_eq!(add_twice(&mut plot, chart("/r/a.txt"), chart("/r/b.txt")), (0, 1));
        assert_eq!(plot.series().len(), 2);
        assert_eq!(plot.areas().len(), 4);
        assert_eq!(plot.areas()[1].spec.center, DVec3::new(-10.0, 0.0, 30.0));
    }
}
