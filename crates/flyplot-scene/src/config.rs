//! Scene configuration.

use flyplot_core::Color;
use flyplot_core::math::Extent;

use crate::axis::STEP_UNIT;
use crate::camera::DEFAULT_FOV;
use crate::label::{DEFAULT_LABEL_ANGLE, MonospaceMetrics};

/// Color for areas added without one.
pub const DEFAULT_AREA_COLOR: Color = Color::GREEN;

/// Chart colors in assignment order: blue, red, black, green, yellow.
pub fn default_palette() -> Vec<Color> {
    "brkgy".chars().filter_map(Color::from_code).collect()
}

/// Configuration for a 3D or 2D scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Chart colors, cycled through as charts are added.
    pub palette: Vec<Color>,
    /// Color for areas added without one.
    pub area_color: Color,
    /// Background color; also what snapshot cropping trims away.
    pub background: Color,
    /// Axis range of an empty scene.
    pub default_range: Extent,
    /// Grid step of an empty scene and of axes with nothing on them.
    pub default_step: f64,
    /// The default view sits this many times further out than the far
    /// grid corner.
    pub zoom_out: f64,
    /// Vertical field of view in degrees.
    pub fov: f64,
    /// Text measurement for glyphs.
    pub metrics: MonospaceMetrics,
    /// Label tilt in degrees.
    pub label_angle: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            area_color: DEFAULT_AREA_COLOR,
            background: Color::WHITE,
            default_range: Extent::new(0.0, 1000.0),
            default_step: STEP_UNIT,
            zoom_out: 1.8,
            fov: DEFAULT_FOV,
            metrics: MonospaceMetrics::default(),
            label_angle: DEFAULT_LABEL_ANGLE,
        }
    }
}

impl SceneConfig {
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_area_color(mut self, color: Color) -> Self {
        self.area_color = color;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Range and grid step of an empty scene. A step that is not a positive
    /// number is ignored and the current one kept.
    pub fn with_default_range(mut self, range: Extent, step: f64) -> Self {
        self.default_range = range;
        if step.is_finite() && step > 0.0 {
            self.default_step = step;
        } else {
            tracing::warn!("Ignoring default grid step {}, keeping {}", step, self.default_step);
        }
        self
    }

    pub fn with_zoom_out(mut self, zoom_out: f64) -> Self {
        self.zoom_out = zoom_out;
        self
    }

    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }

    pub fn with_metrics(mut self, metrics: MonospaceMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_label_angle(mut self, degrees: f64) -> Self {
        self.label_angle = degrees;
        self
    }

    /// The palette color for the next chart, given the colors in use.
    ///
    /// Picks the first palette color not in use; once all are taken, cycles
    /// by chart count.
    pub fn next_color(&self, in_use: &[Color]) -> Color {
        if self.palette.is_empty() {
            return Color::BLACK;
        }
        self.palette
            .iter()
            .find(|c| !in_use.contains(c))
            .copied()
            .unwrap_or_else(|| self.palette[in_use.len() % self.palette.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        assert_eq!(
            default_palette(),
            vec![Color::BLUE, Color::RED, Color::BLACK, Color::GREEN, Color::YELLOW]
        );
    }

    #[test]
    fn test_next_color() {
        let config = SceneConfig::default();
        assert_eq!(config.next_color(&[]), Color::BLUE);
        assert_eq!(config.next_color(&[Color::BLUE]), Color::RED);
        // a freed slot is reused first
        assert_eq!(config.next_color(&[Color::RED]), Color::BLUE);

        let full = [Color::BLUE, Color::RED, Color::BLACK, Color::GREEN, Color::YELLOW, Color::BLUE];
        assert_eq!(config.next_color(&full), Color::RED);
        assert_eq!(config.next_color(&full[..5]), Color::BLUE);
    }

    #[test]
    fn test_builders() {
        let config = SceneConfig::default()
            .with_background(Color::BLACK)
            .with_zoom_out(2.0)
            .with_default_range(Extent::new(-50.0, 50.0), 10.0);
        assert_eq!(config.background, Color::BLACK);
        assert_eq!(config.zoom_out, 2.0);
        assert_eq!(config.default_step, 10.0);
    }

    #[test]
    fn test_default_range_rejects_bad_step() {
        for step in [0.0, -10.0, f64::INFINITY, f64::NAN] {
            let config = SceneConfig::default().with_default_range(Extent::new(-50.0, 50.0), step);
            assert_eq!(config.default_range, Extent::new(-50.0, 50.0));
            assert_eq!(config.default_step, 100.0);
        }
    }
}
