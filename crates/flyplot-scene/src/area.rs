//! Area markers: flat cones drawn under chart lines.

use flyplot_chart::AreaSpec;
use flyplot_core::Color;
use flyplot_core::math::DVec3;

use crate::transform::Transform3D;

/// Height of the marker cone.
pub const AREA_LENGTH: f64 = 0.1;

/// Draw order of area markers relative to chart lines (drawn at 0).
pub const AREA_DEPTH: i32 = -100;

/// A disk of `radius` around `center`, widening from a point at
/// `center.z - length` to the full radius at `center.z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaMarker {
    pub spec: AreaSpec,
    pub color: Color,
    pub length: f64,
    pub depth: i32,
}

impl AreaMarker {
    pub fn new(center: DVec3, radius: f64, color: Color) -> Self {
        Self {
            spec: AreaSpec::new(center, radius),
            color,
            length: AREA_LENGTH,
            depth: AREA_DEPTH,
        }
    }

    pub fn center(&self) -> DVec3 {
        self.spec.center
    }

    pub fn radius(&self) -> f64 {
        self.spec.radius
    }

    /// Placement of a cone mesh built along +z from the origin.
    pub fn transform(&self) -> Transform3D {
        Transform3D::translate(self.spec.center - DVec3::Z * self.length)
    }
}

impl From<AreaSpec> for AreaMarker {
    fn from(spec: AreaSpec) -> Self {
        Self::new(spec.center, spec.radius, crate::config::DEFAULT_AREA_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_sits_below_center() {
        let marker = AreaMarker::new(DVec3::new(5.0, 5.0, 0.0), 10.0, Color::GREEN);
        assert_eq!(marker.transform().translation(), DVec3::new(5.0, 5.0, -0.1));
        assert_eq!(marker.depth, -100);
        assert_eq!(marker.radius(), 10.0);
    }
}
