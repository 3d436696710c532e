//! The three bounding grid planes.
//!
//! Each plane spans two axes, is centered on their midpoints and sits on one
//! end of its normal axis. Which end is decided by that axis' [`Direction`];
//! [`Grid::face_camera`] flips it so the camera always looks at the front
//! of every plane.

use flyplot_chart::Axis;
use flyplot_core::math::{DVec2, DVec3};
use flyplot_core::profiling::profile_function;

use crate::axis::{AxisFrame, AxisSet, Direction};
use crate::label;
use crate::transform::Transform3D;

/// One of the three coordinate planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    XY,
    XZ,
    YZ,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::XY, Plane::XZ, Plane::YZ];

    /// In-plane axes, mapped to the plane's local x and y.
    pub const fn axes(self) -> [Axis; 2] {
        self.normal().others()
    }

    /// The axis perpendicular to the plane.
    pub const fn normal(self) -> Axis {
        match self {
            Plane::XY => Axis::Z,
            Plane::XZ => Axis::Y,
            Plane::YZ => Axis::X,
        }
    }

    /// Rotation taking the local xy plane onto this plane.
    pub fn base_rotation(self) -> Transform3D {
        match self {
            Plane::XY => Transform3D::IDENTITY,
            Plane::XZ => Transform3D::rotate(90.0, DVec3::X),
            Plane::YZ => Transform3D::rotate(90.0, DVec3::Z).then_rotate(90.0, DVec3::Y),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Plane::XY => "xy",
            Plane::XZ => "xz",
            Plane::YZ => "yz",
        }
    }
}

impl std::fmt::Display for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A placed grid rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlane {
    pub plane: Plane,
    /// Extent along the local x and y axes.
    pub size: DVec2,
    /// Line spacing along the local x and y axes.
    pub spacing: DVec2,
    pub transform: Transform3D,
}

impl GridPlane {
    /// Place `plane` from the current axis frames.
    pub fn layout(plane: Plane, frames: &[AxisFrame; 3]) -> Self {
        let [a, b] = plane.axes().map(|axis| frames[axis.index()]);
        let normal = plane.normal();

        let mut offset = DVec3::ZERO;
        for axis in plane.axes() {
            offset[axis.index()] = frames[axis.index()].delta;
        }
        offset[normal.index()] = frames[normal.index()].plane_offset();

        Self {
            plane,
            size: DVec2::new(a.size, b.size),
            spacing: DVec2::new(a.space, b.space),
            transform: plane.base_rotation().then_translate(offset),
        }
    }

    /// Local coordinates of the grid lines along one side, centered on zero.
    fn line_positions(size: f64, spacing: f64) -> Vec<f64> {
        if spacing <= 0.0 {
            return vec![-size / 2.0];
        }
        let count = ((size + 0.001 * spacing) / spacing).ceil().max(1.0) as usize;
        (0..count).map(|i| -size / 2.0 + i as f64 * spacing).collect()
    }

    /// World-space line segments: one per x position, then one per y position.
    pub fn line_segments(&self) -> Vec<[DVec3; 2]> {
        let xs = Self::line_positions(self.size.x, self.spacing.x);
        let ys = Self::line_positions(self.size.y, self.spacing.y);
        let (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) =
            (xs.first(), xs.last(), ys.first(), ys.last())
        else {
            return Vec::new();
        };

        let local = xs
            .iter()
            .map(|&x| [DVec3::new(x, y0, 0.0), DVec3::new(x, y1, 0.0)])
            .chain(ys.iter().map(|&y| [DVec3::new(x0, y, 0.0), DVec3::new(x1, y, 0.0)]));
        local
            .map(|seg| seg.map(|p| self.transform.transform_point(p)))
            .collect()
    }

    /// World-space corners, counter-clockwise in local space.
    pub fn corners(&self) -> [DVec3; 4] {
        let (hx, hy) = (self.size.x / 2.0, self.size.y / 2.0);
        [
            DVec3::new(-hx, -hy, 0.0),
            DVec3::new(hx, -hy, 0.0),
            DVec3::new(hx, hy, 0.0),
            DVec3::new(-hx, hy, 0.0),
        ]
        .map(|p| self.transform.transform_point(p))
    }
}

/// The xy, xz and yz grid planes of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    planes: [GridPlane; 3],
}

impl Grid {
    /// Lay out all planes from `axes` as they are.
    pub fn new(axes: &AxisSet) -> Self {
        let frames = axes.frames();
        Self {
            planes: Plane::ALL.map(|p| GridPlane::layout(p, &frames)),
        }
    }

    pub fn plane(&self, plane: Plane) -> &GridPlane {
        &self.planes[plane as usize]
    }

    pub fn planes(&self) -> &[GridPlane; 3] {
        &self.planes
    }

    /// Full relayout after a recompute.
    ///
    /// Every normal axis goes back to its resting direction: negative when
    /// its smaller-magnitude end is `max`, positive otherwise.
    pub fn rebuild(&mut self, axes: &mut AxisSet) {
        for (_, state) in axes.iter_mut() {
            state.frame.direction = if state.frame.amin == state.frame.max {
                Direction::Negative
            } else {
                Direction::Positive
            };
        }
        self.refresh(axes);
    }

    /// Re-place the planes from the current directions.
    pub fn refresh(&mut self, axes: &AxisSet) {
        let frames = axes.frames();
        for plane in &mut self.planes {
            *plane = GridPlane::layout(plane.plane, &frames);
            tracing::trace!("Plane {} at {}", plane.plane, plane.transform.translation());
        }
    }

    /// Move every plane whose front faces away from `camera` to the other
    /// end of its normal axis and flip that axis' direction.
    ///
    /// A plane faces away when the angle between the camera position and
    /// its normal (scaled by direction and size) exceeds 90 degrees; a zero
    /// vector on either side never flips. Labels on all axes are re-placed
    /// after a flip. Returns the number of planes moved; a second call with
    /// the same camera returns 0.
    pub fn face_camera(&mut self, axes: &mut AxisSet, camera: DVec3) -> usize {
        profile_function!();

        let mut flipped = 0;
        for plane in Plane::ALL {
            let normal = plane.normal();
            let frame = axes[normal].frame;
            let facing = normal.unit() * frame.dir() * frame.size;
            if camera.length_squared() == 0.0 || facing.length_squared() == 0.0 {
                continue;
            }
            if camera.dot(facing) < 0.0 {
                axes[normal].frame.direction = frame.direction.flipped();
                flipped += 1;
                tracing::trace!(
                    "Plane {} faces away from camera, {} now {:?}",
                    plane,
                    normal,
                    axes[normal].frame.direction
                );
            }
        }

        if flipped > 0 {
            self.refresh(axes);
            label::place_all(axes);
        }
        flipped
    }
}
