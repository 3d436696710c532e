//! Orbit camera around a center point.
//!
//! Angles are in degrees. Azimuth is measured in the xy plane from +x,
//! elevation up from the xy plane toward +z.
//!
//! # Example
//!
//! ```
//! use flyplot_core::math::DVec3;
//! use flyplot_scene::OrbitCamera;
//!
//! let mut camera = OrbitCamera::default();
//! camera.frame_corner(DVec3::new(1000.0, 1000.0, 1000.0), 1.8);
//! assert!((camera.azimuth - 45.0).abs() < 1e-9);
//!
//! camera.orbit(10.0, 90.0);
//! assert_eq!(camera.elevation, 90.0);
//! ```

use flyplot_core::math::{DMat4, DVec3};

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV: f64 = 60.0;

/// A camera orbiting `center` at `distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub center: DVec3,
    pub distance: f64,
    pub azimuth: f64,
    pub elevation: f64,
    /// Vertical field of view in degrees.
    pub fov: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            distance: 10.0,
            azimuth: 45.0,
            elevation: 30.0,
            fov: DEFAULT_FOV,
        }
    }
}

impl OrbitCamera {
    pub fn with_fov(fov: f64) -> Self {
        Self {
            fov,
            ..Default::default()
        }
    }

    /// Camera position in world space.
    pub fn position(&self) -> DVec3 {
        let (sa, ca) = self.azimuth.to_radians().sin_cos();
        let (se, ce) = self.elevation.to_radians().sin_cos();
        self.center + self.distance * DVec3::new(ce * ca, ce * sa, se)
    }

    /// Rotate around the center. Elevation is clamped to `[-90, 90]`.
    pub fn orbit(&mut self, d_azimuth: f64, d_elevation: f64) {
        self.azimuth += d_azimuth;
        self.elevation = (self.elevation + d_elevation).clamp(-90.0, 90.0);
    }

    /// Move the center in the view plane by a mouse drag of `(dx, dy)`
    /// pixels on a viewport `viewport_width` pixels wide.
    pub fn pan(&mut self, dx: f64, dy: f64, viewport_width: f64) {
        if viewport_width <= 0.0 {
            return;
        }
        let (sa, ca) = self.azimuth.to_radians().sin_cos();
        let (se, ce) = self.elevation.to_radians().sin_cos();
        let scale = self.distance * (self.fov.to_radians() / 2.0).tan() * 2.0 / viewport_width;

        let right = DVec3::new(-sa, ca, 0.0);
        let up = DVec3::new(-se * ca, -se * sa, ce);
        self.center += scale * (up * dy - right * dx);
    }

    /// Look at the origin from `corner * zoom_out`.
    ///
    /// On the z axis (`x == y == 0`) the azimuth follows the x rule below
    /// and the elevation is `+90` or `-90` by the sign of z. With `x == 0`
    /// the azimuth is `+90` for positive y and `-90` otherwise.
    pub fn frame_corner(&mut self, corner: DVec3, zoom_out: f64) {
        let pos = corner * zoom_out;

        let azimuth = if pos.x != 0.0 {
            pos.y.atan2(pos.x)
        } else if pos.y > 0.0 {
            std::f64::consts::FRAC_PI_2
        } else {
            -std::f64::consts::FRAC_PI_2
        };

        let dist_xy = pos.x.hypot(pos.y);
        let elevation = if dist_xy != 0.0 {
            (pos.z / dist_xy).atan()
        } else if pos.z > 0.0 {
            std::f64::consts::FRAC_PI_2
        } else if pos.z < 0.0 {
            -std::f64::consts::FRAC_PI_2
        } else {
            0.0
        };

        self.center = DVec3::ZERO;
        self.azimuth = azimuth.to_degrees();
        self.elevation = elevation.to_degrees();
        self.distance = pos.length();

        tracing::debug!(
            "Camera framed on {}: azimuth {:.1}, elevation {:.1}, distance {:.1}",
            pos,
            self.azimuth,
            self.elevation,
            self.distance
        );
    }

    /// Right-handed view matrix with +z up.
    pub fn view_matrix(&self) -> DMat4 {
        let up = if self.elevation.abs() >= 90.0 {
            let (sa, ca) = self.azimuth.to_radians().sin_cos();
            -self.elevation.signum() * DVec3::new(ca, sa, 0.0)
        } else {
            DVec3::Z
        };
        DMat4::look_at_rh(self.position(), self.center, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec3, b: DVec3) -> bool {
        a.abs_diff_eq(b, 1e-6)
    }

    #[test]
    fn test_frame_default_corner() {
        let mut camera = OrbitCamera::default();
        camera.frame_corner(DVec3::splat(1000.0), 1.8);
        assert!((camera.azimuth - 45.0).abs() < 1e-9);
        assert!((camera.elevation - 35.264389682754654).abs() < 1e-9);
        assert!(close(camera.position(), DVec3::splat(1800.0)));
    }

    #[test]
    fn test_frame_negative_corner_lands_on_corner() {
        let mut camera = OrbitCamera::default();
        let corner = DVec3::new(-500.0, 2700.0, -900.0);
        camera.frame_corner(corner, 1.8);
        assert!(close(camera.position(), corner * 1.8));
    }

    #[test]
    fn test_frame_degenerate_axes() {
        let mut camera = OrbitCamera::default();
        camera.frame_corner(DVec3::new(0.0, -100.0, 50.0), 1.0);
        assert_eq!(camera.azimuth, -90.0);

        camera.frame_corner(DVec3::new(0.0, 0.0, -100.0), 1.0);
        assert_eq!(camera.elevation, -90.0);
        assert!(close(camera.position(), DVec3::new(0.0, 0.0, -100.0)));

        camera.frame_corner(DVec3::ZERO, 1.8);
        assert_eq!((camera.elevation, camera.distance), (0.0, 0.0));
    }

    #[test]
    fn test_orbit_clamps_elevation() {
        let mut camera = OrbitCamera::default();
        camera.orbit(370.0, -500.0);
        assert_eq!(camera.azimuth, 415.0);
        assert_eq!(camera.elevation, -90.0);
    }

    #[test]
    fn test_pan_moves_center_in_view_plane() {
        let mut camera = OrbitCamera {
            azimuth: 0.0,
            elevation: 0.0,
            distance: 100.0,
            ..Default::default()
        };
        let before = camera.position() - camera.center;
        camera.pan(10.0, 0.0, 800.0);
        // looking down -x, dragging right moves the center toward -y
        assert!(camera.center.y < 0.0);
        assert_eq!(camera.center.x, 0.0);
        assert!(close(camera.position() - camera.center, before));

        camera.pan(0.0, 0.0, 0.0);
        camera.pan(0.0, 10.0, 800.0);
        assert!(camera.center.z > 0.0);
    }

    #[test]
    fn test_view_matrix_puts_center_ahead() {
        let mut camera = OrbitCamera::default();
        camera.frame_corner(DVec3::splat(1000.0), 1.8);
        let view = camera.view_matrix();
        let c = view.transform_point3(camera.center);
        assert!(c.z < 0.0);
        assert!(c.x.abs() < 1e-6 && c.y.abs() < 1e-6);
    }
}
