//! 3D affine transforms for scene items.

use flyplot_core::math::{DMat4, DVec3};

/// A 3D affine transformation matrix.
///
/// Composition follows two conventions:
/// - `then_*` applies the new operation in world space, after this transform.
/// - `local_*` applies it in the item's own space, before this transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    matrix: DMat4,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform3D {
    /// Identity transform (no transformation).
    pub const IDENTITY: Self = Self {
        matrix: DMat4::IDENTITY,
    };

    /// Create from a 4x4 matrix.
    pub fn from_mat4(matrix: DMat4) -> Self {
        Self { matrix }
    }

    /// Create a translation transform.
    pub fn translate(offset: DVec3) -> Self {
        Self {
            matrix: DMat4::from_translation(offset),
        }
    }

    /// Create a rotation of `degrees` about `axis` (right-handed).
    pub fn rotate(degrees: f64, axis: DVec3) -> Self {
        if degrees == 0.0 {
            return Self::IDENTITY;
        }
        Self {
            matrix: DMat4::from_axis_angle(axis.normalize(), degrees.to_radians()),
        }
    }

    /// Combine two transforms (self then other).
    pub fn then(&self, other: &Transform3D) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Add a world-space translation after this transform.
    pub fn then_translate(&self, offset: DVec3) -> Self {
        self.then(&Transform3D::translate(offset))
    }

    /// Add a world-space rotation after this transform.
    pub fn then_rotate(&self, degrees: f64, axis: DVec3) -> Self {
        self.then(&Transform3D::rotate(degrees, axis))
    }

    /// Translate in the item's own frame.
    pub fn local_translate(&self, offset: DVec3) -> Self {
        Transform3D::translate(offset).then(self)
    }

    /// Rotate in the item's own frame.
    pub fn local_rotate(&self, degrees: f64, axis: DVec3) -> Self {
        Transform3D::rotate(degrees, axis).then(self)
    }

    /// Transform a point.
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.matrix.transform_point3(point)
    }

    /// Transform a vector (ignores translation).
    pub fn transform_vector(&self, vector: DVec3) -> DVec3 {
        self.matrix.transform_vector3(vector)
    }

    /// Get the underlying 4x4 matrix.
    pub fn as_mat4(&self) -> &DMat4 {
        &self.matrix
    }

    /// Get the translation component.
    pub fn translation(&self) -> DVec3 {
        self.matrix.w_axis.truncate()
    }
}

impl std::ops::Mul<Transform3D> for Transform3D {
    type Output = Transform3D;

    fn mul(self, rhs: Transform3D) -> Transform3D {
        self.then(&rhs)
    }
}

impl std::ops::Mul<DVec3> for Transform3D {
    type Output = DVec3;

    fn mul(self, rhs: DVec3) -> DVec3 {
        self.transform_point(rhs)
    }
}

/// Builder for the transform of a text glyph quad.
///
/// A glyph image of `width` x `height` is laid out with its rows along local
/// x and its columns along local y, so pixel `(row, col)` sits at local
/// `(row, col, 0)`. The frame operations below work in text space instead:
/// `dx` runs along the text, `dy` across it.
///
/// A fresh frame centers the glyph on the origin and turns it to read along
/// world +x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphFrame {
    width: f64,
    height: f64,
    transform: Transform3D,
}

impl GlyphFrame {
    pub fn new(width: f64, height: f64) -> Self {
        let frame = Self {
            width,
            height,
            transform: Transform3D::translate(DVec3::new(-height / 2.0, -width / 2.0, 0.0)),
        };
        frame.rotate(-90.0, DVec3::Z)
    }

    /// Move along the text (`dx`), across it (`dy`) and out of its plane (`dz`).
    pub fn translate(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            transform: self.transform.local_translate(DVec3::new(-dy, dx, dz)),
            ..self
        }
    }

    /// Rotate about a text-space axis through the glyph's center.
    pub fn rotate(self, degrees: f64, axis: DVec3) -> Self {
        let local_axis = DVec3::new(axis.y, axis.x, axis.z);
        let (w, h) = (self.width, self.height);
        let pivoted = self.translate(w / 2.0, -h / 2.0, 0.0);
        let rotated = Self {
            transform: pivoted.transform.local_rotate(degrees, local_axis),
            ..pivoted
        };
        rotated.translate(-w / 2.0, h / 2.0, 0.0)
    }

    pub fn transform(&self) -> Transform3D {
        self.transform
    }
}
