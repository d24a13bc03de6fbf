//! Affine mapping between an item's local coordinates and scene coordinates.

use crate::Point;

/// A 2D affine transform from item-local to scene coordinates.
///
/// The matrix is laid out as
///
/// ```text
/// | m11 m21 dx |
/// | m12 m22 dy |
/// |  0   0   1 |
/// ```
///
/// so `scene = (m11 * x + m21 * y + dx, m12 * x + m22 * y + dy)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTransform {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Default for SceneTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl SceneTransform {
    pub const IDENTITY: SceneTransform = SceneTransform {
        m11: 1.0,
        m12: 0.0,
        m21: 0.0,
        m22: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    pub fn translation(dx: f32, dy: f32) -> Self {
        Self {
            dx,
            dy,
            ..Self::IDENTITY
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            m11: sx,
            m22: sy,
            ..Self::IDENTITY
        }
    }

    /// Clockwise rotation in screen space (y grows downwards).
    pub fn rotation_degrees(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            m11: cos,
            m12: sin,
            m21: -sin,
            m22: cos,
            dx: 0.0,
            dy: 0.0,
        }
    }

    /// Returns the transform that applies `self` first and `outer` second.
    pub fn then(&self, outer: &SceneTransform) -> SceneTransform {
        SceneTransform {
            m11: outer.m11 * self.m11 + outer.m21 * self.m12,
            m12: outer.m12 * self.m11 + outer.m22 * self.m12,
            m21: outer.m11 * self.m21 + outer.m21 * self.m22,
            m22: outer.m12 * self.m21 + outer.m22 * self.m22,
            dx: outer.m11 * self.dx + outer.m21 * self.dy + outer.dx,
            dy: outer.m12 * self.dx + outer.m22 * self.dy + outer.dy,
        }
    }

    pub fn map_to_scene(&self, local: Point) -> Point {
        Point::new(
            self.m11 * local.x + self.m21 * local.y + self.dx,
            self.m12 * local.x + self.m22 * local.y + self.dy,
        )
    }

    /// Maps a displacement, ignoring the translation part.
    pub fn map_vector_to_scene(&self, local: Point) -> Point {
        Point::new(
            self.m11 * local.x + self.m21 * local.y,
            self.m12 * local.x + self.m22 * local.y,
        )
    }

    fn determinant(&self) -> f32 {
        self.m11 * self.m22 - self.m21 * self.m12
    }

    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det != 0.0 && det.is_finite()
    }

    pub fn inverse(&self) -> Option<SceneTransform> {
        if !self.is_invertible() {
            return None;
        }
        let inv_det = 1.0 / self.determinant();
        let m11 = self.m22 * inv_det;
        let m12 = -self.m12 * inv_det;
        let m21 = -self.m21 * inv_det;
        let m22 = self.m11 * inv_det;
        Some(SceneTransform {
            m11,
            m12,
            m21,
            m22,
            dx: -(m11 * self.dx + m21 * self.dy),
            dy: -(m12 * self.dx + m22 * self.dy),
        })
    }

    /// Maps a scene position back into local coordinates.
    ///
    /// A degenerate transform collapses everything onto the local origin.
    pub fn map_from_scene(&self, scene: Point) -> Point {
        match self.inverse() {
            Some(inverse) => inverse.map_to_scene(scene),
            None => Point::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < 1e-4 && (actual.y - expected.y).abs() < 1e-4,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn translation_round_trips() {
        let transform = SceneTransform::translation(100.0, 50.0);
        let scene = transform.map_to_scene(Point::new(1.0, 2.0));
        assert_eq!(scene, Point::new(101.0, 52.0));
        assert_close(transform.map_from_scene(scene), Point::new(1.0, 2.0));
    }

    #[test]
    fn quarter_rotation_turns_rightwards_into_downwards() {
        let transform = SceneTransform::rotation_degrees(90.0);
        assert_close(
            transform.map_vector_to_scene(Point::new(1.0, 0.0)),
            Point::new(0.0, 1.0),
        );
    }

    #[test]
    fn composition_applies_inner_first() {
        let transform = SceneTransform::scale(2.0, 2.0).then(&SceneTransform::translation(10.0, 0.0));
        assert_close(transform.map_to_scene(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
    }

    #[test]
    fn degenerate_transform_has_no_inverse() {
        assert!(SceneTransform::scale(0.0, 1.0).inverse().is_none());
    }
}
