//! 3D transformation utilities

use nalgebra::{Isometry3, Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::point::{Point3f, Vector3f};

/// A 3D transformation mapping local coordinates to world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a scaling transformation
    pub fn scaling(scale: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&scale),
        }
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Create a transformation from translation and rotation
    pub fn from_translation_rotation(
        translation: Vector3<f32>,
        rotation: UnitQuaternion<f32>,
    ) -> Self {
        let isometry = Isometry3::from_parts(translation.into(), rotation);
        Self {
            matrix: isometry.to_homogeneous(),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3f) -> Point3f {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// The translation component, i.e. where the local origin sits in world space
    pub fn translation_part(&self) -> Vector3f {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// Compose this transformation with another
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Get the inverse transformation
    pub fn inverse(self) -> Option<Self> {
        self.matrix.try_inverse().map(|inv_matrix| Self {
            matrix: inv_matrix,
        })
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn compose_applies_right_hand_side_first() {
        let scale = Transform3D::scaling(Vector3f::new(2.0, 2.0, 2.0));
        let shift = Transform3D::translation(Vector3f::new(1.0, 0.0, 0.0));

        let scaled_then_shifted = shift * scale;
        let p = scaled_then_shifted.transform_point(&Point3f::new(1.0, 1.0, 1.0));

        assert_eq!(p, Point3f::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn inverse_round_trips_points() {
        let transform = Transform3D::from_translation_rotation(
            Vector3f::new(1.0, -2.0, 3.0),
            UnitQuaternion::from_axis_angle(&Vector3f::x_axis(), 1.1),
        );
        let inverse = transform.inverse().unwrap();

        let p = Point3f::new(0.25, -4.0, 2.0);
        let round_tripped = inverse.transform_point(&transform.transform_point(&p));

        assert_relative_eq!(round_tripped, p, epsilon = 1e-5);
    }

    #[test]
    fn zero_scale_has_no_inverse() {
        assert!(Transform3D::uniform_scaling(0.0).inverse().is_none());
    }

    #[test]
    fn translation_part_reads_the_last_column() {
        let matrix = Matrix4::new_translation(&Vector3f::new(4.0, 5.0, 6.0));
        let transform = Transform3D::from(matrix);

        assert_eq!(transform.translation_part(), Vector3f::new(4.0, 5.0, 6.0));
        assert_eq!(Transform3D::default().translation_part(), Vector3f::zeros());
    }
}
