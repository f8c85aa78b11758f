use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Matrix4, Quaternion, UnitQuaternion, Vector3};

use std::ops;

/// Quaternions with a smaller norm than this are treated as no rotation.
const QUATERNION_EPS: f64 = f64::EPSILON * 4.0;

/// Homogeneous 4x4 rigid transform.
///
/// Kept as a full matrix so composition with externally supplied
/// calibrations is an exact matrix product.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform(Matrix4<f64>);

impl Transform {
    pub fn eye() -> Self {
        Self(Matrix4::identity())
    }

    /// Creates a transform from a translation and a rotation quaternion.
    ///
    /// # Arguments
    ///
    /// * `translation` - Translation column.
    /// * `rotation` - Rotation quaternion, it doesn't need to be normalized.
    pub fn new(translation: &Vector3<f64>, rotation: &Quaternion<f64>) -> Self {
        let mut matrix = if rotation.norm() < QUATERNION_EPS {
            Matrix4::identity()
        } else {
            UnitQuaternion::from_quaternion(*rotation).to_homogeneous()
        };
        matrix.fixed_slice_mut::<3, 1>(0, 3).copy_from(translation);
        Self(matrix)
    }

    pub fn from_matrix4(matrix: &Matrix4<f64>) -> Self {
        Self(*matrix)
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.0
    }

    pub fn translation(&self) -> Vector3<f64> {
        self.0.fixed_slice::<3, 1>(0, 3).into_owned()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::eye()
    }
}

impl ops::Mul<&Transform> for &Transform {
    type Output = Transform;

    fn mul(self, rhs: &Transform) -> Self::Output {
        Transform(self.0 * rhs.0)
    }
}

impl ops::Mul<&Vector3<f64>> for &Transform {
    type Output = Vector3<f64>;

    fn mul(self, rhs: &Vector3<f64>) -> Self::Output {
        (self.0 * rhs.push(1.0)).xyz()
    }
}

impl From<Transform> for Matrix4<f64> {
    fn from(transform: Transform) -> Self {
        transform.0
    }
}

impl AbsDiffEq for Transform {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}

impl RelativeEq for Transform {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.0.relative_eq(&other.0, epsilon, max_relative)
    }
}
