//! Math utilities and types
//!
//! Provides the vector, rotation and transform types the chain and its
//! collaborators compose their motion from.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector3};
use serde::{Deserialize, Serialize};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Local coordinate axis of a transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Local X axis
    X,
    /// Local Y axis
    Y,
    /// Local Z axis
    Z,
}

impl Axis {
    /// Unit vector for this axis
    pub fn unit(self) -> Unit<Vec3> {
        match self {
            Self::X => Vec3::x_axis(),
            Self::Y => Vec3::y_axis(),
            Self::Z => Vec3::z_axis(),
        }
    }
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Builder-style scale override
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Translate by a world-space offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate about one of this transform's own axes
    pub fn rotate_local(&mut self, axis: Axis, angle: f32) {
        self.rotation *= Quat::from_axis_angle(&axis.unit(), angle);
    }

    /// World-space direction of the local +Z axis
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }

    /// Per-axis scale read back from the column norms of the linear part
    pub fn scale_factors(&self) -> Vec3 {
        let matrix = self.to_matrix();
        Vec3::new(
            matrix.fixed_view::<3, 1>(0, 0).norm(),
            matrix.fixed_view::<3, 1>(0, 1).norm(),
            matrix.fixed_view::<3, 1>(0, 2).norm(),
        )
    }

    /// The common scale factor if all three axes agree within `tolerance`
    pub fn uniform_scale(&self, tolerance: f32) -> Option<f32> {
        let factors = self.scale_factors();
        let reference = factors.x;
        let limit = tolerance * reference.abs().max(1.0);
        ((factors.y - reference).abs() <= limit && (factors.z - reference).abs() <= limit)
            .then_some(reference)
    }
}

/// Math constants
pub mod constants {
    /// Pi / 2
    pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_forward_of_identity_is_z() {
        let transform = Transform::identity();
        assert_relative_eq!(transform.forward(), Vec3::z(), epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_local_about_y_quarter_turn() {
        let mut transform = Transform::identity();
        transform.rotate_local(Axis::Y, constants::HALF_PI);
        assert_relative_eq!(transform.forward(), Vec3::x(), epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_local_composes_in_local_frame() {
        // Facing +X, a local X turn of `a` swings forward to (cos a, -sin a, 0)
        let mut transform = Transform::identity();
        transform.rotate_local(Axis::Y, constants::HALF_PI);
        transform.rotate_local(Axis::X, 0.3);

        let forward = transform.forward();
        assert_relative_eq!(forward.x, 0.3_f32.cos(), epsilon = EPSILON);
        assert_relative_eq!(forward.y, -(0.3_f32.sin()), epsilon = EPSILON);
        assert_relative_eq!(forward.z, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_scale_factors_ignore_rotation() {
        let mut transform = Transform::from_position(Vec3::new(4.0, 5.0, 6.0))
            .with_scale(Vec3::new(2.0, 3.0, 4.0));
        transform.rotate_local(Axis::Z, 0.7);

        assert_relative_eq!(transform.scale_factors(), Vec3::new(2.0, 3.0, 4.0), epsilon = EPSILON);
    }

    #[test]
    fn test_uniform_scale_detection() {
        let uniform = Transform::identity().with_scale(Vec3::new(2.0, 2.0, 2.0));
        let skewed = Transform::identity().with_scale(Vec3::new(2.0, 1.0, 2.0));

        assert_relative_eq!(uniform.uniform_scale(1e-5).unwrap_or_default(), 2.0, epsilon = EPSILON);
        assert!(skewed.uniform_scale(1e-5).is_none());
    }

    #[test]
    fn test_translate_accumulates() {
        let mut transform = Transform::identity();
        transform.translate(Vec3::new(1.0, 0.0, 0.0));
        transform.translate(Vec3::new(0.5, -1.0, 0.0));
        assert_relative_eq!(transform.position, Vec3::new(1.5, -1.0, 0.0), epsilon = EPSILON);
    }
}
