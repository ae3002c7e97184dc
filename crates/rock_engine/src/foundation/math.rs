//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the handful of world-matrix operations the
//! gameplay systems need. Matrices follow nalgebra's column-vector convention:
//! translation lives in the fourth column and `A * B` applies `B` first.

pub use nalgebra::{
    Vector3, Matrix3, Matrix4,
    Rotation3, Unit, UnitQuaternion,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Extension trait for Mat4 with the world-matrix operations used by gameplay code
pub trait Mat4Ext {
    /// Create a rotation matrix around the Y (vertical) axis
    fn rotation_y(angle: f32) -> Mat4;

    /// World-space translation stored in the matrix
    fn position(&self) -> Vec3;

    /// Overwrite the translation, leaving rotation and scale untouched
    fn set_position(&mut self, position: Vec3);

    /// Translate along world axes (`T * M`)
    fn translate_global(&self, offset: &Vec3) -> Mat4;

    /// Translate along the matrix's own axes (`M * T`)
    fn translate_local(&self, offset: &Vec3) -> Mat4;

    /// Per-axis scale factors (lengths of the basis columns)
    fn scale_factors(&self) -> Vec3;

    /// Rotation with scale removed
    fn rotation(&self) -> Quat;

    /// Replace the orientation by a pure yaw, preserving position and scale
    fn with_rotation_y(&self, angle: f32) -> Mat4;

    /// Scale the basis in local space; translation is preserved
    fn scale_local(&self, factors: &Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn position(&self) -> Vec3 {
        Vec3::new(self.m14, self.m24, self.m34)
    }

    fn set_position(&mut self, position: Vec3) {
        self.m14 = position.x;
        self.m24 = position.y;
        self.m34 = position.z;
    }

    fn translate_global(&self, offset: &Vec3) -> Mat4 {
        Mat4::new_translation(offset) * self
    }

    fn translate_local(&self, offset: &Vec3) -> Mat4 {
        self * Mat4::new_translation(offset)
    }

    fn scale_factors(&self) -> Vec3 {
        let scale_x = Vec3::new(self.m11, self.m21, self.m31).magnitude();
        let scale_y = Vec3::new(self.m12, self.m22, self.m32).magnitude();
        let scale_z = Vec3::new(self.m13, self.m23, self.m33).magnitude();
        Vec3::new(scale_x, scale_y, scale_z)
    }

    fn rotation(&self) -> Quat {
        let scale = self.scale_factors();
        if scale.iter().any(|s| *s <= f32::EPSILON) {
            return Quat::identity();
        }

        let rotation_matrix = Mat3::new(
            self.m11 / scale.x, self.m12 / scale.y, self.m13 / scale.z,
            self.m21 / scale.x, self.m22 / scale.y, self.m23 / scale.z,
            self.m31 / scale.x, self.m32 / scale.y, self.m33 / scale.z,
        );
        Quat::from_matrix(&rotation_matrix)
    }

    fn with_rotation_y(&self, angle: f32) -> Mat4 {
        let mut result = Rotation3::from_axis_angle(&Vec3::y_axis(), angle).to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale_factors());
        result.set_position(self.position());
        result
    }

    fn scale_local(&self, factors: &Vec3) -> Mat4 {
        self * Mat4::new_nonuniform_scaling(factors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_rotation_y_faces_negative_z_at_zero() {
        let forward = Mat4::rotation_y(0.0).transform_vector(&Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(forward, Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);

        let angle = 0.7_f32;
        let turned = Mat4::rotation_y(angle).transform_vector(&Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(turned, Vec3::new(-angle.sin(), 0.0, -angle.cos()), epsilon = EPSILON);
    }

    #[test]
    fn test_global_and_local_translation_differ_under_rotation() {
        let rotated = Mat4::rotation_y(std::f32::consts::FRAC_PI_2);
        let offset = Vec3::new(0.0, 0.0, -1.0);

        assert_relative_eq!(rotated.translate_global(&offset).position(), offset, epsilon = EPSILON);
        assert_relative_eq!(
            rotated.translate_local(&offset).position(),
            Vec3::new(-1.0, 0.0, 0.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_scale_and_rotation_extraction() {
        let angle = 0.4;
        let matrix = Mat4::new_translation(&Vec3::new(3.0, 0.0, -2.0))
            * Mat4::rotation_y(angle)
            * Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 1.0, 0.5));

        assert_relative_eq!(matrix.scale_factors(), Vec3::new(2.0, 1.0, 0.5), epsilon = EPSILON);
        assert_relative_eq!(matrix.rotation().angle(), angle, epsilon = EPSILON);
        assert_relative_eq!(matrix.position(), Vec3::new(3.0, 0.0, -2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_with_rotation_y_preserves_position_and_scale() {
        let matrix = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0))
            * Mat4::rotation_y(1.2)
            * Mat4::new_scaling(2.0);

        let replaced = matrix.with_rotation_y(-0.3);
        assert_relative_eq!(replaced.position(), Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
        assert_relative_eq!(replaced.scale_factors(), Vec3::new(2.0, 2.0, 2.0), epsilon = EPSILON);
        assert_relative_eq!(
            replaced.rotation().angle_to(&Quat::from_axis_angle(&Vec3::y_axis(), -0.3)),
            0.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_scale_local_keeps_translation() {
        let matrix = Mat4::new_translation(&Vec3::new(4.0, 0.0, 4.0));
        let scaled = matrix.scale_local(&Vec3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(scaled.position(), Vec3::new(4.0, 0.0, 4.0), epsilon = EPSILON);
        assert_relative_eq!(scaled.scale_factors(), Vec3::new(0.5, 0.5, 0.5), epsilon = EPSILON);
    }
}
