//! Oriented bounding boxes
//!
//! The separating-axis test checks the 15 candidate axes of two boxes: three
//! face normals of each plus the nine pairwise edge cross products.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat3, Mat4, Mat4Ext, Point3, Quat, Vec3};

/// Padding added to the absolute rotation terms so near-parallel edges do not
/// produce a degenerate cross-product axis.
const AXIS_EPSILON: f32 = 1e-6;

/// An oriented bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obb {
    /// Center of the box
    pub center: Vec3,
    /// Half-size along each local axis
    pub extents: Vec3,
    /// Orientation of the local axes
    pub rotation: Quat,
}

impl Obb {
    /// Create a box from its center, half-extents and orientation
    pub fn new(center: Vec3, extents: Vec3, rotation: Quat) -> Self {
        Self {
            center,
            extents,
            rotation,
        }
    }

    /// Axis-aligned box centered at the origin
    pub fn from_extents(extents: Vec3) -> Self {
        Self::new(Vec3::zeros(), extents, Quat::identity())
    }

    /// The three local axes in the box's space
    pub fn axes(&self) -> [Vec3; 3] {
        [
            self.rotation * Vec3::x(),
            self.rotation * Vec3::y(),
            self.rotation * Vec3::z(),
        ]
    }

    /// Carry a model-space box into world space
    ///
    /// Extents pick up the transform's per-axis scale, the center goes through
    /// the full transform and the orientation composes with the transform's
    /// rotation.
    pub fn to_world(&self, transform: &Mat4) -> Self {
        let center = transform.transform_point(&Point3::from(self.center)).coords;
        Self {
            center,
            extents: self.extents.component_mul(&transform.scale_factors()),
            rotation: transform.rotation() * self.rotation,
        }
    }

    /// Separating-axis intersection test
    ///
    /// Boxes that exactly touch count as intersecting.
    pub fn intersects(&self, other: &Self) -> bool {
        let a = self.axes();
        let b = other.axes();
        let ea = self.extents;
        let eb = other.extents;

        // Rotation expressing `other` in this box's frame
        let r = Mat3::from_fn(|i, j| a[i].dot(&b[j]));
        let abs_r = r.map(|v| v.abs() + AXIS_EPSILON);

        let d = other.center - self.center;
        let t = Vec3::new(d.dot(&a[0]), d.dot(&a[1]), d.dot(&a[2]));

        for i in 0..3 {
            let ra = ea[i];
            let rb = eb[0] * abs_r[(i, 0)] + eb[1] * abs_r[(i, 1)] + eb[2] * abs_r[(i, 2)];
            if t[i].abs() > ra + rb {
                return false;
            }
        }

        for j in 0..3 {
            let ra = ea[0] * abs_r[(0, j)] + ea[1] * abs_r[(1, j)] + ea[2] * abs_r[(2, j)];
            let rb = eb[j];
            let projected = t[0] * r[(0, j)] + t[1] * r[(1, j)] + t[2] * r[(2, j)];
            if projected.abs() > ra + rb {
                return false;
            }
        }

        for i in 0..3 {
            let i1 = (i + 1) % 3;
            let i2 = (i + 2) % 3;
            for j in 0..3 {
                let j1 = (j + 1) % 3;
                let j2 = (j + 2) % 3;
                let ra = ea[i1] * abs_r[(i2, j)] + ea[i2] * abs_r[(i1, j)];
                let rb = eb[j1] * abs_r[(i, j2)] + eb[j2] * abs_r[(i, j1)];
                let projected = t[i2] * r[(i1, j)] - t[i1] * r[(i2, j)];
                if projected.abs() > ra + rb {
                    return false;
                }
            }
        }

        true
    }

    /// Point of the box nearest to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let d = point - self.center;
        self.axes()
            .iter()
            .zip(self.extents.iter())
            .fold(self.center, |closest, (axis, extent)| {
                closest + axis * d.dot(axis).clamp(-extent, *extent)
            })
    }
}

impl Default for Obb {
    fn default() -> Self {
        Self::from_extents(Vec3::new(0.5, 0.5, 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    fn unit_box_at(center: Vec3) -> Obb {
        Obb::new(center, Vec3::new(1.0, 1.0, 1.0), Quat::identity())
    }

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = unit_box_at(Vec3::zeros());
        let b = unit_box_at(Vec3::new(1.5, 0.0, 0.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_separated_boxes_do_not_intersect() {
        let a = unit_box_at(Vec3::zeros());
        let b = unit_box_at(Vec3::new(2.5, 0.0, 0.0));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_touching_faces_count_as_intersecting() {
        let a = unit_box_at(Vec3::zeros());
        let b = unit_box_at(Vec3::new(2.0, 0.0, 0.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_rotated_box_separated_on_its_own_axis() {
        // Axis-aligned bounds would overlap here; only the rotated face axis separates
        let a = unit_box_at(Vec3::zeros());
        let b = Obb::new(
            Vec3::new(2.2, 0.0, 2.2),
            Vec3::new(1.0, 1.0, 1.0),
            Quat::from_axis_angle(&Vec3::y_axis(), FRAC_PI_4),
        );
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_rotated_boxes_overlapping() {
        let a = Obb::new(
            Vec3::zeros(),
            Vec3::new(2.0, 0.5, 0.25),
            Quat::from_axis_angle(&Vec3::y_axis(), 0.3),
        );
        let b = Obb::new(
            Vec3::new(1.0, 0.2, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Quat::from_axis_angle(&Vec3::x_axis(), 0.7),
        );
        assert_eq!(a.intersects(&b), b.intersects(&a));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_closest_point_inside_is_identity() {
        let obb = unit_box_at(Vec3::new(3.0, 0.0, 0.0));
        let p = Vec3::new(3.5, 0.2, -0.4);
        assert_relative_eq!(obb.closest_point(p), p, epsilon = 1e-6);
    }

    #[test]
    fn test_closest_point_outside_clamps_to_surface() {
        let obb = unit_box_at(Vec3::zeros());
        let p = Vec3::new(5.0, 0.5, -3.0);
        assert_relative_eq!(obb.closest_point(p), Vec3::new(1.0, 0.5, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_to_world_applies_scale_translation_and_rotation() {
        let local = Obb::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 2.0, 3.0), Quat::identity());
        let transform = Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0))
            * Mat4::rotation_y(std::f32::consts::FRAC_PI_2)
            * Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 1.0, 0.5));

        let world = local.to_world(&transform);
        assert_relative_eq!(world.extents, Vec3::new(2.0, 2.0, 1.5), epsilon = 1e-5);
        // Local +z scaled by 0.5 then turned a quarter about y lands on +x
        assert_relative_eq!(world.center, Vec3::new(10.5, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(world.axes()[2], Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
    }
}
