// Transform utilities for Mat4
//
// Extends glam::Mat4 with the helpers object-space ray tracing needs.
// glam::Mat4 already provides transform_point3(), transform_vector3() and inverse().

use crate::{Aabb, Ray};
use glam::{Mat3, Mat4, Vec3};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    /// Unbounded boxes stay unbounded.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;

    /// Transform a surface normal with the inverse-transpose of the
    /// upper 3x3 and renormalize it.
    fn transform_normal(&self, normal: Vec3) -> Vec3;

    /// Transform a ray: origin as a point, direction as a vector.
    /// The direction is not renormalized, so ray parameters carry over.
    fn transform_ray(&self, ray: &Ray) -> Ray;
}

impl Mat4Ext for Mat4 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        if aabb.is_empty() {
            return Aabb::EMPTY;
        }
        if !aabb.is_finite() {
            return Aabb::UNIVERSE;
        }

        let min_point = aabb.min();
        let max_point = aabb.max();

        let corners = [
            Vec3::new(min_point.x, min_point.y, min_point.z),
            Vec3::new(max_point.x, min_point.y, min_point.z),
            Vec3::new(min_point.x, max_point.y, min_point.z),
            Vec3::new(max_point.x, max_point.y, min_point.z),
            Vec3::new(min_point.x, min_point.y, max_point.z),
            Vec3::new(max_point.x, min_point.y, max_point.z),
            Vec3::new(min_point.x, max_point.y, max_point.z),
            Vec3::new(max_point.x, max_point.y, max_point.z),
        ];

        let transformed: Vec<Vec3> = corners
            .iter()
            .map(|&corner| self.transform_point3(corner))
            .collect();

        Aabb::from_point_cloud(&transformed)
    }

    fn transform_normal(&self, normal: Vec3) -> Vec3 {
        let normal_matrix = Mat3::from_mat4(*self).inverse().transpose();
        (normal_matrix * normal).normalize()
    }

    fn transform_ray(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.transform_point3(ray.origin),
            self.transform_vector3(ray.direction),
        )
    }
}
