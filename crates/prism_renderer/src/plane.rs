//! Infinite plane primitive.

use crate::primitive::{Primitive, TraceResult};
use prism_math::{Aabb, Ray, Vec2, Vec3};

/// An infinite plane, the set of points with `dot(normal, p) + distance == 0`.
///
/// Planes are one-sided: only rays travelling against the normal hit them.
#[derive(Debug, Clone)]
pub struct Plane {
    normal: Vec3,
    distance: f32,
    u_axis: Vec3,
    v_axis: Vec3,
}

impl Plane {
    /// Create a plane from a normal and a signed distance.
    ///
    /// The normal is normalized; the distance is rescaled to match.
    pub fn new(normal: Vec3, distance: f32) -> Self {
        let len = normal.length();
        let (normal, distance) = if len > 0.0 {
            (normal / len, distance / len)
        } else {
            (Vec3::Y, distance)
        };
        let u_axis = normal.any_orthonormal_vector();
        let v_axis = normal.cross(u_axis);

        Self {
            normal,
            distance,
            u_axis,
            v_axis,
        }
    }

    /// Create the plane through `point` facing `normal`.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let n = normal.normalize_or(Vec3::Y);
        Self::new(n, -n.dot(point))
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl Primitive for Plane {
    fn intersect(&self, ray: &Ray) -> TraceResult {
        let denom = self.normal.dot(ray.direction);
        // Back-facing and parallel rays never hit.
        if denom >= 0.0 {
            return TraceResult::MISS;
        }

        let t = -(self.normal.dot(ray.origin) + self.distance) / denom;
        if t > 0.0 {
            TraceResult::at(t)
        } else {
            TraceResult::MISS
        }
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn uv_at(&self, point: Vec3) -> Vec2 {
        Vec2::new(point.dot(self.u_axis), point.dot(self.v_axis))
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::UNIVERSE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Plane {
        // y = -1
        Plane::new(Vec3::Y, 1.0)
    }

    #[test]
    fn test_plane_front_face_hit() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), -Vec3::Y);
        let result = floor().intersect(&ray);

        assert!(result.hit);
        assert!((result.distance - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_plane_back_face_never_hits() {
        let plane = floor();

        // Non-negative dot with the normal: no hit from either side.
        let from_below = Ray::new(Vec3::new(0.0, -5.0, 0.0), Vec3::Y);
        let from_above = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 0.5, 0.0));
        let parallel = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X);

        assert!(!plane.intersect(&from_below).hit);
        assert!(!plane.intersect(&from_above).hit);
        assert!(!plane.intersect(&parallel).hit);
    }

    #[test]
    fn test_plane_behind_origin() {
        // Ray points against the normal but the plane is behind it.
        let ray = Ray::new(Vec3::new(0.0, -3.0, 0.0), -Vec3::Y);
        assert!(!floor().intersect(&ray).hit);
    }

    #[test]
    fn test_plane_from_point_normal() {
        let plane = Plane::from_point_normal(Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, -2.0));

        assert_eq!(plane.normal(), -Vec3::Z);
        assert!((plane.distance() - 4.0).abs() < 1e-6);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!((plane.intersect(&ray).distance - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_plane_uv_axes_are_orthogonal() {
        let plane = Plane::new(Vec3::new(1.0, 1.0, 1.0), 0.0);

        assert!(plane.u_axis.dot(plane.normal).abs() < 1e-5);
        assert!(plane.v_axis.dot(plane.normal).abs() < 1e-5);
        assert!(plane.u_axis.dot(plane.v_axis).abs() < 1e-5);

        // Moving along the normal leaves the UV unchanged.
        let p = Vec3::new(0.3, -0.1, 0.7);
        let uv_a = plane.uv_at(p);
        let uv_b = plane.uv_at(p + plane.normal * 2.0);
        assert!((uv_a - uv_b).length() < 1e-5);
    }
}
