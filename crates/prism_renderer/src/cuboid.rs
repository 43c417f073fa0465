//! Axis-aligned box primitive.

use crate::primitive::{Primitive, TraceResult, EPSILON};
use prism_math::{Aabb, Ray, Vec2, Vec3};

/// An axis-aligned box given by its center and half-extents.
///
/// Rotated boxes are expressed through the owning object's transform.
#[derive(Debug, Clone)]
pub struct Cuboid {
    center: Vec3,
    half_extents: Vec3,
}

impl Cuboid {
    /// Create a box. Negative half-extents are taken by magnitude.
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Create a box spanning two corners.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self::new((a + b) * 0.5, (b - a) * 0.5)
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    fn contains_loose(&self, p: Vec3) -> bool {
        let lo = self.min() - Vec3::splat(EPSILON);
        let hi = self.max() + Vec3::splat(EPSILON);
        p.cmpgt(lo).all() && p.cmplt(hi).all()
    }

    /// Axis along which `point` sits furthest from the center.
    fn face_axis(&self, point: Vec3) -> usize {
        let rel = (point - self.center).abs();
        if rel.x >= rel.y && rel.x >= rel.z {
            0
        } else if rel.y >= rel.z {
            1
        } else {
            2
        }
    }
}

impl Primitive for Cuboid {
    /// Tests the two face planes of every axis with a positive direction
    /// component and keeps the nearest candidate that lands on the box
    /// surface. Axes the ray travels backwards along yield no candidates.
    fn intersect(&self, ray: &Ray) -> TraceResult {
        let min = self.min();
        let max = self.max();
        let mut best = TraceResult::MISS;

        for axis in 0..3 {
            let d = ray.direction[axis];
            if d <= 0.0 {
                continue;
            }
            let rc = 1.0 / d;

            for face in [min[axis], max[axis]] {
                let t = (face - ray.origin[axis]) * rc;
                if t <= 0.0 || t >= best.distance {
                    continue;
                }
                if self.contains_loose(ray.at(t)) {
                    best = TraceResult::at(t);
                }
            }
        }

        best
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        let axis = self.face_axis(point);
        let mut normal = Vec3::ZERO;
        normal[axis] = (point[axis] - self.center[axis]).signum();
        normal
    }

    fn uv_at(&self, point: Vec3) -> Vec2 {
        let axis = self.face_axis(point);
        let a = (axis + 1) % 3;
        let b = (axis + 2) % 3;
        let min = self.min();
        let size = (self.half_extents * 2.0).max(Vec3::splat(f32::EPSILON));

        Vec2::new(
            ((point[a] - min[a]) / size[a]).clamp(0.0, 1.0),
            ((point[b] - min[b]) / size[b]).clamp(0.0, 1.0),
        )
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_points(self.min(), self.max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Cuboid {
        Cuboid::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn test_box_hit_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let result = unit_box().intersect(&ray);

        assert!(result.hit);
        assert!((result.distance - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_box_ignores_backward_axes() {
        // Only -Z motion, so no axis offers a candidate face.
        let ray = Ray::new(Vec3::new(0.5, 0.5, 5.0), -Vec3::Z);
        assert!(!unit_box().intersect(&ray).hit);

        // The -X component is skipped; the ray enters through z = -1.
        let ray = Ray::new(Vec3::new(0.5, 0.0, -5.0), Vec3::new(-0.05, 0.0, 1.0));
        let result = unit_box().intersect(&ray);
        assert!(result.hit);
        assert!((result.distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_box_miss() {
        let ray = Ray::new(Vec3::new(3.0, 0.0, -5.0), Vec3::Z);
        assert!(!unit_box().intersect(&ray).hit);

        // Box entirely behind the ray
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(!unit_box().intersect(&ray).hit);
    }

    #[test]
    fn test_box_from_inside_hits_far_face() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let result = unit_box().intersect(&ray);

        assert!(result.hit);
        assert!((result.distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_box_diagonal_keeps_nearest() {
        let b = Cuboid::from_corners(Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 2.0, 2.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.75, 0.75));
        let result = b.intersect(&ray);

        // x = 1 face is reached at t = 1 with y = z = 0.75 (outside), the
        // y = 1 face at t = 4/3 with x = 1.33, z = 1.0 (on the box).
        assert!(result.hit);
        assert!((result.distance - 4.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_box_normals() {
        let b = Cuboid::new(Vec3::ZERO, Vec3::new(4.0, 1.0, 1.0));

        assert_eq!(b.normal_at(Vec3::new(4.0, 0.5, 0.2)), Vec3::X);
        assert_eq!(b.normal_at(Vec3::new(-4.0, 0.5, 0.2)), -Vec3::X);
        // Largest raw offset from the center wins, whatever the extents.
        assert_eq!(b.normal_at(Vec3::new(3.0, 1.0, 0.0)), Vec3::X);
        assert_eq!(b.normal_at(Vec3::new(0.5, -1.0, 0.2)), -Vec3::Y);
        assert_eq!(b.normal_at(Vec3::new(0.0, 0.0, -1.0)), -Vec3::Z);
    }

    #[test]
    fn test_box_uv_on_face() {
        let uv = unit_box().uv_at(Vec3::new(0.0, 1.0, 0.0));
        assert!((uv - Vec2::new(0.5, 0.5)).length() < 1e-6);

        let uv = unit_box().uv_at(Vec3::new(1.0, -1.0, 1.0));
        assert!(uv.x >= 0.0 && uv.x <= 1.0);
        assert!(uv.y >= 0.0 && uv.y <= 1.0);
    }

    #[test]
    fn test_box_bounding_box() {
        let b = Cuboid::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 0.5, 2.0));
        let bbox = b.bounding_box();

        assert_eq!(bbox.min(), Vec3::new(0.0, 1.5, 1.0));
        assert_eq!(bbox.max(), Vec3::new(2.0, 2.5, 5.0));
    }
}
