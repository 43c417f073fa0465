//! Sphere primitive.

use crate::primitive::{Primitive, TraceResult};
use prism_math::{Aabb, Ray, Vec2, Vec3};
use std::f32::consts::PI;

/// A sphere given by center and radius.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    radius_sq: f32,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            radius_sq: radius * radius,
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn sphere_uv(p: Vec3) -> Vec2 {
        // theta: angle down from +Y
        // phi: angle around Y axis from +X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        Vec2::new(phi / (2.0 * PI), theta / PI)
    }
}

impl Primitive for Sphere {
    fn intersect(&self, ray: &Ray) -> TraceResult {
        // The closed form below wants a unit direction; the root is scaled
        // back so the distance matches the caller's parameterization.
        let len = ray.direction.length();
        if len == 0.0 {
            return TraceResult::MISS;
        }
        let dir = ray.direction / len;

        let diff = ray.origin - self.center;
        let b = -diff.dot(dir);
        let det = b * b - diff.dot(diff) + self.radius_sq;
        if det <= 0.0 {
            return TraceResult::MISS;
        }

        let root = det.sqrt();
        let near = b - root;
        let far = b + root;

        // `near` is negative when the origin sits inside the sphere.
        if near >= 0.0 {
            TraceResult::at(near / len)
        } else if far > 0.0 {
            TraceResult::at(far / len)
        } else {
            TraceResult::MISS
        }
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        if self.radius > 0.0 {
            (point - self.center) / self.radius
        } else {
            Vec3::Y
        }
    }

    fn uv_at(&self, point: Vec3) -> Vec2 {
        Self::sphere_uv(self.normal_at(point))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
