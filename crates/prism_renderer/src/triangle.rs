//! Triangle primitive.
//!
//! Intersection solves for the barycentric coordinates with Cramer's rule
//! (the Möller-Trumbore formulation). Edges count as inside.

use crate::primitive::{Primitive, TraceResult};
use prism_math::{Aabb, Ray, Vec2, Vec3};

/// Determinants below this magnitude mean the ray is parallel to the
/// triangle or the triangle is degenerate.
pub const DETERMINANT_EPSILON: f32 = 1e-8;

/// Default texture coordinates, so the interpolated UV equals the raw
/// barycentric `(u, v)`.
const DEFAULT_UVS: [Vec2; 3] = [Vec2::ZERO, Vec2::X, Vec2::Y];

/// A flat-shaded triangle.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length, zero when degenerate)
    normal: Vec3,
    /// Per-vertex texture coordinates
    uvs: [Vec2; 3],
    /// Bounding box
    bbox: Aabb,
}

/// Barycentric solution of a ray-triangle hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    pub t: f32,
    pub u: f32,
    pub v: f32,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self::with_uvs(v0, v1, v2, DEFAULT_UVS)
    }

    /// Create a triangle with explicit per-vertex texture coordinates.
    pub fn with_uvs(v0: Vec3, v1: Vec3, v2: Vec3, uvs: [Vec2; 3]) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        let bbox = Aabb::from_point_cloud(&[v0, v1, v2]);

        Self {
            v0,
            v1,
            v2,
            normal,
            uvs,
            bbox,
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Face normal, zero for degenerate triangles.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO
    }

    /// Solve for the ray parameter and barycentric coordinates.
    pub fn solve(&self, ray: &Ray) -> Option<Barycentric> {
        let e0 = self.v1 - self.v0;
        let e1 = self.v2 - self.v0;

        let p = ray.direction.cross(e1);
        let det = e0.dot(p);
        if det.abs() < DETERMINANT_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = ray.origin - self.v0;
        let u = tvec.dot(p) * inv_det;
        if u < 0.0 || u > 1.0 {
            return None;
        }

        let q = tvec.cross(e0);
        let v = ray.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = e1.dot(q) * inv_det;
        if t <= 0.0 {
            return None;
        }

        Some(Barycentric { t, u, v })
    }

    /// Barycentric `(u, v)` of a point projected onto the triangle plane.
    ///
    /// `u` weighs `v1`, `v` weighs `v2`. Returns `None` for degenerate
    /// triangles.
    pub fn barycentric(&self, point: Vec3) -> Option<Vec2> {
        let e0 = self.v1 - self.v0;
        let e1 = self.v2 - self.v0;
        let rel = point - self.v0;

        let d00 = e0.dot(e0);
        let d01 = e0.dot(e1);
        let d11 = e1.dot(e1);
        let d20 = rel.dot(e0);
        let d21 = rel.dot(e1);

        let denom = d00 * d11 - d01 * d01;
        if denom.abs() < DETERMINANT_EPSILON {
            return None;
        }

        Some(Vec2::new(
            (d11 * d20 - d01 * d21) / denom,
            (d00 * d21 - d01 * d20) / denom,
        ))
    }

    /// Distance from `point` to the triangle's plane.
    pub fn plane_distance(&self, point: Vec3) -> f32 {
        (point - self.v0).dot(self.normal).abs()
    }

    /// Interpolate the texture coordinates at barycentric `(u, v)`.
    pub fn interpolate_uv(&self, u: f32, v: f32) -> Vec2 {
        self.uvs[0] * (1.0 - u - v) + self.uvs[1] * u + self.uvs[2] * v
    }
}

impl Primitive for Triangle {
    fn intersect(&self, ray: &Ray) -> TraceResult {
        match self.solve(ray) {
            Some(hit) => TraceResult::at(hit.t),
            None => TraceResult::MISS,
        }
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn uv_at(&self, point: Vec3) -> Vec2 {
        match self.barycentric(point) {
            Some(bary) => self.interpolate_uv(bary.x, bary.y),
            None => self.uvs[0],
        }
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y)
    }

    fn ray_at(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, -1.0), Vec3::Z)
    }

    #[test]
    fn test_triangle_hit() {
        let result = unit_triangle().intersect(&ray_at(0.25, 0.25));

        assert!(result.hit);
        assert!((result.distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_edges_are_inclusive() {
        let tri = unit_triangle();

        // v == 0
        let hit = tri.solve(&ray_at(0.5, 0.0)).expect("edge v = 0 is inside");
        assert_eq!(hit.v, 0.0);
        // u == 0
        let hit = tri.solve(&ray_at(0.0, 0.5)).expect("edge u = 0 is inside");
        assert_eq!(hit.u, 0.0);
        // u + v == 1
        let hit = tri.solve(&ray_at(0.5, 0.5)).expect("edge u + v = 1 is inside");
        assert_eq!(hit.u + hit.v, 1.0);
    }

    #[test]
    fn test_triangle_miss_outside() {
        let tri = unit_triangle();

        assert!(!tri.intersect(&ray_at(0.6, 0.5)).hit);
        assert!(!tri.intersect(&ray_at(-0.1, 0.5)).hit);
        assert!(!tri.intersect(&ray_at(0.5, -0.1)).hit);
    }

    #[test]
    fn test_triangle_miss_behind() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::Z);
        assert!(!unit_triangle().intersect(&ray).hit);
    }

    #[test]
    fn test_triangle_hit_from_back_side() {
        // Triangles are two-sided for intersection purposes.
        let ray = Ray::new(Vec3::new(0.25, 0.25, 1.0), -Vec3::Z);
        assert!(unit_triangle().intersect(&ray).hit);
    }

    #[test]
    fn test_degenerate_triangle_is_a_miss() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);

        assert!(tri.is_degenerate());
        assert!(!tri.intersect(&ray_at(0.5, 0.0)).hit);
    }

    #[test]
    fn test_parallel_ray_is_a_miss() {
        let ray = Ray::new(Vec3::new(-1.0, 0.25, 0.0), Vec3::X);
        assert!(!unit_triangle().intersect(&ray).hit);
    }

    #[test]
    fn test_triangle_normal() {
        assert_eq!(unit_triangle().normal_at(Vec3::ZERO), Vec3::Z);
    }

    #[test]
    fn test_triangle_uv_defaults_to_barycentric() {
        let uv = unit_triangle().uv_at(Vec3::new(0.25, 0.5, 0.0));
        assert!((uv - Vec2::new(0.25, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_triangle_uv_interpolation() {
        let tri = Triangle::with_uvs(
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)],
        );

        // Midpoint of the v1-v2 edge
        let uv = tri.uv_at(Vec3::new(1.0, 1.0, 0.0));
        assert!((uv - Vec2::new(1.0, 0.5)).length() < 1e-6);
    }
}
