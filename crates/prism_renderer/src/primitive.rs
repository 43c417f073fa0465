//! Primitive trait and hit records for ray-shape intersection.

use prism_math::{Aabb, Ray, Vec2, Vec3};

/// Offset applied to secondary ray origins and to containment tests.
pub const EPSILON: f32 = 1e-4;

/// Outcome of a single primitive intersection test.
///
/// `distance` is the ray parameter of the closest valid hit and is only
/// meaningful when `hit` is true.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceResult {
    pub hit: bool,
    pub distance: f32,
}

impl TraceResult {
    pub const MISS: TraceResult = TraceResult {
        hit: false,
        distance: f32::INFINITY,
    };

    /// A hit at ray parameter `distance`.
    #[inline]
    pub fn at(distance: f32) -> Self {
        Self {
            hit: true,
            distance,
        }
    }

    /// The hit distance, if any.
    #[inline]
    pub fn distance(&self) -> Option<f32> {
        self.hit.then_some(self.distance)
    }
}

/// Everything the shading code needs to know about a ray-surface hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Ray parameter of the hit
    pub distance: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Geometric surface normal (unit length, outward facing)
    pub normal: Vec3,
    /// Texture coordinates
    pub uv: Vec2,
    /// Index of the triangle that was hit, for meshes
    pub triangle: Option<usize>,
}

/// Trait for shapes that can be intersected by rays.
///
/// All methods are pure functions of the shape geometry and their arguments.
pub trait Primitive: Send + Sync {
    /// Find the nearest positive intersection along `ray`.
    fn intersect(&self, ray: &Ray) -> TraceResult;

    /// Unit surface normal at a point on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;

    /// Texture coordinates at a point on the surface.
    fn uv_at(&self, point: Vec3) -> Vec2;

    /// Get the axis-aligned bounding box of this shape.
    fn bounding_box(&self) -> Aabb;

    /// Intersect and gather the surface data at the hit point.
    fn hit(&self, ray: &Ray) -> Option<SurfaceHit> {
        let distance = self.intersect(ray).distance()?;
        let point = ray.at(distance);
        Some(SurfaceHit {
            distance,
            point,
            normal: self.normal_at(point),
            uv: self.uv_at(point),
            triangle: None,
        })
    }
}
