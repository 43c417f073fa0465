//! Triangle mesh primitive.
//!
//! A mesh is a flat list of triangles tested by linear scan. The hit record
//! carries the nearest triangle's normal, UV and index, so shading never has
//! to ask the mesh which triangle was hit last.

use crate::primitive::{Primitive, SurfaceHit, TraceResult, EPSILON};
use crate::triangle::{Barycentric, Triangle};
use prism_math::{Aabb, Interval, Ray, Vec2, Vec3};

/// A triangle mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    bbox: Aabb,
}

impl Mesh {
    /// Build a mesh from a flat vertex list, three vertices per triangle.
    ///
    /// Trailing vertices that do not form a full triangle are ignored.
    pub fn from_vertices(positions: &[Vec3]) -> Self {
        if positions.len() % 3 != 0 {
            log::warn!(
                "Mesh vertex count {} is not a multiple of 3, dropping {} trailing vertices",
                positions.len(),
                positions.len() % 3
            );
        }

        let triangles = positions
            .chunks_exact(3)
            .map(|tri| Triangle::new(tri[0], tri[1], tri[2]))
            .collect();

        Self::from_triangles(triangles)
    }

    /// Build an indexed mesh, with optional per-vertex texture coordinates.
    ///
    /// Every 3 indices form a triangle. Triangles referencing missing
    /// vertices are skipped.
    pub fn indexed(positions: &[Vec3], indices: &[u32], uvs: Option<&[Vec2]>) -> Self {
        let mut triangles = Vec::with_capacity(indices.len() / 3);

        for chunk in indices.chunks_exact(3) {
            let i0 = chunk[0] as usize;
            let i1 = chunk[1] as usize;
            let i2 = chunk[2] as usize;

            // Bounds check
            if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
                log::warn!(
                    "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                    i0,
                    i1,
                    i2,
                    positions.len()
                );
                continue;
            }

            let triangle = match uvs {
                Some(uvs) if i0 < uvs.len() && i1 < uvs.len() && i2 < uvs.len() => {
                    Triangle::with_uvs(
                        positions[i0],
                        positions[i1],
                        positions[i2],
                        [uvs[i0], uvs[i1], uvs[i2]],
                    )
                }
                _ => Triangle::new(positions[i0], positions[i1], positions[i2]),
            };
            triangles.push(triangle);
        }

        Self::from_triangles(triangles)
    }

    /// Build a mesh from ready-made triangles.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        let bbox = triangles
            .iter()
            .fold(Aabb::EMPTY, |acc, tri| Aabb::surrounding(&acc, &tri.bounding_box()));

        log::debug!("Built mesh with {} triangles", triangles.len());

        Self { triangles, bbox }
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangle(&self, index: usize) -> Option<&Triangle> {
        self.triangles.get(index)
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Linear scan for the nearest triangle hit.
    ///
    /// Returns the triangle index alongside its barycentric solution.
    fn nearest(&self, ray: &Ray) -> Option<(usize, Barycentric)> {
        if self.triangles.is_empty() || !self.bbox.hit(ray, Interval::POSITIVE) {
            return None;
        }

        let mut nearest: Option<(usize, Barycentric)> = None;
        for (index, triangle) in self.triangles.iter().enumerate() {
            if let Some(hit) = triangle.solve(ray) {
                if nearest.map_or(true, |(_, best)| hit.t < best.t) {
                    nearest = Some((index, hit));
                }
            }
        }

        nearest
    }

    /// The triangle whose surface holds `point`, if any.
    fn triangle_at(&self, point: Vec3) -> Option<&Triangle> {
        const SLACK: f32 = EPSILON;

        self.triangles
            .iter()
            .filter(|tri| !tri.is_degenerate())
            .filter(|tri| {
                tri.barycentric(point).is_some_and(|b| {
                    b.x >= -SLACK && b.y >= -SLACK && b.x + b.y <= 1.0 + SLACK
                })
            })
            .min_by(|a, b| {
                a.plane_distance(point)
                    .total_cmp(&b.plane_distance(point))
            })
    }
}

impl Primitive for Mesh {
    fn intersect(&self, ray: &Ray) -> TraceResult {
        match self.nearest(ray) {
            Some((_, hit)) => TraceResult::at(hit.t),
            None => TraceResult::MISS,
        }
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        self.triangle_at(point)
            .map_or(Vec3::Y, |tri| tri.normal())
    }

    fn uv_at(&self, point: Vec3) -> Vec2 {
        self.triangle_at(point)
            .map_or(Vec2::ZERO, |tri| tri.uv_at(point))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn hit(&self, ray: &Ray) -> Option<SurfaceHit> {
        let (index, hit) = self.nearest(ray)?;
        let triangle = &self.triangles[index];

        Some(SurfaceHit {
            distance: hit.t,
            point: ray.at(hit.t),
            normal: triangle.normal(),
            uv: triangle.interpolate_uv(hit.u, hit.v),
            triangle: Some(index),
        })
    }
}
