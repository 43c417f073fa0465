//! The closed set of shapes a scene object can hold.

use crate::primitive::{Primitive, SurfaceHit, TraceResult};
use crate::{Cuboid, Mesh, Plane, Sphere, Triangle};
use prism_math::{Aabb, Ray, Vec2, Vec3};

/// Any supported shape. Dispatch is a `match`, not a vtable call.
#[derive(Debug, Clone)]
pub enum Shape {
    Cuboid(Cuboid),
    Plane(Plane),
    Sphere(Sphere),
    Triangle(Triangle),
    Mesh(Mesh),
}

impl Shape {
    /// Short name of the shape kind, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Cuboid(_) => "box",
            Shape::Plane(_) => "plane",
            Shape::Sphere(_) => "sphere",
            Shape::Triangle(_) => "triangle",
            Shape::Mesh(_) => "mesh",
        }
    }

    fn as_primitive(&self) -> &dyn Primitive {
        match self {
            Shape::Cuboid(s) => s,
            Shape::Plane(s) => s,
            Shape::Sphere(s) => s,
            Shape::Triangle(s) => s,
            Shape::Mesh(s) => s,
        }
    }
}

impl Primitive for Shape {
    #[inline]
    fn intersect(&self, ray: &Ray) -> TraceResult {
        match self {
            Shape::Cuboid(s) => s.intersect(ray),
            Shape::Plane(s) => s.intersect(ray),
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Triangle(s) => s.intersect(ray),
            Shape::Mesh(s) => s.intersect(ray),
        }
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        self.as_primitive().normal_at(point)
    }

    fn uv_at(&self, point: Vec3) -> Vec2 {
        self.as_primitive().uv_at(point)
    }

    fn bounding_box(&self) -> Aabb {
        self.as_primitive().bounding_box()
    }

    #[inline]
    fn hit(&self, ray: &Ray) -> Option<SurfaceHit> {
        match self {
            Shape::Cuboid(s) => s.hit(ray),
            Shape::Plane(s) => s.hit(ray),
            Shape::Sphere(s) => s.hit(ray),
            Shape::Triangle(s) => s.hit(ray),
            Shape::Mesh(s) => s.hit(ray),
        }
    }
}

impl From<Cuboid> for Shape {
    fn from(shape: Cuboid) -> Self {
        Shape::Cuboid(shape)
    }
}

impl From<Plane> for Shape {
    fn from(shape: Plane) -> Self {
        Shape::Plane(shape)
    }
}

impl From<Sphere> for Shape {
    fn from(shape: Sphere) -> Self {
        Shape::Sphere(shape)
    }
}

impl From<Triangle> for Shape {
    fn from(shape: Triangle) -> Self {
        Shape::Triangle(shape)
    }
}

impl From<Mesh> for Shape {
    fn from(shape: Mesh) -> Self {
        Shape::Mesh(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_dispatch_matches_inner() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        let shape = Shape::from(sphere.clone());
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        assert_eq!(shape.intersect(&ray), sphere.intersect(&ray));
        assert_eq!(shape.bounding_box(), sphere.bounding_box());
        assert_eq!(shape.kind_name(), "sphere");
    }

    #[test]
    fn test_shape_mesh_keeps_triangle_index() {
        let mesh = Mesh::from_vertices(&[Vec3::ZERO, Vec3::X, Vec3::Y]);
        let shape = Shape::from(mesh);
        let ray = Ray::new(Vec3::new(0.2, 0.2, -1.0), Vec3::Z);

        let hit = shape.hit(&ray).expect("ray hits the triangle");
        assert_eq!(hit.triangle, Some(0));
    }
}
