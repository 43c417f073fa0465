//! Scene objects: a shape, an optional placement transform and a shader.

use std::sync::Arc;

use prism_math::{Aabb, Mat4, Mat4Ext, Ray, Vec2, Vec3};

use crate::primitive::{Primitive, SurfaceHit, TraceResult};
use crate::shader::Shader;
use crate::shape::Shape;

/// Index of an object within its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

#[derive(Debug, Clone, Copy)]
struct Placement {
    to_world: Mat4,
    to_local: Mat4,
}

/// A shape placed in the scene.
///
/// Rays are moved into object space for intersection; hit points and
/// normals are reported in world space with unchanged ray parameters.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    shape: Shape,
    placement: Option<Placement>,
    shader: Option<Arc<Shader>>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        Self {
            name: name.into(),
            shape: shape.into(),
            placement: None,
            shader: None,
        }
    }

    /// Place the object with a local-to-world transform.
    ///
    /// Identity and non-invertible transforms are ignored.
    pub fn with_transform(mut self, to_world: Mat4) -> Self {
        if to_world == Mat4::IDENTITY {
            self.placement = None;
            return self;
        }
        if to_world.determinant().abs() < f32::EPSILON {
            log::warn!(
                "Transform of object '{}' is not invertible, ignoring it",
                self.name
            );
            return self;
        }
        self.placement = Some(Placement {
            to_world,
            to_local: to_world.inverse(),
        });
        self
    }

    pub fn with_shader(mut self, shader: Arc<Shader>) -> Self {
        self.shader = Some(shader);
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn shader(&self) -> Option<&Shader> {
        self.shader.as_deref()
    }

    /// Local-to-world transform.
    pub fn transform(&self) -> Mat4 {
        self.placement.map_or(Mat4::IDENTITY, |p| p.to_world)
    }
}

impl Primitive for SceneObject {
    fn intersect(&self, ray: &Ray) -> TraceResult {
        match &self.placement {
            Some(p) => self.shape.intersect(&p.to_local.transform_ray(ray)),
            None => self.shape.intersect(ray),
        }
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        match &self.placement {
            Some(p) => {
                let local = self.shape.normal_at(p.to_local.transform_point3(point));
                p.to_world.transform_normal(local)
            }
            None => self.shape.normal_at(point),
        }
    }

    fn uv_at(&self, point: Vec3) -> Vec2 {
        match &self.placement {
            Some(p) => self.shape.uv_at(p.to_local.transform_point3(point)),
            None => self.shape.uv_at(point),
        }
    }

    fn bounding_box(&self) -> Aabb {
        match &self.placement {
            Some(p) => p.to_world.transform_aabb(&self.shape.bounding_box()),
            None => self.shape.bounding_box(),
        }
    }

    fn hit(&self, ray: &Ray) -> Option<SurfaceHit> {
        let Some(p) = &self.placement else {
            return self.shape.hit(ray);
        };

        let local = self.shape.hit(&p.to_local.transform_ray(ray))?;
        Some(SurfaceHit {
            point: ray.at(local.distance),
            normal: p.to_world.transform_normal(local.normal),
            ..local
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cuboid, Sphere};

    #[test]
    fn test_untransformed_object_matches_shape() {
        let object = SceneObject::new("ball", Sphere::new(Vec3::ZERO, 1.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let hit = object.hit(&ray).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert_eq!(object.transform(), Mat4::IDENTITY);
        assert!(object.shader().is_none());
    }

    #[test]
    fn test_translated_sphere() {
        let object = SceneObject::new("ball", Sphere::new(Vec3::ZERO, 1.0))
            .with_transform(Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0)));
        let ray = Ray::new(Vec3::new(3.0, 0.0, -5.0), Vec3::Z);

        let hit = object.hit(&ray).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(3.0, 0.0, -1.0)).length() < 1e-5);
        assert!((hit.normal + Vec3::Z).length() < 1e-5);

        let bbox = object.bounding_box();
        assert!((bbox.min().x - 2.0).abs() < 1e-3);
        assert!((bbox.max().x - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_scaled_sphere_keeps_world_distance() {
        let object = SceneObject::new("ball", Sphere::new(Vec3::ZERO, 1.0))
            .with_transform(Mat4::from_scale(Vec3::splat(2.0)));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let result = object.intersect(&ray);
        assert!(result.hit);
        assert!((result.distance - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotated_box_normal() {
        let rotation = Mat4::from_rotation_y(-std::f32::consts::FRAC_PI_4);
        let object = SceneObject::new("crate", Cuboid::new(Vec3::ZERO, Vec3::ONE))
            .with_transform(rotation);
        let ray = Ray::new(Vec3::new(0.3, 0.0, -5.0), Vec3::Z);

        let hit = object.hit(&ray).unwrap();
        assert!((hit.normal.length() - 1.0).abs() < 1e-5);
        assert!(hit.normal.z < 0.0);
        assert!((hit.normal.y).abs() < 1e-5);
        assert!((object.normal_at(hit.point) - hit.normal).length() < 1e-4);
    }

    #[test]
    fn test_singular_transform_is_ignored() {
        let object = SceneObject::new("flat", Sphere::new(Vec3::ZERO, 1.0))
            .with_transform(Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0)));

        assert_eq!(object.transform(), Mat4::IDENTITY);
    }
}
