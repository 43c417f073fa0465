//! Scene container and the recursive trace entry points.

use prism_math::{Aabb, Ray};

use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use crate::light::Light;
use crate::object::{ObjectId, SceneObject};
use crate::primitive::{Primitive, SurfaceHit, EPSILON};
use crate::render_state::{RayKind, RenderState};
use crate::shader::Color;

/// A complete scene: objects, lights, a camera and a background color.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name
    pub name: String,

    /// Objects, addressed by [`ObjectId`]
    pub objects: Vec<SceneObject>,

    /// Lights used by shaders without their own light list
    pub lights: Vec<Light>,

    /// Viewpoint; rendering is a no-op without one
    pub camera: Option<Camera>,

    /// Color of eye rays that hit nothing
    pub background: Color,
}

impl Scene {
    /// Create an empty scene with a black background.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Add an object to the scene and return its ID.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.objects.len());
        log::debug!(
            "Added {} '{}' as object {}",
            object.shape().kind_name(),
            object.name,
            id.0
        );
        self.objects.push(object);
        id
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    /// Get an object by ID.
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// World-space bounds of all bounded objects. Infinite planes are left out.
    pub fn bounds(&self) -> Aabb {
        self.objects
            .iter()
            .map(|object| object.bounding_box())
            .filter(|bbox| bbox.is_finite())
            .fold(Aabb::EMPTY, |acc, bbox| Aabb::surrounding(&acc, &bbox))
    }

    /// Check every light and shader in the scene.
    pub fn validate(&self) -> RenderResult<()> {
        for light in &self.lights {
            light
                .validate()
                .map_err(|e| RenderError::InvalidScene(format!("light '{}': {e}", light.name)))?;
        }
        for object in &self.objects {
            if let Some(shader) = object.shader() {
                shader.validate().map_err(|e| {
                    RenderError::InvalidScene(format!(
                        "shader '{}' on object '{}': {e}",
                        shader.name, object.name
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Nearest object hit at a positive distance, skipping `exclude`.
    pub fn nearest_hit(
        &self,
        ray: &Ray,
        exclude: Option<ObjectId>,
    ) -> Option<(ObjectId, &SceneObject, SurfaceHit)> {
        let mut nearest: Option<(usize, f32)> = None;

        for (index, object) in self.objects.iter().enumerate() {
            if exclude == Some(ObjectId(index)) {
                continue;
            }
            let Some(distance) = object.intersect(ray).distance() else {
                continue;
            };
            if distance > 0.0 && nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((index, distance));
            }
        }

        let (index, _) = nearest?;
        let object = &self.objects[index];
        let hit = object.hit(ray)?;
        Some((ObjectId(index), object, hit))
    }

    /// Whether any object other than `exclude` is hit by `ray`.
    fn is_occluded(&self, ray: &Ray, exclude: Option<ObjectId>) -> bool {
        self.objects.iter().enumerate().any(|(index, object)| {
            exclude != Some(ObjectId(index)) && object.intersect(ray).hit
        })
    }

    /// Color seen along the ray of `state`.
    ///
    /// Misses resolve to the background for eye rays, white for shadow rays
    /// and black otherwise. Objects without a shader appear white.
    pub fn raytrace(&self, state: &RenderState) -> Color {
        let Some((id, object, hit)) = self.nearest_hit(&state.ray, state.current_object) else {
            return match state.ray_kind {
                RayKind::Eye => self.background,
                RayKind::Shadow => Color::ONE,
                _ => Color::ZERO,
            };
        };

        let Some(shader) = object.shader() else {
            return Color::ONE;
        };
        if state.ray_kind == RayKind::Shadow {
            return Color::ZERO;
        }

        let surface = state.at_surface(id, &hit);
        let lights = shader.effective_lights(&self.lights);

        let color = shader.shade(&surface, lights, Color::ONE);
        let color = shader.reflect(&surface, color);
        shader.refract(&surface, color)
    }

    /// Visibility of `light` from the shading point of `state`: 1.0 when no
    /// object other than the shaded one lies along the shadow ray, 0.0
    /// otherwise.
    ///
    /// The search is not cut off at the light, so anything on the ray
    /// beyond a point light still occludes it.
    pub fn trace_shadow(&self, state: &RenderState, light: &Light) -> f32 {
        let to_light = light.direction_from(state.point);
        let shadow = state.shadow(Ray::new(state.point, to_light).nudged(EPSILON));

        if self.is_occluded(&shadow.ray, shadow.current_object) {
            0.0
        } else {
            1.0
        }
    }
}
