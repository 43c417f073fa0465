//! Per-ray shading context.
//!
//! A `RenderState` is a small `Copy` value. Secondary rays derive a new
//! state from their parent (`..*self`) instead of mutating a shared one, so
//! a caller's state is never changed by the recursion below it and pixels
//! can be traced on any thread.

use std::fmt;

use prism_math::{Ray, Vec2, Vec3};

use crate::object::ObjectId;
use crate::options::RenderOptions;
use crate::primitive::SurfaceHit;
use crate::scene::Scene;

/// Why a ray was cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RayKind {
    /// Primary ray from the camera
    Eye,
    Transparent,
    Reflect,
    Refract,
    /// Occlusion test towards a light; never shaded
    Shadow,
    #[default]
    None,
}

/// Shading context of one ray in a trace tree.
#[derive(Clone, Copy)]
pub struct RenderState<'a> {
    pub options: &'a RenderOptions,
    pub scene: &'a Scene,
    pub ray: Ray,
    pub ray_kind: RayKind,
    pub reflection_depth: u32,
    pub refraction_depth: u32,
    pub trace_depth: u32,
    /// Index of refraction of the medium the ray travels in
    pub ior_in: f32,
    /// Index of refraction of the medium the ray came from
    pub ior_out: f32,
    /// Surface point being shaded
    pub point: Vec3,
    /// Unit normal at `point`
    pub normal: Vec3,
    pub tex_coord: Vec2,
    /// Object being shaded; excluded from intersection tests
    pub current_object: Option<ObjectId>,
}

impl<'a> RenderState<'a> {
    /// State for a primary camera ray.
    pub fn primary(scene: &'a Scene, options: &'a RenderOptions, ray: Ray) -> Self {
        Self {
            options,
            scene,
            ray,
            ray_kind: RayKind::Eye,
            reflection_depth: 0,
            refraction_depth: 0,
            trace_depth: 0,
            ior_in: 1.0,
            ior_out: 1.0,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            tex_coord: Vec2::ZERO,
            current_object: None,
        }
    }

    /// The same ray, now shading `object` at `hit`.
    pub fn at_surface(&self, object: ObjectId, hit: &SurfaceHit) -> Self {
        Self {
            point: hit.point,
            normal: hit.normal,
            tex_coord: hit.uv,
            current_object: Some(object),
            ..*self
        }
    }

    /// Whether another reflection bounce fits in the budgets.
    pub fn can_reflect(&self) -> bool {
        self.reflection_depth < self.options.reflection_depth
            && self.trace_depth < self.options.trace_depth
    }

    /// Whether another refraction bounce fits in the budgets.
    pub fn can_refract(&self) -> bool {
        self.refraction_depth < self.options.refraction_depth
            && self.trace_depth < self.options.trace_depth
    }

    /// Child state for a reflected ray.
    pub fn reflected(&self, ray: Ray) -> Self {
        Self {
            ray,
            ray_kind: RayKind::Reflect,
            reflection_depth: self.reflection_depth + 1,
            trace_depth: self.trace_depth + 1,
            ..*self
        }
    }

    /// Child state for a refracted ray entering a medium of `ior_in`,
    /// coming from a medium of `ior_out`.
    pub fn refracted(&self, ray: Ray, ior_in: f32, ior_out: f32) -> Self {
        Self {
            ray,
            ray_kind: RayKind::Refract,
            refraction_depth: self.refraction_depth + 1,
            trace_depth: self.trace_depth + 1,
            ior_in,
            ior_out,
            ..*self
        }
    }

    /// Child state for a shadow ray. Depth counters are untouched.
    pub fn shadow(&self, ray: Ray) -> Self {
        Self {
            ray,
            ray_kind: RayKind::Shadow,
            ..*self
        }
    }

    /// Unit direction of travel of the current ray.
    pub fn view_direction(&self) -> Vec3 {
        self.ray.direction.normalize_or_zero()
    }
}

impl PartialEq for RenderState<'_> {
    /// Field-wise equality; the scene and options compare by identity.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.options, other.options)
            && std::ptr::eq(self.scene, other.scene)
            && self.ray == other.ray
            && self.ray_kind == other.ray_kind
            && self.reflection_depth == other.reflection_depth
            && self.refraction_depth == other.refraction_depth
            && self.trace_depth == other.trace_depth
            && self.ior_in == other.ior_in
            && self.ior_out == other.ior_out
            && self.point == other.point
            && self.normal == other.normal
            && self.tex_coord == other.tex_coord
            && self.current_object == other.current_object
    }
}

impl fmt::Debug for RenderState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderState")
            .field("options", self.options)
            .field("ray", &self.ray)
            .field("ray_kind", &self.ray_kind)
            .field("reflection_depth", &self.reflection_depth)
            .field("refraction_depth", &self.refraction_depth)
            .field("trace_depth", &self.trace_depth)
            .field("ior_in", &self.ior_in)
            .field("ior_out", &self.ior_out)
            .field("point", &self.point)
            .field("normal", &self.normal)
            .field("tex_coord", &self.tex_coord)
            .field("current_object", &self.current_object)
            .finish_non_exhaustive()
    }
}
