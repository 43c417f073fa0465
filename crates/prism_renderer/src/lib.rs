//! Prism - recursive Whitted-style CPU ray tracer.
//!
//! Primary rays from a camera find the nearest surface; its shader adds
//! Lambert or Phong lighting with binary shadows, then blends in mirror
//! reflections and replaces the result with refracted light, recursing
//! until the depth budgets in [`RenderOptions`] run out.

mod primitive;
mod cuboid;
mod plane;
mod sphere;
mod triangle;
mod mesh;
mod shape;
mod object;
mod light;
mod shader;
mod render_state;
mod scene;
mod camera;
mod options;
mod error;
mod renderer;
mod bucket;

pub use primitive::{Primitive, SurfaceHit, TraceResult, EPSILON};
pub use cuboid::Cuboid;
pub use plane::Plane;
pub use sphere::Sphere;
pub use triangle::{Barycentric, Triangle};
pub use mesh::Mesh;
pub use shape::Shape;
pub use object::{ObjectId, SceneObject};
pub use light::{Attenuation, Light, LightKind};
pub use shader::{Color, Shader, ShadingModel};
pub use render_state::{RayKind, RenderState};
pub use scene::Scene;
pub use camera::{Camera, PerspectiveCamera, ScreenPlaneCamera};
pub use options::{RenderOptions, MAX_DEPTH};
pub use error::{RenderError, RenderResult};
pub use renderer::{color_to_rgb8, render, render_pixel, render_to_image, ImageBuffer, PixelSink};
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};

/// Re-export common math types from prism_math
pub use prism_math::{Aabb, Interval, Mat4, Ray, Vec2, Vec3};
