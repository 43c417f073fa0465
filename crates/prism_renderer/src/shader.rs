//! Surface shaders: local Lambert/Phong lighting plus recursive reflection
//! and refraction.

use prism_math::{Ray, Vec3};

use crate::light::{validate_color, Light};
use crate::primitive::EPSILON;
use crate::render_state::RenderState;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Local illumination model.
#[derive(Debug, Clone, PartialEq)]
pub enum ShadingModel {
    /// Diffuse only
    Lambert,
    /// Diffuse plus a specular highlight from point lights
    Phong { specular: Color, exponent: f32 },
}

/// Surface appearance of a scene object.
#[derive(Debug, Clone, PartialEq)]
pub struct Shader {
    pub name: String,
    pub model: ShadingModel,
    pub diffuse: Color,
    pub ambient: Color,
    /// Per-channel weight of the refracted color; black disables refraction
    pub transparency: Color,
    /// Per-channel blend weight of the reflected color; black disables reflection
    pub reflectivity: Color,
    pub ior: f32,
    /// Diffuse response to lights behind the surface
    pub translucency: f32,
    /// Self-illumination added to the local color
    pub incandescence: Color,
    /// When non-empty, replaces the scene lights for this shader
    pub lights: Vec<Light>,
}

impl Shader {
    /// Create a Lambert shader with the given diffuse color.
    pub fn lambert(name: impl Into<String>, diffuse: Color) -> Self {
        Self {
            name: name.into(),
            model: ShadingModel::Lambert,
            diffuse,
            ambient: Color::ZERO,
            transparency: Color::ZERO,
            reflectivity: Color::ZERO,
            ior: 1.0,
            translucency: 0.0,
            incandescence: Color::ZERO,
            lights: Vec::new(),
        }
    }

    /// Create a Phong shader.
    ///
    /// - `specular`: Highlight color
    /// - `exponent`: Highlight tightness, higher is sharper
    pub fn phong(name: impl Into<String>, diffuse: Color, specular: Color, exponent: f32) -> Self {
        Self {
            model: ShadingModel::Phong { specular, exponent },
            ..Self::lambert(name, diffuse)
        }
    }

    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_reflectivity(mut self, reflectivity: Color) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// Make the surface transparent with the given index of refraction.
    pub fn with_transparency(mut self, transparency: Color, ior: f32) -> Self {
        self.transparency = transparency;
        self.ior = ior;
        self
    }

    pub fn with_translucency(mut self, translucency: f32) -> Self {
        self.translucency = translucency;
        self
    }

    pub fn with_incandescence(mut self, incandescence: Color) -> Self {
        self.incandescence = incandescence;
        self
    }

    /// Use these lights instead of the scene lights.
    pub fn with_lights(mut self, lights: Vec<Light>) -> Self {
        self.lights = lights;
        self
    }

    pub fn is_reflective(&self) -> bool {
        self.reflectivity != Color::ZERO
    }

    pub fn is_transparent(&self) -> bool {
        self.transparency != Color::ZERO
    }

    /// The shader's own lights if it has any, else `scene_lights`.
    pub fn effective_lights<'s>(&'s self, scene_lights: &'s [Light]) -> &'s [Light] {
        if self.lights.is_empty() {
            scene_lights
        } else {
            &self.lights
        }
    }

    /// Local illumination at the shading point of `state`.
    ///
    /// `result` is the incoming color; it is modulated by the ambient term
    /// before the light contributions are added.
    pub fn shade(&self, state: &RenderState, lights: &[Light], result: Color) -> Color {
        let normal = state.normal;
        let view = state.view_direction();
        let mut color = result * self.ambient + self.incandescence;

        for light in lights {
            let to_light = light.direction_from(state.point);
            let ndotl = normal.dot(to_light);

            if ndotl > 0.0 {
                let intensity = light.intensity(state);
                color += ndotl * self.diffuse * light.color * intensity;

                if let ShadingModel::Phong { specular, exponent } = self.model {
                    if light.is_point() {
                        let mirrored = to_light - 2.0 * ndotl * normal;
                        let highlight = view.dot(mirrored);
                        if highlight > 0.0 {
                            color += highlight.powf(exponent) * specular * light.color;
                        }
                    }
                }
            } else if ndotl < 0.0 && self.translucency > 0.0 {
                let intensity = light.intensity(state);
                color += -ndotl * self.translucency * self.diffuse * light.color * intensity;
            }
        }

        color
    }

    /// Blend in the color seen along the mirror direction.
    ///
    /// Leaves `result` unchanged when the shader is not reflective or the
    /// reflection budget is spent.
    pub fn reflect(&self, state: &RenderState, result: Color) -> Color {
        if !self.is_reflective() || !state.can_reflect() {
            return result;
        }

        let direction = reflect(state.view_direction(), state.normal);
        let ray = Ray::new(state.point, direction).nudged(EPSILON);
        let traced = state.scene.raytrace(&state.reflected(ray));

        traced * self.reflectivity + result * (Color::ONE - self.reflectivity)
    }

    /// Replace the color with the one seen through the surface.
    ///
    /// Leaves `result` unchanged when the shader is not transparent, the
    /// refraction budget is spent, or the ray is totally internally
    /// reflected.
    pub fn refract(&self, state: &RenderState, result: Color) -> Color {
        if !self.is_transparent() || !state.can_refract() {
            return result;
        }
        let Some(child) = self.refracted_state(state) else {
            return result;
        };

        state.scene.raytrace(&child) * self.transparency
    }

    /// State for the ray transmitted through the surface at `state`, or
    /// `None` on total internal reflection.
    fn refracted_state<'a>(&self, state: &RenderState<'a>) -> Option<RenderState<'a>> {
        let incident = state.view_direction();
        let entering = incident.dot(state.normal) <= 0.0;
        // Entering: we travel in ior_in and pass into the shader's medium.
        // Leaving: we travel in the shader's medium and return to ior_out.
        let (normal, eta, ior_in, ior_out) = if entering {
            (state.normal, state.ior_in / self.ior, self.ior, state.ior_in)
        } else {
            (-state.normal, self.ior / state.ior_out, state.ior_out, self.ior)
        };

        let direction = refract(incident, normal, eta)?;
        let ray = Ray::new(state.point, direction).nudged(EPSILON);
        Some(state.refracted(ray, ior_in, ior_out))
    }

    /// Check that colors are non-negative and the index of refraction is usable.
    pub fn validate(&self) -> Result<(), String> {
        validate_color(self.diffuse, "diffuse")?;
        validate_color(self.ambient, "ambient")?;
        validate_color(self.transparency, "transparency")?;
        validate_color(self.reflectivity, "reflectivity")?;
        validate_color(self.incandescence, "incandescence")?;
        if let ShadingModel::Phong { specular, exponent } = self.model {
            validate_color(specular, "specular")?;
            if !exponent.is_finite() || exponent < 0.0 {
                return Err(format!("exponent must be finite and >= 0, got {exponent}"));
            }
        }
        if !self.ior.is_finite() || self.ior <= 0.0 {
            return Err(format!("ior must be finite and > 0, got {}", self.ior));
        }
        if !(0.0..=1.0).contains(&self.translucency) {
            return Err(format!(
                "translucency must be in [0, 1], got {}",
                self.translucency
            ));
        }
        for light in &self.lights {
            light
                .validate()
                .map_err(|e| format!("light '{}': {e}", light.name))?;
        }
        Ok(())
    }
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract unit vector `v` through a surface with unit normal `n` facing
/// against it. `eta` is the ratio of the incident to the transmitted index.
///
/// Returns `None` on total internal reflection.
#[inline]
fn refract(v: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = -n.dot(v);
    let cos_t2 = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if !(cos_t2 > 0.0) {
        return None;
    }
    Some((eta * v + (eta * cos_i - cos_t2.sqrt()) * n).normalize())
}
