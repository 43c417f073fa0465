//! Light sources.

use prism_math::Vec3;

use crate::render_state::RenderState;
use crate::shader::Color;

/// Distance falloff parameters. Stored with point lights but not applied
/// during shading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Attenuation {
    pub enabled: bool,
    pub fall_start: f32,
    pub fall_stop: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    /// Omni light at a position
    Point {
        position: Vec3,
        casts_shadows: bool,
        /// Stored, not used by the shadow query
        transparency: f32,
        attenuation: Attenuation,
    },
    /// Parallel light travelling along `direction` (unit). Never shadowed.
    Directional { direction: Vec3 },
    /// Cone light at `position` aimed along `direction` (unit).
    /// `cos_cutoff` is the cosine of the cone half-angle.
    Spot {
        position: Vec3,
        direction: Vec3,
        cos_cutoff: f32,
    },
}

/// A named light with a color and a kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub name: String,
    pub color: Color,
    pub kind: LightKind,
}

impl Light {
    /// Create a shadow-casting point light.
    pub fn point(name: impl Into<String>, position: Vec3, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            kind: LightKind::Point {
                position,
                casts_shadows: true,
                transparency: 0.0,
                attenuation: Attenuation::default(),
            },
        }
    }

    /// Create a directional light. `direction` is the way the light travels.
    pub fn directional(name: impl Into<String>, direction: Vec3, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            kind: LightKind::Directional {
                direction: direction.normalize_or(-Vec3::Y),
            },
        }
    }

    /// Create a spot light with a cone half-angle in degrees.
    pub fn spot(
        name: impl Into<String>,
        position: Vec3,
        direction: Vec3,
        cone_angle_degrees: f32,
        color: Color,
    ) -> Self {
        Self {
            name: name.into(),
            color,
            kind: LightKind::Spot {
                position,
                direction: direction.normalize_or(-Vec3::Y),
                cos_cutoff: cone_angle_degrees.to_radians().cos(),
            },
        }
    }

    /// Enable or disable shadow casting. Only point lights cast shadows.
    pub fn with_shadows(mut self, enabled: bool) -> Self {
        match &mut self.kind {
            LightKind::Point { casts_shadows, .. } => *casts_shadows = enabled,
            _ => log::debug!("Light '{}' is not a point light, ignoring shadow flag", self.name),
        }
        self
    }

    pub fn with_transparency(mut self, value: f32) -> Self {
        if let LightKind::Point { transparency, .. } = &mut self.kind {
            *transparency = value;
        }
        self
    }

    pub fn with_attenuation(mut self, value: Attenuation) -> Self {
        if let LightKind::Point { attenuation, .. } = &mut self.kind {
            *attenuation = value;
        }
        self
    }

    pub fn is_point(&self) -> bool {
        matches!(self.kind, LightKind::Point { .. })
    }

    pub fn casts_shadows(&self) -> bool {
        matches!(self.kind, LightKind::Point { casts_shadows: true, .. })
    }

    /// Unit vector from `point` towards the light.
    pub fn direction_from(&self, point: Vec3) -> Vec3 {
        match self.kind {
            LightKind::Point { position, .. } | LightKind::Spot { position, .. } => {
                (position - point).normalize_or_zero()
            }
            LightKind::Directional { direction } => -direction,
        }
    }

    /// Distance from `point` to the light; infinite for directional lights.
    pub fn distance_from(&self, point: Vec3) -> f32 {
        match self.kind {
            LightKind::Point { position, .. } | LightKind::Spot { position, .. } => {
                position.distance(point)
            }
            LightKind::Directional { .. } => f32::INFINITY,
        }
    }

    /// Fraction of this light reaching the shading point of `state`, 0 or 1.
    pub fn intensity(&self, state: &RenderState) -> f32 {
        match self.kind {
            LightKind::Point { casts_shadows, .. } => {
                if casts_shadows && state.options.shadows_enabled {
                    state.scene.trace_shadow(state, self)
                } else {
                    1.0
                }
            }
            LightKind::Directional { .. } => 1.0,
            LightKind::Spot {
                position,
                direction,
                cos_cutoff,
            } => {
                let to_point = (state.point - position).normalize_or_zero();
                if to_point.dot(direction) >= cos_cutoff {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Check that the light is physically meaningful.
    pub fn validate(&self) -> Result<(), String> {
        validate_color(self.color, "color")?;
        match self.kind {
            LightKind::Point {
                position,
                transparency,
                attenuation,
                ..
            } => {
                validate_vec3_finite(position, "position")?;
                if !(0.0..=1.0).contains(&transparency) {
                    return Err(format!("transparency must be in [0, 1], got {transparency}"));
                }
                if attenuation.enabled && attenuation.fall_stop < attenuation.fall_start {
                    return Err(format!(
                        "fall_stop ({}) must not be less than fall_start ({})",
                        attenuation.fall_stop, attenuation.fall_start
                    ));
                }
            }
            LightKind::Directional { direction } => {
                validate_vec3_finite(direction, "direction")?;
                if direction.length() < 0.0001 {
                    return Err("direction vector length must be > 0".into());
                }
            }
            LightKind::Spot {
                position,
                direction,
                cos_cutoff,
            } => {
                validate_vec3_finite(position, "position")?;
                validate_vec3_finite(direction, "direction")?;
                if !cos_cutoff.is_finite() {
                    return Err("cone angle must be finite".into());
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_vec3_finite(value: Vec3, field: &str) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!(
            "{field} components must be finite, got ({}, {}, {})",
            value.x, value.y, value.z
        ));
    }
    Ok(())
}

pub(crate) fn validate_color(value: Color, field: &str) -> Result<(), String> {
    validate_vec3_finite(value, field)?;
    if value.min_element() < 0.0 {
        return Err(format!(
            "{field} components must be >= 0, got ({}, {}, {})",
            value.x, value.y, value.z
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RenderOptions;
    use crate::scene::Scene;
    use prism_math::Ray;

    #[test]
    fn test_point_light_direction_and_distance() {
        let light = Light::point("key", Vec3::new(0.0, 4.0, 0.0), Color::ONE);
        let point = Vec3::new(0.0, 1.0, 0.0);

        assert!((light.direction_from(point) - Vec3::Y).length() < 1e-6);
        assert!((light.distance_from(point) - 3.0).abs() < 1e-6);
        assert!(light.is_point());
        assert!(light.casts_shadows());
    }

    #[test]
    fn test_directional_light() {
        let light = Light::directional("sun", Vec3::new(0.0, -2.0, 0.0), Color::ONE);

        assert!((light.direction_from(Vec3::ZERO) - Vec3::Y).length() < 1e-6);
        assert!(light.distance_from(Vec3::ZERO).is_infinite());
        assert!(!light.casts_shadows());
    }

    #[test]
    fn test_directional_light_is_never_shadowed() {
        let scene = Scene::new("empty");
        let options = RenderOptions::default();
        let state = RenderState::primary(&scene, &options, Ray::default());
        let light = Light::directional("sun", -Vec3::Y, Color::ONE);

        assert_eq!(light.intensity(&state), 1.0);
    }

    #[test]
    fn test_spot_cone() {
        let scene = Scene::new("empty");
        let options = RenderOptions::default();
        let light = Light::spot("spot", Vec3::new(0.0, 5.0, 0.0), -Vec3::Y, 20.0, Color::ONE);

        let mut state = RenderState::primary(&scene, &options, Ray::default());
        state.point = Vec3::new(0.5, 0.0, 0.0);
        assert_eq!(light.intensity(&state), 1.0);

        state.point = Vec3::new(5.0, 0.0, 0.0);
        assert_eq!(light.intensity(&state), 0.0);
    }

    #[test]
    fn test_shadow_flag_only_on_point_lights() {
        let point = Light::point("p", Vec3::ZERO, Color::ONE).with_shadows(false);
        let sun = Light::directional("d", -Vec3::Y, Color::ONE).with_shadows(true);

        assert!(!point.casts_shadows());
        assert!(!sun.casts_shadows());
    }

    #[test]
    fn test_stored_point_parameters() {
        let attenuation = Attenuation {
            enabled: true,
            fall_start: 1.0,
            fall_stop: 10.0,
        };
        let light = Light::point("p", Vec3::ZERO, Color::ONE)
            .with_transparency(0.5)
            .with_attenuation(attenuation);

        match light.kind {
            LightKind::Point {
                transparency,
                attenuation: stored,
                ..
            } => {
                assert_eq!(transparency, 0.5);
                assert_eq!(stored, attenuation);
            }
            _ => panic!("expected a point light"),
        }
        assert!(light.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_lights() {
        let negative = Light::point("p", Vec3::ZERO, Color::new(-1.0, 0.0, 0.0));
        assert!(negative.validate().unwrap_err().contains("color"));

        let far = Light::point("p", Vec3::new(f32::NAN, 0.0, 0.0), Color::ONE);
        assert!(far.validate().unwrap_err().contains("position"));

        let reversed = Light::point("p", Vec3::ZERO, Color::ONE).with_attenuation(Attenuation {
            enabled: true,
            fall_start: 5.0,
            fall_stop: 1.0,
        });
        assert!(reversed.validate().is_err());
    }
}
