use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be unit length. Every intersection
/// routine reports distances in units of the direction as given, so
/// `ray.at(t)` always lands on the reported hit point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray starting at `origin` and heading for `target`.
    ///
    /// The direction is normalized.
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, (target - origin).normalize())
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Return a copy whose origin is pushed `epsilon` along the direction.
    ///
    /// Secondary rays start on a surface; nudging them keeps the first
    /// intersection test from finding that same surface again.
    #[inline]
    pub fn nudged(&self, epsilon: f32) -> Self {
        Self::new(self.origin + self.direction * epsilon, self.direction)
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_towards_is_normalized() {
        let ray = Ray::towards(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 3.0, -1.0));

        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert!((ray.direction - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_ray_nudged() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y).nudged(0.5);

        assert_eq!(ray.origin, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(ray.direction, Vec3::Y);
    }
}
