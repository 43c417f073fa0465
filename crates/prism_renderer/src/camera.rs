//! Camera for ray generation.

use prism_math::{Ray, Vec2, Vec3};

/// Maps pixels to primary rays.
#[derive(Debug, Clone, PartialEq)]
pub enum Camera {
    ScreenPlane(ScreenPlaneCamera),
    Perspective(PerspectiveCamera),
}

impl Camera {
    /// Generate the primary ray through the centre of pixel (x, y) of a
    /// `width` x `height` image. Row 0 is the top of the image.
    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        match self {
            Camera::ScreenPlane(camera) => camera.primary_ray(x, y, width, height),
            Camera::Perspective(camera) => camera.primary_ray(x, y, width, height),
        }
    }
}

impl From<ScreenPlaneCamera> for Camera {
    fn from(camera: ScreenPlaneCamera) -> Self {
        Camera::ScreenPlane(camera)
    }
}

impl From<PerspectiveCamera> for Camera {
    fn from(camera: PerspectiveCamera) -> Self {
        Camera::Perspective(camera)
    }
}

/// An eye looking through a rectangular window on the `z = 0` plane.
///
/// Pixels are spread evenly over the window, left to right and top to
/// bottom. The image aspect ratio is not corrected for.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenPlaneCamera {
    pub position: Vec3,
    /// Window corner seen at the top-left pixel
    pub top_left: Vec2,
    /// Window corner seen at the bottom-right pixel
    pub bottom_right: Vec2,
}

impl ScreenPlaneCamera {
    pub fn new(position: Vec3, top_left: Vec2, bottom_right: Vec2) -> Self {
        Self {
            position,
            top_left,
            bottom_right,
        }
    }

    /// Point on the `z = 0` plane seen through the centre of pixel (x, y).
    pub fn screen_point(&self, x: u32, y: u32, width: u32, height: u32) -> Vec3 {
        let extent = self.bottom_right - self.top_left;
        let fx = (x as f32 + 0.5) / width.max(1) as f32;
        let fy = (y as f32 + 0.5) / height.max(1) as f32;
        Vec3::new(
            self.top_left.x + fx * extent.x,
            self.top_left.y + fy * extent.y,
            0.0,
        )
    }

    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        Ray::towards(self.position, self.screen_point(x, y, width, height))
    }
}

impl Default for ScreenPlaneCamera {
    /// Eye at `z = -5` looking through an 8 x 6 window centred on the origin.
    fn default() -> Self {
        Self::new(
            Vec3::new(0.0, 0.0, -5.0),
            Vec2::new(-4.0, 3.0),
            Vec2::new(4.0, -3.0),
        )
    }
}

/// Pinhole camera with a vertical field of view.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,
    vfov: f32, // Vertical field of view in degrees

    // Orthonormal basis, cached from the placement
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl PerspectiveCamera {
    /// Create a camera at `look_from` aimed at `look_at`.
    pub fn new(look_from: Vec3, look_at: Vec3, vup: Vec3, vfov: f32) -> Self {
        let w = (look_from - look_at).normalize_or(Vec3::Z);
        let u = vup.cross(w).normalize_or(Vec3::X);
        let v = w.cross(u);

        Self {
            look_from,
            look_at,
            vup,
            vfov,
            u,
            v,
            w,
        }
    }

    pub fn look_from(&self) -> Vec3 {
        self.look_from
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn vup(&self) -> Vec3 {
        self.vup
    }

    pub fn vfov(&self) -> f32 {
        self.vfov
    }

    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;

        // Calculate viewport dimensions at unit distance
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * (width / height);

        // Calculate viewport vectors
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        // Calculate pixel delta vectors
        let pixel_delta_u = viewport_u / width;
        let pixel_delta_v = viewport_v / height;

        // Calculate upper left pixel location
        let viewport_upper_left = self.look_from - self.w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let pixel_center = pixel00_loc + (x as f32) * pixel_delta_u + (y as f32) * pixel_delta_v;

        Ray::towards(self.look_from, pixel_center)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y, 90.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_plane_corners() {
        let camera = ScreenPlaneCamera::default();

        let top_left = camera.screen_point(0, 0, 8, 6);
        assert!((top_left - Vec3::new(-3.5, 2.5, 0.0)).length() < 1e-5);

        let bottom_right = camera.screen_point(7, 5, 8, 6);
        assert!((bottom_right - Vec3::new(3.5, -2.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_screen_plane_ray() {
        let camera = Camera::from(ScreenPlaneCamera::default());
        let ray = camera.primary_ray(1, 1, 3, 3);

        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, -5.0));
        assert!((ray.direction - Vec3::Z).length() < 1e-5);
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_perspective_center_ray() {
        let camera = Camera::from(PerspectiveCamera::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec3::Y,
            60.0,
        ));
        let ray = camera.primary_ray(50, 50, 101, 101);

        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_perspective_orientation() {
        let camera = PerspectiveCamera::default();

        let top_left = camera.primary_ray(0, 0, 100, 100);
        assert!(top_left.direction.x < 0.0);
        assert!(top_left.direction.y > 0.0);

        let bottom_right = camera.primary_ray(99, 99, 100, 100);
        assert!(bottom_right.direction.x > 0.0);
        assert!(bottom_right.direction.y < 0.0);
    }

    #[test]
    fn test_perspective_fov() {
        // 90 degree vfov: the top edge sits 45 degrees above the view axis.
        let camera = PerspectiveCamera::default();
        let ray = camera.primary_ray(0, 0, 1, 1_000_000);
        let angle = ray.direction.y.atan2(-ray.direction.z).to_degrees();

        assert!((angle - 45.0).abs() < 0.01);
    }
}
