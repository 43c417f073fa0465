//! Bucket-based tile rendering.
//!
//! The image is cut into square tiles that are traced independently, so
//! rayon can hand them to worker threads without any shared mutable state.

use crate::camera::Camera;
use crate::options::RenderOptions;
use crate::renderer::{render_pixel, PixelSink};
use crate::scene::Scene;
use crate::shader::Color;

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// A rectangular region of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of the top-left corner
    pub x: u32,
    /// Y coordinate of the top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Squared distance from the bucket centre to (cx, cy).
    fn distance_sq_to(&self, cx: f32, cy: f32) -> f32 {
        let bx = self.x as f32 + self.width as f32 / 2.0;
        let by = self.y as f32 + self.height as f32 / 2.0;
        (bx - cx).powi(2) + (by - cy).powi(2)
    }
}

/// Cover a `width` x `height` image with buckets, centre buckets first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let mut buckets = Vec::new();

    for y in (0..height).step_by(size as usize) {
        for x in (0..width).step_by(size as usize) {
            let bw = size.min(width - x);
            let bh = size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
        }
    }

    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    buckets.sort_by(|a, b| a.distance_sq_to(cx, cy).total_cmp(&b.distance_sq_to(cx, cy)));

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Trace every pixel of `bucket`.
///
/// `image_width` and `image_height` are the full image size, which the
/// camera needs to place each pixel.
pub fn render_bucket(
    bucket: &Bucket,
    scene: &Scene,
    camera: &Camera,
    options: &RenderOptions,
    image_width: u32,
    image_height: u32,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            pixels.push(render_pixel(
                scene,
                camera,
                options,
                bucket.x + local_x,
                bucket.y + local_y,
                image_width,
                image_height,
            ));
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Pixels of a rendered bucket, row-major within the bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy the bucket's pixels into `sink` at their image positions.
    pub fn write_to(&self, sink: &mut dyn PixelSink) {
        let width = self.bucket.width.max(1) as usize;
        for (i, color) in self.pixels.iter().enumerate() {
            let x = self.bucket.x + (i % width) as u32;
            let y = self.bucket.y + (i / width) as u32;
            sink.set_pixel(x, y, *color);
        }
    }
}
