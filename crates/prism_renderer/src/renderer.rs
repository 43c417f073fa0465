//! Per-pixel render loop and image output.
//!
//! Each pixel gets its own primary `RenderState`, so buckets are traced in
//! parallel with rayon against a shared, read-only scene.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::camera::Camera;
use crate::error::RenderResult;
use crate::options::RenderOptions;
use crate::render_state::RenderState;
use crate::scene::Scene;
use crate::shader::Color;

/// Destination for rendered pixels.
pub trait PixelSink {
    /// Image size as (width, height).
    fn dimensions(&self) -> (u32, u32);

    /// Store the color of pixel (x, y). Colors are unclamped.
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to packed 8-bit RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }

    /// Encode the image to `path`; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

impl PixelSink for ImageBuffer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.set(x, y, color);
        }
    }
}

/// Convert a linear color to 8-bit RGB, clamping each channel to [0, 1].
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let c = color.clamp(Color::ZERO, Color::ONE);
    [
        (255.0 * c.x).round() as u8,
        (255.0 * c.y).round() as u8,
        (255.0 * c.z).round() as u8,
    ]
}

/// Trace the primary ray through pixel (x, y) of a `width` x `height` image.
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    options: &RenderOptions,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Color {
    let ray = camera.primary_ray(x, y, width, height);
    scene.raytrace(&RenderState::primary(scene, options, ray))
}

/// Render `scene` into `sink`.
///
/// Returns `false` without touching the sink when the scene has no camera.
pub fn render(scene: &Scene, options: &RenderOptions, sink: &mut dyn PixelSink) -> bool {
    let Some(camera) = scene.camera.as_ref() else {
        log::warn!("Scene '{}' has no camera, skipping render", scene.name);
        return false;
    };

    let (width, height) = sink.dimensions();
    let buckets = generate_buckets(width, height, DEFAULT_BUCKET_SIZE);
    log::info!(
        "Rendering '{}' at {}x{} ({} objects, {} lights, {} buckets)",
        scene.name,
        width,
        height,
        scene.object_count(),
        scene.light_count(),
        buckets.len()
    );

    let start = Instant::now();
    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, scene, camera, options, width, height))
        .collect();

    for result in &results {
        result.write_to(sink);
    }

    log::info!("Rendered '{}' in {:.2?}", scene.name, start.elapsed());
    true
}

/// Render `scene` into a new `width` x `height` image.
///
/// Returns `None` when the scene has no camera.
pub fn render_to_image(
    scene: &Scene,
    options: &RenderOptions,
    width: u32,
    height: u32,
) -> Option<ImageBuffer> {
    let mut image = ImageBuffer::new(width, height);
    render(scene, options, &mut image).then_some(image)
}
