//! Whitted ray tracing demo.
//!
//! Renders a small scene with mirrors, glass, a box and a mesh, then saves
//! it to disk.
//!
//! Usage: `whitted_demo [options.json] [output.png]`

use std::sync::Arc;

use anyhow::{Context, Result};
use prism_renderer::{
    render, Color, Cuboid, ImageBuffer, Light, Mat4, Mesh, PerspectiveCamera, Plane,
    RenderOptions, Scene, SceneObject, Shader, Sphere, Vec3,
};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let options = match args.next() {
        Some(path) => RenderOptions::from_path(&path)
            .with_context(|| format!("Failed to load render options from {path}"))?,
        None => RenderOptions::default(),
    };
    let output = args.next().unwrap_or_else(|| "whitted.png".to_string());

    let scene = build_scene();
    scene.validate().context("Demo scene is invalid")?;

    let mut image = ImageBuffer::new(WIDTH, HEIGHT);
    anyhow::ensure!(render(&scene, &options, &mut image), "scene has no camera");

    image
        .save(&output)
        .with_context(|| format!("Failed to save image to {output}"))?;
    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new("whitted").with_background(Color::new(0.05, 0.07, 0.12));

    let ambient = Color::splat(0.08);

    // Ground
    scene.add_object(
        SceneObject::new("floor", Plane::from_point_normal(Vec3::ZERO, Vec3::Y)).with_shader(
            Arc::new(
                Shader::lambert("floor", Color::new(0.6, 0.6, 0.55))
                    .with_ambient(ambient)
                    .with_reflectivity(Color::splat(0.15)),
            ),
        ),
    );

    // Back wall
    scene.add_object(
        SceneObject::new(
            "wall",
            Plane::from_point_normal(Vec3::new(0.0, 0.0, -8.0), Vec3::Z),
        )
        .with_shader(Arc::new(
            Shader::lambert("wall", Color::new(0.3, 0.4, 0.6)).with_ambient(ambient),
        )),
    );

    scene.add_object(
        SceneObject::new("mirror ball", Sphere::new(Vec3::new(-1.6, 1.0, -1.0), 1.0))
            .with_shader(Arc::new(
                Shader::phong("chrome", Color::splat(0.1), Color::ONE, 60.0)
                    .with_ambient(ambient)
                    .with_reflectivity(Color::splat(0.8)),
            )),
    );

    scene.add_object(
        SceneObject::new("glass ball", Sphere::new(Vec3::new(0.9, 0.8, 1.2), 0.8)).with_shader(
            Arc::new(
                Shader::phong("glass", Color::splat(0.05), Color::ONE, 120.0)
                    .with_transparency(Color::splat(0.9), 1.5)
                    .with_reflectivity(Color::splat(0.05)),
            ),
        ),
    );

    scene.add_object(
        SceneObject::new("crate", Cuboid::new(Vec3::ZERO, Vec3::splat(0.6)))
            .with_transform(
                Mat4::from_translation(Vec3::new(2.4, 0.6, -1.8))
                    * Mat4::from_rotation_y(30f32.to_radians()),
            )
            .with_shader(Arc::new(
                Shader::phong("orange", Color::new(0.9, 0.45, 0.1), Color::splat(0.5), 20.0)
                    .with_ambient(ambient),
            )),
    );

    scene.add_object(
        SceneObject::new("pyramid", pyramid(Vec3::new(-0.2, 0.0, -3.5), 1.2, 1.8)).with_shader(
            Arc::new(
                Shader::lambert("green", Color::new(0.2, 0.7, 0.3))
                    .with_ambient(ambient)
                    .with_incandescence(Color::new(0.0, 0.05, 0.0)),
            ),
        ),
    );

    scene.add_light(Light::point("key", Vec3::new(4.0, 6.0, 4.0), Color::splat(0.9)));
    scene.add_light(Light::directional(
        "fill",
        Vec3::new(-0.5, -1.0, -0.3),
        Color::new(0.2, 0.2, 0.25),
    ));

    scene.set_camera(
        PerspectiveCamera::new(
            Vec3::new(0.0, 2.2, 7.0),
            Vec3::new(0.0, 0.8, -1.0),
            Vec3::Y,
            45.0,
        )
        .into(),
    );

    scene
}

/// Square pyramid standing on `base` with outward-wound faces.
fn pyramid(base: Vec3, half_width: f32, height: f32) -> Mesh {
    let positions = [
        base + Vec3::new(-half_width, 0.0, half_width),
        base + Vec3::new(half_width, 0.0, half_width),
        base + Vec3::new(half_width, 0.0, -half_width),
        base + Vec3::new(-half_width, 0.0, -half_width),
        base + Vec3::new(0.0, height, 0.0),
    ];
    let indices = [0, 1, 4, 1, 2, 4, 2, 3, 4, 3, 0, 4];
    Mesh::indexed(&positions, &indices, None)
}
