//! Simple Whitted ray tracing example.
//!
//! Renders a green sphere on a grey ground plane, lit by a sun and a point
//! light, and saves the result as a PNG.
//!
//! Usage: `simple_scene [config.json] [output.png]`

use anyhow::{Context, Result};
use lumen_renderer::{
    render, Camera, CameraFrame, Color, GeometricPrimitive, ImageFilm, Light, Material,
    MatteMaterial, Normal3, Point3, Primitive, RenderConfig, Scene, Shape, Transform, UVec2, Vec3,
};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(&path)?,
        None => RenderConfig::default().with_pixel_samples(2, 2),
    };
    let output = args.next().unwrap_or_else(|| "output.png".to_string());

    let scene = build_scene()?;
    let frame = CameraFrame::new(
        Point3::new(0.0, 2.0, 8.0),
        Vec3::new(0.0, -0.2, -1.0),
        Vec3::Y,
        0.1,
        100.0,
    );
    let camera = Camera::perspective(UVec2::new(WIDTH, HEIGHT), frame, 40.0)?;
    let mut film = ImageFilm::new(WIDTH, HEIGHT)?;

    let stats = render(&scene, &camera, &config, &mut film)?;
    log::info!("{} samples in {:?}", stats.samples, stats.elapsed);

    film.save(&output)
        .with_context(|| format!("failed to write {}", output))?;
    Ok(())
}

fn load_config(path: &str) -> Result<RenderConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path))?;
    let config: RenderConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path))?;
    config.validate()?;
    log::info!("Loaded render config from {}", path);
    Ok(config)
}

fn build_scene() -> Result<Scene> {
    let sphere = Shape::sphere(Transform::translation(Vec3::new(0.0, 1.0, 0.0)), 1.0)?;
    let small = Shape::sphere(Transform::translation(Vec3::new(-2.2, 0.5, 0.8)), 0.5)?;
    let ground = Shape::plane(Transform::IDENTITY, Point3::ORIGIN, Normal3::Y)?;

    let aggregate: Primitive = vec![
        Primitive::geometric(sphere, Material::matte(Color::new(0.1, 0.8, 0.1))),
        Primitive::geometric(small, MatteMaterial::new(Color::new(0.8, 0.3, 0.2)).with_sigma(20.0).into()),
        GeometricPrimitive::new(ground, Material::matte(Color::splat(0.5))).into(),
    ]
    .into_iter()
    .collect();

    let sun = Light::directional(&Transform::IDENTITY, Vec3::new(0.4, 1.0, 0.6), Color::splat(0.8))?;
    let lamp = Light::point(
        &Transform::translation(Vec3::new(3.0, 4.0, 3.0)),
        Color::new(12.0, 11.0, 9.0),
    );

    Ok(Scene::new(aggregate, vec![sun, lamp]))
}
