//! End-to-end scenes: camera, sampler, scene, integrator and film together.

use lumen_renderer::{
    render, Camera, CameraFrame, Color, Film, GeometricPrimitive, ImageFilm, Integrator, Light,
    Material, Normal3, Point3, Primitive, Ray, RenderConfig, RenderError, Sample, Sampler, Scene,
    Shape, Transform, UVec2, Vec3, WhittedIntegrator,
};

const GREEN: Color = Color::new(0.0, 0.8, 0.0);

fn green_sphere_under_sun() -> Scene {
    let sphere = Shape::sphere(Transform::IDENTITY, 1.0).unwrap();
    // Light travels straight down, so the direction to it is +y
    let sun = Light::directional(&Transform::IDENTITY, Vec3::Y, Color::ONE).unwrap();
    Scene::new(Primitive::geometric(sphere, Material::matte(GREEN)), vec![sun])
}

fn top_down_camera(size: u32) -> Camera {
    let frame = CameraFrame::new(Point3::new(0.0, 10.0, 0.0), -Vec3::Y, -Vec3::Z, 1.0, 50.0);
    Camera::orthographic(UVec2::new(size, size), frame, 4.0).unwrap()
}

#[test]
fn test_camera_ray_hitting_sphere_top_is_green() {
    let scene = green_sphere_under_sun();
    let camera = top_down_camera(16);
    let sample = Sample::new(8, 8);
    let ray = camera.generate_ray(&sample);

    let color = WhittedIntegrator::default().li(&scene, &ray, &sample).unwrap();

    assert!(color.y > 0.0);
    assert_eq!(color.x, 0.0);
    assert_eq!(color.z, 0.0);
    // Straight down onto the top: |cos| = 1
    assert!((color.y - GREEN.y).abs() < 1e-3);
}

#[test]
fn test_camera_ray_missing_sphere_is_black() {
    let scene = green_sphere_under_sun();
    let camera = top_down_camera(16);
    let sample = Sample::new(0, 0);
    let ray = camera.generate_ray(&sample);

    let color = WhittedIntegrator::default().li(&scene, &ray, &sample).unwrap();
    assert_eq!(color, Color::ZERO);
}

#[test]
fn test_off_centre_hit_scales_with_cosine() {
    let scene = green_sphere_under_sun();
    let ray = Ray::new(Point3::new(0.0, 5.0, 0.6), -Vec3::Y);

    let color = WhittedIntegrator::default().li(&scene, &ray, &Sample::new(0, 0)).unwrap();
    assert!(color.abs_diff_eq(GREEN * 0.8, 1e-4));
}

#[test]
fn test_rendering_twice_is_pixel_identical() {
    let scene = green_sphere_under_sun();
    let camera = top_down_camera(12);
    let config = RenderConfig::default().with_pixel_samples(2, 2).with_seed(3);

    let mut first = ImageFilm::new(12, 12).unwrap();
    let mut second = ImageFilm::new(12, 12).unwrap();
    render(&scene, &camera, &config, &mut first).unwrap();
    render(&scene, &camera, &config, &mut second).unwrap();

    assert_eq!(first.to_rgb32f(), second.to_rgb32f());
    assert_eq!(first.to_rgba(), second.to_rgba());
}

#[test]
fn test_point_in_shadow_is_black() {
    let ground = Shape::plane(Transform::IDENTITY, Point3::ORIGIN, Normal3::Y).unwrap();
    let blocker = Shape::sphere(Transform::translation(Vec3::new(0.0, 2.0, 0.0)), 0.5).unwrap();
    let sun = Light::directional(&Transform::IDENTITY, Vec3::Y, Color::ONE).unwrap();
    let scene = Scene::new(
        Primitive::Aggregate(vec![
            Primitive::geometric(ground, Material::matte(Color::ONE)),
            GeometricPrimitive::occluder(blocker).into(),
        ]),
        vec![sun],
    );
    let integrator = WhittedIntegrator::default();
    let sample = Sample::new(0, 0);

    let shadowed = Ray::new(Point3::new(5.0, 5.0, 0.0), Vec3::new(-1.0, -1.0, 0.0).normalize());
    let lit = Ray::new(Point3::new(3.0, 5.0, 0.0), -Vec3::Y);

    assert_eq!(integrator.li(&scene, &shadowed, &sample).unwrap(), Color::ZERO);
    assert!(integrator
        .li(&scene, &lit, &sample)
        .unwrap()
        .abs_diff_eq(Color::ONE, 1e-4));
}

#[test]
fn test_point_light_shadow_stops_at_light() {
    // Blocker sits beyond the light, so it must not shadow the ground
    let ground = Shape::plane(Transform::IDENTITY, Point3::ORIGIN, Normal3::Y).unwrap();
    let above_light = Shape::sphere(Transform::translation(Vec3::new(0.0, 6.0, 0.0)), 1.0).unwrap();
    let lamp = Light::point(&Transform::translation(Vec3::new(0.0, 2.0, 0.0)), Color::splat(4.0));
    let scene = Scene::new(
        Primitive::Aggregate(vec![
            Primitive::geometric(ground, Material::matte(Color::ONE)),
            GeometricPrimitive::occluder(above_light).into(),
        ]),
        vec![lamp],
    );
    let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);

    let color = WhittedIntegrator::default().li(&scene, &ray, &Sample::new(0, 0)).unwrap();
    assert!(color.abs_diff_eq(Color::ONE, 1e-4));
}

#[test]
fn test_visible_occluder_fails_render() {
    let blocker = Shape::sphere(Transform::IDENTITY, 1.0).unwrap();
    let scene = Scene::new(GeometricPrimitive::occluder(blocker).into(), Vec::new());
    let camera = top_down_camera(4);
    let mut film = ImageFilm::new(4, 4).unwrap();

    let result = render(&scene, &camera, &RenderConfig::default(), &mut film);
    assert!(matches!(result, Err(RenderError::NotSupported(_))));
}

#[test]
fn test_custom_film_receives_every_sample() {
    struct Counter {
        samples: usize,
        lit: usize,
    }

    impl Film for Counter {
        fn add_sample(&mut self, _sample: &Sample, color: Color) {
            self.samples += 1;
            if color != Color::ZERO {
                self.lit += 1;
            }
        }
    }

    let scene = green_sphere_under_sun();
    let camera = top_down_camera(8);
    let mut counter = Counter { samples: 0, lit: 0 };

    let stats = scene
        .render(&camera, &Sampler::regular(8, 8), &WhittedIntegrator::default(), &mut counter)
        .unwrap();

    assert_eq!(stats.samples, 64);
    assert_eq!(counter.samples, 64);
    assert!(counter.lit > 0 && counter.lit < 64);
}
