//! Surface integrators: resolve the radiance arriving along a camera ray.

use lumen_math::Ray;

use crate::{is_black, Color, LightSample, RenderResult, Sample, Scene};

/// Computes the color seen along a ray.
pub trait Integrator {
    /// Called once before the first sample of a render.
    fn preprocess(&self, _scene: &Scene) {}

    /// Radiance arriving at the ray origin from along the ray.
    ///
    /// A miss is not an error; only failures such as shading a surface with
    /// no material are.
    fn li(&self, scene: &Scene, ray: &Ray, sample: &Sample) -> RenderResult<Color>;
}

/// Whitted-style direct lighting.
///
/// Each light contributes `f * Li * |cos θ|` when its shadow ray is
/// unoccluded, where `θ` is the angle between the light direction and the
/// shading normal.
#[derive(Debug, Clone, PartialEq)]
pub struct WhittedIntegrator {
    max_depth: u32,
    background: Color,
}

impl WhittedIntegrator {
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            background: Color::ZERO,
        }
    }

    /// Builder: set the color returned for rays that hit nothing
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Shade `ray` as the `depth`-th bounce. Only direct lighting is
    /// gathered; no material has specular terms to continue the path.
    fn trace(&self, scene: &Scene, ray: &Ray, depth: u32) -> RenderResult<Color> {
        if depth > self.max_depth {
            return Ok(Color::ZERO);
        }

        let mut ray = *ray;
        let Some(intersection) = scene.intersect(&mut ray) else {
            return Ok(self.background);
        };

        let bsdf = intersection.into_bsdf(&ray)?;
        let p = bsdf.shading_geometry().point();
        let n = bsdf.shading_normal();
        let wo = -ray.direction;

        let mut radiance = Color::ZERO;
        for light in scene.lights() {
            let LightSample {
                radiance: li,
                direction_to_light: wi,
                visibility,
            } = light.evaluate(p);
            if is_black(li) {
                log::trace!("light contributes nothing at {:?}", p);
                continue;
            }

            let f = bsdf.evaluate(wo, wi);
            if is_black(f) {
                continue;
            }
            if !visibility.unoccluded(scene) {
                log::trace!("shadow ray from {:?} occluded", p);
                continue;
            }

            radiance += f * li * n.abs_dot(wi);
        }

        Ok(radiance)
    }
}

impl Default for WhittedIntegrator {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Integrator for WhittedIntegrator {
    fn li(&self, scene: &Scene, ray: &Ray, _sample: &Sample) -> RenderResult<Color> {
        self.trace(scene, ray, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Light, Material, Primitive, Shape};
    use lumen_math::{Point3, Transform, Vec3};

    const GREEN: Color = Color::new(0.0, 1.0, 0.0);

    fn green_sphere_scene(lights: Vec<Light>) -> Scene {
        let shape = Shape::sphere(Transform::IDENTITY, 1.0).unwrap();
        Scene::new(Primitive::geometric(shape, Material::matte(GREEN)), lights)
    }

    fn sun() -> Light {
        Light::directional(&Transform::IDENTITY, Vec3::Y, Color::ONE).unwrap()
    }

    #[test]
    fn test_top_of_sphere_is_fully_lit() {
        let scene = green_sphere_scene(vec![sun()]);
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), -Vec3::Y);

        let color = WhittedIntegrator::default().li(&scene, &ray, &Sample::new(0, 0)).unwrap();
        assert!(color.abs_diff_eq(GREEN, 1e-4));
    }

    #[test]
    fn test_cosine_falloff() {
        let scene = green_sphere_scene(vec![sun()]);
        // Hits (0.6, 0.8, 0), where the normal makes cos = 0.8 with +y
        let ray = Ray::new(Point3::new(0.6, 5.0, 0.0), -Vec3::Y);

        let color = WhittedIntegrator::default().li(&scene, &ray, &Sample::new(0, 0)).unwrap();
        assert!(color.abs_diff_eq(GREEN * 0.8, 1e-4));
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = green_sphere_scene(vec![sun()]);
        let ray = Ray::new(Point3::new(3.0, 5.0, 0.0), -Vec3::Y);
        let sample = Sample::new(0, 0);

        assert_eq!(WhittedIntegrator::default().li(&scene, &ray, &sample).unwrap(), Color::ZERO);

        let sky = Color::new(0.1, 0.2, 0.3);
        let integrator = WhittedIntegrator::new(1).with_background(sky);
        assert_eq!(integrator.li(&scene, &ray, &sample).unwrap(), sky);
    }

    #[test]
    fn test_self_shadowed_side_is_black() {
        let scene = green_sphere_scene(vec![sun()]);
        // Underside of the sphere faces away from the light
        let ray = Ray::new(Point3::new(0.0, -5.0, 0.0), Vec3::Y);

        let color = WhittedIntegrator::default().li(&scene, &ray, &Sample::new(0, 0)).unwrap();
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_lights_are_summed() {
        let above = Light::point(&Transform::translation(Vec3::new(0.0, 3.0, 0.0)), Color::splat(4.0));
        let scene = green_sphere_scene(vec![sun(), above]);
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), -Vec3::Y);

        // Sun gives 1, the point light 4 / 2² = 1
        let color = WhittedIntegrator::default().li(&scene, &ray, &Sample::new(0, 0)).unwrap();
        assert!(color.abs_diff_eq(GREEN * 2.0, 1e-3));
    }
}
