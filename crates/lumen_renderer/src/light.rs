//! Light sources and shadow-ray visibility tests.

use lumen_math::{Point3, Ray, Transform, Vec3};

use crate::{Color, RenderError, RenderResult, Scene};

/// Shadow ray between a shaded point and a light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityTester {
    ray: Ray,
}

impl VisibilityTester {
    /// Segment from `from` to `to`, excluding both endpoints by [`Ray::EPSILON`].
    pub fn between(from: Point3, to: Point3) -> Self {
        Self {
            ray: Ray::segment(from, to - from, Ray::EPSILON, 1.0 - Ray::EPSILON),
        }
    }

    /// Ray from `from` along `direction` to infinity, for distant lights.
    pub fn towards(from: Point3, direction: Vec3) -> Self {
        Self {
            ray: Ray::new(from, direction),
        }
    }

    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// True if nothing in the scene blocks the shadow ray.
    pub fn unoccluded(&self, scene: &Scene) -> bool {
        !scene.intersects(&self.ray)
    }
}

/// Incident light at a point, as returned by [`Light::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    pub radiance: Color,
    /// Unit vector from the shaded point towards the light.
    pub direction_to_light: Vec3,
    pub visibility: VisibilityTester,
}

/// Isotropic point source at the light-space origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    position: Point3,
    intensity: Color,
}

impl PointLight {
    pub fn new(light_to_world: &Transform, intensity: Color) -> Self {
        Self {
            position: light_to_world.transform_point(Point3::ORIGIN),
            intensity,
        }
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    fn evaluate(&self, point: Point3) -> LightSample {
        let to_light = self.position - point;
        let distance_squared = to_light.length_squared();
        let radiance = if distance_squared > 0.0 {
            self.intensity / distance_squared
        } else {
            Color::ZERO
        };
        LightSample {
            radiance,
            direction_to_light: to_light.normalize_or_zero(),
            visibility: VisibilityTester::between(point, self.position),
        }
    }
}

/// Infinitely distant source with a fixed direction and no falloff.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    direction_to_light: Vec3,
    radiance: Color,
}

impl DirectionalLight {
    /// `direction_to_light` is given in light space and points from the scene
    /// towards the light.
    pub fn new(light_to_world: &Transform, direction_to_light: Vec3, radiance: Color) -> RenderResult<Self> {
        let direction_to_light = light_to_world
            .transform_vector(direction_to_light)
            .try_normalize()
            .ok_or_else(|| {
                RenderError::InvalidConfig("directional light direction must be non-zero".to_string())
            })?;
        Ok(Self {
            direction_to_light,
            radiance,
        })
    }

    pub fn direction_to_light(&self) -> Vec3 {
        self.direction_to_light
    }

    fn evaluate(&self, point: Point3) -> LightSample {
        LightSample {
            radiance: self.radiance,
            direction_to_light: self.direction_to_light,
            visibility: VisibilityTester::towards(point, self.direction_to_light),
        }
    }
}

/// The closed set of lights.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Point(PointLight),
    Directional(DirectionalLight),
}

impl Light {
    pub fn point(light_to_world: &Transform, intensity: Color) -> Self {
        Light::Point(PointLight::new(light_to_world, intensity))
    }

    pub fn directional(
        light_to_world: &Transform,
        direction_to_light: Vec3,
        radiance: Color,
    ) -> RenderResult<Self> {
        Ok(Light::Directional(DirectionalLight::new(
            light_to_world,
            direction_to_light,
            radiance,
        )?))
    }

    /// Radiance arriving at `point` from this light, the direction it comes
    /// from, and the shadow ray to test.
    pub fn evaluate(&self, point: Point3) -> LightSample {
        match self {
            Light::Point(light) => light.evaluate(point),
            Light::Directional(light) => light.evaluate(point),
        }
    }
}
