//! Shapes: object-space geometry placed in the world by a transform.
//!
//! Intersection runs in object space. The incoming ray is mapped through
//! the world-to-object transform, the geometry solves for the hit, and the
//! hit's position and derivatives are mapped back to world space.

use lumen_math::{Aabb, Normal3, Point3, Ray, Transform, Vec3};

use crate::{DifferentialGeometry, Plane, RenderResult, Sphere};

/// A shape hit expressed in the shape's object space.
#[derive(Debug, Clone, Copy)]
pub struct LocalHit {
    pub t: f32,
    pub point: Point3,
    pub dpdu: Vec3,
    pub dpdv: Vec3,
    pub dndu: Vec3,
    pub dndv: Vec3,
    pub u: f32,
    pub v: f32,
}

/// The closed set of supported geometry.
#[derive(Debug, Clone)]
pub enum Geometry {
    Sphere(Sphere),
    Plane(Plane),
}

impl Geometry {
    fn intersect(&self, ray: &Ray) -> Option<LocalHit> {
        match self {
            Geometry::Sphere(sphere) => sphere.intersect(ray),
            Geometry::Plane(plane) => plane.intersect(ray),
        }
    }

    fn hit_t(&self, ray: &Ray) -> Option<f32> {
        match self {
            Geometry::Sphere(sphere) => sphere.hit_t(ray),
            Geometry::Plane(plane) => plane.hit_t(ray),
        }
    }

    fn object_bound(&self) -> Aabb {
        match self {
            Geometry::Sphere(sphere) => sphere.object_bound(),
            Geometry::Plane(plane) => plane.object_bound(),
        }
    }
}

/// Geometry plus its object-to-world placement.
#[derive(Debug, Clone)]
pub struct Shape {
    object_to_world: Transform,
    world_to_object: Transform,
    geometry: Geometry,
}

impl Shape {
    pub fn new(object_to_world: Transform, geometry: Geometry) -> Self {
        Self {
            world_to_object: object_to_world.inverse(),
            object_to_world,
            geometry,
        }
    }

    /// A sphere of `radius` centred on the object-space origin.
    pub fn sphere(object_to_world: Transform, radius: f32) -> RenderResult<Self> {
        Ok(Self::new(object_to_world, Geometry::Sphere(Sphere::new(radius)?)))
    }

    /// An infinite plane through `point` with `normal`, both in object space.
    pub fn plane(object_to_world: Transform, point: Point3, normal: Normal3) -> RenderResult<Self> {
        Ok(Self::new(object_to_world, Geometry::Plane(Plane::new(point, normal)?)))
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn object_to_world(&self) -> &Transform {
        &self.object_to_world
    }

    pub fn world_to_object(&self) -> &Transform {
        &self.world_to_object
    }

    pub fn object_bound(&self) -> Aabb {
        self.geometry.object_bound()
    }

    pub fn world_bound(&self) -> Aabb {
        self.object_to_world.transform_aabb(&self.object_bound())
    }

    /// Find the nearest hit inside the ray's interval.
    ///
    /// Returns the hit parameter and the world-space differential geometry.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, DifferentialGeometry<'_>)> {
        let local_ray = self.world_to_object.transform_ray(ray);
        let hit = self.geometry.intersect(&local_ray)?;

        let o2w = &self.object_to_world;
        let dg = DifferentialGeometry::new(
            o2w.transform_point(hit.point),
            o2w.transform_vector(hit.dpdu),
            o2w.transform_vector(hit.dpdv),
            o2w.transform_vector(hit.dndu),
            o2w.transform_vector(hit.dndv),
            hit.u,
            hit.v,
            self,
        );
        Some((hit.t, dg))
    }

    /// Occlusion-only test; cheaper than [`Shape::intersect`].
    pub fn intersects(&self, ray: &Ray) -> bool {
        let local_ray = self.world_to_object.transform_ray(ray);
        self.geometry.hit_t(&local_ray).is_some()
    }
}
