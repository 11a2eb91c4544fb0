//! Primitives: shapes paired with materials, and collections of them.

use lumen_math::{Aabb, Ray, Transform};

use crate::{Bsdf, DifferentialGeometry, Material, RenderError, RenderResult, Shape};

/// A shape with the material used to shade it.
///
/// A primitive without a material still blocks shadow rays, but shading it
/// is an error.
#[derive(Debug, Clone)]
pub struct GeometricPrimitive {
    shape: Shape,
    material: Option<Material>,
}

impl GeometricPrimitive {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self {
            shape,
            material: Some(material),
        }
    }

    /// Geometry that only casts shadows.
    pub fn occluder(shape: Shape) -> Self {
        Self {
            shape,
            material: None,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    /// Nearest hit; on success `ray.max_t` is narrowed to the hit parameter.
    pub fn intersect(&self, ray: &mut Ray) -> Option<Intersection<'_>> {
        let (t, dg) = self.shape.intersect(ray)?;
        ray.max_t = t;
        Some(Intersection {
            primitive: self,
            dg,
            world_to_object: self.shape.world_to_object(),
            t,
        })
    }

    pub fn intersects(&self, ray: &Ray) -> bool {
        self.shape.intersects(ray)
    }

    pub fn world_bound(&self) -> Aabb {
        self.shape.world_bound()
    }
}

/// Anything the scene can intersect.
#[derive(Debug, Clone)]
pub enum Primitive {
    Geometric(GeometricPrimitive),
    /// Unordered collection, tested exhaustively. The nearest hit wins.
    Aggregate(Vec<Primitive>),
}

impl Primitive {
    pub fn geometric(shape: Shape, material: Material) -> Self {
        Primitive::Geometric(GeometricPrimitive::new(shape, material))
    }

    /// Find the nearest hit inside the ray's interval.
    ///
    /// Each hit narrows `ray.max_t`, so later candidates only count when they
    /// are closer.
    pub fn intersect(&self, ray: &mut Ray) -> Option<Intersection<'_>> {
        match self {
            Primitive::Geometric(primitive) => primitive.intersect(ray),
            Primitive::Aggregate(primitives) => {
                let mut closest = None;
                for primitive in primitives {
                    if let Some(hit) = primitive.intersect(ray) {
                        closest = Some(hit);
                    }
                }
                closest
            }
        }
    }

    /// Occlusion query. Leaves the ray untouched.
    pub fn intersects(&self, ray: &Ray) -> bool {
        match self {
            Primitive::Geometric(primitive) => primitive.intersects(ray),
            Primitive::Aggregate(primitives) => primitives.iter().any(|p| p.intersects(ray)),
        }
    }

    pub fn world_bound(&self) -> Aabb {
        match self {
            Primitive::Geometric(primitive) => primitive.world_bound(),
            Primitive::Aggregate(primitives) => primitives
                .iter()
                .fold(Aabb::EMPTY, |acc, p| Aabb::surrounding(&acc, &p.world_bound())),
        }
    }

    /// Number of geometric primitives, recursively.
    pub fn len(&self) -> usize {
        match self {
            Primitive::Geometric(_) => 1,
            Primitive::Aggregate(primitives) => primitives.iter().map(Primitive::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<GeometricPrimitive> for Primitive {
    fn from(primitive: GeometricPrimitive) -> Self {
        Primitive::Geometric(primitive)
    }
}

impl FromIterator<Primitive> for Primitive {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        Primitive::Aggregate(iter.into_iter().collect())
    }
}

/// A successful ray-primitive query. Consumed to fetch the BSDF.
#[derive(Debug, Clone)]
pub struct Intersection<'a> {
    primitive: &'a GeometricPrimitive,
    dg: DifferentialGeometry<'a>,
    world_to_object: &'a Transform,
    t: f32,
}

impl<'a> Intersection<'a> {
    pub fn primitive(&self) -> &'a GeometricPrimitive {
        self.primitive
    }

    pub fn differential_geometry(&self) -> &DifferentialGeometry<'a> {
        &self.dg
    }

    pub fn world_to_object(&self) -> &'a Transform {
        self.world_to_object
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    /// Compute ray differentials at the hit and build the material's BSDF.
    pub fn into_bsdf(mut self, ray: &Ray) -> RenderResult<Bsdf<'a>> {
        let material = self.primitive.material().ok_or_else(|| {
            RenderError::NotSupported("shading a primitive without a material".to_string())
        })?;
        self.dg.compute_differentials(ray);
        Ok(material.get_bsdf(self.dg))
    }
}
