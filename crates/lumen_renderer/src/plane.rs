//! Infinite plane.

use lumen_math::{Aabb, Normal3, Point3, Ray, Vec3};

use crate::{LocalHit, RenderError, RenderResult};

/// Infinite plane through `point` with `normal`, in object space.
///
/// `(u, v)` are the hit's coordinates along a tangent frame fixed at
/// construction, measured from `point`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    point: Point3,
    normal: Normal3,
    tangent: Vec3,
    bitangent: Vec3,
}

impl Plane {
    pub fn new(point: Point3, normal: Normal3) -> RenderResult<Self> {
        if normal.is_zero() || !normal.to_vec3().is_finite() {
            return Err(RenderError::InvalidShape("plane normal must be non-zero"));
        }
        let n = normal.to_vec3();
        let tangent = n.any_orthonormal_vector();
        let bitangent = n.cross(tangent);
        Ok(Self {
            point,
            normal,
            tangent,
            bitangent,
        })
    }

    pub fn point(&self) -> Point3 {
        self.point
    }

    pub fn normal(&self) -> Normal3 {
        self.normal
    }

    /// The plane is unbounded.
    pub fn object_bound(&self) -> Aabb {
        Aabb::UNIVERSE
    }

    /// Parameter of the crossing, if it lies strictly inside the ray's interval.
    pub fn hit_t(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(ray.direction);
        if denom == 0.0 {
            return None;
        }
        let t = self.normal.dot(self.point - ray.origin) / denom;
        ray.interval().surrounds(t).then_some(t)
    }

    pub fn intersect(&self, ray: &Ray) -> Option<LocalHit> {
        let t = self.hit_t(ray)?;
        let point = ray.at(t);
        let offset = point - self.point;

        Some(LocalHit {
            t,
            point,
            dpdu: self.tangent,
            dpdv: self.bitangent,
            dndu: Vec3::ZERO,
            dndv: Vec3::ZERO,
            u: offset.dot(self.tangent),
            v: offset.dot(self.bitangent),
        })
    }
}
