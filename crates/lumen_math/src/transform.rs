// Affine transforms with a cached inverse.
//
// Points pick up translation, vectors do not, and normals go through the
// inverse-transpose of the linear part.

use std::ops::Mul;

use glam::{Mat4, Vec3};

use crate::{Aabb, MathError, MathResult, Normal3, Point3, Ray, RayDifferential};

/// An invertible affine transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Mat4,
    inverse: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: Mat4::IDENTITY,
        inverse: Mat4::IDENTITY,
    };

    /// Wrap a matrix, computing its inverse.
    ///
    /// Fails with [`MathError::NonInvertibleTransform`] if the matrix is
    /// singular or not finite.
    pub fn new(matrix: Mat4) -> MathResult<Self> {
        let det = matrix.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(MathError::NonInvertibleTransform(det));
        }
        let inverse = matrix.inverse();
        if !inverse.is_finite() {
            return Err(MathError::NonInvertibleTransform(det));
        }
        Ok(Self { matrix, inverse })
    }

    pub fn translation(offset: Vec3) -> Self {
        Self {
            matrix: Mat4::from_translation(offset),
            inverse: Mat4::from_translation(-offset),
        }
    }

    /// Rotation of `angle` radians about `axis`.
    pub fn rotation(axis: Vec3, angle: f32) -> MathResult<Self> {
        let axis = axis.try_normalize().ok_or(MathError::DegenerateDirection(
            "rotation axis has zero length",
        ))?;
        let matrix = Mat4::from_axis_angle(axis, angle);
        Ok(Self {
            matrix,
            // Rotations are orthonormal
            inverse: matrix.transpose(),
        })
    }

    pub fn rotation_x(angle: f32) -> Self {
        let matrix = Mat4::from_rotation_x(angle);
        Self {
            matrix,
            inverse: matrix.transpose(),
        }
    }

    pub fn rotation_y(angle: f32) -> Self {
        let matrix = Mat4::from_rotation_y(angle);
        Self {
            matrix,
            inverse: matrix.transpose(),
        }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let matrix = Mat4::from_rotation_z(angle);
        Self {
            matrix,
            inverse: matrix.transpose(),
        }
    }

    /// Non-uniform scale. Any zero factor is rejected.
    pub fn scale(factors: Vec3) -> MathResult<Self> {
        Self::new(Mat4::from_scale(factors))
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    pub fn inverse_matrix(&self) -> &Mat4 {
        &self.inverse
    }

    /// The inverse transform. Free, since the inverse is cached.
    pub fn inverse(&self) -> Transform {
        Transform {
            matrix: self.inverse,
            inverse: self.matrix,
        }
    }

    #[inline]
    pub fn transform_point(&self, p: Point3) -> Point3 {
        Point3(self.matrix.transform_point3(p.0))
    }

    /// Transform a direction. Translation is ignored (w = 0).
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.matrix.transform_vector3(v)
    }

    /// Transform a normal by the inverse-transpose and renormalize.
    #[inline]
    pub fn transform_normal(&self, n: Normal3) -> Normal3 {
        Normal3::from_vector(self.inverse.transpose().transform_vector3(n.to_vec3()))
    }

    /// Transform origin and direction; the parameter interval and time are kept.
    pub fn transform_ray(&self, ray: &Ray) -> Ray {
        Ray {
            origin: self.transform_point(ray.origin),
            direction: self.transform_vector(ray.direction),
            min_t: ray.min_t,
            max_t: ray.max_t,
            time: ray.time,
            differential: ray.differential.map(|d| RayDifferential {
                rx_origin: self.transform_point(d.rx_origin),
                rx_direction: self.transform_vector(d.rx_direction),
                ry_origin: self.transform_point(d.ry_origin),
                ry_direction: self.transform_vector(d.ry_direction),
            }),
        }
    }

    /// Bound the eight transformed corners of `aabb`.
    ///
    /// Empty and unbounded boxes pass through unchanged.
    pub fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        if aabb.is_empty() || aabb.is_unbounded() {
            return *aabb;
        }

        let corners = aabb.corners().map(|c| self.transform_point(c));
        let mut lo = corners[0];
        let mut hi = corners[0];
        for &corner in &corners[1..] {
            lo = lo.min(corner);
            hi = hi.max(corner);
        }

        Aabb::from_points(lo, hi)
    }
}

/// `a * b` applies `b` first, then `a`.
impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            matrix: self.matrix * rhs.matrix,
            inverse: rhs.inverse * self.inverse,
        }
    }
}
