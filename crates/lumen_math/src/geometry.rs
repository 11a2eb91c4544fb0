//! Affine points and surface normals.
//!
//! Free directions are plain [`Vec3`]. Points and normals get their own
//! types because they transform differently: points pick up translation,
//! normals go through the inverse-transpose (see [`crate::Transform`]).

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// A position in 3D space.
#[derive(Debug, Copy, Clone, PartialEq, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct Point3(pub Vec3);

impl Point3 {
    pub const ORIGIN: Point3 = Point3(Vec3::ZERO);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.0.z
    }

    /// The vector from the origin to this point.
    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        self.0
    }

    pub fn distance(self, other: Point3) -> f32 {
        (self - other).length()
    }

    pub fn distance_squared(self, other: Point3) -> f32 {
        (self - other).length_squared()
    }

    /// Component-wise minimum.
    pub fn min(self, other: Point3) -> Point3 {
        Point3(self.0.min(other.0))
    }

    /// Component-wise maximum.
    pub fn max(self, other: Point3) -> Point3 {
        Point3(self.0.max(other.0))
    }

    pub fn abs_diff_eq(self, other: Point3, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl From<Vec3> for Point3 {
    fn from(v: Vec3) -> Self {
        Self(v)
    }
}

impl Add<Vec3> for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, rhs: Vec3) -> Point3 {
        Point3(self.0 + rhs)
    }
}

impl AddAssign<Vec3> for Point3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        self.0 += rhs;
    }
}

impl Sub<Vec3> for Point3 {
    type Output = Point3;

    #[inline]
    fn sub(self, rhs: Vec3) -> Point3 {
        Point3(self.0 - rhs)
    }
}

impl Sub for Point3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, rhs: Point3) -> Vec3 {
        self.0 - rhs.0
    }
}

/// A unit-length surface normal.
///
/// Constructors normalize, so a `Normal3` built from a non-zero vector is
/// always unit length.
#[derive(Debug, Copy, Clone, PartialEq, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct Normal3(Vec3);

impl Normal3 {
    pub const X: Normal3 = Normal3(Vec3::X);
    pub const Y: Normal3 = Normal3(Vec3::Y);
    pub const Z: Normal3 = Normal3(Vec3::Z);

    /// Create a normal from components, normalizing the result.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self::from_vector(Vec3::new(x, y, z))
    }

    /// Normalize `v` into a normal. A zero vector yields the zero normal.
    #[inline]
    pub fn from_vector(v: Vec3) -> Self {
        Self(v.normalize_or_zero())
    }

    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        self.0
    }

    #[inline]
    pub fn dot(self, v: Vec3) -> f32 {
        self.0.dot(v)
    }

    #[inline]
    pub fn abs_dot(self, v: Vec3) -> f32 {
        self.0.dot(v).abs()
    }

    /// Flip this normal into the hemisphere of `v`.
    pub fn face_forward(self, v: Vec3) -> Normal3 {
        if self.0.dot(v) < 0.0 {
            -self
        } else {
            self
        }
    }

    pub fn is_zero(self) -> bool {
        self.0 == Vec3::ZERO
    }
}

impl From<Normal3> for Vec3 {
    fn from(n: Normal3) -> Vec3 {
        n.0
    }
}

impl Neg for Normal3 {
    type Output = Normal3;

    #[inline]
    fn neg(self) -> Normal3 {
        Normal3(-self.0)
    }
}

impl Mul<f32> for Normal3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        self.0 * rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_vector_arithmetic() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let q = p + Vec3::new(1.0, 0.0, -1.0);

        assert_eq!(q, Point3::new(2.0, 2.0, 2.0));
        assert_eq!(q - p, Vec3::new(1.0, 0.0, -1.0));
        assert_eq!(q - Vec3::ONE, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_point_distance() {
        let a = Point3::ORIGIN;
        let b = Point3::new(3.0, 4.0, 0.0);

        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_squared(b), 25.0);
    }

    #[test]
    fn test_normal_is_normalized() {
        let n = Normal3::new(0.0, 10.0, 0.0);
        assert_eq!(n, Normal3::Y);
        assert!((n.to_vec3().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normal_zero_vector() {
        let n = Normal3::from_vector(Vec3::ZERO);
        assert!(n.is_zero());
    }

    #[test]
    fn test_face_forward() {
        let n = Normal3::Z;
        assert_eq!(n.face_forward(Vec3::new(0.0, 0.0, -2.0)), -Normal3::Z);
        assert_eq!(n.face_forward(Vec3::new(0.0, 1.0, 0.5)), Normal3::Z);
    }
}
