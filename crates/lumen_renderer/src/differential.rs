//! Local surface frame at a ray hit.

use lumen_math::{Normal3, Point3, Ray, Vec3};

use crate::Shape;

/// Position, parametric derivatives and normal at a surface hit, in world space.
///
/// Created by [`Shape::intersect`] and owned by the resulting intersection.
/// The only mutation after construction is [`compute_differentials`], which
/// runs once and caches its result.
///
/// [`compute_differentials`]: DifferentialGeometry::compute_differentials
#[derive(Debug, Clone)]
pub struct DifferentialGeometry<'a> {
    point: Point3,
    normal: Normal3,
    dpdu: Vec3,
    dpdv: Vec3,
    dndu: Vec3,
    dndv: Vec3,
    u: f32,
    v: f32,
    shape: &'a Shape,
    differentials: Option<SurfaceDifferentials>,
}

/// Screen-space derivatives of the hit: how position and `(u, v)` change per
/// pixel step in x and y. All zero when the ray carried no differentials.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceDifferentials {
    pub dpdx: Vec3,
    pub dpdy: Vec3,
    pub dudx: f32,
    pub dvdx: f32,
    pub dudy: f32,
    pub dvdy: f32,
}

impl<'a> DifferentialGeometry<'a> {
    /// The normal is `normalize(dpdu × dpdv)`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        point: Point3,
        dpdu: Vec3,
        dpdv: Vec3,
        dndu: Vec3,
        dndv: Vec3,
        u: f32,
        v: f32,
        shape: &'a Shape,
    ) -> Self {
        Self {
            point,
            normal: Normal3::from_vector(dpdu.cross(dpdv)),
            dpdu,
            dpdv,
            dndu,
            dndv,
            u,
            v,
            shape,
            differentials: None,
        }
    }

    #[inline]
    pub fn point(&self) -> Point3 {
        self.point
    }

    #[inline]
    pub fn normal(&self) -> Normal3 {
        self.normal
    }

    #[inline]
    pub fn dpdu(&self) -> Vec3 {
        self.dpdu
    }

    #[inline]
    pub fn dpdv(&self) -> Vec3 {
        self.dpdv
    }

    #[inline]
    pub fn dndu(&self) -> Vec3 {
        self.dndu
    }

    #[inline]
    pub fn dndv(&self) -> Vec3 {
        self.dndv
    }

    /// Parametric coordinates of the hit.
    #[inline]
    pub fn uv(&self) -> (f32, f32) {
        (self.u, self.v)
    }

    /// The shape that was hit.
    pub fn shape(&self) -> &'a Shape {
        self.shape
    }

    /// Differentials computed so far, if any.
    pub fn differentials(&self) -> Option<SurfaceDifferentials> {
        self.differentials
    }

    /// Estimate the ray footprint on the surface.
    ///
    /// Idempotent: the first call computes and caches, later calls return the
    /// cached value regardless of `ray`.
    pub fn compute_differentials(&mut self, ray: &Ray) -> SurfaceDifferentials {
        if let Some(cached) = self.differentials {
            return cached;
        }
        let computed = self.estimate_differentials(ray);
        self.differentials = Some(computed);
        computed
    }

    fn estimate_differentials(&self, ray: &Ray) -> SurfaceDifferentials {
        let Some(rd) = ray.differential else {
            return SurfaceDifferentials::default();
        };
        if self.normal.is_zero() {
            return SurfaceDifferentials::default();
        }

        // Intersect the offset rays with the tangent plane at the hit
        let n = self.normal;
        let d = -n.dot(self.point.to_vec3());
        let (Some(px), Some(py)) = (
            tangent_plane_hit(n, d, rd.rx_origin, rd.rx_direction),
            tangent_plane_hit(n, d, rd.ry_origin, rd.ry_direction),
        ) else {
            return SurfaceDifferentials::default();
        };
        let dpdx = px - self.point;
        let dpdy = py - self.point;

        // Solve the overdetermined system on the two axes the normal leans least on
        let nv = n.to_vec3().abs();
        let (a0, a1) = if nv.x > nv.y && nv.x > nv.z {
            (1, 2)
        } else if nv.y > nv.z {
            (0, 2)
        } else {
            (0, 1)
        };
        let a = [
            [self.dpdu[a0], self.dpdv[a0]],
            [self.dpdu[a1], self.dpdv[a1]],
        ];
        let (dudx, dvdx) = solve_2x2(a, [dpdx[a0], dpdx[a1]]).unwrap_or((0.0, 0.0));
        let (dudy, dvdy) = solve_2x2(a, [dpdy[a0], dpdy[a1]]).unwrap_or((0.0, 0.0));

        SurfaceDifferentials {
            dpdx,
            dpdy,
            dudx,
            dvdx,
            dudy,
            dvdy,
        }
    }
}

/// Where the line `origin + t * direction` crosses the plane `n·p + d = 0`.
fn tangent_plane_hit(n: Normal3, d: f32, origin: Point3, direction: Vec3) -> Option<Point3> {
    let denom = n.dot(direction);
    if denom == 0.0 {
        return None;
    }
    let t = -(n.dot(origin.to_vec3()) + d) / denom;
    Some(origin + direction * t)
}

/// Solve `a * [x, y]^T = b` by Cramer's rule.
fn solve_2x2(a: [[f32; 2]; 2], b: [f32; 2]) -> Option<(f32, f32)> {
    let det = a[0][0] * a[1][1] - a[0][1] * a[1][0];
    if det.abs() < 1e-10 {
        return None;
    }
    let x = (a[1][1] * b[0] - a[0][1] * b[1]) / det;
    let y = (a[0][0] * b[1] - a[1][0] * b[0]) / det;
    if x.is_finite() && y.is_finite() {
        Some((x, y))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::{RayDifferential, Transform};

    fn unit_plane() -> Shape {
        Shape::plane(Transform::IDENTITY, Point3::ORIGIN, Normal3::Y).unwrap()
    }

    #[test]
    fn test_normal_from_partials() {
        let shape = unit_plane();
        let dg = DifferentialGeometry::new(
            Point3::ORIGIN,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -3.0),
            Vec3::ZERO,
            Vec3::ZERO,
            0.0,
            0.0,
            &shape,
        );

        assert_eq!(dg.normal(), Normal3::Y);
    }

    #[test]
    fn test_differentials_without_ray_differential_are_zero() {
        let shape = unit_plane();
        let mut dg = DifferentialGeometry::new(
            Point3::ORIGIN, Vec3::X, -Vec3::Z, Vec3::ZERO, Vec3::ZERO, 0.0, 0.0, &shape,
        );
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);

        assert!(dg.differentials().is_none());
        assert_eq!(dg.compute_differentials(&ray), SurfaceDifferentials::default());
        assert!(dg.differentials().is_some());
    }

    #[test]
    fn test_differentials_on_flat_surface() {
        let shape = unit_plane();
        // u along +x, v along -z, normal +y
        let mut dg = DifferentialGeometry::new(
            Point3::ORIGIN, Vec3::X, -Vec3::Z, Vec3::ZERO, Vec3::ZERO, 0.0, 0.0, &shape,
        );
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), -Vec3::Y).with_differential(RayDifferential {
            rx_origin: Point3::new(0.5, 1.0, 0.0),
            rx_direction: -Vec3::Y,
            ry_origin: Point3::new(0.0, 1.0, 0.25),
            ry_direction: -Vec3::Y,
        });

        let diff = dg.compute_differentials(&ray);

        assert!(diff.dpdx.abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-5));
        assert!(diff.dpdy.abs_diff_eq(Vec3::new(0.0, 0.0, 0.25), 1e-5));
        assert!((diff.dudx - 0.5).abs() < 1e-5);
        assert!(diff.dvdx.abs() < 1e-5);
        assert!(diff.dudy.abs() < 1e-5);
        assert!((diff.dvdy + 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_compute_differentials_is_idempotent() {
        let shape = unit_plane();
        let mut dg = DifferentialGeometry::new(
            Point3::ORIGIN, Vec3::X, -Vec3::Z, Vec3::ZERO, Vec3::ZERO, 0.0, 0.0, &shape,
        );
        let with_diff = Ray::new(Point3::new(0.0, 1.0, 0.0), -Vec3::Y).with_differential(RayDifferential {
            rx_origin: Point3::new(1.0, 1.0, 0.0),
            rx_direction: -Vec3::Y,
            ry_origin: Point3::new(0.0, 1.0, 1.0),
            ry_direction: -Vec3::Y,
        });
        let plain = Ray::new(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);

        let first = dg.compute_differentials(&with_diff);
        let second = dg.compute_differentials(&plain);

        assert_eq!(first, second);
        assert!(first.dudx > 0.0);
    }
}
