//! Sphere primitive for ray tracing.
//!
//! Object-space sphere centred on the origin. The parametrization follows
//! the usual full-sphere convention: `phi` in [0, 2π) around +z gives `u`,
//! and `theta` swept from the south pole (θ = π) to the north pole (θ = 0)
//! gives `v`, so `dpdu × dpdv` points outward.

use std::f32::consts::{PI, TAU};

use lumen_math::{solve_quadratic, Aabb, Point3, Ray, Vec3};

use crate::{LocalHit, RenderError, RenderResult};

const PHI_MAX: f32 = TAU;
const THETA_MIN: f32 = PI;
const THETA_MAX: f32 = 0.0;

/// A sphere of the given radius around the object-space origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    radius: f32,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(radius: f32) -> RenderResult<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(RenderError::InvalidShape("sphere radius must be positive"));
        }
        Ok(Self { radius })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn object_bound(&self) -> Aabb {
        let r = self.radius;
        Aabb::from_points(Point3::new(-r, -r, -r), Point3::new(r, r, r))
    }

    /// Parameter of the nearest hit inside `[ray.min_t, ray.max_t]`.
    ///
    /// The near root wins unless it lies before `min_t`, in which case the far
    /// root is tried (the ray starts inside the sphere).
    pub fn hit_t(&self, ray: &Ray) -> Option<f32> {
        let origin = ray.origin.to_vec3();
        let a = ray.direction.length_squared();
        let b = 2.0 * origin.dot(ray.direction);
        let c = origin.length_squared() - self.radius * self.radius;

        let (t0, t1) = solve_quadratic(a, b, c)?;
        if t0 > ray.max_t || t1 < ray.min_t {
            return None;
        }

        let range = ray.interval();
        if range.contains(t0) {
            Some(t0)
        } else if range.contains(t1) {
            Some(t1)
        } else {
            None
        }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<LocalHit> {
        let t = self.hit_t(ray)?;
        let p = ray.at(t);
        let (x, y, z) = (p.x(), p.y(), p.z());

        let mut phi = y.atan2(x);
        if phi < 0.0 {
            phi += TAU;
        }
        let u = phi / PHI_MAX;
        let theta = (z / self.radius).clamp(-1.0, 1.0).acos();
        let v = (theta - THETA_MIN) / (THETA_MAX - THETA_MIN);

        let theta_range = THETA_MAX - THETA_MIN;
        let z_radius = (x * x + y * y).sqrt();
        let (cos_phi, sin_phi, dpdu, dpdv) = if z_radius == 0.0 {
            // Pole: phi is undefined, pick phi = π/2 and derive dpdu from dpdv
            log::warn!("sphere hit at parametric pole, using fallback tangents");
            let (cos_phi, sin_phi) = (0.0, 1.0);
            let dpdv = theta_range
                * Vec3::new(z * cos_phi, z * sin_phi, -self.radius * theta.sin());
            let dpdu = dpdv.cross(p.to_vec3());
            (cos_phi, sin_phi, dpdu, dpdv)
        } else {
            let inv_z_radius = 1.0 / z_radius;
            let (cos_phi, sin_phi) = (x * inv_z_radius, y * inv_z_radius);
            let dpdu = Vec3::new(-PHI_MAX * y, PHI_MAX * x, 0.0);
            let dpdv = theta_range
                * Vec3::new(z * cos_phi, z * sin_phi, -self.radius * theta.sin());
            (cos_phi, sin_phi, dpdu, dpdv)
        };

        // Second partials
        let d2pduu = -PHI_MAX * PHI_MAX * Vec3::new(x, y, 0.0);
        let d2pduv = theta_range * z * PHI_MAX * Vec3::new(-sin_phi, cos_phi, 0.0);
        let d2pdvv = -theta_range * theta_range * p.to_vec3();

        let (dndu, dndv) = weingarten(dpdu, dpdv, d2pduu, d2pduv, d2pdvv);

        Some(LocalHit {
            t,
            point: p,
            dpdu,
            dpdv,
            dndu,
            dndv,
            u,
            v,
        })
    }
}

/// Normal derivatives from the first and second fundamental forms.
///
/// A singular first fundamental form gives zero derivatives instead of NaN.
/// Singularity is judged relative to `E·G`, so tiny spheres keep their
/// curvature.
fn weingarten(dpdu: Vec3, dpdv: Vec3, d2pduu: Vec3, d2pduv: Vec3, d2pdvv: Vec3) -> (Vec3, Vec3) {
    let e1 = dpdu.length_squared();
    let f1 = dpdu.dot(dpdv);
    let g1 = dpdv.length_squared();
    let n = dpdu.cross(dpdv).normalize_or_zero();
    let e2 = n.dot(d2pduu);
    let f2 = n.dot(d2pduv);
    let g2 = n.dot(d2pdvv);

    let egf2 = e1 * g1 - f1 * f1;
    if egf2 == 0.0 || egf2.abs() <= f32::EPSILON * e1 * g1 {
        log::warn!("singular first fundamental form, zeroing normal derivatives");
        return (Vec3::ZERO, Vec3::ZERO);
    }
    let inv_egf2 = 1.0 / egf2;

    let dndu = (f2 * f1 - e2 * g1) * inv_egf2 * dpdu + (e2 * f1 - f2 * e1) * inv_egf2 * dpdv;
    let dndv = (g2 * f1 - f2 * g1) * inv_egf2 * dpdu + (f2 * f1 - g2 * e1) * inv_egf2 * dpdv;
    (dndu, dndv)
}
