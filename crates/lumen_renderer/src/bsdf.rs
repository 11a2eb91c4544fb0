//! Local reflectance at a surface hit.
//!
//! A [`Bsdf`] owns the hit's differential geometry, a shading frame built from
//! `dpdu` and the surface normal, and the [`Bxdf`] terms a material attached.
//! Directions are given in world space and moved into the shading frame
//! before the terms see them: `x` along the tangent, `y` along the bitangent,
//! `z` along the normal.
//!
//! Reflectance values carry no `1/π` factor; the integrator multiplies by
//! radiance and the cosine term directly.

use lumen_math::{Normal3, Vec3};

use crate::{Color, DifferentialGeometry};

/// A single reflectance term.
#[derive(Debug, Clone, PartialEq)]
pub enum Bxdf {
    /// Ideal diffuse: constant reflectance in every direction.
    Lambertian { reflectance: Color },
    /// Rough diffuse (Oren-Nayar), with precomputed `A` and `B` terms.
    OrenNayar { reflectance: Color, a: f32, b: f32 },
}

impl Bxdf {
    pub fn lambertian(reflectance: Color) -> Self {
        Bxdf::Lambertian { reflectance }
    }

    /// Oren-Nayar term for a roughness of `sigma_degrees`.
    pub fn oren_nayar(reflectance: Color, sigma_degrees: f32) -> Self {
        let sigma = sigma_degrees.to_radians();
        let sigma2 = sigma * sigma;
        Bxdf::OrenNayar {
            reflectance,
            a: 1.0 - sigma2 / (2.0 * (sigma2 + 0.33)),
            b: 0.45 * sigma2 / (sigma2 + 0.09),
        }
    }

    /// Reflectance for the pair of shading-frame directions.
    pub fn evaluate(&self, outgoing: Vec3, incoming: Vec3) -> Color {
        match *self {
            Bxdf::Lambertian { reflectance } => reflectance,
            Bxdf::OrenNayar { reflectance, a, b } => {
                reflectance * oren_nayar_factor(outgoing, incoming, a, b)
            }
        }
    }
}

fn sin_theta(w: Vec3) -> f32 {
    (1.0 - w.z * w.z).max(0.0).sqrt()
}

fn cos_sin_phi(w: Vec3) -> (f32, f32) {
    let sin_theta = sin_theta(w);
    if sin_theta == 0.0 {
        return (1.0, 0.0);
    }
    (
        (w.x / sin_theta).clamp(-1.0, 1.0),
        (w.y / sin_theta).clamp(-1.0, 1.0),
    )
}

fn oren_nayar_factor(wo: Vec3, wi: Vec3, a: f32, b: f32) -> f32 {
    let sin_theta_i = sin_theta(wi);
    let sin_theta_o = sin_theta(wo);

    // cos(phi_i - phi_o), clamped to the forward half
    let max_cos = if sin_theta_i > 1e-4 && sin_theta_o > 1e-4 {
        let (cos_phi_i, sin_phi_i) = cos_sin_phi(wi);
        let (cos_phi_o, sin_phi_o) = cos_sin_phi(wo);
        (cos_phi_i * cos_phi_o + sin_phi_i * sin_phi_o).max(0.0)
    } else {
        0.0
    };

    let (sin_alpha, tan_beta) = if wi.z.abs() > wo.z.abs() {
        (sin_theta_o, sin_theta_i / wi.z.abs())
    } else {
        (sin_theta_i, sin_theta_o / wo.z.abs().max(1e-6))
    };

    a + b * max_cos * sin_alpha * tan_beta
}

/// Reflectance model at one intersection.
#[derive(Debug, Clone)]
pub struct Bsdf<'a> {
    dg: DifferentialGeometry<'a>,
    geometric_normal: Normal3,
    bxdfs: Vec<Bxdf>,
    tangent: Vec3,
    bitangent: Vec3,
    normal: Vec3,
}

impl<'a> Bsdf<'a> {
    /// Empty BSDF with a shading frame from `dg`.
    ///
    /// The tangent is `normalize(dpdu)`; a zero `dpdu` falls back to an
    /// arbitrary vector orthogonal to the normal.
    pub fn new(dg: DifferentialGeometry<'a>, geometric_normal: Normal3) -> Self {
        let normal = dg.normal().to_vec3();
        let tangent = dg
            .dpdu()
            .try_normalize()
            .unwrap_or_else(|| normal.any_orthonormal_vector());
        let bitangent = normal.cross(tangent);
        Self {
            dg,
            geometric_normal,
            bxdfs: Vec::new(),
            tangent,
            bitangent,
            normal,
        }
    }

    /// Attach another term; terms are evaluated in insertion order.
    pub fn add(&mut self, bxdf: Bxdf) {
        self.bxdfs.push(bxdf);
    }

    pub fn with_bxdf(mut self, bxdf: Bxdf) -> Self {
        self.add(bxdf);
        self
    }

    pub fn bxdfs(&self) -> &[Bxdf] {
        &self.bxdfs
    }

    pub fn differential_geometry(&self) -> &DifferentialGeometry<'a> {
        &self.dg
    }

    /// Geometry used for shading. Same as the hit geometry until shapes
    /// provide perturbed shading normals.
    pub fn shading_geometry(&self) -> &DifferentialGeometry<'a> {
        &self.dg
    }

    pub fn geometric_normal(&self) -> Normal3 {
        self.geometric_normal
    }

    pub fn shading_normal(&self) -> Normal3 {
        self.dg.normal()
    }

    /// Express a world-space direction in the shading frame.
    #[inline]
    pub fn world_to_local(&self, v: Vec3) -> Vec3 {
        Vec3::new(v.dot(self.tangent), v.dot(self.bitangent), v.dot(self.normal))
    }

    /// Express a shading-frame direction in world space.
    #[inline]
    pub fn local_to_world(&self, v: Vec3) -> Vec3 {
        self.tangent * v.x + self.bitangent * v.y + self.normal * v.z
    }

    /// Sum of every attached term for the given world-space directions.
    pub fn evaluate(&self, outgoing_world: Vec3, incoming_world: Vec3) -> Color {
        let outgoing = self.world_to_local(outgoing_world);
        let incoming = self.world_to_local(incoming_world);
        self.bxdfs
            .iter()
            .fold(Color::ZERO, |acc, bxdf| acc + bxdf.evaluate(outgoing, incoming))
    }
}
