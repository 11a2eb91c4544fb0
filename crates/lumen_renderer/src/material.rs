//! Materials: turn a surface hit into a BSDF.

use crate::{Bsdf, Bxdf, Color, DifferentialGeometry};

/// Diffuse material with optional Oren-Nayar roughness.
#[derive(Debug, Clone, PartialEq)]
pub struct MatteMaterial {
    /// Diffuse reflectance
    pub kd: Color,
    /// Roughness in degrees; 0 means ideal Lambertian.
    pub sigma: f32,
}

impl MatteMaterial {
    pub fn new(kd: Color) -> Self {
        Self { kd, sigma: 0.0 }
    }

    /// Builder: set the roughness in degrees
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    fn bxdf(&self) -> Bxdf {
        if self.sigma == 0.0 {
            Bxdf::lambertian(self.kd)
        } else {
            Bxdf::oren_nayar(self.kd, self.sigma)
        }
    }
}

/// The closed set of materials.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Matte(MatteMaterial),
}

impl Material {
    /// Lambertian material with reflectance `kd`.
    pub fn matte(kd: Color) -> Self {
        Material::Matte(MatteMaterial::new(kd))
    }

    /// Build the BSDF at a hit. The geometric normal is the hit normal.
    pub fn get_bsdf<'a>(&self, dg: DifferentialGeometry<'a>) -> Bsdf<'a> {
        let geometric_normal = dg.normal();
        match self {
            Material::Matte(matte) => Bsdf::new(dg, geometric_normal).with_bxdf(matte.bxdf()),
        }
    }
}

impl From<MatteMaterial> for Material {
    fn from(matte: MatteMaterial) -> Self {
        Material::Matte(matte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;
    use lumen_math::{Normal3, Point3, Transform, Vec3};

    #[test]
    fn test_matte_attaches_single_term() {
        let shape = Shape::plane(Transform::IDENTITY, Point3::ORIGIN, Normal3::Y).unwrap();
        let dg = DifferentialGeometry::new(
            Point3::ORIGIN, Vec3::X, -Vec3::Z, Vec3::ZERO, Vec3::ZERO, 0.0, 0.0, &shape,
        );
        let green = Color::new(0.0, 1.0, 0.0);

        let bsdf = Material::matte(green).get_bsdf(dg.clone());
        assert_eq!(bsdf.bxdfs(), &[Bxdf::lambertian(green)]);
        assert_eq!(bsdf.geometric_normal(), Normal3::Y);
        assert_eq!(bsdf.evaluate(Vec3::Y, Vec3::Y), green);

        let rough: Material = MatteMaterial::new(green).with_sigma(20.0).into();
        let bsdf = rough.get_bsdf(dg);
        assert!(matches!(bsdf.bxdfs(), [Bxdf::OrenNayar { .. }]));
    }
}
