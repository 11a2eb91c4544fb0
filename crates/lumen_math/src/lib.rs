// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod camera;
mod error;
mod geometry;
mod interval;
mod quadratic;
mod ray;
mod transform;
mod viewport;

pub use aabb::Aabb;
pub use camera::{CameraFrame, Projection};
pub use error::{MathError, MathResult};
pub use geometry::{Normal3, Point3};
pub use interval::Interval;
pub use quadratic::solve_quadratic;
pub use ray::{Ray, RayDifferential};
pub use transform::Transform;
pub use viewport::Viewport;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_point_through_transform_and_ray() {
        let t = Transform::translation(Vec3::new(0.0, 0.0, 3.0));
        let ray = Ray::new(Point3::new(0.0, 0.0, 20.0), -Vec3::Z);
        let local = t.inverse().transform_ray(&ray);

        assert_eq!(local.at(7.0), Point3::new(0.0, 0.0, 10.0));
    }
}
