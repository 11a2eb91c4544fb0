//! Lumen renderer - CPU Whitted ray tracing
//!
//! Offline kernel that turns a fully built scene into pixel colors:
//! - Shapes intersected in object space (sphere, infinite plane)
//! - Regular and stratified pixel samplers
//! - Orthographic and perspective projection cameras
//! - Matte materials (Lambertian, Oren-Nayar)
//! - Point and directional lights with shadow rays
//! - Whitted direct-lighting integrator
//!
//! Rendering is single-threaded: [`Scene::render`] pulls one sample at a
//! time, shades it and hands the color to a [`Film`].

mod bsdf;
mod camera;
mod color;
mod differential;
mod error;
mod film;
mod integrator;
mod light;
mod material;
mod plane;
mod primitive;
mod renderer;
mod sampler;
mod scene;
mod shape;
mod sphere;

pub use bsdf::{Bsdf, Bxdf};
pub use camera::{Camera, ProjectionCamera};
pub use color::{color_to_rgba, is_black, linear_to_gamma, Color};
pub use differential::{DifferentialGeometry, SurfaceDifferentials};
pub use error::{RenderError, RenderResult};
pub use film::{Film, ImageFilm};
pub use integrator::{Integrator, WhittedIntegrator};
pub use light::{DirectionalLight, Light, LightSample, PointLight, VisibilityTester};
pub use material::{Material, MatteMaterial};
pub use plane::Plane;
pub use primitive::{GeometricPrimitive, Intersection, Primitive};
pub use renderer::{render, RenderConfig};
pub use sampler::{RegularSampler, Sample, Sampler, Samples, StratifiedSampler};
pub use scene::{RenderStats, Scene};
pub use shape::{Geometry, LocalHit, Shape};
pub use sphere::Sphere;

/// Re-export the math types used throughout the public API
pub use lumen_math::{
    Aabb, CameraFrame, Interval, MathError, Normal3, Point3, Projection, Ray, RayDifferential,
    Transform, UVec2, Vec2, Vec3,
};
